/*
 * Copyright (C) 2022 Open Source Robotics Foundation
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
*/

use crate::{
    algorithm::{
        tree::{NodeContainer, Tree, TreeNode},
        Algorithm, Coherent, MinimumCostBound, QueueLength, SearchStatus, Solvable,
    },
    config::{Discretization, Parameters},
    domain::{
        Cell, CellRecord, Cost, CostFunction, DominanceMap, GoalRegion, Heuristic, InputSampler,
        Inputs, Obstacles, Partition,
    },
    error::{GlcError, Role},
    motion::{Integrator, Segment, Span, State, Trajectory},
    planner::{halt::StepLimit, Planner},
};
use anyhow::anyhow;
use log::{debug, trace};

/// The generalized label correcting algorithm.
///
/// Each expansion holds every sampled input for `expand_time` and integrates
/// the dynamics from the expanded node. The state space is partitioned into
/// cells, and only the cheapest node to reach each cell survives, which keeps
/// the search tree finite for a given resolution.
#[derive(Debug, Clone)]
pub struct Glc<Int, Obs, CostFn, H> {
    parameters: Parameters,
    discretization: Discretization,
    inputs: Inputs,
    integrator: Int,
    obstacles: Obs,
    cost: CostFn,
    heuristic: H,
}

impl<Int, Obs, CostFn, H> Glc<Int, Obs, CostFn, H>
where
    Int: Integrator,
    Obs: Obstacles,
    CostFn: CostFunction,
    H: Heuristic,
{
    /// Validate the parameters, sample the inputs at the configured
    /// resolution, and derive the discretization from the Lipschitz bound of
    /// the integrator's model.
    pub fn new<Sampler: InputSampler>(
        parameters: Parameters,
        sampler: &Sampler,
        integrator: Int,
        obstacles: Obs,
        cost: CostFn,
        heuristic: H,
    ) -> Result<Self, GlcError> {
        parameters.validate()?;
        let discretization = parameters.discretize(integrator.lipschitz_constant())?;
        let inputs = sampler
            .sample(parameters.res)
            .map_err(GlcError::from_role(Role::Inputs))?;
        inputs.validate(parameters.control_dim)?;

        debug!(
            "Discretized with {} inputs: expand_time {}, depth_limit {}, cell_size {}",
            inputs.len(),
            discretization.expand_time,
            discretization.depth_limit,
            discretization.cell_size,
        );

        Ok(Self {
            parameters,
            discretization,
            inputs,
            integrator,
            obstacles,
            cost,
            heuristic,
        })
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn discretization(&self) -> &Discretization {
        &self.discretization
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    pub fn integrator(&self) -> &Int {
        &self.integrator
    }

    /// Plan from the configured start state.
    pub fn run<G: GoalRegion>(&self, goal: G) -> Result<PlannerOutput, GlcError> {
        self.run_from(self.parameters.start(), goal)
    }

    /// Plan from the given start state. The search gives up after `max_iter`
    /// iterations.
    pub fn run_from<G: GoalRegion>(&self, start: State, goal: G) -> Result<PlannerOutput, GlcError> {
        let mut search = Planner::new_haltable(self, StepLimit::new(Some(self.parameters.max_iter)))
            .into_search(start, goal)?;

        let status = search.solve()?;
        let memory = search.memory_mut();
        let outcome = match status {
            SearchStatus::Solved(solution) => Outcome::Succeeded(solution),
            SearchStatus::Impossible | SearchStatus::Incomplete => {
                memory.status = QueryState::Exhausted;
                let incumbent = match memory.incumbent {
                    Some(incumbent) => Some(memory.solution(&incumbent)?),
                    None => None,
                };
                Outcome::Exhausted { incumbent }
            }
        };

        debug!(
            "Query {:?} after {} iterations: {} expansions, {} nodes, {} cells, {} infeasible motions",
            memory.status,
            memory.iterations,
            memory.expansions,
            memory.tree.arena.len(),
            memory.cells.len(),
            memory.discarded,
        );

        Ok(PlannerOutput {
            outcome,
            iterations: memory.iterations,
            expansions: memory.expansions,
            nodes: memory.tree.arena.len(),
            cells: memory.cells.sorted(),
        })
    }

    fn estimate(&self, state: &State) -> Result<f64, GlcError> {
        let estimate = self
            .heuristic
            .cost_to_go(state)
            .map_err(GlcError::from_role(Role::Heuristic))?;

        if estimate.is_nan() || estimate < 0.0 {
            return Err(GlcError::Collaborator {
                role: Role::Heuristic,
                source: anyhow!("Estimates must be non-negative, but found {estimate}"),
            });
        }

        Ok(estimate)
    }

    fn segment_cost(&self, segment: &Segment, t0: f64, tf: f64) -> Result<f64, GlcError> {
        let cost = self
            .cost
            .cost(&segment.trajectory, &segment.controls, t0, tf)
            .map_err(GlcError::from_role(Role::Cost))?;

        if !cost.is_finite() || cost < 0.0 {
            return Err(GlcError::Collaborator {
                role: Role::Cost,
                source: anyhow!("Costs must be non-negative and finite, but found {cost}"),
            });
        }

        Ok(cost)
    }
}

/// Ask the goal when a trajectory first enters it, keeping the answer inside
/// the trajectory's domain.
fn goal_test<G: GoalRegion>(goal: &G, trajectory: &Trajectory) -> Result<Option<f64>, GlcError> {
    let hit = goal.test(trajectory).map_err(GlcError::from_role(Role::Goal))?;
    match hit {
        Some(time) if !time.is_finite() => Err(GlcError::Collaborator {
            role: Role::Goal,
            source: anyhow!("The goal reported an arrival at time {time}"),
        }),
        Some(time) => Ok(Some(
            time.clamp(trajectory.initial_time(), trajectory.finish_time()),
        )),
        None => Ok(None),
    }
}

impl<Int, Obs, CostFn, H> Algorithm for Glc<Int, Obs, CostFn, H> {
    type Memory = Memory;
}

impl<Int, Obs, CostFn, H, G> Coherent<State, G> for Glc<Int, Obs, CostFn, H>
where
    Int: Integrator,
    Obs: Obstacles,
    CostFn: CostFunction,
    H: Heuristic,
    G: GoalRegion,
{
    type InitError = GlcError;

    fn initialize(&self, start: State, goal: &G) -> Result<Self::Memory, Self::InitError> {
        self.parameters.check_start(start.iter().copied())?;
        let estimate = self.estimate(&start)?;
        let hit = goal_test(goal, &Trajectory::point(0.0, start.clone()))?;

        let mut cells = DominanceMap::new(Partition::new(self.discretization.cell_size));
        let cell = cells.key_for(&start);
        let mut tree = Tree::new();
        let root = tree.push_node(Node {
            state: start,
            time: 0.0,
            cost: 0.0,
            remaining_cost_estimate: estimate,
            depth: 0,
            cell: cell.clone(),
            parent: None,
        });
        let _ = cells.improve(cell, CellRecord { cost: 0.0, node: root });

        let incumbent = hit.map(|hit_time| Incumbent {
            node: root,
            cost: 0.0,
            hit_time,
        });

        Ok(Memory {
            tree,
            cells,
            incumbent,
            status: QueryState::Running,
            iterations: 0,
            expansions: 0,
            discarded: 0,
        })
    }
}

impl<Int, Obs, CostFn, H, G> Solvable<G> for Glc<Int, Obs, CostFn, H>
where
    Int: Integrator,
    Obs: Obstacles,
    CostFn: CostFunction,
    H: Heuristic,
    G: GoalRegion,
{
    type Solution = Solution;
    type StepError = GlcError;

    fn step(
        &self,
        memory: &mut Self::Memory,
        goal: &G,
    ) -> Result<SearchStatus<Self::Solution>, Self::StepError> {
        memory.iterations += 1;

        if let Some(incumbent) = memory.incumbent {
            // With an admissible heuristic nothing left in the queue can
            // lead to a cheaper arrival.
            let settled = memory
                .tree
                .minimum_cost_bound()
                .map_or(true, |bound| incumbent.cost <= bound.0);
            if settled {
                memory.status = QueryState::Succeeded;
                return Ok(SearchStatus::Solved(memory.solution(&incumbent)?));
            }
        }

        let ticket = match memory.tree.pop_ticket() {
            Some(ticket) => ticket,
            None => {
                memory.status = QueryState::Exhausted;
                return Ok(SearchStatus::Impossible);
            }
        };

        let parent_id = ticket.node_id;
        let (state, time, cost, depth) = {
            let node = memory.tree.arena.get_node(parent_id)?;
            if memory.cells.is_superseded(&node.cell, node.cost) {
                // A cheaper node claimed this cell after this one was queued
                return Ok(SearchStatus::Incomplete);
            }

            if node.depth >= self.discretization.depth_limit {
                return Ok(SearchStatus::Incomplete);
            }

            (node.state.clone(), node.time, node.cost, node.depth)
        };

        memory.expansions += 1;
        let span = Span::new(
            time,
            time + self.discretization.expand_time,
            self.discretization.max_step,
        );

        for (input, control) in self.inputs.iter().enumerate() {
            let segment = match self
                .integrator
                .integrate(&state, control, span)
                .map_err(GlcError::from_role(Role::Dynamics))?
            {
                Some(segment) => segment,
                None => {
                    memory.discarded += 1;
                    trace!("Input [{input}] from node [{parent_id}] cannot be integrated");
                    continue;
                }
            };

            let collision_free = self
                .obstacles
                .collision_free(&segment.trajectory)
                .map_err(GlcError::from_role(Role::Obstacles))?;
            if !collision_free {
                continue;
            }

            let finish_time = segment.finish_time();
            let child_cost = cost + self.segment_cost(&segment, time, finish_time)?;
            let child_state = segment.final_state();
            let cell = memory.cells.key_for(&child_state);
            if memory.cells.is_dominated(&cell, child_cost) {
                continue;
            }

            let estimate = self.estimate(&child_state)?;
            let arrival = match goal_test(goal, &segment.trajectory)? {
                Some(hit_time) => Some((
                    hit_time,
                    cost + self.segment_cost(&segment, time, hit_time)?,
                )),
                None => None,
            };

            let node_id = memory.tree.push_node(Node {
                state: child_state,
                time: finish_time,
                cost: child_cost,
                remaining_cost_estimate: estimate,
                depth: depth + 1,
                cell: cell.clone(),
                parent: Some((parent_id, Motion { input, segment })),
            });
            let _ = memory.cells.improve(cell, CellRecord { cost: child_cost, node: node_id });

            if let Some((hit_time, arrival_cost)) = arrival {
                if memory.incumbent.map_or(true, |prior| arrival_cost < prior.cost) {
                    debug!("Node [{node_id}] reaches the goal at time {hit_time} with cost {arrival_cost}");
                    memory.incumbent = Some(Incumbent {
                        node: node_id,
                        cost: arrival_cost,
                        hit_time,
                    });
                }
            }
        }

        Ok(SearchStatus::Incomplete)
    }
}

/// The motion that connects a node to its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Motion {
    /// Index of the input that was held, within the sampled input set
    pub input: usize,
    pub segment: Segment,
}

/// A labeled state in the search tree.
#[derive(Debug, Clone)]
pub struct Node {
    state: State,
    time: f64,
    cost: f64,
    remaining_cost_estimate: f64,
    depth: usize,
    cell: Cell,
    parent: Option<(usize, Motion)>,
}

impl Node {
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn remaining_cost_estimate(&self) -> f64 {
        self.remaining_cost_estimate
    }

    /// Number of expansions between the root and this node
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn cell(&self) -> &Cell {
        &self.cell
    }

    pub fn parent(&self) -> Option<(usize, &Motion)> {
        self.parent.as_ref().map(|(parent, motion)| (*parent, motion))
    }
}

impl TreeNode for Node {
    type State = State;
    type Action = Motion;
    type Cost = Cost;

    fn state(&self) -> &State {
        &self.state
    }

    fn parent(&self) -> Option<(usize, &Motion)> {
        Node::parent(self)
    }

    fn cost(&self) -> Cost {
        Cost(self.cost)
    }

    fn queue_evaluation(&self) -> Cost {
        Cost(self.cost + self.remaining_cost_estimate)
    }

    fn queue_bias(&self) -> Option<Cost> {
        Some(Cost(self.remaining_cost_estimate))
    }
}

/// The cheapest arrival at the goal found so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Incumbent {
    /// The node whose incoming motion reaches the goal
    pub node: usize,
    /// Cost of the motion up until it reaches the goal
    pub cost: f64,
    pub hit_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    Running,
    Succeeded,
    Exhausted,
}

/// Everything that a single query keeps track of. It is discarded when the
/// query ends.
#[derive(Debug)]
pub struct Memory {
    pub tree: Tree<Node, Cost>,
    pub cells: DominanceMap<Partition>,
    pub incumbent: Option<Incumbent>,
    pub status: QueryState,
    /// Number of steps that have been taken
    pub iterations: usize,
    /// Number of nodes that have been expanded
    pub expansions: usize,
    /// Number of candidate motions that could not be integrated
    pub discarded: usize,
}

impl Memory {
    pub fn node(&self, index: usize) -> Result<&Node, GlcError> {
        Ok(self.tree.arena.get_node(index)?)
    }

    /// Assemble the motion that leads from the root to the goal arrival of an
    /// incumbent.
    pub fn solution(&self, incumbent: &Incumbent) -> Result<Solution, GlcError> {
        let path = self.tree.arena.retrace(incumbent.node)?;
        let root_time = self.node(path.initial_node)?.time;
        let nodes = path.nodes();

        let mut trajectory = Trajectory::point(root_time, path.initial_state.clone());
        let mut controls: Option<Trajectory> = None;
        let mut inputs = Vec::with_capacity(path.len());
        for motion in path.actions() {
            inputs.push(motion.input);
            trajectory.append(motion.segment.trajectory.clone())?;
            match &mut controls {
                Some(controls) => controls.append(motion.segment.controls.clone())?,
                None => controls = Some(motion.segment.controls.clone()),
            }
        }

        trajectory.truncate(incumbent.hit_time)?;
        if let Some(controls) = &mut controls {
            controls.truncate(incumbent.hit_time)?;
        }

        Ok(Solution {
            cost: incumbent.cost,
            hit_time: incumbent.hit_time,
            nodes,
            inputs,
            trajectory,
            controls,
        })
    }
}

impl QueueLength for Memory {
    fn queue_length(&self) -> usize {
        self.tree.queue_length()
    }
}

impl MinimumCostBound for Memory {
    type Cost = Cost;
    fn minimum_cost_bound(&self) -> Option<Cost> {
        self.tree.minimum_cost_bound()
    }
}

/// A motion from the start state into the goal region.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub cost: f64,
    /// Time at which the trajectory enters the goal
    pub hit_time: f64,
    /// Arena indices of the nodes from the root to the last node
    pub nodes: Vec<usize>,
    /// Index of the input held along each motion
    pub inputs: Vec<usize>,
    /// State history, ending when the goal is reached
    pub trajectory: Trajectory,
    /// Control history, or None if the start state is already in the goal
    pub controls: Option<Trajectory>,
}

impl Solution {
    pub fn final_state(&self) -> State {
        self.trajectory.final_state()
    }

    pub fn duration(&self) -> f64 {
        self.trajectory.duration()
    }

    /// Evenly spaced samples of the state history, including both ends.
    pub fn sample(&self, count: usize) -> Vec<(f64, State)> {
        self.trajectory.sample(count)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The cheapest arrival at the goal for the current resolution
    Succeeded(Solution),
    /// The search ran out of nodes or iterations. If the goal had been
    /// reached without being confirmed as the cheapest arrival, that arrival
    /// is included.
    Exhausted { incumbent: Option<Solution> },
}

/// The result of one query.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerOutput {
    pub outcome: Outcome,
    pub iterations: usize,
    pub expansions: usize,
    /// Number of nodes that were created
    pub nodes: usize,
    /// The best record of every cell that was reached, ordered by cell
    pub cells: Vec<(Cell, CellRecord)>,
}

impl PlannerOutput {
    pub fn solution_found(&self) -> bool {
        matches!(self.outcome, Outcome::Succeeded(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match &self.outcome {
            Outcome::Succeeded(solution) => Some(solution),
            Outcome::Exhausted { .. } => None,
        }
    }

    /// The confirmed solution if there is one, otherwise the best goal arrival
    /// that was found before the search stopped.
    pub fn best(&self) -> Option<&Solution> {
        match &self.outcome {
            Outcome::Succeeded(solution) => Some(solution),
            Outcome::Exhausted { incumbent } => incumbent.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ConfigurationError,
        domain::DynamicModel,
        error::{Anyhow, NoError},
        motion::{Control, Euler, TrajectoryError},
        premade::{
            DurationCost, EuclideanHeuristic, FreeSpace, IntervalGoal, IntervalObstacle,
            SingleIntegrator, ZeroHeuristic,
        },
    };
    use approx::assert_relative_eq;

    fn line_parameters() -> Parameters {
        Parameters {
            res: 10,
            state_dim: 1,
            control_dim: 1,
            time_scale: 10.0,
            depth_scale: 100,
            partition_scale: 1.0,
            dt_max: 1.0,
            max_iter: 1000,
            x0: vec![0.0],
        }
    }

    fn line_inputs() -> Inputs {
        [-1.0, 0.0, 1.0]
            .into_iter()
            .map(|u| Control::from_element(1, u))
            .collect()
    }

    fn distance_to_goal() -> EuclideanHeuristic {
        EuclideanHeuristic::new(State::from_element(1, 10.0), 1.0, 1.0)
    }

    fn goal() -> IntervalGoal {
        IntervalGoal::new(9.0, 11.0, 10)
    }

    fn line_planner<Obs: Obstacles, H: Heuristic>(
        parameters: Parameters,
        obstacles: Obs,
        heuristic: H,
    ) -> Glc<Euler<SingleIntegrator>, Obs, DurationCost, H> {
        Glc::new(
            parameters,
            &line_inputs(),
            Euler::new(SingleIntegrator),
            obstacles,
            DurationCost,
            heuristic,
        )
        .unwrap()
    }

    #[test]
    fn test_straight_line_to_goal() {
        let glc = line_planner(line_parameters(), FreeSpace, distance_to_goal());
        assert_relative_eq!(glc.discretization().expand_time, 1.0);
        assert_relative_eq!(glc.discretization().cell_size, 1.0);

        let output = glc.run(goal()).unwrap();
        assert!(output.solution_found());
        let solution = output.solution().unwrap();
        assert_relative_eq!(solution.cost, 9.0, epsilon = 1e-9);
        assert_relative_eq!(solution.hit_time, 9.0, epsilon = 1e-9);
        assert_relative_eq!(solution.final_state()[0], 9.0, epsilon = 1e-9);
        assert_eq!(solution.nodes.len(), 10);
        assert_eq!(solution.nodes[0], 0);
        assert!(solution.inputs.iter().all(|input| *input == 2));

        let controls = solution.controls.as_ref().unwrap();
        assert_relative_eq!(controls.initial_time(), 0.0);
        assert_relative_eq!(controls.finish_time(), 9.0, epsilon = 1e-9);
        assert_relative_eq!(controls.at(4.5).unwrap()[0], 1.0);
    }

    /// Overestimates near the goal band, but still ranks the straight path
    /// first.
    struct DistanceToTen;

    impl Heuristic for DistanceToTen {
        type Error = NoError;
        fn cost_to_go(&self, state: &State) -> Result<f64, NoError> {
            Ok((10.0 - state[0]).abs())
        }
    }

    #[test]
    fn test_straight_line_with_distance_to_band_center() {
        let output = line_planner(line_parameters(), FreeSpace, DistanceToTen)
            .run(goal())
            .unwrap();
        let solution = output.solution().unwrap();
        assert_relative_eq!(solution.cost, 9.0, epsilon = 1e-9);
        assert_relative_eq!(solution.final_state()[0], 9.0, epsilon = 1e-9);
        assert!(solution.inputs.iter().all(|input| *input == 2));
    }

    #[test]
    fn test_zero_heuristic_finds_the_same_cost() {
        let informed = line_planner(line_parameters(), FreeSpace, distance_to_goal())
            .run(goal())
            .unwrap();
        let uninformed = line_planner(line_parameters(), FreeSpace, ZeroHeuristic)
            .run(goal())
            .unwrap();

        let informed_cost = informed.solution().unwrap().cost;
        let uninformed_cost = uninformed.solution().unwrap().cost;
        assert_relative_eq!(uninformed_cost, 9.0, epsilon = 1e-9);
        assert!(uninformed_cost <= informed_cost + 1e-9);
        assert!(uninformed.expansions >= informed.expansions);
    }

    #[test]
    fn test_finer_partition_is_no_worse() {
        let coarse = line_planner(line_parameters(), FreeSpace, distance_to_goal())
            .run(goal())
            .unwrap();

        let mut parameters = line_parameters();
        parameters.partition_scale = 0.5;
        let fine = line_planner(parameters, FreeSpace, distance_to_goal())
            .run(goal())
            .unwrap();

        assert!(fine.solution().unwrap().cost <= coarse.solution().unwrap().cost + 1e-9);
    }

    #[test]
    fn test_goal_inside_obstacle_is_unreachable() {
        let mut parameters = line_parameters();
        parameters.depth_scale = 1;
        let glc = line_planner(parameters, IntervalObstacle::new(8.0, 12.0, 10), distance_to_goal());
        assert_eq!(glc.discretization().depth_limit, 20);

        let output = glc.run(goal()).unwrap();
        assert!(!output.solution_found());
        assert_eq!(output.outcome, Outcome::Exhausted { incumbent: None });
        assert!(output.iterations < 1000);
        assert!(output
            .cells
            .iter()
            .all(|(cell, _)| cell[0] < 8 && cell[0] >= -20));
    }

    #[test]
    fn test_iteration_cap_keeps_the_incumbent() {
        let mut parameters = line_parameters();
        parameters.max_iter = 3;
        let output = line_planner(parameters, FreeSpace, distance_to_goal())
            .run(goal())
            .unwrap();
        assert_eq!(output.iterations, 3);
        assert_eq!(output.outcome, Outcome::Exhausted { incumbent: None });

        // The goal is first reached while expanding the node at x = 8, which
        // is the ninth step. Confirming it would take one more step.
        let mut parameters = line_parameters();
        parameters.max_iter = 9;
        let output = line_planner(parameters, FreeSpace, distance_to_goal())
            .run(goal())
            .unwrap();
        assert!(!output.solution_found());
        assert!(output.solution().is_none());
        assert_relative_eq!(output.best().unwrap().cost, 9.0, epsilon = 1e-9);
    }

    #[test]
    fn test_identical_queries_match() {
        let glc = line_planner(line_parameters(), FreeSpace, ZeroHeuristic);
        let first = glc.run(goal()).unwrap();
        let second = glc.run(goal()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_start_inside_goal() {
        let glc = line_planner(line_parameters(), FreeSpace, distance_to_goal());
        let output = glc.run_from(State::from_element(1, 10.0), goal()).unwrap();
        let solution = output.solution().unwrap();
        assert_relative_eq!(solution.cost, 0.0);
        assert_eq!(solution.nodes, vec![0]);
        assert!(solution.controls.is_none());
        assert_eq!(output.iterations, 1);
    }

    #[test]
    fn test_stepping_through_a_search() {
        let glc = line_planner(line_parameters(), FreeSpace, distance_to_goal());
        let mut search = Planner::new(&glc)
            .into_search(State::from_element(1, 0.0), goal())
            .unwrap();

        assert!(search.step().unwrap().incomplete());
        let memory = search.memory();
        assert_eq!(memory.status, QueryState::Running);
        // The input that holds still lands in the root's own cell
        assert_eq!(memory.tree.arena.len(), 3);
        assert_eq!(memory.queue_length(), 2);
        assert_eq!(memory.cells.len(), 3);
        assert_relative_eq!(memory.minimum_cost_bound().unwrap().0, 9.0);

        let child = memory.node(1).unwrap();
        assert_eq!(child.depth(), 1);
        assert_relative_eq!(child.time(), 1.0);
        assert_eq!(child.parent().map(|(parent, motion)| (parent, motion.input)), Some((0, 0)));

        let status = search.solve().unwrap();
        assert!(status.solved());
        assert_eq!(search.memory().status, QueryState::Succeeded);
    }

    #[test]
    fn test_bad_start_is_rejected() {
        let glc = line_planner(line_parameters(), FreeSpace, distance_to_goal());
        let err = glc
            .run_from(State::from_column_slice(&[0.0, 1.0]), goal())
            .unwrap_err();
        assert!(matches!(
            err,
            GlcError::Configuration(ConfigurationError::StartDimension { expected: 1, found: 2 })
        ));
    }

    #[test]
    fn test_empty_inputs_are_rejected() {
        let err = Glc::new(
            line_parameters(),
            &Inputs::new(),
            Euler::new(SingleIntegrator),
            FreeSpace,
            DurationCost,
            ZeroHeuristic,
        )
        .unwrap_err();
        assert!(matches!(err, GlcError::Configuration(ConfigurationError::EmptyInputs)));
    }

    /// Moving at double speed costs five times as much per second.
    struct SpeedPenalty;

    impl CostFunction for SpeedPenalty {
        type Error = TrajectoryError;
        fn cost(
            &self,
            _: &Trajectory,
            controls: &Trajectory,
            t0: f64,
            tf: f64,
        ) -> Result<f64, TrajectoryError> {
            let rate = if controls.at(t0)?[0] > 1.5 { 5.0 } else { 1.0 };
            Ok(rate * (tf - t0))
        }
    }

    #[test]
    fn test_superseded_nodes_are_skipped() {
        let mut parameters = line_parameters();
        parameters.x0 = vec![0.5];
        let inputs: Inputs = [1.0, 2.0]
            .into_iter()
            .map(|u| Control::from_element(1, u))
            .collect();
        let glc = Glc::new(
            parameters,
            &inputs,
            Euler::new(SingleIntegrator),
            FreeSpace,
            SpeedPenalty,
            ZeroHeuristic,
        )
        .unwrap();

        let mut search = Planner::new(&glc)
            .into_search(State::from_element(1, 0.5), IntervalGoal::new(7.45, 7.55, 10))
            .unwrap();

        // The root claims cell 2 with a fast motion of cost 5, then two slow
        // motions reach it for 2.
        assert!(search.step().unwrap().incomplete());
        assert!(search.step().unwrap().incomplete());
        let memory = search.memory();
        let expensive = memory.node(2).unwrap();
        assert_eq!(expensive.cell().as_slice(), &[2]);
        assert_relative_eq!(expensive.cost(), 5.0);
        let record = memory.cells.record(&Cell::from_slice(&[2])).unwrap();
        assert_eq!(record.node, 3);
        assert_relative_eq!(record.cost, 2.0);

        let mut skipped = 0;
        let solution = loop {
            let (nodes, expansions) = {
                let memory = search.memory();
                (memory.tree.arena.len(), memory.expansions)
            };

            let status = search.step().unwrap();
            if !status.incomplete() {
                break status.solution();
            }

            let memory = search.memory();
            if memory.expansions == expansions {
                skipped += 1;
                assert_eq!(memory.tree.arena.len(), nodes);
            }
        };

        assert!(skipped > 0);
        let solution = solution.unwrap();
        assert_relative_eq!(solution.cost, 7.0, epsilon = 1e-9);
        assert!(solution.inputs.iter().all(|input| *input == 0));
    }

    /// Reports a bound so steep that the partition cells vanish.
    #[derive(Debug)]
    struct Stiff;

    impl DynamicModel for Stiff {
        type Error = NoError;
        fn flow(&self, _: &State, control: &Control) -> Result<State, NoError> {
            Ok(control.clone())
        }

        fn lipschitz_constant(&self) -> f64 {
            1000.0
        }
    }

    #[test]
    fn test_vanishing_cells_are_rejected() {
        let err = Glc::new(
            line_parameters(),
            &line_inputs(),
            Euler::new(Stiff),
            FreeSpace,
            DurationCost,
            distance_to_goal(),
        )
        .unwrap_err();
        assert!(matches!(err, GlcError::Configuration(ConfigurationError::CellSize(_))));
    }

    struct Unavailable;

    impl Obstacles for Unavailable {
        type Error = Anyhow;
        fn collision_free(&self, _: &Trajectory) -> Result<bool, Anyhow> {
            Err(anyhow!("sensor offline"))
        }
    }

    struct Negative;

    impl Heuristic for Negative {
        type Error = NoError;
        fn cost_to_go(&self, _: &State) -> Result<f64, NoError> {
            Ok(-1.0)
        }
    }

    #[test]
    fn test_collaborator_failures_end_the_query() {
        let err = line_planner(line_parameters(), Unavailable, ZeroHeuristic)
            .run(goal())
            .unwrap_err();
        assert!(matches!(err, GlcError::Collaborator { role: Role::Obstacles, .. }));

        let err = line_planner(line_parameters(), FreeSpace, Negative)
            .run(goal())
            .unwrap_err();
        assert!(matches!(err, GlcError::Collaborator { role: Role::Heuristic, .. }));
    }
}
