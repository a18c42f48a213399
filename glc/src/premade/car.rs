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

use super::{
    CircularObstacles, DurationCost, EuclideanHeuristic, NonholonomicCar, SphericalGoal,
    SteeringInputs,
};
use crate::{
    algorithm::Glc,
    config::{ConfigurationError, Parameters},
    error::GlcError,
    motion::{RungeKuttaTwo, State},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Plans shortest-time paths for a [`NonholonomicCar`] around circular
/// obstacles.
pub type CarPlanner = Glc<
    RungeKuttaTwo<NonholonomicCar>,
    CircularObstacles,
    DurationCost,
    EuclideanHeuristic,
>;

impl CarPlanner {
    pub fn new_car(
        parameters: Parameters,
        steering: &SteeringInputs,
        obstacles: CircularObstacles,
        goal: &SphericalGoal,
    ) -> Result<Self, GlcError> {
        let max_speed = steering.speeds.iter().fold(0.0_f64, |m, s| m.max(s.abs()));
        if !max_speed.is_finite() || max_speed <= 0.0 {
            return Err(ConfigurationError::NonPositive { name: "speeds", value: max_speed }.into());
        }

        Glc::new(
            parameters,
            steering,
            RungeKuttaTwo::new(NonholonomicCar::default()),
            obstacles,
            DurationCost,
            EuclideanHeuristic::new(goal.center.clone(), goal.radius, max_speed),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiskConfig {
    pub center: [f64; 2],
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoalConfig {
    pub center: [f64; 2],
    pub radius: f64,
    pub resolution: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObstacleConfig {
    pub resolution: usize,
    /// Added to the radius of every disk
    #[serde(default)]
    pub inflation: f64,
    #[serde(default)]
    pub disks: Vec<DiskConfig>,
}

/// Everything needed to run a car planning query, in a form that can be
/// loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CarScenario {
    pub parameters: Parameters,
    pub steering: SteeringInputs,
    pub goal: GoalConfig,
    pub obstacles: ObstacleConfig,
}

impl CarScenario {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigurationError> {
        let scenario: CarScenario = serde_yaml::from_str(text)?;
        scenario.parameters.validate()?;
        if scenario.goal.resolution == 0 {
            return Err(ConfigurationError::ZeroSampling("goal.resolution"));
        }
        if scenario.obstacles.resolution == 0 {
            return Err(ConfigurationError::ZeroSampling("obstacles.resolution"));
        }
        Ok(scenario)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn goal(&self) -> SphericalGoal {
        SphericalGoal::new(
            State::from_column_slice(&self.goal.center),
            self.goal.radius,
            self.goal.resolution,
        )
    }

    pub fn obstacles(&self) -> CircularObstacles {
        self.obstacles
            .disks
            .iter()
            .fold(CircularObstacles::new(self.obstacles.resolution), |obstacles, disk| {
                obstacles.with_circle(State::from_column_slice(&disk.center), disk.radius)
            })
            .inflated(self.obstacles.inflation)
    }

    pub fn planner(&self) -> Result<CarPlanner, GlcError> {
        CarPlanner::new_car(
            self.parameters.clone(),
            &self.steering,
            self.obstacles(),
            &self.goal(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SCENARIO: &str = r#"
parameters:
  res: 11
  state_dim: 3
  control_dim: 2
  time_scale: 10.0
  depth_scale: 100
  partition_scale: 0.5
  dt_max: 1.0
  max_iter: 100000
  x0: [0.0, 0.0, 1.5707963267948966]
steering:
  speeds: [1.0]
  max_turn_rate: 0.5
goal:
  center: [10.0, 10.0]
  radius: 0.5
  resolution: 10
obstacles:
  resolution: 10
  inflation: 0.2
  disks:
    - center: [3.0, 2.0]
      radius: 2.0
    - center: [6.0, 8.0]
      radius: 2.0
"#;

    #[test]
    fn test_scenario_loads() {
        let scenario = CarScenario::from_yaml_str(SCENARIO).unwrap();
        assert_eq!(scenario.parameters.res, 11);
        assert_eq!(scenario.obstacles.disks.len(), 2);

        let obstacles = scenario.obstacles();
        assert_relative_eq!(obstacles.circles[1].radius, 2.2);

        let planner = scenario.planner().unwrap();
        assert_eq!(planner.inputs().len(), 11);

        let mut stopped = scenario.clone();
        stopped.steering.speeds = vec![0.0];
        assert!(matches!(
            stopped.planner(),
            Err(GlcError::Configuration(ConfigurationError::NonPositive { .. }))
        ));
    }

    #[test]
    fn test_scenario_needs_samples_per_segment() {
        let text = SCENARIO.replace("  resolution: 10\nobstacles:", "  resolution: 0\nobstacles:");
        assert!(matches!(
            CarScenario::from_yaml_str(&text),
            Err(ConfigurationError::ZeroSampling("goal.resolution"))
        ));

        let text = SCENARIO.replace("  resolution: 10\n  inflation", "  resolution: 0\n  inflation");
        assert!(matches!(
            CarScenario::from_yaml_str(&text),
            Err(ConfigurationError::ZeroSampling("obstacles.resolution"))
        ));
    }

    #[test]
    fn test_car_reaches_goal_around_disks() {
        let scenario = CarScenario::from_yaml_str(SCENARIO).unwrap();
        let planner = scenario.planner().unwrap();
        let output = planner.run(scenario.goal()).unwrap();
        assert!(output.solution_found());

        let solution = output.solution().unwrap();
        let end = solution.final_state();
        let miss = ((end[0] - 10.0).powi(2) + (end[1] - 10.0).powi(2)).sqrt();
        assert!(miss < 0.5);

        // The car travels at unit speed, so it cannot beat the straight line
        assert!(solution.cost >= 200_f64.sqrt() - 0.5 - 1e-9);
        assert_relative_eq!(solution.duration(), solution.cost, epsilon = 1e-6);

        for (_, state) in solution.sample(200) {
            for center in [[3.0, 2.0], [6.0, 8.0]] {
                let clearance =
                    ((state[0] - center[0]).powi(2) + (state[1] - center[1]).powi(2)).sqrt();
                assert!(clearance >= 2.0);
            }
        }
    }
}
