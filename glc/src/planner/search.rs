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

use crate::algorithm::{Algorithm, SearchStatus, Solvable};
use super::Halt;

/// Search manages the progress of a single planning effort.
pub struct Search<Algo: Algorithm, Goal, Halting> {
    /// Storage container for the progress of the search algorithm
    memory: Algo::Memory,

    /// The object which determines the search pattern
    algorithm: Algo,

    /// The goal that the search is trying to reach
    goal: Goal,

    /// The options that moderate the progress of the solving
    halting: Halting,
}

impl<Algo: Algorithm, Goal, Halting> Search<Algo, Goal, Halting> {
    pub fn new(memory: Algo::Memory, algorithm: Algo, goal: Goal, halting: Halting) -> Self {
        Self {
            memory,
            algorithm,
            goal,
            halting,
        }
    }

    /// Tell the planner to attempt to solve the problem. This will run the
    /// step() function until a solution is found, the search gets halted, or
    /// the algorithm determines that the problem is impossible to solve.
    pub fn solve(&mut self) -> Result<SearchStatus<Algo::Solution>, Algo::StepError>
    where
        Algo: Solvable<Goal>,
        Halting: Halt<Algo::Memory>,
    {
        loop {
            if self.halting.halt(&self.memory) {
                return Ok(SearchStatus::Incomplete);
            }

            let result = self.step()?;
            if let SearchStatus::Incomplete = result {
                continue;
            }

            return Ok(result);
        }
    }

    pub fn step(&mut self) -> Result<SearchStatus<Algo::Solution>, Algo::StepError>
    where
        Algo: Solvable<Goal>,
    {
        self.algorithm.step(&mut self.memory, &self.goal)
    }

    pub fn memory(&self) -> &Algo::Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Algo::Memory {
        &mut self.memory
    }
}
