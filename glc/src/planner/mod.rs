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

pub mod search;
pub use search::Search;

pub mod halt;
pub use halt::Halt;

use crate::algorithm::Coherent;

/// The Planner spawns a [`Search`] that runs its algorithm from a start to a
/// goal.
///
/// The Planner can be given halting behavior which is handed to the Search.
/// The Halting generic must implement the [`Halt`] trait for the memory of
/// `Algo`.
#[derive(Debug, Clone)]
pub struct Planner<Algo, Halting = ()> {
    /// The object which determines the search pattern
    algorithm: Algo,

    /// Halting behavior handed to the search
    halting: Halting,
}

impl<Algo> Planner<Algo, ()> {
    /// Construct a new planner that has no halting behavior.
    pub fn new(algorithm: Algo) -> Self {
        Self {
            algorithm,
            halting: (),
        }
    }
}

impl<Algo, Halting> Planner<Algo, Halting> {
    pub fn new_haltable(algorithm: Algo, halting: Halting) -> Self {
        Self { algorithm, halting }
    }

    /// Convert the planner into a [`Search`] from the start conditions to the
    /// goal conditions.
    pub fn into_search<Start, Goal>(
        self,
        start: Start,
        goal: Goal,
    ) -> Result<Search<Algo, Goal, Halting>, Algo::InitError>
    where
        Algo: Coherent<Start, Goal>,
        Halting: Halt<Algo::Memory>,
    {
        let memory = self.algorithm.initialize(start, &goal)?;
        Ok(Search::new(memory, self.algorithm, goal, self.halting))
    }
}
