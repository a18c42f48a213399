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

use crate::{error::Anyhow, motion::State};

/// Estimates the cost remaining to reach the goal from a state.
///
/// The estimate must never exceed the true cost (it must be admissible) or
/// the planner may return solutions that are not optimal for the current
/// resolution. This is not checked.
pub trait Heuristic {
    type Error: Into<Anyhow>;

    fn cost_to_go(&self, state: &State) -> Result<f64, Self::Error>;
}
