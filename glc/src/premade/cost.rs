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

use crate::{domain::CostFunction, error::NoError, motion::Trajectory};

/// The cost of a motion is the time it takes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationCost;

impl CostFunction for DurationCost {
    type Error = NoError;
    fn cost(&self, _: &Trajectory, _: &Trajectory, t0: f64, tf: f64) -> Result<f64, Self::Error> {
        Ok(tf - t0)
    }
}
