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

use super::{require_dim, PremadeError};
use crate::{domain::Heuristic, error::NoError, motion::State};

/// Straight line distance to a ball in the leading elements of the state,
/// divided by the fastest speed the system can travel. This is admissible
/// whenever the cost is the duration of the motion.
#[derive(Debug, Clone, PartialEq)]
pub struct EuclideanHeuristic {
    pub center: State,
    pub radius: f64,
    pub max_speed: f64,
}

impl EuclideanHeuristic {
    pub fn new(center: State, radius: f64, max_speed: f64) -> Self {
        Self { center, radius, max_speed }
    }
}

impl Heuristic for EuclideanHeuristic {
    type Error = PremadeError;
    fn cost_to_go(&self, state: &State) -> Result<f64, Self::Error> {
        require_dim(state, self.center.len())?;
        let distance = state.rows(0, self.center.len()).metric_distance(&self.center);
        Ok((distance - self.radius).max(0.0) / self.max_speed)
    }
}

/// Provides no information, which reduces the search to uniform cost search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    type Error = NoError;
    fn cost_to_go(&self, _: &State) -> Result<f64, Self::Error> {
        Ok(0.0)
    }
}
