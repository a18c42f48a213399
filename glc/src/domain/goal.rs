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

use crate::{error::Anyhow, motion::Trajectory};

/// The `GoalRegion` trait allows the planner to recognize when a trajectory
/// segment has reached the goal.
pub trait GoalRegion {
    type Error: Into<Anyhow>;

    /// Return the earliest time within the trajectory's domain at which it is
    /// inside the goal region, or `None` if it never enters the region.
    fn test(&self, trajectory: &Trajectory) -> Result<Option<f64>, Self::Error>;
}

impl<G: GoalRegion> GoalRegion for &G {
    type Error = G::Error;
    fn test(&self, trajectory: &Trajectory) -> Result<Option<f64>, Self::Error> {
        (*self).test(trajectory)
    }
}
