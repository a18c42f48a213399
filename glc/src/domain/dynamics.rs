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
    error::Anyhow,
    motion::{Control, State},
};

/// The `DynamicModel` trait describes how a state changes over time while a
/// control input is held.
pub trait DynamicModel {
    /// What kind of error can happen if a bad state and/or control is provided
    type Error: Into<Anyhow>;

    /// Compute the time derivative of the state under the given control.
    fn flow(&self, state: &State, control: &Control) -> Result<State, Self::Error>;

    /// A bound on how quickly two nearby trajectories of the flow can diverge.
    /// The planner shrinks its partition cells as this grows. Use zero when
    /// the flow does not depend on the state.
    fn lipschitz_constant(&self) -> f64;
}
