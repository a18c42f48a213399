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

//! Generalized label correcting (GLC) search for kinodynamic motion planning.
//!
//! The planner searches over trajectories built by holding each of a finite
//! set of control inputs for a fixed duration. Nodes that land in the same
//! cell of a partition of the state space compete with each other, and only
//! the cheapest survives. Raising the resolution refines the input set along
//! with the expansion duration and the partition.

pub mod algorithm;
pub use algorithm::{Glc, Outcome, PlannerOutput, Solution};

pub mod config;
pub use config::Parameters;

pub mod domain;

pub mod error;
pub use error::GlcError;

pub mod export;

pub mod motion;

pub mod planner;
pub use planner::Planner;

pub mod premade;

pub mod prelude {
    pub use super::domain::*;
    pub use super::motion::{Control, Integrator, State, Trajectory};
}
