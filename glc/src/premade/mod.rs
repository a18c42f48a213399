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

//! Ready-made collaborators for common planning problems.

pub mod car;
pub use car::*;

pub mod cost;
pub use cost::*;

pub mod goal;
pub use goal::*;

pub mod heuristic;
pub use heuristic::*;

pub mod inputs;
pub use inputs::*;

pub mod models;
pub use models::*;

pub mod obstacles;
pub use obstacles::*;

use crate::{
    error::ThisError,
    motion::{State, Trajectory, TrajectoryError},
};

#[derive(ThisError, Debug)]
pub enum PremadeError {
    #[error("Expected a vector with at least {expected} elements, but found {found}")]
    Dimension { expected: usize, found: usize },
    #[error("Unable to evaluate the trajectory:\n{0}")]
    Trajectory(#[from] TrajectoryError),
}

/// Check that a vector has at least `expected` elements.
pub fn require_dim(vector: &State, expected: usize) -> Result<(), PremadeError> {
    if vector.len() < expected {
        return Err(PremadeError::Dimension { expected, found: vector.len() });
    }
    Ok(())
}

/// Times at which a trajectory gets checked when it is inspected at the given
/// resolution. The initial time is skipped because it was already checked as
/// the end of the previous segment, unless the trajectory is a single point.
/// The finish time is always checked, even at a resolution of zero.
pub fn sample_times(trajectory: &Trajectory, resolution: usize) -> impl Iterator<Item = f64> {
    let t0 = trajectory.initial_time();
    let duration = trajectory.duration();
    let (first, count) = if duration > 0.0 {
        (1, resolution.max(1))
    } else {
        (0, 0)
    };

    (first..=count).map(move |i| {
        if count == 0 {
            t0
        } else {
            t0 + duration * i as f64 / count as f64
        }
    })
}

/// Squared distance between a center and the leading elements of a state.
fn squared_distance(state: &State, center: &State) -> Result<f64, PremadeError> {
    require_dim(state, center.len())?;
    Ok(state.rows(0, center.len()).metric_distance(center).powi(2))
}
