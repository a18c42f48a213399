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

pub use std::error::Error as StdError;
pub use anyhow::Error as Anyhow;
pub use thiserror::Error as ThisError;

use crate::{
    algorithm::tree::TreeError, config::ConfigurationError, motion::TrajectoryError,
};

/// Use this enum for situations where you are required to provide an Error
/// type but there is no possibility of an error being produced. Since NoError
/// has no variants, it is impossible to instantiate this enum.
#[derive(ThisError, Debug)]
pub enum NoError {}

/// Identifies which user-supplied collaborator produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Inputs,
    Dynamics,
    Obstacles,
    Goal,
    Heuristic,
    Cost,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Inputs => "input sampler",
            Role::Dynamics => "dynamic model",
            Role::Obstacles => "obstacle test",
            Role::Goal => "goal region",
            Role::Heuristic => "heuristic",
            Role::Cost => "cost function",
        };
        f.write_str(name)
    }
}

/// Every failure that can end a planning query early. Reaching the iteration
/// cap or running out of nodes is not an error; see
/// [`crate::algorithm::Outcome`].
#[derive(ThisError, Debug)]
pub enum GlcError {
    #[error("The planner is misconfigured:\n{0}")]
    Configuration(#[from] ConfigurationError),
    #[error("The {role} failed:\n{source}")]
    Collaborator { role: Role, source: Anyhow },
    #[error("An error occurred in the algorithm:\n{0}")]
    Algorithm(#[from] TreeError),
    #[error("Unable to assemble the solution trajectory:\n{0}")]
    Trajectory(#[from] TrajectoryError),
}

impl GlcError {
    /// Convert a collaborator's own error type into a [`GlcError`].
    pub fn from_role<E: Into<Anyhow>>(role: Role) -> impl FnOnce(E) -> GlcError {
        move |err| GlcError::Collaborator { role, source: err.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collaborator_errors_name_their_role() {
        let err = GlcError::from_role::<Anyhow>(Role::Heuristic)(
            anyhow::anyhow!("estimate exploded")
        );
        let message = err.to_string();
        assert!(message.contains("heuristic"));
        assert!(message.contains("estimate exploded"));
    }

    #[test]
    fn configuration_errors_convert() {
        let err: GlcError = ConfigurationError::EmptyInputs.into();
        assert!(matches!(err, GlcError::Configuration(ConfigurationError::EmptyInputs)));
    }
}
