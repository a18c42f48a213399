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

use crate::{error::ThisError, motion::State};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Parameters for a single planning query. Most of the search constants are
/// derived from these through [`Parameters::discretize`] so that raising `res`
/// refines every part of the discretization together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Parameters {
    /// Resolution of the discretization. Higher values shorten each expansion
    /// and shrink the partition cells.
    pub res: usize,
    /// Length of every state vector
    pub state_dim: usize,
    /// Length of every control vector
    pub control_dim: usize,
    /// Duration covered by `res` consecutive expansions
    pub time_scale: f64,
    /// Scales the maximum number of expansions along any branch
    pub depth_scale: usize,
    /// Relative size of a partition cell. Smaller values give finer cells.
    pub partition_scale: f64,
    /// Largest step the integrator is allowed to take
    pub dt_max: f64,
    /// Maximum number of search iterations before the query is exhausted
    pub max_iter: usize,
    /// Start state
    pub x0: Vec<f64>,
}

/// Search constants derived from [`Parameters`] and the Lipschitz bound of the
/// dynamics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discretization {
    /// Duration of the trajectory segment produced by one expansion
    pub expand_time: f64,
    /// Nodes at this depth are never expanded
    pub depth_limit: usize,
    /// Edge length of the hypercubes that partition the state space
    pub cell_size: f64,
    /// Largest integration step
    pub max_step: f64,
}

impl Parameters {
    /// Parse and validate parameters from a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigurationError> {
        let params: Parameters = serde_yaml::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    /// Load and validate parameters from a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.res == 0 {
            return Err(ConfigurationError::ZeroResolution);
        }

        if self.state_dim == 0 {
            return Err(ConfigurationError::ZeroDimension("state_dim"));
        }

        if self.control_dim == 0 {
            return Err(ConfigurationError::ZeroDimension("control_dim"));
        }

        if self.depth_scale == 0 {
            return Err(ConfigurationError::ZeroDepthScale);
        }

        for (name, value) in [
            ("time_scale", self.time_scale),
            ("partition_scale", self.partition_scale),
            ("dt_max", self.dt_max),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigurationError::NonPositive { name, value });
            }
        }

        self.check_start(self.x0.iter().copied())
    }

    /// Check that a start state matches the configured dimension.
    pub fn check_start(
        &self,
        state: impl ExactSizeIterator<Item = f64>,
    ) -> Result<(), ConfigurationError> {
        if state.len() != self.state_dim {
            return Err(ConfigurationError::StartDimension {
                expected: self.state_dim,
                found: state.len(),
            });
        }

        for value in state {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFiniteStart);
            }
        }

        Ok(())
    }

    /// The configured start state as a vector.
    pub fn start(&self) -> State {
        State::from_column_slice(&self.x0)
    }

    /// Derive the search constants. The cell size shrinks as the Lipschitz
    /// bound grows because nearby states drift apart faster over one
    /// expansion.
    pub fn discretize(&self, lipschitz: f64) -> Result<Discretization, ConfigurationError> {
        self.validate()?;
        if !lipschitz.is_finite() || lipschitz < 0.0 {
            return Err(ConfigurationError::Lipschitz(lipschitz));
        }

        let expand_time = self.time_scale / self.res as f64;
        let log_res = ((self.res as f64).ln().floor() as usize).max(1);
        let depth_limit = self
            .depth_scale
            .saturating_mul(self.res)
            .saturating_mul(log_res);
        let cell_size = self.partition_scale * expand_time
            / drift_factor(lipschitz, expand_time);
        // Cells that are too small to divide by would merge the whole state
        // space into a handful of saturated keys.
        if !cell_size.is_finite() || cell_size < f64::MIN_POSITIVE {
            return Err(ConfigurationError::CellSize(cell_size));
        }

        Ok(Discretization {
            expand_time,
            depth_limit,
            cell_size,
            max_step: self.dt_max,
        })
    }
}

/// Average growth of a perturbation over `[0, h]` for dynamics with the given
/// Lipschitz bound: `(e^{Lh} - 1) / (Lh)`, which tends to 1 as `Lh -> 0`.
fn drift_factor(lipschitz: f64, h: f64) -> f64 {
    let lh = lipschitz * h;
    if lh < 1e-12 {
        1.0
    } else {
        lh.exp_m1() / lh
    }
}

#[derive(ThisError, Debug)]
pub enum ConfigurationError {
    #[error("The input set is empty")]
    EmptyInputs,
    #[error("The resolution must be at least 1")]
    ZeroResolution,
    #[error("[{0}] must be at least 1")]
    ZeroDimension(&'static str),
    #[error("[depth_scale] must be at least 1")]
    ZeroDepthScale,
    #[error("[{name}] must be positive and finite, but found {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("The start state has {found} elements, but state_dim is {expected}")]
    StartDimension { expected: usize, found: usize },
    #[error("The start state contains a value that is not finite")]
    NonFiniteStart,
    #[error("Input [{index}] has {found} elements, but control_dim is {expected}")]
    InputDimension {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("Input [{0}] contains a value that is not finite")]
    NonFiniteInput(usize),
    #[error("The Lipschitz bound must be non-negative and finite, but found {0}")]
    Lipschitz(f64),
    #[error("The partition cell size must be a normal positive number, but found {0}")]
    CellSize(f64),
    #[error("[{0}] must check at least one sample per segment")]
    ZeroSampling(&'static str),
    #[error("Unable to parse the parameters:\n{0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Unable to read [{path:?}]:\n{source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const CAR: &str = r#"
res: 11
state_dim: 3
control_dim: 2
time_scale: 10.0
depth_scale: 100
partition_scale: 0.5
dt_max: 1.0
max_iter: 100000
x0: [0.0, 0.0, 1.5707963267948966]
"#;

    #[test]
    fn test_parse_parameters() {
        let params = Parameters::from_yaml_str(CAR).unwrap();
        assert_eq!(params.res, 11);
        assert_eq!(params.x0.len(), 3);
        assert_relative_eq!(params.start()[2], std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let text = format!("{CAR}bogus: 1\n");
        assert!(matches!(
            Parameters::from_yaml_str(&text),
            Err(ConfigurationError::Parse(_))
        ));
    }

    #[test]
    fn test_validation() {
        let mut params = Parameters::from_yaml_str(CAR).unwrap();
        params.x0.pop();
        assert!(matches!(
            params.validate(),
            Err(ConfigurationError::StartDimension { expected: 3, found: 2 })
        ));

        let mut params = Parameters::from_yaml_str(CAR).unwrap();
        params.partition_scale = 0.0;
        assert!(matches!(
            params.validate(),
            Err(ConfigurationError::NonPositive { name: "partition_scale", .. })
        ));

        let mut params = Parameters::from_yaml_str(CAR).unwrap();
        params.res = 0;
        assert!(matches!(params.validate(), Err(ConfigurationError::ZeroResolution)));

        let mut params = Parameters::from_yaml_str(CAR).unwrap();
        params.x0[0] = f64::NAN;
        assert!(matches!(params.validate(), Err(ConfigurationError::NonFiniteStart)));
    }

    #[test]
    fn test_discretization() {
        let params = Parameters::from_yaml_str(CAR).unwrap();
        let flat = params.discretize(0.0).unwrap();
        assert_relative_eq!(flat.expand_time, 10.0 / 11.0);
        // floor(ln 11) = 2
        assert_eq!(flat.depth_limit, 100 * 11 * 2);
        assert_relative_eq!(flat.cell_size, 0.5 * 10.0 / 11.0);

        let steep = params.discretize(1.0).unwrap();
        assert!(steep.cell_size < flat.cell_size);
        assert_eq!(steep.expand_time, flat.expand_time);

        assert!(matches!(
            params.discretize(-1.0),
            Err(ConfigurationError::Lipschitz(_))
        ));
    }

    #[test]
    fn test_steep_dynamics_collapse_the_partition() {
        let params = Parameters::from_yaml_str(CAR).unwrap();
        // e^{L h} overflows when L h is beyond about 709
        assert!(matches!(
            params.discretize(1000.0),
            Err(ConfigurationError::CellSize(size)) if size == 0.0
        ));

        let mut params = Parameters::from_yaml_str(CAR).unwrap();
        params.partition_scale = 1e-310;
        assert!(matches!(
            params.discretize(0.0),
            Err(ConfigurationError::CellSize(_))
        ));
    }

    #[test]
    fn test_single_resolution_still_expands() {
        let mut params = Parameters::from_yaml_str(CAR).unwrap();
        params.res = 1;
        params.depth_scale = 3;
        assert_eq!(params.discretize(0.0).unwrap().depth_limit, 3);
    }
}
