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
    config::ConfigurationError,
    error::{Anyhow, NoError},
    motion::Control,
};

/// A finite set of control inputs. The planner tries every one of them, in
/// order, each time it expands a node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Inputs {
    values: Vec<Control>,
}

impl Inputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, input: Control) {
        self.values.push(input);
    }

    pub fn get(&self, index: usize) -> Option<&Control> {
        self.values.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Control> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Make sure the set is usable for a problem with the given control
    /// dimension.
    pub fn validate(&self, control_dim: usize) -> Result<(), ConfigurationError> {
        if self.values.is_empty() {
            return Err(ConfigurationError::EmptyInputs);
        }

        for (index, input) in self.values.iter().enumerate() {
            if input.len() != control_dim {
                return Err(ConfigurationError::InputDimension {
                    index,
                    expected: control_dim,
                    found: input.len(),
                });
            }

            if input.iter().any(|u| !u.is_finite()) {
                return Err(ConfigurationError::NonFiniteInput(index));
            }
        }

        Ok(())
    }
}

impl From<Vec<Control>> for Inputs {
    fn from(values: Vec<Control>) -> Self {
        Self { values }
    }
}

impl FromIterator<Control> for Inputs {
    fn from_iter<I: IntoIterator<Item = Control>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Inputs {
    type Item = &'a Control;
    type IntoIter = std::slice::Iter<'a, Control>;
    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Produces the finite set of inputs used at a given resolution. Samplers
/// should return more inputs for higher resolutions so that the search
/// approaches the continuous control space as the resolution grows.
pub trait InputSampler {
    type Error: Into<Anyhow>;

    fn sample(&self, resolution: usize) -> Result<Inputs, Self::Error>;
}

/// A fixed set of inputs samples to itself at every resolution.
impl InputSampler for Inputs {
    type Error = NoError;
    fn sample(&self, _: usize) -> Result<Inputs, Self::Error> {
        Ok(self.clone())
    }
}
