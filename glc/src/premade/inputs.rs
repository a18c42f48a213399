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
    domain::{InputSampler, Inputs},
    error::NoError,
    motion::Control,
};
use serde::{Deserialize, Serialize};

/// `count` evenly spaced values from `start` to `end`, inclusive.
pub fn linear_space(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i + 1 == count { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Pairs of (forward speed, turn rate) for a car. The turn rates are spread
/// evenly over `[-max_turn_rate, max_turn_rate]` with one value per unit of
/// resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteeringInputs {
    pub speeds: Vec<f64>,
    pub max_turn_rate: f64,
}

impl SteeringInputs {
    pub fn new(speeds: Vec<f64>, max_turn_rate: f64) -> Self {
        Self { speeds, max_turn_rate }
    }
}

impl InputSampler for SteeringInputs {
    type Error = NoError;
    fn sample(&self, resolution: usize) -> Result<Inputs, Self::Error> {
        let turn_rates = linear_space(-self.max_turn_rate, self.max_turn_rate, resolution);
        Ok(self
            .speeds
            .iter()
            .flat_map(|speed| {
                turn_rates
                    .iter()
                    .map(move |turn| Control::from_column_slice(&[*speed, *turn]))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_space() {
        assert_eq!(linear_space(-1.0, 1.0, 5), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(linear_space(2.0, 3.0, 1), vec![2.0]);
        assert!(linear_space(2.0, 3.0, 0).is_empty());
    }

    #[test]
    fn test_steering_inputs_grow_with_resolution() {
        let steering = SteeringInputs::new(vec![1.0, 2.0], 0.5);
        let inputs = steering.sample(3).unwrap();
        assert_eq!(inputs.len(), 6);
        assert!(inputs.validate(2).is_ok());

        let first = inputs.get(0).unwrap();
        assert_relative_eq!(first[0], 1.0);
        assert_relative_eq!(first[1], -0.5);
        let last = inputs.get(5).unwrap();
        assert_relative_eq!(last[0], 2.0);
        assert_relative_eq!(last[1], 0.5);

        assert_eq!(steering.sample(21).unwrap().len(), 42);
    }
}
