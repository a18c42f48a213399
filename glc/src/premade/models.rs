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
use crate::{
    domain::DynamicModel,
    motion::{Control, State},
};

/// The state moves with the velocity given by the control, so the state and
/// control must have the same size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SingleIntegrator;

impl DynamicModel for SingleIntegrator {
    type Error = PremadeError;

    fn flow(&self, state: &State, control: &Control) -> Result<State, Self::Error> {
        if state.len() != control.len() {
            return Err(PremadeError::Dimension {
                expected: state.len(),
                found: control.len(),
            });
        }
        Ok(control.clone())
    }

    fn lipschitz_constant(&self) -> f64 {
        0.0
    }
}

/// A car that cannot move sideways. The state is `(x, y, heading)` and the
/// control is `(speed, turn rate)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonholonomicCar {
    pub lipschitz: f64,
}

impl NonholonomicCar {
    pub fn new(lipschitz: f64) -> Self {
        Self { lipschitz }
    }
}

impl Default for NonholonomicCar {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl DynamicModel for NonholonomicCar {
    type Error = PremadeError;

    fn flow(&self, state: &State, control: &Control) -> Result<State, Self::Error> {
        require_dim(state, 3)?;
        require_dim(control, 2)?;
        let (speed, turn_rate, heading) = (control[0], control[1], state[2]);
        Ok(State::from_column_slice(&[
            speed * heading.cos(),
            speed * heading.sin(),
            turn_rate,
        ]))
    }

    fn lipschitz_constant(&self) -> f64 {
        self.lipschitz
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{Integrator, RungeKuttaTwo, Span};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_car_follows_its_heading() {
        let car = NonholonomicCar::default();
        let dx = car
            .flow(
                &State::from_column_slice(&[1.0, 2.0, PI / 2.0]),
                &Control::from_column_slice(&[2.0, 0.3]),
            )
            .unwrap();
        assert_relative_eq!(dx[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(dx[1], 2.0);
        assert_relative_eq!(dx[2], 0.3);

        assert!(car.flow(&State::zeros(2), &Control::zeros(2)).is_err());
    }

    #[test]
    fn test_car_drives_a_circle() {
        // Unit speed with unit turn rate traces a circle of radius one
        let integrator = RungeKuttaTwo::new(NonholonomicCar::default());
        let segment = integrator
            .integrate(
                &State::from_column_slice(&[0.0, 0.0, 0.0]),
                &Control::from_column_slice(&[1.0, 1.0]),
                Span::new(0.0, PI, 0.01),
            )
            .unwrap()
            .unwrap();

        let end = segment.final_state();
        assert_relative_eq!(end[0], 0.0, epsilon = 1e-3);
        assert_relative_eq!(end[1], 2.0, epsilon = 1e-3);
        assert_relative_eq!(end[2], PI, epsilon = 1e-9);

        let quarter = segment.trajectory.at(PI / 2.0).unwrap();
        assert_relative_eq!(quarter[0], 1.0, epsilon = 1e-3);
        assert_relative_eq!(quarter[1], 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_single_integrator() {
        let model = SingleIntegrator;
        let dx = model
            .flow(&State::zeros(2), &Control::from_column_slice(&[1.0, -1.0]))
            .unwrap();
        assert_eq!(dx, State::from_column_slice(&[1.0, -1.0]));
        assert!(model.flow(&State::zeros(1), &Control::zeros(2)).is_err());
        assert_relative_eq!(model.lipschitz_constant(), 0.0);
    }
}
