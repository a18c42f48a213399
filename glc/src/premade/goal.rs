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

use super::{sample_times, squared_distance, PremadeError};
use crate::{
    domain::GoalRegion,
    motion::{State, Trajectory},
};

/// A ball around a point in the leading elements of the state. Trajectories
/// are checked at `resolution` evenly spaced times.
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalGoal {
    pub center: State,
    pub radius: f64,
    pub resolution: usize,
}

impl SphericalGoal {
    pub fn new(center: State, radius: f64, resolution: usize) -> Self {
        Self { center, radius, resolution }
    }
}

impl GoalRegion for SphericalGoal {
    type Error = PremadeError;
    fn test(&self, trajectory: &Trajectory) -> Result<Option<f64>, Self::Error> {
        let radius_squared = self.radius * self.radius;
        for t in sample_times(trajectory, self.resolution) {
            let state = trajectory.at(t)?;
            if squared_distance(&state, &self.center)? < radius_squared {
                return Ok(Some(t));
            }
        }

        Ok(None)
    }
}

/// The closed interval `[lower, upper]` of the first state element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalGoal {
    pub lower: f64,
    pub upper: f64,
    pub resolution: usize,
}

impl IntervalGoal {
    pub fn new(lower: f64, upper: f64, resolution: usize) -> Self {
        Self { lower, upper, resolution }
    }
}

impl GoalRegion for IntervalGoal {
    type Error = PremadeError;
    fn test(&self, trajectory: &Trajectory) -> Result<Option<f64>, Self::Error> {
        for t in sample_times(trajectory, self.resolution) {
            let state = trajectory.at(t)?;
            super::require_dim(&state, 1)?;
            if self.lower <= state[0] && state[0] <= self.upper {
                return Ok(Some(t));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::Piece;
    use approx::assert_relative_eq;

    fn diagonal(t0: f64) -> Trajectory {
        // Moves from (0, 0) to (4, 4) over four seconds
        Trajectory::new(
            Piece::new(
                t0,
                4.0,
                [State::from_column_slice(&[0.0, 0.0]), State::from_column_slice(&[1.0, 1.0])],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_spherical_goal_reports_first_arrival() {
        let goal = SphericalGoal::new(State::from_column_slice(&[3.0, 3.0]), 1.5, 8);
        let hit = goal.test(&diagonal(1.0)).unwrap().unwrap();
        assert_relative_eq!(hit, 3.0);

        let far = SphericalGoal::new(State::from_column_slice(&[3.0, -3.0]), 1.0, 8);
        assert_eq!(far.test(&diagonal(1.0)).unwrap(), None);

        let too_many = SphericalGoal::new(State::zeros(3), 1.0, 8);
        assert!(matches!(
            too_many.test(&diagonal(0.0)),
            Err(PremadeError::Dimension { expected: 3, found: 2 })
        ));
    }

    #[test]
    fn test_interval_goal_is_closed() {
        let goal = IntervalGoal::new(2.0, 3.0, 4);
        assert_relative_eq!(goal.test(&diagonal(0.0)).unwrap().unwrap(), 2.0);
        assert!(goal
            .test(&Trajectory::point(0.0, State::from_column_slice(&[3.0])))
            .unwrap()
            .is_some());
    }
}
