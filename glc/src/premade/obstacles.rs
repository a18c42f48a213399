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

use super::{require_dim, sample_times, squared_distance, PremadeError};
use crate::{
    domain::Obstacles,
    error::NoError,
    motion::{State, Trajectory},
};

/// An obstacle-free environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FreeSpace;

impl Obstacles for FreeSpace {
    type Error = NoError;
    fn collision_free(&self, _: &Trajectory) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

/// A closed ball in the leading elements of the state.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: State,
    pub radius: f64,
}

/// A collection of circular obstacles. Trajectories are checked at
/// `resolution` evenly spaced times, so the radii should be inflated by the
/// largest distance the system can travel between two checks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CircularObstacles {
    pub circles: Vec<Circle>,
    pub resolution: usize,
}

impl CircularObstacles {
    pub fn new(resolution: usize) -> Self {
        Self { circles: Vec::new(), resolution }
    }

    pub fn with_circle(mut self, center: State, radius: f64) -> Self {
        self.circles.push(Circle { center, radius });
        self
    }

    /// Grow every circle by a margin.
    pub fn inflated(mut self, margin: f64) -> Self {
        for circle in &mut self.circles {
            circle.radius += margin;
        }
        self
    }

    /// True if the state lies outside of every circle.
    pub fn is_clear(&self, state: &State) -> Result<bool, PremadeError> {
        for circle in &self.circles {
            if squared_distance(state, &circle.center)? <= circle.radius * circle.radius {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Obstacles for CircularObstacles {
    type Error = PremadeError;
    fn collision_free(&self, trajectory: &Trajectory) -> Result<bool, Self::Error> {
        for t in sample_times(trajectory, self.resolution) {
            if !self.is_clear(&trajectory.at(t)?)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// A closed interval `[lower, upper]` of the first state element that may not
/// be entered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalObstacle {
    pub lower: f64,
    pub upper: f64,
    pub resolution: usize,
}

impl IntervalObstacle {
    pub fn new(lower: f64, upper: f64, resolution: usize) -> Self {
        Self { lower, upper, resolution }
    }
}

impl Obstacles for IntervalObstacle {
    type Error = PremadeError;
    fn collision_free(&self, trajectory: &Trajectory) -> Result<bool, Self::Error> {
        for t in sample_times(trajectory, self.resolution) {
            let state = trajectory.at(t)?;
            require_dim(&state, 1)?;
            if self.lower <= state[0] && state[0] <= self.upper {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::Piece;

    fn line(from: [f64; 2], to: [f64; 2]) -> Trajectory {
        let x0 = State::from_column_slice(&from);
        let rate = State::from_column_slice(&to) - &x0;
        Trajectory::new(Piece::new(0.0, 1.0, [x0, rate]).unwrap())
    }

    #[test]
    fn test_circular_obstacles() {
        let obstacles = CircularObstacles::new(10)
            .with_circle(State::from_column_slice(&[3.0, 2.0]), 2.0)
            .with_circle(State::from_column_slice(&[6.0, 8.0]), 2.0);

        assert!(!obstacles.collision_free(&line([0.0, 0.0], [5.0, 5.0])).unwrap());
        assert!(obstacles.collision_free(&line([0.0, 0.0], [0.0, 5.0])).unwrap());
        // Touching the boundary counts as a collision
        assert!(!obstacles.is_clear(&State::from_column_slice(&[1.0, 2.0])).unwrap());

        let inflated = obstacles.inflated(1.5);
        assert!(!inflated.collision_free(&line([0.0, 0.0], [0.0, 5.0])).unwrap());
    }

    #[test]
    fn test_interval_obstacle() {
        let obstacle = IntervalObstacle::new(8.0, 12.0, 10);
        let segment = |from: f64| {
            Trajectory::new(
                Piece::new(0.0, 1.0, [State::from_element(1, from), State::from_element(1, 1.0)])
                    .unwrap(),
            )
        };
        assert!(obstacle.collision_free(&segment(6.0)).unwrap());
        assert!(!obstacle.collision_free(&segment(7.0)).unwrap());
        assert!(FreeSpace.collision_free(&segment(7.0)).unwrap());

        // Without intermediate samples the end of the segment is still checked
        let coarse = IntervalObstacle::new(8.0, 12.0, 0);
        assert!(!coarse.collision_free(&segment(7.5)).unwrap());
        assert!(coarse.collision_free(&segment(6.0)).unwrap());
    }
}
