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

use super::State;
use crate::error::ThisError;
use smallvec::SmallVec;

/// Relative tolerance used when deciding whether two times coincide.
const TIME_TOLERANCE: f64 = 1e-9;

fn same_time(a: f64, b: f64) -> bool {
    (a - b).abs() <= TIME_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// A polynomial in time that is valid over `[initial_time, finish_time]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    initial_time: f64,
    duration: f64,
    /// Coefficients of the polynomial in local time `t - initial_time`,
    /// ordered from the constant term upward.
    coefficients: SmallVec<[State; 4]>,
}

impl Piece {
    /// Create a piece from its coefficients, constant term first.
    pub fn new<I: IntoIterator<Item = State>>(
        initial_time: f64,
        duration: f64,
        coefficients: I,
    ) -> Result<Self, TrajectoryError> {
        if !duration.is_finite() || duration < 0.0 || !initial_time.is_finite() {
            return Err(TrajectoryError::InvalidInterval { initial_time, duration });
        }

        let coefficients: SmallVec<[State; 4]> = coefficients.into_iter().collect();
        let dim = match coefficients.first() {
            Some(c) => c.len(),
            None => return Err(TrajectoryError::NoCoefficients),
        };

        if let Some(c) = coefficients.iter().find(|c| c.len() != dim) {
            return Err(TrajectoryError::DimensionMismatch {
                expected: dim,
                found: c.len(),
            });
        }

        Ok(Self { initial_time, duration, coefficients })
    }

    /// A piece that holds a single value for its whole interval.
    pub fn constant(initial_time: f64, duration: f64, value: State) -> Self {
        Self {
            initial_time,
            duration: duration.max(0.0),
            coefficients: smallvec::smallvec![value],
        }
    }

    /// The cubic that matches the value and derivative at both ends of an
    /// interval of length `h`.
    pub fn cubic_hermite(
        initial_time: f64,
        h: f64,
        x0: &State,
        dx0: &State,
        x1: &State,
        dx1: &State,
    ) -> Self {
        let slope = (x1 - x0) / h;
        let c2 = (&slope * 3.0 - dx0 * 2.0 - dx1) / h;
        let c3 = (dx0 + dx1 - &slope * 2.0) / (h * h);
        Self {
            initial_time,
            duration: h,
            coefficients: smallvec::smallvec![x0.clone(), dx0.clone(), c2, c3],
        }
    }

    pub fn initial_time(&self) -> f64 {
        self.initial_time
    }

    pub fn finish_time(&self) -> f64 {
        self.initial_time + self.duration
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Number of elements in the values of this piece
    pub fn dim(&self) -> usize {
        self.coefficients[0].len()
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn coefficients(&self) -> &[State] {
        &self.coefficients
    }

    /// Evaluate the piece at a global time. Times outside of the interval are
    /// clamped to it.
    pub fn at(&self, time: f64) -> State {
        let tau = (time - self.initial_time).clamp(0.0, self.duration);
        let mut iter = self.coefficients.iter().rev();
        // Pieces always have at least one coefficient
        let mut value = iter.next().cloned().unwrap_or_else(|| State::zeros(0));
        for c in iter {
            value *= tau;
            value += c;
        }
        value
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Find {
    /// The requested time falls within the piece of this index
    Within(usize),

    /// The requested time is before the start of the trajectory
    BeforeStart,

    /// The requested time is after the trajectory is finished
    AfterFinish,
}

/// A continuous sequence of polynomial pieces. Each piece starts at the time
/// where its predecessor finishes. A trajectory always has at least one piece,
/// although that piece may have zero duration.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    pieces: Vec<Piece>,
}

impl Trajectory {
    pub fn new(piece: Piece) -> Self {
        Self { pieces: vec![piece] }
    }

    /// A trajectory that consists of a single instant.
    pub fn point(time: f64, value: State) -> Self {
        Self::new(Piece::constant(time, 0.0, value))
    }

    /// Drains pieces out of the given iterator and constructs a trajectory
    /// with them. Returns an Err if there are no pieces or they do not line up.
    pub fn from_pieces<I: IntoIterator<Item = Piece>>(iter: I) -> Result<Self, TrajectoryError> {
        let mut iter = iter.into_iter();
        let mut result = match iter.next() {
            Some(first) => Self::new(first),
            None => return Err(TrajectoryError::Empty),
        };

        for piece in iter {
            result.push(piece)?;
        }

        Ok(result)
    }

    /// Add a piece to the end of the trajectory. It must start when the
    /// trajectory finishes and have values of the same dimension.
    pub fn push(&mut self, piece: Piece) -> Result<(), TrajectoryError> {
        let finish = self.finish_time();
        if !same_time(finish, piece.initial_time()) {
            return Err(TrajectoryError::Discontinuous {
                finish,
                next: piece.initial_time(),
            });
        }

        if piece.dim() != self.dim() {
            return Err(TrajectoryError::DimensionMismatch {
                expected: self.dim(),
                found: piece.dim(),
            });
        }

        if self.duration() == 0.0 {
            // A single instant carries no information beyond its value
            self.pieces.clear();
        }

        self.pieces.push(piece);
        Ok(())
    }

    /// Append another trajectory that begins where this one finishes.
    pub fn append(&mut self, other: Trajectory) -> Result<(), TrajectoryError> {
        for piece in other.pieces {
            self.push(piece)?;
        }
        Ok(())
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Get the number of pieces in the trajectory.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn dim(&self) -> usize {
        self.pieces[0].dim()
    }

    pub fn initial_time(&self) -> f64 {
        self.pieces[0].initial_time()
    }

    pub fn finish_time(&self) -> f64 {
        self.pieces[self.pieces.len() - 1].finish_time()
    }

    pub fn duration(&self) -> f64 {
        self.finish_time() - self.initial_time()
    }

    pub fn initial_state(&self) -> State {
        self.pieces[0].at(self.initial_time())
    }

    pub fn final_state(&self) -> State {
        self.pieces[self.pieces.len() - 1].at(self.finish_time())
    }

    /// Find the piece of the trajectory that covers this point in time.
    pub fn find(&self, time: f64) -> Find {
        let index = self
            .pieces
            .partition_point(|p| p.initial_time() <= time);

        if index == 0 {
            if same_time(time, self.initial_time()) {
                return Find::Within(0);
            }
            return Find::BeforeStart;
        }

        let piece = &self.pieces[index - 1];
        if time <= piece.finish_time() || same_time(time, piece.finish_time()) {
            return Find::Within(index - 1);
        }

        Find::AfterFinish
    }

    /// Evaluate the trajectory at a time within its domain.
    pub fn at(&self, time: f64) -> Result<State, TrajectoryError> {
        match self.find(time) {
            Find::Within(index) => Ok(self.pieces[index].at(time)),
            Find::BeforeStart | Find::AfterFinish => Err(TrajectoryError::OutOfBounds {
                time,
                initial_time: self.initial_time(),
                finish_time: self.finish_time(),
            }),
        }
    }

    /// Cut the trajectory off at `time`, discarding everything after it.
    pub fn truncate(&mut self, time: f64) -> Result<(), TrajectoryError> {
        let index = match self.find(time) {
            Find::Within(index) => index,
            Find::BeforeStart | Find::AfterFinish => {
                return Err(TrajectoryError::OutOfBounds {
                    time,
                    initial_time: self.initial_time(),
                    finish_time: self.finish_time(),
                });
            }
        };

        self.pieces.truncate(index + 1);
        let last = &mut self.pieces[index];
        last.duration = (time - last.initial_time).clamp(0.0, last.duration);
        if last.duration == 0.0 && self.pieces.len() > 1 {
            self.pieces.pop();
        }

        Ok(())
    }

    /// Evaluate the trajectory at `count` evenly spaced times that include the
    /// initial and finish times.
    pub fn sample(&self, count: usize) -> Vec<(f64, State)> {
        let t0 = self.initial_time();
        let tf = self.finish_time();
        match count {
            0 => Vec::new(),
            1 => vec![(tf, self.final_state())],
            _ => {
                let dt = (tf - t0) / (count - 1) as f64;
                (0..count)
                    .map(|i| {
                        let t = if i + 1 == count { tf } else { t0 + dt * i as f64 };
                        let index = match self.find(t) {
                            Find::Within(index) => index,
                            Find::BeforeStart => 0,
                            Find::AfterFinish => self.pieces.len() - 1,
                        };
                        (t, self.pieces[index].at(t))
                    })
                    .collect()
            }
        }
    }
}

#[derive(ThisError, Debug, Clone, PartialEq)]
pub enum TrajectoryError {
    #[error("A trajectory needs at least one piece")]
    Empty,
    #[error("A piece needs at least one coefficient")]
    NoCoefficients,
    #[error("Invalid piece interval starting at {initial_time} lasting {duration}")]
    InvalidInterval { initial_time: f64, duration: f64 },
    #[error("Expected values with {expected} elements but found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("The trajectory finishes at {finish} but the next piece starts at {next}")]
    Discontinuous { finish: f64, next: f64 },
    #[error("Time {time} is outside of the trajectory domain [{initial_time}, {finish_time}]")]
    OutOfBounds {
        time: f64,
        initial_time: f64,
        finish_time: f64,
    },
}
