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

use super::{Control, Piece, State, Trajectory};
use crate::{
    domain::DynamicModel,
    error::Anyhow,
};
use anyhow::anyhow;

/// The time interval that an integrator should cover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub initial_time: f64,
    pub finish_time: f64,
    /// No single integration step may be longer than this
    pub max_step: f64,
}

impl Span {
    pub fn new(initial_time: f64, finish_time: f64, max_step: f64) -> Self {
        Self { initial_time, finish_time, max_step }
    }

    pub fn duration(&self) -> f64 {
        self.finish_time - self.initial_time
    }

    /// Number of equal steps needed to cover the span without exceeding
    /// `max_step`. Returns None for a degenerate span.
    pub fn steps(&self) -> Option<usize> {
        let duration = self.duration();
        if !duration.is_finite() || duration <= 0.0 {
            return None;
        }

        if !self.max_step.is_finite() || self.max_step <= 0.0 {
            return None;
        }

        let steps = (duration / self.max_step).ceil();
        if !steps.is_finite() || steps > usize::MAX as f64 {
            return None;
        }

        Some((steps as usize).max(1))
    }
}

/// The result of integrating one control input over a span.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// State history with one cubic piece per integration step
    pub trajectory: Trajectory,
    /// Control history, held constant across the whole span
    pub controls: Trajectory,
}

impl Segment {
    pub fn final_state(&self) -> State {
        self.trajectory.final_state()
    }

    pub fn finish_time(&self) -> f64 {
        self.trajectory.finish_time()
    }
}

/// A fixed-order explicit integration scheme for a [`DynamicModel`].
pub trait Integrator {
    type Model: DynamicModel;

    fn model(&self) -> &Self::Model;

    /// Take one step of length `h` from `state`, whose derivative has already
    /// been evaluated. Returns None if the step produced values that are not
    /// finite.
    fn advance(
        &self,
        state: &State,
        derivative: &State,
        control: &Control,
        h: f64,
    ) -> Result<Option<State>, Anyhow>;

    /// Largest acceptable difference between one step of this scheme and an
    /// Euler step over the same interval. Steps that exceed it make the
    /// whole segment infeasible.
    fn tolerance(&self) -> Option<f64> {
        None
    }

    fn lipschitz_constant(&self) -> f64 {
        self.model().lipschitz_constant()
    }

    /// Integrate the model from `state` while holding `control` over the
    /// span.
    ///
    /// Returns `Ok(None)` when the integration is numerically infeasible: the
    /// span is degenerate, a value stops being finite, or a step exceeds the
    /// error tolerance. Returns `Err` when the model itself fails.
    fn integrate(
        &self,
        state: &State,
        control: &Control,
        span: Span,
    ) -> Result<Option<Segment>, Anyhow> {
        let steps = match span.steps() {
            Some(steps) => steps,
            None => return Ok(None),
        };
        let h = span.duration() / steps as f64;

        let mut x = state.clone();
        let mut dx = match flow(self.model(), &x, control)? {
            Some(dx) => dx,
            None => return Ok(None),
        };

        let mut pieces = Vec::with_capacity(steps);
        for i in 0..steps {
            let t = span.initial_time + h * i as f64;
            let next = match self.advance(&x, &dx, control, h)? {
                Some(next) => next,
                None => return Ok(None),
            };

            if let Some(tolerance) = self.tolerance() {
                let euler = &x + &dx * h;
                if (&next - euler).amax() > tolerance {
                    return Ok(None);
                }
            }

            let next_dx = match flow(self.model(), &next, control)? {
                Some(next_dx) => next_dx,
                None => return Ok(None),
            };

            pieces.push(Piece::cubic_hermite(t, h, &x, &dx, &next, &next_dx));
            x = next;
            dx = next_dx;
        }

        let trajectory = match Trajectory::from_pieces(pieces) {
            Ok(trajectory) => trajectory,
            Err(_) => return Ok(None),
        };

        let controls = Trajectory::new(Piece::constant(
            span.initial_time,
            trajectory.finish_time() - span.initial_time,
            control.clone(),
        ));

        Ok(Some(Segment { trajectory, controls }))
    }
}

/// Evaluate the flow of a model. Values that are not finite give None, while a
/// derivative of the wrong size is an error in the model.
pub fn flow<M: DynamicModel>(
    model: &M,
    state: &State,
    control: &Control,
) -> Result<Option<State>, Anyhow> {
    let derivative = model.flow(state, control).map_err(Into::into)?;
    if derivative.len() != state.len() {
        return Err(anyhow!(
            "The flow has {} elements but the state has {}",
            derivative.len(),
            state.len(),
        ));
    }

    if derivative.iter().all(|v| v.is_finite()) {
        Ok(Some(derivative))
    } else {
        Ok(None)
    }
}

fn finite(state: State) -> Option<State> {
    if state.iter().all(|v| v.is_finite()) {
        Some(state)
    } else {
        None
    }
}

/// First order explicit integration.
#[derive(Debug, Clone)]
pub struct Euler<M> {
    pub model: M,
}

impl<M> Euler<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }
}

impl<M: DynamicModel> Integrator for Euler<M> {
    type Model = M;

    fn model(&self) -> &M {
        &self.model
    }

    fn advance(
        &self,
        state: &State,
        derivative: &State,
        _: &Control,
        h: f64,
    ) -> Result<Option<State>, Anyhow> {
        Ok(finite(state + derivative * h))
    }
}

/// Second order explicit integration using the midpoint rule.
#[derive(Debug, Clone)]
pub struct RungeKuttaTwo<M> {
    pub model: M,
    pub tolerance: Option<f64>,
}

impl<M> RungeKuttaTwo<M> {
    pub fn new(model: M) -> Self {
        Self { model, tolerance: None }
    }

    /// Reject any step that differs from an Euler step by more than
    /// `tolerance` in any element.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
}

impl<M: DynamicModel> Integrator for RungeKuttaTwo<M> {
    type Model = M;

    fn model(&self) -> &M {
        &self.model
    }

    fn advance(
        &self,
        state: &State,
        derivative: &State,
        control: &Control,
        h: f64,
    ) -> Result<Option<State>, Anyhow> {
        let midpoint = match finite(state + derivative * (h / 2.0)) {
            Some(midpoint) => midpoint,
            None => return Ok(None),
        };

        let slope = match flow(&self.model, &midpoint, control)? {
            Some(slope) => slope,
            None => return Ok(None),
        };

        Ok(finite(state + slope * h))
    }

    fn tolerance(&self) -> Option<f64> {
        self.tolerance
    }
}
