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

use crate::{error::Anyhow, motion::Trajectory};
use float_ord::FloatOrd;
use num::traits::Zero;
use std::{
    cmp::{Eq, Ord, Ordering, PartialEq, PartialOrd},
    hash::{Hash, Hasher},
    ops::{Add, AddAssign},
};

/// Computes the cost of following a segment of trajectory while applying a
/// control history. Costs must be additive over consecutive segments and
/// never negative.
pub trait CostFunction {
    type Error: Into<Anyhow>;

    /// The cost accumulated over `[t0, tf]`, which lies within the domain of
    /// both trajectories.
    fn cost(
        &self,
        trajectory: &Trajectory,
        controls: &Trajectory,
        t0: f64,
        tf: f64,
    ) -> Result<f64, Self::Error>;
}

/// Floating point cost with total ordering, full equivalence, and
/// hashability, so it can be used to rank nodes in the search queue.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cost(pub f64);

impl Cost {
    fn convert(self) -> FloatOrd<f64> {
        FloatOrd(self.0)
    }
}

impl PartialEq for Cost {
    fn eq(&self, other: &Self) -> bool {
        self.convert() == other.convert()
    }
}

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.convert().cmp(&other.convert())
    }
}

impl Hash for Cost {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.convert().hash(state);
    }
}

impl Add for Cost {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Cost(self.0 + rhs.0)
    }
}

impl AddAssign for Cost {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Zero for Cost {
    fn zero() -> Self {
        Cost(0.0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl From<f64> for Cost {
    fn from(value: f64) -> Self {
        Cost(value)
    }
}

impl std::fmt::Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_ordering() {
        let mut costs = vec![Cost(2.5), Cost::zero(), Cost(1.0) + Cost(0.5)];
        costs.sort();
        assert_eq!(costs, vec![Cost(0.0), Cost(1.5), Cost(2.5)]);
    }
}
