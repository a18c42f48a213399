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

/// A trait to define conditions in which a search should be halted.
pub trait Halt<Mem>: Clone {
    /// Check whether the current search should be interrupted.
    fn halt(&mut self, memory: &Mem) -> bool;
}

/// If an empty tuple is given for the options then we treat that as an
/// indication that we should let the solver continue without halting for any
/// reason.
impl<Mem> Halt<Mem> for () {
    fn halt(&mut self, _: &Mem) -> bool {
        false
    }
}

/// This option sets a maximum number of steps that can be taken before the
/// planner is told to halt.
#[derive(Debug, Clone)]
pub struct StepLimit {
    steps: usize,
    pub limit: Option<usize>,
}

impl StepLimit {
    pub fn new(limit: Option<usize>) -> Self {
        Self { steps: 0, limit }
    }

    /// Number of steps that have been allowed so far
    pub fn steps(&self) -> usize {
        self.steps.min(self.limit.unwrap_or(usize::MAX))
    }

    pub fn reset(&mut self) {
        self.steps = 0;
    }
}

impl<Mem> Halt<Mem> for StepLimit {
    fn halt(&mut self, _: &Mem) -> bool {
        self.steps += 1;
        if let Some(limit) = self.limit {
            return self.steps > limit;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_limit() {
        let mut halting = StepLimit::new(Some(2));
        assert!(!halting.halt(&()));
        assert!(!halting.halt(&()));
        assert!(halting.halt(&()));
        assert_eq!(halting.steps(), 2);

        halting.reset();
        assert!(!halting.halt(&()));
    }

    #[test]
    fn test_no_limit() {
        let mut halting = StepLimit::new(None);
        assert!((0..1000).all(|_| !halting.halt(&())));
        assert!(!().halt(&0_usize));
    }
}
