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

pub mod glc;
pub use self::glc::*;

pub mod tree;

pub mod path;
pub use path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus<Solution> {
    Incomplete,
    Impossible,
    Solved(Solution),
}

impl<S> SearchStatus<S> {
    pub fn incomplete(&self) -> bool {
        matches!(self, SearchStatus::Incomplete)
    }

    pub fn impossible(&self) -> bool {
        matches!(self, SearchStatus::Impossible)
    }

    pub fn solved(&self) -> bool {
        matches!(self, SearchStatus::Solved(_))
    }

    pub fn solution(self) -> Option<S> {
        match self {
            Self::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}

pub trait Algorithm {
    /// The `Memory` type tracks the progress of each search.
    type Memory;
}

/// The `Coherent` trait determines when the user input is coherent (usable) for
/// the algorithm.
pub trait Coherent<Start, Goal>: Algorithm {
    type InitError;

    fn initialize(&self, start: Start, goal: &Goal) -> Result<Self::Memory, Self::InitError>;
}

/// The `Solvable` trait defines the basic structure that an algorithm needs
/// to satisfy in order for a Planner to operate on it.
pub trait Solvable<Goal>: Algorithm + Sized {
    /// The `Solution` type is what the Algorithm will return once it has found
    /// a valid solution.
    type Solution;

    /// A `StepError` will be returned when an issue is encountered during a
    /// step of the algorithm.
    type StepError;

    /// Take a step in the search algorithm. The same memory instance will be
    /// passed in with each iteration.
    fn step(
        &self,
        memory: &mut Self::Memory,
        goal: &Goal,
    ) -> Result<SearchStatus<Self::Solution>, Self::StepError>;
}

// Implement the Algorithm traits for &Algo so that a planner can borrow the
// algorithm for a single search.
impl<Algo: Algorithm> Algorithm for &Algo {
    type Memory = Algo::Memory;
}

impl<Start, Goal, Algo: Coherent<Start, Goal>> Coherent<Start, Goal> for &Algo {
    type InitError = Algo::InitError;

    fn initialize(&self, start: Start, goal: &Goal) -> Result<Self::Memory, Self::InitError> {
        (*self).initialize(start, goal)
    }
}

impl<Goal, Algo: Solvable<Goal>> Solvable<Goal> for &Algo {
    type Solution = Algo::Solution;
    type StepError = Algo::StepError;
    fn step(
        &self,
        memory: &mut Self::Memory,
        goal: &Goal,
    ) -> Result<SearchStatus<Self::Solution>, Self::StepError> {
        (*self).step(memory, goal)
    }
}

/// The `MinimumCostBound` trait can be implemented by `Algorithm::Memory` types
/// to report a minimum bound for the cost of any possible solution to a problem
/// if a solution exists.
///
/// Returning None implies that the minimum cost is unbounded (i.e. there might
/// not be any solution at all).
pub trait MinimumCostBound {
    type Cost;
    fn minimum_cost_bound(&self) -> Option<Self::Cost>;
}

/// Number of entries waiting in the search frontier
pub trait QueueLength {
    fn queue_length(&self) -> usize;
}
