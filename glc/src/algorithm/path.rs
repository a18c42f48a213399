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

/// The chain of nodes that leads from the root of a search tree to one of its
/// nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<State, Action, Cost> {
    /// Arena index of the root
    pub initial_node: usize,
    pub initial_state: State,
    /// Each entry is the arena index of a node, the action that led to it
    /// from the previous entry, and its state.
    pub sequence: Vec<(usize, Action, State)>,
    pub total_cost: Cost,
}

impl<S, A, C> Path<S, A, C> {
    /// Arena indices of every node along the path, starting from the root.
    pub fn nodes(&self) -> Vec<usize> {
        std::iter::once(self.initial_node)
            .chain(self.sequence.iter().map(|(node, _, _)| *node))
            .collect()
    }

    pub fn actions(&self) -> impl Iterator<Item = &A> {
        self.sequence.iter().map(|(_, action, _)| action)
    }

    pub fn final_state(&self) -> &S {
        self.sequence
            .last()
            .map(|(_, _, state)| state)
            .unwrap_or(&self.initial_state)
    }

    /// Number of actions along the path
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}
