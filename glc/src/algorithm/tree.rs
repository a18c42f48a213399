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
    algorithm::{MinimumCostBound, Path, QueueLength},
    error::ThisError,
};
use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

/// A data structure for storing, managing, and growing a tree of nodes.
#[derive(Debug)]
pub struct Tree<Node, Cost> {
    /// The frontier queue for the tree, representing edge nodes of the tree
    /// that should be expanded next, in order from highest to lowest priority.
    pub queue: TreeFrontierQueue<Cost>,
    /// The memory arena for the tree which keeps track of all node data.
    pub arena: Vec<Node>,
}

impl<Node: TreeNode> Tree<Node, Node::Cost> {
    pub fn new() -> Self
    where
        Node::Cost: Ord,
    {
        Self {
            queue: Default::default(),
            arena: Default::default(),
        }
    }

    /// Add a node to the arena and the frontier. Returns the index of the node
    /// in the arena.
    pub fn push_node(&mut self, node: Node) -> usize
    where
        Node::Cost: Ord,
    {
        let node_id = self.arena.len();
        let evaluation = node.queue_evaluation();
        let bias = node.queue_bias();
        self.arena.push(node);
        self.queue.push(Reverse(TreeQueueTicket {
            evaluation,
            bias,
            node_id,
        }));
        node_id
    }

    /// Take the highest priority ticket off of the frontier.
    pub fn pop_ticket(&mut self) -> Option<TreeQueueTicket<Node::Cost>>
    where
        Node::Cost: Ord,
    {
        self.queue.pop().map(|ticket| ticket.0)
    }
}

impl<Node: TreeNode> Default for Tree<Node, Node::Cost>
where
    Node::Cost: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

pub trait TreeNode {
    /// The type used to describe the state of the node.
    type State;

    /// The type of action that can be taken from one node to another.
    type Action;

    /// The type used to decide whether to prefer one node over another. Lower
    /// values are preferable.
    type Cost;

    /// Get the state of the node.
    fn state(&self) -> &Self::State;

    /// If the node has a parent, get the identity of that parent and the action
    /// used to arrive from it.
    fn parent(&self) -> Option<(usize, &Self::Action)>;

    /// Get the actual cost of arriving at this node from its initial state.
    fn cost(&self) -> Self::Cost;

    /// Evaluate this node for its placement in the search queue. For an
    /// informed node this is its aggregated cost plus its remaining cost
    /// estimate.
    fn queue_evaluation(&self) -> Self::Cost;

    /// Give a bias to this node. When queue_evaluation is exactly equal, the
    /// node will be ordered by this bias instead. Higher bias will push it
    /// later in the queue.
    fn queue_bias(&self) -> Option<Self::Cost>;
}

/// Entries of the frontier queue are ordered by evaluation, then by bias, and
/// finally by the order in which their nodes were created.
#[derive(Debug, Clone, Copy)]
pub struct TreeQueueTicket<Cost> {
    pub evaluation: Cost,
    pub bias: Option<Cost>,
    pub node_id: usize,
}

pub type TreeFrontierQueue<Cost> = BinaryHeap<Reverse<TreeQueueTicket<Cost>>>;

impl<Cost: Ord> PartialEq for TreeQueueTicket<Cost> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<Cost: Ord> Eq for TreeQueueTicket<Cost> {}

impl<Cost: Ord> PartialOrd for TreeQueueTicket<Cost> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Cost: Ord> Ord for TreeQueueTicket<Cost> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.evaluation
            .cmp(&other.evaluation)
            .then_with(|| match (&self.bias, &other.bias) {
                (Some(l), Some(r)) => l.cmp(r),
                _ => Ordering::Equal,
            })
            .then_with(|| self.node_id.cmp(&other.node_id))
    }
}

pub trait NodeContainer<N: TreeNode> {
    fn get_node(&self, index: usize) -> Result<&N, TreeError>;
    fn retrace(&self, index: usize) -> Result<Path<N::State, N::Action, N::Cost>, TreeError>;
}

impl<N: TreeNode> NodeContainer<N> for Vec<N>
where
    N::State: Clone,
    N::Action: Clone,
{
    fn get_node(&self, index: usize) -> Result<&N, TreeError> {
        self.get(index).ok_or(TreeError::BrokenReference(index))
    }

    fn retrace(&self, node_id: usize) -> Result<Path<N::State, N::Action, N::Cost>, TreeError> {
        let total_cost = self.get_node(node_id)?.cost();
        let mut initial_node_id = node_id;
        let mut next_node_id = Some(node_id);
        let mut sequence = Vec::new();
        while let Some(current_node_id) = next_node_id {
            if sequence.len() > self.len() {
                // Every parent index is smaller than its child, so a longer
                // chain than the arena means the tree is corrupted.
                return Err(TreeError::Cycle(node_id));
            }

            initial_node_id = current_node_id;
            let node = self.get_node(current_node_id)?;
            next_node_id = if let Some((parent_id, action)) = node.parent() {
                sequence.push((current_node_id, action.clone(), node.state().clone()));
                Some(parent_id)
            } else {
                None
            };
        }

        sequence.reverse();

        let initial_state = self.get_node(initial_node_id)?.state().clone();
        Ok(Path {
            initial_node: initial_node_id,
            initial_state,
            sequence,
            total_cost,
        })
    }
}

#[derive(ThisError, Debug)]
pub enum TreeError {
    #[error(
        "A node [{0}] is referenced but does not exist in the search memory. \
    This is a critical implementation error, please report this to the glc developers."
    )]
    BrokenReference(usize),
    #[error("The ancestry of node [{0}] contains a cycle")]
    Cycle(usize),
}

impl<Node: TreeNode> QueueLength for Tree<Node, Node::Cost> {
    fn queue_length(&self) -> usize {
        self.queue.len()
    }
}

impl<Node: TreeNode> MinimumCostBound for Tree<Node, Node::Cost>
where
    Node::Cost: Clone,
{
    type Cost = Node::Cost;
    fn minimum_cost_bound(&self) -> Option<Self::Cost> {
        self.queue.peek().map(|n| n.0.evaluation.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct TestNode {
        name: &'static str,
        cost: u32,
        estimate: u32,
        parent: Option<(usize, char)>,
    }

    impl TestNode {
        fn new(name: &'static str, cost: u32, estimate: u32, parent: Option<(usize, char)>) -> Self {
            Self { name, cost, estimate, parent }
        }
    }

    impl TreeNode for TestNode {
        type State = &'static str;
        type Action = char;
        type Cost = u32;

        fn state(&self) -> &Self::State {
            &self.name
        }

        fn parent(&self) -> Option<(usize, &char)> {
            self.parent.as_ref().map(|(i, a)| (*i, a))
        }

        fn cost(&self) -> u32 {
            self.cost
        }

        fn queue_evaluation(&self) -> u32 {
            self.cost + self.estimate
        }

        fn queue_bias(&self) -> Option<u32> {
            Some(self.estimate)
        }
    }

    #[test]
    fn test_queue_ordering() {
        let mut tree = Tree::<TestNode, u32>::new();
        tree.push_node(TestNode::new("a", 0, 5, None));
        tree.push_node(TestNode::new("b", 3, 1, Some((0, 'x'))));
        tree.push_node(TestNode::new("c", 2, 2, Some((0, 'y'))));
        tree.push_node(TestNode::new("d", 2, 2, Some((0, 'z'))));
        tree.push_node(TestNode::new("e", 1, 1, Some((0, 'w'))));

        assert_eq!(tree.minimum_cost_bound(), Some(2));
        assert_eq!(tree.queue_length(), 5);
        let order: Vec<usize> = std::iter::from_fn(|| tree.pop_ticket())
            .map(|ticket| ticket.node_id)
            .collect();
        // Equal evaluations prefer the smaller estimate, then the older node
        assert_eq!(order, vec![4, 1, 2, 3, 0]);
    }

    #[test]
    fn test_retrace() {
        let arena = vec![
            TestNode::new("a", 0, 0, None),
            TestNode::new("b", 1, 0, Some((0, 'x'))),
            TestNode::new("c", 1, 0, Some((0, 'y'))),
            TestNode::new("d", 3, 0, Some((2, 'z'))),
        ];

        let path = arena.retrace(3).unwrap();
        assert_eq!(path.initial_node, 0);
        assert_eq!(path.initial_state, "a");
        assert_eq!(path.total_cost, 3);
        assert_eq!(path.sequence, vec![(2, 'y', "c"), (3, 'z', "d")]);
        assert!(matches!(arena.retrace(7), Err(TreeError::BrokenReference(7))));
    }

    #[test]
    fn test_retrace_detects_cycles() {
        let arena = vec![
            TestNode::new("a", 0, 0, Some((1, 'x'))),
            TestNode::new("b", 1, 0, Some((0, 'y'))),
        ];
        assert!(matches!(arena.retrace(1), Err(TreeError::Cycle(1))));
    }
}
