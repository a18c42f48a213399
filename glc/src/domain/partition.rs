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

use super::{Keyed, Keyring};
use crate::motion::State;
use smallvec::SmallVec;
use std::collections::{hash_map::Entry, HashMap};

/// Integer coordinates of a hypercube in the state space partition.
pub type Cell = SmallVec<[i64; 4]>;

/// Divides the state space into a uniform grid of hypercubes. Each state is
/// keyed by the cell that contains it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partition {
    cell_size: f64,
}

impl Partition {
    pub fn new(cell_size: f64) -> Self {
        Self { cell_size }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }
}

impl Keyed for Partition {
    type Key = Cell;
}

impl Keyring<State> for Partition {
    fn key_for(&self, state: &State) -> Cell {
        state
            .iter()
            .map(|x| (x / self.cell_size).floor() as i64)
            .collect()
    }
}

/// The cheapest node that has been admitted into a cell so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRecord {
    pub cost: f64,
    pub node: usize,
}

/// Remembers the cheapest cost that has reached each cell of a keyring. A new
/// node is only worth keeping if it strictly improves on the record of its
/// cell.
#[derive(Debug, Clone)]
pub struct DominanceMap<Ring: Keyed = Partition> {
    keyring: Ring,
    records: HashMap<Ring::Key, CellRecord>,
}

impl<Ring: Keyed> DominanceMap<Ring> {
    pub fn new(keyring: Ring) -> Self {
        Self {
            keyring,
            records: Default::default(),
        }
    }

    pub fn keyring(&self) -> &Ring {
        &self.keyring
    }

    pub fn key_for<S>(&self, state: &S) -> Ring::Key
    where
        Ring: Keyring<S>,
    {
        self.keyring.key_for(state)
    }

    pub fn record(&self, key: &Ring::Key) -> Option<&CellRecord> {
        self.records.get(key)
    }

    /// True if the cell already holds a record that costs no more than `cost`.
    pub fn is_dominated(&self, key: &Ring::Key, cost: f64) -> bool {
        self.records
            .get(key)
            .map_or(false, |record| record.cost <= cost)
    }

    /// True if the cell has been claimed by something strictly cheaper than
    /// `cost`. Nodes in this situation can be skipped when they come out of
    /// the queue.
    pub fn is_superseded(&self, key: &Ring::Key, cost: f64) -> bool {
        self.records
            .get(key)
            .map_or(false, |record| record.cost < cost)
    }

    /// Store the record if it strictly improves on the cell. Returns the
    /// record that was displaced, or the prior record back as an Err when the
    /// new one was rejected.
    pub fn improve(
        &mut self,
        key: Ring::Key,
        record: CellRecord,
    ) -> Result<Option<CellRecord>, CellRecord> {
        match self.records.entry(key) {
            Entry::Occupied(mut entry) => {
                let prior = *entry.get();
                if prior.cost <= record.cost {
                    return Err(prior);
                }
                entry.insert(record);
                Ok(Some(prior))
            }
            Entry::Vacant(entry) => {
                entry.insert(record);
                Ok(None)
            }
        }
    }

    /// Number of cells that have been reached
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ring::Key, &CellRecord)> {
        self.records.iter()
    }

    /// All records ordered by cell so that the output does not depend on the
    /// hashing order.
    pub fn sorted(&self) -> Vec<(Ring::Key, CellRecord)>
    where
        Ring::Key: Ord,
    {
        let mut records: Vec<_> = self
            .records
            .iter()
            .map(|(key, record)| (key.clone(), *record))
            .collect();
        records.sort_by(|a, b| a.0.cmp(&b.0));
        records
    }
}
