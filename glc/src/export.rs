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

//! Files that describe the result of a query: a table of states sampled along
//! a trajectory, and the cells that the search reached.

use crate::{
    algorithm::PlannerOutput,
    error::ThisError,
    motion::Trajectory,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSample {
    pub time: f64,
    pub state: Vec<f64>,
}

/// Evenly spaced samples of a trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryTable {
    pub samples: Vec<StateSample>,
}

impl TrajectoryTable {
    pub fn from_trajectory(trajectory: &Trajectory, count: usize) -> Self {
        let samples = trajectory
            .sample(count)
            .into_iter()
            .map(|(time, state)| StateSample {
                time,
                state: state.iter().copied().collect(),
            })
            .collect();
        Self { samples }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExploredCell {
    pub cell: Vec<i64>,
    pub cost: f64,
    pub node: usize,
}

/// Every cell the search reached, with the cheapest cost that reached it.
/// The lower corner of a cell is its coordinates multiplied by `cell_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellTable {
    pub cell_size: f64,
    pub cells: Vec<ExploredCell>,
}

impl CellTable {
    pub fn from_output(output: &PlannerOutput, cell_size: f64) -> Self {
        let cells = output
            .cells
            .iter()
            .map(|(cell, record)| ExploredCell {
                cell: cell.to_vec(),
                cost: record.cost,
                node: record.node,
            })
            .collect();
        Self { cell_size, cells }
    }
}

/// Read and write a serializable table as YAML.
pub trait YamlFile: Serialize + DeserializeOwned {
    fn to_yaml(&self) -> Result<String, ExportError> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn from_yaml(text: &str) -> Result<Self, ExportError> {
        Ok(serde_yaml::from_str(text)?)
    }

    fn write(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_yaml()?).map_err(|source| ExportError::Io {
            path: path.to_owned(),
            source,
        })
    }

    fn read(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ExportError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_yaml(&text)
    }
}

impl YamlFile for TrajectoryTable {}
impl YamlFile for CellTable {}

#[derive(ThisError, Debug)]
pub enum ExportError {
    #[error("Unable to convert the table to or from YAML:\n{0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Unable to access [{path:?}]:\n{source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
