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

//! Traits for the problem-specific pieces that a planning query is built from.
//! Each collaborator reports failures through its own error type, which the
//! planner converts into [`crate::error::GlcError::Collaborator`].

pub mod cost;
pub use cost::*;

pub mod dynamics;
pub use dynamics::*;

pub mod goal;
pub use goal::*;

pub mod informed;
pub use informed::*;

pub mod inputs;
pub use inputs::*;

pub mod keyed;
pub use keyed::*;

pub mod obstacles;
pub use obstacles::*;

pub mod partition;
pub use partition::*;
