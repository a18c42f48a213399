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

pub mod integrator;
pub use integrator::*;

pub mod trajectory;
pub use trajectory::*;

/// A point in the state space of the planning problem
pub type State = nalgebra::DVector<f64>;

/// A control input that is held constant over one expansion
pub type Control = nalgebra::DVector<f64>;
