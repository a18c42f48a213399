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

use std::{cmp::Eq, hash::Hash};

/// The `Key` trait describes objects that can be used as keys by a keyring.
pub trait Key: Hash + Eq + Clone + std::fmt::Debug {}
impl<T: Hash + Eq + Clone + std::fmt::Debug> Key for T {}

/// `Keyed` is used to indicate an associated [`Key`] type for a struct.
pub trait Keyed {
    type Key: Key;
}

/// The `Keyring` trait is implemented by structs that can produce a key for a
/// given state. States that share a key compete with each other during the
/// search.
pub trait Keyring<State>: Keyed {
    fn key_for(&self, state: &State) -> Self::Key;
}
