// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Loop index to behaviour factory table.

use super::behavior::BehaviorFactory;
use super::kind::LoopKind;
use std::collections::BTreeMap;

/// Ordered table of loop factories.
///
/// Registering an index that is already taken replaces the old entry; level
/// content is iterated on live and the last registration wins.
#[derive(Debug, Clone)]
pub struct LoopRegistry<F> {
    entries: BTreeMap<i32, F>,
}

impl<F: BehaviorFactory> LoopRegistry<F> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Binds `factory` to `index`, replacing any earlier binding.
    pub fn register(&mut self, index: i32, factory: F) {
        if let Some(old) = self.entries.insert(index, factory) {
            log::debug!("Loop {index}: '{}' replaced", old.name());
        }
    }

    /// Binds `factory` to the index after the highest one registered.
    /// Returns the index used.
    pub fn push(&mut self, factory: F) -> i32 {
        let index = self
            .entries
            .keys()
            .next_back()
            .map_or(0, |last| last + 1);
        self.register(index, factory);
        index
    }

    /// The factory bound to `index`.
    pub fn get(&self, index: i32) -> Option<&F> {
        self.entries.get(&index)
    }

    /// Removes the binding of `index`.
    pub fn unregister(&mut self, index: i32) -> Option<F> {
        self.entries.remove(&index)
    }

    /// Registered indices, ascending.
    pub fn indices(&self) -> impl Iterator<Item = i32> + '_ {
        self.entries.keys().copied()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<F: BehaviorFactory> Default for LoopRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopRegistry<LoopKind> {
    /// The game's loop table, in play order.
    pub fn with_default_loops() -> Self {
        let mut registry = Self::new();
        for kind in LoopKind::DEFAULT_ORDER {
            registry.push(kind);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_order() {
        let registry = LoopRegistry::with_default_loops();
        let table: Vec<_> = registry
            .indices()
            .filter_map(|i| registry.get(i).copied())
            .collect();
        assert_eq!(
            table,
            vec![
                LoopKind::Intro,
                LoopKind::RadioPuzzle,
                LoopKind::FlickeringLights,
                LoopKind::PianoPuzzle,
                LoopKind::CryingWife,
                LoopKind::Normal,
                LoopKind::FallenObjects,
                LoopKind::Normal,
                LoopKind::SitterEncounter,
            ]
        );
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = LoopRegistry::new();
        registry.register(3, LoopKind::Normal);
        registry.register(3, LoopKind::Bloody);
        assert_eq!(registry.get(3), Some(&LoopKind::Bloody));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(4), None);
    }

    #[test]
    fn push_appends_after_highest_index() {
        let mut registry = LoopRegistry::new();
        assert_eq!(registry.push(LoopKind::Intro), 0);
        registry.register(5, LoopKind::Normal);
        assert_eq!(registry.push(LoopKind::Bloody), 6);
    }
}
