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

use super::SimClock;

/// Identifies a scheduled timer so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<T> {
    id: TimerId,
    due: f64,
    payload: T,
}

/// A set of fire-once timers carrying payloads of type `T`.
///
/// The owner advances it with the tick delta and receives the payloads that
/// came due, ordered by due time and then by scheduling order. Dropping or
/// clearing the set cancels everything still pending, which is how mounted
/// behaviours guarantee nothing they scheduled outlives them.
#[derive(Debug)]
pub struct Timers<T> {
    clock: SimClock,
    next_id: u64,
    pending: Vec<Entry<T>>,
}

impl<T> Timers<T> {
    /// An empty timer set whose local clock starts at zero.
    pub fn new() -> Self {
        Self {
            clock: SimClock::new(),
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Local time in seconds.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Schedules `payload` to fire `delay_secs` from now. A non-positive delay
    /// fires on the next [`Timers::advance`].
    pub fn schedule(&mut self, delay_secs: f32, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.clock.now() + f64::from(delay_secs.max(0.0));
        self.pending.push(Entry { id, due, payload });
        id
    }

    /// Cancels a pending timer. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|e| e.id != id);
        before != self.pending.len()
    }

    /// Cancels every pending timer whose payload matches `predicate`.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) {
        self.pending.retain(|e| !predicate(&e.payload));
    }

    /// Whether `id` is still waiting to fire.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|e| e.id == id)
    }

    /// Advances local time by `dt` and returns every payload now due.
    pub fn advance(&mut self, dt: f32) -> Vec<T> {
        let now = self.clock.advance(dt);
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due <= now {
                due.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)));
        due.into_iter().map(|e| e.payload).collect()
    }

    /// Cancels everything.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}
