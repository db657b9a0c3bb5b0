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

/// A FIFO of commands of a single closed type `T`.
///
/// Anything holding a [`CommandSender`] may publish at any time (including
/// async load tasks on other threads). The owner drains the queue once per
/// tick, so consumers always see commands in publish order and never in the
/// middle of a tick. `limen-core` stays decoupled from the concrete command
/// types, which live in higher-level crates.
#[derive(Debug)]
pub struct CommandQueue<T: Send + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

/// A cloneable handle for publishing into a [`CommandQueue`].
#[derive(Debug)]
pub struct CommandSender<T: Send + 'static> {
    inner: flume::Sender<T>,
}

impl<T: Send + 'static> Clone for CommandSender<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Send + 'static> CommandSender<T> {
    /// Publishes a command. Logs and drops it if the queue is gone.
    pub fn publish(&self, command: T) {
        if let Err(e) = self.inner.send(command) {
            log::error!("Failed to send command: {e}. Queue likely dropped.");
        }
    }
}

impl<T: Send + 'static> CommandQueue<T> {
    /// Creates an empty queue backed by an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Publishes a command from the owning thread.
    pub fn publish(&self, command: T) {
        log::trace!("Publishing a command.");
        if let Err(e) = self.sender.send(command) {
            log::error!("Failed to send command: {e}. Receiver likely disconnected.");
        }
    }

    /// Returns a publishing handle for other components.
    pub fn sender(&self) -> CommandSender<T> {
        CommandSender {
            inner: self.sender.clone(),
        }
    }

    /// Removes and returns every pending command, oldest first.
    ///
    /// Commands published while draining (e.g. from another thread) are left
    /// for the next call.
    pub fn drain(&self) -> Vec<T> {
        let pending = self.receiver.len();
        self.receiver.try_iter().take(pending).collect()
    }

    /// Number of pending commands.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Whether no commands are pending.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl<T: Send + 'static> Default for CommandQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[derive(Debug, Clone, PartialEq)]
    enum TestCommand {
        Open { door: u32 },
        Close,
    }

    #[test]
    fn drain_preserves_publish_order() {
        let queue = CommandQueue::new();
        queue.publish(TestCommand::Open { door: 1 });
        queue.publish(TestCommand::Close);
        queue.publish(TestCommand::Open { door: 2 });

        assert_eq!(
            queue.drain(),
            vec![
                TestCommand::Open { door: 1 },
                TestCommand::Close,
                TestCommand::Open { door: 2 },
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn drain_on_empty_queue_is_empty() {
        let queue = CommandQueue::<TestCommand>::new();
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn senders_publish_across_threads() {
        let queue = CommandQueue::new();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let sender = queue.sender();
                thread::spawn(move || sender.publish(TestCommand::Open { door: i }))
            })
            .collect();
        for h in handles {
            h.join().expect("publisher thread panicked");
        }

        let mut doors: Vec<u32> = queue
            .drain()
            .into_iter()
            .filter_map(|c| match c {
                TestCommand::Open { door } => Some(door),
                TestCommand::Close => None,
            })
            .collect();
        doors.sort_unstable();
        assert_eq!(doors, vec![0, 1, 2, 3]);
    }
}
