// Copyright (c) 2024 Mike Tsao

use crossbeam::channel::{Receiver, Sender};

/// Both halves of an unbounded crossbeam channel, kept together by whoever
/// owns the stream of events.
#[derive(Debug, Clone)]
pub struct CrossbeamChannel<T> {
    #[allow(missing_docs)]
    pub sender: Sender<T>,
    #[allow(missing_docs)]
    pub receiver: Receiver<T>,
}
impl<T> Default for CrossbeamChannel<T> {
    fn default() -> Self {
        let (sender, receiver) = crossbeam::channel::unbounded();
        Self { sender, receiver }
    }
}
impl<T> CrossbeamChannel<T> {
    /// Returns everything that is waiting in the channel without blocking.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }
}
