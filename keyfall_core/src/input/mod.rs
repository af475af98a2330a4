pub mod events;

use self::events::InputEvent;
use crossbeam_channel::{unbounded, Receiver, Sender, TryIter};

/// Key events from the input collaborator, drained by the session owner.
pub struct InputQueue {
    sender: Sender<InputEvent>,
    receiver: Receiver<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Pushes an event into the queue.
    /// This can be called from any thread that holds a sender.
    pub fn push(&self, event: InputEvent) {
        let _ = self.sender.send(event);
    }

    /// Non-blocking. Returns None if queue is empty.
    pub fn pop(&self) -> Option<InputEvent> {
        self.receiver.try_recv().ok()
    }

    /// Events queued so far, in arrival order.
    pub fn drain(&self) -> TryIter<'_, InputEvent> {
        self.receiver.try_iter()
    }

    /// Drops everything queued; returns how many events were discarded.
    pub fn clear(&self) -> usize {
        self.receiver.try_iter().count()
    }

    pub fn sender(&self) -> Sender<InputEvent> {
        self.sender.clone()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
