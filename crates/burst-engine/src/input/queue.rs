/// Pointer event types the session understands, in surface coordinates.
/// Generic — no gesture semantics; the controller decides what a tap is.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A touch/click began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// A touch/click ended at (x, y).
    PointerUp { x: f32, y: f32 },
}

/// A queue of input events. The host surface writes events into the queue;
/// the controller drains them once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called by the host surface).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::PointerUp { x: 10.0, y: 20.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn drain_preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 1.0, y: 1.0 });
        q.push(InputEvent::PointerMove { x: 2.0, y: 2.0 });
        q.push(InputEvent::PointerUp { x: 3.0, y: 3.0 });
        let events = q.drain();
        assert!(matches!(events[0], InputEvent::PointerDown { .. }));
        assert!(matches!(events[1], InputEvent::PointerMove { .. }));
        assert!(matches!(events[2], InputEvent::PointerUp { .. }));
    }
}
