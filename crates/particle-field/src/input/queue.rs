/// Pointer input a field reacts to, in surface-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The pointer moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// The pointer left the page or container; repulsion stops.
    PointerLeave,
    /// A click or tap at (x, y).
    Click { x: f32, y: f32 },
}

/// Most events held between two drains; further clicks are dropped.
pub const MAX_PENDING_EVENTS: usize = 64;

impl InputEvent {
    fn is_pointer_position(&self) -> bool {
        matches!(self, InputEvent::PointerMove { .. } | InputEvent::PointerLeave)
    }
}

/// A queue of input events.
/// JS pushes events as they arrive; the field drains them on the next frame.
/// Pointer position is last-writer-wins, so consecutive moves collapse into one entry.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Queue an event. Returns false when it was dropped because the queue is full.
    pub fn push(&mut self, event: InputEvent) -> bool {
        if event.is_pointer_position() {
            if let Some(last) = self.events.last_mut() {
                if last.is_pointer_position() {
                    *last = event;
                    return true;
                }
            }
        }
        if self.events.len() >= MAX_PENDING_EVENTS {
            log::debug!("input queue full, dropping {:?}", event);
            return false;
        }
        self.events.push(event);
        true
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

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
        q.push(InputEvent::PointerMove { x: 10.0, y: 20.0 });
        q.push(InputEvent::Click { x: 1.0, y: 2.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], InputEvent::Click { x: 1.0, y: 2.0 });
        assert!(q.is_empty());
    }

    #[test]
    fn consecutive_pointer_moves_collapse() {
        let mut q = InputQueue::new();
        for i in 0..100_000 {
            q.push(InputEvent::PointerMove { x: i as f32, y: 0.0 });
        }
        assert_eq!(q.len(), 1);
        q.push(InputEvent::PointerLeave);
        assert_eq!(q.drain(), vec![InputEvent::PointerLeave]);
    }

    #[test]
    fn moves_around_a_click_keep_their_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 1.0, y: 1.0 });
        q.push(InputEvent::Click { x: 2.0, y: 2.0 });
        q.push(InputEvent::PointerMove { x: 3.0, y: 3.0 });
        q.push(InputEvent::PointerMove { x: 4.0, y: 4.0 });
        assert_eq!(
            q.drain(),
            vec![
                InputEvent::PointerMove { x: 1.0, y: 1.0 },
                InputEvent::Click { x: 2.0, y: 2.0 },
                InputEvent::PointerMove { x: 4.0, y: 4.0 },
            ]
        );
    }

    #[test]
    fn clicks_beyond_capacity_are_dropped() {
        let mut q = InputQueue::new();
        for _ in 0..MAX_PENDING_EVENTS {
            assert!(q.push(InputEvent::Click { x: 0.0, y: 0.0 }));
        }
        assert!(!q.push(InputEvent::Click { x: 0.0, y: 0.0 }));
        assert_eq!(q.len(), MAX_PENDING_EVENTS);
    }
}
