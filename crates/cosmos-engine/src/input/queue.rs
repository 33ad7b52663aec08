/// Input events delivered by the host between ticks.
/// Coordinates are layout (CSS) pixels relative to the canvas box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A click or tap at (x, y).
    PointerDown { x: f32, y: f32 },
    /// The pointer moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// The pointer left the canvas.
    PointerLeave,
    /// The containing layout box changed size (also sent once on mount).
    Resize { width: f32, height: f32, pixel_ratio: f32 },
    /// A host UI event (tab buttons, galaxy list, warp outcome).
    /// `kind` identifies the event; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Events queued by the host and drained once per tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take every pending event, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
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
