use glam::Vec2;

use crate::assets::registry::ImageRef;
use crate::core::session::SimulationSession;
use crate::input::queue::{InputEvent, InputQueue};
use crate::systems::drag::DragManager;
use crate::systems::spawn::spawn_batch;

/// Particles spawned per tap when not overridden.
pub const DEFAULT_BURST_COUNT: usize = 10;

/// Wires pointer gestures to the session: a tap (down + up without movement)
/// spawns a burst of image particles at the release point; a drag (down +
/// moves) tethers all live particles to the pointer until release. Releasing
/// always clears the tethers.
pub struct BurstController {
    image: ImageRef,
    burst_count: usize,
    drag: DragManager,
    pointer_down: bool,
    moved: bool,
}

impl BurstController {
    /// Create a controller spawning bursts of the given image.
    pub fn new(image: ImageRef) -> Self {
        Self {
            image,
            burst_count: DEFAULT_BURST_COUNT,
            drag: DragManager::new(),
            pointer_down: false,
            moved: false,
        }
    }

    pub fn with_burst_count(mut self, count: usize) -> Self {
        self.burst_count = count;
        self
    }

    /// Drain the input queue and apply each event to the session.
    /// Call once per frame, before `SimulationSession::step`.
    pub fn update(&mut self, session: &mut SimulationSession, input: &mut InputQueue) {
        for event in input.drain() {
            match event {
                InputEvent::PointerDown { .. } => {
                    self.pointer_down = true;
                    self.moved = false;
                }
                InputEvent::PointerMove { x, y } => {
                    if self.pointer_down {
                        self.moved = true;
                        self.drag.sample(session, Vec2::new(x, y));
                    }
                }
                InputEvent::PointerUp { x, y } => {
                    if !self.pointer_down {
                        continue;
                    }
                    self.pointer_down = false;
                    self.drag.release(session);
                    if !self.moved {
                        let point = Vec2::new(x, y);
                        let batch = spawn_batch(self.burst_count, &self.image, point);
                        session.spawn(batch, point);
                    }
                }
            }
        }
    }

    /// Whether a drag gesture currently holds tethers.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }
}
