//! Turns pointer and key events into slingshot commands.

use glam::Vec2;

use crate::components::projectile::Species;
use crate::core::impulse::{clamp_drag_to, MAX_DRAG_DISTANCE};
use crate::input::queue::{InputEvent, InputQueue, PointerButton};

/// Key that selects the standard bird.
pub const KEY_STANDARD: u32 = b'Z' as u32;
/// Key that selects the split bird.
pub const KEY_SPLIT: u32 = b'X' as u32;
/// Key that selects the boost bird.
pub const KEY_BOOST: u32 = b'C' as u32;

/// Something the session should do in response to input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlingCommand {
    /// Release of a drag. `end` is already clamped.
    Launch { start: Vec2, end: Vec2, species: Species },
    /// Trigger the ability of every live projectile.
    Activate,
}

/// Aiming state: the selected species and the drag in progress.
#[derive(Debug, Clone)]
pub struct Slingshot {
    species: Species,
    drag: Option<(Vec2, Vec2)>,
    max_drag_distance: f32,
}

impl Slingshot {
    pub fn new(max_drag_distance: f32) -> Self {
        Self {
            species: Species::Standard,
            drag: None,
            max_drag_distance,
        }
    }

    /// Species the next launch will use.
    pub fn species(&self) -> Species {
        self.species
    }

    pub fn select(&mut self, species: Species) {
        self.species = species;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start and clamped end of the band while a drag is in progress.
    pub fn band(&self) -> Option<(Vec2, Vec2)> {
        self.drag
    }

    /// Feed one event. Returns a command when the event completes one.
    pub fn handle(&mut self, event: InputEvent) -> Option<SlingCommand> {
        match event {
            InputEvent::PointerDown { x, y, button: PointerButton::Primary } => {
                let start = Vec2::new(x, y);
                self.drag = Some((start, start));
                None
            }
            InputEvent::PointerDown { button: PointerButton::Secondary, .. } => {
                Some(SlingCommand::Activate)
            }
            InputEvent::PointerMove { x, y } => {
                if let Some((start, end)) = self.drag.as_mut() {
                    *end = clamp_drag_to(*start, Vec2::new(x, y), self.max_drag_distance);
                }
                None
            }
            InputEvent::PointerUp { x, y, button: PointerButton::Primary } => {
                let (start, _) = self.drag.take()?;
                let end = clamp_drag_to(start, Vec2::new(x, y), self.max_drag_distance);
                Some(SlingCommand::Launch { start, end, species: self.species })
            }
            InputEvent::PointerUp { button: PointerButton::Secondary, .. } => None,
            InputEvent::KeyDown { key_code } => {
                match key_code {
                    KEY_STANDARD => self.species = Species::Standard,
                    KEY_SPLIT => self.species = Species::Split,
                    KEY_BOOST => self.species = Species::Boost,
                    _ => {}
                }
                None
            }
        }
    }

    /// Drain the queue and collect the resulting commands in order.
    pub fn process(&mut self, queue: &mut InputQueue) -> Vec<SlingCommand> {
        queue
            .drain()
            .into_iter()
            .filter_map(|event| self.handle(event))
            .collect()
    }
}

impl Default for Slingshot {
    fn default() -> Self {
        Self::new(MAX_DRAG_DISTANCE)
    }
}
