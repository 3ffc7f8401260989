//! Single-pointer drag over the weight markers.
//!
//! Pressing on a marker selects it. Vertical pointer motion while selected
//! turns into weight changes: moving up adds weight, moving down removes it.
//! Releasing clears the selection.

use glam::Vec3;
use loadspan_config::InteractionConfig;

use crate::raycast::WeightPick;

/// Weight change produced by one pointer move
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightChange {
    Add(f32),
    Remove(f32),
}

impl WeightChange {
    /// Classify a signed change; zero counts as a removal of nothing
    pub fn from_signed(change: f32) -> Self {
        if change > 0.0 {
            WeightChange::Add(change)
        } else {
            WeightChange::Remove(-change)
        }
    }
}

/// Result of moving the pointer while a marker is held
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStep {
    /// Held marker
    pub index: usize,
    pub change: WeightChange,
}

/// Current drag selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    selected: Option<usize>,
    last_cursor_y: f32,
    /// Weight per pixel of vertical motion
    pub sensitivity: f32,
    /// Height of a dragged marker above the deck root
    pub marker_lift: f32,
}

impl Default for DragState {
    fn default() -> Self {
        Self::from(InteractionConfig::default())
    }
}

impl From<InteractionConfig> for DragState {
    fn from(config: InteractionConfig) -> Self {
        Self::new(config.drag_sensitivity, config.marker_lift)
    }
}

impl DragState {
    pub fn new(sensitivity: f32, marker_lift: f32) -> Self {
        Self {
            selected: None,
            last_cursor_y: 0.0,
            sensitivity,
            marker_lift,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_dragging(&self) -> bool {
        self.selected.is_some()
    }

    /// Pointer pressed at `cursor_y` (pixels, growing downward).
    ///
    /// The nearest picked marker becomes the selection. A press that hits
    /// nothing leaves any current selection alone.
    pub fn press(&mut self, pick: Option<WeightPick>, cursor_y: f32) -> Option<usize> {
        self.last_cursor_y = cursor_y;
        if let Some(pick) = pick {
            self.selected = Some(pick.index);
        }
        self.selected
    }

    /// Pointer moved to `cursor_y`. Returns the weight change for the held marker.
    pub fn drag(&mut self, cursor_y: f32) -> Option<DragStep> {
        let index = self.selected?;
        let delta = cursor_y - self.last_cursor_y;
        self.last_cursor_y = cursor_y;
        Some(DragStep {
            index,
            change: WeightChange::from_signed(-delta * self.sensitivity),
        })
    }

    /// Where the held marker goes when the pointer is over `deck_hit`
    pub fn marker_position(&self, deck_hit: Vec3, deck_root_y: f32) -> Vec3 {
        Vec3::new(deck_hit.x, deck_root_y + self.marker_lift, deck_hit.z)
    }

    pub fn release(&mut self) {
        self.selected = None;
    }
}
