//! Shared configuration for Loadspan
//!
//! This crate provides the single source of truth for window dimensions,
//! the browser canvas, and pointer interaction tuning shared by the native
//! and WASM builds.

use serde::{Deserialize, Serialize};

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

/// Default window width in pixels
pub const DEFAULT_WIDTH: u32 = 1280;

/// Default window height in pixels
pub const DEFAULT_HEIGHT: u32 = 720;

/// Default scale factor (1.0 = no scaling)
pub const DEFAULT_SCALE: f32 = 1.0;

pub const DEFAULT_TITLE: &str = "Loadspan";

/// CSS selector of the canvas the WASM build renders into
pub const DEFAULT_CANVAS_SELECTOR: &str = "#loadspan-canvas";

/// Weight change per pixel of vertical drag
pub const DEFAULT_DRAG_SENSITIVITY: f32 = 0.005;

/// Height of a dragged weight marker above the bridge root
pub const DEFAULT_MARKER_LIFT: f32 = 5.0;

/// Display configuration for window and rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
pub struct DisplayConfig {
    /// Window width in logical pixels
    pub width: u32,
    /// Window height in logical pixels
    pub height: u32,
    /// Scale factor for DPI scaling
    pub scale: f32,
    /// Native window title
    pub title: String,
    /// Canvas element used on the web
    pub canvas_selector: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: DEFAULT_SCALE,
            title: DEFAULT_TITLE.to_string(),
            canvas_selector: DEFAULT_CANVAS_SELECTOR.to_string(),
        }
    }
}

impl DisplayConfig {
    /// Create a new display config with the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Get width as f32 for calculations
    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    /// Get height as f32 for calculations
    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }

    /// Get scaled width (for physical pixel calculations)
    pub fn scaled_width(&self) -> u32 {
        (self.width as f32 * self.scale) as u32
    }

    /// Get scaled height (for physical pixel calculations)
    pub fn scaled_height(&self) -> u32 {
        (self.height as f32 * self.scale) as u32
    }
}

/// Pointer interaction tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct InteractionConfig {
    /// Weight change per pixel of vertical drag (upward adds)
    pub drag_sensitivity: f32,
    /// Height of a dragged marker above the bridge root
    pub marker_lift: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_sensitivity: DEFAULT_DRAG_SENSITIVITY,
            marker_lift: DEFAULT_MARKER_LIFT,
        }
    }
}

impl InteractionConfig {
    /// Same config with a new drag sensitivity, if it is usable.
    ///
    /// Returns `None` for zero, negative or non-finite values.
    pub fn with_drag_sensitivity(self, drag_sensitivity: f32) -> Option<Self> {
        (drag_sensitivity.is_finite() && drag_sensitivity > 0.0).then_some(Self {
            drag_sensitivity,
            ..self
        })
    }
}
