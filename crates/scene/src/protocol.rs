//! Messages exchanged between the scene and a hosting web page.
//!
//! Both directions are JSON encoded as `{"type": ..., "data": ...}`.

use bevy::ecs::message::Message;
use bevy::prelude::*;
use deck::{Readout, StressBand};
use serde::{Deserialize, Serialize};

/// Messages from the scene to the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SceneToPage {
    /// Bridge spawned and ready for input
    Ready { segment_count: usize },

    /// The weight readout changed
    ReadoutChanged {
        visible: bool,
        percent: u32,
        band: StressBand,
        label: String,
        /// CSS color of the band
        color: String,
    },
}

impl SceneToPage {
    pub fn readout(readout: Readout) -> Self {
        Self::ReadoutChanged {
            visible: readout.visible,
            percent: readout.percent,
            band: readout.band,
            label: readout.band.label().to_string(),
            color: readout.band.css_hex(),
        }
    }
}

/// Commands from the page to the scene
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PageToScene {
    /// Put the orbit camera back at its starting view
    ResetCamera,
    /// Unload every weight marker
    ClearWeights,
}

/// Resource for queuing messages to send to the page.
/// The host layer drains this and forwards it (the WASM build dispatches DOM events).
#[derive(Resource, Default)]
pub struct OutboundPageMessages {
    pub messages: Vec<SceneToPage>,
}

impl OutboundPageMessages {
    /// Queue a message to be sent to the page
    pub fn send(&mut self, msg: SceneToPage) {
        self.messages.push(msg);
    }

    /// Take all queued messages, leaving the queue empty
    pub fn drain(&mut self) -> Vec<SceneToPage> {
        std::mem::take(&mut self.messages)
    }
}

/// Drain the outbound queue when no page is listening.
///
/// Native builds add this in `PostUpdate` so the queue never outlives a frame.
pub fn log_outbound_messages(mut outbound: ResMut<OutboundPageMessages>) {
    if outbound.messages.is_empty() {
        return;
    }
    for msg in outbound.drain() {
        debug!("Scene message (no page attached): {:?}", msg);
    }
}
