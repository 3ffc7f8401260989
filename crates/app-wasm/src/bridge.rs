//! JavaScript bridge to the hosting page
//!
//! Messages are passed via CustomEvents on the window object, with JSON in
//! the event detail.

use loadspan_scene::{PageToScene, SceneToPage};
use std::cell::RefCell;
use std::collections::VecDeque;
use wasm_bindgen::prelude::*;

use crate::error::PageBridgeError;

/// Event the page dispatches to command the scene
pub const PAGE_TO_SCENE_EVENT: &str = "loadspan:page-to-scene";
/// Event the scene dispatches to inform the page
pub const SCENE_TO_PAGE_EVENT: &str = "loadspan:scene-to-page";

thread_local! {
    /// Queue of commands received from the page
    static COMMAND_QUEUE: RefCell<VecDeque<PageToScene>> = RefCell::new(VecDeque::new());
}

/// Parse the detail of a page event
pub fn parse_page_message(detail: &str) -> Result<PageToScene, PageBridgeError> {
    serde_json::from_str(detail).map_err(PageBridgeError::Parse)
}

/// Encode a scene message for an event detail
pub fn encode_scene_message(msg: &SceneToPage) -> Result<String, PageBridgeError> {
    serde_json::to_string(msg).map_err(PageBridgeError::Serialize)
}

/// Initialize the JavaScript event listener
pub fn init_bridge() -> Result<(), PageBridgeError> {
    let window = web_sys::window().ok_or(PageBridgeError::NoWindow)?;

    let closure = Closure::wrap(Box::new(move |event: web_sys::CustomEvent| {
        let Some(detail) = event.detail().as_string() else {
            return;
        };
        match parse_page_message(&detail) {
            Ok(msg) => COMMAND_QUEUE.with(|queue| queue.borrow_mut().push_back(msg)),
            Err(e) => web_sys::console::error_1(&e.to_string().into()),
        }
    }) as Box<dyn FnMut(_)>);

    window
        .add_event_listener_with_callback(PAGE_TO_SCENE_EVENT, closure.as_ref().unchecked_ref())
        .map_err(PageBridgeError::dom)?;

    // Keep the closure alive
    closure.forget();

    web_sys::console::log_1(&"Loadspan page bridge initialized".into());
    Ok(())
}

/// Poll for the next command from the page (non-blocking)
pub fn poll_page_command() -> Option<PageToScene> {
    COMMAND_QUEUE.with(|queue| queue.borrow_mut().pop_front())
}

/// Send a message to the page
pub fn send_to_page(msg: &SceneToPage) -> Result<(), PageBridgeError> {
    let window = web_sys::window().ok_or(PageBridgeError::NoWindow)?;
    let json = encode_scene_message(msg)?;

    let init = web_sys::CustomEventInit::new();
    init.set_detail(&JsValue::from_str(&json));

    let event = web_sys::CustomEvent::new_with_event_init_dict(SCENE_TO_PAGE_EVENT, &init)
        .map_err(PageBridgeError::dom)?;

    window
        .dispatch_event(&event)
        .map_err(PageBridgeError::dom)?;
    Ok(())
}
