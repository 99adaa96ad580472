//! Host page bridge
//!
//! When the game runs inside a messenger web-app container, the container
//! exposes a session token and a way to talk to the user. Outside of it
//! neither exists. Everything that needs the host goes through `HostBridge`.

use std::cell::RefCell;

/// Capabilities provided by the embedding page
pub trait HostBridge {
    /// Whether a host container is present at all
    fn embedded(&self) -> bool {
        self.session_token().is_some()
    }

    /// Opaque session token, `None` when not embedded or the host gave none
    fn session_token(&self) -> Option<String>;

    /// Show a short message to the player
    fn alert(&self, message: &str);
}

/// Not embedded anywhere: no token, messages only go to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBridge;

impl HostBridge for NoBridge {
    fn session_token(&self) -> Option<String> {
        None
    }

    fn alert(&self, message: &str) {
        log::info!("{}", message);
    }
}

/// Test double that records every alert
#[derive(Debug, Default)]
pub struct RecordingBridge {
    pub embedded: bool,
    pub token: Option<String>,
    pub alerts: RefCell<Vec<String>>,
}

impl RecordingBridge {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            embedded: true,
            token: Some(token.into()),
            alerts: RefCell::new(Vec::new()),
        }
    }

    /// Inside a host that did not hand out a token
    pub fn embedded_without_token() -> Self {
        Self {
            embedded: true,
            ..Self::default()
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl HostBridge for RecordingBridge {
    fn embedded(&self) -> bool {
        self.embedded || self.token.is_some()
    }

    fn session_token(&self) -> Option<String> {
        self.token.clone()
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

/// Browser bridge backed by `window.Telegram.WebApp` and `window.tgInitData`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct WebAppBridge;

#[cfg(target_arch = "wasm32")]
impl WebAppBridge {
    /// Whether the page was opened from inside the messenger
    fn web_app_present(window: &web_sys::Window) -> bool {
        use wasm_bindgen::JsValue;

        let telegram = js_sys::Reflect::get(window, &JsValue::from_str("Telegram"))
            .unwrap_or(JsValue::UNDEFINED);
        if telegram.is_undefined() || telegram.is_null() {
            return false;
        }
        js_sys::Reflect::get(&telegram, &JsValue::from_str("WebApp"))
            .map(|app| !app.is_undefined() && !app.is_null())
            .unwrap_or(false)
    }
}

#[cfg(target_arch = "wasm32")]
impl HostBridge for WebAppBridge {
    fn embedded(&self) -> bool {
        web_sys::window().is_some_and(|window| Self::web_app_present(&window))
    }

    fn session_token(&self) -> Option<String> {
        use wasm_bindgen::JsValue;

        let window = web_sys::window()?;
        if !Self::web_app_present(&window) {
            return None;
        }
        // The page stores the raw init data here
        js_sys::Reflect::get(&window, &JsValue::from_str("tgInitData"))
            .ok()?
            .as_string()
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.alert_with_message(message) {
                log::warn!("alert failed: {:?}", e);
            }
        }
    }
}
