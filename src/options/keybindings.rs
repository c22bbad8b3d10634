use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings.
///
/// Keys use the `winit::keyboard::KeyCode` debug format (`"KeyR"`,
/// `"Escape"`):
///
/// ```toml
/// [keybindings.bindings]
/// KeyR = "reset_camera"
/// Escape = "exit"
/// ```
pub struct KeybindingOptions {
    /// Maps key string → action.
    pub bindings: HashMap<String, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("KeyR".into(), KeyAction::ResetCamera),
            ("Escape".into(), KeyAction::Exit),
        ]);
        Self { bindings }
    }
}

impl KeybindingOptions {
    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.bindings.get(key).copied()
    }
}
