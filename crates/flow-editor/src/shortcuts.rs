//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s.
//! The shortcut map lives in Rust so every host shares the same bindings.
//!
//! - ⌘Z / Ctrl+Z = undo
//! - ⌘⇧Z / Ctrl+Shift+Z / ⌘Y / Ctrl+Y = redo
//! - Delete / Backspace (any modifiers) = delete selection, only while no
//!   text input has focus

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    Redo,
    Delete,
}

impl ShortcutAction {
    pub fn name(&self) -> &'static str {
        match self {
            ShortcutAction::Undo => "undo",
            ShortcutAction::Redo => "redo",
            ShortcutAction::Delete => "delete",
        }
    }
}

/// Resolves key events into shortcut actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘,
/// on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`).
    /// `input_focused` is true while a focusable text element owns the
    /// keyboard, in which case Delete/Backspace belong to that element.
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        _alt: bool,
        meta: bool,
        input_focused: bool,
    ) -> Option<ShortcutAction> {
        if matches!(key, "Delete" | "Backspace") {
            // Held modifiers do not matter; a focused input does.
            return (!input_focused).then_some(ShortcutAction::Delete);
        }

        let cmd = ctrl || meta;

        if cmd && shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        None
    }
}
