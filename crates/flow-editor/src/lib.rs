pub mod config;
pub mod controller;
pub mod history;
pub mod input;
pub mod shortcuts;

pub use config::EditorConfig;
pub use controller::{EditorState, FlowEditor, Outcome};
pub use history::History;
pub use input::{EditorEvent, Modifiers};
pub use shortcuts::{ShortcutAction, ShortcutMap};
