use serde::{Deserialize, Serialize};

/// What the focused component is doing, as far as global key handling is concerned.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
  #[default]
  Default,
  /// Multi-select is active; the back key cancels it.
  Select,
  /// A detail view or prompt owns the keyboard.
  Overlay,
}
