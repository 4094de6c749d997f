use serde::{Deserialize, Serialize};

use self::batch::Operations;

pub mod batch;
pub mod clothing_item;
pub mod confirmation;
pub mod context;
pub mod edit_flow;
pub mod filter;
pub mod instruction_footer;
pub mod list;
pub mod selection;

pub use context::ClothesContext;
pub use list::ClothesList;

/// Capabilities of a clothes grid, read from the `list` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListOptions {
  pub can_open: bool,
  pub can_select: bool,
  pub can_pick: bool,
  pub operations: Operations,
  pub type_filter: Option<String>,
  pub picker_filter: bool,
  pub fixed_select_mode: bool,
  pub primary_button: Option<String>,
  pub additional_operation: Option<String>,
}

impl Default for ListOptions {
  fn default() -> Self {
    ListOptions {
      can_open: true,
      can_select: true,
      can_pick: false,
      operations: Operations::All(true),
      type_filter: None,
      picker_filter: false,
      fixed_select_mode: false,
      primary_button: None,
      additional_operation: None,
    }
  }
}

impl ListOptions {
  pub fn selection_enabled(&self) -> bool {
    self.can_select || self.fixed_select_mode
  }

  /// The selection is only handed to the rest of the app when something consumes it.
  pub fn publishes_selection(&self) -> bool {
    self.selection_enabled() && (self.primary_button.is_some() || self.additional_operation.is_some())
  }
}
