use tracing::info;

use super::context::ClothesContext;
use crate::wardrobe::ClothingId;

/// Owns the multi-select state of the clothes grid.
///
/// `visible` arguments are the ids currently shown, in display order. The selection never holds
/// an id outside of them.
#[derive(Debug, Default)]
pub struct SelectionController {
  selected: Vec<ClothingId>,
  active: bool,
  select_all: bool,
  can_select: bool,
  fixed: bool,
  publisher: Option<ClothesContext>,
}

impl SelectionController {
  pub fn new(can_select: bool, fixed: bool) -> Self {
    SelectionController { active: fixed, can_select, fixed, ..Default::default() }
  }

  /// Push every selection change into `context`.
  pub fn with_publisher(mut self, context: ClothesContext) -> Self {
    self.publisher = Some(context);
    self
  }

  pub fn is_active(&self) -> bool {
    self.active
  }

  pub fn is_fixed(&self) -> bool {
    self.fixed
  }

  pub fn is_all_selected(&self) -> bool {
    self.select_all
  }

  pub fn selected(&self) -> &[ClothingId] {
    &self.selected
  }

  pub fn len(&self) -> usize {
    self.selected.len()
  }

  pub fn is_empty(&self) -> bool {
    self.selected.is_empty()
  }

  pub fn contains(&self, id: &str) -> bool {
    self.selected.iter().any(|selected| selected == id)
  }

  pub fn enter_selection_mode(&mut self) {
    if self.fixed || !self.can_select {
      return;
    }
    if !self.active {
      info!("SelectionController: entering select mode");
    }
    self.active = true;
  }

  /// Add `id` when absent, remove it when present.
  pub fn toggle(&mut self, id: &str, visible: &[ClothingId]) {
    if !self.can_select || !visible.iter().any(|visible_id| visible_id == id) {
      return;
    }
    if self.contains(id) {
      self.selected.retain(|selected| selected != id);
    } else {
      self.selected.push(id.to_string());
    }
    self.changed(visible.len());
  }

  pub fn select_all(&mut self, visible: &[ClothingId]) {
    self.selected = visible.to_vec();
    self.changed(visible.len());
  }

  pub fn clear(&mut self, visible_count: usize) {
    self.selected.clear();
    self.changed(visible_count);
  }

  /// Select every visible item, or clear when everything is already selected.
  pub fn toggle_select_all(&mut self, visible: &[ClothingId]) {
    if !visible.is_empty() && self.selected.len() == visible.len() {
      self.clear(visible.len());
    } else {
      self.select_all(visible);
    }
  }

  /// Leave select mode without committing anything. Fixed select mode stays on.
  pub fn exit_selection_mode(&mut self, visible_count: usize) {
    if self.active && !self.fixed {
      info!("SelectionController: leaving select mode");
      self.active = false;
    }
    self.clear(visible_count);
  }

  /// Handle a back gesture. Returns true when it was consumed.
  pub fn intercept_back(&mut self, visible_count: usize) -> bool {
    if !self.active {
      return false;
    }
    self.exit_selection_mode(visible_count);
    true
  }

  /// Drop ids that are no longer visible, e.g. after a refresh or a filter change.
  pub fn retain_visible(&mut self, visible: &[ClothingId]) {
    let before = self.selected.len();
    self.selected.retain(|selected| visible.contains(selected));
    if before != self.selected.len() || self.select_all != Self::all_selected(self.selected.len(), visible.len()) {
      self.changed(visible.len());
    }
  }

  fn all_selected(selected_count: usize, visible_count: usize) -> bool {
    visible_count > 0 && selected_count == visible_count
  }

  fn changed(&mut self, visible_count: usize) {
    self.select_all = Self::all_selected(self.selected.len(), visible_count);
    if let Some(publisher) = &self.publisher {
      publisher.publish_selection(&self.selected);
    }
  }
}
