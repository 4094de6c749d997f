use serde::{Deserialize, Serialize};

use crate::wardrobe::{Clothing, ClothingId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerKind {
  pub value: String,
  pub label: String,
}

/// Current choice of the category picker.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum PickerValue {
  #[default]
  All,
  Kind(String),
}

impl PickerValue {
  /// An empty choice behaves like "all".
  pub fn from_choice(choice: &str) -> Self {
    match choice {
      "" | "all" => PickerValue::All,
      kind => PickerValue::Kind(kind.to_string()),
    }
  }
}

/// Derives the visible, most-recently-added-first subset of the wardrobe.
#[derive(Debug, Default, Clone)]
pub struct FilterView {
  type_filter: Option<String>,
  picker_enabled: bool,
  picker: PickerValue,
  kinds: Vec<PickerKind>,
}

impl FilterView {
  pub fn new(type_filter: Option<String>, picker_enabled: bool, kinds: Vec<PickerKind>) -> Self {
    FilterView { type_filter, picker_enabled, picker: PickerValue::All, kinds }
  }

  pub fn picker_enabled(&self) -> bool {
    self.picker_enabled
  }

  pub fn picker(&self) -> &PickerValue {
    &self.picker
  }

  pub fn set_picker(&mut self, value: PickerValue) {
    self.picker = value;
  }

  /// Label of the current picker choice.
  pub fn picker_label(&self) -> String {
    match &self.picker {
      PickerValue::All => String::from("All"),
      PickerValue::Kind(kind) => {
        self.kinds.iter().find(|candidate| candidate.value == *kind).map_or_else(|| kind.clone(), |k| k.label.clone())
      },
    }
  }

  /// Move the picker forward or backward through "All" followed by every kind.
  pub fn cycle_picker(&mut self, forward: bool) {
    if !self.picker_enabled {
      return;
    }
    let choices = self.kinds.len() + 1;
    let current = match &self.picker {
      PickerValue::All => 0,
      PickerValue::Kind(kind) => self.kinds.iter().position(|candidate| candidate.value == *kind).map_or(0, |i| i + 1),
    };
    let next = if forward { (current + 1) % choices } else { (current + choices - 1) % choices };
    self.picker = match next {
      0 => PickerValue::All,
      index => PickerValue::Kind(self.kinds[index - 1].value.clone()),
    };
  }

  pub fn has_active_filter(&self) -> bool {
    self.type_filter.is_some() || self.picker_enabled
  }

  pub fn visible<'a>(&self, clothes: &'a [Clothing]) -> Vec<&'a Clothing> {
    clothes.iter().rev().filter(|clothing| self.matches(clothing)).collect()
  }

  pub fn visible_ids(&self, clothes: &[Clothing]) -> Vec<ClothingId> {
    self.visible(clothes).into_iter().map(|clothing| clothing.id.clone()).collect()
  }

  /// True when a filter is active and nothing matches it.
  pub fn shows_empty_state(&self, clothes: &[Clothing]) -> bool {
    self.has_active_filter() && self.visible(clothes).is_empty()
  }

  fn matches(&self, clothing: &Clothing) -> bool {
    if let Some(clothing_type) = &self.type_filter {
      return clothing.clothing_type == *clothing_type;
    }
    match (&self.picker, self.picker_enabled) {
      (PickerValue::Kind(kind), true) => clothing.kind == *kind,
      _ => true,
    }
  }
}
