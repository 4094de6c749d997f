use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

pub type ClothingId = String;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clothing {
  #[serde(rename = "_id")]
  pub id: ClothingId,
  #[serde(default, rename = "fav", deserialize_with = "null_as_default")]
  pub favorite: bool,
  #[serde(default, deserialize_with = "null_as_default")]
  pub dirty: bool,
  #[serde(default, rename = "type", deserialize_with = "null_as_default")]
  pub clothing_type: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub kind: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub color: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub gender: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub style: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub temperature: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub tissue: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub image: String,
}

/// The service sends `null` for attributes that were never filled in.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Clothing {
  pub fn new(id: impl Into<String>, clothing_type: impl Into<String>, kind: impl Into<String>) -> Self {
    Clothing { id: id.into(), clothing_type: clothing_type.into(), kind: kind.into(), ..Default::default() }
  }

  pub fn favorite(mut self, favorite: bool) -> Self {
    self.favorite = favorite;
    self
  }

  pub fn dirty(mut self, dirty: bool) -> Self {
    self.dirty = dirty;
    self
  }

  /// Short label used in grid cells.
  pub fn label(&self) -> String {
    match (self.kind.is_empty(), self.color.is_empty()) {
      (true, true) => self.id.clone(),
      (false, true) => self.kind.clone(),
      (true, false) => self.color.clone(),
      (false, false) => format!("{} {}", self.color, self.kind),
    }
  }
}

/// Partial update of the mutable flags of one or more items.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingPatch {
  #[serde(default, rename = "fav", skip_serializing_if = "Option::is_none")]
  pub favorite: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub dirty: Option<bool>,
}

impl ClothingPatch {
  pub fn favorite(value: bool) -> Self {
    ClothingPatch { favorite: Some(value), dirty: None }
  }

  pub fn dirty(value: bool) -> Self {
    ClothingPatch { favorite: None, dirty: Some(value) }
  }

  pub fn is_empty(&self) -> bool {
    self.favorite.is_none() && self.dirty.is_none()
  }
}

#[async_trait]
pub trait WardrobeStore: Send + Sync {
  async fn clothes(&self) -> Result<Vec<Clothing>, Error>;
  async fn update_clothes(&self, ids: &[ClothingId], patch: &ClothingPatch) -> Result<(), Error>;
  async fn delete_clothes(&self, ids: &[ClothingId]) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use serde_json::json;

  use super::*;

  #[test]
  fn test_clothing_from_store_json() {
    let value = json!({
      "_id": "65f0",
      "fav": true,
      "type": "top",
      "kind": "shirt",
      "color": "blue",
      "image": "https://cdn/65f0.png"
    });

    let clothing: Clothing = serde_json::from_value(value).unwrap();

    assert_eq!(clothing.id, "65f0");
    assert!(clothing.favorite);
    assert!(!clothing.dirty);
    assert_eq!(clothing.clothing_type, "top");
    assert_eq!(clothing.label(), "blue shirt");
    assert_eq!(clothing.tissue, "");
  }

  #[test]
  fn test_null_attributes_read_as_empty() {
    let value = json!({
      "_id": "65f1",
      "fav": null,
      "type": "bottom",
      "kind": "pants",
      "color": null,
      "tissue": null
    });

    let clothing: Clothing = serde_json::from_value(value).unwrap();

    assert!(!clothing.favorite);
    assert_eq!(clothing.color, "");
    assert_eq!(clothing.tissue, "");
    assert_eq!(clothing.label(), "pants");
  }

  #[test]
  fn test_patch_only_serializes_present_fields() {
    assert_eq!(serde_json::to_value(ClothingPatch::dirty(true)).unwrap(), json!({ "dirty": true }));
    assert_eq!(serde_json::to_value(ClothingPatch::favorite(false)).unwrap(), json!({ "fav": false }));
    assert_eq!(serde_json::to_value(ClothingPatch::default()).unwrap(), json!({}));
    assert!(ClothingPatch::default().is_empty());
  }

  #[test]
  fn test_label_falls_back_to_id() {
    assert_eq!(Clothing::new("abc", "", "").label(), "abc");
    assert_eq!(Clothing::new("abc", "", "pants").label(), "pants");
  }
}
