use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{error, info};

use crate::{
  components::toast::Notification,
  wardrobe::{Clothing, ClothingId, ClothingPatch, WardrobeStore},
};

pub const RETRY_HINT: &str = "Please try again";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display)]
pub enum FavoriteIcon {
  #[default]
  #[strum(to_string = "Favorite")]
  Favorite,
  #[strum(to_string = "Unfavorite")]
  Unfavorite,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display)]
pub enum LaundryIcon {
  #[default]
  #[strum(to_string = "Send to laundry")]
  SendToLaundry,
  #[strum(to_string = "Wash")]
  Wash,
}

/// What the batch operation buttons currently do.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IconState {
  pub favorite: FavoriteIcon,
  pub laundry: LaundryIcon,
}

impl IconState {
  /// `fav` value the favorite button writes.
  pub fn favorite_target(&self) -> bool {
    self.favorite == FavoriteIcon::Favorite
  }

  /// `dirty` value the laundry button writes.
  pub fn dirty_target(&self) -> bool {
    self.laundry == LaundryIcon::SendToLaundry
  }
}

pub fn derive_icon_state(items: &[Clothing], selection: &[ClothingId]) -> IconState {
  let selected: Vec<&Clothing> = items.iter().filter(|item| selection.contains(&item.id)).collect();
  let all = |flag: fn(&Clothing) -> bool| !selected.is_empty() && selected.iter().all(|item| flag(item));

  IconState {
    favorite: if all(|item| item.favorite) { FavoriteIcon::Unfavorite } else { FavoriteIcon::Favorite },
    laundry: if all(|item| item.dirty) { LaundryIcon::Wash } else { LaundryIcon::SendToLaundry },
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum BatchOperation {
  Favorite,
  Laundry,
  Delete,
}

impl BatchOperation {
  pub const ALL: [BatchOperation; 3] = [BatchOperation::Favorite, BatchOperation::Laundry, BatchOperation::Delete];

  pub fn requires_confirmation(&self) -> bool {
    matches!(self, BatchOperation::Laundry | BatchOperation::Delete)
  }
}

/// Which batch operations the grid offers: `true` for all of them or an explicit list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operations {
  All(bool),
  Only(Vec<BatchOperation>),
}

impl Default for Operations {
  fn default() -> Self {
    Operations::All(false)
  }
}

impl Operations {
  pub fn contains(&self, operation: BatchOperation) -> bool {
    match self {
      Operations::All(enabled) => *enabled,
      Operations::Only(operations) => operations.contains(&operation),
    }
  }

  pub fn enabled(&self) -> Vec<BatchOperation> {
    BatchOperation::ALL.into_iter().filter(|operation| self.contains(*operation)).collect()
  }
}

/// One outbound mutation against the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreRequest {
  Update { ids: Vec<ClothingId>, patch: ClothingPatch },
  Delete { ids: Vec<ClothingId> },
}

impl StoreRequest {
  /// Build the request a batch operation issues for `selection`. `None` when nothing is selected.
  pub fn for_operation(operation: BatchOperation, icons: IconState, selection: &[ClothingId]) -> Option<Self> {
    if selection.is_empty() {
      return None;
    }
    let ids = selection.to_vec();
    Some(match operation {
      BatchOperation::Favorite => StoreRequest::Update { ids, patch: ClothingPatch::favorite(icons.favorite_target()) },
      BatchOperation::Laundry => StoreRequest::Update { ids, patch: ClothingPatch::dirty(icons.dirty_target()) },
      BatchOperation::Delete => StoreRequest::Delete { ids },
    })
  }

  pub fn ids(&self) -> &[ClothingId] {
    match self {
      StoreRequest::Update { ids, .. } | StoreRequest::Delete { ids } => ids,
    }
  }

  pub fn is_delete(&self) -> bool {
    matches!(self, StoreRequest::Delete { .. })
  }

  /// Send the request once. Failures are captured in the report, never retried.
  pub async fn send(self, store: &dyn WardrobeStore) -> RequestReport {
    let result = match &self {
      StoreRequest::Update { ids, patch } => {
        info!("Updating {} clothes with {:?}", ids.len(), patch);
        store.update_clothes(ids, patch).await
      },
      StoreRequest::Delete { ids } => {
        info!("Deleting {} clothes", ids.len());
        store.delete_clothes(ids).await
      },
    };
    let failure = match result {
      Ok(()) => None,
      Err(err) => {
        error!("Request {:?} failed: {}", self, err);
        Some(err.user_message())
      },
    };
    RequestReport { request: self, failure }
  }
}

/// Outcome of a settled store request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestReport {
  pub request: StoreRequest,
  pub failure: Option<String>,
}

impl RequestReport {
  pub fn is_success(&self) -> bool {
    self.failure.is_none()
  }
}

/// What the grid must do once a request has settled. The loading flag is always cleared.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Resolution {
  pub refresh: bool,
  pub exit_selection: bool,
  pub clear_selection: bool,
  pub close_detail: bool,
  pub notification: Option<Notification>,
}

pub fn resolve(report: &RequestReport, selection_active: bool) -> Resolution {
  let success = report.is_success();
  let delete = report.request.is_delete();
  let notification = match &report.failure {
    Some(message) => Some(Notification::error(message.clone(), RETRY_HINT)),
    None if delete => Some(Notification::info(deleted_message(report.request.ids().len()), None)),
    None => None,
  };

  Resolution {
    refresh: success,
    exit_selection: selection_active,
    clear_selection: selection_active || (delete && !success),
    close_detail: success && delete && !selection_active,
    notification,
  }
}

pub fn deleted_message(count: usize) -> String {
  if count > 1 { String::from("Items deleted") } else { String::from("Item deleted") }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::{
    components::toast::NotificationKind,
    wardrobe::mock_store::{MockWardrobeStore, StoreCall},
  };

  fn ids(values: &[&str]) -> Vec<ClothingId> {
    values.iter().map(|value| value.to_string()).collect()
  }

  fn wardrobe() -> Vec<Clothing> {
    vec![
      Clothing::new("a", "top", "shirt").favorite(true),
      Clothing::new("b", "top", "shirt").favorite(true).dirty(true),
      Clothing::new("c", "bottom", "pants"),
    ]
  }

  #[test]
  fn test_favorite_icon_requires_every_selected_item_favorite() {
    let items = wardrobe();
    assert_eq!(derive_icon_state(&items, &ids(&["a", "b"])).favorite, FavoriteIcon::Unfavorite);
    assert_eq!(derive_icon_state(&items, &ids(&["a", "c"])).favorite, FavoriteIcon::Favorite);
    assert_eq!(derive_icon_state(&items, &[]).favorite, FavoriteIcon::Favorite);
  }

  #[test]
  fn test_laundry_icon_mirrors_dirty_flag() {
    let items = wardrobe();
    assert_eq!(derive_icon_state(&items, &ids(&["b"])).laundry, LaundryIcon::Wash);
    assert_eq!(derive_icon_state(&items, &ids(&["a", "b"])).laundry, LaundryIcon::SendToLaundry);
    assert_eq!(derive_icon_state(&items, &[]).laundry, LaundryIcon::SendToLaundry);
  }

  #[test]
  fn test_requests_follow_icons() {
    let items = wardrobe();
    let selection = ids(&["a", "b"]);
    let icons = derive_icon_state(&items, &selection);

    assert_eq!(
      StoreRequest::for_operation(BatchOperation::Favorite, icons, &selection),
      Some(StoreRequest::Update { ids: selection.clone(), patch: ClothingPatch::favorite(false) })
    );
    assert_eq!(
      StoreRequest::for_operation(BatchOperation::Laundry, icons, &selection),
      Some(StoreRequest::Update { ids: selection.clone(), patch: ClothingPatch::dirty(true) })
    );
    assert_eq!(
      StoreRequest::for_operation(BatchOperation::Delete, icons, &selection),
      Some(StoreRequest::Delete { ids: selection })
    );
    assert_eq!(StoreRequest::for_operation(BatchOperation::Favorite, icons, &[]), None);
  }

  #[test]
  fn test_operations_config() {
    let all: Operations = serde_json::from_str("true").unwrap();
    let some: Operations = serde_json::from_str(r#"["favorite", "delete"]"#).unwrap();

    assert_eq!(all.enabled(), BatchOperation::ALL.to_vec());
    assert!(some.contains(BatchOperation::Delete));
    assert!(!some.contains(BatchOperation::Laundry));
    assert!(Operations::default().enabled().is_empty());
  }

  #[test]
  fn test_only_laundry_and_delete_need_confirmation() {
    assert!(!BatchOperation::Favorite.requires_confirmation());
    assert!(BatchOperation::Laundry.requires_confirmation());
    assert!(BatchOperation::Delete.requires_confirmation());
  }

  #[test]
  fn test_deleted_wording() {
    assert_eq!(deleted_message(1), "Item deleted");
    assert_eq!(deleted_message(2), "Items deleted");
    assert_eq!(deleted_message(7), "Items deleted");
  }

  #[tokio::test]
  async fn test_laundry_scenario() {
    let items = vec![Clothing::new("a", "top", "shirt"), Clothing::new("b", "top", "shirt"), Clothing::new("c", "", "")];
    let store = MockWardrobeStore::new(items.clone());
    let selection = ids(&["a", "b", "c"]);
    let icons = derive_icon_state(&items, &selection);
    assert_eq!(icons.laundry, LaundryIcon::SendToLaundry);

    let request = StoreRequest::for_operation(BatchOperation::Laundry, icons, &selection).unwrap();
    let report = request.send(&store).await;
    let resolution = resolve(&report, true);

    assert_eq!(store.mutations(), vec![StoreCall::Update(selection, ClothingPatch::dirty(true))]);
    assert!(resolution.refresh);
    assert!(resolution.exit_selection);
    assert!(resolution.clear_selection);
    assert_eq!(resolution.notification, None);
  }

  #[tokio::test]
  async fn test_failed_delete_scenario() {
    let store = MockWardrobeStore::failing(wardrobe(), "server error");

    let report = StoreRequest::Delete { ids: ids(&["a", "b"]) }.send(&store).await;
    let resolution = resolve(&report, true);

    assert_eq!(report.failure.as_deref(), Some("server error"));
    assert!(!resolution.refresh);
    assert!(resolution.exit_selection);
    assert!(resolution.clear_selection);
    assert!(!resolution.close_detail);
    let notification = resolution.notification.unwrap();
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.title, "server error");
    assert_eq!(notification.subtitle.as_deref(), Some(RETRY_HINT));
  }

  #[tokio::test]
  async fn test_delete_from_detail_view_closes_it() {
    let store = MockWardrobeStore::new(wardrobe());

    let report = StoreRequest::Delete { ids: ids(&["c"]) }.send(&store).await;
    let resolution = resolve(&report, false);

    assert!(resolution.refresh);
    assert!(resolution.close_detail);
    assert!(!resolution.exit_selection);
    assert_eq!(resolution.notification, Some(Notification::info("Item deleted", None)));
  }

  #[tokio::test]
  async fn test_failed_delete_outside_select_mode_still_clears() {
    let store = MockWardrobeStore::failing(wardrobe(), "nope");

    let report = StoreRequest::Delete { ids: ids(&["c"]) }.send(&store).await;
    let resolution = resolve(&report, false);

    assert!(resolution.clear_selection);
    assert!(!resolution.close_detail);
  }

  #[tokio::test]
  async fn test_failed_update_keeps_list() {
    let store = MockWardrobeStore::failing(wardrobe(), "bad request");

    let report = StoreRequest::Update { ids: ids(&["a"]), patch: ClothingPatch::favorite(true) }.send(&store).await;
    let resolution = resolve(&report, false);

    assert!(!resolution.refresh);
    assert!(!resolution.clear_selection);
    assert_eq!(resolution.notification, Some(Notification::error("bad request", RETRY_HINT)));
  }
}
