use tokio::sync::watch;

use crate::wardrobe::ClothingId;

/// State the clothes list shares with the rest of the app.
///
/// The list only writes into it; other screens subscribe to the receivers.
#[derive(Debug, Clone)]
pub struct ClothesContext {
  selected_ids: watch::Sender<Vec<ClothingId>>,
  picked_id: watch::Sender<Option<ClothingId>>,
}

impl Default for ClothesContext {
  fn default() -> Self {
    ClothesContext::new()
  }
}

impl ClothesContext {
  pub fn new() -> Self {
    let (selected_ids, _) = watch::channel(Vec::new());
    let (picked_id, _) = watch::channel(None);
    ClothesContext { selected_ids, picked_id }
  }

  pub fn publish_selection(&self, ids: &[ClothingId]) {
    self.selected_ids.send_replace(ids.to_vec());
  }

  pub fn selected_ids(&self) -> Vec<ClothingId> {
    self.selected_ids.borrow().clone()
  }

  pub fn subscribe_selection(&self) -> watch::Receiver<Vec<ClothingId>> {
    self.selected_ids.subscribe()
  }

  /// Pick `id`, or un-pick it when it is already the picked item.
  pub fn toggle_pick(&self, id: &str) {
    self.picked_id.send_modify(|picked| {
      if picked.as_deref() == Some(id) {
        *picked = None;
      } else {
        *picked = Some(id.to_string());
      }
    });
  }

  pub fn picked_id(&self) -> Option<ClothingId> {
    self.picked_id.borrow().clone()
  }
}
