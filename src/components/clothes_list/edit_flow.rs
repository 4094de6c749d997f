use std::time::{Duration, Instant};

use tracing::info;

use crate::wardrobe::{Clothing, ClothingPatch};

/// Grow then shrink, 150ms each.
pub const FAVORITE_ANIMATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
  Closed,
  Viewing,
  Editing,
}

/// Mutable fields of the open item.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EditDraft {
  pub favorite: bool,
  pub dirty: bool,
}

impl From<&Clothing> for EditDraft {
  fn from(clothing: &Clothing) -> Self {
    EditDraft { favorite: clothing.favorite, dirty: clothing.dirty }
  }
}

impl EditDraft {
  /// Only the fields that differ from `original`.
  pub fn diff(&self, original: &EditDraft) -> ClothingPatch {
    ClothingPatch {
      favorite: (self.favorite != original.favorite).then_some(self.favorite),
      dirty: (self.dirty != original.dirty).then_some(self.dirty),
    }
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteAnimation {
  #[default]
  Idle,
  Running(Instant),
}

/// Detail view of a single item: open, optionally edit, persist on close.
#[derive(Debug)]
pub struct EditFlow {
  can_open: bool,
  open: Option<Clothing>,
  original: EditDraft,
  draft: EditDraft,
  editing: bool,
  animation: FavoriteAnimation,
}

impl EditFlow {
  pub fn new(can_open: bool) -> Self {
    EditFlow {
      can_open,
      open: None,
      original: EditDraft::default(),
      draft: EditDraft::default(),
      editing: false,
      animation: FavoriteAnimation::Idle,
    }
  }

  pub fn state(&self) -> EditState {
    match (&self.open, self.editing) {
      (None, _) => EditState::Closed,
      (Some(_), false) => EditState::Viewing,
      (Some(_), true) => EditState::Editing,
    }
  }

  pub fn is_open(&self) -> bool {
    self.open.is_some()
  }

  pub fn open_item(&self) -> Option<&Clothing> {
    self.open.as_ref()
  }

  pub fn draft(&self) -> EditDraft {
    self.draft
  }

  pub fn animation(&self) -> FavoriteAnimation {
    self.animation
  }

  /// Open `item` in the detail view. Refused while select mode is active.
  pub fn open(&mut self, item: &Clothing, selection_active: bool) -> bool {
    if !self.can_open || selection_active {
      return false;
    }
    info!("EditFlow: opening {}", item.id);
    self.original = EditDraft::from(item);
    self.draft = self.original;
    self.editing = false;
    self.animation = FavoriteAnimation::Idle;
    self.open = Some(item.clone());
    true
  }

  pub fn toggle_edit(&mut self) {
    if self.is_open() {
      self.editing = !self.editing;
    }
  }

  /// Start the favorite feedback animation. The draft flips in `commit_favorite_toggle`.
  pub fn begin_favorite_toggle(&mut self, now: Instant) -> bool {
    if !self.is_open() || matches!(self.animation, FavoriteAnimation::Running(_)) {
      return false;
    }
    self.animation = FavoriteAnimation::Running(now);
    true
  }

  pub fn animation_finished(&self, now: Instant) -> bool {
    match self.animation {
      FavoriteAnimation::Running(started) => now.saturating_duration_since(started) >= FAVORITE_ANIMATION,
      FavoriteAnimation::Idle => false,
    }
  }

  /// Scale of the heart icon, 1.0 at rest and 1.5 at the animation midpoint.
  pub fn favorite_scale(&self, now: Instant) -> f64 {
    let FavoriteAnimation::Running(started) = self.animation else {
      return 1.0;
    };
    let half = FAVORITE_ANIMATION.as_secs_f64() / 2.0;
    let elapsed = now.saturating_duration_since(started).as_secs_f64().min(2.0 * half);
    let progress = if elapsed <= half { elapsed / half } else { (2.0 * half - elapsed) / half };
    1.0 + 0.5 * progress
  }

  /// Flip the draft favorite flag once the animation has completed.
  pub fn commit_favorite_toggle(&mut self) -> bool {
    if !matches!(self.animation, FavoriteAnimation::Running(_)) {
      return false;
    }
    self.animation = FavoriteAnimation::Idle;
    self.draft.favorite = !self.draft.favorite;
    true
  }

  /// Commit the favorite toggle if its animation is over at `now`.
  pub fn tick(&mut self, now: Instant) -> bool {
    self.animation_finished(now) && self.commit_favorite_toggle()
  }

  pub fn toggle_dirty(&mut self) {
    if self.is_open() {
      self.draft.dirty = !self.draft.dirty;
    }
  }

  /// Close the detail view. Returns the item id and the changed fields when the draft differs
  /// from the values the item was opened with.
  pub fn close(&mut self) -> Option<(String, ClothingPatch)> {
    let open = self.open.take()?;
    let patch = self.draft.diff(&self.original);
    self.editing = false;
    self.animation = FavoriteAnimation::Idle;
    self.original = EditDraft::default();
    self.draft = EditDraft::default();
    if patch.is_empty() {
      info!("EditFlow: closing {} without changes", open.id);
      None
    } else {
      info!("EditFlow: closing {} with changes {:?}", open.id, patch);
      Some((open.id, patch))
    }
  }

  /// Drop the open item without persisting anything, e.g. after it was deleted.
  pub fn discard(&mut self) {
    self.open = None;
    self.editing = false;
    self.animation = FavoriteAnimation::Idle;
  }
}
