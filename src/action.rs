use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{
  components::{clothes_list::batch::RequestReport, toast::Notification},
  mode::Mode,
  wardrobe::Clothing,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
  Tick,
  Render,
  Resize(u16, u16),
  Suspend,
  Resume,
  Quit,
  Refresh,
  ClothesLoaded(Vec<Clothing>),
  LoadFailed(String),
  RequestSettled(RequestReport),
  Notify(Notification),
  ModeChanged(Mode),
  CursorLeft,
  CursorRight,
  CursorUp,
  CursorDown,
  Tap,
  LongPress,
  CancelSelection,
  ToggleSelectAll,
  BatchFavorite,
  BatchLaundry,
  BatchDelete,
  ConfirmPrompt,
  DismissPrompt,
  ToggleEdit,
  ToggleFavorite,
  ToggleDirty,
  DeleteOpenItem,
  CloseDetail,
  NextPicker,
  PreviousPicker,
  PrimaryButton,
  AdditionalOperation,
}
