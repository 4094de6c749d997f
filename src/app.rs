use std::{sync::Arc, time::Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::Rect;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::{
  action::Action,
  components::{
    Component,
    clothes_list::{ClothesContext, ClothesList, ListOptions},
    toast::{Notification, Toasts},
  },
  config::Config,
  mode::Mode,
  tui,
  tui::Tui,
  wardrobe::WardrobeStore,
};

pub struct App {
  pub clothes_list: Box<dyn Component>,
  pub context: ClothesContext,
  pub options: ListOptions,
  pub toasts: Toasts,
  pub tick_rate: f64,
  pub frame_rate: f64,
  pub should_quit: bool,
  pub should_suspend: bool,
  pub mode: Mode,
}

impl App {
  pub fn new(config: Config, store: Arc<dyn WardrobeStore>, tick_rate: f64, frame_rate: f64) -> Self {
    let context = ClothesContext::new();
    let options = config.list.clone();
    let clothes_list = Box::new(ClothesList::new(store, config.list, config.picker_kinds.0, context.clone()));
    Self {
      clothes_list,
      context,
      options,
      toasts: Toasts::new(config.notifications.duration()),
      tick_rate,
      frame_rate,
      should_quit: false,
      should_suspend: false,
      mode: Mode::Default,
    }
  }

  pub async fn run(&mut self) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();

    let mut tui = Tui::new()?.tick_rate(self.tick_rate).frame_rate(self.frame_rate);
    tui.enter()?;

    self.clothes_list.register_action_handler(action_tx.clone())?;

    loop {
      if let Some(e) = tui.next().await {
        let mut consumed = false;
        match e {
          tui::Event::Quit => action_tx.send(Action::Quit)?,
          tui::Event::Tick => action_tx.send(Action::Tick)?,
          tui::Event::Render => action_tx.send(Action::Render)?,
          tui::Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
          tui::Event::Key(key) => {
            if let Some(action) = global_action(self.mode, key) {
              consumed = true;
              action_tx.send(action)?;
            }
          },
          _ => {},
        }

        if !consumed {
          if let Some(action) = self.clothes_list.handle_events(Some(e.clone())).await? {
            action_tx.send(action)?;
          }
        }
      }

      while let Ok(action) = action_rx.try_recv() {
        if action != Action::Tick && action != Action::Render {
          log::debug!("{action:?}");
        }

        match &action {
          Action::ModeChanged(mode) => self.mode = *mode,
          Action::Notify(notification) => self.toasts.push(notification.clone()),
          Action::PrimaryButton => self.hand_off_selection(self.options.primary_button.clone()),
          Action::AdditionalOperation => self.hand_off_selection(self.options.additional_operation.clone()),
          Action::Tick => {
            self.toasts.prune(Instant::now());
          },
          Action::Quit => self.should_quit = true,
          Action::Suspend => self.should_suspend = true,
          Action::Resume => self.should_suspend = false,
          Action::Resize(w, h) => {
            tui.resize(Rect::new(0, 0, *w, *h))?;
            self.render(&mut tui)?;
          },
          Action::Render => self.render(&mut tui)?,
          _ => {},
        }
        if let Some(action) = self.clothes_list.update(action).await? {
          action_tx.send(action)?
        };
      }
      if self.should_suspend {
        tui.suspend()?;
        action_tx.send(Action::Resume)?;
        tui = Tui::new()?.tick_rate(self.tick_rate).frame_rate(self.frame_rate);
        tui.enter()?;
      } else if self.should_quit {
        tui.stop()?;
        break;
      }
    }
    tui.exit()?;
    Ok(())
  }

  fn render(&mut self, tui: &mut Tui) -> Result<()> {
    let component = &mut self.clothes_list;
    let toasts = &self.toasts;
    tui.draw(|f| {
      let area = f.area();
      if let Err(err) = component.draw(f, area) {
        error!("Failed to draw: {:?}", err);
      }
      toasts.draw(f, area);
    })?;
    Ok(())
  }

  /// Give the published selection (or the picked item) to whatever the button stands for.
  fn hand_off_selection(&mut self, label: Option<String>) {
    let Some(label) = label else {
      return;
    };
    let mut ids = self.context.selected_ids();
    if ids.is_empty() {
      ids.extend(self.context.picked_id());
    }
    info!("{}: handing off {:?}", label, ids);
    let count = ids.len();
    let subtitle = if count == 1 { String::from("1 item") } else { format!("{count} items") };
    self.toasts.push(Notification::info(label, Some(subtitle)));
  }
}

/// Keys the app handles before the component sees them.
fn global_action(mode: Mode, key: KeyEvent) -> Option<Action> {
  match (mode, key.code, key.modifiers) {
    (_, KeyCode::Char('c' | 'C'), KeyModifiers::CONTROL) => Some(Action::Quit),
    (_, KeyCode::Char('z' | 'Z'), KeyModifiers::CONTROL) => Some(Action::Suspend),
    (Mode::Select, KeyCode::Esc, _) => Some(Action::CancelSelection),
    (Mode::Default, KeyCode::Esc | KeyCode::Char('q'), _) => Some(Action::Quit),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::wardrobe::{Clothing, mock_store::MockWardrobeStore};

  fn app() -> App {
    let mut config = Config::default();
    config.list.primary_button = Some(String::from("Save outfit"));
    let store = Arc::new(MockWardrobeStore::new(vec![Clothing::new("a", "shirt", "shirt")]));
    App::new(config, store, 10.0, 30.0)
  }

  fn subtitles(app: &App) -> Vec<Option<String>> {
    app.toasts.visible().map(|toast| toast.subtitle.clone()).collect()
  }

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  #[test]
  fn test_back_cancels_selection_only_in_select_mode() {
    assert_eq!(global_action(Mode::Select, key(KeyCode::Esc)), Some(Action::CancelSelection));
    assert_eq!(global_action(Mode::Default, key(KeyCode::Esc)), Some(Action::Quit));
    assert_eq!(global_action(Mode::Overlay, key(KeyCode::Esc)), None);
  }

  #[test]
  fn test_q_only_quits_from_the_grid() {
    assert_eq!(global_action(Mode::Default, key(KeyCode::Char('q'))), Some(Action::Quit));
    assert_eq!(global_action(Mode::Select, key(KeyCode::Char('q'))), None);
    assert_eq!(global_action(Mode::Overlay, key(KeyCode::Char('q'))), None);
  }

  #[test]
  fn test_ctrl_c_always_quits() {
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    for mode in [Mode::Default, Mode::Select, Mode::Overlay] {
      assert_eq!(global_action(mode, ctrl_c), Some(Action::Quit));
    }
  }

  #[test]
  fn test_primary_button_hands_off_published_selection() {
    let mut app = app();
    app.context.publish_selection(&[String::from("a"), String::from("b")]);

    app.hand_off_selection(app.options.primary_button.clone());

    let titles: Vec<String> = app.toasts.visible().map(|toast| toast.title.clone()).collect();
    assert_eq!(titles, vec![String::from("Save outfit")]);
    assert_eq!(subtitles(&app), vec![Some(String::from("2 items"))]);
  }

  #[test]
  fn test_hand_off_falls_back_to_picked_item() {
    let mut app = app();
    app.context.toggle_pick("a");

    app.hand_off_selection(Some(String::from("Wear")));

    assert_eq!(subtitles(&app), vec![Some(String::from("1 item"))]);
  }

  #[test]
  fn test_hand_off_without_button_is_ignored() {
    let mut app = app();
    app.context.publish_selection(&[String::from("a")]);

    app.hand_off_selection(None);

    assert!(app.toasts.is_empty());
  }
}
