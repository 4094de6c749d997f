use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use tokio::sync::mpsc::UnboundedSender;

use crate::{
  action::Action,
  tui::{Event, Frame},
};

pub mod clothes_list;
pub mod toast;

/// A screen element driven by the app loop.
///
/// Components turn terminal events into actions, update their own state from actions, and draw
/// themselves. Work that outlives a single `update` call reports back through the sender given to
/// `register_action_handler`.
#[async_trait::async_trait]
pub trait Component: Send + Sync {
  /// Keep a sender so spawned work can report back to the app loop.
  ///
  /// # Arguments
  ///
  /// * `tx` - An unbounded sender for actions.
  ///
  /// # Returns
  ///
  /// * `Result<()>` - An Ok result or an error.
  fn register_action_handler(&mut self, _tx: UnboundedSender<Action>) -> Result<()> {
    Ok(())
  }

  /// Turn a terminal event into an action.
  ///
  /// # Arguments
  ///
  /// * `event` - The event read from the terminal, if any.
  ///
  /// # Returns
  ///
  /// * `Result<Option<Action>>` - An action to queue or none.
  async fn handle_events(&mut self, event: Option<Event>) -> Result<Option<Action>> {
    match event {
      Some(Event::Key(key_event)) => self.handle_key_events(key_event).await,
      _ => Ok(None),
    }
  }

  /// Map a key press to an action, given the component's current state.
  ///
  /// # Arguments
  ///
  /// * `key` - The key press to map.
  ///
  /// # Returns
  ///
  /// * `Result<Option<Action>>` - An action to queue or none.
  async fn handle_key_events(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
    Ok(None)
  }

  /// Apply an action to the component's state.
  ///
  /// # Arguments
  ///
  /// * `action` - The action taken off the queue.
  ///
  /// # Returns
  ///
  /// * `Result<Option<Action>>` - A follow-up action for the next loop iteration or none.
  async fn update(&mut self, _action: Action) -> Result<Option<Action>> {
    Ok(None)
  }

  /// Draw the component. (REQUIRED)
  ///
  /// # Arguments
  ///
  /// * `f` - The frame being drawn.
  /// * `area` - The area the component owns.
  ///
  /// # Returns
  ///
  /// * `Result<()>` - An Ok result or an error.
  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()>;
}
