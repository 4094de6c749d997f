use std::{
  collections::VecDeque,
  time::{Duration, Instant},
};

use ratatui::{
  layout::{Alignment, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use serde::{Deserialize, Serialize};

use crate::tui::Frame;

const TOAST_WIDTH: u16 = 40;
const TOAST_HEIGHT: u16 = 4;
const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
  Info,
  Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
  pub kind: NotificationKind,
  pub title: String,
  pub subtitle: Option<String>,
}

impl Notification {
  pub fn info(title: impl Into<String>, subtitle: Option<String>) -> Self {
    Notification { kind: NotificationKind::Info, title: title.into(), subtitle }
  }

  pub fn error(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
    Notification { kind: NotificationKind::Error, title: title.into(), subtitle: Some(subtitle.into()) }
  }
}

/// Stack of notifications drawn in the top right corner until they expire.
#[derive(Debug)]
pub struct Toasts {
  entries: VecDeque<(Notification, Instant)>,
  ttl: Duration,
}

impl Toasts {
  pub fn new(ttl: Duration) -> Self {
    Toasts { entries: VecDeque::new(), ttl }
  }

  pub fn push(&mut self, notification: Notification) {
    self.push_at(notification, Instant::now());
  }

  fn push_at(&mut self, notification: Notification, now: Instant) {
    self.entries.push_back((notification, now));
  }

  /// Drop expired notifications. Returns true when something was removed.
  pub fn prune(&mut self, now: Instant) -> bool {
    let before = self.entries.len();
    let ttl = self.ttl;
    self.entries.retain(|(_, shown_at)| now.saturating_duration_since(*shown_at) < ttl);
    before != self.entries.len()
  }

  pub fn visible(&self) -> impl Iterator<Item = &Notification> {
    self.entries.iter().rev().take(MAX_VISIBLE).map(|(notification, _)| notification)
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn draw(&self, frame: &mut Frame<'_>, area: Rect) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width.saturating_sub(width);
    for (index, notification) in self.visible().enumerate() {
      let y = area.y + (index as u16) * TOAST_HEIGHT;
      if y + TOAST_HEIGHT > area.y + area.height {
        break;
      }
      let toast_area = Rect::new(x, y, width, TOAST_HEIGHT);
      let color = match notification.kind {
        NotificationKind::Info => Color::Green,
        NotificationKind::Error => Color::Red,
      };
      let mut lines = vec![Line::from(Span::styled(notification.title.clone(), Style::default().add_modifier(Modifier::BOLD)))];
      if let Some(subtitle) = &notification.subtitle {
        lines.push(Line::from(Span::styled(subtitle.clone(), Style::default().add_modifier(Modifier::DIM))));
      }
      let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color)));
      frame.render_widget(Clear, toast_area);
      frame.render_widget(paragraph, toast_area);
    }
  }
}
