use ratatui::{
  layout::{Alignment, Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::batch::StoreRequest;
use crate::tui::Frame;

/// A pending store request waiting for the user to confirm it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
  pub title: String,
  pub description: String,
  pub color: Color,
  pub confirm_label: String,
  pub request: StoreRequest,
}

impl ConfirmationPrompt {
  /// `dirty` is the value the laundry request writes.
  pub fn laundry(dirty: bool, request: StoreRequest) -> Self {
    let (title, description) = if dirty {
      ("Send to laundry", "Your clothes will move to the laundry tab")
    } else {
      ("Wash clothes", "Your clothes will return to your wardrobe")
    };
    ConfirmationPrompt {
      title: title.to_string(),
      description: description.to_string(),
      color: Color::Green,
      confirm_label: String::from("Confirm"),
      request,
    }
  }

  pub fn delete(request: StoreRequest) -> Self {
    let title = if request.ids().len() > 1 { "Delete items" } else { "Delete item" };
    ConfirmationPrompt {
      title: title.to_string(),
      description: String::from("This action cannot be undone"),
      color: Color::Red,
      confirm_label: String::from("Delete"),
      request,
    }
  }

  pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
    let popup = centered(area, 50, 7);
    let body = vec![
      Line::from(Span::styled(self.description.clone(), Style::default().add_modifier(Modifier::DIM))),
      Line::default(),
      Line::from(vec![
        Span::styled(format!("y: {}", self.confirm_label), Style::default().fg(self.color).add_modifier(Modifier::BOLD)),
        Span::raw(" | n: Cancel"),
      ]),
    ];
    let paragraph = Paragraph::new(body).alignment(Alignment::Center).wrap(Wrap { trim: true }).block(
      Block::default()
        .title(self.title.clone())
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(self.color)),
    );
    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
  }
}

/// A `width` x `height` rect centered in `area`, clamped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let width = width.min(area.width);
  let height = height.min(area.height);
  let vertical = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Fill(1), Constraint::Length(height), Constraint::Fill(1)])
    .split(area);
  Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Fill(1), Constraint::Length(width), Constraint::Fill(1)])
    .split(vertical[1])[1]
}
