use ratatui::{
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::wardrobe::Clothing;

/// How a single cell of the clothes grid is drawn.
#[derive(Debug, Clone)]
pub struct ClothingCell<'a> {
  pub clothing: &'a Clothing,
  pub cursor: bool,
  pub selecting: bool,
  pub selected: bool,
  pub picked: bool,
}

impl<'a> ClothingCell<'a> {
  pub fn new(clothing: &'a Clothing) -> Self {
    ClothingCell { clothing, cursor: false, selecting: false, selected: false, picked: false }
  }

  pub fn lines(&self) -> Vec<Line<'static>> {
    let mut title = Vec::new();
    if self.selecting {
      title.push(Span::raw(if self.selected { "[x] " } else { "[ ] " }));
    } else if self.picked {
      title.push(Span::styled("✓ ", Style::default().fg(Color::Green)));
    }
    title.push(Span::raw(self.clothing.label()));
    if self.clothing.favorite {
      title.push(Span::styled(" ♥", Style::default().fg(Color::Red)));
    }

    let mut lines = vec![Line::from(title)];
    if !self.clothing.clothing_type.is_empty() {
      lines.push(Line::from(Span::styled(self.clothing.clothing_type.clone(), Style::default().add_modifier(Modifier::DIM))));
    }
    lines
  }

  pub fn border_style(&self) -> Style {
    let mut style = Style::default();
    if self.clothing.dirty {
      style = style.fg(Color::Green);
    }
    if self.cursor {
      style = style.add_modifier(Modifier::BOLD);
      if !self.clothing.dirty {
        style = style.fg(Color::White);
      }
    } else {
      style = style.add_modifier(Modifier::DIM);
    }
    style
  }

  pub fn render(&self) -> Paragraph<'static> {
    Paragraph::new(self.lines())
      .block(Block::default().borders(Borders::ALL).border_style(self.border_style()))
  }
}
