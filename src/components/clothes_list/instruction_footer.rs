use ratatui::{
  layout::Rect,
  prelude::{Line, Span},
  style::{Modifier, Style},
};

use super::batch::{BatchOperation, IconState};
use crate::tui::Frame;

/// Which screen of the clothes list the footer describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FooterScreen {
  Loading,
  Prompt,
  Detail { editing: bool },
  Select { operations: Vec<BatchOperation>, icons: IconState, has_selection: bool, fixed: bool },
  Browse { can_open: bool, can_select: bool, can_pick: bool, picker: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterState {
  pub screen: FooterScreen,
  pub primary_button: Option<String>,
  pub additional_operation: Option<String>,
}

#[derive(Debug, Default)]
pub struct InstructionFooter {}

impl InstructionFooter {
  pub fn commands(&self, state: &FooterState) -> Vec<Span<'static>> {
    let dimmed = Style::default().add_modifier(Modifier::DIM);
    let mut commands = Vec::new();
    match &state.screen {
      FooterScreen::Loading => commands.push(Span::raw("Working...")),
      FooterScreen::Prompt => {
        commands.push(Span::raw("y: Confirm"));
        commands.push(Span::raw(" | n: Cancel"));
      },
      FooterScreen::Detail { editing } => {
        commands.push(Span::raw("esc: Close"));
        commands.push(Span::raw(if *editing { " | e: Hide details" } else { " | e: Edit" }));
        commands.push(Span::raw(" | f: Favorite"));
        commands.push(Span::raw(" | l: Laundry"));
        commands.push(Span::raw(" | d: Delete"));
      },
      FooterScreen::Select { operations, icons, has_selection, fixed } => {
        if *fixed {
          commands.push(Span::raw("q: Quit"));
          commands.push(Span::raw(" | esc: Clear"));
        } else {
          commands.push(Span::raw("esc: Cancel"));
        }
        commands.push(Span::raw(" | ⏎: Toggle"));
        commands.push(Span::raw(" | a: Select all"));
        let style = if *has_selection { Style::default() } else { dimmed };
        for operation in operations {
          let label = match operation {
            BatchOperation::Favorite => format!(" | f: {}", icons.favorite),
            BatchOperation::Laundry => format!(" | l: {}", icons.laundry),
            BatchOperation::Delete => String::from(" | d: Delete"),
          };
          commands.push(Span::styled(label, style));
        }
        if let (Some(label), false) = (&state.additional_operation, *fixed) {
          commands.push(Span::styled(format!(" | o: {label}"), style));
        }
      },
      FooterScreen::Browse { can_open, can_select, can_pick, picker } => {
        commands.push(Span::raw("esc: Quit"));
        if *can_pick {
          commands.push(Span::raw(" | ⏎: Pick"));
        } else if *can_open {
          commands.push(Span::raw(" | ⏎: Open"));
        }
        if *can_select {
          commands.push(Span::raw(" | space: Select"));
        }
        if *picker {
          commands.push(Span::raw(" | [/]: Category"));
        }
        commands.push(Span::raw(" | r: Refresh"));
      },
    }
    if let Some(label) = &state.primary_button {
      if !matches!(state.screen, FooterScreen::Loading | FooterScreen::Prompt) {
        commands.push(Span::raw(format!(" | b: {label}")));
      }
    }
    commands
  }

  pub fn render(&self, f: &mut Frame<'_>, area: Rect, state: &FooterState) {
    let footer = Line::from(self.commands(state));
    f.render_widget(footer, area);
  }
}
