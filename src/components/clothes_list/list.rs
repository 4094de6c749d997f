use std::{
  sync::Arc,
  time::{Instant, SystemTime},
};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
  layout::{Alignment, Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tokio::{sync::mpsc::UnboundedSender, task::spawn};
use tracing::{error, info, warn};

use super::{
  ListOptions,
  batch::{BatchOperation, RETRY_HINT, RequestReport, StoreRequest, derive_icon_state, resolve},
  clothing_item::ClothingCell,
  confirmation::{ConfirmationPrompt, centered},
  context::ClothesContext,
  edit_flow::{EditFlow, EditState},
  filter::{FilterView, PickerKind},
  instruction_footer::{FooterScreen, FooterState, InstructionFooter},
  selection::SelectionController,
};
use crate::{
  action::Action,
  components::{Component, toast::Notification},
  mode::Mode,
  tui::Frame,
  wardrobe::{Clothing, ClothingId, WardrobeStore},
};

const COLUMNS: usize = 3;
const CELL_HEIGHT: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadingOperation {
  None,
  Loading(SystemTime),
  Updating(SystemTime, usize),
  Deleting(SystemTime, usize),
}

impl LoadingOperation {
  fn for_request(request: &StoreRequest) -> Self {
    match request {
      StoreRequest::Update { ids, .. } => LoadingOperation::Updating(SystemTime::now(), ids.len()),
      StoreRequest::Delete { ids } => LoadingOperation::Deleting(SystemTime::now(), ids.len()),
    }
  }

  fn is_loading(&self) -> bool {
    *self != LoadingOperation::None
  }

  fn describe(&self) -> Option<String> {
    match self {
      LoadingOperation::None => None,
      LoadingOperation::Loading(time) => Some(format!("Loading clothes...({})", format_time_elapsed(*time))),
      LoadingOperation::Updating(time, count) => {
        Some(format!("Updating {} clothes...({})", count, format_time_elapsed(*time)))
      },
      LoadingOperation::Deleting(time, count) => {
        Some(format!("Deleting {} clothes...({})", count, format_time_elapsed(*time)))
      },
    }
  }
}

/// The clothes grid: browsing, multi-select with batch operations, and the detail view.
pub struct ClothesList {
  store: Arc<dyn WardrobeStore>,
  options: ListOptions,
  context: ClothesContext,
  action_tx: Option<UnboundedSender<Action>>,
  clothes: Vec<Clothing>,
  filter: FilterView,
  selection: SelectionController,
  edit: EditFlow,
  prompt: Option<ConfirmationPrompt>,
  loading: LoadingOperation,
  cursor: usize,
  mode: Mode,
  instruction_footer: InstructionFooter,
}

impl ClothesList {
  pub fn new(
    store: Arc<dyn WardrobeStore>,
    options: ListOptions,
    picker_kinds: Vec<PickerKind>,
    context: ClothesContext,
  ) -> Self {
    let mut selection = SelectionController::new(options.selection_enabled(), options.fixed_select_mode);
    if options.publishes_selection() {
      selection = selection.with_publisher(context.clone());
    }
    let filter = FilterView::new(options.type_filter.clone(), options.picker_filter, picker_kinds);
    let edit = EditFlow::new(options.can_open);

    ClothesList {
      store,
      options,
      context,
      action_tx: None,
      clothes: Vec::new(),
      filter,
      selection,
      edit,
      prompt: None,
      loading: LoadingOperation::None,
      cursor: 0,
      mode: Mode::Default,
      instruction_footer: InstructionFooter::default(),
    }
  }

  fn send_action(&self, action: Action) {
    if let Some(tx) = &self.action_tx {
      if let Err(err) = tx.send(action) {
        error!("ClothesList: failed to send action: {}", err);
      }
    }
  }

  fn notify(&self, notification: Notification) {
    self.send_action(Action::Notify(notification));
  }

  fn current_mode(&self) -> Mode {
    if self.prompt.is_some() || self.edit.is_open() {
      Mode::Overlay
    } else if self.selection.is_active() {
      Mode::Select
    } else {
      Mode::Default
    }
  }

  /// Tell the app when back handling has to change.
  fn announce_mode(&mut self) {
    let mode = self.current_mode();
    if mode != self.mode {
      self.mode = mode;
      self.send_action(Action::ModeChanged(mode));
    }
  }

  fn visible_ids(&self) -> Vec<ClothingId> {
    self.filter.visible_ids(&self.clothes)
  }

  fn cursor_item(&self) -> Option<Clothing> {
    self.filter.visible(&self.clothes).get(self.cursor).map(|clothing| (*clothing).clone())
  }

  /// Keep the selection and cursor inside the visible items.
  fn visible_changed(&mut self) {
    let visible = self.visible_ids();
    self.selection.retain_visible(&visible);
    self.cursor = self.cursor.min(visible.len().saturating_sub(1));
  }

  fn move_cursor(&mut self, delta: isize) {
    let count = self.visible_ids().len();
    if count == 0 {
      self.cursor = 0;
      return;
    }
    self.cursor = self.cursor.saturating_add_signed(delta).min(count - 1);
  }

  fn load_clothes(&mut self) {
    if self.loading.is_loading() {
      warn!("ClothesList: refresh refused, a request is in flight");
      return;
    }
    self.loading = LoadingOperation::Loading(SystemTime::now());
    let store = self.store.clone();
    let tx = self.action_tx.clone();

    spawn(async move {
      let action = match store.clothes().await {
        Ok(clothes) => Action::ClothesLoaded(clothes),
        Err(err) => {
          error!("Failed to load clothes: {}", err);
          Action::LoadFailed(err.user_message())
        },
      };
      if let Some(tx) = tx {
        let _ = tx.send(action);
      }
    });
  }

  /// Send one request to the store. Only one request is in flight at a time.
  fn dispatch(&mut self, request: StoreRequest) {
    if self.loading.is_loading() {
      warn!("ClothesList: {:?} refused, a request is in flight", request);
      return;
    }
    info!("ClothesList: dispatching {:?}", request);
    self.loading = LoadingOperation::for_request(&request);
    let store = self.store.clone();
    let tx = self.action_tx.clone();

    spawn(async move {
      let report = request.send(store.as_ref()).await;
      if let Some(tx) = tx {
        let _ = tx.send(Action::RequestSettled(report));
      }
    });
  }

  fn batch(&mut self, operation: BatchOperation) {
    if !self.selection.is_active() || !self.options.operations.contains(operation) {
      return;
    }
    if self.selection.is_fixed() {
      warn!("ClothesList: {} ignored, selection is fixed", operation);
      return;
    }
    let icons = derive_icon_state(&self.clothes, self.selection.selected());
    let Some(request) = StoreRequest::for_operation(operation, icons, self.selection.selected()) else {
      info!("ClothesList: {} ignored, nothing selected", operation);
      return;
    };
    if !operation.requires_confirmation() {
      self.dispatch(request);
      return;
    }
    let prompt = match operation {
      BatchOperation::Laundry => ConfirmationPrompt::laundry(icons.dirty_target(), request),
      _ => ConfirmationPrompt::delete(request),
    };
    self.prompt = Some(prompt);
  }

  fn settle(&mut self, report: RequestReport) -> Option<Action> {
    self.loading = LoadingOperation::None;
    self.prompt = None;

    let resolution = resolve(&report, self.selection.is_active());
    let visible_count = self.visible_ids().len();
    if resolution.exit_selection {
      self.selection.exit_selection_mode(visible_count);
    } else if resolution.clear_selection {
      self.selection.clear(visible_count);
    }
    if resolution.close_detail {
      self.edit.discard();
    }
    if let Some(notification) = resolution.notification {
      self.notify(notification);
    }
    resolution.refresh.then_some(Action::Refresh)
  }

  fn tap(&mut self) {
    let Some(item) = self.cursor_item() else {
      return;
    };
    if self.selection.is_active() {
      let visible = self.visible_ids();
      self.selection.toggle(&item.id, &visible);
    } else if self.options.can_pick {
      info!("ClothesList: picking {}", item.id);
      self.context.toggle_pick(&item.id);
    } else {
      self.edit.open(&item, false);
    }
  }

  fn long_press(&mut self) {
    if !self.options.can_select {
      return;
    }
    let Some(item) = self.cursor_item() else {
      return;
    };
    self.selection.enter_selection_mode();
    let visible = self.visible_ids();
    self.selection.toggle(&item.id, &visible);
  }

  fn navigation_key(&self, code: KeyCode) -> Option<Action> {
    match code {
      KeyCode::Left => Some(Action::CursorLeft),
      KeyCode::Right => Some(Action::CursorRight),
      KeyCode::Up => Some(Action::CursorUp),
      KeyCode::Down => Some(Action::CursorDown),
      KeyCode::Char('[') if self.filter.picker_enabled() => Some(Action::PreviousPicker),
      KeyCode::Char(']') if self.filter.picker_enabled() => Some(Action::NextPicker),
      KeyCode::Char('b' | 'B') if self.options.primary_button.is_some() => Some(Action::PrimaryButton),
      _ => None,
    }
  }

  fn prompt_key(&self, code: KeyCode) -> Option<Action> {
    match code {
      KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Action::ConfirmPrompt),
      KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::DismissPrompt),
      _ => None,
    }
  }

  fn detail_key(&self, code: KeyCode) -> Option<Action> {
    match code {
      KeyCode::Esc | KeyCode::Enter => Some(Action::CloseDetail),
      KeyCode::Char('e' | 'E') => Some(Action::ToggleEdit),
      KeyCode::Char('f' | 'F') => Some(Action::ToggleFavorite),
      KeyCode::Char('l' | 'L') => Some(Action::ToggleDirty),
      KeyCode::Char('d' | 'D') => Some(Action::DeleteOpenItem),
      _ => None,
    }
  }

  fn select_key(&self, code: KeyCode) -> Option<Action> {
    let operations = &self.options.operations;
    let fixed = self.selection.is_fixed();
    match code {
      KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Tap),
      KeyCode::Char('a' | 'A') => Some(Action::ToggleSelectAll),
      KeyCode::Char('q' | 'Q') if fixed => Some(Action::Quit),
      // A fixed selection only feeds the primary button.
      KeyCode::Char('f' | 'F' | 'l' | 'L' | 'd' | 'D' | 'o' | 'O') if fixed => None,
      KeyCode::Char('f' | 'F') if operations.contains(BatchOperation::Favorite) => Some(Action::BatchFavorite),
      KeyCode::Char('l' | 'L') if operations.contains(BatchOperation::Laundry) => Some(Action::BatchLaundry),
      KeyCode::Char('d' | 'D') if operations.contains(BatchOperation::Delete) => Some(Action::BatchDelete),
      KeyCode::Char('o' | 'O') if self.options.additional_operation.is_some() && !self.selection.is_empty() => {
        Some(Action::AdditionalOperation)
      },
      code => self.navigation_key(code),
    }
  }

  fn browse_key(&self, code: KeyCode) -> Option<Action> {
    match code {
      KeyCode::Enter => Some(Action::Tap),
      KeyCode::Char(' ') if self.options.can_select => Some(Action::LongPress),
      KeyCode::Char('r' | 'R') => Some(Action::Refresh),
      code => self.navigation_key(code),
    }
  }

  fn footer_state(&self) -> FooterState {
    let screen = if self.loading.is_loading() {
      FooterScreen::Loading
    } else if self.prompt.is_some() {
      FooterScreen::Prompt
    } else if self.edit.is_open() {
      FooterScreen::Detail { editing: self.edit.state() == EditState::Editing }
    } else if self.selection.is_active() {
      let fixed = self.selection.is_fixed();
      FooterScreen::Select {
        operations: if fixed { Vec::new() } else { self.options.operations.enabled() },
        icons: derive_icon_state(&self.clothes, self.selection.selected()),
        has_selection: !self.selection.is_empty(),
        fixed,
      }
    } else {
      FooterScreen::Browse {
        can_open: self.options.can_open,
        can_select: self.options.can_select,
        can_pick: self.options.can_pick,
        picker: self.filter.picker_enabled(),
      }
    };
    FooterState {
      screen,
      primary_button: self.options.primary_button.clone(),
      additional_operation: self.options.additional_operation.clone(),
    }
  }

  fn render_header(&self, f: &mut Frame<'_>, area: Rect) {
    let mut spans = Vec::new();
    if self.selection.is_active() {
      if !self.selection.is_fixed() {
        spans.push(Span::styled("✕ ", Style::default().add_modifier(Modifier::DIM)));
      }
      spans.push(Span::styled(format!("{} clothes", self.selection.len()), Style::default().add_modifier(Modifier::BOLD)));
      let checkbox = if self.selection.is_all_selected() { "  [x] Select all" } else { "  [ ] Select all" };
      spans.push(Span::raw(checkbox));
    } else {
      spans.push(Span::styled("Wardrobe", Style::default().add_modifier(Modifier::BOLD)));
      if let Some(clothing_type) = &self.options.type_filter {
        spans.push(Span::styled(format!(" · {clothing_type}"), Style::default().add_modifier(Modifier::DIM)));
      }
      if self.filter.picker_enabled() {
        spans.push(Span::raw(format!(" · Category: {}", self.filter.picker_label())));
      }
    }
    f.render_widget(Line::from(spans), area);
  }

  fn render_grid(&self, f: &mut Frame<'_>, area: Rect) {
    if self.filter.shows_empty_state(&self.clothes) {
      let empty = Paragraph::new("No clothes of this type found")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::DIM))
        .block(Block::default().borders(Borders::ALL));
      f.render_widget(empty, area);
      return;
    }

    let visible = self.filter.visible(&self.clothes);
    if visible.is_empty() {
      let empty = Paragraph::new(if self.loading.is_loading() { "" } else { "Your wardrobe is empty" })
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::DIM))
        .block(Block::default().borders(Borders::ALL));
      f.render_widget(empty, area);
      return;
    }

    let rows_fit = usize::from((area.height / CELL_HEIGHT).max(1));
    let first_row = (self.cursor / COLUMNS).saturating_sub(rows_fit - 1);
    let rows = Layout::default()
      .direction(Direction::Vertical)
      .constraints(vec![Constraint::Length(CELL_HEIGHT); rows_fit])
      .split(area);
    let picked = self.context.picked_id();

    for (row_offset, row_area) in rows.iter().enumerate() {
      let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
        .split(*row_area);
      for (column, cell_area) in columns.iter().enumerate() {
        let index = (first_row + row_offset) * COLUMNS + column;
        let Some(clothing) = visible.get(index).copied() else {
          return;
        };
        let cell = ClothingCell {
          clothing,
          cursor: index == self.cursor,
          selecting: self.selection.is_active(),
          selected: self.selection.contains(&clothing.id),
          picked: picked.as_deref() == Some(clothing.id.as_str()),
        };
        f.render_widget(cell.render(), *cell_area);
      }
    }
  }

  fn render_detail(&self, f: &mut Frame<'_>, area: Rect) {
    let Some(item) = self.edit.open_item() else {
      return;
    };
    let editing = self.edit.state() == EditState::Editing;
    let draft = self.edit.draft();

    let heart_style = if self.edit.favorite_scale(Instant::now()) > 1.0 {
      Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Red)
    };
    let mut lines = vec![
      Line::from(Span::styled(item.label(), Style::default().add_modifier(Modifier::BOLD))),
      Line::default(),
      Line::from(vec![
        Span::styled(if draft.favorite { "♥" } else { "♡" }, heart_style),
        Span::raw(if draft.favorite { " Favorite" } else { " Not a favorite" }),
      ]),
      Line::from(Span::styled(
        if draft.dirty { "In the laundry" } else { "Clean" },
        Style::default().fg(if draft.dirty { Color::Green } else { Color::White }),
      )),
    ];
    if editing {
      lines.push(Line::default());
      for (name, value) in [
        ("Color", &item.color),
        ("Gender", &item.gender),
        ("Kind", &item.kind),
        ("Style", &item.style),
        ("Temperature", &item.temperature),
        ("Tissue", &item.tissue),
      ] {
        lines.push(Line::from(vec![
          Span::styled(format!("{name}: "), Style::default().add_modifier(Modifier::DIM)),
          Span::raw(value.clone()),
        ]));
      }
    }

    let popup = centered(area, 50, if editing { 14 } else { 7 });
    let border = if draft.dirty { Color::Green } else { Color::White };
    let detail = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
      Block::default()
        .title(if editing { "Edit" } else { "Details" })
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border)),
    );
    f.render_widget(Clear, popup);
    f.render_widget(detail, popup);
  }

  fn render_loading(&self, f: &mut Frame<'_>, area: Rect) {
    let Some(text) = self.loading.describe() else {
      return;
    };
    let popup = centered(area, 40, 3);
    let overlay = Paragraph::new(text).alignment(Alignment::Center).block(Block::default().borders(Borders::ALL));
    f.render_widget(Clear, popup);
    f.render_widget(overlay, popup);
  }
}

#[async_trait::async_trait]
impl Component for ClothesList {
  fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
    self.action_tx = Some(tx);
    self.mode = self.current_mode();
    self.send_action(Action::ModeChanged(self.mode));
    self.send_action(Action::Refresh);
    Ok(())
  }

  async fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<Action>> {
    if self.loading.is_loading() {
      return Ok(None);
    }
    let action = if self.prompt.is_some() {
      self.prompt_key(key.code)
    } else if self.edit.is_open() {
      self.detail_key(key.code)
    } else if self.selection.is_active() {
      self.select_key(key.code)
    } else {
      self.browse_key(key.code)
    };
    Ok(action)
  }

  async fn update(&mut self, action: Action) -> Result<Option<Action>> {
    let next = match action {
      Action::Tick => {
        self.edit.tick(Instant::now());
        None
      },
      Action::Refresh => {
        self.load_clothes();
        None
      },
      Action::ClothesLoaded(clothes) => {
        info!("ClothesList: loaded {} clothes", clothes.len());
        self.loading = LoadingOperation::None;
        self.clothes = clothes;
        self.visible_changed();
        None
      },
      Action::LoadFailed(message) => {
        self.loading = LoadingOperation::None;
        self.notify(Notification::error(message, RETRY_HINT));
        None
      },
      Action::RequestSettled(report) => self.settle(report),
      Action::CursorLeft => {
        self.move_cursor(-1);
        None
      },
      Action::CursorRight => {
        self.move_cursor(1);
        None
      },
      Action::CursorUp => {
        self.move_cursor(-(COLUMNS as isize));
        None
      },
      Action::CursorDown => {
        self.move_cursor(COLUMNS as isize);
        None
      },
      Action::Tap => {
        self.tap();
        None
      },
      Action::LongPress => {
        self.long_press();
        None
      },
      Action::CancelSelection => {
        if !self.loading.is_loading() {
          let visible_count = self.visible_ids().len();
          self.selection.exit_selection_mode(visible_count);
        }
        None
      },
      Action::ToggleSelectAll => {
        if self.selection.is_active() {
          let visible = self.visible_ids();
          self.selection.toggle_select_all(&visible);
        }
        None
      },
      Action::BatchFavorite => {
        self.batch(BatchOperation::Favorite);
        None
      },
      Action::BatchLaundry => {
        self.batch(BatchOperation::Laundry);
        None
      },
      Action::BatchDelete => {
        self.batch(BatchOperation::Delete);
        None
      },
      Action::ConfirmPrompt => {
        if let Some(prompt) = &self.prompt {
          info!("ClothesList: confirmed \"{}\"", prompt.title);
          let request = prompt.request.clone();
          self.dispatch(request);
        }
        None
      },
      Action::DismissPrompt => {
        if !self.loading.is_loading() {
          self.prompt = None;
        }
        None
      },
      Action::ToggleEdit => {
        self.edit.toggle_edit();
        None
      },
      Action::ToggleFavorite => {
        self.edit.begin_favorite_toggle(Instant::now());
        None
      },
      Action::ToggleDirty => {
        self.edit.toggle_dirty();
        None
      },
      Action::DeleteOpenItem => {
        if let Some(item) = self.edit.open_item() {
          let request = StoreRequest::Delete { ids: vec![item.id.clone()] };
          self.prompt = Some(ConfirmationPrompt::delete(request));
        }
        None
      },
      Action::CloseDetail => {
        if let Some((id, patch)) = self.edit.close() {
          self.dispatch(StoreRequest::Update { ids: vec![id], patch });
        }
        None
      },
      Action::NextPicker => {
        self.filter.cycle_picker(true);
        self.visible_changed();
        None
      },
      Action::PreviousPicker => {
        self.filter.cycle_picker(false);
        self.visible_changed();
        None
      },
      _ => None,
    };
    self.announce_mode();
    Ok(next)
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
      .split(area);

    self.render_header(f, chunks[0]);
    self.render_grid(f, chunks[1]);
    self.instruction_footer.render(f, chunks[2], &self.footer_state());

    if self.edit.is_open() {
      self.render_detail(f, chunks[1]);
    }
    if let Some(prompt) = &self.prompt {
      prompt.render(f, area);
    }
    if self.loading.is_loading() {
      self.render_loading(f, area);
    }
    Ok(())
  }
}

fn format_time_elapsed(time: SystemTime) -> String {
  match time.elapsed() {
    Ok(elapsed) => format!("{:.1}s", elapsed.as_secs_f64()),
    Err(err) => {
      warn!("Failed to get system time {}", err);
      String::from("xs")
    },
  }
}
