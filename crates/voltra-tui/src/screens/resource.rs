//! Generic resource screen: table + editor modal + delete confirmation.
//!
//! One implementation drives all three sections; per-resource behavior
//! (fields, parsing, parent selector, stats line) comes in through
//! [`ScreenSpec`]. Modal open/close and edit/delete bookkeeping live in the
//! core `ResourceModule` -- this screen renders that state and feeds it
//! key and mouse input.

use std::cell::Cell;
use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell as TableCell, Clear, Paragraph, Row, Table, TableState,
};

use voltra_core::{Resource, ResourceModule, Workspace, render_rows};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

// ── Per-resource description ────────────────────────────────────────

/// Which sibling module fills the parent selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    None,
    Units,
    Rooms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Toggle,
}

pub struct FieldDef {
    pub label: &'static str,
    pub kind: FieldKind,
}

/// Everything that differs between the Units, Rooms, and Devices sections.
pub struct ScreenSpec<R: Resource> {
    pub id: &'static str,
    pub singular: &'static str,
    pub fields: &'static [FieldDef],
    pub to_values: fn(&R) -> Vec<String>,
    /// Parse form values into a draft; `Err` is an inline form message.
    pub to_draft: fn(&[String]) -> Result<R::Draft, String>,
    /// Index of the postal-code field, when the form has one.
    pub postal_field: Option<usize>,
    pub parent: Parent,
    pub stats_line: fn(&[R]) -> String,
}

// ── Form state ──────────────────────────────────────────────────────

struct EditForm {
    values: Vec<String>,
    focus: usize,
    error: Option<String>,
    /// Street/city echo from the postal-code lookup.
    address_hint: Option<String>,
}

impl EditForm {
    fn new(field_count: usize) -> Self {
        Self {
            values: vec![String::new(); field_count],
            focus: 0,
            error: None,
            address_hint: None,
        }
    }

    fn populated(values: Vec<String>) -> Self {
        Self {
            values,
            focus: 0,
            error: None,
            address_hint: None,
        }
    }
}

// ── Screen ──────────────────────────────────────────────────────────

pub struct ResourceScreen<R: Resource> {
    spec: ScreenSpec<R>,
    module: ResourceModule<R>,
    workspace: Arc<Workspace>,
    table_state: TableState,
    form: Option<EditForm>,
    editor_rect: Cell<Rect>,
    confirm_rect: Cell<Rect>,
}

impl<R: Resource> ResourceScreen<R> {
    pub fn new(spec: ScreenSpec<R>, module: ResourceModule<R>, workspace: &Arc<Workspace>) -> Self {
        Self {
            spec,
            module,
            workspace: Arc::clone(workspace),
            table_state: TableState::default(),
            form: None,
            editor_rect: Cell::new(Rect::default()),
            confirm_rect: Cell::new(Rect::default()),
        }
    }

    // ── Selection ────────────────────────────────────────────────────

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.module.items().len();
        if len == 0 {
            return;
        }
        #[allow(clippy::cast_possible_wrap)]
        let next = (self.selected_index() as isize + delta).clamp(0, len as isize - 1);
        #[allow(clippy::cast_sign_loss)]
        self.table_state.select(Some(next as usize));
    }

    fn selected_id(&self) -> Option<u64> {
        self.module.items().get(self.selected_index()).map(R::id)
    }

    // ── Async operations ─────────────────────────────────────────────

    fn spawn_load(&self) {
        let module = self.module.clone();
        tokio::spawn(async move {
            let _ = module.load().await;
        });
    }

    /// Refresh the parent-selector module so its list is never stale.
    fn spawn_parent_refresh(&self) {
        match self.spec.parent {
            Parent::None => {}
            Parent::Units => {
                let units = self.workspace.units.clone();
                tokio::spawn(async move {
                    let _ = units.load().await;
                });
            }
            Parent::Rooms => {
                let rooms = self.workspace.rooms.clone();
                tokio::spawn(async move {
                    let _ = rooms.load().await;
                });
            }
        }
    }

    fn open_add(&mut self) {
        self.spawn_parent_refresh();
        self.module.open_create();
        let mut form = EditForm::new(self.spec.fields.len());
        // Toggle fields start in their "on" position, like the original
        // form's preselected status option.
        for (idx, field) in self.spec.fields.iter().enumerate() {
            if field.kind == FieldKind::Toggle {
                form.values[idx] = "active".into();
            }
        }
        self.form = Some(form);
    }

    fn open_edit(&mut self) {
        let Some(id) = self.selected_id() else { return };
        // Silent no-op when the id is not cached anymore.
        if let Some(record) = self.module.open_edit(id) {
            self.spawn_parent_refresh();
            self.form = Some(EditForm::populated((self.spec.to_values)(&record)));
        }
    }

    fn submit(&mut self) {
        if self.module.is_busy() {
            return;
        }
        let Some(form) = &mut self.form else { return };
        match (self.spec.to_draft)(&form.values) {
            Err(message) => form.error = Some(message),
            Ok(draft) => {
                // Required-field policy, resolved inline before any request.
                if let Err(e) = R::validate(&draft) {
                    form.error = Some(e.to_string());
                    return;
                }
                form.error = None;
                let module = self.module.clone();
                tokio::spawn(async move {
                    let _ = module.save(draft).await;
                });
            }
        }
    }

    fn spawn_confirm_delete(&self) {
        let module = self.module.clone();
        tokio::spawn(async move {
            let _ = module.confirm_delete().await;
        });
    }

    // ── Form input ──────────────────────────────────────────────────

    fn field_kind(&self, idx: usize) -> FieldKind {
        self.spec.fields.get(idx).map_or(FieldKind::Text, |f| f.kind)
    }

    /// Focus moved away from a field -- the postal-code blur hook.
    fn on_field_blur(&mut self, left: usize) -> Option<Action> {
        if self.spec.postal_field == Some(left) {
            let value = self.form.as_ref()?.values.get(left)?.clone();
            if !value.trim().is_empty() {
                return Some(Action::LookupPostal(value));
            }
        }
        None
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Action> {
        let field_count = self.spec.fields.len();
        let focus = self.form.as_ref().map_or(0, |f| f.focus);
        let focus_kind = self.field_kind(focus);

        match key.code {
            KeyCode::Esc => {
                self.module.close_editor();
                self.form = None;
                None
            }
            KeyCode::Enter => {
                self.submit();
                None
            }
            KeyCode::Tab | KeyCode::Down => {
                if let Some(form) = &mut self.form {
                    form.focus = (form.focus + 1) % field_count;
                }
                self.on_field_blur(focus)
            }
            KeyCode::BackTab | KeyCode::Up => {
                if let Some(form) = &mut self.form {
                    form.focus = if form.focus == 0 {
                        field_count - 1
                    } else {
                        form.focus - 1
                    };
                }
                self.on_field_blur(focus)
            }
            KeyCode::Char(' ') if focus_kind == FieldKind::Toggle => {
                if let Some(form) = &mut self.form {
                    let value = &mut form.values[focus];
                    *value = if value.as_str() == "active" {
                        "inactive".into()
                    } else {
                        "active".into()
                    };
                }
                None
            }
            KeyCode::Char(ch) => {
                if let Some(form) = &mut self.form {
                    if focus_kind != FieldKind::Toggle {
                        form.values[focus].push(ch);
                    }
                }
                None
            }
            KeyCode::Backspace => {
                if let Some(form) = &mut self.form {
                    if focus_kind != FieldKind::Toggle {
                        form.values[focus].pop();
                    }
                }
                None
            }
            _ => None,
        }
    }

    // ── Overlay rendering ────────────────────────────────────────────

    fn render_editor(&self, frame: &mut Frame, area: Rect, form: &EditForm) {
        #[allow(clippy::cast_possible_truncation)]
        let height = (self.spec.fields.len() as u16) + 7;
        let overlay = centered_rect(area, 52, height);
        self.editor_rect.set(overlay);
        frame.render_widget(Clear, overlay);

        let title = if self.module.editing_id().is_some() {
            format!(" Edit {} ", self.spec.singular)
        } else {
            format!(" New {} ", self.spec.singular)
        };
        let title = if self.module.is_busy() {
            format!("{title}(saving…) ")
        } else {
            title
        };

        let block = Block::default()
            .title(Span::styled(title, theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let label_style = Style::default().fg(theme::dim());
        let focused_style = Style::default()
            .fg(theme::accent())
            .add_modifier(Modifier::BOLD);
        let value_style = Style::default().fg(theme::text());

        let mut lines = Vec::new();
        for (idx, field) in self.spec.fields.iter().enumerate() {
            let is_focused = idx == form.focus;
            let marker = if is_focused { "▸ " } else { "  " };
            let cursor = if is_focused && field.kind != FieldKind::Toggle {
                "▎"
            } else {
                ""
            };
            let value = form.values.get(idx).cloned().unwrap_or_default();
            let value_style = if field.kind == FieldKind::Toggle {
                if value == "active" {
                    Style::default().fg(theme::success())
                } else {
                    Style::default().fg(theme::dim())
                }
            } else {
                value_style
            };

            lines.push(Line::from(vec![
                Span::styled(marker, if is_focused { focused_style } else { label_style }),
                Span::styled(
                    format!("{:<13}", field.label),
                    if is_focused { focused_style } else { label_style },
                ),
                Span::styled(value, value_style),
                Span::styled(cursor, focused_style),
            ]));
        }

        if let Some(hint) = &form.address_hint {
            lines.push(Line::from(Span::styled(
                format!("  {hint}"),
                Style::default().fg(theme::dim()),
            )));
        }
        if let Some(hint) = self.parent_hint() {
            lines.push(Line::from(Span::styled(
                format!("  {hint}"),
                Style::default().fg(theme::dim()),
            )));
        }
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                format!("  {error}"),
                Style::default().fg(theme::error()),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" Tab", theme::key_hint_key()),
            Span::styled(" next  ", theme::key_hint()),
            Span::styled("Space", theme::key_hint_key()),
            Span::styled(" toggle  ", theme::key_hint()),
            Span::styled("Enter", theme::key_hint_key()),
            Span::styled(" save  ", theme::key_hint()),
            Span::styled("Esc", theme::key_hint_key()),
            Span::styled(" cancel", theme::key_hint()),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_confirm(&self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(area, 44, 5);
        self.confirm_rect.set(overlay);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .title(Span::styled(
                " Confirm deletion ",
                Style::default()
                    .fg(theme::error())
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::error()));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let id = self.module.deleting_id().unwrap_or_default();
        let lines = vec![
            Line::from(Span::styled(
                format!(" Delete {} {id}? This cannot be undone.", self.spec.singular),
                Style::default().fg(theme::text()),
            )),
            Line::from(vec![
                Span::styled(" y", theme::key_hint_key()),
                Span::styled(" delete  ", theme::key_hint()),
                Span::styled("Esc", theme::key_hint_key()),
                Span::styled(" cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn parent_hint(&self) -> Option<String> {
        match self.spec.parent {
            Parent::None => None,
            Parent::Units => {
                let units = self.workspace.units.items();
                if units.is_empty() {
                    Some("no units yet".into())
                } else {
                    Some(format!(
                        "units: {}",
                        units
                            .iter()
                            .map(|u| format!("{} {}", u.id, u.name))
                            .collect::<Vec<_>>()
                            .join(" · ")
                    ))
                }
            }
            Parent::Rooms => {
                let rooms = self.workspace.rooms.items();
                if rooms.is_empty() {
                    Some("no rooms yet".into())
                } else {
                    Some(format!(
                        "rooms: {}",
                        rooms
                            .iter()
                            .map(|r| format!("{} {}", r.id, r.name))
                            .collect::<Vec<_>>()
                            .join(" · ")
                    ))
                }
            }
        }
    }
}

impl<R: Resource> Component for ResourceScreen<R> {
    fn on_activate(&mut self) {
        // Entering the section refreshes its list, like the original
        // section loader re-running the module's init.
        self.spawn_load();
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // ── Confirm modal captures input ────────────────────────
        if self.module.confirm_open() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    if !self.module.is_busy() {
                        self.spawn_confirm_delete();
                    }
                }
                KeyCode::Char('n') | KeyCode::Esc => self.module.close_confirm(),
                _ => {}
            }
            return Ok(None);
        }

        // ── Editor modal captures input ─────────────────────────
        if self.form.is_some() && self.module.editor_open() {
            return Ok(self.handle_form_key(key));
        }

        // ── Normal navigation ───────────────────────────────────
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('g') => self.table_state.select(Some(0)),
            KeyCode::Char('G') => {
                let len = self.module.items().len();
                if len > 0 {
                    self.table_state.select(Some(len - 1));
                }
            }
            KeyCode::Char('r') => self.spawn_load(),
            KeyCode::Char('a') => self.open_add(),
            KeyCode::Char('e') | KeyCode::Enter => self.open_edit(),
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_id() {
                    self.module.request_delete(id);
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        // A click outside an open modal's content area closes it.
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let click = Position::new(mouse.column, mouse.row);
            if self.module.confirm_open() && !self.confirm_rect.get().contains(click) {
                self.module.close_confirm();
            } else if self.module.editor_open()
                && self.form.is_some()
                && !self.editor_rect.get().contains(click)
            {
                self.module.close_editor();
                self.form = None;
            }
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                // A successful save closes the editor module-side; drop the
                // form with it. Failures keep both open.
                if self.form.is_some() && !self.module.editor_open() {
                    self.form = None;
                }
                // Keep the cursor inside the (fully replaced) list.
                let len = self.module.items().len();
                if len > 0 && self.selected_index() >= len {
                    self.table_state.select(Some(len - 1));
                }
            }
            Action::AddressResolved(addr) => {
                if let Some(form) = &mut self.form {
                    let street = addr.logradouro.as_deref().unwrap_or("-");
                    let district = addr.bairro.as_deref().unwrap_or("-");
                    let city = addr.cidade.as_deref().unwrap_or("-");
                    let state = addr.estado.as_deref().unwrap_or("-");
                    form.address_hint = Some(format!("{street}, {district} — {city}/{state}"));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(1), // stats
            Constraint::Min(1),    // table
            Constraint::Length(1), // hints
        ])
        .split(area);

        let items = self.module.items();

        // ── Stats line ──────────────────────────────────────────
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {}", (self.spec.stats_line)(&items)),
                Style::default().fg(theme::dim()),
            )),
            layout[0],
        );

        // ── Table (or empty state) ──────────────────────────────
        if items.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!(
                        " No {}s yet -- press 'a' to add the first one.",
                        self.spec.singular.to_lowercase()
                    ),
                    Style::default().fg(theme::dim()),
                )),
                layout[1],
            );
        } else {
            let mut header_cells = vec![TableCell::from("ID").style(theme::table_header())];
            header_cells.extend(
                R::columns()
                    .iter()
                    .map(|c| TableCell::from(*c).style(theme::table_header())),
            );
            let header = Row::new(header_cells);

            let rows: Vec<Row> = items
                .iter()
                .zip(render_rows(&items))
                .map(|(item, cells)| {
                    let mut all = vec![TableCell::from(item.id().to_string())];
                    all.extend(cells.into_iter().map(TableCell::from));
                    Row::new(all).style(theme::table_row())
                })
                .collect();

            let mut widths = vec![Constraint::Length(6)];
            widths.extend(std::iter::repeat_n(Constraint::Fill(1), R::columns().len()));

            let table = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(theme::table_selected());

            let mut state = self.table_state.clone();
            if state.selected().is_none() {
                state.select(Some(0));
            }
            frame.render_stateful_widget(table, layout[1], &mut state);
        }

        // ── Hints ───────────────────────────────────────────────
        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("a ", theme::key_hint_key()),
            Span::styled("add  ", theme::key_hint()),
            Span::styled("e ", theme::key_hint_key()),
            Span::styled("edit  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("delete  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("reload", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);

        // ── Overlays ────────────────────────────────────────────
        if self.module.confirm_open() {
            self.render_confirm(frame, area);
        } else if self.module.editor_open() {
            if let Some(form) = &self.form {
                self.render_editor(frame, area, form);
            }
        }
    }

    fn modal_active(&self) -> bool {
        self.module.confirm_open() || (self.form.is_some() && self.module.editor_open())
    }

    fn id(&self) -> &str {
        self.spec.id
    }
}

/// Center a `width` x `height` box inside `area`, clamped to fit.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_centers_inside_the_area() {
        let overlay = centered_rect(Rect::new(0, 0, 100, 40), 52, 12);
        assert_eq!((overlay.width, overlay.height), (52, 12));
        assert_eq!(overlay.x, 24);
        assert_eq!(overlay.y, 14);
    }

    #[test]
    fn centered_rect_clamps_to_small_terminals() {
        let overlay = centered_rect(Rect::new(2, 1, 10, 4), 52, 12);
        assert!(overlay.width <= 10);
        assert!(overlay.height <= 4);
        assert_eq!(overlay.x, 2);
    }
}
