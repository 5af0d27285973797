//! Form view: draws a [`Form`] as a centered dialog and turns key
//! presses into control edits.
//!
//! One row per form row, label column on the left, control on the right.
//! Spinner and path rows are edited through a `tui_input::Input` buffer
//! while focused; path edits go straight to the control, spinner text is
//! parsed and clamped when focus leaves the row or the dialog is accepted.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tui_input::{Input, InputRequest};

use devconf_core::{Control, DialogOutcome, Form, FormRow, Spinner};

use crate::theme;

const PANEL_WIDTH: u16 = 72;

#[derive(Debug, Default)]
pub struct FormView {
    focus: usize,
    editor: Option<Input>,
}

impl FormView {
    pub fn new(form: &Form) -> Self {
        let mut view = Self::default();
        view.load_editor(form);
        view
    }

    #[cfg(test)]
    pub fn focus(&self) -> usize {
        self.focus
    }

    // ── Editing ──────────────────────────────────────────────────────

    /// Apply one key press. Returns how the dialog ends, if it does.
    pub fn handle_key(&mut self, form: &mut Form, key: KeyEvent) -> Option<DialogOutcome> {
        match key.code {
            KeyCode::Esc => return Some(DialogOutcome::Cancelled),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(DialogOutcome::Cancelled);
            }
            KeyCode::Enter => {
                self.apply_editor(form);
                return Some(DialogOutcome::Accepted);
            }
            KeyCode::Tab | KeyCode::Down => self.move_focus(form, true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(form, false),
            _ => self.edit_focused(form, key),
        }
        None
    }

    fn move_focus(&mut self, form: &mut Form, forward: bool) {
        let len = form.len();
        if len == 0 {
            return;
        }
        self.apply_editor(form);
        self.focus = if forward {
            (self.focus + 1) % len
        } else {
            (self.focus + len - 1) % len
        };
        self.load_editor(form);
    }

    /// Seed the edit buffer from the focused row.
    fn load_editor(&mut self, form: &Form) {
        self.editor = form.row(self.focus).and_then(|row| match &row.control {
            Control::Spinner(spinner) => Some(Input::new(spinner.value().to_string())),
            Control::Path(path) => Some(Input::new(path.path().to_owned())),
            Control::Toggle(_) | Control::Choice(_) => None,
        });
    }

    /// Flush the edit buffer into the focused control. Unparsable spinner
    /// text is dropped and the buffer reloaded from the control.
    fn apply_editor(&mut self, form: &mut Form) {
        let Some(editor) = self.editor.as_ref() else {
            return;
        };
        let Some(row) = form.row_mut(self.focus) else {
            return;
        };
        match &mut row.control {
            Control::Spinner(spinner) => {
                if let Ok(value) = editor.value().trim().parse::<i64>() {
                    spinner.set_value(value);
                }
                self.editor = Some(Input::new(spinner.value().to_string()));
            }
            Control::Path(path) => path.set_path(editor.value()),
            Control::Toggle(_) | Control::Choice(_) => {}
        }
    }

    fn edit_focused(&mut self, form: &mut Form, key: KeyEvent) {
        let Some(row) = form.row_mut(self.focus) else {
            return;
        };
        match &mut row.control {
            Control::Toggle(toggle) => {
                if matches!(
                    key.code,
                    KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right
                ) {
                    toggle.toggle();
                }
            }
            Control::Choice(list) => match key.code {
                KeyCode::Left | KeyCode::Char('h') => list.select_prev(),
                KeyCode::Right | KeyCode::Char('l' | ' ') => list.select_next(),
                _ => {}
            },
            Control::Spinner(spinner) => {
                let step: Option<fn(&mut Spinner)> = match key.code {
                    KeyCode::Left => Some(Spinner::step_down),
                    KeyCode::Right => Some(Spinner::step_up),
                    _ => None,
                };
                if let Some(step) = step {
                    let typed = self
                        .editor
                        .as_ref()
                        .and_then(|e| e.value().trim().parse().ok());
                    if let Some(value) = typed {
                        spinner.set_value(value);
                    }
                    step(spinner);
                    self.editor = Some(Input::new(spinner.value().to_string()));
                    return;
                }
                if let Some(editor) = self.editor.as_mut() {
                    if let Some(request) = Self::spinner_request(editor, key.code) {
                        editor.handle(request);
                    }
                }
            }
            Control::Path(path) => {
                let request = match key.code {
                    KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        Some(InputRequest::DeleteLine)
                    }
                    KeyCode::Char(c) => Some(InputRequest::InsertChar(c)),
                    KeyCode::Backspace => Some(InputRequest::DeletePrevChar),
                    KeyCode::Delete => Some(InputRequest::DeleteNextChar),
                    KeyCode::Left => Some(InputRequest::GoToPrevChar),
                    KeyCode::Right => Some(InputRequest::GoToNextChar),
                    KeyCode::Home => Some(InputRequest::GoToStart),
                    KeyCode::End => Some(InputRequest::GoToEnd),
                    _ => None,
                };
                if let (Some(request), Some(editor)) = (request, self.editor.as_mut()) {
                    editor.handle(request);
                    path.set_path(editor.value());
                }
            }
        }
    }

    /// Digits anywhere, a minus sign only in front of the number.
    fn spinner_request(editor: &Input, code: KeyCode) -> Option<InputRequest> {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => Some(InputRequest::InsertChar(c)),
            KeyCode::Char('-') if editor.cursor() == 0 && !editor.value().starts_with('-') => {
                Some(InputRequest::InsertChar('-'))
            }
            KeyCode::Backspace => Some(InputRequest::DeletePrevChar),
            KeyCode::Delete => Some(InputRequest::DeleteNextChar),
            KeyCode::Home => Some(InputRequest::GoToStart),
            KeyCode::End => Some(InputRequest::GoToEnd),
            _ => None,
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, form: &Form) {
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            area,
        );

        let inner = Self::render_panel(frame, area, form);

        let layout = Layout::vertical([
            Constraint::Length(1), // spacer
            Constraint::Min(1),    // rows
            Constraint::Length(1), // detail
            Constraint::Length(1), // hints
        ])
        .split(inner);

        if form.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "This device has no configurable settings.",
                    theme::label_default(),
                ))
                .alignment(Alignment::Center),
                layout[1],
            );
        } else {
            self.render_rows(frame, layout[1], form);
        }

        self.render_detail(frame, layout[2], form);
        self.render_key_hints(frame, layout[3], form);
    }

    fn render_panel(frame: &mut Frame, area: Rect, form: &Form) -> Rect {
        let rows = u16::try_from(form.len()).unwrap_or(u16::MAX);
        let panel_w = PANEL_WIDTH.min(area.width.saturating_sub(4));
        let panel_h = rows
            .saturating_add(6)
            .min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(panel_w)) / 2;
        let y = (area.height.saturating_sub(panel_h)) / 2;
        let panel = Rect::new(area.x + x, area.y + y, panel_w, panel_h);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(form.title().to_owned(), theme::title_style()),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(panel);
        frame.render_widget(block, panel);
        inner
    }

    fn render_rows(&self, frame: &mut Frame, area: Rect, form: &Form) {
        let visible = usize::from(area.height).max(1);
        let first = (self.focus + 1).saturating_sub(visible);

        let widest = form
            .rows()
            .map(|r| r.label.chars().count())
            .max()
            .unwrap_or(0);
        let label_w = u16::try_from(widest + 4)
            .unwrap_or(u16::MAX)
            .min(area.width / 2);

        let rows = form.rows().enumerate().skip(first).take(visible);
        for ((index, row), y) in rows.zip(area.y..) {
            let active = index == self.focus;
            let label_area = Rect::new(area.x, y, label_w, 1);
            let value_area = Rect::new(
                area.x + label_w,
                y,
                area.width.saturating_sub(label_w),
                1,
            );

            let label_style = if active {
                theme::label_active()
            } else {
                theme::label_default()
            };
            frame.render_widget(
                Paragraph::new(Span::styled(format!("  {}", row.label), label_style)),
                label_area,
            );

            let editor = if active { self.editor.as_ref() } else { None };
            let mut value = Paragraph::new(Self::value_line(row, active, editor));
            if let (Some(editor), Control::Path(_)) = (editor, &row.control) {
                let width = usize::from(value_area.width.saturating_sub(1));
                let scroll = u16::try_from(editor.visual_scroll(width)).unwrap_or(0);
                value = value.scroll((0, scroll));
            }
            frame.render_widget(value, value_area);
        }
    }

    fn value_line(row: &FormRow, active: bool, editor: Option<&Input>) -> Line<'static> {
        let marker = if active {
            theme::marker_active()
        } else {
            theme::marker_off()
        };
        let value_style = if active {
            theme::value_active()
        } else {
            theme::value_default()
        };

        match &row.control {
            Control::Toggle(toggle) => {
                let (text, style) = match (toggle.is_checked(), active) {
                    (true, true) => ("[\u{2713}]", marker),
                    (true, false) => ("[\u{2713}]", theme::marker_on()),
                    (false, _) => ("[ ]", marker),
                };
                Line::from(Span::styled(text, style))
            }
            Control::Choice(list) => {
                let selected = match list.selected() {
                    Some(entry) => Span::styled(entry.label.clone(), value_style),
                    None => Span::styled("(none)", theme::placeholder()),
                };
                Line::from(vec![
                    Span::styled("\u{25C2} ", marker),
                    selected,
                    Span::styled(" \u{25B8}", marker),
                ])
            }
            Control::Spinner(spinner) => {
                let mut spans = vec![Span::styled("\u{25C2} ", marker)];
                match editor {
                    Some(editor) => spans.extend(Self::editor_spans(editor, value_style)),
                    None => spans.push(Span::styled(spinner.value().to_string(), value_style)),
                }
                spans.push(Span::styled(" \u{25B8}", marker));
                Line::from(spans)
            }
            Control::Path(path) => match editor {
                Some(editor) => Line::from(Self::editor_spans(editor, value_style)),
                None if path.path().is_empty() => {
                    Line::from(Span::styled("(none)", theme::placeholder()))
                }
                None => Line::from(Span::styled(path.path().to_owned(), value_style)),
            },
        }
    }

    /// Buffer text with the character under the cursor highlighted.
    fn editor_spans(editor: &Input, style: Style) -> Vec<Span<'static>> {
        let value = editor.value();
        let cursor = editor.cursor();
        let before: String = value.chars().take(cursor).collect();
        let at = value
            .chars()
            .nth(cursor)
            .map_or_else(|| " ".to_owned(), String::from);
        let after: String = value.chars().skip(cursor + 1).collect();
        vec![
            Span::styled(before, style),
            Span::styled(at, theme::cursor()),
            Span::styled(after, style),
        ]
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, form: &Form) {
        let Some(row) = form.row(self.focus) else {
            return;
        };
        let detail = match &row.control {
            Control::Spinner(spinner) => format!(
                "Range {}..{}, step {}",
                spinner.min(),
                spinner.max(),
                spinner.step()
            ),
            Control::Path(path) if path.creates_file() => {
                format!("{} (a new file may be named)", path.filter())
            }
            Control::Path(path) => path.filter().to_owned(),
            Control::Choice(list) if list.selected().is_none() => {
                "No choice selected: the default is saved unless one is picked".to_owned()
            }
            Control::Choice(_) | Control::Toggle(_) => return,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(detail, theme::key_hint()))
                .alignment(Alignment::Center),
            area,
        );
    }

    fn render_key_hints(&self, frame: &mut Frame, area: Rect, form: &Form) {
        let hints = match form.row(self.focus).map(|row| &row.control) {
            Some(Control::Toggle(_)) => "Space toggle  Tab next  Enter save  Esc cancel",
            Some(Control::Choice(_)) => {
                "\u{25C2}/\u{25B8} select  Tab next  Enter save  Esc cancel"
            }
            Some(Control::Spinner(_)) => {
                "\u{25C2}/\u{25B8} step  0-9 type  Tab next  Enter save  Esc cancel"
            }
            Some(Control::Path(_)) => "Type path  Ctrl+U clear  Tab next  Enter save  Esc cancel",
            None => "Enter close  Esc cancel",
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hints, theme::key_hint()))
                .alignment(Alignment::Center),
            area,
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use devconf_core::{
        Choice, ControlValue, DeviceContext, DeviceSchema, FieldDescriptor, MemoryStore, walker,
    };
    use pretty_assertions::assert_eq;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::catalog;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(view: &mut FormView, form: &mut Form, text: &str) {
        for c in text.chars() {
            assert_eq!(view.handle_key(form, key(KeyCode::Char(c))), None);
        }
    }

    /// Form for the ROM board: address (choice), ROM image (path),
    /// size (spinner 8..64 step 8, default 32), writable (toggle).
    fn rom_board_form(store: &MemoryStore) -> Form {
        let ctx = DeviceContext::named(catalog::ROM_BOARD.name);
        walker::build_form("ROM", &catalog::ROM_BOARD.schema, &ctx, store)
    }

    fn screen_lines(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn toggle_and_choice_scenario() {
        const MODES: &[Choice] = &[
            Choice::new("Fast", 0),
            Choice::new("Slow", 1),
            Choice::END,
        ];
        static FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::binary("enabled", "Enabled", false),
            FieldDescriptor::selection("mode", "Mode", MODES, 0),
            FieldDescriptor::END,
        ];

        let store = MemoryStore::new();
        let ctx = DeviceContext::named("Scenario");
        let mut form = walker::build_form("t", &DeviceSchema::new(FIELDS), &ctx, &store);
        let mut view = FormView::new(&form);

        assert_eq!(view.handle_key(&mut form, key(KeyCode::Char(' '))), None);
        assert_eq!(view.handle_key(&mut form, key(KeyCode::Down)), None);
        assert_eq!(view.handle_key(&mut form, key(KeyCode::Right)), None);
        assert_eq!(
            view.handle_key(&mut form, key(KeyCode::Enter)),
            Some(DialogOutcome::Accepted)
        );

        assert_eq!(
            form.control("enabled").unwrap().value(),
            ControlValue::Flag(true)
        );
        assert_eq!(
            form.control("mode").unwrap().value(),
            ControlValue::Selection(Some(1))
        );
    }

    #[test]
    fn escape_and_ctrl_c_cancel() {
        let mut form = rom_board_form(&MemoryStore::new());
        let mut view = FormView::new(&form);
        assert_eq!(
            view.handle_key(&mut form, key(KeyCode::Esc)),
            Some(DialogOutcome::Cancelled)
        );
        assert_eq!(
            view.handle_key(
                &mut form,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            ),
            Some(DialogOutcome::Cancelled)
        );
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = rom_board_form(&MemoryStore::new());
        let mut view = FormView::new(&form);
        view.handle_key(&mut form, key(KeyCode::BackTab));
        assert_eq!(view.focus(), 3);
        view.handle_key(&mut form, key(KeyCode::Tab));
        assert_eq!(view.focus(), 0);
    }

    #[test]
    fn path_edits_write_through() {
        let mut form = rom_board_form(&MemoryStore::new());
        let mut view = FormView::new(&form);
        view.handle_key(&mut form, key(KeyCode::Down));
        type_text(&mut view, &mut form, "roms/board.bin");
        assert_eq!(
            form.control("bios_fn").unwrap().value(),
            ControlValue::Path("roms/board.bin".into())
        );

        view.handle_key(&mut form, key(KeyCode::Home));
        type_text(&mut view, &mut form, "/");
        view.handle_key(&mut form, key(KeyCode::End));
        view.handle_key(&mut form, key(KeyCode::Backspace));
        assert_eq!(
            form.control("bios_fn").unwrap().value(),
            ControlValue::Path("/roms/board.bi".into())
        );

        view.handle_key(
            &mut form,
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
        );
        assert_eq!(
            form.control("bios_fn").unwrap().value(),
            ControlValue::Path(String::new())
        );
    }

    #[test]
    fn spinner_steps_and_typed_values_clamp() {
        let mut form = rom_board_form(&MemoryStore::new());
        let mut view = FormView::new(&form);
        view.handle_key(&mut form, key(KeyCode::Down));
        view.handle_key(&mut form, key(KeyCode::Down));
        assert_eq!(view.focus(), 2);

        view.handle_key(&mut form, key(KeyCode::Right));
        assert_eq!(form.control("size").unwrap().value(), ControlValue::Int(40));

        view.handle_key(&mut form, key(KeyCode::Backspace));
        view.handle_key(&mut form, key(KeyCode::Backspace));
        type_text(&mut view, &mut form, "99");
        // Typed text is applied when focus leaves the row.
        assert_eq!(form.control("size").unwrap().value(), ControlValue::Int(40));
        view.handle_key(&mut form, key(KeyCode::Tab));
        assert_eq!(form.control("size").unwrap().value(), ControlValue::Int(64));

        view.handle_key(&mut form, key(KeyCode::BackTab));
        view.handle_key(&mut form, key(KeyCode::Backspace));
        view.handle_key(&mut form, key(KeyCode::Backspace));
        type_text(&mut view, &mut form, "16");
        assert_eq!(
            view.handle_key(&mut form, key(KeyCode::Enter)),
            Some(DialogOutcome::Accepted)
        );
        assert_eq!(form.control("size").unwrap().value(), ControlValue::Int(16));
    }

    #[test]
    fn spinner_ignores_letters_and_empty_text() {
        let mut form = rom_board_form(&MemoryStore::new());
        let mut view = FormView::new(&form);
        view.handle_key(&mut form, key(KeyCode::Down));
        view.handle_key(&mut form, key(KeyCode::Down));
        type_text(&mut view, &mut form, "abc");
        view.handle_key(&mut form, key(KeyCode::Backspace));
        view.handle_key(&mut form, key(KeyCode::Backspace));
        view.handle_key(&mut form, key(KeyCode::Tab));
        assert_eq!(form.control("size").unwrap().value(), ControlValue::Int(32));
    }

    #[test]
    fn spinner_accepts_a_leading_minus() {
        static OFFSET: &[FieldDescriptor] =
            &[FieldDescriptor::spinner("offset", "Offset", -10, 10, 1, 3)];
        let ctx = DeviceContext::named("Offset Card");
        let store = MemoryStore::new();
        let mut form = walker::build_form("t", &DeviceSchema::new(OFFSET), &ctx, &store);
        let mut view = FormView::new(&form);

        view.handle_key(&mut form, key(KeyCode::Backspace));
        type_text(&mut view, &mut form, "5");
        view.handle_key(&mut form, key(KeyCode::Home));
        type_text(&mut view, &mut form, "-");
        // A second minus is ignored.
        type_text(&mut view, &mut form, "-");
        assert_eq!(
            view.handle_key(&mut form, key(KeyCode::Enter)),
            Some(DialogOutcome::Accepted)
        );
        assert_eq!(
            form.control("offset").unwrap().value(),
            ControlValue::Int(-5)
        );

        // Left and Right step; the minus key only edits.
        view.handle_key(&mut form, key(KeyCode::Left));
        assert_eq!(
            form.control("offset").unwrap().value(),
            ControlValue::Int(-6)
        );
        view.handle_key(&mut form, key(KeyCode::Right));
        view.handle_key(&mut form, key(KeyCode::Right));
        assert_eq!(
            form.control("offset").unwrap().value(),
            ControlValue::Int(-4)
        );
    }

    #[test]
    fn choice_without_selection_cycles_into_list() {
        let mut store = MemoryStore::new();
        store.insert(catalog::ROM_BOARD.name, "bios_addr", 0x12345);
        let mut form = rom_board_form(&store);
        let mut view = FormView::new(&form);
        assert_eq!(
            form.control("bios_addr").unwrap().value(),
            ControlValue::Selection(None)
        );
        view.handle_key(&mut form, key(KeyCode::Left));
        assert_eq!(
            form.control("bios_addr").unwrap().value(),
            ControlValue::Selection(Some(0xE0000))
        );
    }

    #[test]
    fn empty_form_only_closes() {
        let mut form = Form::new("Empty");
        let mut view = FormView::new(&form);
        assert_eq!(view.handle_key(&mut form, key(KeyCode::Tab)), None);
        assert_eq!(view.handle_key(&mut form, key(KeyCode::Char('x'))), None);
        assert_eq!(
            view.handle_key(&mut form, key(KeyCode::Enter)),
            Some(DialogOutcome::Accepted)
        );
    }

    #[test]
    fn renders_title_and_rows_in_order() {
        let form = rom_board_form(&MemoryStore::new());
        let view = FormView::new(&form);
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                view.render(frame, area, &form);
            })
            .unwrap();

        let lines = screen_lines(&terminal);
        let screen = lines.join("\n");
        assert!(screen.contains(" ROM "), "{screen}");

        let position = |needle: &str| {
            lines
                .iter()
                .position(|l| l.contains(needle))
                .unwrap_or_else(|| panic!("{needle} not rendered:\n{screen}"))
        };
        let rows = [
            position("Address"),
            position("ROM image"),
            position("Size (KB)"),
            position("Writable (flash)"),
        ];
        assert!(rows.windows(2).all(|w| w[0] < w[1]), "{rows:?}");
        assert!(lines[rows[0]].contains("D000"));
        assert!(lines[rows[3]].contains("[ ]"));
        assert!(screen.contains("Enter save"));
    }

    #[test]
    fn renders_empty_form_message() {
        let form = Form::new("PC Speaker Device Configuration");
        let view = FormView::new(&form);
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                view.render(frame, area, &form);
            })
            .unwrap();
        let screen = screen_lines(&terminal).join("\n");
        assert!(screen.contains("no configurable settings"), "{screen}");
    }
}
