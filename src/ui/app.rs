use std::mem;
use std::path::Path;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row as TableRow, Table,
    TableState, Wrap,
};
use ratatui::Frame;
use tracing::debug;

use crate::config::DEFAULT_FILE;
use crate::models::LoadReport;
use crate::store::{RowStore, StoreError};

use super::forms::{
    parse_filename, parse_index, parse_row, ConfirmRowDelete, PromptForm, PromptKind,
};
use super::helpers::{centered_rect, join_fields, surface_error};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 4;
/// Height of the title/author banner above the list.
const BANNER_HEIGHT: u16 = 3;
/// Width of the synthetic index column in the pretty table.
const INDEX_COLUMN_WIDTH: u16 = 5;

/// How the rows are rendered on the main screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum View {
    /// Boxed table with headers and padded cells.
    Pretty,
    /// `line i: [...]` listing.
    Plain,
}

/// Fine-grained modes layered over the main screen.
enum Mode {
    Normal,
    Prompt(PromptForm),
    ConfirmDelete(ConfirmRowDelete),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Menu collaborator: turns keystrokes and typed input into row store calls
/// and keeps the last outcome for the footer.
pub struct App {
    store: RowStore,
    selected: usize,
    view: View,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(store: RowStore) -> Self {
        Self {
            store,
            selected: 0,
            view: View::Pretty,
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn store(&self) -> &RowStore {
        &self.store
    }

    /// Load `path` into the store and report the outcome in the footer. A
    /// failed load leaves the current rows in place.
    pub fn load_file(&mut self, path: &Path) {
        match self.store.load(path) {
            Ok(report) => self.report_loaded(&report),
            Err(err) => self.set_status(err.to_string(), StatusKind::Error),
        }
    }

    /// Dispatch one key press. Returns `true` when the user asked to exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Prompt(form) => self.handle_prompt(code, form)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        let selected = self.selected.to_string();
        let mode = match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
                Mode::Normal
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Mode::Normal
            }
            KeyCode::Down => {
                if self.selected + 1 < self.store.len() {
                    self.selected += 1;
                }
                Mode::Normal
            }
            KeyCode::Char('a') => Mode::Prompt(PromptForm::new(PromptKind::AddRow)),
            KeyCode::Char('d') => {
                Mode::Prompt(PromptForm::with_input(PromptKind::DeleteIndex, selected))
            }
            KeyCode::Char('e') => {
                Mode::Prompt(PromptForm::with_input(PromptKind::UpdateIndex, selected))
            }
            KeyCode::Char('s') => {
                Mode::Prompt(PromptForm::with_input(PromptKind::Save, self.suggested_file()))
            }
            KeyCode::Char('l') => {
                Mode::Prompt(PromptForm::with_input(PromptKind::Load, self.suggested_file()))
            }
            KeyCode::Char('x') => {
                self.export();
                Mode::Normal
            }
            KeyCode::Char('p') => {
                self.view = match self.view {
                    View::Pretty => View::Plain,
                    View::Plain => View::Pretty,
                };
                Mode::Normal
            }
            KeyCode::Char('c') => Mode::Prompt(PromptForm::new(PromptKind::SumColumn)),
            KeyCode::Char('m') => {
                let (rows, cols) = self.store.dimensions();
                self.set_status(
                    format!("List dimensions: {rows} rows x {cols} columns"),
                    StatusKind::Info,
                );
                Mode::Normal
            }
            KeyCode::Char('t') => Mode::Prompt(PromptForm::with_input(
                PromptKind::RenameTitle,
                self.store.title(),
            )),
            KeyCode::Char('u') => Mode::Prompt(PromptForm::with_input(
                PromptKind::RenameAuthor,
                self.store.author(),
            )),
            _ => Mode::Normal,
        };
        Ok(mode)
    }

    fn handle_prompt(&mut self, code: KeyCode, mut form: PromptForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status(format!("{} cancelled.", form.kind.title()), StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Backspace => {
                form.backspace();
                Ok(Mode::Prompt(form))
            }
            KeyCode::Enter => match self.submit_prompt(&form) {
                Ok(next) => Ok(next),
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                    Ok(Mode::Prompt(form))
                }
            },
            KeyCode::Char(ch) => {
                form.push_char(ch);
                Ok(Mode::Prompt(form))
            }
            _ => Ok(Mode::Prompt(form)),
        }
    }

    /// Parse the prompt input and run the matching store operation. Errors
    /// keep the prompt open so the user can correct the input.
    fn submit_prompt(&mut self, form: &PromptForm) -> Result<Mode> {
        debug!(prompt = ?form.kind, "prompt submitted");
        match &form.kind {
            PromptKind::AddRow => {
                self.store.add(parse_row(&form.input));
                self.selected = self.store.len() - 1;
                self.set_status(
                    format!("Added line {}.", self.selected),
                    StatusKind::Info,
                );
            }
            PromptKind::DeleteIndex => {
                let index = parse_index(&form.input)?;
                let row = self.store.row(index).ok_or(StoreError::IndexOutOfRange {
                    index,
                    len: self.store.len(),
                })?;
                return Ok(Mode::ConfirmDelete(ConfirmRowDelete {
                    index,
                    preview: join_fields(row),
                }));
            }
            PromptKind::UpdateIndex => {
                let index = parse_index(&form.input)?;
                let row = self.store.row(index).ok_or(StoreError::IndexOutOfRange {
                    index,
                    len: self.store.len(),
                })?;
                return Ok(Mode::Prompt(PromptForm::with_input(
                    PromptKind::UpdateRow { index },
                    join_fields(row),
                )));
            }
            PromptKind::UpdateRow { index } => {
                self.store.update(*index, parse_row(&form.input))?;
                self.selected = *index;
                self.set_status(format!("Updated line {index}."), StatusKind::Info);
            }
            PromptKind::Save => {
                let filename = parse_filename(&form.input)?;
                self.store.save(filename)?;
                self.set_status(format!("List saved to {filename}"), StatusKind::Info);
            }
            PromptKind::Load => {
                let filename = parse_filename(&form.input)?;
                let report = self.store.load(filename)?;
                self.report_loaded(&report);
            }
            PromptKind::SumColumn => {
                let column = parse_index(&form.input)?;
                let sum = self.store.sum_column(column)?;
                self.set_status(sum.to_string(), StatusKind::Info);
            }
            PromptKind::RenameTitle => {
                self.store.set_title(form.input.trim());
                self.set_status(
                    format!("List name changed to: {}", self.store.title()),
                    StatusKind::Info,
                );
            }
            PromptKind::RenameAuthor => {
                self.store.set_author(form.input.trim());
                self.set_status(
                    format!("Author changed to: {}", self.store.author()),
                    StatusKind::Info,
                );
            }
        }
        Ok(Mode::Normal)
    }

    fn handle_confirm_delete(
        &mut self,
        code: KeyCode,
        confirm: ConfirmRowDelete,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.store.delete(confirm.index) {
                    Ok(_) => {
                        self.clamp_selection();
                        self.set_status(
                            format!("Deleted line {}.", confirm.index),
                            StatusKind::Info,
                        );
                    }
                    Err(err) => self.set_status(err.to_string(), StatusKind::Error),
                }
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    fn export(&mut self) {
        match self.store.export() {
            Ok(path) => self.set_status(
                format!("Data exported to {} successfully.", path.display()),
                StatusKind::Info,
            ),
            Err(err) => self.set_status(err.to_string(), StatusKind::Error),
        }
    }

    /// Reset the selection and echo what a successful load found.
    fn report_loaded(&mut self, report: &LoadReport) {
        self.selected = 0;
        self.set_status(
            format!(
                "{} List Name: {} | Author: {}",
                report.summary(),
                self.store.title(),
                self.store.author()
            ),
            StatusKind::Info,
        );
    }

    /// Prefill for save/load prompts: the active file, else the default name.
    fn suggested_file(&self) -> String {
        self.store
            .active_file()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| DEFAULT_FILE.to_string())
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.store.len() {
            self.selected = self.store.len().saturating_sub(1);
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        self.draw_list(frame, content_area);

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::Prompt(form) => self.draw_prompt(frame, area, form),
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Normal => {}
        }
    }

    fn draw_list(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(BANNER_HEIGHT), Constraint::Min(0)])
            .split(area);

        let file = self
            .store
            .active_file()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "(none)".to_string());
        let banner = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("List Name: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(self.store.title().to_string()),
                Span::raw("   "),
                Span::styled("Author: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(self.store.author().to_string()),
            ]),
            Line::from(Span::styled(
                format!("File: {file}"),
                Style::default().fg(Color::Gray),
            )),
        ])
        .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(banner, chunks[0]);

        if self.store.is_empty() {
            let message = Paragraph::new("The list is empty. Press 'a' to add a line.")
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(message, chunks[1]);
            return;
        }

        match self.view {
            View::Pretty => self.draw_table(frame, chunks[1]),
            View::Plain => self.draw_plain(frame, chunks[1]),
        }
    }

    fn draw_table(&self, frame: &mut Frame, area: Rect) {
        let header = TableRow::new(self.store.pretty_header().into_iter().map(Cell::from))
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = self
            .store
            .pretty_rows()
            .into_iter()
            .map(|cells| TableRow::new(cells.into_iter().map(Cell::from)));

        let widths = std::iter::once(Constraint::Length(INDEX_COLUMN_WIDTH)).chain(
            self.store
                .column_headers()
                .iter()
                .map(|_| Constraint::Fill(1)),
        );

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL))
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = TableState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_plain(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .store
            .display_lines()
            .into_iter()
            .map(ListItem::new)
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph =
            Paragraph::new(vec![status_line, self.footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let text = match self.mode {
            Mode::Normal => {
                "a add • d delete • e update • s save • l load • x export • p pretty/plain • \
                 c sum • m dimensions • t list name • u author • q quit"
            }
            Mode::Prompt(_) => "Enter to submit • Esc to cancel",
            Mode::ConfirmDelete(_) => "y to delete • n to keep",
        };
        Line::from(Span::styled(text, Style::default().fg(Color::Gray)))
    }

    fn draw_prompt(&self, frame: &mut Frame, area: Rect, form: &PromptForm) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let title = form.kind.title();
        let block = Block::default().title(title.as_str()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let label = form.kind.label(self.store.config().max_columns);
        let mut lines = vec![form.build_line(&label), Line::from("")];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let prefix = label.chars().count() as u16 + 2;
        let cursor_x = (inner.x + prefix + form.value_len() as u16)
            .min(inner.x + inner.width.saturating_sub(1));
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmRowDelete) {
        let popup_area = centered_rect(50, 25, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Delete Line").borders(Borders::ALL);
        let paragraph = Paragraph::new(vec![
            Line::from(format!("Delete line {}?", confirm.index)),
            Line::from(Span::styled(
                confirm.preview.clone(),
                Style::default().fg(Color::Yellow),
            )),
            Line::from(""),
            Line::from("y to delete • n to keep"),
        ])
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::store::test_support::row;

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
    }

    fn clear_input(app: &mut App) {
        for _ in 0..64 {
            app.handle_key(KeyCode::Backspace).unwrap();
        }
    }

    fn status_text(app: &App) -> &str {
        app.status.as_ref().map(|s| s.text.as_str()).unwrap_or("")
    }

    #[test]
    fn add_prompt_appends_parsed_row() {
        let mut app = App::new(RowStore::default());
        app.handle_key(KeyCode::Char('a')).unwrap();
        type_text(&mut app, "2024-01-01, Widget ,2,5,10,extra");
        app.handle_key(KeyCode::Enter).unwrap();

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(
            app.store().rows(),
            &[row(&["2024-01-01", "Widget", "2", "5", "10"])]
        );
        assert_eq!(status_text(&app), "Added line 0.");
    }

    #[test]
    fn delete_asks_for_confirmation() {
        let mut app = App::new(RowStore::with_rows(
            Default::default(),
            vec![row(&["a"]), row(&["b"])],
        ));
        app.handle_key(KeyCode::Char('d')).unwrap();
        clear_input(&mut app);
        type_text(&mut app, "1");
        app.handle_key(KeyCode::Enter).unwrap();
        assert!(matches!(app.mode, Mode::ConfirmDelete(_)));

        app.handle_key(KeyCode::Char('y')).unwrap();

        assert_eq!(app.store().rows(), &[row(&["a"])]);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn out_of_range_index_keeps_prompt_open() {
        let mut app = App::new(RowStore::with_rows(Default::default(), vec![row(&["a"])]));
        app.handle_key(KeyCode::Char('d')).unwrap();
        clear_input(&mut app);
        type_text(&mut app, "4");
        app.handle_key(KeyCode::Enter).unwrap();

        match &app.mode {
            Mode::Prompt(form) => assert!(form.error.as_deref().unwrap().contains("out of range")),
            _ => panic!("prompt should stay open"),
        }
        assert_eq!(app.store().len(), 1);
    }

    #[test]
    fn update_prefills_current_row() {
        let mut app = App::new(RowStore::with_rows(
            Default::default(),
            vec![row(&["2024-01-01", "Widget"])],
        ));
        app.handle_key(KeyCode::Char('e')).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();

        match &app.mode {
            Mode::Prompt(form) => {
                assert_eq!(form.kind, PromptKind::UpdateRow { index: 0 });
                assert_eq!(form.input, "2024-01-01, Widget");
            }
            _ => panic!("expected row prompt"),
        }

        type_text(&mut app, ", 3");
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.store().rows()[0], row(&["2024-01-01", "Widget", "3"]));
    }

    #[test]
    fn sum_and_dimensions_report_in_footer() {
        let mut app = App::new(RowStore::with_rows(
            Default::default(),
            vec![
                row(&["2024-01-01", "X", "3", "10.5"]),
                row(&["2024-01-02", "Y", "bad", "5"]),
            ],
        ));
        app.handle_key(KeyCode::Char('c')).unwrap();
        type_text(&mut app, "2");
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(
            status_text(&app),
            "Sum of column 2: 3 (1 non-numeric value(s) were skipped)"
        );

        app.handle_key(KeyCode::Char('m')).unwrap();
        assert_eq!(status_text(&app), "List dimensions: 2 rows x 5 columns");
    }

    #[test]
    fn export_without_file_is_an_error_status() {
        let mut app = App::new(RowStore::with_rows(Default::default(), vec![row(&["a"])]));
        app.handle_key(KeyCode::Char('x')).unwrap();
        let status = app.status.as_ref().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.starts_with("No CSV file has been loaded or saved"));
    }

    #[test]
    fn save_prompt_then_load_prompt_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("menu.csv");
        let path_text = path.display().to_string();

        let mut app = App::new(RowStore::with_rows(Default::default(), vec![row(&["a", "1"])]));
        app.handle_key(KeyCode::Char('t')).unwrap();
        clear_input(&mut app);
        type_text(&mut app, "Renamed");
        app.handle_key(KeyCode::Enter).unwrap();

        app.handle_key(KeyCode::Char('s')).unwrap();
        clear_input(&mut app);
        type_text(&mut app, &path_text);
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(status_text(&app), format!("List saved to {path_text}"));

        let mut fresh = App::new(RowStore::default());
        fresh.load_file(&path);
        assert_eq!(fresh.store().title(), "Renamed");
        assert_eq!(fresh.store().rows(), &[row(&["a", "1"])]);
    }

    #[test]
    fn load_prompt_and_start_up_load_report_alike() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shared.csv");
        let mut source = RowStore::with_rows(Default::default(), vec![row(&["a"])]);
        source.set_title("Shop");
        source.set_author("Ana");
        source.save(&path).unwrap();

        let mut started = App::new(RowStore::default());
        started.load_file(&path);

        let mut prompted = App::new(RowStore::default());
        prompted.handle_key(KeyCode::Char('l')).unwrap();
        clear_input(&mut prompted);
        type_text(&mut prompted, &path.display().to_string());
        prompted.handle_key(KeyCode::Enter).unwrap();

        assert_eq!(
            status_text(&prompted),
            "Loaded 1 row(s). List Name: Shop | Author: Ana"
        );
        assert_eq!(status_text(&prompted), status_text(&started));
    }

    #[test]
    fn escape_cancels_prompt_and_quit_exits() {
        let mut app = App::new(RowStore::default());
        app.handle_key(KeyCode::Char('u')).unwrap();
        assert!(!app.handle_key(KeyCode::Esc).unwrap());
        assert!(matches!(app.mode, Mode::Normal));
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
    }

    #[test]
    fn p_toggles_view() {
        let mut app = App::new(RowStore::default());
        app.handle_key(KeyCode::Char('p')).unwrap();
        assert_eq!(app.view, View::Plain);
        app.handle_key(KeyCode::Char('p')).unwrap();
        assert_eq!(app.view, View::Pretty);
    }
}
