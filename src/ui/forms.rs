use anyhow::{anyhow, Context, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::Row;

/// What a single-line prompt collects. Each variant maps to one row store
/// operation once the input parses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PromptKind {
    AddRow,
    DeleteIndex,
    UpdateIndex,
    UpdateRow { index: usize },
    Save,
    Load,
    SumColumn,
    RenameTitle,
    RenameAuthor,
}

impl PromptKind {
    /// Popup title.
    pub(crate) fn title(&self) -> String {
        match self {
            PromptKind::AddRow => "Add Line".to_string(),
            PromptKind::DeleteIndex => "Delete Line".to_string(),
            PromptKind::UpdateIndex => "Update Line".to_string(),
            PromptKind::UpdateRow { index } => format!("Update Line {index}"),
            PromptKind::Save => "Save List".to_string(),
            PromptKind::Load => "Load List".to_string(),
            PromptKind::SumColumn => "Sum Column".to_string(),
            PromptKind::RenameTitle => "Change List Name".to_string(),
            PromptKind::RenameAuthor => "Change Author".to_string(),
        }
    }

    /// Label shown before the input field.
    pub(crate) fn label(&self, max_columns: usize) -> String {
        match self {
            PromptKind::AddRow | PromptKind::UpdateRow { .. } => {
                format!("Up to {max_columns} comma-separated values")
            }
            PromptKind::DeleteIndex => "Index of the line to delete".to_string(),
            PromptKind::UpdateIndex => "Index of the line to update".to_string(),
            PromptKind::Save => "Filename to save".to_string(),
            PromptKind::Load => "Filename to load".to_string(),
            PromptKind::SumColumn => {
                format!("Column index to sum (0-{})", max_columns.saturating_sub(1))
            }
            PromptKind::RenameTitle => "New list name".to_string(),
            PromptKind::RenameAuthor => "New author".to_string(),
        }
    }
}

/// Text input state for the active prompt.
#[derive(Clone, Debug)]
pub(crate) struct PromptForm {
    pub(crate) kind: PromptKind,
    pub(crate) input: String,
    pub(crate) error: Option<String>,
}

impl PromptForm {
    pub(crate) fn new(kind: PromptKind) -> Self {
        Self::with_input(kind, String::new())
    }

    /// Open the prompt with a suggested value already typed in.
    pub(crate) fn with_input(kind: PromptKind, input: impl Into<String>) -> Self {
        Self {
            kind,
            input: input.into(),
            error: None,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) {
        self.input.push(ch);
        self.error = None;
    }

    pub(crate) fn backspace(&mut self) {
        self.input.pop();
    }

    pub(crate) fn value_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Render `Label: value` with the value highlighted.
    pub(crate) fn build_line(&self, label: &str) -> Line<'static> {
        Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(self.input.clone(), Style::default().fg(Color::Yellow)),
        ])
    }
}

/// Pending deletion awaiting a yes/no answer.
#[derive(Clone, Debug)]
pub(crate) struct ConfirmRowDelete {
    pub(crate) index: usize,
    pub(crate) preview: String,
}

/// Split a comma-separated line into trimmed fields. Truncation to the column
/// limit happens in the store.
pub(crate) fn parse_row(input: &str) -> Row {
    input.split(',').map(|field| field.trim().to_string()).collect()
}

/// Parse a zero-based row or column index. Negative numbers are rejected
/// rather than counted from the end.
pub(crate) fn parse_index(input: &str) -> Result<usize> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .with_context(|| format!("'{trimmed}' is not a whole number"))?;
    usize::try_from(value).map_err(|_| anyhow!("Index must be zero or greater."))
}

/// Reject blank filenames before they reach the filesystem.
pub(crate) fn parse_filename(input: &str) -> Result<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err(anyhow!("Filename is required."))
    } else {
        Ok(trimmed)
    }
}
