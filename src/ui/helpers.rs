use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Message for the footer. Store errors already name the file and cause, so
/// the outermost message is the useful one; a bare parse error underneath a
/// context gets both parts.
pub(crate) fn surface_error(err: &Error) -> String {
    let mut chain = err.chain();
    match (chain.next(), chain.next()) {
        (Some(outer), Some(cause)) if !outer.to_string().contains(&cause.to_string()) => {
            format!("{outer}: {cause}")
        }
        (Some(outer), _) => outer.to_string(),
        (None, _) => err.to_string(),
    }
}

/// Join a row's fields for editing in a prompt.
pub(crate) fn join_fields(fields: &[String]) -> String {
    fields.join(", ")
}
