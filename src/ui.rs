//! Ratatui front-end: the menu that turns key presses and typed input into
//! row store operations and shows their outcome in the footer.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
