mod args;
mod commands;
pub mod context;
mod handlers;
pub mod ui;
pub mod views;

pub use args::{AuthCommand, Cli, Commands, CommentCommand, OutputFormat, ReportCommand};
pub use commands::run;
