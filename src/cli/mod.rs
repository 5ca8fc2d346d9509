// CLI module
// Public interface for the interactive front-end

mod commands;
mod input;
pub mod render;
mod repl;

pub use commands::{format_help, Command};
pub use input::InputHandler;
pub use repl::Repl;
