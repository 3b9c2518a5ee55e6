mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{handle_add, handle_delete, handle_export, handle_list, handle_search};
