//! Process-wide state shared by the CLI and the watch actors.

mod state;

pub use state::{is_shutdown, register_shutdown, setup_shutdown_handler};
