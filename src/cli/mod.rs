mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_classify, handle_export, handle_history, handle_init, handle_pending, handle_run,
    handle_seed,
};
