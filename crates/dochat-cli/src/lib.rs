//! Interactive terminal interface for dochat

mod ui;

pub use ui::{display_banner, run_loop};

// Re-export core types
pub use dochat_core::{Error, Result};
