pub mod check;
pub mod export;
pub mod info;

// Re-export command functions for main.rs
pub use check::cmd_check;
pub use export::cmd_export;
pub use info::cmd_info;
