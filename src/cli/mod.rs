pub mod host;
pub mod output;
pub mod submitter;
pub mod ui;

pub use host::run_cli;
