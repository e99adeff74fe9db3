pub mod api;
pub mod config;
pub mod dashboard;
pub mod init;
pub mod types;
