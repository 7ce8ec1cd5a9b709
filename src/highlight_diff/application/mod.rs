pub mod config;
pub mod diff_service;
pub mod error;
