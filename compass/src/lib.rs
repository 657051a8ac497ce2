pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod llm;
pub mod models;
pub mod services;
pub mod session;
