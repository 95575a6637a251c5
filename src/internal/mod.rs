pub mod api;
pub mod config;
pub mod dashboard;
pub mod forms;
pub mod gateway;
pub mod logger;
pub mod models;
pub mod ui;
