pub mod app;
pub mod config;
pub mod handler;
pub mod health;
pub mod helper;
pub mod store;
