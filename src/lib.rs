pub mod advisory;
pub mod alerts;
pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod fetch_error;
pub mod fetcher;
pub mod scheduler;
pub mod services;
