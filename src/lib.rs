pub mod app;
pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod fallback;
pub mod format;
pub mod models;
pub mod render;
pub mod routes;
pub mod tmdb;
pub mod views;
