pub mod app;
pub mod config;
pub mod controller;
pub mod effects;
pub mod error;
pub mod models;
pub mod notify;
pub mod overlay;
pub mod tmdb;
pub mod ui;
