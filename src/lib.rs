//! Read-only HTTP catalog of restaurants and dishes backed by SQLite.

pub mod api;
pub mod config;
pub mod data;
pub mod db;
pub mod error;
