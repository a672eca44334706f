// Database module
// This module handles SQLite database operations

pub mod connection;
pub mod migrations;
pub mod models;
pub mod operations;
