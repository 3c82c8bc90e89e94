//! Terminal front end for the kanban engine
//!
//! Parses a command line with clap, loads [`config::KanbanConfig`] through
//! figment, opens a file-backed [`kanban_engine::KanbanContext`] and prints
//! results as a table, JSON or YAML.

// Re-export modules for use in tests
pub mod cli;
pub mod commands;
pub mod config;
pub mod exit_codes;
pub mod output;
