//! # Migration Generation
//!
//! This module renders SQL statements for generated tables and assembles
//! them into goose migration files.
//!
//! ## Generated Files
//!
//! A whole schema directory produces one migration:
//! ```text
//! -- +goose Up
//! CREATE TABLE FS_<table> (
//! 	<column> <type>,
//! 	...);
//!
//! -- +goose Down
//! DROP TABLE FS_<table>;
//! ```
//!
//! ## Features
//!
//! - Columns sorted by name inside every `CREATE TABLE`
//! - Tables sorted by name in both sections
//! - One naming policy shared by `CREATE` and `DROP`

pub mod sql;

pub use sql::{GOOSE_DOWN, GOOSE_UP, render_create, render_drop, render_migration, sorted_columns};
