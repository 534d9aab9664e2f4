//! # Schema Sampler
//!
//! Build a tree of named, typed fields and project it into a sample JSON
//! document filled with per-type placeholder values.
//!
//! ## Features
//!
//! - **Ten field types**: String, Number, Boolean, Date, ObjectId, Email, URL, UUID, Array, Nested
//! - **Pure tree edits**: insert, update and delete return a new forest
//! - **Configurable defaults**: per-type placeholder overrides from TOML
//! - **Export**: pretty-printed JSON to a file or to standard output
//!
//! ## Quick Start
//!
//! ```rust
//! use schema_sampler::domain::{Field, FieldTree, FieldType, Projector};
//!
//! let tree = FieldTree::new()
//!     .insert(Field::named("age", FieldType::Number), None);
//! let sample = Projector::default().project(&tree);
//! assert_eq!(sample["age"], 42);
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: field model, forest operations, projection, name rules, statistics
//! - **Adapters**: editing session, export sinks, notifications, interactive loop
//! - **Config**: settings loading and validation

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
