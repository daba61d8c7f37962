//! jnigen - A JNI dispatch-table binding generator for Rust
//!
//! This crate parses the JNI runtime's dispatch-table declaration listing
//! and generates a normalized C wrapper block plus matching Rust host
//! bindings.

pub mod bindings;
pub mod util;

pub use bindings::{GeneratedBindings, Generator, Policy, JNIENV_TABLE};
pub use util::Diagnostic;
