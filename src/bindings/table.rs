//! The embedded dispatch-table listing.
//!
//! The `JNIEnv` method-table declarations in dispatch-table order, as the
//! runtime lays them out. This is the fixed default input; the CLI can
//! substitute a file with `--input`.

/// Declarations for every `JNIEnv` entry point, `GetVersion` through
/// `GetObjectRefType`.
pub const JNIENV_TABLE: &str = include_str!("jnienv.txt");
