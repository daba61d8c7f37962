//! Suppression policy for generated declarations.
//!
//! Two sets of entry-point names gate emission. The wrapper set suppresses
//! both artifacts; the host set additionally suppresses only the host
//! artifact, for entry points that keep their low-level C stub but get a
//! hand-written host wrapper instead of a generated one. The asymmetry is
//! deliberate and the production data below preserves it entry for entry.

use std::collections::BTreeSet;

/// Immutable, injected suppression sets. Fixed for the duration of a run and
/// never derived from the parse result.
#[derive(Debug, Clone, Default)]
pub struct Policy {
    wrapper_suppress: BTreeSet<String>,
    host_suppress: BTreeSet<String>,
}

/// Entry points excluded from both artifacts.
const WRAPPER_SUPPRESS: &[&str] = &[
    // class operations
    "DefineClass",
    // string operations
    "NewStringUTF",
    "GetStringChars",
    "ReleaseStringChars",
    "GetStringCritical",
    "ReleaseStringCritical",
    "GetStringRegion",
    "GetStringUTFChars",
    "ReleaseStringUTFChars",
    // array element operations
    "GetBooleanArrayElements",
    "GetByteArrayElements",
    "GetCharArrayElements",
    "GetShortArrayElements",
    "GetIntArrayElements",
    "GetLongArrayElements",
    "GetFloatArrayElements",
    "GetDoubleArrayElements",
    "ReleaseBooleanArrayElements",
    "ReleaseByteArrayElements",
    "ReleaseCharArrayElements",
    "ReleaseShortArrayElements",
    "ReleaseIntArrayElements",
    "ReleaseLongArrayElements",
    "ReleaseFloatArrayElements",
    "ReleaseDoubleArrayElements",
    // native method registration
    "RegisterNatives",
    "UnregisterNatives",
    // reference introspection
    "GetObjectRefType",
];

/// Entry points additionally excluded from the host artifact only.
const HOST_SUPPRESS: &[&str] = &[
    // string operations
    "NewString",
    "NewStringUTF",
    "GetStringUTFLength",
    "GetStringUTFRegion",
    // NIO
    "NewDirectByteBuffer",
    "GetDirectBufferAddress",
    "GetDirectBufferCapacity",
];

impl Policy {
    /// A policy that suppresses nothing.
    pub fn empty() -> Self {
        Policy::default()
    }

    /// The production suppression sets.
    pub fn production() -> Self {
        Policy::empty()
            .with_wrapper_suppress(WRAPPER_SUPPRESS.iter().copied())
            .with_host_suppress(HOST_SUPPRESS.iter().copied())
    }

    /// Add names to the wrapper (both-artifact) suppression set.
    pub fn with_wrapper_suppress<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wrapper_suppress.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add names to the host-only suppression set.
    pub fn with_host_suppress<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.host_suppress.extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether the normalized C stub for `name` is suppressed.
    pub fn suppresses_wrapper(&self, name: &str) -> bool {
        self.wrapper_suppress.contains(name)
    }

    /// Whether the host binding for `name` is suppressed. Wrapper
    /// suppression always implies host suppression.
    pub fn suppresses_host(&self, name: &str) -> bool {
        self.wrapper_suppress.contains(name) || self.host_suppress.contains(name)
    }
}
