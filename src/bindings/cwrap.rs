//! Normalized C wrapper emission.
//!
//! One `static inline` stub per retained declaration, each forwarding its
//! arguments through the dispatch handle's function table. Signatures are
//! deliberately non-const so the foreign-call boundary stays uniform; a
//! `const`-qualified return is cast back to the normalized type.

use super::types::{CMethod, RenderTarget};

/// Renderer for the normalized C artifact.
#[derive(Debug, Clone)]
pub struct CWrapperGenerator {
    namespace: String,
}

impl CWrapperGenerator {
    /// Create a renderer. The namespace only shapes the include guard.
    pub fn new(namespace: impl Into<String>) -> Self {
        CWrapperGenerator {
            namespace: namespace.into(),
        }
    }

    fn guard(&self) -> String {
        let mut guard: String = self
            .namespace
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        guard.push_str("_WRAPPERS_H");
        guard
    }

    /// Fixed preamble: include guard and headers.
    pub fn preamble(&self) -> String {
        format!(
            "#ifndef {guard}\n\
             #define {guard}\n\
             \n\
             #include <jni.h>\n\
             #include <stdlib.h>\n",
            guard = self.guard()
        )
    }

    /// One wrapper stub.
    pub fn method_block(&self, method: &CMethod) -> String {
        let receiver = method
            .params
            .first()
            .map(|p| p.name.as_str())
            .unwrap_or("env");

        let mut expr = format!(
            "(*{})->{}({})",
            receiver,
            method.name,
            method.c_call_list()
        );
        if method.ret.is_const {
            // Cast the const-qualified result back to the normalized type.
            expr = format!("({}) {}", method.ret.render(RenderTarget::NormalizedC), expr);
        }

        let ret = if method.has_result() { "return " } else { "" };

        format!(
            "static inline {} {}({}) {{\n    {}{};\n}}\n",
            method.ret.render(RenderTarget::NormalizedC),
            method.name,
            method.c_param_list(),
            ret,
            expr
        )
    }

    /// Fixed epilogue: closes the include guard.
    pub fn epilogue(&self) -> String {
        format!("#endif /* {} */\n", self.guard())
    }
}
