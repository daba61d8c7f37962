//! Type and signature model for dispatch-table declarations.
//!
//! These types represent one parsed function-pointer declaration and know how
//! to render themselves for both generated artifacts: the normalized C
//! wrapper block and the Rust host bindings.

use serde::{Deserialize, Serialize};

/// Rendering target for a parsed type.
///
/// The same descriptor renders differently depending on which artifact is
/// being emitted; the target is an explicit parameter rather than a pair of
/// parallel view types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    /// Normalized C wrapper signature. `const` is dropped so the wrapper
    /// boundary stays uniform.
    NormalizedC,
    /// Rust host binding signature.
    HostBinding,
}

/// Opaque JNI reference type names, in `jni.h` order.
///
/// These map to generated `J…` aliases in the host artifact.
const REFERENCE_TYPES: &[&str] = &[
    "jobject",
    "jclass",
    "jthrowable",
    "jstring",
    "jarray",
    "jbooleanArray",
    "jbyteArray",
    "jcharArray",
    "jshortArray",
    "jintArray",
    "jlongArray",
    "jfloatArray",
    "jdoubleArray",
    "jobjectArray",
    "jweak",
];

/// Handle-ID type names. Same `J…` transformation as references.
const ID_TYPES: &[&str] = &["jmethodID", "jfieldID"];

/// A C type as written in a dispatch-table declaration.
///
/// Pointer depth is at most one by construction: the parser rejects a second
/// `*` instead of representing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CType {
    /// Base type name, e.g. `jint` or `JNIEnv`
    pub name: String,

    /// Single trailing `*`
    pub pointer: bool,

    /// `const` qualifier on the base type
    pub is_const: bool,

    /// Trailing `...` in a parameter list
    pub variadic: bool,
}

impl CType {
    /// Create a plain (non-pointer) type.
    pub fn named(name: impl Into<String>) -> Self {
        CType {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a single-level pointer type.
    pub fn pointer_to(name: impl Into<String>) -> Self {
        CType {
            name: name.into(),
            pointer: true,
            ..Default::default()
        }
    }

    /// Create the variadic (`...`) marker.
    pub fn variadic_marker() -> Self {
        CType {
            variadic: true,
            ..Default::default()
        }
    }

    /// Check if this is non-pointer `void`.
    pub fn is_void(&self) -> bool {
        !self.pointer && self.name == "void"
    }

    /// Check if this is the per-call dispatch handle (`JNIEnv *`).
    pub fn is_dispatch_handle(&self) -> bool {
        self.pointer && self.name == "JNIEnv"
    }

    /// Check if this is the process-wide runtime handle (`JavaVM *`).
    pub fn is_runtime_handle(&self) -> bool {
        self.pointer && self.name == "JavaVM"
    }

    /// Check if this is the platform variadic-cursor type, which the
    /// generator cannot marshal.
    pub fn is_va_list(&self) -> bool {
        self.name == "va_list"
    }

    /// Check if the base name is an opaque reference or handle-ID type.
    pub fn is_reference(&self) -> bool {
        REFERENCE_TYPES.contains(&self.name.as_str()) || ID_TYPES.contains(&self.name.as_str())
    }

    /// The generated host alias for a reference/handle-ID name:
    /// strip the `j` prefix and re-prefix `J` (`jobject` -> `Jobject`).
    fn host_alias(&self) -> String {
        format!("J{}", &self.name[1..])
    }

    /// Host-native scalar for a primitive/alias base name.
    fn host_scalar(name: &str) -> Option<&'static str> {
        match name {
            "jboolean" => Some("bool"),
            "jbyte" => Some("i8"),
            "jshort" => Some("i16"),
            "jchar" => Some("u16"),
            "jsize" | "jint" => Some("i32"),
            "jlong" => Some("i64"),
            "jfloat" => Some("f32"),
            "jdouble" => Some("f64"),
            _ => None,
        }
    }

    /// Render the type for the given artifact.
    ///
    /// `HostBinding` output is the general (return-position) form; parameter
    /// rendering on [`CParam`] overrides the string-shaped cases.
    pub fn render(&self, target: RenderTarget) -> String {
        match target {
            RenderTarget::NormalizedC => {
                if self.pointer {
                    format!("{} *", self.name)
                } else {
                    self.name.clone()
                }
            }
            RenderTarget::HostBinding => self.render_host(),
        }
    }

    fn render_host(&self) -> String {
        if self.pointer {
            return match self.name.as_str() {
                "JNIEnv" => "Env".to_string(),
                "JavaVM" => "Vm".to_string(),
                "void" => "*mut c_void".to_string(),
                "char" => "String".to_string(),
                other => format!("*mut {}", other),
            };
        }

        if self.is_void() {
            return "()".to_string();
        }
        if let Some(scalar) = Self::host_scalar(&self.name) {
            return scalar.to_string();
        }
        if self.is_reference() {
            return self.host_alias();
        }

        // Generic foreign-type reference: the name passes through untouched.
        self.name.clone()
    }

    /// Render the raw ABI form used in the generated `extern "C"`
    /// declarations. This is the normalized-C shape transposed to Rust; the
    /// lowercase aliases it names are defined by the host preamble.
    pub fn abi(&self) -> String {
        if self.pointer {
            match self.name.as_str() {
                "char" => "*mut c_char".to_string(),
                "void" => "*mut c_void".to_string(),
                other => format!("*mut {}", other),
            }
        } else {
            self.name.clone()
        }
    }

    /// Wrap a call expression so the raw foreign result becomes the host
    /// return value.
    pub fn host_return_expr(&self, call: &str) -> String {
        if self.pointer {
            return match self.name.as_str() {
                "char" => format!("from_cstr({})", call),
                "JNIEnv" => format!("Env::from_raw({})", call),
                "JavaVM" => format!("Vm::from_raw({})", call),
                _ => call.to_string(),
            };
        }

        if let Some(scalar) = Self::host_scalar(&self.name) {
            return if self.name == "jboolean" {
                format!("{} != JNI_FALSE", call)
            } else {
                format!("{} as {}", call, scalar)
            };
        }
        if self.is_reference() {
            return format!("{} as {}", call, self.host_alias());
        }

        call.to_string()
    }
}

/// A declaration parameter: a type plus an identifier.
///
/// The variadic marker entry has an empty name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CParam {
    /// Parameter type
    pub param_type: CType,

    /// Parameter name, already free of reserved-word collisions
    pub name: String,
}

impl CParam {
    /// Create a new parameter.
    pub fn new(param_type: CType, name: impl Into<String>) -> Self {
        CParam {
            param_type,
            name: name.into(),
        }
    }

    /// The `jboolean *isCopy` out-flag has no host-side consumer; it is
    /// elided from both signatures and the C stub passes NULL for it.
    pub fn is_copy_flag(&self) -> bool {
        self.param_type.pointer && self.param_type.name == "jboolean" && self.name == "isCopy"
    }

    /// Check if this is a C string parameter (`char *` / `const char *`).
    pub fn is_c_string(&self) -> bool {
        self.param_type.pointer && self.param_type.name == "char"
    }

    /// Signature fragment for the normalized C stub, `None` when elided.
    pub fn c_decl(&self) -> Option<String> {
        if self.is_copy_flag() {
            return None;
        }
        Some(format!(
            "{} {}",
            self.param_type.render(RenderTarget::NormalizedC),
            self.name
        ))
    }

    /// Argument fragment for the forwarding call inside the C stub.
    pub fn c_call(&self) -> String {
        if self.is_copy_flag() {
            "NULL".to_string()
        } else {
            self.name.clone()
        }
    }

    /// Signature fragment for the host binding, `None` when elided.
    pub fn host_decl(&self) -> Option<String> {
        if self.is_copy_flag() {
            return None;
        }
        if self.is_c_string() {
            return Some(format!("{}: &str", self.name));
        }
        Some(format!(
            "{}: {}",
            self.name,
            self.param_type.render(RenderTarget::HostBinding)
        ))
    }

    /// Argument fragment for the foreign call inside the host binding,
    /// `None` when the parameter vanishes from the call entirely.
    pub fn host_call(&self) -> Option<String> {
        if self.is_copy_flag() {
            return None;
        }

        let ty = &self.param_type;
        if ty.pointer {
            return Some(match ty.name.as_str() {
                "JNIEnv" | "JavaVM" => format!("{}.as_raw()", self.name),
                "char" => format!("c_{}.as_ptr() as *mut c_char", self.name),
                _ => self.name.clone(),
            });
        }

        if CType::host_scalar(&ty.name).is_some() {
            return Some(if ty.name == "jboolean" {
                format!("jbool({})", self.name)
            } else {
                format!("{} as {}", self.name, ty.name)
            });
        }

        Some(self.name.clone())
    }

    /// Slice element type when this parameter is the buffer of an
    /// array-region accessor.
    fn slice_elem(&self) -> Option<&'static str> {
        if !self.param_type.pointer {
            return None;
        }
        CType::host_scalar(&self.param_type.name)
    }
}

/// A parsed function-pointer declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CMethod {
    /// Entry point name from the `(JNICALL *Name)` idiom
    pub name: String,

    /// Return type
    pub ret: CType,

    /// Parameters in declaration order; the first is the dispatch handle by
    /// construction of the input grammar
    pub params: Vec<CParam>,
}

impl CMethod {
    /// Create a new method record.
    pub fn new(name: impl Into<String>, ret: CType, params: Vec<CParam>) -> Self {
        CMethod {
            name: name.into(),
            ret,
            params,
        }
    }

    /// Check if the method returns a value.
    pub fn has_result(&self) -> bool {
        !self.ret.is_void()
    }

    /// Check if the declaration ends in `...`.
    pub fn is_variadic(&self) -> bool {
        self.params
            .last()
            .is_some_and(|p| p.param_type.variadic)
    }

    /// Check if any parameter is an already-opened variadic cursor.
    pub fn uses_va_list(&self) -> bool {
        self.params.iter().any(|p| p.param_type.is_va_list())
    }

    /// Variadic and cursor-typed methods carry no renderer output.
    pub fn is_unsupported(&self) -> bool {
        self.is_variadic() || self.uses_va_list()
    }

    /// Paired bulk accessor over a contiguous primitive array: the trailing
    /// `(len, buf)` pair collapses into one slice parameter.
    pub fn is_array_region(&self) -> bool {
        self.name.ends_with("ArrayRegion")
            && (self.name.starts_with("Get") || self.name.starts_with("Set"))
            && self.params.len() >= 3
            && self.params.last().is_some_and(|p| p.slice_elem().is_some())
    }

    /// Invocation entry point taking a tagged-union argument array: the
    /// trailing `jvalue *` parameter collapses into a `&[Jvalue]` pack.
    pub fn is_value_call(&self) -> bool {
        let Some(last) = self.params.last() else {
            return false;
        };
        (self.name.starts_with("Call") || self.name.starts_with("New"))
            && self.name.ends_with('A')
            && last.param_type.pointer
            && last.param_type.name == "jvalue"
    }

    /// Mutable slices for the Get direction, shared for Set.
    fn region_is_get(&self) -> bool {
        self.name.starts_with("Get")
    }

    /// Parameter list for the normalized C stub. An empty list renders as
    /// `void`.
    pub fn c_param_list(&self) -> String {
        let decls: Vec<String> = self.params.iter().filter_map(|p| p.c_decl()).collect();
        if decls.is_empty() {
            "void".to_string()
        } else {
            decls.join(", ")
        }
    }

    /// Argument list for the forwarding call inside the C stub.
    pub fn c_call_list(&self) -> String {
        self.params
            .iter()
            .map(|p| p.c_call())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Parameter list for the host binding, receiver excluded.
    pub fn host_param_list(&self) -> String {
        if self.params.len() <= 1 {
            return String::new();
        }

        let (plain, tail) = self.split_host_params();
        // The dispatch handle becomes the receiver, not a parameter.
        let mut decls: Vec<String> = plain.iter().skip(1).filter_map(|p| p.host_decl()).collect();

        if let Some(last) = tail {
            if self.is_array_region() {
                let elem = last.slice_elem().unwrap_or("u8");
                let slice = if self.region_is_get() {
                    format!("{}: &mut [{}]", last.name, elem)
                } else {
                    format!("{}: &[{}]", last.name, elem)
                };
                decls.push(slice);
            } else {
                decls.push(format!("{}: &[Jvalue]", last.name));
            }
        }

        decls.join(", ")
    }

    /// Argument list for the foreign call inside the host binding. The
    /// dispatch-handle parameter renders through the receiver.
    pub fn host_call_list(&self) -> String {
        let (plain, tail) = self.split_host_params();

        let mut args: Vec<String> = Vec::new();
        for (i, p) in plain.iter().enumerate() {
            if i == 0 {
                args.push("self.as_raw()".to_string());
                continue;
            }
            if let Some(call) = p.host_call() {
                args.push(call);
            }
        }

        if let Some(last) = tail {
            if self.is_array_region() {
                let raw = &last.param_type.name;
                args.push(format!("{}.len() as jsize", last.name));
                if self.region_is_get() {
                    args.push(format!("{}.as_mut_ptr() as *mut {}", last.name, raw));
                } else {
                    args.push(format!("{}.as_ptr() as *mut {}", last.name, raw));
                }
            } else {
                args.push(format!("jvalues({})", last.name));
            }
        }

        args.join(", ")
    }

    /// Split parameters into the one-to-one prefix and the collapsed tail.
    ///
    /// Array-region methods drop the trailing `(len, buf)` pair and re-add
    /// `buf` as the collapse target; value-call methods do the same with the
    /// trailing argument array.
    fn split_host_params(&self) -> (&[CParam], Option<&CParam>) {
        let n = self.params.len();
        if self.is_array_region() {
            (&self.params[..n - 2], self.params.last())
        } else if self.is_value_call() {
            (&self.params[..n - 1], self.params.last())
        } else {
            (&self.params[..], None)
        }
    }

    /// Host return annotation, e.g. ` -> i32`, empty for void.
    pub fn host_return_sig(&self) -> String {
        if !self.has_result() {
            return String::new();
        }
        format!(" -> {}", self.ret.render(RenderTarget::HostBinding))
    }

    /// Statements that must run before the foreign call (C string
    /// conversions for `char *` parameters).
    pub fn host_prepare(&self) -> Vec<String> {
        self.params
            .iter()
            .filter(|p| p.is_c_string())
            .map(|p| format!("let c_{} = c_string({});", p.name, p.name))
            .collect()
    }

    /// The `extern "C"` declaration matching the normalized C stub.
    pub fn extern_decl(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .filter(|p| !p.is_copy_flag())
            .map(|p| format!("{}: {}", p.name, p.param_type.abi()))
            .collect();

        let ret = if self.has_result() {
            format!(" -> {}", self.ret.abi())
        } else {
            String::new()
        };

        format!("fn {}({}){};", self.name, params.join(", "), ret)
    }
}
