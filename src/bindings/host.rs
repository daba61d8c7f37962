//! Rust host-binding emission.
//!
//! The host artifact is a standalone generated source file: a fixed preamble
//! (constants, raw ABI aliases, opaque handle types, marshalling helpers),
//! one `impl` block per retained declaration in input order, and a fixed
//! epilogue of tagged-union packers. Each bound function carries its own
//! `extern "C"` declaration matching the normalized C stub it calls.

use super::types::CMethod;

/// Renderer for the Rust host artifact.
#[derive(Debug, Clone)]
pub struct HostGenerator {
    namespace: String,
}

impl HostGenerator {
    /// Create a renderer for the given namespace/module name.
    pub fn new(namespace: impl Into<String>) -> Self {
        HostGenerator {
            namespace: namespace.into(),
        }
    }

    /// Fixed preamble. Only the doc header varies with the namespace.
    pub fn preamble(&self) -> String {
        let mut out = format!(
            "//! JNI bindings for module `{}`.\n\
             //!\n\
             //! Generated by jnigen; do not edit.\n\n",
            self.namespace
        );
        out.push_str(PRELUDE);
        out
    }

    /// One bound function, wrapped in its own `impl` block on the receiver
    /// derived from the first (dispatch handle) parameter.
    pub fn method_block(&self, method: &CMethod) -> String {
        let receiver = match method.params.first() {
            Some(p) if p.param_type.is_dispatch_handle() => "Env",
            Some(p) if p.param_type.is_runtime_handle() => "Vm",
            _ => "Env",
        };

        let params = method.host_param_list();
        let sig_params = if params.is_empty() {
            "self".to_string()
        } else {
            format!("self, {}", params)
        };

        let call = format!("{}({})", method.name, method.host_call_list());
        let body = if method.has_result() {
            method.ret.host_return_expr(&call)
        } else {
            call
        };

        let mut out = String::new();
        out.push_str(&format!("impl {} {{\n", receiver));
        out.push_str(&format!(
            "    pub fn {}({}){} {{\n",
            method.name,
            sig_params,
            method.host_return_sig()
        ));
        out.push_str("        extern \"C\" {\n");
        out.push_str(&format!("            {}\n", method.extern_decl()));
        out.push_str("        }\n");
        for stmt in method.host_prepare() {
            out.push_str(&format!("        {}\n", stmt));
        }
        out.push_str(&format!("        unsafe {{ {} }}\n", body));
        out.push_str("    }\n");
        out.push_str("}\n");
        out
    }

    /// Fixed epilogue: generic bit-pattern packers for building argument
    /// arrays by hand.
    pub fn epilogue(&self) -> String {
        EPILOGUE.to_string()
    }
}

/// Constants, ABI aliases, handle types, and marshalling helpers shared by
/// every emitted binding.
const PRELUDE: &str = r#"#![allow(non_snake_case, non_camel_case_types, dead_code)]

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_void};

pub const JNI_VERSION_1_1: i32 = 0x0001_0001;
pub const JNI_VERSION_1_2: i32 = 0x0001_0002;
pub const JNI_VERSION_1_4: i32 = 0x0001_0004;
pub const JNI_VERSION_1_6: i32 = 0x0001_0006;

pub const JNI_FALSE: jboolean = 0;
pub const JNI_TRUE: jboolean = 1;

pub const JNI_OK: i32 = 0;
pub const JNI_ERR: i32 = -1;
pub const JNI_EDETACHED: i32 = -2;
pub const JNI_EVERSION: i32 = -3;
pub const JNI_ENOMEM: i32 = -4;
pub const JNI_EEXIST: i32 = -5;
pub const JNI_EINVAL: i32 = -6;

pub const JNI_COMMIT: i32 = 1;
pub const JNI_ABORT: i32 = 2;

pub type JNIEnv = c_void;
pub type JavaVM = c_void;

pub type jboolean = u8;
pub type jbyte = i8;
pub type jchar = u16;
pub type jshort = i16;
pub type jint = i32;
pub type jlong = i64;
pub type jfloat = f32;
pub type jdouble = f64;
pub type jsize = jint;
pub type jvalue = u64;

pub type jobject = *mut c_void;
pub type jclass = jobject;
pub type jthrowable = jobject;
pub type jstring = jobject;
pub type jarray = jobject;
pub type jbooleanArray = jarray;
pub type jbyteArray = jarray;
pub type jcharArray = jarray;
pub type jshortArray = jarray;
pub type jintArray = jarray;
pub type jlongArray = jarray;
pub type jfloatArray = jarray;
pub type jdoubleArray = jarray;
pub type jobjectArray = jarray;
pub type jweak = jobject;
pub type jmethodID = *mut c_void;
pub type jfieldID = *mut c_void;

pub type Jobject = jobject;
pub type Jclass = jclass;
pub type Jthrowable = jthrowable;
pub type Jstring = jstring;
pub type Jarray = jarray;
pub type JbooleanArray = jbooleanArray;
pub type JbyteArray = jbyteArray;
pub type JcharArray = jcharArray;
pub type JshortArray = jshortArray;
pub type JintArray = jintArray;
pub type JlongArray = jlongArray;
pub type JfloatArray = jfloatArray;
pub type JdoubleArray = jdoubleArray;
pub type JobjectArray = jobjectArray;
pub type Jweak = jweak;
pub type JmethodID = jmethodID;
pub type JfieldID = jfieldID;
pub type Jvalue = jvalue;

/// Per-call dispatch handle through which every native entry point is
/// invoked.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(transparent)]
pub struct Env(*mut JNIEnv);

impl Env {
    pub fn from_raw(raw: *mut JNIEnv) -> Env {
        Env(raw)
    }

    pub fn as_raw(self) -> *mut JNIEnv {
        self.0
    }
}

/// Process-wide handle to the native runtime instance.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(transparent)]
pub struct Vm(*mut JavaVM);

impl Vm {
    pub fn from_raw(raw: *mut JavaVM) -> Vm {
        Vm(raw)
    }

    pub fn as_raw(self) -> *mut JavaVM {
        self.0
    }
}

/// Reference kinds reported by the runtime.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RefType {
    Invalid,
    Local,
    Global,
    WeakGlobal,
}

fn jbool(b: bool) -> jboolean {
    if b {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

fn c_string(s: &str) -> CString {
    CString::new(s).unwrap_or_default()
}

fn from_cstr(p: *mut c_char) -> String {
    if p.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(p) }.to_string_lossy().into_owned()
}

fn jvalues(v: &[Jvalue]) -> *mut jvalue {
    if v.is_empty() {
        std::ptr::null_mut()
    } else {
        v.as_ptr() as *mut jvalue
    }
}
"#;

const EPILOGUE: &str = r#"/// Pack a double into a tagged-union argument slot.
pub fn jvalue_from_double(v: f64) -> Jvalue {
    v.to_bits()
}

/// Pack a float into a tagged-union argument slot.
pub fn jvalue_from_float(v: f32) -> Jvalue {
    v.to_bits() as Jvalue
}

/// Pack a boolean into a tagged-union argument slot.
pub fn jvalue_from_boolean(v: bool) -> Jvalue {
    jbool(v) as Jvalue
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::parser::parse_declaration;

    fn gen() -> HostGenerator {
        HostGenerator::new("jni")
    }

    #[test]
    fn test_scalar_method_binding() {
        let m = parse_declaration("jint (JNICALL *GetVersion)(JNIEnv *env)").unwrap();
        assert_eq!(
            gen().method_block(&m),
            "impl Env {\n    \
                 pub fn GetVersion(self) -> i32 {\n        \
                     extern \"C\" {\n            \
                         fn GetVersion(env: *mut JNIEnv) -> jint;\n        \
                     }\n        \
                     unsafe { GetVersion(self.as_raw()) as i32 }\n    \
                 }\n\
             }\n"
        );
    }

    #[test]
    fn test_reference_param_and_return() {
        let m = parse_declaration(
            "jclass (JNICALL *GetObjectClass)(JNIEnv *env, jobject obj)",
        )
        .unwrap();
        let block = gen().method_block(&m);
        assert!(block.contains("pub fn GetObjectClass(self, obj: Jobject) -> Jclass {"));
        assert!(block.contains("unsafe { GetObjectClass(self.as_raw(), obj) as Jclass }"));
    }

    #[test]
    fn test_string_param_gets_prepared() {
        let m = parse_declaration(
            "jclass (JNICALL *FindClass)(JNIEnv *env, const char *name)",
        )
        .unwrap();
        let block = gen().method_block(&m);
        assert!(block.contains("pub fn FindClass(self, name: &str) -> Jclass {"));
        assert!(block.contains("let c_name = c_string(name);"));
        assert!(block.contains("c_name.as_ptr() as *mut c_char"));
    }

    #[test]
    fn test_boolean_return_is_normalized() {
        let m = parse_declaration("jboolean (JNICALL *ExceptionCheck)(JNIEnv *env)").unwrap();
        let block = gen().method_block(&m);
        assert!(block.contains("pub fn ExceptionCheck(self) -> bool {"));
        assert!(block.contains("unsafe { ExceptionCheck(self.as_raw()) != JNI_FALSE }"));
    }

    #[test]
    fn test_array_region_collapses_to_slice() {
        let m = parse_declaration(
            "void (JNICALL *SetIntArrayRegion)(JNIEnv *env, jintArray array, jsize start, jsize len, jint *buf)",
        )
        .unwrap();
        let block = gen().method_block(&m);
        assert!(block
            .contains("pub fn SetIntArrayRegion(self, array: JintArray, start: i32, buf: &[i32]) {"));
        assert!(block.contains("buf.len() as jsize"));
        assert!(block.contains("buf.as_ptr() as *mut jint"));
        // The extern declaration keeps the uncollapsed stub shape.
        assert!(block.contains(
            "fn SetIntArrayRegion(env: *mut JNIEnv, array: jintArray, start: jsize, len: jsize, buf: *mut jint);"
        ));
    }

    #[test]
    fn test_value_call_collapses_to_argument_pack() {
        let m = parse_declaration(
            "jobject (JNICALL *NewObjectA)(JNIEnv *env, jclass clazz, jmethodID methodID, const jvalue *args)",
        )
        .unwrap();
        let block = gen().method_block(&m);
        assert!(block.contains(
            "pub fn NewObjectA(self, clazz: Jclass, methodID: JmethodID, args: &[Jvalue]) -> Jobject {"
        ));
        assert!(block.contains("jvalues(args)"));
    }

    #[test]
    fn test_is_copy_flag_absent_from_binding() {
        let m = parse_declaration(
            "void * (JNICALL *GetPrimitiveArrayCritical)(JNIEnv *env, jarray array, jboolean *isCopy)",
        )
        .unwrap();
        let block = gen().method_block(&m);
        assert!(block.contains("pub fn GetPrimitiveArrayCritical(self, array: Jarray) -> *mut c_void {"));
        assert!(!block.contains("isCopy"));
    }

    #[test]
    fn test_preamble_carries_namespace_and_fixed_definitions() {
        let text = gen().preamble();
        assert!(text.starts_with("//! JNI bindings for module `jni`."));
        assert!(text.contains("pub struct Env"));
        assert!(text.contains("pub struct Vm"));
        assert!(text.contains("pub const JNI_FALSE: jboolean = 0;"));
        assert!(text.contains("pub type JmethodID = jmethodID;"));
        assert!(text.contains("fn jvalues(v: &[Jvalue]) -> *mut jvalue"));
    }

    #[test]
    fn test_epilogue_bit_pattern_packers() {
        let text = gen().epilogue();
        assert!(text.contains("pub fn jvalue_from_double"));
        assert!(text.contains("pub fn jvalue_from_float"));
        assert!(text.contains("pub fn jvalue_from_boolean"));
    }
}
