//! CLI integration tests for jnigen.
//!
//! These tests run the binary end to end: embedded-table generation, custom
//! declaration files, artifact selection, and the diagnostic stream.

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the jnigen binary command.
fn jnigen() -> Command {
    Command::cargo_bin("jnigen").unwrap()
}

/// Create a temporary directory for test inputs and outputs.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

// ============================================================================
// default invocation (embedded dispatch table)
// ============================================================================

#[test]
fn test_default_run_prints_combined_document() {
    jnigen()
        .assert()
        .success()
        .stdout(predicate::str::contains("#include <jni.h>"))
        .stdout(predicate::str::contains("static inline jint GetVersion(JNIEnv * env)"))
        .stdout(predicate::str::contains("pub struct Env"))
        .stdout(predicate::str::contains("pub fn GetVersion(self) -> i32"));
}

#[test]
fn test_default_run_reports_skips_on_stderr() {
    jnigen()
        .assert()
        .success()
        // GetJavaVM takes `JavaVM **` and is dropped at parse time.
        .stderr(predicate::str::contains("GetJavaVM"))
        // The variadic Call families are skipped after parse.
        .stderr(predicate::str::contains("skipping `CallObjectMethod`"));
}

#[test]
fn test_output_is_deterministic() {
    let first = jnigen().output().unwrap();
    let second = jnigen().output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_package_flag_selects_namespace() {
    jnigen()
        .args(["-p", "engine"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ENGINE_WRAPPERS_H"))
        .stdout(predicate::str::contains("JNI bindings for module `engine`"));
}

// ============================================================================
// suppression policy
// ============================================================================

#[test]
fn test_wrapper_suppressed_entry_absent_everywhere() {
    let output = jnigen().output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    // RegisterNatives keeps a hand-written wrapper; nothing is generated.
    assert!(!stdout.contains("RegisterNatives"));
    assert!(!stdout.contains("GetStringUTFChars"));
}

#[test]
fn test_host_suppressed_entry_keeps_c_stub() {
    let output = jnigen().output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.contains("static inline jstring NewString(JNIEnv * env"));
    assert!(!stdout.contains("pub fn NewString"));
}

#[test]
fn test_variadic_families_absent_from_both_artifacts() {
    let output = jnigen().output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(!stdout.contains("CallObjectMethodV"));
    assert!(!stdout.contains("fn CallObjectMethod("));
    // The argument-array flavor stays.
    assert!(stdout.contains("pub fn CallObjectMethodA"));
}

// ============================================================================
// --emit
// ============================================================================

#[test]
fn test_emit_c_only() {
    jnigen()
        .args(["--emit", "c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("static inline"))
        .stdout(predicate::str::contains("pub fn").not());
}

#[test]
fn test_emit_host_only() {
    jnigen()
        .args(["--emit", "host"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pub fn GetVersion"))
        .stdout(predicate::str::contains("static inline").not());
}

// ============================================================================
// --input / --output
// ============================================================================

#[test]
fn test_input_file_with_custom_declarations() {
    let tmp = temp_dir();
    let decls = tmp.path().join("table.txt");
    fs::write(
        &decls,
        "jint (JNICALL *Foo)(JNIEnv *env, jobject obj);\n\
         void (JNICALL *Bar)(JNIEnv *env, jobject obj, ...);\n",
    )
    .unwrap();

    jnigen()
        .arg("--input")
        .arg(&decls)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "static inline jint Foo(JNIEnv * env, jobject obj)",
        ))
        .stdout(predicate::str::contains("(*env)->Foo(env, obj)"))
        .stdout(predicate::str::contains("pub fn Foo(self, obj: Jobject) -> i32"))
        .stdout(predicate::str::contains("Bar").not())
        .stderr(predicate::str::contains("Bar"));
}

#[test]
fn test_input_file_missing_fails_with_context() {
    jnigen()
        .args(["--input", "no-such-file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read declarations"));
}

#[test]
fn test_output_writes_file() {
    let tmp = temp_dir();
    let out = tmp.path().join("bindings.rs");

    jnigen()
        .args(["--emit", "host"])
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("//! JNI bindings for module `jni`."));
    assert!(text.ends_with(
        "pub fn jvalue_from_boolean(v: bool) -> Jvalue {\n    jbool(v) as Jvalue\n}\n"
    ));
}

// ============================================================================
// --dump-ir
// ============================================================================

#[test]
fn test_dump_ir_is_valid_json_in_input_order() {
    let output = jnigen().arg("--dump-ir").output().unwrap();
    assert!(output.status.success());

    let methods: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let list = methods.as_array().unwrap();
    assert_eq!(list[0]["name"], "GetVersion");
    assert_eq!(list.last().unwrap()["name"], "GetObjectRefType");
}
