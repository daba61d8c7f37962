//! Generation pipeline: parse, filter, render, assemble.
//!
//! A single synchronous pass over the declaration listing. Every anomaly is
//! reported through the returned diagnostics; no input can make a run fail.

use super::cwrap::CWrapperGenerator;
use super::host::HostGenerator;
use super::parser::parse_method_table;
use super::policy::Policy;
use crate::util::diagnostic::Diagnostic;

/// The two generated artifacts plus everything worth telling the user about.
#[derive(Debug, Clone)]
pub struct GeneratedBindings {
    /// Normalized C wrapper block
    pub c_wrappers: String,

    /// Rust host-binding block
    pub host_bindings: String,

    /// Dropped declarations, then generation skips, each in input order
    pub diagnostics: Vec<Diagnostic>,
}

impl GeneratedBindings {
    /// The combined document the bare CLI prints: the C artifact followed by
    /// the host artifact.
    pub fn combined(&self) -> String {
        format!("{}\n{}", self.c_wrappers, self.host_bindings)
    }
}

/// Binding generator for one dispatch-table listing.
///
/// Identical input text, policy, and namespace produce byte-identical
/// output.
#[derive(Debug, Clone)]
pub struct Generator {
    namespace: String,
    policy: Policy,
}

impl Default for Generator {
    fn default() -> Self {
        Generator {
            namespace: "jni".to_string(),
            policy: Policy::production(),
        }
    }
}

impl Generator {
    /// Create a generator with the default namespace and the production
    /// suppression policy.
    pub fn new() -> Self {
        Generator::default()
    }

    /// Set the namespace/module name for the host artifact.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Replace the suppression policy.
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Run the full pipeline over a declaration listing.
    pub fn generate(&self, text: &str) -> GeneratedBindings {
        let table = parse_method_table(text);

        let mut diagnostics: Vec<Diagnostic> = table
            .failures
            .iter()
            .map(|f| {
                Diagnostic::warning(format!("dropping declaration: {}", f.error))
                    .with_context(f.segment.clone())
            })
            .collect();

        let cgen = CWrapperGenerator::new(&self.namespace);
        let hgen = HostGenerator::new(&self.namespace);

        let mut c_blocks = Vec::new();
        let mut host_blocks = Vec::new();

        for method in &table.methods {
            if method.is_unsupported() {
                tracing::warn!(name = %method.name, "skipping variadic entry point");
                diagnostics.push(Diagnostic::warning(format!(
                    "skipping `{}`: variadic arguments are unsupported",
                    method.name
                )));
                continue;
            }

            if !self.policy.suppresses_wrapper(&method.name) {
                c_blocks.push(cgen.method_block(method));
            }
            if !self.policy.suppresses_host(&method.name) {
                host_blocks.push(hgen.method_block(method));
            }
        }

        GeneratedBindings {
            c_wrappers: assemble(cgen.preamble(), &c_blocks, cgen.epilogue()),
            host_bindings: assemble(hgen.preamble(), &host_blocks, hgen.epilogue()),
            diagnostics,
        }
    }
}

/// Preamble, blocks, and epilogue separated by single blank lines.
fn assemble(preamble: String, blocks: &[String], epilogue: String) -> String {
    let mut out = preamble;
    for block in blocks {
        out.push('\n');
        out.push_str(block);
    }
    out.push('\n');
    out.push_str(&epilogue);
    out
}
