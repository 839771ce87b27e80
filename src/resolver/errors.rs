//! Configuration error types and diagnostics.

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::expand::ExpandError;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// A configuration error found while loading or validating a project.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ConfigError {
    #[error("duplicate module name: `{name}`")]
    #[diagnostic(
        code(slipway::resolve::duplicate_module),
        help("Rename one of the modules, or drop its name to make it anonymous")
    )]
    DuplicateModule {
        name: String,
        documents: Vec<PathBuf>,
    },

    #[error("undefined module reference: `{reference}`")]
    #[diagnostic(
        code(slipway::resolve::undefined_reference),
        help("Run `slipway tree <document>` to see every module the project defines")
    )]
    UndefinedReference { reference: String, requirer: String },

    #[error("document `{document}` declares no default module")]
    #[diagnostic(
        code(slipway::resolve::no_default),
        help("Add `default = \"NAME\"` to the referenced document, or name a symbol in the reference")
    )]
    NoDefaultAlias { document: PathBuf, requirer: String },

    #[error("failed to load document `{path}`: {reason}")]
    #[diagnostic(code(slipway::resolve::document_load))]
    DocumentLoad { path: PathBuf, reason: String },

    #[error("in document `{path}`: {source}")]
    #[diagnostic(code(slipway::expand::provider))]
    Expansion {
        path: PathBuf,
        #[source]
        source: ExpandError,
    },

    #[error("reference `{reference}` survived resolution unresolved (internal error)")]
    #[diagnostic(code(slipway::resolve::internal))]
    PendingSurvived { reference: String, requirer: String },

    #[error("requirement cycle: {}", cycle.join(" -> "))]
    #[diagnostic(
        code(slipway::resolve::cycle),
        help("Break the cycle by removing or restructuring requirements")
    )]
    RequirementCycle { cycle: Vec<String> },
}

impl ConfigError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ConfigError::DuplicateModule { name, documents } => {
                let mut diag = Diagnostic::error(format!("duplicate module name: `{}`", name));
                for doc in documents {
                    diag = diag.with_context(format!("declared in {}", doc.display()));
                }
                diag.with_suggestion(suggestions::DUPLICATE_NAME)
            }

            ConfigError::UndefinedReference {
                reference,
                requirer,
            } => Diagnostic::error(format!("undefined module reference: `{}`", reference))
                .with_context(format!("required by `{}`", requirer))
                .with_suggestion(suggestions::UNDEFINED_REFERENCE),

            ConfigError::NoDefaultAlias { document, requirer } => {
                Diagnostic::error(format!(
                    "document `{}` declares no default module",
                    document.display()
                ))
                .with_context(format!("referenced without a symbol by `{}`", requirer))
                .with_suggestion("Add `default = \"NAME\"` to the referenced document")
                .with_suggestion("Name a symbol explicitly in the requirement")
            }

            ConfigError::DocumentLoad { path, reason } => {
                Diagnostic::error(format!("failed to load document `{}`", path.display()))
                    .with_context(reason.clone())
                    .with_location(path.clone())
                    .with_suggestion(suggestions::DOCUMENT_LOAD)
            }

            ConfigError::Expansion { path, source } => Diagnostic::error(source.to_string())
                .with_location(path.clone())
                .with_suggestion("Check the module's info keys against the template's contract"),

            ConfigError::PendingSurvived {
                reference,
                requirer,
            } => Diagnostic::error(format!(
                "reference `{}` survived resolution unresolved",
                reference
            ))
            .with_context(format!("required by `{}`", requirer))
            .with_context("this is an internal error; please report it"),

            ConfigError::RequirementCycle { cycle } => {
                Diagnostic::error("requirement cycle detected")
                    .with_context(format!("cycle: {}", cycle.join(" -> ")))
                    .with_suggestion("Break the cycle by removing or restructuring requirements")
            }
        }
    }
}

/// Every configuration error found in one resolution pass, reported
/// together so a user can fix multiple problems at once.
#[derive(Debug)]
pub struct ValidationErrors {
    pub errors: Vec<ConfigError>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<ConfigError>) -> Self {
        ValidationErrors { errors }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// One diagnostic per error, for terminal rendering.
    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(ConfigError::to_diagnostic).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} configuration error(s)", self.errors.len())?;
        for err in &self.errors {
            writeln!(f, "  {}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
