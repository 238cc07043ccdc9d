//! Prompt templates — `{{identifier}}` placeholder substitution.
//!
//! - [`Bindings`] — ordered identifier → value map
//! - [`render_template`] — permissive, single-pass substitution
//! - [`render_template_with`] — mode / strict / comment-stripping options
//! - [`PromptTemplate`] — a named template, usually loaded from disk

pub mod bindings;
pub mod prompt;
pub mod render;

use std::path::PathBuf;

use thiserror::Error;

pub use bindings::Bindings;
pub use prompt::PromptTemplate;
pub use render::{
    placeholders, render_template, render_template_with, strip_comment_lines, RenderOptions,
    SubstitutionMode,
};

/// Errors raised by the template layer.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Strict mode only: placeholders left after every binding was applied.
    #[error("unresolved placeholders: {}", .placeholders.join(", "))]
    UnresolvedPlaceholder { placeholders: Vec<String> },

    /// A `KEY=VALUE` assignment without `=` or with an empty key.
    #[error("invalid binding {0:?}, expected KEY=VALUE")]
    InvalidAssignment(String),

    #[error("failed to read template {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
