//! Named prompt templates loaded from strings or files.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::render::{placeholders, render_template_with, strip_comment_lines, RenderOptions};
use super::{Bindings, TemplateError};

/// Extension tried when a template is referenced by bare name.
pub const TEMPLATE_EXTENSION: &str = "txt";

/// A prompt template and the name it was loaded under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptTemplate {
    name: String,
    source: String,
}

impl PromptTemplate {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Load a template file. The name is the file stem.
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let source = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        debug!(template = %name, path = %path.display(), bytes = source.len(), "loaded template");
        Ok(Self { name, source })
    }

    /// Resolve `reference` to a file: an existing path is used as-is,
    /// otherwise it is looked up in `dir`, with and without the `.txt`
    /// extension.
    pub fn resolve(reference: &str, dir: &Path) -> Option<PathBuf> {
        let direct = PathBuf::from(reference);
        if direct.is_file() {
            return Some(direct);
        }
        let in_dir = dir.join(reference);
        if in_dir.is_file() {
            return Some(in_dir);
        }
        let with_ext = dir.join(format!("{reference}.{TEMPLATE_EXTENSION}"));
        with_ext.is_file().then_some(with_ext)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholder identifiers, optionally ignoring `///` comment lines.
    pub fn placeholders(&self, strip_comments: bool) -> Vec<String> {
        if strip_comments {
            placeholders(&strip_comment_lines(&self.source))
        } else {
            placeholders(&self.source)
        }
    }

    pub fn render(
        &self,
        bindings: &Bindings,
        options: &RenderOptions,
    ) -> Result<String, TemplateError> {
        render_template_with(&self.source, bindings, options)
    }
}
