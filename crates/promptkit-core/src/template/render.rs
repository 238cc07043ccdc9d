//! Placeholder substitution.
//!
//! Two substitution modes are supported:
//!
//! - **Simultaneous** (default): the template is scanned once and every
//!   `{{identifier}}` token is looked up in the bindings. Placeholder syntax
//!   that appears inside a substituted value is emitted as-is.
//! - **Sequential**: bindings are applied one at a time, in insertion order,
//!   each replacing every literal occurrence of its token in the current
//!   buffer. A value containing `{{OTHER}}` is expanded again if `OTHER` is
//!   bound later, so the result depends on binding order.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::bindings::is_identifier;
use super::{Bindings, TemplateError};

/// `{{identifier}}` where the identifier is any run of non-brace characters.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("placeholder pattern is valid"));

/// Prefix marking an authoring comment line in a prompt file.
const COMMENT_PREFIX: &str = "///";

// ─────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────

/// How bindings are applied to a template.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubstitutionMode {
    #[default]
    Simultaneous,
    Sequential,
}

impl SubstitutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubstitutionMode::Simultaneous => "simultaneous",
            SubstitutionMode::Sequential => "sequential",
        }
    }
}

impl std::fmt::Display for SubstitutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubstitutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simultaneous" => Ok(SubstitutionMode::Simultaneous),
            "sequential" => Ok(SubstitutionMode::Sequential),
            other => Err(format!(
                "unknown substitution mode '{other}' (expected 'simultaneous' or 'sequential')"
            )),
        }
    }
}

/// Options for [`render_template_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub mode: SubstitutionMode,
    /// Fail with [`TemplateError::UnresolvedPlaceholder`] instead of leaving
    /// unbound tokens in the output.
    pub strict: bool,
    /// Drop `///` comment lines before substituting.
    pub strip_comments: bool,
}

impl RenderOptions {
    pub fn with_mode(mut self, mode: SubstitutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn strip_comments(mut self, strip: bool) -> Self {
        self.strip_comments = strip;
        self
    }
}

// ─────────────────────────────────────────────
// Public entry points
// ─────────────────────────────────────────────

/// Substitute bound placeholders, leaving unbound ones verbatim.
///
/// ```
/// use promptkit_core::template::{render_template, Bindings};
///
/// let vars = Bindings::from([("NAME", "Ada"), ("AGE", "30")]);
/// assert_eq!(
///     render_template("Hello {{NAME}}, you are {{AGE}}.", &vars),
///     "Hello Ada, you are 30."
/// );
/// ```
pub fn render_template(template: &str, bindings: &Bindings) -> String {
    render_simultaneous(template, bindings).0
}

/// Render with explicit options.
///
/// Only strict mode can fail. In simultaneous mode the unresolved set is
/// the template's own tokens that had no binding; in sequential mode it is
/// every token left in the final buffer.
pub fn render_template_with(
    template: &str,
    bindings: &Bindings,
    options: &RenderOptions,
) -> Result<String, TemplateError> {
    let stripped;
    let source = if options.strip_comments {
        stripped = strip_comment_lines(template);
        stripped.as_str()
    } else {
        template
    };

    let (rendered, unresolved) = match options.mode {
        SubstitutionMode::Simultaneous => render_simultaneous(source, bindings),
        SubstitutionMode::Sequential => {
            let rendered = render_sequential(source, bindings);
            let unresolved = placeholders(&rendered)
                .into_iter()
                .map(|name| token(&name))
                .collect();
            (rendered, unresolved)
        }
    };

    debug!(
        mode = %options.mode,
        bindings = bindings.len(),
        unresolved = unresolved.len(),
        "rendered template"
    );

    if options.strict && !unresolved.is_empty() {
        warn!(
            mode = %options.mode,
            unresolved = %unresolved.join(", "),
            "strict render failed"
        );
        return Err(TemplateError::UnresolvedPlaceholder {
            placeholders: unresolved,
        });
    }

    Ok(rendered)
}

/// Distinct placeholder identifiers in order of first appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for m in PLACEHOLDER_RE.find_iter(template) {
        let name = identifier(m.as_str());
        if !seen.iter().any(|s: &String| s == name) {
            seen.push(name.to_string());
        }
    }
    seen
}

/// Remove lines whose first non-blank characters are `///`.
///
/// A trailing newline on the input is preserved unless every line was
/// dropped.
pub fn strip_comment_lines(text: &str) -> String {
    let kept: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim_start().starts_with(COMMENT_PREFIX))
        .collect();
    let mut out = kept.join("\n");
    if text.ends_with('\n') && !kept.is_empty() {
        out.push('\n');
    }
    out
}

// ─────────────────────────────────────────────
// Substitution strategies
// ─────────────────────────────────────────────

/// Single pass over the template. Returns the output and the distinct
/// unbound tokens.
fn render_simultaneous(template: &str, bindings: &Bindings) -> (String, Vec<String>) {
    let lookup: HashMap<&str, &str> = bindings.iter().collect();
    let mut out = String::with_capacity(template.len());
    let mut unresolved: Vec<String> = Vec::new();
    let mut last = 0;

    for m in PLACEHOLDER_RE.find_iter(template) {
        out.push_str(&template[last..m.start()]);
        match lookup.get(identifier(m.as_str())) {
            Some(value) => out.push_str(value),
            None => {
                out.push_str(m.as_str());
                if !unresolved.iter().any(|t| t == m.as_str()) {
                    unresolved.push(m.as_str().to_string());
                }
            }
        }
        last = m.end();
    }
    out.push_str(&template[last..]);

    (out, unresolved)
}

/// One binding at a time, in insertion order. Names that are not
/// identifiers can never form a placeholder and are skipped.
fn render_sequential(template: &str, bindings: &Bindings) -> String {
    let mut buf = template.to_string();
    for (name, value) in bindings.iter().filter(|(name, _)| is_identifier(name)) {
        let needle = token(name);
        if buf.contains(&needle) {
            buf = buf.replace(&needle, value);
        }
    }
    buf
}

fn token(name: &str) -> String {
    format!("{{{{{name}}}}}")
}

/// Strip the `{{` / `}}` markers from a matched token.
fn identifier(token: &str) -> &str {
    &token[2..token.len() - 2]
}
