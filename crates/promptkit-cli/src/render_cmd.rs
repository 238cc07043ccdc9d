//! `promptkit render` / `promptkit placeholders`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::{debug, info};

use promptkit_core::config::{load_config, TemplateConfig};
use promptkit_core::template::{Bindings, PromptTemplate, RenderOptions, SubstitutionMode};
use promptkit_core::utils::{expand_home, truncate_string, utc_timestamp};

/// Built-in binding filled by `--now`.
const NOW_BINDING: &str = "NOW";

/// Parsed `render` arguments.
pub struct RenderArgs {
    pub template: String,
    pub vars: Vec<String>,
    pub mode: Option<SubstitutionMode>,
    pub strict: bool,
    pub keep_comments: bool,
    pub now: bool,
    pub preview: Option<usize>,
}

/// Render a template and print it to stdout.
pub fn render(args: RenderArgs) -> Result<()> {
    let config = load_config(None);
    let template = load_template(&args.template, &config.template)?;
    let bindings = build_bindings(&args.vars, args.now)?;
    let options = resolve_options(&config.template, args.mode, args.strict, args.keep_comments);

    info!(
        template = template.name(),
        bindings = bindings.len(),
        mode = %options.mode,
        strict = options.strict,
        "rendering"
    );

    let rendered = template
        .render(&bindings, &options)
        .with_context(|| format!("failed to render template '{}'", template.name()))?;

    match args.preview {
        Some(limit) => {
            println!("{}", preview(&rendered, limit));
            println!();
            println!(
                "{}",
                format!(
                    "(showing at most {} of {} characters)",
                    limit,
                    rendered.chars().count()
                )
                .dimmed()
            );
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

/// At most `limit` characters of `text`; the `...` marker only fits above 3.
fn preview(text: &str, limit: usize) -> String {
    if limit <= 3 {
        text.chars().take(limit).collect()
    } else {
        truncate_string(text, limit)
    }
}

/// Print one placeholder identifier per line.
pub fn list_placeholders(reference: &str, keep_comments: bool) -> Result<()> {
    let config = load_config(None);
    let template = load_template(reference, &config.template)?;
    let strip = config.template.strip_comments && !keep_comments;

    let names = template.placeholders(strip);
    if names.is_empty() {
        println!("{}", "(no placeholders)".dimmed());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

/// Resolve a template reference against the configured directory and load it.
fn load_template(reference: &str, config: &TemplateConfig) -> Result<PromptTemplate> {
    let dir = expand_home(&config.template_dir);
    let path: PathBuf = PromptTemplate::resolve(reference, &dir).with_context(|| {
        format!(
            "template '{}' not found (also looked in {})",
            reference,
            dir.display()
        )
    })?;
    debug!(reference, path = %path.display(), "resolved template");
    Ok(PromptTemplate::from_file(&path)?)
}

/// Parse `KEY=VALUE` arguments, adding `NOW` when requested and not given.
fn build_bindings(vars: &[String], now: bool) -> Result<Bindings> {
    let mut bindings = Bindings::new();
    for var in vars {
        let (key, value) = Bindings::parse_assignment(var)?;
        bindings.insert(key, value);
    }
    if now && !bindings.contains(NOW_BINDING) {
        bindings.insert(NOW_BINDING, utc_timestamp());
    }
    Ok(bindings)
}

/// Command-line flags layered over the configured defaults.
fn resolve_options(
    config: &TemplateConfig,
    mode: Option<SubstitutionMode>,
    strict: bool,
    keep_comments: bool,
) -> RenderOptions {
    let mut options = config.render_options();
    if let Some(mode) = mode {
        options.mode = mode;
    }
    if strict {
        options.strict = true;
    }
    if keep_comments {
        options.strip_comments = false;
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_respects_limit() {
        assert_eq!(preview("hello world", 8), "hello...");
        assert_eq!(preview("hello", 8), "hello");
        assert_eq!(preview("hello", 3), "hel");
        assert_eq!(preview("hello", 1), "h");
        assert_eq!(preview("hello", 0), "");
        for limit in 0..12 {
            assert!(preview("hello world", limit).chars().count() <= limit);
        }
    }

    #[test]
    fn test_bindings_from_vars() {
        let vars = vec!["TOPIC=recursion".to_string(), "LEVEL=beginner".to_string()];
        let b = build_bindings(&vars, false).unwrap();
        assert_eq!(b.get("TOPIC"), Some("recursion"));
        assert_eq!(b.get("LEVEL"), Some("beginner"));
        assert!(!b.contains("NOW"));
    }

    #[test]
    fn test_bindings_now_added() {
        let b = build_bindings(&[], true).unwrap();
        assert!(b.get("NOW").unwrap().ends_with(" UTC"));
    }

    #[test]
    fn test_bindings_now_not_overridden() {
        let vars = vec!["NOW=yesterday".to_string()];
        let b = build_bindings(&vars, true).unwrap();
        assert_eq!(b.get("NOW"), Some("yesterday"));
    }

    #[test]
    fn test_bindings_invalid_assignment() {
        let vars = vec!["oops".to_string()];
        let err = build_bindings(&vars, false).unwrap_err();
        assert!(err.to_string().contains("KEY=VALUE"));
    }

    #[test]
    fn test_options_flags_override_config() {
        let config = TemplateConfig::default();
        let opts = resolve_options(&config, Some(SubstitutionMode::Sequential), true, true);
        assert_eq!(opts.mode, SubstitutionMode::Sequential);
        assert!(opts.strict);
        assert!(!opts.strip_comments);
    }

    #[test]
    fn test_options_default_to_config() {
        let config = TemplateConfig {
            strict: true,
            ..TemplateConfig::default()
        };
        let opts = resolve_options(&config, None, false, false);
        assert_eq!(opts.mode, SubstitutionMode::Simultaneous);
        assert!(opts.strict);
        assert!(opts.strip_comments);
    }

    #[test]
    fn test_load_template_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("greet.txt"), "Hello {{NAME}}").unwrap();
        let config = TemplateConfig {
            template_dir: dir.path().to_string_lossy().into_owned(),
            ..TemplateConfig::default()
        };

        let tpl = load_template("greet", &config).unwrap();
        assert_eq!(tpl.name(), "greet");

        let err = load_template("missing", &config).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
