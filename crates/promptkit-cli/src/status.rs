//! `promptkit status` — show configuration and template directory.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use promptkit_core::config::{get_config_path, load_config};
use promptkit_core::template::prompt::TEMPLATE_EXTENSION;
use promptkit_core::utils::expand_home;

use crate::helpers::{print_title, status_mark};

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    print_title("promptkit Status");

    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        status_mark(config_path.exists(), "(not found)")
    );

    let template_dir = expand_home(&config.template.template_dir);
    let count = count_templates(&template_dir);
    println!(
        "  {:<18} {} {} {}",
        "Templates:".bold(),
        template_dir.display(),
        status_mark(template_dir.is_dir(), "(not found)"),
        format!("({count} found)").dimmed()
    );

    println!();
    println!("  {}", "Rendering:".bold());
    println!("    {:<18} {}", "mode", config.template.mode);
    println!("    {:<18} {}", "strict", config.template.strict);
    println!("    {:<18} {}", "strip comments", config.template.strip_comments);

    println!();
    println!("  {}", "Media:".bold());
    println!("    {:<18} {}", "fallback mime", config.media.fallback_mime);
    println!();

    Ok(())
}

/// Number of `.txt` files directly inside `dir` (0 if unreadable).
fn count_templates(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter(|e| {
                    e.path()
                        .extension()
                        .is_some_and(|ext| ext == TEMPLATE_EXTENSION)
                })
                .count()
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_templates_only_txt() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::write(dir.path().join("notes.md"), "").unwrap();
        assert_eq!(count_templates(dir.path()), 2);
    }

    #[test]
    fn test_count_templates_missing_dir() {
        assert_eq!(count_templates(Path::new("/nonexistent/templates")), 0);
    }
}
