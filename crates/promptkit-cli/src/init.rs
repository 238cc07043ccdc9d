//! `promptkit init` — write the default config and example templates.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use promptkit_core::config::{get_config_path, load_config, save_config, Config};
use promptkit_core::utils::expand_home;

use crate::helpers::print_title;

/// Run the init command.
pub fn run() -> Result<()> {
    print_title("promptkit — Setup");

    let config_path = get_config_path();
    let config = load_config(Some(&config_path));
    setup(&config_path, &config)?;

    println!();
    println!(
        "{}",
        "  Setup complete! Try `promptkit render translate -v TEXT=hola --strict`.".green()
    );
    println!();
    Ok(())
}

/// Create the config file (if missing) and the template directory with
/// example templates.
fn setup(config_path: &Path, config: &Config) -> Result<()> {
    if config_path.exists() {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    } else {
        save_config(config, Some(config_path))
            .with_context(|| format!("failed to write {}", config_path.display()))?;
        println!(
            "  {} created config at {}",
            "✓".green(),
            config_path.display()
        );
    }

    let template_dir = expand_home(&config.template.template_dir);
    std::fs::create_dir_all(&template_dir)
        .with_context(|| format!("failed to create {}", template_dir.display()))?;
    println!(
        "  {} templates at {}",
        "✓".green(),
        template_dir.display()
    );

    for (file, content) in EXAMPLE_TEMPLATES {
        create_template(&template_dir.join(file), content)?;
    }
    Ok(())
}

/// Create a template file if it doesn't exist.
fn create_template(path: &Path, content: &str) -> Result<()> {
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    if path.exists() {
        println!("  {} {} already exists", "✓".green(), name);
    } else {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("  {} created {}", "✓".green(), name);
    }
    Ok(())
}

// ─────────────────────────────────────────────
// Templates
// ─────────────────────────────────────────────

const EXAMPLE_TEMPLATES: &[(&str, &str)] = &[
    ("explain.txt", EXPLAIN_TEMPLATE),
    ("translate.txt", TRANSLATE_TEMPLATE),
    ("code_review.txt", CODE_REVIEW_TEMPLATE),
    ("summarize.txt", SUMMARIZE_TEMPLATE),
    ("essay_writer.txt", ESSAY_TEMPLATE),
];

const EXPLAIN_TEMPLATE: &str = r#"/// Variables: {{ROLE}}, {{TOPIC}}, {{LEVEL}}, {{MAX_WORDS}}
You are a {{ROLE}} expert.
Explain {{TOPIC}} to someone who is {{LEVEL}}.
Keep your explanation under {{MAX_WORDS}} words.
Focus on practical examples.
"#;

const TRANSLATE_TEMPLATE: &str = r#"/// Variables: {{SOURCE_LANG}}, {{TARGET_LANG}}, {{TEXT}}
Translate the following {{SOURCE_LANG}} text to {{TARGET_LANG}}:
{{TEXT}}
"#;

const CODE_REVIEW_TEMPLATE: &str = r#"/// Variables: {{LANGUAGE}}, {{REVIEW_TYPE}}, {{CODE}}
Review this {{LANGUAGE}} code for {{REVIEW_TYPE}}:
{{CODE}}
"#;

const SUMMARIZE_TEMPLATE: &str = r#"/// Variables: {{CONTENT_TYPE}}, {{FORMAT}}, {{CONTENT}}
Summarize the following {{CONTENT_TYPE}} in {{FORMAT}}:
{{CONTENT}}
"#;

const ESSAY_TEMPLATE: &str = r#"/// Template for writing educational essays
/// Variables: {{NOW}} = current timestamp, {{CATEGORY}} = essay category, {{TOPIC}} = essay topic
/// Lines starting with /// are removed before rendering

# OBJECTIVE

Write an engaging, educational essay about {{TOPIC}} in the {{CATEGORY}} category.
The essay should be appropriate for students aged 14-18, informative yet accessible.
Current timestamp: {{NOW}}

# ESSAY REQUIREMENTS

* **Length:** 500-750 words (approximately 5-7 paragraphs)
* **Structure:** Introduction, 3-4 body paragraphs, conclusion
* **Tone:** Educational, engaging, age-appropriate
* **Citations:** Include at least 3 factual references

# OUTPUT FORMAT

Provide the essay with:
- Clear, descriptive title
- Well-structured paragraphs with topic sentences
- Key terms defined in context
- 2-3 discussion questions at the end
"#;
