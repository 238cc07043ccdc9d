//! promptkit CLI — entry point.
//!
//! # Commands
//!
//! - `promptkit encode FILE [--data-url]` — Base64-encode a file
//! - `promptkit decode [FILE] [-o OUT]` — decode Base64 text or a data URL
//! - `promptkit render TEMPLATE [-v KEY=VALUE]...` — render a prompt template
//! - `promptkit placeholders TEMPLATE` — list a template's placeholders
//! - `promptkit init` — write default config + example templates
//! - `promptkit status` — show configuration

mod codec_cmd;
mod helpers;
mod init;
mod render_cmd;
mod status;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use promptkit_core::template::SubstitutionMode;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// promptkit — Base64 payloads and prompt templates for LLM gateway requests
#[derive(Parser)]
#[command(name = "promptkit", version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Base64-encode a file (e.g. an image for a vision request)
    Encode {
        /// File to encode
        file: PathBuf,

        /// Print a `data:<mime>;base64,...` URL instead of bare Base64
        #[arg(long, default_value_t = false)]
        data_url: bool,

        /// MIME type for the data URL (guessed from the extension by default)
        #[arg(long)]
        mime: Option<String>,
    },

    /// Decode Base64 text (or a data URL) back to bytes
    Decode {
        /// File containing the text. Reads stdin when omitted or "-".
        input: Option<PathBuf>,

        /// Write the decoded bytes here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a prompt template
    Render {
        /// Template path, or a name inside the configured template directory
        template: String,

        /// Placeholder binding, repeatable
        #[arg(short = 'v', long = "var", value_name = "KEY=VALUE")]
        vars: Vec<String>,

        /// Substitution mode: simultaneous or sequential
        #[arg(long)]
        mode: Option<SubstitutionMode>,

        /// Fail if any placeholder is left unbound
        #[arg(long, default_value_t = false)]
        strict: bool,

        /// Keep `///` comment lines
        #[arg(long, default_value_t = false)]
        keep_comments: bool,

        /// Bind NOW to the current UTC time (unless given with --var)
        #[arg(long, default_value_t = false)]
        now: bool,

        /// Only print the first N characters
        #[arg(long, value_name = "N")]
        preview: Option<usize>,
    },

    /// List the placeholders a template uses
    Placeholders {
        /// Template path, or a name inside the configured template directory
        template: String,

        /// Include placeholders that only appear in `///` comment lines
        #[arg(long, default_value_t = false)]
        keep_comments: bool,
    },

    /// Write the default config and example templates
    Init,

    /// Show configuration
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logs);

    match cli.command {
        Commands::Encode {
            file,
            data_url,
            mime,
        } => codec_cmd::encode(&file, data_url, mime.as_deref()),
        Commands::Decode { input, output } => {
            codec_cmd::decode(input.as_deref(), output.as_deref())
        }
        Commands::Render {
            template,
            vars,
            mode,
            strict,
            keep_comments,
            now,
            preview,
        } => render_cmd::render(render_cmd::RenderArgs {
            template,
            vars,
            mode,
            strict,
            keep_comments,
            now,
            preview,
        }),
        Commands::Placeholders {
            template,
            keep_comments,
        } => render_cmd::list_placeholders(&template, keep_comments),
        Commands::Init => init::run(),
        Commands::Status => status::run(),
    }
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("promptkit=debug,promptkit_core=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
