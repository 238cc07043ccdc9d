//! `promptkit encode` / `promptkit decode`.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use promptkit_core::base64::decode_base64;
use promptkit_core::config::load_config;
use promptkit_core::media::{encode_file, parse_data_url};

/// Encode a file and print the Base64 text (or a data URL).
pub fn encode(file: &Path, data_url: bool, mime: Option<&str>) -> Result<()> {
    let config = load_config(None);
    let mut encoded = encode_file(file, &config.media.fallback_mime)
        .with_context(|| format!("failed to encode {}", file.display()))?;
    if let Some(mime) = mime {
        encoded.mime = mime.to_string();
    }

    info!(
        file = %file.display(),
        size = encoded.size,
        encoded = encoded.payload.len(),
        "encoded"
    );

    if data_url {
        println!("{}", encoded.data_url());
    } else {
        println!("{}", encoded.payload);
    }
    Ok(())
}

/// Decode Base64 from a file or stdin and write the bytes out.
pub fn decode(input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let text = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let bytes = decode_text(&text)?;
    info!(decoded = bytes.len(), "decoded");

    match output {
        Some(path) => std::fs::write(path, &bytes)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes).context("failed to write stdout")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Decode Base64 text, tolerating line wrapping and a `data:` URL wrapper.
fn decode_text(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.starts_with("data:") {
        let url = parse_data_url(&compact).context("invalid data URL")?;
        return Ok(url.data);
    }
    decode_base64(&compact).context("invalid base64 input")
}
