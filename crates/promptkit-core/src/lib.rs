//! promptkit core — the codec and templating pieces behind LLM gateway requests.
//!
//! - **base64**: standard padded Base64 encode/decode
//! - **media**: MIME guessing and `data:` URLs for image payloads
//! - **template**: `{{placeholder}}` prompt rendering
//! - **config**: `~/.promptkit/config.json` + env var overrides
//! - **utils**: paths, timestamps, string helpers
//!
//! Everything outside `config` and the file-reading helpers is pure and
//! safe to call from any thread.

pub mod base64;
pub mod config;
pub mod media;
pub mod template;
pub mod utils;

pub use base64::{decode_base64, encode_base64, Base64Error};
pub use media::{parse_data_url, to_data_url, DataUrl, MediaError};
pub use template::{
    render_template, render_template_with, Bindings, PromptTemplate, RenderOptions,
    SubstitutionMode, TemplateError,
};
