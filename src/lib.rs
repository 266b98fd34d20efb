//! Prismo template engine - palette-driven patching of config files
//!
//! A theming tool derives a color palette from an image; this crate rewrites
//! fragments of external application config files to match. Templates are
//! small directive scripts (`@full`, `@line`, `@lines`, `@match`, `@append`,
//! `@prepend`) whose content blocks carry `{color}` substitution tokens.
//!
//! # Example
//!
//! ```rust
//! use prismo_template::{render, Palette};
//!
//! let palette: Palette = [("color0", "#ff0000")].into_iter().collect();
//! let patched = render("@append\naccent={color0}\n", &palette, "# config\n").unwrap();
//! assert!(patched.contains("accent=ff0000"));
//! ```

pub mod engine;
pub mod error;
pub mod palette;
pub mod parser;
pub mod substitute;

pub use engine::{ApplyError, LineBuffer};
pub use error::ParseError;
pub use palette::{Palette, PaletteError};
pub use parser::{parse, Operation, Template};
pub use substitute::substitute;

use thiserror::Error;

/// Errors that can occur during the parse-and-apply pipeline
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Error while parsing the template source
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Error while applying operations to the target
    #[error("apply error: {0}")]
    Apply(#[from] ApplyError),
}

impl From<Vec<ParseError>> for TemplateError {
    fn from(errors: Vec<ParseError>) -> Self {
        TemplateError::Parse(errors)
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse `source` and apply it to the file at `target_path`.
///
/// This is the main entry point for callers that hold a palette and a target
/// path: the target is created or rewritten in place, in a single write at
/// the end.
///
/// # Example
///
/// ```rust,no_run
/// use prismo_template::{apply, Palette};
///
/// let palette: Palette = [("color2", "#0000ff")].into_iter().collect();
/// apply("@match \"theme\"\ntheme = {color2}\n", &palette, "~/.config/app.conf").unwrap();
/// ```
pub fn apply(source: &str, colors: &Palette, target_path: &str) -> Result<(), TemplateError> {
    let template = parse(source)?;
    engine::apply(&template, colors, target_path)?;
    Ok(())
}

/// Parse `source` and run it against `existing` text without touching the
/// filesystem, returning the patched result. Backs the CLI dry-run mode.
pub fn render(source: &str, colors: &Palette, existing: &str) -> Result<String, TemplateError> {
    let template = parse(source)?;
    let buffer = if existing.is_empty() {
        LineBuffer::new()
    } else {
        LineBuffer::from_text(existing)
    };
    let buffer = engine::run(&template, colors, buffer)?;
    Ok(buffer.into_text())
}
