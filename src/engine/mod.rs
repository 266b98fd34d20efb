//! Operation executor
//!
//! Applies a parsed template to a target file: the target's lines are loaded
//! into an exclusively owned [`LineBuffer`], every operation runs in source
//! order against current indices, and the result is written back in a single
//! pass at the end. A failing operation therefore never leaves the target
//! partially written.

pub mod buffer;
pub mod target;

pub use buffer::LineBuffer;
pub use target::resolve_target;

use regex::Regex;
use thiserror::Error;

use crate::palette::Palette;
use crate::parser::{Operation, Template};
use crate::substitute::substitute;

/// Errors raised while applying a template to a target
#[derive(Error, Debug)]
pub enum ApplyError {
    #[error("no target path specified")]
    EmptyTarget,

    #[error("line number must be >= 1, got {line}")]
    LineOutOfRange { line: usize },

    #[error("invalid line range {start}-{end}: bounds must be >= 1 and start <= end")]
    InvalidRange { start: usize, end: usize },

    #[error("invalid regex pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("target I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run every operation against an in-memory buffer.
///
/// This is the whole executor minus the filesystem; [`apply`] wraps it with
/// target resolution, tolerant reading, and the final write. The CLI dry-run
/// mode and most tests call it directly.
pub fn run(
    template: &Template,
    colors: &Palette,
    mut buffer: LineBuffer,
) -> Result<LineBuffer, ApplyError> {
    for op in template.operations() {
        let content = substitute(op.content(), colors);
        match op {
            Operation::Full { .. } => buffer.replace_all(&content),
            Operation::SetLine { line, .. } => {
                if *line < 1 {
                    return Err(ApplyError::LineOutOfRange { line: *line });
                }
                buffer.set_line(*line, &content);
            }
            Operation::SetRange { start, end, .. } => {
                if *start < 1 || *end < 1 || start > end {
                    return Err(ApplyError::InvalidRange {
                        start: *start,
                        end: *end,
                    });
                }
                buffer.replace_range(*start, *end, &content);
            }
            Operation::ReplaceMatching { pattern, .. } => {
                let regex = Regex::new(pattern).map_err(|source| ApplyError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?;
                // Zero matches is fine: some templates only fire when the
                // target already has the shape they look for.
                buffer.replace_matching(&regex, &content);
            }
            Operation::Append { .. } => buffer.append(&content),
            Operation::Prepend { .. } => buffer.prepend(&content),
        }
    }
    Ok(buffer)
}

/// Apply a template to the file at `target_path`.
///
/// The path may use `~` and environment-variable references. A missing
/// target starts empty and is created, parent directories included.
pub fn apply(template: &Template, colors: &Palette, target_path: &str) -> Result<(), ApplyError> {
    let resolved = resolve_target(target_path)?;
    let buffer = target::load_buffer(&resolved)?;
    let buffer = run(template, colors, buffer)?;
    target::write_buffer(&resolved, buffer)
}
