//! Bounds-checked line-range replacement.

use std::fmt;

use crate::buffer::{LineBuffer, split_lines};

/// Line-range violations. Every variant carries the numbers that
/// triggered it so the message can name both the given and the actual
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    /// `start_line` was below 1
    StartBelowOne { start: usize },
    /// `end_line` was below 1
    EndBelowOne { end: usize },
    /// `start_line` was greater than `end_line`
    StartAfterEnd { start: usize, end: usize },
    /// `start_line` lies beyond the last line of the buffer
    StartBeyondEof { start: usize, total: usize },
    /// `end_line` lies beyond the last line of the buffer
    EndBeyondEof { end: usize, total: usize },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::StartBelowOne { start } => {
                write!(f, "start line must be at least 1, got {}", start)
            }
            EditError::EndBelowOne { end } => {
                write!(f, "end line must be at least 1, got {}", end)
            }
            EditError::StartAfterEnd { start, end } => {
                write!(f, "start line {} is greater than end line {}", start, end)
            }
            EditError::StartBeyondEof { start, total } => {
                write!(f, "start line {} is beyond the last line; the file has {} lines", start, total)
            }
            EditError::EndBeyondEof { end, total } => {
                write!(f, "end line {} is beyond the last line; the file has {} lines", end, total)
            }
        }
    }
}

impl std::error::Error for EditError {}

pub type EditResult<T> = Result<T, EditError>;

/// Outcome of a successful range replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOutcome {
    /// Lines removed from the original buffer
    pub lines_replaced: usize,
    /// Line count after the splice
    pub total_lines: usize,
}

/// Replace the inclusive 1-based range `[start_line, end_line]` of
/// `buffer` with `replacement`.
///
/// The replacement is split on the same terminator grammar as the source
/// (bare `\n` or `\r\n`); an empty string still contributes one empty
/// line. Lines outside the range keep their content and order, so the
/// new length is `total - (end - start + 1) + replacement_lines`.
pub fn replace_lines(
    buffer: &mut LineBuffer,
    start_line: usize,
    end_line: usize,
    replacement: &str,
) -> EditResult<EditOutcome> {
    let total = buffer.line_count();

    if start_line < 1 {
        return Err(EditError::StartBelowOne { start: start_line });
    }
    if end_line < 1 {
        return Err(EditError::EndBelowOne { end: end_line });
    }
    if start_line > end_line {
        return Err(EditError::StartAfterEnd { start: start_line, end: end_line });
    }
    if start_line > total {
        return Err(EditError::StartBeyondEof { start: start_line, total });
    }
    if end_line > total {
        return Err(EditError::EndBeyondEof { end: end_line, total });
    }

    let replacement_lines = split_lines(replacement);
    let lines_replaced = end_line - start_line + 1;
    buffer.splice_lines(start_line - 1, end_line, replacement_lines);

    Ok(EditOutcome { lines_replaced, total_lines: buffer.line_count() })
}
