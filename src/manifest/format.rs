use crate::{ManifestError, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use std::fmt;

/// Indentation unit used when writing a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(usize),
    Tab,
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(4)
    }
}

impl Indent {
    /// Guess the indentation unit from the first indented line of `text`.
    ///
    /// Minified documents have no indented line and get the default.
    pub fn detect(text: &str) -> Self {
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .find_map(|line| {
                if line.starts_with('\t') {
                    Some(Indent::Tab)
                } else {
                    let width = line.len() - line.trim_start_matches(' ').len();
                    (width > 0).then_some(Indent::Spaces(width))
                }
            })
            .unwrap_or_default()
    }

    fn unit(&self) -> String {
        match self {
            Indent::Spaces(width) => " ".repeat(*width),
            Indent::Tab => "\t".to_string(),
        }
    }
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indent::Spaces(width) => write!(f, "{width} spaces"),
            Indent::Tab => write!(f, "tab"),
        }
    }
}

/// Serialize `value` as pretty JSON with a trailing newline.
///
/// Non-ASCII text is written as UTF-8, not escaped.
pub fn to_pretty_string(value: &Value, indent: Indent) -> Result<String> {
    let unit = indent.unit();
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(unit.as_bytes()));
    value
        .serialize(&mut serializer)
        .map_err(|e| ManifestError::Format(format!("failed to serialize manifest: {e}")))?;
    buffer.push(b'\n');
    String::from_utf8(buffer)
        .map_err(|e| ManifestError::Format(format!("serialized manifest is not UTF-8: {e}")))
}
