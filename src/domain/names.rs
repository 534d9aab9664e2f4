//! Field name checks used for inline feedback

use regex::Regex;
use std::sync::LazyLock;

/// Letter or underscore, then letters, digits or underscores
static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

pub const INVALID_NAME_WARNING: &str =
    "Field name must be valid (alphanumeric, underscore, no spaces)";

/// True when the trimmed name is a conventional identifier
pub fn is_valid_name(raw: &str) -> bool {
    let name = raw.trim();
    !name.is_empty() && IDENTIFIER_RE.is_match(name)
}

/// Outcome of checking a name as the user types it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameCheck {
    /// Nothing entered yet; not worth a warning
    Empty,
    Valid,
    Invalid,
}

impl NameCheck {
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            NameCheck::Invalid => Some(INVALID_NAME_WARNING),
            _ => None,
        }
    }
}

pub fn check_name(raw: &str) -> NameCheck {
    if raw.trim().is_empty() {
        NameCheck::Empty
    } else if is_valid_name(raw) {
        NameCheck::Valid
    } else {
        NameCheck::Invalid
    }
}
