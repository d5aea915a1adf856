use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Regex patterns used to scrub credentials from log output.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Compact session token: three base64url segments joined by dots
    /// SAFETY: This regex pattern is a vetted literal that compiles successfully
    pub fn compact_token() -> &'static Regex {
        static COMPACT_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}").unwrap()
        });
        &COMPACT_TOKEN_REGEX
    }

    /// Opaque base64url run (≥16 chars), e.g. a bare signature
    /// SAFETY: This regex pattern is a vetted literal that compiles successfully
    pub fn opaque_token() -> &'static Regex {
        static OPAQUE_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9_-]{16,}").unwrap()
        });
        &OPAQUE_TOKEN_REGEX
    }
}

/// Redacts credentials from a string.
///
/// Compact tokens are replaced first so their segments are not matched
/// individually, then any remaining long opaque run.
pub fn redact(input: &str) -> String {
    let compact = PiiRegexRegistry::compact_token().replace_all(input, "[REDACTED_TOKEN]");
    PiiRegexRegistry::opaque_token()
        .replace_all(&compact, "[REDACTED_TOKEN]")
        .to_string()
}

/// Keep the first character of an identifier and hide the rest.
pub fn mask(input: &str) -> String {
    match input.chars().next() {
        Some(first) => format!("{first}***"),
        None => String::new(),
    }
}

/// Displays a string with credentials redacted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

/// Displays an identifier (username) with all but its first character hidden.
pub struct Masked<'a>(pub &'a str);

impl fmt::Display for Masked<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", mask(self.0))
    }
}

impl fmt::Debug for Masked<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", mask(self.0))
    }
}
