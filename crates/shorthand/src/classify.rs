//! Line classification for Objective-C category headers
//!
//! One classifier feeds all three renderers, so the declaration patterns
//! live here and nowhere else. These are the only shapes the tool
//! understands; anything else is passed through untouched.

use once_cell::sync::Lazy;
use regex::Regex;

/// Method declaration: sigil + return type, the selector head, and the rest
/// of the line (argument labels, types, modifiers, terminator).
static METHOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<start>[+\-]\s*\([a-zA-Z\s*]*\)\s*)(?P<name>\w+)(?P<end>:?.*)").unwrap()
});

/// Category interface: `@interface Object (Category)`, category optional.
static INTERFACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*@[[:alnum:]]+\s*(?P<object>[[:alnum:]]+)\s*(\((?P<category>\w+)\))?").unwrap()
});

/// The classification of one header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// `@interface <Object> (<Category>)`
    InterfaceOpen {
        object: String,
        category: Option<String>,
    },
    /// A `+`/`-` method declaration
    Method(MethodSig),
    /// `@end`
    InterfaceClose,
    /// Anything else, kept verbatim
    Passthrough(String),
}

/// The three captured fragments of a method declaration line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSig {
    /// Leading sigil and parenthesized return type
    pub start: String,
    /// First identifier of the selector
    pub name: String,
    /// Everything after the name, terminator included
    pub end: String,
}

impl MethodSig {
    /// Selector head with the reserved prefix removed
    pub fn shorthand_name<'a>(&'a self, prefix: &str) -> &'a str {
        self.name.strip_prefix(prefix).unwrap_or(&self.name)
    }
}

/// Classify one line of a category header
pub fn classify_line(line: &str) -> Declaration {
    if line.starts_with("@interface") {
        if let Some(caps) = INTERFACE_RE.captures(line) {
            return Declaration::InterfaceOpen {
                object: caps["object"].to_string(),
                category: caps.name("category").map(|m| m.as_str().to_string()),
            };
        }
    }

    if line.starts_with("@end") {
        return Declaration::InterfaceClose;
    }

    if let Some(caps) = METHOD_RE.captures(line) {
        return Declaration::Method(MethodSig {
            start: caps["start"].to_string(),
            name: caps["name"].to_string(),
            end: caps["end"].to_string(),
        });
    }

    Declaration::Passthrough(line.to_string())
}
