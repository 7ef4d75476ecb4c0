//! Rendering of classified lines into the three generated forms
//!
//! Each mode is a pure function over a [`Declaration`]: the shorthand
//! header, the shorthand implementation (thin forwarders to the prefixed
//! selectors), and the deprecation-annotated original. `None` means the
//! line contributes nothing to that artifact.

use crate::classify::{Declaration, MethodSig};
use crate::config::ShorthandConfig;
use once_cell::sync::Lazy;
use regex::Regex;

const IOS_GUARD_OPEN: &str = "#if TARGET_OS_IPHONE || TARGET_IPHONE_SIMULATOR";
const IOS_GUARD_CLOSE: &str = "#endif /* TARGET_OS_IPHONE || TARGET_IPHONE_SIMULATOR */";

/// Parenthesized type annotations inside a selector, e.g. `(NSString *)`
static TYPE_PAREN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]+\)+").unwrap());

/// Platform availability macros, e.g. ` NS_AVAILABLE_IOS(5_0)`
static AVAILABILITY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\sNS_\S+").unwrap());

/// An argument's type-and-identifier (`:(Type)name`) or trailing
/// type-only (`:(Type...`) fragment, collapsed to a bare label colon
static ARG_COLLAPSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":\([^)]+\)\w+|:\(.+").unwrap());

/// Incidental spacing after an argument-label colon
static COLON_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r":\s").unwrap());

/// Render one declaration for the shorthand header artifact
pub fn shorthand_header(decl: &Declaration, config: &ShorthandConfig) -> Option<String> {
    match decl {
        Declaration::InterfaceOpen { object, category } => Some(format!(
            "\n@interface {} ({}{})\n",
            object,
            category.as_deref().unwrap_or(""),
            crate::SHORTHAND_CATEGORY_SUFFIX
        )),
        Declaration::Method(sig) => {
            let end = strip_deprecation_suffix(&sig.end, &config.deprecation_marker);
            let line = format!("{}{}{}", sig.start, sig.shorthand_name(&config.prefix), end);
            Some(wrap_platform_guard(line, config))
        }
        Declaration::InterfaceClose => Some("\n@end\n".to_string()),
        Declaration::Passthrough(_) => None,
    }
}

/// Render one declaration for the shorthand implementation artifact
pub fn shorthand_implementation(decl: &Declaration, config: &ShorthandConfig) -> Option<String> {
    match decl {
        Declaration::InterfaceOpen { object, category } => Some(format!(
            "\n@implementation {} ({}{})\n",
            object,
            category.as_deref().unwrap_or(""),
            crate::SHORTHAND_CATEGORY_SUFFIX
        )),
        Declaration::Method(sig) => {
            let end = strip_deprecation_suffix(&sig.end, &config.deprecation_marker);
            let end = AVAILABILITY_RE.replace_all(&end, "").to_string();
            let call = self_call_expression(&sig.name, &end);
            let block = format!(
                "{}{}{}\n{{\n    return [self {}];\n}}\n",
                sig.start,
                sig.shorthand_name(&config.prefix),
                end,
                call
            );
            Some(wrap_platform_guard(block, config))
        }
        Declaration::InterfaceClose => Some("@end\n".to_string()),
        Declaration::Passthrough(_) => None,
    }
}

/// Render one line for the deprecation-annotated original header
///
/// Only method declarations change; interface open/close and passthrough
/// lines stay byte-identical so annotating a header twice is a fixpoint.
pub fn deprecation_annotated(line: &str, decl: &Declaration, config: &ShorthandConfig) -> String {
    match decl {
        Declaration::Method(sig) => {
            if sig.end.contains(&config.deprecation_marker) {
                return format!("{}{}{}", sig.start, sig.name, sig.end);
            }
            let suggestion = deprecation_suggestion(sig);
            format!(
                "{}{}{} {}(\"Use {} instead\");",
                sig.start, sig.name, sig.end, config.deprecation_marker, suggestion
            )
        }
        _ => line.to_string(),
    }
}

/// Turn a declaration tail into a call expression tail: drop the
/// terminator and every parenthesized type so argument labels survive
fn self_call_expression(prefixed_name: &str, end: &str) -> String {
    let tail = strip_terminator(end);
    let tail = TYPE_PAREN_RE.replace_all(tail, "");
    format!("{}{}", prefixed_name, tail)
}

/// Replacement signature quoted inside the deprecation message: the
/// prefixed selector with each argument collapsed to its bare label
fn deprecation_suggestion(sig: &MethodSig) -> String {
    let end = sig.end.replacen(';', "", 1);
    let end = ARG_COLLAPSE_RE.replace_all(&end, ":");
    let end = COLON_SPACE_RE.replace_all(&end, ":");
    let end = AVAILABILITY_RE.replace_all(&end, "");
    format!("{}{}", sig.name, strip_terminator(&end))
}

/// Remove a deprecation-macro suffix from a declaration tail
fn strip_deprecation_suffix(end: &str, marker: &str) -> String {
    match end.find(marker) {
        Some(idx) => end[..idx].trim_end().to_string(),
        None => end.to_string(),
    }
}

fn strip_terminator(s: &str) -> &str {
    let trimmed = s.trim_end();
    trimmed.strip_suffix(';').unwrap_or(trimmed)
}

/// Wrap iOS-only declarations in the platform compile guard, once and
/// symmetrically
fn wrap_platform_guard(rendered: String, config: &ShorthandConfig) -> String {
    if rendered.contains(&config.platform_conditional_type) {
        format!("\n{}\n\n{}\n\n{}", IOS_GUARD_OPEN, rendered, IOS_GUARD_CLOSE)
    } else {
        rendered
    }
}
