//! Accept/reject rules for class-name candidates.
//!
//! Every rule lives in [`REJECT_RULES`] and is checked in table order; the
//! first rule that matches rejects the token. Rules see the token twice: raw,
//! and as an "outer view" where the contents of arbitrary-value groups
//! (`[...]`, `(...)`) are blanked out, so `content-['Hi']` or `[&>*]:p-4` are
//! judged by their utility shape rather than by the literal CSS they carry.

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Deserialize};

use crate::class::scanner::extractor::has_interpolation;

/// Shortest token length that can ever be accepted
pub const MIN_CLASS_LENGTH: usize = 2;

const PROTOCOL_PREFIXES: &[&str] = &["http:", "https:", "mailto:", "tel:", "data:", "javascript:"];

const ASSET_EXTENSIONS: &[&str] = &[
    ".js", ".jsx", ".mjs", ".cjs", ".ts", ".tsx", ".css", ".scss", ".json", ".html", ".vue",
    ".svelte", ".astro", ".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".ico", ".md",
];

const STRAY_PUNCTUATION: &[char] = &['"', '\'', '`', ';', ',', '$', '\\'];

static ATTRIBUTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_@:][\w.:-]*=").unwrap());

// `w-1/2`, `bg-black/50`, `text-white/[]` (outer view of `text-white/[0.8]`)
static UTILITY_SLASH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^/]*-[^/]*/(?:\d+(?:\.\d+)?|\[\]|\(\)|full|px)$").unwrap());

/// Tunable parts of the filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterPolicy {
    /// Minimum token length; values below [`MIN_CLASS_LENGTH`] are raised to it
    pub min_length: usize,

    /// Accept tokens with uppercase letters outside arbitrary-value groups
    pub allow_uppercase: bool,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            min_length: MIN_CLASS_LENGTH,
            allow_uppercase: false,
        }
    }
}

impl FilterPolicy {
    /// Effective minimum length
    pub fn min_length(&self) -> usize {
        self.min_length.max(MIN_CLASS_LENGTH)
    }
}

/// Filter decision for one token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    /// Rejected by the named rule
    Reject(&'static str),
}

/// A token prepared for rule checks
#[derive(Debug, Clone)]
pub struct TokenView<'a> {
    /// The token as extracted
    pub raw: &'a str,

    /// The token with arbitrary-value group contents removed; the raw token
    /// when its brackets do not pair up
    pub outer: String,

    /// Whether every `[`/`(` closes with its matching bracket inside the token
    pub balanced: bool,
}

impl<'a> TokenView<'a> {
    pub fn new(raw: &'a str) -> Self {
        match blank_arbitrary_values(raw) {
            Some(outer) => Self { raw, outer, balanced: true },
            None => Self { raw, outer: raw.to_string(), balanced: false },
        }
    }
}

/// One entry of the rule table
pub struct RejectRule {
    /// Rule name, used in stats and logs
    pub name: &'static str,

    /// What the rule rejects
    pub description: &'static str,

    check: fn(&TokenView<'_>, &FilterPolicy) -> bool,
}

impl std::fmt::Debug for RejectRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RejectRule")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl RejectRule {
    /// Whether this rule rejects `token` under `policy`
    pub fn matches(&self, token: &str, policy: &FilterPolicy) -> bool {
        (self.check)(&TokenView::new(token), policy)
    }
}

/// The rule table, in evaluation order
pub static REJECT_RULES: &[RejectRule] = &[
    RejectRule {
        name: "too-short",
        description: "shorter than the minimum class length",
        check: |t, policy| t.raw.chars().count() < policy.min_length(),
    },
    RejectRule {
        name: "interpolation",
        description: "contains a template interpolation marker",
        check: |t, _| has_interpolation(t.raw),
    },
    RejectRule {
        name: "markup",
        description: "contains angle brackets",
        check: |t, _| t.outer.contains(['<', '>']),
    },
    RejectRule {
        name: "unbalanced-group",
        description: "has a bracket or parenthesis without its partner",
        check: |t, _| !t.balanced,
    },
    RejectRule {
        name: "protocol",
        description: "looks like a URL",
        check: |t, _| {
            let lower = t.raw.to_ascii_lowercase();
            lower.contains("://") || PROTOCOL_PREFIXES.iter().any(|p| lower.starts_with(p))
        },
    },
    RejectRule {
        name: "asset-extension",
        description: "ends with a script, style or asset file extension",
        check: |t, _| {
            let lower = t.raw.to_ascii_lowercase();
            ASSET_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
        },
    },
    RejectRule {
        name: "attribute-fragment",
        description: "starts with an attribute assignment",
        check: |t, _| ATTRIBUTE_RE.is_match(&t.outer),
    },
    RejectRule {
        name: "path-like",
        description: "contains a slash that is not a utility modifier",
        check: |t, _| t.outer.contains('/') && !UTILITY_SLASH_RE.is_match(&t.outer),
    },
    RejectRule {
        name: "stray-punctuation",
        description: "contains quotes, separators or escapes",
        check: |t, _| t.outer.contains(STRAY_PUNCTUATION),
    },
    RejectRule {
        name: "no-letters",
        description: "contains no letters",
        check: |t, _| !t.raw.chars().any(|c| c.is_ascii_alphabetic()),
    },
    RejectRule {
        name: "uppercase",
        description: "contains uppercase letters outside arbitrary values",
        check: |t, policy| !policy.allow_uppercase && t.outer.chars().any(char::is_uppercase),
    },
];

/// Look up a rule by name
pub fn rule(name: &str) -> Option<&'static RejectRule> {
    REJECT_RULES.iter().find(|r| r.name == name)
}

/// Token filter applying [`REJECT_RULES`] under a policy
#[derive(Debug, Clone, Default)]
pub struct TokenFilter {
    policy: FilterPolicy,
}

impl TokenFilter {
    /// Create a new token filter
    pub fn new(policy: FilterPolicy) -> Self {
        Self { policy }
    }

    /// Decide whether `token` is kept
    pub fn evaluate(&self, token: &str) -> Verdict {
        let view = TokenView::new(token);
        match REJECT_RULES.iter().find(|rule| (rule.check)(&view, &self.policy)) {
            Some(rule) => {
                trace!("Rejected {:?} ({})", token, rule.name);
                Verdict::Reject(rule.name)
            }
            None => Verdict::Accept,
        }
    }

    pub fn accepts(&self, token: &str) -> bool {
        self.evaluate(token) == Verdict::Accept
    }
}

/// Replace the contents of `[...]` and `(...)` groups with nothing, keeping the brackets.
/// `None` when a group is left open or a closing bracket has no opener.
fn blank_arbitrary_values(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut open: Vec<char> = Vec::new();

    for c in raw.chars() {
        match c {
            '[' | '(' => {
                if open.is_empty() {
                    out.push(c);
                }
                open.push(c);
            }
            ']' | ')' => {
                let opener = if c == ']' { '[' } else { '(' };
                if open.pop() != Some(opener) {
                    return None;
                }
                if open.is_empty() {
                    out.push(c);
                }
            }
            _ if !open.is_empty() => {}
            _ => out.push(c),
        }
    }

    open.is_empty().then_some(out)
}
