//! Regex-driven extraction of class-name candidates from markup and script text.
//!
//! The extractor never touches the filesystem: it maps file content to a list
//! of [`CandidateToken`]s. Filtering happens later in the processor.

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::class::types::CandidateToken;

/// Stand-in for characters that belong to an interpolation block
const MASK: char = '\u{1A}';

/// Where in the source a pattern looks for classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// `class="..."` style attributes
    ClassAttribute,
    /// Class-list helper calls and framework directives
    UtilityCall,
    /// `@apply` bodies in style blocks
    StyleDirective,
    /// String assigned to a variable
    Declaration,
    /// Any backtick template
    TemplateLiteral,
    /// Any single-line quoted string
    StringLiteral,
}

#[derive(Debug)]
enum Matcher {
    /// First non-empty capture group of every match
    Regex(Regex),
    /// Hand-written scanner for syntax a regex cannot pair up
    Scan(fn(&str) -> Vec<&str>),
}

/// A named matcher whose captures hold class strings
#[derive(Debug)]
pub struct ExtractionPattern {
    /// Name recorded on every token this pattern produces
    pub name: &'static str,

    /// Which part of the source the pattern targets
    pub kind: PatternKind,

    matcher: Matcher,
}

impl ExtractionPattern {
    fn new(name: &'static str, kind: PatternKind, pattern: &str) -> Self {
        Self {
            name,
            kind,
            matcher: Matcher::Regex(Regex::new(pattern).unwrap()),
        }
    }

    fn scan(name: &'static str, kind: PatternKind, scanner: fn(&str) -> Vec<&str>) -> Self {
        Self {
            name,
            kind,
            matcher: Matcher::Scan(scanner),
        }
    }

    /// Every captured class string in `content`, in source order
    pub fn captures<'a>(&self, content: &'a str) -> Vec<&'a str> {
        match &self.matcher {
            Matcher::Regex(regex) => regex
                .captures_iter(content)
                .filter_map(|caps| caps.iter().skip(1).flatten().next())
                .map(|m| m.as_str())
                .collect(),
            Matcher::Scan(scanner) => scanner(content),
        }
    }
}

static PATTERNS: Lazy<Vec<ExtractionPattern>> = Lazy::new(|| {
    vec![
        ExtractionPattern::new(
            "class-attribute",
            PatternKind::ClassAttribute,
            r#"\b(?:className|class)\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
        ),
        ExtractionPattern::new(
            "jsx-expression",
            PatternKind::ClassAttribute,
            r#"\bclassName\s*=\s*\{\s*(?:"([^"]*)"|'([^']*)'|`([^`]*)`)\s*\}"#,
        ),
        ExtractionPattern::new(
            "class-list",
            PatternKind::UtilityCall,
            r#"class:list\s*=\s*\{?\s*\[?\s*(?:"([^"]*)"|'([^']*)')"#,
        ),
        ExtractionPattern::new(
            "utility-call",
            PatternKind::UtilityCall,
            r#"(?:\bclassList\.(?:add|toggle|remove|replace)|\btwMerge|\btwJoin|\bclsx|\bclassnames|\bcn|\bcva)\(\s*(?:"([^"]*)"|'([^']*)'|`([^`]*)`)"#,
        ),
        ExtractionPattern::new(
            "style-directive",
            PatternKind::StyleDirective,
            r"@apply\s+([^;}]+)",
        ),
        ExtractionPattern::new(
            "declaration",
            PatternKind::Declaration,
            r#"\b(?:const|let|var)\s+[\w$]+\s*=\s*(?:"([^"\n]*)"|'([^'\n]*)'|`([^`]*)`)"#,
        ),
        ExtractionPattern::scan("template-literal", PatternKind::TemplateLiteral, template_literals),
        ExtractionPattern::new(
            "string-literal",
            PatternKind::StringLiteral,
            r#""([^"\n]*)"|'([^'\n]*)'"#,
        ),
    ]
});

/// Pure extractor from file text to candidate tokens
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    /// Whether the catch-all string literal pattern is applied
    string_literals: bool,
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PatternExtractor {
    /// Create a new extractor
    pub fn new(string_literals: bool) -> Self {
        Self { string_literals }
    }

    /// The patterns this extractor applies, in order
    pub fn patterns(&self) -> impl Iterator<Item = &'static ExtractionPattern> + '_ {
        PATTERNS
            .iter()
            .filter(move |p| self.string_literals || p.kind != PatternKind::StringLiteral)
    }

    /// Extract every static candidate token from `content`
    pub fn extract(&self, content: &str) -> Vec<CandidateToken> {
        let mut tokens = Vec::new();

        for pattern in self.patterns() {
            for captured in pattern.captures(content) {
                let captured = match pattern.kind {
                    PatternKind::StyleDirective => strip_important(captured),
                    _ => captured,
                };

                for value in split_static_tokens(captured) {
                    trace!("{} -> {}", pattern.name, value);
                    tokens.push(CandidateToken {
                        value,
                        pattern: pattern.name,
                        file_path: None,
                    });
                }
            }
        }

        tokens
    }
}

fn strip_important(body: &str) -> &str {
    let body = body.trim_end();
    body.strip_suffix("!important").unwrap_or(body)
}

/// Split a captured class string into whitespace-separated tokens, dropping
/// every token that touches an interpolation block.
///
/// `${...}` and bare `{...}` blocks are brace-balanced; an unterminated block
/// swallows the rest of the string.
pub fn split_static_tokens(captured: &str) -> Vec<String> {
    let masked = mask_interpolations(captured);
    masked
        .split_whitespace()
        .filter(|token| !token.contains(MASK))
        .map(str::to_string)
        .collect()
}

fn mask_interpolations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut depth = 0usize;

    while let Some(c) = chars.next() {
        if depth > 0 {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            out.push(MASK);
            continue;
        }

        match c {
            '$' if chars.peek() == Some(&'{') => {
                chars.next();
                depth = 1;
                out.push(MASK);
                out.push(MASK);
            }
            '{' => {
                depth = 1;
                out.push(MASK);
            }
            _ => out.push(c),
        }
    }

    out
}

/// Bodies of every backtick template in `content`, outer templates before the
/// ones nested in their `${...}` blocks.
///
/// Backticks inside `//` and `/* */` comments or quoted strings do not open a
/// template. Quoted strings end at the line break, so an unpaired quote only
/// hides the rest of its own line. An unterminated template yields nothing.
pub fn template_literals(content: &str) -> Vec<&str> {
    let bytes = content.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        i = match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => skip_line(bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => skip_block_comment(bytes, i + 2),
            b'"' | b'\'' => skip_quoted(bytes, i),
            b'`' => read_template(content, i + 1, &mut found),
            _ => i + 1,
        };
    }

    found
}

/// Read a template body starting at `start`, pushing it and any nested templates.
/// Returns the index just past the closing backtick.
fn read_template<'a>(content: &'a str, start: usize, found: &mut Vec<&'a str>) -> usize {
    let bytes = content.as_bytes();
    let mut nested = Vec::new();
    let mut i = start;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => {
                found.push(&content[start..i]);
                found.append(&mut nested);
                return i + 1;
            }
            b'$' if bytes.get(i + 1) == Some(&b'{') => i = read_expression(content, i + 2, &mut nested),
            _ => i += 1,
        }
    }

    bytes.len()
}

/// Skip a `${...}` expression body, collecting templates nested inside it
fn read_expression<'a>(content: &'a str, start: usize, found: &mut Vec<&'a str>) -> usize {
    let bytes = content.as_bytes();
    let mut depth = 1usize;
    let mut i = start;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                depth += 1;
                i += 1;
            }
            b'}' => {
                depth -= 1;
                i += 1;
                if depth == 0 {
                    return i;
                }
            }
            b'"' | b'\'' => i = skip_quoted(bytes, i),
            b'`' => i = read_template(content, i + 1, found),
            _ => i += 1,
        }
    }

    bytes.len()
}

fn skip_line(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |offset| from + offset)
}

fn skip_block_comment(bytes: &[u8], from: usize) -> usize {
    bytes[from.min(bytes.len())..]
        .windows(2)
        .position(|w| w == b"*/")
        .map_or(bytes.len(), |offset| from + offset + 2)
}

fn skip_quoted(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }

    bytes.len()
}

/// Whether `text` contains an interpolation marker
pub fn has_interpolation(text: &str) -> bool {
    text.contains("${") || text.contains('{') || text.contains('}')
}
