//! Pure line-level heading detection.
//!
//! A line opens a new section when any predicate in the ordered list fires.
//! No shared state; the same line always yields the same signal.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingSignal {
    pub is_heading: bool,
    pub level: u8,
}

const NOT_A_HEADING: HeadingSignal = HeadingSignal { is_heading: false, level: 0 };

/// Ordered pattern/predicate pairs; the first hit decides the level.
const PATTERNS: &[(fn(&str) -> bool, u8)] = &[
    (is_all_caps_line, 1),
    (is_numbered_heading, 2),
    (is_caps_block, 1),
    (is_short_label, 3),
];

pub fn detect_heading(line: &str) -> HeadingSignal {
    for (pattern, level) in PATTERNS {
        if pattern(line) {
            return HeadingSignal { is_heading: true, level: *level };
        }
    }
    NOT_A_HEADING
}

/// All-caps line longer than 10 chars, e.g. "GENERAL EXCLUSIONS".
fn is_all_caps_line(line: &str) -> bool {
    let has_cased = line.chars().any(|c| c.is_uppercase() || c.is_lowercase());
    has_cased && !line.chars().any(|c| c.is_lowercase()) && line.chars().count() > 10
}

/// Numbered heading: digits, a dot, whitespace, then a capital ("3. Waiting Periods").
fn is_numbered_heading(line: &str) -> bool {
    let mut chars = line.chars().peekable();
    let mut digits = 0;
    while chars.peek().is_some_and(char::is_ascii_digit) {
        chars.next();
        digits += 1;
    }
    if digits == 0 || chars.next() != Some('.') {
        return false;
    }
    let mut spaces = 0;
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
        spaces += 1;
    }
    spaces > 0 && chars.next().is_some_and(|c| c.is_ascii_uppercase())
}

/// A block of ASCII capitals and spaces, at least 11 chars total.
fn is_caps_block(line: &str) -> bool {
    let mut chars = line.chars();
    let Some(first) = chars.next() else { return false };
    if !first.is_ascii_uppercase() {
        return false;
    }
    let mut rest = 0;
    for c in chars {
        if !(c.is_ascii_uppercase() || c.is_whitespace()) {
            return false;
        }
        rest += 1;
    }
    rest >= 10
}

/// Short label ending in a colon ("Grace Period:").
fn is_short_label(line: &str) -> bool {
    line.ends_with(':') && line.split_whitespace().count() <= 5
}
