#![forbid(unsafe_code)]

//! Pattern compilation
//!
//! Rule sets are written for a backtracking regex dialect: lookaround and
//! backreferences are allowed, and the `\d` and `\w` shorthands cover ASCII
//! only. Patterns are compiled with `fancy_regex`, after the shorthands are
//! rewritten to explicit ASCII classes. `\b` keeps its Unicode meaning.

use fancy_regex::Regex;
use std::borrow::Cow;

const DIGIT: &str = "0-9";
const WORD: &str = "0-9A-Za-z_";

/// Compiles a rule pattern
///
/// # Errors
///
/// Returns the `fancy_regex` diagnostic when the pattern does not parse.
pub fn compile_pattern(source: &str) -> Result<Regex, fancy_regex::Error> {
    Regex::new(&ascii_shorthands(source))
}

/// Rewrites `\d`, `\D`, `\w` and `\W` as ASCII classes
///
/// Inside a character class only the positive shorthands are rewritten;
/// `[^\W]` style negations inside a class keep their Unicode meaning.
pub fn ascii_shorthands(source: &str) -> Cow<'_, str> {
    if !source.contains('\\') {
        return Cow::Borrowed(source);
    }

    let mut out = String::with_capacity(source.len() + 16);
    let mut chars = source.chars().peekable();
    let mut in_class = false;
    // `]` right after `[` or `[^` is a literal
    let mut class_start = false;

    while let Some(c) = chars.next() {
        let at_class_start = class_start;
        class_start = false;

        match c {
            '\\' => match chars.next() {
                Some('d') if in_class => out.push_str(DIGIT),
                Some('w') if in_class => out.push_str(WORD),
                Some('d') if !in_class => out.push_str(&format!("[{}]", DIGIT)),
                Some('w') if !in_class => out.push_str(&format!("[{}]", WORD)),
                Some('D') if !in_class => out.push_str(&format!("[^{}]", DIGIT)),
                Some('W') if !in_class => out.push_str(&format!("[^{}]", WORD)),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            '[' if !in_class => {
                in_class = true;
                class_start = true;
                out.push(c);
                if chars.peek() == Some(&'^') {
                    chars.next();
                    out.push('^');
                }
            }
            ']' if in_class && !at_class_start => {
                in_class = false;
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    Cow::Owned(out)
}
