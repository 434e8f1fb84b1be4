//! Static safety filter for formula text.
//!
//! This is not a parser. It rejects anything that looks like more than a pure
//! arithmetic expression: runtime/global identifiers, indexing, template
//! literals, statements, blocks and bare assignment.

use std::sync::LazyLock;

use foresight_core::config::defaults::DEFAULT_FORMULA_MAX_LENGTH;
use foresight_core::config::FormulaConfig;
use foresight_core::errors::FormulaError;
use regex::Regex;

/// Identifiers that must never appear as whole words in a formula.
pub const DENIED_TOKENS: &[&str] = &[
    // globals and runtime objects
    "window", "document", "globalThis", "global", "self", "parent", "top", "frames",
    "process", "require", "module", "exports", "import", "export", "Buffer",
    "navigator", "location", "localStorage", "sessionStorage", "indexedDB", "alert",
    // network primitives
    "fetch", "XMLHttpRequest", "WebSocket", "EventSource", "Worker", "importScripts",
    // timers
    "setTimeout", "setInterval", "setImmediate", "clearTimeout", "clearInterval",
    "requestAnimationFrame", "requestIdleCallback",
    // process control
    "child_process", "exec", "spawn", "exit",
    // reflection and code construction
    "eval", "Function", "constructor", "prototype", "__proto__", "Reflect", "Proxy",
    "Object", "Symbol", "this", "new", "delete", "function", "return", "var", "let",
    "const", "async", "await", "while", "for", "do", "class", "with", "yield",
];

static DENIED_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let alternation = DENIED_TOKENS
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{alternation})\b")).ok()
});

static COMPARISON_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"===|!==|==|!=|>=|<=").ok());

static ALLOWED_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"^[A-Za-z0-9\s+\-*/%().,_?:<>=!&|'"]*$"#).ok());

/// Characters that introduce indexing, template literals, statements or blocks.
const FORBIDDEN_SYNTAX: &[char] = &['`', '[', ']', ';', '{', '}'];

/// Formula safety validator.
#[derive(Debug, Clone)]
pub struct FormulaValidator {
    max_length: usize,
}

impl Default for FormulaValidator {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_FORMULA_MAX_LENGTH,
        }
    }
}

impl FormulaValidator {
    pub fn new(config: &FormulaConfig) -> Self {
        Self {
            max_length: config.max_length,
        }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Check `formula`, returning the first reason it is unsafe.
    ///
    /// If one of the internal patterns failed to build, every formula is rejected.
    pub fn check(&self, formula: &str) -> Result<(), FormulaError> {
        if formula.trim().is_empty() {
            return Err(FormulaError::Empty);
        }

        let length = formula.chars().count();
        if length > self.max_length {
            return Err(FormulaError::TooLong {
                length,
                max: self.max_length,
            });
        }

        if let Some(found) = formula.chars().find(|c| FORBIDDEN_SYNTAX.contains(c)) {
            return Err(FormulaError::ForbiddenSyntax { found });
        }

        let (Some(denied), Some(comparison), Some(allowed)) =
            (DENIED_RE.as_ref(), COMPARISON_RE.as_ref(), ALLOWED_RE.as_ref())
        else {
            return Err(FormulaError::DeniedToken {
                token: "<validator unavailable>".to_string(),
            });
        };

        if let Some(m) = denied.find(formula) {
            return Err(FormulaError::DeniedToken {
                token: m.as_str().to_string(),
            });
        }

        if comparison.replace_all(formula, " ").contains('=') {
            return Err(FormulaError::BareAssignment);
        }

        if !allowed.is_match(formula) {
            let found = formula
                .chars()
                .find(|c| !is_allowed_char(*c))
                .unwrap_or('\u{FFFD}');
            return Err(FormulaError::DisallowedCharacter { found });
        }

        Ok(())
    }

    /// Boolean form of [`FormulaValidator::check`].
    pub fn is_safe(&self, formula: &str) -> bool {
        self.check(formula).is_ok()
    }
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || "+-*/%().,_?:<>=!&|'\"".contains(c)
}

/// Validate with the default length limit.
pub fn validate(formula: &str) -> bool {
    FormulaValidator::default().is_safe(formula)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_word_matching_leaves_similar_identifiers_alone() {
        assert!(validate("exponent * 2"));
        assert!(validate("forecast + topline"));
        assert!(!validate("exec + 1"));
    }

    #[test]
    fn arrow_functions_count_as_assignment() {
        assert_eq!(
            FormulaValidator::default().check("x => x"),
            Err(FormulaError::BareAssignment)
        );
    }

    #[test]
    fn unicode_letters_are_not_allowed() {
        assert!(matches!(
            FormulaValidator::default().check("prix × 2"),
            Err(FormulaError::DisallowedCharacter { found: '×' })
        ));
    }
}
