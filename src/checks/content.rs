//! Line-oriented and whole-file content checks.

use std::path::Path;
use std::sync::LazyLock;

use regex::bytes::{Regex, RegexBuilder};

use crate::checks::FileContent;
use crate::rules::{
    AHEM_SYSTEM_FONT, ASSERT_PRECONDITION, ASSERT_THROWS, CONSOLE, CR_AT_EOL, GENERATE_TESTS,
    HTML_INVALID_SYNTAX, INDENT_TABS, LAYOUTTESTS_APIS, MISSING_DEPENDENCY, PRINT_STATEMENT,
    PROMISE_REJECTS, Rule, SET_TIMEOUT, SPECIALPOWERS_API, TESTDRIVER_INTERNAL,
    TRAILING_WHITESPACE, W3C_TEST_ORG, WEB_PLATFORM_TEST, WEBIDL2_JS,
};
use crate::violation::Violation;

/// Extensions of files that run as test documents or scripts.
const SCRIPT_EXTENSIONS: &[&str] = &[".html", ".htm", ".js", ".xht", ".xhtml", ".svg"];
const PYTHON_EXTENSIONS: &[&str] = &[".py"];
const MARKUP_EXTENSIONS: &[&str] = &[".html", ".htm", ".xht", ".xhtml"];
const HTML_EXTENSIONS: &[&str] = &[".html", ".htm"];

/// Elements that are not void, so `<tag/>` does not close them in HTML.
const NON_VOID_ELEMENTS: &str = "a|abbr|article|audio|b|bdi|bdo|blockquote|body|button|canvas|\
    caption|cite|code|colgroup|data|datalist|dd|del|details|dfn|dialog|div|dl|dt|em|fieldset|\
    figcaption|figure|footer|form|h1|h2|h3|h4|h5|h6|head|header|html|i|iframe|ins|kbd|label|\
    legend|li|main|map|mark|menu|meter|nav|noscript|object|ol|optgroup|option|output|p|picture|\
    pre|progress|q|rp|rt|ruby|s|samp|script|section|select|slot|small|span|strong|style|sub|\
    summary|sup|table|tbody|td|template|textarea|tfoot|th|thead|time|title|tr|u|ul|var|video";

/// A banned pattern searched for on every line of applicable files.
pub struct LineRule {
    pub rule: Rule,
    regex: Regex,
    /// `None` applies the rule to every file.
    extensions: Option<&'static [&'static str]>,
}

impl LineRule {
    fn new(rule: Rule, pattern: &str, extensions: Option<&'static [&'static str]>) -> Self {
        Self {
            rule,
            regex: compile(pattern),
            extensions,
        }
    }

    #[must_use]
    pub fn applies(&self, path: &str) -> bool {
        self.extensions
            .is_none_or(|exts| exts.contains(&extension(path)))
    }

    #[must_use]
    pub fn is_match(&self, line: &[u8]) -> bool {
        self.regex.is_match(line)
    }
}

fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .unicode(false)
        .build()
        .expect("built-in pattern is valid")
}

pub static LINE_RULES: LazyLock<Vec<LineRule>> = LazyLock::new(|| {
    vec![
        LineRule::new(TRAILING_WHITESPACE, r"[ \t\f\x0b]$", None),
        LineRule::new(INDENT_TABS, r"^\t", None),
        LineRule::new(CR_AT_EOL, r"\r$", None),
        LineRule::new(SET_TIMEOUT, r"setTimeout\s*\(", Some(SCRIPT_EXTENSIONS)),
        LineRule::new(W3C_TEST_ORG, r"w3c\-test\.org", None),
        LineRule::new(WEB_PLATFORM_TEST, r"web\-platform\.test", Some(SCRIPT_EXTENSIONS)),
        LineRule::new(WEBIDL2_JS, r"webidl2\.js", Some(SCRIPT_EXTENSIONS)),
        LineRule::new(CONSOLE, r"console\.[a-zA-Z]+\s*\(", Some(SCRIPT_EXTENSIONS)),
        LineRule::new(GENERATE_TESTS, r"generate_tests\s*\(", Some(SCRIPT_EXTENSIONS)),
        LineRule::new(PRINT_STATEMENT, r"print(?:\s|\s*\()", Some(PYTHON_EXTENSIONS)),
        LineRule::new(
            LAYOUTTESTS_APIS,
            r"(eventSender|testRunner|internals)\.",
            Some(SCRIPT_EXTENSIONS),
        ),
        LineRule::new(MISSING_DEPENDENCY, r"[^\w]/gen/", Some(SCRIPT_EXTENSIONS)),
        LineRule::new(SPECIALPOWERS_API, r"SpecialPowers", Some(SCRIPT_EXTENSIONS)),
        LineRule::new(ASSERT_THROWS, r"[^.]assert_throws\(", Some(SCRIPT_EXTENSIONS)),
        LineRule::new(PROMISE_REJECTS, r"promise_rejects\(", Some(SCRIPT_EXTENSIONS)),
        LineRule::new(
            ASSERT_PRECONDITION,
            r"[^.]assert_precondition\(",
            Some(SCRIPT_EXTENSIONS),
        ),
        LineRule::new(
            HTML_INVALID_SYNTAX,
            &format!(r"<({NON_VOID_ELEMENTS})(\s+[^>]+)?\s*/>"),
            Some(HTML_EXTENSIONS),
        ),
        LineRule::new(TESTDRIVER_INTERNAL, r"test_driver_internal", Some(SCRIPT_EXTENSIONS)),
    ]
});

static AHEM_FONT: LazyLock<Regex> = LazyLock::new(|| case_insensitive(r"font.*:.*ahem"));
static AHEM_STYLESHEET: LazyLock<Regex> =
    LazyLock::new(|| case_insensitive(r"/fonts/ahem\.css|support/ahem.css"));

fn case_insensitive(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .unicode(false)
        .case_insensitive(true)
        .build()
        .expect("built-in pattern is valid")
}

/// Final extension including the dot, or `""`.
///
/// A leading dot on the file name does not start an extension.
#[must_use]
pub fn extension(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    let stem = name.trim_start_matches('.');
    match stem.rfind('.') {
        Some(idx) => &stem[idx..],
        None => "",
    }
}

/// Report every line that matches a line rule applicable to the path.
#[must_use]
pub fn check_regexp_line(_root: &Path, path: &str, content: &FileContent) -> Vec<Violation> {
    let applicable: Vec<&LineRule> = LINE_RULES.iter().filter(|r| r.applies(path)).collect();
    if applicable.is_empty() {
        return Vec::new();
    }

    let mut errors = Vec::new();
    for (line_no, line) in content.lines() {
        for rule in &applicable {
            if rule.is_match(line) {
                errors.push(rule.rule.error(path).with_line(line_no));
            }
        }
    }
    errors
}

/// Markup that names Ahem as a font must pull in the shared stylesheet.
#[must_use]
pub fn check_ahem_system_font(_root: &Path, path: &str, content: &FileContent) -> Vec<Violation> {
    if !MARKUP_EXTENSIONS.contains(&extension(path)) {
        return Vec::new();
    }
    let bytes = content.bytes();
    if AHEM_FONT.is_match(bytes) && !AHEM_STYLESHEET.is_match(bytes) {
        return vec![AHEM_SYSTEM_FONT.error(path)];
    }
    Vec::new()
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod tests;
