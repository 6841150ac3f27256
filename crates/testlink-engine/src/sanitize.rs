use regex::Regex;
use std::sync::OnceLock;

/// Clean captured test output so it can be shown on a single line.
///
/// Strips SGR terminal codes (`\x1b[31m`, `\x1b[0m`, ...), decodes HTML
/// entities left over from the XML report, folds newlines into spaces and
/// trims the result.
pub fn clean_text(text: &str) -> String {
    static SGR_REGEX: OnceLock<Regex> = OnceLock::new();
    let sgr_regex =
        SGR_REGEX.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").expect("Invalid SGR regex"));

    let stripped = sgr_regex.replace_all(text, "");
    let decoded = html_escape::decode_html_entities(&stripped);
    decoded.replace('\n', " ").trim().to_string()
}
