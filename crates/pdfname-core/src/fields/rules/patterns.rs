//! Regex patterns for Korean business documents.
//!
//! Each list is ordered: earlier entries take precedence over later ones.

use lazy_static::lazy_static;
use regex::Regex;

/// Keyword marking the line that holds the registration number.
pub const REGISTRATION_KEYWORD: &str = "등록번호";

/// Keyword marking the line that holds the company name.
pub const COMPANY_KEYWORD: &str = "상호";

/// Registry boilerplate lines that never carry the company name.
pub const BOILERPLATE_KEYWORDS: [&str; 3] = ["등기사항전부증명서", "등기번호", "등록번호"];

lazy_static! {
    // Registration number right after its keyword. The capture takes the
    // whole dash-joined run so "123-45-67890" is not cut at the second dash.
    pub static ref REGISTRATION_KEYWORD_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"등록번호\s*[:：]?\s*(\d+(?:-\d+)+)").unwrap(),
        Regex::new(r"등록번호\s+(\d+(?:-\d+)+)").unwrap(),
    ];

    // Business registration layouts, bounded by non-digits so a shorter
    // layout never matches inside a longer number.
    pub static ref REGISTRATION_GENERIC_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?:^|\D)(\d{3}-\d{2}-\d{5})(?:\D|$)").unwrap(),
        Regex::new(r"(?:^|\D)(\d{3}-\d{2}-\d{6})(?:\D|$)").unwrap(),
        Regex::new(r"(?:^|\D)(\d{4}-\d{2}-\d{5})(?:\D|$)").unwrap(),
    ];

    // Company name after its keyword; the corporation-suffix form first.
    pub static ref COMPANY_KEYWORD_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"상호\s+([가-힣]+)\s*주식회사").unwrap(),
        Regex::new(r"상호\s+([가-힣]+)").unwrap(),
        Regex::new(r"상호\s*[:：]?\s*([가-힣]+)").unwrap(),
    ];

    // Company name followed by a corporation suffix and/or a parenthetical.
    pub static ref COMPANY_SUFFIX_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"([가-힣]+)\s*주식회사\s*\([^)]+\)").unwrap(),
        Regex::new(r"([가-힣]+)\s*주식회사").unwrap(),
        Regex::new(r"([가-힣]+)\s*\([^)]+\)").unwrap(),
    ];

    pub static ref HANGUL_WORD: Regex = Regex::new(r"[가-힣]{2,}").unwrap();
}

/// Capture group 1 of the first match of `pattern` in `text`.
pub fn first_capture<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}
