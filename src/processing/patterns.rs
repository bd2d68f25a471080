use lazy_static::lazy_static;
use regex::Regex;

// Compiled pattern tables used across the extraction pipeline
lazy_static! {
    // Twelve digits as three groups of four, optional single space between groups
    pub static ref UID_PATTERN: Regex = Regex::new(r"\b\d{4} ?\d{4} ?\d{4}\b").unwrap();

    // DD/MM/YYYY or DD-MM-YYYY
    pub static ref DATE_PATTERN: Regex = Regex::new(r"\b(\d{2})[/-](\d{2})[/-](\d{4})\b").unwrap();

    // Any year in 1900..=2099
    pub static ref YEAR_PATTERN: Regex = Regex::new(r"\b(?:19|20)\d{2}\b").unwrap();

    pub static ref FOUR_DIGIT_PATTERN: Regex = Regex::new(r"\b(\d{4})\b").unwrap();

    pub static ref POSTAL_CODE_PATTERN: Regex = Regex::new(r"\b\d{6}\b").unwrap();

    pub static ref GENDER_INDICATOR_PATTERN: Regex =
        Regex::new(r"(?i)\b(?:male|female|transgender)\b|पुरुष|महिला").unwrap();

    pub static ref GENDER_LABEL_PATTERN: Regex = Regex::new(r"(?i)\b(?:gender|sex)\s*:").unwrap();

    // Gender label patterns, tried in this order
    pub static ref GENDER_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)\bgender\s*[:/-]?\s*(female|male|f|m)\b").unwrap(),
        Regex::new(r"(?i)\bsex\s*[:/-]?\s*(female|male|f|m)\b").unwrap(),
        Regex::new(r"लिंग\s*[:/-]?\s*(पुरुष|महिला)").unwrap(),
        Regex::new(r"(?i)\b(female)\b").unwrap(),
        Regex::new(r"(?i)\b(male)\b").unwrap(),
    ];

    // "Name:" label in either script, value after the colon
    pub static ref NAME_LABEL_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)\bname\s*:\s*(.+)$").unwrap(),
        Regex::new(r"नाम\s*:\s*(.+)$").unwrap(),
    ];

    pub static ref YOB_PATTERN: Regex =
        Regex::new(r"(?i)(?:year\s*of\s*birth|\byob|birth\s*year|जन्म\s*वर्ष)\s*[:/-]?\s*(\d{4})\b").unwrap();

    pub static ref YOB_LABEL_PATTERN: Regex =
        Regex::new(r"(?i)year\s*of\s*birth|\byob\b|birth\s*year|जन्म\s*वर्ष").unwrap();

    // Card furniture that never holds the holder's name
    pub static ref HEADER_PATTERN: Regex = Regex::new(
        r"(?i)\b(?:government|govt|india|authority|unique|identification|aadhaa?r|enrol?ment|address|dob|birth|year|male|female|gender|download|issue|help|www|vid|uidai|signature)\b"
    ).unwrap();

    // Four or more symbols in a row
    pub static ref SYMBOL_RUN_PATTERN: Regex = Regex::new(r"[^\p{L}\p{N}\p{M}\s]{4,}").unwrap();

    // Clusters a real Latin line practically never contains
    pub static ref GARBLED_CLUSTER_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)[bcdfghjklmnpqrstvwxz]{5,}").unwrap(),
        Regex::new(r"(?i)(?:[a-z][^a-z\s\d.]){3,}").unwrap(),
    ];

    // Consonant clusters typical of Devanagari read by a Latin recognizer
    pub static ref TRANSLITERATION_ARTIFACT_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)[bcdfghjklmnpqrstvwxz]{4,}").unwrap(),
        Regex::new(r"(?i)\b[bcdfghjklmnpqrstvwxz]{3}\b").unwrap(),
        Regex::new(r"(?i)[qxz][bcdfghjklmnpqrstvwxz]").unwrap(),
        Regex::new(r"(?i)(?:aa|ii|uu|ee){2,}").unwrap(),
    ];
}

/// True when `line` contains `keyword` as a whole word (or phrase)
pub fn contains_word(line: &str, keyword: &str) -> bool {
    let line = line.to_lowercase();
    let keyword = keyword.to_lowercase();
    let mut start = 0;
    while let Some(pos) = line[start..].find(&keyword) {
        let begin = start + pos;
        let end = begin + keyword.len();
        let before_ok = line[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = line[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        start = begin + line[begin..].chars().next().map_or(1, |c| c.len_utf8());
    }
    false
}

/// First 12-digit identity number in `text` that is not the head of a longer
/// digit group, such as the 16-digit VID printed under it
pub fn find_uid(text: &str) -> Option<regex::Match<'_>> {
    UID_PATTERN
        .find_iter(text)
        .find(|m| !continues_with_digit(&text[m.end()..]))
}

pub fn has_uid(text: &str) -> bool {
    find_uid(text).is_some()
}

fn continues_with_digit(rest: &str) -> bool {
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    rest.starts_with(|c: char| c.is_ascii_digit())
}

/// The first known region named in `line`, as written in the table
pub fn find_region(line: &str) -> Option<&'static str> {
    crate::models::rules::REGION_NAMES
        .iter()
        .copied()
        .find(|region| contains_word(line, region))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uid_pattern_spacing() {
        assert!(UID_PATTERN.is_match("1234 5678 9012"));
        assert!(UID_PATTERN.is_match("id 987654321098 end"));
        assert!(!UID_PATTERN.is_match("1234  5678 9012"));
        assert!(!UID_PATTERN.is_match("12345678901"));
    }

    #[test]
    fn test_find_uid_skips_longer_digit_groups() {
        assert_eq!(find_uid("VID : 9134 5678 9012 3456"), None);
        assert_eq!(
            find_uid("VID 9134 5678 9012 3456 / 1234 5678 9012").map(|m| m.as_str()),
            Some("1234 5678 9012")
        );
        assert!(has_uid("1234 5678 9012"));
        assert!(has_uid("987654321098."));
    }

    #[test]
    fn test_contains_word_respects_boundaries() {
        assert!(contains_word("123 MG Road", "road"));
        assert!(!contains_word("Broadway", "road"));
        assert!(contains_word("Pune, Tamil Nadu 600001", "tamil nadu"));
        assert!(!contains_word("Goals", "goa"));
    }

    #[test]
    fn test_find_region() {
        assert_eq!(find_region("Pune Maharashtra 411001"), Some("maharashtra"));
        assert_eq!(find_region("Rohit Kumar Sharma"), None);
    }

    #[test]
    fn test_gender_patterns_order() {
        assert!(GENDER_PATTERNS[3].is_match("FEMALE"));
        assert!(!GENDER_PATTERNS[4].is_match("female"));
    }
}
