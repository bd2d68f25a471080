// OCR confusion correction for numeric fields.
// Letters that recognizers commonly return in place of digits are mapped back.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    pub static ref DIGIT_CONFUSIONS: HashMap<char, char> = {
        let mut m = HashMap::new();
        m.insert('O', '0');
        m.insert('o', '0');
        m.insert('D', '0');
        m.insert('Q', '0');
        m.insert('I', '1');
        m.insert('l', '1');
        m.insert('|', '1');
        m.insert('!', '1');
        m.insert('Z', '2');
        m.insert('z', '2');
        m.insert('S', '5');
        m.insert('s', '5');
        m.insert('G', '6');
        m.insert('b', '6');
        m.insert('B', '8');
        m.insert('g', '9');
        m.insert('q', '9');
        m
    };

    // Three groups of four digit-like characters, bounded by whitespace
    static ref RELAXED_UID_PATTERN: Regex = Regex::new(
        r"(?:^|\s)([0-9OoDQIl|!ZzSsGbBgq]{4} ?[0-9OoDQIl|!ZzSsGbBgq]{4} ?[0-9OoDQIl|!ZzSsGbBgq]{4})(?:\s|$)"
    ).unwrap();
}

/// Minimum number of genuine digits a relaxed match needs before we trust it
const MIN_REAL_DIGITS: usize = 8;

/// Replace digit-confusable letters with the digits they stand for
pub fn correct_numeric_confusions(text: &str) -> String {
    text.chars()
        .map(|c| *DIGIT_CONFUSIONS.get(&c).unwrap_or(&c))
        .collect()
}

/// Find a 4-4-4 token damaged by letter/digit confusion and repair it
pub fn find_corrected_uid(text: &str) -> Option<String> {
    for line in text.lines() {
        for captures in RELAXED_UID_PATTERN.captures_iter(line) {
            let Some(token) = captures.get(1) else {
                continue;
            };
            let token = token.as_str();
            let real_digits = token.chars().filter(|c| c.is_ascii_digit()).count();
            if real_digits < MIN_REAL_DIGITS || real_digits == 12 {
                continue;
            }
            let corrected: String = correct_numeric_confusions(token)
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            if corrected.len() == 12 && corrected.chars().all(|c| c.is_ascii_digit()) {
                return Some(corrected);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_correction() {
        assert_eq!(correct_numeric_confusions("12O4 S6l8"), "1204 5618");
    }

    #[test]
    fn test_find_corrected_uid() {
        assert_eq!(
            find_corrected_uid("Aadhaar\n12O4 5678 9Ol2\nfooter"),
            Some("120456789012".to_string())
        );
    }

    #[test]
    fn test_mostly_letters_is_rejected() {
        assert_eq!(find_corrected_uid("OOOO SSSS llll"), None);
    }

    #[test]
    fn test_clean_uid_is_left_to_strict_pattern() {
        assert_eq!(find_corrected_uid("1234 5678 9012"), None);
    }
}
