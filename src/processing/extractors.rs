// Field extraction strategy chains. Each field tries its strategies in a fixed
// order and the first one that produces a value wins.
use chrono::NaiveDate;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::{Captures, Regex};

use crate::models::rules::{
    AUTHORITY_PHRASES, BIRTH_DATE_LABELS, INSTITUTIONAL_KEYWORDS, SECONDARY_HEADER_TERMS,
    STREET_KEYWORDS, UID_EXCLUSION_KEYWORDS, UID_LABELS,
};
use crate::models::{ExtractedFields, FieldCandidate, Transcript};
use crate::processing::address::AddressAssembler;
use crate::processing::name_scorer::NameScorer;
use crate::processing::patterns::{
    contains_word, find_region, find_uid, DATE_PATTERN, FOUR_DIGIT_PATTERN, GENDER_PATTERNS,
    HEADER_PATTERN, NAME_LABEL_PATTERNS, POSTAL_CODE_PATTERN, UID_PATTERN, YOB_LABEL_PATTERN,
    YOB_PATTERN,
};
use crate::processing::sanitizer::{Alphabet, LineSanitizer};
use crate::processing::text_correction::find_corrected_uid;

const NAME_SCAN_LINES: usize = 6;
const MIN_NAME_SCORE: f32 = 50.0;
const UID_LABEL_LOOKAHEAD: usize = 2;
const UID_BOTTOM_LINES: usize = 3;
const LABELED_YEAR_RANGE: (i32, i32) = (1930, 2010);
const BARE_YEAR_RANGE: (i32, i32) = (1950, 2015);

lazy_static! {
    static ref DIGIT_RUN: Regex = Regex::new(r"\d{4,}").unwrap();
    static ref STANDALONE_YEAR: Regex = Regex::new(r"^\s*(\d{4})\s*$").unwrap();
}

pub struct FieldExtractor;

impl FieldExtractor {
    /// Run every extractor over the transcript lines
    pub fn extract_all(transcript: &Transcript) -> ExtractedFields {
        let lines = transcript.lines();
        ExtractedFields {
            name: Self::extract_name(lines).unwrap_or_default(),
            gender: Self::extract_gender(lines).unwrap_or_default(),
            birth_date: Self::extract_birth_date(lines).unwrap_or_default(),
            uid: Self::extract_uid(lines).unwrap_or_default(),
            address: Self::extract_address(lines).unwrap_or_default(),
        }
    }

    pub fn extract_name(lines: &[String]) -> Option<String> {
        if let Some(candidate) = Self::name_after_authority_header(lines) {
            debug!("Name from authority header (score {:.1})", candidate.score);
            return Some(candidate.text);
        }
        if let Some(name) = Self::name_from_label(lines) {
            debug!("Name from label");
            return Some(name);
        }
        let name = Self::name_from_free_lines(lines);
        if name.is_some() {
            debug!("Name from free-standing line");
        }
        name
    }

    fn name_after_authority_header(lines: &[String]) -> Option<FieldCandidate> {
        let header = lines.iter().position(|line| {
            let lower = line.to_lowercase();
            AUTHORITY_PHRASES.iter().any(|phrase| lower.contains(phrase))
        })?;

        let candidates: Vec<String> = lines
            .iter()
            .skip(header + 1)
            .take(NAME_SCAN_LINES)
            .filter(|line| !is_not_a_name(line))
            .filter_map(|line| LineSanitizer::sanitize(line, Alphabet::Letters))
            .filter(|candidate| candidate.chars().count() >= 4)
            .collect();

        let best = NameScorer::best(&candidates)?;
        if best.score >= MIN_NAME_SCORE {
            Some(best)
        } else {
            debug!(
                "Best header candidate '{}' scored {:.1}, below threshold",
                best.text, best.score
            );
            None
        }
    }

    fn name_from_label(lines: &[String]) -> Option<String> {
        for line in lines {
            for pattern in NAME_LABEL_PATTERNS.iter() {
                let Some(value) = pattern.captures(line).and_then(|c| c.get(1)) else {
                    continue;
                };
                let cleaned = LineSanitizer::clean(value.as_str(), Alphabet::Letters);
                if is_valid_name(&cleaned) {
                    return Some(cleaned);
                }
            }
        }
        None
    }

    fn name_from_free_lines(lines: &[String]) -> Option<String> {
        lines
            .iter()
            .filter(|line| !is_header_line(line))
            .filter(|line| !is_not_a_name(line))
            .filter(|line| !STREET_KEYWORDS.iter().any(|k| contains_word(line, k)))
            .filter_map(|line| LineSanitizer::sanitize(line, Alphabet::Letters))
            .find(|candidate| is_valid_name(candidate))
    }

    pub fn extract_gender(lines: &[String]) -> Option<String> {
        // Label and word patterns, pattern order first
        for pattern in GENDER_PATTERNS.iter() {
            for line in lines {
                let code = pattern
                    .captures(line)
                    .and_then(|c| c.get(1))
                    .and_then(|m| gender_code(m.as_str()));
                if code.is_some() {
                    debug!("Gender from pattern '{}'", pattern.as_str());
                    return code;
                }
            }
        }

        // Lone M/F next to a date line
        for (i, line) in lines.iter().enumerate() {
            let marker = line.trim();
            if !(marker.eq_ignore_ascii_case("m") || marker.eq_ignore_ascii_case("f")) {
                continue;
            }
            let previous_is_date = i > 0 && DATE_PATTERN.is_match(&lines[i - 1]);
            let next_is_date = lines
                .get(i + 1)
                .map_or(false, |next| DATE_PATTERN.is_match(next));
            if previous_is_date || next_is_date {
                debug!("Gender from single-letter marker");
                return Some(marker.to_uppercase());
            }
        }

        // "male" is a substring of "female", so female is checked first
        let lowered: Vec<String> = lines.iter().map(|l| l.to_lowercase()).collect();
        if lowered.iter().any(|l| l.contains("female") || l.contains("महिला")) {
            return Some("F".to_string());
        }
        if lowered.iter().any(|l| l.contains("male") || l.contains("पुरुष")) {
            return Some("M".to_string());
        }
        None
    }

    pub fn extract_birth_date(lines: &[String]) -> Option<String> {
        for line in lines {
            let lower = line.to_lowercase();
            if !BIRTH_DATE_LABELS.iter().any(|label| lower.contains(label)) {
                continue;
            }
            if let Some(captures) = DATE_PATTERN.captures(line) {
                match reformat_date(&captures) {
                    Some(date) => {
                        debug!("Birth date from labelled line");
                        return Some(date);
                    }
                    None => warn!("Unparseable birth date '{}', skipping", &captures[0]),
                }
            }
        }

        if let Some(captures) = lines.iter().find_map(|line| DATE_PATTERN.captures(line)) {
            match reformat_date(&captures) {
                Some(date) => {
                    debug!("Birth date from first date in text");
                    return Some(date);
                }
                None => warn!("Unparseable date '{}', skipping", &captures[0]),
            }
        }

        Self::birth_year(lines).map(|year| format!("{}-01-01", year))
    }

    /// Year of birth: labelled year first, else the only plausible bare year
    pub fn birth_year(lines: &[String]) -> Option<i32> {
        for (i, line) in lines.iter().enumerate() {
            let labelled = YOB_PATTERN
                .captures(line)
                .and_then(|c| c[1].parse::<i32>().ok())
                .or_else(|| {
                    if !YOB_LABEL_PATTERN.is_match(line) {
                        return None;
                    }
                    lines
                        .get(i + 1)
                        .and_then(|next| STANDALONE_YEAR.captures(next))
                        .and_then(|c| c[1].parse::<i32>().ok())
                });
            if let Some(year) = labelled {
                if in_range(year, LABELED_YEAR_RANGE) {
                    debug!("Birth year from label");
                    return Some(year);
                }
            }
        }

        // Mask identifiers, dates and labelled years before counting bare years
        let text = lines.join("\n");
        let masked = UID_PATTERN.replace_all(&text, " ");
        let masked = DATE_PATTERN.replace_all(&masked, " ");
        let masked = YOB_PATTERN.replace_all(&masked, " ");

        let years: Vec<i32> = FOUR_DIGIT_PATTERN
            .captures_iter(&masked)
            .filter_map(|c| c[1].parse::<i32>().ok())
            .filter(|year| in_range(*year, BARE_YEAR_RANGE))
            .collect();

        if years.len() == 1 {
            debug!("Birth year from the only bare year in text");
            Some(years[0])
        } else {
            if years.len() > 1 {
                debug!("{} candidate birth years, refusing to guess", years.len());
            }
            None
        }
    }

    pub fn extract_uid(lines: &[String]) -> Option<String> {
        for (i, line) in lines.iter().enumerate() {
            if !UID_LABELS.iter().any(|label| contains_word(line, label)) {
                continue;
            }
            let found = lines
                .iter()
                .skip(i)
                .take(UID_LABEL_LOOKAHEAD + 1)
                .find_map(|candidate| find_uid(candidate));
            if let Some(m) = found {
                debug!("UID from labelled line");
                return Some(format_uid(m.as_str()));
            }
        }

        for line in lines.iter().rev().take(UID_BOTTOM_LINES) {
            if UID_EXCLUSION_KEYWORDS
                .iter()
                .any(|keyword| contains_word(line, keyword))
            {
                continue;
            }
            if let Some(m) = find_uid(line) {
                debug!("UID from bottom of card");
                return Some(format_uid(m.as_str()));
            }
        }

        if let Some(m) = lines.iter().find_map(|line| find_uid(line)) {
            debug!("UID from first match in text");
            return Some(format_uid(m.as_str()));
        }

        let corrected = find_corrected_uid(&lines.join("\n"));
        if corrected.is_some() {
            debug!("UID recovered after digit correction");
        }
        corrected.map(|digits| format_uid(&digits))
    }

    pub fn extract_address(lines: &[String]) -> Option<String> {
        if let Some(address) = AddressAssembler::assemble_from_region(lines) {
            debug!("Address from region block");
            return Some(address);
        }
        let address = AddressAssembler::assemble_between_gender_and_uid(&lines.join("\n"));
        if address.is_some() {
            debug!("Address from gender-to-UID span");
        }
        address
    }
}

/// Canonical `DDDD DDDD DDDD` form; anything that is not exactly 12 digits is returned as-is
pub fn format_uid(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() == 12 && digits.chars().all(|c| c.is_ascii_digit()) {
        format!("{} {} {}", &digits[0..4], &digits[4..8], &digits[8..12])
    } else {
        raw.to_string()
    }
}

/// At least two words of two or more letters, 4-50 characters, no card furniture
pub fn is_valid_name(name: &str) -> bool {
    let words: Vec<&str> = name.split_whitespace().collect();
    let length = name.trim().chars().count();
    let lower = name.to_lowercase();

    words.len() >= 2
        && (4..=50).contains(&length)
        && !INSTITUTIONAL_KEYWORDS.iter().any(|k| lower.contains(k))
        && !HEADER_PATTERN.is_match(name)
        && words.iter().all(|w| w.chars().count() >= 2)
}

fn is_header_line(line: &str) -> bool {
    HEADER_PATTERN.is_match(line) || SECONDARY_HEADER_TERMS.iter().any(|t| line.contains(t))
}

// Lines that cannot hold a name: numbers, dates, PIN codes, gender words, regions
fn is_not_a_name(line: &str) -> bool {
    if DIGIT_RUN.is_match(line)
        || UID_PATTERN.is_match(line)
        || DATE_PATTERN.is_match(line)
        || POSTAL_CODE_PATTERN.is_match(line)
        || find_region(line).is_some()
        || is_gender_only(line)
    {
        return true;
    }
    LineSanitizer::clean(line, Alphabet::Letters).chars().count() < 3
}

fn is_gender_only(line: &str) -> bool {
    let words: Vec<String> = line
        .split(|c: char| c.is_whitespace() || c == '/' || c == ':' || c == '|')
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect();
    !words.is_empty()
        && words.iter().all(|w| {
            matches!(
                w.as_str(),
                "m" | "f" | "male" | "female" | "transgender" | "पुरुष" | "महिला"
            )
        })
}

fn gender_code(value: &str) -> Option<String> {
    match value.trim().to_lowercase().as_str() {
        "female" | "f" | "महिला" => Some("F".to_string()),
        "male" | "m" | "पुरुष" => Some("M".to_string()),
        _ => None,
    }
}

fn reformat_date(captures: &Captures) -> Option<String> {
    let day = captures[1].parse::<u32>().ok()?;
    let month = captures[2].parse::<u32>().ok()?;
    let year = captures[3].parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day).map(|date| date.format("%Y-%m-%d").to_string())
}

fn in_range(year: i32, (low, high): (i32, i32)) -> bool {
    (low..=high).contains(&year)
}
