use idscan::models::{FailureKind, LanguageTag, RecognitionBundle, Transcript};
use idscan::processing::TextRecognizer;
use idscan::utils::IdScanError;
use idscan::validation::DocumentValidator;
use idscan::IdCardPipeline;
use image::{DynamicImage, RgbImage};

const SCENARIO_A: &str = "GOVERNMENT OF INDIA\nRohit Kumar Sharma\nDOB: 15-08-1990\nMale\n1234 5678 9012\n123 MG Road\nPune Maharashtra 411001";
const SCENARIO_B: &str = "PASSPORT\nUnited States of America\nJohn Smith";

struct StubRecognizer {
    language: &'static str,
    text: Option<&'static str>,
}

impl TextRecognizer for StubRecognizer {
    fn language(&self) -> &str {
        self.language
    }

    fn recognize(&self, _image: &DynamicImage) -> Result<String, IdScanError> {
        self.text
            .map(|text| text.to_string())
            .ok_or_else(|| IdScanError::RecognitionError("stub engine failure".to_string()))
    }
}

fn pipeline(primary: Option<&'static str>, secondary: Option<&'static str>) -> IdCardPipeline {
    IdCardPipeline::new(
        Box::new(StubRecognizer { language: "eng", text: primary }),
        Box::new(StubRecognizer { language: "hin", text: secondary }),
    )
}

fn card_image() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::new(16, 10))
}

fn from_text(primary: &str) -> idscan::models::ExtractionResult {
    let bundle = RecognitionBundle::new(
        Transcript::from_text("eng", primary),
        Transcript::from_text("hin", ""),
    );
    IdCardPipeline::extract_from_bundle(&bundle)
}

#[test]
fn test_scenario_a_genuine_card() {
    let result = pipeline(Some(SCENARIO_A), Some("भारत सरकार")).extract(&card_image());

    assert!(result.is_valid());
    assert_eq!(result.fields.name, "Rohit Kumar Sharma");
    assert_eq!(result.fields.gender, "M");
    assert_eq!(result.fields.birth_date, "1990-08-15");
    assert_eq!(result.fields.uid, "1234 5678 9012");
    assert!(result.fields.address.contains("Maharashtra"));
    assert!(result.fields.address.contains("411001"));
    assert_eq!(result.uid_checksum_valid, Some(false));
    assert!(result.failure.is_none());
}

#[test]
fn test_scenario_b_foreign_document() {
    let result = pipeline(Some(SCENARIO_B), Some("")).extract(&card_image());

    assert!(!result.is_valid());
    assert!(result.fields.is_empty());
    let issues = &result.verdict.issues;
    assert!(issues.iter().any(|i| i.contains("identity number")));
    assert!(issues.iter().any(|i| i.contains("gender")));
    assert!(issues.iter().any(|i| i.contains("different type")));
    assert!(result.failure.is_none());
}

#[test]
fn test_scenario_c_unspaced_uid_is_reformatted() {
    let result = from_text(
        "GOVERNMENT OF INDIA\nAnita Devi Verma\nDOB: 01/01/1985\nFemale\n987654321098",
    );

    assert!(result.is_valid());
    assert_eq!(result.fields.uid, "9876 5432 1098");
}

#[test]
fn test_score_stays_within_bounds() {
    let crowded = "GOVERNMENT OF INDIA\nUnique Identification Authority of India\nUIDAI Aadhaar Enrolment\nMera Aadhaar\nभारत सरकार आधार\nGovt of India\nRohit Kumar Sharma\nDOB: 15/08/1990\nMale\n1234 5678 9012\nPune Maharashtra 411001";
    let high = DocumentValidator::validate(crowded);
    assert_eq!(high.score, 100.0);

    let low = DocumentValidator::validate(SCENARIO_B);
    assert_eq!(low.score, 0.0);

    for text in [SCENARIO_A, SCENARIO_B, "", "1234 5678 9012"] {
        let verdict = DocumentValidator::validate(text);
        assert!((0.0..=100.0).contains(&verdict.score));
    }
}

#[test]
fn test_invalid_results_have_empty_fields() {
    for text in [SCENARIO_B, "hello world", "Male 1234 5678 9012"] {
        let result = from_text(text);
        if !result.is_valid() {
            assert!(result.fields.is_empty(), "fields leaked for {:?}", text);
        }
    }
}

#[test]
fn test_recognition_failure_becomes_invalid_result() {
    let result = pipeline(None, Some("भारत")).extract(&card_image());

    assert!(!result.is_valid());
    assert_eq!(result.verdict.score, 0.0);
    assert!(result.fields.is_empty());
    assert!(result.verdict.message.contains("stub engine failure"));
    assert_eq!(result.failure, Some(FailureKind::Recognition));
}

struct CrashingRecognizer;

impl TextRecognizer for CrashingRecognizer {
    fn language(&self) -> &str {
        "eng"
    }

    fn recognize(&self, _image: &DynamicImage) -> Result<String, IdScanError> {
        panic!("engine segment fault")
    }
}

#[test]
fn test_panicking_pass_does_not_escape_extract() {
    let pipeline = IdCardPipeline::new(
        Box::new(CrashingRecognizer),
        Box::new(StubRecognizer { language: "hin", text: Some("भारत") }),
    );

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pipeline.extract(&card_image())
    }));
    let result = outcome.expect("extract must not panic");
    assert!(!result.is_valid());
    assert!(result.fields.is_empty());
    assert!(result.verdict.message.contains("panicked"));
    assert_eq!(result.failure, Some(FailureKind::Recognition));
}

#[test]
fn test_vid_line_does_not_replace_identity_number() {
    let result = from_text(
        "GOVERNMENT OF INDIA\nRohit Kumar Sharma\nDOB: 15-08-1990\nMale\n1234 5678 9012\nVID : 9134 5678 9012 3456",
    );

    assert!(result.is_valid());
    assert_eq!(result.fields.uid, "1234 5678 9012");
}

#[test]
fn test_blank_primary_pass_becomes_invalid_result() {
    let result = pipeline(Some("\n  \n"), Some("भारत")).extract(&card_image());

    assert!(!result.is_valid());
    assert_eq!(result.failure, Some(FailureKind::EmptyText));
}

#[test]
fn test_missing_image_file_becomes_invalid_result() {
    let result = pipeline(Some(SCENARIO_A), Some(""))
        .extract_path(std::path::Path::new("/no/such/card.jpg"));

    assert!(!result.is_valid());
    assert_eq!(result.failure, Some(FailureKind::ImageLoad));
}

#[test]
fn test_header_name_beats_labelled_name() {
    let result = from_text(
        "GOVERNMENT OF INDIA\nRohit Kumar Sharma\nDOB: 15-08-1990\nMale\n1234 5678 9012\n123 MG Road\nPune Maharashtra 411001\nName: Amit Singh",
    );

    assert!(result.is_valid());
    assert_eq!(result.fields.name, "Rohit Kumar Sharma");
}

#[test]
fn test_female_wins_over_male_substring() {
    let result = from_text(
        "GOVERNMENT OF INDIA\nPriya Sharma\nDOB: 12/03/1992\nFemale\n1234 5678 9012",
    );

    assert!(result.is_valid());
    assert_eq!(result.fields.gender, "F");
}

#[test]
fn test_single_bare_year_becomes_birth_date() {
    let result = from_text(
        "GOVERNMENT OF INDIA\nRohit Kumar Sharma\n1988\nMale\n1234 5678 9012\nPune Maharashtra 411001",
    );

    assert!(result.is_valid());
    assert_eq!(result.fields.birth_date, "1988-01-01");
}

#[test]
fn test_two_bare_years_give_no_birth_date() {
    let result = from_text(
        "GOVERNMENT OF INDIA\nRohit Kumar Sharma\n1988\n2001\nMale\n1234 5678 9012\nPune Maharashtra 411001",
    );

    assert!(result.is_valid());
    assert_eq!(result.fields.birth_date, "");
}

#[test]
fn test_diagnostics_tag_every_primary_line() {
    let result = from_text(SCENARIO_A);

    assert_eq!(result.tagged_lines.len(), 7);
    assert_eq!(result.diagnostic_transcript.lines().count(), 7);
    assert_eq!(result.tagged_lines[1].tag, LanguageTag::PrimaryScript);
}
