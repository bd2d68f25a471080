use image::DynamicImage;
use log::{debug, error, info, warn};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::models::{ExtractedFields, ExtractionResult, RecognitionBundle, Transcript};
#[cfg(feature = "tesseract")]
use crate::processing::{RecognizerConfig, TesseractRecognizer};
use crate::processing::{FieldExtractor, ImageProcessor, ScriptClassifier, TextRecognizer};
use crate::utils::IdScanError;
use crate::validation::{DocumentValidator, UidChecksum};

/// Runs both recognition passes over a card image and turns the transcripts into
/// structured fields. Holds the two recognizers for its whole lifetime.
pub struct IdCardPipeline {
    primary: Box<dyn TextRecognizer>,
    secondary: Box<dyn TextRecognizer>,
}

impl IdCardPipeline {
    pub fn new(primary: Box<dyn TextRecognizer>, secondary: Box<dyn TextRecognizer>) -> Self {
        IdCardPipeline { primary, secondary }
    }

    /// Builds Tesseract recognizers for both configured languages
    #[cfg(feature = "tesseract")]
    pub fn with_tesseract(config: &RecognizerConfig) -> Result<Self, IdScanError> {
        config.validate()?;
        let primary = TesseractRecognizer::new(config, &config.primary_language)?;
        let secondary = TesseractRecognizer::new(config, &config.secondary_language)?;
        Ok(Self::new(Box::new(primary), Box::new(secondary)))
    }

    /// Extraction entry point. Never fails: any error becomes an invalid result
    pub fn extract(&self, image: &DynamicImage) -> ExtractionResult {
        match self.recognize(image) {
            Ok(bundle) => Self::extract_from_bundle(&bundle),
            Err(e) => {
                error!("Extraction failed: {}", e);
                ExtractionResult::from_error(&e)
            }
        }
    }

    pub fn extract_path(&self, image_path: &Path) -> ExtractionResult {
        match ImageProcessor::load(image_path) {
            Ok(image) => self.extract(&image),
            Err(e) => {
                error!("Extraction failed: {}", e);
                ExtractionResult::from_error(&e)
            }
        }
    }

    /// Both passes run concurrently; the result is available once both have finished
    fn recognize(&self, image: &DynamicImage) -> Result<RecognitionBundle, IdScanError> {
        let (primary_text, secondary_text) = rayon::join(
            || run_pass(self.primary.as_ref(), image),
            || run_pass(self.secondary.as_ref(), image),
        );

        let primary = Transcript::from_text(self.primary.language(), &primary_text?);
        if primary.is_empty() {
            return Err(IdScanError::EmptyTranscript(format!(
                "'{}' pass returned no text",
                self.primary.language()
            )));
        }

        let secondary = Transcript::from_text(self.secondary.language(), &secondary_text?);
        if secondary.is_empty() {
            warn!("'{}' pass returned no text", self.secondary.language());
        }

        Ok(RecognitionBundle::new(primary, secondary))
    }

    /// Everything after recognition. Pure; needs no engine.
    pub fn extract_from_bundle(bundle: &RecognitionBundle) -> ExtractionResult {
        let merged_transcript = bundle.merged_text();
        debug!("Recognized text:\n{}", merged_transcript);

        let tagged_lines = ScriptClassifier::tag_transcript(&bundle.primary);
        let diagnostic_transcript = tagged_lines
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join("\n");

        let verdict = DocumentValidator::validate(&bundle.primary.joined());
        if !verdict.is_valid {
            info!("{}", verdict.message);
            return ExtractionResult {
                fields: ExtractedFields::default(),
                verdict,
                tagged_lines,
                diagnostic_transcript,
                merged_transcript,
                uid_checksum_valid: None,
                failure: None,
            };
        }

        let fields = FieldExtractor::extract_all(&bundle.primary);
        let uid_checksum_valid = if fields.uid.is_empty() {
            None
        } else {
            Some(UidChecksum::is_valid(&fields.uid))
        };
        if uid_checksum_valid == Some(false) {
            warn!("Identity number {} fails its check digit", fields.masked_uid());
        }

        info!("{}", verdict.message);
        ExtractionResult {
            fields,
            verdict,
            tagged_lines,
            diagnostic_transcript,
            merged_transcript,
            uid_checksum_valid,
            failure: None,
        }
    }

    /// Releases both recognizers
    pub fn shutdown(self) {
        self.primary.release();
        self.secondary.release();
        info!("Recognition engines released");
    }
}

// A panicking engine is reported like any other recognition failure
fn run_pass(recognizer: &dyn TextRecognizer, image: &DynamicImage) -> Result<String, IdScanError> {
    panic::catch_unwind(AssertUnwindSafe(|| recognizer.recognize(image))).unwrap_or_else(|payload| {
        let cause = panic_message(payload.as_ref());
        error!("'{}' recognition pass panicked: {}", recognizer.language(), cause);
        Err(IdScanError::RecognitionError(format!(
            "recognition pass panicked: {}",
            cause
        )))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FailureKind;
    use image::RgbImage;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FixedRecognizer {
        language: &'static str,
        text: Result<String, String>,
        releases: Arc<AtomicUsize>,
    }

    impl FixedRecognizer {
        fn boxed(language: &'static str, text: &str, releases: &Arc<AtomicUsize>) -> Box<dyn TextRecognizer> {
            Box::new(FixedRecognizer {
                language,
                text: Ok(text.to_string()),
                releases: Arc::clone(releases),
            })
        }
    }

    impl TextRecognizer for FixedRecognizer {
        fn language(&self) -> &str {
            self.language
        }

        fn recognize(&self, _image: &DynamicImage) -> Result<String, IdScanError> {
            self.text.clone().map_err(IdScanError::RecognitionError)
        }

        fn release(&self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    const CARD: &str = "GOVERNMENT OF INDIA\nRohit Kumar Sharma\nDOB: 15/08/1990\nMale\n1234 5678 9012";

    fn blank_image() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::new(8, 8))
    }

    #[test]
    fn test_extract_valid_card() {
        let releases = Arc::new(AtomicUsize::new(0));
        let pipeline = IdCardPipeline::new(
            FixedRecognizer::boxed("eng", CARD, &releases),
            FixedRecognizer::boxed("hin", "भारत सरकार", &releases),
        );

        let result = pipeline.extract(&blank_image());
        assert!(result.is_valid());
        assert_eq!(result.fields.name, "Rohit Kumar Sharma");
        assert_eq!(result.fields.uid, "1234 5678 9012");
        assert_eq!(result.tagged_lines.len(), 5);
        assert!(result.merged_transcript.contains("भारत सरकार"));
        assert!(result.failure.is_none());
    }

    #[test]
    fn test_empty_primary_text_is_a_failure() {
        let releases = Arc::new(AtomicUsize::new(0));
        let pipeline = IdCardPipeline::new(
            FixedRecognizer::boxed("eng", "  \n ", &releases),
            FixedRecognizer::boxed("hin", "भारत", &releases),
        );

        let result = pipeline.extract(&blank_image());
        assert!(!result.is_valid());
        assert_eq!(result.verdict.score, 0.0);
        assert_eq!(result.failure, Some(FailureKind::EmptyText));
    }

    #[test]
    fn test_recognition_error_is_not_propagated() {
        let releases = Arc::new(AtomicUsize::new(0));
        let failing = Box::new(FixedRecognizer {
            language: "hin",
            text: Err("engine crashed".to_string()),
            releases: Arc::clone(&releases),
        });
        let pipeline = IdCardPipeline::new(FixedRecognizer::boxed("eng", CARD, &releases), failing);

        let result = pipeline.extract(&blank_image());
        assert!(!result.is_valid());
        assert!(result.fields.is_empty());
        assert!(result.verdict.message.starts_with("Extraction failed:"));
        assert!(result.verdict.message.contains("engine crashed"));
    }

    struct PanickingRecognizer;

    impl TextRecognizer for PanickingRecognizer {
        fn language(&self) -> &str {
            "hin"
        }

        fn recognize(&self, _image: &DynamicImage) -> Result<String, IdScanError> {
            panic!("native engine aborted")
        }
    }

    #[test]
    fn test_panicking_recognizer_becomes_invalid_result() {
        let releases = Arc::new(AtomicUsize::new(0));
        let pipeline = IdCardPipeline::new(
            FixedRecognizer::boxed("eng", CARD, &releases),
            Box::new(PanickingRecognizer),
        );

        let result = pipeline.extract(&blank_image());
        assert!(!result.is_valid());
        assert_eq!(result.verdict.score, 0.0);
        assert!(result.fields.is_empty());
        assert!(result.verdict.message.contains("recognition pass panicked: native engine aborted"));
        assert_eq!(result.failure, Some(FailureKind::Recognition));
    }

    #[test]
    fn test_rejected_document_keeps_diagnostics_only() {
        let bundle = RecognitionBundle::new(
            Transcript::from_text("eng", "Random shopping list\nmilk eggs bread"),
            Transcript::from_text("hin", ""),
        );

        let result = IdCardPipeline::extract_from_bundle(&bundle);
        assert!(!result.is_valid());
        assert!(result.fields.is_empty());
        assert_eq!(result.tagged_lines.len(), 2);
        assert!(!result.diagnostic_transcript.is_empty());
        assert!(result.uid_checksum_valid.is_none());
    }

    #[test]
    fn test_shutdown_releases_both_recognizers() {
        let releases = Arc::new(AtomicUsize::new(0));
        let pipeline = IdCardPipeline::new(
            FixedRecognizer::boxed("eng", CARD, &releases),
            FixedRecognizer::boxed("hin", "", &releases),
        );
        pipeline.shutdown();
        assert_eq!(releases.load(Ordering::SeqCst), 2);
    }
}
