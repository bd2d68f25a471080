use serde::Serialize;
use std::fmt;

use crate::utils::IdScanError;

/// Ordered text lines produced by one recognition pass.
///
/// Lines are trimmed and never empty. A transcript is immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    language: String,
    lines: Vec<String>,
}

impl Transcript {
    pub fn from_text(language: &str, raw: &str) -> Self {
        let lines = raw
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(|line| line.to_string())
            .collect();

        Transcript {
            language: language.to_string(),
            lines,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }

    /// Writing system whatlang sees in the transcript, if any
    pub fn dominant_script(&self) -> Option<whatlang::Script> {
        if self.lines.is_empty() {
            return None;
        }
        whatlang::detect_script(&self.joined())
    }
}

/// The two transcripts captured from a single image
#[derive(Debug, Clone)]
pub struct RecognitionBundle {
    pub primary: Transcript,
    pub secondary: Transcript,
}

impl RecognitionBundle {
    pub fn new(primary: Transcript, secondary: Transcript) -> Self {
        RecognitionBundle { primary, secondary }
    }

    /// Both transcripts, each under a header naming the pass and its detected script
    pub fn merged_text(&self) -> String {
        let mut merged = String::new();
        for (role, transcript) in [("primary", &self.primary), ("secondary", &self.secondary)] {
            let script = transcript
                .dominant_script()
                .map(|s| format!("{:?}", s))
                .unwrap_or_else(|| "unknown".to_string());
            merged.push_str(&format!(
                "[{}:{} script={}]\n",
                role,
                transcript.language(),
                script
            ));
            for line in transcript.lines() {
                merged.push_str(line);
                merged.push('\n');
            }
        }
        merged
    }
}

/// A provisional value produced by one extraction strategy
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCandidate {
    pub text: String,
    pub score: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LanguageTag {
    PrimaryScript,
    SecondaryScript,
    Mixed,
    Unknown,
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let code = match self {
            LanguageTag::PrimaryScript => "PRI",
            LanguageTag::SecondaryScript => "SEC",
            LanguageTag::Mixed => "MIX",
            LanguageTag::Unknown => "UNK",
        };
        write!(f, "{}", code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScriptClassification {
    pub tag: LanguageTag,
    pub confidence: f32,
    /// Set when the tag comes from the garbled-transliteration heuristic
    pub synthetic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedLine {
    pub text: String,
    pub tag: LanguageTag,
    pub confidence: f32,
    pub synthetic: bool,
}

impl fmt::Display for TaggedLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let marker = if self.synthetic { "*" } else { "" };
        write!(
            f,
            "[{}{} {:.2}] {}",
            self.tag, marker, self.confidence, self.text
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationVerdict {
    pub is_valid: bool,
    pub score: f32,
    pub issues: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedFields {
    pub name: String,
    pub gender: String,
    pub birth_date: String,
    pub uid: String,
    pub address: String,
}

impl ExtractedFields {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.gender.is_empty()
            && self.birth_date.is_empty()
            && self.uid.is_empty()
            && self.address.is_empty()
    }

    /// UID with all but the last group hidden, e.g. `XXXX XXXX 9012`
    pub fn masked_uid(&self) -> String {
        if self.uid.is_empty() {
            return String::new();
        }
        let groups: Vec<&str> = self.uid.split(' ').collect();
        let last = groups.len().saturating_sub(1);
        groups
            .iter()
            .enumerate()
            .map(|(i, group)| {
                if i == last {
                    group.to_string()
                } else {
                    "X".repeat(group.chars().count())
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Why a pipeline run ended without reaching the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    ImageLoad,
    Recognition,
    EmptyText,
    Engine,
    Other,
}

impl From<&IdScanError> for FailureKind {
    fn from(err: &IdScanError) -> Self {
        match err {
            IdScanError::ImageLoadError(_) => FailureKind::ImageLoad,
            IdScanError::RecognitionError(_) => FailureKind::Recognition,
            IdScanError::EmptyTranscript(_) => FailureKind::EmptyText,
            IdScanError::EngineUnavailable(_) => FailureKind::Engine,
            IdScanError::ConfigError(_) | IdScanError::IoError(_) => FailureKind::Other,
        }
    }
}

/// Externally visible output of one extraction call
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    pub fields: ExtractedFields,
    pub verdict: ValidationVerdict,
    pub tagged_lines: Vec<TaggedLine>,
    pub diagnostic_transcript: String,
    pub merged_transcript: String,
    pub uid_checksum_valid: Option<bool>,
    pub failure: Option<FailureKind>,
}

impl ExtractionResult {
    pub fn is_valid(&self) -> bool {
        self.verdict.is_valid
    }

    /// Result for a run that failed before validation could happen
    pub fn from_error(err: &IdScanError) -> Self {
        let cause = err.to_string();
        ExtractionResult {
            fields: ExtractedFields::default(),
            verdict: ValidationVerdict {
                is_valid: false,
                score: 0.0,
                issues: vec![cause.clone()],
                message: format!("Extraction failed: {}", cause),
            },
            tagged_lines: Vec::new(),
            diagnostic_transcript: String::new(),
            merged_transcript: String::new(),
            uid_checksum_valid: None,
            failure: Some(FailureKind::from(err)),
        }
    }
}
