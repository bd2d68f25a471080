use image::DynamicImage;
use std::path::PathBuf;

use crate::utils::IdScanError;

/// A recognition pass over a decoded image.
///
/// Implementations own whatever native engine they need. The engine is acquired
/// when the recognizer is built and must be released by `release` (and on drop).
pub trait TextRecognizer: Send + Sync {
    /// Language/script code the pass is tuned for, e.g. `eng` or `hin`
    fn language(&self) -> &str;

    fn recognize(&self, image: &DynamicImage) -> Result<String, IdScanError>;

    fn release(&self) {}
}

/// Settings for the recognition engines; the extraction engine itself has none
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizerConfig {
    pub tessdata_dir: Option<PathBuf>,
    pub primary_language: String,
    pub secondary_language: String,
    pub page_seg_mode: String,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        RecognizerConfig {
            tessdata_dir: None,
            primary_language: "eng".to_string(),
            secondary_language: "hin".to_string(),
            // 3 = fully automatic page segmentation
            page_seg_mode: "3".to_string(),
        }
    }
}

impl RecognizerConfig {
    /// Defaults, with the tessdata directory taken from `TESSDATA_PREFIX` when set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var("TESSDATA_PREFIX") {
            if !dir.trim().is_empty() {
                config.tessdata_dir = Some(PathBuf::from(dir));
            }
        }
        config
    }

    pub fn validate(&self) -> Result<(), IdScanError> {
        if self.primary_language.trim().is_empty() || self.secondary_language.trim().is_empty() {
            return Err(IdScanError::ConfigError(
                "recognition languages must not be empty".to_string(),
            ));
        }
        if let Some(dir) = &self.tessdata_dir {
            if !dir.is_dir() {
                return Err(IdScanError::ConfigError(format!(
                    "tessdata directory {} does not exist",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(feature = "tesseract")]
pub use self::tesseract_engine::TesseractRecognizer;

#[cfg(feature = "tesseract")]
mod tesseract_engine {
    use image::DynamicImage;
    use log::{debug, error, info};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use tesseract::Tesseract;

    use super::{RecognizerConfig, TextRecognizer};
    use crate::utils::IdScanError;

    /// Tesseract-backed recognition pass holding one native handle
    pub struct TesseractRecognizer {
        language: String,
        datapath: Option<String>,
        page_seg_mode: String,
        engine: Mutex<Option<Tesseract>>,
        released: AtomicBool,
    }

    impl TesseractRecognizer {
        pub fn new(config: &RecognizerConfig, language: &str) -> Result<Self, IdScanError> {
            let datapath = config
                .tessdata_dir
                .as_ref()
                .map(|dir| dir.to_string_lossy().to_string());
            let engine = Self::initialize(datapath.as_deref(), language, &config.page_seg_mode)?;
            info!("Initialized Tesseract recognizer for '{}'", language);

            Ok(TesseractRecognizer {
                language: language.to_string(),
                datapath,
                page_seg_mode: config.page_seg_mode.clone(),
                engine: Mutex::new(Some(engine)),
                released: AtomicBool::new(false),
            })
        }

        fn initialize(
            datapath: Option<&str>,
            language: &str,
            page_seg_mode: &str,
        ) -> Result<Tesseract, IdScanError> {
            Tesseract::new(datapath, Some(language))
                .map_err(|e| {
                    IdScanError::EngineUnavailable(format!(
                        "Tesseract init failed for '{}': {}",
                        language, e
                    ))
                })?
                .set_variable("tessedit_pageseg_mode", page_seg_mode)
                .map_err(|e| {
                    IdScanError::EngineUnavailable(format!(
                        "Failed to set page segmentation mode: {}",
                        e
                    ))
                })
        }
    }

    impl TextRecognizer for TesseractRecognizer {
        fn language(&self) -> &str {
            &self.language
        }

        fn recognize(&self, image: &DynamicImage) -> Result<String, IdScanError> {
            if self.released.load(Ordering::SeqCst) {
                return Err(IdScanError::EngineUnavailable(format!(
                    "'{}' recognizer has been released",
                    self.language
                )));
            }

            let rgb = image.to_rgb8();
            let (width, height) = rgb.dimensions();
            if width == 0 || height == 0 {
                return Err(IdScanError::ImageLoadError("image has no pixels".to_string()));
            }

            let mut slot = self.engine.lock().map_err(|_| {
                IdScanError::RecognitionError("recognizer lock poisoned".to_string())
            })?;

            // A failed call consumes the handle, so a fresh one is built on the next run
            let engine = match slot.take() {
                Some(engine) => engine,
                None => Self::initialize(self.datapath.as_deref(), &self.language, &self.page_seg_mode)?,
            };

            let mut engine = engine
                .set_frame(
                    rgb.as_raw(),
                    width as i32,
                    height as i32,
                    3,
                    3 * width as i32,
                )
                .map_err(|e| {
                    error!("Tesseract rejected the image for '{}': {}", self.language, e);
                    IdScanError::RecognitionError(format!("Failed to set image: {}", e))
                })?;

            let text = engine.get_text().map_err(|e| {
                error!("Tesseract failed for '{}': {}", self.language, e);
                IdScanError::RecognitionError(format!("Failed to extract text: {}", e))
            })?;
            debug!("'{}' pass produced {} characters", self.language, text.len());

            *slot = Some(engine);
            Ok(text)
        }

        fn release(&self) {
            if self.released.swap(true, Ordering::SeqCst) {
                return;
            }
            if let Ok(mut slot) = self.engine.lock() {
                slot.take();
            }
            info!("Released Tesseract recognizer for '{}'", self.language);
        }
    }

    impl Drop for TesseractRecognizer {
        fn drop(&mut self) {
            self.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RecognizerConfig::default();
        assert_eq!(config.primary_language, "eng");
        assert_eq!(config.secondary_language, "hin");
        assert!(config.tessdata_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_missing_tessdata_dir() {
        let config = RecognizerConfig {
            tessdata_dir: Some(PathBuf::from("/definitely/not/a/tessdata/dir")),
            ..RecognizerConfig::default()
        };
        assert!(matches!(config.validate(), Err(IdScanError::ConfigError(_))));
    }

    #[test]
    fn test_config_rejects_empty_language() {
        let config = RecognizerConfig {
            secondary_language: " ".to_string(),
            ..RecognizerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
