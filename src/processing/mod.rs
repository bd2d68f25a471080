pub mod address;
pub mod extractors;
pub mod image;
pub mod name_scorer;
pub mod ocr;
pub mod patterns;
pub mod sanitizer;
pub mod script;
pub mod text_correction;

pub use self::address::AddressAssembler;
pub use self::extractors::FieldExtractor;
pub use self::image::ImageProcessor;
pub use self::name_scorer::NameScorer;
pub use self::ocr::{RecognizerConfig, TextRecognizer};
#[cfg(feature = "tesseract")]
pub use self::ocr::TesseractRecognizer;
pub use self::sanitizer::{Alphabet, LineSanitizer};
pub use self::script::ScriptClassifier;
