pub mod checksum;
pub mod document;

pub use checksum::UidChecksum;
pub use document::DocumentValidator;
