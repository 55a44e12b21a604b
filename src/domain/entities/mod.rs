//! Domain entities
//!
//! Core business objects of the cache recovery domain.

mod category;
mod detected_source;
mod file_signature;
mod platform;
mod scan_record;
mod scan_result;

pub use category::{Category, DEFAULT_CATEGORY_ID};
pub use detected_source::DetectedSource;
pub use file_signature::{
    FileType, GIF87A_MAGIC, GIF89A_MAGIC, IMAGE_SIGNATURES, JPEG_MAGIC, MagicSignature,
    PNG_MAGIC, WEBP_RIFF_MAGIC,
};
pub use platform::Platform;
pub use scan_record::{FileStatus, PreparedAsset, ScannerFileRecord, reason};
pub use scan_result::ScanRunResult;
