//! File signature entity
//!
//! Magic bytes that identify the image formats a cached asset can be
//! recovered into.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Image formats the scanner can recover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PNG image format
    Png,
    /// GIF image format (87a and 89a)
    Gif,
    /// JPEG image format
    Jpeg,
    /// WebP image format
    WebP,
}

impl FileType {
    /// Returns the file extension used when staging a recovered asset
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Png => "png",
            FileType::Gif => "gif",
            FileType::Jpeg => "jpg",
            FileType::WebP => "webp",
        }
    }

    /// Returns a human-readable name for this file type
    pub fn name(&self) -> &'static str {
        match self {
            FileType::Png => "PNG Image",
            FileType::Gif => "GIF Image",
            FileType::Jpeg => "JPEG Image",
            FileType::WebP => "WebP Image",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A magic byte sequence expected at a fixed offset of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagicSignature {
    file_type: FileType,
    magic: &'static [u8],
    offset: usize,
}

impl MagicSignature {
    /// Creates a signature anchored at the start of the file
    pub const fn new(file_type: FileType, magic: &'static [u8]) -> Self {
        Self {
            file_type,
            magic,
            offset: 0,
        }
    }

    /// Moves the signature to a custom offset
    pub const fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn magic(&self) -> &'static [u8] {
        self.magic
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes a buffer needs before this signature can be tested
    pub fn required_len(&self) -> usize {
        self.offset + self.magic.len()
    }

    /// Checks the plain (unobfuscated) header
    pub fn matches_header(&self, data: &[u8]) -> bool {
        if data.len() < self.required_len() {
            return false;
        }
        &data[self.offset..self.required_len()] == self.magic
    }
}

/// PNG: 89 50 4E 47 0D 0A 1A 0A
pub const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
/// GIF89a
pub const GIF89A_MAGIC: &[u8] = b"GIF89a";
/// GIF87a
pub const GIF87A_MAGIC: &[u8] = b"GIF87a";
/// JPEG start-of-image marker followed by the first marker prefix
pub const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
/// RIFF container header used by WebP
pub const WEBP_RIFF_MAGIC: &[u8] = b"RIFF";

/// Signatures in the order they are tried
pub const IMAGE_SIGNATURES: [MagicSignature; 5] = [
    MagicSignature::new(FileType::Png, PNG_MAGIC),
    MagicSignature::new(FileType::Gif, GIF89A_MAGIC),
    MagicSignature::new(FileType::Gif, GIF87A_MAGIC),
    MagicSignature::new(FileType::Jpeg, JPEG_MAGIC),
    MagicSignature::new(FileType::WebP, WEBP_RIFF_MAGIC),
];
