//! XOR signature codec
//!
//! Several chat applications store cached media XORed with one repeating
//! byte. The magic bytes of the target formats are known, so the key is the
//! XOR of the first observed byte and the first expected byte; the remaining
//! magic bytes confirm it.

use crate::domain::entities::{FileType, IMAGE_SIGNATURES, MagicSignature};

/// Largest buffer the codec will look at by default (16 MiB)
pub const DEFAULT_MAX_PROBE_BYTES: usize = 16 * 1024 * 1024;

/// Bytes recovered from an obfuscated buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub data: Vec<u8>,
    pub file_type: FileType,
    pub key: u8,
}

impl DecodedImage {
    pub fn extension(&self) -> &'static str {
        self.file_type.extension()
    }
}

/// Applies a single-byte XOR key in place. Encoding and decoding are the
/// same operation.
pub fn xor_bytes(data: &mut [u8], key: u8) {
    if key == 0 {
        return;
    }
    for byte in data.iter_mut() {
        *byte ^= key;
    }
}

/// Signature sniffer with single-byte XOR key recovery
///
/// # Example
///
/// ```
/// use magpie::domain::entities::{FileType, PNG_MAGIC};
/// use magpie::domain::services::{XorSignatureCodec, xor_bytes};
///
/// let mut cached = PNG_MAGIC.to_vec();
/// cached.extend_from_slice(b"IHDR");
/// xor_bytes(&mut cached, 0x5A);
///
/// let decoded = XorSignatureCodec::default().recover(&cached).unwrap();
/// assert_eq!(decoded.file_type, FileType::Png);
/// assert_eq!(decoded.key, 0x5A);
/// ```
#[derive(Debug, Clone)]
pub struct XorSignatureCodec {
    signatures: Vec<MagicSignature>,
    max_probe_bytes: usize,
}

impl XorSignatureCodec {
    /// Creates a codec over an ordered signature table
    pub fn new(signatures: Vec<MagicSignature>, max_probe_bytes: usize) -> Self {
        Self {
            signatures,
            max_probe_bytes,
        }
    }

    /// Creates the default image codec with a custom probe ceiling
    pub fn with_max_probe_bytes(max_probe_bytes: usize) -> Self {
        Self::new(IMAGE_SIGNATURES.to_vec(), max_probe_bytes)
    }

    pub fn max_probe_bytes(&self) -> usize {
        self.max_probe_bytes
    }

    /// Finds the first signature that matches under a single derived key
    pub fn detect(&self, data: &[u8]) -> Option<(u8, &MagicSignature)> {
        if data.len() > self.max_probe_bytes {
            return None;
        }

        self.signatures.iter().find_map(|signature| {
            derive_key(data, signature).map(|key| (key, signature))
        })
    }

    /// Recovers the plain image bytes, or `None` when nothing matches
    pub fn recover(&self, data: &[u8]) -> Option<DecodedImage> {
        let (key, signature) = self.detect(data)?;
        let mut decoded = data.to_vec();
        xor_bytes(&mut decoded, key);
        Some(DecodedImage {
            data: decoded,
            file_type: signature.file_type(),
            key,
        })
    }
}

impl Default for XorSignatureCodec {
    fn default() -> Self {
        Self::with_max_probe_bytes(DEFAULT_MAX_PROBE_BYTES)
    }
}

fn derive_key(data: &[u8], signature: &MagicSignature) -> Option<u8> {
    if data.len() < signature.required_len() {
        return None;
    }
    let magic = signature.magic();
    let first = *magic.first()?;
    let observed = &data[signature.offset()..signature.required_len()];
    let key = observed[0] ^ first;

    observed
        .iter()
        .zip(magic)
        .skip(1)
        .all(|(byte, expected)| byte ^ key == *expected)
        .then_some(key)
}
