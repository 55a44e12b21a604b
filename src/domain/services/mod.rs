//! Domain services
//!
//! Core business logic services that operate on domain entities.

mod source_catalog;
mod xor_codec;

pub use source_catalog::{
    AppDataRoots, BUILTIN_SOURCES, RootKind, SourceCandidate, SourceCatalog,
};
pub use xor_codec::{DEFAULT_MAX_PROBE_BYTES, DecodedImage, XorSignatureCodec, xor_bytes};
