#![no_main]

use libfuzzer_sys::fuzz_target;
use magpie::domain::services::{XorSignatureCodec, xor_bytes};

fuzz_target!(|data: &[u8]| {
    let codec = XorSignatureCodec::with_max_probe_bytes(64 * 1024);
    if let Some(decoded) = codec.recover(data) {
        assert_eq!(decoded.data.len(), data.len());
        let mut again = decoded.data.clone();
        xor_bytes(&mut again, decoded.key);
        assert_eq!(again, data);
    }
});
