#![no_main]

use libfuzzer_sys::fuzz_target;
use magpie::application::decoded_file_name;
use std::path::Path;

fuzz_target!(|input: (&str, &[u8])| {
    let (name, data) = input;
    let file_name = decoded_file_name(Path::new(name), data, "png");
    assert!(file_name.ends_with(".png"));
    assert!(!file_name.contains('/'));
});
