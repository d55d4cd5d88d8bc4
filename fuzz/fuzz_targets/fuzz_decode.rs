#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // One-shot decode must never panic
    let _ = zenktx::decode(data, enough::Unstoppable);

    // Lazy accessors must never panic either
    if let Ok(mut file) = zenktx::KtxFile::from_bytes(data) {
        let _ = file.pixel_format();
        let _ = file.key_values().len();
        let _ = file.orientation();
        let _ = file.image();
        let _ = file.mipmap(1);
    }
});
