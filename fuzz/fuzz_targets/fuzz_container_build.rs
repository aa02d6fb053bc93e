#![no_main]
use libfuzzer_sys::fuzz_target;

use eofcheck::builder::Eof1Builder;
use eofcheck::Eof1Container;

fuzz_target!(|input: (Vec<u8>, Vec<u8>)| {
    let (code, data) = input;

    // Every container the builder accepts must parse back to the same sections
    if let Ok(bytes) = Eof1Builder::new(code.clone()).with_data(data.clone()).build() {
        let container = Eof1Container::parse(&bytes).unwrap();
        assert_eq!(container.code(), &code[..]);
        assert_eq!(container.data(), &data[..]);
    }
});
