#![no_main]
use libfuzzer_sys::fuzz_target;

use eofcheck::{is_eof_code, read_eof1_header, read_eof1_header_unchecked, validate_eof};

fuzz_target!(|data: &[u8]| {
    // This should never crash or panic, even on garbage input
    let result = read_eof1_header(data);

    assert_eq!(validate_eof(data), result.is_ok());

    match result {
        Ok(header) => {
            assert!(is_eof_code(data));
            assert_ne!(header.code_size(), 0);
            assert_eq!(header.container_size(), data.len());
            // The trusted path is only sound after validation
            assert_eq!(read_eof1_header_unchecked(data), header);
        }
        Err(err) => {
            assert_eq!(err.is_legacy(), !is_eof_code(data));
        }
    }
});
