// Copyright 2023 Pelikan Foundation LLC.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Common, performance-oriented mechanisms of parsing byte strings into various types

/// number of decimal digits in `u64::MAX`
const U64_MAX_DIGITS: usize = 20;

/// optionally parse a bytestring into an unsigned integer, accepting only the
/// canonical decimal form: no sign, no leading zeros, no surrounding bytes
pub fn parse_unsigned(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() || bytes.len() > U64_MAX_DIGITS {
        return None;
    }

    // Special case: first and only digit is 0.
    if bytes == b"0" {
        return Some(0);
    }

    if bytes[0] == b'0' {
        return None;
    }

    let mut number: u64 = 0;
    for byte in bytes {
        let digit = (*byte as char).to_digit(10)?;
        number = number.checked_mul(10)?.checked_add(digit as u64)?;
    }
    Some(number)
}
