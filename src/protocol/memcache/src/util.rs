// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::*;

/// number of decimal digits in `u64::MAX`
const MAX_DIGITS: usize = 20;

// rendered on the stack rather than with `format!` so the fast path never allocates
/// Decimal ASCII rendering of an unsigned integer held on the stack, so
/// numeric header fields can be measured before anything is written.
pub(crate) struct Decimal {
    digits: [u8; MAX_DIGITS],
    start: usize,
}

impl Decimal {
    pub fn new(mut value: u64) -> Self {
        let mut digits = [b'0'; MAX_DIGITS];
        let mut start = MAX_DIGITS;

        loop {
            start -= 1;
            digits[start] = b'0' + (value % 10) as u8;
            value /= 10;
            if value == 0 {
                break;
            }
        }

        Self { digits, start }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.digits[self.start..]
    }

    pub fn len(&self) -> usize {
        MAX_DIGITS - self.start
    }
}

/// Keys must be non-empty, no longer than `max_key_len`, and free of
/// whitespace and control characters.
pub(crate) fn validate_key(key: &[u8], max_key_len: usize) -> Result<()> {
    if key.len() > max_key_len {
        return Err(MemcacheError::KeyTooLong {
            len: key.len(),
            max: max_key_len,
        });
    }

    if key.is_empty() || key.iter().any(|b| b.is_ascii_whitespace() || b.is_ascii_control()) {
        return Err(MemcacheError::InvalidKey);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal() {
        for value in [0, 1, 9, 10, 42, 99, 100, 1_000_000, u32::MAX as u64, u64::MAX] {
            let decimal = Decimal::new(value);
            assert_eq!(decimal.as_bytes(), value.to_string().as_bytes());
            assert_eq!(decimal.len(), value.to_string().len());
        }
    }

    #[test]
    fn keys() {
        assert_eq!(validate_key(b"key", 250), Ok(()));
        assert_eq!(validate_key(b"a:b/c-d_e", 250), Ok(()));
        assert_eq!(validate_key(&[b'k'; 250], 250), Ok(()));

        assert_eq!(validate_key(b"", 250), Err(MemcacheError::InvalidKey));
        assert_eq!(validate_key(b"two words", 250), Err(MemcacheError::InvalidKey));
        assert_eq!(validate_key(b"tab\tkey", 250), Err(MemcacheError::InvalidKey));
        assert_eq!(validate_key(b"line\r\n", 250), Err(MemcacheError::InvalidKey));
        assert_eq!(validate_key(b"nul\0", 250), Err(MemcacheError::InvalidKey));
        assert_eq!(
            validate_key(&[b'k'; 251], 250),
            Err(MemcacheError::KeyTooLong { len: 251, max: 250 })
        );
    }
}
