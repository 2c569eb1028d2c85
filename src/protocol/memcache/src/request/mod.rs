// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::*;
use bytes::Bytes;
use logger::Klog;
use std::borrow::Cow;
use std::fmt::Display;
use std::fmt::Formatter;

// response codes for klog
const STORED: u8 = 5;
const EXISTS: u8 = 6;
const NOT_FOUND: u8 = 8;
const NOT_STORED: u8 = 9;

fn string_key(key: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(key)
}

/// The storage commands. Determines the command keyword and whether a compare
/// token is sent.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Operation {
    Set,
    Add,
    Replace,
    Append,
    Prepend,
    Cas,
}

impl Operation {
    /// The command keyword, including the separating space.
    pub fn keyword(&self) -> &'static [u8] {
        match self {
            Self::Set => b"set ",
            Self::Add => b"add ",
            Self::Replace => b"replace ",
            Self::Append => b"append ",
            Self::Prepend => b"prepend ",
            Self::Cas => b"cas ",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Set => write!(f, "set"),
            Self::Add => write!(f, "add"),
            Self::Replace => write!(f, "replace"),
            Self::Append => write!(f, "append"),
            Self::Prepend => write!(f, "prepend"),
            Self::Cas => write!(f, "cas"),
        }
    }
}

/// An immutable storage request.
///
/// `Mutation::cas` is the only way to build a compare-and-swap request; every
/// other constructor fixes the compare token at zero. Key and value are
/// reference counted, so `duplicate` is cheap and shares them read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    operation: Operation,
    key: Bytes,
    value: Bytes,
    ttl: u32,
    flags: u32,
    cas: u64,
}

impl Mutation {
    /// Builds any storage request except `cas`, which is rejected with
    /// `MemcacheError::InvalidOperation`.
    ///
    /// `ttl` is in seconds and unsigned, so a negative TTL (immediate expiry)
    /// cannot be expressed.
    pub fn new(
        operation: Operation,
        key: impl Into<Bytes>,
        value: impl Into<Bytes>,
        ttl: u32,
        flags: u32,
    ) -> Result<Self> {
        if operation == Operation::Cas {
            return Err(MemcacheError::InvalidOperation(operation));
        }

        Ok(Self {
            operation,
            key: key.into(),
            value: value.into(),
            ttl,
            flags,
            cas: 0,
        })
    }

    /// Builds a compare-and-swap request which only stores `value` if the item
    /// is unchanged since `cas` was read.
    ///
    /// As with `new`, `ttl` cannot be negative.
    pub fn cas(
        key: impl Into<Bytes>,
        value: impl Into<Bytes>,
        ttl: u32,
        cas: u64,
        flags: u32,
    ) -> Self {
        Self {
            operation: Operation::Cas,
            key: key.into(),
            value: value.into(),
            ttl,
            flags,
            cas,
        }
    }

    pub fn set(key: impl Into<Bytes>, value: impl Into<Bytes>, ttl: u32) -> Self {
        Self::unchecked(Operation::Set, key, value, ttl)
    }

    pub fn add(key: impl Into<Bytes>, value: impl Into<Bytes>, ttl: u32) -> Self {
        Self::unchecked(Operation::Add, key, value, ttl)
    }

    pub fn replace(key: impl Into<Bytes>, value: impl Into<Bytes>, ttl: u32) -> Self {
        Self::unchecked(Operation::Replace, key, value, ttl)
    }

    pub fn append(key: impl Into<Bytes>, value: impl Into<Bytes>, ttl: u32) -> Self {
        Self::unchecked(Operation::Append, key, value, ttl)
    }

    pub fn prepend(key: impl Into<Bytes>, value: impl Into<Bytes>, ttl: u32) -> Self {
        Self::unchecked(Operation::Prepend, key, value, ttl)
    }

    // only for operations known not to be `Cas`
    fn unchecked(
        operation: Operation,
        key: impl Into<Bytes>,
        value: impl Into<Bytes>,
        ttl: u32,
    ) -> Self {
        Self {
            operation,
            key: key.into(),
            value: value.into(),
            ttl,
            flags: 0,
            cas: 0,
        }
    }

    /// Returns an independent request with identical fields, which encodes to
    /// identical bytes. Used to resend a request without rebuilding it.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn flags(&self) -> u32 {
        self.flags
    }

    /// The compare token. Always zero unless the operation is `Cas`.
    pub fn cas_token(&self) -> u64 {
        self.cas
    }
}

impl Display for Mutation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.operation,
            string_key(self.key()),
            self.flags,
            self.ttl,
            self.value.len()
        )?;
        if self.operation == Operation::Cas {
            write!(f, " {}", self.cas)?;
        }
        Ok(())
    }
}

impl Klog for Mutation {
    type Response = MemcacheStatus;

    fn klog(&self, response: &Self::Response) {
        let code = match response {
            MemcacheStatus::Ok => STORED,
            MemcacheStatus::KeyExists => EXISTS,
            MemcacheStatus::KeyNotFound => NOT_FOUND,
            MemcacheStatus::ItemNotStored => NOT_STORED,
        };
        klog!("\"{}\" {}", self, code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords() {
        assert_eq!(Operation::Set.keyword(), b"set ");
        assert_eq!(Operation::Add.keyword(), b"add ");
        assert_eq!(Operation::Replace.keyword(), b"replace ");
        assert_eq!(Operation::Append.keyword(), b"append ");
        assert_eq!(Operation::Prepend.keyword(), b"prepend ");
        assert_eq!(Operation::Cas.keyword(), b"cas ");
    }

    #[test]
    fn new_rejects_cas() {
        assert_eq!(
            Mutation::new(Operation::Cas, "k", "v", 0, 0),
            Err(MemcacheError::InvalidOperation(Operation::Cas))
        );

        for operation in [
            Operation::Set,
            Operation::Add,
            Operation::Replace,
            Operation::Append,
            Operation::Prepend,
        ] {
            let request = Mutation::new(operation, "k", "v", 60, 7).expect("not cas");
            assert_eq!(request.operation(), operation);
            assert_eq!(request.key(), b"k");
            assert_eq!(request.value(), b"v");
            assert_eq!(request.ttl(), 60);
            assert_eq!(request.flags(), 7);
            assert_eq!(request.cas_token(), 0);
        }
    }

    #[test]
    fn cas_is_always_cas() {
        let request = Mutation::cas("k", "v", 0, 42, 0);
        assert_eq!(request.operation(), Operation::Cas);
        assert_eq!(request.cas_token(), 42);

        let request = Mutation::cas("k", "v", 0, 0, 3);
        assert_eq!(request.operation(), Operation::Cas);
        assert_eq!(request.flags(), 3);
    }

    #[test]
    fn shortcuts() {
        assert_eq!(
            Mutation::set("k", "v", 10),
            Mutation::new(Operation::Set, "k", "v", 10, 0).unwrap()
        );
        assert_eq!(Mutation::add("k", "v", 0).operation(), Operation::Add);
        assert_eq!(Mutation::replace("k", "v", 0).operation(), Operation::Replace);
        assert_eq!(Mutation::append("k", "v", 0).operation(), Operation::Append);
        assert_eq!(Mutation::prepend("k", "v", 0).operation(), Operation::Prepend);
    }

    #[test]
    fn duplicate() {
        let request = Mutation::cas("key", vec![1u8, 2, 3], 300, 99, 5);
        let copy = request.duplicate();
        assert_eq!(copy, request);
        assert!(!std::ptr::eq(&copy, &request));
    }

    #[test]
    fn display() {
        assert_eq!(Mutation::set("k", "abc", 60).to_string(), "set k 0 60 3");
        assert_eq!(
            Mutation::cas("k", "abc", 0, 42, 1).to_string(),
            "cas k 1 0 3 42"
        );
    }
}
