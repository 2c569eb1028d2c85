// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::*;
use bytes::BufMut;

// the flags field as sent when no flags are set
const NO_FLAGS: &[u8] = b" 0 ";
const SPACE: &[u8] = b" ";

fn spare(buffer: &BytesMut) -> usize {
    buffer.capacity() - buffer.len()
}

impl TextProtocol {
    /// Encodes a storage request into `scratch`, without validating the key or
    /// value size.
    ///
    /// The header is always written into `scratch`, whose spare capacity is
    /// never grown. If the value and its terminator also fit, the request is
    /// finalized as one contiguous region. Otherwise the header is finalized on
    /// its own and the value is copied into a buffer of exactly the required
    /// size from `alloc`. Both layouts produce the same bytes.
    ///
    /// Anything already in `scratch` is included ahead of the request.
    pub fn compose_mutation(
        &self,
        request: &Mutation,
        scratch: &mut BytesMut,
        alloc: &dyn Allocator,
    ) -> Result<Frame> {
        // <command name> <key> <flags> <exptime> <bytes>\r\n
        // "cas" <key> <flags> <exptime> <bytes> <cas unique>\r\n
        let verb = request.operation().keyword();
        let flags = Decimal::new(request.flags() as u64);
        let exptime = Decimal::new(self.time_type.expiration(request.ttl()) as u64);
        let vlen = Decimal::new(request.value().len() as u64);
        let cas = if request.operation() == Operation::Cas {
            Some(Decimal::new(request.cas_token()))
        } else {
            None
        };

        let flags_len = if request.flags() == 0 {
            NO_FLAGS.len()
        } else {
            flags.len() + 2 * SPACE.len()
        };

        let size = verb.len()
            + request.key().len()
            + flags_len
            + exptime.len()
            + SPACE.len()
            + vlen.len()
            + cas.as_ref().map(|cas| SPACE.len() + cas.len()).unwrap_or(0)
            + CRLF.len();

        let available = spare(scratch);
        if size > available {
            #[cfg(feature = "metrics")]
            crate::metrics::exception(request.operation()).increment();

            return Err(MemcacheError::ScratchOverflow {
                needed: size,
                available,
            });
        }

        scratch.put_slice(verb);
        scratch.put_slice(request.key());
        if request.flags() == 0 {
            scratch.put_slice(NO_FLAGS);
        } else {
            scratch.put_slice(SPACE);
            scratch.put_slice(flags.as_bytes());
            scratch.put_slice(SPACE);
        }
        scratch.put_slice(exptime.as_bytes());
        scratch.put_slice(SPACE);
        scratch.put_slice(vlen.as_bytes());
        if let Some(cas) = cas {
            scratch.put_slice(SPACE);
            scratch.put_slice(cas.as_bytes());
        }
        scratch.put_slice(CRLF);

        let body_len = request.value().len() + CRLF.len();

        let frame = if spare(scratch) >= body_len {
            scratch.put_slice(request.value());
            scratch.put_slice(CRLF);

            #[cfg(feature = "metrics")]
            COMPOSE_FAST_PATH.increment();

            Frame::Contiguous(scratch.split().freeze())
        } else {
            trace!(
                "{} value of {} bytes exceeds scratch space, allocating body",
                request.operation(),
                request.value().len()
            );

            let header = scratch.split().freeze();
            let mut body = alloc.allocate(body_len);
            body.put_slice(request.value());
            body.put_slice(CRLF);

            #[cfg(feature = "metrics")]
            COMPOSE_SLOW_PATH.increment();

            Frame::Split {
                header,
                body: body.freeze(),
            }
        };

        #[cfg(feature = "metrics")]
        crate::metrics::request(request.operation()).increment();

        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Counts allocations so tests can tell which path was taken.
    #[derive(Default)]
    struct CountingAllocator {
        calls: Cell<usize>,
        requested: Cell<usize>,
    }

    impl Allocator for CountingAllocator {
        fn allocate(&self, capacity: usize) -> BytesMut {
            self.calls.set(self.calls.get() + 1);
            self.requested.set(self.requested.get() + capacity);
            BytesMut::with_capacity(capacity)
        }
    }

    fn compose(protocol: &TextProtocol, request: &Mutation, scratch_size: usize) -> Frame {
        let mut scratch = BytesMut::with_capacity(scratch_size);
        protocol
            .compose_mutation(request, &mut scratch, &Heap)
            .expect("header fits")
    }

    fn header(frame: &Frame) -> Vec<u8> {
        let bytes = frame.to_vec();
        let end = bytes
            .windows(2)
            .position(|w| w == CRLF)
            .expect("header is terminated");
        bytes[..end + 2].to_vec()
    }

    #[test]
    fn storage_headers() {
        let protocol = TextProtocol::new().time_type(TimeType::Delta);

        for (operation, verb) in [
            (Operation::Set, "set"),
            (Operation::Add, "add"),
            (Operation::Replace, "replace"),
            (Operation::Append, "append"),
            (Operation::Prepend, "prepend"),
        ] {
            let request = Mutation::new(operation, "k", "abc", 3600, 0).expect("not cas");
            let frame = compose(&protocol, &request, 1024);
            assert_eq!(header(&frame), format!("{verb} k 0 3600 3\r\n").into_bytes());
            assert_eq!(frame.to_vec(), format!("{verb} k 0 3600 3\r\nabc\r\n").into_bytes());
        }
    }

    #[test]
    fn cas_header() {
        let protocol = TextProtocol::new().time_type(TimeType::Delta);
        let request = Mutation::cas("k", "abc", 3600, 42, 0);

        let frame = compose(&protocol, &request, 1024);
        assert_eq!(header(&frame), b"cas k 0 3600 3 42\r\n");
        assert_eq!(frame.to_vec(), b"cas k 0 3600 3 42\r\nabc\r\n");

        // a zero token is still sent for cas
        let request = Mutation::cas("k", "abc", 0, 0, 0);
        assert_eq!(
            compose(&protocol, &request, 1024).to_vec(),
            b"cas k 0 0 3 0\r\nabc\r\n"
        );
    }

    #[test]
    fn flags() {
        let protocol = TextProtocol::new();

        let request = Mutation::new(Operation::Set, "k", "abc", 0, 7).expect("not cas");
        assert_eq!(
            compose(&protocol, &request, 1024).to_vec(),
            b"set k 7 0 3\r\nabc\r\n"
        );

        let request = Mutation::new(Operation::Set, "k", "abc", 0, u32::MAX).expect("not cas");
        assert_eq!(
            compose(&protocol, &request, 1024).to_vec(),
            b"set k 4294967295 0 3\r\nabc\r\n"
        );

        let request = Mutation::cas("k", "abc", 0, u64::MAX, 10);
        assert_eq!(
            compose(&protocol, &request, 1024).to_vec(),
            b"cas k 10 0 3 18446744073709551615\r\nabc\r\n"
        );
    }

    #[test]
    fn exptime() {
        let request = Mutation::set("k", "v", 60 * 60 * 24 * 30);
        assert_eq!(
            compose(&TextProtocol::new(), &request, 1024).to_vec(),
            b"set k 0 2592000 1\r\nv\r\n"
        );

        // long ttls become absolute timestamps
        let request = Mutation::set("k", "v", 60 * 60 * 24 * 365);
        let header = header(&compose(&TextProtocol::new(), &request, 1024));
        let exptime: u32 = std::str::from_utf8(&header[8..header.len() - 4])
            .expect("ascii")
            .parse()
            .expect("decimal exptime");
        assert!(exptime > 60 * 60 * 24 * 365);
    }

    #[test]
    fn empty_value() {
        let frame = compose(&TextProtocol::new(), &Mutation::set("k", "", 0), 1024);
        assert!(frame.is_contiguous());
        assert_eq!(frame.to_vec(), b"set k 0 0 0\r\n\r\n");
    }

    #[test]
    fn contiguous_when_value_fits() {
        let protocol = TextProtocol::new();
        let alloc = CountingAllocator::default();
        let request = Mutation::set("key", "value", 0);

        // header is 15 bytes, value and terminator are 7
        let mut scratch = BytesMut::with_capacity(22);
        let frame = protocol
            .compose_mutation(&request, &mut scratch, &alloc)
            .expect("fits");

        assert!(frame.is_contiguous());
        assert_eq!(frame.to_vec(), b"set key 0 0 5\r\nvalue\r\n");
        assert_eq!(alloc.calls.get(), 0);
        assert!(scratch.is_empty());
    }

    #[test]
    fn split_when_value_does_not_fit() {
        let protocol = TextProtocol::new();
        let alloc = CountingAllocator::default();
        let request = Mutation::set("key", "value", 0);

        let mut scratch = BytesMut::with_capacity(21);
        let frame = protocol
            .compose_mutation(&request, &mut scratch, &alloc)
            .expect("header fits");

        assert!(!frame.is_contiguous());
        assert_eq!(
            frame.chunks().collect::<Vec<_>>(),
            vec![&b"set key 0 0 5\r\n"[..], &b"value\r\n"[..]]
        );
        assert_eq!(alloc.calls.get(), 1);
        assert_eq!(alloc.requested.get(), 7);
    }

    #[test]
    fn paths_are_equivalent() {
        let protocol = TextProtocol::new().time_type(TimeType::Delta);
        let value: Vec<u8> = (0..64 * 1024).map(|i| (i % 251) as u8).collect();

        for request in [
            Mutation::set("large", value.clone(), 100),
            Mutation::new(Operation::Prepend, "large", value.clone(), 100, 12).expect("not cas"),
            Mutation::cas("large", value.clone(), 100, 987654321, 3),
        ] {
            let split = compose(&protocol, &request, 128);
            let contiguous = compose(&protocol, &request, 128 * 1024);

            assert!(!split.is_contiguous());
            assert!(contiguous.is_contiguous());
            assert_eq!(split.len(), contiguous.len());
            assert_eq!(split.to_vec(), contiguous.to_vec());
        }
    }

    #[test]
    fn scratch_overflow() {
        let protocol = TextProtocol::new();
        let request = Mutation::set("key", "value", 0);

        let mut scratch = BytesMut::with_capacity(8);
        assert_eq!(
            protocol.compose_mutation(&request, &mut scratch, &Heap),
            Err(MemcacheError::ScratchOverflow {
                needed: 15,
                available: scratch.capacity(),
            })
        );
        assert!(scratch.is_empty());
    }

    #[test]
    fn scratch_is_reusable() {
        let protocol = TextProtocol::new();
        let mut scratch = BytesMut::with_capacity(1024);

        let first = protocol
            .compose_mutation(&Mutation::set("a", "1", 0), &mut scratch, &Heap)
            .expect("fits");
        let second = protocol
            .compose_mutation(&Mutation::add("b", "2", 0), &mut scratch, &Heap)
            .expect("fits");

        assert_eq!(first.to_vec(), b"set a 0 0 1\r\n1\r\n");
        assert_eq!(second.to_vec(), b"add b 0 0 1\r\n2\r\n");
    }

    #[test]
    fn duplicate_encodes_identically() {
        let protocol = TextProtocol::new();
        let request = Mutation::cas("key", "value", 60, 7, 1);
        let copy = request.duplicate();

        assert_eq!(
            compose(&protocol, &request, 1024).to_vec(),
            compose(&protocol, &copy, 1024).to_vec()
        );
        assert_eq!(request.key(), b"key");
    }
}
