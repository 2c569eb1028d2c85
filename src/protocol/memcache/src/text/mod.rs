//! The memcache text protocol, from the client's side of the connection.
//!
//! Storage commands are written as a command line followed by a data block:
//!
//! ```text
//! <command name> <key> <flags> <exptime> <bytes>\r\n
//! "cas" <key> <flags> <exptime> <bytes> <cas unique>\r\n
//! <data block>\r\n
//! ```
//!
//! and the server answers with a single status line.

use crate::*;
use bytes::BytesMut;
use config::ProtocolConfig;
use logger::Klog;

pub mod request;
pub mod response;

pub const DEFAULT_MAX_KEY_LEN: usize = 250;
pub const DEFAULT_MAX_VALUE_SIZE: usize = 512 * 1024 * 1024; // 512MB max value size
pub const DEFAULT_SCRATCH_SIZE: usize = 16 * 1024;

#[derive(Clone, Debug)]
pub struct TextProtocol {
    max_value_size: usize,
    max_key_len: usize,
    scratch_size: usize,
    time_type: TimeType,
}

impl Default for TextProtocol {
    fn default() -> Self {
        Self {
            max_value_size: DEFAULT_MAX_VALUE_SIZE,
            max_key_len: DEFAULT_MAX_KEY_LEN,
            scratch_size: DEFAULT_SCRATCH_SIZE,
            time_type: TimeType::Memcache,
        }
    }
}

impl<T: ProtocolConfig> From<&T> for TextProtocol {
    fn from(config: &T) -> Self {
        let config = config.protocol();
        Self::new()
            .time_type(config.time_type())
            .max_key_len(config.max_key_len())
            .max_value_size(config.max_value_size())
            .scratch_size(config.scratch_size())
    }
}

impl TextProtocol {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn time_type(mut self, time_type: TimeType) -> Self {
        self.time_type = time_type;
        self
    }

    pub fn max_value_size(mut self, bytes: usize) -> Self {
        self.max_value_size = bytes;
        self
    }

    pub fn max_key_len(mut self, bytes: usize) -> Self {
        self.max_key_len = bytes;
        self
    }

    pub fn scratch_size(mut self, bytes: usize) -> Self {
        self.scratch_size = bytes;
        self
    }

    /// Returns an empty scratch buffer with the configured capacity.
    pub fn scratch(&self) -> BytesMut {
        BytesMut::with_capacity(self.scratch_size)
    }

    fn validate(&self, request: &Mutation) -> Result<()> {
        validate_key(request.key(), self.max_key_len)?;

        if request.value().len() > self.max_value_size {
            return Err(MemcacheError::ValueTooLarge {
                len: request.value().len(),
                max: self.max_value_size,
            });
        }

        Ok(())
    }
}

impl Protocol<Mutation, MemcacheStatus> for TextProtocol {
    fn compose_request(
        &self,
        request: &Mutation,
        scratch: &mut BytesMut,
        alloc: &dyn Allocator,
    ) -> std::result::Result<Frame, std::io::Error> {
        if let Err(e) = self.validate(request) {
            debug!("rejected {} request: {}", request.operation(), e);

            #[cfg(feature = "metrics")]
            crate::metrics::exception(request.operation()).increment();

            return Err(e.into());
        }

        Ok(self.compose_mutation(request, scratch, alloc)?)
    }

    fn parse_response(
        &self,
        request: &Mutation,
        buffer: &[u8],
    ) -> std::result::Result<ParseOk<MemcacheStatus>, std::io::Error> {
        let parsed = ResponseParser.parse(buffer)?;
        let consumed = parsed.consumed();
        let status = interpret(request.operation(), &parsed.into_inner())?;
        request.klog(&status);
        Ok(ParseOk::new(status, consumed))
    }
}
