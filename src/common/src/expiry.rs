// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Conversion of a caller-provided TTL into the `exptime` field sent to the
//! server.

use clocksource::coarse::UnixInstant;
use serde::{Deserialize, Serialize};

/// The largest TTL, in seconds, that memcached treats as a relative duration.
/// Larger `exptime` values are interpreted as UNIX timestamps.
pub const MEMCACHE_MAX_DELTA: u32 = 60 * 60 * 24 * 30;

/// Determines how a TTL is rendered as an expiration time on the wire.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimeType {
    /// Always send an absolute UNIX timestamp.
    Unix,
    /// Always send the TTL unchanged as a number of seconds. Only correct for
    /// servers which treat every `exptime` as a duration.
    Delta,
    /// Send TTLs of up to 30 days unchanged and convert longer TTLs to an
    /// absolute UNIX timestamp, matching how memcached interprets `exptime`.
    #[default]
    Memcache,
}

impl TimeType {
    /// Converts a TTL in seconds into an expiration time using the current
    /// coarse UNIX time. A TTL of zero means no expiration and is always sent
    /// as zero.
    pub fn expiration(&self, ttl: u32) -> u32 {
        if ttl == 0 || *self == TimeType::Delta {
            return ttl;
        }

        let now = UnixInstant::now()
            .duration_since(UnixInstant::EPOCH)
            .as_secs();

        self.expiration_at(ttl, now)
    }

    /// Converts a TTL in seconds into an expiration time relative to `now`,
    /// given as seconds since the UNIX epoch. Absolute times which overflow a
    /// `u32` are clamped.
    pub fn expiration_at(&self, ttl: u32, now: u32) -> u32 {
        if ttl == 0 {
            return 0;
        }

        match self {
            TimeType::Delta => ttl,
            TimeType::Memcache if ttl <= MEMCACHE_MAX_DELTA => ttl,
            TimeType::Memcache | TimeType::Unix => now.saturating_add(ttl),
        }
    }
}
