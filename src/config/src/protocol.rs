// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::units::*;
use common::expiry::TimeType;
use serde::{Deserialize, Serialize};

// constants to define default values
const MAX_KEY_LEN: usize = 250;
const MAX_VALUE_SIZE: usize = 512 * MB;
const SCRATCH_SIZE: usize = 16 * KB;

// helper functions
fn max_key_len() -> usize {
    MAX_KEY_LEN
}

fn max_value_size() -> usize {
    MAX_VALUE_SIZE
}

fn scratch_size() -> usize {
    SCRATCH_SIZE
}

// definitions
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Protocol {
    #[serde(default)]
    time_type: TimeType,
    #[serde(default = "max_key_len")]
    max_key_len: usize,
    #[serde(default = "max_value_size")]
    max_value_size: usize,
    #[serde(default = "scratch_size")]
    scratch_size: usize,
}

// implementation
impl Protocol {
    /// How TTLs are converted into the `exptime` sent to the server
    pub fn time_type(&self) -> TimeType {
        self.time_type
    }

    /// Longest key, in bytes, which will be sent to the server
    pub fn max_key_len(&self) -> usize {
        self.max_key_len
    }

    /// Largest value, in bytes, which will be sent to the server
    pub fn max_value_size(&self) -> usize {
        self.max_value_size
    }

    /// Capacity of the per-request scratch buffer. Requests whose header and
    /// value both fit are encoded without any further allocation.
    pub fn scratch_size(&self) -> usize {
        self.scratch_size
    }
}

// trait implementations
impl Default for Protocol {
    fn default() -> Self {
        Self {
            time_type: Default::default(),
            max_key_len: max_key_len(),
            max_value_size: max_value_size(),
            scratch_size: scratch_size(),
        }
    }
}

// trait definitions
pub trait ProtocolConfig {
    fn protocol(&self) -> &Protocol;
}
