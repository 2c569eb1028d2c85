// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Common types and helpers shared by the Pelikan client crates.

pub mod expiry;
pub mod metrics;
