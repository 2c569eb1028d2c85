// Copyright 2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[macro_use]
extern crate log;

mod client;
mod debug;
mod klog;
mod protocol;
mod units;

pub use client::ClientConfig;
pub use debug::{Debug, DebugConfig};
pub use klog::{Klog, KlogConfig};
pub use protocol::{Protocol, ProtocolConfig};

pub use common::expiry::TimeType;
