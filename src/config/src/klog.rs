// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////
// constants to define default values
////////////////////////////////////////////////////////////////////////////////

// log to the file path
const FILE: Option<String> = None;

// command logging is off unless requested
const ENABLED: bool = false;

////////////////////////////////////////////////////////////////////////////////
// helper functions
////////////////////////////////////////////////////////////////////////////////

fn file() -> Option<String> {
    FILE
}

fn enabled() -> bool {
    ENABLED
}

////////////////////////////////////////////////////////////////////////////////
// struct definitions
////////////////////////////////////////////////////////////////////////////////

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Klog {
    #[serde(default = "enabled")]
    enabled: bool,
    #[serde(default = "file")]
    file: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////
// implementation
////////////////////////////////////////////////////////////////////////////////

impl Klog {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Path of the command log. When unset, command log lines are written
    /// alongside the debug log.
    pub fn file(&self) -> Option<String> {
        self.file.clone()
    }
}

// trait implementations
impl Default for Klog {
    fn default() -> Self {
        Self {
            enabled: enabled(),
            file: file(),
        }
    }
}

// trait definitions
pub trait KlogConfig {
    fn klog(&self) -> &Klog;
}
