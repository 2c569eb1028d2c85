// Copyright 2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use log::Level;
use serde::{Deserialize, Serialize};

// constants to define default values
const LOG_LEVEL: Level = Level::Info;
const LOG_FILE: Option<String> = None;

// helper functions
fn log_level() -> Level {
    LOG_LEVEL
}

fn log_file() -> Option<String> {
    LOG_FILE
}

// struct definitions
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Debug {
    #[serde(with = "LevelDef")]
    #[serde(default = "log_level")]
    log_level: Level,
    #[serde(default = "log_file")]
    log_file: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[serde(remote = "Level")]
#[serde(deny_unknown_fields)]
enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// implementation
impl Debug {
    pub fn log_level(&self) -> Level {
        self.log_level
    }

    /// Path of the debug log. When unset, debug logs go to stderr.
    pub fn log_file(&self) -> Option<String> {
        self.log_file.clone()
    }
}

// trait implementations
impl Default for Debug {
    fn default() -> Self {
        Self {
            log_level: log_level(),
            log_file: log_file(),
        }
    }
}

// trait definitions
pub trait DebugConfig {
    fn debug(&self) -> &Debug;
}
