// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::*;

use serde::{Deserialize, Serialize};

use std::io::Read;

// struct definitions
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ClientConfig {
    #[serde(default)]
    protocol: Protocol,

    #[serde(default)]
    debug: Debug,
    #[serde(default)]
    klog: Klog,
}

impl DebugConfig for ClientConfig {
    fn debug(&self) -> &Debug {
        &self.debug
    }
}

impl KlogConfig for ClientConfig {
    fn klog(&self) -> &Klog {
        &self.klog
    }
}

impl ProtocolConfig for ClientConfig {
    fn protocol(&self) -> &Protocol {
        &self.protocol
    }
}

// implementation
impl ClientConfig {
    pub fn load(file: &str) -> Result<ClientConfig, std::io::Error> {
        let mut file = std::fs::File::open(file)?;
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<ClientConfig, std::io::Error> {
        match toml::from_str(content) {
            Ok(t) => Ok(t),
            Err(e) => {
                error!("{}", e);
                Err(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "Error parsing config",
                ))
            }
        }
    }
}
