// Copyright 2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub const KB: usize = 1024;
pub const MB: usize = 1024 * KB;
