// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Redaction helpers for secrets that end up in `Debug` output.

use std::fmt::{Debug, Formatter};

/// Redact keeps the first and last three characters of strings with 12 or
/// more characters, and hides shorter strings entirely.
///
/// Access key ids stay distinguishable in logs while secrets don't leak.
pub struct Redact<'a>(Option<&'a str>);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(Some(value))
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(Some(value.as_str()))
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Redact(value.as_deref())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let v = match self.0 {
            None | Some("") => return f.write_str("EMPTY"),
            Some(v) => v,
        };

        // Only keep the edges when they sit on char boundaries.
        let n = v.len();
        match (v.get(..3), v.get(n.saturating_sub(3)..)) {
            (Some(head), Some(tail)) if n >= 12 => write!(f, "{head}***{tail}"),
            _ => f.write_str("***"),
        }
    }
}

/// RedactBytes hides binary secret material and only reports its length.
pub struct RedactBytes<'a>(pub &'a [u8]);

impl Debug for RedactBytes<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<redacted {} bytes>", self.0.len())
    }
}
