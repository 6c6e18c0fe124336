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

use std::fmt::{self, Display, Formatter};

use sigv4_core::time::{format_date, DateTime};
use sigv4_core::{Error, Result};

use crate::constants::SCOPE_TERMINATOR;

/// CredentialScope binds a signature to a day, a region and a service.
///
/// Renders as `<YYYYMMDD>/<region>/<service>/aws4_request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialScope {
    date: String,
    region: String,
    service: String,
}

impl CredentialScope {
    /// Resolve the scope for the given signing time.
    ///
    /// Region and service must be non-empty and must not contain `/`,
    /// whitespace or control characters.
    pub fn new(time: DateTime, region: &str, service: &str) -> Result<Self> {
        check_component("region", region)?;
        check_component("service", service)?;

        Ok(Self {
            date: format_date(time),
            region: region.to_string(),
            service: service.to_string(),
        })
    }

    /// Date component as `YYYYMMDD`.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Region component.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Service component.
    pub fn service(&self) -> &str {
        &self.service
    }
}

impl Display for CredentialScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.date, self.region, self.service, SCOPE_TERMINATOR
        )
    }
}

fn check_component(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::scope_invalid(format!("{name} must not be empty")));
    }
    if value
        .chars()
        .any(|c| c == '/' || c.is_whitespace() || c.is_control())
    {
        return Err(Error::scope_invalid(format!(
            "{name} {value:?} contains characters not allowed in credential scope"
        )));
    }
    Ok(())
}
