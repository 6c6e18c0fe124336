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

use std::fmt::{Debug, Formatter};

use sigv4_core::utils::Redact;
use sigv4_core::Context;

use crate::constants::*;
use crate::RequestSigner;

/// Config carries the settings a signer is built from.
#[derive(Clone, Default)]
pub struct Config {
    /// Region to sign for, like `us-east-1`.
    ///
    /// Loaded from `AWS_REGION`, falling back to `AWS_DEFAULT_REGION`.
    pub region: Option<String>,
    /// Service to sign for, like `s3`.
    pub service: Option<String>,
    /// Static access key id.
    ///
    /// Loaded from `AWS_ACCESS_KEY_ID`.
    pub access_key_id: Option<String>,
    /// Static secret access key.
    ///
    /// Loaded from `AWS_SECRET_ACCESS_KEY`.
    pub secret_access_key: Option<String>,
    /// Static session token.
    ///
    /// Loaded from `AWS_SESSION_TOKEN`.
    pub session_token: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field("service", &self.service)
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("session_token", &Redact::from(&self.session_token))
            .finish()
    }
}

impl Config {
    /// Load config from the env of the given context.
    ///
    /// Values already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        let envs = ctx.env_vars();

        if self.region.is_none() {
            self.region = envs
                .get(AWS_REGION)
                .or_else(|| envs.get(AWS_DEFAULT_REGION))
                .filter(|v| !v.is_empty())
                .cloned();
        }
        if self.access_key_id.is_none() {
            self.access_key_id = envs.get(AWS_ACCESS_KEY_ID).cloned();
        }
        if self.secret_access_key.is_none() {
            self.secret_access_key = envs.get(AWS_SECRET_ACCESS_KEY).cloned();
        }
        if self.session_token.is_none() {
            self.session_token = envs.get(AWS_SESSION_TOKEN).cloned();
        }

        self
    }

    /// Set the region.
    pub fn with_region(mut self, region: &str) -> Self {
        self.region = Some(region.to_string());
        self
    }

    /// Set the service.
    pub fn with_service(mut self, service: &str) -> Self {
        self.service = Some(service.to_string());
        self
    }

    /// Build a request signer for the configured service and region.
    ///
    /// Missing values are left empty and rejected as an invalid scope when
    /// signing.
    pub fn request_signer(&self) -> RequestSigner {
        RequestSigner::new(
            self.service.as_deref().unwrap_or_default(),
            self.region.as_deref().unwrap_or_default(),
        )
    }
}
