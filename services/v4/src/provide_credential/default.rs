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

use crate::provide_credential::{
    EnvCredentialProvider, ProvideCredentialChain, StaticCredentialProvider,
};
use crate::{Config, Credential};
use async_trait::async_trait;
use sigv4_core::{Context, ProvideCredential, Result};

/// DefaultCredentialProvider loads credential from the keys set in
/// [`Config`], then from the environment.
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a provider that only reads the environment.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Create a provider that prefers the static keys of the config.
    pub fn with_config(config: &Config) -> Self {
        let mut chain = ProvideCredentialChain::new();

        if let (Some(ak), Some(sk)) = (&config.access_key_id, &config.secret_access_key) {
            let mut provider = StaticCredentialProvider::new(ak, sk);
            if let Some(token) = &config.session_token {
                provider = provider.with_session_token(token);
            }
            chain = chain.push(provider);
        }

        Self {
            chain: chain.push(EnvCredentialProvider::new()),
        }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}
