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

use crate::time::DateTime;
use crate::{
    Context, Error, ProvideCredential, Result, SignRequest, SignablePayload, SigningCredential,
    SigningMethod,
};
use log::debug;
use std::sync::Arc;

/// Signer ties a credential provider to a request signer.
///
/// Every call asks the provider for a fresh credential snapshot. Nothing is
/// cached, so rotation stays entirely in the provider's hands.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    provider: Arc<dyn ProvideCredential<Credential = K>>,
    signer: Arc<dyn SignRequest<Credential = K>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        provider: impl ProvideCredential<Credential = K>,
        signer: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,

            provider: Arc::new(provider),
            signer: Arc::new(signer),
        }
    }

    /// Load a credential and sign the request with it.
    ///
    /// - Provider failures are returned as `CredentialUnavailable`.
    /// - A provider without credential, or an invalid credential, is
    ///   returned as `CredentialMissing`.
    ///
    /// Nothing is retried: calling again with the same inputs fails the same way.
    pub async fn sign(
        &self,
        req: &mut http::request::Parts,
        payload: SignablePayload<'_>,
        time: DateTime,
        method: SigningMethod,
    ) -> Result<()> {
        let cred = self
            .provider
            .provide_credential(&self.ctx)
            .await
            .map_err(|err| {
                Error::credential_unavailable("credential provider failed").with_source(err)
            })?;

        let Some(cred) = cred.filter(|v| v.is_valid()) else {
            debug!("no valid credential loaded from {:?}", self.provider);
            return Err(Error::credential_missing(
                "credential provider returned no valid credential",
            ));
        };

        self.signer
            .sign_request(req, payload, Some(&cred), time, method)
    }
}
