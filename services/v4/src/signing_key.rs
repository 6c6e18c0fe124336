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

use std::fmt::{self, Debug, Formatter};

use sigv4_core::hash::{hex_hmac_sha256, hmac_sha256};
use sigv4_core::utils::RedactBytes;

use crate::constants::{KEY_PREFIX, SCOPE_TERMINATOR};
use crate::CredentialScope;

/// SigningKey is the key derived from a secret for one credential scope.
///
/// The material never leaves this type except as a signature, and its
/// `Debug` output only shows the length.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Derive the signing key through the HMAC chain
    /// `date -> region -> service -> aws4_request`.
    pub fn derive(secret_access_key: &str, scope: &CredentialScope) -> Self {
        let secret = format!("{KEY_PREFIX}{secret_access_key}");

        let date_key = hmac_sha256(secret.as_bytes(), scope.date().as_bytes());
        let region_key = hmac_sha256(&date_key, scope.region().as_bytes());
        let service_key = hmac_sha256(&region_key, scope.service().as_bytes());
        let signing_key = hmac_sha256(&service_key, SCOPE_TERMINATOR.as_bytes());

        Self(signing_key)
    }

    /// Sign the string to sign, returning the lowercase hex signature.
    pub fn sign(&self, string_to_sign: &str) -> String {
        hex_hmac_sha256(&self.0, string_to_sign.as_bytes())
    }

    #[cfg(test)]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey")
            .field(&RedactBytes(&self.0))
            .finish()
    }
}
