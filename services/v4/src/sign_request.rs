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

use std::time::Duration;

use http::header::{self, HeaderName};
use http::request::Parts;
use http::HeaderValue;
use log::debug;
use percent_encoding::utf8_percent_encode;
use sigv4_core::hash::hex_sha256;
use sigv4_core::time::{format_iso8601, DateTime};
use sigv4_core::{
    Error, Result, SignRequest, SignablePayload, SigningCredential, SigningMethod, SigningRequest,
};

use crate::canonical_request::{signed_header_names, CanonicalRequest, HeaderWhitespace};
use crate::constants::*;
use crate::string_to_sign::string_to_sign;
use crate::{Credential, CredentialScope, SigningKey};

/// Where the session token of temporary credentials goes.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum SessionTokenMode {
    /// Attach the token before canonicalization so it's covered by the
    /// signature.
    #[default]
    Include,
    /// Attach the token after the signature is computed. The signature is
    /// the same as signing without a token.
    Exclude,
}

/// RequestSigner signs requests with `AWS4-HMAC-SHA256`.
///
/// It's immutable once built and keeps no state between calls: the same
/// credential, request, time and settings always give the same signature.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    service: String,
    region: String,

    payload_checksum_header: bool,
    session_token_mode: SessionTokenMode,
    header_whitespace: HeaderWhitespace,
    signed_headers: Option<Vec<HeaderName>>,
}

impl RequestSigner {
    /// Create a new signer for the given service and region.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),

            payload_checksum_header: false,
            session_token_mode: SessionTokenMode::default(),
            header_whitespace: HeaderWhitespace::default(),
            signed_headers: None,
        }
    }

    /// Send the payload hash in the `x-amz-content-sha256` header.
    ///
    /// Services like s3 require it. Streaming payloads always send it.
    pub fn with_payload_checksum_header(mut self, enabled: bool) -> Self {
        self.payload_checksum_header = enabled;
        self
    }

    /// Choose whether the session token is signed.
    pub fn with_session_token_mode(mut self, mode: SessionTokenMode) -> Self {
        self.session_token_mode = mode;
        self
    }

    /// Choose how whitespace in header values is normalized.
    pub fn with_header_whitespace(mut self, whitespace: HeaderWhitespace) -> Self {
        self.header_whitespace = whitespace;
        self
    }

    /// Only sign the given headers.
    ///
    /// `host`, `x-amz-date`, `x-amz-content-sha256` and
    /// `x-amz-security-token` are signed whenever present regardless.
    pub fn with_signed_headers(mut self, headers: impl IntoIterator<Item = HeaderName>) -> Self {
        self.signed_headers = Some(headers.into_iter().collect());
        self
    }
}

impl SignRequest for RequestSigner {
    type Credential = Credential;

    fn sign_request(
        &self,
        req: &mut Parts,
        payload: SignablePayload<'_>,
        credential: Option<&Self::Credential>,
        time: DateTime,
        method: SigningMethod,
    ) -> Result<()> {
        let Some(cred) = credential.filter(|v| v.is_valid()) else {
            return Err(Error::credential_missing(
                "access key id and secret access key are required for signing",
            ));
        };

        let expires = match method {
            SigningMethod::Header => None,
            SigningMethod::Query(expires) => Some(check_expires(expires, payload)?),
        };

        let scope = CredentialScope::new(time, &self.region, &self.service)?;
        debug!("calculated scope: {scope}");

        // All changes go to a detached copy and are only applied on success.
        let mut signed_req = SigningRequest::build(req)?;
        let payload_hash = payload_hash(payload);

        let host = signed_req.host()?;
        signed_req
            .headers
            .insert(header::HOST, HeaderValue::from_str(&host)?);

        let signed_headers = match expires {
            None => self.canonicalize_header(&mut signed_req, cred, time, payload, &payload_hash)?,
            Some(expires) => {
                self.canonicalize_query(&mut signed_req, cred, time, &scope, expires)?
            }
        };

        let creq = CanonicalRequest::new(
            &signed_req,
            &signed_headers,
            &payload_hash,
            self.header_whitespace,
        )?;
        let string_to_sign = string_to_sign(time, &scope, &creq)?;
        debug!("calculated string to sign: {string_to_sign}");

        let signature = SigningKey::derive(&cred.secret_access_key, &scope).sign(&string_to_sign);

        match expires {
            None => {
                let mut authorization = HeaderValue::from_str(&format!(
                    "{ALGORITHM} Credential={}/{scope}, SignedHeaders={}, Signature={signature}",
                    cred.access_key_id,
                    creq.signed_headers(),
                ))?;
                authorization.set_sensitive(true);
                signed_req
                    .headers
                    .insert(header::AUTHORIZATION, authorization);

                if let (SessionTokenMode::Exclude, Some(token)) =
                    (self.session_token_mode, &cred.session_token)
                {
                    signed_req
                        .headers
                        .insert(X_AMZ_SECURITY_TOKEN, session_token_header(token)?);
                }
            }
            Some(_) => {
                if let (SessionTokenMode::Exclude, Some(token)) =
                    (self.session_token_mode, &cred.session_token)
                {
                    signed_req.query_push(X_AMZ_SECURITY_TOKEN_QUERY, token);
                }
                signed_req.query_push(X_AMZ_SIGNATURE_QUERY, signature);
            }
        }

        encode_query(&mut signed_req);
        signed_req.apply(req)
    }
}

impl RequestSigner {
    /// Prepare the headers of a request signed in the authorization header.
    fn canonicalize_header(
        &self,
        req: &mut SigningRequest,
        cred: &Credential,
        time: DateTime,
        payload: SignablePayload<'_>,
        payload_hash: &str,
    ) -> Result<Vec<HeaderName>> {
        req.headers.remove(header::AUTHORIZATION);
        req.headers
            .insert(X_AMZ_DATE, HeaderValue::from_str(&format_iso8601(time))?);

        if self.payload_checksum_header
            || matches!(payload, SignablePayload::StreamingUnknownLength)
        {
            req.headers
                .insert(X_AMZ_CONTENT_SHA_256, HeaderValue::from_str(payload_hash)?);
        }

        // A token left over from an earlier signing must not be signed.
        req.headers.remove(X_AMZ_SECURITY_TOKEN);
        if let (SessionTokenMode::Include, Some(token)) =
            (self.session_token_mode, &cred.session_token)
        {
            req.headers
                .insert(X_AMZ_SECURITY_TOKEN, session_token_header(token)?);
        }

        Ok(signed_header_names(
            &req.headers,
            self.signed_headers.as_deref(),
        ))
    }

    /// Prepare the query of a presigned request.
    fn canonicalize_query(
        &self,
        req: &mut SigningRequest,
        cred: &Credential,
        time: DateTime,
        scope: &CredentialScope,
        expires: Duration,
    ) -> Result<Vec<HeaderName>> {
        for key in [
            X_AMZ_ALGORITHM_QUERY,
            X_AMZ_CREDENTIAL_QUERY,
            X_AMZ_DATE_QUERY,
            X_AMZ_EXPIRES_QUERY,
            X_AMZ_SIGNED_HEADERS_QUERY,
            X_AMZ_SECURITY_TOKEN_QUERY,
            X_AMZ_SIGNATURE_QUERY,
        ] {
            req.query_remove(key);
        }
        // Header-mode signing data left over from an earlier signing.
        for name in [header::AUTHORIZATION.as_str(), X_AMZ_DATE, X_AMZ_SECURITY_TOKEN] {
            req.headers.remove(name);
        }

        let signed_headers = signed_header_names(&req.headers, self.signed_headers.as_deref());

        req.query_push(X_AMZ_ALGORITHM_QUERY, ALGORITHM);
        req.query_push(
            X_AMZ_CREDENTIAL_QUERY,
            format!("{}/{scope}", cred.access_key_id),
        );
        req.query_push(X_AMZ_DATE_QUERY, format_iso8601(time));
        req.query_push(X_AMZ_EXPIRES_QUERY, expires.as_secs().to_string());
        req.query_push(
            X_AMZ_SIGNED_HEADERS_QUERY,
            signed_headers
                .iter()
                .map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(";"),
        );

        if let (SessionTokenMode::Include, Some(token)) =
            (self.session_token_mode, &cred.session_token)
        {
            req.query_push(X_AMZ_SECURITY_TOKEN_QUERY, token);
        }

        Ok(signed_headers)
    }
}

fn check_expires(expires: Duration, payload: SignablePayload<'_>) -> Result<Duration> {
    if matches!(payload, SignablePayload::StreamingUnknownLength) {
        return Err(Error::signing_mode_unsupported(
            "presigned requests can't carry a streaming payload of unknown length",
        ));
    }
    if expires < Duration::from_secs(1) || expires.as_secs() > MAX_PRESIGN_EXPIRES_SECS {
        return Err(Error::signing_mode_unsupported(format!(
            "presigned request expiry must be between 1s and {MAX_PRESIGN_EXPIRES_SECS}s, got {}s",
            expires.as_secs()
        )));
    }
    Ok(expires)
}

fn payload_hash(payload: SignablePayload<'_>) -> String {
    match payload {
        SignablePayload::Bytes(body) => hex_sha256(body),
        SignablePayload::Precomputed(hash) => hash.to_string(),
        SignablePayload::UnsignedPayload | SignablePayload::StreamingUnknownLength => {
            UNSIGNED_PAYLOAD.to_string()
        }
    }
}

fn session_token_header(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(token).map_err(|e| {
        Error::encoding_invalid("session token is not a valid header value").with_source(e)
    })?;
    // Set token value sensitive to avoid leaking.
    value.set_sensitive(true);
    Ok(value)
}

/// Query pairs are kept decoded while signing, encode them before writing
/// them back to the uri.
fn encode_query(req: &mut SigningRequest) {
    for (k, v) in req.query.iter_mut() {
        *k = utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET).to_string();
        *v = utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET).to_string();
    }
}
