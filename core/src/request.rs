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

use std::str::FromStr;
use std::time::Duration;

use http::header::HeaderName;
use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::Method;
use http::Uri;

use crate::{Error, Result};

/// Signing context for request.
///
/// It's a detached copy of the request parts: signers work on it and only
/// write it back with [`SigningRequest::apply`] once signing succeeded.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Option<Scheme>,
    /// HTTP authority.
    pub authority: Option<Authority>,
    /// HTTP path, as it appears in the uri.
    pub path: String,
    /// HTTP query parameters, percent decoded. Duplicates are allowed.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    ///
    /// The parts are cloned, not taken, so a failed signing leaves the
    /// caller's request untouched.
    pub fn build(parts: &http::request::Parts) -> Result<Self> {
        let uri = parts.uri.clone().into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: uri.scheme,
            authority: uri.authority,
            path: paq.path().to_string(),
            query: paq
                .query()
                .map(|v| {
                    form_urlencoded::parse(v.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default(),
            headers: parts.headers.clone(),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    ///
    /// Query pairs are written as is, signers must have encoded them already.
    pub fn apply(self, parts: &mut http::request::Parts) -> Result<()> {
        let query_size = self.query_size();

        let paq = if self.query.is_empty() {
            self.path
        } else {
            let mut s = self.path;
            s.reserve(query_size + self.query.len() * 2);

            s.push('?');
            for (i, (k, v)) in self.query.iter().enumerate() {
                if i > 0 {
                    s.push('&');
                }

                s.push_str(k);
                if !v.is_empty() {
                    s.push('=');
                    s.push_str(v);
                }
            }

            s
        };

        let mut uri_parts = parts.uri.clone().into_parts();
        // Scheme is only valid alongside an authority.
        if self.authority.is_some() {
            uri_parts.scheme = Some(self.scheme.unwrap_or(Scheme::HTTP));
            uri_parts.authority = self.authority;
        }
        uri_parts.path_and_query = Some(PathAndQuery::from_str(&paq)?);

        // Nothing is written back until the new uri is known to be valid.
        parts.uri = Uri::from_parts(uri_parts)?;
        parts.method = self.method;
        parts.headers = self.headers;

        Ok(())
    }

    /// Get query size.
    #[inline]
    pub fn query_size(&self) -> usize {
        self.query
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum::<usize>()
    }

    /// Push a new query pair into query list.
    #[inline]
    pub fn query_push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }

    /// Remove all query pairs with the given name.
    pub fn query_remove(&mut self, key: &str) {
        self.query.retain(|(k, _)| k != key);
    }

    /// Get the first header value by name as str.
    ///
    /// Returns `None` if header not found.
    pub fn header_get(&self, key: &HeaderName) -> Result<Option<&str>> {
        match self.headers.get(key) {
            Some(v) => Ok(Some(v.to_str()?)),
            None => Ok(None),
        }
    }

    /// Get the host of this request, preferring the `host` header over the
    /// uri authority.
    pub fn host(&self) -> Result<String> {
        if let Some(v) = self.header_get(&http::header::HOST)? {
            return Ok(v.to_string());
        }

        self.authority
            .as_ref()
            .map(|v| v.as_str().to_string())
            .ok_or_else(|| {
                Error::request_invalid(
                    "request without authority or host header is invalid for signing",
                )
            })
    }
}

/// SigningMethod is the method that used in signing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SigningMethod {
    /// Signing with header.
    Header,
    /// Signing with query, aka presigned request, valid for the given duration.
    Query(Duration),
}

/// SignablePayload describes how the body takes part in the signature.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SignablePayload<'a> {
    /// In-memory body, its hash will be calculated.
    Bytes(&'a [u8]),
    /// Hash calculated by the caller, for example while streaming a large
    /// body, or a service specific sentinel value.
    Precomputed(&'a str),
    /// Body is not signed.
    UnsignedPayload,
    /// Body is streamed and its length is unknown before sending.
    ///
    /// It's signed like [`SignablePayload::UnsignedPayload`] but can't be
    /// used with presigned requests.
    StreamingUnknownLength,
}

impl SignablePayload<'_> {
    /// An empty body.
    pub const EMPTY: SignablePayload<'static> = SignablePayload::Bytes(&[]);
}
