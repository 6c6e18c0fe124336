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

use http::header::HeaderName;
use http::HeaderMap;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use sigv4_core::{Error, Result, SigningRequest};

use crate::constants::{
    AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET, UNSIGNABLE_HEADERS, X_AMZ_CONTENT_SHA_256,
    X_AMZ_DATE, X_AMZ_SECURITY_TOKEN,
};

/// How whitespace in header values is normalized.
///
/// Leading and trailing whitespace is always trimmed.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum HeaderWhitespace {
    /// Collapse every run of spaces and tabs into one space, quoted or not.
    #[default]
    CollapseAll,
    /// Keep runs inside double quoted substrings verbatim.
    PreserveQuoted,
}

/// CanonicalRequest is the normalized form of a request that gets hashed
/// into the string to sign.
///
/// Its `Display` output is the exact canonical request text:
///
/// ```text
/// <method>
/// <canonical uri>
/// <canonical query>
/// <name>:<value>   (one line per signed header)
///
/// <signed header names>
/// <payload hash>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    method: String,
    path: String,
    query: String,
    headers: Vec<(String, String)>,
    signed_headers: String,
    payload_hash: String,
}

impl CanonicalRequest {
    /// Build the canonical request.
    ///
    /// `signed_headers` must be the output of [`signed_header_names`] for
    /// the same request.
    pub fn new(
        req: &SigningRequest,
        signed_headers: &[HeaderName],
        payload_hash: &str,
        whitespace: HeaderWhitespace,
    ) -> Result<Self> {
        let mut headers = Vec::with_capacity(signed_headers.len());
        for name in signed_headers {
            headers.push((
                name.as_str().to_string(),
                canonical_header_value(&req.headers, name, whitespace)?,
            ));
        }

        Ok(Self {
            method: req.method.as_str().to_string(),
            path: canonical_uri(&req.path)?,
            query: canonical_query(&req.query),
            headers,
            signed_headers: signed_headers
                .iter()
                .map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(";"),
            payload_hash: payload_hash.to_string(),
        })
    }

    /// Signed header names joined by `;`.
    pub fn signed_headers(&self) -> &str {
        &self.signed_headers
    }

}

impl Display for CanonicalRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.method)?;
        writeln!(f, "{}", self.path)?;
        writeln!(f, "{}", self.query)?;
        for (name, value) in &self.headers {
            writeln!(f, "{name}:{value}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.signed_headers)?;
        write!(f, "{}", self.payload_hash)
    }
}

/// Select the headers that take part in the signature, sorted by name.
///
/// Without an allow-list every header is signed except the ones that hold
/// the signature or are rewritten in transit. With an allow-list only the
/// listed headers present on the request are signed, plus the headers the
/// signature itself relies on.
pub fn signed_header_names(headers: &HeaderMap, allow: Option<&[HeaderName]>) -> Vec<HeaderName> {
    let mut names: Vec<HeaderName> = headers
        .keys()
        .filter(|name| match allow {
            None => !UNSIGNABLE_HEADERS.contains(&name.as_str()),
            Some(allow) => {
                is_mandatory(name) || allow.iter().any(|v| v.as_str() == name.as_str())
            }
        })
        .cloned()
        .collect();

    names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    names
}

fn is_mandatory(name: &HeaderName) -> bool {
    *name == http::header::HOST
        || name.as_str() == X_AMZ_DATE
        || name.as_str() == X_AMZ_CONTENT_SHA_256
        || name.as_str() == X_AMZ_SECURITY_TOKEN
}

/// Decode the path, collapse repeated `/`, then encode it again.
fn canonical_uri(path: &str) -> Result<String> {
    let decoded = percent_decode_str(path).decode_utf8().map_err(|e| {
        Error::encoding_invalid(format!("path {path:?} is not valid utf-8 once decoded"))
            .with_source(e)
    })?;

    let mut collapsed = String::with_capacity(decoded.len());
    for c in decoded.chars() {
        if c == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(c);
    }
    if collapsed.is_empty() {
        return Ok("/".to_string());
    }

    Ok(utf8_percent_encode(&collapsed, &AWS_URI_ENCODE_SET).to_string())
}

fn canonical_query(query: &[(String, String)]) -> String {
    let mut pairs: Vec<(String, String)> = query
        .iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect();
    // Sort on the encoded form, by name and then by value.
    pairs.sort();

    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn canonical_header_value(
    headers: &HeaderMap,
    name: &HeaderName,
    whitespace: HeaderWhitespace,
) -> Result<String> {
    let mut values = Vec::new();
    for value in headers.get_all(name) {
        let value = std::str::from_utf8(value.as_bytes()).map_err(|e| {
            Error::encoding_invalid(format!("header {name} has a value that is not utf-8"))
                .with_source(e)
        })?;
        values.push(normalize_header_value(value, whitespace));
    }
    Ok(values.join(","))
}

fn normalize_header_value(value: &str, whitespace: HeaderWhitespace) -> String {
    let value = value.trim_matches(|c: char| c == ' ' || c == '\t');

    let mut out = String::with_capacity(value.len());
    let mut quoted = false;
    let mut last_space = false;
    for c in value.chars() {
        if c == '"' && whitespace == HeaderWhitespace::PreserveQuoted {
            quoted = !quoted;
        }

        if (c == ' ' || c == '\t') && !quoted {
            if !last_space {
                out.push(' ');
            }
            last_space = true;
            continue;
        }

        last_space = false;
        out.push(c);
    }
    out
}
