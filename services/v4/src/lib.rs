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

//! Signature Version 4 (`AWS4-HMAC-SHA256`) request signer.
//!
//! Signing goes through four steps, each exposed on its own:
//!
//! 1. [`CanonicalRequest`]: the normalized form of the request.
//! 2. [`CredentialScope`]: `<date>/<region>/<service>/aws4_request`.
//! 3. [`SigningKey`]: the key derived from the secret for that scope.
//! 4. [`string_to_sign`]: what the signing key actually signs.
//!
//! [`RequestSigner`] runs them in order and attaches the result to the
//! request, either as an `Authorization` header or as presigned query
//! parameters.
//!
//! ## Example
//!
//! ```no_run
//! use sigv4::{DefaultCredentialProvider, RequestSigner};
//! use sigv4_core::{Context, OsEnv, SignablePayload, Signer, SigningMethod};
//!
//! # async fn example() -> sigv4_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let signer = Signer::new(
//!     ctx,
//!     DefaultCredentialProvider::new(),
//!     RequestSigner::new("s3", "us-east-1").with_payload_checksum_header(true),
//! );
//!
//! let mut parts = http::Request::get("https://examplebucket.s3.amazonaws.com/test.txt")
//!     .body(())?
//!     .into_parts()
//!     .0;
//! signer
//!     .sign(
//!         &mut parts,
//!         SignablePayload::EMPTY,
//!         sigv4_core::time::now(),
//!         SigningMethod::Header,
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod canonical_request;
pub use canonical_request::{signed_header_names, CanonicalRequest, HeaderWhitespace};

mod scope;
pub use scope::CredentialScope;

mod signing_key;
pub use signing_key::SigningKey;

mod string_to_sign;
pub use string_to_sign::string_to_sign;

mod sign_request;
pub use sign_request::{RequestSigner, SessionTokenMode};

mod provide_credential;
pub use provide_credential::*;
