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

//! Core components for signing HTTP requests.
//!
//! This crate provides the service-agnostic types and traits the signers are
//! built on.
//!
//! ## Overview
//!
//! - **Context**: the environment credential providers read from
//! - **Traits**: [`ProvideCredential`] loads credentials, [`SignRequest`]
//!   signs a request with them
//! - **Signer**: ties a provider and a request signer together
//! - **SigningRequest**: a detached, editable copy of `http::request::Parts`
//!
//! Signing is synchronous and pure: the signing time is always passed in by
//! the caller and nothing is shared between calls.
//!
//! ## Example
//!
//! ```no_run
//! use sigv4_core::time::DateTime;
//! use sigv4_core::{
//!     Context, Error, ProvideCredential, Result, SignRequest, SignablePayload,
//!     Signer, SigningCredential, SigningMethod,
//! };
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     token: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.token.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyProvider;
//!
//! #[async_trait]
//! impl ProvideCredential for MyProvider {
//!     type Credential = MyCredential;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
//!         Ok(Some(MyCredential {
//!             token: "my-token".to_string(),
//!         }))
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MySigner;
//!
//! impl SignRequest for MySigner {
//!     type Credential = MyCredential;
//!
//!     fn sign_request(
//!         &self,
//!         req: &mut http::request::Parts,
//!         _payload: SignablePayload<'_>,
//!         credential: Option<&Self::Credential>,
//!         _time: DateTime,
//!         _method: SigningMethod,
//!     ) -> Result<()> {
//!         let cred = credential.ok_or_else(|| Error::credential_missing("no credential"))?;
//!         req.headers.insert("x-token", cred.token.parse()?);
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let signer = Signer::new(Context::new(), MyProvider, MySigner);
//!
//! let mut parts = http::Request::get("https://example.com")
//!     .body(())
//!     .unwrap()
//!     .into_parts()
//!     .0;
//!
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
//!
//! ## Utilities
//!
//! - [`hash`]: keyed-hash and digest primitives
//! - [`time`]: signing time formatting
//! - [`utils`]: redaction of secrets in debug output

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
pub use context::Env;
pub use context::NoopEnv;
pub use context::OsEnv;
pub use context::StaticEnv;

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideCredential, SignRequest, SigningCredential};
mod request;
pub use request::{SignablePayload, SigningMethod, SigningRequest};
mod signer;
pub use signer::Signer;
