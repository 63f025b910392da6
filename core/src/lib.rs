//! Typed async client for the Riot Games API.
//!
//! # Overview
//! Every endpoint wrapper funnels into one generic pipeline on [`Client`]:
//! options are folded into a request configuration, a single HTTP request is
//! built and sent through an injected [`Transport`], and the response is
//! classified and decoded into the caller's type.
//!
//! # Design
//! - [`Client`] holds only immutable configuration and is shared freely.
//! - Requests are plain data ([`HttpRequest`]); the transport does the I/O,
//!   so the pipeline can be tested against [`mock::MockTransport`].
//! - Cancellation and deadlines come from the caller's [`Context`]; there
//!   are no retries, no caching and no implicit timeouts.
//! - Logging goes to a per-client `tracing` dispatcher that discards
//!   everything by default.
//!
//! ```no_run
//! use leago::{ClientConfig, Context, PlatformClient, Platform};
//!
//! # async fn run() -> Result<(), leago::Error> {
//! let config = ClientConfig::new("RGAPI-...");
//! let na1 = PlatformClient::new(Platform::Na1, &config);
//! let rotation = na1.champion.get_rotation(&Context::background(), &[]).await?;
//! println!("{:?}", rotation.free_champion_ids);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod context;
pub mod error;
pub mod http;
pub mod mock;
pub mod options;
pub mod regions;
pub mod request;
pub mod transport;

pub use api::{PlatformClient, RegionClient};
pub use client::{Client, ClientConfig, API_KEY_ENV};
pub use context::Context;
pub use error::{BoxError, Error, ErrorKind, TransportError};
pub use crate::http::{HttpRequest, HttpResponse, ResponseBody, API_TOKEN_HEADER};
pub use options::{merge_options, PublicOption, RequestConfig, RequestOption};
pub use regions::{Platform, Region};
pub use request::{build_request, RawResponse};
pub use transport::{ReqwestTransport, Transport};
