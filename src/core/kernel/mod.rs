//! Transport-agnostic request pipeline
//!
//! A call flows through four pieces, leaves first:
//!
//! - [`Signer`] / [`HmacSigner`]: HMAC-SHA256 hex digest of a signing string
//! - [`RequestBuilder`]: injects `api_key` and `request_timestamp`, sorts the
//!   parameters, signs `<endpoint>?<k1>=<v1>&...` and appends `signature`
//! - [`NetworkProvider`]: the swappable GET/POST capability
//! - [`response`]: lenient JSON parse, `success` check, entity extraction
//!
//! ```rust
//! use ost_client::core::kernel::*;
//! use std::sync::Arc;
//!
//! let signer = Arc::new(HmacSigner::new("testsecret").unwrap());
//! let builder = RequestBuilder::new("k1", signer);
//!
//! let mut params = Params::new();
//! params.insert("name".to_string(), "Alice".to_string());
//! let request = builder.build_at(HttpMethod::Post, "/users", params, 1_526_605_283);
//!
//! assert_eq!(
//!     request.signing_string(),
//!     "/users?api_key=k1&name=Alice&request_timestamp=1526605283"
//! );
//! ```
pub mod request;
pub mod response;
pub mod signer;
pub mod transport;

pub use request::{HttpMethod, Params, RequestBuilder, SignedRequest, CONTENT_TYPE_FORM};
pub use response::parse_response;
pub use signer::{HmacSigner, Signer};
pub use transport::{NetworkProvider, ReqwestTransport, TransportBuilder, TransportConfig};
