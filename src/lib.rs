//! Signed REST client for the OST branded-token API.
//!
//! Every call injects `api_key` and `request_timestamp`, signs the sorted
//! parameters with HMAC-SHA256 and unwraps the `{success, data}` envelope
//! into typed [`User`], [`Transaction`] and [`Action`] values.
//!
//! ```rust,no_run
//! use ost_client::{ListParams, OstClient, OstConfig};
//!
//! # async fn example() -> Result<(), ost_client::OstError> {
//! let client = OstClient::from_config(OstConfig::new(
//!     "api_key".to_string(),
//!     "api_secret".to_string(),
//! ))?;
//!
//! let user = client.users().create(Some("Alice")).await?;
//! let users = client.users().list(ListParams::default().limit(100)).await?;
//! # let _ = (user, users);
//! # Ok(())
//! # }
//! ```
pub mod core;
pub mod ost;

pub use crate::core::{config::OstConfig, errors::OstError, kernel::NetworkProvider, types::*};
pub use ost::{OstClient, OstClientBuilder};
