use crate::core::config::{OstConfig, DEFAULT_BASE_URL};
use crate::core::errors::OstError;
use crate::core::kernel::{
    parse_response, HmacSigner, HttpMethod, NetworkProvider, Params, RequestBuilder,
    TransportBuilder, TransportConfig, CONTENT_TYPE_FORM,
};
use crate::ost::{actions::Actions, transactions::Transactions, users::Users};
use serde_json::Value;
use std::sync::{Arc, OnceLock};
use tracing::{debug, instrument};

/// Credentials and transport, fixed for the lifetime of a client
struct Session {
    requests: RequestBuilder,
    transport: Arc<dyn NetworkProvider>,
}

/// Entry point for every API operation
///
/// A client is either built ready-to-use through [`OstClient::builder`], or
/// created bare with [`OstClient::new`] and initialized exactly once with
/// [`OstClient::init`]. Operations on a client that was never initialized
/// fail with [`OstError::Uninitialized`] before anything touches the network.
///
/// After initialization the client is read-only and can be shared across
/// tasks behind an `Arc`.
pub struct OstClient {
    base_url: String,
    session: OnceLock<Session>,
}

impl std::fmt::Debug for OstClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OstClient")
            .field("base_url", &self.base_url)
            .field("ready", &self.is_ready())
            .finish_non_exhaustive()
    }
}

impl OstClient {
    /// Create an uninitialized client for `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: OnceLock::new(),
        }
    }

    pub fn builder() -> OstClientBuilder {
        OstClientBuilder::new()
    }

    /// Build a ready client with the bundled reqwest transport
    pub fn from_config(config: OstConfig) -> Result<Self, OstError> {
        OstClientBuilder::new().with_config(config).build()
    }

    /// Install credentials and transport; may succeed only once per client
    pub fn init(
        &self,
        api_key: &str,
        api_secret: &str,
        transport: Arc<dyn NetworkProvider>,
    ) -> Result<(), OstError> {
        if api_key.is_empty() || api_secret.is_empty() {
            return Err(OstError::AuthError(
                "API key and secret must not be empty".to_string(),
            ));
        }

        let signer = Arc::new(HmacSigner::new(api_secret)?);
        let session = Session {
            requests: RequestBuilder::new(api_key, signer),
            transport,
        };

        self.session
            .set(session)
            .map_err(|_| OstError::AlreadyInitialized)
    }

    pub fn is_ready(&self) -> bool {
        self.session.get().is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn ensure_ready(&self) -> Result<&Session, OstError> {
        self.session.get().ok_or_else(|| {
            OstError::Uninitialized(
                "API keys and network provider were not supplied; call OstClient::init() before any API operation"
                    .to_string(),
            )
        })
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    pub fn transactions(&self) -> Transactions<'_> {
        Transactions::new(self)
    }

    pub fn actions(&self) -> Actions<'_> {
        Actions::new(self)
    }

    /// Sign, dispatch and unwrap one call
    ///
    /// Returns the `data.<entity_key>` fragment together with the raw
    /// response text, which mapping errors carry for diagnostics.
    #[instrument(skip_all, fields(method = %method, endpoint = %endpoint, entity = %entity_key))]
    async fn call(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: Params,
        entity_key: &str,
    ) -> Result<(Value, String), OstError> {
        let session = self.ensure_ready()?;
        let request = session.requests.build(method, endpoint, params);
        let url = request.url(&self.base_url);

        debug!(param_count = request.params.len(), "dispatching signed request");

        let raw = match request.body() {
            Some(body) => {
                session
                    .transport
                    .post(&url, &body, CONTENT_TYPE_FORM)
                    .await?
            }
            None => session.transport.get(&url).await?,
        };

        let fragment = parse_response(endpoint, &raw, entity_key)?;
        Ok((fragment, raw))
    }

    /// Fetch one entity and map it with `convert`
    pub(crate) async fn fetch<T>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: Params,
        entity_key: &str,
        convert: fn(Value) -> Result<T, String>,
    ) -> Result<T, OstError> {
        let (fragment, raw) = self.call(method, endpoint, params, entity_key).await?;
        convert(fragment)
            .map_err(|reason| OstError::malformed(endpoint, entity_key, reason, &raw))
    }

    /// Fetch an entity array and map each element with `convert`
    pub(crate) async fn fetch_list<T>(
        &self,
        endpoint: &str,
        params: Params,
        entity_key: &str,
        convert: fn(Value) -> Result<T, String>,
    ) -> Result<Vec<T>, OstError> {
        let (fragment, raw) = self
            .call(HttpMethod::Get, endpoint, params, entity_key)
            .await?;
        super::converters::list_from_json(fragment, convert)
            .map_err(|reason| OstError::malformed(endpoint, entity_key, reason, &raw))
    }
}

/// Builder for ready-to-use clients
pub struct OstClientBuilder {
    base_url: Option<String>,
    config: Option<OstConfig>,
    transport: Option<Arc<dyn NetworkProvider>>,
}

impl Default for OstClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OstClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            config: None,
            transport: None,
        }
    }

    /// Credentials, base URL and timeout from an `OstConfig`
    pub fn with_config(mut self, config: OstConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_credentials(mut self, api_key: String, api_secret: String) -> Self {
        let config = match self.config.take() {
            Some(config) => OstConfig {
                api_key: secrecy::Secret::new(api_key),
                api_secret: secrecy::Secret::new(api_secret),
                ..config
            },
            None => OstConfig::new(api_key, api_secret),
        };
        self.with_config(config)
    }

    /// Overrides the configured base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn NetworkProvider>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client
    ///
    /// Without credentials the client is returned uninitialized and every
    /// operation fails until [`OstClient::init`] is called.
    pub fn build(self) -> Result<OstClient, OstError> {
        let base_url = self
            .base_url
            .or_else(|| self.config.as_ref().map(|c| c.base_url.clone()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let client = OstClient::new(base_url);

        let Some(config) = self.config.filter(OstConfig::has_credentials) else {
            return Ok(client);
        };

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(
                TransportBuilder::new(
                    TransportConfig::default().with_timeout(config.timeout_seconds),
                )
                .build()?,
            ),
        };

        client.init(config.api_key(), config.api_secret(), transport)?;
        Ok(client)
    }
}
