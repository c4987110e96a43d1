use crate::core::kernel::signer::Signer;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub const API_KEY_PARAM: &str = "api_key";
pub const TIMESTAMP_PARAM: &str = "request_timestamp";
pub const SIGNATURE_PARAM: &str = "signature";

pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Request parameters in canonical (byte-wise ascending key) order
pub type Params = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully parameterized and signed call, built fresh for every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub method: HttpMethod,
    pub endpoint: String,
    /// Every transmitted parameter except `signature`
    pub params: Params,
    pub signature: String,
}

impl SignedRequest {
    /// Sorted `key=value` pairs joined by `&`
    pub fn canonical_query(&self) -> String {
        canonical_query(&self.params)
    }

    /// The exact string the signature covers: `<endpoint>?<canonical query>`
    pub fn signing_string(&self) -> String {
        signing_string(&self.endpoint, &self.params)
    }

    /// Canonical query with `signature` appended as the final pair
    pub fn signed_query(&self) -> String {
        format!(
            "{}&{}={}",
            self.canonical_query(),
            SIGNATURE_PARAM,
            self.signature
        )
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.params.get(TIMESTAMP_PARAM).map(String::as_str)
    }

    /// Target URL; GET carries the signed query string, POST does not
    pub fn url(&self, base_url: &str) -> String {
        match self.method {
            HttpMethod::Get => format!("{}{}?{}", base_url, self.endpoint, self.signed_query()),
            HttpMethod::Post => format!("{}{}", base_url, self.endpoint),
        }
    }

    /// POST body: the signed pair string, sent as a form body
    pub fn body(&self) -> Option<String> {
        match self.method {
            HttpMethod::Get => None,
            HttpMethod::Post => Some(self.signed_query()),
        }
    }
}

pub fn canonical_query(params: &Params) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn signing_string(endpoint: &str, params: &Params) -> String {
    format!("{}?{}", endpoint, canonical_query(params))
}

/// Current Unix time in whole seconds
pub fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Injects credentials and a timestamp into caller parameters and signs them
#[derive(Clone)]
pub struct RequestBuilder {
    api_key: String,
    signer: Arc<dyn Signer>,
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder").finish_non_exhaustive()
    }
}

impl RequestBuilder {
    pub fn new(api_key: impl Into<String>, signer: Arc<dyn Signer>) -> Self {
        Self {
            api_key: api_key.into(),
            signer,
        }
    }

    /// Build a signed request stamped with the current time
    pub fn build(&self, method: HttpMethod, endpoint: &str, params: Params) -> SignedRequest {
        self.build_at(method, endpoint, params, current_timestamp())
    }

    /// Build a signed request stamped with `timestamp` (Unix seconds)
    ///
    /// The timestamp is inserted once and the same map is both signed and
    /// transmitted. Caller-supplied `api_key`, `request_timestamp` and
    /// `signature` entries are replaced.
    pub fn build_at(
        &self,
        method: HttpMethod,
        endpoint: &str,
        mut params: Params,
        timestamp: i64,
    ) -> SignedRequest {
        params.remove(SIGNATURE_PARAM);
        params.insert(API_KEY_PARAM.to_string(), self.api_key.clone());
        params.insert(TIMESTAMP_PARAM.to_string(), timestamp.to_string());

        let signature = self.signer.sign(&signing_string(endpoint, &params));

        SignedRequest {
            method,
            endpoint: endpoint.to_string(),
            params,
            signature,
        }
    }
}
