#![allow(dead_code)]

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use ost_client::{NetworkProvider, OstClient, OstError};
use sha2::Sha256;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "https://sandboxapi.ost.com/v1";
pub const API_KEY: &str = "k1";
pub const API_SECRET: &str = "testsecret";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Get {
        url: String,
    },
    Post {
        url: String,
        body: String,
        content_type: String,
    },
}

impl Recorded {
    pub fn url(&self) -> &str {
        match self {
            Self::Get { url } | Self::Post { url, .. } => url,
        }
    }

    /// `key=value&...` that carried the parameters, wherever they travelled
    pub fn params(&self) -> &str {
        match self {
            Self::Get { url } => url.split_once('?').map_or("", |(_, q)| q),
            Self::Post { body, .. } => body,
        }
    }

    pub fn param(&self, key: &str) -> Option<String> {
        self.params()
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    }

    pub fn endpoint(&self) -> &str {
        let url = self.url();
        let path = url.strip_prefix(BASE_URL).unwrap_or(url);
        path.split_once('?').map_or(path, |(p, _)| p)
    }

    /// Recompute the signature the way the backend does and compare
    pub fn signature_is_valid(&self, secret: &str) -> bool {
        let (unsigned, signature) = match self.params().rsplit_once("&signature=") {
            Some(split) => split,
            None => return false,
        };
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{}?{}", self.endpoint(), unsigned).as_bytes());
        hex::encode(mac.finalize().into_bytes()) == signature
    }
}

enum Reply {
    Body(String),
    Fail(String),
}

/// In-memory `NetworkProvider` that records every call and replays canned replies
#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<Recorded>>,
    replies: Mutex<VecDeque<Reply>>,
    fallback: Mutex<Option<String>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, body: impl Into<String>) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Body(body.into()));
        self
    }

    pub fn fail(&self, message: impl Into<String>) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Fail(message.into()));
        self
    }

    /// Reply used once the queue is empty
    pub fn always(&self, body: impl Into<String>) -> &Self {
        *self.fallback.lock().unwrap() = Some(body.into());
        self
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.calls.lock().unwrap().last().cloned().expect("no calls")
    }

    fn next_reply(&self) -> Result<String, OstError> {
        let queued = self.replies.lock().unwrap().pop_front();
        match queued {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Fail(message)) => Err(OstError::transport(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                message,
            ))),
            None => self
                .fallback
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| OstError::transport("no canned reply left")),
        }
    }
}

#[async_trait]
impl NetworkProvider for RecordingTransport {
    async fn post(&self, url: &str, body: &str, content_type: &str) -> Result<String, OstError> {
        self.calls.lock().unwrap().push(Recorded::Post {
            url: url.to_string(),
            body: body.to_string(),
            content_type: content_type.to_string(),
        });
        self.next_reply()
    }

    async fn get(&self, url: &str) -> Result<String, OstError> {
        self.calls.lock().unwrap().push(Recorded::Get {
            url: url.to_string(),
        });
        self.next_reply()
    }
}

pub fn ready_client(transport: Arc<RecordingTransport>) -> OstClient {
    let client = OstClient::new(BASE_URL);
    client.init(API_KEY, API_SECRET, transport).unwrap();
    client
}

pub fn user_json(id: &str, name: &str) -> String {
    format!(
        r#"{{"id":"{id}","addresses":[["1409","0x{id}"]],"name":"{name}","airdropped_tokens":"100","token_balance":"50"}}"#
    )
}

pub fn transaction_json(id: &str) -> String {
    format!(
        r#"{{"id":"{id}","from_user_id":"u1","to_user_id":"u2","transaction_hash":null,"action_id":"a1","timestamp":1526605283000,"status":"processing","gas_price":"5000000000","gas_used":null,"transaction_fee":null,"block_number":null,"amount":"1.5","commission_amount":null}}"#
    )
}

pub fn action_json(id: &str) -> String {
    format!(
        r#"{{"id":"{id}","name":"Like","kind":"user_to_user","currency":"BT","amount":"0.5","arbitrary_amount":false,"commission_percent":null}}"#
    )
}

pub fn envelope(key: &str, payload: &str) -> String {
    format!(r#"{{"success":true,"data":{{"{key}":{payload}}}}}"#)
}
