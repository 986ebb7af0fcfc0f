//! Shared test helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use p2pwatch::domain::ports::http_transport::{HttpResponse, HttpTransport, TransportError};
use p2pwatch::P2pWatch;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Replays canned answers in order and records what was sent.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, serde_json::Value)>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(self: &Arc<Self>, status: u16, body: &str) -> Arc<Self> {
        self.push(Ok(HttpResponse::new(status, body)))
    }

    pub fn fail(self: &Arc<Self>, err: TransportError) -> Arc<Self> {
        self.push(Err(err))
    }

    fn push(self: &Arc<Self>, answer: Result<HttpResponse, TransportError>) -> Arc<Self> {
        self.responses.lock().unwrap().push_back(answer);
        Arc::clone(self)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(String, serde_json::Value)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), body.clone()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted response left".into())))
    }
}

pub fn setup(transport: Arc<ScriptedTransport>) -> P2pWatch {
    P2pWatch::with_transport(":memory:", transport).unwrap()
}

pub const THREE_ADS: &str = r#"{
    "code": "000000",
    "success": true,
    "data": [
        {"adv": {"price": "655.00", "surplusAmount": "310.5", "tradeMethods": [{"identifier": "MTNMobileMoney"}]},
         "advertiser": {"userNo": "u-1", "nickName": "KamerOTC"}},
        {"adv": {"price": "648.20"}, "advertiser": {"nickName": "DoualaFX"}},
        {"adv": {"price": "661.75"}}
    ]
}"#;
