//! Test doubles and common utilities for publish contract tests
//!
//! These doubles record how the core drives its collaborators without doing
//! any real I/O.

#![allow(dead_code)]

use http_publish_core::dispatch::PublishRequest;
use http_publish_core::error::Result;
use http_publish_core::traits::{DestinationPrompt, Notice, Notifier, Transport};
use http_publish_core::{DestinationSettings, Error, PublishDispatcher, PublishSettings, Publisher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// A transport that records requests and replies with a fixed JSON body
#[derive(Clone)]
pub struct RecordingTransport {
    requests: Arc<Mutex<Vec<PublishRequest>>>,
    reply: Arc<Mutex<std::result::Result<serde_json::Value, String>>>,
    gate: Option<Arc<Notify>>,
    entered: Arc<Notify>,
}

impl RecordingTransport {
    /// Reply to every request with `body`
    pub fn replying(body: serde_json::Value) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            reply: Arc::new(Mutex::new(Ok(body))),
            gate: None,
            entered: Arc::new(Notify::new()),
        }
    }

    /// Fail every request with a transport error
    pub fn failing(message: &str) -> Self {
        let transport = Self::replying(serde_json::Value::Null);
        *transport.reply.lock().unwrap() = Err(message.to_string());
        transport
    }

    /// Hold every request until `release()` is called on the returned gate
    pub fn gated(body: serde_json::Value) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let mut transport = Self::replying(body);
        transport.gate = Some(gate.clone());
        (transport, gate)
    }

    /// Resolves once a request has reached the transport
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<PublishRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: &PublishRequest) -> Result<serde_json::Value> {
        self.requests.lock().unwrap().push(request.clone());
        self.entered.notify_one();

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let reply = self.reply.lock().unwrap().clone();
        reply.map_err(Error::transport)
    }

    fn transport_name(&self) -> &'static str {
        "recording"
    }
}

/// A prompt that answers with a scripted choice and counts invocations
#[derive(Clone)]
pub struct ScriptedPrompt {
    answer: Option<String>,
    calls: Arc<AtomicUsize>,
    offered: Arc<Mutex<Vec<(Vec<String>, usize)>>>,
}

impl ScriptedPrompt {
    /// Pick `name` whenever asked
    pub fn picking(name: &str) -> Self {
        Self {
            answer: Some(name.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
            offered: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Abandon the picker whenever asked
    pub fn abandoning() -> Self {
        Self {
            answer: None,
            ..Self::picking("")
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Names and default index of every prompt shown
    pub fn offered(&self) -> Vec<(Vec<String>, usize)> {
        self.offered.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DestinationPrompt for ScriptedPrompt {
    async fn pick(&self, names: &[String], default: usize) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.offered.lock().unwrap().push((names.to_vec(), default));
        Ok(self.answer.clone())
    }
}

/// A notifier that keeps every notice
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// Publisher wired to the given doubles
pub fn publisher(
    transport: &RecordingTransport,
    prompt: &ScriptedPrompt,
    notifier: &RecordingNotifier,
) -> Publisher {
    Publisher::new(
        PublishDispatcher::new(Box::new(transport.clone())),
        Box::new(prompt.clone()),
        Box::new(notifier.clone()),
    )
}

/// Settings holding valid destinations with the given names
pub fn settings_with(names: &[&str]) -> PublishSettings {
    let mut settings = PublishSettings::new();
    for name in names {
        settings
            .add(DestinationSettings::new(
                Some(*name),
                Some(&format!("http://example.org/{}", name)),
                None,
                None,
            ))
            .expect("valid destination");
    }
    settings
}
