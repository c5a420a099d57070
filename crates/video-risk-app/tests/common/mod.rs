//! Shared fakes for controller integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use url::Url;
use video_risk_app::{ClientConfig, Controls, FixedSelection, UploadController};
use video_risk_ui::{DisplayContent, DisplayRegion, TriggerControl};
use video_risk_upload::{RawResponse, SelectedFile, UploadError, UploadTransport};

/// Display that keeps every rendering in order.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    renders: Mutex<Vec<DisplayContent>>,
}

impl RecordingDisplay {
    pub fn renders(&self) -> Vec<DisplayContent> {
        self.renders.lock().expect("display lock").clone()
    }

    pub fn last(&self) -> Option<DisplayContent> {
        self.renders().last().cloned()
    }
}

impl DisplayRegion for RecordingDisplay {
    fn render(&self, content: DisplayContent) {
        self.renders.lock().expect("display lock").push(content);
    }
}

/// Trigger that keeps every enabled-state change in order.
#[derive(Debug, Default)]
pub struct RecordingTrigger {
    changes: Mutex<Vec<bool>>,
}

impl RecordingTrigger {
    pub fn changes(&self) -> Vec<bool> {
        self.changes.lock().expect("trigger lock").clone()
    }

    /// Enabled state as seen by the user; controls start enabled.
    pub fn is_enabled(&self) -> bool {
        self.changes().last().copied().unwrap_or(true)
    }
}

impl TriggerControl for RecordingTrigger {
    fn set_enabled(&self, enabled: bool) {
        self.changes.lock().expect("trigger lock").push(enabled);
    }
}

/// Transport answering every call with a fixed result.
#[derive(Debug)]
pub struct ScriptedTransport {
    reply: Result<RawResponse, String>,
    calls: AtomicUsize,
    last_file_name: Mutex<Option<String>>,
}

impl ScriptedTransport {
    pub fn responding(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(RawResponse {
                status,
                body: body.to_string(),
            }),
            calls: AtomicUsize::new(0),
            last_file_name: Mutex::new(None),
        })
    }

    pub fn failing(description: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(description.to_string()),
            calls: AtomicUsize::new(0),
            last_file_name: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_file_name(&self) -> Option<String> {
        self.last_file_name.lock().expect("name lock").clone()
    }
}

#[async_trait]
impl UploadTransport for ScriptedTransport {
    async fn send(&self, _endpoint: &Url, file: SelectedFile) -> Result<RawResponse, UploadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_file_name.lock().expect("name lock") = Some(file.file_name().to_string());
        self.reply.clone().map_err(UploadError::Transport)
    }
}

/// Transport that parks inside `send` until released.
#[derive(Debug, Default)]
pub struct GatedTransport {
    pub entered: Notify,
    pub release: Notify,
    calls: AtomicUsize,
}

impl GatedTransport {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UploadTransport for GatedTransport {
    async fn send(&self, _endpoint: &Url, _file: SelectedFile) -> Result<RawResponse, UploadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(RawResponse {
            status: 200,
            body: r#"{"status":"ok"}"#.to_string(),
        })
    }
}

/// Controller wired to recording controls.
pub struct Harness {
    pub controller: UploadController,
    pub display: Arc<RecordingDisplay>,
    pub trigger: Arc<RecordingTrigger>,
}

/// Fixture video selection.
pub fn clip() -> Option<SelectedFile> {
    Some(SelectedFile::from_bytes("clip.mp4", b"fake-mp4-bytes".to_vec()))
}

/// Builds a controller around `transport` with the default endpoint.
pub fn harness(file: Option<SelectedFile>, transport: Arc<dyn UploadTransport>) -> Harness {
    let config = ClientConfig::with_default_endpoint().expect("default endpoint should validate");
    harness_with_config(&config, file, transport)
}

/// Builds a controller around `transport` and `config`.
pub fn harness_with_config(
    config: &ClientConfig,
    file: Option<SelectedFile>,
    transport: Arc<dyn UploadTransport>,
) -> Harness {
    let display = Arc::new(RecordingDisplay::default());
    let trigger = Arc::new(RecordingTrigger::default());
    let controls = Controls {
        picker: FixedSelection::shared(file),
        display: display.clone(),
        trigger: trigger.clone(),
    };

    Harness {
        controller: UploadController::with_transport(config, controls, transport),
        display,
        trigger,
    }
}
