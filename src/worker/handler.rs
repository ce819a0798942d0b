//! Worker thread implementation for image file reading.
//!
//! The worker reads each requested file from the sandbox, checks it against the
//! size limit, sniffs its format and encodes it as a data URI. Nothing here
//! touches the item store; results go back to the plugin thread, which stages
//! them on the draft.

use crate::domain::error::{Result, ZatalogError};
use crate::domain::image::encode_data_uri;
use crate::infrastructure::paths;
use crate::worker::{ImageFailure, ImageSlot, WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::path::Path;
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Reads one image file and encodes it as a `data:` URI.
///
/// # Errors
///
/// - [`ZatalogError::Io`] when the file cannot be opened or read
/// - [`ZatalogError::ImageTooLarge`] when it exceeds `max_bytes`
/// - [`ZatalogError::NotAnImage`] when its content is not a known image format
pub fn read_image(path: &Path, max_bytes: u64) -> Result<String> {
    let size = std::fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(ZatalogError::ImageTooLarge {
            size,
            limit: max_bytes,
        });
    }

    let bytes = std::fs::read(path)?;
    encode_data_uri(&bytes)
}

/// Worker thread state.
///
/// Stateless apart from what Zellij serializes; every request is independent.
#[derive(Serialize, Deserialize, Default)]
pub struct ZatalogWorker {}

impl ZatalogWorker {
    fn handle_read_images(
        request: u64,
        slot: ImageSlot,
        paths: Vec<String>,
        max_bytes: u64,
    ) -> WorkerResponse {
        let mut images = Vec::with_capacity(paths.len());
        let mut failures = Vec::new();

        for path in paths {
            let resolved = paths::to_sandbox_path(&path);
            match read_image(&resolved, max_bytes) {
                Ok(uri) => {
                    tracing::debug!(path = %path, encoded_len = uri.len(), "image encoded");
                    images.push(uri);
                }
                Err(e) => {
                    tracing::debug!(path = %path, resolved = ?resolved, error = %e, "image read failed");
                    failures.push(ImageFailure {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        WorkerResponse::ImagesRead {
            request,
            slot,
            images,
            failures,
        }
    }

    /// Attaches the parent trace context carried by `message` to this thread.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let WorkerMessage::ReadImages { trace_context, .. } = message;
        let trace_context = trace_context.as_ref()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the response to post back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        match message {
            WorkerMessage::ReadImages {
                request,
                slot,
                paths,
                max_bytes,
                ..
            } => {
                let _guard = tracing::debug_span!("worker_read_images",
                    request = request,
                    slot = ?slot,
                    path_count = paths.len()
                ).entered();
                Self::handle_read_images(request, slot, paths, max_bytes)
            }
        }
    }
}

/// Sets up tracing on the worker thread, writing to the same file as the
/// plugin thread.
fn init_worker_tracing() {
    use crate::observability;
    use crate::Config;

    observability::init_tracing(&Config::default());
}

static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

fn post_response(name: String, response: &WorkerResponse) {
    match serde_json::to_string(response) {
        Ok(payload) => post_message_to_plugin(PluginMessage {
            name,
            payload,
            worker_name: None,
        }),
        Err(e) => tracing::debug!(error = %e, "failed to serialize worker response"),
    }
}

impl ZellijWorker<'_> for ZatalogWorker {
    /// Deserializes a [`WorkerMessage`] from `payload`, handles it, and posts
    /// the response back under the same message name.
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            init_worker_tracing();
        }

        let response = match serde_json::from_str::<WorkerMessage>(&payload) {
            Ok(worker_message) => self.handle_message(worker_message),
            Err(e) => {
                let err = ZatalogError::Worker(format!("bad message payload: {e}"));
                tracing::debug!(error = %err, "failed to deserialize worker message");
                WorkerResponse::Error {
                    message: err.to_string(),
                }
            }
        };

        post_response(message, &response);
    }
}
