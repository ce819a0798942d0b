//! Worker thread message types for cross-thread communication.
//!
//! The plugin thread posts [`WorkerMessage`]s as JSON; the worker answers with a
//! [`WorkerResponse`]. Each message carries an optional [`TraceContext`] so the
//! worker's spans join the trace that posted it.

use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span ids of the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use zatalog::worker::TraceContext;
    ///
    /// if let Some(ctx) = TraceContext::from_current() {
    ///     println!("Trace ID: {}", ctx.trace_id);
    /// }
    /// ```
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            tracing::trace!("no valid span context to propagate");
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Which draft field a batch of images is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSlot {
    /// Replaces the cover image. Only the first image of a batch is used.
    Cover,
    /// Appended to the additional images, in order.
    Additional,
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    read_images(ReadImages { request: u64, slot: ImageSlot, paths: Vec<String>, max_bytes: u64 }),
}

/// Messages sent from the main thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read local image files and encode each as a data URI.
    ReadImages {
        /// Form generation that issued the request; stale replies are dropped.
        request: u64,

        /// Destination of the encoded images.
        slot: ImageSlot,

        /// Host paths as typed by the user (`~` allowed).
        paths: Vec<String>,

        /// Files larger than this are reported as failures.
        max_bytes: u64,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

/// A path the worker could not turn into an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFailure {
    pub path: String,
    pub reason: String,
}

/// Responses sent from the worker thread back to the main thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Result of a `ReadImages` request. Successes and failures keep the
    /// order of the requested paths.
    ImagesRead {
        request: u64,
        slot: ImageSlot,
        /// Encoded `data:` URIs.
        images: Vec<String>,
        failures: Vec<ImageFailure>,
    },

    /// The worker could not process a message at all.
    Error {
        /// Human-readable error message.
        message: String,
    },
}
