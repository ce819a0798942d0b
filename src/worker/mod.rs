//! Background worker thread for image file reading.
//!
//! Reading and encoding images can take a while for large files, so it runs on
//! a Zellij worker instead of the plugin's update loop.
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `handler`: worker implementation and file reading

pub mod handler;
pub mod messages;

pub use handler::{read_image, ZatalogWorker};
pub use messages::{ImageFailure, ImageSlot, TraceContext, WorkerMessage, WorkerResponse};
