//! HTTP service
//!
//! JSON API over multipart uploads for the browser client.

mod error;
mod form;
pub mod handlers;
pub mod server;

pub use server::{cors_layer, create_router, start_http_server};
