//! Chat backend client for the exercise advisor.
//!
//! [`client`] defines the provider-independent contract; [`ollama`] implements
//! it against a local Ollama daemon over HTTP/HTTPS. All structural
//! assumptions about the backend payload live in this crate so the plan
//! service never inspects raw backend objects.

#![warn(missing_docs, clippy::pedantic)]

pub mod client;
pub mod ollama;

mod http_client;
