//! HTTP client for the hosted completion gateway.
//!
//! The remote side is a hosted gateway function that forwards to a
//! large-language-model API with a fixed system prompt; its contract is
//! "text in, text out" and it almost never surfaces a hard error.
//! This client still has to survive the transport: it imposes an
//! explicit request timeout and maps every failure into a typed
//! [`GatewayError`], logging a diagnostic before returning so callers
//! can degrade silently.

mod http;

pub use http::HttpCompletionGateway;
