//! Reporting service transport
//!
//! This module provides the cross-origin request path used to reach the
//! reporting service:
//! - **Token** - unique callback identifiers per request
//! - **Registry** - one-shot callbacks and the script resources that trigger them
//! - **Request** - request URL construction and JSONP body parsing
//! - **Host** - the environment adapter that loads a script resource
//! - **Client** - the `Transport` itself: timeout, cleanup and payload validation
//!
//! A request registers a callback under a fresh token, asks the host to load
//! the script resource, and waits for the service to invoke the callback.

pub mod client;
pub mod host;
pub mod registry;
pub mod request;
pub mod token;

// Re-export main types
pub use client::{validate_payload, Transport};
pub use host::{HttpScriptHost, ScriptHost};
pub use registry::{ScriptCleanup, ScriptRegistry};
pub use request::{build_request_url, parse_jsonp};
pub use token::CallbackTokens;
