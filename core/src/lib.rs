//! Core components shared by the Cloud9 SSH environment client.
//!
//! This crate holds the service-agnostic substrate: the [`Context`] that
//! carries pluggable HTTP and environment implementations, the structured
//! [`Error`] type, cryptographic hash helpers, time formatting helpers and
//! the [`SigningRequest`] view used while producing request signatures.
//!
//! Nothing in here knows about Cloud9. The `cloud9-ssh-client` crate builds
//! the signer, the JSON invoker and the environment pipeline on top of these
//! pieces, and `cloud9-ssh-http-send-reqwest` provides the production
//! [`HttpSend`] implementation.
//!
//! ## Example
//!
//! ```no_run
//! use cloud9_ssh_core::{Context, OsEnv};
//!
//! // A context with the process environment and no HTTP transport yet.
//! let ctx = Context::new().with_env(OsEnv);
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};

mod error;
pub use error::{Error, ErrorKind, Result};

mod request;
pub use request::SigningRequest;
