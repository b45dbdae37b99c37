//! Client for AWS Cloud9 SSH development environments.
//!
//! Cloud9 exposes SSH-backed environments through two surfaces: the
//! documented environment-management API, and an undocumented set of
//! SSH-remote operations (`DescribeSSHRemote`, `UpdateSSHRemote`,
//! `CreateEnvironmentSSH`, `GetUserPublicKey`) that carry the connection
//! details the public SDK never surfaces. Both speak the same signed,
//! target-addressed JSON protocol, so this crate drives them through one
//! invoker and merges their answers into a single [`Environment`] record.
//!
//! ## Example
//!
//! ```no_run
//! use cloud9_ssh_client::{Cloud9Client, Config};
//! use cloud9_ssh_core::{Context, OsEnv};
//! use cloud9_ssh_http_send_reqwest::ReqwestHttpSend;
//!
//! # async fn example() -> cloud9_ssh_core::Result<()> {
//! let ctx = Context::new()
//!     .with_env(OsEnv)
//!     .with_http_send(ReqwestHttpSend::default());
//!
//! let config = Config::default().from_env(&ctx);
//! let client = Cloud9Client::from_config(ctx, &config)?;
//!
//! let environments = client
//!     .resolve(&["573a64362bc44311a52fa6e0178b3dd3".to_string()])
//!     .await?;
//! for env in &environments {
//!     println!("{}: {}@{}", env.name, env.remote.login_name, env.remote.hostname);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub use client::Cloud9Client;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod model;
pub use model::{
    CreateEnvironmentRequest, Environment, EnvironmentDescription, Membership, Permissions,
    SshRemote, Tag, UpdateSshRemoteRequest,
};

mod sign;
pub use sign::RequestSigner;

mod constants;
mod ops;
