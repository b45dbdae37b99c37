//! Domain types for Cloud9 SSH environments.
//!
//! Wire names follow the service: camelCase for the environment and
//! membership shapes, PascalCase for the tag shapes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Access level of a membership, drawn from the service's closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Permissions {
    /// The environment owner.
    Owner,
    /// Read and write access.
    ReadWrite,
    /// Read only access.
    ReadOnly,
}

/// A membership binding a principal to an environment.
///
/// Memberships have no lifecycle of their own; they are created and deleted
/// through membership calls on an existing environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    /// Id of the environment the membership is attached to.
    pub environment_id: String,
    /// ARN of the member principal.
    pub user_arn: String,
    /// Id of the member principal.
    #[serde(default)]
    pub user_id: String,
    /// Access level granted to the principal.
    pub permissions: Permissions,
}

/// A key/value tag attached to an environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag key, unique per environment.
    #[serde(rename = "Key")]
    pub key: String,
    /// Tag value.
    #[serde(rename = "Value")]
    pub value: String,
}

/// SSH connection details of an environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SshRemote {
    /// Hostname of the remote machine.
    #[serde(rename = "host")]
    pub hostname: String,
    /// Login name used on the remote machine.
    pub login_name: String,
    /// SSH port on the remote machine.
    pub port: u16,
    /// Working directory of the environment on the remote machine.
    pub environment_path: String,
    /// Path to the node.js runtime on the remote machine.
    pub node_path: String,
    /// Optional SSH url of a bastion host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bastion_host: Option<String>,
}

/// Base description of an environment, as returned by the documented
/// describe operation. Carries none of the SSH details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvironmentDescription {
    /// Stable environment id.
    pub id: String,
    /// Resource name of the environment.
    pub arn: String,
    /// Human readable name.
    pub name: String,
    /// Optional free-form description.
    pub description: String,
}

/// The unified environment record.
///
/// An `Environment` only exists once its base description, SSH remote
/// details and tags have all been fetched and merged; partial data is never
/// surfaced as one of these.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    /// Stable environment id.
    pub id: String,
    /// Resource name of the environment.
    pub arn: String,
    /// Human readable name.
    pub name: String,
    /// Optional free-form description.
    pub description: String,
    /// SSH connection details.
    pub remote: SshRemote,
    /// Tags attached to the environment. Keys are unique; order carries no
    /// meaning.
    pub tags: HashMap<String, String>,
    /// Memberships of the environment. Populated lazily through
    /// [`crate::Cloud9Client::list_memberships`], empty until then.
    pub memberships: Vec<Membership>,
}

/// Request payload for creating an SSH environment.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnvironmentRequest {
    /// Human readable name of the new environment.
    pub name: String,
    /// Optional free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Login name used on the remote machine.
    pub login_name: String,
    /// Hostname of the remote machine.
    #[serde(rename = "host")]
    pub hostname: String,
    /// SSH port on the remote machine.
    pub port: u16,
    /// Working directory of the environment on the remote machine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_path: Option<String>,
    /// Path to the node.js runtime on the remote machine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_path: Option<String>,
    /// Optional SSH url of a bastion host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bastion_host: Option<String>,
    /// When set, the service validates the request without creating.
    pub dry_run: bool,
    /// Tags to attach at creation time.
    #[serde(rename = "tags")]
    pub tags: Vec<Tag>,
}

/// Request payload for updating the SSH remote details of an environment.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSshRemoteRequest {
    /// Id of the environment to update.
    pub environment_id: String,
    /// Hostname of the remote machine.
    #[serde(rename = "host")]
    pub hostname: String,
    /// Login name used on the remote machine.
    pub login_name: String,
    /// SSH port on the remote machine.
    pub port: u16,
    /// Working directory of the environment on the remote machine.
    pub environment_path: String,
    /// Path to the node.js runtime on the remote machine.
    pub node_path: String,
    /// Optional SSH url of a bastion host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bastion_host: Option<String>,
}

impl Environment {
    /// Merge a base description, SSH remote details and tags into one
    /// record. Memberships start empty.
    pub(crate) fn merge(
        base: EnvironmentDescription,
        remote: SshRemote,
        tags: Vec<Tag>,
    ) -> Self {
        Self {
            id: base.id,
            arn: base.arn,
            name: base.name,
            description: base.description,
            remote,
            tags: tags.into_iter().map(|t| (t.key, t.value)).collect(),
            memberships: Vec::new(),
        }
    }
}
