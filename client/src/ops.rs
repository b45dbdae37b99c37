//! Wire envelopes for every operation the client invokes.
//!
//! Both API surfaces speak the same target-addressed JSON protocol, so the
//! operation name constants below are the only place that records which
//! surface an operation belongs to: the documented Cloud9 operations and the
//! undocumented SSH-remote operations differ in nothing but their target.

use crate::model::{EnvironmentDescription, Membership, Permissions, SshRemote, Tag};
use serde::{Deserialize, Serialize};

// Documented operations.
pub(crate) const DESCRIBE_ENVIRONMENTS: &str = "DescribeEnvironments";
pub(crate) const DESCRIBE_ENVIRONMENT_MEMBERSHIPS: &str = "DescribeEnvironmentMemberships";
pub(crate) const LIST_TAGS_FOR_RESOURCE: &str = "ListTagsForResource";
pub(crate) const UPDATE_ENVIRONMENT: &str = "UpdateEnvironment";
pub(crate) const DELETE_ENVIRONMENT: &str = "DeleteEnvironment";
pub(crate) const CREATE_ENVIRONMENT_MEMBERSHIP: &str = "CreateEnvironmentMembership";
pub(crate) const UPDATE_ENVIRONMENT_MEMBERSHIP: &str = "UpdateEnvironmentMembership";
pub(crate) const DELETE_ENVIRONMENT_MEMBERSHIP: &str = "DeleteEnvironmentMembership";

// Undocumented SSH-remote operations, absent from the public SDK.
pub(crate) const CREATE_ENVIRONMENT_SSH: &str = "CreateEnvironmentSSH";
pub(crate) const DESCRIBE_SSH_REMOTE: &str = "DescribeSSHRemote";
pub(crate) const UPDATE_SSH_REMOTE: &str = "UpdateSSHRemote";
pub(crate) const GET_USER_PUBLIC_KEY: &str = "GetUserPublicKey";

/// Structured error body returned with HTTP 400.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiErrorBody {
    #[serde(rename = "__type")]
    pub exception_type: String,
    #[serde(alias = "Message")]
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DescribeEnvironmentsRequest<'a> {
    pub environment_ids: &'a [String],
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct DescribeEnvironmentsResult {
    pub environments: Vec<EnvironmentDescription>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DescribeEnvironmentMembershipsRequest<'a> {
    pub environment_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<&'a str>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct DescribeEnvironmentMembershipsResult {
    pub memberships: Vec<Membership>,
    pub next_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ListTagsForResourceRequest<'a> {
    #[serde(rename = "ResourceARN")]
    pub resource_arn: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ListTagsForResourceResult {
    #[serde(rename = "Tags")]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateEnvironmentRequest<'a> {
    pub environment_id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UpdateEnvironmentResult {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeleteEnvironmentRequest<'a> {
    pub environment_id: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DeleteEnvironmentResult {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EnvironmentMembershipRequest<'a> {
    pub environment_id: &'a str,
    pub user_arn: &'a str,
    pub permissions: Permissions,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EnvironmentMembershipResult {
    pub membership: Membership,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeleteEnvironmentMembershipRequest<'a> {
    pub environment_id: &'a str,
    pub user_arn: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DeleteEnvironmentMembershipResult {}

#[derive(Debug, Serialize)]
pub(crate) struct GetUserPublicKeyRequest {}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct GetUserPublicKeyResult {
    pub public_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DescribeSshRemoteRequest<'a> {
    pub environment_id: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct DescribeSshRemoteResult {
    pub remote: SshRemote,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UpdateSshRemoteResult {}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct CreateEnvironmentResult {
    pub environment_id: String,
}
