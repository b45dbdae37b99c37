use crate::constants::{
    AWS_JSON_CONTENT_TYPE, DESCRIBE_BATCH_LIMIT, OPERATION_PREFIX, SERVICE, X_AMZ_CONTENT_SHA_256,
    X_AMZ_TARGET,
};
use crate::model::{
    CreateEnvironmentRequest, Environment, EnvironmentDescription, Membership, Permissions,
    SshRemote, Tag, UpdateSshRemoteRequest,
};
use crate::ops::*;
use crate::sign::RequestSigner;
use crate::{Config, Credential};
use bytes::Bytes;
use cloud9_ssh_core::hash::hex_sha256;
use cloud9_ssh_core::{Context, Error, Result};
use http::{header, Method, StatusCode};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Client for the Cloud9 environment-management service.
///
/// One client per `{credential, region}` pair; it holds no per-call state
/// and is safe to share across tasks. Every method issues one or more
/// signed `POST` calls to `https://cloud9.{region}.amazonaws.com/` and
/// blocks the calling task until the response arrives. No retries happen at
/// this layer; every failure surfaces to the caller as-is.
#[derive(Debug)]
pub struct Cloud9Client {
    ctx: Context,
    credential: Credential,
    endpoint: String,
    signer: RequestSigner,
}

impl Cloud9Client {
    /// Create a client for a region with an explicit credential.
    pub fn new(ctx: Context, credential: Credential, region: &str) -> Result<Self> {
        if !credential.is_valid() {
            return Err(Error::credential_invalid(
                "cannot build a client without a complete access key pair",
            ));
        }
        if region.is_empty() {
            return Err(Error::config_invalid("region must not be empty"));
        }

        Ok(Self {
            ctx,
            credential,
            endpoint: format!("https://{SERVICE}.{region}.amazonaws.com/"),
            signer: RequestSigner::new(SERVICE, region),
        })
    }

    /// Create a client from a [`Config`], typically one filled from the
    /// environment.
    pub fn from_config(ctx: Context, config: &Config) -> Result<Self> {
        let credential = config.credential()?;
        let region = config.region()?.to_string();
        Self::new(ctx, credential, &region)
    }

    /// Invoke one operation against the service endpoint.
    ///
    /// Serializes the request, attaches the operation target and payload
    /// hash, signs with the current wall clock, sends, and classifies the
    /// response: HTTP 400 parses as a structured service error, any other
    /// non-2xx status is surfaced with its body text, and a 2xx body parses
    /// as the operation result (an empty success body reads as `{}`).
    async fn invoke<Req, Resp>(&self, operation: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let operation_context = || format!("operation: {operation}");

        let body = serde_json::to_vec(request).map_err(|e| {
            Error::request_invalid("failed to serialize request body")
                .with_source(e)
                .with_context(operation_context())
        })?;

        debug!("invoking {OPERATION_PREFIX}.{operation}");
        let req = http::Request::builder()
            .method(Method::POST)
            .uri(self.endpoint.as_str())
            .header(header::CONTENT_TYPE, AWS_JSON_CONTENT_TYPE)
            .header(X_AMZ_TARGET, format!("{OPERATION_PREFIX}.{operation}"))
            .header(X_AMZ_CONTENT_SHA_256, hex_sha256(&body))
            .body(Bytes::from(body))?;

        let (mut parts, body) = req.into_parts();
        self.signer
            .sign(&mut parts, &self.credential)
            .map_err(|e| e.with_context(operation_context()))?;
        let req = http::Request::from_parts(parts, body);

        let resp = self
            .ctx
            .http_send(req)
            .await
            .map_err(|e| e.with_context(operation_context()))?;

        let status = resp.status();
        let body = resp.into_body();

        if status == StatusCode::BAD_REQUEST {
            let parsed: ApiErrorBody = serde_json::from_slice(&body).map_err(|e| {
                Error::unexpected("failed to parse service error body")
                    .with_source(e)
                    .with_context(operation_context())
            })?;
            return Err(
                Error::api(parsed.exception_type, parsed.message).with_context(operation_context())
            );
        }
        if !status.is_success() {
            return Err(Error::unexpected(format!("unexpected status {status}"))
                .with_context(operation_context())
                .with_context(format!("body: {}", String::from_utf8_lossy(&body))));
        }

        let body: &[u8] = if body.is_empty() { b"{}" } else { &body };
        serde_json::from_slice(body).map_err(|e| {
            Error::unexpected("failed to parse response body")
                .with_source(e)
                .with_context(operation_context())
        })
    }

    /// Fetch base descriptions for up to 25 environment ids.
    ///
    /// Callers with longer lists go through [`Cloud9Client::resolve`], which
    /// owns the chunking.
    pub async fn describe_environments(
        &self,
        ids: &[String],
    ) -> Result<Vec<EnvironmentDescription>> {
        if ids.len() > DESCRIBE_BATCH_LIMIT {
            return Err(Error::request_invalid(format!(
                "DescribeEnvironments accepts at most {DESCRIBE_BATCH_LIMIT} ids per call, got {}",
                ids.len()
            )));
        }

        let result: DescribeEnvironmentsResult = self
            .invoke(
                DESCRIBE_ENVIRONMENTS,
                &DescribeEnvironmentsRequest {
                    environment_ids: ids,
                },
            )
            .await?;
        Ok(result.environments)
    }

    /// Fetch the SSH remote details of one environment.
    pub async fn describe_ssh_remote(&self, environment_id: &str) -> Result<SshRemote> {
        let result: DescribeSshRemoteResult = self
            .invoke(
                DESCRIBE_SSH_REMOTE,
                &DescribeSshRemoteRequest { environment_id },
            )
            .await?;
        Ok(result.remote)
    }

    /// Fetch the tags attached to an environment, addressed by its ARN.
    pub async fn list_tags(&self, resource_arn: &str) -> Result<Vec<Tag>> {
        let result: ListTagsForResourceResult = self
            .invoke(
                LIST_TAGS_FOR_RESOURCE,
                &ListTagsForResourceRequest { resource_arn },
            )
            .await?;
        Ok(result.tags)
    }

    /// Resolve environment ids into fully merged environment records.
    ///
    /// Ids are described in chunks of at most 25; every environment the
    /// service returns is then enriched with its SSH remote details and its
    /// tags, one call each. The result keeps chunk order, then the service's
    /// response order within a chunk.
    ///
    /// Fail-fast: the first failing call aborts the whole resolution and no
    /// partial list is returned, so callers never see an environment that
    /// merged incompletely.
    pub async fn resolve(&self, ids: &[String]) -> Result<Vec<Environment>> {
        let mut environments = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(DESCRIBE_BATCH_LIMIT) {
            debug!("resolving chunk of {} environment ids", chunk.len());
            for base in self.describe_environments(chunk).await? {
                let remote = self.describe_ssh_remote(&base.id).await?;
                let tags = self.list_tags(&base.arn).await?;
                environments.push(Environment::merge(base, remote, tags));
            }
        }

        Ok(environments)
    }

    /// Fetch every membership of one environment, following the
    /// continuation token until it is exhausted.
    pub async fn list_memberships(&self, environment_id: &str) -> Result<Vec<Membership>> {
        let mut memberships = Vec::new();
        let mut next_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let result: DescribeEnvironmentMembershipsResult = self
                .invoke(
                    DESCRIBE_ENVIRONMENT_MEMBERSHIPS,
                    &DescribeEnvironmentMembershipsRequest {
                        environment_id,
                        next_token: next_token.as_deref(),
                    },
                )
                .await?;

            pages += 1;
            memberships.extend(result.memberships);

            match result.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }

        debug!("fetched {} memberships over {pages} pages", memberships.len());
        Ok(memberships)
    }

    /// Update an environment: base fields first, SSH remote fields second.
    ///
    /// Both calls must succeed. If the second fails after the first
    /// succeeded the environment is left with updated base fields and stale
    /// remote fields; this layer performs no rollback, callers are expected
    /// to retry the whole update.
    pub async fn update_environment(&self, env: &Environment) -> Result<()> {
        let _: UpdateEnvironmentResult = self
            .invoke(
                UPDATE_ENVIRONMENT,
                &UpdateEnvironmentRequest {
                    environment_id: &env.id,
                    name: &env.name,
                    description: &env.description,
                },
            )
            .await?;

        self.update_ssh_remote(&UpdateSshRemoteRequest {
            environment_id: env.id.clone(),
            hostname: env.remote.hostname.clone(),
            login_name: env.remote.login_name.clone(),
            port: env.remote.port,
            environment_path: env.remote.environment_path.clone(),
            node_path: env.remote.node_path.clone(),
            bastion_host: env.remote.bastion_host.clone(),
        })
        .await
    }

    /// Update the SSH remote details of an environment.
    pub async fn update_ssh_remote(&self, request: &UpdateSshRemoteRequest) -> Result<()> {
        let _: UpdateSshRemoteResult = self.invoke(UPDATE_SSH_REMOTE, request).await?;
        Ok(())
    }

    /// Create an SSH environment and return its id.
    pub async fn create_environment(&self, request: &CreateEnvironmentRequest) -> Result<String> {
        let result: CreateEnvironmentResult =
            self.invoke(CREATE_ENVIRONMENT_SSH, request).await?;
        Ok(result.environment_id)
    }

    /// Delete an environment by id.
    pub async fn delete_environment(&self, environment_id: &str) -> Result<()> {
        let _: DeleteEnvironmentResult = self
            .invoke(
                DELETE_ENVIRONMENT,
                &DeleteEnvironmentRequest { environment_id },
            )
            .await?;
        Ok(())
    }

    /// Fetch the caller's SSH public key, to be installed on the remote
    /// host before the environment can connect.
    pub async fn get_user_public_key(&self) -> Result<String> {
        let result: GetUserPublicKeyResult = self
            .invoke(GET_USER_PUBLIC_KEY, &GetUserPublicKeyRequest {})
            .await?;
        Ok(result.public_key)
    }

    /// Grant a principal membership to an environment.
    pub async fn create_membership(
        &self,
        environment_id: &str,
        user_arn: &str,
        permissions: Permissions,
    ) -> Result<Membership> {
        let result: EnvironmentMembershipResult = self
            .invoke(
                CREATE_ENVIRONMENT_MEMBERSHIP,
                &EnvironmentMembershipRequest {
                    environment_id,
                    user_arn,
                    permissions,
                },
            )
            .await?;
        Ok(result.membership)
    }

    /// Change the access level of an existing membership.
    pub async fn update_membership(
        &self,
        environment_id: &str,
        user_arn: &str,
        permissions: Permissions,
    ) -> Result<Membership> {
        let result: EnvironmentMembershipResult = self
            .invoke(
                UPDATE_ENVIRONMENT_MEMBERSHIP,
                &EnvironmentMembershipRequest {
                    environment_id,
                    user_arn,
                    permissions,
                },
            )
            .await?;
        Ok(result.membership)
    }

    /// Revoke a principal's membership to an environment.
    pub async fn delete_membership(&self, environment_id: &str, user_arn: &str) -> Result<()> {
        let _: DeleteEnvironmentMembershipResult = self
            .invoke(
                DELETE_ENVIRONMENT_MEMBERSHIP,
                &DeleteEnvironmentMembershipRequest {
                    environment_id,
                    user_arn,
                },
            )
            .await?;
        Ok(())
    }
}
