//! End-to-end tests for the client pipeline over a scripted transport.
//!
//! Every test drives the real signing and invocation path; only the HTTP
//! transport is replaced, with a queue of canned responses that records the
//! requests it saw.

use async_trait::async_trait;
use bytes::Bytes;
use cloud9_ssh_client::{
    Cloud9Client, Credential, Environment, Permissions, SshRemote, UpdateSshRemoteRequest,
};
use cloud9_ssh_core::{Context, Error, ErrorKind, HttpSend, Result};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

const REGION: &str = "eu-west-3";

/// One request observed by the scripted transport.
#[derive(Debug, Clone)]
struct RecordedCall {
    operation: String,
    authorization: String,
    payload_hash: String,
    body: Value,
}

#[derive(Debug, Default)]
struct Inner {
    script: Mutex<VecDeque<(u16, String)>>,
    calls: Mutex<Vec<RecordedCall>>,
}

/// Transport returning canned responses in order.
#[derive(Debug, Clone, Default)]
struct ScriptedHttpSend {
    inner: Arc<Inner>,
}

impl ScriptedHttpSend {
    fn push(&self, status: u16, body: Value) {
        self.inner
            .script
            .lock()
            .unwrap()
            .push_back((status, body.to_string()));
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.inner.calls.lock().unwrap().clone()
    }

    fn operations(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.operation).collect()
    }
}

#[async_trait]
impl HttpSend for ScriptedHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let operation = req
            .headers()
            .get("x-amz-target")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("AWSCloud9WorkspaceManagementService."))
            .unwrap_or_default()
            .to_string();
        let authorization = req
            .headers()
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let payload_hash = req
            .headers()
            .get("x-amz-content-sha256")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = serde_json::from_slice(req.body()).unwrap_or(Value::Null);

        self.inner.calls.lock().unwrap().push(RecordedCall {
            operation,
            authorization,
            payload_hash,
            body,
        });

        let (status, body) = self
            .inner
            .script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::unexpected("scripted transport is out of responses"))?;

        Ok(http::Response::builder()
            .status(status)
            .body(Bytes::from(body))
            .unwrap())
    }
}

fn scripted_client() -> (Cloud9Client, ScriptedHttpSend) {
    let _ = env_logger::builder().is_test(true).try_init();

    let transport = ScriptedHttpSend::default();
    let ctx = Context::new().with_http_send(transport.clone());
    let client = Cloud9Client::new(
        ctx,
        Credential::new("access_key_id", "secret_access_key"),
        REGION,
    )
    .expect("client must build");
    (client, transport)
}

fn environment_ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("env-{i:04}")).collect()
}

fn base_description(id: &str) -> Value {
    json!({
        "id": id,
        "arn": format!("arn:aws:cloud9:eu-west-3:123456789012:environment:{id}"),
        "name": format!("name-{id}"),
        "description": "a dev box",
    })
}

fn remote_body() -> Value {
    json!({
        "remote": {
            "host": "dev.example.com",
            "loginName": "ubuntu",
            "port": 22,
            "environmentPath": "~/environment",
            "nodePath": "/usr/bin/node",
            "bastionHost": "bastion.example.com",
        }
    })
}

fn push_enrichment(transport: &ScriptedHttpSend) {
    transport.push(200, remote_body());
    transport.push(200, json!({"Tags": [{"Key": "env", "Value": "prod"}]}));
}

#[tokio::test]
async fn test_resolve_merges_all_three_sources() {
    let (client, transport) = scripted_client();
    let ids = environment_ids(1);

    transport.push(200, json!({"environments": [base_description(&ids[0])]}));
    push_enrichment(&transport);

    let environments = client.resolve(&ids).await.expect("resolve must succeed");
    assert_eq!(environments.len(), 1);

    let env = &environments[0];
    assert_eq!(env.id, "env-0000");
    assert_eq!(env.name, "name-env-0000");
    assert_eq!(env.description, "a dev box");
    assert_eq!(env.remote.hostname, "dev.example.com");
    assert_eq!(env.remote.login_name, "ubuntu");
    assert_eq!(env.remote.port, 22);
    assert_eq!(env.remote.bastion_host.as_deref(), Some("bastion.example.com"));
    assert_eq!(env.tags.len(), 1);
    assert_eq!(env.tags.get("env").map(String::as_str), Some("prod"));
    assert!(env.memberships.is_empty());

    assert_eq!(
        transport.operations(),
        vec!["DescribeEnvironments", "DescribeSSHRemote", "ListTagsForResource"]
    );
    // The enrichment calls are addressed by id and by arn respectively.
    let calls = transport.calls();
    assert_eq!(calls[1].body, json!({"environmentId": "env-0000"}));
    assert_eq!(
        calls[2].body,
        json!({"ResourceARN": "arn:aws:cloud9:eu-west-3:123456789012:environment:env-0000"})
    );
}

#[tokio::test]
async fn test_resolve_batches_by_twenty_five() {
    // Empty describe results keep the scripts small; chunking happens
    // before any enrichment.
    for (total, chunk_sizes) in [
        (25, vec![25]),
        (26, vec![25, 1]),
        (50, vec![25, 25]),
    ] {
        let (client, transport) = scripted_client();
        let ids = environment_ids(total);
        for _ in &chunk_sizes {
            transport.push(200, json!({"environments": []}));
        }

        let environments = client.resolve(&ids).await.expect("resolve must succeed");
        assert!(environments.is_empty());

        let calls = transport.calls();
        assert_eq!(calls.len(), chunk_sizes.len(), "{total} ids");
        let sent: Vec<usize> = calls
            .iter()
            .map(|c| c.body["environmentIds"].as_array().unwrap().len())
            .collect();
        assert_eq!(sent, chunk_sizes, "{total} ids");
    }

    // Boundary ids land in the expected chunks.
    let (client, transport) = scripted_client();
    transport.push(200, json!({"environments": []}));
    transport.push(200, json!({"environments": []}));
    client
        .resolve(&environment_ids(26))
        .await
        .expect("resolve must succeed");
    let calls = transport.calls();
    assert_eq!(calls[0].body["environmentIds"][0], "env-0000");
    assert_eq!(calls[0].body["environmentIds"][24], "env-0024");
    assert_eq!(calls[1].body["environmentIds"][0], "env-0025");
}

#[tokio::test]
async fn test_resolve_empty_input_makes_no_calls() {
    let (client, transport) = scripted_client();
    let environments = client.resolve(&[]).await.expect("resolve must succeed");
    assert!(environments.is_empty());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_describe_environments_rejects_oversized_batch() {
    let (client, transport) = scripted_client();
    let err = client
        .describe_environments(&environment_ids(26))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_resolve_fails_fast_on_enrichment_error() {
    let (client, transport) = scripted_client();
    let ids = environment_ids(3);

    transport.push(
        200,
        json!({"environments": ids.iter().map(|id| base_description(id)).collect::<Vec<_>>()}),
    );
    // First environment enriches fine.
    push_enrichment(&transport);
    // Second environment's SSH-remote call fails.
    transport.push(
        400,
        json!({"__type": "ResourceNotFoundException", "message": "no such environment"}),
    );

    let err = client.resolve(&ids).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.exception_type(), Some("ResourceNotFoundException"));
    assert_eq!(err.message(), "no such environment");

    // The third environment was never touched.
    assert_eq!(
        transport.operations(),
        vec![
            "DescribeEnvironments",
            "DescribeSSHRemote",
            "ListTagsForResource",
            "DescribeSSHRemote",
        ]
    );
}

#[tokio::test]
async fn test_list_memberships_follows_continuation_tokens() {
    let (client, transport) = scripted_client();

    let membership = |arn: &str| {
        json!({
            "environmentId": "env-0000",
            "permissions": "read-only",
            "userArn": arn,
            "userId": "AIDAEXAMPLE",
        })
    };
    transport.push(
        200,
        json!({"memberships": [membership("arn:user/a")], "nextToken": "page-2"}),
    );
    transport.push(
        200,
        json!({"memberships": [membership("arn:user/b")], "nextToken": "page-3"}),
    );
    transport.push(200, json!({"memberships": [membership("arn:user/c")]}));

    let memberships = client
        .list_memberships("env-0000")
        .await
        .expect("pagination must succeed");

    assert_eq!(
        memberships.iter().map(|m| m.user_arn.as_str()).collect::<Vec<_>>(),
        vec!["arn:user/a", "arn:user/b", "arn:user/c"]
    );

    let calls = transport.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].body, json!({"environmentId": "env-0000"}));
    assert_eq!(
        calls[1].body,
        json!({"environmentId": "env-0000", "nextToken": "page-2"})
    );
    assert_eq!(
        calls[2].body,
        json!({"environmentId": "env-0000", "nextToken": "page-3"})
    );
}

#[tokio::test]
async fn test_list_memberships_page_failure_aborts() {
    let (client, transport) = scripted_client();

    transport.push(200, json!({"memberships": [], "nextToken": "page-2"}));
    transport.push(500, json!({"message": "internal failure"}));

    let err = client.list_memberships("env-0000").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unexpected);
    assert_eq!(transport.calls().len(), 2);
}

#[tokio::test]
async fn test_update_environment_issues_both_calls_verbatim() {
    let (client, transport) = scripted_client();

    let env = Environment {
        id: "env-0000".to_string(),
        arn: "arn:aws:cloud9:eu-west-3:123456789012:environment:env-0000".to_string(),
        name: "name-env-0000".to_string(),
        description: "updated description".to_string(),
        remote: SshRemote {
            hostname: "dev.example.com".to_string(),
            login_name: "ubuntu".to_string(),
            port: 22,
            environment_path: "~/environment".to_string(),
            node_path: "/usr/bin/node".to_string(),
            bastion_host: Some("bastion.example.com".to_string()),
        },
        ..Default::default()
    };

    transport.push(200, json!({}));
    transport.push(200, json!({}));

    client
        .update_environment(&env)
        .await
        .expect("update must succeed");

    assert_eq!(
        transport.operations(),
        vec!["UpdateEnvironment", "UpdateSSHRemote"]
    );
    let calls = transport.calls();
    assert_eq!(
        calls[0].body,
        json!({
            "environmentId": "env-0000",
            "name": "name-env-0000",
            "description": "updated description",
        })
    );
    assert_eq!(
        calls[1].body,
        json!({
            "environmentId": "env-0000",
            "host": "dev.example.com",
            "loginName": "ubuntu",
            "port": 22,
            "environmentPath": "~/environment",
            "nodePath": "/usr/bin/node",
            "bastionHost": "bastion.example.com",
        })
    );
}

#[tokio::test]
async fn test_update_ssh_remote_failure_surfaces_after_base_update() {
    let (client, transport) = scripted_client();

    transport.push(200, json!({}));
    transport.push(
        400,
        json!({"__type": "ValidationException", "message": "bad port"}),
    );

    let err = client
        .update_environment(&Environment::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.exception_type(), Some("ValidationException"));
    assert_eq!(transport.calls().len(), 2);
}

#[tokio::test]
async fn test_create_environment_returns_new_id() {
    let (client, transport) = scripted_client();
    transport.push(200, json!({"environmentId": "env-new"}));

    let id = client
        .create_environment(&cloud9_ssh_client::CreateEnvironmentRequest {
            name: "dev".to_string(),
            login_name: "ubuntu".to_string(),
            hostname: "dev.example.com".to_string(),
            port: 22,
            ..Default::default()
        })
        .await
        .expect("create must succeed");
    assert_eq!(id, "env-new");
    assert_eq!(transport.operations(), vec!["CreateEnvironmentSSH"]);
}

#[tokio::test]
async fn test_get_user_public_key() {
    let (client, transport) = scripted_client();
    transport.push(200, json!({"publicKey": "ssh-rsa AAAA example"}));

    let key = client.get_user_public_key().await.expect("must succeed");
    assert_eq!(key, "ssh-rsa AAAA example");
    assert_eq!(transport.calls()[0].body, json!({}));
}

#[tokio::test]
async fn test_membership_lifecycle_calls() {
    let (client, transport) = scripted_client();

    transport.push(
        200,
        json!({"membership": {
            "environmentId": "env-0000",
            "permissions": "read-write",
            "userArn": "arn:user/a",
            "userId": "AIDAEXAMPLE",
        }}),
    );
    transport.push(200, json!({}));

    let membership = client
        .create_membership("env-0000", "arn:user/a", Permissions::ReadWrite)
        .await
        .expect("create membership must succeed");
    assert_eq!(membership.permissions, Permissions::ReadWrite);

    client
        .delete_membership("env-0000", "arn:user/a")
        .await
        .expect("delete membership must succeed");

    let calls = transport.calls();
    assert_eq!(
        calls[0].body,
        json!({
            "environmentId": "env-0000",
            "userArn": "arn:user/a",
            "permissions": "read-write",
        })
    );
    assert_eq!(
        calls[1].body,
        json!({"environmentId": "env-0000", "userArn": "arn:user/a"})
    );
}

#[tokio::test]
async fn test_update_ssh_remote_direct_call() {
    let (client, transport) = scripted_client();
    transport.push(200, json!({}));

    client
        .update_ssh_remote(&UpdateSshRemoteRequest {
            environment_id: "env-0000".to_string(),
            hostname: "dev.example.com".to_string(),
            login_name: "ubuntu".to_string(),
            port: 2222,
            environment_path: "~/environment".to_string(),
            node_path: "/usr/bin/node".to_string(),
            bastion_host: None,
        })
        .await
        .expect("must succeed");

    // bastionHost is omitted when unset.
    assert!(transport.calls()[0].body.get("bastionHost").is_none());
}

#[tokio::test]
async fn test_every_call_is_signed_and_hashes_its_body() {
    let (client, transport) = scripted_client();
    let ids = environment_ids(1);

    transport.push(200, json!({"environments": [base_description(&ids[0])]}));
    push_enrichment(&transport);

    client.resolve(&ids).await.expect("resolve must succeed");

    for call in transport.calls() {
        assert!(
            call.authorization
                .starts_with("AWS4-HMAC-SHA256 Credential=access_key_id/"),
            "call {} is unsigned",
            call.operation
        );
        assert!(
            call.authorization.contains("/eu-west-3/cloud9/aws4_request"),
            "call {} has the wrong scope",
            call.operation
        );
        let sent = cloud9_ssh_core::hash::hex_sha256(call.body.to_string().as_bytes());
        assert_eq!(call.payload_hash, sent, "call {} hash mismatch", call.operation);
    }
}

#[tokio::test]
async fn test_empty_success_body_reads_as_empty_object() {
    let (client, transport) = scripted_client();
    transport
        .inner
        .script
        .lock()
        .unwrap()
        .push_back((200, String::new()));

    client
        .delete_environment("env-0000")
        .await
        .expect("empty body must parse");
}

#[tokio::test]
async fn test_malformed_error_body_is_unexpected() {
    let (client, transport) = scripted_client();
    transport
        .inner
        .script
        .lock()
        .unwrap()
        .push_back((400, "<html>not json</html>".to_string()));

    let err = client.delete_environment("env-0000").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unexpected);
}
