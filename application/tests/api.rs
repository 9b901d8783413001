//! Tests of the REST API against a real PostgreSQL server.

use std::time::Duration;

use application::{router, Service};
use axum::{
    body::{self, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use service::infra::{
    postgres::{self, Config},
    Postgres,
};
use testcontainers::{
    core::WaitFor, runners::AsyncRunner as _, ContainerAsync, GenericImage,
};
use tower::ServiceExt as _;

postgres::embed_migrations!("../migrations");

/// API [`Router`] backed by a disposable PostgreSQL container.
struct Harness {
    /// Container running PostgreSQL, stopped once dropped.
    _container: ContainerAsync<GenericImage>,

    /// [`Router`] connected to the container.
    app: Router,
}

impl Harness {
    async fn start() -> Self {
        let container = GenericImage::new("postgres", "16-alpine")
            .with_env_var("POSTGRES_PASSWORD", "postgres")
            .with_exposed_port(5432)
            .with_wait_for(WaitFor::message_on_stderr(
                "database system is ready to accept connections",
            ))
            .start()
            .await;
        let port = container.get_host_port_ipv4(5432).await;

        let mut postgres = Postgres::new(&Config {
            host: Some("127.0.0.1".into()),
            port: Some(port),
            user: Some("postgres".into()),
            password: Some("postgres".into()),
            dbname: Some("postgres".into()),
            ..Config::default()
        })
        .unwrap();

        // The server restarts once after the initialization, so the first
        // connections may be refused.
        let mut attempts = 0;
        while let Err(e) = migrations::runner().run_async(&mut postgres).await
        {
            attempts += 1;
            assert!(attempts < 30, "failed to run migrations: {e}");
            tokio::time::sleep(Duration::from_millis(500)).await;
        }

        Self {
            _container: container,
            app: router(Service::new(postgres)),
        }
    }

    /// Sends a request and returns the response status with its JSON body,
    /// or [`Value::Null`] if the body is empty.
    async fn call(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let resp = self.app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn created_party_is_retrieved_by_id() {
    let api = Harness::start().await;

    let (status, created) = api
        .call(
            Method::POST,
            "/api/v1/parties",
            Some(json!({"partyTypeId": 3, "name": "Kenya"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["partyTypeId"], 3);
    assert_eq!(created["name"], "Kenya");
    assert_eq!(created["version"], 1);

    let id = created["id"].as_i64().unwrap();
    let (status, retrieved) = api
        .call(Method::GET, &format!("/api/v1/parties/ids/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(retrieved, created);

    let (status, body) =
        api.call(Method::GET, "/api/v1/parties/ids/0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn update_is_version_checked() {
    let api = Harness::start().await;

    let (_, created) = api
        .call(
            Method::POST,
            "/api/v1/cover_types",
            Some(json!({"code": "FL", "description": "Forest land"})),
        )
        .await;
    let uri = format!("/api/v1/cover_types/ids/{}", created["id"]);

    let (status, updated) = api
        .call(
            Method::PUT,
            &uri,
            Some(json!({
                "code": "FL",
                "description": "Forest",
                "version": 1,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], "Forest");
    assert_eq!(updated["version"], 2);

    let (status, body) = api
        .call(
            Method::PUT,
            &uri,
            Some(json!({"description": "Woods", "version": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "VERSION_MISMATCH");

    let (status, body) = api
        .call(
            Method::PUT,
            "/api/v1/cover_types/ids/0",
            Some(json!({"description": "Woods", "version": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn filtered_records_are_listed_and_deleted() {
    let api = Harness::start().await;

    let mut ids = vec![];
    for type_id in [5, 6, 5] {
        let (status, created) = api
            .call(
                Method::POST,
                "/api/v1/accountability_rules",
                Some(json!({"accountabilityTypeId": type_id})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(created["id"].as_i64().unwrap());
    }

    let (status, listed) = api
        .call(
            Method::GET,
            "/api/v1/accountability_rules?accountabilityTypeId=5",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let listed_ids = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(listed_ids, [ids[0], ids[2]]);

    let by_id = format!("/api/v1/accountability_rules/ids/{}", ids[1]);
    for _ in 0..2 {
        let (status, _) = api.call(Method::DELETE, &by_id, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
    let (status, _) = api.call(Method::GET, &by_id, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = api
        .call(
            Method::DELETE,
            "/api/v1/accountability_rules?accountabilityTypeId=5",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, listed) =
        api.call(Method::GET, "/api/v1/accountability_rules", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));
}
