use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum_test::TestServer;
use uuid::Uuid;

use crate::{
  api::{self, AppState, config::Config},
  tests::{engine, log_writer::LogBuffer, state},
  trace::{build_prometheus, init_tracing},
};

fn protected() -> Config {
  Config {
    api_key: Some("myapikey".into()),
    ..Default::default()
  }
}

#[tokio::test]
async fn api_invalid_credentials() {
  let server = TestServer::new(api::router(state(protected(), engine())));
  let response = server.get("/similarity/bf_0").await;

  assert_eq!(response.status_code(), 401);

  response.assert_text_contains("invalid credentials");

  let response = server.get("/references/bf_0").add_header(AUTHORIZATION, "Bearer invalidkey").await;

  assert_eq!(response.status_code(), 401);

  response.assert_text_contains("invalid credentials");
}

#[tokio::test]
async fn api_valid_credentials() {
  let server = TestServer::new(api::router(state(protected(), engine())));
  let response = server.get("/similarity/bf_0").add_header(AUTHORIZATION, "Bearer myapikey").await;

  assert_eq!(response.status_code(), 200);

  let response = server.post("/similarity/bf_0").add_header(AUTHORIZATION, "Bearer myapikey").await;

  assert_eq!(response.status_code(), 415);
}

#[tokio::test]
async fn probes_skip_authentication() {
  let server = TestServer::new(api::router(state(protected(), engine())));

  assert_eq!(server.get("/healthz").await.status_code(), 200);
  assert_eq!(server.get("/readyz").await.status_code(), 200);
}

#[tokio::test]
async fn request_id_is_propagated() {
  let server = TestServer::new(api::router(state(Config::default(), engine())));
  let response = server.get("/healthz").add_header("x-request-id", "0af76519-16cd-43dd-8448-eb211c80319c").await;

  assert_eq!(response.header("x-request-id"), "0af76519-16cd-43dd-8448-eb211c80319c");

  let response = server.get("/healthz").add_header("x-request-id", "not-a-uuid").await;
  let generated = response.header("x-request-id");

  assert!(Uuid::parse_str(generated.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn logging() {
  let logs = LogBuffer::default();
  let config = Config::default();
  let guards = init_tracing(&config, logs.clone());

  let server = TestServer::new(api::router(state(config, engine())));
  let _ = server.get("/similarity/bf_0").add_query_param("limit", 2).await;

  drop(guards);

  let lines = logs.lines();
  let line = lines.iter().find(|line| line.contains("GET http://localhost/similarity/bf_0?limit=2")).unwrap();

  assert!(line.contains(r#"remote="-" method=GET path="/similarity/bf_0" status=200"#));
  assert!(line.contains(r#"reference_id="bf_0" candidates=3 returned=2"#));
  assert!(line.contains("request_id="));
}

#[tokio::test]
async fn metrics() {
  let state = AppState {
    config: Config {
      enable_prometheus: true,
      ..Default::default()
    },
    prometheus: Some(build_prometheus().unwrap()),
    engine: Arc::new(engine()),
  };

  let server = TestServer::new(api::router(state));
  let _ = server.get("/similarity/bf_0").await;
  let _ = server.get("/similarity/bf_1").await;
  let resp = server.get("/metrics").await;
  let text = resp.text();

  let requests = |status: &str| {
    text
      .lines()
      .any(|line| line.starts_with("http_requests_total{") && line.contains(r#"route="/similarity/{id}""#) && line.contains(&format!(r#"status="{status}""#)))
  };

  assert!(requests("200"));
  assert!(requests("404"));
  assert!(text.contains("http_request_duration_seconds_bucket"));
  assert!(text.contains("brownfield_scoring_scores"));
}
