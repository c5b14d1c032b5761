use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use dashboard_core::catalog::{service, SERVICES};
use dashboard_engine::{
    check_service, probe_all, probe_with_retry, EndpointMode, EngineEvent, EventSink,
    HealthEndpoints, HealthProbe, HealthSettings, ProbeError, ReqwestHealthProbe, RetryPolicy,
};
use pretty_assertions::assert_eq;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FAST_RETRY: RetryPolicy = RetryPolicy {
    max_attempts: 3,
    backoff_step: Duration::from_millis(10),
};

fn probe() -> ReqwestHealthProbe {
    ReqwestHealthProbe::new(HealthSettings {
        retry: FAST_RETRY,
        ..HealthSettings::default()
    })
}

fn health_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/health", server.uri())).unwrap()
}

#[derive(Default)]
struct TestSink {
    events: Mutex<Vec<EngineEvent>>,
}

impl TestSink {
    fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Answers from the port: only the listed ports are up.
struct PortProbe {
    online_ports: Vec<u16>,
    calls: Mutex<Vec<Url>>,
}

#[async_trait]
impl HealthProbe for PortProbe {
    async fn probe(&self, url: &Url) -> Result<(), ProbeError> {
        self.calls.lock().unwrap().push(url.clone());
        match url.port() {
            Some(port) if self.online_ports.contains(&port) => Ok(()),
            _ => Err(ProbeError::Network("connection refused".to_string())),
        }
    }
}

#[tokio::test]
async fn json_response_is_healthy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let result = probe_with_retry(&probe(), &health_url(&server), FAST_RETRY).await;
    assert_eq!(result, Ok(()));
}

#[tokio::test]
async fn server_error_is_retried_until_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let result = probe_with_retry(&probe(), &health_url(&server), FAST_RETRY).await;
    assert_eq!(result, Err(ProbeError::HttpStatus(500)));
}

#[tokio::test]
async fn non_json_body_fails_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let result = probe_with_retry(&probe(), &health_url(&server), FAST_RETRY).await;
    assert!(matches!(result, Err(ProbeError::InvalidBody(_))));
}

#[tokio::test]
async fn transient_failure_recovers_on_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let result = probe_with_retry(&probe(), &health_url(&server), FAST_RETRY).await;
    assert_eq!(result, Ok(()));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    let body = format!("\"{}\"", "x".repeat(70 * 1024));
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let result = probe_with_retry(&probe(), &health_url(&server), FAST_RETRY).await;
    assert_eq!(result, Err(ProbeError::TooLarge { max_bytes: 64 * 1024 }));
}

#[tokio::test]
async fn shared_gateway_marks_every_service_from_one_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .expect(3)
        .mount(&server)
        .await;
    let endpoints = HealthEndpoints {
        gateway: server.uri(),
        mode: EndpointMode::SharedGateway,
    };

    let sink = TestSink::default();
    probe_all(&probe(), &endpoints, FAST_RETRY, &sink).await;

    assert_eq!(
        sink.take(),
        SERVICES
            .iter()
            .map(|service| EngineEvent::HealthProbed {
                service: service.key,
                online: true,
            })
            .collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn per_service_mode_reports_each_port_in_catalog_order() {
    let probe = PortProbe {
        online_ports: vec![3000],
        calls: Mutex::new(Vec::new()),
    };
    let endpoints = HealthEndpoints {
        gateway: "http://localhost:8000".to_string(),
        mode: EndpointMode::PerServicePort,
    };

    let sink = TestSink::default();
    probe_all(&probe, &endpoints, FAST_RETRY, &sink).await;

    assert_eq!(
        sink.take(),
        vec![
            EngineEvent::HealthProbed {
                service: "graphiti",
                online: false,
            },
            EngineEvent::HealthProbed {
                service: "fastgpt",
                online: true,
            },
            EngineEvent::HealthProbed {
                service: "danswer",
                online: false,
            },
        ]
    );
    // Two offline services, three attempts each, plus one success.
    assert_eq!(probe.calls.lock().unwrap().len(), 7);
}

#[tokio::test]
async fn unreachable_gateway_is_offline() {
    let probe = Arc::new(probe());
    let endpoints = HealthEndpoints {
        gateway: "http://127.0.0.1:9".to_string(),
        mode: EndpointMode::SharedGateway,
    };
    let graphiti = service("graphiti").unwrap();

    assert!(!check_service(probe.as_ref(), &endpoints, graphiti, FAST_RETRY).await);
}

#[test]
fn endpoint_urls_follow_the_mode() {
    let graphiti = service("graphiti").unwrap();
    let shared = HealthEndpoints::default();
    assert_eq!(
        shared.url_for(graphiti).unwrap().as_str(),
        "http://localhost:8000/health"
    );

    let per_service = HealthEndpoints {
        gateway: "http://localhost:8000/".to_string(),
        mode: EndpointMode::PerServicePort,
    };
    assert_eq!(
        per_service.url_for(graphiti).unwrap().as_str(),
        "http://localhost:8001/health"
    );

    let prefixed = HealthEndpoints {
        gateway: "http://gateway.local/api/".to_string(),
        mode: EndpointMode::SharedGateway,
    };
    assert_eq!(
        prefixed.url_for(graphiti).unwrap().as_str(),
        "http://gateway.local/api/health"
    );

    let broken = HealthEndpoints {
        gateway: "not a url".to_string(),
        mode: EndpointMode::SharedGateway,
    };
    assert!(matches!(
        broken.url_for(graphiti),
        Err(ProbeError::InvalidUrl(_))
    ));
}

#[test]
fn default_policy_is_three_attempts_with_linear_backoff() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_attempts, 3);
    assert_eq!(policy.backoff_step, Duration::from_secs(1));
    assert!(ProbeError::Timeout.is_retryable());
    assert!(!ProbeError::InvalidBody("eof".to_string()).is_retryable());
}
