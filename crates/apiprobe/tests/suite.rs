//! End-to-end runner tests against a mock service.

use apiprobe::{render, OutputFormat, RunError, RunnerConfig, SuiteRunner};
use apiprobe_core::{Category, CoreError, Verdict};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fixture directories on disk, kept alive for the test's duration.
struct Fixtures {
    payloads: TempDir,
    responses: TempDir,
}

impl Fixtures {
    fn new() -> Self {
        Self {
            payloads: TempDir::new().expect("Failed to create temp directory"),
            responses: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    fn write(
        &self,
        category: Category,
        payloads: serde_json::Value,
        responses: serde_json::Value,
    ) {
        std::fs::write(
            self.payloads.path().join(category.payload_file_name()),
            payloads.to_string(),
        )
        .unwrap();
        std::fs::write(
            self.responses.path().join(category.response_file_name()),
            responses.to_string(),
        )
        .unwrap();
    }

    fn config(&self, base_url: &str) -> RunnerConfig {
        RunnerConfig::new()
            .with_base_url(base_url)
            .with_payloads_dir(self.payloads.path())
            .with_responses_dir(self.responses.path())
            .with_timeout(5)
    }
}

async fn mount_user_service(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/user"))
        .and(body_json(json!({
            "command": "create", "id": 1000, "username": "tester",
            "email": "t@example.com", "password": "pw"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1000, "username": "tester", "email": "t@example.com"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1000, "username": "tester", "email": "t@example.com"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/9999"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn user_category_passes_and_fails_per_case() {
    let server = MockServer::start().await;
    mount_user_service(&server).await;

    let fixtures = Fixtures::new();
    fixtures.write(
        Category::User,
        json!({
            "user_create_1": {
                "command": "create", "id": 1000, "username": "tester",
                "email": "t@example.com", "password": "pw"
            },
            "user_get_1": {"id": 1000},
            "user_get_missing": {"id": 9999},
            "user_get_wrong": {"id": 1000}
        }),
        json!({
            "user_create_1": {"username": "tester", "email": "t@example.com"},
            "user_get_1": {"id": 1000, "username": "tester", "email": "t@example.com"},
            "user_get_missing": {},
            "user_get_wrong": {"id": 1000, "username": "someone-else", "email": "t@example.com"}
        }),
    );

    let runner =
        SuiteRunner::new(fixtures.config(&server.uri()).with_categories([Category::User]))
            .unwrap();
    let report = runner.run().await.unwrap();

    let users = &report.categories[0];
    let verdicts: Vec<_> = users
        .outcomes
        .iter()
        .map(|o| (o.name.as_str(), o.verdict))
        .collect();
    assert_eq!(
        verdicts,
        [
            ("user_create_1", Verdict::Pass),
            ("user_get_1", Verdict::Pass),
            ("user_get_missing", Verdict::Pass),
            ("user_get_wrong", Verdict::Fail),
        ]
    );

    let wrong = &users.outcomes[3];
    assert_eq!(wrong.status, Some(200));
    assert_eq!(wrong.differences.len(), 1);
    assert_eq!(users.outcomes[2].status, Some(404));
    assert!(!report.success());
}

#[tokio::test]
async fn orders_are_always_posted() {
    let server = MockServer::start().await;
    let payload = json!({"command": "place order", "product_id": 1, "user_id": 2, "quantity": 3});
    Mock::given(method("POST"))
        .and(path("/order"))
        .and(body_json(payload.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 48213, "product_id": 1, "user_id": 2, "quantity": 3, "status": "Success"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fixtures = Fixtures::new();
    fixtures.write(
        Category::Order,
        json!({"order_get_placed": payload}),
        json!({"order_get_placed": {
            "product_id": 1, "user_id": 2, "quantity": 3, "status": "Success"
        }}),
    );

    let runner =
        SuiteRunner::new(fixtures.config(&server.uri()).with_categories([Category::Order]))
            .unwrap();
    let report = runner.run().await.unwrap();

    assert!(report.success());
    assert_eq!(report.total(), 1);
}

#[tokio::test]
async fn exact_comparison_fails_on_server_assigned_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/product"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "name": "pen"})))
        .mount(&server)
        .await;

    let fixtures = Fixtures::new();
    fixtures.write(
        Category::Product,
        json!({"product_create_1": {"command": "create", "name": "pen"}}),
        json!({"product_create_1": {"name": "pen"}}),
    );

    let config = fixtures
        .config(&server.uri())
        .with_categories([Category::Product])
        .with_ignore_fields(Vec::<String>::new());
    let report = SuiteRunner::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.failed(), 1);
}

#[tokio::test]
async fn lookup_without_id_is_an_error_and_run_continues() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/product"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let fixtures = Fixtures::new();
    fixtures.write(
        Category::Product,
        json!({
            "product_get_no_id": {"name": "pen"},
            "product_delete_1": {"command": "delete", "id": 1}
        }),
        json!({
            "product_get_no_id": {},
            "product_delete_1": {}
        }),
    );

    let runner =
        SuiteRunner::new(fixtures.config(&server.uri()).with_categories([Category::Product]))
            .unwrap();
    let report = runner.run().await.unwrap();

    let outcomes = &report.categories[0].outcomes;
    assert_eq!(outcomes[0].verdict, Verdict::Error);
    assert!(outcomes[0].error.as_deref().unwrap().contains("no usable id"));
    assert_eq!(outcomes[1].verdict, Verdict::Pass);
}

#[tokio::test]
async fn unreachable_server_marks_cases_as_errors() {
    let fixtures = Fixtures::new();
    fixtures.write(
        Category::User,
        json!({"user_create_1": {"command": "create", "id": 1}}),
        json!({"user_create_1": {}}),
    );

    let config = fixtures
        .config("http://127.0.0.1:1")
        .with_categories([Category::User]);
    let report = SuiteRunner::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.errored(), 1);
    assert!(!report.success());
}

#[tokio::test]
async fn missing_fixture_file_aborts_run() {
    let server = MockServer::start().await;
    let fixtures = Fixtures::new();
    fixtures.write(Category::User, json!({}), json!({}));

    let runner = SuiteRunner::new(fixtures.config(&server.uri())).unwrap();
    let err = runner.run().await.unwrap_err();

    match err {
        RunError::Fixtures(CoreError::Io { path, .. }) => {
            assert!(path.ends_with("product_testcases.json"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn missing_fixture_file_aborts_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(0)
        .mount(&server)
        .await;

    let fixtures = Fixtures::new();
    fixtures.write(
        Category::User,
        json!({"user_create_1": {"command": "create", "id": 1}}),
        json!({"user_create_1": {}}),
    );

    let config = fixtures
        .config(&server.uri())
        .with_categories([Category::User, Category::Product]);
    let err = SuiteRunner::new(config).unwrap().run().await.unwrap_err();

    assert!(matches!(err, RunError::Fixtures(CoreError::Io { .. })));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn categories_run_in_configured_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let fixtures = Fixtures::new();
    for category in Category::ALL {
        let name = format!("{category}_1");
        let mut payloads = serde_json::Map::new();
        payloads.insert(name.clone(), json!({"command": "noop"}));
        let mut responses = serde_json::Map::new();
        responses.insert(name, json!({}));

        fixtures.write(category, payloads.into(), responses.into());
    }

    let report = SuiteRunner::new(fixtures.config(&server.uri()))
        .unwrap()
        .run()
        .await
        .unwrap();

    let order: Vec<_> = report.categories.iter().map(|c| c.category).collect();
    assert_eq!(order, Category::ALL.to_vec());
    assert!(report.success());

    let mut out = Vec::new();
    render(&report, OutputFormat::Text, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("--- Running USER Tests ---\n[PASS] user_1"));
    assert!(text.ends_with("3 passed, 0 failed, 0 errored (3 total)\n"));
}
