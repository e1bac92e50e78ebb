use order_relay::clients::{MenuSource, SubmitError};
use order_relay::framework::mock::MockTransport;
use order_relay::framework::{RetryPolicy, TransportError};
use order_relay::lifecycle::{Config, OrderPipeline, PipelineError};
use order_relay::mapping::{BuildError, OrderBatchBuilder, RecordPolicy};
use order_relay::markup;
use order_relay::model::{DishId, MenuIndex, OrderBatch};
use serde_json::json;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn config() -> Config {
    Config {
        base_url: "http://api.test".to_string(),
        api_key: Some("123456".to_string()),
        retry: RetryPolicy::none(),
        snapshot_path: fixture("menu.json"),
        ..Config::default()
    }
}

fn live_menu() -> serde_json::Value {
    json!({"dishes": [
        {"name": "Pizza Quattro Formaggi", "id": 107},
        {"name": "Lasagne", "id": 112},
        {"name": "Tiramisu", "id": 131}
    ]})
}

fn sent_batch(mock: &MockTransport) -> OrderBatch {
    let requests = mock.requests();
    let post = requests.last().expect("a submitted request");
    serde_json::from_slice(post.body.as_deref().expect("a request body")).unwrap()
}

/// Full run against a mocked provider: live menu, two employees, one bulk post.
#[tokio::test]
async fn test_full_pipeline_with_live_menu() {
    let mut mock = MockTransport::new();
    mock.expect_get("v1/menu").return_json(200, &live_menu());
    mock.expect_post("v1/bulk/order")
        .return_json(201, &json!({"status": "accepted"}));

    let pipeline = OrderPipeline::new(&config(), mock.transport());
    let receipt = pipeline.run_file(&fixture("employee.xml")).await.unwrap();

    assert_eq!(receipt.status, 201);
    assert_eq!(receipt.body, json!({"status": "accepted"}));

    let batch = sent_batch(&mock);
    assert_eq!(batch.orders.len(), 2);
    assert_eq!(batch.orders[0].customer.full_name, "Employee A");
    assert_eq!(batch.orders[0].dishes[0].dish_id, DishId::Number(107));
    assert_eq!(batch.orders[0].dishes[0].amount, 3);

    // Second employee orders two comma-separated dishes, in source order
    let dishes: Vec<_> = batch.orders[1]
        .dishes
        .iter()
        .map(|d| (d.dish_id.clone(), d.amount))
        .collect();
    assert_eq!(
        dishes,
        vec![(DishId::Number(112), 1), (DishId::Number(131), 2)]
    );

    // Nested and flat address shapes end up identical in structure
    assert_eq!(batch.orders[0].customer.address.city, "Musterhausen");
    assert_eq!(batch.orders[1].customer.address.street, "Musterweg 5");

    let requests = mock.requests();
    assert!(requests.iter().all(|r| r.header("token") == Some("123456")));
    mock.verify();
}

/// The live menu is unreachable; the snapshot still yields a valid batch.
#[tokio::test]
async fn test_pipeline_falls_back_to_snapshot() {
    let mut mock = MockTransport::new();
    mock.expect_get("menu")
        .return_err(TransportError::Connect("connection refused".to_string()));

    let pipeline = OrderPipeline::new(&config(), mock.transport());
    let raw = std::fs::read_to_string(fixture("employee.xml")).unwrap();

    let prepared = pipeline.prepare(&raw).await.unwrap();
    assert_eq!(prepared.menu_source, MenuSource::Snapshot);

    let batch = prepared.build.batch;
    assert_eq!(batch.orders.len(), 2);
    assert_eq!(batch.orders[0].dishes[0].dish_id, DishId::Number(7));
    assert_eq!(batch.orders[1].dishes[1].dish_id, DishId::Number(31));
    mock.verify();
}

/// Fallback end to end: menu fetch fails, submission still goes out.
#[tokio::test]
async fn test_run_submits_batch_built_from_snapshot() {
    let mut mock = MockTransport::new();
    mock.expect_get("menu").return_status(503, "Service Unavailable");
    mock.expect_post("bulk/order").return_status(200, "");

    let pipeline = OrderPipeline::new(&config(), mock.transport());
    let receipt = pipeline.run_file(&fixture("employee.xml")).await.unwrap();

    assert_eq!(receipt.status, 200);
    assert_eq!(sent_batch(&mock).orders[1].dishes.len(), 2);
    mock.verify();
}

/// Neither live menu nor snapshot: no batch, nothing submitted.
#[tokio::test]
async fn test_pipeline_fails_without_any_menu() {
    let mut mock = MockTransport::new();
    mock.expect_get("menu")
        .return_err(TransportError::Timeout("deadline elapsed".to_string()));

    let config = Config {
        snapshot_path: fixture("does-not-exist.json"),
        ..config()
    };
    let pipeline = OrderPipeline::new(&config, mock.transport());
    let result = pipeline.run_file(&fixture("employee.xml")).await;

    let e = result.unwrap_err();
    assert!(matches!(e, PipelineError::Menu(_)));
    assert_eq!(e.kind(), "menu_unavailable");
    assert_eq!(mock.requests().len(), 1, "no order may be submitted");
    mock.verify();
}

/// Malformed markup aborts the run before any network traffic.
#[tokio::test]
async fn test_malformed_markup_aborts_before_network() {
    let mock = MockTransport::new();
    let pipeline = OrderPipeline::new(&config(), mock.transport());

    let result = pipeline
        .run("<Employees><Employee><Name>A</Name></Employees>")
        .await;

    assert!(matches!(result, Err(PipelineError::Markup(_))));
    assert!(mock.requests().is_empty());
}

/// A rejected submission is reported with its status, never as success.
#[tokio::test]
async fn test_rejected_submission_after_retries() {
    let mut mock = MockTransport::new();
    mock.expect_get("menu").return_json(200, &live_menu());
    mock.expect_post("bulk/order").return_status(502, "Bad Gateway");
    mock.expect_post("bulk/order").return_status(502, "Bad Gateway");

    let config = Config {
        retry: RetryPolicy {
            max_retries: 1,
            backoff_factor: 0.0,
            retry_statuses: vec![502],
        },
        ..config()
    };
    let pipeline = OrderPipeline::new(&config, mock.transport());
    let result = pipeline.run_file(&fixture("employee.xml")).await;

    let e = result.unwrap_err();
    assert_eq!(e.kind(), "rejected");
    assert_eq!(e.status(), Some(502));
    assert!(matches!(
        e,
        PipelineError::Submit(SubmitError::Rejected { status: 502, .. })
    ));
    mock.verify();
}

/// An unknown dish fails the run under the default policy and is left out
/// under the skip policy.
#[tokio::test]
async fn test_record_policy_applies_to_whole_run() {
    let raw = "<Employees>\
        <Employee><Name>A</Name><Street>S</Street><City>C</City><PostalCode>1</PostalCode>\
          <Order>1x Sushi</Order></Employee>\
        <Employee><Name>B</Name><Street>S</Street><City>C</City><PostalCode>1</PostalCode>\
          <Order>1x Lasagne</Order></Employee>\
        </Employees>";

    let mut mock = MockTransport::new();
    mock.expect_get("menu").return_json(200, &live_menu());
    let pipeline = OrderPipeline::new(&config(), mock.transport());
    let result = pipeline.run(raw).await;
    assert!(matches!(
        result,
        Err(PipelineError::Build(BuildError::Record { index: 0, .. }))
    ));
    mock.verify();

    let mut mock = MockTransport::new();
    mock.expect_get("menu").return_json(200, &live_menu());
    mock.expect_post("bulk/order").return_status(201, "");
    let config = Config {
        record_policy: RecordPolicy::Skip,
        ..config()
    };
    let pipeline = OrderPipeline::new(&config, mock.transport());
    pipeline.run(raw).await.unwrap();

    let batch = sent_batch(&mock);
    assert_eq!(batch.orders.len(), 1);
    assert_eq!(batch.orders[0].customer.full_name, "B");
    mock.verify();
}

/// For any number of employees, parse + build yields one order per employee,
/// in document order.
#[test]
fn test_orders_match_employee_count() {
    let menu: MenuIndex = [("Pizza".to_string(), DishId::Number(1))]
        .into_iter()
        .collect();

    for count in 1..=5 {
        let employees: String = (0..count)
            .map(|i| {
                format!(
                    "<Employee><Name>E{i}</Name><Street>S</Street><City>C</City>\
                     <PostalCode>1</PostalCode><Order>{}x Pizza</Order></Employee>",
                    i + 1
                )
            })
            .collect();
        let document = markup::parse(&format!("<Employees>{employees}</Employees>")).unwrap();

        let build = OrderBatchBuilder::default()
            .build_document(&document, &menu)
            .unwrap();

        assert_eq!(build.batch.orders.len(), count);
        for (i, order) in build.batch.orders.iter().enumerate() {
            assert_eq!(order.customer.full_name, format!("E{i}"));
            assert_eq!(order.dishes[0].amount, i as u32 + 1);
        }
    }
}

/// Order cardinality: the same pipeline accepts the single-dish reading
/// (one line per employee) and the multi-dish reading (comma-separated).
#[test]
fn test_single_and_multi_dish_readings() {
    let menu: MenuIndex = [
        ("Pizza".to_string(), DishId::Number(1)),
        ("Salat".to_string(), DishId::Number(2)),
    ]
    .into_iter()
    .collect();
    let document = markup::parse(
        "<Employees>\
         <Employee><Name>Single</Name><Street>S</Street><City>C</City><PostalCode>1</PostalCode>\
           <Order>2x Pizza</Order></Employee>\
         <Employee><Name>Multi</Name><Street>S</Street><City>C</City><PostalCode>1</PostalCode>\
           <Order>2x Pizza, 1x Salat</Order></Employee>\
         </Employees>",
    )
    .unwrap();

    let batch = OrderBatchBuilder::default()
        .build_document(&document, &menu)
        .unwrap()
        .batch;

    assert_eq!(batch.orders[0].dishes.len(), 1);
    assert_eq!(batch.orders[1].dishes.len(), 2);
    assert_eq!(batch.orders[1].dishes[1].dish_id, DishId::Number(2));
}
