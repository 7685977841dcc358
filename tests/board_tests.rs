// Board flows driven through the client against a scripted backend:
// poll, optimistic confirm, reconciling refetch, failure paths.

use brasa::api::ApiClient;
use brasa::board::OrdersBoard;
use brasa::config::Config;
use brasa::models::Stage;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    let config = Config {
        base_url: server.uri(),
        ..Config::default()
    };
    ApiClient::new(config).unwrap()
}

fn cooking_order(id: &str) -> serde_json::Value {
    json!({
        "orderId": id,
        "customerId": "c-1",
        "status": "IN_PROGRESS",
        "createdAt": "2024-06-01T12:00:00Z",
        "etapas": [
            {"stepName": "COOKING", "status": "IN_PROGRESS", "startedAt": "2024-06-01T12:00:00Z", "finishedAt": null}
        ],
        "items": [{"productId": "pollo_1_2", "price": "45.90", "qty": "1"}],
        "total": 45.9
    })
}

#[tokio::test]
async fn poll_fills_the_board_and_infers_stages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/pedidos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pedidos": [cooking_order("ord-1")],
            "total": 1
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut board = OrdersBoard::new();

    let ticket = board.begin_fetch();
    let page = client.fetch_active_orders().await.unwrap();
    assert!(board.apply_fetch(ticket, page.pedidos));

    assert_eq!(board.len(), 1);
    assert_eq!(board.stage_for("ord-1"), Some(Stage::Cooking));
}

#[tokio::test]
async fn failed_poll_keeps_the_previous_board() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/pedidos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pedidos": [cooking_order("ord-1")],
            "total": 1
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dashboard/pedidos"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut board = OrdersBoard::new();

    let ticket = board.begin_fetch();
    let page = client.fetch_active_orders().await.unwrap();
    board.apply_fetch(ticket, page.pedidos);

    // Second poll fails: nothing is applied, the board stays intact
    let _ticket = board.begin_fetch();
    assert!(client.fetch_active_orders().await.is_err());
    assert_eq!(board.len(), 1);
    assert_eq!(board.orders()[0].order_id, "ord-1");
}

#[tokio::test]
async fn confirm_patches_locally_then_reconciles() {
    let server = MockServer::start().await;
    // First poll: cooking in progress. Later polls: backend has moved on.
    Mock::given(method("GET"))
        .and(path("/dashboard/pedidos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pedidos": [cooking_order("ord-1")],
            "total": 1
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dashboard/pedidos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pedidos": [{
                "orderId": "ord-1",
                "customerId": "c-1",
                "status": "IN_PROGRESS",
                "createdAt": "2024-06-01T12:00:00Z",
                "etapas": [
                    {"stepName": "COOKING", "status": "DONE", "startedAt": "2024-06-01T12:00:00Z", "finishedAt": "2024-06-01T12:14:00Z"},
                    {"stepName": "PACKAGING", "status": "IN_PROGRESS", "startedAt": "2024-06-01T12:14:00Z", "finishedAt": null}
                ]
            }],
            "total": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/orders/ord-1/confirm-stage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut board = OrdersBoard::new();

    let ticket = board.begin_fetch();
    let page = client.fetch_active_orders().await.unwrap();
    board.apply_fetch(ticket, page.pedidos);
    assert_eq!(board.stage_for("ord-1"), Some(Stage::Cooking));

    // Confirm with the per-order gate held for the duration of the call
    assert!(board.begin_confirm("ord-1"));
    assert!(!board.begin_confirm("ord-1"));
    client.confirm_stage("ord-1", Stage::Cooking).await.unwrap();
    board.apply_confirmation("ord-1", Stage::Cooking);
    board.finish_confirm("ord-1");

    // Optimistic echo: the card advances before the backend is re-read
    assert_eq!(board.stage_for("ord-1"), Some(Stage::Packaging));

    // Reconciling refetch replaces the optimistic record with the real one
    let ticket = board.begin_fetch();
    let page = client.fetch_active_orders().await.unwrap();
    assert!(board.apply_fetch(ticket, page.pedidos));
    assert_eq!(board.stage_for("ord-1"), Some(Stage::Packaging));
    assert_eq!(board.orders()[0].stages.len(), 2);
}

#[tokio::test]
async fn rejected_confirm_leaves_stage_and_reenables_control() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/pedidos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pedidos": [cooking_order("ord-1")],
            "total": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/orders/ord-1/confirm-stage"))
        .respond_with(ResponseTemplate::new(422).set_body_string("invalid transition"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut board = OrdersBoard::new();

    let ticket = board.begin_fetch();
    let page = client.fetch_active_orders().await.unwrap();
    board.apply_fetch(ticket, page.pedidos);

    assert!(board.begin_confirm("ord-1"));
    let err = client.confirm_stage("ord-1", Stage::Cooking).await.unwrap_err();
    assert!(err.to_string().contains("invalid transition"));
    board.finish_confirm("ord-1");

    // No optimistic patch was applied; the displayed stage is unchanged
    assert_eq!(board.stage_for("ord-1"), Some(Stage::Cooking));
    // And the control is usable again
    assert!(board.begin_confirm("ord-1"));
}
