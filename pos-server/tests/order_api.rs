mod common;

use common::{ADMIN, MANAGER, STAFF, TestApp};
use http::StatusCode;
use serde_json::{Value, json};

async fn place(app: &TestApp, token: &str, lines: Value) -> (StatusCode, Value) {
    app.post(
        "/api/orders",
        Some(token),
        json!({"table_number": 3, "customer_name": "Alex", "items": lines}),
    )
    .await
}

async fn second_staff_token(app: &TestApp) -> String {
    let (status, _) = app
        .post(
            "/api/auth/register",
            None,
            json!({"name": "Robin", "email": "robin@restaurant.com", "password": "secret1"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    app.token("robin@restaurant.com").await
}

#[tokio::test]
async fn order_total_is_computed_from_menu_prices() {
    let app = TestApp::with_menu().await;
    let staff = app.token(STAFF).await;
    let garlic_bread = app.menu_item_id("Garlic Bread").await;

    let (status, body) = place(
        &app,
        &staff,
        json!([{"menu_item_id": garlic_bread, "quantity": 2, "price": 0.01}]),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], 0);
    assert_eq!(body["message"], "Order created successfully");

    let order = &body["data"];
    assert_eq!(order["total"], 11.98);
    assert_eq!(order["status"], "PENDING");
    assert_eq!(order["table_number"], 3);
    assert_eq!(order["user"]["name"], "Staff User");

    let lines = order["items"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["price"], 5.99);
    assert_eq!(lines[0]["quantity"], 2);
    assert_eq!(lines[0]["menu_item_name"], "Garlic Bread");
}

#[tokio::test]
async fn mixed_cart_total() {
    let app = TestApp::with_menu().await;
    let staff = app.token(STAFF).await;
    let burger = app.menu_item_id("Classic Burger").await;
    let soda = app.menu_item_id("Soda").await;
    let tea = app.menu_item_id("Iced Tea").await;

    let (status, body) = place(
        &app,
        &staff,
        json!([
            {"menu_item_id": burger, "quantity": 3},
            {"menu_item_id": soda, "quantity": 2, "notes": "no ice"},
            {"menu_item_id": tea, "quantity": 1}
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    // 3 * 12.99 + 2 * 2.99 + 3.49
    assert_eq!(body["data"]["total"], 48.44);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_menu_items_reject_whole_order() {
    let app = TestApp::with_menu().await;
    let staff = app.token(STAFF).await;
    let soda = app.menu_item_id("Soda").await;

    let (status, body) = place(
        &app,
        &staff,
        json!([
            {"menu_item_id": soda, "quantity": 1},
            {"menu_item_id": 111, "quantity": 1},
            {"menu_item_id": 222, "quantity": 4}
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4003);
    assert_eq!(body["details"]["missing_ids"], json!([111, 222]));

    let (_, orders) = app.get("/api/orders", Some(&staff)).await;
    assert_eq!(orders, json!([]));
}

#[tokio::test]
async fn order_input_is_validated() {
    let app = TestApp::with_menu().await;
    let staff = app.token(STAFF).await;
    let soda = app.menu_item_id("Soda").await;

    let (status, body) = place(&app, &staff, json!([])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
    assert!(body["details"]["errors"]["items"].is_array());

    let (status, body) = place(&app, &staff, json!([{"menu_item_id": soda, "quantity": 0}])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["errors"]["items[0].quantity"].is_array());

    let (status, _) = app
        .post("/api/orders", None, json!({"items": [{"menu_item_id": soda, "quantity": 1}]}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn price_change_does_not_touch_existing_orders() {
    let app = TestApp::with_menu().await;
    let staff = app.token(STAFF).await;
    let manager = app.token(MANAGER).await;
    let cake = app.menu_item_id("Chocolate Cake").await;

    let (_, created) = place(&app, &staff, json!([{"menu_item_id": cake, "quantity": 2}])).await;
    let order_id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["total"], 13.98);

    let (status, _) = app
        .patch(
            &format!("/api/menu/items/{cake}"),
            Some(&manager),
            json!({"price": 8.5}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, order) = app.get(&format!("/api/orders/{order_id}"), Some(&staff)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["total"], 13.98);
    assert_eq!(order["items"][0]["price"], 6.99);

    // new orders use the new price
    let (_, next) = place(&app, &staff, json!([{"menu_item_id": cake, "quantity": 2}])).await;
    assert_eq!(next["data"]["total"], 17.0);
}

#[tokio::test]
async fn order_numbers_increase_by_one() {
    let app = TestApp::with_menu().await;
    let staff = app.token(STAFF).await;
    let soda = app.menu_item_id("Soda").await;

    let mut numbers = Vec::new();
    for _ in 0..3 {
        let (_, body) = place(&app, &staff, json!([{"menu_item_id": soda, "quantity": 1}])).await;
        numbers.push(body["data"]["order_number"].as_i64().unwrap());
    }
    assert_eq!(numbers, vec![1, 2, 3]);

    // newest first
    let (_, orders) = app.get("/api/orders", Some(&staff)).await;
    let listed: Vec<i64> = orders
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["order_number"].as_i64().unwrap())
        .collect();
    assert_eq!(listed, vec![3, 2, 1]);
}

#[tokio::test]
async fn status_transitions_are_enforced() {
    let app = TestApp::with_menu().await;
    let staff = app.token(STAFF).await;
    let soda = app.menu_item_id("Soda").await;

    let (_, first) = place(&app, &staff, json!([{"menu_item_id": soda, "quantity": 1}])).await;
    let id = first["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/orders/{id}");

    for next in ["PREPARING", "READY", "COMPLETED"] {
        let (status, body) = app.patch(&uri, Some(&staff), json!({"status": next})).await;
        assert_eq!(status, StatusCode::OK, "moving to {next}");
        assert_eq!(body["message"], "Order updated successfully");
        assert_eq!(body["data"]["status"], next);
    }

    let (status, body) = app
        .patch(&uri, Some(&staff), json!({"status": "PREPARING"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4004);

    let (_, second) = place(&app, &staff, json!([{"menu_item_id": soda, "quantity": 1}])).await;
    let id = second["data"]["id"].as_i64().unwrap();
    let (status, body) = app
        .patch(
            &format!("/api/orders/{id}"),
            Some(&staff),
            json!({"status": "CANCELLED", "notes": "customer left"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "CANCELLED");
    assert_eq!(body["data"]["notes"], "customer left");

    let (status, _) = app
        .patch(&format!("/api/orders/{id}"), Some(&staff), json!({"status": "SERVED"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .patch("/api/orders/98765", Some(&staff), json!({"status": "READY"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);
}

#[tokio::test]
async fn order_deletion_rules() {
    let app = TestApp::with_menu().await;
    let staff = app.token(STAFF).await;
    let other_staff = second_staff_token(&app).await;
    let admin = app.token(ADMIN).await;
    let soda = app.menu_item_id("Soda").await;

    let (_, a) = place(&app, &staff, json!([{"menu_item_id": soda, "quantity": 1}])).await;
    let (_, b) = place(&app, &staff, json!([{"menu_item_id": soda, "quantity": 2}])).await;
    let a = a["data"]["id"].as_i64().unwrap();
    let b = b["data"]["id"].as_i64().unwrap();

    let (status, body) = app.delete(&format!("/api/orders/{a}"), Some(&other_staff)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2001);

    let (status, body) = app.delete(&format!("/api/orders/{a}"), Some(&staff)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order deleted successfully");

    let (status, _) = app.delete(&format!("/api/orders/{b}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get(&format!("/api/orders/{b}"), Some(&staff)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);
}

#[tokio::test]
async fn ordered_menu_item_cannot_be_deleted() {
    let app = TestApp::with_menu().await;
    let staff = app.token(STAFF).await;
    let manager = app.token(MANAGER).await;
    let coffee = app.menu_item_id("Coffee").await;

    place(&app, &staff, json!([{"menu_item_id": coffee, "quantity": 1}])).await;

    let (status, body) = app
        .delete(&format!("/api/menu/items/{coffee}"), Some(&manager))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6003);
}
