use storefront_api::{
    dto::orders::{CreateOrderAuthRequest, CreateOrderRequest},
    error::AppError,
    middleware::auth::AuthUser,
    services::order_service,
};

mod common;

fn guest_request(email: &str, product_ids: Vec<i64>) -> CreateOrderRequest {
    CreateOrderRequest {
        product_ids,
        email: email.into(),
        password: "secret123".into(),
        name: "Ann".into(),
        phone: "555-0101".into(),
        delivery_address: "1 Main St".into(),
    }
}

#[tokio::test]
async fn guest_checkout_creates_account_and_order() -> anyhow::Result<()> {
    let app = common::setup().await?;
    let cat = common::create_category(&app.state, "Rings", "rings").await?;
    let p1 = common::create_product(&app.state, "Gold Ring", 199.0, "GR-1", cat, 0).await?;
    let p2 = common::create_product(&app.state, "Silver Ring", 89.0, "SR-1", cat, 0).await?;

    let response =
        order_service::create_guest_order(&app.state, guest_request("ann@example.com", vec![p1, p2]))
            .await?;

    assert!(response.token.is_some(), "guest checkout must hand back a token");
    assert_eq!(response.order.status, "new");
    assert_eq!(response.order.product_ids, vec![p1, p2]);
    assert_eq!(response.order.products.len(), 2);
    let user = response.order.user.as_ref().expect("order carries its user");
    assert_eq!(user.email, "ann@example.com");
    assert_eq!(user.delivery_address, "1 Main St");

    Ok(())
}

#[tokio::test]
async fn guest_checkout_rejects_known_email_and_empty_ids() -> anyhow::Result<()> {
    let app = common::setup().await?;
    common::create_user(&app.state, "taken@example.com", "user").await?;
    let cat = common::create_category(&app.state, "Rings", "rings").await?;
    let p1 = common::create_product(&app.state, "Gold Ring", 199.0, "GR-1", cat, 0).await?;

    let err =
        order_service::create_guest_order(&app.state, guest_request("taken@example.com", vec![p1]))
            .await
            .expect_err("known email must fail");
    assert!(matches!(err, AppError::BadRequest(_)));

    let err =
        order_service::create_guest_order(&app.state, guest_request("new@example.com", vec![]))
            .await
            .expect_err("empty id list must fail");
    assert!(matches!(err, AppError::BadRequest(_)));

    Ok(())
}

#[tokio::test]
async fn authenticated_checkout_updates_profile_and_lists_orders() -> anyhow::Result<()> {
    let app = common::setup().await?;
    let user_id = common::create_user(&app.state, "ann@example.com", "user").await?;
    let cat = common::create_category(&app.state, "Rings", "rings").await?;
    let p1 = common::create_product(&app.state, "Gold Ring", 199.0, "GR-1", cat, 0).await?;

    let auth_user = AuthUser {
        user_id,
        email: "ann@example.com".into(),
        role: "user".into(),
    };

    let response = order_service::create_auth_order(
        &app.state,
        &auth_user,
        CreateOrderAuthRequest {
            product_ids: vec![p1],
            name: "Ann".into(),
            phone: "555-0101".into(),
            delivery_address: "2 Oak Ave".into(),
        },
    )
    .await?;
    assert!(response.token.is_none(), "existing sessions keep their token");
    assert_eq!(
        response.order.user.as_ref().map(|u| u.delivery_address.as_str()),
        Some("2 Oak Ave")
    );

    let orders = order_service::list_user_orders(&app.state, user_id).await?;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].product_ids, vec![p1]);
    assert_eq!(orders[0].products.len(), 1);

    Ok(())
}
