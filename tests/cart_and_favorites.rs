use storefront_api::{
    dto::cart::{AddToCartRequest, RemoveFromCartRequest},
    error::AppError,
    services::{cart_service, favorite_service},
};

mod common;

#[tokio::test]
async fn adding_twice_replaces_the_quantity() -> anyhow::Result<()> {
    let app = common::setup().await?;
    common::create_user(&app.state, "buyer@example.com", "user").await?;
    let cat = common::create_category(&app.state, "Rings", "rings").await?;
    let product_id = common::create_product(&app.state, "Gold Ring", 199.0, "GR-1", cat, 0).await?;

    for quantity in [2, 5] {
        cart_service::add_to_cart(
            &app.state,
            AddToCartRequest {
                email: "buyer@example.com".into(),
                product_id,
                quantity,
            },
        )
        .await?;
    }

    let entries = cart_service::get_cart(&app.state, "buyer@example.com").await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].quantity, 5);
    assert_eq!(entries[0].product.id, product_id);

    Ok(())
}

#[tokio::test]
async fn cart_rejects_bad_quantity_and_unknown_rows() -> anyhow::Result<()> {
    let app = common::setup().await?;
    common::create_user(&app.state, "buyer@example.com", "user").await?;
    let cat = common::create_category(&app.state, "Rings", "rings").await?;
    let product_id = common::create_product(&app.state, "Gold Ring", 199.0, "GR-1", cat, 0).await?;

    let err = cart_service::add_to_cart(
        &app.state,
        AddToCartRequest {
            email: "buyer@example.com".into(),
            product_id,
            quantity: 0,
        },
    )
    .await
    .expect_err("zero quantity must fail");
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = cart_service::add_to_cart(
        &app.state,
        AddToCartRequest {
            email: "buyer@example.com".into(),
            product_id: 9999,
            quantity: 1,
        },
    )
    .await
    .expect_err("unknown product must fail");
    assert!(matches!(err, AppError::NotFound));

    let err = cart_service::get_cart(&app.state, "nobody@example.com")
        .await
        .expect_err("unknown user must fail");
    assert!(matches!(err, AppError::NotFound));

    Ok(())
}

#[tokio::test]
async fn removing_an_item_empties_the_cart() -> anyhow::Result<()> {
    let app = common::setup().await?;
    common::create_user(&app.state, "buyer@example.com", "user").await?;
    let cat = common::create_category(&app.state, "Rings", "rings").await?;
    let product_id = common::create_product(&app.state, "Gold Ring", 199.0, "GR-1", cat, 0).await?;

    cart_service::add_to_cart(
        &app.state,
        AddToCartRequest {
            email: "buyer@example.com".into(),
            product_id,
            quantity: 1,
        },
    )
    .await?;

    cart_service::remove_from_cart(
        &app.state,
        RemoveFromCartRequest {
            email: "buyer@example.com".into(),
            product_id,
        },
    )
    .await?;
    // removing again is a no-op, not an error
    cart_service::remove_from_cart(
        &app.state,
        RemoveFromCartRequest {
            email: "buyer@example.com".into(),
            product_id,
        },
    )
    .await?;

    let entries = cart_service::get_cart(&app.state, "buyer@example.com").await?;
    assert!(entries.is_empty());

    Ok(())
}

#[tokio::test]
async fn favorites_round_trip_preserves_order() -> anyhow::Result<()> {
    let app = common::setup().await?;
    common::create_user(&app.state, "buyer@example.com", "user").await?;

    favorite_service::save_favorites(&app.state, "buyer@example.com", &[5, 9, 2]).await?;
    let ids = favorite_service::get_favorites(&app.state, "buyer@example.com").await?;
    assert_eq!(ids, vec![5, 9, 2]);

    // a second save replaces the list wholesale
    favorite_service::save_favorites(&app.state, "buyer@example.com", &[7]).await?;
    let ids = favorite_service::get_favorites(&app.state, "buyer@example.com").await?;
    assert_eq!(ids, vec![7]);

    let err = favorite_service::get_favorites(&app.state, "nobody@example.com")
        .await
        .expect_err("unknown user must fail");
    assert!(matches!(err, AppError::NotFound));

    Ok(())
}

#[tokio::test]
async fn favorites_default_to_empty() -> anyhow::Result<()> {
    let app = common::setup().await?;
    common::create_user(&app.state, "buyer@example.com", "user").await?;

    let ids = favorite_service::get_favorites(&app.state, "buyer@example.com").await?;
    assert!(ids.is_empty());

    Ok(())
}
