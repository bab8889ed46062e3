use storefront_api::{
    dto::auth::{LoginRequest, RegisterRequest},
    error::AppError,
    services::auth_service,
};

mod common;

#[tokio::test]
async fn register_then_login() -> anyhow::Result<()> {
    let app = common::setup().await?;

    let registered = auth_service::register(
        &app.state,
        RegisterRequest {
            email: "buyer@example.com".into(),
            password: "secret123".into(),
        },
    )
    .await?;
    assert!(!registered.token.is_empty());
    assert_eq!(registered.user.email, "buyer@example.com");
    assert_eq!(registered.user.role, "user");

    let logged_in = auth_service::login(
        &app.state,
        LoginRequest {
            email: "buyer@example.com".into(),
            password: "secret123".into(),
        },
    )
    .await?;
    assert_eq!(logged_in.user.id, registered.user.id);

    Ok(())
}

#[tokio::test]
async fn duplicate_registration_is_rejected() -> anyhow::Result<()> {
    let app = common::setup().await?;

    let request = || RegisterRequest {
        email: "dup@example.com".into(),
        password: "secret123".into(),
    };
    auth_service::register(&app.state, request()).await?;

    let err = auth_service::register(&app.state, request())
        .await
        .expect_err("second registration must fail");
    assert!(matches!(err, AppError::BadRequest(_)));

    Ok(())
}

#[tokio::test]
async fn wrong_password_is_unauthorized() -> anyhow::Result<()> {
    let app = common::setup().await?;

    auth_service::register(
        &app.state,
        RegisterRequest {
            email: "buyer@example.com".into(),
            password: "secret123".into(),
        },
    )
    .await?;

    let err = auth_service::login(
        &app.state,
        LoginRequest {
            email: "buyer@example.com".into(),
            password: "not-the-password".into(),
        },
    )
    .await
    .expect_err("login with the wrong password must fail");
    assert!(matches!(err, AppError::Unauthorized(_)));

    Ok(())
}
