use storefront_api::{error::AppError, services::backup_service};

mod common;

#[tokio::test]
async fn backup_list_and_restore_round_trip() -> anyhow::Result<()> {
    let app = common::setup().await?;
    tokio::fs::write(&app.state.config.database_file, b"live-data").await?;

    let path = backup_service::create_backup(&app.state).await?;
    assert!(path.ends_with(".db"));

    let backups = backup_service::list_backups(&app.state).await?;
    assert_eq!(backups.len(), 1);
    assert!(backups[0].name.starts_with("backup-"));
    assert_eq!(backups[0].size, b"live-data".len() as u64);

    // change the live file, then restore the snapshot over it
    tokio::fs::write(&app.state.config.database_file, b"changed").await?;
    backup_service::restore_backup(&app.state, &backups[0].name).await?;
    let restored = tokio::fs::read(&app.state.config.database_file).await?;
    assert_eq!(restored, b"live-data");

    // the pre-restore safety snapshot joins the listing
    let backups = backup_service::list_backups(&app.state).await?;
    assert!(backups.iter().any(|b| b.name.starts_with("backup-before-restore-")));

    Ok(())
}

#[tokio::test]
async fn restore_refuses_paths_outside_the_backup_dir() -> anyhow::Result<()> {
    let app = common::setup().await?;
    tokio::fs::write(&app.state.config.database_file, b"live-data").await?;
    backup_service::create_backup(&app.state).await?;

    for name in ["../app.db", "/etc/passwd", "..\\app.db"] {
        let err = backup_service::restore_backup(&app.state, name)
            .await
            .expect_err("escaping name must fail");
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    let err = backup_service::restore_backup(&app.state, "no-such-backup.db")
        .await
        .expect_err("missing snapshot must fail");
    assert!(matches!(err, AppError::BadRequest(_)));

    Ok(())
}

#[tokio::test]
async fn no_backup_dir_means_an_empty_listing() -> anyhow::Result<()> {
    let app = common::setup().await?;
    let backups = backup_service::list_backups(&app.state).await?;
    assert!(backups.is_empty());
    Ok(())
}

#[tokio::test]
async fn uploads_land_under_their_kind_folder() -> anyhow::Result<()> {
    let app = common::setup().await?;

    let path = backup_service::save_upload(&app.state, "products", "ring.jpg", b"jpeg-bytes").await?;
    assert!(path.starts_with("/images/jewelry/"));
    assert!(path.ends_with("_ring.jpg"));

    let on_disk = std::path::Path::new(&app.state.config.images_dir)
        .join(path.trim_start_matches("/images/"));
    let bytes = tokio::fs::read(on_disk).await?;
    assert_eq!(bytes, b"jpeg-bytes");

    let err = backup_service::save_upload(&app.state, "avatars", "x.png", b"png")
        .await
        .expect_err("unknown kind must fail");
    assert!(matches!(err, AppError::BadRequest(_)));

    Ok(())
}
