//! Product and portfolio manager integration tests.
//!
//! Run with: `cargo test -p folio-admin --test products_test`

mod helpers;

use folio_core::models::{Category, PortfolioPayload, ProductPayload};
use folio_core::{AppError, UploadArea};
use folio_db::Repository;
use helpers::fixtures::{create_test_jpeg, create_test_png, spool_upload};
use helpers::setup_test_env;

fn product(title: &str) -> ProductPayload {
    ProductPayload {
        title: title.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_product_with_both_pictures() {
    let env = setup_test_env().await;
    let manager = env.product_manager();
    let admin = env.admin();

    let category = Category::new("Mugs");
    env.categories.save(&category).await.unwrap();

    let mut input = product("Coffee Mug");
    input.price = Some(1299);
    input.balance = Some(10);
    input.stars = Some(4.5);
    input.date = Some("2024-01-31".to_string());
    input.category_id = Some(category.id);
    input.preview_picture = Some(spool_upload(
        env.spool_dir(),
        "preview.png",
        "image/png",
        &create_test_png(),
    ));
    input.detail_picture = Some(spool_upload(
        env.spool_dir(),
        "detail.jpg",
        "image/jpeg",
        &create_test_jpeg(),
    ));

    let created = manager.create(input, &admin).await.unwrap();

    assert_eq!(created.slug, "coffee-mug");
    assert_eq!(created.price, 1299);
    assert_eq!(created.balance, 10);
    assert_eq!(created.category_id, Some(category.id));
    assert_eq!(created.author_id, Some(admin.id));
    assert_eq!(created.date.unwrap().to_string(), "2024-01-31");

    let preview = created.preview_picture.clone().unwrap();
    let detail = created.detail_picture.clone().unwrap();
    assert!(preview.ends_with(".png"));
    assert!(detail.ends_with(".jpg"));
    assert!(env.stored_path(UploadArea::Shop, &preview).is_file());
    assert!(env.stored_path(UploadArea::Shop, &detail).is_file());
}

#[tokio::test]
async fn test_rejected_detail_picture_rolls_back_preview() {
    let env = setup_test_env().await;
    let manager = env.product_manager();

    let mut input = product("Teapot");
    input.preview_picture = Some(spool_upload(
        env.spool_dir(),
        "preview.png",
        "image/png",
        &create_test_png(),
    ));
    input.detail_picture = Some(spool_upload(
        env.spool_dir(),
        "detail.exe",
        "image/png",
        &create_test_png(),
    ));

    let err = manager.create(input, &env.admin()).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::InvalidUpload { code: "EXTENSION_MISMATCH", .. }
    ));
    assert!(env.stored_files(UploadArea::Shop).is_empty());
    assert!(env.products.is_empty());
}

#[tokio::test]
async fn test_replacing_one_picture_keeps_the_other() {
    let env = setup_test_env().await;
    let manager = env.product_manager();

    let mut input = product("Teapot");
    input.preview_picture = Some(spool_upload(env.spool_dir(), "p.png", "image/png", &create_test_png()));
    input.detail_picture = Some(spool_upload(env.spool_dir(), "d.png", "image/png", &create_test_png()));
    let created = manager.create(input, &env.admin()).await.unwrap();

    let mut input = product("Teapot");
    input.preview_picture = Some(spool_upload(env.spool_dir(), "p2.png", "image/png", &create_test_png()));
    let updated = manager.update(created.id, input).await.unwrap();

    assert_ne!(updated.preview_picture, created.preview_picture);
    assert_eq!(updated.detail_picture, created.detail_picture);

    let mut files = env.stored_files(UploadArea::Shop);
    files.sort();
    let mut expected = vec![
        updated.preview_picture.clone().unwrap(),
        updated.detail_picture.clone().unwrap(),
    ];
    expected.sort();
    assert_eq!(files, expected);
}

#[tokio::test]
async fn test_oversized_picture_is_rejected() {
    let env = setup_test_env().await;
    let manager = env.product_manager();

    let mut input = product("Poster");
    let oversized = vec![0u8; helpers::MAX_UPLOAD_BYTES as usize + 1];
    input.preview_picture = Some(spool_upload(env.spool_dir(), "big.png", "image/png", &oversized));

    let err = manager.create(input, &env.admin()).await.unwrap_err();
    assert!(matches!(err, AppError::PayloadTooLarge(_)));
}

#[tokio::test]
async fn test_negative_price_is_rejected() {
    let env = setup_test_env().await;
    let mut input = product("Freebie");
    input.price = Some(-5);

    let err = env
        .product_manager()
        .create(input, &env.admin())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[tokio::test]
async fn test_delete_product_removes_pictures() {
    let env = setup_test_env().await;
    let manager = env.product_manager();

    let mut input = product("Vase");
    input.preview_picture = Some(spool_upload(env.spool_dir(), "p.png", "image/png", &create_test_png()));
    let created = manager.create(input, &env.admin()).await.unwrap();

    manager.delete(created.id).await.unwrap();
    assert!(env.stored_files(UploadArea::Shop).is_empty());
    assert!(env.products.find(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_portfolio_images_live_in_their_own_area() {
    let env = setup_test_env().await;
    let manager = env.portfolio_manager();

    let input = PortfolioPayload {
        title: "Landing page".to_string(),
        status: true,
        image: Some(spool_upload(env.spool_dir(), "shot.png", "image/png", &create_test_png())),
        ..Default::default()
    };
    let item = manager.create(input, &env.admin()).await.unwrap();

    let image = item.image.clone().unwrap();
    assert!(env.stored_path(UploadArea::Portfolio, &image).is_file());
    assert!(env.stored_files(UploadArea::Posts).iter().all(|f| f != &image));

    manager.delete(item.id).await.unwrap();
    assert!(!env.stored_path(UploadArea::Portfolio, &image).exists());
}

#[tokio::test]
async fn test_portfolio_update_keeps_slug() {
    let env = setup_test_env().await;
    let manager = env.portfolio_manager();

    let input = PortfolioPayload {
        title: "Case Study".to_string(),
        ..Default::default()
    };
    let item = manager.create(input, &env.admin()).await.unwrap();

    let input = PortfolioPayload {
        title: "Case Study (2024)".to_string(),
        is_featured: true,
        ..Default::default()
    };
    let updated = manager.update(item.id, input).await.unwrap();

    assert_eq!(updated.slug, "case-study");
    assert!(updated.is_featured);
}
