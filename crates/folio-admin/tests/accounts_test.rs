//! Comment and user manager integration tests.
//!
//! Run with: `cargo test -p folio-admin --test accounts_test`

mod helpers;

use folio_admin::password::verify_password;
use folio_admin::{require_role, Actor, RequestContext, Role};
use folio_core::models::{Post, UserPayload, ANONYMOUS_AUTHOR_NAME};
use folio_core::AppError;
use folio_db::Repository;
use helpers::setup_test_env;
use uuid::Uuid;

fn user_payload(email: &str, password: Option<&str>) -> UserPayload {
    UserPayload {
        name: "Grace".to_string(),
        email: email.to_string(),
        password: password.map(str::to_string),
        is_admin: false,
        status: true,
    }
}

#[tokio::test]
async fn test_anonymous_comment() {
    let env = setup_test_env().await;
    let post = Post::new("Hello");
    env.posts.save(&post).await.unwrap();

    let comment = env
        .comment_manager()
        .create_comment(post.id, None, "  Nice post!  ")
        .await
        .unwrap();

    assert_eq!(comment.author_name, ANONYMOUS_AUTHOR_NAME);
    assert_eq!(comment.author_id, None);
    assert_eq!(comment.text, "Nice post!");
    assert!(!comment.status);
}

#[tokio::test]
async fn test_signed_in_comment_and_moderation() {
    let env = setup_test_env().await;
    let manager = env.comment_manager();
    let post = Post::new("Hello");
    env.posts.save(&post).await.unwrap();
    let actor = env.admin();

    let comment = manager
        .create_comment(post.id, Some(&actor), "First!")
        .await
        .unwrap();
    assert_eq!(comment.author_name, actor.name);
    assert_eq!(comment.author_id, Some(actor.id));

    let approved = manager.toggle_status(comment.id).await.unwrap();
    assert!(approved.status);
    let hidden = manager.toggle_status(comment.id).await.unwrap();
    assert!(!hidden.status);

    manager.delete(comment.id).await.unwrap();
    assert!(env.comments.is_empty());
}

#[tokio::test]
async fn test_comment_validation() {
    let env = setup_test_env().await;
    let manager = env.comment_manager();

    let missing_post = manager.create_comment(Uuid::new_v4(), None, "hi").await;
    assert!(matches!(missing_post, Err(AppError::NotFound(_))));

    let post = Post::new("Hello");
    env.posts.save(&post).await.unwrap();
    let blank = manager.create_comment(post.id, None, "   ").await;
    assert!(matches!(blank, Err(AppError::InvalidInput(_))));
}

#[tokio::test]
async fn test_user_create_and_password_handling() {
    let env = setup_test_env().await;
    let manager = env.user_manager();

    let user = manager
        .create(user_payload("grace@example.com", Some("hunter2")))
        .await
        .unwrap();
    assert!(verify_password("hunter2", &user.password_hash).unwrap());
    assert!(!user.is_admin);

    // Empty password keeps the hash.
    let mut payload = user_payload("grace@example.com", Some(""));
    payload.is_admin = true;
    let updated = manager.update(user.id, payload).await.unwrap();
    assert_eq!(updated.password_hash, user.password_hash);
    assert!(updated.is_admin);

    let changed = manager
        .update(user.id, user_payload("grace@example.com", Some("s3cret")))
        .await
        .unwrap();
    assert!(verify_password("s3cret", &changed.password_hash).unwrap());
    assert!(!verify_password("hunter2", &changed.password_hash).unwrap());

    manager.delete(user.id).await.unwrap();
    assert!(env.users.find(user.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_user_create_requires_password() {
    let env = setup_test_env().await;
    let result = env
        .user_manager()
        .create(user_payload("grace@example.com", None))
        .await;
    assert!(matches!(result, Err(AppError::InvalidInput(_))));
}

#[tokio::test]
async fn test_password_hash_is_not_serialized() {
    let env = setup_test_env().await;
    let user = env
        .user_manager()
        .create(user_payload("grace@example.com", Some("hunter2")))
        .await
        .unwrap();

    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password_hash").is_none());
}

#[tokio::test]
async fn test_admin_guard_for_created_users() {
    let env = setup_test_env().await;
    let mut payload = user_payload("root@example.com", Some("pw"));
    payload.is_admin = true;
    let admin = env.user_manager().create(payload).await.unwrap();
    let regular = env
        .user_manager()
        .create(user_payload("guest@example.com", Some("pw")))
        .await
        .unwrap();

    let ctx = RequestContext::for_actor(Actor::from(&admin));
    assert!(require_role(&ctx, Role::Admin).is_ok());

    let ctx = RequestContext::for_actor(Actor::from(&regular));
    assert!(matches!(
        require_role(&ctx, Role::Admin),
        Err(AppError::Forbidden(_))
    ));
}
