//! End-to-end tests over the real reqwest transport
//!
//! Each test starts its own mock application server and object store on an
//! ephemeral local port; nothing external is required.
//!
//! Run with: cargo test -p integration-tests --test feed_tests

use feed_common::ErrorKind;
use feed_core::{EntityId, PostDraft, ReactionKind, ReactionState};
use feed_service::ServiceContext;
use integration_tests::{
    assert_json, assert_status, jpeg, png, unique_post_id, ReactedShape, TestServer, CDN_BASE,
    TEST_TOKEN,
};
use reqwest::StatusCode;

// ============================================================================
// Mock sanity
// ============================================================================

#[tokio::test]
async fn test_mock_serves_seeded_post() {
    let server = TestServer::start().await.unwrap();
    server.state.seed_post("p1", 3, &["posts/a.png"]);

    let response = server.get("/api/posts/p1").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["qtyLikes"], 3);

    let missing = server.get("/api/posts/nope").await.unwrap();
    assert_status(missing, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Reactions
// ============================================================================

#[tokio::test]
async fn test_toggle_round_trip() {
    let server = TestServer::start().await.unwrap();
    let id = unique_post_id();
    server.state.seed_post(id.as_str(), 5, &[]);
    let ctx = server.context().unwrap();
    let sync = ctx.reaction_synchronizer();

    let reactions = sync.read(&id).await.unwrap();
    assert_eq!(reactions.like, ReactionState::new(false, 5));

    let state = sync.toggle(&id, ReactionKind::Like).await.unwrap();
    assert_eq!(state, ReactionState::new(true, 6));
    assert!(server.state.reacted(id.as_str(), "like"));

    let state = sync.toggle(&id, ReactionKind::Like).await.unwrap();
    assert_eq!(state, ReactionState::new(false, 5));
    assert!(!server.state.reacted(id.as_str(), "like"));
    assert_eq!(server.state.calls("create_reaction"), 1);
    assert_eq!(server.state.calls("delete_reaction"), 1);
}

#[tokio::test]
async fn test_every_api_request_is_authorized() {
    let server = TestServer::start().await.unwrap();
    let id = unique_post_id();
    server.state.seed_post(id.as_str(), 0, &[]);
    let ctx = server.context().unwrap();

    ctx.reaction_synchronizer()
        .toggle(&id, ReactionKind::Retweet)
        .await
        .unwrap();

    let auth = server.state.api_auth();
    assert!(!auth.is_empty());
    assert!(auth.iter().all(|a| a.as_deref() == Some(TEST_TOKEN)));
}

#[tokio::test]
async fn test_object_shaped_reacted_flag() {
    let server = TestServer::start().await.unwrap();
    let id = unique_post_id();
    server.state.seed_post(id.as_str(), 2, &[]);
    server.state.set_reacted(id.as_str(), "like", true);
    server.state.set_reacted_shape(ReactedShape::Object);
    let ctx = server.context().unwrap();

    let reactions = ctx.reaction_synchronizer().read(&id).await.unwrap();
    assert_eq!(reactions.like, ReactionState::new(true, 3));
    assert!(!reactions.retweet.reacted);
}

#[tokio::test]
async fn test_rejected_toggle_rolls_back() {
    let server = TestServer::start().await.unwrap();
    let id = unique_post_id();
    server.state.seed_post(id.as_str(), 7, &[]);
    let ctx = server.context().unwrap();
    let sync = ctx.reaction_synchronizer();
    sync.read(&id).await.unwrap();

    server.state.fail_reaction_mutations(1);
    let err = sync.toggle(&id, ReactionKind::Like).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Sync);
    assert_eq!(sync.snapshot(&id, ReactionKind::Like), ReactionState::new(false, 7));
    assert!(!sync.is_updating(&id, ReactionKind::Like));
}

#[tokio::test]
async fn test_overlapping_toggles_match_sequential() {
    let server = TestServer::start().await.unwrap();
    let id = unique_post_id();
    server.state.seed_post(id.as_str(), 10, &[]);
    let ctx = server.context().unwrap();
    let sync = ctx.reaction_synchronizer();
    sync.read(&id).await.unwrap();

    let on = tokio::spawn(sync.toggle(&id, ReactionKind::Like));
    let off = tokio::spawn(sync.toggle(&id, ReactionKind::Like));
    assert_eq!(sync.snapshot(&id, ReactionKind::Like), ReactionState::new(false, 10));

    on.await.unwrap().unwrap();
    off.await.unwrap().unwrap();

    assert!(!server.state.reacted(id.as_str(), "like"));
    assert_eq!(server.state.like_count(id.as_str()), 10);
    assert_eq!(sync.snapshot(&id, ReactionKind::Like), ReactionState::new(false, 10));
}

#[tokio::test]
async fn test_toggle_unknown_post_is_not_found() {
    let server = TestServer::start().await.unwrap();
    let ctx = server.context().unwrap();
    let sync = ctx.reaction_synchronizer();
    let id = EntityId::new("never-created");

    let err = sync.toggle(&id, ReactionKind::Like).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(sync.snapshot(&id, ReactionKind::Like), ReactionState::new(false, 0));
}

// ============================================================================
// Media
// ============================================================================

#[tokio::test]
async fn test_create_post_with_images() {
    let server = TestServer::start().await.unwrap();
    let ctx = server.context().unwrap();

    let draft = PostDraft::new("holiday").with_image(png(1)).with_image(jpeg(2));
    let post = ctx.media().create_post(draft).await.unwrap();

    let keys = server.state.post_images(post.id.as_str()).unwrap();
    assert_eq!(keys.len(), 2);
    assert_eq!(post.images, vec![
        format!("{CDN_BASE}/{}", keys[0]),
        format!("{CDN_BASE}/{}", keys[1]),
    ]);

    let (content_type, bytes) = server.state.object(&keys[0]).unwrap();
    assert_eq!(content_type, "image/png");
    assert_eq!(bytes, png(1).data);
    let (content_type, _) = server.state.object(&keys[1]).unwrap();
    assert_eq!(content_type, "image/jpeg");

    // Presigned requests never carry the API credential
    let storage_auth = server.state.storage_auth();
    assert_eq!(storage_auth.len(), 2);
    assert!(storage_auth.iter().all(Option::is_none));
}

#[tokio::test]
async fn test_create_post_without_images() {
    let server = TestServer::start().await.unwrap();
    let ctx = server.context().unwrap();

    let post = ctx.media().create_post(PostDraft::new("text only")).await.unwrap();

    assert!(post.images.is_empty());
    assert_eq!(server.state.calls("upload_urls"), 0);
    assert_eq!(server.state.post_images(post.id.as_str()), Some(vec![]));
}

#[tokio::test]
async fn test_failed_upload_creates_nothing() {
    let server = TestServer::start().await.unwrap();
    let ctx = server.context().unwrap();
    server.state.fail_nth_put(2);

    let draft = PostDraft::new("three")
        .with_image(png(1))
        .with_image(png(2))
        .with_image(png(3));
    let err = ctx.media().create_post(draft).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transfer);
    assert_eq!(server.state.calls("create_post"), 0);
    assert_eq!(server.state.post_count(), 0);
    // The other two uploads landed and stay orphaned
    assert_eq!(server.state.object_count(), 2);
}

#[tokio::test]
async fn test_delete_post_cleans_storage() {
    let server = TestServer::start().await.unwrap();
    let ctx = server.context().unwrap();

    let post = ctx
        .media()
        .create_post(PostDraft::new("to delete").with_image(png(1)).with_image(png(2)))
        .await
        .unwrap();
    assert_eq!(server.state.object_count(), 2);

    ctx.media().delete_post(&post.id).await.unwrap();

    assert!(!server.state.has_post(post.id.as_str()));
    assert_eq!(server.state.object_count(), 0);
    assert_eq!(server.state.calls("delete_urls"), 1);
}

#[tokio::test]
async fn test_delete_post_survives_storage_failure() {
    let server = TestServer::start().await.unwrap();
    let id = unique_post_id();
    let display_ref = format!("{CDN_BASE}/posts/a.png");
    server
        .state
        .seed_post(id.as_str(), 0, &[display_ref.as_str(), "posts/b.png"]);
    server.state.store_object("posts/a.png", "image/png", b"a");
    server.state.store_object("posts/b.png", "image/png", b"b");
    server.state.fail_delete("posts/a.png");
    let ctx = server.context().unwrap();

    ctx.media().delete_post(&id).await.unwrap();

    assert!(!server.state.has_post(id.as_str()));
    assert!(server.state.object("posts/a.png").is_some());
    assert!(server.state.object("posts/b.png").is_none());
}

#[tokio::test]
async fn test_delete_missing_post_propagates() {
    let server = TestServer::start().await.unwrap();
    let ctx = server.context().unwrap();

    let err = ctx
        .media()
        .delete_post(&EntityId::new("missing"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(server.state.calls("delete_urls"), 0);
    assert_eq!(server.state.calls("delete_post"), 1);
}

// ============================================================================
// Configuration
// ============================================================================

#[tokio::test]
async fn test_context_from_config() {
    let server = TestServer::start().await.unwrap();
    let config = server.client_config().unwrap();
    assert_eq!(config.api.base_url, server.api_url());

    let ctx = ServiceContext::from_config(&config).unwrap();
    let id = unique_post_id();
    server.state.seed_post(id.as_str(), 0, &["posts/x.png"]);

    let post = ctx.media().get_post(&id).await.unwrap();
    assert_eq!(post.images, vec![format!("{CDN_BASE}/posts/x.png")]);
    assert!(server
        .state
        .api_auth()
        .iter()
        .all(|a| a.as_deref() == Some(TEST_TOKEN)));
}

#[tokio::test]
async fn test_unreachable_server_is_sync_error() {
    let server = TestServer::start().await.unwrap();
    let mut config = server.client_config().unwrap();
    config.api.base_url = "http://127.0.0.1:9/api".to_string();

    let ctx = ServiceContext::from_config(&config).unwrap();
    let err = ctx
        .reaction_synchronizer()
        .read(&EntityId::new("p1"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Sync);
    assert!(err.is_retryable());
}
