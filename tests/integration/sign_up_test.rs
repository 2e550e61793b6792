//! Integration tests for sign-up profile creation and role routing.

use std::sync::Arc;

use athletehub::auth::{resolve_role, Role, RoleResolution, USERS};
use athletehub::profile::{profile_completion, ProfileManager, SocialPlatform, ProfileError};
use athletehub::storage::{LocalBlobStore, SqliteStore};
use serde_json::json;

use crate::mocks::MockStore;

#[tokio::test]
async fn test_sign_up_creates_profile_with_role() {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let dir = tempfile::tempdir().unwrap();
    let manager = ProfileManager::new(Arc::clone(&store), Arc::new(LocalBlobStore::new(dir.path())));

    manager
        .create("uid-1", " Coach Carter ", "carter@club.org", Role::Coach)
        .await
        .unwrap();

    let resolution = resolve_role(store.as_ref(), "uid-1").await.unwrap();
    assert_eq!(resolution, RoleResolution::Resolved(Role::Coach));

    let profile = manager.load("uid-1").await.unwrap().unwrap();
    assert_eq!(profile.name, "Coach Carter");
    assert_eq!(profile.role(), Role::Coach);
    assert_eq!(profile_completion(&profile), 10);
}

#[tokio::test]
async fn test_role_resolution_defaults_and_unknown() {
    let store = MockStore::new();
    assert_eq!(
        resolve_role(&store, "nobody").await.unwrap(),
        RoleResolution::Resolved(Role::Athlete)
    );

    let mut fields = athletehub::storage::Fields::new();
    fields.insert("role".to_string(), json!("referee"));
    store.insert(USERS, "u2", fields);
    assert_eq!(
        resolve_role(&store, "u2").await.unwrap(),
        RoleResolution::Unrecognized("referee".to_string())
    );
}

#[tokio::test]
async fn test_invalid_social_link_blocks_update() {
    let store = Arc::new(MockStore::new());
    let dir = tempfile::tempdir().unwrap();
    let manager = ProfileManager::new(Arc::clone(&store), Arc::new(LocalBlobStore::new(dir.path())));

    let mut profile = manager
        .create("uid-3", "Ana", "ana@club.org", Role::Athlete)
        .await
        .unwrap();
    let writes = store.writes();

    profile.social_links.instagram = "https://example.com/ana".to_string();
    let result = manager.update(&profile).await;
    assert!(matches!(
        result,
        Err(ProfileError::InvalidSocialLink(SocialPlatform::Instagram))
    ));
    assert_eq!(store.writes(), writes);
}
