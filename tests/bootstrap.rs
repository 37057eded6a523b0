mod common;

use short_url_service::application::bootstrap::{
    ALGORITHM_DESCRIPTION, DEMO_PASSWORD, DEMO_URLS_PER_USER, DEMO_USERS, SeedConfig,
};
use short_url_service::prelude::*;

fn full_seed() -> SeedConfig {
    SeedConfig {
        admin: Some(common::admin_seed()),
        demo_data: true,
    }
}

#[tokio::test]
async fn test_seeding_is_idempotent() {
    let state = common::create_test_state();

    state.bootstrap().run(&full_seed()).await.unwrap();
    let accounts_after_first = state.account_service.list().await.unwrap().len();
    let urls_after_first = state.short_url_service.count().await.unwrap();

    state.bootstrap().run(&full_seed()).await.unwrap();

    assert_eq!(
        state.account_service.list().await.unwrap().len(),
        accounts_after_first
    );
    assert_eq!(state.short_url_service.count().await.unwrap(), urls_after_first);
}

#[tokio::test]
async fn test_demo_data_seeds_users_and_urls() {
    let state = common::create_test_state();

    state.bootstrap().run(&full_seed()).await.unwrap();

    // admin + demo users
    assert_eq!(
        state.account_service.list().await.unwrap().len(),
        1 + DEMO_USERS as usize
    );
    assert_eq!(
        state.short_url_service.count().await.unwrap(),
        (DEMO_USERS * DEMO_URLS_PER_USER) as i64
    );

    let demo = state.account_service.login("user1@example.com", DEMO_PASSWORD).await.unwrap();
    assert_eq!(demo.username, "user1");
    assert_eq!(demo.role, Role::User);
}

#[tokio::test]
async fn test_admin_seed_assigns_admin_role_and_about() {
    let state = common::create_test_state();

    state
        .bootstrap()
        .run(&SeedConfig {
            admin: Some(common::admin_seed()),
            demo_data: false,
        })
        .await
        .unwrap();

    let admin = state
        .account_service
        .login(common::ADMIN_EMAIL, common::ADMIN_PASSWORD)
        .await
        .unwrap();
    assert_eq!(admin.role, Role::Admin);

    let about = state.about_service.get().await.unwrap();
    assert_eq!(about.description, ALGORITHM_DESCRIPTION);
    assert_eq!(about.updated_by_username.as_deref(), Some(common::ADMIN_USERNAME));
    assert_eq!(state.short_url_service.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_seed_about_does_not_overwrite_existing_record() {
    let state = common::create_seeded_state().await;
    let admin = state
        .account_service
        .find_by_email(common::ADMIN_EMAIL)
        .await
        .unwrap()
        .unwrap();

    state
        .about_service
        .update("Edited by hand", admin.id)
        .await
        .unwrap();

    state.bootstrap().seed_about(common::ADMIN_EMAIL).await.unwrap();

    assert_eq!(
        state.about_service.get().await.unwrap().description,
        "Edited by hand"
    );
}

#[tokio::test]
async fn test_seed_about_without_admin_fails() {
    let state = common::create_test_state();
    state.bootstrap().seed_roles().await.unwrap();

    let result = state.bootstrap().seed_about("missing@example.com").await;

    assert_eq!(result, Err(DomainError::AdminNotFound));
}

#[tokio::test]
async fn test_without_admin_only_roles_are_seeded() {
    let state = common::create_test_state();

    state.bootstrap().run(&SeedConfig::default()).await.unwrap();

    assert!(state.account_service.list().await.unwrap().is_empty());
    assert_eq!(
        state.about_service.get().await,
        Err(DomainError::AboutInfoNotFound)
    );

    // roles exist, so registration works
    let response = state
        .account_service
        .register("alice@example.com", "alice", "password123")
        .await
        .unwrap();
    assert_eq!(response.role, Role::User);
}
