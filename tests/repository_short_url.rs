//! PostgreSQL repository tests. Run with a database:
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo test -- --ignored
//! ```

use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use short_url_service::domain::DomainError;
use short_url_service::domain::entities::{NewAccount, NewShortUrl, Role};
use short_url_service::domain::repositories::{AccountRepository, ShortUrlRepository};
use short_url_service::infrastructure::persistence::{PgAccountRepository, PgShortUrlRepository};

async fn create_owner(pool: &PgPool, username: &str) -> Uuid {
    let accounts = PgAccountRepository::new(Arc::new(pool.clone()));
    accounts
        .create(NewAccount {
            email: format!("{}@example.com", username),
            username: username.to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .unwrap()
        .id
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_create_and_find(pool: PgPool) {
    let owner = create_owner(&pool, "alice").await;
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    let created = repo
        .create(NewShortUrl::new(
            "https://example.com".into(),
            "abcd1234".into(),
            owner,
        ))
        .await
        .unwrap();

    assert_eq!(created.created_by_username.as_deref(), Some("alice"));

    let by_code = repo.find_by_code("abcd1234").await.unwrap().unwrap();
    assert_eq!(by_code.id, created.id);
    assert_eq!(by_code.original_url, "https://example.com");

    let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id.short_code, "abcd1234");

    assert!(repo.exists_by_code("abcd1234").await.unwrap());
    assert!(!repo.exists_by_code("zzzz9999").await.unwrap());
    assert!(repo.exists_by_original_url("https://example.com").await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_unique_constraints_map_to_domain_errors(pool: PgPool) {
    let owner = create_owner(&pool, "alice").await;
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    repo.create(NewShortUrl::new("https://a.com".into(), "aaaaaaaa".into(), owner))
        .await
        .unwrap();

    let same_code = repo
        .create(NewShortUrl::new("https://b.com".into(), "aaaaaaaa".into(), owner))
        .await;
    let same_url = repo
        .create(NewShortUrl::new("https://a.com".into(), "bbbbbbbb".into(), owner))
        .await;

    assert_eq!(same_code, Err(DomainError::CodeConflict));
    assert_eq!(same_url, Err(DomainError::DuplicateUrl));
    assert_eq!(repo.count().await, Ok(1));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_list_most_recent_first(pool: PgPool) {
    let owner = create_owner(&pool, "alice").await;
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    let mut older = NewShortUrl::new("https://old.com".into(), "oldoldol".into(), owner);
    older.created_at = chrono::Utc::now() - chrono::Duration::minutes(5);
    repo.create(older).await.unwrap();
    repo.create(NewShortUrl::new("https://new.com".into(), "newnewne".into(), owner))
        .await
        .unwrap();

    let listed = repo.list().await.unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].original_url, "https://new.com");
    assert_eq!(listed[1].original_url, "https://old.com");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_delete_and_count_by_owner(pool: PgPool) {
    let alice = create_owner(&pool, "alice").await;
    let bob = create_owner(&pool, "bob").await;
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    let entry = repo
        .create(NewShortUrl::new("https://a.com".into(), "aaaaaaaa".into(), alice))
        .await
        .unwrap();

    assert_eq!(repo.count_by_owner(alice).await, Ok(1));
    assert_eq!(repo.count_by_owner(bob).await, Ok(0));

    assert_eq!(repo.delete(entry.id).await, Ok(true));
    assert_eq!(repo.delete(entry.id).await, Ok(false));
    assert_eq!(repo.find_by_id(entry.id).await, Ok(None));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_account_roles(pool: PgPool) {
    let owner = create_owner(&pool, "alice").await;
    let accounts = PgAccountRepository::new(Arc::new(pool));

    accounts.create_role(Role::Admin).await.unwrap();
    accounts.create_role(Role::Admin).await.unwrap();
    assert!(accounts.role_exists(Role::Admin).await.unwrap());

    accounts.assign_role(owner, Role::Admin).await.unwrap();

    let reloaded = accounts.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(reloaded.role, Some(Role::Admin));

    let duplicate = accounts
        .create(NewAccount {
            email: "alice@example.com".into(),
            username: "alice2".into(),
            password_hash: "hash".into(),
        })
        .await;
    assert!(matches!(duplicate, Err(DomainError::UserCreationFailed(_))));
}
