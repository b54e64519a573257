//! PostgreSQL link store tests.
//!
//! Run with `DATABASE_URL` pointing at a disposable server:
//! `cargo test --test repository_link -- --ignored`

use linkmagic::domain::entities::NewLink;
use linkmagic::domain::repositories::{CreateOutcome, LinkRepository};
use linkmagic::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(code: &str, url: &str) -> NewLink {
    NewLink::now(code.to_string(), url.to_string())
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_create_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let outcome = repo
        .create(new_link("test123", "https://example.com"))
        .await
        .unwrap();

    match outcome {
        CreateOutcome::Created(record) => {
            assert_eq!(record.code, "test123");
            assert_eq!(record.original_url, "https://example.com");
        }
        CreateOutcome::AlreadyExists => panic!("fresh code reported as taken"),
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_create_existing_code_keeps_first_binding(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("dup001", "https://first.com"))
        .await
        .unwrap();
    let second = repo
        .create(new_link("dup001", "https://second.com"))
        .await
        .unwrap();

    assert_eq!(second, CreateOutcome::AlreadyExists);

    let stored = repo.get("dup001").await.unwrap().unwrap();
    assert_eq!(stored.original_url, "https://first.com");
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_exists_and_get(pool: PgPool) {
    sqlx::query("INSERT INTO links (code, original_url) VALUES ($1, $2)")
        .bind("abc123")
        .bind("https://example.com")
        .execute(&pool)
        .await
        .unwrap();

    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.exists("abc123").await.unwrap());
    assert!(!repo.exists("notfound").await.unwrap());

    let record = repo.get("abc123").await.unwrap().unwrap();
    assert_eq!(record.original_url, "https://example.com");
    assert!(repo.get("notfound").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_concurrent_create_same_code_single_winner(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.create(new_link("race01", &format!("https://example.com/{i}")))
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        if let CreateOutcome::Created(_) = handle.await.unwrap() {
            created += 1;
        }
    }

    assert_eq!(created, 1);
}
