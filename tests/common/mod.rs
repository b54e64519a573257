#![allow(dead_code)]

use async_trait::async_trait;
use linkmagic::application::services::{AllocatorSettings, CodeAllocator, QrCodeService};
use linkmagic::domain::entities::{LinkRecord, NewLink};
use linkmagic::domain::repositories::{CreateOutcome, LinkRepository, StoreError};
use linkmagic::infrastructure::cache::NullCache;
use linkmagic::infrastructure::persistence::InMemoryLinkRepository;
use linkmagic::state::AppState;
use linkmagic::utils::code_generator::RandomCodeGenerator;
use std::sync::Arc;
use std::time::Duration;

pub const BASE_URL: &str = "https://s.test.com";
pub const HOME_URL: &str = "https://home.test.com/";

pub fn test_settings() -> AllocatorSettings {
    AllocatorSettings {
        max_attempts: 5,
        deadline: Duration::from_secs(5),
    }
}

pub fn create_test_state() -> (AppState, Arc<InMemoryLinkRepository>) {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let state = create_test_state_with(repo.clone(), 6);
    (state, repo)
}

pub fn create_test_state_with(links: Arc<dyn LinkRepository>, code_length: usize) -> AppState {
    let allocator = CodeAllocator::new(
        links.clone(),
        Arc::new(RandomCodeGenerator::new(code_length)),
        test_settings(),
    );

    AppState::new(
        links,
        Arc::new(NullCache::new()),
        allocator,
        QrCodeService::default(),
        BASE_URL,
        HOME_URL,
    )
}

pub async fn create_test_link(repo: &dyn LinkRepository, code: &str, url: &str) -> LinkRecord {
    match repo
        .create(NewLink::now(code.to_string(), url.to_string()))
        .await
        .unwrap()
    {
        CreateOutcome::Created(record) => record,
        CreateOutcome::AlreadyExists => panic!("code {code} already taken"),
    }
}

/// Link store whose every call fails as if the database were down.
pub struct UnavailableRepository;

#[async_trait]
impl LinkRepository for UnavailableRepository {
    async fn exists(&self, _code: &str) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn get(&self, _code: &str) -> Result<Option<LinkRecord>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn create(&self, _new_link: NewLink) -> Result<CreateOutcome, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}
