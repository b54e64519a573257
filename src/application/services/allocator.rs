//! Short code allocation with bounded collision retry.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tracing::{debug, info, warn};

use crate::domain::entities::{LinkRecord, NewLink};
use crate::domain::repositories::{CreateOutcome, LinkRepository, StoreError};
use crate::utils::code_generator::CodeGenerator;
use crate::utils::url_scheme::has_http_scheme;

/// Default number of candidate codes tried per allocation.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Default wall-clock budget for one allocation.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(5);

/// Errors returned by [`CodeAllocator::allocate`].
///
/// Each variant implies a different remedy: fix the URL, retry later, or fix
/// the store configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocateError {
    #[error("Invalid URL: {0}")]
    InvalidInput(String),

    #[error("Could not allocate a unique short code after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    #[error("Link store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Retry bounds for [`CodeAllocator`].
#[derive(Debug, Clone, Copy)]
pub struct AllocatorSettings {
    pub max_attempts: usize,
    pub deadline: Duration,
}

impl Default for AllocatorSettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            deadline: DEFAULT_DEADLINE,
        }
    }
}

/// Allocates unique short codes and persists the mapping.
///
/// # Algorithm
///
/// For up to `max_attempts` candidates:
/// 1. Generate a candidate code
/// 2. Skip it if the store already has it
/// 3. Otherwise insert it atomically; a lost race counts as a collision
///
/// Store failures are retried like collisions, except on the final attempt
/// where they are reported as [`AllocateError::StoreUnavailable`]. The whole
/// loop runs under a wall-clock deadline.
pub struct CodeAllocator {
    link_repository: Arc<dyn LinkRepository>,
    generator: Arc<dyn CodeGenerator>,
    settings: AllocatorSettings,
}

impl CodeAllocator {
    /// Creates a new allocator.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        generator: Arc<dyn CodeGenerator>,
        settings: AllocatorSettings,
    ) -> Self {
        Self {
            link_repository,
            generator,
            settings,
        }
    }

    /// Allocates a fresh code for `original_url` and stores the record.
    ///
    /// # Errors
    ///
    /// - [`AllocateError::InvalidInput`] if the URL is empty or not `http(s)://`;
    ///   the store is not touched
    /// - [`AllocateError::AllocationExhausted`] if every attempt collided
    /// - [`AllocateError::StoreUnavailable`] if the final attempt hit a store
    ///   failure or the deadline elapsed
    pub async fn allocate(&self, original_url: &str) -> Result<LinkRecord, AllocateError> {
        validate_original_url(original_url)?;

        match tokio::time::timeout(self.settings.deadline, self.allocate_with_retry(original_url))
            .await
        {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    deadline_ms = self.settings.deadline.as_millis() as u64,
                    "Allocation deadline exceeded"
                );
                counter!("allocations_total", "outcome" => "deadline_exceeded").increment(1);
                Err(AllocateError::StoreUnavailable(format!(
                    "no response from link store within {} ms",
                    self.settings.deadline.as_millis()
                )))
            }
        }
    }

    async fn allocate_with_retry(&self, original_url: &str) -> Result<LinkRecord, AllocateError> {
        let max_attempts = self.settings.max_attempts;

        for attempt in 1..=max_attempts {
            counter!("allocation_attempts_total").increment(1);
            let code = self.generator.generate();

            match self.try_claim(&code, original_url).await {
                Ok(Some(record)) => {
                    info!(code = %record.code, attempt, "Allocated short code");
                    counter!("allocations_total", "outcome" => "created").increment(1);
                    return Ok(record);
                }
                Ok(None) => {
                    debug!(code = %code, attempt, "Short code collision");
                    counter!("allocation_collisions_total").increment(1);
                }
                Err(e) if attempt == max_attempts => {
                    warn!(attempt, error = %e, "Link store failed on final allocation attempt");
                    counter!("allocations_total", "outcome" => "store_unavailable").increment(1);
                    return Err(AllocateError::StoreUnavailable(e.to_string()));
                }
                Err(e) => {
                    warn!(attempt, error = %e, "Link store failed during allocation, retrying");
                }
            }
        }

        warn!(attempts = max_attempts, "Short code allocation exhausted");
        counter!("allocations_total", "outcome" => "exhausted").increment(1);
        Err(AllocateError::AllocationExhausted {
            attempts: max_attempts,
        })
    }

    /// Returns `Ok(None)` when `code` is already taken.
    async fn try_claim(
        &self,
        code: &str,
        original_url: &str,
    ) -> Result<Option<LinkRecord>, StoreError> {
        if self.link_repository.exists(code).await? {
            return Ok(None);
        }

        let new_link = NewLink::now(code.to_string(), original_url.to_string());
        match self.link_repository.create(new_link).await? {
            CreateOutcome::Created(record) => Ok(Some(record)),
            CreateOutcome::AlreadyExists => Ok(None),
        }
    }
}

fn validate_original_url(original_url: &str) -> Result<(), AllocateError> {
    if original_url.is_empty() {
        return Err(AllocateError::InvalidInput(
            "URL must not be empty".to_string(),
        ));
    }

    if !has_http_scheme(original_url) {
        return Err(AllocateError::InvalidInput(
            "URL must start with http:// or https://".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Hands out a fixed list of candidate codes in order.
    struct SequenceGenerator {
        codes: Mutex<VecDeque<String>>,
    }

    impl SequenceGenerator {
        fn new(codes: &[&str]) -> Self {
            Self {
                codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
            }
        }
    }

    impl CodeGenerator for SequenceGenerator {
        fn generate(&self) -> String {
            self.codes
                .lock()
                .unwrap()
                .pop_front()
                .expect("sequence exhausted")
        }
    }

    fn allocator(repo: MockLinkRepository, codes: &[&str]) -> CodeAllocator {
        CodeAllocator::new(
            Arc::new(repo),
            Arc::new(SequenceGenerator::new(codes)),
            AllocatorSettings::default(),
        )
    }

    fn created(new_link: NewLink) -> Result<CreateOutcome, StoreError> {
        Ok(CreateOutcome::Created(new_link.into_record()))
    }

    #[tokio::test]
    async fn test_allocate_success_first_attempt() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_exists()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(false));

        mock_repo
            .expect_create()
            .withf(|new_link| {
                new_link.code == "abc123" && new_link.original_url == "https://example.com"
            })
            .times(1)
            .returning(created);

        let service = allocator(mock_repo, &["abc123"]);

        let record = service.allocate("https://example.com").await.unwrap();
        assert_eq!(record.code, "abc123");
        assert_eq!(record.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_allocate_rejects_invalid_input_without_store_calls() {
        for input in ["", "ftp://x", "not-a-url"] {
            // No expectations: any store call panics.
            let service = allocator(MockLinkRepository::new(), &[]);

            let result = service.allocate(input).await;

            assert!(
                matches!(result, Err(AllocateError::InvalidInput(_))),
                "input {:?} should be rejected",
                input
            );
        }
    }

    #[tokio::test]
    async fn test_allocate_exhausted_after_five_collisions() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_exists().times(5).returning(|_| Ok(true));
        mock_repo.expect_create().times(0);

        let service = allocator(mock_repo, &["aaaaa1", "aaaaa2", "aaaaa3", "aaaaa4", "aaaaa5"]);

        let result = service.allocate("https://example.com").await;

        assert_eq!(
            result.unwrap_err(),
            AllocateError::AllocationExhausted { attempts: 5 }
        );
    }

    #[tokio::test]
    async fn test_allocate_uses_third_candidate_after_two_collisions() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_exists()
            .times(3)
            .returning(|code| Ok(code != "third3"));

        mock_repo
            .expect_create()
            .withf(|new_link| new_link.code == "third3")
            .times(1)
            .returning(created);

        let service = allocator(mock_repo, &["first1", "secnd2", "third3"]);

        let record = service.allocate("https://example.com").await.unwrap();
        assert_eq!(record.code, "third3");
    }

    #[tokio::test]
    async fn test_allocate_lost_race_counts_as_collision() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_exists().times(2).returning(|_| Ok(false));

        mock_repo
            .expect_create()
            .withf(|new_link| new_link.code == "raced1")
            .times(1)
            .returning(|_| Ok(CreateOutcome::AlreadyExists));

        mock_repo
            .expect_create()
            .withf(|new_link| new_link.code == "fresh2")
            .times(1)
            .returning(created);

        let service = allocator(mock_repo, &["raced1", "fresh2"]);

        let record = service.allocate("https://example.com").await.unwrap();
        assert_eq!(record.code, "fresh2");
    }

    #[tokio::test]
    async fn test_allocate_recovers_from_transient_store_failure() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_exists()
            .withf(|code| code == "fail01")
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("connection reset".to_string())));

        mock_repo
            .expect_exists()
            .withf(|code| code == "good02")
            .times(1)
            .returning(|_| Ok(false));

        mock_repo.expect_create().times(1).returning(created);

        let service = allocator(mock_repo, &["fail01", "good02"]);

        let record = service.allocate("https://example.com").await.unwrap();
        assert_eq!(record.code, "good02");
    }

    #[tokio::test]
    async fn test_allocate_store_failure_on_final_attempt() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_exists()
            .times(5)
            .returning(|_| Err(StoreError::Unavailable("connection refused".to_string())));
        mock_repo.expect_create().times(0);

        let service = allocator(mock_repo, &["c1", "c2", "c3", "c4", "c5"]);

        let result = service.allocate("https://example.com").await;

        match result {
            Err(AllocateError::StoreUnavailable(message)) => {
                assert!(message.contains("connection refused"));
            }
            other => panic!("expected StoreUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_allocate_transient_failures_then_final_collision_is_exhausted() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_exists()
            .times(5)
            .returning(|code| {
                if code == "c5" {
                    Ok(true)
                } else {
                    Err(StoreError::Backend("timeout".to_string()))
                }
            });

        let service = allocator(mock_repo, &["c1", "c2", "c3", "c4", "c5"]);

        let result = service.allocate("https://example.com").await;

        assert_eq!(
            result.unwrap_err(),
            AllocateError::AllocationExhausted { attempts: 5 }
        );
    }

    #[tokio::test]
    async fn test_allocate_write_failure_on_final_attempt() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_exists().times(1).returning(|_| Ok(false));
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(StoreError::Backend("disk full".to_string())));

        let service = CodeAllocator::new(
            Arc::new(mock_repo),
            Arc::new(SequenceGenerator::new(&["only01"])),
            AllocatorSettings {
                max_attempts: 1,
                deadline: DEFAULT_DEADLINE,
            },
        );

        let result = service.allocate("https://example.com").await;
        assert!(matches!(result, Err(AllocateError::StoreUnavailable(_))));
    }

    struct StalledRepository;

    #[async_trait]
    impl LinkRepository for StalledRepository {
        async fn exists(&self, _code: &str) -> Result<bool, StoreError> {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(false)
        }

        async fn get(&self, _code: &str) -> Result<Option<LinkRecord>, StoreError> {
            Ok(None)
        }

        async fn create(&self, new_link: NewLink) -> Result<CreateOutcome, StoreError> {
            Ok(CreateOutcome::Created(new_link.into_record()))
        }
    }

    #[tokio::test]
    async fn test_allocate_deadline_reports_store_unavailable() {
        let service = CodeAllocator::new(
            Arc::new(StalledRepository),
            Arc::new(SequenceGenerator::new(&["slow01"])),
            AllocatorSettings {
                max_attempts: 5,
                deadline: Duration::from_millis(20),
            },
        );

        let result = service.allocate("https://example.com").await;

        match result {
            Err(AllocateError::StoreUnavailable(message)) => {
                assert!(message.contains("20 ms"));
            }
            other => panic!("expected StoreUnavailable, got {:?}", other),
        }
    }
}
