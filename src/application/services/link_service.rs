//! Slug admission and link resolution.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::LinkRecord;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::slug::SlugPolicy;
use tracing::debug;

/// Resolves request slugs to link records.
///
/// Admission always runs before the store is touched, so reserved or
/// malformed slugs never cost a lookup.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    policy: SlugPolicy,
    case_sensitive: bool,
    cache_max_age: Duration,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        policy: SlugPolicy,
        case_sensitive: bool,
        cache_max_age: Duration,
    ) -> Self {
        Self {
            link_repository,
            policy,
            case_sensitive,
            cache_max_age,
        }
    }

    /// Returns true if `slug` may be looked up at all.
    pub fn admits(&self, slug: &str) -> bool {
        self.policy.admits(slug)
    }

    /// Admits and resolves a slug in one step.
    ///
    /// Returns `Ok(None)` both for rejected slugs and for slugs with no link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the link store fails.
    pub async fn find_link(&self, slug: &str) -> Result<Option<LinkRecord>, AppError> {
        if !self.admits(slug) {
            debug!("Slug rejected by admission policy: {:?}", slug);
            return Ok(None);
        }

        self.resolve(slug).await
    }

    /// Looks a slug up in the link store.
    ///
    /// # Lookup Strategy
    ///
    /// - **Case sensitive**: one lookup with the slug as-is
    /// - **Case insensitive**: lowercase lookup first; if that misses and the
    ///   lowercase form differs, one more lookup with the original casing.
    ///   No other casing variants are tried.
    ///
    /// The second lookup keeps links created with mixed-case keys reachable
    /// after case-insensitive mode is switched on.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the link store fails.
    pub async fn resolve(&self, slug: &str) -> Result<Option<LinkRecord>, AppError> {
        if self.case_sensitive {
            return self.link_repository.get(slug, self.cache_max_age).await;
        }

        let lowercase = slug.to_lowercase();
        if let Some(link) = self
            .link_repository
            .get(&lowercase, self.cache_max_age)
            .await?
        {
            return Ok(Some(link));
        }

        if lowercase != slug {
            debug!("Lowercase lookup missed, retrying with original casing: {}", slug);
            return self.link_repository.get(slug, self.cache_max_age).await;
        }

        Ok(None)
    }

    /// Checks if the link store is reachable.
    pub async fn health_check(&self) -> bool {
        self.link_repository.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::utils::slug::DEFAULT_SLUG_PATTERN;
    use mockall::Sequence;

    const MAX_AGE: Duration = Duration::from_secs(60);

    fn link(url: &str) -> LinkRecord {
        LinkRecord::new(url)
    }

    fn service(repo: MockLinkRepository, case_sensitive: bool) -> LinkService {
        let policy = SlugPolicy::new(["dashboard"], DEFAULT_SLUG_PATTERN).unwrap();
        LinkService::new(Arc::new(repo), policy, case_sensitive, MAX_AGE)
    }

    #[tokio::test]
    async fn test_reserved_slug_never_reaches_store() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get().times(0);

        let result = service(repo, false).find_link("dashboard").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_malformed_slug_never_reaches_store() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get().times(0);

        let svc = service(repo, false);
        assert!(svc.find_link("not/a/slug").await.unwrap().is_none());
        assert!(svc.find_link("").await.unwrap().is_none());
        assert!(svc.find_link("bad--slug").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_case_insensitive_lowercase_first() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get()
            .withf(|slug, age| slug == "foo" && *age == MAX_AGE)
            .times(1)
            .returning(|_, _| Ok(Some(link("https://example.com/foo"))));

        let result = service(repo, false).find_link("FOO").await.unwrap();
        assert_eq!(result.unwrap().url, "https://example.com/foo");
    }

    #[tokio::test]
    async fn test_case_insensitive_falls_back_to_original_casing() {
        let mut seq = Sequence::new();
        let mut repo = MockLinkRepository::new();
        repo.expect_get()
            .withf(|slug, _| slug == "foo")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(None));
        repo.expect_get()
            .withf(|slug, _| slug == "Foo")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(Some(link("https://example.com/legacy"))));

        let result = service(repo, false).find_link("Foo").await.unwrap();
        assert_eq!(result.unwrap().url, "https://example.com/legacy");
    }

    #[tokio::test]
    async fn test_case_insensitive_fallback_tries_only_original_casing() {
        // Stored key is `FOO`; `Foo` misses as `foo` and as `Foo`, nothing else is tried.
        let mut repo = MockLinkRepository::new();
        repo.expect_get()
            .withf(|slug, _| slug == "foo" || slug == "Foo")
            .times(2)
            .returning(|_, _| Ok(None));
        repo.expect_get().withf(|slug, _| slug == "FOO").times(0);

        let result = service(repo, false).find_link("Foo").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_case_insensitive_lowercase_slug_single_lookup() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get()
            .withf(|slug, _| slug == "foo")
            .times(1)
            .returning(|_, _| Ok(None));

        let result = service(repo, false).find_link("foo").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_case_sensitive_uses_slug_as_is() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get()
            .withf(|slug, _| slug == "Foo")
            .times(1)
            .returning(|_, _| Ok(None));

        let result = service(repo, true).find_link("Foo").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_store_error_is_not_a_miss() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get().times(1).returning(|_, _| {
            Err(AppError::internal(
                "Link store unavailable",
                serde_json::json!({}),
            ))
        });

        let result = service(repo, false).find_link("FOO").await;
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
