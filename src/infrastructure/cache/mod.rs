//! Caching layer in front of the link store.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`MemoryCache`] - Bounded in-process Moka cache honouring a freshness window
//! - [`NullCache`] - No-op implementation for disabled caching
//!
//! [`CachedLinkRepository`] puts either of them in front of a link store.

mod cached_link_repository;
mod memory_cache;
mod null_cache;
mod service;

pub use cached_link_repository::CachedLinkRepository;
pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use service::CacheService;
