//! Sheet cache
//!
//! Every page load reads several sheets. `CachedSource` keeps successful
//! reads for a fixed TTL so a burst of requests hits the backing source
//! once. A TTL of zero disables caching.

use super::*;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// TTL cache in front of another source
pub struct CachedSource<S> {
    inner: S,
    ttl: Duration,
    entries: RwLock<HashMap<String, (Instant, Sheet)>>,
}

impl<S: SheetSource> CachedSource<S> {
    /// Wrap a source
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Wrapped source
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of cached sheets, including expired ones not yet replaced
    pub async fn cached_count(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl<S: SheetSource> SheetSource for CachedSource<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn fetch(&self, sheet: &str) -> SheetResult<Sheet> {
        if self.ttl.is_zero() {
            return self.inner.fetch(sheet).await;
        }

        {
            let entries = self.entries.read().await;
            if let Some((loaded_at, cached)) = entries.get(sheet) {
                if loaded_at.elapsed() < self.ttl {
                    return Ok(cached.clone());
                }
            }
        }

        let fresh = self.inner.fetch(sheet).await?;
        self.entries
            .write()
            .await
            .insert(sheet.to_string(), (Instant::now(), fresh.clone()));
        Ok(fresh)
    }

    async fn ping(&self) -> SheetResult<()> {
        self.inner.ping().await
    }

    async fn invalidate(&self) {
        let mut entries = self.entries.write().await;
        let dropped = entries.len();
        entries.clear();
        tracing::info!(dropped, "Sheet cache invalidated");
        self.inner.invalidate().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SheetSource for CountingSource {
        fn name(&self) -> &str {
            "counting"
        }

        async fn fetch(&self, sheet: &str) -> SheetResult<Sheet> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Sheet::from_rows(sheet, &["a"], &[&["1"]]))
        }

        async fn ping(&self) -> SheetResult<()> {
            Ok(())
        }
    }

    fn counting() -> CountingSource {
        CountingSource {
            calls: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn test_hits_inner_once_within_ttl() {
        let cached = CachedSource::new(counting(), Duration::from_secs(60));
        cached.fetch("okr").await.unwrap();
        cached.fetch("okr").await.unwrap();
        cached.fetch("swot").await.unwrap();

        assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 2);
        assert_eq!(cached.cached_count().await, 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_reload() {
        let cached = CachedSource::new(counting(), Duration::from_secs(60));
        cached.fetch("okr").await.unwrap();
        cached.invalidate().await;
        cached.fetch("okr").await.unwrap();

        assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_ttl_disables_cache() {
        let cached = CachedSource::new(counting(), Duration::ZERO);
        cached.fetch("okr").await.unwrap();
        cached.fetch("okr").await.unwrap();

        assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 2);
        assert_eq!(cached.cached_count().await, 0);
    }
}
