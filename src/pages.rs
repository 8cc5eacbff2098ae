//! Page store: loads and caches static response bodies by logical name.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use bytes::Bytes;
use tokio::sync::RwLock;

/// Read-through cache of page bodies, shared by every connection.
///
/// The first `get` for a name loads `<dir>/<name>` from disk; every later
/// call returns the cached bytes without re-reading. Content is immutable
/// for the process lifetime, so concurrent first loads for the same name
/// may race but converge on a single stored value. The lock is never held
/// across file I/O, so loads for different names do not block each other.
pub struct PageStore {
    dir: PathBuf,
    cache: RwLock<HashMap<String, Bytes>>,
}

impl PageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached body for `name`, loading it on first access.
    ///
    /// A missing backing file is a deployment defect rather than a
    /// per-request condition: the router only asks for names it owns, and
    /// startup preloads them all.
    pub async fn get(&self, name: &str) -> anyhow::Result<Bytes> {
        if let Some(body) = self.cache.read().await.get(name) {
            return Ok(body.clone());
        }

        let path = self.dir.join(name);
        let body = tokio::fs::read(&path)
            .await
            .with_context(|| format!("missing page content: {}", path.display()))?;
        let body = Bytes::from(body);

        let mut cache = self.cache.write().await;
        Ok(cache.entry(name.to_string()).or_insert(body).clone())
    }

    /// Loads every named page so a misconfigured deployment fails at
    /// startup instead of mid-request.
    pub async fn preload(&self, names: &[&str]) -> anyhow::Result<()> {
        for name in names {
            self.get(name).await?;
        }

        Ok(())
    }
}
