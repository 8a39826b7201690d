use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

struct Entry {
    path: String,
    stored_at: Instant,
    body: Value,
}

/// Short-lived cache of successful GET bodies.
///
/// Entries are per session: the key starts with a SHA-256 digest of the token,
/// so raw tokens never sit in memory as map keys. A mutation invalidates every
/// session's entries under the same collection.
pub struct ResponseCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, Entry>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, token: &str, path: &str, query: &[(String, String)]) -> Option<Value> {
        let key = cache_key(token, path, query);
        let entries = self.entries.read().await;
        let entry = entries.get(&key)?;
        (entry.stored_at.elapsed() < self.ttl).then(|| entry.body.clone())
    }

    pub async fn insert(&self, token: &str, path: &str, query: &[(String, String)], body: Value) {
        let key = cache_key(token, path, query);
        let mut entries = self.entries.write().await;
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        entries.insert(
            key,
            Entry {
                path: path.to_string(),
                stored_at: Instant::now(),
                body,
            },
        );
    }

    /// Drops cached bodies for the collection `path` belongs to.
    pub async fn invalidate(&self, path: &str) {
        let prefix = collection_prefix(path);
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.path.starts_with(prefix));
        let dropped = before - entries.len();
        if dropped > 0 {
            tracing::debug!(prefix, dropped, "Invalidated cached responses");
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

/// `/v1/customers/cus_1/x` ⇒ `/v1/customers`
pub fn collection_prefix(path: &str) -> &str {
    let mut slashes = path.match_indices('/').map(|(i, _)| i);
    let _root = slashes.next();
    let _version = slashes.next();
    match slashes.next() {
        Some(end) => &path[..end],
        None => path,
    }
}

fn cache_key(token: &str, path: &str, query: &[(String, String)]) -> String {
    let digest = hex::encode(Sha256::digest(token.as_bytes()));
    let mut key = format!("{}|{}", digest, path);
    if !query.is_empty() {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query)
            .finish();
        key.push('?');
        key.push_str(&encoded);
    }
    key
}
