//! Object-URL style handles for in-memory bytes.
//!
//! A handle is minted for a blob, handed to whoever needs to reference the
//! bytes (the audio sink, a cover renderer) and must be revoked once it is
//! no longer in use. [`LiveHandle`] is a one-entry slot that always revokes
//! its previous handle before minting the next.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// Opaque handle to bytes registered in [`ObjectUrls`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bytes behind a live handle.
#[derive(Debug, Clone)]
pub struct UrlEntry {
    pub mime: String,
    pub data: Arc<[u8]>,
}

/// Table of live handles plus lifetime counters.
#[derive(Debug, Default)]
pub struct ObjectUrls {
    next: u64,
    live: HashMap<ObjectUrl, UrlEntry>,
    created: u64,
    revoked: u64,
}

impl ObjectUrls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, mime: impl Into<String>, data: Arc<[u8]>) -> ObjectUrl {
        self.next += 1;
        let url = ObjectUrl(format!("blob:encore/{}", self.next));
        self.live.insert(
            url.clone(),
            UrlEntry {
                mime: mime.into(),
                data,
            },
        );
        self.created += 1;
        url
    }

    /// Drop `url` from the table. Returns `false` if it was not live.
    pub fn revoke(&mut self, url: &ObjectUrl) -> bool {
        let was_live = self.live.remove(url).is_some();
        if was_live {
            self.revoked += 1;
        }
        was_live
    }

    pub fn resolve(&self, url: &ObjectUrl) -> Option<&UrlEntry> {
        self.live.get(url)
    }

    pub fn is_live(&self, url: &ObjectUrl) -> bool {
        self.live.contains_key(url)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn created_count(&self) -> u64 {
        self.created
    }

    pub fn revoked_count(&self) -> u64 {
        self.revoked
    }
}

/// At most one live handle at a time.
#[derive(Debug, Default)]
pub struct LiveHandle {
    current: Option<ObjectUrl>,
}

impl LiveHandle {
    pub fn get(&self) -> Option<&ObjectUrl> {
        self.current.as_ref()
    }

    /// Revoke the held handle (if any), then mint and hold a new one.
    pub fn replace(
        &mut self,
        urls: &mut ObjectUrls,
        mime: impl Into<String>,
        data: Arc<[u8]>,
    ) -> ObjectUrl {
        self.release(urls);
        let url = urls.create(mime, data);
        self.current = Some(url.clone());
        url
    }

    /// Revoke and forget the held handle. No-op when empty.
    pub fn release(&mut self, urls: &mut ObjectUrls) {
        if let Some(url) = self.current.take() {
            urls.revoke(&url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(b: &[u8]) -> Arc<[u8]> {
        Arc::from(b)
    }

    #[test]
    fn create_resolve_and_revoke() {
        let mut urls = ObjectUrls::new();
        let url = urls.create("audio/mpeg", bytes(b"abc"));
        assert!(url.as_str().starts_with("blob:encore/"));
        assert_eq!(&*urls.resolve(&url).unwrap().data, b"abc");

        assert!(urls.revoke(&url));
        assert!(!urls.revoke(&url));
        assert!(urls.resolve(&url).is_none());
        assert_eq!(urls.created_count(), 1);
        assert_eq!(urls.revoked_count(), 1);
    }

    #[test]
    fn live_handle_releases_before_replacing() {
        let mut urls = ObjectUrls::new();
        let mut slot = LiveHandle::default();

        let first = slot.replace(&mut urls, "audio/mpeg", bytes(b"one"));
        let second = slot.replace(&mut urls, "audio/mpeg", bytes(b"two"));

        assert_ne!(first, second);
        assert!(!urls.is_live(&first));
        assert!(urls.is_live(&second));
        assert_eq!(urls.live_count(), 1);

        slot.release(&mut urls);
        slot.release(&mut urls);
        assert_eq!(urls.live_count(), 0);
        assert_eq!(urls.revoked_count(), 2);
        assert!(slot.get().is_none());
    }
}
