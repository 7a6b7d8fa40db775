use axum::http::{HeaderMap, header};
use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use crate::error::StorageError;

/// Key under which the session token is kept in client storage.
pub const TOKEN_KEY: &str = "token";

// 1. TokenStore Contract
/// TokenStore
///
/// The persistent key-value client storage the guard reads the session token
/// from. The guard itself only ever calls `get`; writes belong to login and
/// logout. Implementations swap freely: an on-disk store for library use, the
/// request's cookies in the HTTP host, and an in-memory map for tests.
pub trait TokenStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// has_token
    ///
    /// Token presence as the guard sees it. An empty string counts as no token.
    fn has_token(&self) -> bool {
        self.get(TOKEN_KEY).is_some_and(|token| !token.is_empty())
    }
}

/// StorageState
///
/// The shared handle used wherever a long-lived store is passed around.
pub type StorageState = Arc<dyn TokenStore>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panic while holding the lock cannot leave a HashMap half-written.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// 2. In-Memory Implementation
/// MemoryTokenStore
///
/// Process-local storage. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds a session token.
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        lock(&store.entries).insert(TOKEN_KEY.to_string(), token.to_string());
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}

// 3. On-Disk Implementation
/// FileTokenStore
///
/// Client storage persisted as a flat JSON object. Loaded once on open and
/// written through on every change, so a token survives a restart the way
/// browser storage survives a reload.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileTokenStore {
    /// open
    ///
    /// Loads the store at `path`. A missing file is an empty store; it is
    /// created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries: HashMap<String, String> = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => HashMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "token store opened");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = lock(&self.entries);
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = lock(&self.entries);
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

// 4. Cookie-Backed Implementation
/// CookieTokenStore
///
/// A read-only view over the cookies of one HTTP request. Used by the host to
/// run the guard server-side; cookies are changed through `Set-Cookie`
/// responses, never through this store.
#[derive(Debug, Clone, Default)]
pub struct CookieTokenStore {
    cookies: HashMap<String, String>,
}

impl CookieTokenStore {
    /// Parses every `Cookie` header of a request. On duplicate names the
    /// first occurrence wins: browsers send the most specific `Path` first.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut cookies = HashMap::new();
        for (name, value) in headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(parse_cookie_header)
        {
            cookies.entry(name).or_insert(value);
        }
        Self { cookies }
    }
}

/// parse_cookie_header
///
/// Splits a `Cookie` header value (`a=1; b=2`) into name/value pairs.
/// Pairs without `=` are skipped; surrounding double quotes are removed.
fn parse_cookie_header(value: &str) -> impl Iterator<Item = (String, String)> + '_ {
    value.split(';').filter_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let value = value.trim().trim_matches('"');
        Some((name.to_string(), value.to_string()))
    })
}

impl TokenStore for CookieTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.cookies.get(key).cloned()
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::ReadOnly)
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::ReadOnly)
    }
}
