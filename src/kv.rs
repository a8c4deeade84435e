use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Durable per-installation key-value state: the server-side stand-in for the
/// UI's localStorage bookkeeping of seen cards and favorites.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: HashMap<String, String>,
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON file on disk, rewritten on every set. The state is a handful of keys,
/// so a full rewrite is fine.
#[derive(Debug)]
pub struct FileKv {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileKv {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("corrupt state file {:?}", path))?,
            Err(_) => HashMap::new(),
        };
        Ok(Self { path, entries })
    }

    fn persist(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("failed creating state directory {:?}", dir))?;
            }
        }
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed writing state file {:?}", self.path))?;
        Ok(())
    }
}

impl KvStore for FileKv {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }
}

/// Key naming follows the UI's `snw:<thing>:v1` scheme.
pub const RECENT_KEY: &str = "snw:recentAddresses:v1";

const RECENT_LIMIT: usize = 20;

/// Moves `address` to the front of the recently-queried list.
pub fn record_recent(store: &mut dyn KvStore, address: &str) -> Result<()> {
    let mut addresses = recent(store);
    addresses.retain(|a| a != address);
    addresses.insert(0, address.to_string());
    addresses.truncate(RECENT_LIMIT);
    store.set(RECENT_KEY, &serde_json::to_string(&addresses)?)
}

pub fn recent(store: &dyn KvStore) -> Vec<String> {
    store
        .get(RECENT_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}
