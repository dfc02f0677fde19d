//! Key-value persistence for values that outlive a run (best score, schema
//! marker).
//!
//! The rules engine only sees the [`KeyValueStore`] port. `JsonFileStore` backs
//! it with a flat JSON object in `~/.flappy/storage.json`; `MemoryStore` keeps
//! everything in process.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Integer key-value storage injected into the rules engine.
pub trait KeyValueStore {
    /// `Ok(None)` when the key has never been written.
    fn read_integer(&self, key: &str) -> io::Result<Option<i64>>;
    fn write_integer(&mut self, key: &str, value: i64) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn read_integer(&self, key: &str) -> io::Result<Option<i64>> {
        (**self).read_integer(key)
    }

    fn write_integer(&mut self, key: &str, value: i64) -> io::Result<()> {
        (**self).write_integer(key, value)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        (**self).remove(key)
    }
}

/// In-process store. Lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read_integer(&self, key: &str) -> io::Result<Option<i64>> {
        Ok(self.values.get(key).copied())
    }

    fn write_integer(&mut self, key: &str, value: i64) -> io::Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Get the ~/.flappy/ directory path, creating it if needed.
pub fn flappy_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".flappy");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.flappy/.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(flappy_dir()?.join(filename))
}

/// Save a value as pretty-printed JSON, creating parent directories.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}

/// Store persisted as a single JSON object of integers.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.flappy/<filename>`.
    pub fn in_flappy_dir(filename: &str) -> io::Result<Self> {
        Ok(Self::new(save_path(filename)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_map(&self) -> io::Result<BTreeMap<String, i64>> {
        match fs::read_to_string(&self.path) {
            Ok(json) => serde_json::from_str(&json)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e),
        }
    }

    /// Like `load_map`, but a corrupt file is treated as empty so the next
    /// write replaces it.
    fn load_map_for_write(&self) -> io::Result<BTreeMap<String, i64>> {
        match self.load_map() {
            Err(e) if e.kind() == io::ErrorKind::InvalidData => Ok(BTreeMap::new()),
            other => other,
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn read_integer(&self, key: &str) -> io::Result<Option<i64>> {
        Ok(self.load_map()?.get(key).copied())
    }

    fn write_integer(&mut self, key: &str, value: i64) -> io::Result<()> {
        let mut map = self.load_map_for_write()?;
        map.insert(key.to_string(), value);
        save_json(&self.path, &map)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        let mut map = self.load_map_for_write()?;
        if map.remove(key).is_some() {
            save_json(&self.path, &map)?;
        }
        Ok(())
    }
}
