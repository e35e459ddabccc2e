use std::{
    collections::HashMap,
    fs::{self, File},
    io::{self, ErrorKind, Write},
    path::{Path, PathBuf},
};

use fs4::fs_std::FileExt;
use tracing::{debug, warn};

/// Durable slots addressed by a key. Every `set` replaces the whole value of a slot.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Returns `None` when nothing was ever written under the key.
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>>;

    fn set(&mut self, key: &str, value: &[u8]) -> io::Result<()>;
}

/// Keeps each slot in its own `<key>.json` file inside a directory.
///
/// Writes go to a temporary file which is then renamed over the slot, so a crash never leaves a
/// half written slot behind. A sidecar lock file serializes writers across processes.
pub struct FileKeyValueStore {
    dir: PathBuf,
}

const LOCK_FILE_NAME: &str = ".lock";

impl FileKeyValueStore {
    pub fn new(dir: PathBuf) -> Result<Self, io::Error> {
        fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn open_lock(&self) -> io::Result<File> {
        File::options()
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.dir.join(LOCK_FILE_NAME))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        let path = self.slot_path(key);
        debug!("Reading slot {path:?}");

        let lock = self.open_lock()?;
        FileExt::lock_shared(&lock)?;
        let result = fs::read(&path);
        FileExt::unlock(&lock)?;

        match result {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> io::Result<()> {
        let path = self.slot_path(key);
        let temp_path = self.dir.join(format!("{key}.json.tmp"));
        debug!("Writing {} bytes into {path:?}", value.len());

        let lock = self.open_lock()?;
        FileExt::lock_exclusive(&lock)?;
        let result = write_replacing(&temp_path, &path, value);
        FileExt::unlock(&lock)?;
        result
    }
}

fn write_replacing(temp_path: &Path, path: &Path, value: &[u8]) -> io::Result<()> {
    let result = write_temp(temp_path, value).and_then(|()| fs::rename(temp_path, path));
    if result.is_err() {
        if let Err(e) = fs::remove_file(temp_path) {
            if e.kind() != ErrorKind::NotFound {
                warn!("Failed to remove {temp_path:?} {e:?}");
            }
        }
    }
    result
}

fn write_temp(temp_path: &Path, value: &[u8]) -> io::Result<()> {
    let mut file = File::create(temp_path)?;
    file.write_all(value)?;
    file.sync_all()
}

/// Store that lives only as long as the process. Handy for tests and previews.
#[derive(Debug, Default, Clone)]
pub struct MemoryKeyValueStore {
    slots: HashMap<String, Vec<u8>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> io::Result<()> {
        self.slots.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
