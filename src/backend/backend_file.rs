use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::PathBuf;

use log::{error, trace};

use super::{FindError, Storage};

mod kv;
use kv::KeyValues;

/// Every key lives in one text file, rewritten whole on each change.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<KeyValues, FindError> {
        let file = File::open(&self.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                return FindError::NotFound;
            }
            error!("open {:?}: {e:?}", self.path);
            FindError::Internal
        })?;

        kv::read(file)
    }

    /// Like `read`, but a missing file is an empty store and a damaged one
    /// is an error, so a write never clobbers data we couldn't parse.
    fn read_for_update(&self) -> io::Result<KeyValues> {
        match self.read() {
            Ok(kv) => Ok(kv),
            Err(FindError::NotFound) => Ok(KeyValues::new()),
            Err(FindError::Internal) => Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("{:?} is damaged, refusing to overwrite", self.path),
            )),
        }
    }

    fn write(&self, keyvalues: &KeyValues) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;

        kv::write(file, keyvalues)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.read() {
            Ok(mut kv) => kv.remove(key),
            Err(FindError::NotFound) => None,
            Err(FindError::Internal) => {
                error!("couldn't read {:?} for \"{key}\"", self.path);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        let mut kv = self.read_for_update()?;
        kv.insert(key.into(), value.into());

        trace!("writing \"{key}\" to {:?}", self.path);
        self.write(&kv)
    }

    fn delete(&mut self, key: &str) -> io::Result<()> {
        let mut kv = self.read_for_update()?;
        if kv.remove(key).is_none() {
            return Ok(());
        }

        trace!("removing \"{key}\" from {:?}", self.path);
        self.write(&kv)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::io::Write;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.txt");
        let mut storage = FileStorage::new(&path);

        assert_eq!(storage.get("users"), None);
        storage.delete("users").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.txt");

        {
            let mut storage = FileStorage::new(&path);
            storage.set("users", r#"{"alice":{"password":"x"}}"#).unwrap();
            storage.set("currentUser", r#"{"username":"alice"}"#).unwrap();
            storage.delete("currentUser").unwrap();
        }

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get("users").as_deref(), Some(r#"{"alice":{"password":"x"}}"#));
        assert_eq!(storage.get("currentUser"), None);
    }

    #[test]
    fn damaged_file_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.txt");
        File::create(&path)
            .unwrap()
            .write_all(b"garbage without separator\n")
            .unwrap();

        let mut storage = FileStorage::new(&path);
        assert_eq!(storage.get("users"), None);

        let err = storage.set("users", "{}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert_eq!(fs::read_to_string(&path).unwrap(), "garbage without separator\n");
    }
}
