use std::collections::HashMap;
use std::io;

use super::Storage;

/// Keeps everything in a map; gone when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.into(), value.into());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn set_get_delete() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("users"), None);

        storage.set("users", "{}").unwrap();
        storage.set("users", "{\"a\":1}").unwrap();
        assert_eq!(storage.get("users").as_deref(), Some("{\"a\":1}"));
        assert!(!storage.is_empty());

        storage.delete("users").unwrap();
        storage.delete("users").unwrap();
        assert!(storage.is_empty());
    }
}
