//! Файловое хранилище: один JSON-файл на каждый ключ.

use anyhow::Context;
use std::path::{Path, PathBuf};

use crate::config;
use crate::error::{AppError, AppResult};
use crate::storage::StateStore;

/// Хранилище состояния в виде файлов `<base_dir>/<key>.json`.
///
/// Аналог localStorage Mini App на стороне сервера: значение целиком
/// перезаписывается при каждом сохранении. Отсутствующий файл — это
/// `None`, а не ошибка.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    base_dir: PathBuf,
}

impl JsonFileStore {
    /// Создает хранилище с указанной базовой директорией.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        JsonFileStore { base_dir: base_dir.into() }
    }

    /// Создает хранилище с директорией из конфигурации (CART_STORAGE_DIR).
    pub fn from_config() -> Self {
        JsonFileStore::new(config::CART_STORAGE_DIR.as_str())
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        validate_key(key)?;
        Ok(self.base_dir.join(format!("{key}.json")))
    }

    fn ensure_base_dir(&self) -> anyhow::Result<()> {
        if !self.base_dir.exists() {
            fs_err::create_dir_all(&self.base_dir)
                .with_context(|| format!("failed to create storage dir {}", self.base_dir.display()))?;
            log::info!("Created storage directory: {}", self.base_dir.display());
        }
        Ok(())
    }
}

/// Ключ становится именем файла, поэтому разделители путей и пустые
/// ключи запрещены (никаких `../` в имени файла).
fn validate_key(key: &str) -> AppResult<()> {
    if key.is_empty() {
        return Err(AppError::Validation("storage key must not be empty".to_string()));
    }
    if key.contains(['/', '\\']) || Path::new(key).components().count() != 1 {
        return Err(AppError::Validation(format!("storage key '{key}' must not contain path separators")));
    }
    Ok(())
}

impl StateStore for JsonFileStore {
    fn load(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs_err::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    fn save(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        self.ensure_base_dir()?;
        fs_err::write(&path, value)?;
        log::debug!("💾 Persisted {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        match fs_err::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert_eq!(store.load("cart_state_v1").unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.save("cart_state_v1", r#"{"items":[]}"#).unwrap();
        assert_eq!(store.load("cart_state_v1").unwrap().as_deref(), Some(r#"{"items":[]}"#));
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.save("k", "old").unwrap();
        store.save("k", "new").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.save("k", "v").unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.load("k").unwrap(), None);
    }

    #[test]
    fn test_key_with_path_separator_is_rejected() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.save("../escape", "v").is_err());
        assert!(store.save("", "v").is_err());
    }

    #[test]
    fn test_base_dir_created_lazily() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("корзина").join("data");
        let store = JsonFileStore::new(&nested);
        store.save("k", "v").unwrap();
        assert!(nested.join("k.json").is_file());
    }
}
