use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use super::{SessionRecord, TokenStore};
use crate::entities::{TokenKind, TokenPair, User};
use crate::error::StoreError;

/// Durable store: one JSON record on disk, rewritten whole through a
/// temporary file and a rename.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<SessionRecord, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(SessionRecord::default()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(SessionRecord::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, record: &SessionRecord) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(record)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "session record saved");
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut SessionRecord) -> Result<(), StoreError>) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut record = self.load()?;
        apply(&mut record)?;
        self.save(&record)
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, kind: TokenKind) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.token(kind).map(str::to_string))
    }

    fn set(&self, kind: TokenKind, token: &str) -> Result<(), StoreError> {
        self.update(|record| {
            record.set_token(kind, token);
            Ok(())
        })
    }

    fn user(&self) -> Result<Option<User>, StoreError> {
        self.load()?.user()
    }

    fn set_user(&self, user: &User) -> Result<(), StoreError> {
        self.update(|record| record.set_user(user))
    }

    fn set_session(&self, pair: &TokenPair, user: &User) -> Result<(), StoreError> {
        self.update(|record| record.set_session(pair, user))
    }

    fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.save(&SessionRecord::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bob() -> User {
        User {
            id: "2".into(),
            username: "bob".into(),
            display_name: "Bob Builder".into(),
            avatar: None,
            is_admin: false,
            is_online: None,
            last_seen: None,
            created_at: None,
        }
    }

    #[test]
    fn missing_file_is_an_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("session.json"));
        assert_eq!(store.get(TokenKind::Access).unwrap(), None);
        assert_eq!(store.user().unwrap(), None);
    }

    #[test]
    fn survives_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        {
            let store = FileTokenStore::new(&path);
            store.set(TokenKind::Access, "access-1").unwrap();
            store.set(TokenKind::Refresh, "refresh-1").unwrap();
            store.set_user(&bob()).unwrap();
        }

        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.get(TokenKind::Access).unwrap().as_deref(), Some("access-1"));
        assert_eq!(reopened.get(TokenKind::Refresh).unwrap().as_deref(), Some("refresh-1"));
        assert_eq!(reopened.user().unwrap(), Some(bob()));
    }

    #[test]
    fn session_lands_in_one_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileTokenStore::new(&path);
        store.set(TokenKind::Access, "stale").unwrap();

        let pair = TokenPair {
            access_token: "access-2".into(),
            refresh_token: "refresh-2".into(),
        };
        store.set_session(&pair, &bob()).unwrap();

        let on_disk: SessionRecord =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.token(TokenKind::Access), Some("access-2"));
        assert_eq!(on_disk.token(TokenKind::Refresh), Some("refresh-2"));
        assert_eq!(on_disk.user().unwrap(), Some(bob()));
    }

    #[test]
    fn clear_rewrites_the_whole_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("session.json"));
        store.set(TokenKind::Access, "a").unwrap();
        store.set_user(&bob()).unwrap();

        store.clear().unwrap();
        store.clear().unwrap();

        assert_eq!(store.get(TokenKind::Access).unwrap(), None);
        assert_eq!(store.user().unwrap(), None);
        assert!(!dir.path().join("session.json.tmp").exists());
    }

    #[test]
    fn corrupt_user_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"accessToken":"a","currentUser":"{broken"}"#).unwrap();

        let store = FileTokenStore::new(&path);
        assert_eq!(store.get(TokenKind::Access).unwrap().as_deref(), Some("a"));
        assert!(matches!(store.user(), Err(StoreError::Corrupt(_))));
    }
}
