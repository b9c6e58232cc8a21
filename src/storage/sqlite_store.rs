use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};
use uuid::Uuid;

use super::{CreateNote, NoteBackend};
use crate::config::PadConfig;
use crate::entity::{Favorite, Note, NoteVersion};
use crate::error::{PadError, Result};
use crate::session::Session;
use crate::slug::{random_url, validate_url};

pub const PAD_DIR: &str = ".ghostpad";
pub const NOTES_DB: &str = "notes.db";

/// Attempts at finding an unused random url before giving up.
const RANDOM_URL_ATTEMPTS: usize = 8;

const NOTE_COLUMNS: &str = "id, url, content, is_reserved, owner_id, created_at, updated_at, expires_at, version_number";

/// Local note store backed by SQLite.
pub struct SqliteStore {
    conn: Connection,
    config: PadConfig,
}

impl SqliteStore {
    /// Create `.ghostpad/` under `root` with a fresh database and config.
    pub fn init(root: &Path, config: &PadConfig) -> Result<Self> {
        let pad_dir = root.join(PAD_DIR);

        if pad_dir.exists() {
            return Err(PadError::AlreadyInitialized);
        }

        fs::create_dir_all(&pad_dir)?;
        config.save(&pad_dir)?;

        let conn = Connection::open(pad_dir.join(NOTES_DB))?;
        Self::with_connection(conn, config.clone())
    }

    /// Open the store in `root/.ghostpad/`.
    pub fn open(root: &Path) -> Result<Self> {
        let pad_dir = root.join(PAD_DIR);
        let path = pad_dir.join(NOTES_DB);

        if !path.exists() {
            return Err(PadError::NotInitialized);
        }

        let config = PadConfig::load(&pad_dir)?;
        let conn = Connection::open(&path)?;
        Self::with_connection(conn, config)
    }

    /// A throwaway store that lives only as long as the value.
    pub fn in_memory(config: PadConfig) -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?, config)
    }

    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    fn with_connection(conn: Connection, config: PadConfig) -> Result<Self> {
        let store = Self { conn, config };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS notes (
                id TEXT PRIMARY KEY,
                url TEXT NOT NULL UNIQUE,
                content TEXT,
                is_reserved INTEGER NOT NULL DEFAULT 0,
                owner_id TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                expires_at TEXT NOT NULL,
                version_number INTEGER NOT NULL DEFAULT 1
            );

            CREATE INDEX IF NOT EXISTS idx_notes_owner ON notes(owner_id, is_reserved);
            CREATE INDEX IF NOT EXISTS idx_notes_expires ON notes(expires_at);

            CREATE TABLE IF NOT EXISTS note_versions (
                note_id TEXT NOT NULL,
                version_number INTEGER NOT NULL,
                content TEXT,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (note_id, version_number)
            );

            CREATE TABLE IF NOT EXISTS favorites (
                user_id TEXT NOT NULL,
                note_url TEXT NOT NULL,
                created_at TEXT NOT NULL,
                PRIMARY KEY (user_id, note_url)
            );
            ",
        )?;
        Ok(())
    }

    fn count_live_reserved(conn: &Connection, owner: Uuid, now: DateTime<Utc>) -> Result<usize> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM notes WHERE owner_id = ?1 AND is_reserved = 1 AND expires_at > ?2",
            params![owner.to_string(), timestamp(&now)],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    fn url_exists(conn: &Connection, url: &str) -> Result<bool> {
        let found: Option<i64> = conn
            .query_row("SELECT 1 FROM notes WHERE url = ?1", [url], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }

    /// Load a note by url, expired or not.
    fn load_note(conn: &Connection, url: &str) -> Result<Option<Note>> {
        let sql = format!("SELECT {} FROM notes WHERE url = ?1", NOTE_COLUMNS);
        let row = conn.query_row(&sql, [url], NoteRow::from_row).optional()?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut note = row.into_note()?;
        note.previous_versions = Self::load_versions(conn, &note.id)?;
        Ok(Some(note))
    }

    fn load_live_note(conn: &Connection, url: &str, now: DateTime<Utc>) -> Result<Option<Note>> {
        Ok(Self::load_note(conn, url)?.filter(|note| !note.is_expired(now)))
    }

    fn load_versions(conn: &Connection, note_id: &Uuid) -> Result<Vec<NoteVersion>> {
        let mut stmt = conn.prepare(
            "SELECT version_number, content, updated_at FROM note_versions
             WHERE note_id = ?1 ORDER BY version_number",
        )?;
        let rows = stmt
            .query_map([note_id.to_string()], |row| {
                Ok((
                    row.get::<_, u32>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(version_number, content, updated_at)| {
                Ok(NoteVersion {
                    version_number,
                    content,
                    updated_at: parse_timestamp(&updated_at)?,
                })
            })
            .collect()
    }

    fn delete_note_row(conn: &Connection, note_id: &Uuid) -> Result<()> {
        let id = note_id.to_string();
        conn.execute("DELETE FROM note_versions WHERE note_id = ?1", [&id])?;
        conn.execute("DELETE FROM notes WHERE id = ?1", [&id])?;
        Ok(())
    }

    /// Free `url` if it is only held by an expired note.
    fn release_expired_url(conn: &Connection, url: &str, now: DateTime<Utc>) -> Result<()> {
        if let Some(note) = Self::load_note(conn, url)? {
            if note.is_expired(now) {
                debug!(url, "releasing url held by expired note");
                Self::delete_note_row(conn, &note.id)?;
            }
        }
        Ok(())
    }

    fn pick_url(conn: &Connection, request: &CreateNote, now: DateTime<Utc>) -> Result<String> {
        let custom = request
            .custom_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty());

        if let Some(url) = custom {
            validate_url(url)?;
            Self::release_expired_url(conn, url, now)?;
            if Self::url_exists(conn, url)? {
                return Err(PadError::UrlTaken(url.to_string()));
            }
            return Ok(url.to_string());
        }

        for _ in 0..RANDOM_URL_ATTEMPTS {
            let url = random_url();
            if !Self::url_exists(conn, &url)? {
                return Ok(url);
            }
        }
        Err(PadError::Storage(
            "could not find a free random url".to_string(),
        ))
    }
}

impl NoteBackend for SqliteStore {
    fn create_note(&self, request: &CreateNote, session: &Session) -> Result<String> {
        let now = Utc::now();
        let tx = self.conn.unchecked_transaction()?;

        let owner = if request.reserve {
            let user = session.require_user()?;
            let used = Self::count_live_reserved(&tx, user, now)?;
            if used >= self.config.max_reserved {
                return Err(PadError::ReservationLimit {
                    used,
                    max: self.config.max_reserved,
                });
            }
            Some(user)
        } else {
            None
        };

        let url = Self::pick_url(&tx, request, now)?;
        let expires_at = self.config.expires_at(now)?;

        tx.execute(
            &format!(
                "INSERT INTO notes ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1)",
                NOTE_COLUMNS
            ),
            params![
                Uuid::new_v4().to_string(),
                url,
                request.content,
                request.reserve,
                owner.map(|id| id.to_string()),
                timestamp(&now),
                timestamp(&now),
                timestamp(&expires_at),
            ],
        )?;
        tx.commit()?;

        info!(url = %url, reserved = request.reserve, "created note");
        Ok(url)
    }

    fn get_note(&self, url: &str) -> Result<Option<Note>> {
        Self::load_live_note(&self.conn, url, Utc::now())
    }

    fn update_note(&self, url: &str, content: &str, session: &Session) -> Result<()> {
        let now = Utc::now();
        let tx = self.conn.unchecked_transaction()?;

        let note = Self::load_live_note(&tx, url, now)?
            .ok_or_else(|| PadError::NoteNotFound(url.to_string()))?;

        if !note.can_edit(session) {
            return Err(PadError::NotOwner(url.to_string()));
        }

        tx.execute(
            "INSERT INTO note_versions (note_id, version_number, content, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                note.id.to_string(),
                note.version_number,
                note.content,
                timestamp(&note.updated_at),
            ],
        )?;
        tx.execute(
            "UPDATE notes SET content = ?1, version_number = version_number + 1, updated_at = ?2
             WHERE id = ?3",
            params![content, timestamp(&now), note.id.to_string()],
        )?;
        tx.commit()?;

        info!(url, version = note.version_number + 1, "updated note");
        Ok(())
    }

    fn delete_note(&self, url: &str, session: &Session) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        let note = Self::load_live_note(&tx, url, Utc::now())?
            .ok_or_else(|| PadError::NoteNotFound(url.to_string()))?;

        if !note.can_edit(session) {
            return Err(PadError::NotOwner(url.to_string()));
        }

        Self::delete_note_row(&tx, &note.id)?;
        tx.commit()?;

        info!(url, "deleted note");
        Ok(())
    }

    fn list_reserved(&self, session: &Session) -> Result<Vec<Note>> {
        let user = session.require_user()?;
        let now = Utc::now();

        let sql = format!(
            "SELECT {} FROM notes WHERE owner_id = ?1 AND is_reserved = 1 ORDER BY created_at DESC",
            NOTE_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([user.to_string()], NoteRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut notes = Vec::with_capacity(rows.len());
        for row in rows {
            let mut note = row.into_note()?;
            if note.is_expired(now) {
                continue;
            }
            note.previous_versions = Self::load_versions(&self.conn, &note.id)?;
            notes.push(note);
        }
        Ok(notes)
    }

    fn is_reserved_url(&self, url: &str) -> Result<bool> {
        Ok(self.get_note(url)?.is_some_and(|note| note.is_reserved))
    }

    fn add_favorite(&self, url: &str, session: &Session) -> Result<Favorite> {
        let user = session.require_user()?;

        if self.get_note(url)?.is_none() {
            return Err(PadError::NoteNotFound(url.to_string()));
        }

        let favorite = Favorite::new(user, url.to_string());
        self.conn.execute(
            "INSERT OR IGNORE INTO favorites (user_id, note_url, created_at) VALUES (?1, ?2, ?3)",
            params![user.to_string(), url, timestamp(&favorite.created_at)],
        )?;

        let created_at: String = self.conn.query_row(
            "SELECT created_at FROM favorites WHERE user_id = ?1 AND note_url = ?2",
            params![user.to_string(), url],
            |row| row.get(0),
        )?;

        Ok(Favorite {
            created_at: parse_timestamp(&created_at)?,
            ..favorite
        })
    }

    fn remove_favorite(&self, url: &str, session: &Session) -> Result<()> {
        let user = session.require_user()?;
        let removed = self.conn.execute(
            "DELETE FROM favorites WHERE user_id = ?1 AND note_url = ?2",
            params![user.to_string(), url],
        )?;
        if removed == 0 {
            return Err(PadError::FavoriteNotFound(url.to_string()));
        }
        Ok(())
    }

    fn list_favorites(&self, session: &Session) -> Result<Vec<Favorite>> {
        let user = session.require_user()?;
        let mut stmt = self.conn.prepare(
            "SELECT note_url, created_at FROM favorites WHERE user_id = ?1 ORDER BY created_at DESC",
        )?;
        let rows = stmt
            .query_map([user.to_string()], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(note_url, created_at)| {
                Ok(Favorite {
                    user_id: user,
                    note_url,
                    created_at: parse_timestamp(&created_at)?,
                })
            })
            .collect()
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        let cutoff = timestamp(&now);
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM note_versions WHERE note_id IN (SELECT id FROM notes WHERE expires_at <= ?1)",
            [&cutoff],
        )?;
        let removed = tx.execute("DELETE FROM notes WHERE expires_at <= ?1", [&cutoff])?;
        tx.commit()?;

        if removed > 0 {
            info!(removed, "purged expired notes");
        }
        Ok(removed)
    }
}

/// Raw `notes` row before parsing ids and timestamps.
struct NoteRow {
    id: String,
    url: String,
    content: Option<String>,
    is_reserved: bool,
    owner_id: Option<String>,
    created_at: String,
    updated_at: String,
    expires_at: String,
    version_number: u32,
}

impl NoteRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            url: row.get(1)?,
            content: row.get(2)?,
            is_reserved: row.get(3)?,
            owner_id: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
            expires_at: row.get(7)?,
            version_number: row.get(8)?,
        })
    }

    fn into_note(self) -> Result<Note> {
        Ok(Note {
            id: parse_uuid(&self.id)?,
            url: self.url,
            content: self.content,
            is_reserved: self.is_reserved,
            owner_id: self.owner_id.as_deref().map(parse_uuid).transpose()?,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
            expires_at: parse_timestamp(&self.expires_at)?,
            version_number: self.version_number,
            previous_versions: Vec::new(),
        })
    }
}

/// Fixed-width UTC timestamps so text comparison in SQL matches time order.
fn timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| PadError::Storage(format!("bad timestamp '{}': {}", raw, e)))
}

fn parse_uuid(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| PadError::Storage(format!("bad id '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn store() -> SqliteStore {
        SqliteStore::in_memory(PadConfig::default()).unwrap()
    }

    fn request(content: &str, url: Option<&str>, reserve: bool) -> CreateNote {
        CreateNote {
            content: content.to_string(),
            custom_url: url.map(str::to_string),
            reserve,
        }
    }

    fn expire(store: &SqliteStore, url: &str) {
        let past = timestamp(&(Utc::now() - Duration::days(1)));
        store
            .conn
            .execute(
                "UPDATE notes SET expires_at = ?1 WHERE url = ?2",
                params![past, url],
            )
            .unwrap();
    }

    #[test]
    fn test_init_creates_pad_directory() {
        let tmp = TempDir::new().unwrap();
        SqliteStore::init(tmp.path(), &PadConfig::default()).unwrap();
        assert!(tmp.path().join(".ghostpad/notes.db").exists());
        assert!(tmp.path().join(".ghostpad/config.json").exists());
    }

    #[test]
    fn test_init_fails_if_already_initialized() {
        let tmp = TempDir::new().unwrap();
        SqliteStore::init(tmp.path(), &PadConfig::default()).unwrap();
        let result = SqliteStore::init(tmp.path(), &PadConfig::default());
        assert!(matches!(result, Err(PadError::AlreadyInitialized)));
    }

    #[test]
    fn test_open_fails_if_not_initialized() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            SqliteStore::open(tmp.path()),
            Err(PadError::NotInitialized)
        ));
    }

    #[test]
    fn test_open_reads_config() {
        let tmp = TempDir::new().unwrap();
        let config = PadConfig {
            max_reserved: 7,
            ..PadConfig::default()
        };
        SqliteStore::init(tmp.path(), &config).unwrap();
        let store = SqliteStore::open(tmp.path()).unwrap();
        assert_eq!(store.config().max_reserved, 7);
    }

    #[test]
    fn test_create_and_get_custom_url() {
        let store = store();
        let url = store
            .create_note(&request("Hello", Some("hello"), false), &Session::anonymous())
            .unwrap();
        assert_eq!(url, "hello");

        let note = store.get_note("hello").unwrap().unwrap();
        assert_eq!(note.content.as_deref(), Some("Hello"));
        assert!(!note.is_reserved);
        assert_eq!(note.owner_id, None);
        assert_eq!(note.version_number, 1);
        assert_eq!(note.days_remaining(Utc::now()), 30);
    }

    #[test]
    fn test_create_with_out_of_range_lifetime_fails() {
        let config = PadConfig {
            note_lifetime_days: 10_000_000_000,
            ..PadConfig::default()
        };
        let store = SqliteStore::in_memory(config).unwrap();

        let result = store.create_note(&request("x", Some("far"), false), &Session::anonymous());
        assert!(matches!(result, Err(PadError::InvalidInput(_))));
        assert!(store.get_note("far").unwrap().is_none());
    }

    #[test]
    fn test_create_random_url() {
        let store = store();
        let url = store
            .create_note(&request("Hi", None, false), &Session::anonymous())
            .unwrap();
        assert!(validate_url(&url).is_ok());
        assert!(store.get_note(&url).unwrap().is_some());
    }

    #[test]
    fn test_blank_custom_url_gets_random() {
        let store = store();
        let url = store
            .create_note(&request("Hi", Some("   "), false), &Session::anonymous())
            .unwrap();
        assert_eq!(url.len(), crate::slug::RANDOM_URL_LEN);
    }

    #[test]
    fn test_duplicate_url_rejected() {
        let store = store();
        let session = Session::anonymous();
        store.create_note(&request("a", Some("dup"), false), &session).unwrap();
        let result = store.create_note(&request("b", Some("dup"), false), &session);
        assert!(matches!(result, Err(PadError::UrlTaken(_))));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let store = store();
        let result = store.create_note(&request("a", Some("Not Valid"), false), &Session::anonymous());
        assert!(matches!(result, Err(PadError::InvalidUrl { .. })));
    }

    #[test]
    fn test_expired_note_is_hidden_and_url_reusable() {
        let store = store();
        let session = Session::anonymous();
        store.create_note(&request("old", Some("reuse"), false), &session).unwrap();
        expire(&store, "reuse");

        assert!(store.get_note("reuse").unwrap().is_none());
        store.create_note(&request("new", Some("reuse"), false), &session).unwrap();
        let note = store.get_note("reuse").unwrap().unwrap();
        assert_eq!(note.content.as_deref(), Some("new"));
    }

    #[test]
    fn test_reserve_requires_sign_in() {
        let store = store();
        let result = store.create_note(&request("a", Some("mine"), true), &Session::anonymous());
        assert!(matches!(result, Err(PadError::NotSignedIn)));
    }

    #[test]
    fn test_reservation_limit() {
        let store = store();
        let session = Session::signed_in(Uuid::new_v4());
        for url in ["r1", "r2", "r3"] {
            store.create_note(&request("x", Some(url), true), &session).unwrap();
        }
        let result = store.create_note(&request("x", Some("r4"), true), &session);
        assert!(matches!(
            result,
            Err(PadError::ReservationLimit { used: 3, max: 3 })
        ));

        // Unreserved notes are not limited
        store.create_note(&request("x", Some("free"), false), &session).unwrap();

        // Expired reservations free a slot
        expire(&store, "r1");
        store.create_note(&request("x", Some("r4"), true), &session).unwrap();
    }

    #[test]
    fn test_update_keeps_history() {
        let store = store();
        let session = Session::anonymous();
        store.create_note(&request("v1", Some("hist"), false), &session).unwrap();
        store.update_note("hist", "v2", &session).unwrap();
        store.update_note("hist", "v3", &session).unwrap();

        let note = store.get_note("hist").unwrap().unwrap();
        assert_eq!(note.content.as_deref(), Some("v3"));
        assert_eq!(note.version_number, 3);
        let old: Vec<_> = note
            .previous_versions
            .iter()
            .map(|v| (v.version_number, v.content.as_deref()))
            .collect();
        assert_eq!(old, vec![(1, Some("v1")), (2, Some("v2"))]);
    }

    #[test]
    fn test_update_reserved_by_owner_only() {
        let store = store();
        let owner = Session::signed_in(Uuid::new_v4());
        store.create_note(&request("mine", Some("locked"), true), &owner).unwrap();

        let stranger = Session::signed_in(Uuid::new_v4());
        assert!(matches!(
            store.update_note("locked", "theirs", &stranger),
            Err(PadError::NotOwner(_))
        ));
        assert!(matches!(
            store.update_note("locked", "theirs", &Session::anonymous()),
            Err(PadError::NotOwner(_))
        ));
        store.update_note("locked", "still mine", &owner).unwrap();
        assert!(store.is_reserved_url("locked").unwrap());
    }

    #[test]
    fn test_update_missing_note() {
        let store = store();
        assert!(matches!(
            store.update_note("nope", "x", &Session::anonymous()),
            Err(PadError::NoteNotFound(_))
        ));
    }

    #[test]
    fn test_delete_note() {
        let store = store();
        let owner = Session::signed_in(Uuid::new_v4());
        store.create_note(&request("x", Some("gone"), true), &owner).unwrap();

        assert!(matches!(
            store.delete_note("gone", &Session::anonymous()),
            Err(PadError::NotOwner(_))
        ));
        store.delete_note("gone", &owner).unwrap();
        assert!(store.get_note("gone").unwrap().is_none());
    }

    #[test]
    fn test_list_reserved() {
        let store = store();
        let me = Session::signed_in(Uuid::new_v4());
        let other = Session::signed_in(Uuid::new_v4());
        store.create_note(&request("a", Some("mine-a"), true), &me).unwrap();
        store.create_note(&request("b", Some("mine-b"), true), &me).unwrap();
        store.create_note(&request("c", Some("open"), false), &me).unwrap();
        store.create_note(&request("d", Some("theirs"), true), &other).unwrap();

        let mut urls: Vec<_> = store
            .list_reserved(&me)
            .unwrap()
            .into_iter()
            .map(|n| n.url)
            .collect();
        urls.sort();
        assert_eq!(urls, vec!["mine-a", "mine-b"]);
        assert!(matches!(
            store.list_reserved(&Session::anonymous()),
            Err(PadError::NotSignedIn)
        ));
    }

    #[test]
    fn test_favorites() {
        let store = store();
        let me = Session::signed_in(Uuid::new_v4());
        store.create_note(&request("a", Some("fav"), false), &me).unwrap();

        store.add_favorite("fav", &me).unwrap();
        store.add_favorite("fav", &me).unwrap();
        let favorites = store.list_favorites(&me).unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].note_url, "fav");

        assert!(matches!(
            store.add_favorite("missing", &me),
            Err(PadError::NoteNotFound(_))
        ));

        store.remove_favorite("fav", &me).unwrap();
        assert!(store.list_favorites(&me).unwrap().is_empty());
        assert!(matches!(
            store.remove_favorite("fav", &me),
            Err(PadError::FavoriteNotFound(_))
        ));
    }

    #[test]
    fn test_purge_expired() {
        let store = store();
        let session = Session::anonymous();
        store.create_note(&request("a", Some("keep"), false), &session).unwrap();
        store.create_note(&request("b", Some("drop"), false), &session).unwrap();
        store.update_note("drop", "b2", &session).unwrap();
        expire(&store, "drop");

        assert_eq!(store.purge_expired(Utc::now()).unwrap(), 1);
        assert!(store.get_note("keep").unwrap().is_some());
        let versions: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM note_versions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(versions, 0);
    }
}
