//! Preference flag persistence.

use crate::db::SharedConnection;
use crate::repo::{RepoError, RepoResult};
use rusqlite::params;
use std::collections::BTreeMap;

/// Persistence contract for the settings store.
pub trait SettingRepository: Send {
    /// Loads every stored flag.
    fn load_settings(&self) -> RepoResult<BTreeMap<String, bool>>;
    /// Inserts or replaces one flag value.
    fn save_setting(&self, key: &str, value: bool) -> RepoResult<()>;
}

/// SQLite-backed settings repository.
pub struct SqliteSettingRepository {
    conn: SharedConnection,
}

impl SqliteSettingRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

impl SettingRepository for SqliteSettingRepository {
    fn load_settings(&self) -> RepoResult<BTreeMap<String, bool>> {
        let conn = self.conn.lock().map_err(|_| RepoError::Poisoned)?;
        let mut stmt = conn.prepare("SELECT key, value FROM settings ORDER BY key;")?;
        let mut rows = stmt.query([])?;

        let mut values = BTreeMap::new();
        while let Some(row) = rows.next()? {
            let key: String = row.get(0)?;
            let value = match row.get::<_, i64>(1)? {
                0 => false,
                1 => true,
                other => {
                    return Err(RepoError::InvalidData(format!(
                        "invalid value `{other}` for settings.key `{key}`"
                    )));
                }
            };
            values.insert(key, value);
        }
        Ok(values)
    }

    fn save_setting(&self, key: &str, value: bool) -> RepoResult<()> {
        let conn = self.conn.lock().map_err(|_| RepoError::Poisoned)?;
        conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, i64::from(value)],
        )?;
        Ok(())
    }
}
