//! User Storage
//! Mission: Store and manage user accounts with SQLite

use crate::auth::models::Role;
use crate::models::User;
use anyhow::{Context, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use rusqlite::{params, Connection};
use tracing::{info, warn};

/// User storage with SQLite backend
pub struct UserStore {
    db_path: String,
}

impl UserStore {
    /// Create a new user store and initialize database
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    /// Initialize database schema
    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT UNIQUE NOT NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL
            )",
            [],
        )?;

        self.create_default_admin(&conn)?;

        Ok(())
    }

    /// Create default admin user for initial setup
    fn create_default_admin(&self, conn: &Connection) -> Result<()> {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM users WHERE role = 'admin'",
                [],
                |row| row.get(0),
            )
            .context("Failed to check for admin users")?;

        if count == 0 {
            let password_hash =
                hash("admin123", DEFAULT_COST).context("Failed to hash password")?;

            conn.execute(
                "INSERT INTO users (email, first_name, last_name, password_hash, role)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    "admin@solaria.website",
                    "Admin",
                    "Solaria",
                    password_hash,
                    Role::Admin.as_str(),
                ],
            )
            .context("Failed to insert admin user")?;

            info!("Default admin user created (email: admin@solaria.website, password: admin123)");
            warn!("CHANGE DEFAULT PASSWORD IN PRODUCTION!");
        }

        Ok(())
    }

    fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
        let role_str: String = row.get(5)?;
        Ok(User {
            id: row.get(0)?,
            email: row.get(1)?,
            first_name: row.get(2)?,
            last_name: row.get(3)?,
            password_hash: row.get(4)?,
            role: Role::from_str(&role_str).unwrap_or(Role::Registered),
        })
    }

    /// Get user by email
    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, email, first_name, last_name, password_hash, role
             FROM users WHERE email = ?1",
        )?;

        match stmt.query_row(params![email], Self::row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get user by id
    pub fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, email, first_name, last_name, password_hash, role
             FROM users WHERE id = ?1",
        )?;

        match stmt.query_row(params![id], Self::row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Verify email and password
    pub fn verify_password(&self, email: &str, password: &str) -> Result<bool> {
        match self.get_user_by_email(email)? {
            Some(user) => {
                let valid =
                    verify(password, &user.password_hash).context("Failed to verify password")?;
                Ok(valid)
            }
            None => Ok(false),
        }
    }

    /// Create a new user; fails when the email is already taken.
    pub fn create_user(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
        role: Role,
    ) -> Result<User> {
        if self.get_user_by_email(email)?.is_some() {
            anyhow::bail!("User already exists");
        }

        let password_hash = hash(password, DEFAULT_COST).context("Failed to hash password")?;

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO users (email, first_name, last_name, password_hash, role)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![email, first_name, last_name, password_hash, role.as_str()],
        )
        .context("Failed to insert user")?;

        let id = conn.last_insert_rowid();
        info!("Created user: {} ({})", email, role.as_str());

        Ok(User {
            id,
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            password_hash,
            role,
        })
    }

    /// List all users (admin only)
    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, email, first_name, last_name, password_hash, role FROM users",
        )?;

        let users = stmt
            .query_map([], Self::row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Delete a user by id (admin only)
    pub fn delete_user(&self, user_id: i64) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        let rows_affected =
            conn.execute("DELETE FROM users WHERE id = ?1", params![user_id])?;

        if rows_affected == 0 {
            anyhow::bail!("User not found");
        }

        info!("Deleted user: {}", user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (UserStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let store = UserStore::new(db_path).unwrap();
        (store, temp_file)
    }

    #[test]
    fn test_default_admin_created() {
        let (store, _temp) = create_test_store();

        let admin = store.get_user_by_email("admin@solaria.website").unwrap();
        assert!(admin.is_some());

        let admin = admin.unwrap();
        assert_eq!(admin.role, Role::Admin);
    }

    #[test]
    fn test_password_verification() {
        let (store, _temp) = create_test_store();

        assert!(store
            .verify_password("admin@solaria.website", "admin123")
            .unwrap());
        assert!(!store
            .verify_password("admin@solaria.website", "wrongpassword")
            .unwrap());
        assert!(!store
            .verify_password("nobody@example.com", "password")
            .unwrap());
    }

    #[test]
    fn test_create_and_retrieve_user() {
        let (store, _temp) = create_test_store();

        let user = store
            .create_user("ana@example.com", "Ana", "Serra", "password123", Role::Registered)
            .unwrap();
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.role, Role::Registered);

        let retrieved = store.get_user_by_email("ana@example.com").unwrap().unwrap();
        assert_eq!(retrieved.id, user.id);
        assert_eq!(retrieved.first_name, "Ana");

        let by_id = store.get_user_by_id(user.id).unwrap().unwrap();
        assert_eq!(by_id.email, "ana@example.com");
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let (store, _temp) = create_test_store();

        store
            .create_user("ana@example.com", "Ana", "Serra", "pass", Role::Registered)
            .unwrap();
        let dup = store.create_user("ana@example.com", "Anna", "S", "pass", Role::Registered);
        assert!(dup.is_err());
    }

    #[test]
    fn test_list_users() {
        let (store, _temp) = create_test_store();

        store
            .create_user("a@example.com", "A", "A", "pass", Role::Registered)
            .unwrap();
        store
            .create_user("b@example.com", "B", "B", "pass", Role::Registered)
            .unwrap();

        // admin + two registered
        let users = store.list_users().unwrap();
        assert_eq!(users.len(), 3);
    }

    #[test]
    fn test_delete_user() {
        let (store, _temp) = create_test_store();

        let user = store
            .create_user("tmp@example.com", "T", "U", "pass", Role::Registered)
            .unwrap();

        store.delete_user(user.id).unwrap();
        assert!(store.get_user_by_email("tmp@example.com").unwrap().is_none());

        assert!(store.delete_user(user.id).is_err());
    }
}
