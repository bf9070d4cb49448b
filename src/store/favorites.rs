//! Favorites Storage
//! Mission: Track each user's favorite properties

use crate::models::Property;
use anyhow::Result;
use rusqlite::{params, Connection};

/// Outcome of toggling a favorite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Favorites storage with SQLite backend
pub struct FavoriteStore {
    db_path: String,
}

impl FavoriteStore {
    /// Create a new favorites store and initialize database
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS favorites (
                user_id INTEGER NOT NULL,
                property_id INTEGER NOT NULL,
                UNIQUE(user_id, property_id)
            )",
            [],
        )?;

        Ok(())
    }

    /// List the properties a user has marked as favorite.
    pub fn list_for_user(&self, user_id: i64) -> Result<Vec<Property>> {
        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn.prepare(
            "SELECT p.id, p.owner_id, p.street, p.number, p.floor, p.postal_code,
                    p.town, p.description, p.price, p.image
             FROM properties p
             INNER JOIN favorites f ON p.id = f.property_id
             WHERE f.user_id = ?1",
        )?;

        let properties = stmt
            .query_map(params![user_id], |row| {
                Ok(Property {
                    id: row.get(0)?,
                    owner_id: row.get(1)?,
                    street: row.get(2)?,
                    number: row.get(3)?,
                    floor: row.get(4)?,
                    postal_code: row.get(5)?,
                    town: row.get(6)?,
                    description: row.get(7)?,
                    price: row.get(8)?,
                    image: row.get(9)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(properties)
    }

    /// Add the favorite if absent, remove it if present.
    pub fn toggle(&self, user_id: i64, property_id: i64) -> Result<Toggle> {
        let conn = Connection::open(&self.db_path)?;

        let existing: i64 = conn.query_row(
            "SELECT COUNT(*) FROM favorites WHERE user_id = ?1 AND property_id = ?2",
            params![user_id, property_id],
            |row| row.get(0),
        )?;

        if existing == 0 {
            conn.execute(
                "INSERT INTO favorites (user_id, property_id) VALUES (?1, ?2)",
                params![user_id, property_id],
            )?;
            Ok(Toggle::Added)
        } else {
            conn.execute(
                "DELETE FROM favorites WHERE user_id = ?1 AND property_id = ?2",
                params![user_id, property_id],
            )?;
            Ok(Toggle::Removed)
        }
    }
}
