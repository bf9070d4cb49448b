//! Property Storage
//! Mission: Persist property listings with SQLite

use crate::models::{NewProperty, Property};
use anyhow::Result;
use rusqlite::{params, Connection};
use tracing::info;

/// Property storage with SQLite backend
pub struct PropertyStore {
    db_path: String,
}

impl PropertyStore {
    /// Create a new property store and initialize database
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
            "CREATE TABLE IF NOT EXISTS properties (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id INTEGER NOT NULL,
                street TEXT NOT NULL,
                number TEXT NOT NULL,
                floor TEXT,
                postal_code TEXT NOT NULL,
                town TEXT NOT NULL,
                description TEXT,
                price REAL NOT NULL,
                image TEXT
            )",
            [],
        )?;

        Ok(())
    }

    fn row_to_property(row: &rusqlite::Row<'_>) -> rusqlite::Result<Property> {
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
    }

    const COLUMNS: &'static str =
        "id, owner_id, street, number, floor, postal_code, town, description, price, image";

    /// List every property (public listing)
    pub fn list_all(&self) -> Result<Vec<Property>> {
        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM properties", Self::COLUMNS))?;
        let properties = stmt
            .query_map([], Self::row_to_property)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(properties)
    }

    /// List properties in a postal code (public listing)
    pub fn list_by_postal_code(&self, postal_code: &str) -> Result<Vec<Property>> {
        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM properties WHERE postal_code = ?1",
            Self::COLUMNS
        ))?;
        let properties = stmt
            .query_map(params![postal_code], Self::row_to_property)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(properties)
    }

    /// List properties in a town (public listing)
    pub fn list_by_town(&self, town: &str) -> Result<Vec<Property>> {
        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM properties WHERE town = ?1",
            Self::COLUMNS
        ))?;
        let properties = stmt
            .query_map(params![town], Self::row_to_property)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(properties)
    }

    /// List the properties owned by one user
    pub fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Property>> {
        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM properties WHERE owner_id = ?1",
            Self::COLUMNS
        ))?;
        let properties = stmt
            .query_map(params![owner_id], Self::row_to_property)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(properties)
    }

    /// List the properties owned by the user with the given email (admin view)
    pub fn list_by_owner_email(&self, email: &str) -> Result<Vec<Property>> {
        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn.prepare(
            "SELECT p.id, p.owner_id, p.street, p.number, p.floor, p.postal_code,
                    p.town, p.description, p.price, p.image
             FROM properties p
             INNER JOIN users u ON p.owner_id = u.id
             WHERE u.email = ?1",
        )?;
        let properties = stmt
            .query_map(params![email], Self::row_to_property)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(properties)
    }

    /// Insert a new property for `owner_id`; returns the new row id.
    pub fn insert(&self, owner_id: i64, property: &NewProperty) -> Result<i64> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO properties
                (owner_id, street, number, floor, postal_code, town, description, price, image)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                owner_id,
                property.street,
                property.number,
                property.floor,
                property.postal_code,
                property.town,
                property.description,
                property.price,
                property.image,
            ],
        )?;

        let id = conn.last_insert_rowid();
        info!(property_id = id, owner_id, "Property added");
        Ok(id)
    }

    /// Check whether a property exists and belongs to `owner_id`.
    pub fn is_owned_by(&self, property_id: i64, owner_id: i64) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM properties WHERE id = ?1 AND owner_id = ?2",
            params![property_id, owner_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Delete a property by id; returns false when no row matched.
    pub fn delete(&self, property_id: i64) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;
        let rows_affected = conn.execute(
            "DELETE FROM properties WHERE id = ?1",
            params![property_id],
        )?;

        if rows_affected > 0 {
            info!(property_id, "Property deleted");
        }
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn sample_property(town: &str, postal_code: &str) -> NewProperty {
        NewProperty {
            street: "Carrer Major".to_string(),
            number: "12".to_string(),
            floor: Some("2n 1a".to_string()),
            postal_code: postal_code.to_string(),
            town: town.to_string(),
            description: Some("Sunny flat".to_string()),
            price: 185000.0,
            image: None,
        }
    }

    fn create_test_store() -> (PropertyStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let store = PropertyStore::new(db_path).unwrap();
        (store, temp_file)
    }

    #[test]
    fn test_insert_and_list() {
        let (store, _temp) = create_test_store();

        let id = store.insert(1, &sample_property("Girona", "17001")).unwrap();
        assert!(id > 0);

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].owner_id, 1);
        assert_eq!(all[0].town, "Girona");
    }

    #[test]
    fn test_filters_by_postal_code_and_town() {
        let (store, _temp) = create_test_store();

        store.insert(1, &sample_property("Girona", "17001")).unwrap();
        store.insert(1, &sample_property("Girona", "17002")).unwrap();
        store.insert(2, &sample_property("Salt", "17190")).unwrap();

        assert_eq!(store.list_by_postal_code("17001").unwrap().len(), 1);
        assert_eq!(store.list_by_town("Girona").unwrap().len(), 2);
        assert!(store.list_by_town("Figueres").unwrap().is_empty());
    }

    #[test]
    fn test_list_by_owner() {
        let (store, _temp) = create_test_store();

        store.insert(1, &sample_property("Girona", "17001")).unwrap();
        store.insert(2, &sample_property("Salt", "17190")).unwrap();

        let mine = store.list_by_owner(1).unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].owner_id, 1);
    }

    #[test]
    fn test_ownership_check_and_delete() {
        let (store, _temp) = create_test_store();

        let id = store.insert(1, &sample_property("Girona", "17001")).unwrap();

        assert!(store.is_owned_by(id, 1).unwrap());
        assert!(!store.is_owned_by(id, 2).unwrap());

        assert!(store.delete(id).unwrap());
        assert!(!store.delete(id).unwrap());
    }

    #[test]
    fn test_list_by_owner_email_joins_users() {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap().to_string();

        // Same database file as the user store so the JOIN sees both tables.
        let users = crate::store::UserStore::new(&db_path).unwrap();
        let owner = users
            .create_user(
                "ana@example.com",
                "Ana",
                "Serra",
                "pass",
                crate::auth::models::Role::Registered,
            )
            .unwrap();

        let store = PropertyStore::new(&db_path).unwrap();
        store
            .insert(owner.id, &sample_property("Girona", "17001"))
            .unwrap();

        let found = store.list_by_owner_email("ana@example.com").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].owner_id, owner.id);

        assert!(store
            .list_by_owner_email("nobody@example.com")
            .unwrap()
            .is_empty());
    }
}
