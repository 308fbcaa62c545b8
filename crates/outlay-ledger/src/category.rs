//! User-defined categories and their repository
//!
//! Builtin categories are a fixed list owned by the UI layer and never
//! persisted; this repository only manages the user-added set. Generated
//! identifiers carry a `custom_` prefix so the two namespaces cannot
//! overlap.

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::ids;
use crate::Result;
use outlay_storage::Database;

/// How a category is rendered: a named glyph or a user-supplied image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconType {
    Icon,
    Image,
}

impl IconType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconType::Icon => "icon",
            IconType::Image => "image",
        }
    }
}

impl Default for IconType {
    fn default() -> Self {
        IconType::Icon
    }
}

impl std::fmt::Display for IconType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for IconType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "icon" => Ok(IconType::Icon),
            "image" => Ok(IconType::Image),
            _ => Err(format!("Unknown icon type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCategory {
    /// Assigned on add when the caller supplies none
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub icon_type: IconType,
    #[serde(default)]
    pub dark_color: String,
    #[serde(default)]
    pub light_color: String,
    #[serde(default)]
    pub is_custom: bool,
}

pub struct CategoryManager {
    db: Database,
}

impl CategoryManager {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Every user-defined category, ordered by identifier. A store failure
    /// yields an empty list so callers can always render; the error is
    /// only logged.
    pub fn all(&self) -> Vec<CustomCategory> {
        let result = self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, icon, image, icon_type, dark_color, light_color, is_custom
                 FROM custom_categories ORDER BY id",
            )?;

            let categories: Vec<CustomCategory> = stmt
                .query_map([], |row| {
                    let icon_type_str: String = row.get(4)?;
                    let icon_type = icon_type_str.parse().unwrap_or_default();

                    Ok(CustomCategory {
                        id: Some(row.get(0)?),
                        name: row.get(1)?,
                        icon: row.get(2)?,
                        image: row.get(3)?,
                        icon_type,
                        dark_color: row.get(5)?,
                        light_color: row.get(6)?,
                        is_custom: row.get::<_, i32>(7)? != 0,
                    })
                })?
                .filter_map(|r| r.ok())
                .collect();

            Ok(categories)
        });

        match result {
            Ok(categories) => categories,
            Err(e) => {
                tracing::error!("Failed to load custom categories, using empty list: {}", e);
                Vec::new()
            }
        }
    }

    /// Persist a category, generating a `custom_` identifier when the
    /// caller supplied none. `is_custom` is always stored as true no
    /// matter what the caller passed. Returns the identifier used.
    pub fn add(&self, category: &CustomCategory) -> Result<String> {
        let id = match &category.id {
            Some(id) => id.clone(),
            None => ids::next_category_id(),
        };

        let result = self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO custom_categories
                 (id, name, icon, image, icon_type, dark_color, light_color, is_custom)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1)",
                rusqlite::params![
                    id,
                    category.name,
                    category.icon,
                    category.image,
                    category.icon_type.as_str(),
                    category.dark_color,
                    category.light_color,
                ],
            )?;
            Ok(())
        });

        match result {
            Ok(()) => Ok(id),
            Err(e) => {
                tracing::error!("Failed to add custom category: {}", e);
                Err(e.into())
            }
        }
    }

    /// Full-record upsert by identifier.
    pub fn update(&self, category: &CustomCategory) -> Result<()> {
        let id = match &category.id {
            Some(id) => id.clone(),
            None => return Err(LedgerError::MissingId),
        };

        let result = self.db.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO custom_categories
                 (id, name, icon, image, icon_type, dark_color, light_color, is_custom)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                rusqlite::params![
                    id,
                    category.name,
                    category.icon,
                    category.image,
                    category.icon_type.as_str(),
                    category.dark_color,
                    category.light_color,
                    category.is_custom as i32,
                ],
            )?;
            Ok(())
        });

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!("Failed to update custom category: {}", e);
                Err(e.into())
            }
        }
    }

    /// Remove a category. Deleting an unknown id is a no-op.
    pub fn delete(&self, id: &str) -> Result<()> {
        let result = self.db.with_connection(|conn| {
            conn.execute("DELETE FROM custom_categories WHERE id = ?1", [id])?;
            Ok(())
        });

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!("Failed to delete custom category: {}", e);
                Err(e.into())
            }
        }
    }
}

impl Clone for CategoryManager {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str) -> CustomCategory {
        CustomCategory {
            id: None,
            name: name.to_string(),
            icon: "star".to_string(),
            image: None,
            icon_type: IconType::Icon,
            dark_color: "#d4a24e".to_string(),
            light_color: "#ffe8c2".to_string(),
            is_custom: false,
        }
    }

    fn manager() -> (Database, CategoryManager) {
        let db = Database::open_in_memory().unwrap();
        let manager = CategoryManager::new(db.clone());
        (db, manager)
    }

    #[test]
    fn test_add_generates_prefixed_id_and_forces_is_custom() {
        let (_db, manager) = manager();

        // is_custom deliberately passed as false
        let id = manager.add(&sample("Hobby")).unwrap();
        assert!(id.starts_with("custom_"));

        let all = manager.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, Some(id));
        assert_eq!(all[0].name, "Hobby");
        assert_eq!(all[0].icon, "star");
        assert!(all[0].is_custom);
    }

    #[test]
    fn test_add_preserves_caller_id() {
        let (_db, manager) = manager();

        let mut category = sample("Travel");
        category.id = Some("custom_42".to_string());

        let id = manager.add(&category).unwrap();
        assert_eq!(id, "custom_42");
    }

    #[test]
    fn test_update_replaces_by_id() {
        let (_db, manager) = manager();

        let id = manager.add(&sample("Hobby")).unwrap();

        let mut updated = sample("Hobbies");
        updated.id = Some(id.clone());
        updated.icon_type = IconType::Image;
        updated.image = Some("hobby.png".to_string());
        updated.is_custom = true;
        manager.update(&updated).unwrap();

        let all = manager.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Hobbies");
        assert_eq!(all[0].icon_type, IconType::Image);
        assert_eq!(all[0].image.as_deref(), Some("hobby.png"));
    }

    #[test]
    fn test_update_requires_id() {
        let (_db, manager) = manager();

        let err = manager.update(&sample("Hobby")).unwrap_err();
        assert!(matches!(err, LedgerError::MissingId));
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let (_db, manager) = manager();

        manager.delete("custom_404").unwrap();

        let id = manager.add(&sample("Hobby")).unwrap();
        manager.delete(&id).unwrap();
        assert!(manager.all().is_empty());
    }

    #[test]
    fn test_all_swallows_store_failure() {
        let (db, manager) = manager();

        db.with_connection(|conn| {
            conn.execute("DROP TABLE custom_categories", [])?;
            Ok(())
        })
        .unwrap();

        assert!(manager.all().is_empty());
    }

    #[test]
    fn test_icon_type_parses_leniently() {
        assert_eq!("icon".parse::<IconType>().unwrap(), IconType::Icon);
        assert_eq!("IMAGE".parse::<IconType>().unwrap(), IconType::Image);
        assert!("sticker".parse::<IconType>().is_err());
    }
}
