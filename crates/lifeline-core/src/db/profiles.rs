//! Profile database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{Profile, Role};

const PROFILE_COLUMNS: &str =
    "principal_id, role, display_name, phone, created_at, updated_at";

/// Intermediate row struct for database mapping.
struct ProfileRow {
    principal_id: String,
    role: String,
    display_name: String,
    phone: Option<String>,
    created_at: String,
    updated_at: String,
}

fn profile_row(row: &Row) -> rusqlite::Result<ProfileRow> {
    Ok(ProfileRow {
        principal_id: row.get(0)?,
        role: row.get(1)?,
        display_name: row.get(2)?,
        phone: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

impl TryFrom<ProfileRow> for Profile {
    type Error = DbError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let role = Role::parse(&row.role)
            .ok_or_else(|| DbError::Constraint(format!("Unknown role: {}", row.role)))?;
        Ok(Profile {
            principal_id: row.principal_id,
            role,
            display_name: row.display_name,
            phone: row.phone,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl Database {
    /// Insert a new profile.
    pub fn insert_profile(&self, profile: &Profile) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO profiles (
                principal_id, role, display_name, phone, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                profile.principal_id,
                profile.role.as_str(),
                profile.display_name,
                profile.phone,
                profile.created_at,
                profile.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Get a profile by principal id.
    pub fn get_profile(&self, principal_id: &str) -> DbResult<Option<Profile>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM profiles WHERE principal_id = ?",
                    PROFILE_COLUMNS
                ),
                [principal_id],
                profile_row,
            )
            .optional()?
            .map(Profile::try_from)
            .transpose()
    }

    /// Apply a partial update to a profile. Returns false if no such profile.
    pub fn update_profile_fields(
        &self,
        principal_id: &str,
        display_name: Option<&str>,
        phone: Option<&str>,
    ) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE profiles SET
                display_name = COALESCE(?2, display_name),
                phone = COALESCE(?3, phone),
                updated_at = ?4
            WHERE principal_id = ?1
            "#,
            params![
                principal_id,
                display_name,
                phone,
                chrono::Utc::now().to_rfc3339()
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Whether any admin-role profile exists.
    pub fn admin_exists(&self) -> DbResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM profiles WHERE role = 'admin'",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// List profiles, optionally filtered by role, newest first.
    pub fn list_profiles(&self, role: Option<Role>, limit: usize) -> DbResult<Vec<Profile>> {
        let mut query = format!("SELECT {} FROM profiles", PROFILE_COLUMNS);
        let mut values: Vec<String> = Vec::new();
        if let Some(role) = role {
            query.push_str(" WHERE role = ?");
            values.push(role.as_str().to_string());
        }
        query.push_str(&format!(" ORDER BY created_at DESC LIMIT {}", limit));

        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(values.iter()), profile_row)?;

        let mut profiles = Vec::new();
        for row in rows {
            profiles.push(row?.try_into()?);
        }
        Ok(profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();

        let profile = Profile::new("user-1".into(), Role::Donor, "Asha".into(), Some("555".into()));
        db.insert_profile(&profile).unwrap();

        let retrieved = db.get_profile("user-1").unwrap().unwrap();
        assert_eq!(retrieved.display_name, "Asha");
        assert_eq!(retrieved.role, Role::Donor);
        assert_eq!(retrieved.phone, Some("555".into()));
    }

    #[test]
    fn test_duplicate_principal_rejected() {
        let db = setup_db();

        let profile = Profile::new("user-1".into(), Role::Donor, "Asha".into(), None);
        db.insert_profile(&profile).unwrap();

        let dup = Profile::new("user-1".into(), Role::Hospital, "Other".into(), None);
        assert!(db.insert_profile(&dup).is_err());
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let db = setup_db();

        let profile = Profile::new("user-1".into(), Role::Donor, "Asha".into(), Some("555".into()));
        db.insert_profile(&profile).unwrap();

        assert!(db.update_profile_fields("user-1", Some("Asha R"), None).unwrap());

        let retrieved = db.get_profile("user-1").unwrap().unwrap();
        assert_eq!(retrieved.display_name, "Asha R");
        assert_eq!(retrieved.phone, Some("555".into()));
    }

    #[test]
    fn test_update_keeps_rfc3339_timestamps() {
        let db = setup_db();

        let profile = Profile::new("user-1".into(), Role::Donor, "Asha".into(), None);
        db.insert_profile(&profile).unwrap();
        db.update_profile_fields("user-1", Some("Asha R"), None).unwrap();

        let retrieved = db.get_profile("user-1").unwrap().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&retrieved.updated_at).is_ok());
    }

    #[test]
    fn test_update_missing_profile() {
        let db = setup_db();
        assert!(!db.update_profile_fields("ghost", Some("X"), None).unwrap());
    }

    #[test]
    fn test_admin_exists() {
        let db = setup_db();
        assert!(!db.admin_exists().unwrap());

        let admin = Profile::new("root".into(), Role::Admin, "Admin".into(), None);
        db.insert_profile(&admin).unwrap();
        assert!(db.admin_exists().unwrap());
    }

    #[test]
    fn test_list_profiles_by_role() {
        let db = setup_db();

        for (id, role) in [("u1", Role::Donor), ("u2", Role::Hospital), ("u3", Role::Donor)] {
            db.insert_profile(&Profile::new(id.into(), role, id.to_uppercase(), None))
                .unwrap();
        }

        let donors = db.list_profiles(Some(Role::Donor), 200).unwrap();
        assert_eq!(donors.len(), 2);
        let all = db.list_profiles(None, 200).unwrap();
        assert_eq!(all.len(), 3);
    }
}
