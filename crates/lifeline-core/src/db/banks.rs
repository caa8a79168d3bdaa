//! Blood bank and stock database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{BloodBank, BloodType, Location, StockEntry};

const BANK_COLUMNS: &str = "b.id, b.principal_id, b.name, b.registration_number, b.address, \
     b.city, b.state, b.pincode, b.latitude, b.longitude, b.phone, b.email, \
     b.operating_hours, b.is_verified, b.created_at, b.updated_at";

fn bank_row(row: &Row) -> rusqlite::Result<BloodBank> {
    Ok(BloodBank {
        id: row.get(0)?,
        principal_id: row.get(1)?,
        name: row.get(2)?,
        registration_number: row.get(3)?,
        location: Location {
            address: row.get(4)?,
            city: row.get(5)?,
            state: row.get(6)?,
            pincode: row.get(7)?,
            latitude: row.get(8)?,
            longitude: row.get(9)?,
        },
        phone: row.get(10)?,
        email: row.get(11)?,
        operating_hours: row.get(12)?,
        is_verified: row.get(13)?,
        created_at: row.get(14)?,
        updated_at: row.get(15)?,
    })
}

/// Intermediate row struct for database mapping.
struct StockRow {
    blood_bank_id: String,
    blood_type: String,
    units_available: i64,
    last_updated: String,
}

fn stock_row(row: &Row) -> rusqlite::Result<StockRow> {
    Ok(StockRow {
        blood_bank_id: row.get(0)?,
        blood_type: row.get(1)?,
        units_available: row.get(2)?,
        last_updated: row.get(3)?,
    })
}

impl TryFrom<StockRow> for StockEntry {
    type Error = DbError;

    fn try_from(row: StockRow) -> Result<Self, Self::Error> {
        let blood_type = BloodType::parse(&row.blood_type).ok_or_else(|| {
            DbError::Constraint(format!("Unknown blood type: {}", row.blood_type))
        })?;
        Ok(StockEntry {
            blood_bank_id: row.blood_bank_id,
            blood_type,
            units_available: row.units_available,
            last_updated: row.last_updated,
        })
    }
}

impl Database {
    /// Insert a new blood bank together with its eight zero-unit stock rows.
    ///
    /// Runs in a single transaction: a failure on any stock insert rolls the
    /// bank row back too, so no bank ever exists without its full stock set.
    pub fn insert_blood_bank_with_stock(&self, bank: &BloodBank) -> DbResult<()> {
        let tx = self.tx()?;
        tx.execute(
            r#"
            INSERT INTO blood_banks (
                id, principal_id, name, registration_number, address, city,
                state, pincode, latitude, longitude, phone, email,
                operating_hours, is_verified, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            "#,
            params![
                bank.id,
                bank.principal_id,
                bank.name,
                bank.registration_number,
                bank.location.address,
                bank.location.city,
                bank.location.state,
                bank.location.pincode,
                bank.location.latitude,
                bank.location.longitude,
                bank.phone,
                bank.email,
                bank.operating_hours,
                bank.is_verified,
                bank.created_at,
                bank.updated_at,
            ],
        )?;

        for blood_type in BloodType::ALL {
            tx.execute(
                r#"
                INSERT INTO blood_stock (blood_bank_id, blood_type, units_available, last_updated)
                VALUES (?1, ?2, 0, ?3)
                "#,
                params![bank.id, blood_type.as_str(), bank.created_at],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Overwrite a bank's mutable fields. Returns false if absent.
    /// `is_verified` is deliberately not written here; see `set_bank_verified`.
    pub fn update_blood_bank(&self, bank: &BloodBank) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE blood_banks SET
                name = ?2,
                registration_number = ?3,
                address = ?4,
                city = ?5,
                state = ?6,
                pincode = ?7,
                latitude = ?8,
                longitude = ?9,
                phone = ?10,
                email = ?11,
                operating_hours = ?12,
                updated_at = ?13
            WHERE id = ?1
            "#,
            params![
                bank.id,
                bank.name,
                bank.registration_number,
                bank.location.address,
                bank.location.city,
                bank.location.state,
                bank.location.pincode,
                bank.location.latitude,
                bank.location.longitude,
                bank.phone,
                bank.email,
                bank.operating_hours,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a blood bank by id.
    pub fn get_blood_bank(&self, id: &str) -> DbResult<Option<BloodBank>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM blood_banks b WHERE b.id = ?", BANK_COLUMNS),
                [id],
                bank_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Get the blood bank owned by a principal.
    pub fn get_blood_bank_by_principal(&self, principal_id: &str) -> DbResult<Option<BloodBank>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM blood_banks b WHERE b.principal_id = ?",
                    BANK_COLUMNS
                ),
                [principal_id],
                bank_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Flip the verification flag. Returns the updated bank, or None if absent.
    pub fn set_bank_verified(&self, id: &str, verified: bool) -> DbResult<Option<BloodBank>> {
        self.conn.execute(
            "UPDATE blood_banks SET is_verified = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, verified, chrono::Utc::now().to_rfc3339()],
        )?;
        self.get_blood_bank(id)
    }

    /// List verified banks, optionally filtered by city substring, newest first.
    pub fn list_verified_banks(&self, city_substring: Option<&str>) -> DbResult<Vec<BloodBank>> {
        let mut query = format!(
            "SELECT {} FROM blood_banks b WHERE b.is_verified = 1",
            BANK_COLUMNS
        );
        let mut values: Vec<String> = Vec::new();

        if let Some(city) = city_substring {
            query.push_str(" AND LOWER(b.city) LIKE '%' || LOWER(?) || '%'");
            values.push(city.to_string());
        }
        query.push_str(" ORDER BY b.created_at DESC");

        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(values.iter()), bank_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Absolute overwrite of one stock row. Returns the updated entry, or
    /// None when the (bank, type) row does not exist.
    pub fn set_stock_units(
        &self,
        blood_bank_id: &str,
        blood_type: BloodType,
        units: i64,
    ) -> DbResult<Option<StockEntry>> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE blood_stock
            SET units_available = ?3, last_updated = ?4
            WHERE blood_bank_id = ?1 AND blood_type = ?2
            "#,
            params![
                blood_bank_id,
                blood_type.as_str(),
                units,
                chrono::Utc::now().to_rfc3339()
            ],
        )?;
        if rows_affected == 0 {
            return Ok(None);
        }
        self.get_stock_entry(blood_bank_id, blood_type)
    }

    /// Get one stock row.
    pub fn get_stock_entry(
        &self,
        blood_bank_id: &str,
        blood_type: BloodType,
    ) -> DbResult<Option<StockEntry>> {
        self.conn
            .query_row(
                r#"
                SELECT blood_bank_id, blood_type, units_available, last_updated
                FROM blood_stock
                WHERE blood_bank_id = ?1 AND blood_type = ?2
                "#,
                params![blood_bank_id, blood_type.as_str()],
                stock_row,
            )
            .optional()?
            .map(StockEntry::try_from)
            .transpose()
    }

    /// All stock rows for a bank, in canonical blood-type display order.
    pub fn get_stock_entries(&self, blood_bank_id: &str) -> DbResult<Vec<StockEntry>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT blood_bank_id, blood_type, units_available, last_updated
            FROM blood_stock
            WHERE blood_bank_id = ?
            "#,
        )?;
        let rows = stmt.query_map([blood_bank_id], stock_row)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(StockEntry::try_from(row?)?);
        }
        entries.sort_by_key(|e| e.blood_type.display_rank());
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Profile, Role};

    fn setup_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.insert_profile(&Profile::new("h1".into(), Role::Hospital, "City Hospital".into(), None))
            .unwrap();
        db
    }

    fn make_bank(principal: &str, name: &str, city: &str) -> BloodBank {
        BloodBank::new(principal.into(), name.into(), Location::city(city))
    }

    #[test]
    fn test_bank_creation_seeds_all_stock_rows() {
        let db = setup_db();
        let bank = make_bank("h1", "City Hospital", "Metro");
        db.insert_blood_bank_with_stock(&bank).unwrap();

        let stock = db.get_stock_entries(&bank.id).unwrap();
        assert_eq!(stock.len(), 8);
        for (entry, expected) in stock.iter().zip(BloodType::ALL) {
            assert_eq!(entry.blood_type, expected);
            assert_eq!(entry.units_available, 0);
        }
    }

    #[test]
    fn test_failed_creation_leaves_no_orphan_bank() {
        let db = setup_db();
        let bank = make_bank("h1", "City Hospital", "Metro");
        db.insert_blood_bank_with_stock(&bank).unwrap();

        // Same principal again violates the UNIQUE constraint mid-transaction
        let dup = make_bank("h1", "Duplicate", "Metro");
        assert!(db.insert_blood_bank_with_stock(&dup).is_err());
        assert!(db.get_blood_bank(&dup.id).unwrap().is_none());
        assert!(db.get_stock_entries(&dup.id).unwrap().is_empty());
    }

    #[test]
    fn test_set_stock_overwrites() {
        let db = setup_db();
        let bank = make_bank("h1", "City Hospital", "Metro");
        db.insert_blood_bank_with_stock(&bank).unwrap();

        db.set_stock_units(&bank.id, BloodType::OPos, 5).unwrap();
        let entry = db
            .set_stock_units(&bank.id, BloodType::OPos, 12)
            .unwrap()
            .unwrap();
        assert_eq!(entry.units_available, 12);
        assert!(chrono::DateTime::parse_from_rfc3339(&entry.last_updated).is_ok());

        // Other rows untouched
        let a_pos = db.get_stock_entry(&bank.id, BloodType::APos).unwrap().unwrap();
        assert_eq!(a_pos.units_available, 0);
    }

    #[test]
    fn test_set_stock_unknown_bank() {
        let db = setup_db();
        let result = db.set_stock_units("no-such-bank", BloodType::OPos, 3).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_update_does_not_touch_verification() {
        let db = setup_db();
        let mut bank = make_bank("h1", "City Hospital", "Metro");
        db.insert_blood_bank_with_stock(&bank).unwrap();
        db.set_bank_verified(&bank.id, true).unwrap();

        bank.name = "City General".into();
        bank.is_verified = false; // stale in-memory flag must not leak into the row
        db.update_blood_bank(&bank).unwrap();

        let retrieved = db.get_blood_bank(&bank.id).unwrap().unwrap();
        assert_eq!(retrieved.name, "City General");
        assert!(retrieved.is_verified);
    }

    #[test]
    fn test_list_verified_banks_city_filter() {
        let db = setup_db();
        db.insert_profile(&Profile::new("h2".into(), Role::Hospital, "Harbor Med".into(), None))
            .unwrap();

        let metro = make_bank("h1", "City Hospital", "Metro City");
        let harbor = make_bank("h2", "Harbor Med", "Harbor");
        db.insert_blood_bank_with_stock(&metro).unwrap();
        db.insert_blood_bank_with_stock(&harbor).unwrap();
        db.set_bank_verified(&metro.id, true).unwrap();

        let all = db.list_verified_banks(None).unwrap();
        assert_eq!(all.len(), 1);

        let matched = db.list_verified_banks(Some("METRO")).unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, metro.id);

        let none = db.list_verified_banks(Some("harbor")).unwrap();
        assert!(none.is_empty());
    }
}
