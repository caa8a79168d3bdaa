//! Donor record database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{BloodType, DonorRecord, DonorSummary, Location};

const DONOR_COLUMNS: &str = "d.id, d.principal_id, d.blood_type, d.address, d.city, d.state, \
     d.pincode, d.latitude, d.longitude, d.is_available, d.is_verified, \
     d.date_of_birth, d.gender, d.weight_kg, d.last_donation_date, \
     d.medical_notes, d.created_at, d.updated_at";

/// Intermediate row struct for database mapping.
struct DonorRow {
    id: String,
    principal_id: String,
    blood_type: String,
    address: Option<String>,
    city: String,
    state: Option<String>,
    pincode: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    is_available: bool,
    is_verified: bool,
    date_of_birth: Option<String>,
    gender: Option<String>,
    weight_kg: Option<f64>,
    last_donation_date: Option<String>,
    medical_notes: Option<String>,
    created_at: String,
    updated_at: String,
}

fn donor_row(row: &Row) -> rusqlite::Result<DonorRow> {
    Ok(DonorRow {
        id: row.get(0)?,
        principal_id: row.get(1)?,
        blood_type: row.get(2)?,
        address: row.get(3)?,
        city: row.get(4)?,
        state: row.get(5)?,
        pincode: row.get(6)?,
        latitude: row.get(7)?,
        longitude: row.get(8)?,
        is_available: row.get(9)?,
        is_verified: row.get(10)?,
        date_of_birth: row.get(11)?,
        gender: row.get(12)?,
        weight_kg: row.get(13)?,
        last_donation_date: row.get(14)?,
        medical_notes: row.get(15)?,
        created_at: row.get(16)?,
        updated_at: row.get(17)?,
    })
}

impl TryFrom<DonorRow> for DonorRecord {
    type Error = DbError;

    fn try_from(row: DonorRow) -> Result<Self, Self::Error> {
        let blood_type = BloodType::parse(&row.blood_type).ok_or_else(|| {
            DbError::Constraint(format!("Unknown blood type: {}", row.blood_type))
        })?;
        Ok(DonorRecord {
            id: row.id,
            principal_id: row.principal_id,
            blood_type,
            location: Location {
                address: row.address,
                city: row.city,
                state: row.state,
                pincode: row.pincode,
                latitude: row.latitude,
                longitude: row.longitude,
            },
            is_available: row.is_available,
            is_verified: row.is_verified,
            date_of_birth: row.date_of_birth,
            gender: row.gender,
            weight_kg: row.weight_kg,
            last_donation_date: row.last_donation_date,
            medical_notes: row.medical_notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl Database {
    /// Insert a new donor record.
    pub fn insert_donor(&self, donor: &DonorRecord) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO donor_records (
                id, principal_id, blood_type, address, city, state, pincode,
                latitude, longitude, is_available, is_verified, date_of_birth,
                gender, weight_kg, last_donation_date, medical_notes,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
            "#,
            params![
                donor.id,
                donor.principal_id,
                donor.blood_type.as_str(),
                donor.location.address,
                donor.location.city,
                donor.location.state,
                donor.location.pincode,
                donor.location.latitude,
                donor.location.longitude,
                donor.is_available,
                donor.is_verified,
                donor.date_of_birth,
                donor.gender,
                donor.weight_kg,
                donor.last_donation_date,
                donor.medical_notes,
                donor.created_at,
                donor.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Overwrite a donor record's mutable fields. Returns false if absent.
    /// `is_verified` is deliberately not written here; see `set_donor_verified`.
    pub fn update_donor(&self, donor: &DonorRecord) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE donor_records SET
                blood_type = ?2,
                address = ?3,
                city = ?4,
                state = ?5,
                pincode = ?6,
                latitude = ?7,
                longitude = ?8,
                is_available = ?9,
                date_of_birth = ?10,
                gender = ?11,
                weight_kg = ?12,
                last_donation_date = ?13,
                medical_notes = ?14,
                updated_at = ?15
            WHERE id = ?1
            "#,
            params![
                donor.id,
                donor.blood_type.as_str(),
                donor.location.address,
                donor.location.city,
                donor.location.state,
                donor.location.pincode,
                donor.location.latitude,
                donor.location.longitude,
                donor.is_available,
                donor.date_of_birth,
                donor.gender,
                donor.weight_kg,
                donor.last_donation_date,
                donor.medical_notes,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a donor record by id.
    pub fn get_donor(&self, id: &str) -> DbResult<Option<DonorRecord>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM donor_records d WHERE d.id = ?", DONOR_COLUMNS),
                [id],
                donor_row,
            )
            .optional()?
            .map(DonorRecord::try_from)
            .transpose()
    }

    /// Get the donor record owned by a principal.
    pub fn get_donor_by_principal(&self, principal_id: &str) -> DbResult<Option<DonorRecord>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM donor_records d WHERE d.principal_id = ?",
                    DONOR_COLUMNS
                ),
                [principal_id],
                donor_row,
            )
            .optional()?
            .map(DonorRecord::try_from)
            .transpose()
    }

    /// Flip the verification flag. Returns the updated record, or None if absent.
    pub fn set_donor_verified(&self, id: &str, verified: bool) -> DbResult<Option<DonorRecord>> {
        self.conn.execute(
            "UPDATE donor_records SET is_verified = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, verified, chrono::Utc::now().to_rfc3339()],
        )?;
        self.get_donor(id)
    }

    /// A donor joined with the owning profile's display name and phone.
    pub fn get_donor_summary(&self, id: &str) -> DbResult<Option<DonorSummary>> {
        self.conn
            .query_row(
                &format!(
                    r#"
                    SELECT {}, p.display_name, p.phone
                    FROM donor_records d
                    JOIN profiles p ON d.principal_id = p.principal_id
                    WHERE d.id = ?
                    "#,
                    DONOR_COLUMNS
                ),
                [id],
                |row| {
                    let donor = donor_row(row)?;
                    let display_name: String = row.get(18)?;
                    let phone: Option<String> = row.get(19)?;
                    Ok((donor, display_name, phone))
                },
            )
            .optional()?
            .map(|(donor, display_name, phone)| {
                Ok(DonorSummary {
                    record: donor.try_into()?,
                    display_name,
                    phone,
                })
            })
            .transpose()
    }

    /// Search verified donors with optional filters, newest first.
    pub fn search_donors(
        &self,
        blood_type: Option<BloodType>,
        city_substring: Option<&str>,
        available_only: bool,
        limit: usize,
    ) -> DbResult<Vec<DonorSummary>> {
        let mut query = format!(
            r#"
            SELECT {}, p.display_name, p.phone
            FROM donor_records d
            JOIN profiles p ON d.principal_id = p.principal_id
            WHERE d.is_verified = 1
            "#,
            DONOR_COLUMNS
        );
        let mut values: Vec<String> = Vec::new();

        if let Some(bt) = blood_type {
            query.push_str(" AND d.blood_type = ?");
            values.push(bt.as_str().to_string());
        }
        if let Some(city) = city_substring {
            query.push_str(" AND LOWER(d.city) LIKE '%' || LOWER(?) || '%'");
            values.push(city.to_string());
        }
        if available_only {
            query.push_str(" AND d.is_available = 1");
        }
        query.push_str(&format!(" ORDER BY d.created_at DESC LIMIT {}", limit));

        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(values.iter()), |row| {
            let donor = donor_row(row)?;
            let display_name: String = row.get(18)?;
            let phone: Option<String> = row.get(19)?;
            Ok((donor, display_name, phone))
        })?;

        let mut donors = Vec::new();
        for row in rows {
            let (donor, display_name, phone) = row?;
            donors.push(DonorSummary {
                record: donor.try_into()?,
                display_name,
                phone,
            });
        }
        Ok(donors)
    }
}
