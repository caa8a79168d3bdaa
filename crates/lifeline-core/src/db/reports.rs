//! Aggregate count queries backing the admin reports.

use serde::{Deserialize, Serialize};

use super::{Database, DbError, DbResult};
use crate::models::{BloodType, Urgency};

/// Verified donor count for one blood type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeCount {
    #[serde(rename = "blood_group")]
    pub blood_type: BloodType,
    pub count: i64,
}

/// Active request count for one urgency level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UrgencyCount {
    pub urgency: Urgency,
    pub count: i64,
}

impl Database {
    fn count(&self, sql: &str) -> DbResult<i64> {
        let count = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn count_donors(&self) -> DbResult<i64> {
        self.count("SELECT COUNT(*) FROM donor_records")
    }

    pub fn count_verified_donors(&self) -> DbResult<i64> {
        self.count("SELECT COUNT(*) FROM donor_records WHERE is_verified = 1")
    }

    pub fn count_available_donors(&self) -> DbResult<i64> {
        self.count("SELECT COUNT(*) FROM donor_records WHERE is_available = 1 AND is_verified = 1")
    }

    pub fn count_banks(&self) -> DbResult<i64> {
        self.count("SELECT COUNT(*) FROM blood_banks")
    }

    pub fn count_verified_banks(&self) -> DbResult<i64> {
        self.count("SELECT COUNT(*) FROM blood_banks WHERE is_verified = 1")
    }

    pub fn count_active_requests(&self) -> DbResult<i64> {
        self.count("SELECT COUNT(*) FROM blood_requests WHERE status = 'active'")
    }

    pub fn count_critical_requests(&self) -> DbResult<i64> {
        self.count(
            "SELECT COUNT(*) FROM blood_requests WHERE status = 'active' AND urgency = 'critical'",
        )
    }

    /// Verified donors broken down by blood type, in canonical order.
    pub fn donors_by_blood_type(&self) -> DbResult<Vec<TypeCount>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT blood_type, COUNT(*) as count
            FROM donor_records
            WHERE is_verified = 1
            GROUP BY blood_type
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut counts = Vec::new();
        for row in rows {
            let (raw, count) = row?;
            let blood_type = BloodType::parse(&raw)
                .ok_or_else(|| DbError::Constraint(format!("Unknown blood type: {}", raw)))?;
            counts.push(TypeCount { blood_type, count });
        }
        counts.sort_by_key(|c| c.blood_type.display_rank());
        Ok(counts)
    }

    /// Active requests broken down by urgency.
    pub fn requests_by_urgency(&self) -> DbResult<Vec<UrgencyCount>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT urgency, COUNT(*) as count
            FROM blood_requests
            WHERE status = 'active'
            GROUP BY urgency
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut counts = Vec::new();
        for row in rows {
            let (raw, count) = row?;
            let urgency = Urgency::parse(&raw)
                .ok_or_else(|| DbError::Constraint(format!("Unknown urgency: {}", raw)))?;
            counts.push(UrgencyCount { urgency, count });
        }
        counts.sort_by_key(|c| c.urgency.rank());
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DonorRecord, Location, Profile, Role};

    #[test]
    fn test_counts_split_by_verification() {
        let db = Database::open_in_memory().unwrap();
        db.insert_profile(&Profile::new("u1".into(), Role::Donor, "A".into(), None))
            .unwrap();
        db.insert_profile(&Profile::new("u2".into(), Role::Donor, "B".into(), None))
            .unwrap();

        let verified = DonorRecord::new("u1".into(), BloodType::OPos, Location::city("Metro"));
        let mut unavailable = DonorRecord::new("u2".into(), BloodType::OPos, Location::city("Metro"));
        unavailable.is_available = false;
        db.insert_donor(&verified).unwrap();
        db.insert_donor(&unavailable).unwrap();
        db.set_donor_verified(&verified.id, true).unwrap();

        assert_eq!(db.count_donors().unwrap(), 2);
        assert_eq!(db.count_verified_donors().unwrap(), 1);
        assert_eq!(db.count_available_donors().unwrap(), 1);
    }

    #[test]
    fn test_donors_by_blood_type_only_verified() {
        let db = Database::open_in_memory().unwrap();
        db.insert_profile(&Profile::new("u1".into(), Role::Donor, "A".into(), None))
            .unwrap();
        db.insert_profile(&Profile::new("u2".into(), Role::Donor, "B".into(), None))
            .unwrap();

        let d1 = DonorRecord::new("u1".into(), BloodType::ONeg, Location::city("Metro"));
        let d2 = DonorRecord::new("u2".into(), BloodType::APos, Location::city("Metro"));
        db.insert_donor(&d1).unwrap();
        db.insert_donor(&d2).unwrap();
        db.set_donor_verified(&d1.id, true).unwrap();

        let counts = db.donors_by_blood_type().unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].blood_type, BloodType::ONeg);
        assert_eq!(counts[0].count, 1);
    }
}
