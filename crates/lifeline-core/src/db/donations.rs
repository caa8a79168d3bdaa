//! Donation database operations.

use rusqlite::params;

use super::{Database, DbResult};
use crate::models::Donation;

impl Database {
    /// Insert a completed donation.
    pub fn insert_donation(&self, donation: &Donation) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO donations (
                id, donor_id, blood_bank_id, blood_type, units,
                donation_date, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                donation.id,
                donation.donor_id,
                donation.blood_bank_id,
                donation.blood_type.as_str(),
                donation.units,
                donation.donation_date,
                donation.created_at,
            ],
        )?;
        Ok(())
    }

    /// Total donations ever recorded.
    pub fn count_donations(&self) -> DbResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM donations", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Donations dated within the current calendar month.
    pub fn count_donations_this_month(&self) -> DbResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM donations WHERE donation_date >= date('now', 'start of month')",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BloodType, DonorRecord, Location, NewDonation, Profile, Role};

    fn setup_db_with_donor() -> (Database, String) {
        let db = Database::open_in_memory().unwrap();
        db.insert_profile(&Profile::new("u1".into(), Role::Donor, "Asha".into(), None))
            .unwrap();
        let donor = DonorRecord::new("u1".into(), BloodType::BPos, Location::city("Metro"));
        db.insert_donor(&donor).unwrap();
        (db, donor.id)
    }

    #[test]
    fn test_insert_and_count() {
        let (db, donor_id) = setup_db_with_donor();

        let donation = Donation::from_new(
            donor_id,
            NewDonation {
                blood_bank_id: None,
                blood_type: BloodType::BPos,
                units: 1,
                donation_date: None,
            },
        );
        db.insert_donation(&donation).unwrap();

        assert_eq!(db.count_donations().unwrap(), 1);
        // Dated today, so it lands in the current month
        assert_eq!(db.count_donations_this_month().unwrap(), 1);
    }

    #[test]
    fn test_old_donation_not_in_month_count() {
        let (db, donor_id) = setup_db_with_donor();

        let donation = Donation::from_new(
            donor_id,
            NewDonation {
                blood_bank_id: None,
                blood_type: BloodType::BPos,
                units: 2,
                donation_date: Some("2000-01-15".into()),
            },
        );
        db.insert_donation(&donation).unwrap();

        assert_eq!(db.count_donations().unwrap(), 1);
        assert_eq!(db.count_donations_this_month().unwrap(), 0);
    }

    #[test]
    fn test_unknown_donor_rejected() {
        let db = Database::open_in_memory().unwrap();
        let donation = Donation::from_new(
            "no-such-donor".into(),
            NewDonation {
                blood_bank_id: None,
                blood_type: BloodType::APos,
                units: 1,
                donation_date: None,
            },
        );
        assert!(db.insert_donation(&donation).is_err());
    }
}
