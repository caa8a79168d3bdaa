//! Blood request database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{
    BloodRequest, BloodType, Location, RequestDetail, RequestStatus, RequesterRole, Urgency,
};

const REQUEST_COLUMNS: &str = "r.id, r.requester_principal_id, r.requester_role, r.patient_name, \
     r.blood_type, r.units_needed, r.urgency, r.hospital_name, r.contact_phone, \
     r.address, r.city, r.state, r.pincode, r.latitude, r.longitude, \
     r.required_by, r.description, r.status, r.created_at, r.updated_at";

/// Intermediate row struct for database mapping.
struct RequestRow {
    id: String,
    requester_principal_id: String,
    requester_role: String,
    patient_name: String,
    blood_type: String,
    units_needed: i64,
    urgency: String,
    hospital_name: Option<String>,
    contact_phone: String,
    address: Option<String>,
    city: String,
    state: Option<String>,
    pincode: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    required_by: Option<String>,
    description: Option<String>,
    status: String,
    created_at: String,
    updated_at: String,
}

fn request_row(row: &Row) -> rusqlite::Result<RequestRow> {
    Ok(RequestRow {
        id: row.get(0)?,
        requester_principal_id: row.get(1)?,
        requester_role: row.get(2)?,
        patient_name: row.get(3)?,
        blood_type: row.get(4)?,
        units_needed: row.get(5)?,
        urgency: row.get(6)?,
        hospital_name: row.get(7)?,
        contact_phone: row.get(8)?,
        address: row.get(9)?,
        city: row.get(10)?,
        state: row.get(11)?,
        pincode: row.get(12)?,
        latitude: row.get(13)?,
        longitude: row.get(14)?,
        required_by: row.get(15)?,
        description: row.get(16)?,
        status: row.get(17)?,
        created_at: row.get(18)?,
        updated_at: row.get(19)?,
    })
}

impl TryFrom<RequestRow> for BloodRequest {
    type Error = DbError;

    fn try_from(row: RequestRow) -> Result<Self, Self::Error> {
        let blood_type = BloodType::parse(&row.blood_type).ok_or_else(|| {
            DbError::Constraint(format!("Unknown blood type: {}", row.blood_type))
        })?;
        let urgency = Urgency::parse(&row.urgency)
            .ok_or_else(|| DbError::Constraint(format!("Unknown urgency: {}", row.urgency)))?;
        let status = RequestStatus::parse(&row.status)
            .ok_or_else(|| DbError::Constraint(format!("Unknown status: {}", row.status)))?;
        let requester_role = RequesterRole::parse(&row.requester_role).ok_or_else(|| {
            DbError::Constraint(format!("Unknown requester role: {}", row.requester_role))
        })?;

        Ok(BloodRequest {
            id: row.id,
            requester_principal_id: row.requester_principal_id,
            requester_role,
            patient_name: row.patient_name,
            blood_type,
            units_needed: row.units_needed,
            urgency,
            hospital_name: row.hospital_name,
            contact_phone: row.contact_phone,
            location: Location {
                address: row.address,
                city: row.city,
                state: row.state,
                pincode: row.pincode,
                latitude: row.latitude,
                longitude: row.longitude,
            },
            required_by: row.required_by,
            description: row.description,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl Database {
    /// Insert a new blood request.
    pub fn insert_request(&self, request: &BloodRequest) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO blood_requests (
                id, requester_principal_id, requester_role, patient_name,
                blood_type, units_needed, urgency, hospital_name, contact_phone,
                address, city, state, pincode, latitude, longitude,
                required_by, description, status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)
            "#,
            params![
                request.id,
                request.requester_principal_id,
                request.requester_role.as_str(),
                request.patient_name,
                request.blood_type.as_str(),
                request.units_needed,
                request.urgency.as_str(),
                request.hospital_name,
                request.contact_phone,
                request.location.address,
                request.location.city,
                request.location.state,
                request.location.pincode,
                request.location.latitude,
                request.location.longitude,
                request.required_by,
                request.description,
                request.status.as_str(),
                request.created_at,
                request.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Get a request by id.
    pub fn get_request(&self, id: &str) -> DbResult<Option<BloodRequest>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM blood_requests r WHERE r.id = ?", REQUEST_COLUMNS),
                [id],
                request_row,
            )
            .optional()?
            .map(BloodRequest::try_from)
            .transpose()
    }

    /// A request joined with the requester's profile contact details.
    pub fn get_request_detail(&self, id: &str) -> DbResult<Option<RequestDetail>> {
        self.conn
            .query_row(
                &format!(
                    r#"
                    SELECT {}, p.display_name, p.phone
                    FROM blood_requests r
                    LEFT JOIN profiles p ON r.requester_principal_id = p.principal_id
                    WHERE r.id = ?
                    "#,
                    REQUEST_COLUMNS
                ),
                [id],
                |row| {
                    let request = request_row(row)?;
                    let requester_name: Option<String> = row.get(20)?;
                    let requester_phone: Option<String> = row.get(21)?;
                    Ok((request, requester_name, requester_phone))
                },
            )
            .optional()?
            .map(|(request, requester_name, requester_phone)| {
                Ok(RequestDetail {
                    request: request.try_into()?,
                    requester_name,
                    requester_phone,
                })
            })
            .transpose()
    }

    /// List requests for the board feed.
    ///
    /// Ordering: urgency rank first (critical, urgent, normal), then
    /// created_at descending within the same rank.
    pub fn list_requests(
        &self,
        status: RequestStatus,
        blood_type: Option<BloodType>,
        city_substring: Option<&str>,
        limit: usize,
    ) -> DbResult<Vec<BloodRequest>> {
        let mut query = format!(
            "SELECT {} FROM blood_requests r WHERE r.status = ?",
            REQUEST_COLUMNS
        );
        let mut values: Vec<String> = vec![status.as_str().to_string()];

        if let Some(bt) = blood_type {
            query.push_str(" AND r.blood_type = ?");
            values.push(bt.as_str().to_string());
        }
        if let Some(city) = city_substring {
            query.push_str(" AND LOWER(r.city) LIKE '%' || LOWER(?) || '%'");
            values.push(city.to_string());
        }

        query.push_str(&format!(
            r#"
            ORDER BY
              CASE r.urgency
                WHEN 'critical' THEN 1
                WHEN 'urgent' THEN 2
                ELSE 3
              END,
              r.created_at DESC
            LIMIT {}
            "#,
            limit
        ));

        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(values.iter()), request_row)?;

        let mut requests = Vec::new();
        for row in rows {
            requests.push(row?.try_into()?);
        }
        Ok(requests)
    }

    /// Overwrite a request's status. Returns false if absent.
    pub fn set_request_status(&self, id: &str, status: RequestStatus) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE blood_requests SET status = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, status.as_str(), chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewBloodRequest;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn make_request(principal: &str, urgency: Urgency, city: &str, created_at: &str) -> BloodRequest {
        let mut request = BloodRequest::from_new(
            principal.into(),
            NewBloodRequest {
                requester_role: None,
                patient_name: "Jane Doe".into(),
                blood_type: BloodType::ONeg,
                units_needed: 2,
                urgency: Some(urgency),
                hospital_name: None,
                contact_phone: "555-0100".into(),
                location: Location::city(city),
                required_by: None,
                description: None,
            },
        );
        request.created_at = created_at.into();
        request
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();
        let request = make_request("u1", Urgency::Critical, "Metro", "2026-01-01T10:00:00+00:00");
        db.insert_request(&request).unwrap();

        let retrieved = db.get_request(&request.id).unwrap().unwrap();
        assert_eq!(retrieved.urgency, Urgency::Critical);
        assert_eq!(retrieved.status, RequestStatus::Active);
        assert_eq!(retrieved.location.city, "Metro");
    }

    #[test]
    fn test_list_orders_by_urgency_then_recency() {
        let db = setup_db();

        let normal_new = make_request("u1", Urgency::Normal, "Metro", "2026-01-03T00:00:00+00:00");
        let critical_old = make_request("u1", Urgency::Critical, "Metro", "2026-01-01T00:00:00+00:00");
        let critical_new = make_request("u1", Urgency::Critical, "Metro", "2026-01-02T00:00:00+00:00");
        let urgent = make_request("u1", Urgency::Urgent, "Metro", "2026-01-04T00:00:00+00:00");

        for r in [&normal_new, &critical_old, &critical_new, &urgent] {
            db.insert_request(r).unwrap();
        }

        let listed = db
            .list_requests(RequestStatus::Active, None, None, 100)
            .unwrap();
        let ids: Vec<&str> = listed.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                critical_new.id.as_str(),
                critical_old.id.as_str(),
                urgent.id.as_str(),
                normal_new.id.as_str(),
            ]
        );
    }

    #[test]
    fn test_list_filters() {
        let db = setup_db();

        let mut metro = make_request("u1", Urgency::Normal, "Metro City", "2026-01-01T00:00:00+00:00");
        metro.blood_type = BloodType::APos;
        let harbor = make_request("u1", Urgency::Normal, "Harbor", "2026-01-02T00:00:00+00:00");
        db.insert_request(&metro).unwrap();
        db.insert_request(&harbor).unwrap();

        let by_city = db
            .list_requests(RequestStatus::Active, None, Some("metro"), 100)
            .unwrap();
        assert_eq!(by_city.len(), 1);
        assert_eq!(by_city[0].id, metro.id);

        let by_type = db
            .list_requests(RequestStatus::Active, Some(BloodType::APos), None, 100)
            .unwrap();
        assert_eq!(by_type.len(), 1);
        assert_eq!(by_type[0].id, metro.id);
    }

    #[test]
    fn test_status_filter_excludes_settled() {
        let db = setup_db();

        let request = make_request("u1", Urgency::Normal, "Metro", "2026-01-01T00:00:00+00:00");
        db.insert_request(&request).unwrap();
        db.set_request_status(&request.id, RequestStatus::Fulfilled)
            .unwrap();

        let active = db
            .list_requests(RequestStatus::Active, None, None, 100)
            .unwrap();
        assert!(active.is_empty());

        let fulfilled = db
            .list_requests(RequestStatus::Fulfilled, None, None, 100)
            .unwrap();
        assert_eq!(fulfilled.len(), 1);
    }

    #[test]
    fn test_limit() {
        let db = setup_db();
        for i in 0..5 {
            let r = make_request(
                "u1",
                Urgency::Normal,
                "Metro",
                &format!("2026-01-0{}T00:00:00+00:00", i + 1),
            );
            db.insert_request(&r).unwrap();
        }

        let limited = db.list_requests(RequestStatus::Active, None, None, 3).unwrap();
        assert_eq!(limited.len(), 3);
    }

    #[test]
    fn test_request_detail_join() {
        let db = setup_db();
        db.insert_profile(&crate::models::Profile::new(
            "u1".into(),
            crate::models::Role::Donor,
            "Asha".into(),
            Some("555".into()),
        ))
        .unwrap();

        let request = make_request("u1", Urgency::Normal, "Metro", "2026-01-01T00:00:00+00:00");
        db.insert_request(&request).unwrap();

        let detail = db.get_request_detail(&request.id).unwrap().unwrap();
        assert_eq!(detail.requester_name, Some("Asha".into()));
        assert_eq!(detail.requester_phone, Some("555".into()));
    }
}
