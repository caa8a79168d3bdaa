//! Request board integration tests.

use lifeline_core::models::{Location, NewBloodRequest, RequestFilter, RequesterRole};
use lifeline_core::{BloodType, BootstrapMode, Lifeline, RequestStatus, Role, ServiceError, Urgency};
use proptest::prelude::*;

fn setup() -> Lifeline {
    let lifeline = Lifeline::open_in_memory(BootstrapMode::Disabled).unwrap();
    lifeline.create_profile("u1", Role::Donor, "Asha", None).unwrap();
    lifeline
}

fn new_request(urgency: Option<Urgency>, city: &str) -> NewBloodRequest {
    NewBloodRequest {
        requester_role: None,
        patient_name: "Jane Doe".into(),
        blood_type: BloodType::ONeg,
        units_needed: 2,
        urgency,
        hospital_name: None,
        contact_phone: "555-0100".into(),
        location: Location::city(city),
        required_by: None,
        description: None,
    }
}

#[test]
fn test_board_scenario_urgency_ordering() {
    let lifeline = setup();

    let normal = lifeline.create_request("u1", new_request(None, "Metro")).unwrap();
    let urgent = lifeline
        .create_request("u1", new_request(Some(Urgency::Urgent), "Metro"))
        .unwrap();
    let critical = lifeline
        .create_request("u1", new_request(Some(Urgency::Critical), "Metro"))
        .unwrap();

    let feed = lifeline.list_requests(&RequestFilter::default()).unwrap();
    let ids: Vec<&str> = feed.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec![critical.id.as_str(), urgent.id.as_str(), normal.id.as_str()]);
}

#[test]
fn test_settled_requests_leave_the_feed() {
    let lifeline = setup();

    let request = lifeline.create_request("u1", new_request(None, "Metro")).unwrap();
    lifeline
        .update_request_status("u1", &request.id, RequestStatus::Fulfilled)
        .unwrap();

    assert!(lifeline.list_requests(&RequestFilter::default()).unwrap().is_empty());

    let fulfilled = lifeline
        .list_requests(&RequestFilter {
            status: Some(RequestStatus::Fulfilled),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(fulfilled.len(), 1);
}

#[test]
fn test_request_defaults() {
    let lifeline = setup();
    let request = lifeline.create_request("u1", new_request(None, "Metro")).unwrap();

    assert_eq!(request.urgency, Urgency::Normal);
    assert_eq!(request.status, RequestStatus::Active);
    assert_eq!(request.requester_role, RequesterRole::Patient);
}

#[test]
fn test_only_owner_settles() {
    let lifeline = setup();
    lifeline.create_profile("u2", Role::Donor, "Ben", None).unwrap();

    let request = lifeline.create_request("u1", new_request(None, "Metro")).unwrap();
    let err = lifeline
        .update_request_status("u2", &request.id, RequestStatus::Cancelled)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    let detail = lifeline.get_request(&request.id).unwrap();
    assert_eq!(detail.request.status, RequestStatus::Active);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Whatever mix of urgencies gets posted, the feed never ranks a less
    /// urgent request above a more urgent one.
    #[test]
    fn prop_feed_is_sorted_by_urgency_rank(urgencies in prop::collection::vec(0..3usize, 1..12)) {
        let lifeline = setup();
        for u in &urgencies {
            let urgency = match u {
                0 => Urgency::Normal,
                1 => Urgency::Urgent,
                _ => Urgency::Critical,
            };
            lifeline
                .create_request("u1", new_request(Some(urgency), "Metro"))
                .unwrap();
        }

        let feed = lifeline.list_requests(&RequestFilter::default()).unwrap();
        prop_assert_eq!(feed.len(), urgencies.len());
        for pair in feed.windows(2) {
            prop_assert!(pair[0].urgency.rank() <= pair[1].urgency.rank());
        }
    }
}
