//! Domain models for the lifeline directory.

mod bank;
mod blood;
mod donation;
mod donor;
mod location;
mod profile;
mod request;

pub use bank::{BankUpdate, BankWithStock, BloodBank, NewBloodBank, StockEntry};
pub use blood::{BloodType, RequestStatus, Urgency};
pub use donation::{Donation, NewDonation};
pub use donor::{DonorRecord, DonorSummary, DonorUpdate, NewDonorRecord};
pub use location::Location;
pub use profile::{Profile, ProfileUpdate, Role};
pub use request::{BloodRequest, NewBloodRequest, RequestDetail, RequestFilter, RequesterRole};
