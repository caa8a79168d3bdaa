//! Component services built over the database layer.
//!
//! Each component borrows the database for the duration of one operation and
//! receives a pre-resolved [`AuthContext`](crate::auth::AuthContext).

mod board;
mod donors;
mod inventory;
mod profiles;
mod reports;
mod search;
mod verification;

pub use board::RequestBoard;
pub use donors::DonorRegistry;
pub use inventory::InventoryLedger;
pub use profiles::{ProfileDirectory, ProfileView};
pub use reports::{AdminReports, BankStats, DonationStats, DonorStats, ReportStats, RequestStats};
pub use search::{BankSearchFilter, DirectorySearch, DonorSearchFilter};
pub use verification::{EntityType, VerificationAuthority, VerifiedEntity};
