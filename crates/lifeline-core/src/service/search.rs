//! Public directory search over verified donors and blood banks.

use crate::db::Database;
use crate::models::{BankWithStock, BloodType, DonorSummary};
use crate::{ServiceError, ServiceResult};

/// Upper bound on donor search results.
const SEARCH_LIMIT: usize = 100;

/// Filters for the donor directory. Only verified donors are ever returned.
#[derive(Debug, Clone, Default)]
pub struct DonorSearchFilter {
    pub blood_type: Option<BloodType>,
    pub city_substring: Option<String>,
    /// When set, restrict to donors currently marked available.
    pub available_only: bool,
}

/// Filters for the bank directory. Only verified banks are ever returned.
#[derive(Debug, Clone, Default)]
pub struct BankSearchFilter {
    pub city_substring: Option<String>,
    /// When set, keep only banks holding at least one unit of this type.
    pub with_stock_of: Option<BloodType>,
}

pub struct DirectorySearch<'a> {
    db: &'a Database,
}

impl<'a> DirectorySearch<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Verified donors matching the filter, joined with profile contacts.
    pub fn search_donors(&self, filter: &DonorSearchFilter) -> ServiceResult<Vec<DonorSummary>> {
        Ok(self.db.search_donors(
            filter.blood_type,
            filter.city_substring.as_deref(),
            filter.available_only,
            SEARCH_LIMIT,
        )?)
    }

    /// Verified banks matching the filter, each with its full stock table.
    /// The stock filter is applied after the city filter.
    pub fn search_blood_banks(&self, filter: &BankSearchFilter) -> ServiceResult<Vec<BankWithStock>> {
        let banks = self
            .db
            .list_verified_banks(filter.city_substring.as_deref())?;

        let mut results = Vec::with_capacity(banks.len());
        for bank in banks {
            let stock = self.db.get_stock_entries(&bank.id)?;
            let with_stock = BankWithStock { bank, stock };
            if let Some(bt) = filter.with_stock_of {
                if !with_stock.has_stock_of(bt) {
                    continue;
                }
            }
            results.push(with_stock);
        }
        Ok(results)
    }

    /// Single donor lookup by record id. Not gated on verification.
    pub fn get_donor(&self, id: &str) -> ServiceResult<DonorSummary> {
        self.db
            .get_donor_summary(id)?
            .ok_or_else(|| ServiceError::NotFound("donor".into()))
    }

    /// Single bank lookup by id, with stock. Not gated on verification.
    pub fn get_blood_bank(&self, id: &str) -> ServiceResult<BankWithStock> {
        let bank = self
            .db
            .get_blood_bank(id)?
            .ok_or_else(|| ServiceError::NotFound("blood bank".into()))?;
        let stock = self.db.get_stock_entries(&bank.id)?;
        Ok(BankWithStock { bank, stock })
    }
}
