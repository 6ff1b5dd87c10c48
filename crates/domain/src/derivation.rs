//! Derived figures, computed on every read and never stored.

use chrono::Months;
use serde::Serialize;

use crate::substation::Substation;
use crate::time::Date;

/// Load units attributed to each apartment.
pub const LOAD_PER_APARTMENT: u64 = 5;

/// Age after which a substation is flagged for repair.
pub const REPAIR_INTERVAL_YEARS: u32 = 10;

/// Estimated load of a substation serving `apartments_count` apartments.
#[must_use]
pub fn estimated_load(apartments_count: u32) -> u64 {
    u64::from(apartments_count) * LOAD_PER_APARTMENT
}

/// Whether the last repair is older than [`REPAIR_INTERVAL_YEARS`] as of `today`.
#[must_use]
pub fn needs_repair(last_repair_date: Date, today: Date) -> bool {
    today
        .checked_sub_months(Months::new(REPAIR_INTERVAL_YEARS * 12))
        .is_some_and(|threshold| last_repair_date < threshold)
}

/// A substation as it leaves the engine, with derived figures attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstationReport {
    #[serde(flatten)]
    pub substation: Substation,
    pub estimated_load: u64,
    pub needs_repair: bool,
}

impl SubstationReport {
    /// Compute the derived figures for `substation` as of `today`.
    #[must_use]
    pub fn new(substation: Substation, today: Date) -> Self {
        Self {
            estimated_load: estimated_load(substation.apartments_count),
            needs_repair: needs_repair(substation.last_repair_date, today),
            substation,
        }
    }
}
