//! Fixed price tables and pure cost functions
//!
//! All prices are on-demand USD rates for a single pricing region. Nothing
//! here talks to AWS: given an instance type and a storage footprint, the
//! result is deterministic. An instance type that is not in the table is a
//! hard error rather than a guess, so a fleet with an unpriced type aborts
//! the report instead of understating the bill.

use crate::error::{CostctlError, Result};
use crate::storage::StorageFootprint;

/// Region the price table below is valid for
pub const PRICING_REGION: &str = "ca-central-1";

/// gp2 price per GB-month, default provisioning
pub const GP2_PRICE_PER_GB_MONTH: f64 = 0.088;
/// gp3 price per GB-month, default provisioning
pub const GP3_PRICE_PER_GB_MONTH: f64 = 0.11;
/// Egress price per GB, estimated from previous bills
pub const TRAFFIC_PRICE_PER_GB: f64 = 0.07;

/// Billable hours in the 30-day reporting month
const HOURS_PER_MONTH: f64 = 24.0 * 30.0;

/// Instance types with a known hourly price, for iteration in tests and
/// diagnostics. Kept in sync with [`hourly_cost`].
pub const PRICED_INSTANCE_TYPES: &[&str] = &[
    "c5a.large",
    "db.gp2",
    "db.t4g.small",
    "i4i.large",
    "i4i.xlarge",
    "i4i.2xlarge",
    "m5a.large",
    "m5a.xlarge",
    "m5a.2xlarge",
    "m6i.large",
    "m6i.xlarge",
    "m6i.4xlarge",
    "r5a.large",
    "r5a.xlarge",
    "r5a.4xlarge",
    "t2.micro",
    "t3.2xlarge",
    "t3a.nano",
    "t3a.small",
    "t3a.medium",
    "t3a.large",
    "t3a.xlarge",
];

/// Hourly on-demand cost for an instance type.
///
/// Only covers the pre-defined types in [`PRICED_INSTANCE_TYPES`] and only
/// for [`PRICING_REGION`].
pub fn hourly_cost(instance_type: &str) -> Result<f64> {
    let price = match instance_type {
        "c5a.large" => 0.084,
        "db.gp2" => 0.253,
        "db.t4g.small" => 0.07,
        "i4i.large" => 0.189,
        "i4i.xlarge" => 0.378,
        "i4i.2xlarge" => 0.757,
        "m5a.large" => 0.096,
        "m5a.xlarge" => 0.192,
        "m5a.2xlarge" => 0.384,
        "m6i.large" => 0.107,
        "m6i.xlarge" => 0.214,
        "m6i.4xlarge" => 0.856,
        "r5a.large" => 0.124,
        "r5a.xlarge" => 0.248,
        "r5a.4xlarge" => 0.992,
        "t2.micro" => 0.0128,
        "t3.2xlarge" => 0.3712,
        "t3a.nano" => 0.0052,
        "t3a.small" => 0.0209,
        "t3a.medium" => 0.0418,
        "t3a.large" => 0.0835,
        "t3a.xlarge" => 0.167,
        _ => {
            return Err(CostctlError::UnknownInstanceType(
                instance_type.to_string(),
            ))
        }
    };
    Ok(price)
}

/// 30-day on-demand cost for an instance type (hourly x 24 x 30).
pub fn cost_for_30_days(instance_type: &str) -> Result<f64> {
    Ok(hourly_cost(instance_type)? * HOURS_PER_MONTH)
}

/// Monthly cost of a storage footprint at default-provisioning prices.
pub fn monthly_storage_cost(storage: &StorageFootprint) -> f64 {
    storage.gp2_gib as f64 * GP2_PRICE_PER_GB_MONTH + storage.gp3_gib as f64 * GP3_PRICE_PER_GB_MONTH
}
