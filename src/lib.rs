//! costctl library
//!
//! Core inventory-aggregation and cost-estimation engine behind the costctl
//! CLI: fetch the account's EC2 and EBS inventories once, group instances by
//! naming convention, and estimate a three-part monthly cost (instances,
//! storage, egress traffic) per group.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod inventory;
pub mod naming;
pub mod pricing;
pub mod report;
pub mod storage;
pub mod traffic;

// Re-export commonly used types
pub use aggregate::{Ec2Instance, GroupedInstances};
pub use inventory::InventorySnapshot;
