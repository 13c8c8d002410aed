//! Grouping of the instance inventory into named clusters
//!
//! Walks the snapshot reservation by reservation, resolves each instance's
//! name and storage footprint, and files the result under its group key.
//! Instances whose name had to be synthesized collect in a separate unnamed
//! bucket: they are warned about once and never appear in the returned
//! grouping, so the report only covers instances an operator can identify.
//!
//! Group iteration order and instance order within a group follow insertion
//! order, which makes report output deterministic across runs.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

use crate::error::Result;
use crate::inventory::InventorySnapshot;
use crate::naming;
use crate::pricing;
use crate::storage::{self, StorageFootprint};

/// One compute instance after resolution. Immutable once constructed.
#[derive(Debug, Clone, Serialize)]
pub struct Ec2Instance {
    pub name: String,
    pub id: String,
    pub instance_type: String,
    pub core_count: i32,
    pub hyper_threaded: bool,
    pub storage: StorageFootprint,
}

impl Ec2Instance {
    /// Hourly on-demand cost from the fixed price table.
    pub fn cost_for_hour(&self) -> Result<f64> {
        pricing::hourly_cost(&self.instance_type)
    }

    /// 30-day on-demand cost from the fixed price table.
    pub fn cost_for_30_days(&self) -> Result<f64> {
        pricing::cost_for_30_days(&self.instance_type)
    }

    /// Monthly cost of the attached storage at default provisioning.
    pub fn ebs_cost_for_month(&self) -> f64 {
        pricing::monthly_storage_cost(&self.storage)
    }
}

/// Instances keyed by group, in insertion order.
pub type GroupedInstances = IndexMap<String, Vec<Ec2Instance>>;

/// Group every instance in the snapshot by its derived name prefix.
///
/// Synthesized-name instances are excluded from the result; when any exist,
/// a single warning lists them.
pub fn group_instances(snapshot: &InventorySnapshot) -> Result<GroupedInstances> {
    let mut groups = GroupedInstances::new();
    let mut unnamed: Vec<Ec2Instance> = Vec::new();

    for reservation in &snapshot.reservations {
        for (ordinal, record) in reservation.instances.iter().enumerate() {
            let name = naming::resolve_name(&record.tags, ordinal);
            let footprint = storage::resolve_block_devices(&record.volume_ids, snapshot)?;

            let instance = Ec2Instance {
                name: name.as_str().to_string(),
                id: record.id.clone(),
                instance_type: record.instance_type.clone(),
                core_count: record.core_count,
                hyper_threaded: record.threads_per_core > 0,
                storage: footprint,
            };

            if name.is_synthesized() {
                unnamed.push(instance);
            } else {
                groups
                    .entry(naming::group_key(name.as_str()))
                    .or_default()
                    .push(instance);
            }
        }
    }

    if !unnamed.is_empty() {
        let members: Vec<String> = unnamed
            .iter()
            .map(|i| format!("{} ({})", i.name, i.id))
            .collect();
        warn!(
            "{} instance(s) found with no Name tag, excluded from the report: {}",
            unnamed.len(),
            members.join(", ")
        );
    }

    Ok(groups)
}
