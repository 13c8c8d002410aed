//! Inventory snapshot of EC2 instances and EBS volumes
//!
//! One `InventorySnapshot` is built at the start of a run and passed by
//! reference into everything that needs it, which gives "fetch once per run"
//! semantics without process-global state. Each inventory is retrieved with a
//! single unfiltered describe call; a response that is empty or that carries
//! a continuation token aborts the run, since paging is not implemented and a
//! partial inventory would silently understate the bill.
//!
//! The SDK response shapes are converted into plain records at this boundary
//! so the resolvers and the aggregator stay testable without a client.

use aws_sdk_ec2::Client as Ec2Client;
use tracing::info;

use crate::error::{CostctlError, Result};

/// All instance and volume descriptions for one run.
#[derive(Debug, Clone)]
pub struct InventorySnapshot {
    pub reservations: Vec<ReservationRecord>,
    pub volumes: Vec<VolumeRecord>,
}

/// Instances launched together; the name fallback ordinal is scoped to this.
#[derive(Debug, Clone)]
pub struct ReservationRecord {
    pub instances: Vec<InstanceRecord>,
}

/// One instance description, reduced to the fields the aggregator consumes.
#[derive(Debug, Clone)]
pub struct InstanceRecord {
    pub id: String,
    pub instance_type: String,
    pub tags: Vec<(String, String)>,
    pub core_count: i32,
    pub threads_per_core: i32,
    /// Volume ids of the instance's EBS block-device mappings
    pub volume_ids: Vec<String>,
}

/// One volume description. The type stays a raw string here; classification
/// into priced storage classes happens in the block-device resolver.
#[derive(Debug, Clone)]
pub struct VolumeRecord {
    pub id: String,
    pub volume_type: String,
    pub size_gib: i32,
}

impl InventorySnapshot {
    /// Fetch both inventories. Issues exactly one DescribeInstances and one
    /// DescribeVolumes request.
    pub async fn fetch(client: &Ec2Client) -> Result<Self> {
        let reservations = fetch_instances(client).await?;
        let volumes = fetch_volumes(client).await?;
        Ok(Self {
            reservations,
            volumes,
        })
    }

    /// Linear lookup of a volume by id. Every device mapping in the account
    /// must resolve; a miss means the two inventories disagree and the run
    /// cannot produce a correct report.
    pub fn volume_by_id(&self, volume_id: &str) -> Result<&VolumeRecord> {
        self.volumes
            .iter()
            .find(|v| v.id == volume_id)
            .ok_or_else(|| CostctlError::VolumeNotFound(volume_id.to_string()))
    }
}

async fn fetch_instances(client: &Ec2Client) -> Result<Vec<ReservationRecord>> {
    info!("Fetching EC2 instance descriptions");
    let response = client
        .describe_instances()
        .send()
        .await
        .map_err(|e| CostctlError::Aws(format!("Failed to describe EC2 instances: {}", e)))?;

    if response.next_token().is_some() {
        return Err(CostctlError::InventoryTruncated("instance"));
    }
    if response.reservations().is_empty() {
        return Err(CostctlError::EmptyInventory("instance"));
    }

    let mut reservations = Vec::new();
    for reservation in response.reservations() {
        let mut instances = Vec::new();
        for instance in reservation.instances() {
            let id = instance
                .instance_id()
                .ok_or_else(|| {
                    CostctlError::Aws("DescribeInstances returned an instance with no id".into())
                })?
                .to_string();
            let instance_type = instance
                .instance_type()
                .map(|t| t.as_str().to_string())
                .ok_or_else(|| {
                    CostctlError::Aws(format!("Instance {} has no instance type", id))
                })?;

            let tags = instance
                .tags()
                .iter()
                .filter_map(|tag| {
                    tag.key()
                        .zip(tag.value())
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                })
                .collect();

            let core_count = instance
                .cpu_options()
                .and_then(|c| c.core_count())
                .unwrap_or(0);
            let threads_per_core = instance
                .cpu_options()
                .and_then(|c| c.threads_per_core())
                .unwrap_or(0);

            let volume_ids = instance
                .block_device_mappings()
                .iter()
                .filter_map(|mapping| mapping.ebs())
                .filter_map(|ebs| ebs.volume_id())
                .map(|id| id.to_string())
                .collect();

            instances.push(InstanceRecord {
                id,
                instance_type,
                tags,
                core_count,
                threads_per_core,
                volume_ids,
            });
        }
        reservations.push(ReservationRecord { instances });
    }
    Ok(reservations)
}

async fn fetch_volumes(client: &Ec2Client) -> Result<Vec<VolumeRecord>> {
    info!("Fetching EBS volume descriptions");
    let response = client
        .describe_volumes()
        .send()
        .await
        .map_err(|e| CostctlError::Aws(format!("Failed to describe EBS volumes: {}", e)))?;

    if response.next_token().is_some() {
        return Err(CostctlError::InventoryTruncated("volume"));
    }
    if response.volumes().is_empty() {
        return Err(CostctlError::EmptyInventory("volume"));
    }

    let mut volumes = Vec::new();
    for volume in response.volumes() {
        let id = volume
            .volume_id()
            .ok_or_else(|| CostctlError::Aws("DescribeVolumes returned a volume with no id".into()))?
            .to_string();
        let volume_type = volume
            .volume_type()
            .map(|t| t.as_str().to_string())
            .unwrap_or_default();
        let size_gib = volume.size().unwrap_or(0);
        volumes.push(VolumeRecord {
            id,
            volume_type,
            size_gib,
        });
    }
    Ok(volumes)
}
