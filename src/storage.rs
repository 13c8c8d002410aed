//! Block-device resolution into per-class storage footprints
//!
//! An instance's storage footprint is the sum of its attached volumes'
//! capacities, split by storage class. Exactly two classes are priced; a
//! volume of any other type aborts the run rather than being silently
//! dropped from the bill.

use serde::Serialize;

use crate::error::{CostctlError, Result};
use crate::inventory::InventorySnapshot;

/// Recognized (priced) EBS storage classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageClass {
    Gp2,
    Gp3,
}

impl StorageClass {
    /// Classify a volume-type string as reported by DescribeVolumes.
    pub fn from_volume_type(volume_type: &str) -> Option<Self> {
        match volume_type {
            "gp2" => Some(StorageClass::Gp2),
            "gp3" => Some(StorageClass::Gp3),
            _ => None,
        }
    }
}

/// Attached capacity per storage class, in GiB. Zero when nothing is
/// attached in that class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StorageFootprint {
    pub gp2_gib: i64,
    pub gp3_gib: i64,
}

impl StorageFootprint {
    pub fn total_gib(&self) -> i64 {
        self.gp2_gib + self.gp3_gib
    }

    fn add(&mut self, class: StorageClass, size_gib: i64) {
        match class {
            StorageClass::Gp2 => self.gp2_gib += size_gib,
            StorageClass::Gp3 => self.gp3_gib += size_gib,
        }
    }
}

/// Resolve an instance's attached volume ids against the volume inventory
/// and sum capacity by storage class.
pub fn resolve_block_devices(
    volume_ids: &[String],
    snapshot: &InventorySnapshot,
) -> Result<StorageFootprint> {
    let mut footprint = StorageFootprint::default();
    for volume_id in volume_ids {
        let volume = snapshot.volume_by_id(volume_id)?;
        let class = StorageClass::from_volume_type(&volume.volume_type).ok_or_else(|| {
            CostctlError::UnsupportedVolumeType {
                volume_id: volume.id.clone(),
                volume_type: volume.volume_type.clone(),
            }
        })?;
        footprint.add(class, volume.size_gib as i64);
    }
    Ok(footprint)
}
