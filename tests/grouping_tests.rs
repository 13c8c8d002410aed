//! Integration tests for inventory grouping
//!
//! Builds snapshots by hand and drives the aggregator the same way the
//! report command does, without touching AWS.

use costctl::inventory::{InstanceRecord, InventorySnapshot, ReservationRecord, VolumeRecord};
use costctl::{aggregate, pricing, report};

fn named_instance(id: &str, instance_type: &str, name: &str) -> InstanceRecord {
    InstanceRecord {
        id: id.to_string(),
        instance_type: instance_type.to_string(),
        tags: vec![("Name".to_string(), name.to_string())],
        core_count: 1,
        threads_per_core: 2,
        volume_ids: vec![],
    }
}

fn untagged_instance(id: &str, instance_type: &str) -> InstanceRecord {
    InstanceRecord {
        id: id.to_string(),
        instance_type: instance_type.to_string(),
        tags: vec![],
        core_count: 1,
        threads_per_core: 2,
        volume_ids: vec![],
    }
}

#[tokio::test]
async fn test_two_groups_with_summed_instance_costs() {
    let snapshot = InventorySnapshot {
        reservations: vec![ReservationRecord {
            instances: vec![
                named_instance("i-1", "t3a.medium", "val1"),
                named_instance("i-2", "t3a.medium", "val2"),
                named_instance("i-3", "t3a.small", "other"),
            ],
        }],
        volumes: vec![],
    };

    let groups = aggregate::group_instances(&snapshot).unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups["val"].len(), 2);
    assert_eq!(groups["other"].len(), 1);

    let cost_report = report::build_report(&groups, None).await.unwrap();
    let val = cost_report.groups.iter().find(|g| g.group == "val").unwrap();
    let other = cost_report
        .groups
        .iter()
        .find(|g| g.group == "other")
        .unwrap();

    assert_eq!(
        val.instance_cost,
        2.0 * pricing::cost_for_30_days("t3a.medium").unwrap()
    );
    assert_eq!(
        other.instance_cost,
        pricing::cost_for_30_days("t3a.small").unwrap()
    );
    assert_eq!(val.storage_cost, 0.0);
    assert_eq!(val.traffic_gb, 0.0);
    assert_eq!(val.traffic_cost, 0.0);
}

#[test]
fn test_untagged_instance_excluded_from_grouping() {
    let snapshot = InventorySnapshot {
        reservations: vec![ReservationRecord {
            instances: vec![
                named_instance("i-1", "t3a.medium", "val1"),
                untagged_instance("i-2", "t3a.medium"),
            ],
        }],
        volumes: vec![],
    };

    let groups = aggregate::group_instances(&snapshot).unwrap();
    assert_eq!(groups.len(), 1);
    let ids: Vec<&str> = groups.values().flatten().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["i-1"]);
}

#[test]
fn test_device_mapping_with_unknown_volume_is_fatal() {
    let mut record = named_instance("i-1", "t3a.medium", "db1");
    record.volume_ids = vec!["vol-does-not-exist".to_string()];
    let snapshot = InventorySnapshot {
        reservations: vec![ReservationRecord {
            instances: vec![record],
        }],
        volumes: vec![VolumeRecord {
            id: "vol-other".to_string(),
            volume_type: "gp2".to_string(),
            size_gib: 8,
        }],
    };

    let err = aggregate::group_instances(&snapshot).unwrap_err();
    assert!(err.to_string().contains("vol-does-not-exist"));
}

#[test]
fn test_footprint_matches_sum_of_resolved_volumes() {
    let mut record = named_instance("i-1", "t3a.medium", "db1");
    record.volume_ids = vec![
        "vol-a".to_string(),
        "vol-b".to_string(),
        "vol-c".to_string(),
    ];
    let snapshot = InventorySnapshot {
        reservations: vec![ReservationRecord {
            instances: vec![record],
        }],
        volumes: vec![
            VolumeRecord {
                id: "vol-a".to_string(),
                volume_type: "gp2".to_string(),
                size_gib: 8,
            },
            VolumeRecord {
                id: "vol-b".to_string(),
                volume_type: "gp3".to_string(),
                size_gib: 120,
            },
            VolumeRecord {
                id: "vol-c".to_string(),
                volume_type: "gp3".to_string(),
                size_gib: 80,
            },
        ],
    };

    let groups = aggregate::group_instances(&snapshot).unwrap();
    let db = &groups["db"][0];
    assert_eq!(db.storage.gp2_gib, 8);
    assert_eq!(db.storage.gp3_gib, 200);
    assert_eq!(db.storage.total_gib(), 8 + 120 + 80);
}

#[tokio::test]
async fn test_csv_report_for_known_grouping() {
    let snapshot = InventorySnapshot {
        reservations: vec![ReservationRecord {
            instances: vec![
                named_instance("i-1", "t3a.medium", "val1"),
                named_instance("i-2", "t3a.medium", "val2"),
            ],
        }],
        volumes: vec![],
    };

    let groups = aggregate::group_instances(&snapshot).unwrap();
    let cost_report = report::build_report(&groups, None).await.unwrap();
    let csv = report::render_csv(&cost_report);

    let lines: Vec<&str> = csv.lines().collect();
    assert!(lines[0].starts_with("Group,Instance_Num,Instance_type"));
    assert_eq!(lines[1], "val,2,t3a.medium;t3a.medium,60.19,0.00,0.00,60.19,0.00");
    assert_eq!(lines[2], "Nodes total,,,60.19,0.00,0.00,60.19,0.00");
}
