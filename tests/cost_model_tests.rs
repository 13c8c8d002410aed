//! Integration tests for the cost model
//!
//! Verifies the fixed price table and the pure cost functions exposed
//! through the instance record.

use costctl::pricing::{self, PRICED_INSTANCE_TYPES};
use costctl::storage::StorageFootprint;
use costctl::Ec2Instance;

#[test]
fn test_30_day_cost_is_720x_hourly_for_every_entry() {
    for instance_type in PRICED_INSTANCE_TYPES {
        let hourly = pricing::hourly_cost(instance_type).unwrap();
        let monthly = pricing::cost_for_30_days(instance_type).unwrap();
        assert_eq!(monthly, hourly * 720.0, "mismatch for {}", instance_type);
    }
}

#[test]
fn test_unlisted_instance_type_is_fatal() {
    assert!(pricing::hourly_cost("p5.48xlarge").is_err());
    assert!(pricing::cost_for_30_days("p5.48xlarge").is_err());
}

#[test]
fn test_instance_record_cost_methods() {
    let instance = Ec2Instance {
        name: "val1".to_string(),
        id: "i-1".to_string(),
        instance_type: "t3a.medium".to_string(),
        core_count: 1,
        hyper_threaded: true,
        storage: StorageFootprint {
            gp2_gib: 50,
            gp3_gib: 0,
        },
    };

    assert_eq!(instance.cost_for_hour().unwrap(), 0.0418);
    assert_eq!(instance.cost_for_30_days().unwrap(), 0.0418 * 720.0);
    assert_eq!(
        instance.ebs_cost_for_month(),
        50.0 * pricing::GP2_PRICE_PER_GB_MONTH
    );
}

#[test]
fn test_zero_storage_costs_nothing() {
    let instance = Ec2Instance {
        name: "val1".to_string(),
        id: "i-1".to_string(),
        instance_type: "t3a.medium".to_string(),
        core_count: 1,
        hyper_threaded: true,
        storage: StorageFootprint::default(),
    };
    assert_eq!(instance.ebs_cost_for_month(), 0.0);
}
