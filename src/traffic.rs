//! Outbound-traffic estimation from CloudWatch metrics
//!
//! NetworkOut reports the bytes sent by an instance on all network
//! interfaces. Summing the Sum statistic over the trailing 30 days gives the
//! total egress volume, which the fixed per-GB price turns into a cost.
//!
//! An instance with no datapoints in the window (stopped, or too new) is not
//! an error: it contributes zero traffic and zero cost. Non-finite values are
//! clamped to zero as well so nothing undefined reaches the report totals.

use aws_sdk_cloudwatch::primitives::DateTime;
use aws_sdk_cloudwatch::types::{Datapoint, Dimension, Statistic};
use aws_sdk_cloudwatch::Client as CloudWatchClient;
use chrono::{Duration, Utc};

use crate::error::{CostctlError, Result};

/// Metric window length in days
const METRIC_WINDOW_DAYS: i64 = 30;
/// Sampling period for GetMetricStatistics, in seconds
const METRIC_PERIOD_SECS: i32 = 3600;

const BYTES_PER_GIB: f64 = (1u64 << 30) as f64;

/// Traffic volume and cost for one instance over the metric window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficUsage {
    pub gigabytes: f64,
    pub cost: f64,
}

impl TrafficUsage {
    pub const ZERO: TrafficUsage = TrafficUsage {
        gigabytes: 0.0,
        cost: 0.0,
    };
}

/// Queries 30-day NetworkOut sums for single instances.
pub struct TrafficEstimator {
    client: CloudWatchClient,
    price_per_gb: f64,
}

impl TrafficEstimator {
    pub fn new(client: CloudWatchClient, price_per_gb: f64) -> Self {
        Self {
            client,
            price_per_gb,
        }
    }

    /// Total outbound traffic of an instance over the trailing 30 days, in
    /// gigabytes.
    pub async fn traffic_gb(&self, instance_id: &str) -> Result<f64> {
        let end = Utc::now();
        let start = end - Duration::days(METRIC_WINDOW_DAYS);

        let dimension = Dimension::builder()
            .name("InstanceId")
            .value(instance_id)
            .build()
            .map_err(|e| CostctlError::Aws(format!("Invalid metric dimension: {}", e)))?;

        let response = self
            .client
            .get_metric_statistics()
            .namespace("AWS/EC2")
            .metric_name("NetworkOut")
            .start_time(DateTime::from_secs(start.timestamp()))
            .end_time(DateTime::from_secs(end.timestamp()))
            .period(METRIC_PERIOD_SECS)
            .statistics(Statistic::Sum)
            .dimensions(dimension)
            .send()
            .await
            .map_err(|e| {
                CostctlError::Aws(format!(
                    "Failed to fetch NetworkOut metrics for {}: {}",
                    instance_id, e
                ))
            })?;

        Ok(sum_datapoints_gb(response.datapoints()))
    }

    /// Traffic volume and cost for the window. Missing or undefined metric
    /// data degrades to [`TrafficUsage::ZERO`] rather than failing the run.
    pub async fn usage_for_30_days(&self, instance_id: &str) -> Result<TrafficUsage> {
        let gigabytes = self.traffic_gb(instance_id).await?;
        Ok(usage_from_gb(gigabytes, self.price_per_gb))
    }
}

/// Sum the Sum statistic across datapoints and convert bytes to gigabytes.
fn sum_datapoints_gb(datapoints: &[Datapoint]) -> f64 {
    let total_bytes: f64 = datapoints.iter().filter_map(|d| d.sum()).sum();
    total_bytes / BYTES_PER_GIB
}

/// Price a traffic volume, clamping non-finite input to zero.
fn usage_from_gb(gigabytes: f64, price_per_gb: f64) -> TrafficUsage {
    if !gigabytes.is_finite() {
        return TrafficUsage::ZERO;
    }
    TrafficUsage {
        gigabytes,
        cost: gigabytes * price_per_gb,
    }
}
