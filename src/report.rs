//! Report assembly and rendering
//!
//! Builds the per-group cost rollup from a grouping, then renders it as CSV
//! (the historical report format), a terminal table, or JSON. Nothing is
//! printed until the whole report has been assembled, so a fatal condition
//! never leaves a half-written report behind.

use comfy_table::{Cell, Table};
use console::style;
use serde::Serialize;

use crate::aggregate::GroupedInstances;
use crate::error::Result;
use crate::traffic::{TrafficEstimator, TrafficUsage};

/// Line items billed outside the instance inventory. Their amounts are not
/// computed here and are reported as unknown.
const MANUAL_LINE_ITEMS: &[(&str, &str)] = &[
    ("S3", "Backup/Config"),
    ("VPC_cross-traffic", "VPN"),
    ("Route_53", "Resolver"),
    ("RDS", "Zabbix"),
    ("ELB", "Nautilus"),
    ("Tax", ""),
    ("Total", ""),
];

/// Cost rollup for one group of instances.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupCost {
    pub group: String,
    pub instance_count: usize,
    pub instance_types: Vec<String>,
    pub instance_cost: f64,
    pub storage_cost: f64,
    pub traffic_cost: f64,
    pub traffic_gb: f64,
}

impl GroupCost {
    pub fn total_cost(&self) -> f64 {
        self.instance_cost + self.storage_cost + self.traffic_cost
    }
}

/// Sums across all groups.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CostTotals {
    pub instance_cost: f64,
    pub storage_cost: f64,
    pub traffic_cost: f64,
    pub traffic_gb: f64,
}

impl CostTotals {
    fn add(&mut self, group: &GroupCost) {
        self.instance_cost += group.instance_cost;
        self.storage_cost += group.storage_cost;
        self.traffic_cost += group.traffic_cost;
        self.traffic_gb += group.traffic_gb;
    }

    pub fn total_cost(&self) -> f64 {
        self.instance_cost + self.storage_cost + self.traffic_cost
    }
}

/// The assembled report: one entry per group, in group iteration order.
#[derive(Debug, Clone, Serialize)]
pub struct CostReport {
    pub groups: Vec<GroupCost>,
    pub totals: CostTotals,
}

/// Roll the grouping up into per-group costs.
///
/// Traffic is queried per instance when an estimator is given; with `None`
/// (skip-traffic mode) the traffic columns stay zero. Instances are visited
/// in grouping order, so output is deterministic.
pub async fn build_report(
    groups: &GroupedInstances,
    estimator: Option<&TrafficEstimator>,
) -> Result<CostReport> {
    let mut report_groups = Vec::with_capacity(groups.len());
    let mut totals = CostTotals::default();

    for (group, instances) in groups {
        let mut cost = GroupCost {
            group: group.clone(),
            instance_count: instances.len(),
            ..Default::default()
        };
        for instance in instances {
            cost.instance_types.push(instance.instance_type.clone());
            cost.instance_cost += instance.cost_for_30_days()?;
            cost.storage_cost += instance.ebs_cost_for_month();

            let usage = match estimator {
                Some(estimator) => estimator.usage_for_30_days(&instance.id).await?,
                None => TrafficUsage::ZERO,
            };
            cost.traffic_cost += usage.cost;
            cost.traffic_gb += usage.gigabytes;
        }
        totals.add(&cost);
        report_groups.push(cost);
    }

    Ok(CostReport {
        groups: report_groups,
        totals,
    })
}

/// Render the report in the requested format and print it to stdout.
pub fn emit(report: &CostReport, format: &str) -> Result<()> {
    match format {
        "table" => {
            println!("{}", render_table(report));
            println!(
                "{} {}",
                style("Unpriced items:").dim(),
                MANUAL_LINE_ITEMS
                    .iter()
                    .map(|(name, desc)| {
                        if desc.is_empty() {
                            name.to_string()
                        } else {
                            format!("{} ({})", name, desc)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        "json" => println!("{}", serde_json::to_string_pretty(report)?),
        // csv is the default and the historical report format
        _ => print!("{}", render_csv(report)),
    }
    Ok(())
}

/// The historical CSV report: header, one line per group, a totals line, and
/// the manually-priced items with unknown amounts.
pub fn render_csv(report: &CostReport) -> String {
    let mut out = String::new();
    out.push_str("Group,Instance_Num,Instance_type,Instance_cost,EBS_Cost,Traffic_Cost,TotalCost,Traffic_GB\n");
    for group in &report.groups {
        out.push_str(&format!(
            "{},{},{},{:.2},{:.2},{:.2},{:.2},{:.2}\n",
            group.group,
            group.instance_count,
            group.instance_types.join(";"),
            group.instance_cost,
            group.storage_cost,
            group.traffic_cost,
            group.total_cost(),
            group.traffic_gb,
        ));
    }
    out.push_str(&format!(
        "Nodes total,,,{:.2},{:.2},{:.2},{:.2},{:.2}\n",
        report.totals.instance_cost,
        report.totals.storage_cost,
        report.totals.traffic_cost,
        report.totals.total_cost(),
        report.totals.traffic_gb,
    ));
    for (name, desc) in MANUAL_LINE_ITEMS {
        out.push_str(&format!("{},{},,,,,?\n", name, desc));
    }
    out
}

fn render_table(report: &CostReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Group",
        "Instances",
        "Types",
        "Instance $",
        "EBS $",
        "Traffic $",
        "Total $",
        "Traffic GB",
    ]);

    for group in &report.groups {
        table.add_row(vec![
            Cell::new(&group.group),
            Cell::new(group.instance_count),
            Cell::new(group.instance_types.join(";")),
            Cell::new(format!("{:.2}", group.instance_cost)),
            Cell::new(format!("{:.2}", group.storage_cost)),
            Cell::new(format!("{:.2}", group.traffic_cost)),
            Cell::new(format!("{:.2}", group.total_cost())),
            Cell::new(format!("{:.2}", group.traffic_gb)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Nodes total").fg(comfy_table::Color::Yellow),
        Cell::new(""),
        Cell::new(""),
        Cell::new(format!("{:.2}", report.totals.instance_cost)),
        Cell::new(format!("{:.2}", report.totals.storage_cost)),
        Cell::new(format!("{:.2}", report.totals.traffic_cost)),
        Cell::new(format!("{:.2}", report.totals.total_cost())).fg(comfy_table::Color::Yellow),
        Cell::new(format!("{:.2}", report.totals.traffic_gb)),
    ]);
    table
}
