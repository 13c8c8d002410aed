//! Error types for costctl
//!
//! This module defines the error handling strategy for costctl. There are two
//! error types: `CostctlError` (main error enum) and `ConfigError`
//! (configuration-specific).
//!
//! ## Error Handling Philosophy
//!
//! Library code uses `crate::error::Result<T>` which returns `CostctlError`.
//! CLI code uses `anyhow::Result<T>` for top-level error handling. The
//! conversion happens at the CLI boundary using `anyhow::Error::from` to
//! preserve error chains.
//!
//! Every variant except `Config`/`Io`/`Json` corresponds to a condition that
//! aborts the run before any report line is printed: a failed or truncated
//! inventory query, a device mapping that references a volume the inventory
//! does not contain, a volume class the cost model has no price for, or an
//! instance type missing from the price table. None of these are retried;
//! callers propagate them with `?` up to `main`, the only place allowed to
//! terminate the process.
//!
//! Missing traffic datapoints and untagged instances are deliberately NOT
//! errors. They degrade to zero traffic and a warned-then-dropped bucket
//! respectively (see `traffic` and `aggregate`).

use thiserror::Error;

/// Main error type for costctl
#[derive(Error, Debug)]
pub enum CostctlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("AWS SDK error: {0}")]
    Aws(String),

    #[error("Empty result querying {0} inventory")]
    EmptyInventory(&'static str),

    #[error("The {0} inventory did not fit in one response page and paging is not implemented")]
    InventoryTruncated(&'static str),

    #[error("Volume {0} not found in the volume inventory")]
    VolumeNotFound(String),

    #[error("Volume {volume_id} has unsupported volume type {volume_type}")]
    UnsupportedVolumeType {
        volume_id: String,
        volume_type: String,
    },

    #[error("No price found for instance type {0}")]
    UnknownInstanceType(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CostctlError>;
