//! Adjustment configuration.

use crate::{
    columns::{DATE_COLUMN, FROM_COLUMN, THRU_COLUMN},
    dates::DateMode,
};
use padron_traits::{PadronError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Key used to detect duplicate membership intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntervalKey {
    /// One interval per asset.
    #[default]
    Asset,
    /// One interval per `(asset, from, thru)`, allowing re-entry.
    AssetSpan,
}

impl IntervalKey {
    /// The name accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::AssetSpan => "asset-span",
        }
    }
}

impl fmt::Display for IntervalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntervalKey {
    type Err = PadronError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asset" => Ok(Self::Asset),
            "asset-span" => Ok(Self::AssetSpan),
            _ => Err(PadronError::InvalidConfig(format!(
                "{s} is not recognised. Valid interval keys are \"asset\", \"asset-span\""
            ))),
        }
    }
}

/// Configuration for [`ConstituteAdjustment`](crate::ConstituteAdjustment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentConfig {
    /// Column naming the asset in both interval and data tables
    pub id_column: String,
    /// Representation of finished date columns
    pub date_mode: DateMode,
    /// Key for duplicate interval detection
    pub interval_key: IntervalKey,
}

impl Default for AdjustmentConfig {
    fn default() -> Self {
        Self {
            id_column: "symbol".to_string(),
            date_mode: DateMode::Timestamp,
            interval_key: IntervalKey::Asset,
        }
    }
}

impl AdjustmentConfig {
    /// Create a configuration with the default interval key.
    pub fn new(id_column: impl Into<String>, date_mode: DateMode) -> Self {
        Self {
            id_column: id_column.into(),
            date_mode,
            ..Self::default()
        }
    }

    /// Replace the interval key.
    #[must_use]
    pub fn with_interval_key(mut self, interval_key: IntervalKey) -> Self {
        self.interval_key = interval_key;
        self
    }

    /// Checks that the id column is usable as a join key.
    ///
    /// # Errors
    ///
    /// [`PadronError::InvalidConfig`] if the id column is empty or collides
    /// with `date`, `from` or `thru`.
    pub fn validate(&self) -> Result<()> {
        if self.id_column.trim().is_empty() {
            return Err(PadronError::InvalidConfig(
                "id_column must not be empty".to_string(),
            ));
        }
        if [DATE_COLUMN, FROM_COLUMN, THRU_COLUMN].contains(&self.id_column.as_str()) {
            return Err(PadronError::InvalidConfig(format!(
                "id_column \"{}\" collides with a reserved column",
                self.id_column
            )));
        }
        Ok(())
    }

    /// Columns keying the raw interval table under the configured key.
    pub fn interval_subset(&self) -> Vec<&str> {
        match self.interval_key {
            IntervalKey::Asset => vec![self.id_column.as_str()],
            IntervalKey::AssetSpan => vec![self.id_column.as_str(), FROM_COLUMN, THRU_COLUMN],
        }
    }
}
