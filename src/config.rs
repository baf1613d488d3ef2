//! Recognised view options. [ConfigFile] is the loose shape read from JSON and command line flags,
//! [ViewConfig] is the validated form the pipeline runs with. Validation happens once, here, so
//! out of range values never reach processing.

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    activity::{
        filter::SelectionMode,
        segment::{DEFAULT_MERGE_THRESHOLD, SegmentationPolicy},
        summary::DEFAULT_TOP_ACTIVITY_LIMIT,
    },
    error::ViewError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationKind {
    Merge,
    PerEvent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(alias = "mergeThresholdMs")]
    pub merge_threshold_ms: Option<i64>,
    #[serde(alias = "topActivityLimit")]
    pub top_activity_limit: Option<i64>,
    #[serde(alias = "selectionMode")]
    pub selection_mode: Option<SelectionMode>,
    pub segmentation: Option<SegmentationKind>,
    #[serde(alias = "minDisplayMinutes")]
    pub min_display_minutes: Option<f64>,
}

impl ConfigFile {
    pub async fn load(path: &Path) -> Result<Self, ViewError> {
        debug!("Loading configuration {path:?}");
        let data = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ViewError::ConfigRead {
                path: path.to_owned(),
                source,
            })?;
        serde_json::from_str(&data).map_err(|source| ViewError::ConfigParse {
            path: path.to_owned(),
            source,
        })
    }

    /// Values set in `overrides` win.
    pub fn merge(self, overrides: ConfigFile) -> ConfigFile {
        ConfigFile {
            merge_threshold_ms: overrides.merge_threshold_ms.or(self.merge_threshold_ms),
            top_activity_limit: overrides.top_activity_limit.or(self.top_activity_limit),
            selection_mode: overrides.selection_mode.or(self.selection_mode),
            segmentation: overrides.segmentation.or(self.segmentation),
            min_display_minutes: overrides.min_display_minutes.or(self.min_display_minutes),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub policy: SegmentationPolicy,
    pub top_activity_limit: usize,
    pub selection_mode: SelectionMode,
    pub min_display_minutes: Option<f64>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            policy: SegmentationPolicy::default(),
            top_activity_limit: DEFAULT_TOP_ACTIVITY_LIMIT,
            selection_mode: SelectionMode::default(),
            min_display_minutes: None,
        }
    }
}

impl TryFrom<ConfigFile> for ViewConfig {
    type Error = ViewError;

    fn try_from(value: ConfigFile) -> Result<Self, Self::Error> {
        let threshold = match value.merge_threshold_ms {
            Some(ms) if ms < 0 => {
                return Err(ViewError::InvalidConfig(format!(
                    "merge threshold can't be negative, got {ms}ms"
                )))
            }
            Some(ms) => Duration::milliseconds(ms),
            None => DEFAULT_MERGE_THRESHOLD,
        };

        let policy = match value.segmentation.unwrap_or(SegmentationKind::Merge) {
            SegmentationKind::Merge => SegmentationPolicy::Merge { threshold },
            SegmentationKind::PerEvent => SegmentationPolicy::PerEvent,
        };

        let top_activity_limit = match value.top_activity_limit {
            Some(limit) if limit < 1 => {
                return Err(ViewError::InvalidConfig(format!(
                    "top activity limit must be at least 1, got {limit}"
                )))
            }
            Some(limit) => usize::try_from(limit)
                .map_err(|e| ViewError::InvalidConfig(format!("top activity limit {limit}: {e}")))?,
            None => DEFAULT_TOP_ACTIVITY_LIMIT,
        };

        if let Some(min) = value.min_display_minutes {
            if !min.is_finite() || min < 0. {
                return Err(ViewError::InvalidConfig(format!(
                    "minimum display duration must be a non-negative number, got {min}"
                )));
            }
        }

        Ok(Self {
            policy,
            top_activity_limit,
            selection_mode: value.selection_mode.unwrap_or_default(),
            min_display_minutes: value.min_display_minutes,
        })
    }
}
