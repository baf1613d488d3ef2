//! Reading of the raw activity log.
//!
//! The tracker appends one CSV row per focus sample: `timestamp,title,process_id` and optionally
//! `additional_info`. [EventSource] abstracts where those rows come from, [csv_file::CsvFileSource]
//! is the on-disk realization.

pub mod csv_file;

use std::{future::Future, ops::Deref};

use serde::{Deserialize, Serialize};

use crate::error::ViewError;

/// One row of the activity log exactly as the tracker wrote it.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct RawEvent {
    pub timestamp: String,
    pub title: String,
    pub process_id: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub additional_info: Option<String>,
}

impl RawEvent {
    pub fn new(timestamp: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            title: title.into(),
            process_id: String::new(),
            additional_info: None,
        }
    }

    pub fn with_process_id(self, process_id: impl Into<String>) -> Self {
        Self {
            process_id: process_id.into(),
            ..self
        }
    }

    pub fn with_additional_info(self, additional_info: impl Into<String>) -> Self {
        Self {
            additional_info: Some(additional_info.into()),
            ..self
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_empty()))
}

/// Interface for anything able to supply the whole activity log. Loading is the only suspending
/// step of a view request, everything after it works on resident data.
pub trait EventSource {
    fn load(&self) -> impl Future<Output = Result<Vec<RawEvent>, ViewError>> + Send;
}

impl<T: Deref> EventSource for T
where
    T::Target: EventSource,
{
    fn load(&self) -> impl Future<Output = Result<Vec<RawEvent>, ViewError>> + Send {
        self.deref().load()
    }
}
