//! The segmentation and aggregation engine.
//!
//! Stages, in the order data flows through them:
//!  - [normalize] turns raw log rows into [entities::ActivityEvent]s.
//!  - [segment] merges events of the whole log into [entities::Interval]s.
//!  - [filter] selects the intervals of one day.
//!  - [summary] and [timeline] derive the two views from the selected intervals.

pub mod entities;
pub mod filter;
pub mod normalize;
pub mod segment;
pub mod summary;
pub mod timeline;
