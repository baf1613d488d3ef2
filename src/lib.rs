//! Turns a window focus log into a segmented daily timeline and a ranked activity summary.
//! The tracker producing the log and the presentation consuming the views live elsewhere, this
//! crate only owns the transformation in between plus a small cli over it.
//!

pub mod activity;
pub mod cli;
pub mod config;
pub mod error;
pub mod source;
pub mod utils;
pub mod view;
