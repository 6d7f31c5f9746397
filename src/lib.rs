//! Scene Compose Library
//!
//! Option composition and ordered async setup for 3D map scene hosts.
//!
//! - [`merge`] combines loose option objects the way jQuery's `extend` does,
//!   shallow or deep.
//! - [`queue`] runs async tasks strictly one after another, stopping at the
//!   first failure.
//! - [`options`], [`lighting`], [`follow`], [`host`] and [`scene`] build on
//!   both to turn scene plans into host calls.

pub mod cli;
pub mod config;
pub mod error;
pub mod follow;
pub mod format;
pub mod host;
pub mod lighting;
pub mod logging;
pub mod merge;
pub mod options;
pub mod queue;
pub mod scene;
pub mod value;
