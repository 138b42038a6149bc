//! Content feed engine for a civic issue reporting front end.
//!
//! - [`storage`]: post and category stores (the only owners of entity data)
//! - [`feed`]: render-ready feed assembly with category filtering
//! - [`modal`]: overlay tracking and the page blocking flag
//! - [`state`]: the per-session container and its thread-safe handle
//!
//! Everything is in memory; nothing survives the process.
pub mod config;
pub mod feed;
pub mod modal;
pub mod render;
pub mod script;
pub mod seed;
pub mod state;
pub mod storage;
pub mod util;
pub mod validate;
