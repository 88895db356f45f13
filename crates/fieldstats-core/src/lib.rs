//! # fieldstats core
//!
//! Pure response-shaping logic for fieldstats: percentage arithmetic,
//! decoding of OpenSearch aggregation buckets, and assembly of the
//! compact percentage-based API response.
//!
//! This crate contains no tokio, HTTP, or other I/O dependencies. The
//! calling application executes the search and hands the raw
//! `aggregations` document to [`assemble::assemble`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`percent`] | Truncating integer percentages with a zero-total guard |
//! | [`presence`] | `present_<field>` bucket pairs → present/absent summary |
//! | [`distribution`] | `distribution_<field>` terms buckets → value percentages |
//! | [`assemble`] | Key classification, dispatch, and all-or-nothing assembly |
//! | [`models`] | Response types serialized to the HTTP caller |
//! | [`error`] | Decode errors carrying the offending aggregation key |

pub mod assemble;
pub mod distribution;
pub mod error;
pub mod models;
pub mod percent;
pub mod presence;

/// Name prefix of presence aggregations (`present_<field>`).
pub const PRESENT_PREFIX: &str = "present_";

/// Name prefix of value-distribution aggregations (`distribution_<field>`).
pub const DISTRIBUTION_PREFIX: &str = "distribution_";
