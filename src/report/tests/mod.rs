//! Unit tests for the report module.
//!
//! Covers the reconstruction pass (session pairing, leniency rules,
//! outlier capping, trailing sessions) and effort totalling.
