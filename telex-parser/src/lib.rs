//! Telex parsing engine.
//!
//! Two independent parsers share one set of domain types:
//!
//! - [`telegram`] reads AFTN flight-plan telegrams (ARR, DEP, FPL, CNL, DLA,
//!   CHG, CPL and ALN) into typed records, using the grammar tables in
//!   [`patterns`].
//! - [`schedule`] reads airline schedule telexes line by line, using
//!   per-airline positional templates.
//!
//! Both take their tables from [`config`] when the built-in sets are not
//! wanted.

pub mod config;
pub mod domain;
pub mod patterns;
pub mod schedule;
pub mod telegram;
