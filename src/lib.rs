//! Attendance Engine for care facilities
//!
//! This crate aggregates monthly attendance (worked and overtime hours, work
//! days, absences, late arrivals) and decides whether a leave request may be
//! filed as a regular or exchange request under a facility's monthly
//! submission deadline.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
