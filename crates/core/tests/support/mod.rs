//! Shared test helpers for `tallyline-core` integration tests.
//!
//! These helpers provide reusable fixtures and lightweight mocks so that the
//! reconciler and report tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod records;
pub mod repositories;
