//! Onboarding - versioned form schemas and a reviewable submission workflow
//!
//! Administrators publish immutable, numbered schema versions per form type.
//! Customers submit payloads that are validated against the latest schema
//! and pinned to that version. Staff move submissions through review, and
//! every change lands in an append-only audit trail.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
