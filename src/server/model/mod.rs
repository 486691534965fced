//! Server-side domain models.
//!
//! This module contains domain models used throughout the service layer. Serenity and
//! community API types are converted into these at the data and bot boundaries, so the
//! campaign and role reconciliation logic never depends on wire formats.

pub mod campaign;
pub mod link;
pub mod member;
pub mod role;
pub mod tier;
