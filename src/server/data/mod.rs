//! Data access layer.
//!
//! This module contains everything that talks to state outside the process: the
//! campaign's ledger files, the community site's HTTP API, and Discord. The Discord and
//! community collaborators sit behind traits (`GuildGateway`, `DirectMessenger`,
//! `StatusResolver`) so services can be tested with in-memory fakes.

pub mod community;
pub mod discord;
pub mod ledger;
