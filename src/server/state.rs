//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the webhook server. The state is initialized once during
//! startup and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Application configuration for tier roles and the community name
//! - The community site status resolver
//! - The guild gateway and direct messenger over the bot's Discord HTTP client
//! - The server start time for the health endpoint's uptime

use std::{sync::Arc, time::Instant};

use crate::server::{
    config::Config,
    data::{
        community::StatusResolver,
        discord::{DirectMessenger, GuildGateway},
    },
};

/// Application state containing shared resources and dependencies.
///
/// All fields are reference counted or `Copy`, so cloning per request is cheap.
/// Collaborators are held as trait objects so tests can substitute in-memory fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    /// Resolves membership tiers from the community site.
    pub status: Arc<dyn StatusResolver>,

    /// Member lookup and role mutation in the managed guild.
    ///
    /// Shares the Discord bot's HTTP client and cache.
    pub guild: Arc<dyn GuildGateway>,

    /// Sends the link confirmation DM.
    pub messenger: Arc<dyn DirectMessenger>,

    /// When the server started, reported as uptime by the health endpoint.
    pub started_at: Instant,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `config` - Application configuration
    /// - `status` - Membership tier resolver
    /// - `guild` - Guild gateway for the managed guild
    /// - `messenger` - Direct message transport
    pub fn new(
        config: Arc<Config>,
        status: Arc<dyn StatusResolver>,
        guild: Arc<dyn GuildGateway>,
        messenger: Arc<dyn DirectMessenger>,
    ) -> Self {
        Self {
            config,
            status,
            guild,
            messenger,
            started_at: Instant::now(),
        }
    }
}
