//! Server-side bot, webhook API, and campaign engine.
//!
//! This module contains the complete backend: the Discord bot that keeps membership
//! roles in step with the community site, the HTTP control surface the site calls after
//! an account is linked, and the rate-limited direct message campaign. The HTTP surface
//! uses Axum, the bot uses Serenity, and the community site is reached with reqwest.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers and DTO conversion
//! - **Bot Layer** (`bot/`) - Gateway event handlers and slash commands
//! - **Service Layer** (`service/`) - Campaign planning and dispatch, role reconciliation,
//!   membership flows
//! - **Data Layer** (`data/`) - Recipient ledger files, community API client, and the
//!   Discord adapters behind the `GuildGateway` and `DirectMessenger` seams
//! - **Model Layer** (`model/`) - Domain models
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared state for HTTP handlers
//! - **Startup** (`startup`) - Logging, HTTP client, and ledger initialization
//! - **Router** (`router`) - Axum route configuration

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;

#[cfg(test)]
pub mod test;
