//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! bot and controller layers and the data layer. Services are responsible for:
//!
//! - **Campaign**: Planning, guarding, and dispatching the rate-limited DM campaign
//! - **Role Sync**: Reconciling a member's tier roles with their membership tier
//! - **Membership**: Join, verify, and link-notification flows built on role sync
//! - **Link**: Turning linking-code responses into user-facing replies

pub mod campaign;
pub mod link;
pub mod membership;
pub mod role_sync;
