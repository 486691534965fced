//! Data transfer objects for the HTTP control surface.
//!
//! These types define the JSON bodies accepted and returned by the webhook server.
//! Domain types from `server::model` are converted into these at the controller
//! boundary.

pub mod api;
pub mod webhook;
