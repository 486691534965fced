//! Test factories for creating Serenity API objects.
//!
//! This module provides factory functions for creating mock Serenity structs
//! (User, Member) for testing purposes. These factories create valid Serenity
//! objects by deserializing JSON, simulating what Discord's gateway would deliver
//! with a `GUILD_MEMBER_ADD` event or a command interaction.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_member, create_test_user};
//!
//! let user = create_test_user(123456789, "kestrel");
//! let member = create_test_member(123456789, "kestrel", 555, &[111, 222]);
//! ```
//!
//! # Available Factories
//!
//! - `user::create_test_user` - Create Serenity User objects
//! - `member::create_test_member` - Create Serenity Member objects

pub mod member;
pub mod user;

pub use member::create_test_member;
pub use user::create_test_user;
