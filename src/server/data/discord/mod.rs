pub mod direct_message;
pub mod guild;

pub use direct_message::{DirectMessenger, DmTarget, SerenityMessenger};
pub use guild::{GuildGateway, SerenityGuildGateway};
