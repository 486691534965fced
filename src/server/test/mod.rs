//! In-memory fakes for the Discord and community collaborators.
//!
//! Each fake records the calls made against it so tests can assert on ordering and on
//! the absence of side effects.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use serenity::async_trait;

use crate::server::{
    data::{
        community::StatusResolver,
        discord::{DirectMessenger, DmTarget, GuildGateway},
    },
    error::{delivery::DeliveryError, AppError},
    model::{campaign::RecipientId, member::GuildMember, role::RoleChange, tier::MembershipTier},
};

/// Status resolver answering from a fixed map; unknown IDs are not found.
#[derive(Default)]
pub struct FakeStatusResolver {
    tiers: HashMap<String, MembershipTier>,
    lookups: Mutex<Vec<String>>,
}

impl FakeStatusResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tier(mut self, discord_id: &str, tier: MembershipTier) -> Self {
        self.tiers.insert(discord_id.to_string(), tier);
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusResolver for FakeStatusResolver {
    async fn check_status(&self, discord_id: &str) -> MembershipTier {
        self.lookups.lock().unwrap().push(discord_id.to_string());
        self.tiers
            .get(discord_id)
            .copied()
            .unwrap_or(MembershipTier::NotFound)
    }
}

/// Guild gateway over a fixed member map that records role changes.
pub struct FakeGuildGateway {
    guild_available: bool,
    fail_role_changes: bool,
    members: HashMap<u64, GuildMember>,
    changes: Mutex<Vec<(u64, RoleChange)>>,
}

impl FakeGuildGateway {
    pub fn new() -> Self {
        Self {
            guild_available: true,
            fail_role_changes: false,
            members: HashMap::new(),
            changes: Mutex::new(Vec::new()),
        }
    }

    pub fn with_member(mut self, member: GuildMember) -> Self {
        self.members.insert(member.user_id, member);
        self
    }

    /// Simulates the bot not having received the guild from the gateway yet.
    pub fn without_guild(mut self) -> Self {
        self.guild_available = false;
        self
    }

    /// Makes every add and remove fail, as when the bot's role sits too low.
    pub fn failing_role_changes(mut self) -> Self {
        self.fail_role_changes = true;
        self
    }

    pub fn changes(&self) -> Vec<(u64, RoleChange)> {
        self.changes.lock().unwrap().clone()
    }

    fn record(&self, user_id: u64, change: RoleChange) -> Result<(), AppError> {
        if self.fail_role_changes {
            return Err(serenity::Error::Other("Missing Permissions").into());
        }
        self.changes.lock().unwrap().push((user_id, change));
        Ok(())
    }
}

#[async_trait]
impl GuildGateway for FakeGuildGateway {
    async fn fetch_member(&self, user_id: u64) -> Result<GuildMember, AppError> {
        if !self.guild_available {
            return Err(AppError::NotFound("Guild not found".to_string()));
        }
        self.members
            .get(&user_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Member not found in server".to_string()))
    }

    async fn add_role(&self, user_id: u64, role_id: u64) -> Result<(), AppError> {
        self.record(user_id, RoleChange::Add(role_id))
    }

    async fn remove_role(&self, user_id: u64, role_id: u64) -> Result<(), AppError> {
        self.record(user_id, RoleChange::Remove(role_id))
    }
}

/// Scripted behavior of the fake messenger for one recipient.
#[derive(Debug, Clone, Copy)]
pub enum FakeDelivery {
    Deliver,
    Disabled,
    Transient,
    Unresolvable,
    Panic,
}

/// Messenger that follows a per-recipient script and records every attempt.
///
/// Targets are keyed by their tag, which is the recipient ID for campaign sends and
/// the member tag for welcome and link DMs. Unscripted targets are delivered.
#[derive(Default)]
pub struct FakeMessenger {
    script: HashMap<String, FakeDelivery>,
    attempts: Mutex<Vec<String>>,
    delivered: Mutex<Vec<(String, String)>>,
}

impl FakeMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, behavior: FakeDelivery) -> Self {
        self.script.insert(key.to_string(), behavior);
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Keys of every send attempt, in order, including failed ones.
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }

    /// `(key, content)` of every accepted message, in order.
    pub fn delivered(&self) -> Vec<(String, String)> {
        self.delivered.lock().unwrap().clone()
    }

    fn behavior(&self, key: &str) -> FakeDelivery {
        self.script.get(key).copied().unwrap_or(FakeDelivery::Deliver)
    }
}

#[async_trait]
impl DirectMessenger for FakeMessenger {
    async fn resolve(&self, recipient: &RecipientId) -> Result<DmTarget, DeliveryError> {
        if let FakeDelivery::Unresolvable = self.behavior(recipient.as_str()) {
            self.attempts.lock().unwrap().push(recipient.to_string());
            return Err(DeliveryError::Unresolvable {
                recipient: recipient.to_string(),
                reason: "Unknown User".to_string(),
            });
        }

        Ok(DmTarget {
            user_id: recipient.as_str().parse().unwrap_or_default(),
            tag: recipient.to_string(),
        })
    }

    async fn send(&self, target: &DmTarget, content: &str) -> Result<(), DeliveryError> {
        self.attempts.lock().unwrap().push(target.tag.clone());

        match self.behavior(&target.tag) {
            FakeDelivery::Deliver => {
                self.delivered
                    .lock()
                    .unwrap()
                    .push((target.tag.clone(), content.to_string()));
                Ok(())
            }
            FakeDelivery::Disabled => Err(DeliveryError::MessagingDisabled),
            FakeDelivery::Transient | FakeDelivery::Unresolvable => {
                Err(DeliveryError::Transient("connection reset".to_string()))
            }
            FakeDelivery::Panic => panic!("simulated transport panic for {}", target.tag),
        }
    }
}

/// Configuration with every required variable set and tier roles 111 (paid) and
/// 222 (free).
pub fn test_config() -> crate::server::config::Config {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("DISCORD_BOT_TOKEN", "token"),
        ("DISCORD_GUILD_ID", "42"),
        ("API_BASE_URL", "http://127.0.0.1:1"),
        ("DISCORD_API_KEY", "key"),
        ("PAID_ROLE_ID", "111"),
        ("FREE_ROLE_ID", "222"),
    ]);

    crate::server::config::Config::from_lookup(|name| vars.get(name).map(|v| v.to_string()))
        .unwrap()
}
