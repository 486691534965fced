//! Reconciliation of a member's tier roles with their membership tier.

use crate::server::{
    data::discord::GuildGateway,
    model::{member::GuildMember, role::RoleChange, tier::{MembershipTier, TierRoles}},
};

/// Computes the role changes that bring `member` in line with `tier`.
///
/// The role of the other tier is removed before the tier's own role is added. Roles
/// that are unconfigured, already held, or already absent produce no change, and an
/// unlinked member is left as is.
pub fn plan_role_changes(
    member: &GuildMember,
    tier: MembershipTier,
    roles: &TierRoles,
) -> Vec<RoleChange> {
    let (keep, drop) = match tier {
        MembershipTier::Paid => (roles.paid, roles.free),
        MembershipTier::Free => (roles.free, roles.paid),
        MembershipTier::NotFound => return Vec::new(),
    };

    let mut changes = Vec::with_capacity(2);

    if let Some(role_id) = drop.filter(|role_id| member.has_role(*role_id)) {
        changes.push(RoleChange::Remove(role_id));
    }
    if let Some(role_id) = keep.filter(|role_id| !member.has_role(*role_id)) {
        changes.push(RoleChange::Add(role_id));
    }

    changes
}

pub struct RoleSyncService<'a> {
    guild: &'a dyn GuildGateway,
    roles: &'a TierRoles,
}

impl<'a> RoleSyncService<'a> {
    pub fn new(guild: &'a dyn GuildGateway, roles: &'a TierRoles) -> Self {
        Self { guild, roles }
    }

    /// Applies the planned role changes for `member`.
    ///
    /// Each change is attempted independently; failures are logged and the remaining
    /// changes still run. Returns the changes that were applied.
    pub async fn reconcile(&self, member: &GuildMember, tier: MembershipTier) -> Vec<RoleChange> {
        let planned = plan_role_changes(member, tier, self.roles);
        if planned.is_empty() {
            tracing::debug!("Roles for {} already match tier {}", member.tag, tier.as_str());
            return planned;
        }

        let mut applied = Vec::with_capacity(planned.len());
        for change in planned {
            let result = match change {
                RoleChange::Add(role_id) => self.guild.add_role(member.user_id, role_id).await,
                RoleChange::Remove(role_id) => {
                    self.guild.remove_role(member.user_id, role_id).await
                }
            };

            match result {
                Ok(()) => applied.push(change),
                Err(e) => tracing::error!(
                    "Failed to apply {:?} for {}: {}",
                    change,
                    member.tag,
                    e
                ),
            }
        }

        if !applied.is_empty() {
            tracing::info!("Assigned {} role to {}", tier.label(), member.tag);
        }

        applied
    }
}
