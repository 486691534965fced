use std::collections::HashSet;

use serenity::all::Member;

/// Guild member as seen by role reconciliation.
///
/// Carries only the identity and current role set, converted from serenity's
/// `Member` at the bot boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildMember {
    /// Discord ID of the user
    pub user_id: u64,
    /// Display tag used in log lines
    pub tag: String,
    /// Role IDs the member currently holds
    pub roles: HashSet<u64>,
}

impl GuildMember {
    pub fn new(user_id: u64, tag: impl Into<String>, roles: impl IntoIterator<Item = u64>) -> Self {
        Self {
            user_id,
            tag: tag.into(),
            roles: roles.into_iter().collect(),
        }
    }

    pub fn has_role(&self, role_id: u64) -> bool {
        self.roles.contains(&role_id)
    }
}

impl From<&Member> for GuildMember {
    fn from(member: &Member) -> Self {
        Self::new(
            member.user.id.get(),
            member.user.tag(),
            member.roles.iter().map(|role| role.get()),
        )
    }
}
