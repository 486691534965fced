//! Test factory for creating Serenity Member objects.

use serenity::all::Member;

use super::user::user_json;

/// Creates a test Serenity guild Member holding the given roles.
///
/// # Arguments
/// - `user_id` - Discord user ID (snowflake)
/// - `name` - Username of the member's user
/// - `guild_id` - Guild the member belongs to
/// - `role_ids` - Roles currently assigned to the member
///
/// # Returns
/// - `Member` - A valid Serenity Member struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a Member (indicates invalid test data)
pub fn create_test_member(user_id: u64, name: &str, guild_id: u64, role_ids: &[u64]) -> Member {
    let roles: Vec<String> = role_ids.iter().map(|id| id.to_string()).collect();

    serde_json::from_value(serde_json::json!({
        "user": user_json(user_id, name),
        "nick": null,
        "avatar": null,
        "roles": roles,
        "joined_at": "2024-01-01T00:00:00.000000+00:00",
        "premium_since": null,
        "deaf": false,
        "mute": false,
        "flags": 0,
        "pending": false,
        "permissions": null,
        "communication_disabled_until": null,
        "guild_id": guild_id.to_string(),
        "unusual_dm_activity_until": null,
    }))
    .expect("Failed to create test member - invalid JSON structure")
}
