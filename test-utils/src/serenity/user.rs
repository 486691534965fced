//! Test factory for creating Serenity User objects.

use serenity::all::User;

/// Creates a JSON value describing a Discord user, shared with the member factory.
pub(crate) fn user_json(user_id: u64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": user_id.to_string(),
        "username": name,
        "discriminator": "0",
        "global_name": null,
        "avatar": null,
        "bot": false,
        "public_flags": 0,
    })
}

/// Creates a test Serenity User with the given id and username.
///
/// Uses the post-2023 username format (discriminator `"0"`), so `User::tag()`
/// returns the bare username.
///
/// # Panics
/// - If the JSON cannot be deserialized into a User (indicates invalid test data)
pub fn create_test_user(user_id: u64, name: &str) -> User {
    serde_json::from_value(user_json(user_id, name))
        .expect("Failed to create test user - invalid JSON structure")
}
