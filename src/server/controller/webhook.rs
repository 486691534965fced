use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::webhook::{DiscordIdDto, LinkWebhookDto, LinkWebhookResponseDto},
    server::{
        error::AppError, service::membership::MembershipService, state::AppState,
        util::parse::parse_snowflake,
    },
};

/// Called by the community site after a user links their Discord account.
///
/// Reconciles the member's tier roles and sends them a confirmation DM.
///
/// # Returns
/// - `200 OK` - `{ success: true, status }` with the resolved tier
/// - `400 Bad Request` - `discord_id` missing, empty, or not a Discord ID
/// - `404 Not Found` - Guild unavailable, member not in the guild, or user unknown
///   to the site
/// - `500 Internal Server Error` - Anything else
pub async fn post_link_webhook(
    State(state): State<AppState>,
    payload: Result<Json<LinkWebhookDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let discord_id = payload
        .ok()
        .and_then(|Json(dto)| dto.discord_id)
        .map(DiscordIdDto::into_string)
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("discord_id is required".to_string()))?;

    let user_id = parse_snowflake(&discord_id).map_err(|_| {
        AppError::BadRequest("discord_id must be a numeric Discord user ID".to_string())
    })?;

    let tier = MembershipService::new(
        state.status.as_ref(),
        state.guild.as_ref(),
        state.messenger.as_ref(),
        &state.config.tier_roles,
        &state.config.community_name,
    )
    .link_notification(user_id)
    .await?;

    Ok((
        StatusCode::OK,
        Json(LinkWebhookResponseDto {
            success: true,
            status: tier.as_str().to_string(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::server::{
        model::{member::GuildMember, role::RoleChange, tier::MembershipTier},
        router::router,
        state::AppState,
        test::{test_config, FakeGuildGateway, FakeMessenger, FakeStatusResolver},
    };

    struct Fixture {
        guild: Arc<FakeGuildGateway>,
        messenger: Arc<FakeMessenger>,
        state: AppState,
    }

    fn fixture(status: FakeStatusResolver, guild: FakeGuildGateway) -> Fixture {
        let guild = Arc::new(guild);
        let messenger = FakeMessenger::new().shared();
        let state = AppState::new(
            Arc::new(test_config()),
            Arc::new(status),
            guild.clone(),
            messenger.clone(),
        );

        Fixture {
            guild,
            messenger,
            state,
        }
    }

    async fn post(state: AppState, body: &str) -> (StatusCode, Value) {
        let response: Response = router()
            .with_state(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/webhook/link")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    /// Tests a link notification for a paid member.
    ///
    /// Verifies that a string id for a paid member returns the tier and adds
    /// the paid role.
    ///
    /// Expected: 200 with success and status "paid", paid role added, DM sent
    #[tokio::test]
    async fn test_links_paid_member() {
        let test = fixture(
            FakeStatusResolver::new().with_tier("500", MembershipTier::Paid),
            FakeGuildGateway::new().with_member(GuildMember::new(500, "neo#0500", [])),
        );

        let (status, body) = post(test.state, r#"{"discord_id":"500"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["status"], "paid");
        assert_eq!(test.guild.changes(), vec![(500, RoleChange::Add(111))]);
        assert_eq!(test.messenger.delivered().len(), 1);
    }

    /// Tests a link notification carrying the ID as a JSON number.
    ///
    /// Verifies that a numeric `discord_id` is treated like its string form and goes
    /// through member lookup and role sync.
    ///
    /// Expected: 200 with status "paid" and the paid role added
    #[tokio::test]
    async fn test_links_member_with_numeric_id() {
        let test = fixture(
            FakeStatusResolver::new().with_tier("500", MembershipTier::Paid),
            FakeGuildGateway::new().with_member(GuildMember::new(500, "neo#0500", [])),
        );

        let (status, body) = post(test.state, r#"{"discord_id":500}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "paid");
        assert_eq!(test.guild.changes(), vec![(500, RoleChange::Add(111))]);
    }

    /// Tests a link notification for a user the site does not know.
    ///
    /// Verifies that a user the site does not know gives a 404 and the
    /// member's roles are left alone.
    ///
    /// Expected: 404 "User not found in database" and no role mutation
    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let test = fixture(
            FakeStatusResolver::new(),
            FakeGuildGateway::new().with_member(GuildMember::new(500, "neo#0500", [222])),
        );

        let (status, body) = post(test.state, r#"{"discord_id":"500"}"#).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User not found in database");
        assert!(test.guild.changes().is_empty());
        assert!(test.messenger.attempts().is_empty());
    }

    /// Tests the missing-member and missing-guild cases.
    ///
    /// Verifies that a user missing from the guild and a guild missing from
    /// the cache both give a 404, each with its own message.
    ///
    /// Expected: 404 with the matching message for each
    #[tokio::test]
    async fn test_absent_member_or_guild_is_not_found() {
        let member_missing = fixture(
            FakeStatusResolver::new().with_tier("500", MembershipTier::Paid),
            FakeGuildGateway::new(),
        );
        let guild_missing = fixture(
            FakeStatusResolver::new().with_tier("500", MembershipTier::Paid),
            FakeGuildGateway::new().without_guild(),
        );

        let (status, body) = post(member_missing.state, r#"{"discord_id":"500"}"#).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Member not found in server");

        let (status, body) = post(guild_missing.state, r#"{"discord_id":"500"}"#).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Guild not found");
    }

    /// Tests request bodies without a usable discord_id.
    ///
    /// Verifies that a missing, null or empty id gets the same 400 as a body
    /// that is not JSON at all.
    ///
    /// Expected: 400 "discord_id is required" for missing, empty, and malformed bodies
    #[tokio::test]
    async fn test_missing_discord_id_is_bad_request() {
        for body in [r#"{}"#, r#"{"discord_id":""}"#, r#"{"discord_id":null}"#, "not json"] {
            let test = fixture(FakeStatusResolver::new(), FakeGuildGateway::new());

            let (status, response) = post(test.state, body).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(response["error"], "discord_id is required");
        }
    }

    /// Tests a discord_id that is not a snowflake.
    ///
    /// Verifies that an id that is not a snowflake gives a 400
    /// with a message naming the field.
    ///
    /// Expected: 400 naming the expected format
    #[tokio::test]
    async fn test_non_numeric_discord_id_is_bad_request() {
        let test = fixture(FakeStatusResolver::new(), FakeGuildGateway::new());

        let (status, body) = post(test.state, r#"{"discord_id":"abc"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "discord_id must be a numeric Discord user ID");
    }
}
