//! Client for the community site's Discord integration API.
//!
//! The site owns account linking and subscription state. The bot asks it for a user's
//! membership tier and for new linking codes. Every request carries the shared API key
//! in the `x-discord-api-key` header.

use serde::{Deserialize, Serialize};
use serenity::async_trait;

use crate::server::{
    error::AppError,
    model::{link::LinkInitiation, tier::MembershipTier},
};

const API_KEY_HEADER: &str = "x-discord-api-key";

/// Resolves a Discord user's membership tier.
///
/// Implementations never fail: a lookup that cannot be completed is reported as
/// `MembershipTier::NotFound`, so a flaky site never breaks a join event or a role sync.
#[async_trait]
pub trait StatusResolver: Send + Sync {
    async fn check_status(&self, discord_id: &str) -> MembershipTier;
}

#[derive(Deserialize)]
struct StatusResponseDto {
    status: MembershipTier,
}

#[derive(Serialize)]
struct InitiateLinkRequestDto<'a> {
    discord_id: &'a str,
}

/// HTTP client for the community site.
///
/// Cheap to clone; `reqwest::Client` shares its connection pool between clones.
#[derive(Clone)]
pub struct CommunityApiClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CommunityApiClient {
    /// Creates a client for the API at `base_url`.
    ///
    /// A trailing slash on `base_url` is ignored.
    pub fn new(http_client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Fetches a user's membership tier.
    ///
    /// # Returns
    /// - `Ok(MembershipTier)` - The tier reported by the site
    /// - `Err(AppError::ReqwestErr)` - Request failed or the body was not the expected JSON
    pub async fn fetch_status(&self, discord_id: &str) -> Result<MembershipTier, AppError> {
        let url = format!("{}/api/discord/check-status/{}", self.base_url, discord_id);

        let response: StatusResponseDto = self
            .http_client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?
            .json()
            .await?;

        Ok(response.status)
    }

    /// Requests a new linking code for a Discord user.
    ///
    /// Status codes are not treated as errors here; the reply is interpreted by
    /// `LinkInitiation::from_response` so the caller can word each case.
    ///
    /// # Returns
    /// - `Ok(LinkInitiation)` - The site's answer, whatever it was
    /// - `Err(AppError::ReqwestErr)` - The request could not be sent or read
    pub async fn initiate_link(&self, discord_id: &str) -> Result<LinkInitiation, AppError> {
        let url = format!("{}/api/discord/initiate-link", self.base_url);

        let response = self
            .http_client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&InitiateLinkRequestDto { discord_id })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let initiation = LinkInitiation::from_response(status, &body);
        if let LinkInitiation::InvalidResponse(raw) = &initiation {
            tracing::error!("Failed to parse initiate-link response as JSON: {}", raw);
        }

        Ok(initiation)
    }
}

#[async_trait]
impl StatusResolver for CommunityApiClient {
    async fn check_status(&self, discord_id: &str) -> MembershipTier {
        match self.fetch_status(discord_id).await {
            Ok(tier) => tier,
            Err(e) => {
                tracing::error!("Error checking status for {}: {}", discord_id, e);
                MembershipTier::NotFound
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    const API_KEY: &str = "test-key";

    /// Stand-in for the community site, served on an ephemeral local port.
    async fn fake_site() -> String {
        async fn check_status(headers: HeaderMap, Path(id): Path<String>) -> (StatusCode, String) {
            if headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) != Some(API_KEY) {
                return (StatusCode::UNAUTHORIZED, r#"{"error":"bad key"}"#.to_string());
            }
            let body = match id.as_str() {
                "1" => r#"{"status":"paid"}"#,
                "2" => r#"{"status":"free"}"#,
                "3" => "not json at all",
                _ => r#"{"status":"not_found"}"#,
            };
            (StatusCode::OK, body.to_string())
        }

        async fn initiate_link(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
            match body["discord_id"].as_str() {
                Some("1") => (
                    StatusCode::OK,
                    Json(json!({"code": "XY99", "expires_at": "2030-01-01T00:00:00Z"})),
                ),
                Some("2") => (
                    StatusCode::CONFLICT,
                    Json(json!({"error": "Already linked", "already_linked": true})),
                ),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "boom"})),
                ),
            }
        }

        let app = Router::new()
            .route("/api/discord/check-status/{id}", get(check_status))
            .route("/api/discord/initiate-link", post(initiate_link));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{address}/")
    }

    fn client(base_url: String, api_key: &str) -> CommunityApiClient {
        CommunityApiClient::new(reqwest::Client::new(), base_url, api_key.to_string())
    }

    /// Tests that statuses are read from the site with the API key attached.
    ///
    /// Verifies that each status string the site reports maps to its
    /// matching tier.
    ///
    /// Expected: paid, free, and not_found as reported
    #[tokio::test]
    async fn test_resolves_reported_tiers() {
        let api = client(fake_site().await, API_KEY);

        assert_eq!(api.check_status("1").await, MembershipTier::Paid);
        assert_eq!(api.check_status("2").await, MembershipTier::Free);
        assert_eq!(api.check_status("9").await, MembershipTier::NotFound);
    }

    /// Tests that a malformed body degrades to not found.
    ///
    /// Verifies that a body without a usable status field is
    /// treated as an unlinked member.
    ///
    /// Expected: fetch_status errs, check_status returns NotFound
    #[tokio::test]
    async fn test_malformed_status_degrades_to_not_found() {
        let api = client(fake_site().await, API_KEY);

        assert!(api.fetch_status("3").await.is_err());
        assert_eq!(api.check_status("3").await, MembershipTier::NotFound);
    }

    /// Tests that a rejected API key degrades to not found.
    ///
    /// Verifies that an unauthorized reply from the site is treated as
    /// an unlinked member.
    ///
    /// Expected: NotFound
    #[tokio::test]
    async fn test_wrong_key_degrades_to_not_found() {
        let api = client(fake_site().await, "wrong");

        assert_eq!(api.check_status("1").await, MembershipTier::NotFound);
    }

    /// Tests that an unreachable site degrades to not found.
    ///
    /// Verifies that a connection failure is treated as an
    /// unlinked member rather than propagated.
    ///
    /// Expected: NotFound
    #[tokio::test]
    async fn test_unreachable_site_degrades_to_not_found() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let api = client(format!("http://{address}"), API_KEY);

        assert_eq!(api.check_status("1").await, MembershipTier::NotFound);
    }

    /// Tests each initiate-link outcome.
    ///
    /// Verifies that a fresh code, a conflict flagged as linked and an error
    /// reply from the site each reach the caller as the matching outcome.
    ///
    /// Expected: Code, AlreadyLinked, and Rejected with the site's error text
    #[tokio::test]
    async fn test_interprets_link_responses() {
        let api = client(fake_site().await, API_KEY);

        let code = api.initiate_link("1").await.unwrap();
        assert!(matches!(code, LinkInitiation::Code { ref code, .. } if code == "XY99"));

        let linked = api.initiate_link("2").await.unwrap();
        assert_eq!(linked, LinkInitiation::AlreadyLinked);

        let rejected = api.initiate_link("3").await.unwrap();
        assert_eq!(rejected, LinkInitiation::Rejected(Some("boom".to_string())));
    }
}
