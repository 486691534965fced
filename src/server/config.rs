use std::{path::PathBuf, str::FromStr, time::Duration};

use crate::server::{
    error::{config::ConfigError, AppError},
    model::tier::TierRoles,
    util::parse::parse_snowflake,
};

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_COMMUNITY_NAME: &str = "Anione";
const DEFAULT_COMMUNITY_URL: &str = "https://www.anione.me";

const DEFAULT_CAMPAIGN_DATA_DIR: &str = "data";
const DEFAULT_CANDIDATES_FILE: &str = "campaign_candidates.txt";
const DEFAULT_SENT_FILE: &str = "campaign_sent.txt";
/// Spacing between campaign DMs, sized to stay under Discord's outbound DM limits.
const DEFAULT_CAMPAIGN_DELAY_SECS: u64 = 180;
const DEFAULT_CAMPAIGN_MESSAGE: &str = "👋 Hey there!\n\n\
    You're part of our Discord community but haven't linked your account yet.\n\
    Use `/link-account` in the server to connect it and unlock your member role and perks.";

pub struct Config {
    pub discord_bot_token: String,
    pub discord_guild_id: u64,
    pub tier_roles: TierRoles,

    pub api_base_url: String,
    pub api_key: String,

    pub port: u16,

    pub community_name: String,
    pub community_url: String,

    pub campaign: CampaignConfig,
}

/// Location of the recipient ledgers and pacing of the DM campaign.
#[derive(Debug, Clone)]
pub struct CampaignConfig {
    pub data_dir: PathBuf,
    pub candidates_file: String,
    pub sent_file: String,
    pub delay: Duration,
    pub message: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::from_lookup(|name| std::env::var(name).ok())?)
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// `from_env` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = EnvReader { lookup };

        let paid_role = vars.optional_snowflake("PAID_ROLE_ID")?;
        let free_role = vars.optional_snowflake("FREE_ROLE_ID")?;

        Ok(Self {
            discord_bot_token: vars.required("DISCORD_BOT_TOKEN")?,
            discord_guild_id: vars.required_snowflake("DISCORD_GUILD_ID")?,
            tier_roles: TierRoles::new(paid_role, free_role),
            api_base_url: vars.required("API_BASE_URL")?,
            api_key: vars.required("DISCORD_API_KEY")?,
            port: vars.parsed_or("PORT", DEFAULT_PORT)?,
            community_name: vars.or("COMMUNITY_NAME", DEFAULT_COMMUNITY_NAME),
            community_url: vars.or("COMMUNITY_URL", DEFAULT_COMMUNITY_URL),
            campaign: CampaignConfig {
                data_dir: PathBuf::from(vars.or("CAMPAIGN_DATA_DIR", DEFAULT_CAMPAIGN_DATA_DIR)),
                candidates_file: vars.or("CAMPAIGN_CANDIDATES_FILE", DEFAULT_CANDIDATES_FILE),
                sent_file: vars.or("CAMPAIGN_SENT_FILE", DEFAULT_SENT_FILE),
                delay: Duration::from_secs(
                    vars.parsed_or("CAMPAIGN_DELAY_SECS", DEFAULT_CAMPAIGN_DELAY_SECS)?,
                ),
                message: vars.or("CAMPAIGN_MESSAGE", DEFAULT_CAMPAIGN_MESSAGE),
            },
        })
    }
}

struct EnvReader<F> {
    lookup: F,
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Empty values count as unset, matching how `.env` files leave placeholders.
    fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, name: &str) -> Result<String, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
    }

    fn or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    fn parsed_or<T: FromStr>(&self, name: &str, default: T) -> Result<T, ConfigError> {
        match self.get(name) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnvVar {
                    name: name.to_string(),
                    value,
                }),
            None => Ok(default),
        }
    }

    fn required_snowflake(&self, name: &str) -> Result<u64, ConfigError> {
        let value = self.required(name)?;
        parse_snowflake(&value).map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        })
    }

    fn optional_snowflake(&self, name: &str) -> Result<Option<u64>, ConfigError> {
        match self.get(name) {
            Some(value) => parse_snowflake(&value)
                .map(Some)
                .map_err(|_| ConfigError::InvalidEnvVar {
                    name: name.to_string(),
                    value,
                }),
            None => Ok(None),
        }
    }
}
