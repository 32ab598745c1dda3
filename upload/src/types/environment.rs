//! Deployment configuration, read once at cold start

use std::env;

use anyhow::{bail, Context};
use aws_config::BehaviorVersion;
use tracing::Level;

/// Presigned upload URLs stay valid for 15 minutes
const DEFAULT_PRESIGNED_URL_EXPIRY_SECS: u64 = 15 * 60;

/// Endpoint used when running against `LocalStack`
const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";

/// Deployment stage of the function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment, the default when `APP_ENV` is unset
    Production,
    /// Staging environment
    Staging,
    /// Local development against `LocalStack`
    Development {
        /// Optional override for presigned URL expiry in seconds
        presign_expiry_override: Option<u64>,
    },
}

impl Environment {
    /// Reads the stage from `APP_ENV`
    ///
    /// A deployed function usually only sets `UPLOAD_BUCKET`, so an unset
    /// `APP_ENV` means production.
    ///
    /// # Errors
    ///
    /// Returns an error if `APP_ENV` contains an unknown value
    pub fn from_env() -> anyhow::Result<Self> {
        let Ok(stage) = env::var("APP_ENV") else {
            return Ok(Self::Production);
        };

        match stage.trim().to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development {
                presign_expiry_override: env::var("PRESIGNED_URL_EXPIRY_SECS")
                    .ok()
                    .and_then(|secs| secs.parse().ok()),
            }),
            other => bail!("Invalid environment: {other}"),
        }
    }

    /// Bucket receiving uploads, from `UPLOAD_BUCKET`
    ///
    /// # Errors
    ///
    /// Returns an error if `UPLOAD_BUCKET` is not set outside development
    pub fn upload_bucket(&self) -> anyhow::Result<String> {
        match (env::var("UPLOAD_BUCKET"), self) {
            (Ok(bucket), _) => Ok(bucket),
            (Err(_), Self::Development { .. }) => Ok("image-uploads".to_string()),
            (Err(e), _) => Err(e).context("UPLOAD_BUCKET environment variable is not set"),
        }
    }

    /// S3 endpoint override
    ///
    /// `S3_ENDPOINT_URL` wins in every stage; development falls back to `LocalStack`.
    /// `None` means the regional AWS endpoint.
    #[must_use]
    pub fn endpoint_url(&self) -> Option<String> {
        env::var("S3_ENDPOINT_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .or_else(|| match self {
                Self::Development { .. } => Some(LOCALSTACK_ENDPOINT.to_string()),
                Self::Production | Self::Staging => None,
            })
    }

    /// S3 client configuration for the presigner
    ///
    /// Custom endpoints are addressed path-style, which `LocalStack` and most S3
    /// compatible stores require.
    pub async fn s3_client_config(&self) -> aws_sdk_s3::Config {
        let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let builder = aws_sdk_s3::config::Builder::from(&sdk_config);

        match self.endpoint_url() {
            Some(url) => builder.endpoint_url(url).force_path_style(true).build(),
            None => builder.build(),
        }
    }

    /// Presigned URL expiry time in seconds
    #[must_use]
    pub fn presigned_url_expiry_secs(&self) -> u64 {
        match self {
            Self::Development {
                presign_expiry_override: Some(secs),
            } => *secs,
            _ => DEFAULT_PRESIGNED_URL_EXPIRY_SECS,
        }
    }

    /// Default log level, overridable with `TRACING_LEVEL`
    #[must_use]
    pub fn tracing_level(&self) -> Level {
        let default = if matches!(self, Self::Development { .. }) {
            Level::DEBUG
        } else {
            Level::INFO
        };

        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|level| level.parse().ok())
            .unwrap_or(default)
    }

    /// Whether logs should be emitted as JSON
    #[must_use]
    pub const fn json_logs(&self) -> bool {
        !matches!(self, Self::Development { .. })
    }
}
