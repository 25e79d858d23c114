// ABOUTME: Builder pattern implementation for ImgurClient configuration
// ABOUTME: Provides type-safe configuration with compile-time required Client-ID

use crate::constants::{headers, timeouts};
use crate::error::ImgurError;
use crate::transport::Transport;
use crate::ImgurClient;
use secrecy::SecretString;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
#[builder(build_method(into = Result<ImgurClient, ImgurError>))]
pub struct ImgurClientConfig {
    /// Application Client-ID sent as `Authorization: Client-ID <id>`
    #[builder(setter(into))]
    pub client_id: SecretString,

    /// Optional RapidAPI key; switches requests to the RapidAPI gateway
    #[builder(default, setter(strip_option, into))]
    pub rapidapi_key: Option<SecretString>,

    #[builder(default = timeouts::HTTP_REQUEST_TIMEOUT)]
    pub timeout: Duration,

    /// Overrides the API base URL (mainly for tests and proxies)
    #[builder(default, setter(strip_option, into))]
    pub base_url: Option<String>,

    #[builder(default = headers::DEFAULT_USER_AGENT.to_string(), setter(into))]
    pub user_agent: String,

    /// Custom transport; defaults to a reqwest client honoring `timeout`
    #[builder(default, setter(strip_option))]
    pub transport: Option<Arc<dyn Transport>>,
}

impl fmt::Debug for ImgurClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImgurClientConfig")
            .field("client_id", &self.client_id)
            .field("rapidapi_key", &self.rapidapi_key)
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

impl From<ImgurClientConfig> for Result<ImgurClient, ImgurError> {
    fn from(config: ImgurClientConfig) -> Self {
        ImgurClient::from_config(config)
    }
}

impl ImgurClient {
    pub fn builder() -> ImgurClientConfigBuilder<((), (), (), (), (), ())> {
        ImgurClientConfig::builder()
    }
}
