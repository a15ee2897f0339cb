use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::completion::{ChatCompletionsClient, CompletionError, DEFAULT_ENDPOINT, DEFAULT_MODEL};

/// Process-wide settings, read once at startup from flags or the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "askgate", version, about = "Quota-limited gateway to a chat completion API")]
pub struct Config {
    /// Address to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// JSON document holding the account records.
    #[arg(long, env = "USERS_FILE", default_value = "users.json")]
    pub users_file: PathBuf,

    /// Bearer credential for the completion API.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, env = "COMPLETION_URL", default_value = DEFAULT_ENDPOINT)]
    pub completion_url: String,

    #[arg(long, env = "COMPLETION_MODEL", default_value = DEFAULT_MODEL)]
    pub completion_model: String,

    /// Deadline for one completion call, in seconds. Unset means no deadline.
    #[arg(long, env = "COMPLETION_TIMEOUT_SECS")]
    pub completion_timeout_secs: Option<u64>,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn completion_client(&self) -> Result<ChatCompletionsClient, CompletionError> {
        let client = ChatCompletionsClient::new(self.api_key.clone())
            .with_endpoint(self.completion_url.clone())
            .with_model(self.completion_model.clone());
        match self.completion_timeout_secs {
            Some(secs) => client.with_timeout(Duration::from_secs(secs)),
            None => Ok(client),
        }
    }
}
