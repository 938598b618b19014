pub mod gemini;
pub mod openai_compatible;

pub use gemini::GeminiClient;
pub use openai_compatible::OpenAICompatibleClient;

use anyhow::Result;
use std::sync::Arc;

use crate::backend::InferenceBackend;
use crate::config::{ProviderKind, RemoteSettings};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Build the configured backend, or `None` when its API key is not set.
pub fn backend_from_settings(settings: &RemoteSettings) -> Result<Option<Arc<dyn InferenceBackend>>> {
    let api_key = std::env::var(settings.api_key_env()).ok();
    build_backend(settings, api_key)
}

fn build_backend(
    settings: &RemoteSettings,
    api_key: Option<String>,
) -> Result<Option<Arc<dyn InferenceBackend>>> {
    match settings.provider {
        ProviderKind::Gemini => {
            let api_key = match api_key {
                Some(key) if !key.trim().is_empty() => key,
                _ => {
                    tracing::info!(
                        "{} not set, remote inference disabled",
                        settings.api_key_env()
                    );
                    return Ok(None);
                }
            };
            let mut client = GeminiClient::new(api_key, settings.model())
                .with_temperature(settings.temperature)
                .with_max_tokens(settings.max_tokens);
            if let Some(base_url) = &settings.base_url {
                client = client.with_base_url(base_url);
            }
            Ok(Some(Arc::new(client)))
        }
        ProviderKind::Openai => {
            // Self-hosted OpenAI-compatible servers often need no key.
            let api_key = api_key.filter(|k| !k.trim().is_empty());
            if api_key.is_none() && settings.base_url.is_none() {
                tracing::info!(
                    "{} not set, remote inference disabled",
                    settings.api_key_env()
                );
                return Ok(None);
            }
            let base_url = settings.base_url.as_deref().unwrap_or(OPENAI_BASE_URL);
            let client = OpenAICompatibleClient::new(
                format!("OpenAI-compatible {}", settings.model()),
                api_key,
                base_url,
                settings.model(),
            )
            .with_temperature(settings.temperature)
            .with_max_tokens(settings.max_tokens);
            Ok(Some(Arc::new(client)))
        }
    }
}
