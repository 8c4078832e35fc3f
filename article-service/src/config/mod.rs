use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Token ceiling for generated articles. Keeps upstream responses from
/// running away on open-ended prompts.
const DEFAULT_MAX_TOKENS: u32 = 2500;
const DEFAULT_TEMPERATURE: f32 = 0.8;
const DEFAULT_TOP_P: f32 = 0.8;

#[derive(Debug, Clone)]
pub struct ArticleConfig {
    pub common: core_config::Config,
    pub upstream: UpstreamConfig,
    pub generation: GenerationSettings,
    pub prompt_style: PromptStyle,
}

/// Which chat-completion vendor the proxy talks to.
///
/// Both vendors speak the same OpenAI-compatible wire format; they differ
/// in base URL, model catalog, API key variable, and the identification
/// headers OpenRouter expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamVendor {
    Together,
    OpenRouter,
}

impl UpstreamVendor {
    fn default_base_url(self) -> &'static str {
        match self {
            UpstreamVendor::Together => "https://api.together.xyz/v1",
            UpstreamVendor::OpenRouter => "https://openrouter.ai/api/v1",
        }
    }

    fn default_model(self) -> &'static str {
        match self {
            UpstreamVendor::Together => "meta-llama/Llama-3-70b-chat-hf",
            UpstreamVendor::OpenRouter => "meta-llama/llama-3-70b-instruct",
        }
    }

    fn api_key_var(self) -> &'static str {
        match self {
            UpstreamVendor::Together => "TOGETHER_API_KEY",
            UpstreamVendor::OpenRouter => "OPENROUTER_API_KEY",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub vendor: UpstreamVendor,
    pub base_url: String,
    pub model: String,
    pub api_key: Secret<String>,
    /// `HTTP-Referer` identification header (OpenRouter only).
    pub referer: Option<String>,
    /// `X-Title` identification header (OpenRouter only).
    pub app_title: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

/// Prompt template selection. The handler control flow is identical for
/// every style; only the rendered messages differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    /// Single user message, Markdown article, keywords drive the topic.
    Classic,
    /// System + user messages, explicit article topic, word count treated
    /// as an upper bound, plain-text output.
    TopicLed,
}

impl From<&str> for PromptStyle {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "topic-led" | "topic_led" => PromptStyle::TopicLed,
            _ => PromptStyle::Classic,
        }
    }
}

impl ArticleConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let vendor = match get_env("UPSTREAM_PROVIDER", Some("together"), is_prod)?
            .to_ascii_lowercase()
            .as_str()
        {
            "openrouter" => UpstreamVendor::OpenRouter,
            _ => UpstreamVendor::Together,
        };

        let upstream = UpstreamConfig {
            vendor,
            base_url: get_env("UPSTREAM_BASE_URL", Some(vendor.default_base_url()), is_prod)?,
            model: get_env("ARTICLE_MODEL", Some(vendor.default_model()), is_prod)?,
            api_key: Secret::new(get_env(vendor.api_key_var(), None, is_prod)?),
            referer: env::var("ARTICLE_REFERER").ok(),
            app_title: env::var("ARTICLE_APP_TITLE").ok(),
        };

        let generation = GenerationSettings {
            max_tokens: get_env(
                "ARTICLE_MAX_TOKENS",
                Some(&DEFAULT_MAX_TOKENS.to_string()),
                is_prod,
            )?
            .parse()
            .unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: get_env(
                "ARTICLE_TEMPERATURE",
                Some(&DEFAULT_TEMPERATURE.to_string()),
                is_prod,
            )?
            .parse()
            .unwrap_or(DEFAULT_TEMPERATURE),
            top_p: get_env("ARTICLE_TOP_P", Some(&DEFAULT_TOP_P.to_string()), is_prod)?
                .parse()
                .unwrap_or(DEFAULT_TOP_P),
        };

        let prompt_style =
            PromptStyle::from(get_env("ARTICLE_PROMPT_STYLE", Some("classic"), is_prod)?.as_str());

        Ok(ArticleConfig {
            common: common_config,
            upstream,
            generation,
            prompt_style,
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_style_parses_known_values() {
        assert_eq!(PromptStyle::from("topic-led"), PromptStyle::TopicLed);
        assert_eq!(PromptStyle::from("TOPIC_LED"), PromptStyle::TopicLed);
        assert_eq!(PromptStyle::from("classic"), PromptStyle::Classic);
        assert_eq!(PromptStyle::from("anything-else"), PromptStyle::Classic);
    }

    #[test]
    fn vendor_defaults_differ() {
        assert_ne!(
            UpstreamVendor::Together.default_base_url(),
            UpstreamVendor::OpenRouter.default_base_url()
        );
        assert_eq!(UpstreamVendor::Together.api_key_var(), "TOGETHER_API_KEY");
        assert_eq!(
            UpstreamVendor::OpenRouter.api_key_var(),
            "OPENROUTER_API_KEY"
        );
    }
}
