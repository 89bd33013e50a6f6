//! Configuration models.
//!
//! `config.toml` maps onto [`PictogramConfig`] and `secret.json` onto
//! [`SecretConfig`]. Every section derives `Default` so partial files parse.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::raster::TraceOptions;

pub const DEFAULT_ICONIFY_BASE_URL: &str = "https://api.iconify.design";
pub const DEFAULT_VERTEX_LOCATION: &str = "us-central1";

pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const OPENAI_IMAGE_MODEL_ENV: &str = "OPENAI_IMAGE_MODEL";
pub const VERTEX_PROJECT_ID_ENV: &str = "GOOGLE_CLOUD_PROJECT_ID";
pub const VERTEX_LOCATION_ENV: &str = "VERTEX_AI_LOCATION";
pub const VERTEX_ACCESS_TOKEN_ENV: &str = "VERTEX_AI_ACCESS_TOKEN";

/// One step of the resolution chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StrategyKind {
    Pattern,
    Iconify,
    Ai,
    Fallback,
}

/// Image-generation backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GenerationProvider {
    #[default]
    Openai,
    Vertex,
}

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PictogramConfig {
    pub resolver: ResolverConfig,
    pub iconify: IconifyConfig,
    pub generation: GenerationConfig,
    pub tracer: TracerConfig,
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Strategies in priority order.
    pub strategies: Vec<StrategyKind>,
    /// Upper bound for a single strategy attempt.
    pub strategy_timeout_secs: u64,
    /// Runner-up icons fetched for the iconify strategy.
    pub max_alternatives: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            strategies: vec![
                StrategyKind::Pattern,
                StrategyKind::Iconify,
                StrategyKind::Ai,
                StrategyKind::Fallback,
            ],
            strategy_timeout_secs: 60,
            max_alternatives: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconifyConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for IconifyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ICONIFY_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub provider: GenerationProvider,
    /// Overrides the provider's default model.
    pub model: Option<String>,
    /// Style used when a request names none.
    pub default_style: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    /// Trace-service endpoints, tried in order.
    pub endpoints: Vec<String>,
    pub threshold: u8,
    pub turd_size: u32,
    pub opt_tolerance: f32,
    pub timeout_secs: u64,
}

impl TracerConfig {
    pub fn trace_options(&self) -> TraceOptions {
        TraceOptions {
            threshold: self.threshold,
            turd_size: self.turd_size,
            opt_tolerance: self.opt_tolerance,
        }
    }
}

impl Default for TracerConfig {
    fn default() -> Self {
        let options = TraceOptions::default();
        Self {
            endpoints: vec![
                "http://localhost:3000/api/trace-image-simple".to_string(),
                "http://localhost:3000/api/trace-image".to_string(),
            ],
            threshold: options.threshold,
            turd_size: options.turd_size,
            opt_tolerance: options.opt_tolerance,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Overrides the platform data directory for history storage.
    pub path: Option<String>,
}

/// Root of `secret.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai: Option<OpenAiSecret>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertex: Option<VertexSecret>,
}

/// OpenAI image API credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAiSecret {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Vertex AI (Imagen) credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexSecret {
    pub project_id: String,
    #[serde(default)]
    pub location: Option<String>,
    pub access_token: String,
}

impl VertexSecret {
    pub fn location_or_default(&self) -> &str {
        self.location
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(DEFAULT_VERTEX_LOCATION)
    }
}

impl SecretConfig {
    /// Fills values missing from the file with environment variables.
    ///
    /// `lookup` is usually `|k| std::env::var(k).ok()`. Blank values count as
    /// missing. Sections whose required fields stay blank are dropped.
    pub fn merge_env(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let keep = |value: String| Some(value).filter(|v| !v.trim().is_empty());

        let openai = self.openai.unwrap_or_default();
        let openai = OpenAiSecret {
            api_key: keep(openai.api_key)
                .or_else(|| env(OPENAI_API_KEY_ENV))
                .unwrap_or_default(),
            model_name: openai
                .model_name
                .filter(|m| !m.trim().is_empty())
                .or_else(|| env(OPENAI_IMAGE_MODEL_ENV)),
        };

        let vertex = self.vertex.unwrap_or_default();
        let vertex = VertexSecret {
            project_id: keep(vertex.project_id)
                .or_else(|| env(VERTEX_PROJECT_ID_ENV))
                .unwrap_or_default(),
            location: vertex
                .location
                .filter(|l| !l.trim().is_empty())
                .or_else(|| env(VERTEX_LOCATION_ENV)),
            access_token: keep(vertex.access_token)
                .or_else(|| env(VERTEX_ACCESS_TOKEN_ENV))
                .unwrap_or_default(),
        };

        Self {
            openai: (!openai.api_key.is_empty()).then_some(openai),
            vertex: (!vertex.project_id.is_empty() && !vertex.access_token.is_empty())
                .then_some(vertex),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: PictogramConfig = toml::from_str(
            r#"
            [resolver]
            strategies = ["pattern", "fallback"]

            [tracer]
            threshold = 100
            "#,
        )
        .unwrap();
        assert_eq!(
            config.resolver.strategies,
            vec![StrategyKind::Pattern, StrategyKind::Fallback]
        );
        assert_eq!(config.resolver.strategy_timeout_secs, 60);
        assert_eq!(config.resolver.max_alternatives, 3);
        assert_eq!(config.iconify.base_url, DEFAULT_ICONIFY_BASE_URL);
        assert_eq!(config.tracer.threshold, 100);
        assert_eq!(config.tracer.turd_size, 2);
        assert_eq!(config.tracer.endpoints.len(), 2);
        assert_eq!(config.generation.provider, GenerationProvider::Openai);
    }

    #[test]
    fn test_provider_parses_from_toml() {
        let config: PictogramConfig = toml::from_str(
            "[generation]\nprovider = \"vertex\"\ndefault_style = \"lucide\"\n",
        )
        .unwrap();
        assert_eq!(config.generation.provider, GenerationProvider::Vertex);
        assert_eq!(config.generation.default_style.as_deref(), Some("lucide"));
    }

    #[test]
    fn test_env_fills_missing_secrets() {
        let env: HashMap<&str, &str> = HashMap::from([
            (OPENAI_API_KEY_ENV, "sk-env"),
            (VERTEX_PROJECT_ID_ENV, "proj"),
            (VERTEX_ACCESS_TOKEN_ENV, "token"),
        ]);
        let secrets = SecretConfig::default().merge_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(secrets.openai.unwrap().api_key, "sk-env");
        let vertex = secrets.vertex.unwrap();
        assert_eq!(vertex.project_id, "proj");
        assert_eq!(vertex.location_or_default(), DEFAULT_VERTEX_LOCATION);
    }

    #[test]
    fn test_file_values_win_over_env() {
        let file: SecretConfig =
            serde_json::from_str(r#"{"openai": {"api_key": "sk-file", "model_name": "dall-e-3"}}"#)
                .unwrap();
        let secrets = file.merge_env(|k| (k == OPENAI_API_KEY_ENV).then(|| "sk-env".to_string()));
        let openai = secrets.openai.unwrap();
        assert_eq!(openai.api_key, "sk-file");
        assert_eq!(openai.model_name.as_deref(), Some("dall-e-3"));
        assert!(secrets.vertex.is_none());
    }

    #[test]
    fn test_incomplete_sections_are_dropped() {
        let file: SecretConfig =
            serde_json::from_str(r#"{"openai": {"api_key": "  "}, "vertex": {"project_id": "p", "access_token": ""}}"#)
                .unwrap();
        let secrets = file.merge_env(|_| None);
        assert!(secrets.openai.is_none());
        assert!(secrets.vertex.is_none());
    }
}
