use copysmith_engine::EngineError;
use copysmith_engine::content::{CompiledMarkers, MarkerSyntax};
use copysmith_engine::slash::{CommandAction, CommandCategory, SlashCommand, parse_invocation};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Shortcut {command}: {reason}")]
    InvalidShortcut { command: String, reason: String },

    #[error("Invalid marker syntax: {0}")]
    InvalidMarkers(#[from] EngineError),
}

/// A user-defined slash command as written in `[[shortcuts]]`.
///
/// Exactly one of `prompt` and `syntax` must be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutConfig {
    pub command: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
}

impl ShortcutConfig {
    fn invalid(&self, reason: &str) -> ConfigError {
        ConfigError::InvalidShortcut {
            command: self.command.clone(),
            reason: reason.to_string(),
        }
    }

    fn to_command(&self) -> Result<SlashCommand, ConfigError> {
        let token = match parse_invocation(&self.command) {
            Some(inv) if inv.args.is_empty() && inv.token == self.command.trim() => inv.token,
            _ => return Err(self.invalid("command must be a single /token")),
        };

        let action = match (&self.prompt, &self.syntax) {
            (Some(prompt), None) => CommandAction::Prompt(prompt.clone()),
            (None, Some(syntax)) => CommandAction::Insert {
                syntax: syntax.clone(),
            },
            (Some(_), Some(_)) => return Err(self.invalid("set either prompt or syntax, not both")),
            (None, None) => return Err(self.invalid("one of prompt or syntax is required")),
        };

        Ok(SlashCommand {
            id: format!("custom-{}", token.trim_start_matches('/').to_lowercase()),
            command: token.to_string(),
            label: self.label.clone(),
            description: self.description.clone(),
            category: CommandCategory::Custom,
            action,
            shortcut: self.shortcut.clone(),
        })
    }
}

/// Everything in `config.toml` is optional; an empty file is the default
/// configuration.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub markers: MarkerSyntax,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shortcuts: Vec<ShortcutConfig>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/copysmith");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Shortcuts as slash commands, in file order.
    pub fn user_commands(&self) -> Result<Vec<SlashCommand>, ConfigError> {
        self.shortcuts.iter().map(ShortcutConfig::to_command).collect()
    }

    pub fn compiled_markers(&self) -> Result<CompiledMarkers, ConfigError> {
        Ok(self.markers.compile()?)
    }
}
