use clue_bot::EngineFeatures;
use clue_core::game::{GameSetup, GameView};
use clue_core::model::catalog::CardCatalog;
use clue_core::model::category::Category;
use clue_core::model::player::PlayerId;
use clue_core::model::question::Suggestion;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const MIN_PLAYERS: u8 = 2;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root replay scenario loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScenarioConfig {
    pub run_id: String,
    #[serde(default)]
    pub seed: Option<u64>,
    pub game: GameConfig,
    #[serde(default)]
    pub own_cards: Vec<String>,
    #[serde(default)]
    pub features: FeaturesConfig,
    pub script: Vec<ScriptStep>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ScenarioConfig {
    /// Load a scenario from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: ScenarioConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the scenario without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        let setup = self.game.setup()?;
        let catalog = setup.catalog();
        for (index, name) in self.own_cards.iter().enumerate() {
            catalog.card(name).map_err(|err| {
                ValidationError::invalid(format!("own_cards[{index}]"), err.to_string())
            })?;
        }
        if self.script.is_empty() {
            return Err(ValidationError::invalid(
                "script",
                "at least one event must be specified",
            ));
        }
        for (index, step) in self.script.iter().enumerate() {
            step.validate(catalog, self.game.players)
                .map_err(|message| ValidationError::invalid(format!("script[{index}]"), message))?;
        }
        self.outputs.validate()?;
        self.logging.normalize();
        if self.logging.level().is_none() {
            return Err(ValidationError::invalid(
                "logging.tracing_level",
                format!("unknown level '{}'", self.logging.tracing_level),
            ));
        }
        Ok(())
    }

    /// Resolve output templates (e.g., `{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
        }
    }
}

/// Card universe and roster of the recorded game.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GameConfig {
    pub figures: Vec<String>,
    pub weapons: Vec<String>,
    pub rooms: Vec<String>,
    pub players: u8,
    #[serde(default)]
    pub me: u8,
}

impl GameConfig {
    /// Builds the game reference handed to the engine.
    pub fn setup(&self) -> Result<GameSetup, ValidationError> {
        if self.players < MIN_PLAYERS {
            return Err(ValidationError::invalid(
                "game.players",
                format!("at least {MIN_PLAYERS} players are required"),
            ));
        }
        if self.me >= self.players {
            return Err(ValidationError::invalid(
                "game.me",
                format!("player {} is outside a roster of {}", self.me, self.players),
            ));
        }
        let catalog = CardCatalog::new(
            self.figures.as_slice(),
            self.weapons.as_slice(),
            self.rooms.as_slice(),
        )
        .map_err(|err| ValidationError::invalid("game", err.to_string()))?;
        Ok(GameSetup::with_player_count(catalog, self.players))
    }

    pub fn me(&self) -> PlayerId {
        PlayerId(self.me)
    }
}

/// Engine toggles; mirrors the `CLUE_*` environment switches.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct FeaturesConfig {
    #[serde(default)]
    pub observe_nobody: bool,
    #[serde(default)]
    pub decision_details: bool,
}

impl From<FeaturesConfig> for EngineFeatures {
    fn from(value: FeaturesConfig) -> Self {
        EngineFeatures::new(value.observe_nobody, value.decision_details)
    }
}

/// Three card names named together in a recorded query.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct QueriedCards {
    pub figure: String,
    pub weapon: String,
    pub room: String,
}

impl QueriedCards {
    pub fn resolve(&self, catalog: &CardCatalog) -> Result<Suggestion, clue_core::KnowledgeError> {
        Suggestion::from_names(catalog, &self.figure, &self.weapon, &self.room)
    }
}

/// One recorded game event relayed to the engine.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptStep {
    NextRoom { possible: Vec<String> },
    NextQuestion { position: String },
    ChooseCardToShow { cards: QueriedCards },
    SeeCard { card: String, by: u8 },
    SeeNoCard { by: u8 },
    SeeNoCardFromNobody,
    ObserveCardShown { showing: u8, seeing: u8, cards: QueriedCards },
    ObserveNoCardShown { showing: u8, seeing: u8, cards: QueriedCards },
    ObserveNoCardFromNobody { seeing: u8, cards: QueriedCards },
    CheckEliminations,
}

impl ScriptStep {
    pub fn name(&self) -> &'static str {
        match self {
            ScriptStep::NextRoom { .. } => "next_room",
            ScriptStep::NextQuestion { .. } => "next_question",
            ScriptStep::ChooseCardToShow { .. } => "choose_card_to_show",
            ScriptStep::SeeCard { .. } => "see_card",
            ScriptStep::SeeNoCard { .. } => "see_no_card",
            ScriptStep::SeeNoCardFromNobody => "see_no_card_from_nobody",
            ScriptStep::ObserveCardShown { .. } => "observe_card_shown",
            ScriptStep::ObserveNoCardShown { .. } => "observe_no_card_shown",
            ScriptStep::ObserveNoCardFromNobody { .. } => "observe_no_card_from_nobody",
            ScriptStep::CheckEliminations => "check_eliminations",
        }
    }

    fn validate(&self, catalog: &CardCatalog, players: u8) -> Result<(), String> {
        let player = |index: u8| {
            if index < players {
                Ok(())
            } else {
                Err(format!("player {index} is outside a roster of {players}"))
            }
        };
        let room = |name: &str| {
            catalog
                .card_in(name, Category::Room)
                .map(|_| ())
                .map_err(|err| err.to_string())
        };
        let cards = |queried: &QueriedCards| {
            queried
                .resolve(catalog)
                .map(|_| ())
                .map_err(|err| err.to_string())
        };
        match self {
            ScriptStep::NextRoom { possible } => {
                if possible.is_empty() {
                    return Err("next_room needs at least one possible room".to_string());
                }
                possible.iter().try_for_each(|name| room(name.as_str()))
            }
            ScriptStep::NextQuestion { position } => room(position.as_str()),
            ScriptStep::ChooseCardToShow { cards: queried } => cards(queried),
            ScriptStep::SeeCard { card, by } => {
                player(*by)?;
                catalog.card(card).map(|_| ()).map_err(|err| err.to_string())
            }
            ScriptStep::SeeNoCard { by } => player(*by),
            ScriptStep::SeeNoCardFromNobody | ScriptStep::CheckEliminations => Ok(()),
            ScriptStep::ObserveCardShown {
                showing,
                seeing,
                cards: queried,
            }
            | ScriptStep::ObserveNoCardShown {
                showing,
                seeing,
                cards: queried,
            } => {
                player(*showing)?;
                player(*seeing)?;
                cards(queried)
            }
            ScriptStep::ObserveNoCardFromNobody {
                seeing,
                cards: queried,
            } => {
                player(*seeing)?;
                cards(queried)
            }
        }
    }
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
}

impl OutputsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.jsonl.trim().is_empty() {
            return Err(ValidationError::invalid(
                "outputs.jsonl",
                "path must not be empty",
            ));
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::invalid(
            "run_id",
            "run_id must not be empty",
        ));
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::invalid(
            "run_id",
            "run_id may only contain alphanumeric characters, '.', '_' or '-'",
        ));
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

impl ValidationError {
    fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}
