use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clue_bot::{BeliefEngine, Detective, EngineError};
use clue_core::game::GameSetup;
use clue_core::knowledge::KnowledgeSnapshot;
use clue_core::model::card::Card;
use clue_core::model::catalog::CardCatalog;
use clue_core::model::category::Category;
use clue_core::model::player::PlayerId;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{ResolvedOutputs, ScenarioConfig, ScriptStep};

/// Feeds a recorded transcript to a belief engine, one event at a time.
pub struct ReplayRunner {
    config: ScenarioConfig,
    outputs: ResolvedOutputs,
    setup: GameSetup,
}

/// Summary details returned after a run.
#[derive(Debug)]
pub struct RunSummary {
    pub steps: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    /// Solved triple, or the triple accused if the script reached an accusation.
    pub solution: Option<[String; 3]>,
    pub accused: bool,
    pub knowledge: KnowledgeSnapshot,
}

/// Decision returned by the engine for a step, with card names resolved.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decision {
    Room {
        room: String,
    },
    Question {
        accusation: bool,
        figure: String,
        weapon: String,
        room: String,
    },
    Show {
        card: Option<String>,
    },
    Eliminated {
        cards: Vec<String>,
    },
}

#[derive(Debug, Serialize)]
struct StepRow<'a> {
    run_id: &'a str,
    step: usize,
    event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    decision: Option<Decision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    knowledge: &'a KnowledgeSnapshot,
}

impl ReplayRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: ScenarioConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let setup = config
            .game
            .setup()
            .map_err(|err| RunnerError::Setup {
                message: err.to_string(),
            })?;
        Ok(Self {
            config,
            outputs,
            setup,
        })
    }

    /// Replays the script, streaming one JSONL row per step to disk.
    ///
    /// Stops at the first step the engine rejects; that step is still logged
    /// with its error before the run fails.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);

        let mut engine = BeliefEngine::attach_with_seed(
            &self.setup,
            self.config.game.me(),
            self.config.features.into(),
            self.config.seed.unwrap_or(0),
        )
        .map_err(|source| RunnerError::engine(0, "attach", source))?;
        let catalog = engine.catalog().clone();

        for name in &self.config.own_cards {
            catalog
                .card(name)
                .map_err(EngineError::from)
                .and_then(|card| engine.set_own_card(card))
                .map_err(|source| RunnerError::engine(0, "set_own_card", source))?;
        }

        let mut rows_written = 0usize;
        let mut accused: Option<[String; 3]> = None;
        for (index, step) in self.config.script.iter().enumerate() {
            let outcome = apply_step(&mut engine, &catalog, step);
            let knowledge = engine
                .snapshot()
                .map_err(|source| RunnerError::engine(index, step.name(), source))?;
            let (decision, error) = match &outcome {
                Ok(decision) => (decision.clone(), None),
                Err(err) => (None, Some(err.to_string())),
            };
            if let Some(Decision::Question {
                accusation: true,
                figure,
                weapon,
                room,
            }) = &decision
            {
                accused = Some([figure.clone(), weapon.clone(), room.clone()]);
            }
            log_step(&self.config.run_id, index, step, decision.as_ref(), error.as_deref());

            let row = StepRow {
                run_id: &self.config.run_id,
                step: index,
                event: step.name(),
                decision,
                error,
                knowledge: &knowledge,
            };
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
            rows_written += 1;

            if let Err(source) = outcome {
                writer.flush()?;
                return Err(RunnerError::engine(index, step.name(), source));
            }
        }
        writer.flush()?;

        let accused_flag = accused.is_some();
        // Accusing consumes the candidate sets, so fall back to the accused triple.
        let solution = engine
            .solution()
            .map(|suggestion| {
                let [figure, weapon, room] = suggestion.cards();
                Ok::<_, EngineError>([
                    card_name(&catalog, figure)?,
                    card_name(&catalog, weapon)?,
                    card_name(&catalog, room)?,
                ])
            })
            .transpose()
            .map_err(|source| RunnerError::engine(rows_written, "solution", source))?
            .or(accused);
        let knowledge = engine
            .snapshot()
            .map_err(|source| RunnerError::engine(rows_written, "snapshot", source))?;

        Ok(RunSummary {
            steps: self.config.script.len(),
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            accused: accused_flag,
            solution,
            knowledge,
        })
    }
}

fn apply_step<R: Rng>(
    engine: &mut BeliefEngine<R>,
    catalog: &CardCatalog,
    step: &ScriptStep,
) -> Result<Option<Decision>, EngineError> {
    match step {
        ScriptStep::NextRoom { possible } => {
            let rooms = possible
                .iter()
                .map(|name| catalog.card_in(name, Category::Room))
                .collect::<Result<Vec<_>, _>>()?;
            let room = engine.next_room(&rooms)?;
            Ok(Some(Decision::Room {
                room: card_name(catalog, room)?,
            }))
        }
        ScriptStep::NextQuestion { position } => {
            let position = catalog.card_in(position, Category::Room)?;
            let question = engine.next_question(position)?;
            let suggestion = question.suggestion();
            Ok(Some(Decision::Question {
                accusation: question.is_accusation(),
                figure: card_name(catalog, suggestion.figure)?,
                weapon: card_name(catalog, suggestion.weapon)?,
                room: card_name(catalog, suggestion.room)?,
            }))
        }
        ScriptStep::ChooseCardToShow { cards } => {
            let queried = cards.resolve(catalog)?;
            let shown = engine.choose_card_to_show(&queried)?;
            Ok(Some(Decision::Show {
                card: shown.map(|card| card_name(catalog, card)).transpose()?,
            }))
        }
        ScriptStep::SeeCard { card, by } => {
            engine.see_card(catalog.card(card)?, PlayerId(*by))?;
            Ok(None)
        }
        ScriptStep::SeeNoCard { by } => {
            engine.see_no_card(PlayerId(*by))?;
            Ok(None)
        }
        ScriptStep::SeeNoCardFromNobody => {
            engine.see_no_card_from_nobody()?;
            Ok(None)
        }
        ScriptStep::ObserveCardShown {
            showing,
            seeing,
            cards,
        } => {
            let queried = cards.resolve(catalog)?;
            engine.observe_card_shown(PlayerId(*showing), PlayerId(*seeing), &queried)?;
            Ok(None)
        }
        ScriptStep::ObserveNoCardShown {
            showing,
            seeing,
            cards,
        } => {
            let queried = cards.resolve(catalog)?;
            engine.observe_no_card_shown(PlayerId(*showing), PlayerId(*seeing), &queried)?;
            Ok(None)
        }
        ScriptStep::ObserveNoCardFromNobody { seeing, cards } => {
            let queried = cards.resolve(catalog)?;
            engine.observe_no_card_from_nobody(PlayerId(*seeing), &queried)?;
            Ok(None)
        }
        ScriptStep::CheckEliminations => {
            let cards = engine
                .check_if_nobody_has_card()?
                .into_iter()
                .map(|card| card_name(catalog, card))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Some(Decision::Eliminated { cards }))
        }
    }
}

fn card_name(catalog: &CardCatalog, card: Card) -> Result<String, EngineError> {
    Ok(catalog.name(card)?.to_string())
}

fn log_step(
    run_id: &str,
    index: usize,
    step: &ScriptStep,
    decision: Option<&Decision>,
    error: Option<&str>,
) {
    if let Some(error) = error {
        event!(
            target: "clue_replay::step",
            Level::WARN,
            run_id,
            step = index,
            event = step.name(),
            error,
        );
        return;
    }
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    event!(
        target: "clue_replay::step",
        Level::DEBUG,
        run_id,
        step = index,
        event = step.name(),
        decision = ?decision,
    );
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize step row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("scenario setup failed: {message}")]
    Setup { message: String },
    #[error("step {step} ({event}) rejected by the engine: {source}")]
    Engine {
        step: usize,
        event: &'static str,
        #[source]
        source: EngineError,
    },
}

impl RunnerError {
    fn engine(step: usize, event: &'static str, source: EngineError) -> Self {
        RunnerError::Engine {
            step,
            event,
            source,
        }
    }
}
