use std::fs;

use clue_bot::EngineError;
use clue_replay::config::ScenarioConfig;
use clue_replay::replay::{ReplayRunner, RunnerError};
use tempfile::tempdir;

// Player 1 holds Scarlet, Rope and Hall; player 2 holds Kitchen; seat 0
// holds Plum and Knife. The solution is Mustard, Wrench, Library.
const SOLVABLE_SCRIPT: &str = r#"
  - event: next_question
    position: "Hall"
  - event: see_card
    card: "Scarlet"
    by: 1
  - event: see_no_card
    by: 2
  - event: choose_card_to_show
    cards: { figure: "Plum", weapon: "Rope", room: "Hall" }
  - event: observe_card_shown
    showing: 2
    seeing: 1
    cards: { figure: "Plum", weapon: "Knife", room: "Kitchen" }
  - event: observe_no_card_shown
    showing: 2
    seeing: 1
    cards: { figure: "Plum", weapon: "Knife", room: "Library" }
  - event: see_card
    card: "Rope"
    by: 1
  - event: check_eliminations
  - event: next_room
    possible: ["Kitchen", "Hall"]
  - event: next_question
    position: "Hall"
  - event: see_card
    card: "Hall"
    by: 1
  - event: next_question
    position: "Hall"
"#;

fn load_config(output_dir: &std::path::Path, script: &str) -> ScenarioConfig {
    let yaml = format!(
        r#"
run_id: "test_smoke"
seed: 4242
game:
  figures: ["Mustard", "Plum", "Scarlet"]
  weapons: ["Rope", "Knife", "Wrench"]
  rooms: ["Kitchen", "Library", "Hall"]
  players: 3
  me: 0
own_cards: ["Plum", "Knife"]
script:{script}
outputs:
  jsonl: "{jsonl}"
logging:
  enable_structured: false
"#,
        jsonl = output_dir.join("steps.jsonl").display(),
    );

    let mut cfg: ScenarioConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

fn read_rows(path: &std::path::Path) -> Vec<serde_json::Value> {
    fs::read_to_string(path)
        .expect("jsonl readable")
        .lines()
        .map(|line| serde_json::from_str(line).expect("row decodes to JSON"))
        .collect()
}

#[test]
fn replay_reaches_an_accusation() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), SOLVABLE_SCRIPT);
    let outputs = config.resolved_outputs();

    let runner = ReplayRunner::new(config, outputs).expect("runner created");
    let summary = runner.run().expect("replay completes");

    assert_eq!(summary.steps, 12);
    assert_eq!(summary.rows_written, 12);
    assert!(summary.accused);
    assert_eq!(
        summary.solution,
        Some([
            "Mustard".to_string(),
            "Wrench".to_string(),
            "Library".to_string()
        ])
    );

    let rows = read_rows(&summary.jsonl_path);
    assert_eq!(rows.len(), 12);
    assert!(rows.iter().all(|row| row["run_id"] == "test_smoke"));
    assert!(rows.iter().all(|row| row.get("error").is_none()));

    assert_eq!(rows[3]["decision"]["kind"], "show");
    assert_eq!(rows[3]["decision"]["card"], "Plum");

    assert_eq!(rows[4]["knowledge"]["unknown_rooms"], serde_json::json!(["Library", "Hall"]));

    assert_eq!(rows[7]["decision"]["kind"], "eliminated");
    assert_eq!(rows[7]["decision"]["cards"], serde_json::json!([]));

    assert_eq!(rows[8]["decision"]["room"], "Hall");

    let question = &rows[9]["decision"];
    assert_eq!(question["kind"], "question");
    assert_eq!(question["accusation"], false);
    assert_eq!(question["figure"], "Mustard");
    assert_eq!(question["weapon"], "Wrench");
    assert_eq!(question["room"], "Hall");

    assert_eq!(rows[10]["knowledge"]["solved"], true);

    let accusation = &rows[11]["decision"];
    assert_eq!(accusation["accusation"], true);
    assert_eq!(accusation["figure"], "Mustard");
    assert_eq!(accusation["weapon"], "Wrench");
    assert_eq!(accusation["room"], "Library");
}

#[test]
fn rejected_step_is_logged_before_failing() {
    let dir = tempdir().expect("temp dir");
    // Nobody has asked anything yet, so there is no question to answer.
    let script = r#"
  - event: see_card
    card: "Scarlet"
    by: 1
  - event: see_no_card
    by: 2
  - event: check_eliminations
"#;
    let config = load_config(dir.path(), script);
    let outputs = config.resolved_outputs();
    let jsonl = outputs.jsonl.clone();

    let runner = ReplayRunner::new(config, outputs).expect("runner created");
    let err = runner.run().expect_err("see_no_card without a question fails");
    assert!(matches!(
        err,
        RunnerError::Engine {
            step: 1,
            event: "see_no_card",
            source: EngineError::NoCurrentQuestion,
        }
    ));

    let rows = read_rows(&jsonl);
    assert_eq!(rows.len(), 2);
    assert!(rows[0].get("error").is_none());
    assert!(rows[1]["error"].is_string());
    assert_eq!(
        rows[1]["knowledge"]["unknown_figures"],
        serde_json::json!(["Mustard"])
    );
}
