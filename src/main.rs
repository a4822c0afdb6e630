//! Diagnostic CLI (ambient stack, spec §6's "CLI/packaging/logging: out of
//! scope" reserves only the core; this binary is the external collaborator
//! surface the spec carves out). Grounded on the teacher's small diagnostic
//! binaries built directly on its library crate: parses a JSON-encoded toy
//! search problem and runs A*, reporting the resulting plan.
//!
//! Parsing real PDDL is out of scope (spec §6: the translator layer accepts
//! an already-typed AST); this toy format lets the search kernel run
//! end-to-end without a parser front-end.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use mimir_planning::search::{astar, EventOutcome, GoalStrategy, Heuristic, NullEventHandler, PruningStrategy, SearchStatus, StateId, SuccessorGenerator};
use mimir_planning::Config;

#[derive(Parser, Debug)]
#[command(name = "mimir", about = "Run A* over a JSON-encoded toy search problem")]
struct Cli {
    /// Path to the toy problem JSON file.
    problem: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ToyEdge {
    action: String,
    target: StateId,
    cost: u64,
}

#[derive(Debug, Deserialize)]
struct ToyProblem {
    start: StateId,
    goal: StateId,
    /// Per-state outgoing edges; states with no entry have no successors.
    edges: HashMap<StateId, Vec<ToyEdge>>,
    /// Admissible heuristic estimate per state; states with no entry use 0
    /// (blind search).
    #[serde(default)]
    heuristic: HashMap<StateId, u64>,
}

struct ToyGenerator<'a> {
    problem: &'a ToyProblem,
    action_names: Vec<String>,
}

impl<'a> SuccessorGenerator for ToyGenerator<'a> {
    fn successors(&mut self, state: StateId) -> Vec<(usize, StateId, u64)> {
        let Some(edges) = self.problem.edges.get(&state) else {
            return Vec::new();
        };
        edges
            .iter()
            .map(|edge| {
                let action_id = self.action_names.len();
                self.action_names.push(edge.action.clone());
                (action_id, edge.target, edge.cost)
            })
            .collect()
    }
}

struct ToyHeuristic<'a>(&'a ToyProblem);
impl<'a> Heuristic for ToyHeuristic<'a> {
    fn estimate(&mut self, state: StateId) -> Option<u64> {
        Some(*self.0.heuristic.get(&state).unwrap_or(&0))
    }
}

struct ToyGoal(StateId);
impl GoalStrategy for ToyGoal {
    fn is_goal(&self, state: StateId) -> bool {
        state == self.0
    }
}

struct NoPruning;
impl PruningStrategy for NoPruning {}

struct LoggingEvents;
impl mimir_planning::search::EventHandler for LoggingEvents {
    fn on_expand(&mut self, state: StateId) -> EventOutcome {
        tracing::debug!(state, "expanding");
        EventOutcome::Continue
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    tracing_subscriber::fmt().with_env_filter(&config.logging.filter).init();

    let cli = Cli::parse();
    let raw = std::fs::read_to_string(&cli.problem)?;
    let problem: ToyProblem = serde_json::from_str(&raw)?;

    let mut generator = ToyGenerator { problem: &problem, action_names: Vec::new() };
    let mut heuristic = ToyHeuristic(&problem);
    let goal = ToyGoal(problem.goal);
    let mut pruning = NoPruning;
    let mut events = LoggingEvents;

    let result = astar(problem.start, &mut generator, &mut heuristic, &goal, &mut pruning, &mut events);

    match result.status {
        SearchStatus::Solved => {
            let plan: Vec<&str> = result.plan.iter().map(|&id| generator.action_names[id].as_str()).collect();
            println!("{}", serde_json::json!({ "status": "solved", "plan": plan, "cost": result.cost }));
        }
        other => {
            println!("{}", serde_json::json!({ "status": format!("{other:?}") }));
        }
    }

    let _ = NullEventHandler;
    Ok(())
}
