//! Gobang move engine CLI
//!
//! Reads one JSON move request from stdin and writes one JSON response to
//! stdout:
//!
//! ```text
//! {"board": [[null, "black", ...], ...], "player": "white", "difficulty": "hard"}
//! {"row": 9, "col": 10, "searchType": "alphaBeta", "score": 1234.0}
//! ```
//!
//! `player` defaults to the side inferred from stone counts. `options`
//! replaces the difficulty preset when both are given.

use std::io::{self, Read};
use std::process::ExitCode;

use gobang::{Board, Difficulty, Engine, EngineError, Player, SearchOptions, SearchType};
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveRequest {
    board: Board,
    player: Option<Player>,
    difficulty: Option<Difficulty>,
    options: Option<SearchOptions>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MoveResponse {
    #[serde(rename_all = "camelCase")]
    Move {
        row: Option<u8>,
        col: Option<u8>,
        search_type: SearchType,
        score: f64,
    },
    Error {
        error: String,
    },
}

#[derive(Debug, Error)]
enum RequestError {
    #[error("failed to read request: {0}")]
    Io(#[from] io::Error),
    #[error("malformed request: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

fn handle(input: &str) -> Result<MoveResponse, RequestError> {
    let request: MoveRequest = serde_json::from_str(input)?;
    let player = request
        .player
        .unwrap_or_else(|| request.board.side_to_move());
    let options = match (request.options, request.difficulty) {
        (Some(options), _) => options,
        (None, Some(difficulty)) => difficulty.options(),
        (None, None) => SearchOptions::default(),
    };

    let mut engine = Engine::with_options(options)?;
    let result = engine.select_move_with_stats(&request.board, player);
    Ok(MoveResponse::Move {
        row: result.best_move.map(|p| p.row),
        col: result.best_move.map(|p| p.col),
        search_type: result.search_type,
        score: result.score,
    })
}

fn run() -> Result<MoveResponse, RequestError> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    handle(&input)
}

fn main() -> ExitCode {
    let (response, code) = match run() {
        Ok(response) => (response, ExitCode::SUCCESS),
        Err(err) => {
            warn!("rejected request: {err}");
            (
                MoveResponse::Error {
                    error: err.to_string(),
                },
                ExitCode::FAILURE,
            )
        }
    };

    match serde_json::to_string(&response) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("failed to encode response: {err}");
            return ExitCode::FAILURE;
        }
    }
    code
}
