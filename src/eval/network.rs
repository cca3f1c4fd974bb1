//! Fixed-weight two-layer scorer over per-axis line features
//!
//! Each axis contributes three inputs for a side: normalized run length,
//! normalized open ends, and a flag for runs of four or more. A small ReLU
//! layer maps them to a per-axis value; own and opponent values are summed.
//! The weights are constants. Nothing here is trained.

use crate::board::{Board, Player, Pos};

use super::heuristic::center_bonus;
use super::scan::{scan_all, LineScan};

const INPUTS: usize = 3;
const HIDDEN: usize = 4;

/// Non-negative weights keep the output monotone in every feature.
const HIDDEN_WEIGHTS: [[f64; INPUTS]; HIDDEN] = [
    [2.0, 0.5, 0.0],
    [1.0, 1.5, 0.0],
    [3.0, 2.0, 0.0],
    [0.0, 0.0, 4.0],
];
const HIDDEN_BIAS: [f64; HIDDEN] = [0.0, -0.5, -2.5, 0.0];
const OUTPUT_WEIGHTS: [f64; HIDDEN] = [1.0, 0.5, 3.0, 2.0];

/// Weight of the opponent's features (blocking value)
const DEFENSE_FACTOR: f64 = 0.8;
/// Maps network units onto the move-score scale
const OUTPUT_SCALE: f64 = 1_000.0;

fn features(scan: LineScan) -> [f64; INPUTS] {
    [
        (f64::from(scan.length) / 5.0).min(1.0),
        f64::from(scan.open_ends()) / 2.0,
        if scan.length >= 4 { 1.0 } else { 0.0 },
    ]
}

/// Forward pass for one axis.
fn forward(input: [f64; INPUTS]) -> f64 {
    HIDDEN_WEIGHTS
        .iter()
        .zip(HIDDEN_BIAS)
        .zip(OUTPUT_WEIGHTS)
        .map(|((weights, bias), out)| {
            let z: f64 = weights.iter().zip(input).map(|(w, x)| w * x).sum::<f64>() + bias;
            out * z.max(0.0)
        })
        .sum()
}

fn side_value(board: &Board, pos: Pos, player: Player) -> f64 {
    scan_all(board, pos, player)
        .into_iter()
        .map(|scan| forward(features(scan)))
        .sum()
}

/// Non-terminal network score for `player` playing `pos`.
pub fn network_terms(board: &Board, pos: Pos, player: Player) -> f64 {
    let own = side_value(board, pos, player);
    let block = side_value(board, pos, player.opponent());
    (own + DEFENSE_FACTOR * block) * OUTPUT_SCALE + center_bonus(pos)
}
