//! Estimates of the remaining cost - less is better.
//!
//! All heuristics only read the board and never return a negative number.
//! Nearest-target heuristics return infinity when there are boxes but no targets at all.

mod assignment;
pub mod deadlock;

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use crate::data::Pos;
use crate::Board;

use self::assignment::min_cost_assignment;
use self::deadlock::box_unpushable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicErr {
    DimensionMismatch { boxes: usize, targets: usize },
}

impl Display for HeuristicErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            HeuristicErr::DimensionMismatch { boxes, targets } => write!(
                f,
                "Dimension mismatch - {} boxes but {} targets, can't assign boxes to targets",
                boxes, targets
            ),
        }
    }
}

impl Error for HeuristicErr {}

/// Number of boxes not on a target.
pub fn heur_displaced<B: Board + ?Sized>(board: &B) -> f64 {
    board
        .boxes()
        .iter()
        .filter(|&&box_pos| !board.is_target(box_pos))
        .count() as f64
}

/// Sum of Manhattan distances of each box to its closest target.
///
/// Several boxes can pick the same target so this is weaker than `heur_hungarian`.
pub fn heur_manhattan_distance<B: Board + ?Sized>(board: &B) -> f64 {
    board
        .boxes()
        .iter()
        .map(|&box_pos| nearest_target(board, box_pos))
        .sum()
}

/// Sum of Euclidean distances of each box to its closest target.
pub fn heur_euclidean_distance<B: Board + ?Sized>(board: &B) -> f64 {
    board
        .boxes()
        .iter()
        .map(|&box_pos| {
            board
                .targets()
                .iter()
                .map(|&target| box_pos.euclidean(target))
                .fold(std::f64::INFINITY, f64::min)
        })
        .sum()
}

/// Minimum total Manhattan distance over all one-to-one assignments of boxes to targets.
///
/// # Panics
///
/// When the number of boxes and targets differs - use `assignment_cost` or
/// `HeuristicKind::check` to find out beforehand.
pub fn heur_hungarian<B: Board + ?Sized>(board: &B) -> f64 {
    match assignment_cost(board.boxes(), board.targets()) {
        Ok(cost) => cost,
        Err(err) => panic!("{}", err),
    }
}

/// Fallible version of `heur_hungarian`.
pub fn assignment_cost(boxes: &[Pos], targets: &[Pos]) -> Result<f64, HeuristicErr> {
    if boxes.len() != targets.len() {
        return Err(HeuristicErr::DimensionMismatch {
            boxes: boxes.len(),
            targets: targets.len(),
        });
    }

    let costs: Vec<Vec<i64>> = boxes
        .iter()
        .map(|&box_pos| {
            targets
                .iter()
                .map(|&target| i64::from(box_pos.manhattan(target)))
                .collect()
        })
        .collect();
    let (total, _) = min_cost_assignment(&costs);
    Ok(total as f64)
}

pub(crate) fn check_dimensions<B: Board + ?Sized>(board: &B) -> Result<(), HeuristicErr> {
    assignment_cost(board.boxes(), board.targets()).map(|_| ())
}

/// Manhattan distance of boxes not on a target, infinity if one of them can never be pushed again.
pub fn heur_improved<B: Board + ?Sized>(board: &B) -> f64 {
    let mut total = 0.0;

    for &box_pos in board.boxes() {
        if board.is_target(box_pos) {
            continue;
        }

        if box_unpushable(board, box_pos) {
            return std::f64::INFINITY;
        }

        total += nearest_target(board, box_pos);
    }

    total
}

fn nearest_target<B: Board + ?Sized>(board: &B, box_pos: Pos) -> f64 {
    board
        .targets()
        .iter()
        .map(|&target| box_pos.manhattan(target))
        .min()
        .map_or(std::f64::INFINITY, f64::from)
}
