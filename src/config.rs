use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::heuristics::{self, HeuristicErr};
use crate::Board;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Custom,
    Xsb,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeamConfig {
    /// How many nodes survive each iteration.
    pub beam_width: usize,
    /// Hard limit on iterations.
    pub max_steps: usize,
    /// Iterations without improving the best score before restarting from the initial state.
    pub restart_threshold: usize,
    /// Relative magnitude of the noise added to heuristic scores, `h * U(-r, r)`.
    pub randomness_factor: f64,
    pub seed: u64,
}

impl Default for BeamConfig {
    fn default() -> Self {
        BeamConfig {
            beam_width: 450,
            max_steps: 1000,
            restart_threshold: 15,
            randomness_factor: 0.3,
            seed: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LrtaConfig {
    /// Moves per trial.
    pub max_steps: usize,
    /// Number of trials.
    pub max_restarts: usize,
}

impl Default for LrtaConfig {
    fn default() -> Self {
        LrtaConfig {
            max_steps: 1000,
            max_restarts: 1000,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Method {
    BeamSearch(BeamConfig),
    LrtaStar(LrtaConfig),
}

impl Method {
    pub fn beam_search() -> Self {
        Method::BeamSearch(BeamConfig::default())
    }

    pub fn lrta_star() -> Self {
        Method::LrtaStar(LrtaConfig::default())
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Method::BeamSearch(_) => write!(f, "beam-search"),
            Method::LrtaStar(_) => write!(f, "lrta-star"),
        }
    }
}

/// Parses just the algorithm, configuration is default.
impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beam" | "beam-search" => Ok(Method::beam_search()),
            "lrta" | "lrta-star" => Ok(Method::lrta_star()),
            _ => Err(format!("Unknown method: {}", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeuristicKind {
    Displaced,
    Manhattan,
    Euclidean,
    Hungarian,
    Improved,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 5] = [
        HeuristicKind::Displaced,
        HeuristicKind::Manhattan,
        HeuristicKind::Euclidean,
        HeuristicKind::Hungarian,
        HeuristicKind::Improved,
    ];

    /// Whether this heuristic can be used on the board at all.
    pub fn check<B: Board + ?Sized>(self, board: &B) -> Result<(), HeuristicErr> {
        match self {
            HeuristicKind::Hungarian => heuristics::check_dimensions(board),
            _ => Ok(()),
        }
    }

    /// Panics on boards rejected by `check`.
    pub fn evaluate<B: Board + ?Sized>(self, board: &B) -> f64 {
        match self {
            HeuristicKind::Displaced => heuristics::heur_displaced(board),
            HeuristicKind::Manhattan => heuristics::heur_manhattan_distance(board),
            HeuristicKind::Euclidean => heuristics::heur_euclidean_distance(board),
            HeuristicKind::Hungarian => heuristics::heur_hungarian(board),
            HeuristicKind::Improved => heuristics::heur_improved(board),
        }
    }
}

impl Display for HeuristicKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            HeuristicKind::Displaced => write!(f, "displaced"),
            HeuristicKind::Manhattan => write!(f, "manhattan"),
            HeuristicKind::Euclidean => write!(f, "euclidean"),
            HeuristicKind::Hungarian => write!(f, "hungarian"),
            HeuristicKind::Improved => write!(f, "improved"),
        }
    }
}

impl FromStr for HeuristicKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeuristicKind::ALL
            .iter()
            .cloned()
            .find(|kind| kind.to_string() == s)
            .ok_or_else(|| format!("Unknown heuristic: {}", s))
    }
}
