pub mod beam_search;
pub mod lrta_star;

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use log::debug;
use separator::Separatable;

use crate::config::{HeuristicKind, Method};
use crate::heuristics::HeuristicErr;
use crate::level::Level;
use crate::{Puzzle, Solve};

pub use self::beam_search::BeamSearchSolver;
pub use self::lrta_star::{LearnedCosts, LrtaStarSolver};

/// A search algorithm bound to an initial state.
///
/// Solvers keep their own copy of the initial state.
/// `solve` always returns a non-empty path starting with that state.
/// If the last state isn't solved, the path is only the best effort the algorithm came up with
/// before running out of budget.
pub trait Solver<P: Puzzle> {
    fn solve<H>(&self, heuristic: H) -> SolverOk<P>
    where
        H: Fn(&P) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErr {
    Heuristic(HeuristicErr),
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::Heuristic(err) => write!(f, "Can't use the heuristic: {}", err),
        }
    }
}

impl Error for SolverErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SolverErr::Heuristic(err) => Some(err),
        }
    }
}

impl From<HeuristicErr> for SolverErr {
    fn from(err: HeuristicErr) -> Self {
        SolverErr::Heuristic(err)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverOk<P> {
    /// Number of successor states generated, over all restarts.
    pub expanded: usize,
    pub path: Vec<P>,
    pub stats: Stats,
}

impl<P: Puzzle> SolverOk<P> {
    pub(crate) fn new(expanded: usize, path: Vec<P>, stats: Stats) -> Self {
        debug_assert!(!path.is_empty(), "Path must contain at least the initial state");
        Self {
            expanded,
            path,
            stats,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.path.last().map_or(false, |state| state.is_solved())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    iterations: usize,
    restarts: usize,
    trials: usize,
    frontier_sizes: Vec<usize>,
    learned_states: usize,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Stats::default()
    }

    /// Beam search iterations or LRTA* moves.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Times beam search went back to the initial state.
    pub fn restarts(&self) -> usize {
        self.restarts
    }

    /// LRTA* trials started.
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Size of the beam at the start of each beam search iteration.
    pub fn frontier_sizes(&self) -> &[usize] {
        &self.frontier_sizes
    }

    /// Size of the LRTA* table at the end of search.
    pub fn learned_states(&self) -> usize {
        self.learned_states
    }

    pub(crate) fn add_iteration(&mut self) {
        self.iterations += 1;
    }

    pub(crate) fn add_frontier(&mut self, size: usize) {
        self.iterations += 1;
        self.frontier_sizes.push(size);
    }

    pub(crate) fn add_restart(&mut self) {
        self.restarts += 1;
    }

    pub(crate) fn add_trial(&mut self) {
        self.trials += 1;
    }

    pub(crate) fn set_learned_states(&mut self, count: usize) {
        self.learned_states = count;
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Iterations: {}", self.iterations.separated_string())?;
        if !self.frontier_sizes.is_empty() {
            let max = self.frontier_sizes.iter().max().cloned().unwrap_or(0);
            writeln!(f, "Restarts: {}", self.restarts.separated_string())?;
            writeln!(f, "Largest frontier: {}", max.separated_string())?;
        }
        if self.trials > 0 {
            writeln!(f, "Trials: {}", self.trials.separated_string())?;
            writeln!(f, "Learned estimates: {}", self.learned_states.separated_string())?;
        }
        Ok(())
    }
}

impl Solve for Level {
    fn solve(
        &self,
        method: Method,
        heuristic: HeuristicKind,
    ) -> Result<SolverOk<Level>, SolverErr> {
        heuristic.check(self)?;

        debug!("Solving using {} with the {} heuristic", method, heuristic);
        let evaluate = |level: &Level| heuristic.evaluate(level);
        let solution = match method {
            Method::BeamSearch(config) => BeamSearchSolver::new(self, config).solve(evaluate),
            Method::LrtaStar(config) => LrtaStarSolver::new(self, config).solve(evaluate),
        };
        debug!(
            "Search finished, solved: {}, expanded: {}",
            solution.is_solved(),
            solution.expanded
        );
        Ok(solution)
    }
}
