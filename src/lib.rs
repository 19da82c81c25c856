// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]

pub mod config;
pub mod data;
pub mod heuristics;
pub mod level;
pub mod map;
pub mod map_formatter;
pub mod solver;
pub mod state;

mod fs;
mod parser;
mod vec2d;

use std::error::Error;
use std::fmt::Debug;
use std::hash::Hash;

use crate::config::{HeuristicKind, Method};
use crate::data::Pos;
use crate::level::Level;
use crate::solver::{SolverErr, SolverOk};

pub use crate::parser::ParserErr;

/// Read-only view of a board used by heuristics and deadlock checks.
///
/// Positions outside `0..length` rows and `0..width` columns are out of bounds.
pub trait Board {
    fn boxes(&self) -> &[Pos];

    fn targets(&self) -> &[Pos];

    fn is_obstacle(&self, pos: Pos) -> bool;

    fn width(&self) -> i32;

    fn length(&self) -> i32;

    fn has_box(&self, pos: Pos) -> bool {
        self.boxes().contains(&pos)
    }

    fn is_target(&self, pos: Pos) -> bool {
        self.targets().contains(&pos)
    }

    fn in_bounds(&self, pos: Pos) -> bool {
        pos.r >= 0 && pos.r < self.length() && pos.c >= 0 && pos.c < self.width()
    }
}

/// What the solvers need from a state.
pub trait Puzzle: Board + Clone {
    /// Identifies equal states, used for visited sets and learned costs.
    type Key: Clone + Eq + Hash + Ord + Debug;

    fn is_solved(&self) -> bool;

    /// All states reachable with one move, always in the same order.
    fn neighbors(&self) -> Vec<Self>;

    fn key(&self) -> Self::Key;
}

pub trait LoadLevel {
    fn load_level(&self) -> Result<Level, Box<dyn Error>>;
}

pub trait Solve {
    fn solve(&self, method: Method, heuristic: HeuristicKind)
        -> Result<SolverOk<Level>, SolverErr>;
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::config::{BeamConfig, LrtaConfig};

    #[test]
    fn test_levels() {
        let levels = [
            ("levels/01-one-way.txt", Method::beam_search(), HeuristicKind::Manhattan),
            ("levels/01-one-way.txt", Method::lrta_star(), HeuristicKind::Displaced),
            ("levels/02-two-corridors.txt", Method::lrta_star(), HeuristicKind::Hungarian),
            ("levels/03-two-boxes.txt", Method::beam_search(), HeuristicKind::Improved),
            ("levels/03-two-boxes.txt", Method::beam_search(), HeuristicKind::Euclidean),
            ("levels/04-room.txt", Method::beam_search(), HeuristicKind::Hungarian),
        ];

        for &(level_path, method, heuristic) in &levels {
            let level = level_path.load_level().unwrap();
            let solution = level.solve(method, heuristic).unwrap();
            assert!(
                solution.is_solved(),
                "{} not solved using {} with {}",
                level_path,
                method,
                heuristic
            );
        }
    }

    #[test]
    fn unsolvable_level_is_not_an_error() {
        let level = "levels/05-no-solution.txt".load_level().unwrap();

        let method = Method::BeamSearch(BeamConfig {
            max_steps: 50,
            ..BeamConfig::default()
        });
        let solution = level.solve(method, HeuristicKind::Improved).unwrap();
        assert!(!solution.is_solved());
        assert_eq!(solution.path[0], level);

        let method = Method::LrtaStar(LrtaConfig {
            max_steps: 50,
            max_restarts: 10,
        });
        let solution = level.solve(method, HeuristicKind::Manhattan).unwrap();
        assert!(!solution.is_solved());
        assert_eq!(solution.stats.trials(), 10);
    }

    #[test]
    fn independent_solvers_in_threads() {
        let level = "levels/03-two-boxes.txt".load_level().unwrap();
        let expected = level
            .solve(Method::beam_search(), HeuristicKind::Manhattan)
            .unwrap();

        let threads: Vec<_> = (0..4)
            .map(|_| {
                let level = level.clone();
                thread::spawn(move || {
                    level
                        .solve(Method::beam_search(), HeuristicKind::Manhattan)
                        .unwrap()
                })
            })
            .collect();
        for t in threads {
            assert_eq!(t.join().unwrap(), expected);
        }
    }
}
