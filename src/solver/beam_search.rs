use fnv::FnvHashSet;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use typed_arena::Arena;

use crate::config::BeamConfig;
use crate::solver::{Solver, SolverOk, Stats};
use crate::Puzzle;

/// Everything reached during one `solve` call lives in an arena
/// so paths can share their prefixes.
struct PathNode<'a, P> {
    state: P,
    prev: Option<&'a PathNode<'a, P>>,
}

impl<'a, P: Clone> PathNode<'a, P> {
    fn path(&self) -> Vec<P> {
        let mut path = vec![self.state.clone()];
        let mut cur = self;
        while let Some(prev) = cur.prev {
            path.push(prev.state.clone());
            cur = prev;
        }
        path.reverse();
        path
    }
}

/// Beam search with noisy scores which goes back to the start when it stops making progress.
#[derive(Debug, Clone)]
pub struct BeamSearchSolver<P> {
    initial: P,
    config: BeamConfig,
    rng: StdRng,
}

impl<P: Puzzle> BeamSearchSolver<P> {
    pub fn new(initial: &P, config: BeamConfig) -> Self {
        BeamSearchSolver {
            initial: initial.clone(),
            config,
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    fn perturb(&self, rng: &mut StdRng, h: f64) -> f64 {
        let r = self.config.randomness_factor;
        if r <= 0.0 || !h.is_finite() {
            return h;
        }
        // `-r..=r` panics once `2 * r` overflows
        h + rng.gen_range(-1.0..=1.0) * r * h
    }
}

impl<P: Puzzle> Solver<P> for BeamSearchSolver<P> {
    fn solve<H>(&self, heuristic: H) -> SolverOk<P>
    where
        H: Fn(&P) -> f64,
    {
        // every call starts from the same generator state
        let mut rng = self.rng.clone();
        let mut stats = Stats::new();
        let mut expanded = 0;

        let arena = Arena::new();
        let root: &PathNode<'_, P> = arena.alloc(PathNode {
            state: self.initial.clone(),
            prev: None,
        });
        let initial_h = heuristic(&self.initial);

        let mut beam = vec![(initial_h, root)];
        let mut visited = FnvHashSet::default();
        visited.insert(self.initial.key());

        let mut best = root;
        let mut best_h = std::f64::INFINITY;
        let mut stagnation = 0;

        for step in 0..self.config.max_steps {
            stats.add_frontier(beam.len());
            let mut candidates = Vec::new();

            for &(_, node) in &beam {
                if node.state.is_solved() {
                    debug!(
                        "Solved after {} iterations and {} restarts",
                        step,
                        stats.restarts()
                    );
                    return SolverOk::new(expanded, node.path(), stats);
                }

                let neighbors = node.state.neighbors();
                expanded += neighbors.len();

                for neighbor in neighbors {
                    if !visited.insert(neighbor.key()) {
                        continue;
                    }

                    let h = self.perturb(&mut rng, heuristic(&neighbor));
                    let child: &PathNode<'_, P> = arena.alloc(PathNode {
                        state: neighbor,
                        prev: Some(node),
                    });
                    candidates.push((h, child));

                    if h < best_h {
                        best_h = h;
                        best = child;
                        stagnation = 0;
                    }
                }
            }

            stagnation += 1;

            if candidates.is_empty() {
                trace!("Step {}: no new states, restarting", step);
                stats.add_restart();
                beam = vec![(initial_h, root)];
                visited.clear();
                visited.insert(self.initial.key());
                continue;
            }

            // stable so ties keep the order in which states were generated
            candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
            candidates.truncate(self.config.beam_width);
            beam = candidates;

            if stagnation >= self.config.restart_threshold {
                trace!("Step {}: no improvement for {} steps, restarting", step, stagnation);
                stats.add_restart();
                beam = vec![(initial_h, root)];
                visited.clear();
                visited.insert(self.initial.key());
                stagnation = 0;
            }
        }

        debug!(
            "Out of steps after {} restarts, best score: {}",
            stats.restarts(),
            best_h
        );
        SolverOk::new(expanded, best.path(), stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeuristicKind;
    use crate::level::Level;

    const TWO_BOXES: &str = r"
#######
#@ $ .#
#  $ .#
#######
";

    fn manhattan(level: &Level) -> f64 {
        HeuristicKind::Manhattan.evaluate(level)
    }

    #[test]
    fn solves_two_boxes() {
        let level: Level = TWO_BOXES.parse().unwrap();
        let solver = BeamSearchSolver::new(&level, BeamConfig::default());
        let solution = solver.solve(manhattan);

        assert!(solution.is_solved());
        assert_eq!(solution.path[0], level);
        // consecutive states differ by exactly one move
        for pair in solution.path.windows(2) {
            assert!(pair[0].neighbors().contains(&pair[1]));
        }
        assert_eq!(solution.stats.restarts(), 0);
    }

    #[test]
    fn deterministic() {
        let level: Level = TWO_BOXES.parse().unwrap();
        let config = BeamConfig {
            beam_width: 3,
            seed: 1234,
            ..BeamConfig::default()
        };

        let solver = BeamSearchSolver::new(&level, config);
        let first = solver.solve(manhattan);
        // same instance again
        assert_eq!(solver.solve(manhattan), first);
        // fresh instance
        let other = BeamSearchSolver::new(&level, config);
        assert_eq!(other.solve(manhattan), first);
    }

    #[test]
    fn width_one_without_noise() {
        let level: Level = TWO_BOXES.parse().unwrap();
        let config = BeamConfig {
            beam_width: 1,
            max_steps: 100,
            randomness_factor: 0.0,
            ..BeamConfig::default()
        };
        let solution = BeamSearchSolver::new(&level, config).solve(manhattan);

        assert!(!solution.stats.frontier_sizes().is_empty());
        assert!(solution.stats.frontier_sizes().iter().all(|&size| size == 1));
    }

    #[test]
    fn ties_keep_generation_order() {
        // stepping up comes before the winning push
        let level: Level = r"
#####
# ###
#@$.#
#####
"
        .parse()
        .unwrap();
        let neighbors = level.neighbors();
        assert_eq!(neighbors.len(), 2);
        assert!(neighbors[1].is_solved());

        let config = BeamConfig {
            beam_width: 1,
            max_steps: 2,
            randomness_factor: 0.0,
            ..BeamConfig::default()
        };
        let solution = BeamSearchSolver::new(&level, config).solve(|_: &Level| 1.0);

        // only the step survives the cut so the push is never looked at again
        assert!(!solution.is_solved());
        assert_eq!(solution.path, vec![level.clone(), neighbors[0].clone()]);
        assert_eq!(solution.expanded, 2 + neighbors[0].neighbors().len());
    }

    #[test]
    fn huge_randomness() {
        let level: Level = "#@ $ .#".parse().unwrap();
        let config = BeamConfig {
            randomness_factor: 1e308,
            ..BeamConfig::default()
        };
        let solution = BeamSearchSolver::new(&level, config).solve(manhattan);
        assert!(solution.is_solved());
        assert_eq!(solution.path[0], level);
    }

    #[test]
    fn zero_steps() {
        let level: Level = TWO_BOXES.parse().unwrap();
        let config = BeamConfig {
            max_steps: 0,
            ..BeamConfig::default()
        };
        let solution = BeamSearchSolver::new(&level, config).solve(manhattan);
        assert_eq!(solution.expanded, 0);
        assert_eq!(solution.path, vec![level]);
    }

    #[test]
    fn restarts_when_stuck() {
        // the box is stuck against the wall, the player can only walk around
        let level: Level = "#$@ .#".parse().unwrap();
        let config = BeamConfig {
            max_steps: 10,
            ..BeamConfig::default()
        };
        let solution = BeamSearchSolver::new(&level, config).solve(manhattan);

        assert!(!solution.is_solved());
        assert!(solution.stats.restarts() > 0);
        assert_eq!(solution.stats.iterations(), 10);
        // best effort still starts at the beginning
        assert_eq!(solution.path[0], level);
    }

    #[test]
    fn stagnation_restarts() {
        let level: Level = TWO_BOXES.parse().unwrap();
        let config = BeamConfig {
            beam_width: 1,
            max_steps: 50,
            restart_threshold: 1,
            randomness_factor: 0.0,
            ..BeamConfig::default()
        };
        let solution = BeamSearchSolver::new(&level, config).solve(manhattan);
        assert!(solution.stats.restarts() > 0);
    }
}
