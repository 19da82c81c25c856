use std::hash::Hash;

use fnv::FnvHashMap;
use log::{debug, trace};

use crate::config::LrtaConfig;
use crate::solver::{Solver, SolverOk, Stats};
use crate::Puzzle;

/// Estimated cost to reach the goal from each state LRTA* has seen.
///
/// Entries start as the heuristic value and get overwritten as the search learns.
#[derive(Debug, Clone)]
pub struct LearnedCosts<K> {
    table: FnvHashMap<K, f64>,
}

impl<K: Eq + Hash> LearnedCosts<K> {
    pub fn new() -> Self {
        LearnedCosts {
            table: FnvHashMap::default(),
        }
    }

    pub fn get(&self, key: &K) -> Option<f64> {
        self.table.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.table.iter().map(|(key, &cost)| (key, cost))
    }

    /// Looks up the estimate, computing and storing it on first use.
    fn estimate<F>(&mut self, key: K, heuristic: F) -> f64
    where
        F: FnOnce() -> f64,
    {
        *self.table.entry(key).or_insert_with(heuristic)
    }

    fn learn(&mut self, key: K, cost: f64) {
        self.table.insert(key, cost);
    }
}

impl<K: Eq + Hash> Default for LearnedCosts<K> {
    fn default() -> Self {
        LearnedCosts::new()
    }
}

enum Trial<P> {
    Solved(Vec<P>),
    Failed(Vec<P>),
}

/// Learning real-time A*: repeated greedy walks from the initial state
/// which keep raising the estimates of states that turn out worse than they looked.
#[derive(Debug, Clone)]
pub struct LrtaStarSolver<P> {
    initial: P,
    config: LrtaConfig,
}

impl<P: Puzzle> LrtaStarSolver<P> {
    pub fn new(initial: &P, config: LrtaConfig) -> Self {
        LrtaStarSolver {
            initial: initial.clone(),
            config,
        }
    }

    /// Like `Solver::solve` but starts from (and updates) the given estimates
    /// instead of an empty table.
    pub fn solve_with_table<H>(&self, heuristic: H, costs: &mut LearnedCosts<P::Key>) -> SolverOk<P>
    where
        H: Fn(&P) -> f64,
    {
        let mut stats = Stats::new();
        let mut expanded = 0;
        let mut path = vec![self.initial.clone()];

        for trial in 0..self.config.max_restarts {
            stats.add_trial();
            match self.trial(&heuristic, costs, &mut expanded, &mut stats) {
                Trial::Solved(solution) => {
                    debug!(
                        "Solved in trial {} with {} learned estimates",
                        trial,
                        costs.len()
                    );
                    stats.set_learned_states(costs.len());
                    return SolverOk::new(expanded, solution, stats);
                }
                Trial::Failed(last) => {
                    trace!("Trial {} failed after {} moves", trial, last.len() - 1);
                    path = last;
                }
            }
        }

        debug!("Out of trials, {} learned estimates", costs.len());
        stats.set_learned_states(costs.len());
        SolverOk::new(expanded, path, stats)
    }

    fn trial<H>(
        &self,
        heuristic: &H,
        costs: &mut LearnedCosts<P::Key>,
        expanded: &mut usize,
        stats: &mut Stats,
    ) -> Trial<P>
    where
        H: Fn(&P) -> f64,
    {
        let mut current = self.initial.clone();
        let mut path = vec![current.clone()];

        for _ in 0..self.config.max_steps {
            if current.is_solved() {
                return Trial::Solved(path);
            }

            let key = current.key();
            costs.estimate(key.clone(), || heuristic(&current));

            let neighbors = current.neighbors();
            *expanded += neighbors.len();

            // first of the cheapest in neighbor order
            let mut best: Option<(f64, P)> = None;
            for neighbor in neighbors {
                let f = 1.0 + costs.estimate(neighbor.key(), || heuristic(&neighbor));
                if best.as_ref().map_or(true, |&(best_f, _)| f < best_f) {
                    best = Some((f, neighbor));
                }
            }

            let (best_f, next) = match best {
                Some(best) => best,
                None => {
                    trace!("Dead end after {} moves", path.len() - 1);
                    return Trial::Failed(path);
                }
            };

            costs.learn(key, best_f);
            stats.add_iteration();

            current = next;
            path.push(current.clone());
        }

        Trial::Failed(path)
    }
}

impl<P: Puzzle> Solver<P> for LrtaStarSolver<P> {
    fn solve<H>(&self, heuristic: H) -> SolverOk<P>
    where
        H: Fn(&P) -> f64,
    {
        let mut costs = LearnedCosts::new();
        self.solve_with_table(heuristic, &mut costs)
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
    fn solves_corridor() {
        let level: Level = "#@ $  .#".parse().unwrap();
        let solution = LrtaStarSolver::new(&level, LrtaConfig::default()).solve(manhattan);

        assert!(solution.is_solved());
        assert_eq!(solution.stats.trials(), 1);
        // walk right, then push 3 times
        assert_eq!(solution.path.len(), 5);
        assert_eq!(solution.path[0], level);
        for pair in solution.path.windows(2) {
            assert!(pair[0].neighbors().contains(&pair[1]));
        }
        // the solved state isn't repeated
        assert!(!solution.path[solution.path.len() - 2].is_solved());
    }

    #[test]
    fn dead_end() {
        // boxes on both sides against walls
        let level: Level = "#$@$#.".parse().unwrap();
        let config = LrtaConfig {
            max_restarts: 3,
            ..LrtaConfig::default()
        };
        let solution = LrtaStarSolver::new(&level, config).solve(manhattan);

        assert!(!solution.is_solved());
        assert_eq!(solution.expanded, 0);
        assert_eq!(solution.path, vec![level]);
        assert_eq!(solution.stats.trials(), 3);
        assert_eq!(solution.stats.learned_states(), 1);
    }

    #[test]
    fn returns_last_trial() {
        let level: Level = TWO_BOXES.parse().unwrap();
        let config = LrtaConfig {
            max_steps: 2,
            max_restarts: 4,
        };
        let solution = LrtaStarSolver::new(&level, config).solve(manhattan);

        assert!(!solution.is_solved());
        assert_eq!(solution.path.len(), 3);
        assert_eq!(solution.path[0], level);
        assert_eq!(solution.stats.trials(), 4);
        assert_eq!(solution.stats.iterations(), 8);
    }

    #[test]
    fn no_trials() {
        let level: Level = TWO_BOXES.parse().unwrap();
        let config = LrtaConfig {
            max_restarts: 0,
            ..LrtaConfig::default()
        };
        let solution = LrtaStarSolver::new(&level, config).solve(manhattan);
        assert_eq!(solution.expanded, 0);
        assert_eq!(solution.path, vec![level]);
    }

    #[test]
    fn no_steps() {
        let level: Level = TWO_BOXES.parse().unwrap();
        let config = LrtaConfig {
            max_steps: 0,
            max_restarts: 5,
        };
        let solution = LrtaStarSolver::new(&level, config).solve(manhattan);
        assert_eq!(solution.expanded, 0);
        assert_eq!(solution.path, vec![level]);
        assert_eq!(solution.stats.trials(), 5);
        assert_eq!(solution.stats.iterations(), 0);
        assert_eq!(solution.stats.learned_states(), 0);
    }

    #[test]
    fn learning_only_raises_estimates() {
        let level: Level = TWO_BOXES.parse().unwrap();
        let config = LrtaConfig {
            max_steps: 5,
            max_restarts: 1,
        };
        let solver = LrtaStarSolver::new(&level, config);
        let mut costs = LearnedCosts::new();

        let mut prev = manhattan(&level);
        for _ in 0..20 {
            solver.solve_with_table(manhattan, &mut costs);

            let initial = costs.get(&level.key()).unwrap();
            assert!(initial >= prev, "{} dropped to {}", prev, initial);
            prev = initial;
        }

        assert!(!costs.is_empty());
        for (key, cost) in costs.iter() {
            let h = manhattan(&level.with_state(key.clone()));
            assert!(cost >= h, "learned {} below heuristic {}", cost, h);
        }
    }
}
