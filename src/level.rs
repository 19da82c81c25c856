use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

use crate::config::Format;
use crate::data::{Pos, DIRECTIONS};
use crate::map::GoalMap;
use crate::map_formatter::MapFormatter;
use crate::state::State;
use crate::{Board, Puzzle};

/// A complete snapshot of a puzzle.
///
/// The map never changes during search so it's shared between all copies,
/// cloning a level only clones the `State`.
#[derive(Clone, PartialEq, Eq)]
pub struct Level {
    map: Arc<GoalMap>,
    pub state: State,
}

impl Level {
    pub(crate) fn new(map: GoalMap, state: State) -> Self {
        Level {
            map: Arc::new(map),
            state,
        }
    }

    pub fn map(&self) -> &GoalMap {
        &self.map
    }

    /// The same map with different box and player positions.
    pub fn with_state(&self, state: State) -> Level {
        Level {
            map: Arc::clone(&self.map),
            state,
        }
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        self.format(Format::Xsb)
    }

    pub fn custom(&self) -> MapFormatter<'_> {
        self.format(Format::Custom)
    }

    pub fn format(&self, format: Format) -> MapFormatter<'_> {
        self.map.format_with_state(format, &self.state)
    }

    fn is_blocked(&self, pos: Pos) -> bool {
        !self.map.is_free(pos) || self.state.has_box(pos)
    }
}

impl Board for Level {
    fn boxes(&self) -> &[Pos] {
        &self.state.boxes
    }

    fn targets(&self) -> &[Pos] {
        &self.map.goals
    }

    fn is_obstacle(&self, pos: Pos) -> bool {
        self.map.is_wall(pos)
    }

    fn has_box(&self, pos: Pos) -> bool {
        self.state.has_box(pos)
    }

    fn width(&self) -> i32 {
        self.map.cols()
    }

    fn length(&self) -> i32 {
        self.map.rows()
    }
}

impl Puzzle for Level {
    type Key = State;

    fn is_solved(&self) -> bool {
        // all boxes on a goal, not all goals covered - there might be more goals than boxes
        self.state.boxes.iter().all(|&b| self.map.is_goal(b))
    }

    fn neighbors(&self) -> Vec<Level> {
        let mut new_levels = Vec::new();

        for &dir in &DIRECTIONS {
            let new_player_pos = self.state.player_pos + dir;
            if !self.map.is_free(new_player_pos) {
                continue;
            }

            if self.state.has_box(new_player_pos) {
                let push_dest = new_player_pos + dir;
                if !self.is_blocked(push_dest) {
                    // push
                    let new_state =
                        self.state
                            .with_box_moved(new_player_pos, new_player_pos, push_dest);
                    new_levels.push(self.with_state(new_state));
                }
            } else {
                // step
                let new_state = State {
                    player_pos: new_player_pos,
                    boxes: self.state.boxes.clone(),
                };
                new_levels.push(self.with_state(new_state));
            }
        }

        new_levels
    }

    fn key(&self) -> State {
        self.state.clone()
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.xsb())
    }
}
