use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Format;
use crate::data::{MapCell, Pos};
use crate::map_formatter::MapFormatter;
use crate::state::State;
use crate::vec2d::Vec2d;

/// The immutable part of a level - walls (obstacles) and goals (targets).
#[derive(Clone, PartialEq, Eq)]
pub struct GoalMap {
    pub(crate) grid: Vec2d<MapCell>,
    pub(crate) goals: Vec<Pos>,
}

impl GoalMap {
    pub(crate) fn new(grid: Vec2d<MapCell>, mut goals: Vec<Pos>) -> Self {
        goals.sort();
        GoalMap { grid, goals }
    }

    pub fn goals(&self) -> &[Pos] {
        &self.goals
    }

    pub fn rows(&self) -> i32 {
        self.grid.rows()
    }

    pub fn cols(&self) -> i32 {
        self.grid.cols()
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.grid.contains(pos)
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.grid.get(pos) == Some(&MapCell::Wall)
    }

    pub fn is_goal(&self, pos: Pos) -> bool {
        self.grid.get(pos) == Some(&MapCell::Goal)
    }

    /// Cells a box or the player can occupy - inside the grid and not a wall.
    pub fn is_free(&self, pos: Pos) -> bool {
        match self.grid.get(pos) {
            None | Some(MapCell::Wall) => false,
            Some(_) => true,
        }
    }

    pub fn format_with_state<'a>(&'a self, format: Format, state: &'a State) -> MapFormatter<'a> {
        MapFormatter::new(self, Some(state), format)
    }

    pub fn format(&self, format: Format) -> MapFormatter<'_> {
        MapFormatter::new(self, None, format)
    }
}

impl Display for GoalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(Format::Xsb))
    }
}

impl Debug for GoalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
