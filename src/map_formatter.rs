use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Format;
use crate::data::{Contents, MapCell, Pos};
use crate::map::GoalMap;
use crate::state::State;

/// Text rendering of a map, with boxes and the player if a state is given.
///
/// One line per grid row. Empty cells at the end of a row are left out
/// so the output reads back exactly like a hand-written level.
pub struct MapFormatter<'a> {
    map: &'a GoalMap,
    state: Option<&'a State>,
    format: Format,
}

impl<'a> MapFormatter<'a> {
    pub(crate) fn new(map: &'a GoalMap, state: Option<&'a State>, format: Format) -> Self {
        MapFormatter { map, state, format }
    }

    fn contents(&self, pos: Pos) -> Contents {
        match self.state {
            Some(state) if state.player_pos == pos => Contents::Player,
            Some(state) if state.has_box(pos) => Contents::Box,
            _ => Contents::Empty,
        }
    }

    /// Number of cells to print in row `r`.
    fn row_len(&self, r: i32) -> i32 {
        (0..self.map.cols())
            .rev()
            .find(|&c| {
                let pos = Pos::new(r, c);
                self.map.grid[pos] != MapCell::Empty || self.contents(pos) != Contents::Empty
            })
            .map_or(0, |last| last + 1)
    }
}

fn symbol(format: Format, cell: MapCell, contents: Contents) -> &'static str {
    match format {
        Format::Xsb => match (cell, contents) {
            // walls never hold anything
            (MapCell::Wall, _) => "#",
            (MapCell::Empty, Contents::Empty) => " ",
            (MapCell::Empty, Contents::Box) => "$",
            (MapCell::Empty, Contents::Player) => "@",
            (MapCell::Goal, Contents::Empty) => ".",
            (MapCell::Goal, Contents::Box) => "*",
            (MapCell::Goal, Contents::Player) => "+",
        },
        // first char is what's on the cell, second is the cell itself
        Format::Custom => match (cell, contents) {
            (MapCell::Wall, _) => "<>",
            (MapCell::Empty, Contents::Empty) => "  ",
            (MapCell::Empty, Contents::Box) => "B ",
            (MapCell::Empty, Contents::Player) => "P ",
            (MapCell::Goal, Contents::Empty) => " _",
            (MapCell::Goal, Contents::Box) => "B_",
            (MapCell::Goal, Contents::Player) => "P_",
        },
    }
}

impl<'a> Display for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..self.map.rows() {
            for c in 0..self.row_len(r) {
                let pos = Pos::new(r, c);
                f.write_str(symbol(self.format, self.map.grid[pos], self.contents(pos)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<'a> Debug for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
