use crate::data::Pos;

/// The mutable part of a level.
///
/// Boxes are always sorted so the derived `Eq`, `Ord` and `Hash` compare states structurally
/// no matter in which order boxes were moved. This makes `State` itself the canonical key.
#[derive(Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct State {
    pub(crate) player_pos: Pos,
    pub(crate) boxes: Vec<Pos>,
}

impl State {
    pub(crate) fn new(player_pos: Pos, mut boxes: Vec<Pos>) -> State {
        boxes.sort();
        State { player_pos, boxes }
    }

    pub fn player_pos(&self) -> Pos {
        self.player_pos
    }

    pub fn boxes(&self) -> &[Pos] {
        &self.boxes
    }

    pub(crate) fn has_box(&self, pos: Pos) -> bool {
        self.boxes.binary_search(&pos).is_ok()
    }

    /// Moves the box at `from` to `to`, keeping the boxes sorted.
    pub(crate) fn with_box_moved(&self, player_pos: Pos, from: Pos, to: Pos) -> State {
        let boxes = self
            .boxes
            .iter()
            .map(|&b| if b == from { to } else { b })
            .collect();
        State::new(player_pos, boxes)
    }
}
