//! Simple static checks for boxes which can never reach a goal.
//!
//! Only walls and the grid boundary are considered blocking for the corner and edge checks,
//! other boxes can move away.

use crate::data::{Dir, Pos, DIRECTIONS};
use crate::Board;

fn is_blocked<B: Board + ?Sized>(board: &B, pos: Pos) -> bool {
    !board.in_bounds(pos) || board.is_obstacle(pos)
}

fn is_open<B: Board + ?Sized>(board: &B, pos: Pos) -> bool {
    !is_blocked(board, pos) && !board.has_box(pos)
}

/// The box is stuck between a blocked cell above or below and a blocked cell left or right.
pub fn corner_deadlock<B: Board + ?Sized>(board: &B, box_pos: Pos) -> bool {
    let vertical = is_blocked(board, box_pos + Dir::Up) || is_blocked(board, box_pos + Dir::Down);
    let horizontal =
        is_blocked(board, box_pos + Dir::Left) || is_blocked(board, box_pos + Dir::Right);
    vertical && horizontal
}

/// The box is on the boundary of the grid and no goal lies along that boundary line.
pub fn edge_deadlock<B: Board + ?Sized>(board: &B, box_pos: Pos) -> bool {
    let (x, y) = (box_pos.x(), box_pos.y());

    if (x == 0 || x == board.width() - 1) && !board.targets().iter().any(|t| t.x() == x) {
        return true;
    }

    if (y == 0 || y == board.length() - 1) && !board.targets().iter().any(|t| t.y() == y) {
        return true;
    }

    false
}

/// No direction exists in which the box could be pushed without immediately deadlocking it.
pub fn box_unpushable<B: Board + ?Sized>(board: &B, box_pos: Pos) -> bool {
    !DIRECTIONS
        .iter()
        .any(|&push_dir| can_push(board, box_pos, push_dir))
}

fn can_push<B: Board + ?Sized>(board: &B, box_pos: Pos, push_dir: Dir) -> bool {
    let player_pos = box_pos - push_dir;
    let dest = box_pos + push_dir;

    is_open(board, player_pos)
        && is_open(board, dest)
        && !corner_deadlock(board, dest)
        && !edge_deadlock(board, dest)
}
