use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MapCell {
    Empty,
    Wall,
    Goal,
}

impl Default for MapCell {
    fn default() -> Self {
        MapCell::Empty
    }
}

impl Display for MapCell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            MapCell::Empty => write!(f, " "),
            MapCell::Wall => write!(f, "#"),
            MapCell::Goal => write!(f, "."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Contents {
    Empty,
    Box,
    Player,
}

/// A grid position. Rows grow downwards, so `r` is the `y` coordinate and `c` is `x`.
///
/// Signed so that positions just outside the grid can be represented and bounds-checked.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: i32,
    pub c: i32,
}

impl Pos {
    pub fn new(r: i32, c: i32) -> Pos {
        Pos { r, c }
    }

    pub fn x(self) -> i32 {
        self.c
    }

    pub fn y(self) -> i32 {
        self.r
    }

    pub fn manhattan(self, other: Pos) -> i32 {
        (self.r - other.r).abs() + (self.c - other.c).abs()
    }

    pub fn euclidean(self, other: Pos) -> f64 {
        let dr = f64::from(self.r - other.r);
        let dc = f64::from(self.c - other.c);
        (dr * dr + dc * dc).sqrt()
    }
}

impl fmt::Debug for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.r, self.c)
    }
}

impl Add<Dir> for Pos {
    type Output = Pos;

    fn add(self, dir: Dir) -> Pos {
        let (dr, dc) = dir.offset();
        Pos::new(self.r + dr, self.c + dc)
    }
}

impl Sub<Dir> for Pos {
    type Output = Pos;

    fn sub(self, dir: Dir) -> Pos {
        self + dir.inverse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

/// The order in which neighbors are generated - tie-breaking in the solvers depends on it.
pub const DIRECTIONS: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

impl Dir {
    fn offset(self) -> (i32, i32) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Right => (0, 1),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
        }
    }

    pub fn inverse(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Right => Dir::Left,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Pos::new(1, 1);
        let b = Pos::new(4, 5);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(b.manhattan(a), 7);
        assert_eq!(a.euclidean(b), 5.0);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn moving() {
        let p = Pos::new(0, 0);
        assert_eq!(p + Dir::Up, Pos::new(-1, 0));
        assert_eq!(p + Dir::Right, Pos::new(0, 1));
        assert_eq!(p - Dir::Right, Pos::new(0, -1));
        for &dir in &DIRECTIONS {
            assert_eq!(p + dir + dir.inverse(), p);
        }
        assert_eq!(p.x(), 0);
        assert_eq!(Pos::new(2, 3).y(), 2);
    }
}
