//! Board coordinates and their algebraic names.
//!
//! `(0, 0)` is a1, the bottom-left square from White's side; `x` runs along
//! files a..h and `y` along ranks 1..8.

use std::fmt;
use std::str::FromStr;

use crate::errors::MoveError;

const FILES: &[u8; 8] = b"abcdefgh";
const RANKS: &[u8; 8] = b"12345678";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    x: i8,
    y: i8,
}

impl Location {
    /// Returns `None` when the coordinate lies off the board.
    #[inline]
    pub const fn new(x: i8, y: i8) -> Option<Self> {
        if x >= 0 && x < 8 && y >= 0 && y < 8 {
            Some(Location { x, y })
        } else {
            None
        }
    }

    /// Compile-time constructor for known-good coordinates.
    pub(crate) const fn at(x: i8, y: i8) -> Self {
        Location { x, y }
    }

    #[inline]
    pub const fn x(self) -> i8 {
        self.x
    }

    #[inline]
    pub const fn y(self) -> i8 {
        self.y
    }

    /// Rank-major index, `a1 = 0`, `h8 = 63`.
    #[inline]
    pub const fn index(self) -> usize {
        (self.y as usize) * 8 + self.x as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 64 {
            Some(Location {
                x: (index % 8) as i8,
                y: (index / 8) as i8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        Location::new(self.x + dx, self.y + dy)
    }

    /// Every square, a1 first, h8 last.
    pub fn all() -> impl Iterator<Item = Location> {
        (0..64).filter_map(Location::from_index)
    }

    pub fn file_char(self) -> char {
        char::from(FILES[self.x as usize])
    }

    pub fn rank_char(self) -> char {
        char::from(RANKS[self.y as usize])
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Location {
    type Err = MoveError;

    /// Parses a square such as `e4` (file letters are case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(MoveError::invalid(s, "a square is one file and one rank"));
        }

        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        let x = FILES
            .iter()
            .position(|&f| f == file)
            .ok_or_else(|| MoveError::invalid(s, format!("unknown file '{}'", file as char)))?;
        let y = RANKS
            .iter()
            .position(|&r| r == rank)
            .ok_or_else(|| MoveError::invalid(s, format!("unknown rank '{}'", rank as char)))?;

        Ok(Location::at(x as i8, y as i8))
    }
}

#[cfg(test)]
mod tests {
    use super::Location;

    #[test]
    fn round_trip_square_names() {
        let a1: Location = "a1".parse().expect("a1 should parse");
        let h8: Location = "H8".parse().expect("H8 should parse");
        assert_eq!((a1.x(), a1.y()), (0, 0));
        assert_eq!((h8.x(), h8.y()), (7, 7));
        assert_eq!(a1.to_string(), "a1");
        assert_eq!(h8.to_string(), "h8");
        assert_eq!(h8.index(), 63);
    }

    #[test]
    fn rejects_off_board_names_and_coordinates() {
        assert!("i1".parse::<Location>().is_err());
        assert!("a9".parse::<Location>().is_err());
        assert!("e".parse::<Location>().is_err());
        assert!(Location::new(8, 0).is_none());
        assert!(Location::new(0, -1).is_none());
        assert!(Location::from_index(64).is_none());
    }

    #[test]
    fn offset_stays_on_board() {
        let e4: Location = "e4".parse().expect("e4 should parse");
        assert_eq!(e4.offset(1, 2).map(|l| l.to_string()), Some("f6".to_owned()));
        assert!(e4.offset(4, 0).is_none());
        assert_eq!(Location::all().count(), 64);
    }
}
