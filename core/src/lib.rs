#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Insect Forage engine.
//!
//! This crate defines the vocabulary that connects the input adapter, the
//! authoritative board, and the pure systems. Adapters submit [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values describing
//! what actually changed. Systems read immutable views of the board and respond
//! exclusively with new command batches.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Commands that express all permissible board mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Resets the board to an empty square grid of the provided size.
    ConfigureBoard {
        /// Side length of the square board.
        size: BoardSize,
    },
    /// Requests placement of a new insect.
    PlaceInsect {
        /// Color the insect belongs to.
        color: InsectColor,
        /// Species of the insect, which fixes its movement pattern.
        kind: InsectKind,
        /// Cell the insect starts on.
        position: Position,
    },
    /// Requests placement of a new food point.
    PlaceFood {
        /// Nutritional value of the food point.
        value: u32,
        /// Cell the food point occupies.
        position: Position,
    },
    /// Marks a food point as eaten by the provided insect.
    ConsumeFood {
        /// Food point being eaten.
        food: FoodId,
        /// Insect that eats it.
        by: InsectId,
    },
    /// Ends an insect's journey.
    KillInsect {
        /// Insect that dies.
        insect: InsectId,
        /// Cell the insect rests on after dying.
        at: Position,
        /// Reason the journey ended.
        cause: DeathCause,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the board was reset to the provided size.
    BoardConfigured {
        /// Side length of the square board.
        size: BoardSize,
    },
    /// Confirms that an insect was placed on the board.
    InsectPlaced {
        /// Identifier allocated to the insect by the world.
        insect: InsectId,
        /// Color of the insect.
        color: InsectColor,
        /// Species of the insect.
        kind: InsectKind,
        /// Cell the insect occupies.
        position: Position,
    },
    /// Confirms that a food point was placed on the board.
    FoodPlaced {
        /// Identifier allocated to the food point by the world.
        food: FoodId,
        /// Nutritional value of the food point.
        value: u32,
        /// Cell the food point occupies.
        position: Position,
    },
    /// Reports that a placement request was rejected.
    PlacementRejected {
        /// Cell named in the rejected request.
        position: Position,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that an insect ate a food point.
    FoodConsumed {
        /// Food point that was eaten.
        food: FoodId,
        /// Insect that ate it.
        by: InsectId,
        /// Value credited to the insect.
        value: u32,
    },
    /// Confirms that an insect died.
    InsectDied {
        /// Insect that died.
        insect: InsectId,
        /// Cell the insect rests on.
        at: Position,
        /// Reason the journey ended.
        cause: DeathCause,
    },
}

/// Reasons a placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// The requested cell lies outside the board.
    #[error("Invalid entity position")]
    OutOfBounds,
    /// Another entity already occupies the requested cell.
    #[error("Two entities in the same position")]
    Occupied,
    /// An insect with the same color and kind already exists.
    #[error("Duplicate insects")]
    DuplicateInsect,
}

/// Reason an insect's journey ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    /// The next step would have left the board.
    LeftBoard,
    /// The insect walked into a living insect of another color.
    HostileCollision {
        /// Insect that blocked the path.
        with: InsectId,
    },
}

/// Side length of the square board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardSize(u32);

impl BoardSize {
    /// Smallest board the input format accepts.
    pub const MIN: u32 = 4;
    /// Largest board the input format accepts.
    pub const MAX: u32 = 1000;

    /// Creates a new board size.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the side length.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether the position lies within `[1, size] x [1, size]`.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        let upper = i64::from(self.0);
        let within = |value: i32| (1..=upper).contains(&i64::from(value));
        within(position.x()) && within(position.y())
    }
}

/// Location of a single board cell. Coordinates are 1-indexed.
///
/// Positions are plain values and may lie off the board; only placement and
/// travel consult [`BoardSize::contains`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// First coordinate; North decreases it.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Second coordinate; East increases it.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the position reached by one step of `stride` cells toward `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction, stride: i32) -> Self {
        let (dx, dy) = direction.unit();
        Self {
            x: self.x.saturating_add(dx.saturating_mul(stride)),
            y: self.y.saturating_add(dy.saturating_mul(stride)),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Compass directions an insect may scan and travel along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing first coordinates.
    North,
    /// Movement toward increasing second coordinates.
    East,
    /// Movement toward increasing first coordinates.
    South,
    /// Movement toward decreasing second coordinates.
    West,
    /// Combination of North and East.
    #[serde(rename = "North-East")]
    NorthEast,
    /// Combination of South and East.
    #[serde(rename = "South-East")]
    SouthEast,
    /// Combination of South and West.
    #[serde(rename = "South-West")]
    SouthWest,
    /// Combination of North and West.
    #[serde(rename = "North-West")]
    NorthWest,
}

impl Direction {
    /// Every direction in canonical enumeration order.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// Unit step as `(dx, dy)`.
    #[must_use]
    pub const fn unit(self) -> (i32, i32) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
            Self::NorthEast => (-1, 1),
            Self::SouthEast => (1, 1),
            Self::SouthWest => (1, -1),
            Self::NorthWest => (-1, -1),
        }
    }

    /// Human-readable name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "North",
            Self::East => "East",
            Self::South => "South",
            Self::West => "West",
            Self::NorthEast => "North-East",
            Self::SouthEast => "South-East",
            Self::SouthWest => "South-West",
            Self::NorthWest => "North-West",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raised when a color name does not match any insect color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("Invalid insect color")]
pub struct InvalidColor;

/// Raised when a kind name does not match any insect kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("Invalid insect type")]
pub struct InvalidKind;

/// Team an insect belongs to. Insects only block insects of another color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsectColor {
    /// Red team.
    Red,
    /// Green team.
    Green,
    /// Blue team.
    Blue,
    /// Yellow team.
    Yellow,
}

impl InsectColor {
    /// Every color in declaration order.
    pub const ALL: [InsectColor; 4] = [
        InsectColor::Red,
        InsectColor::Green,
        InsectColor::Blue,
        InsectColor::Yellow,
    ];

    /// Capitalized name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Yellow => "Yellow",
        }
    }
}

impl FromStr for InsectColor {
    type Err = InvalidColor;

    /// Matches color names case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(value))
            .ok_or(InvalidColor)
    }
}

impl fmt::Display for InsectColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Species of insect. Each species carries its own movement pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsectKind {
    /// Jumps two cells at a time along the straight directions.
    Grasshopper,
    /// Moves one cell at a time along the straight directions.
    Butterfly,
    /// Moves one cell at a time along straight and diagonal directions.
    Ant,
    /// Moves one cell at a time along the diagonal directions.
    Spider,
}

static STRAIGHT: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

static DIAGONAL: [Direction; 4] = [
    Direction::NorthEast,
    Direction::SouthEast,
    Direction::SouthWest,
    Direction::NorthWest,
];

static EVERY: [Direction; 8] = Direction::ALL;

impl InsectKind {
    /// Every kind in declaration order.
    pub const ALL: [InsectKind; 4] = [
        InsectKind::Grasshopper,
        InsectKind::Butterfly,
        InsectKind::Ant,
        InsectKind::Spider,
    ];

    /// Directions the kind scans, in the order ties are resolved.
    #[must_use]
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Self::Grasshopper | Self::Butterfly => &STRAIGHT,
            Self::Ant => &EVERY,
            Self::Spider => &DIAGONAL,
        }
    }

    /// Number of cells covered by a single step.
    #[must_use]
    pub const fn stride(self) -> i32 {
        match self {
            Self::Grasshopper => 2,
            Self::Butterfly | Self::Ant | Self::Spider => 1,
        }
    }

    /// Direction chosen when no direction reaches any food.
    #[must_use]
    pub fn default_direction(self) -> Direction {
        self.directions()[0]
    }

    /// Species name used in input and reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Grasshopper => "Grasshopper",
            Self::Butterfly => "Butterfly",
            Self::Ant => "Ant",
            Self::Spider => "Spider",
        }
    }
}

impl FromStr for InsectKind {
    type Err = InvalidKind;

    /// Matches kind names exactly.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == value)
            .ok_or(InvalidKind)
    }
}

impl fmt::Display for InsectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unique identifier assigned to an insect. Identifiers follow insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InsectId(u32);

impl InsectId {
    /// Creates a new insect identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a food point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FoodId(u32);

impl FoodId {
    /// Creates a new food identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Outcome of one insect's turn within a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsectReport {
    /// Color of the insect.
    pub color: InsectColor,
    /// Species of the insect.
    pub kind: InsectKind,
    /// Direction the insect chose to travel.
    pub direction: Direction,
    /// Total value of food eaten during the journey.
    pub food_eaten: u64,
}

impl fmt::Display for InsectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.color, self.kind, self.direction, self.food_eaten
        )
    }
}
