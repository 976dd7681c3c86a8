#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state management for Insect Forage.

use std::collections::{HashMap, HashSet};

use insect_forage_core::{
    BoardSize, Command, Event, FoodId, InsectColor, InsectId, InsectKind, PlacementError, Position,
};
use tracing::debug;

const DEFAULT_BOARD_SIZE: BoardSize = BoardSize::new(BoardSize::MIN);

/// Represents the authoritative board: every insect and food point of a run.
///
/// Cell membership is fixed once placement ends. Travel only flips the
/// `consumable` and `alive` flags and records where a dead insect came to rest.
#[derive(Debug)]
pub struct World {
    size: BoardSize,
    cells: HashMap<Position, EntityId>,
    insects: Vec<Insect>,
    food: Vec<FoodPoint>,
    lineup: HashSet<(InsectColor, InsectKind)>,
}

impl World {
    /// Creates an empty board of the smallest accepted size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_size(DEFAULT_BOARD_SIZE)
    }

    fn with_size(size: BoardSize) -> Self {
        Self {
            size,
            cells: HashMap::new(),
            insects: Vec::new(),
            food: Vec::new(),
            lineup: HashSet::new(),
        }
    }

    fn place_insect(
        &mut self,
        color: InsectColor,
        kind: InsectKind,
        position: Position,
    ) -> Result<InsectId, PlacementError> {
        if !self.size.contains(position) {
            return Err(PlacementError::OutOfBounds);
        }
        if self.lineup.contains(&(color, kind)) {
            return Err(PlacementError::DuplicateInsect);
        }
        if self.cells.contains_key(&position) {
            return Err(PlacementError::Occupied);
        }

        let id = InsectId::new(next_index(self.insects.len()));
        let _ = self.lineup.insert((color, kind));
        let _ = self.cells.insert(position, EntityId::Insect(id));
        self.insects.push(Insect {
            id,
            color,
            kind,
            position,
            alive: true,
        });
        Ok(id)
    }

    fn place_food(&mut self, value: u32, position: Position) -> Result<FoodId, PlacementError> {
        if !self.size.contains(position) {
            return Err(PlacementError::OutOfBounds);
        }
        if self.cells.contains_key(&position) {
            return Err(PlacementError::Occupied);
        }

        let id = FoodId::new(next_index(self.food.len()));
        let _ = self.cells.insert(position, EntityId::Food(id));
        self.food.push(FoodPoint {
            id,
            value,
            position,
            consumable: true,
        });
        Ok(id)
    }

    fn insect_mut(&mut self, insect: InsectId) -> Option<&mut Insect> {
        self.insects.get_mut(slot(insect.get()))
    }

    fn food_mut(&mut self, food: FoodId) -> Option<&mut FoodPoint> {
        self.food.get_mut(slot(food.get()))
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureBoard { size } => {
            *world = World::with_size(size);
            out_events.push(Event::BoardConfigured { size });
        }
        Command::PlaceInsect {
            color,
            kind,
            position,
        } => match world.place_insect(color, kind, position) {
            Ok(insect) => {
                debug!(insect = insect.get(), %color, %kind, %position, "insect placed");
                out_events.push(Event::InsectPlaced {
                    insect,
                    color,
                    kind,
                    position,
                });
            }
            Err(reason) => {
                debug!(%color, %kind, %position, %reason, "insect placement rejected");
                out_events.push(Event::PlacementRejected { position, reason });
            }
        },
        Command::PlaceFood { value, position } => match world.place_food(value, position) {
            Ok(food) => {
                debug!(food = food.get(), value, %position, "food placed");
                out_events.push(Event::FoodPlaced {
                    food,
                    value,
                    position,
                });
            }
            Err(reason) => {
                debug!(value, %position, %reason, "food placement rejected");
                out_events.push(Event::PlacementRejected { position, reason });
            }
        },
        Command::ConsumeFood { food, by } => {
            let eater_alive = world.insect_mut(by).map_or(false, |insect| insect.alive);
            if !eater_alive {
                debug!(food = food.get(), insect = by.get(), "dead insect cannot eat");
                return;
            }
            let Some(point) = world.food_mut(food) else {
                return;
            };
            if !point.consumable {
                debug!(food = food.get(), insect = by.get(), "food already eaten");
                return;
            }
            point.consumable = false;
            out_events.push(Event::FoodConsumed {
                food,
                by,
                value: point.value,
            });
        }
        Command::KillInsect { insect, at, cause } => {
            let Some(victim) = world.insect_mut(insect) else {
                return;
            };
            if !victim.alive {
                return;
            }
            victim.alive = false;
            victim.position = at;
            out_events.push(Event::InsectDied { insect, at, cause });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use insect_forage_core::{BoardSize, FoodId, InsectColor, InsectId, InsectKind, Position};

    use super::{EntityId, World};

    /// Side length of the board.
    #[must_use]
    pub fn board_size(world: &World) -> BoardSize {
        world.size
    }

    /// Captures a read-only view of the whole board.
    #[must_use]
    pub fn board_view(world: &World) -> BoardView<'_> {
        BoardView { world }
    }

    /// Identifiers of every insect in the order they were placed.
    #[must_use]
    pub fn insect_ids(world: &World) -> Vec<InsectId> {
        world.insects.iter().map(|insect| insect.id).collect()
    }

    /// Snapshot of a single insect.
    #[must_use]
    pub fn insect(world: &World, insect: InsectId) -> Option<InsectSnapshot> {
        board_view(world).insect(insect)
    }

    /// Snapshots of every food point in the order they were placed.
    #[must_use]
    pub fn food(world: &World) -> Vec<FoodSnapshot> {
        world
            .food
            .iter()
            .map(|point| FoodSnapshot {
                id: point.id,
                value: point.value,
                position: point.position,
                consumable: point.consumable,
            })
            .collect()
    }

    /// Immutable representation of a single insect's state.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct InsectSnapshot {
        /// Identifier allocated to the insect.
        pub id: InsectId,
        /// Color of the insect.
        pub color: InsectColor,
        /// Species of the insect.
        pub kind: InsectKind,
        /// Cell the insect currently stands on.
        pub position: Position,
        /// Whether the insect is still alive.
        pub alive: bool,
    }

    /// Immutable representation of a single food point's state.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct FoodSnapshot {
        /// Identifier allocated to the food point.
        pub id: FoodId,
        /// Nutritional value of the food point.
        pub value: u32,
        /// Cell the food point occupies.
        pub position: Position,
        /// Whether the food point can still be eaten.
        pub consumable: bool,
    }

    /// Entity registered at a board cell.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Occupant {
        /// The cell holds an insect.
        Insect(InsectSnapshot),
        /// The cell holds a food point.
        Food(FoodSnapshot),
    }

    /// Read-only view into the sparse board.
    #[derive(Clone, Copy, Debug)]
    pub struct BoardView<'a> {
        world: &'a World,
    }

    impl<'a> BoardView<'a> {
        /// Side length of the board.
        #[must_use]
        pub fn size(&self) -> BoardSize {
            self.world.size
        }

        /// Returns the entity registered at the provided cell, if any.
        #[must_use]
        pub fn occupant(&self, position: Position) -> Option<Occupant> {
            match self.world.cells.get(&position).copied()? {
                EntityId::Insect(id) => self.insect(id).map(Occupant::Insect),
                EntityId::Food(id) => self.food_point(id).map(Occupant::Food),
            }
        }

        /// Returns the snapshot of the provided insect.
        #[must_use]
        pub fn insect(&self, insect: InsectId) -> Option<InsectSnapshot> {
            self.world
                .insects
                .get(super::slot(insect.get()))
                .map(|insect| InsectSnapshot {
                    id: insect.id,
                    color: insect.color,
                    kind: insect.kind,
                    position: insect.position,
                    alive: insect.alive,
                })
        }

        fn food_point(&self, food: FoodId) -> Option<FoodSnapshot> {
            self.world
                .food
                .get(super::slot(food.get()))
                .map(|point| FoodSnapshot {
                    id: point.id,
                    value: point.value,
                    position: point.position,
                    consumable: point.consumable,
                })
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntityId {
    Insect(InsectId),
    Food(FoodId),
}

#[derive(Clone, Debug)]
struct Insect {
    id: InsectId,
    color: InsectColor,
    kind: InsectKind,
    position: Position,
    alive: bool,
}

#[derive(Clone, Debug)]
struct FoodPoint {
    id: FoodId,
    value: u32,
    position: Position,
    consumable: bool,
}

fn next_index(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

fn slot(index: u32) -> usize {
    usize::try_from(index).unwrap_or(usize::MAX)
}
