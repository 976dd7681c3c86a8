#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that picks a heading for an insect and plans
//! its journey along it.
//!
//! Every species shares the same scan and travel logic. The species only
//! contributes its direction table and stride via [`InsectKind`].
//!
//! [`InsectKind`]: insect_forage_core::InsectKind

use insect_forage_core::{Command, DeathCause, Direction, InsectId, Position};
use insect_forage_world::query::{BoardView, InsectSnapshot, Occupant};
use tracing::{debug, trace};

/// Pure system that evaluates headings and emits travel commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct Movement;

/// Direction an insect settled on together with the food visible along it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Heading {
    /// Chosen direction.
    pub direction: Direction,
    /// Sum of consumable food values visible along the direction.
    pub score: u64,
}

/// Outcome of a planned journey.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Journey {
    /// Insect that travels.
    pub insect: InsectId,
    /// Total value of food eaten before dying.
    pub food_eaten: u64,
    /// Cell the insect comes to rest on.
    pub rest: Position,
    /// Reason the journey ends.
    pub cause: DeathCause,
}

impl Movement {
    /// Scans every direction of the insect's pattern and returns the richest one.
    ///
    /// Ties keep the earlier direction of the pattern; when nothing is visible
    /// the pattern's first direction is returned with a zero score. Insects
    /// never obstruct the scan, even hostile ones.
    #[must_use]
    pub fn best_direction(&self, view: BoardView<'_>, insect: &InsectSnapshot) -> Heading {
        let mut best = Heading {
            direction: insect.kind.default_direction(),
            score: 0,
        };

        for &direction in insect.kind.directions() {
            let score = visible_food(view, insect.position, direction, insect.kind.stride());
            trace!(insect = insect.id.get(), %direction, score, "scanned direction");
            if score > best.score {
                best = Heading { direction, score };
            }
        }

        debug!(
            insect = insect.id.get(),
            direction = %best.direction,
            score = best.score,
            "heading selected"
        );
        best
    }

    /// Walks the insect along `direction` until it dies, emitting the commands
    /// that record what it ate and where it fell.
    ///
    /// Returns `None` without emitting anything when the insect is already
    /// dead. The plan stays valid as long as the emitted commands are applied
    /// before any other mutation, because a journey never revisits a cell.
    pub fn plan_travel(
        &self,
        view: BoardView<'_>,
        insect: &InsectSnapshot,
        direction: Direction,
        out: &mut Vec<Command>,
    ) -> Option<Journey> {
        if !insect.alive {
            return None;
        }

        let size = view.size();
        let stride = insect.kind.stride();
        let mut current = insect.position;
        let mut food_eaten: u64 = 0;

        let (rest, cause) = loop {
            let next = current.stepped(direction, stride);
            if !size.contains(next) {
                break (current, DeathCause::LeftBoard);
            }

            match view.occupant(next) {
                Some(Occupant::Food(food)) if food.consumable => {
                    food_eaten = food_eaten.saturating_add(u64::from(food.value));
                    out.push(Command::ConsumeFood {
                        food: food.id,
                        by: insect.id,
                    });
                }
                Some(Occupant::Insect(other)) if is_hostile(insect, &other) => {
                    break (next, DeathCause::HostileCollision { with: other.id });
                }
                _ => {}
            }

            current = next;
        };

        out.push(Command::KillInsect {
            insect: insect.id,
            at: rest,
            cause,
        });
        debug!(
            insect = insect.id.get(),
            food_eaten,
            %rest,
            ?cause,
            "journey planned"
        );

        Some(Journey {
            insect: insect.id,
            food_eaten,
            rest,
            cause,
        })
    }
}

/// Sums the consumable food along a ray, stopping at the board edge.
#[must_use]
pub fn visible_food(
    view: BoardView<'_>,
    origin: Position,
    direction: Direction,
    stride: i32,
) -> u64 {
    let size = view.size();
    let mut total: u64 = 0;
    let mut cursor = origin.stepped(direction, stride);
    while size.contains(cursor) {
        if let Some(Occupant::Food(food)) = view.occupant(cursor) {
            if food.consumable {
                total = total.saturating_add(u64::from(food.value));
            }
        }
        cursor = cursor.stepped(direction, stride);
    }
    total
}

fn is_hostile(traveller: &InsectSnapshot, other: &InsectSnapshot) -> bool {
    other.alive && other.color != traveller.color
}
