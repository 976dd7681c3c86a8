#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Round driver that lets every insect forage once, in placement order.
//!
//! Each insect observes the board as left behind by the insects processed
//! before it: food eaten earlier in the round is gone for everyone after.

use insect_forage_core::{Command, Event, InsectId, InsectReport};
use insect_forage_system_movement::Movement;
use insect_forage_world::{self as world, query, World};
use tracing::{debug, info, info_span};

/// Drives the movement system over every insect on the board.
#[derive(Debug, Default)]
pub struct Round {
    movement: Movement,
    commands: Vec<Command>,
}

impl Round {
    /// Plays a full round, appending every world event to `out_events`.
    ///
    /// Returns one report per insect in placement order.
    pub fn play(&mut self, world: &mut World, out_events: &mut Vec<Event>) -> Vec<InsectReport> {
        let _span = info_span!("round").entered();
        let order = query::insect_ids(world);
        let mut reports = Vec::with_capacity(order.len());

        for insect in order {
            if let Some(report) = self.take_turn(world, insect, out_events) {
                reports.push(report);
            }
        }

        let total: u64 = reports.iter().map(|report| report.food_eaten).sum();
        info!(insects = reports.len(), total_food_eaten = total, "round finished");
        reports
    }

    fn take_turn(
        &mut self,
        world: &mut World,
        insect: InsectId,
        out_events: &mut Vec<Event>,
    ) -> Option<InsectReport> {
        let snapshot = query::insect(world, insect)?;
        let direction = if snapshot.alive {
            self.movement
                .best_direction(query::board_view(world), &snapshot)
                .direction
        } else {
            snapshot.kind.default_direction()
        };

        self.commands.clear();
        let journey = self.movement.plan_travel(
            query::board_view(world),
            &snapshot,
            direction,
            &mut self.commands,
        );
        if journey.is_none() {
            debug!(insect = insect.get(), "insect already dead, skipping travel");
        }

        let first_event = out_events.len();
        for command in self.commands.drain(..) {
            world::apply(world, command, out_events);
        }
        let food_eaten = food_eaten_by(insect, &out_events[first_event..]);
        debug_assert_eq!(
            food_eaten,
            journey.map_or(0, |journey| journey.food_eaten),
            "planned and applied consumption diverged"
        );

        debug!(
            insect = insect.get(),
            color = %snapshot.color,
            kind = %snapshot.kind,
            %direction,
            food_eaten,
            "turn finished"
        );

        Some(InsectReport {
            color: snapshot.color,
            kind: snapshot.kind,
            direction,
            food_eaten,
        })
    }
}

/// Plays a full round on the board and returns the reports.
pub fn simulate(world: &mut World) -> Vec<InsectReport> {
    let mut events = Vec::new();
    Round::default().play(world, &mut events)
}

fn food_eaten_by(insect: InsectId, events: &[Event]) -> u64 {
    events
        .iter()
        .filter_map(|event| match event {
            Event::FoodConsumed { by, value, .. } if *by == insect => Some(u64::from(*value)),
            _ => None,
        })
        .sum()
}
