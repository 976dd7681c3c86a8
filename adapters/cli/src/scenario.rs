//! Parses and validates the scenario file, loading it into a fresh world.
//!
//! Validation happens line by line and stops at the first failure; the order
//! of the checks decides which message the user sees.

use std::{io, ops::RangeInclusive, str::FromStr};

use insect_forage_core::{
    BoardSize, Command, Event, InsectColor, InsectKind, InvalidColor, InvalidKind,
    PlacementError, Position,
};
use insect_forage_world::{self as world, World};
use thiserror::Error;
use tracing::debug;

const INSECT_COUNT: RangeInclusive<i64> = 1..=16;
const FOOD_COUNT: RangeInclusive<i64> = 1..=200;

/// Reasons a scenario is rejected. `Display` yields the exact report text.
#[derive(Debug, Error)]
pub(crate) enum ScenarioError {
    #[error("Invalid board size")]
    BoardSize,
    #[error("Invalid number of insects")]
    InsectCount,
    #[error("Invalid number of food points")]
    FoodCount,
    #[error(transparent)]
    Color(#[from] InvalidColor),
    #[error(transparent)]
    Kind(#[from] InvalidKind),
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error("Invalid food value")]
    FoodValue,
    #[error("Invalid input format")]
    Malformed,
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Builds a world from the scenario text.
pub(crate) fn load(input: &str) -> Result<World, ScenarioError> {
    let mut reader = LineReader::new(input);

    let size: i64 = reader.single()?;
    let insect_count: i64 = reader.single()?;
    let food_count: i64 = reader.single()?;

    if !INSECT_COUNT.contains(&insect_count) {
        return Err(ScenarioError::InsectCount);
    }
    if !FOOD_COUNT.contains(&food_count) {
        return Err(ScenarioError::FoodCount);
    }
    let size = u32::try_from(size)
        .ok()
        .filter(|size| (BoardSize::MIN..=BoardSize::MAX).contains(size))
        .map(BoardSize::new)
        .ok_or(ScenarioError::BoardSize)?;

    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::ConfigureBoard { size }, &mut events);

    for _ in 0..insect_count {
        let [color, kind, x, y] = reader.fields::<4>()?;
        let position = on_board(size, reader.parse(x)?, reader.parse(y)?)?;
        let color: InsectColor = color.parse()?;
        let kind: InsectKind = kind.parse()?;
        submit(
            &mut world,
            Command::PlaceInsect {
                color,
                kind,
                position,
            },
        )?;
    }

    for _ in 0..food_count {
        let [value, x, y] = reader.fields::<3>()?;
        let value: i32 = reader.parse(value)?;
        let position = on_board(size, reader.parse(x)?, reader.parse(y)?)?;
        let value = u32::try_from(value)
            .ok()
            .filter(|value| *value > 0)
            .ok_or(ScenarioError::FoodValue)?;
        submit(&mut world, Command::PlaceFood { value, position })?;
    }

    Ok(world)
}

fn on_board(size: BoardSize, x: i32, y: i32) -> Result<Position, ScenarioError> {
    let position = Position::new(x, y);
    if size.contains(position) {
        Ok(position)
    } else {
        Err(PlacementError::OutOfBounds.into())
    }
}

fn submit(world: &mut World, command: Command) -> Result<(), ScenarioError> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    match events.as_slice() {
        [Event::PlacementRejected { reason, .. }] => Err((*reason).into()),
        _ => Ok(()),
    }
}

struct LineReader<'a> {
    lines: std::str::Lines<'a>,
    line: usize,
}

impl<'a> LineReader<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines(),
            line: 0,
        }
    }

    fn next_line(&mut self) -> Result<&'a str, ScenarioError> {
        self.line += 1;
        self.lines.next().ok_or_else(|| self.malformed("missing line"))
    }

    fn single<T: FromStr>(&mut self) -> Result<T, ScenarioError> {
        let line = self.next_line()?;
        self.parse(line.trim())
    }

    fn fields<const N: usize>(&mut self) -> Result<[&'a str; N], ScenarioError> {
        let line = self.next_line()?;
        let fields: Vec<&'a str> = line.split_whitespace().collect();
        <[&'a str; N]>::try_from(fields).map_err(|_| self.malformed("wrong number of fields"))
    }

    fn parse<T: FromStr>(&self, field: &str) -> Result<T, ScenarioError> {
        field.parse().map_err(|_| self.malformed("not a number"))
    }

    fn malformed(&self, problem: &str) -> ScenarioError {
        debug!(line = self.line, problem, "malformed scenario");
        ScenarioError::Malformed
    }
}
