//! # World Generation
//!
//! Builds the square grid of rooms around the starting village. Every room
//! other than the village gets a random kind, then an encounter and loot
//! scaled to its Manhattan distance from the origin.

use crate::{
    Dice, EncounterGenerator, GenerationConfig, Generator, ItemDatabase, ItemGenerator,
    MonsterDatabase, Position, QuestError, QuestResult, Room, RoomKind, World,
};

/// Generates the full explorable world.
pub struct WorldGenerator<'a> {
    items: &'a ItemDatabase,
    monsters: &'a MonsterDatabase,
}

impl<'a> WorldGenerator<'a> {
    pub fn new(items: &'a ItemDatabase, monsters: &'a MonsterDatabase) -> Self {
        Self { items, monsters }
    }

    fn generate_room(
        &self,
        position: Position,
        config: &GenerationConfig,
        dice: &mut dyn Dice,
    ) -> QuestResult<Room> {
        let kind = RoomKind::ALL[dice.pick(RoomKind::ALL.len())];
        let difficulty = position.manhattan_distance(Position::origin());

        let mut room = Room::new(position, kind);
        room.monsters = EncounterGenerator::new(self.monsters, difficulty).generate(config, dice)?;
        room.items = ItemGenerator::new(self.items, kind).generate(config, dice)?;
        Ok(room)
    }
}

impl Generator<World> for WorldGenerator<'_> {
    fn generate(&self, config: &GenerationConfig, dice: &mut dyn Dice) -> QuestResult<World> {
        if config.radius < 0 {
            return Err(QuestError::GenerationFailed(format!(
                "World radius must not be negative, got {}",
                config.radius
            )));
        }

        let mut world = World::new();
        for x in -config.radius..=config.radius {
            for y in -config.radius..=config.radius {
                let position = Position::new(x, y);
                let room = if position == Position::origin() {
                    Room::village(position)
                } else {
                    self.generate_room(position, config, dice)?
                };
                world.insert_room(room);
            }
        }

        self.validate(&world, config)?;
        log::debug!(
            "Generated world of {} rooms ({} with monsters)",
            world.rooms().len(),
            world.rooms().iter().filter(|r| r.has_monsters()).count()
        );
        Ok(world)
    }

    fn validate(&self, world: &World, config: &GenerationConfig) -> QuestResult<()> {
        match world.room(Position::origin()) {
            Some(start) if start.kind == RoomKind::Village && start.shop => {}
            _ => {
                return Err(QuestError::GenerationFailed(
                    "World must start in a village with a shop".to_string(),
                ))
            }
        }

        if world.room(Position::origin()).map_or(false, Room::has_monsters) {
            return Err(QuestError::GenerationFailed(
                "Starting village must be free of monsters".to_string(),
            ));
        }

        if world.rooms().len() != config.room_count() {
            return Err(QuestError::GenerationFailed(format!(
                "Expected {} rooms, generated {}",
                config.room_count(),
                world.rooms().len()
            )));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "WorldGenerator"
    }
}
