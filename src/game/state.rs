//! # Game State Module
//!
//! Central game state management and coordination between all game systems.
//!
//! [`GameState`] owns the player, the world, the template databases, the
//! engines and the single random source. Every player command goes through
//! one of its methods, which keeps the world and the active combat session
//! consistent with each other.

use crate::generation::utils::create_rng;
use crate::{
    config, CombatAction, CombatEngine, CombatEvent, CombatSession, CombatSnapshot,
    CombatState, CraftingBook, Dice, Direction, EquipSlot, GameRng, GenerationConfig,
    Generator, Item, ItemDatabase, MonsterDatabase, Player, ProgressionEngine, QuestError,
    QuestId, QuestLog, QuestResult, Room, RoomKind, RoundReport, VictoryReward, Weather,
    World, WorldGenerator,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time of day, cycling every six turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    Dawn,
    Morning,
    Midday,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    const CYCLE: [TimeOfDay; 6] = [
        TimeOfDay::Dawn,
        TimeOfDay::Morning,
        TimeOfDay::Midday,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    pub fn from_turn(turn: u64) -> Self {
        Self::CYCLE[(turn % Self::CYCLE.len() as u64) as usize]
    }

    /// Monsters are said to be more active in the evening and at night.
    pub fn is_dark(self) -> bool {
        matches!(self, TimeOfDay::Evening | TimeOfDay::Night)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeOfDay::Dawn => "Dawn",
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Midday => "Midday",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        };
        f.write_str(name)
    }
}

/// Something found while resting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestFind {
    Item(Item),
    Gold(u32),
}

/// Result of a rest attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestOutcome {
    /// Strange noises kept the player awake; no time passed
    Interrupted,
    Rested {
        healed: i32,
        weather_changed: bool,
        found: Option<RestFind>,
    },
}

/// Persisted portion of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub player: Player,
}

/// Central game state containing all game data and systems.
pub struct GameState {
    pub player: Player,
    pub world: World,
    pub items: ItemDatabase,
    pub monsters: MonsterDatabase,
    pub weather: Weather,
    pub combat: CombatEngine,
    pub quests: QuestLog,
    pub crafting: CraftingBook,
    /// Turns elapsed; fights and rests advance it
    pub turn_count: u64,
    rng: GameRng,
    session: Option<CombatSession>,
    completed_quests: Vec<QuestId>,
}

impl GameState {
    /// Creates a new game with a freshly generated world.
    ///
    /// # Examples
    ///
    /// ```
    /// use dragonquest::{GameState, GenerationConfig, Position};
    ///
    /// let game = GameState::new("Hero", &GenerationConfig::new(42)).unwrap();
    /// assert_eq!(game.player.location, Position::origin());
    /// assert_eq!(game.world.rooms().len(), 25);
    /// assert!(game.current_room().unwrap().shop);
    /// ```
    pub fn new(player_name: &str, config: &GenerationConfig) -> QuestResult<Self> {
        let items = ItemDatabase::new();
        let monsters = MonsterDatabase::new();
        let mut rng = create_rng(config);
        let world = WorldGenerator::new(&items, &monsters).generate(config, &mut rng)?;
        Self::assemble(player_name, world, items, monsters, rng)
    }

    /// Creates a game in a prepared world, starting at the origin.
    pub fn with_world(player_name: &str, world: World, seed: u64) -> QuestResult<Self> {
        Self::assemble(
            player_name,
            world,
            ItemDatabase::new(),
            MonsterDatabase::new(),
            GameRng::new(seed),
        )
    }

    fn assemble(
        player_name: &str,
        world: World,
        items: ItemDatabase,
        monsters: MonsterDatabase,
        rng: GameRng,
    ) -> QuestResult<Self> {
        let combat = CombatEngine::new(ProgressionEngine::from_database(&items)?);
        log::info!("{} begins the adventure (seed {})", player_name, rng.seed());

        Ok(Self {
            player: Player::new(player_name),
            world,
            items,
            monsters,
            weather: Weather::new(),
            combat,
            quests: QuestLog::new(),
            crafting: CraftingBook::new(),
            turn_count: 0,
            rng,
            session: None,
            completed_quests: Vec::new(),
        })
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.world.room(self.player.location)
    }

    pub fn session(&self) -> Option<&CombatSession> {
        self.session.as_ref()
    }

    pub fn in_combat(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_game_over(&self) -> bool {
        !self.player.is_alive()
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from_turn(self.turn_count)
    }

    /// Quests finished since the last call, with rewards already credited.
    pub fn drain_completed_quests(&mut self) -> Vec<QuestId> {
        std::mem::take(&mut self.completed_quests)
    }

    fn ensure_not_in_combat(&self) -> QuestResult<()> {
        if self.in_combat() {
            return Err(QuestError::InvalidAction(
                "You are in the middle of a fight".to_string(),
            ));
        }
        Ok(())
    }

    fn ensure_alive(&self) -> QuestResult<()> {
        if self.is_game_over() {
            return Err(QuestError::InvalidAction(format!(
                "{} has fallen; load a save to continue",
                self.player.name
            )));
        }
        Ok(())
    }

    fn room_has_monsters(&self) -> bool {
        self.current_room().map_or(false, Room::has_monsters)
    }

    /// Moves the player one room in `direction`.
    pub fn travel(&mut self, direction: Direction) -> QuestResult<&Room> {
        self.ensure_alive()?;
        self.ensure_not_in_combat()?;
        if self.room_has_monsters() {
            return Err(QuestError::InvalidAction(
                "You cannot leave while enemies are present! Fight or flee!".to_string(),
            ));
        }

        let destination = self.player.location.step(direction);
        if !self.world.contains(destination) {
            return Err(QuestError::InvalidAction("You cannot go that way".to_string()));
        }

        self.player.location = destination;
        log::debug!("{} travels {} to {}", self.player.name, direction.name(), destination);
        self.world
            .room(destination)
            .ok_or_else(|| QuestError::InvalidAction("You cannot go that way".to_string()))
    }

    /// Engages the first monster in the current room.
    pub fn start_fight(&mut self) -> QuestResult<CombatSnapshot> {
        self.ensure_alive()?;
        self.ensure_not_in_combat()?;
        let monsters = self
            .world
            .monsters_at_mut(self.player.location)
            .ok_or(QuestError::NoActiveEncounter)?;
        let session = self.combat.begin(monsters, &self.weather)?;
        let snapshot = session.snapshot(&self.player);
        self.session = Some(session);
        Ok(snapshot)
    }

    /// Resolves one round of the active fight.
    ///
    /// When the fight ends the monster is returned to the room unless it
    /// died, and a victory or escape advances the turn counter. Victory loot
    /// counts towards collect quests like a pickup does.
    pub fn combat_action(&mut self, action: CombatAction) -> QuestResult<RoundReport> {
        self.ensure_alive()?;
        let session = self.session.as_mut().ok_or(QuestError::NoActiveEncounter)?;
        let report = self
            .combat
            .resolve(session, &mut self.player, action, &mut self.rng)?;

        if report.state.is_terminal() {
            if let Some(session) = self.session.take() {
                let name = match self.world.monsters_at_mut(self.player.location) {
                    Some(monsters) => self.combat.finish(session, monsters),
                    None => session.monster().name.clone(),
                };

                match report.state {
                    CombatState::PlayerVictory => {
                        let done = self.quests.record_kill(&mut self.player, &name);
                        self.completed_quests.extend(done);
                        for event in &report.events {
                            if let CombatEvent::Rewarded(VictoryReward { loot: Some(item), .. }) = event {
                                let done = self.quests.record_collect(&mut self.player, &item.name);
                                self.completed_quests.extend(done);
                            }
                        }
                        self.turn_count += 1;
                    }
                    CombatState::PlayerFled => self.turn_count += 1,
                    CombatState::PlayerDefeated | CombatState::Active => {}
                }
            }
        }

        Ok(report)
    }

    /// Rests in the current room.
    pub fn rest(&mut self) -> QuestResult<RestOutcome> {
        self.ensure_alive()?;
        self.ensure_not_in_combat()?;
        if self.room_has_monsters() {
            return Err(QuestError::InvalidAction(
                "You cannot rest while enemies are nearby!".to_string(),
            ));
        }

        let kind = self.current_room().map(|room| room.kind);
        if kind != Some(RoomKind::Village) && self.rng.chance(config::REST_INTERRUPT_CHANCE) {
            log::debug!("Rest interrupted at {}", self.player.location);
            return Ok(RestOutcome::Interrupted);
        }

        let (low, high) = config::REST_HEAL;
        let healed = self.player.heal(self.rng.roll(low, high));
        self.turn_count += config::REST_TURNS;
        let weather_changed = self.weather.maybe_transition(&mut self.rng);

        let searchable = matches!(kind, Some(RoomKind::Forest | RoomKind::Ruins));
        let found = if searchable && self.rng.chance(config::REST_FIND_CHANCE) {
            Some(self.rest_find()?)
        } else {
            None
        };

        log::debug!(
            "{} rested for {} health, turn {}",
            self.player.name,
            healed,
            self.turn_count
        );
        Ok(RestOutcome::Rested {
            healed,
            weather_changed,
            found,
        })
    }

    fn rest_find(&mut self) -> QuestResult<RestFind> {
        if self.rng.pick(2) == 0 {
            let potion = self.items.instantiate("health_potion")?;
            self.player.add_item(potion.clone());
            Ok(RestFind::Item(potion))
        } else {
            let (low, high) = config::REST_FIND_GOLD;
            let gold = self.rng.roll(low, high).max(0) as u32;
            self.player.gold += gold;
            Ok(RestFind::Gold(gold))
        }
    }

    /// Picks up the first room item whose name contains `fragment`.
    pub fn take_item(&mut self, fragment: &str) -> QuestResult<Item> {
        self.ensure_alive()?;
        self.ensure_not_in_combat()?;
        let items = self
            .world
            .items_at_mut(self.player.location)
            .filter(|items| !items.is_empty())
            .ok_or_else(|| QuestError::InvalidAction("There are no items here".to_string()))?;
        let index = items
            .iter()
            .position(|item| item.matches(fragment))
            .ok_or_else(|| QuestError::InvalidAction("That item is not here".to_string()))?;

        let item = items.remove(index);
        self.player.add_item(item.clone());
        let done = self.quests.record_collect(&mut self.player, &item.name);
        self.completed_quests.extend(done);
        log::debug!("{} picked up {}", self.player.name, item.name);
        Ok(item)
    }

    fn find_in_inventory(&self, fragment: &str) -> QuestResult<usize> {
        self.player
            .find_item(fragment)
            .ok_or_else(|| QuestError::InvalidAction("You don't have that item".to_string()))
    }

    /// Drinks a potion outside of combat. Returns it with the health restored.
    pub fn use_item(&mut self, fragment: &str) -> QuestResult<(Item, i32)> {
        self.ensure_alive()?;
        self.ensure_not_in_combat()?;
        let index = self.find_in_inventory(fragment)?;
        self.player.drink_potion(index)
    }

    /// Equips a weapon or armor, returning its name and slot.
    pub fn equip(&mut self, fragment: &str) -> QuestResult<(String, EquipSlot)> {
        self.ensure_alive()?;
        self.ensure_not_in_combat()?;
        let index = self.find_in_inventory(fragment)?;
        let name = self.player.inventory[index].name.clone();
        let slot = self.player.equip(index)?;
        Ok((name, slot))
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> QuestResult<String> {
        self.ensure_alive()?;
        self.ensure_not_in_combat()?;
        self.player.unequip(slot)
    }

    /// Items for sale in the current room, in menu order.
    pub fn shop_stock(&self) -> QuestResult<Vec<Item>> {
        if !self.current_room().map_or(false, |room| room.shop) {
            return Err(QuestError::InvalidAction("There's no shop here".to_string()));
        }
        config::SHOP_STOCK
            .iter()
            .map(|key| self.items.instantiate(key))
            .collect()
    }

    /// Buys the stock item at `index`.
    pub fn buy(&mut self, index: usize) -> QuestResult<Item> {
        self.ensure_alive()?;
        self.ensure_not_in_combat()?;
        let item = self
            .shop_stock()?
            .into_iter()
            .nth(index)
            .ok_or_else(|| QuestError::InvalidAction("Invalid choice".to_string()))?;
        if self.player.gold < item.value {
            return Err(QuestError::InvalidAction(
                "You don't have enough gold!".to_string(),
            ));
        }

        self.player.gold -= item.value;
        self.player.add_item(item.clone());
        log::debug!("{} bought {} for {} gold", self.player.name, item.name, item.value);
        Ok(item)
    }

    pub fn craft(&mut self, recipe: &str) -> QuestResult<Item> {
        self.ensure_alive()?;
        self.ensure_not_in_combat()?;
        self.crafting.craft(recipe, &mut self.player, &self.items)
    }

    pub fn accept_quest(&mut self, id: QuestId) -> QuestResult<()> {
        self.ensure_alive()?;
        self.quests.accept(id)
    }

    /// Saves the player to JSON.
    pub fn save_to_json(&self) -> QuestResult<String> {
        let data = SaveData {
            player: self.player.clone(),
        };
        serde_json::to_string_pretty(&data).map_err(QuestError::from)
    }

    /// Replaces the player with one loaded from JSON.
    ///
    /// The world is not part of a save; a player whose location does not
    /// exist in this world is rejected, as is one that is dead or has more
    /// health than its maximum. Loading is allowed after a defeat.
    pub fn load_player_from_json(&mut self, json: &str) -> QuestResult<()> {
        self.ensure_not_in_combat()?;
        let data: SaveData = serde_json::from_str(json)?;
        if !self.world.contains(data.player.location) {
            log::warn!(
                "Rejected save for {}: location {} is outside the world",
                data.player.name,
                data.player.location
            );
            return Err(QuestError::InvalidAction(format!(
                "Saved location {} does not exist",
                data.player.location
            )));
        }

        let player = &data.player;
        if player.max_health <= 0 || player.health <= 0 || player.health > player.max_health {
            log::warn!(
                "Rejected save for {}: health {}/{} is out of range",
                player.name,
                player.health,
                player.max_health
            );
            return Err(QuestError::InvalidAction(format!(
                "Saved health {}/{} is not valid",
                player.health, player.max_health
            )));
        }

        log::info!("Loaded {} (level {})", data.player.name, data.player.level);
        self.player = data.player;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Monster, Position};

    fn goblin() -> Monster {
        MonsterDatabase::new().spawn("goblin").unwrap()
    }

    /// Village at the origin, a forest to the north with one goblin, ruins to
    /// the east holding a ruby.
    fn test_world() -> World {
        let mut world = World::new();
        world.insert_room(Room::village(Position::origin()));

        let mut forest = Room::new(Position::new(0, 1), RoomKind::Forest);
        forest.monsters.push(goblin());
        world.insert_room(forest);

        let mut ruins = Room::new(Position::new(1, 0), RoomKind::Ruins);
        ruins.items.push(ItemDatabase::new().instantiate("ruby").unwrap());
        world.insert_room(ruins);
        world
    }

    fn test_game() -> GameState {
        GameState::with_world("Hero", test_world(), 7).unwrap()
    }

    /// Attacks until the fight is over.
    fn fight_to_the_end(game: &mut GameState) -> CombatState {
        game.start_fight().unwrap();
        loop {
            let report = game.combat_action(CombatAction::Attack).unwrap();
            if report.state.is_terminal() {
                return report.state;
            }
        }
    }

    #[test]
    fn test_time_of_day_cycle() {
        assert_eq!(TimeOfDay::from_turn(0), TimeOfDay::Dawn);
        assert_eq!(TimeOfDay::from_turn(2), TimeOfDay::Midday);
        assert_eq!(TimeOfDay::from_turn(5), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_turn(6), TimeOfDay::Dawn);
        assert!(TimeOfDay::Evening.is_dark());
        assert!(!TimeOfDay::Morning.is_dark());
    }

    #[test]
    fn test_travel_rules() {
        let mut game = test_game();
        assert!(game.travel(Direction::West).is_err());

        let room = game.travel(Direction::North).unwrap();
        assert_eq!(room.kind, RoomKind::Forest);

        // Blocked by the goblin
        assert!(matches!(
            game.travel(Direction::South),
            Err(QuestError::InvalidAction(_))
        ));
        assert_eq!(game.player.location, Position::new(0, 1));
    }

    #[test]
    fn test_no_fight_in_village() {
        let mut game = test_game();
        assert!(matches!(game.start_fight(), Err(QuestError::NoActiveEncounter)));
        assert!(matches!(
            game.combat_action(CombatAction::Attack),
            Err(QuestError::NoActiveEncounter)
        ));
    }

    #[test]
    fn test_fight_removes_monster_from_room() {
        let mut game = test_game();
        game.travel(Direction::North).unwrap();

        let snapshot = game.start_fight().unwrap();
        assert_eq!(snapshot.monster_name, "Goblin");
        assert_eq!(snapshot.round, 1);
        assert!(game.world.monsters_at(game.player.location).is_empty());
        assert!(game.start_fight().is_err());
        assert!(game.rest().is_err());

        game.session = None;
        game.world
            .monsters_at_mut(game.player.location)
            .unwrap()
            .push(goblin());
        let state = fight_to_the_end(&mut game);
        let remaining = game.world.monsters_at(game.player.location).len();
        match state {
            CombatState::PlayerVictory => assert_eq!(remaining, 0),
            _ => assert_eq!(remaining, 1),
        }
        assert!(!game.in_combat());
    }

    #[test]
    fn test_victory_advances_turn_and_quest() {
        let mut game = test_game();
        game.accept_quest(QuestId::GoblinSlayer).unwrap();
        game.travel(Direction::North).unwrap();

        let state = fight_to_the_end(&mut game);
        assert_eq!(state, CombatState::PlayerVictory);
        assert_eq!(game.turn_count, 1);
        assert_eq!(game.quests.active()[0].current, 1);
        assert!(game.drain_completed_quests().is_empty());

        // The room is clear, so the player may leave
        assert!(game.travel(Direction::South).is_ok());
    }

    #[test]
    fn test_rejected_combat_action_keeps_session() {
        let mut game = test_game();
        game.travel(Direction::North).unwrap();
        game.start_fight().unwrap();

        assert!(game.combat_action(CombatAction::UseItem(0)).is_err());
        let session = game.session().unwrap();
        assert_eq!(session.round(), 1);
        assert_eq!(session.state(), CombatState::Active);
    }

    #[test]
    fn test_rest_in_village_is_never_interrupted() {
        let mut game = test_game();
        game.player.health = 40;
        for rest in 1..=5u64 {
            let before = game.player.health;
            match game.rest().unwrap() {
                RestOutcome::Rested { healed, found, .. } => {
                    assert!(healed >= 10 || game.player.health == game.player.max_health);
                    assert_eq!(game.player.health, before + healed);
                    assert!(found.is_none());
                }
                RestOutcome::Interrupted => panic!("village rests are safe"),
            }
            assert_eq!(game.turn_count, rest * 2);
        }
    }

    #[test]
    fn test_rest_outside_village() {
        let mut game = test_game();
        game.travel(Direction::East).unwrap();
        let mut interrupted = 0;
        for _ in 0..100 {
            let turn = game.turn_count;
            match game.rest().unwrap() {
                RestOutcome::Interrupted => {
                    interrupted += 1;
                    assert_eq!(game.turn_count, turn);
                }
                RestOutcome::Rested { .. } => assert_eq!(game.turn_count, turn + 2),
            }
        }
        assert!(interrupted > 0 && interrupted < 100);
    }

    #[test]
    fn test_take_item_counts_towards_quest() {
        let mut game = test_game();
        game.accept_quest(QuestId::TreasureHunter).unwrap();
        assert!(game.take_item("ruby").is_err());

        game.travel(Direction::East).unwrap();
        assert!(game.take_item("sword").is_err());
        let ruby = game.take_item("RU").unwrap();
        assert_eq!(ruby.name, "Ruby");
        assert_eq!(game.player.count_key("ruby"), 1);
        assert!(game.world.items_at(game.player.location).is_empty());
        assert_eq!(game.quests.active()[0].current, 1);
    }

    #[test]
    fn test_shop_and_equipment() {
        let mut game = test_game();
        let stock = game.shop_stock().unwrap();
        assert_eq!(stock.len(), 4);
        assert_eq!(stock[0].name, "Health Potion");

        let armor = game.buy(2).unwrap();
        assert_eq!(armor.name, "Leather Armor");
        assert_eq!(game.player.gold, 0);
        assert!(matches!(game.buy(0), Err(QuestError::InvalidAction(_))));
        assert!(game.buy(9).is_err());

        let (name, slot) = game.equip("leather").unwrap();
        assert_eq!((name.as_str(), slot), ("Leather Armor", EquipSlot::Armor));
        assert!(game.player.inventory.is_empty());
        assert_eq!(game.unequip(EquipSlot::Armor).unwrap(), "Leather Armor");
        assert!(game.unequip(EquipSlot::Weapon).is_err());

        game.travel(Direction::East).unwrap();
        assert!(game.shop_stock().is_err());
    }

    #[test]
    fn test_use_item() {
        let mut game = test_game();
        game.player.health = 50;
        game.player.add_item(game.items.instantiate("health_potion").unwrap());
        game.player.add_item(game.items.instantiate("ruby").unwrap());

        assert!(game.use_item("ruby").is_err());
        assert!(game.use_item("elixir").is_err());
        let (potion, healed) = game.use_item("potion").unwrap();
        assert_eq!(potion.name, "Health Potion");
        assert_eq!(healed, 30);
        assert_eq!(game.player.inventory.len(), 1);
    }

    #[test]
    fn test_fallen_player_cannot_act() {
        let mut game = test_game();
        let save = game.save_to_json().unwrap();
        game.travel(Direction::North).unwrap();
        game.player.health = 0;
        assert!(game.is_game_over());

        let fallen = |result: QuestResult<()>| matches!(result, Err(QuestError::InvalidAction(_)));
        assert!(fallen(game.start_fight().map(|_| ())));
        assert!(fallen(game.travel(Direction::South).map(|_| ())));
        assert!(fallen(game.rest().map(|_| ())));
        assert!(fallen(game.use_item("potion").map(|_| ())));
        assert!(fallen(game.craft("super_potion").map(|_| ())));
        assert!(fallen(game.accept_quest(QuestId::DragonSlayer)));
        assert_eq!(game.world.monsters_at(game.player.location).len(), 1);
        assert_eq!(game.player.exp, 0);

        // Loading a save is the way back
        game.load_player_from_json(&save).unwrap();
        assert!(!game.is_game_over());
        assert!(game.travel(Direction::East).is_ok());
    }

    #[test]
    fn test_fallen_player_cannot_finish_a_fight() {
        let mut game = test_game();
        game.travel(Direction::North).unwrap();
        game.start_fight().unwrap();
        game.player.health = 0;

        assert!(matches!(
            game.combat_action(CombatAction::Attack),
            Err(QuestError::InvalidAction(_))
        ));
        assert_eq!(game.session().unwrap().round(), 1);
        assert_eq!(game.turn_count, 0);
    }

    #[test]
    fn test_victory_loot_counts_towards_collection() {
        let mut game = test_game();
        let ruby = game.items.instantiate("ruby").unwrap();
        game.combat = CombatEngine::new(ProgressionEngine::new(vec![ruby]));
        game.accept_quest(QuestId::TreasureHunter).unwrap();
        game.travel(Direction::North).unwrap();
        game.world.monsters_at_mut(game.player.location).unwrap().clear();

        let mut looted = 0;
        for _ in 0..200 {
            game.world
                .monsters_at_mut(game.player.location)
                .unwrap()
                .push(Monster::new("Rat", 1, 0, 0, 0, (0, 0), ""));
            assert_eq!(fight_to_the_end(&mut game), CombatState::PlayerVictory);
            looted = game.player.count_key("ruby");
            if looted == 3 {
                break;
            }
            assert_eq!(game.quests.active()[0].current as usize, looted);
        }

        assert_eq!(looted, 3);
        assert_eq!(game.quests.completed(), &[QuestId::TreasureHunter]);
        assert_eq!(game.drain_completed_quests(), vec![QuestId::TreasureHunter]);
        assert_eq!(game.player.gold, 50 + 200);
    }

    #[test]
    fn test_save_and_load_player() {
        let mut game = test_game();
        game.player.gold = 777;
        game.player.add_item(game.items.instantiate("diamond").unwrap());
        let json = game.save_to_json().unwrap();

        let mut other = test_game();
        other.load_player_from_json(&json).unwrap();
        assert_eq!(other.player, game.player);

        let mut stray = game.player.clone();
        stray.location = Position::new(40, 40);
        let json = serde_json::to_string(&SaveData { player: stray }).unwrap();
        assert!(other.load_player_from_json(&json).is_err());
        assert_eq!(other.player.gold, 777);
        assert!(matches!(
            other.load_player_from_json("{ not json"),
            Err(QuestError::Serde(_))
        ));
    }
}
