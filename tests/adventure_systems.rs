//! Quests, crafting, resting and the shop working together.

use dragonquest::{
    CombatAction, CombatState, Direction, GameState, GenerationConfig, ItemDatabase,
    MonsterDatabase, Position, QuestError, QuestId, QuestResult, RestOutcome, Room, RoomKind,
    World,
};

fn goblin_camp() -> QuestResult<World> {
    let bestiary = MonsterDatabase::new();
    let items = ItemDatabase::new();
    let mut world = World::new();
    world.insert_room(Room::village(Position::origin()));

    let mut camp = Room::new(Position::new(-1, 0), RoomKind::Forest);
    for _ in 0..5 {
        camp.monsters.push(bestiary.spawn("goblin")?);
    }
    world.insert_room(camp);

    let mut vault = Room::new(Position::new(1, 0), RoomKind::Treasury);
    vault.items.push(items.instantiate("emerald")?);
    world.insert_room(vault);
    Ok(world)
}

#[test]
fn test_goblin_slayer_rewards_once() -> QuestResult<()> {
    let mut game = GameState::with_world("Slayer", goblin_camp()?, 31)?;
    game.accept_quest(QuestId::GoblinSlayer)?;
    assert!(game.accept_quest(QuestId::GoblinSlayer).is_err());
    game.travel(Direction::West)?;

    let mut gold_from_fights = 0;
    for _ in 0..5 {
        game.start_fight()?;
        let gold_before = game.player.gold;
        let mut last = CombatState::Active;
        while game.in_combat() {
            last = game.combat_action(CombatAction::Attack)?.state;
        }
        assert_eq!(last, CombatState::PlayerVictory);
        gold_from_fights += game.player.gold - gold_before;
    }

    assert_eq!(game.drain_completed_quests(), vec![QuestId::GoblinSlayer]);
    assert!(game.drain_completed_quests().is_empty());
    assert_eq!(game.quests.completed(), &[QuestId::GoblinSlayer]);
    // Quest gold is paid with the fifth kill
    assert!(gold_from_fights >= 5 * 5 + 100);
    assert_eq!(game.turn_count, 5);
    Ok(())
}

#[test]
fn test_gem_pickup_and_crafting() -> QuestResult<()> {
    let mut game = GameState::with_world("Smith", goblin_camp()?, 8)?;
    game.accept_quest(QuestId::TreasureHunter)?;

    game.player.add_item(game.items.instantiate("chain_mail")?);
    match game.craft("reinforced armor") {
        Err(QuestError::MissingMaterials { missing, .. }) => {
            assert_eq!(missing.len(), 1);
            assert_eq!(missing[0].material, "emerald");
        }
        other => panic!("expected missing materials, got {:?}", other),
    }

    game.travel(Direction::East)?;
    game.take_item("emerald")?;
    assert_eq!(game.quests.active()[0].current, 1);

    let plate = game.craft("reinforced_armor")?;
    assert_eq!(plate.name, "Plate Armor");
    assert_eq!(game.player.inventory.len(), 1);
    game.equip("plate")?;
    assert_eq!(dragonquest::total_defense(&game.player), 5 + 15);
    Ok(())
}

#[test]
fn test_rest_and_time_of_day() -> QuestResult<()> {
    let mut game = GameState::with_world("Sleeper", goblin_camp()?, 3)?;
    game.player.health = 1;

    let outcome = game.rest()?;
    let RestOutcome::Rested { healed, .. } = outcome else {
        panic!("village rests are never interrupted");
    };
    assert!((10..=25).contains(&healed));
    assert_eq!(game.player.health, 1 + healed);
    assert_eq!(game.turn_count, 2);
    assert_eq!(game.time_of_day().to_string(), "Midday");

    game.travel(Direction::West)?;
    assert!(matches!(game.rest(), Err(QuestError::InvalidAction(_))));
    Ok(())
}

#[test]
fn test_shop_purchase_in_generated_world() -> QuestResult<()> {
    let mut game = GameState::new("Buyer", &GenerationConfig::new(10))?;
    let stock = game.shop_stock()?;
    let names: Vec<_> = stock.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Health Potion", "Greater Health Potion", "Leather Armor", "Iron Sword"]
    );

    game.buy(0)?;
    game.buy(0)?;
    assert_eq!(game.player.gold, 10);
    assert!(game.buy(0).is_err());
    assert_eq!(game.player.potion_indices().len(), 2);

    game.player.health = 30;
    let (_, healed) = game.use_item("health")?;
    assert_eq!(healed, 30);
    assert_eq!(game.player.health, 60);
    Ok(())
}
