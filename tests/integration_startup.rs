//! Integration test to ensure a new game starts in a consistent state.

use dragonquest::{
    GameState, GenerationConfig, Player, Position, QuestResult, RestOutcome, RoomKind,
    TimeOfDay, WeatherKind,
};

#[test]
fn test_basic_startup() -> QuestResult<()> {
    let game = GameState::new("TestHero", &GenerationConfig::new(12345))?;

    assert_eq!(game.player.name, "TestHero");
    assert_eq!(game.player.location, Position::origin());
    assert_eq!(game.turn_count, 0);
    assert_eq!(game.time_of_day(), TimeOfDay::Dawn);
    assert_eq!(game.weather.current(), WeatherKind::Clear);
    assert!(!game.in_combat());
    assert!(!game.is_game_over());

    let start = game.current_room().unwrap();
    assert_eq!(start.kind, RoomKind::Village);
    assert!(start.shop);
    assert!(start.monsters.is_empty());
    assert_eq!(game.world.exits(Position::origin()).len(), 4);
    assert_eq!(game.world.rooms().len(), 25);

    Ok(())
}

#[test]
fn test_player_can_be_created() {
    let player = Player::new("Hero");
    assert_eq!(player.name, "Hero");
    assert_eq!((player.health, player.max_health), (100, 100));
    assert_eq!((player.attack, player.defense), (15, 5));
    assert_eq!((player.level, player.exp, player.exp_to_next), (1, 0, 100));
    assert_eq!(player.gold, 50);
    assert!(player.inventory.is_empty());
    assert!(player.equipped_weapon.is_none() && player.equipped_armor.is_none());
}

#[test]
fn test_same_seed_same_adventure() -> QuestResult<()> {
    let config = GenerationConfig::new(2024);
    let mut first = GameState::new("A", &config)?;
    let mut second = GameState::new("A", &config)?;
    assert_eq!(first.world, second.world);

    first.player.health = 10;
    second.player.health = 10;
    for _ in 0..10 {
        let a = first.rest()?;
        let b = second.rest()?;
        assert_eq!(a, b);
        assert!(matches!(a, RestOutcome::Rested { .. }));
    }
    assert_eq!(first.player, second.player);
    assert_eq!(first.weather.current(), second.weather.current());
    assert_eq!(first.turn_count, 20);
    assert_eq!(first.time_of_day(), TimeOfDay::Midday);

    Ok(())
}

#[test]
fn test_different_seeds_differ() -> QuestResult<()> {
    let worlds: Vec<_> = (0..5)
        .map(|seed| GameState::new("A", &GenerationConfig::new(seed)).map(|g| g.world))
        .collect::<QuestResult<_>>()?;
    assert!(worlds.windows(2).any(|pair| pair[0] != pair[1]));
    Ok(())
}
