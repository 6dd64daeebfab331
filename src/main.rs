//! # Dragon's Quest Main Entry Point
//!
//! Parses command line arguments, sets up logging and runs the text command
//! loop on standard input.

use clap::Parser;
use dragonquest::{
    config, CombatAction, CombatEvent, CombatSnapshot, Direction, EquipSlot, GameState,
    GenerationConfig, QuestError, QuestId, QuestResult, RestFind, RestOutcome, RoundReport,
    TimeOfDay,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Command line arguments for Dragon's Quest.
#[derive(Parser, Debug)]
#[command(name = "dragonquest")]
#[command(about = "A turn-based text adventure with combat, quests and crafting")]
#[command(version)]
struct Args {
    /// Random seed for world generation and combat
    #[arg(short, long)]
    seed: Option<u64>,

    /// Name of the hero
    #[arg(short, long, default_value = "Adventurer")]
    name: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Save file used by the save and load commands
    #[arg(long, default_value = config::SAVE_FILE_NAME)]
    save_file: PathBuf,
}

fn main() -> QuestResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Starting Dragon's Quest v{} with seed {}", dragonquest::VERSION, seed);

    let mut game = GameState::new(&args.name, &GenerationConfig::new(seed))?;
    let mut input = Input::new();

    println!("Welcome to Dragon's Quest!");
    println!("Your adventure begins in a peaceful village...");
    println!("Type 'help' for a list of commands.");
    look(&game);

    while let Some(line) = input.prompt("\n> ")? {
        let (command, rest) = split_command(&line);
        let outcome = match command.as_str() {
            "" => Ok(()),
            "quit" | "exit" => break,
            "help" | "h" => {
                print_help();
                Ok(())
            }
            "look" | "l" => {
                look(&game);
                Ok(())
            }
            "go" => rest
                .parse::<Direction>()
                .and_then(|direction| go(&mut game, direction)),
            "north" | "n" | "south" | "s" | "east" | "e" | "west" | "w" => command
                .parse::<Direction>()
                .and_then(|direction| go(&mut game, direction)),
            "inventory" | "i" => {
                inventory(&game);
                Ok(())
            }
            "stats" => {
                stats(&game);
                Ok(())
            }
            "take" | "get" => game.take_item(&rest).map(|item| {
                println!("You picked up {}.", item.name);
            }),
            "use" => game.use_item(&rest).map(|(item, healed)| {
                println!("You used {} and restored {} health!", item.name, healed);
            }),
            "equip" => game.equip(&rest).map(|(name, _)| {
                println!("You equipped {}.", name);
            }),
            "unequip" => rest
                .parse::<EquipSlot>()
                .and_then(|slot| game.unequip(slot))
                .map(|name| println!("You unequipped {}.", name)),
            "shop" => shop(&game),
            "buy" => parse_choice(&rest)
                .and_then(|index| game.buy(index))
                .map(|item| println!("You bought {}!", item.name)),
            "fight" | "f" => fight(&mut game, &mut input),
            "rest" => game.rest().map(|outcome| print_rest(&outcome)),
            "quests" | "q" => {
                quests(&game);
                Ok(())
            }
            "accept" => rest
                .parse::<QuestId>()
                .and_then(|id| game.accept_quest(id))
                .map(|()| println!("Quest accepted.")),
            "craft" => game.craft(&rest).map(|item| {
                println!("Successfully crafted {}!", item.name);
            }),
            "recipes" => {
                recipes(&game);
                Ok(())
            }
            "weather" => {
                weather(&game);
                Ok(())
            }
            "time" => {
                time(&game);
                Ok(())
            }
            "save" => save(&game, &args.save_file),
            "load" => load(&mut game, &args.save_file),
            _ => {
                println!("Unknown command. Type 'help' for a list of commands.");
                Ok(())
            }
        };

        if let Err(error) = outcome {
            report_error(error);
        }
        announce_quests(&mut game);

        if game.is_game_over() {
            println!("\nYou have been defeated... Game over.");
            break;
        }
    }

    println!("Thanks for playing Dragon's Quest!");
    Ok(())
}

/// Initializes env_logger at the requested level, writing to stderr.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        "off" => log::LevelFilter::Off,
        _ => log::LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .init();
}

/// Line reader over stdin.
struct Input {
    lines: io::Lines<io::StdinLock<'static>>,
}

impl Input {
    fn new() -> Self {
        Self {
            lines: io::stdin().lock().lines(),
        }
    }

    /// Prints `prompt` and reads one line; `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> QuestResult<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;
        match self.lines.next() {
            Some(line) => Ok(Some(line?.trim().to_string())),
            None => Ok(None),
        }
    }
}

fn split_command(line: &str) -> (String, String) {
    let mut parts = line.trim().splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default().to_lowercase();
    let rest = parts.next().unwrap_or_default().trim().to_string();
    (command, rest)
}

/// Parses a 1-based menu choice into an index.
fn parse_choice(text: &str) -> QuestResult<usize> {
    match text.trim().parse::<usize>() {
        Ok(choice) if choice > 0 => Ok(choice - 1),
        _ => Err(QuestError::InvalidAction("Invalid choice!".to_string())),
    }
}

/// Prints a failed command; the game carries on.
fn report_error(error: QuestError) {
    match error {
        QuestError::InvalidAction(message) => println!("{}", message),
        other => println!("{}", other),
    }
}

fn announce_quests(game: &mut GameState) {
    for id in game.drain_completed_quests() {
        let definition = id.definition();
        println!(
            "Quest complete: {}! You receive {} gold and {} exp.",
            definition.name, definition.reward_gold, definition.reward_exp
        );
    }
}

fn look(game: &GameState) {
    let Some(room) = game.current_room() else {
        println!("You are lost in a featureless void.");
        return;
    };

    println!("\n{} ({})", room.kind, room.position);
    println!("{}", room.description);
    println!("{}", game.weather.description());

    if !room.monsters.is_empty() {
        println!("Enemies here:");
        for monster in &room.monsters {
            println!("  {} ({}/{} hp)", monster.name, monster.health, monster.max_health);
        }
    }
    if !room.items.is_empty() {
        println!("Items here:");
        for item in &room.items {
            println!("  {}", item.name);
        }
    }
    if room.shop {
        println!("A merchant is open for business. Type 'shop' to browse.");
    }

    let exits: Vec<_> = game
        .world
        .exits(room.position)
        .into_iter()
        .map(Direction::name)
        .collect();
    println!("Exits: {}", exits.join(", "));
}

fn go(game: &mut GameState, direction: Direction) -> QuestResult<()> {
    game.travel(direction)?;
    println!("You travel {}...", direction.name());
    look(game);
    Ok(())
}

fn inventory(game: &GameState) {
    let player = &game.player;
    println!("\nGold: {}", player.gold);
    match &player.equipped_weapon {
        Some(item) => println!("Weapon: {} (+{} attack)", item.name, item.effect),
        None => println!("Weapon: none"),
    }
    match &player.equipped_armor {
        Some(item) => println!("Armor: {} (+{} defense)", item.name, item.effect),
        None => println!("Armor: none"),
    }
    if player.inventory.is_empty() {
        println!("Your pack is empty.");
    }
    for (index, item) in player.inventory.iter().enumerate() {
        println!("  {}. {} [{}] - {}", index + 1, item.name, item.item_type, item.description);
    }
}

fn stats(game: &GameState) {
    let player = &game.player;
    println!("\n{} - Level {}", player.name, player.level);
    println!("Health: {}", bar(player.health, player.max_health));
    println!("Experience: {}/{}", player.exp, player.exp_to_next);
    println!(
        "Attack: {} ({} base)",
        dragonquest::total_attack(player),
        player.attack
    );
    println!(
        "Defense: {} ({} base)",
        dragonquest::total_defense(player),
        player.defense
    );
    println!("Gold: {}", player.gold);
}

fn bar(current: i32, maximum: i32) -> String {
    const LENGTH: i32 = 20;
    if maximum <= 0 {
        return "[ERROR]".to_string();
    }
    let filled = (current.clamp(0, maximum) * LENGTH / maximum) as usize;
    format!(
        "[{}{}] {}/{}",
        "#".repeat(filled),
        "-".repeat(LENGTH as usize - filled),
        current,
        maximum
    )
}

fn shop(game: &GameState) -> QuestResult<()> {
    let stock = game.shop_stock()?;
    println!("\nWelcome to the Village Shop! Your gold: {}", game.player.gold);
    for (index, item) in stock.iter().enumerate() {
        println!("  {}. {} - {} gold", index + 1, item.name, item.value);
        println!("     {}", item.description);
    }
    println!("Type 'buy <number>' to purchase.");
    Ok(())
}

fn fight(game: &mut GameState, input: &mut Input) -> QuestResult<()> {
    let snapshot = game.start_fight()?;
    println!("\nBattle begins! You face a {}!", snapshot.monster_name);

    while game.in_combat() {
        if let Some(session) = game.session() {
            print_snapshot(&session.snapshot(&game.player));
        }
        println!("Actions: (a)ttack, (d)efend, (r)un, (u)se <potion number>");
        print_potions(game);

        let Some(line) = input.prompt("Action: ")? else {
            break;
        };
        let action = match line.parse::<CombatAction>() {
            Ok(CombatAction::UseItem(choice)) => match game.player.potion_indices().get(choice) {
                Some(&index) => CombatAction::UseItem(index),
                None => {
                    println!("Invalid choice!");
                    continue;
                }
            },
            Ok(action) => action,
            Err(error) => {
                report_error(error);
                continue;
            }
        };

        match game.combat_action(action) {
            Ok(report) => print_round(&report),
            Err(error) => report_error(error),
        }
    }
    Ok(())
}

fn print_potions(game: &GameState) {
    for (number, index) in game.player.potion_indices().into_iter().enumerate() {
        let potion = &game.player.inventory[index];
        println!("  {}. {} (+{} hp)", number + 1, potion.name, potion.effect);
    }
}

fn print_snapshot(snapshot: &CombatSnapshot) {
    println!("\n--- Round {} ({} weather) ---", snapshot.round, snapshot.weather);
    println!(
        "You: {}",
        bar(snapshot.player_health, snapshot.player_max_health)
    );
    println!(
        "{}: {}",
        snapshot.monster_name,
        bar(snapshot.monster_health, snapshot.monster_max_health)
    );
}

fn print_round(report: &RoundReport) {
    for event in &report.events {
        match event {
            CombatEvent::PlayerHit {
                damage, critical, ..
            } => {
                if *critical {
                    println!("Critical hit!");
                }
                println!("You deal {} damage!", damage);
            }
            CombatEvent::Guarded => println!("You raise your guard."),
            CombatEvent::EscapeSucceeded => println!("You successfully escaped!"),
            CombatEvent::EscapeFailed { .. } => println!("You couldn't escape!"),
            CombatEvent::PotionUsed { item, healed } => {
                println!("You used {} and restored {} health!", item, healed)
            }
            CombatEvent::MonsterHit {
                damage, guarded, ..
            } => {
                if *guarded {
                    println!("Your defense reduces the damage!");
                }
                println!("The enemy attacks you for {} damage!", damage);
            }
            CombatEvent::MonsterDefeated { name } => println!("You defeated the {}!", name),
            CombatEvent::Rewarded(reward) => {
                if reward.quick_victory {
                    println!("Quick victory bonus!");
                }
                println!("You gained {} exp and {} gold!", reward.exp, reward.gold);
                if let Some(item) = &reward.loot {
                    println!("You found a {}!", item.name);
                }
                if let Some(level) = &reward.level_up {
                    println!(
                        "LEVEL UP! You are now level {}! (+{} hp, +{} attack, +{} defense)",
                        level.new_level, level.health_gain, level.attack_gain, level.defense_gain
                    );
                }
            }
            CombatEvent::PlayerDefeated { killer } => {
                println!("You have been slain by the {}...", killer)
            }
        }
    }
}

fn print_rest(outcome: &RestOutcome) {
    match outcome {
        RestOutcome::Interrupted => {
            println!("You try to rest, but strange noises keep you awake.")
        }
        RestOutcome::Rested {
            healed,
            weather_changed,
            found,
        } => {
            println!("You rest and recover {} health.", healed);
            println!("Time passes...");
            if *weather_changed {
                println!("The weather shifts while you sleep.");
            }
            match found {
                Some(RestFind::Item(item)) => println!("While resting, you found a {}!", item.name),
                Some(RestFind::Gold(gold)) => {
                    println!("While resting, you found {} gold coins!", gold)
                }
                None => {}
            }
        }
    }
}

fn quests(game: &GameState) {
    let log = &game.quests;
    println!("\nQuest Log:");
    if !log.active().is_empty() {
        println!("  Active:");
        for progress in log.active() {
            let definition = progress.id.definition();
            println!(
                "  * {} ({}/{}) - {}",
                definition.name, progress.current, definition.count, definition.description
            );
        }
    }

    let available = log.available();
    if !available.is_empty() {
        println!("  Available (type 'accept <name>'):");
        for id in available {
            let definition = id.definition();
            println!(
                "  * {} - Reward: {} gold, {} exp - {}",
                definition.name, definition.reward_gold, definition.reward_exp, definition.description
            );
        }
    }
    println!("  Completed: {}", log.completed().len());
}

fn recipes(game: &GameState) {
    println!("\nAvailable Recipes:");
    for recipe in game.crafting.recipes() {
        println!("\n  {} ({}): {}", recipe.name, recipe.id, recipe.description);
        for (material, count) in recipe.materials {
            println!("    {} x{}", material, count);
        }
    }
}

fn weather(game: &GameState) {
    let current = game.weather.current();
    println!("\nCurrent Weather: {}", current);
    println!("{}", current.description());

    let modifier = current.combat_modifier();
    if modifier < 1.0 {
        println!("Combat penalty: {}%", ((1.0 - modifier) * 100.0).round());
    }
}

fn time(game: &GameState) {
    let now = game.time_of_day();
    println!("\nTime: {}", now);
    println!("Turns elapsed: {}", game.turn_count);
    if now.is_dark() {
        println!("Monsters are more active during the {}.", now.to_string().to_lowercase());
    } else if now == TimeOfDay::Dawn {
        println!("A new day begins. You feel refreshed.");
    }
}

fn save(game: &GameState, path: &Path) -> QuestResult<()> {
    std::fs::write(path, game.save_to_json()?)?;
    println!("Game saved successfully!");
    Ok(())
}

fn load(game: &mut GameState, path: &Path) -> QuestResult<()> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            println!("No save file found.");
            return Ok(());
        }
        Err(error) => return Err(error.into()),
    };
    game.load_player_from_json(&json)?;
    println!("Game loaded successfully!");
    look(game);
    Ok(())
}

fn print_help() {
    println!("\nAvailable Commands:");
    println!("  Movement: north/n, south/s, east/e, west/w, go <direction>");
    println!("  Combat: fight/f");
    println!("  Items: take/get <item>, use <item>, equip <item>, unequip <weapon|armor>");
    println!("  Info: look/l, inventory/i, stats, quests/q, weather, time, recipes");
    println!("  Other: shop, buy <number>, accept <quest>, craft <recipe>, rest");
    println!("  Game: save, load, help, quit");
}
