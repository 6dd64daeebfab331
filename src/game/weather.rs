//! # Weather
//!
//! Game-wide weather. The combat modifier scales the player's damage rolls;
//! a running fight keeps the modifier it started with.

use crate::{config, Dice};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five kinds of weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
    Clear,
    Rain,
    Storm,
    Fog,
    Snow,
}

impl WeatherKind {
    /// Every weather kind, in the order used for uniform re-rolls.
    pub const ALL: [WeatherKind; 5] = [
        WeatherKind::Clear,
        WeatherKind::Rain,
        WeatherKind::Storm,
        WeatherKind::Fog,
        WeatherKind::Snow,
    ];

    /// Multiplier applied to the player's damage roll.
    pub fn combat_modifier(self) -> f64 {
        match self {
            WeatherKind::Clear | WeatherKind::Fog => 1.0,
            WeatherKind::Rain | WeatherKind::Snow => 0.9,
            WeatherKind::Storm => 0.8,
        }
    }

    pub fn visibility(self) -> f64 {
        match self {
            WeatherKind::Clear => 1.0,
            WeatherKind::Rain => 0.8,
            WeatherKind::Storm => 0.6,
            WeatherKind::Fog => 0.5,
            WeatherKind::Snow => 0.7,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WeatherKind::Clear => "The sky is clear and bright.",
            WeatherKind::Rain => "Rain falls steadily from gray clouds.",
            WeatherKind::Storm => "A fierce storm rages with lightning and thunder.",
            WeatherKind::Fog => "Thick fog obscures the landscape.",
            WeatherKind::Snow => "Soft snow drifts down from the sky.",
        }
    }
}

impl fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeatherKind::Clear => "Clear",
            WeatherKind::Rain => "Rain",
            WeatherKind::Storm => "Storm",
            WeatherKind::Fog => "Fog",
            WeatherKind::Snow => "Snow",
        };
        f.write_str(name)
    }
}

/// Current weather for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weather {
    current: WeatherKind,
}

impl Weather {
    /// Starts with clear skies.
    pub fn new() -> Self {
        Self::with_kind(WeatherKind::Clear)
    }

    pub fn with_kind(kind: WeatherKind) -> Self {
        Self { current: kind }
    }

    pub fn current(&self) -> WeatherKind {
        self.current
    }

    pub fn combat_modifier(&self) -> f64 {
        self.current.combat_modifier()
    }

    pub fn visibility(&self) -> f64 {
        self.current.visibility()
    }

    pub fn description(&self) -> &'static str {
        self.current.description()
    }

    /// Re-rolls the weather with a 30% chance.
    ///
    /// The re-roll is uniform over all kinds and may land on the current one.
    /// Returns true if a re-roll happened. Never call this during a fight.
    pub fn maybe_transition<D: Dice + ?Sized>(&mut self, dice: &mut D) -> bool {
        if !dice.chance(config::WEATHER_CHANGE_CHANCE) {
            return false;
        }
        let previous = self.current;
        self.current = WeatherKind::ALL[dice.pick(WeatherKind::ALL.len())];
        log::debug!("Weather re-rolled: {} -> {}", previous, self.current);
        true
    }
}

impl Default for Weather {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Draw, GameRng, ScriptedDice};

    #[test]
    fn test_modifiers() {
        assert_eq!(WeatherKind::Clear.combat_modifier(), 1.0);
        assert_eq!(WeatherKind::Fog.combat_modifier(), 1.0);
        assert_eq!(WeatherKind::Rain.combat_modifier(), 0.9);
        assert_eq!(WeatherKind::Snow.combat_modifier(), 0.9);
        assert_eq!(WeatherKind::Storm.combat_modifier(), 0.8);
        assert_eq!(WeatherKind::Fog.visibility(), 0.5);
    }

    #[test]
    fn test_failed_roll_keeps_weather() {
        let mut weather = Weather::with_kind(WeatherKind::Rain);
        let mut dice = ScriptedDice::new([Draw::Chance(false)]);
        assert!(!weather.maybe_transition(&mut dice));
        assert_eq!(weather.current(), WeatherKind::Rain);
        assert!(dice.is_exhausted());
    }

    #[test]
    fn test_successful_roll_resamples() {
        let mut weather = Weather::new();
        let mut dice = ScriptedDice::new([Draw::Chance(true), Draw::Pick(2)]);
        assert!(weather.maybe_transition(&mut dice));
        assert_eq!(weather.current(), WeatherKind::Storm);
        assert_eq!(weather.combat_modifier(), 0.8);
    }

    #[test]
    fn test_resample_may_pick_same_kind() {
        let mut weather = Weather::new();
        let mut dice = ScriptedDice::new([Draw::Chance(true), Draw::Pick(0)]);
        assert!(weather.maybe_transition(&mut dice));
        assert_eq!(weather.current(), WeatherKind::Clear);
    }

    #[test]
    fn test_transition_rate_is_roughly_thirty_percent() {
        let mut weather = Weather::new();
        let mut rng = GameRng::new(2024);
        let rerolls = (0..10_000)
            .filter(|_| weather.maybe_transition(&mut rng))
            .count();
        assert!((2_600..=3_400).contains(&rerolls), "rerolls = {}", rerolls);
    }
}
