//! # Quests
//!
//! Fixed kill and collect objectives with gold and experience rewards.

use crate::{Player, QuestError, QuestResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a quest counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    Kill,
    Collect,
}

/// Static description of a quest.
#[derive(Debug)]
pub struct QuestDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub objective: Objective,
    /// Monster or item keys that advance the quest
    pub targets: &'static [&'static str],
    pub count: u32,
    pub reward_gold: u32,
    pub reward_exp: u32,
}

static GOBLIN_SLAYER: QuestDefinition = QuestDefinition {
    name: "Goblin Slayer",
    description: "Defeat 5 goblins terrorizing the countryside",
    objective: Objective::Kill,
    targets: &["goblin"],
    count: 5,
    reward_gold: 100,
    reward_exp: 50,
};

static TREASURE_HUNTER: QuestDefinition = QuestDefinition {
    name: "Treasure Hunter",
    description: "Find and collect 3 precious gems",
    objective: Objective::Collect,
    targets: &["ruby", "emerald", "diamond"],
    count: 3,
    reward_gold: 200,
    reward_exp: 75,
};

static DRAGON_SLAYER: QuestDefinition = QuestDefinition {
    name: "Dragon Slayer",
    description: "Defeat the ancient dragon",
    objective: Objective::Kill,
    targets: &["dragon"],
    count: 1,
    reward_gold: 1000,
    reward_exp: 500,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestId {
    GoblinSlayer,
    TreasureHunter,
    DragonSlayer,
}

impl QuestId {
    pub const ALL: [QuestId; 3] = [
        QuestId::GoblinSlayer,
        QuestId::TreasureHunter,
        QuestId::DragonSlayer,
    ];

    pub fn definition(self) -> &'static QuestDefinition {
        match self {
            QuestId::GoblinSlayer => &GOBLIN_SLAYER,
            QuestId::TreasureHunter => &TREASURE_HUNTER,
            QuestId::DragonSlayer => &DRAGON_SLAYER,
        }
    }
}

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.definition().name)
    }
}

impl FromStr for QuestId {
    type Err = QuestError;

    /// Accepts the snake_case id or the display name in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = to_key(s);
        QuestId::ALL
            .into_iter()
            .find(|id| to_key(id.definition().name) == key)
            .ok_or_else(|| QuestError::InvalidAction(format!("Unknown quest: {}", s)))
    }
}

fn to_key(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Progress on an accepted quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestProgress {
    pub id: QuestId,
    pub current: u32,
}

/// Active and completed quests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestLog {
    active: Vec<QuestProgress>,
    completed: Vec<QuestId>,
}

impl QuestLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &[QuestProgress] {
        &self.active
    }

    pub fn completed(&self) -> &[QuestId] {
        &self.completed
    }

    /// Quests neither accepted nor finished.
    pub fn available(&self) -> Vec<QuestId> {
        QuestId::ALL
            .into_iter()
            .filter(|id| !self.is_active(*id) && !self.completed.contains(id))
            .collect()
    }

    pub fn is_active(&self, id: QuestId) -> bool {
        self.active.iter().any(|p| p.id == id)
    }

    /// Starts tracking a quest.
    ///
    /// # Examples
    ///
    /// ```
    /// use dragonquest::{QuestId, QuestLog};
    ///
    /// let mut log = QuestLog::new();
    /// log.accept(QuestId::GoblinSlayer).unwrap();
    /// assert!(log.accept(QuestId::GoblinSlayer).is_err());
    /// assert_eq!(log.available().len(), 2);
    /// ```
    pub fn accept(&mut self, id: QuestId) -> QuestResult<()> {
        if self.is_active(id) {
            return Err(QuestError::InvalidAction(format!(
                "{} is already in progress",
                id
            )));
        }
        if self.completed.contains(&id) {
            return Err(QuestError::InvalidAction(format!(
                "{} is already complete",
                id
            )));
        }
        self.active.push(QuestProgress { id, current: 0 });
        log::info!("Accepted quest {}", id);
        Ok(())
    }

    /// Counts a defeated monster towards kill quests.
    ///
    /// Returns the quests this completed; their rewards are already credited.
    pub fn record_kill(&mut self, player: &mut Player, monster_name: &str) -> Vec<QuestId> {
        self.advance(player, Objective::Kill, monster_name)
    }

    /// Counts a picked-up item towards collect quests.
    pub fn record_collect(&mut self, player: &mut Player, item_name: &str) -> Vec<QuestId> {
        self.advance(player, Objective::Collect, item_name)
    }

    fn advance(&mut self, player: &mut Player, objective: Objective, name: &str) -> Vec<QuestId> {
        let key = to_key(name);
        for progress in &mut self.active {
            let definition = progress.id.definition();
            if definition.objective == objective && definition.targets.contains(&key.as_str()) {
                progress.current += 1;
            }
        }

        let (finished, still_active): (Vec<_>, Vec<_>) = self
            .active
            .drain(..)
            .partition(|p| p.current >= p.id.definition().count);
        self.active = still_active;

        finished
            .into_iter()
            .map(|progress| {
                let definition = progress.id.definition();
                player.gold += definition.reward_gold;
                player.exp += definition.reward_exp;
                self.completed.push(progress.id);
                log::info!(
                    "Completed quest {}: +{} gold, +{} exp",
                    progress.id,
                    definition.reward_gold,
                    definition.reward_exp
                );
                progress.id
            })
            .collect()
    }
}
