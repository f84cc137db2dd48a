//! Structs containing player information returned by the RuneMetrics API.
//! Values of these types are produced by the operations on [`RuneMetrics`][crate::RuneMetrics].

use chrono::{DateTime, Utc};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use std::fmt;



/// A player's RuneMetrics profile.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
  /// The player's display name.
  pub name: String,
  /// The player's combat level.
  pub combat_level: u32,
  /// Total experience points earned in magic combat skills.
  pub magic_xp: u64,
  /// Total experience points earned in melee combat skills.
  pub melee_xp: u64,
  /// Total experience points earned in ranged combat skills.
  pub ranged_xp: u64,
  /// The number of quests this player has completed.
  pub quests_complete: u32,
  /// The number of quests this player has started but not completed.
  pub quests_started: u32,
  /// The number of quests this player has not started.
  pub quests_not_started: u32,
  /// The sum of this player's skill levels.
  pub total_skill: u32,
  /// The sum of this player's experience points across all skills.
  pub total_xp: u64,
  /// Whether the player was logged in when the profile was requested.
  pub logged_in: bool,
  /// The player's overall rank on the hiscores.
  pub rank: u64,
  /// The player's most recent events, newest first.
  pub activities: Vec<Activity>,
  /// One entry per skill the player has trained.
  /// Guaranteed non-empty for a successfully returned profile.
  pub skill_values: Vec<SkillValue>
}

impl PlayerProfile {
  /// Searches this profile's skill values for the given skill.
  pub fn skill(&self, skill: Skill) -> Option<&SkillValue> {
    self.skill_values.iter().find(|skill_value| skill_value.id == skill)
  }
}

/// A timestamped event from a player's activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
  /// When the event happened, in game (UTC) time.
  pub date: DateTime<Utc>,
  /// A longer description of the event.
  pub details: String,
  /// A short summary of the event.
  pub text: String
}

/// A player's level, rank and experience points in a single [`Skill`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillValue {
  /// Which skill this entry describes.
  pub id: Skill,
  /// The player's level in this skill.
  pub level: u32,
  /// The player's hiscores rank in this skill.
  pub rank: u64,
  /// The player's experience points in this skill.
  pub xp: u64
}

/// One of the 29 player skills tracked by the game.
///
/// The RuneMetrics API encodes skills as integers; the discriminants here
/// match that encoding exactly, so a [`Skill`] serializes as its ID.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Skill {
  Attack = 0,
  Defence = 1,
  Strength = 2,
  Constitution = 3,
  Ranged = 4,
  Prayer = 5,
  Magic = 6,
  Cooking = 7,
  Woodcutting = 8,
  Fletching = 9,
  Fishing = 10,
  Firemaking = 11,
  Crafting = 12,
  Smithing = 13,
  Mining = 14,
  Herblore = 15,
  Agility = 16,
  Thieving = 17,
  Slayer = 18,
  Farming = 19,
  Runecrafting = 20,
  Hunter = 21,
  Construction = 22,
  Summoning = 23,
  Dungeoneering = 24,
  Divination = 25,
  Invention = 26,
  Archaeology = 27,
  Necromancy = 28
}

impl Skill {
  /// Every skill, ordered by its RuneMetrics ID.
  pub const VALUES: [Skill; 29] = [
    Skill::Attack, Skill::Defence, Skill::Strength, Skill::Constitution,
    Skill::Ranged, Skill::Prayer, Skill::Magic, Skill::Cooking,
    Skill::Woodcutting, Skill::Fletching, Skill::Fishing, Skill::Firemaking,
    Skill::Crafting, Skill::Smithing, Skill::Mining, Skill::Herblore,
    Skill::Agility, Skill::Thieving, Skill::Slayer, Skill::Farming,
    Skill::Runecrafting, Skill::Hunter, Skill::Construction, Skill::Summoning,
    Skill::Dungeoneering, Skill::Divination, Skill::Invention,
    Skill::Archaeology, Skill::Necromancy
  ];

  /// The integer ID the RuneMetrics API uses for this skill.
  #[inline]
  pub fn id(self) -> u8 {
    self as u8
  }

  /// Looks up the skill with the given RuneMetrics ID, if one exists.
  pub fn from_id(id: u8) -> Option<Self> {
    Skill::VALUES.get(usize::from(id)).copied()
  }

  pub fn to_str(self) -> &'static str {
    match self {
      Skill::Attack => "Attack",
      Skill::Defence => "Defence",
      Skill::Strength => "Strength",
      Skill::Constitution => "Constitution",
      Skill::Ranged => "Ranged",
      Skill::Prayer => "Prayer",
      Skill::Magic => "Magic",
      Skill::Cooking => "Cooking",
      Skill::Woodcutting => "Woodcutting",
      Skill::Fletching => "Fletching",
      Skill::Fishing => "Fishing",
      Skill::Firemaking => "Firemaking",
      Skill::Crafting => "Crafting",
      Skill::Smithing => "Smithing",
      Skill::Mining => "Mining",
      Skill::Herblore => "Herblore",
      Skill::Agility => "Agility",
      Skill::Thieving => "Thieving",
      Skill::Slayer => "Slayer",
      Skill::Farming => "Farming",
      Skill::Runecrafting => "Runecrafting",
      Skill::Hunter => "Hunter",
      Skill::Construction => "Construction",
      Skill::Summoning => "Summoning",
      Skill::Dungeoneering => "Dungeoneering",
      Skill::Divination => "Divination",
      Skill::Invention => "Invention",
      Skill::Archaeology => "Archaeology",
      Skill::Necromancy => "Necromancy"
    }
  }
}

impl fmt::Display for Skill {
  #[inline]
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.to_str())
  }
}

impl Serialize for Skill {
  #[inline]
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(self.id())
  }
}

impl<'de> Deserialize<'de> for Skill {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct SkillVisitor;

    impl<'de> serde::de::Visitor<'de> for SkillVisitor {
      type Value = Skill;

      #[inline]
      fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a skill id between 0 and 28")
      }

      fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
      where E: serde::de::Error {
        u8::try_from(v).ok().and_then(Skill::from_id)
          .ok_or_else(|| E::invalid_value(serde::de::Unexpected::Unsigned(v), &self))
      }
    }

    deserializer.deserialize_u64(SkillVisitor)
  }
}

/// A player's progress on a single quest.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerQuestStatus {
  /// The quest's difficulty tier.
  pub difficulty: u32,
  /// Whether the quest is only available to members.
  pub members: bool,
  /// The number of quest points awarded on completion.
  pub quest_points: u32,
  /// The player's progress on the quest.
  pub status: QuestStatus,
  /// The quest's title.
  pub title: String,
  /// Whether the requesting player has unlocked the quest.
  pub user_eligible: bool
}

/// A player's progress on a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestStatus {
  #[serde(rename = "COMPLETED")]
  Completed,
  #[serde(rename = "STARTED")]
  Started,
  #[serde(rename = "NOT_STARTED")]
  NotStarted
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn skills_round_trip_through_wire_ids() {
    assert_eq!(serde_json::from_str::<Skill>("0").unwrap(), Skill::Attack);
    assert_eq!(serde_json::from_str::<Skill>("6").unwrap(), Skill::Magic);
    assert_eq!(serde_json::from_str::<Skill>("28").unwrap(), Skill::Necromancy);
    assert_eq!(serde_json::to_string(&Skill::Magic).unwrap(), "6");

    for skill in Skill::VALUES {
      assert_eq!(Skill::from_id(skill.id()), Some(skill));
    }
  }

  #[test]
  fn skill_ids_outside_the_range_are_rejected() {
    let error = serde_json::from_str::<Skill>("29").unwrap_err();
    assert!(error.to_string().contains("a skill id between 0 and 28"));
    assert!(serde_json::from_str::<Skill>("-1").is_err());
    assert_eq!(Skill::from_id(200), None);
  }
}
