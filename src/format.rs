//! Wire-level response shapes for the RuneMetrics API, and the decode rules
//! for its non-standard scalar encodings.
//!
//! RuneMetrics wraps several scalar fields in JSON strings: the profile's
//! `loggedIn` flag is the string `"true"` or `"false"`, the overall `rank`
//! is a decimal string with thousands-separator commas, and activity dates
//! use a fixed `DD-Mon-YYYY HH:MM` pattern. Older revisions of the API have
//! also been observed emitting `loggedIn` and `rank` as native JSON values,
//! so those two decoders accept both forms; the string-wrapped encoding is
//! the one current deployments produce.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{Deserialize, Deserializer};

use crate::client::Endpoint;
use crate::player::*;



/// The body returned by the profile endpoint.
///
/// Every field is defaulted: when a player does not exist or has a private
/// profile, RuneMetrics responds `200 OK` with a body that omits most of
/// these fields. [`ProfileBody::into_profile`] turns that case into
/// [`Error::MissingPlayerData`][crate::Error::MissingPlayerData].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ProfileBody {
  name: String,
  #[serde(rename = "combatlevel")]
  combat_level: u32,
  magic: u64,
  melee: u64,
  ranged: u64,
  #[serde(rename = "questscomplete")]
  quests_complete: u32,
  #[serde(rename = "queststarted")]
  quests_started: u32,
  #[serde(rename = "questsnotstarted")]
  quests_not_started: u32,
  #[serde(rename = "totalskill")]
  total_skill: u32,
  #[serde(rename = "totalxp")]
  total_xp: u64,
  #[serde(rename = "loggedIn")]
  #[serde(deserialize_with = "deserialize_string_flag")]
  logged_in: bool,
  #[serde(deserialize_with = "deserialize_grouped_int")]
  rank: u64,
  activities: Option<Vec<ActivityEntry>>,
  #[serde(rename = "skillvalues")]
  skill_values: Vec<SkillValueEntry>
}

impl ProfileBody {
  pub(crate) fn into_profile(self) -> Result<PlayerProfile, crate::Error> {
    // An empty skill list or absent activity list is how the API reports a
    // private or nonexistent player, even though the body is valid JSON.
    let activities = match self.activities {
      Some(activities) if !self.skill_values.is_empty() => activities,
      _ => return Err(crate::Error::MissingPlayerData { endpoint: Endpoint::Profile })
    };

    Ok(PlayerProfile {
      name: self.name,
      combat_level: self.combat_level,
      magic_xp: self.magic,
      melee_xp: self.melee,
      ranged_xp: self.ranged,
      quests_complete: self.quests_complete,
      quests_started: self.quests_started,
      quests_not_started: self.quests_not_started,
      total_skill: self.total_skill,
      total_xp: self.total_xp,
      logged_in: self.logged_in,
      rank: self.rank,
      activities: activities.into_iter().map(ActivityEntry::into_activity).collect(),
      skill_values: self.skill_values.into_iter().map(SkillValueEntry::into_skill_value).collect()
    })
  }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ActivityEntry {
  #[serde(deserialize_with = "deserialize_activity_date")]
  date: DateTime<Utc>,
  details: String,
  text: String
}

impl ActivityEntry {
  fn into_activity(self) -> Activity {
    Activity {
      date: self.date,
      details: self.details,
      text: self.text
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SkillValueEntry {
  id: Skill,
  level: u32,
  rank: u64,
  xp: u64
}

impl SkillValueEntry {
  fn into_skill_value(self) -> SkillValue {
    SkillValue {
      id: self.id,
      level: self.level,
      rank: self.rank,
      xp: self.xp
    }
  }
}

/// The body returned by the quests endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct QuestsBody {
  quests: Option<Vec<QuestEntry>>
}

impl QuestsBody {
  pub(crate) fn into_quests(self) -> Result<Vec<PlayerQuestStatus>, crate::Error> {
    // An explicit empty array is a valid (if unusual) quest list;
    // only an absent or null `quests` field means the player's data is hidden.
    let quests = self.quests
      .ok_or(crate::Error::MissingPlayerData { endpoint: Endpoint::Quests })?;
    Ok(quests.into_iter().map(QuestEntry::into_quest_status).collect())
  }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct QuestEntry {
  difficulty: u32,
  members: bool,
  #[serde(rename = "questPoints")]
  quest_points: u32,
  status: QuestStatus,
  title: String,
  #[serde(rename = "userEligible")]
  user_eligible: bool
}

impl QuestEntry {
  fn into_quest_status(self) -> PlayerQuestStatus {
    PlayerQuestStatus {
      difficulty: self.difficulty,
      members: self.members,
      quest_points: self.quest_points,
      status: self.status,
      title: self.title,
      user_eligible: self.user_eligible
    }
  }
}

/// The pattern activity dates are encoded with, e.g. `05-Jan-2024 13:45`.
pub(crate) const ACTIVITY_DATE_FORMAT: &str = "%d-%b-%Y %H:%M";

/// Parses a string-encoded boolean flag.
/// Anything other than `"true"` is treated as `false` rather than an error;
/// the API has emitted junk in flag fields before.
#[inline]
pub(crate) fn parse_flag(value: &str) -> bool {
  value == "true"
}

/// Parses an integer that may contain thousands-separator commas, e.g. `"1,234"`.
pub(crate) fn parse_grouped_int(value: &str) -> Result<u64, std::num::ParseIntError> {
  value.replace(',', "").parse()
}

/// Parses an activity date. No formats besides [`ACTIVITY_DATE_FORMAT`] are attempted.
/// RuneMetrics reports activity dates in game (UTC) time.
pub(crate) fn parse_activity_date(value: &str) -> chrono::ParseResult<DateTime<Utc>> {
  NaiveDateTime::parse_from_str(value, ACTIVITY_DATE_FORMAT)
    .map(|date_time| date_time.and_utc())
}

fn deserialize_string_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
  struct StringFlagVisitor;

  impl<'de> serde::de::Visitor<'de> for StringFlagVisitor {
    type Value = bool;

    #[inline]
    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
      formatter.write_str("a boolean or a string-encoded boolean")
    }

    #[inline]
    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where E: serde::de::Error {
      Ok(v)
    }

    #[inline]
    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where E: serde::de::Error {
      Ok(parse_flag(v))
    }
  }

  deserializer.deserialize_any(StringFlagVisitor)
}

fn deserialize_grouped_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
  struct GroupedIntVisitor;

  impl<'de> serde::de::Visitor<'de> for GroupedIntVisitor {
    type Value = u64;

    #[inline]
    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
      formatter.write_str("an integer or a string-encoded integer with optional comma separators")
    }

    #[inline]
    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where E: serde::de::Error {
      Ok(v)
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where E: serde::de::Error {
      parse_grouped_int(v).map_err(|_| {
        E::invalid_value(serde::de::Unexpected::Str(v), &Self)
      })
    }
  }

  deserializer.deserialize_any(GroupedIntVisitor)
}

fn deserialize_activity_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
  let value = String::deserialize(deserializer)?;
  parse_activity_date(&value).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn flags_parse_permissively() {
    assert!(parse_flag("true"));
    assert!(!parse_flag("false"));
    // unrecognized strings are logged-out, not an error
    assert!(!parse_flag("yes"));
    assert!(!parse_flag(""));
  }

  #[test]
  fn grouped_ints_strip_commas() {
    assert_eq!(parse_grouped_int("1,234"), Ok(1234));
    assert_eq!(parse_grouped_int("42"), Ok(42));
    assert_eq!(parse_grouped_int("1,234,567"), Ok(1234567));
    assert!(parse_grouped_int("abc").is_err());
    assert!(parse_grouped_int("").is_err());
  }

  #[test]
  fn activity_dates_parse_exactly_one_format() {
    let expected = Utc.with_ymd_and_hms(2024, 1, 5, 13, 45, 0).unwrap();
    assert_eq!(parse_activity_date("05-Jan-2024 13:45"), Ok(expected));
    assert!(parse_activity_date("2024-01-05").is_err());
    assert!(parse_activity_date("05-January-2024 13:45").is_err());
    assert!(parse_activity_date("05-Jan-2024").is_err());
  }

  #[test]
  fn profile_body_tolerates_native_encodings() {
    // older API revisions sent `rank` and `loggedIn` unwrapped
    let body: ProfileBody = serde_json::from_str(r#"{
      "name": "Zezima",
      "rank": 1234,
      "loggedIn": true,
      "activities": [],
      "skillvalues": [{"id": 0, "level": 99, "rank": 3105, "xp": 200000000}]
    }"#).unwrap();

    let profile = body.into_profile().unwrap();
    assert_eq!(profile.rank, 1234);
    assert!(profile.logged_in);
  }

  #[test]
  fn profile_body_rejects_bad_rank() {
    // a string that cleans to a non-integer is a bad value,
    // not a type mismatch: strings are one of the accepted encodings
    let error = serde_json::from_str::<ProfileBody>(r#"{"rank": "abc"}"#).unwrap_err();
    let message = error.to_string();
    assert!(message.contains("invalid value"), "{message}");
    assert!(message.contains("\"abc\""), "{message}");
    assert!(
      message.contains("an integer or a string-encoded integer with optional comma separators"),
      "{message}"
    );
  }
}
