#![warn(missing_debug_implementations, unreachable_pub)]

//! A Rust client library for RuneMetrics, the RuneScape player-statistics
//! web API, exposing player profiles and quest completion data as easy to
//! understand Rust structures.

extern crate async_trait;
extern crate chrono;
#[macro_use]
extern crate serde;
extern crate serde_json;
#[macro_use]
extern crate thiserror;
pub extern crate reqwest;

mod format;
pub mod client;
pub mod player;

pub use crate::client::{Client, Endpoint, RawResponse, RuneMetrics, Transport};
pub use crate::player::{Activity, PlayerProfile, PlayerQuestStatus, QuestStatus, Skill, SkillValue};

/// The error type produced by transports, boxed so that transport
/// implementations other than `reqwest` can be substituted.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
  /// The GET request could not be sent, or its response body could not be read.
  #[error("failed to GET {endpoint}")]
  Transport {
    endpoint: Endpoint,
    #[source]
    source: BoxError
  },
  /// Returned when an unexpected status code is encountered from RuneMetrics.
  /// The response body is not parsed.
  #[error("failed to GET {endpoint}: unexpected status code {status}")]
  UnexpectedStatusCode {
    endpoint: Endpoint,
    status: u16
  },
  /// The response body was not valid JSON, or one of its fields did not
  /// match an encoding RuneMetrics is known to use.
  #[error("failed to decode {endpoint}")]
  Decode {
    endpoint: Endpoint,
    #[source]
    source: serde_json::Error
  },
  /// Returned when player data is missing in the RuneMetrics response.
  /// The body was valid JSON but held none of the requested data, usually
  /// because the player does not exist or their profile is private.
  #[error("failed to find {endpoint} data: missing player data")]
  MissingPlayerData {
    endpoint: Endpoint
  }
}
