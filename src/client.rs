//! The RuneMetrics client and its transport seam.
//!
//! [`Client`] is the production implementation of [`RuneMetrics`]; it issues
//! exactly one GET per call against the fixed endpoint URLs and hands the
//! body to the decoders in `format`. The HTTP round-trip itself goes through
//! the [`Transport`] trait, so tests (or a future caching variant) can swap
//! the network out without touching the decode path.

use async_trait::async_trait;
use reqwest::Url;

use crate::format::{ProfileBody, QuestsBody};
use crate::player::{PlayerProfile, PlayerQuestStatus};
use crate::{BoxError, Error};

use std::fmt;



const PROFILE_API_URL: &str = "https://apps.runescape.com/runemetrics/profile/profile";
const QUESTS_API_URL: &str = "https://apps.runescape.com/runemetrics/quests";

/// One of the two RuneMetrics endpoints this crate talks to.
/// Carried inside [`Error`] so callers can tell which request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
  Profile,
  Quests
}

impl Endpoint {
  /// The URL for this endpoint's data on the given player.
  /// The player name is URL-escaped into the `user` query parameter.
  pub fn url(self, player_name: &str) -> Url {
    let base = match self {
      Endpoint::Profile => PROFILE_API_URL,
      Endpoint::Quests => QUESTS_API_URL
    };

    Url::parse_with_params(base, [("user", player_name)])
      .expect("endpoint base url should be valid")
  }
}

impl fmt::Display for Endpoint {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(match self {
      Endpoint::Profile => "player profile",
      Endpoint::Quests => "player quest status"
    })
  }
}

/// A raw HTTP response as seen by a [`Transport`]:
/// the status code and the fully read body.
#[derive(Debug, Clone)]
pub struct RawResponse {
  pub status: u16,
  pub body: Vec<u8>
}

/// A generic HTTP GET capability.
///
/// Implementations are expected to release whatever connection or stream a
/// call acquires before returning, on every path; connection pooling,
/// timeouts and TLS are entirely the transport's concern.
#[async_trait]
pub trait Transport: Send + Sync {
  /// Performs a single GET request against `url` and reads the whole body.
  /// Not retried on failure.
  async fn get(&self, url: Url) -> Result<RawResponse, BoxError>;
}

#[async_trait]
impl Transport for reqwest::Client {
  async fn get(&self, url: Url) -> Result<RawResponse, BoxError> {
    let response = reqwest::Client::get(self, url).send().await?;
    let status = response.status().as_u16();
    // the body is consumed here even for non-200 responses,
    // returning the connection to the pool
    let body = response.bytes().await?.to_vec();
    Ok(RawResponse { status, body })
  }
}

/// The capability set of the RuneMetrics API.
///
/// [`Client`] is the only production implementation; the trait exists so
/// callers can substitute a fake in tests.
#[async_trait]
pub trait RuneMetrics {
  /// Returns profile data given a player name.
  async fn get_profile(&self, player_name: &str) -> Result<PlayerProfile, Error>;
  /// Returns quest statuses given a player name.
  async fn get_quests(&self, player_name: &str) -> Result<Vec<PlayerQuestStatus>, Error>;
}

/// A RuneMetrics API client backed by a [`Transport`].
#[derive(Debug, Clone)]
pub struct Client<T = reqwest::Client> {
  transport: T
}

impl Client {
  /// Creates a client backed by a default `reqwest` transport.
  ///
  /// The transport keeps no idle connections between calls: each call
  /// acquires its own connection and releases it when the call ends,
  /// whichever way it ends.
  ///
  /// # Panics
  /// Panics if the TLS backend cannot be initialized, like [`reqwest::Client::new`].
  pub fn new() -> Self {
    let transport = reqwest::Client::builder()
      .pool_max_idle_per_host(0)
      .build()
      .expect("failed to build reqwest client");
    Client::with_transport(transport)
  }
}

impl Default for Client {
  #[inline]
  fn default() -> Self {
    Client::new()
  }
}

impl<T: Transport> Client<T> {
  /// Creates a client from any [`Transport`], for callers that need their
  /// own connection pooling, timeout or proxy configuration.
  pub fn with_transport(transport: T) -> Self {
    Client { transport }
  }

  async fn fetch(&self, endpoint: Endpoint, player_name: &str) -> Result<Vec<u8>, Error> {
    let response = self.transport.get(endpoint.url(player_name)).await
      .map_err(|source| Error::Transport { endpoint, source })?;

    if response.status != 200 {
      return Err(Error::UnexpectedStatusCode { endpoint, status: response.status });
    };

    Ok(response.body)
  }
}

#[async_trait]
impl<T: Transport> RuneMetrics for Client<T> {
  async fn get_profile(&self, player_name: &str) -> Result<PlayerProfile, Error> {
    let body = self.fetch(Endpoint::Profile, player_name).await?;
    let profile: ProfileBody = serde_json::from_slice(&body)
      .map_err(|source| Error::Decode { endpoint: Endpoint::Profile, source })?;
    profile.into_profile()
  }

  async fn get_quests(&self, player_name: &str) -> Result<Vec<PlayerQuestStatus>, Error> {
    let body = self.fetch(Endpoint::Quests, player_name).await?;
    let quests: QuestsBody = serde_json::from_slice(&body)
      .map_err(|source| Error::Decode { endpoint: Endpoint::Quests, source })?;
    quests.into_quests()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn endpoint_urls_escape_player_names() {
    let url = Endpoint::Profile.url("player name&x");
    assert_eq!(
      url.as_str(),
      "https://apps.runescape.com/runemetrics/profile/profile?user=player+name%26x"
    );

    let url = Endpoint::Quests.url("Zezima");
    assert_eq!(url.as_str(), "https://apps.runescape.com/runemetrics/quests?user=Zezima");
  }
}
