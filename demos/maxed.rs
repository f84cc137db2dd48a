use runemetrics::{Client, RuneMetrics};

#[tokio::main]
async fn main() {
  let player_name = std::env::args().nth(1)
    .expect("please pass a player name as a command line argument");

  // Creates a RuneMetrics client with the default transport
  let client = Client::new();
  let profile = client.get_profile(&player_name)
    .await.expect("failed to get player profile");

  // Find the skill with the minimum level
  let minimum_skill = profile.skill_values.iter()
    .min_by_key(|skill_value| skill_value.level)
    .expect("profile contains no skills");

  // If the minimum level is at least 99, they have maxed!
  if minimum_skill.level >= 99 {
    println!("{player_name} has maxed. Way to go {player_name}!");
  } else {
    println!("{player_name} has not maxed... yet. \u{1f60e}");
  }
}
