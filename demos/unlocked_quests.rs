use runemetrics::{Client, PlayerQuestStatus, QuestStatus, RuneMetrics};

#[tokio::main]
async fn main() {
  let player_name = std::env::args().nth(1)
    .expect("please pass a player name as a command line argument");

  // Creates a RuneMetrics client with the default transport
  let client = Client::new();
  let quests = client.get_quests(&player_name)
    .await.expect("failed to get player quest status");

  // Find all quests that the player has unlocked but has not completed,
  // split by whether they require membership
  let (members, free): (Vec<&PlayerQuestStatus>, Vec<&PlayerQuestStatus>) = quests.iter()
    .filter(|quest| quest.user_eligible && quest.status != QuestStatus::Completed)
    .partition(|quest| quest.members);

  if free.is_empty() {
    println!("{player_name} has completed all unlocked free quests.");
  } else {
    println!("{player_name} can complete the following unlocked free quests:");
    for quest in &free {
      println!("  - {}", quest.title);
    }
  }

  println!();
  if members.is_empty() {
    println!("{player_name} has completed all members quests.");
  } else {
    println!("{player_name} can complete the following unlocked members quests:");
    for quest in &members {
      println!("  - {}", quest.title);
    }
  }

  println!();
  if free.len() + members.len() == 0 {
    println!("Way to go {player_name}!");
  } else {
    println!("Get to work {player_name}!");
  }
}
