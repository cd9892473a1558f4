pub type AccountId = String;
pub type GameId = String;
pub type PlayerName = String;
pub type Region = String;
