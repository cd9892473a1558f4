pub mod api;
pub mod identity;
pub mod match_scanner;
pub mod riot_client;
