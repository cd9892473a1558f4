#[macro_use]
extern crate log;

pub mod analyzers;
pub mod data_retrieval;
pub mod duo_search;
pub mod error;
pub mod input;
pub mod match_stats;
pub mod progress;
pub mod settings;
pub mod types;

#[cfg(test)]
mod testing;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
