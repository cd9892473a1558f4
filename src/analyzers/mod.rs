pub mod analyzers_utils;
pub mod duo;
pub mod outcome;

pub use analyzers_utils::WinRatio;
