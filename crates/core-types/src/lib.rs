pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Emotion, GoalPeriod, GoalType, SetupType, TradeStatus, TradeType};
pub use error::CoreError;
pub use structs::{
    NewGoal, NewPsychologyEntry, NewTrade, PsychologyEntry, TradeFilters, TradeRecord,
    TradingGoal,
};
