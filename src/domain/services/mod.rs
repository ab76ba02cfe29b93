//! Domain services - Pure business rules over domain values

pub mod battle;
pub mod ledger;
pub mod reward_generator;

pub use battle::{BattleOutcome, BattleResolver};
pub use ledger::{AppliedDelta, Ledger, LedgerError};
pub use reward_generator::generate_rewards;
