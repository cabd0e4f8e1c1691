//! Hand strength evaluation for Texas Hold'em.
//!
//! Main entry point:
//!   `evaluate_best_hand(hole, board) -> Result<BestHand, EvalError>`

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{evaluate_5card_hand, evaluate_best_hand, BestHand, EvalError};
pub use hand_rank::{describe_hand, hand_category, HandCategory};
