pub use category::*;
pub use category_set::*;
pub use dice_roll::*;
pub use errors::*;
pub use hand::*;
pub use outcome_tree::*;
pub use protocol_types::*;
pub use scorecard::*;
pub use strategy::*;
pub use turn::*;

#[cfg(test)]
mod arbitrary;
mod category;
mod category_set;
mod dice_roll;
mod errors;
mod hand;
mod outcome_tree;
mod protocol_types;
mod scorecard;
mod strategy;
mod turn;
