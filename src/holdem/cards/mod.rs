pub mod card;
pub mod evaluator;

pub use card::Card;
pub use evaluator::{evaluate_5, evaluate_7, Category, Score};
