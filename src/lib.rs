pub mod advisor;
pub mod cards;
pub mod console;
pub mod equity;
pub mod ev;
pub mod ledger;
pub mod opponent;
pub mod web;

pub use advisor::{Advice, AdvisorConfig, Situation, advise};
pub use ev::Action;
