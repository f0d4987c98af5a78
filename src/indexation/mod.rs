//! Rent indexation and charges escalation

mod growth;
mod resolver;

pub use growth::ChargesEscalator;
pub use resolver::{IndexObservation, IndexResolver};
