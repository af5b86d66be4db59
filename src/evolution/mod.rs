pub mod mutation;

pub use mutation::{MutationOutcome, MutationRule};
