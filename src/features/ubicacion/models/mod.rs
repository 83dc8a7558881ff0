pub mod location_outcome;

pub use location_outcome::LocationOutcome;
