pub mod dates;
pub mod normalizer;
pub mod provider;
pub mod timeslots;
