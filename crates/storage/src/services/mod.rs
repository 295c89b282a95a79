pub mod seed;
pub mod stats;
