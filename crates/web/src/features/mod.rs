pub mod events;
pub mod history;
pub mod ranking;
pub mod volunteers;
