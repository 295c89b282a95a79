pub mod entry_status;
pub mod history_entry;
pub mod volunteer;

pub use entry_status::EntryStatus;
pub use history_entry::HistoryEntry;
pub use volunteer::{Volunteer, VolunteerProfile, VolunteerSeed};
