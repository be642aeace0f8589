pub mod event;
pub mod journal;
pub mod mood;
pub mod task;

pub use event::Event;
pub use journal::JournalEntry;
pub use mood::{Mood, MoodLog};
pub use task::{Category, Priority, Recurrence, RecurrencePattern, Task};
