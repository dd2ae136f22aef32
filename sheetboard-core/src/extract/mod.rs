//! Section extractors built on the locator.

pub mod journal;
pub mod positions;

pub use journal::{extract_journal, JournalLayout, JournalSection, JournalTotals, SectionRole};
pub use positions::{extract_open_positions, OpenPositions, Position};
