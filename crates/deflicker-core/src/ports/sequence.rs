//! Sequence enumeration port.

use crate::domain::SequenceEntry;

/// Port producing the ordered frames of a run.
///
/// Order matters: rolling averages use positional neighbours.
pub trait SequenceSource: Send + Sync {
    /// Returns every frame in sequence order.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence cannot be listed.
    fn entries(&self) -> anyhow::Result<Vec<SequenceEntry>>;
}
