/// Request ordering gate for one server's poll loop.
///
/// Every request gets a strictly increasing sequence number when it is
/// issued. A response is accepted only if its number is higher than every
/// number accepted before, so a slow early request can never overwrite the
/// answer to a later one.
#[derive(Debug, Clone, Default)]
pub struct SequenceGate {
    issued: u64,
    applied: Option<u64>,
}

impl SequenceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next sequence number. Starts at 1.
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Record `sequence` as applied if nothing newer has been applied yet.
    pub fn accept(&mut self, sequence: u64) -> bool {
        if sequence == 0 || sequence > self.issued || self.is_superseded(sequence)
        {
            return false;
        }
        self.applied = Some(sequence);
        true
    }

    /// Whether a response for `sequence` would be discarded.
    pub fn is_superseded(&self, sequence: u64) -> bool {
        self.applied.is_some_and(|applied| sequence <= applied)
    }

    pub fn last_issued(&self) -> u64 {
        self.issued
    }

    pub fn last_applied(&self) -> Option<u64> {
        self.applied
    }
}
