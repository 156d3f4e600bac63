/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Byte ranges of the new canonical text that differ from before.
    pub changed: Vec<std::ops::Range<usize>>,
    pub new_selection: std::ops::Range<usize>,
    pub version: u64,
}

impl Patch {
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}
