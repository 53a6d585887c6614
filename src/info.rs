use std::fmt;

/// Snapshot of an array's shape, for debugging.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ArrayInfo {
    pub element_size: usize,
    pub size: usize,
    pub capacity: usize,
}

impl fmt::Display for ArrayInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>10} - {:2}", "DATA_SIZE", self.element_size)?;
        writeln!(f, "{:>10} - {:2}", "SIZE", self.size)?;
        writeln!(f, "{:>10} - {:2}", "CAPACITY", self.capacity)
    }
}
