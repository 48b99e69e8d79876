// Fixed machine-word width underlying every packed buffer in the crate.
pub const WORD_BITS: u32 = 32;

// Default automaton state-bit width (see `binary_machine::BinaryMachine`).
pub const DEFAULT_STATE_BITS: u32 = 8;

#[derive(Default, Debug, Clone, Copy)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}
impl Version {
    pub fn current() -> Version {
        Version {
            major: 0,
            minor: 1,
            patch: 0,
        }
    }
}
impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}
