//! Option types that replace boolean flag parameters in the Rust API.

/// Whether a written Turtle document starts with the `@prefix` declarations.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Preamble {
    /// Write [`crate::consts::PREFIXES`] before the body.
    #[default]
    Include,
    /// Write the body only.
    Omit,
}

impl Preamble {
    pub fn is_included(self) -> bool {
        matches!(self, Preamble::Include)
    }
}

impl From<bool> for Preamble {
    fn from(value: bool) -> Self {
        if value {
            Preamble::Include
        } else {
            Preamble::Omit
        }
    }
}
