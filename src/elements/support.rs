//! Support conditions

use serde::{Deserialize, Serialize};

/// Kind of support restraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportKind {
    /// Restrains both translations and rotation
    Fixed,
    /// Restrains both translations, rotation free
    Pinned,
    /// Restrains vertical translation only
    Roller,
}

/// Support condition at a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Support {
    /// Kind of restraint
    pub kind: SupportKind,
    /// Downward settlement of the support (m)
    #[serde(default)]
    pub settlement: f64,
}

impl Support {
    /// Create a support of the given kind with no settlement
    pub fn new(kind: SupportKind) -> Self {
        Self {
            kind,
            settlement: 0.0,
        }
    }

    /// Create a fixed support
    pub fn fixed() -> Self {
        Self::new(SupportKind::Fixed)
    }

    /// Create a pinned support
    pub fn pinned() -> Self {
        Self::new(SupportKind::Pinned)
    }

    /// Create a roller support
    pub fn roller() -> Self {
        Self::new(SupportKind::Roller)
    }

    /// Set a downward settlement
    pub fn with_settlement(mut self, settlement: f64) -> Self {
        self.settlement = settlement;
        self
    }

    /// Whether the support restrains rotation
    pub fn is_fixed(&self) -> bool {
        self.kind == SupportKind::Fixed
    }

    /// Number of restrained translations
    pub fn translation_restraints(&self) -> usize {
        match self.kind {
            SupportKind::Fixed | SupportKind::Pinned => 2,
            SupportKind::Roller => 1,
        }
    }

    /// Whether the support restrains horizontal translation
    pub fn restrains_horizontal(&self) -> bool {
        self.kind != SupportKind::Roller
    }
}
