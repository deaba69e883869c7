/// Which endpoint configuration particles are heading toward.
///
/// There is no transitional state; the morph emerges from per-frame
/// interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Tree silhouette.
    #[default]
    Assembled,
    /// Scatter cloud.
    Dispersed,
}

impl Mode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Assembled => Self::Dispersed,
            Self::Dispersed => Self::Assembled,
        }
    }

    /// Whether particles are heading for the tree.
    #[must_use]
    pub fn is_assembled(self) -> bool {
        self == Self::Assembled
    }

    /// Prompt shown to the user for the next toggle.
    #[must_use]
    pub fn action_hint(self) -> &'static str {
        match self {
            Self::Assembled => "Tap to Scatter",
            Self::Dispersed => "Tap to Assemble",
        }
    }
}
