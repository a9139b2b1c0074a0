//! Per-session synthetic effect state.

/// Grain and mist toggles and intensities for the active session.
///
/// Independent of which color filter is selected; a UI layer may choose
/// preset combinations per filter, but that policy lives outside the
/// pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectState {
    /// Whether grain is composited onto processed frames.
    pub grain_enabled: bool,
    /// Grain intensity in `[0, 1]`.
    pub grain_intensity: f32,
    /// Whether mist is composited onto processed frames.
    pub mist_enabled: bool,
    /// Mist intensity in `[0, 1]`.
    pub mist_intensity: f32,
}

impl Default for EffectState {
    /// Both effects off, at the product's stock intensities.
    fn default() -> Self {
        Self {
            grain_enabled: false,
            grain_intensity: 0.15,
            mist_enabled: false,
            mist_intensity: 0.5,
        }
    }
}

impl EffectState {
    /// Whether the grain stage should run.
    pub fn grain_active(&self) -> bool {
        self.grain_enabled && self.grain_intensity > 0.0
    }

    /// Whether the mist stage should run.
    pub fn mist_active(&self) -> bool {
        self.mist_enabled && self.mist_intensity > 0.0
    }
}
