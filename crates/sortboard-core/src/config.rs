#![forbid(unsafe_code)]

//! Drag session configuration.

/// What a cancelled gesture does to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CancelPolicy {
    /// Restore the snapshot held right before the gesture began.
    #[default]
    Revert,
    /// Leave the last preview in place as if the card had been dropped.
    KeepPreview,
}

/// Tunables for a [`DragSession`](crate::DragSession).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Behavior on `DragEvent::Cancel` (default: revert).
    pub cancel_policy: CancelPolicy,
    /// Vertical delta that must be exceeded for a hover on the last card to
    /// append after it (default: 0.0, i.e. any downward movement).
    /// Never negative; see [`SessionConfig::with_append_threshold`].
    #[cfg_attr(feature = "serde", serde(deserialize_with = "deserialize_threshold"))]
    append_threshold: f64,
    /// Treat an `Over` outside a gesture as an implicit `Start`
    /// (default: true). When false, such events are ignored.
    pub lazy_gesture_start: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cancel_policy: CancelPolicy::Revert,
            append_threshold: 0.0,
            lazy_gesture_start: true,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn with_cancel_policy(mut self, policy: CancelPolicy) -> Self {
        self.cancel_policy = policy;
        self
    }

    /// Negative or NaN thresholds are clamped to 0.0.
    #[must_use]
    pub fn with_append_threshold(mut self, threshold: f64) -> Self {
        self.append_threshold = clamp_threshold(threshold);
        self
    }

    #[inline]
    #[must_use]
    pub fn append_threshold(&self) -> f64 {
        self.append_threshold
    }

    #[must_use]
    pub fn with_lazy_gesture_start(mut self, enabled: bool) -> Self {
        self.lazy_gesture_start = enabled;
        self
    }
}

fn clamp_threshold(threshold: f64) -> f64 {
    if threshold.is_nan() {
        0.0
    } else {
        threshold.max(0.0)
    }
}

#[cfg(feature = "serde")]
fn deserialize_threshold<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    <f64 as serde::Deserialize>::deserialize(deserializer).map(clamp_threshold)
}
