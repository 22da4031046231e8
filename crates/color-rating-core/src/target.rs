//! Animation targets and handles.
//!
//! A target is anything with an observable color property. The runner keys
//! every run by the pair `(target, handle)`, so one target can host several
//! independent animations as long as they use different handles. The key uses
//! the target object itself; two targets with the same id never collide.

use std::borrow::Cow;
use std::fmt;

use crate::color::Color;

/// An object whose color can be driven by the [`AnimationRunner`](crate::AnimationRunner).
///
/// `set_color` is called from the runner's tick task. The runner holds only a
/// weak reference, so dropping the last strong reference to a target stops
/// its animations.
pub trait ColorTarget: Send + Sync + 'static {
    /// Name of this target in logs. Must not be empty.
    fn target_id(&self) -> &str;

    /// Current color.
    fn color(&self) -> Color;

    /// Replace the current color.
    fn set_color(&self, color: Color);
}

/// Names one logical animation slot on a target.
///
/// Starting a run under a handle that is already running on the same target
/// supersedes the previous run.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AnimationHandle(Cow<'static, str>);

impl AnimationHandle {
    /// The slot used by color animations.
    pub const COLOR: AnimationHandle = AnimationHandle(Cow::Borrowed("ColorTo"));

    /// Create a handle from a static name.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create a handle from any string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// The handle's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AnimationHandle {
    fn default() -> Self {
        Self::COLOR
    }
}

impl fmt::Debug for AnimationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnimationHandle({:?})", self.as_str())
    }
}

impl fmt::Display for AnimationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&'static str> for AnimationHandle {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for AnimationHandle {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
