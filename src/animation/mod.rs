//! Per-frame animation of particle groups between the assembled tree and
//! the dispersed cloud.
//!
//! Every frame each particle lerps a damped fraction of the way toward its
//! mode-dependent target. Assembled targets sway in the wind; dispersed
//! particles tumble. Nothing here fails: a frame is a fold over the current
//! state, and the next frame re-derives everything from state and time.

pub mod damping;
mod group;
mod mode;
pub mod snow;
pub mod sway;
mod topper;
mod transform;

pub use damping::Damping;
pub use group::{GroupAnimator, MotionProfile};
pub use mode::Mode;
pub use snow::SnowField;
pub use sway::Sway;
pub use topper::TopperAnimator;
pub use transform::{InstanceRaw, ParticleTransform};
