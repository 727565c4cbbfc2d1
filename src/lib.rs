//! Luckywheel renders a deterministic "spin the wheel" animation that settles on a pre-selected
//! winner, and encodes it as a looping GIF.
//!
//! The pipeline runs strictly forward:
//!
//! - [`order`] candidates so the winner lands on a known segment
//! - [`plan`] the per-frame rotation (ease-out spin, then a hold on the winner)
//! - render each angle with a [`WheelRenderer`]
//! - [`assemble`] the frames with a [`GifSink`]
//!
//! [`SpinSession`] and [`render_wheel_gif`] wire the steps together from a [`SpinRequest`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

/// Rotation schedule and easing.
pub mod animation;
/// Encoding sinks.
pub mod encode;
/// CPU rendering.
pub mod render;
/// Boundary request model.
pub mod scene;
/// Session-oriented API.
pub mod session;
/// Candidate ordering and wheel geometry.
pub mod wheel;

pub use crate::foundation::core::{Affine, BezPath, FrameIndex, Point, Rgb8, shade_hex};
pub use crate::foundation::error::{WheelError, WheelResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::schedule::{
    AnimationPlan, Landing, ScheduleOpts, plan, plan_with, terminal_angle,
};
pub use crate::assets::decode::PreparedImage;
pub use crate::assets::loader::{AssetLoader, AssetRef, FsAssetLoader};
pub use crate::encode::gif::{GifOpts, GifSink, assemble};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::backend::FrameRGBA;
pub use crate::render::cpu::{AvatarPolicy, RenderOpts, WheelRenderer, render_frame};
pub use crate::scene::request::{SpinOpts, SpinRequest};
pub use crate::session::spin::{SpinSession, SpinStats, render_wheel_gif};
pub use crate::wheel::geometry::{
    WheelGeometry, segment_range, segment_span, segment_under_pointer,
};
pub use crate::wheel::order::{Candidate, OrderedWheel, order};
