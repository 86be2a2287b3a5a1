//! # GLIDE Render
//!
//! Smooths display attributes between authoritative ticks.
//!
//! ## Architecture
//!
//! ```text
//! AttributeUpdate ──▶ RenderStateController::apply
//!                              │ pending flags
//!            tick ──▶ RenderStateController::tick
//!                              │ at most one rebuild
//!                              ▼
//!                         RenderState  (interpolators)
//!                              │
//!   frame(partial) ──▶ RenderState::sample(progress) ──▶ RenderFrame
//! ```
//!
//! Each attribute type has exactly one interpolator family; see
//! [`interpolator`]. Progress is shared by all attributes of a display and is
//! computed by [`progress::interpolation_progress`].
//!
//! ## Example
//!
//! ```rust
//! use glide_render::{AttributeUpdate, DisplayData, DisplayKind, RenderStateController};
//!
//! let mut data = DisplayData::new(DisplayKind::Block);
//! data.interpolation_duration = 4;
//! let mut display = RenderStateController::new(data);
//! display.tick();
//!
//! display.apply(AttributeUpdate::ShadowRadius(2.0));
//! display.apply(AttributeUpdate::InterpolationDelay(0));
//! display.tick();
//!
//! let frame = display.frame(0.5).map(|frame| frame.shadow_radius);
//! assert_eq!(frame, Some(0.25));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod attributes;
pub mod controller;
pub mod interpolator;
pub mod progress;
pub mod state;

pub use attributes::{
    Attribute, AttributeUpdate, Billboard, BlockContent, BlockStateId, Brightness, DisplayContent,
    DisplayData, DisplayKind, ItemContent, ItemContext, ItemKey, TextAlignment, TextContent,
    TextFlags,
};
pub use controller::RenderStateController;
pub use interpolator::{
    ColorInterpolator, FloatInterpolator, IntInterpolator, TransformInterpolator, ValueInterpolator,
};
pub use progress::{interpolation_progress, InterpolationClock};
pub use state::{RenderFrame, RenderState, SubFrame, SubRenderState, TextFrame, TextRenderState};
