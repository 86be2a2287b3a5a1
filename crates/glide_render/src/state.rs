//! Render states and the frames sampled from them.
//!
//! A [`RenderState`] is built at most once per tick and never mutated. It
//! holds one interpolator per tracked attribute; [`RenderState::sample`]
//! resolves them all at a progress into a [`RenderFrame`].

use glide_shared::{Argb, Transformation};

use crate::attributes::{
    Billboard, BlockContent, Brightness, DisplayContent, DisplayData, ItemContent, TextContent,
    TextFlags,
};
use crate::interpolator::{
    ColorInterpolator, FloatInterpolator, IntInterpolator, TransformInterpolator, ValueInterpolator,
};

/// Interpolators for every tracked attribute of one display.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderState {
    /// Render transformation.
    pub transformation: TransformInterpolator,
    /// Camera facing.
    pub billboard: Billboard,
    /// Light override.
    pub brightness: Option<Brightness>,
    /// Shadow radius.
    pub shadow_radius: FloatInterpolator,
    /// Shadow strength.
    pub shadow_strength: FloatInterpolator,
    /// Glow override.
    pub glow_color: Option<Argb>,
    /// Kind-specific part.
    pub sub: SubRenderState,
}

/// Kind-specific part of a [`RenderState`].
#[derive(Clone, Debug, PartialEq)]
pub enum SubRenderState {
    /// Block content is never interpolated.
    Block(BlockContent),
    /// Item content is never interpolated.
    Item(ItemContent),
    /// Text content.
    Text(TextRenderState),
}

/// Interpolators for a text display.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRenderState {
    /// Text, swapped instantly.
    pub text: String,
    /// Wrap width.
    pub line_width: IntInterpolator,
    /// Glyph opacity.
    pub text_opacity: IntInterpolator,
    /// Background color.
    pub background: ColorInterpolator,
    /// Style bits.
    pub flags: TextFlags,
}

impl TextRenderState {
    fn fresh(content: &TextContent) -> Self {
        Self {
            text: content.text.clone(),
            line_width: IntInterpolator::constant(content.line_width),
            text_opacity: IntInterpolator::constant(i32::from(content.text_opacity)),
            background: ColorInterpolator::constant(content.background),
            flags: content.flags,
        }
    }

    fn interpolated(&self, content: &TextContent, progress: f32) -> Self {
        Self {
            text: content.text.clone(),
            line_width: IntInterpolator::linear(self.line_width.get(progress), content.line_width),
            text_opacity: IntInterpolator::linear(
                self.text_opacity.get(progress),
                i32::from(content.text_opacity),
            ),
            background: ColorInterpolator::color(self.background.get(progress), content.background),
            flags: content.flags,
        }
    }

    fn sample(&self, progress: f32) -> TextFrame<'_> {
        TextFrame {
            text: &self.text,
            line_width: self.line_width.get(progress),
            text_opacity: self.text_opacity.get(progress).clamp(0, 255) as u8,
            background: self.background.get(progress),
            flags: self.flags,
        }
    }
}

impl SubRenderState {
    fn fresh(content: &DisplayContent) -> Self {
        match content {
            DisplayContent::Block(block) => Self::Block(*block),
            DisplayContent::Item(item) => Self::Item(item.clone()),
            DisplayContent::Text(text) => Self::Text(TextRenderState::fresh(text)),
        }
    }

    fn interpolated(&self, content: &DisplayContent, progress: f32) -> Self {
        match (self, content) {
            (Self::Text(previous), DisplayContent::Text(text)) => {
                Self::Text(previous.interpolated(text, progress))
            }
            _ => Self::fresh(content),
        }
    }
}

impl RenderState {
    /// A state of constant interpolators, used when there is nothing to
    /// interpolate from.
    #[must_use]
    pub fn fresh(data: &DisplayData) -> Self {
        Self {
            transformation: TransformInterpolator::constant(data.transformation),
            billboard: data.billboard,
            brightness: data.brightness,
            shadow_radius: FloatInterpolator::constant(data.shadow_radius),
            shadow_strength: FloatInterpolator::constant(data.shadow_strength),
            glow_color: data.glow_color,
            sub: SubRenderState::fresh(&data.content),
        }
    }

    /// A state interpolating from this one, frozen at `progress`, towards
    /// `data`.
    #[must_use]
    pub fn interpolated(&self, data: &DisplayData, progress: f32) -> Self {
        Self {
            transformation: TransformInterpolator::spherical(
                self.transformation.get(progress),
                data.transformation,
            ),
            billboard: data.billboard,
            brightness: data.brightness,
            shadow_radius: FloatInterpolator::linear(self.shadow_radius.get(progress), data.shadow_radius),
            shadow_strength: FloatInterpolator::linear(
                self.shadow_strength.get(progress),
                data.shadow_strength,
            ),
            glow_color: data.glow_color,
            sub: self.sub.interpolated(&data.content, progress),
        }
    }

    /// Resolves every interpolator at `progress`.
    #[must_use]
    pub fn sample(&self, progress: f32) -> RenderFrame<'_> {
        let sub = match &self.sub {
            SubRenderState::Block(block) => SubFrame::Block(block),
            SubRenderState::Item(item) => SubFrame::Item(item),
            SubRenderState::Text(text) => SubFrame::Text(text.sample(progress)),
        };
        RenderFrame {
            transformation: self.transformation.get(progress),
            billboard: self.billboard,
            brightness: self.brightness,
            shadow_radius: self.shadow_radius.get(progress),
            shadow_strength: self.shadow_strength.get(progress),
            glow_color: self.glow_color,
            sub,
        }
    }
}

/// Resolved values for one presentation frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderFrame<'a> {
    /// Render transformation.
    pub transformation: Transformation,
    /// Camera facing.
    pub billboard: Billboard,
    /// Light override.
    pub brightness: Option<Brightness>,
    /// Shadow radius.
    pub shadow_radius: f32,
    /// Shadow strength.
    pub shadow_strength: f32,
    /// Glow override.
    pub glow_color: Option<Argb>,
    /// Kind-specific values.
    pub sub: SubFrame<'a>,
}

/// Kind-specific resolved values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SubFrame<'a> {
    /// Block display.
    Block(&'a BlockContent),
    /// Item display.
    Item(&'a ItemContent),
    /// Text display.
    Text(TextFrame<'a>),
}

/// Resolved text values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextFrame<'a> {
    /// Text.
    pub text: &'a str,
    /// Wrap width.
    pub line_width: i32,
    /// Glyph opacity.
    pub text_opacity: u8,
    /// Background color.
    pub background: Argb,
    /// Style bits.
    pub flags: TextFlags,
}
