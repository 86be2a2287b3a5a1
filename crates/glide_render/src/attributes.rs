//! # Display Attributes
//!
//! The synchronized data of a display object and the typed updates that
//! change it.
//!
//! Every display carries the common attributes (transformation, shadow,
//! billboard, lighting and glow overrides, interpolation timing) plus the
//! content of exactly one kind:
//!
//! | Kind | Content |
//! |------|---------|
//! | [`DisplayKind::Block`] | block state id |
//! | [`DisplayKind::Item`] | item key, display context |
//! | [`DisplayKind::Text`] | text, line width, opacity, background, flags |

use glide_shared::{Argb, Transformation};
use serde::{Deserialize, Serialize};

/// Maximum light level of a brightness override.
pub const MAX_LIGHT: u8 = 15;

/// Default wrap width of a text display, in pixels.
pub const DEFAULT_LINE_WIDTH: i32 = 200;

/// Default background of a text display.
pub const DEFAULT_BACKGROUND: Argb = Argb(0x4000_0000);

/// How a display turns to face the camera.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Billboard {
    /// Never turns.
    #[default]
    Fixed,
    /// Turns around the vertical axis only.
    Vertical,
    /// Tilts around the horizontal axis only.
    Horizontal,
    /// Always faces the camera.
    Center,
}

/// Horizontal alignment of text lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlignment {
    /// Centered (neither alignment flag set).
    #[default]
    Center,
    /// Left aligned.
    Left,
    /// Right aligned.
    Right,
}

/// Which item model transform an item display uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemContext {
    /// Untransformed model.
    #[default]
    None,
    /// Held in the left hand, third person.
    ThirdPersonLeftHand,
    /// Held in the right hand, third person.
    ThirdPersonRightHand,
    /// Held in the left hand, first person.
    FirstPersonLeftHand,
    /// Held in the right hand, first person.
    FirstPersonRightHand,
    /// Worn on the head.
    Head,
    /// Inventory slot.
    Gui,
    /// Dropped on the ground.
    Ground,
    /// Item frame.
    Fixed,
}

/// The closed set of display kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayKind {
    /// Renders a block state.
    Block,
    /// Renders an item stack.
    Item,
    /// Renders a text component.
    Text,
}

/// Block and sky light override, each `0..=15`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Brightness {
    block: u8,
    sky: u8,
}

impl Brightness {
    /// Creates an override. Levels above 15 are clamped.
    #[must_use]
    pub fn new(block: u8, sky: u8) -> Self {
        Self {
            block: block.min(MAX_LIGHT),
            sky: sky.min(MAX_LIGHT),
        }
    }

    /// Block light level.
    #[must_use]
    pub const fn block(self) -> u8 {
        self.block
    }

    /// Sky light level.
    #[must_use]
    pub const fn sky(self) -> u8 {
        self.sky
    }

    /// Packed light coordinates (`block << 4 | sky << 20`).
    #[must_use]
    pub const fn packed(self) -> u32 {
        (self.block as u32) << 4 | (self.sky as u32) << 20
    }
}

/// Style bits of a text display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextFlags(pub u8);

impl TextFlags {
    /// Drop shadow under glyphs.
    pub const SHADOW: Self = Self(0x01);
    /// Visible through blocks.
    pub const SEE_THROUGH: Self = Self(0x02);
    /// Use the client's default background instead of the background color.
    pub const DEFAULT_BACKGROUND: Self = Self(0x04);
    /// Left alignment.
    pub const ALIGN_LEFT: Self = Self(0x08);
    /// Right alignment. Ignored when [`Self::ALIGN_LEFT`] is also set.
    pub const ALIGN_RIGHT: Self = Self(0x10);

    /// No flags.
    pub const NONE: Self = Self(0);

    /// Whether every bit of `flag` is set.
    #[must_use]
    pub const fn contains(self, flag: Self) -> bool {
        self.0 & flag.0 == flag.0
    }

    /// A copy with `flag` set.
    #[must_use]
    pub const fn with(self, flag: Self) -> Self {
        Self(self.0 | flag.0)
    }

    /// Resolved alignment.
    #[must_use]
    pub const fn alignment(self) -> TextAlignment {
        if self.contains(Self::ALIGN_LEFT) {
            TextAlignment::Left
        } else if self.contains(Self::ALIGN_RIGHT) {
            TextAlignment::Right
        } else {
            TextAlignment::Center
        }
    }
}

impl std::ops::BitOr for TextFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.with(rhs)
    }
}

/// Numeric block state id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockStateId(pub u32);

/// Namespaced item key, e.g. `minecraft:diamond`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(pub String);

impl From<&str> for ItemKey {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Content of a block display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContent {
    /// Rendered block state.
    pub block_state: BlockStateId,
}

/// Content of an item display.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemContent {
    /// Rendered item.
    pub item: ItemKey,
    /// Model transform.
    pub context: ItemContext,
}

/// Content of a text display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    /// Plain text, lines separated by `\n`.
    pub text: String,
    /// Wrap width in pixels.
    pub line_width: i32,
    /// Glyph opacity.
    pub text_opacity: u8,
    /// Background color.
    pub background: Argb,
    /// Style bits.
    pub flags: TextFlags,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            text: String::new(),
            line_width: DEFAULT_LINE_WIDTH,
            text_opacity: u8::MAX,
            background: DEFAULT_BACKGROUND,
            flags: TextFlags::NONE,
        }
    }
}

/// Kind-specific content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayContent {
    /// Block display.
    Block(BlockContent),
    /// Item display.
    Item(ItemContent),
    /// Text display.
    Text(TextContent),
}

impl DisplayContent {
    /// Default content for `kind`.
    #[must_use]
    pub fn empty(kind: DisplayKind) -> Self {
        match kind {
            DisplayKind::Block => Self::Block(BlockContent::default()),
            DisplayKind::Item => Self::Item(ItemContent::default()),
            DisplayKind::Text => Self::Text(TextContent::default()),
        }
    }

    /// Which kind this is.
    #[must_use]
    pub const fn kind(&self) -> DisplayKind {
        match self {
            Self::Block(_) => DisplayKind::Block,
            Self::Item(_) => DisplayKind::Item,
            Self::Text(_) => DisplayKind::Text,
        }
    }
}

/// Every synchronized attribute of a display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayData {
    /// Render transformation relative to the display's pose.
    pub transformation: Transformation,
    /// Render interpolation duration in ticks (0 = none).
    pub interpolation_duration: u32,
    /// Ticks between a change and the start of its interpolation.
    pub interpolation_delay: i32,
    /// Motion interpolation steps for pose updates (0 = snap).
    pub pos_rot_interpolation_duration: u32,
    /// Camera facing.
    pub billboard: Billboard,
    /// Light override, `None` uses world light.
    pub brightness: Option<Brightness>,
    /// Shadow radius in blocks.
    pub shadow_radius: f32,
    /// Shadow opacity multiplier.
    pub shadow_strength: f32,
    /// Glow outline override, `None` uses the team color.
    pub glow_color: Option<Argb>,
    /// Kind-specific content.
    pub content: DisplayContent,
}

impl DisplayData {
    /// Default attributes for a display of `kind`.
    #[must_use]
    pub fn new(kind: DisplayKind) -> Self {
        Self::with_content(DisplayContent::empty(kind))
    }

    /// Default common attributes around `content`.
    #[must_use]
    pub fn with_content(content: DisplayContent) -> Self {
        Self {
            transformation: Transformation::IDENTITY,
            interpolation_duration: 0,
            interpolation_delay: 0,
            pos_rot_interpolation_duration: 0,
            billboard: Billboard::Fixed,
            brightness: None,
            shadow_radius: 0.0,
            shadow_strength: 1.0,
            glow_color: None,
            content,
        }
    }

    /// Display kind.
    #[must_use]
    pub const fn kind(&self) -> DisplayKind {
        self.content.kind()
    }

    /// Stores `update`.
    ///
    /// Returns `false` and leaves the data untouched if the update targets
    /// content of another kind.
    pub fn apply(&mut self, update: AttributeUpdate) -> bool {
        match (update, &mut self.content) {
            (AttributeUpdate::Transformation(value), _) => self.transformation = value,
            (AttributeUpdate::InterpolationDuration(value), _) => self.interpolation_duration = value,
            (AttributeUpdate::InterpolationDelay(value), _) => self.interpolation_delay = value,
            (AttributeUpdate::PosRotInterpolationDuration(value), _) => {
                self.pos_rot_interpolation_duration = value;
            }
            (AttributeUpdate::Billboard(value), _) => self.billboard = value,
            (AttributeUpdate::Brightness(value), _) => self.brightness = value,
            (AttributeUpdate::ShadowRadius(value), _) => self.shadow_radius = value,
            (AttributeUpdate::ShadowStrength(value), _) => self.shadow_strength = value,
            (AttributeUpdate::GlowColor(value), _) => self.glow_color = value,
            (AttributeUpdate::BlockState(value), DisplayContent::Block(block)) => {
                block.block_state = value;
            }
            (AttributeUpdate::Item(value), DisplayContent::Item(item)) => item.item = value,
            (AttributeUpdate::ItemContext(value), DisplayContent::Item(item)) => item.context = value,
            (AttributeUpdate::Text(value), DisplayContent::Text(text)) => text.text = value,
            (AttributeUpdate::LineWidth(value), DisplayContent::Text(text)) => text.line_width = value,
            (AttributeUpdate::TextOpacity(value), DisplayContent::Text(text)) => {
                text.text_opacity = value;
            }
            (AttributeUpdate::Background(value), DisplayContent::Text(text)) => text.background = value,
            (AttributeUpdate::TextFlags(value), DisplayContent::Text(text)) => text.flags = value,
            _ => return false,
        }
        true
    }
}

/// Identifies one attribute, as passed to change notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// [`DisplayData::transformation`]
    Transformation,
    /// [`DisplayData::interpolation_duration`]
    InterpolationDuration,
    /// [`DisplayData::interpolation_delay`]
    InterpolationDelay,
    /// [`DisplayData::pos_rot_interpolation_duration`]
    PosRotInterpolationDuration,
    /// [`DisplayData::billboard`]
    Billboard,
    /// [`DisplayData::brightness`]
    Brightness,
    /// [`DisplayData::shadow_radius`]
    ShadowRadius,
    /// [`DisplayData::shadow_strength`]
    ShadowStrength,
    /// [`DisplayData::glow_color`]
    GlowColor,
    /// [`BlockContent::block_state`]
    BlockState,
    /// [`ItemContent::item`]
    Item,
    /// [`ItemContent::context`]
    ItemContext,
    /// [`TextContent::text`]
    Text,
    /// [`TextContent::line_width`]
    LineWidth,
    /// [`TextContent::text_opacity`]
    TextOpacity,
    /// [`TextContent::background`]
    Background,
    /// [`TextContent::flags`]
    TextFlags,
}

impl Attribute {
    /// Whether a change invalidates the render state.
    ///
    /// Interpolation timing attributes only steer the clock.
    #[must_use]
    pub const fn affects_render_state(self) -> bool {
        !matches!(
            self,
            Self::InterpolationDuration | Self::InterpolationDelay | Self::PosRotInterpolationDuration
        )
    }

    /// The kind this attribute belongs to, `None` for common attributes.
    #[must_use]
    pub const fn kind(self) -> Option<DisplayKind> {
        match self {
            Self::BlockState => Some(DisplayKind::Block),
            Self::Item | Self::ItemContext => Some(DisplayKind::Item),
            Self::Text | Self::LineWidth | Self::TextOpacity | Self::Background | Self::TextFlags => {
                Some(DisplayKind::Text)
            }
            _ => None,
        }
    }
}

/// A new value for one attribute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "attribute", content = "value", rename_all = "snake_case")]
pub enum AttributeUpdate {
    /// New transformation.
    Transformation(Transformation),
    /// New interpolation duration.
    InterpolationDuration(u32),
    /// New start delay.
    InterpolationDelay(i32),
    /// New motion step count.
    PosRotInterpolationDuration(u32),
    /// New billboard mode.
    Billboard(Billboard),
    /// New light override.
    Brightness(Option<Brightness>),
    /// New shadow radius.
    ShadowRadius(f32),
    /// New shadow strength.
    ShadowStrength(f32),
    /// New glow override.
    GlowColor(Option<Argb>),
    /// New block state.
    BlockState(BlockStateId),
    /// New item.
    Item(ItemKey),
    /// New item context.
    ItemContext(ItemContext),
    /// New text.
    Text(String),
    /// New line width.
    LineWidth(i32),
    /// New text opacity.
    TextOpacity(u8),
    /// New background color.
    Background(Argb),
    /// New text flags.
    TextFlags(TextFlags),
}

impl AttributeUpdate {
    /// The attribute this update changes.
    #[must_use]
    pub const fn attribute(&self) -> Attribute {
        match self {
            Self::Transformation(_) => Attribute::Transformation,
            Self::InterpolationDuration(_) => Attribute::InterpolationDuration,
            Self::InterpolationDelay(_) => Attribute::InterpolationDelay,
            Self::PosRotInterpolationDuration(_) => Attribute::PosRotInterpolationDuration,
            Self::Billboard(_) => Attribute::Billboard,
            Self::Brightness(_) => Attribute::Brightness,
            Self::ShadowRadius(_) => Attribute::ShadowRadius,
            Self::ShadowStrength(_) => Attribute::ShadowStrength,
            Self::GlowColor(_) => Attribute::GlowColor,
            Self::BlockState(_) => Attribute::BlockState,
            Self::Item(_) => Attribute::Item,
            Self::ItemContext(_) => Attribute::ItemContext,
            Self::Text(_) => Attribute::Text,
            Self::LineWidth(_) => Attribute::LineWidth,
            Self::TextOpacity(_) => Attribute::TextOpacity,
            Self::Background(_) => Attribute::Background,
            Self::TextFlags(_) => Attribute::TextFlags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let data = DisplayData::new(DisplayKind::Text);
        assert_eq!(data.shadow_strength, 1.0);
        assert_eq!(data.billboard, Billboard::Fixed);
        let DisplayContent::Text(text) = &data.content else {
            panic!("expected text content");
        };
        assert_eq!(text.line_width, 200);
        assert_eq!(text.text_opacity, 255);
        assert_eq!(text.background, Argb(0x4000_0000));
    }

    #[test]
    fn test_apply_common_and_matching_content() {
        let mut data = DisplayData::new(DisplayKind::Block);
        assert!(data.apply(AttributeUpdate::ShadowRadius(2.5)));
        assert!(data.apply(AttributeUpdate::BlockState(BlockStateId(42))));

        assert_eq!(data.shadow_radius, 2.5);
        assert_eq!(data.content, DisplayContent::Block(BlockContent { block_state: BlockStateId(42) }));
    }

    #[test]
    fn test_apply_rejects_other_kind() {
        let mut data = DisplayData::new(DisplayKind::Block);
        let before = data.clone();
        assert!(!data.apply(AttributeUpdate::LineWidth(80)));
        assert!(!data.apply(AttributeUpdate::Item(ItemKey::from("minecraft:stick"))));
        assert_eq!(data, before);
    }

    #[test]
    fn test_brightness_clamped_and_packed() {
        let b = Brightness::new(20, 7);
        assert_eq!(b.block(), 15);
        assert_eq!(b.sky(), 7);
        assert_eq!(b.packed(), 15 << 4 | 7 << 20);
    }

    #[test]
    fn test_text_alignment_left_wins() {
        assert_eq!(TextFlags::NONE.alignment(), TextAlignment::Center);
        assert_eq!(TextFlags::ALIGN_RIGHT.alignment(), TextAlignment::Right);
        assert_eq!((TextFlags::ALIGN_LEFT | TextFlags::ALIGN_RIGHT).alignment(), TextAlignment::Left);
        assert!((TextFlags::SHADOW | TextFlags::SEE_THROUGH).contains(TextFlags::SEE_THROUGH));
    }

    #[test]
    fn test_timing_attributes_do_not_dirty_render_state() {
        assert!(!Attribute::InterpolationDuration.affects_render_state());
        assert!(!Attribute::InterpolationDelay.affects_render_state());
        assert!(Attribute::Background.affects_render_state());
        assert_eq!(Attribute::Background.kind(), Some(DisplayKind::Text));
        assert_eq!(Attribute::GlowColor.kind(), None);
    }
}
