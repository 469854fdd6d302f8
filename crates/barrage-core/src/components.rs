//! Component data attached to entities.
//!
//! Position and momentum are plain `glam::Vec2`; lifetimes and fades reuse
//! `Cooldown` and `LerpThing` from `timing`; emitters reuse `BulletSource`
//! from `pattern`. This module holds the remaining component kinds.

use serde::{Deserialize, Serialize};

use crate::constants::ALPHA_MAX;
use crate::timing::LerpThing;
use crate::types::EntityId;

/// Marker: entity is culled once it leaves the oversized world bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InWorld;

/// Marker: entity reflects off the screen edges instead of leaving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounce;

/// Non-owning reference to the entity a pattern aims at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target(pub EntityId);

/// Bullet looks available to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteKind {
    HotPink,
    Cyan,
    Yellow,
    LightBlue,
    Green,
    Red,
    Beat,
}

/// How the renderer draws a bullet: a radial gradient core with an
/// optional outline ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteStyle {
    pub core_radius: u32,
    /// Zero when the sprite has no outline.
    pub ring_radius: u32,
    pub ring_width: u32,
    pub center_color: &'static str,
    pub edge_color: &'static str,
    pub ring_color: &'static str,
}

impl SpriteKind {
    pub const ALL: [SpriteKind; 7] = [
        SpriteKind::HotPink,
        SpriteKind::Cyan,
        SpriteKind::Yellow,
        SpriteKind::LightBlue,
        SpriteKind::Green,
        SpriteKind::Red,
        SpriteKind::Beat,
    ];

    pub fn style(self) -> SpriteStyle {
        let (core_radius, ring_radius, ring_width, center_color, edge_color, ring_color) =
            match self {
                SpriteKind::HotPink => (8, 0, 1, "white", "hotpink", "hotpink"),
                SpriteKind::Cyan => (8, 0, 1, "cyan", "darkblue", "cyan"),
                SpriteKind::Yellow => (9, 12, 1, "yellow", "darkorange", "darkorange"),
                SpriteKind::LightBlue => (10, 13, 1, "white", "lightblue", "lightblue"),
                SpriteKind::Green => (6, 8, 1, "yellow", "green", "green"),
                SpriteKind::Red => (4, 0, 1, "red", "brown", "red"),
                SpriteKind::Beat => (16, 0, 0, "white", "grey80", "white"),
            };
        SpriteStyle {
            core_radius,
            ring_radius,
            ring_width,
            center_color,
            edge_color,
            ring_color,
        }
    }

    /// Side length of the square image the sprite is drawn into.
    pub fn size(self) -> u32 {
        let style = self.style();
        2 * style.ring_radius.max(style.core_radius)
    }
}

/// Render handle of a sprite entity. The renderer reads it after the frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Visual {
    pub sprite: SpriteKind,
    /// 0 (transparent) to 255 (opaque).
    pub alpha: f32,
    /// Centre of the sprite on screen, synced from `position` every frame.
    pub anchor: glam::Vec2,
}

impl Visual {
    pub fn new(sprite: SpriteKind, alpha: f32) -> Self {
        Self {
            sprite,
            alpha,
            anchor: glam::Vec2::ZERO,
        }
    }

    pub fn opaque(sprite: SpriteKind) -> Self {
        Self::new(sprite, ALPHA_MAX)
    }
}

/// Centred text line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    pub size: u32,
}

/// Outline drawn around an entity's position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Circle { radius: f32, color: String },
}

/// Two-bit fade request: bit 0 fades in at creation, bit 1 fades out so the
/// bullet is transparent exactly when its lifetime runs out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FadeFlags(pub u8);

impl FadeFlags {
    pub const NONE: FadeFlags = FadeFlags(0);
    pub const IN: FadeFlags = FadeFlags(1);
    pub const OUT: FadeFlags = FadeFlags(2);
    pub const BOTH: FadeFlags = FadeFlags(3);

    pub fn fades_in(self) -> bool {
        self.0 & Self::IN.0 != 0
    }

    pub fn fades_out(self) -> bool {
        self.0 & Self::OUT.0 != 0
    }
}

/// Optional components copied onto every bullet a factory spawns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletExtras {
    /// Seconds until the bullet expires.
    pub lifetime: Option<f32>,
    /// Turn rate of the bullet's momentum (degrees/s).
    pub angular_momentum: Option<f32>,
    /// Orientation sweep, restarted when the bullet is created.
    pub rotation: Option<LerpThing>,
}

/// Bound bullet constructor: everything except where, which way and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletFactory {
    pub sprite: SpriteKind,
    pub speed: f32,
    #[serde(default)]
    pub fade: FadeFlags,
    #[serde(flatten)]
    pub extras: BulletExtras,
}

impl BulletFactory {
    pub fn new(sprite: SpriteKind, speed: f32) -> Self {
        Self {
            sprite,
            speed,
            fade: FadeFlags::NONE,
            extras: BulletExtras::default(),
        }
    }

    pub fn with_fade(mut self, fade: FadeFlags) -> Self {
        self.fade = fade;
        self
    }

    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.extras.lifetime = Some(lifetime);
        self
    }

    pub fn with_angular_momentum(mut self, degrees_per_sec: f32) -> Self {
        self.extras.angular_momentum = Some(degrees_per_sec);
        self
    }

    pub fn with_rotation(mut self, rotation: LerpThing) -> Self {
        self.extras.rotation = Some(rotation);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_flags_bits() {
        assert!(!FadeFlags::NONE.fades_in());
        assert!(FadeFlags::IN.fades_in());
        assert!(!FadeFlags::IN.fades_out());
        assert!(FadeFlags::OUT.fades_out());
        assert!(FadeFlags::BOTH.fades_in() && FadeFlags::BOTH.fades_out());
    }

    #[test]
    fn test_sprite_sizes() {
        assert_eq!(SpriteKind::HotPink.size(), 16);
        assert_eq!(SpriteKind::Yellow.size(), 24);
        assert_eq!(SpriteKind::Beat.size(), 32);
        assert_eq!(SpriteKind::Red.size(), 8);
    }

    #[test]
    fn test_factory_builder() {
        let factory = BulletFactory::new(SpriteKind::Cyan, -150.0)
            .with_fade(FadeFlags::IN)
            .with_lifetime(8.0)
            .with_angular_momentum(15.0);
        assert_eq!(factory.extras.lifetime, Some(8.0));
        assert_eq!(factory.extras.angular_momentum, Some(15.0));
        assert!(factory.extras.rotation.is_none());
    }
}
