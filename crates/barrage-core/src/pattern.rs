//! Pattern geometry: where bullets appear, which way they fly, and when.
//!
//! A `Ring` places bullets on an arc, a `Heartbeat` gates volleys in time,
//! and a `BulletSource` combines both with the aim and rotation offsets that
//! the aim and rotate systems write every frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{BEAT_FIRE, BEAT_REST};
use crate::error::PatternError;
use crate::types::direction;

/// `count` slots spread over an arc of `width` degrees centred on `aim`,
/// at `radius` from the pattern origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RingSpec", into = "RingSpec")]
pub struct Ring {
    radius: f32,
    count: u32,
    aim: f32,
    width: f32,
}

/// Serialized form of a `Ring`, validated on conversion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RingSpec {
    pub radius: f32,
    pub count: u32,
    #[serde(default)]
    pub aim: f32,
    #[serde(default = "full_circle")]
    pub width: f32,
}

fn full_circle() -> f32 {
    360.0
}

impl Ring {
    pub fn new(radius: f32, count: u32) -> Result<Self, PatternError> {
        let ring = Self {
            radius,
            count,
            aim: 0.0,
            width: full_circle(),
        };
        ring.validate()?;
        Ok(ring)
    }

    pub fn with_aim(mut self, aim: f32) -> Result<Self, PatternError> {
        self.aim = aim;
        self.validate()?;
        Ok(self)
    }

    pub fn with_width(mut self, width: f32) -> Result<Self, PatternError> {
        self.width = width;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), PatternError> {
        if self.count == 0 {
            return Err(PatternError::ZeroRingCount);
        }
        if !self.radius.is_finite() {
            return Err(PatternError::NonFinite("ring radius"));
        }
        if !self.aim.is_finite() {
            return Err(PatternError::NonFinite("ring aim"));
        }
        if !self.width.is_finite() {
            return Err(PatternError::NonFinite("ring width"));
        }
        if self.width < 0.0 {
            return Err(PatternError::NegativeWidth(self.width));
        }
        Ok(())
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn aim(&self) -> f32 {
        self.aim
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Angle of slot `i` (taken modulo `count`), in degrees.
    ///
    /// A full ring spaces slots `360 / count` apart starting at `aim`; a fan
    /// puts its first and last slot on the arc's edges.
    pub fn angle(&self, i: u32) -> f32 {
        let i = i % self.count;
        if self.count == 1 {
            return self.aim;
        }
        if self.width >= 360.0 {
            self.aim + i as f32 * 360.0 / self.count as f32
        } else {
            self.aim - self.width / 2.0 + i as f32 * self.width / (self.count - 1) as f32
        }
    }

    /// Unit direction of slot `i`, turned by an additional `extra_aim` degrees.
    pub fn direction(&self, i: u32, extra_aim: f32) -> Vec2 {
        direction(self.angle(i) + extra_aim)
    }

    /// Offset from the pattern origin and flight direction of slot `i`.
    pub fn slot(&self, i: u32, extra_aim: f32) -> (Vec2, Vec2) {
        let dir = self.direction(i, extra_aim);
        (dir * self.radius, dir)
    }
}

impl TryFrom<RingSpec> for Ring {
    type Error = PatternError;

    fn try_from(spec: RingSpec) -> Result<Self, Self::Error> {
        Ring::new(spec.radius, spec.count)?
            .with_aim(spec.aim)?
            .with_width(spec.width)
    }
}

impl From<Ring> for RingSpec {
    fn from(ring: Ring) -> Self {
        RingSpec {
            radius: ring.radius,
            count: ring.count,
            aim: ring.aim,
            width: ring.width,
        }
    }
}

/// Cyclic fire/rest gate: `beats.len()` equal sub-slots per `period` seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HeartbeatSpec", into = "HeartbeatSpec")]
pub struct Heartbeat {
    period: f32,
    beats: Vec<bool>,
    elapsed: f32,
    last_slot: Option<u64>,
}

/// Serialized form of a `Heartbeat`: period plus the `#`/`.` pattern string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatSpec {
    pub period: f32,
    pub pattern: String,
}

impl Heartbeat {
    /// Parse a pattern of `#` (fire) and `.` (rest) symbols.
    pub fn new(period: f32, pattern: &str) -> Result<Self, PatternError> {
        if !period.is_finite() || period <= 0.0 {
            return Err(PatternError::InvalidPeriod(period));
        }
        let beats = pattern
            .chars()
            .map(|c| match c {
                BEAT_FIRE => Ok(true),
                BEAT_REST => Ok(false),
                other => Err(PatternError::UnknownBeatSymbol(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if beats.is_empty() {
            return Err(PatternError::EmptyHeartbeat);
        }
        Ok(Self {
            period,
            beats,
            elapsed: 0.0,
            last_slot: None,
        })
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    /// Number of sub-slots per period.
    pub fn len(&self) -> usize {
        self.beats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    /// Time accumulated through `advance`.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Absolute sub-slot number at time `t` (not wrapped to the period).
    pub fn slot_at(&self, t: f32) -> u64 {
        let slot = (t.max(0.0) / self.period * self.beats.len() as f32).floor();
        slot as u64
    }

    /// Whether the sub-slot active at time `t` is a fire slot.
    pub fn fires_at(&self, t: f32) -> bool {
        self.beat(self.slot_at(t))
    }

    fn beat(&self, slot: u64) -> bool {
        self.beats[(slot % self.beats.len() as u64) as usize]
    }

    /// Advance by `dt` and return how many fire sub-slots were entered.
    ///
    /// The first call counts slot 0. Later calls count only slots not seen
    /// before, so a fire slot spanning several frames fires once and a long
    /// frame crossing several fire slots fires for each of them.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.elapsed += dt;
        let current = self.slot_at(self.elapsed);
        let first = match self.last_slot {
            None => 0,
            Some(last) if current > last => last + 1,
            Some(_) => return 0,
        };
        self.last_slot = Some(current);

        let len = self.beats.len() as u64;
        let span = current + 1 - first;
        let per_cycle = self.beats.iter().filter(|&&b| b).count() as u64;
        let mut fired = (span / len) * per_cycle;
        for slot in first..first + span % len {
            if self.beat(slot) {
                fired += 1;
            }
        }
        fired.min(u32::MAX as u64) as u32
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.last_slot = None;
    }
}

impl TryFrom<HeartbeatSpec> for Heartbeat {
    type Error = PatternError;

    fn try_from(spec: HeartbeatSpec) -> Result<Self, Self::Error> {
        Heartbeat::new(spec.period, &spec.pattern)
    }
}

impl From<Heartbeat> for HeartbeatSpec {
    fn from(hb: Heartbeat) -> Self {
        HeartbeatSpec {
            period: hb.period,
            pattern: hb
                .beats
                .iter()
                .map(|&b| if b { BEAT_FIRE } else { BEAT_REST })
                .collect(),
        }
    }
}

/// Active emitter state carried by a pattern entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletSource {
    pub bullets: u32,
    pub ring: Ring,
    pub heartbeat: Heartbeat,
    /// Offset added to the ring's own aim. Overwritten by the aim system for
    /// patterns that track a target.
    #[serde(default)]
    pub aim: f32,
    /// Offset written by the rotate system.
    #[serde(skip)]
    pub rotation: f32,
}

impl BulletSource {
    pub fn new(bullets: u32, ring: Ring, heartbeat: Heartbeat) -> Result<Self, PatternError> {
        let source = Self {
            bullets,
            ring,
            heartbeat,
            aim: 0.0,
            rotation: 0.0,
        };
        source.validate()?;
        Ok(source)
    }

    pub fn with_aim(mut self, aim: f32) -> Self {
        self.aim = aim;
        self
    }

    pub fn validate(&self) -> Result<(), PatternError> {
        if self.bullets == 0 {
            return Err(PatternError::ZeroBullets);
        }
        if !self.aim.is_finite() {
            return Err(PatternError::NonFinite("source aim"));
        }
        self.ring.validate()?;
        if self.heartbeat.is_empty() {
            return Err(PatternError::EmptyHeartbeat);
        }
        Ok(())
    }

    /// Added to every ring slot angle: `aim` plus the current `rotation`.
    pub fn effective_aim(&self) -> f32 {
        self.aim + self.rotation
    }

    /// One volley: `(offset, direction)` for bullets `0..bullets`, bullet `i`
    /// on ring slot `i mod count`.
    pub fn volley(&self) -> Vec<(Vec2, Vec2)> {
        let extra = self.effective_aim();
        (0..self.bullets).map(|i| self.ring.slot(i, extra)).collect()
    }

    /// Advance the heartbeat by `dt` and return every bullet due this frame.
    pub fn fire(&mut self, dt: f32) -> Vec<(Vec2, Vec2)> {
        let volleys = self.heartbeat.advance(dt);
        if volleys == 0 {
            return Vec::new();
        }
        let volley = self.volley();
        let mut out = Vec::with_capacity(volley.len() * volleys as usize);
        for _ in 0..volleys {
            out.extend_from_slice(&volley);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::angle_of;

    fn angle_diff(a: f32, b: f32) -> f32 {
        (a - b + 540.0).rem_euclid(360.0) - 180.0
    }

    #[test]
    fn test_ring_single_slot_points_at_aim() {
        let ring = Ring::new(50.0, 1).unwrap().with_aim(37.0).unwrap();
        assert_eq!(ring.angle(0), 37.0);
        let fan = Ring::new(50.0, 1)
            .unwrap()
            .with_aim(-30.0)
            .unwrap()
            .with_width(30.0)
            .unwrap();
        assert_eq!(fan.angle(0), -30.0);
    }

    #[test]
    fn test_ring_four_slots() {
        let ring = Ring::new(50.0, 4).unwrap();
        let angles: Vec<f32> = (0..4).map(|i| ring.angle(i)).collect();
        assert_eq!(angles, vec![0.0, 90.0, 180.0, 270.0]);
        let (offset, dir) = ring.slot(1, 0.0);
        assert!((offset - Vec2::new(0.0, 50.0)).length() < 1e-3);
        assert!((dir - Vec2::new(0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_ring_fan_covers_arc_edges() {
        let ring = Ring::new(0.0, 5)
            .unwrap()
            .with_aim(45.0)
            .unwrap()
            .with_width(90.0)
            .unwrap();
        assert_eq!(ring.angle(0), 0.0);
        assert_eq!(ring.angle(2), 45.0);
        assert_eq!(ring.angle(4), 90.0);
    }

    #[test]
    fn test_ring_index_wraps() {
        let ring = Ring::new(250.0, 8).unwrap();
        assert_eq!(ring.angle(9), ring.angle(1));
    }

    #[test]
    fn test_ring_rejects_zero_count() {
        assert_eq!(Ring::new(10.0, 0), Err(PatternError::ZeroRingCount));
    }

    #[test]
    fn test_ring_from_json_defaults() {
        let ring: Ring = serde_json::from_str(r#"{"radius": 50, "count": 18}"#).unwrap();
        assert_eq!(ring.aim(), 0.0);
        assert_eq!(ring.width(), 360.0);
        let bad = serde_json::from_str::<Ring>(r#"{"radius": 50, "count": 0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_heartbeat_parse_errors() {
        assert_eq!(Heartbeat::new(1.0, ""), Err(PatternError::EmptyHeartbeat));
        assert_eq!(
            Heartbeat::new(1.0, "#x.."),
            Err(PatternError::UnknownBeatSymbol('x'))
        );
        assert_eq!(
            Heartbeat::new(0.0, "#..."),
            Err(PatternError::InvalidPeriod(0.0))
        );
    }

    #[test]
    fn test_heartbeat_slots() {
        let hb = Heartbeat::new(1.0, "#.......#.......").unwrap();
        assert_eq!(hb.len(), 16);
        assert!(hb.fires_at(0.0));
        assert!(hb.fires_at(0.06));
        assert!(!hb.fires_at(0.07));
        assert!(hb.fires_at(0.52));
        assert!(hb.fires_at(1.01));
    }

    #[test]
    fn test_heartbeat_fires_once_per_slot() {
        let mut hb = Heartbeat::new(1.0, "#.......#.......").unwrap();
        let dt = 1.0 / 60.0;
        let mut fired = 0;
        for _ in 0..55 {
            fired += hb.advance(dt);
        }
        assert_eq!(fired, 2);
    }

    #[test]
    fn test_heartbeat_long_frame_counts_every_crossed_slot() {
        let mut hb = Heartbeat::new(1.0, "#...#...#...#...").unwrap();
        assert_eq!(hb.advance(0.01), 1);
        // 2.5 periods later: slots 1..=40 contain ten fire slots
        assert_eq!(hb.advance(2.5), 10);
        assert_eq!(hb.advance(0.001), 0);
    }

    #[test]
    fn test_heartbeat_reset() {
        let mut hb = Heartbeat::new(1.0, "################").unwrap();
        hb.advance(0.5);
        hb.reset();
        assert_eq!(hb.elapsed(), 0.0);
        assert_eq!(hb.advance(0.0), 1);
    }

    #[test]
    fn test_source_volley_uses_ring_modulo() {
        let source = BulletSource::new(
            16,
            Ring::new(250.0, 8).unwrap(),
            Heartbeat::new(1.0, "#...").unwrap(),
        )
        .unwrap();
        let volley = source.volley();
        assert_eq!(volley.len(), 16);
        assert_eq!(volley[3], volley[11]);
    }

    #[test]
    fn test_source_aim_and_rotation_turn_the_ring() {
        let mut source = BulletSource::new(
            1,
            Ring::new(10.0, 1).unwrap(),
            Heartbeat::new(1.0, "#").unwrap(),
        )
        .unwrap()
        .with_aim(10.0);
        source.rotation = 20.0;
        let (_, dir) = source.volley()[0];
        assert!(angle_diff(angle_of(dir), 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_source_fire_gated_by_heartbeat() {
        let mut source = BulletSource::new(
            4,
            Ring::new(50.0, 4).unwrap(),
            Heartbeat::new(1.0, "#.......#.......").unwrap(),
        )
        .unwrap();
        assert_eq!(source.fire(1.0 / 60.0).len(), 4);
        assert!(source.fire(1.0 / 60.0).is_empty());
    }

    #[test]
    fn test_source_rejects_zero_bullets() {
        let result = BulletSource::new(
            0,
            Ring::new(50.0, 4).unwrap(),
            Heartbeat::new(1.0, "#").unwrap(),
        );
        assert_eq!(result, Err(PatternError::ZeroBullets));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn single_slot_ring_points_exactly_at_aim(
                radius in 0.0f32..500.0,
                aim in -360.0f32..360.0,
                width in 0.0f32..360.0,
            ) {
                let ring = Ring::new(radius, 1).unwrap()
                    .with_aim(aim).unwrap()
                    .with_width(width).unwrap();
                prop_assert_eq!(ring.angle(0), aim);
            }

            #[test]
            fn full_ring_is_evenly_spaced_and_balanced(
                radius in 1.0f32..500.0,
                count in 2u32..64,
                aim in -180.0f32..180.0,
            ) {
                let ring = Ring::new(radius, count).unwrap().with_aim(aim).unwrap();
                let step = 360.0 / count as f32;
                let mut sum = Vec2::ZERO;
                for i in 0..count {
                    let next = ring.angle((i + 1) % count);
                    let gap = (next - ring.angle(i)).rem_euclid(360.0);
                    prop_assert!((gap - step).abs() < 1e-2);
                    sum += ring.direction(i, 0.0);
                }
                prop_assert!(sum.length() < 1e-3);
            }

            #[test]
            fn heartbeat_is_periodic(
                period in 0.1f32..4.0,
                pattern in "[#.]{1,32}",
                slot in 0u64..64,
                frac in 0.1f32..0.9,
            ) {
                let hb = Heartbeat::new(period, &pattern).unwrap();
                let t = (slot as f32 + frac) * period / hb.len() as f32;
                prop_assert_eq!(hb.fires_at(t), hb.fires_at(t + period));
            }
        }
    }
}
