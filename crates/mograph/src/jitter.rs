//! Deterministic, index-addressable jitter.
//!
//! Every random quantity is a pure function of `(seed, element index, channel)`.
//! There is no sequential stream shared between elements, so any element can be
//! recomputed alone, out of order, or in parallel and still get the same value.
use std::convert::Infallible;

use glam::Vec3;
use rand::{Rng, TryRng};

/// Independent hash channels. Each random quantity draws from its own channel so
/// that changing one magnitude never shifts the values of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Channel {
    PositionX = 0,
    PositionY = 1,
    PositionZ = 2,
    RotationX = 3,
    RotationY = 4,
    RotationZ = 5,
    Scale = 6,
    Variant = 7,
    EffectorPositionX = 16,
    EffectorPositionY = 17,
    EffectorPositionZ = 18,
    EffectorRotationX = 19,
    EffectorRotationY = 20,
    EffectorRotationZ = 21,
    EffectorScale = 22,
    EffectorScaleX = 23,
    EffectorScaleY = 24,
    EffectorScaleZ = 25,
}

impl Channel {
    pub const POSITION: [Channel; 3] = [Channel::PositionX, Channel::PositionY, Channel::PositionZ];
    pub const ROTATION: [Channel; 3] = [Channel::RotationX, Channel::RotationY, Channel::RotationZ];
    pub const EFFECTOR_POSITION: [Channel; 3] = [
        Channel::EffectorPositionX,
        Channel::EffectorPositionY,
        Channel::EffectorPositionZ,
    ];
    pub const EFFECTOR_ROTATION: [Channel; 3] = [
        Channel::EffectorRotationX,
        Channel::EffectorRotationY,
        Channel::EffectorRotationZ,
    ];
    pub const EFFECTOR_SCALE: [Channel; 3] = [
        Channel::EffectorScaleX,
        Channel::EffectorScaleY,
        Channel::EffectorScaleZ,
    ];
}

/// Hashes `(seed, index, channel)` into 64 well-mixed bits.
pub fn hash(seed: u64, index: u64, channel: u32) -> u64 {
    let mixed = mix_u64(seed ^ 0xD6E8FEB86659FD93)
        ^ index.wrapping_mul(0x9E3779B97F4A7C15)
        ^ (channel as u64).wrapping_mul(0xBF58476D1CE4E5B9);
    mix_u64(mixed)
}

/// Uniform value in `[0, 1)` for `(seed, index, channel)`.
#[inline]
pub fn unit(seed: u64, index: u64, channel: Channel) -> f32 {
    bits_to_unit(hash(seed, index, channel as u32))
}

/// Uniform value in `[min, max)`.
#[inline]
pub fn range(seed: u64, index: u64, channel: Channel, min: f32, max: f32) -> f32 {
    min + (max - min) * unit(seed, index, channel)
}

/// Uniform value in `[-magnitude, magnitude)`. Zero magnitude yields exactly zero.
#[inline]
pub fn symmetric(seed: u64, index: u64, channel: Channel, magnitude: f32) -> f32 {
    if magnitude == 0.0 {
        return 0.0;
    }
    range(seed, index, channel, -magnitude, magnitude)
}

/// Three independent symmetric draws, one per axis.
pub fn symmetric_vec3(seed: u64, index: u64, channels: [Channel; 3], magnitude: Vec3) -> Vec3 {
    Vec3::new(
        symmetric(seed, index, channels[0], magnitude.x),
        symmetric(seed, index, channels[1], magnitude.y),
        symmetric(seed, index, channels[2], magnitude.z),
    )
}

/// Cloner position jitter in `[-m, +m]` per axis.
pub fn position_jitter(seed: u64, index: u64, magnitude: Vec3) -> Vec3 {
    symmetric_vec3(seed, index, Channel::POSITION, magnitude)
}

/// Cloner rotation jitter in `[-m, +m]` degrees per axis.
pub fn rotation_jitter(seed: u64, index: u64, magnitude: Vec3) -> Vec3 {
    symmetric_vec3(seed, index, Channel::ROTATION, magnitude)
}

/// Cloner scale jitter: a single scalar in `[-m, +m]`. The caller broadcasts
/// `1 + r` to all three axes.
pub fn scale_jitter(seed: u64, index: u64, magnitude: f32) -> f32 {
    symmetric(seed, index, Channel::Scale, magnitude)
}

/// Effector scale factor.
///
/// Uniform: one `r` in `[1 - max(m), 1 + max(m)]` on all axes. Non-uniform: an
/// independent `r_axis` in `[1 - m_axis, 1 + m_axis]` per axis.
pub fn effector_scale_factor(seed: u64, index: u64, magnitude: Vec3, uniform: bool) -> Vec3 {
    if uniform {
        let m = magnitude.max_element();
        Vec3::splat(1.0 + symmetric(seed, index, Channel::EffectorScale, m))
    } else {
        Vec3::ONE + symmetric_vec3(seed, index, Channel::EFFECTOR_SCALE, magnitude)
    }
}

/// Picks one of `count` source variants for an element.
pub fn pick_variant(seed: u64, index: u64, count: usize) -> usize {
    if count <= 1 {
        return 0;
    }
    let mut rng = ElementRng::new(seed, index).at_channel(Channel::Variant);
    let v = (rand01(&mut rng) * count as f32) as usize;
    v.min(count - 1)
}

/// A [`Rng`] view over the jitter hash for a single element.
///
/// Draw `k` returns the hash of `(seed, index, channel + k)`, so the stream is
/// fully determined by the element it belongs to.
#[derive(Debug, Clone)]
pub struct ElementRng {
    seed: u64,
    index: u64,
    channel: u32,
}

impl ElementRng {
    pub fn new(seed: u64, index: u64) -> Self {
        Self {
            seed,
            index,
            channel: 0,
        }
    }

    /// Starts the stream at the given channel.
    pub fn at_channel(mut self, channel: Channel) -> Self {
        self.channel = channel as u32;
        self
    }

    fn step(&mut self) -> u64 {
        let v = hash(self.seed, self.index, self.channel);
        self.channel = self.channel.wrapping_add(1);
        v
    }
}

impl TryRng for ElementRng {
    type Error = Infallible;

    fn try_next_u32(&mut self) -> Result<u32, Infallible> {
        Ok((self.step() >> 32) as u32)
    }

    fn try_next_u64(&mut self) -> Result<u64, Infallible> {
        Ok(self.step())
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Infallible> {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
        Ok(())
    }
}

/// Generate a random float in the range [0, 1).
#[inline]
pub fn rand01<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    bits_to_unit(rng.next_u64())
}

#[inline]
fn bits_to_unit(bits: u64) -> f32 {
    // 24 mantissa bits keep the result strictly below 1.0.
    (bits >> 40) as f32 / (1u64 << 24) as f32
}

#[inline]
fn mix_u64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}
