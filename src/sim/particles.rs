//! Particle side-channel
//!
//! Explosion fragments and floating score text. Produced by combat events and
//! read by the renderer; gameplay never reads them back.
//!
//! The field owns its RNG stream and id counter, so the particle budget
//! (including particles switched off) never shifts gameplay rolls or entity
//! ids.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ids::{EntityId, IdAllocator};

/// Downward pull applied to fragments (not text) each tick
const PARTICLE_GRAVITY: f32 = 0.1;
/// Lifetime of floating text, in ticks
const TEXT_LIFE: f32 = 60.0;
/// PCG stream selector for effects; gameplay uses the default stream
const PARTICLE_STREAM: u64 = 0x7061_7274;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    /// Unique among particles only
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in ticks
    pub life: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub size: f32,
    /// Floating text (score popups, "REVIVED!")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Capped particle collection, oldest evicted first
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: VecDeque<Particle>,
    max: usize,
    rng: Pcg32,
    ids: IdAllocator,
}

impl ParticleField {
    pub fn new(max: usize, seed: u64) -> Self {
        Self {
            particles: VecDeque::with_capacity(max.min(256)),
            max,
            rng: Pcg32::new(seed, PARTICLE_STREAM),
            ids: IdAllocator::new(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Owned copy for snapshots
    pub fn to_vec(&self) -> Vec<Particle> {
        self.particles.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    fn push(&mut self, particle: Particle) {
        if self.particles.len() >= self.max {
            self.particles.pop_front();
        }
        self.particles.push_back(particle);
    }

    /// Radial explosion of `count` fragments
    pub fn burst(&mut self, pos: Vec2, color: u32, count: u32) {
        if self.max == 0 {
            return;
        }
        for i in 0..count {
            let jitter = self.rng.random::<f32>() * 0.5;
            let angle = std::f32::consts::TAU * i as f32 / count as f32 + jitter;
            let speed = 2.0 + self.rng.random::<f32>() * 3.0;
            let particle = Particle {
                id: self.ids.next_id(),
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: 25.0 + self.rng.random::<f32>() * 15.0,
                color,
                size: 2.0 + self.rng.random::<f32>() * 3.0,
                text: None,
            };
            self.push(particle);
        }
    }

    /// Floating text that drifts upward
    pub fn text(&mut self, pos: Vec2, text: impl Into<String>, color: u32) {
        if self.max == 0 {
            return;
        }
        let particle = Particle {
            id: self.ids.next_id(),
            pos,
            vel: Vec2::new(0.0, -2.0),
            life: TEXT_LIFE,
            color,
            size: 0.0,
            text: Some(text.into()),
        };
        self.push(particle);
    }

    /// Advance every particle one tick and drop the dead ones
    pub fn step(&mut self, slow: f32) {
        for p in &mut self.particles {
            p.pos += p.vel * slow;
            if p.text.is_none() {
                p.vel.y += PARTICLE_GRAVITY;
            }
            p.life -= 1.0;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_respects_cap() {
        let mut field = ParticleField::new(10, 1);
        field.burst(Vec2::ZERO, 0xffffff, 8);
        field.burst(Vec2::ZERO, 0xffffff, 8);
        assert_eq!(field.len(), 10);
        // Oldest were evicted, so the first survivor is fragment 7
        let ids: Vec<EntityId> = field.iter().map(|p| p.id).collect();
        assert_eq!(ids.first(), Some(&7));
        assert_eq!(ids.last(), Some(&16));
    }

    #[test]
    fn test_disabled_field_stays_empty() {
        let mut field = ParticleField::new(0, 1);
        field.burst(Vec2::ZERO, 0xffffff, 8);
        field.text(Vec2::ZERO, "+10", 0xffd700);
        assert!(field.is_empty());
    }

    #[test]
    fn test_same_seed_same_fragments() {
        let mut a = ParticleField::new(32, 9);
        let mut b = ParticleField::new(32, 9);
        a.burst(Vec2::new(5.0, 5.0), 0xff0000, 6);
        b.burst(Vec2::new(5.0, 5.0), 0xff0000, 6);
        let vel = |f: &ParticleField| f.iter().map(|p| p.vel).collect::<Vec<_>>();
        assert_eq!(vel(&a), vel(&b));
    }

    #[test]
    fn test_text_floats_without_gravity_and_expires() {
        let mut field = ParticleField::new(16, 1);
        field.text(Vec2::new(10.0, 100.0), "x2", 0xffd700);
        field.step(1.0);
        let p = &field.to_vec()[0];
        assert_eq!(p.pos, Vec2::new(10.0, 98.0));
        assert_eq!(p.vel, Vec2::new(0.0, -2.0));
        for _ in 0..59 {
            field.step(1.0);
        }
        assert!(field.is_empty());
    }
}
