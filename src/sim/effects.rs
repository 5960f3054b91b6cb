//! Cosmetic feedback: particles, camera shake, starfield
//!
//! Nothing in here feeds back into gameplay. These structures draw from their
//! own RNG stream so that toggling particles or shake never changes a run.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use crate::consts::{MAX_PARTICLES, SCREEN_HEIGHT, SCREEN_WIDTH, STAR_COUNT};

/// Downward pull applied to particle velocity each frame
const PARTICLE_GRAVITY: f32 = 0.12;

/// Palette index for particle rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParticleColor {
    Orange,
    Yellow,
    Purple,
    Red,
}

/// A single spark
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames remaining
    pub life: u32,
    pub max_life: u32,
    pub radius: f32,
    pub color: ParticleColor,
}

impl Particle {
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.life = self.life.saturating_sub(1);
    }

    /// Radius scaled by remaining life (for rendering)
    pub fn render_radius(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        (self.radius * self.life as f32 / self.max_life as f32).max(1.0)
    }
}

/// Bounded particle storage
#[derive(Debug, Clone, Serialize)]
pub struct ParticlePool {
    pub particles: Vec<Particle>,
    cap: usize,
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new(MAX_PARTICLES)
    }
}

impl ParticlePool {
    pub fn new(cap: usize) -> Self {
        Self {
            particles: Vec::new(),
            cap,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Change the cap; existing particles beyond it are dropped
    pub fn set_cap(&mut self, cap: usize) {
        self.cap = cap;
        self.particles.truncate(cap);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Radial burst of `count` sparks, truncated to the room left under the cap
    pub fn emit_explosion<R: Rng>(
        &mut self,
        rng: &mut R,
        pos: Vec2,
        count: usize,
        color: ParticleColor,
    ) {
        let room = self.cap.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let angle = rng.random::<f32>() * TAU;
            let speed = rng.random_range(1.0..6.0);
            let life = rng.random_range(18..=42);
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life,
                max_life: life,
                radius: rng.random_range(2..=5) as f32,
                color,
            });
        }
    }

    pub fn update(&mut self) {
        for p in self.particles.iter_mut() {
            p.advance();
        }
        self.particles.retain(|p| p.life > 0);
    }
}

/// Screen shake state; the renderer offsets the world by `offset`
#[derive(Debug, Clone, Serialize)]
pub struct Camera {
    pub offset: Vec2,
    pub timer: u32,
    pub magnitude: f32,
    /// Disabled cameras ignore shake requests (reduced motion)
    pub enabled: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            timer: 0,
            magnitude: 0.0,
            enabled: true,
        }
    }
}

impl Camera {
    pub fn shake(&mut self, duration: u32, magnitude: f32) {
        if !self.enabled {
            return;
        }
        self.timer = duration;
        self.magnitude = magnitude;
    }

    pub fn update<R: Rng>(&mut self, rng: &mut R) {
        if self.timer > 0 {
            self.timer -= 1;
            self.offset = Vec2::new(
                rng.random_range(-1.0..=1.0),
                rng.random_range(-1.0..=1.0),
            ) * self.magnitude;
        } else {
            self.offset = Vec2::ZERO;
        }
    }

    pub fn is_shaking(&self) -> bool {
        self.timer > 0
    }
}

/// A background star; `depth` in [0.3, 1.0] scales its scroll speed
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Star {
    pub pos: Vec2,
    pub depth: f32,
}

/// Parallax starfield wrapping vertically
#[derive(Debug, Clone, Serialize)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..SCREEN_WIDTH),
                    rng.random_range(0.0..SCREEN_HEIGHT),
                ),
                depth: rng.random_range(0.3..1.0),
            })
            .collect();
        Self { stars }
    }

    pub fn update<R: Rng>(&mut self, rng: &mut R, speed: f32) {
        for star in self.stars.iter_mut() {
            star.pos.y += speed * star.depth;
            if star.pos.y > SCREEN_HEIGHT {
                star.pos.y = 0.0;
                star.pos.x = rng.random_range(0.0..SCREEN_WIDTH);
            }
        }
    }
}
