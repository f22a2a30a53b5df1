//! Trail particle data model

use glam::Vec2;
use serde::Serialize;
use std::f32::consts::TAU;

use crate::consts::{
    MIN_PARTICLE_SIZE, OPACITY_DECAY, PARTICLE_LIFT, PARTICLE_MAX_SPAWN_SIZE,
    PARTICLE_MIN_SPAWN_SIZE, PARTICLE_SPIN, PARTICLE_SPREAD, SIZE_DECAY,
};
use crate::sim::GameRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParticleShape {
    Star,
    Circle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    /// Screen position in pixels, y down
    pub pos: Vec2,
    /// Pixels per frame, constant for the particle's life
    pub vel: Vec2,
    /// Star outer radius / circle diameter
    pub size: f32,
    pub color: [f32; 4],
    pub opacity: f32,
    pub shape: ParticleShape,
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl Particle {
    /// Spawn at `pos` with randomized size, shape, colour and drift
    pub fn spawn(pos: Vec2, palette: &[[f32; 4]], rng: &mut GameRng) -> Self {
        let size = rng.range_f32(PARTICLE_MIN_SPAWN_SIZE, PARTICLE_MAX_SPAWN_SIZE);
        let shape = if rng.coin() {
            ParticleShape::Star
        } else {
            ParticleShape::Circle
        };
        let color = rng.pick(palette).copied().unwrap_or([1.0; 4]);
        let vel = Vec2::new(
            rng.range_f32(-PARTICLE_SPREAD, PARTICLE_SPREAD),
            // Upward bias: screen y grows downward
            rng.range_f32(-PARTICLE_SPREAD, PARTICLE_SPREAD) - PARTICLE_LIFT,
        );
        Self {
            pos,
            vel,
            size,
            color,
            opacity: 1.0,
            shape,
            rotation: rng.range_f32(0.0, TAU),
            rotation_speed: rng.range_f32(-PARTICLE_SPIN, PARTICLE_SPIN),
        }
    }

    /// Age by one frame. Returns false once the particle should be retired.
    pub fn step(&mut self) -> bool {
        self.pos += self.vel;
        self.opacity -= OPACITY_DECAY;
        self.size *= SIZE_DECAY;
        self.rotation += self.rotation_speed;
        self.is_visible()
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && self.size >= MIN_PARTICLE_SIZE
    }
}
