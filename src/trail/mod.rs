//! Pointer particle trail
//!
//! `Trail` owns every live particle. The host mounts it once, forwards
//! pointer moves and resizes, and calls [`Trail::frame`] once per animation
//! frame. While unmounted the trail ignores input and frames, so a torn-down
//! overlay can never keep animating.

pub mod particle;

pub use particle::{Particle, ParticleShape};

use glam::Vec2;

use crate::config::{Catalog, ConfigError};
use crate::consts::TRAIL_BURST;
use crate::renderer::shapes::trail_vertices;
use crate::renderer::vertex::Vertex;
use crate::settings::Settings;
use crate::sim::GameRng;

#[derive(Debug)]
pub struct Trail {
    /// Oldest first
    particles: Vec<Particle>,
    pointer: Option<Vec2>,
    viewport: (u32, u32),
    rng: GameRng,
    palette: Vec<[f32; 4]>,
    max_particles: usize,
    mounted: bool,
}

impl Trail {
    pub fn new(palette: Vec<[f32; 4]>, settings: &Settings, seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            pointer: None,
            viewport: (0, 0),
            rng: GameRng::new(seed),
            palette,
            max_particles: settings.max_particles(),
            mounted: false,
        }
    }

    /// Build a trail coloured with the catalog's palette
    pub fn from_catalog(
        catalog: &Catalog,
        settings: &Settings,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(catalog.trail_colors()?, settings, seed))
    }

    /// Re-read the particle cap. Excess particles are dropped oldest first.
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.max_particles = settings.max_particles();
        self.enforce_cap();
    }

    /// Returns false if the trail was already mounted
    pub fn mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        log::debug!("trail mounted (cap {})", self.max_particles);
        true
    }

    /// Returns false if the trail was not mounted. Live particles are discarded.
    pub fn unmount(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        self.mounted = false;
        self.pointer = None;
        self.particles.clear();
        log::debug!("trail unmounted");
        true
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Spawn a burst at the pointer. Returns the number spawned.
    pub fn pointer_moved(&mut self, x: f32, y: f32) -> usize {
        if !self.mounted || !x.is_finite() || !y.is_finite() {
            return 0;
        }
        let pos = Vec2::new(x, y);
        self.pointer = Some(pos);
        if self.max_particles == 0 {
            return 0;
        }
        for _ in 0..TRAIL_BURST {
            self.particles
                .push(Particle::spawn(pos, &self.palette, &mut self.rng));
        }
        self.enforce_cap();
        TRAIL_BURST.min(self.max_particles)
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Redimension the drawing surface. Particles keep their positions.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Age every particle by one frame. Returns how many were retired.
    pub fn frame(&mut self) -> usize {
        if !self.mounted {
            return 0;
        }
        let before = self.particles.len();
        self.particles.retain_mut(Particle::step);
        before - self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Tessellate the live particles in screen pixels
    pub fn vertices(&self, circle_segments: u32) -> Vec<Vertex> {
        trail_vertices(&self.particles, circle_segments)
    }

    fn enforce_cap(&mut self) {
        if self.particles.len() > self.max_particles {
            let excess = self.particles.len() - self.max_particles;
            self.particles.drain(..excess);
            log::debug!("trail cap {} reached, dropped {}", self.max_particles, excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;

    fn mounted(preset: QualityPreset) -> Trail {
        let settings = Settings::from_preset(preset);
        let mut trail = Trail::from_catalog(&Catalog::default(), &settings, 3).unwrap();
        assert!(trail.mount());
        trail
    }

    #[test]
    fn test_pointer_move_spawns_burst() {
        let mut trail = mounted(QualityPreset::Medium);
        assert_eq!(trail.pointer_moved(100.0, 50.0), 3);
        assert_eq!(trail.len(), 3);
        assert_eq!(trail.pointer(), Some(Vec2::new(100.0, 50.0)));
        assert!(trail.particles().iter().all(|p| p.pos == Vec2::new(100.0, 50.0)));
    }

    #[test]
    fn test_particles_die_out() {
        let mut trail = mounted(QualityPreset::Medium);
        trail.pointer_moved(0.0, 0.0);
        let mut retired = 0;
        for _ in 0..200 {
            retired += trail.frame();
        }
        assert_eq!(retired, 3);
        assert!(trail.is_empty());
        assert!(trail.vertices(16).is_empty());
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut trail = mounted(QualityPreset::Low);
        for i in 0..40 {
            trail.pointer_moved(i as f32, 0.0);
        }
        assert_eq!(trail.len(), 100);
        // The first six bursts (x = 0..=5) were evicted, the seventh lost one
        assert_eq!(trail.particles()[0].pos.x, 6.0);
        assert_eq!(trail.particles()[99].pos.x, 39.0);
    }

    #[test]
    fn test_unmounted_trail_is_inert() {
        let mut trail = Trail::new(vec![[1.0; 4]], &Settings::default(), 1);
        assert_eq!(trail.pointer_moved(1.0, 1.0), 0);
        assert!(trail.mount());
        assert!(!trail.mount());
        trail.pointer_moved(1.0, 1.0);
        assert!(trail.unmount());
        assert!(!trail.unmount());
        assert!(trail.is_empty());
        assert_eq!(trail.frame(), 0);
        assert_eq!(trail.pointer_moved(2.0, 2.0), 0);
    }

    #[test]
    fn test_resize_keeps_particles() {
        let mut trail = mounted(QualityPreset::High);
        trail.resize(800, 600);
        trail.pointer_moved(10.0, 10.0);
        trail.resize(1024, 768);
        assert_eq!(trail.viewport(), (1024, 768));
        assert_eq!(trail.len(), 3);
    }

    #[test]
    fn test_trail_disabled_by_settings() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let mut trail = Trail::new(vec![[1.0; 4]], &settings, 1);
        trail.mount();
        assert_eq!(trail.pointer_moved(5.0, 5.0), 0);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_non_finite_pointer_ignored() {
        let mut trail = mounted(QualityPreset::Medium);
        assert_eq!(trail.pointer_moved(f32::NAN, 0.0), 0);
        assert_eq!(trail.pointer_moved(0.0, f32::INFINITY), 0);
        assert!(trail.is_empty());
    }
}
