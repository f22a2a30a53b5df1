//! Shape generation for trail particles
//!
//! Everything here is a pure function of particle state, in screen pixels.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::vertex::Vertex;
use crate::consts::{GLOW_RADIUS, STAR_POINTS};
use crate::trail::{Particle, ParticleShape};

/// Peak glow alpha at the particle centre, relative to its opacity
const GLOW_ALPHA: f32 = 0.35;

fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha]
}

/// Generate vertices for a filled star, first spike pointing up at rotation 0
pub fn star(center: Vec2, outer: f32, inner: f32, rotation: f32, color: [f32; 4]) -> Vec<Vertex> {
    let corners = STAR_POINTS * 2;
    let step = PI / STAR_POINTS as f32;
    let corner = |i: usize| {
        let radius = if i % 2 == 0 { outer } else { inner };
        let theta = rotation - FRAC_PI_2 + i as f32 * step;
        center + Vec2::new(theta.cos(), theta.sin()) * radius
    };

    let mut vertices = Vec::with_capacity(corners * 3);
    for i in 0..corners {
        let a = corner(i);
        let b = corner((i + 1) % corners);
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }
    vertices
}

/// Generate vertices for a filled circle
pub fn disk(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    radial_fan(center, radius, color, color, segments)
}

/// Soft halo fading from `color` at the centre to transparent at `radius`
pub fn glow(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    radial_fan(center, radius, color, with_alpha(color, 0.0), segments)
}

fn radial_fan(
    center: Vec2,
    radius: f32,
    inner_color: [f32; 4],
    rim_color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, inner_color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            rim_color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            rim_color,
        ));
    }

    vertices
}

/// Glow plus body for one particle, faded by its opacity
pub fn particle(p: &Particle, segments: u32) -> Vec<Vertex> {
    let body_color = with_alpha(p.color, p.opacity);
    let body_radius = match p.shape {
        ParticleShape::Star => p.size,
        ParticleShape::Circle => p.size / 2.0,
    };

    let mut vertices = glow(
        p.pos,
        body_radius + GLOW_RADIUS,
        with_alpha(p.color, p.opacity * GLOW_ALPHA),
        segments,
    );
    match p.shape {
        ParticleShape::Star => {
            vertices.extend(star(p.pos, p.size, p.size / 2.0, p.rotation, body_color))
        }
        ParticleShape::Circle => vertices.extend(disk(p.pos, body_radius, body_color, segments)),
    }
    vertices
}

/// Tessellate a whole trail. Retired particles are never drawn.
pub fn trail_vertices(particles: &[Particle], segments: u32) -> Vec<Vertex> {
    particles
        .iter()
        .filter(|p| p.is_visible())
        .flat_map(|p| particle(p, segments))
        .collect()
}
