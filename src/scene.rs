// Owns the particle set and the bounds they bounce inside. Pure state with
// no DOM handles, so every frame-level behavior is testable off the browser.

use crate::config::BackgroundConfig;
use crate::particle::Particle;

pub struct Scene {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
}

impl Scene {
    pub fn new(config: &BackgroundConfig, width: f64, height: f64) -> Scene {
        let mut rng = rand::thread_rng();
        let mut particles = Vec::with_capacity(config.particle_count as usize);
        for _ in 0..config.particle_count {
            particles.push(Particle::spawn(
                &mut rng,
                width,
                height,
                config.colors.len(),
                config.speed_multiplier,
            ));
        }
        Scene {
            width,
            height,
            particles,
        }
    }

    pub fn step(&mut self) {
        for particle in &mut self.particles {
            particle.step(self.width, self.height);
        }
    }

    // Particles outside the new bounds are left alone; the normal bounce
    // brings them back.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}
