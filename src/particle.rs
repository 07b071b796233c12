// Kinematic record for one background particle. Position and heading change
// every frame; size, palette slot, and speed are fixed at spawn and live for
// the lifetime of the animator.

use std::f64::consts::PI;

use rand::Rng;

pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: usize,
    pub speed: f64,
    pub direction: f64,
}

impl Particle {
    pub const MIN_SIZE: f64 = 1.0;
    pub const SIZE_RANGE: f64 = 3.0;
    pub const MIN_SPEED: f64 = 0.2;

    pub fn spawn<R: Rng>(
        rng: &mut R,
        width: f64,
        height: f64,
        palette_len: usize,
        speed_multiplier: f64,
    ) -> Particle {
        Particle {
            x: rng.gen::<f64>() * width,
            y: rng.gen::<f64>() * height,
            size: rng.gen::<f64>() * Particle::SIZE_RANGE + Particle::MIN_SIZE,
            color: (rng.gen::<f64>() * palette_len as f64) as usize,
            speed: rng.gen::<f64>() * speed_multiplier + Particle::MIN_SPEED,
            direction: rng.gen::<f64>() * 2.0 * PI,
        }
    }

    // Advance one frame, then reflect off the bounds. The x check runs
    // first, so a corner hit feeds its updated heading into the y check.
    pub fn step(&mut self, width: f64, height: f64) {
        self.x += self.direction.cos() * self.speed;
        self.y += self.direction.sin() * self.speed;
        if self.x < 0.0 || self.x > width {
            self.direction = PI - self.direction;
        }
        if self.y < 0.0 || self.y > height {
            self.direction = -self.direction;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn stationary_at(x: f64, y: f64, direction: f64) -> Particle {
        Particle {
            x,
            y,
            size: 2.0,
            color: 0,
            speed: 0.0,
            direction,
        }
    }

    #[test]
    fn reflects_heading_at_vertical_edge() {
        let mut particle = stationary_at(201.0, 50.0, 0.5);
        particle.step(200.0, 100.0);
        assert!((particle.direction - (PI - 0.5)).abs() < EPSILON);
    }

    #[test]
    fn reflects_heading_at_horizontal_edge() {
        let mut particle = stationary_at(100.0, 101.0, 0.5);
        particle.step(200.0, 100.0);
        assert!((particle.direction - (-0.5)).abs() < EPSILON);
    }

    #[test]
    fn corner_reflection_applies_x_before_y() {
        // Both checks fire; the y check negates the already-reflected
        // heading: -(pi - 0.5) = 0.5 - pi.
        let mut particle = stationary_at(201.0, 101.0, 0.5);
        particle.step(200.0, 100.0);
        assert!((particle.direction - (0.5 - PI)).abs() < EPSILON);
    }

    #[test]
    fn in_bounds_step_keeps_heading() {
        let mut particle = stationary_at(100.0, 50.0, 0.5);
        particle.speed = 1.5;
        particle.step(200.0, 100.0);
        assert!((particle.direction - 0.5).abs() < EPSILON);
        assert!((particle.x - (100.0 + 0.5f64.cos() * 1.5)).abs() < EPSILON);
        assert!((particle.y - (50.0 + 0.5f64.sin() * 1.5)).abs() < EPSILON);
    }

    #[test]
    fn displacement_magnitude_equals_speed() {
        let mut particle = stationary_at(100.0, 50.0, 1.1);
        particle.speed = 0.7;
        let (x0, y0) = (particle.x, particle.y);
        particle.step(200.0, 100.0);
        let moved = ((particle.x - x0).powi(2) + (particle.y - y0).powi(2)).sqrt();
        assert!((moved - 0.7).abs() < EPSILON);
    }

    #[test]
    fn spawn_stays_within_documented_ranges() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let particle = Particle::spawn(&mut rng, 300.0, 150.0, 3, 2.0);
            assert!(particle.x >= 0.0 && particle.x < 300.0);
            assert!(particle.y >= 0.0 && particle.y < 150.0);
            assert!(particle.size >= Particle::MIN_SIZE);
            assert!(particle.size < Particle::MIN_SIZE + Particle::SIZE_RANGE);
            assert!(particle.color < 3);
            assert!(particle.speed >= Particle::MIN_SPEED);
            assert!(particle.speed < Particle::MIN_SPEED + 2.0);
            assert!(particle.direction >= 0.0 && particle.direction < 2.0 * PI);
        }
    }
}
