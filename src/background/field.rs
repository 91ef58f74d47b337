//! Bouncing particle field behind the chat window.
//!
//! Pure state only: positions are viewport-relative CSS pixels and one call to
//! [`ParticleField::advance_frame`] is one animation frame. Drawing lives in the
//! parent module so everything here runs under native `cargo test`.

use rand::Rng;

/// Number of particles created by a default field.
pub const PARTICLE_COUNT: usize = 50;

/// A single translucent dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    /// Radius in [1, 3).
    pub size: f64,
    /// Alpha of the white fill, in [0, 0.3).
    pub alpha: f64,
}

impl Particle {
    pub fn random<R: Rng>(width: f64, height: f64, rng: &mut R) -> Self {
        let mut p = Self { x: 0.0, y: 0.0, speed_x: 0.0, speed_y: 0.0, size: 1.0, alpha: 0.0 };
        p.reset(width, height, rng);
        p
    }

    /// Re-randomise every attribute in place. Scaled unit samples are used
    /// instead of `gen_range` so a zero-sized viewport cannot panic.
    pub fn reset<R: Rng>(&mut self, width: f64, height: f64, rng: &mut R) {
        self.x = rng.r#gen::<f64>() * width;
        self.y = rng.r#gen::<f64>() * height;
        self.size = rng.r#gen::<f64>() * 2.0 + 1.0;
        self.speed_x = rng.r#gen::<f64>() - 0.5;
        self.speed_y = rng.r#gen::<f64>() - 0.5;
        self.alpha = rng.r#gen::<f64>() * 0.3;
    }

    /// Move by one frame of velocity, then reflect any axis that ended up
    /// outside `[0, width]` / `[0, height]`. The position is not clamped, so a
    /// particle can sit just outside the bounds for one frame.
    pub fn update(&mut self, width: f64, height: f64) {
        self.x += self.speed_x;
        self.y += self.speed_y;

        if self.x > width || self.x < 0.0 {
            self.speed_x = -self.speed_x;
        }
        if self.y > height || self.y < 0.0 {
            self.speed_y = -self.speed_y;
        }
    }

    pub fn css_color(&self) -> String {
        format!("rgba(255, 255, 255, {})", self.alpha)
    }
}

/// Fixed-size set of particles plus the bounds they bounce inside.
#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
}

impl ParticleField {
    /// Build `count` freshly randomised particles spread over the viewport.
    pub fn initialize<R: Rng>(width: f64, height: f64, count: usize, rng: &mut R) -> Self {
        let particles = (0..count).map(|_| Particle::random(width, height, rng)).collect();
        Self { particles, width, height }
    }

    /// Rebuild the whole set against the current bounds, keeping the count.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        for p in &mut self.particles {
            p.reset(self.width, self.height, rng);
        }
    }

    pub fn advance_frame(&mut self) {
        let (w, h) = (self.width, self.height);
        for p in &mut self.particles {
            p.update(w, h);
        }
    }

    /// Adopt new bounds. Particles are neither moved nor recreated.
    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn particle_at(x: f64, y: f64, speed_x: f64, speed_y: f64) -> Particle {
        Particle { x, y, speed_x, speed_y, size: 2.0, alpha: 0.1 }
    }

    #[test]
    fn test_initialize_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = ParticleField::initialize(800.0, 600.0, PARTICLE_COUNT, &mut rng);
        assert_eq!(field.len(), 50);
        for p in field.particles() {
            assert!((0.0..800.0).contains(&p.x));
            assert!((0.0..600.0).contains(&p.y));
            assert!((1.0..3.0).contains(&p.size));
            assert!((-0.5..0.5).contains(&p.speed_x));
            assert!((-0.5..0.5).contains(&p.speed_y));
            assert!((0.0..0.3).contains(&p.alpha));
        }
    }

    #[test]
    fn test_zero_viewport_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = ParticleField::initialize(0.0, 0.0, 5, &mut rng);
        assert!(field.particles().iter().all(|p| p.x == 0.0 && p.y == 0.0));
    }

    #[test]
    fn test_interior_move_keeps_velocity() {
        let mut p = particle_at(50.0, 50.0, 0.25, -0.25);
        p.update(100.0, 100.0);
        assert_eq!((p.x, p.y), (50.25, 49.75));
        assert_eq!((p.speed_x, p.speed_y), (0.25, -0.25));
    }

    #[test]
    fn test_right_edge_flips_once() {
        let mut p = particle_at(100.0, 50.0, 0.25, 0.0);
        p.update(100.0, 100.0);
        // Crossed the edge: rendered slightly outside, velocity reversed.
        assert_eq!(p.x, 100.25);
        assert_eq!(p.speed_x, -0.25);
        p.update(100.0, 100.0);
        assert_eq!(p.x, 100.0);
        assert_eq!(p.speed_x, -0.25);
        p.update(100.0, 100.0);
        assert_eq!(p.speed_x, -0.25);
    }

    #[test]
    fn test_top_edge_flips_y_only() {
        let mut p = particle_at(10.0, 0.0, 0.25, -0.5);
        p.update(100.0, 100.0);
        assert_eq!(p.speed_y, 0.5);
        assert_eq!(p.speed_x, 0.25);
    }

    #[test]
    fn test_resize_keeps_particles() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = ParticleField::initialize(800.0, 600.0, PARTICLE_COUNT, &mut rng);
        let before = field.particles().to_vec();
        field.on_resize(200.0, 100.0);
        assert_eq!(field.len(), PARTICLE_COUNT);
        assert_eq!(field.particles(), &before[..]);
        assert_eq!((field.width(), field.height()), (200.0, 100.0));
    }

    #[test]
    fn test_reset_uses_current_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut field = ParticleField::initialize(800.0, 600.0, 20, &mut rng);
        field.on_resize(10.0, 10.0);
        field.reset(&mut rng);
        assert_eq!(field.len(), 20);
        assert!(field.particles().iter().all(|p| p.x < 10.0 && p.y < 10.0));
    }

    #[test]
    fn test_css_color() {
        let p = particle_at(0.0, 0.0, 0.0, 0.0);
        assert_eq!(p.css_color(), "rgba(255, 255, 255, 0.1)");
    }
}
