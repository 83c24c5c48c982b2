//! Completion celebration: a one-shot burst of floating hearts.
//!
//! Purely decorative. Hearts are released `CELEBRATION_STAGGER_MS` apart, float
//! from the bottom edge to the top edge over `PARTICLE_LIFETIME_MS` and fade out
//! during the last third of their flight. Storage is fixed-size, so ticking
//! never allocates.

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::types::{CELEBRATION_PARTICLES, CELEBRATION_STAGGER_MS, PARTICLE_LIFETIME_MS};

/// Number of distinct heart glyphs the view knows how to draw.
pub const HEART_KINDS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Particle {
    x_permille: u16,
    kind: u8,
    born_ms: u32,
}

/// A heart as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleView {
    /// Horizontal position across the screen, 0..1000.
    pub x_permille: u16,
    /// Progress from bottom (0) to top (1000).
    pub rise_permille: u16,
    /// Glyph/tint selector, `0..HEART_KINDS`.
    pub kind: u8,
    pub fading: bool,
}

pub type Particles = ArrayVec<ParticleView, CELEBRATION_PARTICLES>;

#[derive(Debug, Clone, Default)]
pub struct Celebration {
    particles: ArrayVec<Particle, CELEBRATION_PARTICLES>,
    elapsed_ms: u32,
}

impl Celebration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a fresh burst, replacing any running one.
    pub fn start(&mut self, rng: &mut SimpleRng) {
        self.particles.clear();
        self.elapsed_ms = 0;
        for i in 0..CELEBRATION_PARTICLES {
            self.particles.push(Particle {
                x_permille: rng.next_permille(),
                kind: rng.next_range(HEART_KINDS as u32) as u8,
                born_ms: (i as u32) * CELEBRATION_STAGGER_MS,
            });
        }
    }

    pub fn stop(&mut self) {
        self.particles.clear();
        self.elapsed_ms = 0;
    }

    pub fn is_running(&self) -> bool {
        !self.particles.is_empty()
    }

    /// Advance the animation. Expired bursts clear themselves.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.particles.is_empty() {
            return;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        let last_born = self.particles.last().map(|p| p.born_ms).unwrap_or(0);
        if self.elapsed_ms >= last_born + PARTICLE_LIFETIME_MS {
            self.stop();
        }
    }

    /// Hearts currently on screen.
    pub fn visible_into(&self, out: &mut Particles) {
        out.clear();
        for p in &self.particles {
            if self.elapsed_ms < p.born_ms {
                continue;
            }
            let age = self.elapsed_ms - p.born_ms;
            if age >= PARTICLE_LIFETIME_MS {
                continue;
            }
            let rise = (age as u64 * 1000 / PARTICLE_LIFETIME_MS as u64) as u16;
            out.push(ParticleView {
                x_permille: p.x_permille,
                rise_permille: rise,
                kind: p.kind,
                fading: rise >= 667,
            });
        }
    }
}
