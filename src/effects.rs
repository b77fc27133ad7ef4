//! Randomized decoration layouts: hero sparkles, floating particles and light
//! streaks. Generated once per mount and rendered as absolutely positioned
//! divs animated by the stylesheet.

use rand::Rng;

pub const SPARKLE_COLORS: [&str; 4] = [
    "var(--white-blue)",
    "var(--golden)",
    "var(--glow-blue)",
    "var(--crimson-red)",
];

pub const PARTICLE_COLORS: [&str; 5] = [
    "var(--white-blue)",
    "var(--golden)",
    "var(--glow-blue)",
    "var(--crimson-red)",
    "var(--silver)",
];

pub const STREAK_GRADIENTS: [&str; 4] = [
    "linear-gradient(to right, transparent, var(--glow-blue), transparent)",
    "linear-gradient(to right, transparent, var(--golden), transparent)",
    "linear-gradient(to right, transparent, var(--crimson-red), transparent)",
    "linear-gradient(to right, transparent, var(--silver), transparent)",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Sparkle {
    pub left_pct: f64,
    pub top_pct: f64,
    pub size_px: f64,
    pub delay_s: f64,
    pub duration_s: f64,
    pub color: &'static str,
}

impl Sparkle {
    pub fn style(&self) -> String {
        format!(
            "left: {:.2}%; top: {:.2}%; width: {:.2}px; height: {:.2}px; animation-delay: {:.2}s; animation-duration: {:.2}s; background-color: {};",
            self.left_pct,
            self.top_pct,
            self.size_px,
            self.size_px,
            self.delay_s,
            self.duration_s,
            self.color
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub left_pct: f64,
    pub size_px: f64,
    pub duration_s: f64,
    pub delay_s: f64,
    pub color: &'static str,
}

impl Particle {
    pub fn style(&self) -> String {
        format!(
            "left: {:.2}%; width: {:.2}px; height: {:.2}px; animation-duration: {:.2}s; animation-delay: {:.2}s; background-color: {color}; box-shadow: 0 0 {:.2}px {color};",
            self.left_pct,
            self.size_px,
            self.size_px,
            self.duration_s,
            self.delay_s,
            self.size_px * 2.0,
            color = self.color
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightStreak {
    pub top_pct: f64,
    pub width_px: f64,
    pub height_px: f64,
    pub duration_s: f64,
    pub delay_s: f64,
    pub gradient: &'static str,
}

impl LightStreak {
    pub fn style(&self) -> String {
        format!(
            "top: {:.2}%; width: {:.2}px; height: {:.2}px; animation-duration: {:.2}s; animation-delay: {:.2}s; background: {};",
            self.top_pct, self.width_px, self.height_px, self.duration_s, self.delay_s, self.gradient
        )
    }
}

pub fn sparkles<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Sparkle> {
    (0..count)
        .map(|_| Sparkle {
            left_pct: rng.gen_range(0.0..100.0),
            top_pct: rng.gen_range(0.0..100.0),
            size_px: rng.gen_range(1.0..5.0),
            delay_s: rng.gen_range(0.0..7.0),
            duration_s: rng.gen_range(3.0..8.0),
            color: SPARKLE_COLORS[rng.gen_range(0..SPARKLE_COLORS.len())],
        })
        .collect()
}

/// Colors cycle with the section index so neighbouring sections differ.
pub fn floating_particles<R: Rng + ?Sized>(
    section_index: usize,
    count: usize,
    rng: &mut R,
) -> Vec<Particle> {
    (0..count)
        .map(|i| Particle {
            left_pct: rng.gen_range(0.0..100.0),
            size_px: rng.gen_range(2.0..8.0),
            duration_s: rng.gen_range(15.0..40.0),
            delay_s: rng.gen_range(0.0..10.0),
            color: PARTICLE_COLORS[(section_index + i) % PARTICLE_COLORS.len()],
        })
        .collect()
}

pub fn light_streaks<R: Rng + ?Sized>(
    section_index: usize,
    count: usize,
    rng: &mut R,
) -> Vec<LightStreak> {
    let gradient = STREAK_GRADIENTS[section_index % STREAK_GRADIENTS.len()];
    (0..count)
        .map(|_| LightStreak {
            top_pct: rng.gen_range(0.0..100.0),
            width_px: rng.gen_range(150.0..450.0),
            height_px: rng.gen_range(2.0..6.0),
            duration_s: rng.gen_range(10.0..25.0),
            delay_s: rng.gen_range(0.0..15.0),
            gradient,
        })
        .collect()
}
