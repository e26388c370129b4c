//! Cosmetic color control
//!
//! The hypercube wears one HSV color at a time; stage changes fade to a
//! freshly drawn color and submission entry fades to the fixed white.
//! Transition completion is what re-arms input during submission, so
//! color timing gates the player even though the colors themselves are
//! cosmetic.

use rand::Rng;

/// A color in HSV space, all components in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    /// The muted grey the module wears before its first stage
    pub const INITIAL: Self = Self { h: 0.5, s: 0.0, v: 0.5 };

    /// The fixed near-white worn during submission
    pub const SUBMIT_WHITE: Self = Self { h: 0.6, s: 0.1, v: 1.0 };

    pub const fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }

    /// Component-wise linear interpolation
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            h: self.h + (other.h - self.h) * t,
            s: self.s + (other.s - self.s) * t,
            v: self.v + (other.v - self.v) * t,
        }
    }
}

/// Convert HSV (all in [0, 1]) to RGB in [0, 1].
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let h = (h.rem_euclid(1.0)) * 6.0;
    let sector = h.floor() as i32 % 6;
    let f = h - h.floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// The derived per-material colors: edges wear the full color, vertices
/// and faces muted versions of it, faces with a low alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialColors {
    pub edges: [f32; 3],
    pub vertices: [f32; 3],
    pub faces: [f32; 4],
}

impl MaterialColors {
    pub fn from_hsv(c: Hsv) -> Self {
        let faces = hsv_to_rgb(c.h, c.s * 0.8, c.v * 0.75);
        Self {
            edges: hsv_to_rgb(c.h, c.s, c.v),
            vertices: hsv_to_rgb(c.h, c.s * 0.8, c.v * 0.5),
            faces: [faces[0], faces[1], faces[2], 0.1],
        }
    }
}

/// Rejection-sampling attempts before falling back to a fixed hue step.
const MAX_COLOR_RETRIES: usize = 64;

/// Draw the next stage color: hue far enough from the previous one (hue
/// delta in (0.1, 0.5]), saturation in [0.6, 0.9), value in [0.75, 1.0).
///
/// The draw is a bounded rejection loop; if an adversarial rng never
/// produces an acceptable hue the fallback steps the previous hue by a
/// third of the wheel.
pub fn pick_color<R: Rng>(rng: &mut R, previous: Hsv) -> Hsv {
    for _ in 0..MAX_COLOR_RETRIES {
        let candidate = Hsv {
            h: rng.gen_range(0.0..1.0),
            s: rng.gen_range(0.6..0.9),
            v: rng.gen_range(0.75..1.0),
        };
        let delta = (candidate.h - previous.h).abs();
        if delta < 0.1 || delta > 0.5 {
            continue;
        }
        return candidate;
    }
    Hsv {
        h: (previous.h + 1.0 / 3.0).rem_euclid(1.0),
        s: 0.75,
        v: 0.85,
    }
}

/// A color fade in flight: linear interpolation from one HSV color to
/// another over a fixed duration, advanced once per tick.
#[derive(Clone, Copy, Debug)]
pub struct ColorTransition {
    from: Hsv,
    to: Hsv,
    elapsed: f32,
    duration: f32,
    white: bool,
}

impl ColorTransition {
    pub fn new(from: Hsv, to: Hsv, duration: f32, white: bool) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            duration,
            white,
        }
    }

    /// Advance by one tick. Returns true once the target is reached.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.elapsed >= self.duration
    }

    /// The color to display right now
    pub fn current(&self) -> Hsv {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.from.lerp(self.to, t)
    }

    pub fn target(&self) -> Hsv {
        self.to
    }

    /// Whether this is a fade to the fixed submission white
    pub fn is_white(&self) -> bool {
        self.white
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_hsv_to_rgb_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), [1.0, 0.0, 0.0]);
        let green = hsv_to_rgb(1.0 / 3.0, 1.0, 1.0);
        assert!(green[0] < 0.001 && (green[1] - 1.0).abs() < 0.001 && green[2] < 0.001);
        let blue = hsv_to_rgb(2.0 / 3.0, 1.0, 1.0);
        assert!(blue[0] < 0.001 && blue[1] < 0.001 && (blue[2] - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_hsv_to_rgb_desaturated_is_grey() {
        let grey = hsv_to_rgb(0.37, 0.0, 0.5);
        assert_eq!(grey, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Hsv::new(0.2, 0.6, 0.8);
        let b = Hsv::new(0.4, 0.9, 1.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        let mid = a.lerp(b, 0.5);
        assert!((mid.h - 0.3).abs() < 0.0001);
    }

    #[test]
    fn test_pick_color_respects_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut prev = Hsv::INITIAL;
        for _ in 0..200 {
            let c = pick_color(&mut rng, prev);
            assert!((0.0..1.0).contains(&c.h));
            assert!((0.6..0.9).contains(&c.s) || c.s == 0.75);
            assert!((0.75..1.0).contains(&c.v) || c.v == 0.85);
            let delta = (c.h - prev.h).abs();
            assert!(delta >= 0.1 && delta <= 0.5, "hue delta {} out of range", delta);
            prev = c;
        }
    }

    #[test]
    fn test_transition_reaches_target() {
        let mut tr = ColorTransition::new(Hsv::INITIAL, Hsv::SUBMIT_WHITE, 1.0, true);
        assert!(!tr.advance(0.4));
        let mid = tr.current();
        assert!(mid.v > Hsv::INITIAL.v && mid.v < Hsv::SUBMIT_WHITE.v);
        assert!(tr.advance(0.6));
        assert_eq!(tr.current(), Hsv::SUBMIT_WHITE);
        assert!(tr.is_white());
    }

    #[test]
    fn test_zero_duration_transition_is_instant() {
        let mut tr = ColorTransition::new(Hsv::INITIAL, Hsv::SUBMIT_WHITE, 0.0, false);
        assert!(tr.advance(0.0));
        assert_eq!(tr.current(), Hsv::SUBMIT_WHITE);
    }
}
