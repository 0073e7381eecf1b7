//! Entrance animation curves

use serde::{Deserialize, Serialize};

use crate::domain::rules::{Easing, EntranceCurve};

/// Animated properties of a chunk at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntranceState {
    /// Eased progress, 0 at the first frame; springs may overshoot 1
    pub progress: f64,
    pub scale: f64,
    pub opacity: f64,
    pub offset_y: f64,
}

/// Evaluates entrance curves; every function here is pure in its arguments
pub struct EntranceAnimator;

impl EntranceAnimator {
    /// State of `curve` `elapsed` seconds after the chunk appeared
    pub fn evaluate(curve: &EntranceCurve, elapsed: f64) -> EntranceState {
        let progress = Self::progress(&curve.easing, elapsed);
        EntranceState {
            progress,
            scale: lerp(curve.from_scale, 1.0, progress),
            opacity: lerp(curve.from_opacity, 1.0, progress).clamp(0.0, 1.0),
            offset_y: lerp(curve.from_offset_y, 0.0, progress),
        }
    }

    /// Eased progress of an easing at `elapsed` seconds
    pub fn progress(easing: &Easing, elapsed: f64) -> f64 {
        if !(elapsed.is_finite() && elapsed > 0.0) {
            return 0.0;
        }
        match *easing {
            Easing::Spring {
                stiffness,
                damping,
                mass,
            } => Self::spring(stiffness, damping, mass, elapsed),
            Easing::Linear { duration } => Self::normalized(elapsed, duration),
            Easing::EaseOut { duration } => {
                let u = Self::normalized(elapsed, duration);
                1.0 - (1.0 - u).powi(3)
            }
        }
    }

    fn normalized(elapsed: f64, duration: f64) -> f64 {
        if duration <= 0.0 {
            return 1.0;
        }
        (elapsed / duration).clamp(0.0, 1.0)
    }

    /// Closed-form response of a unit-mass-normalized spring released from
    /// rest at displacement 1
    fn spring(stiffness: f64, damping: f64, mass: f64, t: f64) -> f64 {
        if stiffness <= 0.0 || mass <= 0.0 {
            return 1.0;
        }
        let omega = (stiffness / mass).sqrt();
        let zeta = damping / (2.0 * (stiffness * mass).sqrt());

        let displacement = if zeta < 1.0 {
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            (-zeta * omega * t).exp()
                * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin())
        } else {
            // Critical response, also used for overdamped springs
            (-omega * t).exp() * (1.0 + omega * t)
        };
        1.0 - displacement
    }
}

fn lerp(from: f64, to: f64, progress: f64) -> f64 {
    from + (to - from) * progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::AnimationStyle;
    use crate::domain::rules::StyleResolver;

    #[test]
    fn test_all_curves_start_at_their_from_values() {
        for style in [
            AnimationStyle::Pop,
            AnimationStyle::Bounce,
            AnimationStyle::Slide,
            AnimationStyle::Fade,
        ] {
            let curve = StyleResolver::entrance(style);
            let state = EntranceAnimator::evaluate(&curve, 0.0);
            assert_eq!(state.progress, 0.0);
            assert_eq!(state.scale, curve.from_scale);
            assert_eq!(state.opacity, curve.from_opacity);
            assert_eq!(state.offset_y, curve.from_offset_y);
        }
    }

    #[test]
    fn test_all_curves_settle() {
        for style in [
            AnimationStyle::Pop,
            AnimationStyle::Bounce,
            AnimationStyle::Slide,
            AnimationStyle::Fade,
        ] {
            let curve = StyleResolver::entrance(style);
            let state = EntranceAnimator::evaluate(&curve, 3.0);
            assert!((state.progress - 1.0).abs() < 1e-3, "{:?}", style);
            assert!((state.scale - 1.0).abs() < 1e-3);
            assert!((state.opacity - 1.0).abs() < 1e-3);
            assert!(state.offset_y.abs() < 0.1);
        }
    }

    #[test]
    fn test_bounce_overshoots() {
        let curve = StyleResolver::entrance(AnimationStyle::Bounce);
        let peak = (1..60)
            .map(|f| EntranceAnimator::progress(&curve.easing, f as f64 / 60.0))
            .fold(0.0, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_linear_and_ease_out() {
        let linear = Easing::Linear { duration: 0.2 };
        assert!((EntranceAnimator::progress(&linear, 0.1) - 0.5).abs() < 1e-12);
        assert_eq!(EntranceAnimator::progress(&linear, 1.0), 1.0);

        let ease = Easing::EaseOut { duration: 0.2 };
        assert!((EntranceAnimator::progress(&ease, 0.1) - 0.875).abs() < 1e-12);
        assert!(EntranceAnimator::progress(&ease, 0.1) > EntranceAnimator::progress(&linear, 0.1));
    }

    #[test]
    fn test_overdamped_spring_is_monotonic() {
        let easing = Easing::Spring {
            stiffness: 100.0,
            damping: 40.0,
            mass: 1.0,
        };
        let mut last = 0.0;
        for f in 1..120 {
            let p = EntranceAnimator::progress(&easing, f as f64 / 60.0);
            assert!(p >= last && p <= 1.0);
            last = p;
        }
    }

    #[test]
    fn test_degenerate_parameters_do_not_panic() {
        assert_eq!(EntranceAnimator::progress(&Easing::Linear { duration: 0.0 }, 0.5), 1.0);
        let broken = Easing::Spring {
            stiffness: 0.0,
            damping: 1.0,
            mass: 0.0,
        };
        assert_eq!(EntranceAnimator::progress(&broken, 0.5), 1.0);
        assert_eq!(EntranceAnimator::progress(&broken, f64::NAN), 0.0);
    }
}
