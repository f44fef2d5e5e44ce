/// Easing curves available to tweens. Names follow the usual
/// `power{n}.{in,out,inOut}` convention so section code reads like the
/// animation timelines designers hand over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    PowerIn(u8),
    PowerOut(u8),
    PowerInOut(u8),
    SineInOut,
}

impl Default for Ease {
    fn default() -> Self {
        Ease::PowerOut(1)
    }
}

impl Ease {
    pub const POWER2_OUT: Ease = Ease::PowerOut(2);
    pub const POWER3_OUT: Ease = Ease::PowerOut(3);
    pub const POWER2_IN_OUT: Ease = Ease::PowerInOut(2);

    /// Maps linear progress `t` in `[0, 1]` onto the curve. Inputs outside
    /// the range are clamped; every curve is monotonic on the unit interval.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::PowerIn(n) => t.powi(exponent(n)),
            Ease::PowerOut(n) => 1.0 - (1.0 - t).powi(exponent(n)),
            Ease::PowerInOut(n) => {
                let e = exponent(n);
                if t < 0.5 {
                    (2.0 * t).powi(e) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(e) / 2.0
                }
            }
            Ease::SineInOut => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }
}

// power0 is linear, power1 quadratic and so on.
fn exponent(n: u8) -> i32 {
    i32::from(n.min(4)) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 6] = [
        Ease::Linear,
        Ease::PowerIn(2),
        Ease::POWER3_OUT,
        Ease::POWER2_IN_OUT,
        Ease::PowerOut(0),
        Ease::SineInOut,
    ];

    #[test]
    fn curves_pin_both_endpoints() {
        for ease in ALL {
            assert!(ease.apply(0.0).abs() < 1e-12, "{:?} at 0", ease);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{:?} at 1", ease);
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for ease in ALL {
            let mut last = 0.0;
            for step in 0..=200 {
                let v = ease.apply(step as f64 / 200.0);
                assert!(v + 1e-12 >= last, "{:?} dipped at step {}", ease, step);
                last = v;
            }
        }
    }

    #[test]
    fn out_curves_lead_linear() {
        assert!(Ease::POWER3_OUT.apply(0.3) > 0.3);
        assert!(Ease::PowerIn(2).apply(0.3) < 0.3);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(Ease::Linear.apply(-2.0), 0.0);
        assert_eq!(Ease::Linear.apply(3.0), 1.0);
    }
}
