//! Axis scaling and colour helpers shared by the chart renderers.

pub type Rgb = (f32, f32, f32);

pub const GREEN: Rgb = (0.17, 0.63, 0.17);
pub const RED: Rgb = (0.84, 0.15, 0.16);
pub const BLUE: Rgb = (0.12, 0.47, 0.71);
pub const BLACK: Rgb = (0.0, 0.0, 0.0);
pub const GRID: Rgb = (0.85, 0.85, 0.85);

/// Symmetric log with a linear region below 1, so zero stays at the origin.
pub fn symlog(value: f64) -> f64 {
    if value <= 1.0 {
        value.max(0.0)
    } else {
        1.0 + value.log10()
    }
}

/// Decade ticks `0, 1, 10, 100, ...` up to `max`.
pub fn symlog_ticks(max: f64) -> Vec<f64> {
    let mut ticks = vec![0.0];
    let mut tick = 1.0;
    while tick <= max {
        ticks.push(tick);
        tick *= 10.0;
    }
    ticks
}

/// Whole-number ticks from zero to `max` at a 1/2/5 step.
pub fn linear_ticks(max: f64) -> Vec<f64> {
    if max <= 0.0 {
        return vec![0.0];
    }
    let raw = max / 4.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = match raw / magnitude {
        r if r <= 1.0 => magnitude,
        r if r <= 2.0 => 2.0 * magnitude,
        r if r <= 5.0 => 5.0 * magnitude,
        _ => 10.0 * magnitude,
    }
    .max(1.0)
    .round();

    let mut ticks = Vec::new();
    let mut tick = 0.0;
    while tick <= max {
        ticks.push(tick);
        tick += step;
    }
    ticks
}

/// White-to-dark-green ramp for `t` in `[0, 1]`.
pub fn greens(t: f64) -> Rgb {
    const STOPS: [(f64, Rgb); 3] = [
        (0.0, (0.97, 0.99, 0.96)),
        (0.5, (0.45, 0.77, 0.46)),
        (1.0, (0.0, 0.27, 0.11)),
    ];
    let t = t.clamp(0.0, 1.0);
    let (lo, hi) = if t <= STOPS[1].0 {
        (STOPS[0], STOPS[1])
    } else {
        (STOPS[1], STOPS[2])
    };
    let f = ((t - lo.0) / (hi.0 - lo.0)) as f32;
    let mix = |a: f32, b: f32| a + (b - a) * f;
    (mix(lo.1 .0, hi.1 .0), mix(lo.1 .1, hi.1 .1), mix(lo.1 .2, hi.1 .2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symlog_is_linear_near_zero() {
        assert_eq!(symlog(0.0), 0.0);
        assert_eq!(symlog(0.5), 0.5);
        assert_eq!(symlog(1.0), 1.0);
        assert!((symlog(100.0) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn decade_ticks() {
        assert_eq!(symlog_ticks(0.5), vec![0.0]);
        assert_eq!(symlog_ticks(150.0), vec![0.0, 1.0, 10.0, 100.0]);
    }

    #[test]
    fn linear_ticks_are_whole_numbers() {
        assert_eq!(linear_ticks(1.5), vec![0.0, 1.0]);
        assert_eq!(linear_ticks(30.0), vec![0.0, 10.0, 20.0, 30.0]);
        assert_eq!(linear_ticks(0.0), vec![0.0]);
    }

    #[test]
    fn ramp_endpoints() {
        assert_eq!(greens(0.0), (0.97, 0.99, 0.96));
        let (r, g, b) = greens(1.0);
        assert!(r.abs() < 1e-6 && (g - 0.27).abs() < 1e-6 && (b - 0.11).abs() < 1e-6);
        assert_eq!(greens(2.0), greens(1.0));
    }
}
