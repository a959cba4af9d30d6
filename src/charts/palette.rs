//! Colours shared by the interactive plotter and the static renderer.

/// Categorical palette for bars, boxes and pie slices.
pub const PALETTE: [(u8, u8, u8); 10] = [
    (52, 152, 219),  // Blue
    (231, 76, 60),   // Red
    (46, 204, 113),  // Green
    (155, 89, 182),  // Purple
    (243, 156, 18),  // Orange
    (26, 188, 156),  // Teal
    (233, 30, 99),   // Pink
    (0, 188, 212),   // Cyan
    (255, 87, 34),   // Deep Orange
    (96, 125, 139),  // Blue Grey
];

// Plasma colour map stops
const PLASMA: [(u8, u8, u8); 5] = [
    (13, 8, 135),
    (126, 3, 168),
    (204, 71, 120),
    (248, 149, 64),
    (240, 249, 33),
];

pub fn categorical(index: usize) -> (u8, u8, u8) {
    PALETTE[index % PALETTE.len()]
}

/// Sequential colour for `value` within `[min, max]`.
pub fn sequential(value: f64, min: f64, max: f64) -> (u8, u8, u8) {
    let t = if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let scaled = t * (PLASMA.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(PLASMA.len() - 1);
    let frac = scaled - lower as f64;

    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (PLASMA[lower], PLASMA[upper]);
    (lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Min and max of the finite values, `(0, 0)` when there are none.
pub fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min.is_infinite() {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_hits_the_end_stops() {
        assert_eq!(sequential(0.0, 0.0, 10.0), PLASMA[0]);
        assert_eq!(sequential(10.0, 0.0, 10.0), PLASMA[4]);
        assert_eq!(sequential(50.0, 0.0, 10.0), PLASMA[4]);
    }

    #[test]
    fn value_range_ignores_non_finite() {
        assert_eq!(value_range([3.0, f64::NAN, -1.0].into_iter()), (-1.0, 3.0));
        assert_eq!(value_range(std::iter::empty()), (0.0, 0.0));
    }
}
