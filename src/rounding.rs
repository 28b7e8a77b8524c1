//! Half-up decimal rounding used for every reported figure

/// Round to `decimals` places, ties toward positive infinity
///
/// `round_to(2.345, 2)` gives 2.35 and `round_to(-2.5, 0)` gives -2.0.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor + 0.5).floor() / factor
}

/// Round to the nearest whole number, ties toward positive infinity
pub fn round_whole(value: f64) -> f64 {
    round_to(value, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_two_places() {
        assert_eq!(round_to(5200.881248, 2), 5200.88);
        assert_eq!(round_to(0.125, 2), 0.13);
    }

    #[test]
    fn test_negative_ties_round_up() {
        assert_eq!(round_whole(-2.5), -2.0);
        assert_eq!(round_whole(2.5), 3.0);
        assert_eq!(round_to(-30.015, 2), -30.01);
    }
}
