//! Width lock: reserve room for the widest phrase so the layout does not
//! shift while text is typed and deleted.

/// Extra pixels added on top of the widest measurement
pub const WIDTH_LOCK_MARGIN_PX: f64 = 2.0;

/// Minimum width to reserve, given one measurement per rendered phrase
///
/// `None` when nothing measurable came back (no phrases, or every probe
/// returned zero), in which case the lock is skipped.
pub fn locked_min_width<I>(widths: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let widest = widths
        .into_iter()
        .filter(|w| w.is_finite())
        .fold(0.0_f64, f64::max);

    if widest > 0.0 {
        Some((widest + WIDTH_LOCK_MARGIN_PX).ceil())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widest_plus_margin_rounded_up() {
        assert_eq!(locked_min_width([10.0, 42.3, 17.0]), Some(45.0));
    }

    #[test]
    fn test_zero_widths_skip_lock() {
        assert_eq!(locked_min_width([0.0, 0.0]), None);
        assert_eq!(locked_min_width(Vec::new()), None);
        assert_eq!(locked_min_width([f64::NAN]), None);
    }
}
