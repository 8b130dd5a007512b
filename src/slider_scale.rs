//! Hybrid linear/logarithmic scale for the amount slider.
//!
//! Positions 0-20 cover amounts 0-1.000 linearly, positions 20-100 cover
//! amounts 1.000-1.000.000 logarithmically, so the slider is fine-grained
//! where small differences matter and coarse at the top end.
//!
//! The inverse mapping snaps to a clean grid (5/10/25 below 1.000, 100
//! above), so a slider round-trip is lossy within that granularity.
//! Direct numeric entry bypasses the slider entirely and is only clamped.

/// Upper bound of the amount domain, in whole euros.
pub const MAX_AMOUNT: u64 = 1_000_000;

/// Slider positions are normalized to 0-100.
pub const MAX_POSITION: f64 = 100.0;

const LINEAR_MAX_AMOUNT: f64 = 1_000.0;
const LINEAR_MAX_POSITION: f64 = 20.0;

fn log_span() -> f64 {
    (MAX_AMOUNT as f64).ln() - LINEAR_MAX_AMOUNT.ln()
}

/// Map an amount to its slider position.
pub fn amount_to_position(amount: u64) -> f64 {
    if amount == 0 {
        return 0.0;
    }
    let amount = amount.min(MAX_AMOUNT) as f64;
    if amount <= LINEAR_MAX_AMOUNT {
        (amount / LINEAR_MAX_AMOUNT) * LINEAR_MAX_POSITION
    } else {
        LINEAR_MAX_POSITION
            + ((amount.ln() - LINEAR_MAX_AMOUNT.ln()) / log_span())
                * (MAX_POSITION - LINEAR_MAX_POSITION)
    }
}

fn snap(raw: f64, grid: f64) -> u64 {
    ((raw / grid).round() * grid) as u64
}

/// Map a slider position back to an amount, snapped to the grid for its
/// magnitude.
pub fn position_to_amount(position: f64) -> u64 {
    if position <= 0.0 {
        return 0;
    }
    let position = position.min(MAX_POSITION);
    if position <= LINEAR_MAX_POSITION {
        let raw = (position / LINEAR_MAX_POSITION) * LINEAR_MAX_AMOUNT;
        if raw <= 50.0 {
            snap(raw, 5.0)
        } else if raw <= 200.0 {
            snap(raw, 10.0)
        } else {
            snap(raw, 25.0)
        }
    } else {
        let raw = (LINEAR_MAX_AMOUNT.ln()
            + ((position - LINEAR_MAX_POSITION) / (MAX_POSITION - LINEAR_MAX_POSITION))
                * log_span())
        .exp();
        snap(raw, 100.0).min(MAX_AMOUNT)
    }
}

/// Clamp a directly entered amount to the slider domain.
pub fn clamp_amount(amount: i64) -> u64 {
    amount.clamp(0, MAX_AMOUNT as i64) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_mapping_anchor_points() {
        assert_eq!(amount_to_position(0), 0.0);
        assert!((amount_to_position(500) - 10.0).abs() < 1e-9);
        assert!((amount_to_position(1_000) - 20.0).abs() < 1e-9);
        assert!((amount_to_position(MAX_AMOUNT) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_inverse_mapping_anchor_points() {
        assert_eq!(position_to_amount(0.0), 0);
        assert_eq!(position_to_amount(10.0), 500);
        assert_eq!(position_to_amount(20.0), 1_000);
        assert_eq!(position_to_amount(100.0), MAX_AMOUNT);
    }

    #[test]
    fn test_linear_zone_snap_grid() {
        // <=50 snaps to 5
        assert_eq!(position_to_amount(0.5), 25);
        assert_eq!(position_to_amount(1.0), 50);
        // <=200 snaps to 10
        assert_eq!(position_to_amount(2.0), 100);
        assert_eq!(position_to_amount(3.0), 150);
        // above that snaps to 25
        assert_eq!(position_to_amount(10.0) % 25, 0);
        assert_eq!(position_to_amount(15.0) % 25, 0);
    }

    #[test]
    fn test_log_zone_snaps_to_hundreds() {
        for position in [20.5, 25.0, 40.0, 60.0, 77.7, 99.0] {
            let amount = position_to_amount(position);
            assert_eq!(
                amount % 100,
                0,
                "position {} gave {}, not on the 100-grid",
                position,
                amount
            );
            assert!(amount > 1_000 - 100 && amount <= MAX_AMOUNT);
        }
        // Halfway through the log zone sits near sqrt(1000) * 1000
        let mid = position_to_amount(60.0);
        assert!((31_000..=32_000).contains(&mid), "got {}", mid);
    }

    #[test]
    fn test_inverse_mapping_is_monotonic() {
        let mut last = 0;
        let mut position = 0.0;
        while position <= 100.0 {
            let amount = position_to_amount(position);
            assert!(
                amount >= last,
                "position {} gave {} after {}",
                position,
                amount,
                last
            );
            last = amount;
            position += 0.5;
        }
    }

    #[test]
    fn test_round_trip_lossy_within_snap_granularity() {
        let samples: &[u64] = &[
            0, 3, 7, 25, 49, 51, 120, 199, 201, 675, 999, 1_000, 1_001, 2_500, 9_999, 50_000,
            123_456, 500_000, 999_999, MAX_AMOUNT,
        ];
        for &value in samples {
            let round_tripped = position_to_amount(amount_to_position(value));
            let tolerance = if value <= 1_000 { 25 } else { 100 };
            let diff = round_tripped.abs_diff(value);
            assert!(
                diff <= tolerance,
                "round-trip of {} gave {} (off by {}, allowed {})",
                value,
                round_tripped,
                diff,
                tolerance
            );
        }
    }

    #[test]
    fn test_direct_entry_clamps() {
        assert_eq!(clamp_amount(-50), 0);
        assert_eq!(clamp_amount(0), 0);
        assert_eq!(clamp_amount(123_456), 123_456);
        assert_eq!(clamp_amount(2_000_000), MAX_AMOUNT);
    }

    #[test]
    fn test_out_of_range_positions_clamp() {
        assert_eq!(position_to_amount(-5.0), 0);
        assert_eq!(position_to_amount(140.0), MAX_AMOUNT);
        assert!((amount_to_position(2_000_000) - 100.0).abs() < 1e-9);
    }
}
