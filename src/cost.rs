// src/cost.rs
//
// Pure cost arithmetic. No state, no I/O. Bad numeric input is a
// Validation error; NaN never reaches the UI.

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeSplit {
    pub low_pri: u32,
    pub dedicated: u32,
}

/// Split a fleet by the low-priority ratio: floor for low-priority,
/// remainder dedicated.
pub fn split_nodes(total_nodes: u32, low_pri_ratio: f64) -> Result<NodeSplit> {
    if !low_pri_ratio.is_finite() || !(0.0..=1.0).contains(&low_pri_ratio) {
        return Err(Error::Validation(format!(
            "low-priority ratio must be within 0..=1, got {low_pri_ratio}"
        )));
    }
    let low_pri = (low_pri_ratio * f64::from(total_nodes)).floor() as u32;
    Ok(NodeSplit {
        low_pri,
        dedicated: total_nodes - low_pri,
    })
}

fn checked(value: f64, what: &str) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::Validation(format!(
            "{what} must be a non-negative number, got {value}"
        )));
    }
    Ok(value)
}

/// Hourly fleet cost: each tier's unit price times its node count.
pub fn cost_per_hour(
    low_pri_price: f64,
    dedicated_price: f64,
    low_pri_count: u32,
    dedicated_count: u32,
) -> Result<f64> {
    let low = checked(low_pri_price, "low-priority price")?;
    let ded = checked(dedicated_price, "dedicated price")?;
    Ok(low * f64::from(low_pri_count) + ded * f64::from(dedicated_count))
}

/// Seconds for `nodes` simulators at `sim_speed` iterations/second to
/// reach `target_iterations`.
pub fn time_to_target_secs(target_iterations: u64, sim_speed: f64, nodes: u32) -> Result<f64> {
    let speed = checked(sim_speed, "simulator speed")?;
    if speed == 0.0 {
        return Err(Error::Validation(s!("simulator speed must be positive")));
    }
    if nodes == 0 {
        return Err(Error::Validation(s!("node count must be positive")));
    }
    Ok(target_iterations as f64 / (speed * f64::from(nodes)))
}

/// Total cost of holding an `hourly`-cost fleet for `secs` seconds.
pub fn experiment_cost(hourly: f64, secs: f64) -> Result<f64> {
    Ok(checked(hourly, "hourly cost")? * checked(secs, "duration")? / 3600.0)
}

pub fn cost_per_iteration(total_cost: f64, iterations: u64) -> Result<f64> {
    if iterations == 0 {
        return Err(Error::Validation(s!("iteration count must be positive")));
    }
    Ok(checked(total_cost, "total cost")? / iterations as f64)
}

/* ---------------- display helpers ---------------- */

fn group_digits(int_part: &str) -> String {
    let digits: Vec<char> = int_part.chars().filter(|c| c.is_ascii_digit()).collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*d);
    }
    grouped
}

/// "1234567.891" → "1,234,567.89". Two decimals, comma thousands groups.
pub fn thousands(value: f64) -> String {
    let raw = format!("{value:.2}");
    let (int_part, frac) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));
    let sign = if int_part.starts_with('-') { "-" } else { "" };
    format!("{sign}{}.{frac}", group_digits(int_part))
}

/// "360000" → "360,000". Integers keep no decimals.
pub fn thousands_int(value: u64) -> String {
    group_digits(&value.to_string())
}

pub fn usd(value: f64) -> String {
    format!("${}", thousands(value))
}

/// Pick a readable unit for a duration: >24h days, <1min seconds,
/// <1h minutes, hours otherwise.
pub fn format_duration(secs: f64) -> String {
    let hours = secs / 3600.0;
    let (value, unit) = if hours > 24.0 {
        (hours / 24.0, "days")
    } else if hours < 1.0 / 60.0 {
        (secs, "seconds")
    } else if hours < 1.0 {
        (hours * 60.0, "minutes")
    } else {
        (hours, "hours")
    };
    format!("{} {}", thousands(value), unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hourly_cost_worked_example() {
        assert_eq!(cost_per_hour(0.30, 1.20, 10, 1).unwrap(), 4.2);
    }

    #[test]
    fn hourly_cost_is_linear_in_each_count() {
        let base = cost_per_hour(0.30, 1.20, 10, 1).unwrap();
        let doubled_low = cost_per_hour(0.30, 1.20, 20, 1).unwrap();
        // Doubling the low-priority count doubles only that contribution.
        assert!((doubled_low - base - 0.30 * 10.0).abs() < 1e-12);

        let doubled_ded = cost_per_hour(0.30, 1.20, 10, 2).unwrap();
        assert!((doubled_ded - base - 1.20).abs() < 1e-12);
    }

    #[test]
    fn nan_price_is_validation_error() {
        assert!(matches!(
            cost_per_hour(f64::NAN, 1.0, 1, 1),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            cost_per_hour(-0.5, 1.0, 1, 1),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn time_to_target_single_node() {
        // 100 it/s, 360 000 iterations → 3600 s → "1.00 hours"
        let secs = time_to_target_secs(360_000, 100.0, 1).unwrap();
        assert_eq!(secs, 3600.0);
        assert_eq!(format_duration(secs), "1.00 hours");
    }

    #[test]
    fn time_to_target_scales_with_nodes() {
        let one = time_to_target_secs(360_000, 100.0, 1).unwrap();
        let fifty = time_to_target_secs(360_000, 100.0, 50).unwrap();
        assert!((one / fifty - 50.0).abs() < 1e-9);
    }

    #[test]
    fn zero_speed_is_validation_error() {
        assert!(matches!(
            time_to_target_secs(1000, 0.0, 1),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn duration_units() {
        assert_eq!(format_duration(30.0), "30.00 seconds");
        assert_eq!(format_duration(1800.0), "30.00 minutes");
        assert_eq!(format_duration(7200.0), "2.00 hours");
        assert_eq!(format_duration(90_000.0), "1.04 days");
    }

    #[test]
    fn node_split_floors_low_priority() {
        let split = split_nodes(50, 0.1).unwrap();
        assert_eq!(split.low_pri, 5);
        assert_eq!(split.dedicated, 45);

        let all_ded = split_nodes(50, 0.0).unwrap();
        assert_eq!(all_ded.low_pri, 0);
        assert_eq!(all_ded.dedicated, 50);

        assert!(matches!(split_nodes(50, 1.5), Err(Error::Validation(_))));
    }

    #[test]
    fn experiment_cost_holds_hourly_for_duration() {
        // 4.2 $/h for one hour
        assert!((experiment_cost(4.2, 3600.0).unwrap() - 4.2).abs() < 1e-12);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(thousands(1_234_567.891), "1,234,567.89");
        assert_eq!(thousands(999.9), "999.90");
        assert_eq!(thousands(0.0), "0.00");
        assert_eq!(usd(4.2), "$4.20");
        assert_eq!(thousands_int(360_000), "360,000");
        assert_eq!(thousands_int(999), "999");
    }
}
