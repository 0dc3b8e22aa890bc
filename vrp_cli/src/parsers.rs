use jiff::SpanRelativeTo;

use vrp_optimizer::problem::fleet::FleetSize;

/// Accepts ISO 8601 durations ("PT1H30M"), friendly spans ("30s", "5m") or a
/// plain number of seconds.
pub fn parse_duration(input: &str) -> Result<jiff::SignedDuration, String> {
    if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    if let Ok(seconds) = input.parse::<i64>() {
        return Ok(jiff::SignedDuration::from_secs(seconds.abs()));
    }

    Err(format!("invalid duration '{input}'"))
}

pub fn parse_fleet_size(input: &str) -> Result<FleetSize, String> {
    match input.to_ascii_lowercase().as_str() {
        "finite" => Ok(FleetSize::Finite),
        "infinite" => Ok(FleetSize::Infinite),
        _ => Err(format!(
            "invalid fleet size '{input}', expected 'finite' or 'infinite'"
        )),
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(
            parse_duration("PT1M30S").unwrap(),
            SignedDuration::from_secs(90)
        );
        assert_eq!(parse_duration("5s").unwrap(), SignedDuration::from_secs(5));
        assert_eq!(parse_duration("12").unwrap(), SignedDuration::from_secs(12));
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn test_parse_fleet_size() {
        assert_eq!(parse_fleet_size("Finite").unwrap(), FleetSize::Finite);
        assert_eq!(parse_fleet_size("infinite").unwrap(), FleetSize::Infinite);
        assert!(parse_fleet_size("some").is_err());
    }
}
