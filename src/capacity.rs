/// Smallest capacity a collection may be configured with
pub const MIN_CAPACITY: usize = 1;

/// Largest capacity a collection may be configured with
pub const MAX_CAPACITY: usize = 200;

/// Capacity used when nothing else is configured
pub const DEFAULT_CAPACITY: usize = 5;

/// True while another element fits below the bound
pub fn can_insert(len: usize, capacity: usize) -> bool {
    len < capacity
}

pub fn is_empty(len: usize) -> bool {
    len == 0
}

/// Clamp a requested capacity into `[MIN_CAPACITY, MAX_CAPACITY]`.
pub fn clamp_capacity(requested: i64) -> usize {
    requested.clamp(MIN_CAPACITY as i64, MAX_CAPACITY as i64) as usize
}

/// Interpret free-form capacity input as a requested size.
///
/// Input is never rejected: anything that is not a number requests 0 (which
/// clamps to the lower bound), fractions are truncated and values beyond the
/// `i64` range saturate.
pub fn parse_requested(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return value;
    }
    match trimmed.parse::<f64>() {
        // `as` saturates on overflow
        Ok(value) if value.is_finite() => value.trunc() as i64,
        Ok(value) if value == f64::INFINITY => i64::MAX,
        Ok(value) if value == f64::NEG_INFINITY => i64::MIN,
        _ => 0,
    }
}

/// Clamp raw capacity input in one step.
pub fn clamp_capacity_input(raw: &str) -> usize {
    clamp_capacity(parse_requested(raw))
}
