use chrono::{DateTime, Utc};
use tokio::time::Instant;

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

pub fn get_instant() -> Instant {
    Instant::now()
}

/// Convert an `exp` claim (seconds since epoch, possibly fractional) into an
/// absolute timestamp. Fractions are truncated.
pub fn from_exp_claim(exp: f64) -> Option<DateTime<Utc>> {
    if !exp.is_finite() {
        return None;
    }
    DateTime::from_timestamp(exp.trunc() as i64, 0)
}
