use chrono::Utc;
use serde::{Deserialize, Deserializer};

const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let mut random = uuid::Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(ID_SUFFIX_LEN);
    for _ in 0..ID_SUFFIX_LEN {
        suffix.push(BASE36[(random % 36) as usize] as char);
        random /= 36;
    }
    format!("{}-{}", millis, suffix)
}

/// Current UTC date as `YYYY-MM-DD`
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Human readable counter: plain below 1000, then one decimal with a `k` or `M` suffix.
pub fn format_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}k", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Parses a counter written by older versions, which stored the formatted string.
/// Every non-digit is dropped, so `"1.2k"` reads as 12.
pub fn parse_legacy_count(s: &str) -> u64 {
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CountRepr {
    Number(u64),
    Float(f64),
    Text(String),
}

impl From<CountRepr> for u64 {
    fn from(value: CountRepr) -> Self {
        match value {
            CountRepr::Number(n) => n,
            CountRepr::Float(f) if f.is_finite() && f > 0.0 => f as u64,
            CountRepr::Float(_) => 0,
            CountRepr::Text(s) => parse_legacy_count(&s),
        }
    }
}

pub fn deserialize_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    CountRepr::deserialize(deserializer).map(u64::from)
}

pub fn deserialize_opt_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<CountRepr>::deserialize(deserializer)?.map(u64::from))
}

/// For partial updates: an explicit `null` reads as `Some(None)` and clears the field, a
/// missing field stays `None` through `#[serde(default)]`.
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
