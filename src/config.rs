use anyhow::Context;
use time::{OffsetDateTime, UtcOffset};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Offset of the restaurants' wall clock; decides which meals have passed.
    pub utc_offset: UtcOffset,
    /// When off, plans ignore dietary flags and allergens.
    pub dietary_filters: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);
        let utc_offset = match std::env::var("PLANNER_UTC_OFFSET_HOURS") {
            Ok(raw) => parse_utc_offset(&raw)
                .with_context(|| format!("invalid PLANNER_UTC_OFFSET_HOURS '{raw}'"))?,
            Err(_) => UtcOffset::UTC,
        };
        let dietary_filters = std::env::var("PLANNER_DIETARY_FILTERS")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "off"))
            .unwrap_or(true);

        Ok(Self {
            database_url,
            host,
            port,
            utc_offset,
            dietary_filters,
        })
    }

    pub fn local_now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.utc_offset)
    }
}

/// Accepts `H`, `+HH`, `-HH` or `[+-]HH:MM`.
fn parse_utc_offset(raw: &str) -> anyhow::Result<UtcOffset> {
    let raw = raw.trim();
    let (sign, rest) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h.parse::<u8>()?, m.parse::<u8>()?),
        None => (rest.parse::<u8>()?, 0),
    };
    if minutes >= 60 {
        anyhow::bail!("minutes out of range");
    }
    let hours = i8::try_from(hours)?;
    let minutes = i8::try_from(minutes)?;
    Ok(UtcOffset::from_hms(sign * hours, sign * minutes, 0)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_now_uses_configured_offset() {
        let config = AppConfig {
            database_url: String::new(),
            host: "127.0.0.1".into(),
            port: 0,
            utc_offset: UtcOffset::from_hms(3, 0, 0).unwrap(),
            dietary_filters: true,
        };
        assert_eq!(config.local_now().offset().whole_hours(), 3);
    }

    #[test]
    fn offsets_parse_strictly() {
        assert_eq!(parse_utc_offset("3").unwrap(), UtcOffset::from_hms(3, 0, 0).unwrap());
        assert_eq!(parse_utc_offset("+05:30").unwrap(), UtcOffset::from_hms(5, 30, 0).unwrap());
        assert_eq!(parse_utc_offset("-03:30").unwrap(), UtcOffset::from_hms(-3, -30, 0).unwrap());
        assert_eq!(parse_utc_offset(" -8 ").unwrap(), UtcOffset::from_hms(-8, 0, 0).unwrap());

        for bad in ["5.5", "", "abc", "+05:75", "30", "--2"] {
            assert!(parse_utc_offset(bad).is_err(), "{bad}");
        }
    }
}
