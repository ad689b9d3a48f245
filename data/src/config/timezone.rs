use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum UserTimezone {
    Utc,
    #[default]
    Local,
}

impl UserTimezone {
    /// Formats `ts` with a `chrono` strftime pattern in this timezone.
    pub fn format(self, ts: DateTime<Utc>, pattern: &str) -> String {
        match self {
            UserTimezone::Utc => ts.format(pattern).to_string(),
            UserTimezone::Local => ts.with_timezone(&chrono::Local).format(pattern).to_string(),
        }
    }
}

impl std::fmt::Display for UserTimezone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserTimezone::Utc => write!(f, "UTC"),
            UserTimezone::Local => {
                let offset = chrono::Local::now().offset().local_minus_utc() / 3600;
                if offset >= 0 {
                    write!(f, "Local (UTC+{offset})")
                } else {
                    write!(f, "Local (UTC{offset})")
                }
            }
        }
    }
}
