use thiserror::Error;

/// Delay applied when a reminder request carries no duration expression
/// at all
pub const DEFAULT_REMIND_DELAY_SECS: i64 = 60 * 10;

const SECS_IN_MINUTE: i64 = 60;
const SECS_IN_HOUR: i64 = 60 * 60;
const SECS_IN_DAY: i64 = 24 * 60 * 60;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Duration expression: `{0}` does not start with a base 10 number")]
    InvalidNumber(String),
}

/// A parsed `<number> <unit>` delay from a reminder command, e.g.
/// "/remind 2 hours".
///
/// The unit is matched by case-insensitive substring against day / hour /
/// minute, so "days", "Hour" and "minutes" all normalize to their class.
/// An unrecognized or missing unit falls back to minutes. A missing
/// expression falls back to [DEFAULT_REMIND_DELAY_SECS], but a present
/// expression whose numeric part does not parse is rejected: "no
/// expression supplied" and "malformed expression supplied" are different
/// things.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationExpr {
    secs: i64,
}

impl DurationExpr {
    pub fn parse(raw: Option<&str>) -> Result<Self, ExpressionError> {
        let raw = match raw {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(Self::default()),
        };

        let mut tokens = raw.split_whitespace();
        let mut number = tokens.next().unwrap_or_default();
        // A leading command token like "/remind" is not part of the
        // expression itself
        if number.starts_with('/') {
            number = match tokens.next() {
                Some(token) => token,
                None => return Ok(Self::default()),
            };
        }

        let number = number
            .parse::<u32>()
            .map_err(|_| ExpressionError::InvalidNumber(raw.to_string()))?;

        let unit = tokens.next().unwrap_or_default().to_lowercase();
        let unit_secs = if unit.contains("day") {
            SECS_IN_DAY
        } else if unit.contains("hour") {
            SECS_IN_HOUR
        } else {
            SECS_IN_MINUTE
        };

        Ok(Self {
            secs: i64::from(number) * unit_secs,
        })
    }

    pub fn as_secs(&self) -> i64 {
        self.secs
    }

    /// The epoch timestamp at which a reminder scheduled now should fire
    pub fn fire_at(&self, now: i64) -> i64 {
        now + self.secs
    }
}

impl Default for DurationExpr {
    fn default() -> Self {
        Self {
            secs: DEFAULT_REMIND_DELAY_SECS,
        }
    }
}
