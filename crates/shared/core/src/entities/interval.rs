use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Trading cycle period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Interval {
    #[default]
    Min1,
    Min5,
    Min15,
    Min30,
    Hour1,
    Day1,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Min1 => "1MIN",
            Interval::Min5 => "5MIN",
            Interval::Min15 => "15MIN",
            Interval::Min30 => "30MIN",
            Interval::Hour1 => "1HR",
            Interval::Day1 => "1DAY",
        }
    }

    pub fn as_duration(&self) -> Duration {
        let minutes = match self {
            Interval::Min1 => 1,
            Interval::Min5 => 5,
            Interval::Min15 => 15,
            Interval::Min30 => 30,
            Interval::Hour1 => 60,
            Interval::Day1 => 24 * 60,
        };
        Duration::from_secs(minutes * 60)
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1MIN" => Ok(Interval::Min1),
            "5MIN" => Ok(Interval::Min5),
            "15MIN" => Ok(Interval::Min15),
            "30MIN" => Ok(Interval::Min30),
            "1HR" => Ok(Interval::Hour1),
            "1DAY" => Ok(Interval::Day1),
            other => Err(format!("unknown interval: {}", other)),
        }
    }
}

impl TryFrom<String> for Interval {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Interval> for String {
    fn from(value: Interval) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interval() {
        assert_eq!("1MIN".parse::<Interval>().unwrap(), Interval::Min1);
        assert_eq!("1hr".parse::<Interval>().unwrap(), Interval::Hour1);
        assert!("2MIN".parse::<Interval>().is_err());
    }

    #[test]
    fn test_default_is_one_minute() {
        assert_eq!(Interval::default().as_duration(), Duration::from_secs(60));
        assert_eq!(Interval::Day1.as_duration(), Duration::from_secs(86_400));
    }
}
