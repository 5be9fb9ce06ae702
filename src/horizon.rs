use std::fmt;

use chrono::{DateTime, Duration, Local, NaiveDateTime, NaiveTime, TimeZone};
use clap::ValueEnum;
use ratatui::style::Color;
use serde::Deserialize;

use crate::error::Error;

const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 59) {
    Some(t) => t,
    None => panic!("23:59:59 is a valid time"),
};

/// Format of the `date` query parameter sent to `GET /tasks`.
pub const CUTOFF_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How far ahead a task list screen looks. Each horizon has its own cutoff
/// and its own theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Deserialize)]
#[serde(try_from = "i64")]
pub enum Horizon {
    Today,
    Tomorrow,
    Week,
    Month,
}

/// Header background and accent colour for a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
}

impl Horizon {
    pub const ALL: [Horizon; 4] = [Horizon::Today, Horizon::Tomorrow, Horizon::Week, Horizon::Month];

    pub fn days_ahead(self) -> i64 {
        match self {
            Horizon::Today => 0,
            Horizon::Tomorrow => 1,
            Horizon::Week => 7,
            Horizon::Month => 30,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Horizon::Today => "today",
            Horizon::Tomorrow => "tomorrow",
            Horizon::Week => "week",
            Horizon::Month => "month",
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            Horizon::Today => Theme {
                background: Color::Rgb(58, 24, 28),
                accent: Color::Rgb(177, 59, 68),
            },
            Horizon::Tomorrow => Theme {
                background: Color::Rgb(64, 38, 18),
                accent: Color::Rgb(201, 116, 46),
            },
            Horizon::Week => Theme {
                background: Color::Rgb(14, 46, 20),
                accent: Color::Rgb(21, 114, 30),
            },
            Horizon::Month => Theme {
                background: Color::Rgb(16, 26, 72),
                accent: Color::Rgb(22, 49, 190),
            },
        }
    }

    /// End of the last day covered by this horizon, in local time.
    pub fn cutoff<Tz: TimeZone>(self, now: &DateTime<Tz>) -> NaiveDateTime {
        let day = now.naive_local().date() + Duration::days(self.days_ahead());
        day.and_time(END_OF_DAY)
    }

    pub fn cutoff_now(self) -> NaiveDateTime {
        self.cutoff(&Local::now())
    }
}

/// The cutoff as sent to the task service.
pub fn cutoff_param(cutoff: NaiveDateTime) -> String {
    cutoff.format(CUTOFF_FORMAT).to_string()
}

impl TryFrom<i64> for Horizon {
    type Error = Error;

    fn try_from(days: i64) -> Result<Self, Self::Error> {
        match days {
            0 => Ok(Horizon::Today),
            1 => Ok(Horizon::Tomorrow),
            7 => Ok(Horizon::Week),
            30 => Ok(Horizon::Month),
            other => Err(Error::UnsupportedHorizon(other)),
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
