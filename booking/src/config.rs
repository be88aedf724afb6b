//! Configuration management for the booking engine.
//!
//! Loads configuration from environment variables with defaults matching
//! the standard operating hours (10:00 to 18:00) and a three-day horizon.

use crate::slots::{
    BookingHorizon, BookingPolicy, DEFAULT_CLOSING_HOUR, DEFAULT_HORIZON_DAYS, DEFAULT_OPENING_HOUR,
    SlotWindow,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default time the demo waits for a submission to settle
pub const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 10;

/// Errors raised while loading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Hours do not form a window inside one day
    #[error("Invalid slot window {opening_hour}..={closing_hour}: expected opening <= closing <= 23")]
    InvalidSlotWindow {
        /// Configured opening hour
        opening_hour: u32,
        /// Configured closing hour
        closing_hour: u32,
    },

    /// A variable is set but is not a number
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },
}

/// Booking engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfig {
    /// First slot hour (`BOOKING_OPENING_HOUR`)
    pub opening_hour: u32,
    /// Last slot hour (`BOOKING_CLOSING_HOUR`)
    pub closing_hour: u32,
    /// Bookable days after today (`BOOKING_HORIZON_DAYS`)
    pub horizon_days: u32,
    /// Seconds to wait for a submission (`BOOKING_SUBMIT_TIMEOUT_SECS`)
    pub submit_timeout_secs: u64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            opening_hour: DEFAULT_OPENING_HOUR,
            closing_hour: DEFAULT_CLOSING_HOUR,
            horizon_days: DEFAULT_HORIZON_DAYS,
            submit_timeout_secs: DEFAULT_SUBMIT_TIMEOUT_SECS,
        }
    }
}

impl BookingConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is malformed or the hours do not
    /// form a valid window.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// See [`BookingConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            opening_hour: number(&lookup, "BOOKING_OPENING_HOUR", defaults.opening_hour)?,
            closing_hour: number(&lookup, "BOOKING_CLOSING_HOUR", defaults.closing_hour)?,
            horizon_days: number(&lookup, "BOOKING_HORIZON_DAYS", defaults.horizon_days)?,
            submit_timeout_secs: number(
                &lookup,
                "BOOKING_SUBMIT_TIMEOUT_SECS",
                defaults.submit_timeout_secs,
            )?,
        };
        config.window()?;
        Ok(config)
    }

    fn window(&self) -> Result<SlotWindow, ConfigError> {
        SlotWindow::new(self.opening_hour, self.closing_hour).ok_or(ConfigError::InvalidSlotWindow {
            opening_hour: self.opening_hour,
            closing_hour: self.closing_hour,
        })
    }

    /// The scheduling rules this configuration describes
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSlotWindow`] for a config built by hand
    /// with hours outside one day.
    pub fn policy(&self) -> Result<BookingPolicy, ConfigError> {
        Ok(BookingPolicy::new(
            self.window()?,
            BookingHorizon::new(self.horizon_days),
        ))
    }

    /// How long to wait for a submission to settle
    #[must_use]
    pub const fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs)
    }
}

fn number<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) if value.trim().is_empty() => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
    }
}
