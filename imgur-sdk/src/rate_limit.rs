// ABOUTME: Quota snapshot type and extraction from X-RateLimit-* response headers
// ABOUTME: Parses each header independently so one bad value does not hide the rest

use chrono::{DateTime, Utc};
use http::HeaderMap;
use serde::{Deserialize, Serialize};
use std::num::ParseIntError;
use thiserror::Error;

use crate::constants::headers;

/// Point-in-time view of the remaining request allowance.
///
/// Details: <https://api.imgur.com/#limits>. Fields whose header was absent
/// keep their zero value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaSnapshot {
    /// Total credits that can be allocated to the user.
    pub user_limit: i64,
    /// Credits the user has left.
    pub user_remaining: i64,
    /// When the user credits are reset.
    pub user_reset: Option<DateTime<Utc>>,
    /// Total credits the application can spend in a day.
    pub client_limit: i64,
    /// Credits the application has left today.
    pub client_remaining: i64,
}

impl QuotaSnapshot {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuotaHeaderError {
    #[error("rate-limit header {header} is not valid UTF-8")]
    NotUtf8 { header: &'static str },

    #[error("rate-limit header {header} has non-integer value {value:?}: {source}")]
    NotInteger {
        header: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("rate-limit header {header} holds out-of-range timestamp {value}")]
    TimestampOutOfRange { header: &'static str, value: i64 },
}

/// Builds a [`QuotaSnapshot`] from response headers.
///
/// Every header is parsed even if an earlier one failed; the last failure is
/// returned next to the partial snapshot.
pub fn extract_quota(header_map: &HeaderMap) -> (QuotaSnapshot, Option<QuotaHeaderError>) {
    let mut last_error = None;

    let snapshot = QuotaSnapshot {
        user_limit: keep(read_integer(header_map, headers::USER_LIMIT), &mut last_error)
            .unwrap_or_default(),
        user_remaining: keep(read_integer(header_map, headers::USER_REMAINING), &mut last_error)
            .unwrap_or_default(),
        user_reset: keep(read_timestamp(header_map, headers::USER_RESET), &mut last_error),
        client_limit: keep(read_integer(header_map, headers::CLIENT_LIMIT), &mut last_error)
            .unwrap_or_default(),
        client_remaining: keep(
            read_integer(header_map, headers::CLIENT_REMAINING),
            &mut last_error,
        )
        .unwrap_or_default(),
    };

    (snapshot, last_error)
}

fn keep<T>(
    result: Result<Option<T>, QuotaHeaderError>,
    last_error: &mut Option<QuotaHeaderError>,
) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(err) => {
            *last_error = Some(err);
            None
        }
    }
}

fn read_integer(
    header_map: &HeaderMap,
    header: &'static str,
) -> Result<Option<i64>, QuotaHeaderError> {
    let Some(raw) = header_map.get(header) else {
        return Ok(None);
    };

    let text = raw
        .to_str()
        .map_err(|_| QuotaHeaderError::NotUtf8 { header })?
        .trim();

    if text.is_empty() {
        return Ok(None);
    }

    text.parse::<i64>()
        .map(Some)
        .map_err(|source| QuotaHeaderError::NotInteger {
            header,
            value: text.to_string(),
            source,
        })
}

fn read_timestamp(
    header_map: &HeaderMap,
    header: &'static str,
) -> Result<Option<DateTime<Utc>>, QuotaHeaderError> {
    match read_integer(header_map, header)? {
        Some(epoch) => DateTime::<Utc>::from_timestamp(epoch, 0)
            .map(Some)
            .ok_or(QuotaHeaderError::TimestampOutOfRange {
                header,
                value: epoch,
            }),
        None => Ok(None),
    }
}
