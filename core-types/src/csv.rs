// Copyright (c) James Kassemi, SC, US. All rights reserved.

//! CSV cell formatting for the replay printer.
//!
//! Every cell is followed by a comma, including the last one on the line.
//! Absent optional fields render as an empty cell.

use std::fmt;

use chrono::DateTime;

/// Optional numeric or string cell: the value or nothing.
pub fn opt<T: fmt::Display>(f: &mut fmt::Formatter<'_>, value: &Option<T>) -> fmt::Result {
    match value {
        Some(value) => write!(f, "{value},"),
        None => write!(f, ","),
    }
}

/// Optional single-octet code cell, rendered as one ASCII character.
pub fn code(f: &mut fmt::Formatter<'_>, value: &Option<u8>) -> fmt::Result {
    match value {
        Some(value) => write!(f, "{},", *value as char),
        None => write!(f, ","),
    }
}

/// Required capture timestamp cell, `YYYY-MM-DD HH:MM:SS` in UTC.
pub fn timestamp(f: &mut fmt::Formatter<'_>, micros: i64) -> fmt::Result {
    match DateTime::from_timestamp(micros.div_euclid(1_000_000), 0) {
        Some(moment) => write!(f, "{},", moment.format("%Y-%m-%d %H:%M:%S")),
        None => write!(f, "{micros},"),
    }
}
