//! Timestamp scalar form, normalized to UTC.
//!
//! Accepted: `YYYY-MM-DD`, optionally followed by a `T`/`t` or blank
//! separator, `HH:MM:SS`, an optional fraction (truncated, then padded
//! to microseconds), optional blanks and an optional `Z` or `±HH[:MM]`
//! zone offset. The offset is subtracted, so the result is always UTC;
//! a date without a time is midnight UTC.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::error::LoadError;

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn digits(&mut self, count: usize) -> Option<u32> {
        let bytes = self.rest.as_bytes();
        if bytes.len() < count || !bytes[..count].iter().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let (taken, rest) = self.rest.split_at(count);
        self.rest = rest;
        taken.parse().ok()
    }

    fn take_digits(&mut self) -> &'a str {
        let end = self
            .rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.rest.len());
        let (digits, rest) = self.rest.split_at(end);
        self.rest = rest;
        digits
    }

    fn eat(&mut self, c: char) -> bool {
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    /// Consumes spaces and tabs, returning how many were eaten.
    fn skip_blanks(&mut self) -> usize {
        let before = self.rest.len();
        self.rest = self.rest.trim_start_matches([' ', '\t']);
        before - self.rest.len()
    }

    fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }
}

/// Parses a timestamp scalar into a UTC instant.
pub fn parse(text: &str, tag: &str) -> Result<DateTime<Utc>, LoadError> {
    let malformed = |detail: &str| LoadError::MalformedScalar {
        tag: tag.to_string(),
        detail: format!("{text:?}: {detail}"),
    };

    let mut cur = Cursor { rest: text.trim() };
    let year = cur.digits(4).ok_or_else(|| malformed("expected year"))?;
    if !cur.eat('-') {
        return Err(malformed("expected '-' after year"));
    }
    let month = cur.digits(2).ok_or_else(|| malformed("expected month"))?;
    if !cur.eat('-') {
        return Err(malformed("expected '-' after month"));
    }
    let day = cur.digits(2).ok_or_else(|| malformed("expected day"))?;
    let date = NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| malformed("no such calendar date"))?;

    let mut hour = 0;
    let mut minute = 0;
    let mut second = 0;
    let mut micro: u32 = 0;
    let mut offset_secs: i64 = 0;

    if !cur.is_empty() {
        if !(cur.eat('T') || cur.eat('t')) && cur.skip_blanks() == 0 {
            return Err(malformed("expected time separator"));
        }
        hour = cur.digits(2).ok_or_else(|| malformed("expected hour"))?;
        if !cur.eat(':') {
            return Err(malformed("expected ':' after hour"));
        }
        minute = cur.digits(2).ok_or_else(|| malformed("expected minute"))?;
        if !cur.eat(':') {
            return Err(malformed("expected ':' after minute"));
        }
        second = cur.digits(2).ok_or_else(|| malformed("expected second"))?;

        if cur.eat('.') {
            let digits = cur.take_digits();
            let kept = &digits[..digits.len().min(6)];
            if !kept.is_empty() {
                micro = kept.parse().map_err(|_| malformed("bad fraction"))?;
                for _ in kept.len()..6 {
                    micro *= 10;
                }
            }
        }

        cur.skip_blanks();
        if !cur.is_empty() {
            if cur.eat('Z') {
                // already UTC
            } else {
                let sign: i64 = if cur.eat('+') {
                    1
                } else if cur.eat('-') {
                    -1
                } else {
                    return Err(malformed("expected zone offset"));
                };
                let zone_hour = cur.digits(2).ok_or_else(|| malformed("expected offset hours"))?;
                let zone_minute = if cur.eat(':') {
                    cur.digits(2).ok_or_else(|| malformed("expected offset minutes"))?
                } else {
                    0
                };
                // The minutes share the hour's sign.
                offset_secs = sign * (i64::from(zone_hour) * 3600 + i64::from(zone_minute) * 60);
            }
        }
        if !cur.is_empty() {
            return Err(malformed("trailing characters"));
        }
    }

    let local = date
        .and_hms_micro_opt(hour, minute, second, micro)
        .ok_or_else(|| malformed("no such time of day"))?;
    let utc = local - Duration::seconds(offset_secs);
    Ok(DateTime::<Utc>::from_naive_utc_and_offset(utc, Utc))
}

/// Renders a UTC instant in the fixed ISO-8601-style form the parser
/// accepts back.
pub fn render(stamp: &DateTime<Utc>) -> String {
    stamp.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}
