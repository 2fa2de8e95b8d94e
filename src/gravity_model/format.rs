//! Source-format classification and filename decomposition
//!
//! GRAZ (`ITSG`), SWARM (`SW_`) and COST-G (`COSTG`) distribute monthly
//! solutions as ICGEM files whose names carry the period they cover. Anything
//! else is read as a plain ICGEM file with no filename-derived dates.

use super::calendar::{day_span_epoch, monthly_epoch, ModelEpoch};
use crate::errors::{GeoidError, Result};
use chrono::{Datelike, NaiveDate};
use nom::branch::alt;
use nom::bytes::complete::{tag, take_till, take_until};
use nom::character::complete::digit1;
use nom::error::{Error, ErrorKind};
use nom::sequence::tuple;
use nom::IResult;
use std::fmt;

/// Provider convention a model file follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Generic ICGEM file
    Icgem,
    /// Institute of Geodesy, Graz University of Technology (ITSG-Grace series)
    Graz,
    /// ESA Swarm EGF_SHA_2 products
    Swarm,
    /// COST-G combined products
    CostG,
}

impl SourceFormat {
    /// Classify a file by its name; the first matching trigger wins
    pub fn classify(file_name: &str) -> Self {
        if file_name.contains("ITSG") {
            Self::Graz
        } else if file_name.contains("SW_") {
            Self::Swarm
        } else if file_name.contains("COSTG") {
            Self::CostG
        } else {
            Self::Icgem
        }
    }

    /// Whether data lines carry standard-error columns
    #[must_use]
    pub const fn has_errors(self) -> bool {
        !matches!(self, Self::Swarm)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Icgem => "ICGEM",
            Self::Graz => "GRAZ",
            Self::Swarm => "SWARM",
            Self::CostG => "COST-G",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Components captured from a provider filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilenameInfo {
    /// e.g. `ITSG-Grace2018_n96_2008-05.gfc`
    Graz {
        prefix: String,
        satellite: String,
        truncation: String,
        year: i32,
        month: u32,
        suffix: String,
    },
    /// e.g. `SW_OPER_EGF_SHA_2__20131201T000000_20131231T235959_0101.gfc`
    Swarm {
        satellite: String,
        tag: String,
        product: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        release: String,
        suffix: String,
    },
    /// e.g. `GSM-2_2002095-2002120_GRAC_COSTG_BF01_0100.gfc`
    CostG {
        prefix: String,
        start_year: i32,
        start_day: u32,
        end_year: i32,
        end_day: u32,
        field: String,
        processing: String,
        flag: String,
        release: String,
        suffix: Option<String>,
    },
}

impl FilenameInfo {
    /// Decompose `file_name` according to `format`
    ///
    /// Returns `Ok(None)` for plain ICGEM files. A file that triggered a
    /// provider format but does not follow its pattern is an error; no other
    /// format is attempted.
    pub fn parse(format: SourceFormat, file_name: &str) -> Result<Option<Self>> {
        let mismatch = || GeoidError::FilenamePattern {
            format: format.to_string(),
            file_name: file_name.to_string(),
        };

        let info = match format {
            SourceFormat::Icgem => return Ok(None),
            SourceFormat::Graz => {
                let (_, (prefix, satellite, truncation, year, month, suffix)) =
                    graz_name(file_name).map_err(|_| mismatch())?;
                let year = year.parse().map_err(|_| mismatch())?;
                let month = month.parse().map_err(|_| mismatch())?;
                validate_month(month, file_name)?;
                Self::Graz {
                    prefix: prefix.to_string(),
                    satellite: satellite.to_string(),
                    truncation: truncation.to_string(),
                    year,
                    month,
                    suffix: suffix.to_string(),
                }
            }
            SourceFormat::Swarm => {
                let (_, (_, satellite, _, kind, _, product, _, start, _, end, _, release, suffix)) =
                    swarm_name(file_name).map_err(|_| mismatch())?;
                Self::Swarm {
                    satellite: satellite.to_string(),
                    tag: kind.to_string(),
                    product: product.to_string(),
                    start_date: parse_compact_date(start)?,
                    end_date: parse_compact_date(end)?,
                    release: release.to_string(),
                    suffix: suffix.to_string(),
                }
            }
            SourceFormat::CostG => {
                let (rest, (prefix, _, start, _, end, _, field, _, processing, _, flag, _, release)) =
                    costg_name(file_name).map_err(|_| mismatch())?;
                let (start_year, start_day) = split_year_day(start).ok_or_else(mismatch)?;
                let (end_year, end_day) = split_year_day(end).ok_or_else(mismatch)?;
                let suffix = [".gz", ".gfc", ".txt"]
                    .iter()
                    .find(|ext| rest.ends_with(*ext))
                    .map(|ext| ext.to_string());
                Self::CostG {
                    prefix: prefix.to_string(),
                    start_year,
                    start_day,
                    end_year,
                    end_day,
                    field: field.to_string(),
                    processing: processing.to_string(),
                    flag: flag.to_string(),
                    release: release.to_string(),
                    suffix,
                }
            }
        };

        Ok(Some(info))
    }

    /// Year and month driving the monthly epoch (GRAZ and SWARM only)
    pub fn year_month(&self) -> Option<(i32, u32)> {
        match self {
            Self::Graz { year, month, .. } => Some((*year, *month)),
            Self::Swarm { start_date, .. } => Some((start_date.year(), start_date.month())),
            Self::CostG { .. } => None,
        }
    }

    /// Mid-period time and Julian start/end dates of the solution
    pub fn epoch(&self) -> ModelEpoch {
        match self {
            Self::Graz { year, month, .. } => monthly_epoch(*year, *month),
            Self::Swarm { start_date, .. } => {
                monthly_epoch(start_date.year(), start_date.month())
            }
            Self::CostG {
                start_year,
                start_day,
                end_year,
                end_day,
                ..
            } => day_span_epoch(*start_year, *start_day, *end_year, *end_day),
        }
    }
}

fn extension(input: &str) -> IResult<&str, &str> {
    alt((tag(".gz"), tag(".gfc"), tag(".txt")))(input)
}

type GrazParts<'a> = (&'a str, &'a str, &'a str, &'a str, &'a str, &'a str);

fn graz_name(input: &str) -> IResult<&str, GrazParts<'_>> {
    let (rest, (prefix, _, satellite, _)) = tuple((
        take_until("-Grace"),
        tag("-"),
        alt((tag("Grace_operational"), tag("Grace2018"))),
        tag("_"),
    ))(input)?;
    let (rest, (truncation, year, month, suffix)) = graz_dated_tail(rest)?;
    Ok((rest, (prefix, satellite, truncation, year, month, suffix)))
}

/// Truncation tag followed by `_YYYY-MM<ext>`
///
/// The tag ends at the first `_` that starts a valid date, so the tag itself
/// may contain underscores.
fn graz_dated_tail(input: &str) -> IResult<&str, (&str, &str, &str, &str)> {
    input
        .match_indices('_')
        .find_map(|(split, _)| {
            let date: IResult<&str, _> =
                tuple((tag("_"), digit1, tag("-"), digit1, extension))(&input[split..]);
            date.ok()
                .map(|(rest, (_, year, _, month, suffix))| (rest, (&input[..split], year, month, suffix)))
        })
        .ok_or_else(|| nom::Err::Error(Error::new(input, ErrorKind::TakeUntil)))
}

type Parts13<'a> = (
    &'a str,
    &'a str,
    &'a str,
    &'a str,
    &'a str,
    &'a str,
    &'a str,
    &'a str,
    &'a str,
    &'a str,
    &'a str,
    &'a str,
    &'a str,
);

fn swarm_name(input: &str) -> IResult<&str, Parts13<'_>> {
    tuple((
        take_until("SW_"),
        tag("SW"),
        tag("_"),
        take_until("_EGF_SHA_2__"),
        tag("_"),
        tag("EGF_SHA_2"),
        tag("__"),
        take_until("_"),
        tag("_"),
        take_until("_"),
        tag("_"),
        take_till(|c: char| c == '.'),
        extension,
    ))(input)
}

fn costg_name(input: &str) -> IResult<&str, Parts13<'_>> {
    tuple((
        take_until("-2_"),
        tag("-2_"),
        digit1,
        tag("-"),
        digit1,
        tag("_"),
        take_until("_COSTG_"),
        tag("_"),
        tag("COSTG"),
        tag("_"),
        take_until("_"),
        tag("_"),
        digit1,
    ))(input)
}

/// `YYYYDDD` into (year, day-of-year)
fn split_year_day(code: &str) -> Option<(i32, u32)> {
    if code.len() < 5 {
        return None;
    }
    let (year, day) = code.split_at(4);
    Some((year.parse().ok()?, day.parse().ok()?))
}

/// First eight characters of a SWARM timestamp (`YYYYMMDD...`) as a date
fn parse_compact_date(value: &str) -> Result<NaiveDate> {
    value
        .get(..8)
        .and_then(|digits| NaiveDate::parse_from_str(digits, "%Y%m%d").ok())
        .ok_or_else(|| GeoidError::InvalidDate {
            value: value.to_string(),
        })
}

fn validate_month(month: u32, file_name: &str) -> Result<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(GeoidError::InvalidDate {
            value: file_name.to_string(),
        })
    }
}
