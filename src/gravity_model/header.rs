//! Header of an ICGEM gfc file
//!
//! Values are kept as the text found in the file. Numeric keys are only
//! converted when a read actually needs them, so a header value nobody asks
//! for never fails a read.

use crate::errors::{GeoidError, Result};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Keywords that mark a header line
pub const HEADER_KEYWORDS: [&str; 7] = [
    "modelname",
    "earth_gravity_constant",
    "radius",
    "max_degree",
    "errors",
    "norm",
    "tide_system",
];

/// Model metadata declared in the file header
///
/// Every field is optional because ICGEM files are not required to carry all
/// keywords. Accessors that need a value return [`GeoidError::MissingHeader`]
/// when it is absent and [`GeoidError::Parse`], with the header line number,
/// when it is not a number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelHeader {
    pub modelname: Option<String>,
    pub earth_gravity_constant: Option<String>,
    pub radius: Option<String>,
    pub max_degree: Option<String>,
    pub errors: Option<String>,
    pub norm: Option<String>,
    pub tide_system: Option<String>,
    /// 1-based line of the last occurrence of each keyword
    lines: BTreeMap<&'static str, usize>,
}

impl ModelHeader {
    /// Parse every header line of a gfc file
    ///
    /// A line is a header line when it starts with one of [`HEADER_KEYWORDS`];
    /// its second whitespace-separated token is the value. Later occurrences
    /// of a keyword overwrite earlier ones.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut header = Self::default();
        for (index, line) in contents.lines().enumerate() {
            let Some(keyword) = HEADER_KEYWORDS.iter().find(|k| line.starts_with(*k)) else {
                continue;
            };
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let value = *tokens.get(1).ok_or(GeoidError::MalformedLine {
                line: index + 1,
                expected: 2,
                found: tokens.len(),
            })?;
            *header.slot(keyword) = Some(value.to_string());
            header.lines.insert(*keyword, index + 1);
        }
        Ok(header)
    }

    // keyword is always one of HEADER_KEYWORDS
    fn slot(&mut self, keyword: &str) -> &mut Option<String> {
        match keyword {
            "modelname" => &mut self.modelname,
            "earth_gravity_constant" => &mut self.earth_gravity_constant,
            "radius" => &mut self.radius,
            "max_degree" => &mut self.max_degree,
            "errors" => &mut self.errors,
            "norm" => &mut self.norm,
            _ => &mut self.tide_system,
        }
    }

    /// Gravity constant GM in m³/s²
    pub fn gravity_constant(&self) -> Result<f64> {
        self.numeric("earth_gravity_constant", self.earth_gravity_constant.as_deref(), fortran_float)
    }

    /// Reference radius in meters
    pub fn reference_radius(&self) -> Result<f64> {
        self.numeric("radius", self.radius.as_deref(), fortran_float)
    }

    /// Maximum degree declared by the model
    pub fn declared_max_degree(&self) -> Result<usize> {
        self.numeric("max_degree", self.max_degree.as_deref(), |v| usize::from_str(v).ok())
    }

    fn numeric<T>(
        &self,
        key: &'static str,
        value: Option<&str>,
        convert: impl Fn(&str) -> Option<T>,
    ) -> Result<T> {
        let value = value.ok_or_else(|| GeoidError::MissingHeader {
            key: key.to_string(),
        })?;
        convert(value).ok_or_else(|| GeoidError::Parse {
            line: self.lines.get(key).copied().unwrap_or_default(),
            field: key.to_string(),
            value: value.to_string(),
        })
    }
}

/// Parse a float that may use a Fortran `d`/`D` exponent marker
pub(crate) fn fortran_float(value: &str) -> Option<f64> {
    value.replace(|c: char| c == 'd' || c == 'D', "e").parse().ok()
}
