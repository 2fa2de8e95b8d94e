//! Reading spherical-harmonic gravity models from ICGEM gfc files
//!
//! Supports the generic format of the International Centre for Global Earth
//! Models (ICGEM) and the monthly solutions distributed by GRAZ, SWARM and
//! COST-G, whose filenames carry the period each solution covers.
//!
//! # Organization
//!
//! - [`format`]: provider classification and filename decomposition
//! - [`calendar`]: mid-period time and Julian dates from filename dates
//! - [`header`]: typed header parsing
//! - [`writer`]: writing models back to gfc files

pub mod calendar;
pub mod format;
pub mod header;
pub mod writer;

pub use calendar::ModelEpoch;
pub use format::{FilenameInfo, SourceFormat};
pub use header::{ModelHeader, HEADER_KEYWORDS};
pub use writer::GfcWriter;

use crate::errors::{GeoidError, Result};
use crate::tides::{PermanentTide, ReferenceEllipsoid, TidalOffset, TideSystem};
use header::fortran_float;
use log::{debug, warn};
use ndarray::Array2;
use std::fs;
use std::path::Path;

/// Options controlling how a model file is read
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Truncation degree; defaults to the header's `max_degree`
    pub lmax: Option<usize>,
    /// Tide system of the returned coefficients
    pub tide: TideSystem,
    /// Token marking data lines
    pub flag: String,
    /// Ellipsoid handed to the tidal offset model
    pub ellipsoid: ReferenceEllipsoid,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            lmax: None,
            tide: TideSystem::TideFree,
            flag: "gfc".to_string(),
            ellipsoid: ReferenceEllipsoid::Wgs84,
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lmax(mut self, lmax: usize) -> Self {
        self.lmax = Some(lmax);
        self
    }

    pub fn with_tide(mut self, tide: TideSystem) -> Self {
        self.tide = tide;
        self
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = flag.into();
        self
    }

    pub fn with_ellipsoid(mut self, ellipsoid: ReferenceEllipsoid) -> Self {
        self.ellipsoid = ellipsoid;
        self
    }
}

/// A gravity model read from a gfc file
///
/// Coefficient matrices are `(lmax + 1) × (lmax + 1)`, indexed `[l, m]`, with
/// only the lower triangle (`m <= l`) populated.
#[derive(Debug, Clone)]
pub struct GravityModel {
    pub source_format: SourceFormat,
    pub filename_info: Option<FilenameInfo>,
    pub header: ModelHeader,
    /// Truncation degree of the coefficient matrices
    pub lmax: usize,
    /// Tide system of the returned coefficients
    pub tide_system: Option<String>,
    pub clm: Array2<f64>,
    pub slm: Array2<f64>,
    /// Standard deviations of `clm`; absent for SWARM
    pub eclm: Option<Array2<f64>>,
    /// Standard deviations of `slm`; absent for SWARM
    pub eslm: Option<Array2<f64>>,
    /// Filename-derived dates; present for GRAZ, SWARM and COST-G
    pub epoch: Option<ModelEpoch>,
}

impl GravityModel {
    pub fn modelname(&self) -> Option<&str> {
        self.header.modelname.as_deref()
    }

    /// Maximum degree declared in the header, if it is an integer
    pub fn max_degree(&self) -> Option<usize> {
        self.header.declared_max_degree().ok()
    }

    pub fn has_errors(&self) -> bool {
        self.eclm.is_some() && self.eslm.is_some()
    }
}

/// Read a gravity model file, converting tide systems with [`PermanentTide`]
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The filename triggers GRAZ, SWARM or COST-G but does not follow its pattern
/// - `max_degree` is absent or not an integer and no truncation degree was given
/// - GM or the radius is absent or not a number and a tide conversion was requested
/// - A data line is short or holds an unparseable number
pub fn read_icgem_harmonics<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<GravityModel> {
    read_icgem_harmonics_with(path, options, &PermanentTide::default())
}

/// Read a gravity model file with a caller-supplied tidal offset model
pub fn read_icgem_harmonics_with<P, O>(path: P, options: &ReadOptions, offset: &O) -> Result<GravityModel>
where
    P: AsRef<Path>,
    O: TidalOffset + ?Sized,
{
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    // classify before touching the file so bad names fail fast
    let source_format = SourceFormat::classify(&file_name);
    let filename_info = FilenameInfo::parse(source_format, &file_name)?;

    let contents = fs::read_to_string(path)?;
    debug!(
        "Read {} bytes from {} ({} format)",
        contents.len(),
        path.display(),
        source_format
    );

    build_model(source_format, filename_info, &contents, options, offset)
}

/// Parse a gravity model from in-memory contents
///
/// `file_name` is only used to classify the provider format and extract
/// filename dates.
pub fn parse_icgem_harmonics<O>(
    file_name: &str,
    contents: &str,
    options: &ReadOptions,
    offset: &O,
) -> Result<GravityModel>
where
    O: TidalOffset + ?Sized,
{
    let source_format = SourceFormat::classify(file_name);
    let filename_info = FilenameInfo::parse(source_format, file_name)?;
    build_model(source_format, filename_info, contents, options, offset)
}

fn build_model<O>(
    source_format: SourceFormat,
    filename_info: Option<FilenameInfo>,
    contents: &str,
    options: &ReadOptions,
    offset: &O,
) -> Result<GravityModel>
where
    O: TidalOffset + ?Sized,
{
    let epoch = filename_info.as_ref().map(FilenameInfo::epoch);
    let header = ModelHeader::parse(contents)?;

    let lmax = match options.lmax {
        Some(lmax) => lmax,
        None => header.declared_max_degree()?,
    };

    let with_errors = source_format.has_errors();
    let mut clm = Array2::<f64>::zeros((lmax + 1, lmax + 1));
    let mut slm = Array2::<f64>::zeros((lmax + 1, lmax + 1));
    let mut errors = with_errors.then(|| {
        (
            Array2::<f64>::zeros((lmax + 1, lmax + 1)),
            Array2::<f64>::zeros((lmax + 1, lmax + 1)),
        )
    });

    let expected = if with_errors { 7 } else { 5 };
    let mut stored = 0_usize;
    for (index, line) in contents.lines().enumerate() {
        if !line.starts_with(options.flag.as_str()) {
            continue;
        }
        let record = DataLine::parse(line, index + 1, expected)?;
        // upper triangle stays zero
        if record.degree > lmax || record.order > record.degree {
            continue;
        }
        let lm = [record.degree, record.order];
        clm[lm] = record.values[0];
        slm[lm] = record.values[1];
        if let Some((eclm, eslm)) = errors.as_mut() {
            eclm[lm] = record.values[2];
            eslm[lm] = record.values[3];
        }
        stored += 1;
    }
    debug!("Stored {} coefficients up to degree {}", stored, lmax);

    let mut tide_system = header.tide_system.clone();
    if options.tide.requires_correction() {
        if lmax < 2 {
            warn!(
                "Truncation degree {} has no C20 term; {} correction skipped",
                lmax, options.tide
            );
        } else {
            let gm = header.gravity_constant()?;
            let radius = header.reference_radius()?;
            let delta = offset.c20_offset(options.tide, gm, radius, options.ellipsoid);
            clm[[2, 0]] += delta;
            tide_system = Some(options.tide.as_str().to_string());
            debug!("Applied {} offset {:e} to C20", options.tide, delta);
        }
    }

    let (eclm, eslm) = match errors {
        Some((eclm, eslm)) => (Some(eclm), Some(eslm)),
        None => (None, None),
    };

    Ok(GravityModel {
        source_format,
        filename_info,
        header,
        lmax,
        tide_system,
        clm,
        slm,
        eclm,
        eslm,
        epoch,
    })
}

/// One parsed coefficient line
struct DataLine {
    degree: usize,
    order: usize,
    /// C, S and, when present, their standard deviations
    values: [f64; 4],
}

impl DataLine {
    fn parse(line: &str, line_no: usize, expected: usize) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < expected {
            return Err(GeoidError::MalformedLine {
                line: line_no,
                expected,
                found: fields.len(),
            });
        }

        let invalid = |field: &str, value: &str| GeoidError::Parse {
            line: line_no,
            field: field.to_string(),
            value: value.to_string(),
        };

        let degree = fields[1].parse().map_err(|_| invalid("degree", fields[1]))?;
        let order = fields[2].parse().map_err(|_| invalid("order", fields[2]))?;

        const NAMES: [&str; 4] = ["C", "S", "sigma C", "sigma S"];
        let mut values = [0.0; 4];
        for (i, value) in values.iter_mut().enumerate().take(expected - 3) {
            let token = fields[i + 3];
            *value = fortran_float(token).ok_or_else(|| invalid(NAMES[i], token))?;
        }

        Ok(Self {
            degree,
            order,
            values,
        })
    }
}
