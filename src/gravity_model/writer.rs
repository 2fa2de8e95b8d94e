//! Writing gravity models as ICGEM gfc files

use super::GravityModel;
use crate::errors::Result;
use chrono::Utc;
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writer for models in the ICGEM gfc layout
///
/// The declared `max_degree` is the model's truncation degree, so a truncated
/// model reads back with the same shape. Models without error matrices are
/// written with five fields per data line.
pub struct GfcWriter<'a> {
    model: &'a GravityModel,
    flag: &'a str,
}

impl<'a> GfcWriter<'a> {
    /// Create a new writer using the `gfc` data marker
    pub fn new(model: &'a GravityModel) -> Self {
        Self { model, flag: "gfc" }
    }

    /// Use a different data marker
    pub fn with_flag(mut self, flag: &'a str) -> Self {
        self.flag = flag;
        self
    }

    /// Write the model to `output_path`, replacing any existing file
    pub fn write(&self, output_path: &Path) -> Result<()> {
        let mut out = BufWriter::new(File::create(output_path)?);
        self.write_to(&mut out)?;
        out.flush()?;
        debug!("Wrote degree {} model to {}", self.model.lmax, output_path.display());
        Ok(())
    }

    /// Write the model to any byte sink
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let model = self.model;
        let header = &model.header;

        writeln!(
            out,
            "generated by ru_geoid {} on {}",
            env!("CARGO_PKG_VERSION"),
            Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
        )?;
        writeln!(out)?;
        writeln!(out, "begin_of_head ==================================================")?;
        writeln!(out, "{:<25}{}", "product_type", "gravity_field")?;
        if let Some(name) = &header.modelname {
            writeln!(out, "{:<25}{}", "modelname", name)?;
        }
        if let Some(gm) = &header.earth_gravity_constant {
            writeln!(out, "{:<25}{}", "earth_gravity_constant", gm)?;
        }
        if let Some(radius) = &header.radius {
            writeln!(out, "{:<25}{}", "radius", radius)?;
        }
        writeln!(out, "{:<25}{}", "max_degree", model.lmax)?;
        if let Some(errors) = &header.errors {
            writeln!(out, "{:<25}{}", "errors", errors)?;
        }
        if let Some(norm) = &header.norm {
            writeln!(out, "{:<25}{}", "norm", norm)?;
        }
        if let Some(tide) = &model.tide_system {
            writeln!(out, "{:<25}{}", "tide_system", tide)?;
        }
        writeln!(out)?;
        if model.has_errors() {
            writeln!(out, "key   L    M         C                   S               sigma C             sigma S")?;
        } else {
            writeln!(out, "key   L    M         C                   S")?;
        }
        writeln!(out, "end_of_head ====================================================")?;

        for l in 0..=model.lmax {
            for m in 0..=l {
                write!(
                    out,
                    "{} {:>5} {:>5} {:>20.12e} {:>20.12e}",
                    self.flag,
                    l,
                    m,
                    model.clm[[l, m]],
                    model.slm[[l, m]]
                )?;
                if let (Some(eclm), Some(eslm)) = (&model.eclm, &model.eslm) {
                    write!(out, " {:>20.12e} {:>20.12e}", eclm[[l, m]], eslm[[l, m]])?;
                }
                writeln!(out)?;
            }
        }

        Ok(())
    }
}
