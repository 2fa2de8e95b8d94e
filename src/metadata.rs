//! Gravity model inspection and coefficient description
//!
//! This module provides functions for printing a model's header and
//! filename-derived metadata, listing the coefficients of a single degree,
//! and building a JSON summary of a model.

use crate::errors::{GeoidError, Result};
use crate::gravity_model::GravityModel;
use serde_json::{json, Value};

/// Prints header fields, provenance and epoch of a model.
pub fn print_metadata(model: &GravityModel) {
    let header = &model.header;
    let or_dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());

    println!("\n===== Model Header =====");
    println!("- modelname: {}", or_dash(header.modelname.clone()));
    println!(
        "- earth_gravity_constant: {}",
        or_dash(header.earth_gravity_constant.clone())
    );
    println!("- radius: {}", or_dash(header.radius.clone()));
    println!("- max_degree: {}", or_dash(header.max_degree.clone()));
    println!("- errors: {}", or_dash(header.errors.clone()));
    println!("- norm: {}", or_dash(header.norm.clone()));
    println!("- tide_system: {}", or_dash(model.tide_system.clone()));

    println!("\n===== Coefficients =====");
    println!("- source format: {}", model.source_format);
    println!("- truncation degree: {}", model.lmax);
    println!(
        "- matrices: clm, slm{}",
        if model.has_errors() { ", eclm, eslm" } else { "" }
    );

    if let Some(epoch) = &model.epoch {
        println!("\n===== Epoch =====");
        println!("- mid-period: {:.6}", epoch.time);
        println!("- start (JD): {:.1}", epoch.start);
        println!("- end (JD): {:.1}", epoch.end);
    }
}

/// Prints every coefficient of degree `degree`.
pub fn describe_degree(model: &GravityModel, degree: usize) -> Result<()> {
    if degree > model.lmax {
        return Err(GeoidError::Generic(format!(
            "Degree {} exceeds truncation degree {}",
            degree, model.lmax
        )));
    }

    println!("\n Degree {} Coefficients", degree);
    println!("========================");
    for m in 0..=degree {
        let lm = [degree, m];
        match (&model.eclm, &model.eslm) {
            (Some(eclm), Some(eslm)) => println!(
                "   m={:<4} C={:>20.12e} S={:>20.12e}  sC={:.3e} sS={:.3e}",
                m, model.clm[lm], model.slm[lm], eclm[lm], eslm[lm]
            ),
            _ => println!(
                "   m={:<4} C={:>20.12e} S={:>20.12e}",
                m, model.clm[lm], model.slm[lm]
            ),
        }
    }

    Ok(())
}

/// JSON summary of a model's metadata (coefficients excluded)
pub fn model_summary(model: &GravityModel) -> Value {
    let header = &model.header;
    let mut summary = json!({
        "source_format": model.source_format.as_str(),
        "modelname": header.modelname,
        "earth_gravity_constant": header.gravity_constant().ok(),
        "radius": header.reference_radius().ok(),
        "max_degree": model.max_degree(),
        "lmax": model.lmax,
        "errors": header.errors,
        "norm": header.norm,
        "tide_system": model.tide_system,
        "has_errors": model.has_errors(),
        "c20": model.clm.get([2, 0]),
    });

    if let (Some(epoch), Value::Object(map)) = (&model.epoch, &mut summary) {
        map.insert("time".to_string(), json!(epoch.time));
        map.insert("start".to_string(), json!(epoch.start));
        map.insert("end".to_string(), json!(epoch.end));
    }

    summary
}
