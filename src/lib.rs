//! RuGeoid: gravity field models and normalized Legendre polynomials
//!
//! The numerical core of a geoid toolkit. RuGeoid reads spherical-harmonic
//! gravity-field models from ICGEM gfc files into coefficient matrices, and
//! evaluates the fully normalized Legendre polynomials (with derivatives) that
//! spherical-harmonic expansions of those coefficients are built on.
//!
//! ## Key Features
//!
//! - **ICGEM Reader**: header metadata, degree/order truncation and Fortran `D` exponents
//! - **Provider Formats**: GRAZ, SWARM and COST-G filenames decoded into mid-period and Julian dates
//! - **Tide Systems**: conversion of tide-free C(2,0) to the mean-tide or zero-tide system
//! - **Legendre Polynomials**: geodesy-normalized values and colatitude derivatives, any float precision
//! - **Parallel Processing**: evaluation points spread across cores with Rayon
//!
//! ## Module Organization
//!
//! - [`gravity_model`]: gfc reading and writing
//! - [`legendre`]: normalized Legendre polynomials
//! - [`tides`]: tide systems and the C(2,0) tidal offset
//! - [`metadata`]: model inspection
//! - [`parallel`]: parallel processing configuration
//! - [`errors`]: centralized error handling
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use ru_geoid::prelude::*;
//! use ndarray::Array1;
//!
//! // Read a monthly GRAZ solution to degree 60 in the mean-tide system
//! let options = ReadOptions::new().with_lmax(60).with_tide(TideSystem::MeanTide);
//! let model = read_icgem_harmonics("ITSG-Grace2018_n96_2008-05.gfc", &options).unwrap();
//! println!("C20 = {:e}, mid-month = {:?}", model.clm[[2, 0]], model.epoch.map(|e| e.time));
//!
//! // Evaluate the polynomials at a few colatitudes
//! let x: Array1<f64> = [30.0_f64, 60.0, 90.0].iter().map(|t| t.to_radians().cos()).collect();
//! let (pl, dpl) = legendre_polynomials(model.lmax, x.view());
//! assert_eq!(pl.shape(), dpl.shape());
//! ```

// Core modules
pub mod errors;
pub mod gravity_model;
pub mod legendre;
pub mod metadata;
pub mod parallel;
pub mod tides;

// Direct re-exports for the public API
pub use errors::*;
pub use gravity_model::{
    parse_icgem_harmonics, read_icgem_harmonics, read_icgem_harmonics_with, GravityModel,
    ReadOptions,
};
pub use legendre::{legendre_polynomials, legendre_polynomials_in};
pub use tides::{calculate_tidal_offset, TideSystem};

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::errors::{GeoidError, Result};
    pub use crate::gravity_model::{
        read_icgem_harmonics, read_icgem_harmonics_with, FilenameInfo, GfcWriter, GravityModel,
        ModelEpoch, ModelHeader, ReadOptions, SourceFormat,
    };
    pub use crate::legendre::{legendre_polynomials, legendre_polynomials_in};
    pub use crate::parallel::ParallelConfig;
    pub use crate::tides::{PermanentTide, ReferenceEllipsoid, TidalOffset, TideSystem};
}
