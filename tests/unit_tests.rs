//! Unit tests for RuGeoid modules
//!
//! Covers error formatting, parallel configuration, tide systems, filename
//! decomposition, calendar arithmetic and the Legendre recurrence.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use ndarray::{array, Array1};
use ru_geoid::{
    errors::GeoidError,
    gravity_model::{
        calendar::{day_span_epoch, julian_day, month_day_range, monthly_epoch},
        FilenameInfo, SourceFormat,
    },
    legendre::{legendre_polynomials, legendre_polynomials_in},
    parallel::{get_parallel_info, ParallelConfig},
    tides::{calculate_tidal_offset, ReferenceEllipsoid, TideSystem},
};

const GM: f64 = 3.986_004_415e14;
const RADIUS: f64 = 6_378_136.3;

#[test]
fn test_error_types() {
    let missing = GeoidError::MissingHeader {
        key: "max_degree".to_string(),
    };
    assert!(format!("{}", missing).contains("'max_degree' not found"));

    let pattern = GeoidError::FilenamePattern {
        format: "GRAZ".to_string(),
        file_name: "ITSG-broken.gfc".to_string(),
    };
    assert!(format!("{}", pattern).contains("GRAZ naming pattern"));

    let parse = GeoidError::Parse {
        line: 12,
        field: "C".to_string(),
        value: "abc".to_string(),
    };
    assert_eq!(format!("{}", parse), "Line 12: invalid C value 'abc'");

    let generic = GeoidError::Generic("Test error".to_string());
    assert_eq!(format!("{}", generic), "Test error");
}

#[test]
fn test_parallel_config() {
    let default_config = ParallelConfig::default();
    assert!(default_config.num_threads.is_none());
    assert_eq!(ParallelConfig::new(None), default_config);

    let config_4 = ParallelConfig::with_threads(4);
    assert_eq!(config_4.num_threads, Some(4));

    let all_cores_config = ParallelConfig::all_cores();
    assert!(all_cores_config.num_threads.unwrap() > 0);

    // a scoped pool has exactly the requested size
    let threads = config_4.install(rayon::current_num_threads).unwrap();
    assert_eq!(threads, 4);
    let answer = default_config.install(|| 6 * 7).unwrap();
    assert_eq!(answer, 42);
}

#[test]
fn test_parallel_info() {
    let info = get_parallel_info();
    assert!(info.current_threads > 0);
    assert!(info.available_cores > 0);
    assert!(info.available_parallelism > 0);

    info.log();
}

#[test]
fn test_tide_system_parsing() {
    assert_eq!("tide_free".parse::<TideSystem>().unwrap(), TideSystem::TideFree);
    assert_eq!("mean_tide".parse::<TideSystem>().unwrap(), TideSystem::MeanTide);
    assert_eq!("zero_tide".parse::<TideSystem>().unwrap(), TideSystem::ZeroTide);
    assert!(matches!(
        "no_tide".parse::<TideSystem>(),
        Err(GeoidError::UnknownTideSystem(name)) if name == "no_tide"
    ));

    assert_eq!(TideSystem::default(), TideSystem::TideFree);
    assert_eq!(TideSystem::ZeroTide.to_string(), "zero_tide");
    assert!(!TideSystem::TideFree.requires_correction());
    assert!(TideSystem::MeanTide.requires_correction());
}

#[test]
fn test_reference_ellipsoid_parsing() {
    assert_eq!("WGS84".parse::<ReferenceEllipsoid>().unwrap(), ReferenceEllipsoid::Wgs84);
    assert_eq!("grs80".parse::<ReferenceEllipsoid>().unwrap(), ReferenceEllipsoid::Grs80);
    assert!("Bessel".parse::<ReferenceEllipsoid>().is_err());
    assert_eq!(ReferenceEllipsoid::default().as_str(), "WGS84");
}

#[test]
fn test_tidal_offset_magnitudes() {
    let wgs84 = ReferenceEllipsoid::Wgs84;
    assert_eq!(calculate_tidal_offset(TideSystem::TideFree, GM, RADIUS, wgs84), 0.0);

    // zero tide minus tide free C20 is about -4.2e-9 (IERS Conventions)
    let zero = calculate_tidal_offset(TideSystem::ZeroTide, GM, RADIUS, wgs84);
    assert!(zero < -4.0e-9 && zero > -4.3e-9, "zero tide offset {zero}");

    let mean = calculate_tidal_offset(TideSystem::MeanTide, GM, RADIUS, wgs84);
    assert_relative_eq!(mean / zero, 1.3 / 0.3, max_relative = 1e-12);
}

#[test]
fn test_source_format_classification() {
    assert_eq!(SourceFormat::classify("ITSG-Grace2018_n96_2008-05.gfc"), SourceFormat::Graz);
    assert_eq!(
        SourceFormat::classify("SW_OPER_EGF_SHA_2__20131201T000000_20131231T235959_0101.gfc"),
        SourceFormat::Swarm
    );
    assert_eq!(
        SourceFormat::classify("GSM-2_2002095-2002120_GRAC_COSTG_BF01_0100.gfc"),
        SourceFormat::CostG
    );
    assert_eq!(SourceFormat::classify("EIGEN-6C4.gfc"), SourceFormat::Icgem);

    // first trigger wins
    assert_eq!(SourceFormat::classify("ITSG_COSTG.gfc"), SourceFormat::Graz);

    assert!(SourceFormat::Graz.has_errors());
    assert!(!SourceFormat::Swarm.has_errors());
}

#[test]
fn test_graz_filename() {
    let info = FilenameInfo::parse(SourceFormat::Graz, "ITSG-Grace2018_n96_2008-05.gfc")
        .unwrap()
        .unwrap();
    match &info {
        FilenameInfo::Graz {
            prefix,
            satellite,
            truncation,
            year,
            month,
            suffix,
        } => {
            assert_eq!(prefix, "ITSG");
            assert_eq!(satellite, "Grace2018");
            assert_eq!(truncation, "n96");
            assert_eq!(*year, 2008);
            assert_eq!(*month, 5);
            assert_eq!(suffix, ".gfc");
        }
        other => panic!("Expected GRAZ filename info, got {:?}", other),
    }
    assert_eq!(info.year_month(), Some((2008, 5)));

    let operational =
        FilenameInfo::parse(SourceFormat::Graz, "ITSG-Grace_operational_n60_2019-02.gfc")
            .unwrap()
            .unwrap();
    assert_eq!(operational.year_month(), Some((2019, 2)));

    // the truncation tag runs up to the date and may contain underscores
    let info = FilenameInfo::parse(SourceFormat::Graz, "ITSG-Grace2018_n96_daily_2016-11.gfc.gz")
        .unwrap()
        .unwrap();
    match info {
        FilenameInfo::Graz {
            truncation,
            year,
            month,
            suffix,
            ..
        } => {
            assert_eq!(truncation, "n96_daily");
            assert_eq!((year, month), (2016, 11));
            assert_eq!(suffix, ".gfc");
        }
        other => panic!("Expected GRAZ filename info, got {:?}", other),
    }
}

#[test]
fn test_swarm_filename() {
    let info = FilenameInfo::parse(
        SourceFormat::Swarm,
        "SW_OPER_EGF_SHA_2__20131201T000000_20131231T235959_0101.gfc",
    )
    .unwrap()
    .unwrap();
    match info {
        FilenameInfo::Swarm {
            satellite,
            tag,
            product,
            start_date,
            end_date,
            release,
            suffix,
        } => {
            assert_eq!(satellite, "SW");
            assert_eq!(tag, "OPER");
            assert_eq!(product, "EGF_SHA_2");
            assert_eq!(start_date, NaiveDate::from_ymd_opt(2013, 12, 1).unwrap());
            assert_eq!(end_date, NaiveDate::from_ymd_opt(2013, 12, 31).unwrap());
            assert_eq!(release, "0101");
            assert_eq!(suffix, ".gfc");
        }
        other => panic!("Expected SWARM filename info, got {:?}", other),
    }
}

#[test]
fn test_costg_filename() {
    let info = FilenameInfo::parse(
        SourceFormat::CostG,
        "GSM-2_2002095-2002120_GRAC_COSTG_BF01_0100.gfc",
    )
    .unwrap()
    .unwrap();
    match info {
        FilenameInfo::CostG {
            prefix,
            start_year,
            start_day,
            end_year,
            end_day,
            field,
            processing,
            flag,
            release,
            suffix,
        } => {
            assert_eq!(prefix, "GSM");
            assert_eq!((start_year, start_day), (2002, 95));
            assert_eq!((end_year, end_day), (2002, 120));
            assert_eq!(field, "GRAC");
            assert_eq!(processing, "COSTG");
            assert_eq!(flag, "BF01");
            assert_eq!(release, "0100");
            assert_eq!(suffix.as_deref(), Some(".gfc"));
        }
        other => panic!("Expected COST-G filename info, got {:?}", other),
    }

    let bare = FilenameInfo::parse(SourceFormat::CostG, "GSM-2_2002095-2002120_GRAC_COSTG_BF01_0100")
        .unwrap()
        .unwrap();
    assert!(matches!(bare, FilenameInfo::CostG { suffix: None, .. }));
}

#[test]
fn test_generic_and_mismatched_filenames() {
    assert!(FilenameInfo::parse(SourceFormat::Icgem, "EGM2008.gfc").unwrap().is_none());

    let result = FilenameInfo::parse(SourceFormat::Graz, "ITSG-unknown-series.gfc");
    assert!(matches!(result, Err(GeoidError::FilenamePattern { .. })));

    let result = FilenameInfo::parse(SourceFormat::Swarm, "SW_OPER_EGF_SHA_2__2013_x_0101.gfc");
    assert!(matches!(result, Err(GeoidError::InvalidDate { .. })));

    let result = FilenameInfo::parse(SourceFormat::Graz, "ITSG-Grace2018_n96_2008-13.gfc");
    assert!(matches!(result, Err(GeoidError::InvalidDate { .. })));
}

#[test]
fn test_month_day_ranges() {
    // non-leap year: Jan..Apr = 120 days
    assert_eq!(month_day_range(2009, 5), (121, 151));
    // leap year
    assert_eq!(month_day_range(2008, 5), (122, 152));
    assert_eq!(month_day_range(2009, 1), (1, 31));
    assert_eq!(month_day_range(2008, 12), (336, 366));
}

#[test]
fn test_julian_day() {
    // 2009-05-01 00:00
    assert_eq!(julian_day(2009.0, 121.0), 2_454_952.5);
    // 2004-01-15 00:00
    assert_eq!(julian_day(2004.0, 15.0), 2_453_019.5);
}

#[test]
fn test_monthly_epoch() {
    let epoch = monthly_epoch(2009, 5);
    assert_relative_eq!(epoch.time, 2009.0 + 136.0 / 365.0, max_relative = 1e-15);
    assert_eq!(epoch.end - epoch.start, 30.0);

    let leap = monthly_epoch(2008, 5);
    assert_relative_eq!(leap.time, 2008.0 + 137.0 / 366.0, max_relative = 1e-15);
}

#[test]
fn test_day_span_epoch_across_year_boundary() {
    let within = day_span_epoch(2002, 95, 2002, 120);
    assert_relative_eq!(within.time, 2002.0 + 107.5 / 365.0, max_relative = 1e-15);

    let across = day_span_epoch(2003, 350, 2004, 15);
    // mid-point of day 350 and day 365 + 15
    assert_relative_eq!(across.time, 2004.0, max_relative = 1e-15);
    // Julian dates use the literal (year, day) pairs
    assert_eq!(across.start, julian_day(2003.0, 350.0));
    assert_eq!(across.end, julian_day(2004.0, 15.0));
    assert_eq!(across.end - across.start, 30.0);
}

#[test]
fn test_legendre_low_degrees() {
    let x = array![-0.9_f64, -0.3, 0.0, 0.45, 0.8];
    let (pl, dpl) = legendre_polynomials(6, x.view());

    assert_eq!(pl.shape(), &[7, 5]);
    assert_eq!(dpl.shape(), &[7, 5]);
    for (j, &xj) in x.iter().enumerate() {
        assert_eq!(pl[[0, j]], 1.0);
        assert_eq!(pl[[1, j]], 3.0_f64.sqrt() * xj);
        assert_eq!(dpl[[0, j]], 0.0);
        let p2 = 5.0_f64.sqrt() * (3.0 * xj * xj - 1.0) / 2.0;
        assert_relative_eq!(pl[[2, j]], p2, epsilon = 1e-14);
    }
}

#[test]
fn test_legendre_shapes() {
    let x = array![0.1_f64, 0.2, 0.3];
    let (pl, dpl) = legendre_polynomials(0, x.view());
    assert_eq!(pl.shape(), &[1, 3]);
    assert!(pl.iter().all(|&v| v == 1.0));
    assert!(dpl.iter().all(|&v| v == 0.0));

    let empty: Array1<f64> = Array1::zeros(0);
    let (pl, dpl) = legendre_polynomials(10, empty.view());
    assert_eq!(pl.shape(), &[11, 0]);
    assert_eq!(dpl.shape(), &[11, 0]);
}

#[test]
fn test_legendre_orthonormality() {
    // midpoint rule over (-1, 1)
    let n = 20_000;
    let dx = 2.0 / n as f64;
    let x: Array1<f64> = (0..n).map(|i| -1.0 + (i as f64 + 0.5) * dx).collect();
    let lmax = 8;
    let (pl, _) = legendre_polynomials(lmax, x.view());

    for l in 0..=lmax {
        for k in 0..=lmax {
            let integral = (&pl.row(l) * &pl.row(k)).sum() * dx;
            let expected = if l == k { 2.0 } else { 0.0 };
            assert!(
                (integral - expected).abs() < 1e-4,
                "l={l} k={k} integral={integral}"
            );
        }
    }
}

#[test]
fn test_legendre_derivative_is_colatitude_derivative() {
    let theta = 0.7_f64;
    let h = 1e-6;
    let x = array![theta.cos(), (theta + h).cos(), (theta - h).cos()];
    let (pl, dpl) = legendre_polynomials(12, x.view());

    for l in 0..=12 {
        let numeric = (pl[[l, 1]] - pl[[l, 2]]) / (2.0 * h);
        assert!(
            (dpl[[l, 0]] - numeric).abs() < 1e-6,
            "l={l} analytic={} numeric={numeric}",
            dpl[[l, 0]]
        );
    }
}

#[test]
fn test_legendre_single_precision() {
    let x32 = array![0.25_f32, -0.6];
    let x64 = x32.mapv(f64::from);
    let (pl32, dpl32) = legendre_polynomials(20, x32.view());
    let (pl64, dpl64) = legendre_polynomials(20, x64.view());

    for l in 0..=20 {
        for j in 0..2 {
            assert!((f64::from(pl32[[l, j]]) - pl64[[l, j]]).abs() < 1e-4);
            assert!((f64::from(dpl32[[l, j]]) - dpl64[[l, j]]).abs() < 1e-2);
        }
    }
}

#[test]
fn test_legendre_poles_have_non_finite_derivatives() {
    let x = array![1.0_f64, -1.0];
    let (pl, dpl) = legendre_polynomials(4, x.view());

    // values are fine at the poles
    assert_relative_eq!(pl[[4, 0]], 3.0, epsilon = 1e-14);
    assert_relative_eq!(pl[[3, 1]], -(7.0_f64.sqrt()), epsilon = 1e-14);
    for l in 1..=4 {
        assert!(!dpl[[l, 0]].is_finite());
        assert!(!dpl[[l, 1]].is_finite());
    }
}

#[test]
fn test_legendre_thread_count_does_not_change_output() {
    let lmax = 300;
    let x: Array1<f64> = Array1::linspace(0.5_f64, 179.5, 5001).mapv(|t| t.to_radians().cos());

    let (pl_seq, dpl_seq) = legendre_polynomials_in(&ParallelConfig::with_threads(1), lmax, x.view()).unwrap();
    let (pl_par, dpl_par) = legendre_polynomials_in(&ParallelConfig::with_threads(4), lmax, x.view()).unwrap();

    assert_eq!(pl_seq, pl_par);
    assert_eq!(dpl_seq, dpl_par);
    assert_eq!(pl_seq, legendre_polynomials(lmax, x.view()).0);
}
