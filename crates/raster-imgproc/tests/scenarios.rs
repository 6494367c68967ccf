use rand::{rngs::StdRng, Rng, SeedableRng};

use raster_image::{Image, ImageSize, ImageStore, Pixel};
use raster_imgproc::{
    histogram::{compute_histogram, Channel},
    registry::{Registry, TransformKind, TransformParams},
    split::SplitPercentage,
    TransformError,
};

fn uniform(pixel: Pixel) -> Result<Image, TransformError> {
    Ok(Image::from_size_val(
        ImageSize {
            width: 3,
            height: 3,
        },
        pixel,
    )?)
}

fn random_image(rng: &mut StdRng, size: ImageSize) -> Result<Image, TransformError> {
    Ok(Image::from_fn(size, |_, _| {
        Pixel::with_alpha(
            rng.random_range(0..256),
            rng.random_range(0..256),
            rng.random_range(0..256),
            rng.random_range(0..256),
        )
    })?)
}

fn split_params(kind: TransformKind, split: SplitPercentage) -> TransformParams {
    match kind {
        TransformKind::LevelsAdjust => TransformParams::Levels {
            black: 20,
            mid: 100,
            white: 255,
            split,
        },
        _ => TransformParams::Split(split),
    }
}

#[test]
fn canonical_fixture_histogram_peaks() -> Result<(), TransformError> {
    let src = uniform(Pixel::new(150, 220, 40))?;
    let hist = compute_histogram(&src);
    assert_eq!(hist.peaks(), [150, 220, 40]);
    assert_eq!(hist.channel(Channel::Red)[150], 9);
    Ok(())
}

#[test]
fn canonical_fixture_color_correct() -> Result<(), TransformError> {
    let registry = Registry::new();

    // the fixture as decoded from its stored file
    let src = uniform(Pixel::new(151, 220, 41))?;
    let out = registry.invoke("color-correct", &[&src], TransformParams::None)?;
    assert!(out.as_slice().iter().all(|p| p.rgb() == [137, 137, 137]));

    let src = uniform(Pixel::new(150, 220, 40))?;
    let out = registry.invoke("color-correct", &[&src], TransformParams::None)?;
    assert!(out.as_slice().iter().all(|p| p.rgb() == [136, 136, 136]));
    Ok(())
}

#[test]
fn canonical_fixture_levels_adjust() -> Result<(), TransformError> {
    let registry = Registry::new();
    let params = TransformParams::Levels {
        black: 20,
        mid: 100,
        white: 255,
        split: SplitPercentage::FULL,
    };

    let src = uniform(Pixel::new(151, 220, 41))?;
    let out = registry.invoke("levels-adjust", &[&src], params)?;
    assert!(out.as_slice().iter().all(|p| p.rgb() == [187, 240, 38]));

    let src = uniform(Pixel::new(150, 220, 40))?;
    let out = registry.invoke("levels-adjust", &[&src], params)?;
    assert!(out.as_slice().iter().all(|p| p.rgb() == [186, 240, 36]));
    Ok(())
}

#[test]
fn compress_rejection_leaves_store_untouched() -> Result<(), TransformError> {
    let mut store = ImageStore::new();
    store.insert("fixture", uniform(Pixel::new(150, 220, 40))?);
    let registry = Registry::new();

    for percentage in [100.0, 0.0, -1.0, 250.0] {
        let res = registry.run(
            &mut store,
            "compress",
            &["fixture"],
            "compressed",
            TransformParams::Compress(percentage),
        );
        assert!(res.is_err_and(|e| matches!(e, TransformError::InvalidParameter(_))));
        assert!(!store.contains("compressed"));
    }

    registry.run(
        &mut store,
        "compress",
        &["fixture"],
        "compressed",
        TransformParams::Compress(50.0),
    )?;
    assert!(store.contains("compressed"));
    Ok(())
}

#[test]
fn unknown_transform_leaves_store_untouched() -> Result<(), TransformError> {
    let mut store = ImageStore::new();
    store.insert("fixture", uniform(Pixel::new(1, 2, 3))?);

    let res = Registry::new().run(
        &mut store,
        "solarize",
        &["fixture"],
        "out",
        TransformParams::None,
    );
    assert_eq!(res, Err(TransformError::UnknownTransform("solarize".into())));
    assert_eq!(store.len(), 1);
    Ok(())
}

#[test]
fn store_pipeline() -> Result<(), TransformError> {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut rng = StdRng::seed_from_u64(11);
    let mut store = ImageStore::new();
    store.insert("src", random_image(&mut rng, [12, 8].into())?);

    let registry = Registry::new();
    registry.run(&mut store, "red-component", &["src"], "r", TransformParams::None)?;
    registry.run(&mut store, "green-component", &["src"], "g", TransformParams::None)?;
    registry.run(&mut store, "blue-component", &["src"], "b", TransformParams::None)?;
    registry.run(
        &mut store,
        "rgb-combine",
        &["r", "g", "b"],
        "combined",
        TransformParams::None,
    )?;
    assert_eq!(store.get("combined"), store.get("src"));

    registry.run(&mut store, "horizontal-flip", &["src"], "h", TransformParams::None)?;
    registry.run(&mut store, "horizontal-flip", &["h"], "hh", TransformParams::None)?;
    assert_eq!(store.get("hh"), store.get("src"));

    registry.run(&mut store, "histogram", &["src"], "plot", TransformParams::None)?;
    assert_eq!(
        store.get("plot").map(Image::size),
        Some(ImageSize {
            width: 256,
            height: 256
        })
    );
    Ok(())
}

#[test]
fn dimensions_are_preserved() -> Result<(), TransformError> {
    let mut rng = StdRng::seed_from_u64(5);
    let registry = Registry::new();

    for size in [[1, 1], [1, 7], [6, 1], [5, 9], [17, 4]] {
        let size = ImageSize::from(size);
        let src = random_image(&mut rng, size)?;
        for kind in TransformKind::ALL {
            if kind == TransformKind::Histogram {
                continue;
            }
            let params = match kind {
                TransformKind::Brighten => TransformParams::Brighten(-40),
                TransformKind::Compress => TransformParams::Compress(35.0),
                kind if kind.is_split_enabled() => split_params(kind, SplitPercentage::FULL),
                _ => TransformParams::None,
            };
            let sources = vec![&src; kind.arity()];
            let out = registry.apply(kind, &sources, params)?;
            assert_eq!(out.size(), size, "{kind} on {size}");
        }
    }
    Ok(())
}

#[test]
fn split_boundary_holds_for_every_split_transform() -> Result<(), TransformError> {
    let mut rng = StdRng::seed_from_u64(9);
    let registry = Registry::new();
    let src = random_image(
        &mut rng,
        ImageSize {
            width: 20,
            height: 6,
        },
    )?;

    for fraction in [0.25, 0.5, 0.75] {
        let split = SplitPercentage::from_fraction(fraction);
        let boundary = (src.width() as f64 * fraction).floor() as usize;

        for kind in TransformKind::ALL.into_iter().filter(|k| k.is_split_enabled()) {
            let full = registry.apply(kind, &[&src], split_params(kind, SplitPercentage::FULL))?;
            let part = registry.apply(kind, &[&src], split_params(kind, split))?;

            for row in 0..src.rows() {
                for col in 0..src.cols() {
                    let expected = if col < boundary {
                        full[[row, col]]
                    } else {
                        src[[row, col]]
                    };
                    // whole-image statistics of dither and color correct ignore the split
                    assert_eq!(part[[row, col]], expected, "{kind} at [{row}, {col}]");
                }
            }
        }
    }
    Ok(())
}

#[test]
fn split_boundary_with_partial_column() -> Result<(), TransformError> {
    let mut rng = StdRng::seed_from_u64(13);
    let registry = Registry::new();

    // a column is transformed while its index is below width * fraction, so a partial
    // column at the boundary is transformed too
    for (width, fraction, boundary) in [(7, 0.5, 4), (10, 0.25, 3), (9, 0.3, 3), (5, 0.1, 1)] {
        let src = random_image(&mut rng, ImageSize { width, height: 3 })?;
        let split = SplitPercentage::from_fraction(fraction);
        assert_eq!(split.boundary(width), boundary);

        for kind in TransformKind::ALL.into_iter().filter(|k| k.is_split_enabled()) {
            let full = registry.apply(kind, &[&src], split_params(kind, SplitPercentage::FULL))?;
            let part = registry.apply(kind, &[&src], split_params(kind, split))?;

            for row in 0..src.rows() {
                for col in 0..width {
                    let expected = if col < boundary {
                        full[[row, col]]
                    } else {
                        src[[row, col]]
                    };
                    assert_eq!(part[[row, col]], expected, "{kind} at [{row}, {col}]");
                }
            }
        }
    }
    Ok(())
}

#[test]
fn histogram_sums_to_area() -> Result<(), TransformError> {
    let mut rng = StdRng::seed_from_u64(21);
    for _ in 0..10 {
        let size = ImageSize {
            width: rng.random_range(1..40),
            height: rng.random_range(1..40),
        };
        let hist = compute_histogram(&random_image(&mut rng, size)?);
        for channel in Channel::ALL {
            assert_eq!(hist.channel(channel).iter().sum::<usize>(), size.area());
        }
    }
    Ok(())
}

#[test]
fn compression_error_is_monotonic() -> Result<(), TransformError> {
    let src = Image::from_fn([24, 13].into(), |row, col| {
        Pixel::new(
            ((row * 19 + col * 7) % 256) as i32,
            ((row * row + col) % 256) as i32,
            (200 - row * 5) as i32,
        )
    })?;

    let error = |out: &Image| -> f64 {
        let total: u64 = src
            .as_slice()
            .iter()
            .zip(out.as_slice())
            .flat_map(|(p, q)| p.rgb().into_iter().zip(q.rgb()))
            .map(|(x, y)| x.abs_diff(y) as u64)
            .sum();
        total as f64 / (src.size().area() * 3) as f64
    };

    let registry = Registry::new();
    let mut last = 0.0;
    for p in [2.0, 10.0, 25.0, 50.0, 75.0, 98.0] {
        let out = registry.invoke("compress", &[&src], TransformParams::Compress(p))?;
        let err = error(&out);
        assert!(err >= last, "error {err} at {p}% is below {last}");
        last = err;
    }
    Ok(())
}
