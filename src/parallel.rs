use std::ops::Range;
use std::sync::atomic::{ AtomicUsize, Ordering };

use rayon::prelude::*;
use thiserror::Error;

use crate::world::World;
use crate::camera::Camera;
use crate::canvas::Canvas;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("a render needs at least one worker")]
    NoWorkers,

    #[error("failed to start render threads")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Splits `height` rows into contiguous bands of `ceil(height / workers)`
/// rows. Bands never overlap and together cover every row; there may be
/// fewer bands than workers.
///
/// ```
/// # use glint::parallel::split_rows;
/// assert_eq!(split_rows(10, 4), vec![0..3, 3..6, 6..9, 9..10]);
/// ```
pub fn split_rows(height: usize, workers: usize) -> Vec<Range<usize>> {
    if height == 0 || workers == 0 {
        return Vec::new();
    }

    let band = (height + workers - 1) / workers;

    (0..height).step_by(band)
        .map(|start| start..(start + band).min(height))
        .collect()
}

/// Renders `world` through `camera` on `workers` threads.
///
/// Each thread renders whole bands of rows into its own buffer; the bands are
/// stitched together once every thread has finished.
pub fn render(world: &World, camera: &Camera, workers: usize)
    -> Result<Canvas, RenderError> {
    if workers == 0 {
        return Err(RenderError::NoWorkers);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;

    let bands = split_rows(camera.vsize, workers);
    log::info!("rendering {}x{} in {} bands on {} threads",
        camera.hsize, camera.vsize, bands.len(), workers);

    let done = AtomicUsize::new(0);
    let total = camera.vsize;
    let on_row = |row: usize| {
        let n = done.fetch_add(1, Ordering::Relaxed) + 1;
        log::trace!("row {} done ({}/{})", row, n, total);
    };

    let rendered: Vec<(usize, Vec<_>)> = pool.install(|| {
        bands.into_par_iter()
            .map(|rows| {
                log::debug!("rendering rows {}..{}", rows.start, rows.end);
                let pixels = camera.render_rows(world, rows.start, rows.end,
                    Some(&on_row));
                (rows.start, pixels)
            })
            .collect()
    });

    log::info!("rendered {} rows", done.load(Ordering::Relaxed));
    Ok(Canvas::from_rows(camera.hsize, camera.vsize, rendered))
}

#[test]
fn split_rows_evenly() {
    assert_eq!(split_rows(8, 4), vec![0..2, 2..4, 4..6, 6..8]);
}

#[test]
fn split_rows_rounds_band_size_up() {
    let bands = split_rows(11, 3);

    assert_eq!(bands, vec![0..4, 4..8, 8..11]);
}

#[test]
fn split_rows_with_more_workers_than_rows() {
    assert_eq!(split_rows(3, 8), vec![0..1, 1..2, 2..3]);
}

#[test]
fn split_rows_degenerate() {
    assert!(split_rows(0, 4).is_empty());
    assert!(split_rows(10, 0).is_empty());
}

#[test]
fn split_rows_cover_every_row_once() {
    for height in 1..40 {
        for workers in 1..9 {
            let rows: Vec<usize> = split_rows(height, workers).into_iter()
                .flatten()
                .collect();

            assert_eq!(rows, (0..height).collect::<Vec<_>>());
        }
    }
}

#[test]
fn zero_workers_is_an_error() {
    let c = Camera::new(4, 4, std::f64::consts::PI / 2.0);

    assert!(matches!(render(&World::new(), &c, 0),
        Err(RenderError::NoWorkers)));
}
