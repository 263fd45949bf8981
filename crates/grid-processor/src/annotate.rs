//! Writing nearest grid indices onto point collections.

use gridmap_common::{PointCollection, Result, TargetGrid};

use crate::locate::{Locator, TargetCoords};

/// Annotate every point with the indices of its nearest cell on `grid`.
///
/// Columns (longitude index) are written as x-indices, rows (latitude
/// index) as y-indices. On error the points are left untouched.
pub fn annotate<'p, P>(grid: &TargetGrid, points: &'p mut P) -> Result<&'p mut P>
where
    P: PointCollection + ?Sized,
{
    annotate_with(&Locator::default(), grid, points)
}

/// Same as [`annotate`], using the given locator.
pub fn annotate_with<'p, P>(locator: &Locator, grid: &TargetGrid, points: &'p mut P) -> Result<&'p mut P>
where
    P: PointCollection + ?Sized,
{
    let target = TargetCoords::axes(grid.lat_axis(), grid.lon_axis());
    let indices = locator.locate(points.lats(), points.lons(), &target)?;

    tracing::debug!(
        points = indices.len(),
        rows = grid.shape().0,
        cols = grid.shape().1,
        "Annotated points with grid indices"
    );

    points.add_xs(indices.cols);
    points.add_ys(indices.rows);
    Ok(points)
}
