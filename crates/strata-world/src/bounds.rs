use std::collections::HashSet;

use glam::IVec2;
use strata_core::types::{ColumnCoord, Rect};

use crate::chunk::ChunkSection;

/// Distinct chunk columns that have at least one decoded section.
pub fn populated_columns(sections: &[ChunkSection]) -> HashSet<ColumnCoord> {
    sections.iter().map(ChunkSection::column).collect()
}

/// Find a gap-free rectangle of chunk columns to run simulations in.
///
/// This is a heuristic trim, not a largest-rectangle search. The raw Z range
/// is shrunk by `margin` columns at each end to drop ragged world edges. Then
/// every missing column in the remaining rows pulls in the X edge on its side
/// of the row midpoint: a gap right of the midpoint lowers `x2`, anything
/// else raises `x1`. Returns `None` for empty input or when nothing survives.
pub fn find_bounding_box(
    columns: impl IntoIterator<Item = ColumnCoord>,
    margin: i32,
) -> Option<Rect> {
    let points: HashSet<IVec2> = columns.into_iter().collect();
    if points.is_empty() {
        return None;
    }

    let (mut min_x, mut min_z) = (i32::MAX, i32::MAX);
    let (mut max_x, mut max_z) = (i32::MIN, i32::MIN);
    for point in &points {
        min_x = min_x.min(point.x);
        min_z = min_z.min(point.y);
        max_x = max_x.max(point.x);
        max_z = max_z.max(point.y);
    }

    min_z += margin;
    max_z -= margin;

    let mid_x = (min_x + max_x) / 2;
    let mut valid_min_x = min_x;
    let mut valid_max_x = max_x;

    for z in min_z..=max_z {
        for x in min_x..=max_x {
            if points.contains(&IVec2::new(x, z)) {
                continue;
            }
            if x > mid_x {
                valid_max_x = valid_max_x.min(x - 1);
            } else {
                valid_min_x = valid_min_x.max(x + 1);
            }
        }
    }

    let rect = Rect::new(valid_min_x, min_z, valid_max_x, max_z);
    (!rect.is_empty()).then_some(rect)
}
