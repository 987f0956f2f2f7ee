use crate::hierarchy::{Hierarchy, NodeId};

use super::Rect;

/// Assigns a rectangle to every node in the tree. The root gets the full
/// canvas; each child list partitions its parent rectangle proportionally
/// to aggregate value using the squarified algorithm (Bruls et al.).
pub(super) fn apply(tree: &mut Hierarchy, width: f32, height: f32) {
    let root = tree.root();
    tree.node_mut(root).rect = Rect::new(0.0, 0.0, width, height);
    partition(tree, root);
}

fn partition(tree: &mut Hierarchy, parent: NodeId) {
    let children = tree.node(parent).children.clone();
    if children.is_empty() {
        return;
    }
    let rect = tree.node(parent).rect;
    let total = tree.node(parent).aggregate;

    if total <= 0.0 {
        // Undefined proportions: collapse the subtree to zero area rather
        // than aborting the rest of the layout.
        tracing::debug!(
            "zero-aggregate subtree `{}` collapsed to zero area",
            tree.node(parent).name
        );
        for &child in &children {
            tree.node_mut(child).rect = Rect::new(rect.x0, rect.y0, rect.x0, rect.y0);
            partition(tree, child);
        }
        return;
    }

    let scale = rect.area() as f64 / total;
    let areas: Vec<f64> = children
        .iter()
        .map(|&child| tree.node(child).aggregate * scale)
        .collect();
    let rects = squarify(&areas, rect);
    for (&child, child_rect) in children.iter().zip(rects) {
        tree.node_mut(child).rect = child_rect;
        partition(tree, child);
    }
}

/// Squarified row packing. `areas` must be sorted descending (the builder
/// guarantees this), so non-positive entries form a suffix and get
/// zero-area rectangles at the cursor.
///
/// Rows grow along the shorter side of the remaining rectangle while the
/// worst aspect ratio in the row improves; a row that would get worse is
/// closed and laid out as a full strip.
fn squarify(areas: &[f64], bounds: Rect) -> Vec<Rect> {
    let mut out = Vec::with_capacity(areas.len());
    let mut x = bounds.x0 as f64;
    let mut y = bounds.y0 as f64;
    let mut w = bounds.width() as f64;
    let mut h = bounds.height() as f64;

    let positive = areas.iter().take_while(|area| **area > 0.0).count();

    let mut row_start = 0usize;
    let mut row_sum = 0.0f64;
    let mut row_min = f64::INFINITY;
    let mut row_max = 0.0f64;
    let mut idx = 0usize;

    while idx < positive {
        let area = areas[idx];
        let side = w.min(h);
        let current = worst_aspect(row_min, row_max, row_sum, side);
        let candidate = worst_aspect(row_min.min(area), row_max.max(area), row_sum + area, side);
        if row_start == idx || candidate <= current {
            row_sum += area;
            row_min = row_min.min(area);
            row_max = row_max.max(area);
            idx += 1;
            continue;
        }
        lay_row(
            &areas[row_start..idx],
            row_sum,
            false,
            &mut x,
            &mut y,
            &mut w,
            &mut h,
            &mut out,
        );
        row_start = idx;
        row_sum = 0.0;
        row_min = f64::INFINITY;
        row_max = 0.0;
    }
    if idx > row_start {
        lay_row(
            &areas[row_start..idx],
            row_sum,
            true,
            &mut x,
            &mut y,
            &mut w,
            &mut h,
            &mut out,
        );
    }

    for _ in positive..areas.len() {
        out.push(Rect::new(x as f32, y as f32, x as f32, y as f32));
    }
    out
}

#[allow(clippy::too_many_arguments)]
fn lay_row(
    row: &[f64],
    row_sum: f64,
    last: bool,
    x: &mut f64,
    y: &mut f64,
    w: &mut f64,
    h: &mut f64,
    out: &mut Vec<Rect>,
) {
    if row.is_empty() || row_sum <= 0.0 {
        return;
    }
    // The strip runs along the shorter side of the remaining rectangle.
    let horizontal = *w <= *h;
    let short = if horizontal { *w } else { *h };
    if short <= 0.0 {
        for _ in row {
            out.push(Rect::new(*x as f32, *y as f32, *x as f32, *y as f32));
        }
        return;
    }
    let thickness = if last {
        // The final strip absorbs any accumulated rounding in the long axis.
        if horizontal { *h } else { *w }
    } else {
        row_sum / short
    };

    let mut offset = 0.0f64;
    for (i, &area) in row.iter().enumerate() {
        let length = if i == row.len() - 1 {
            // The last tile of a strip absorbs rounding along the strip.
            (short - offset).max(0.0)
        } else if thickness > 0.0 {
            area / thickness
        } else {
            0.0
        };
        let rect = if horizontal {
            Rect::sized(
                (*x + offset) as f32,
                *y as f32,
                length as f32,
                thickness as f32,
            )
        } else {
            Rect::sized(
                *x as f32,
                (*y + offset) as f32,
                thickness as f32,
                length as f32,
            )
        };
        out.push(rect);
        offset += length;
    }

    if horizontal {
        *y += thickness;
        *h = (*h - thickness).max(0.0);
    } else {
        *x += thickness;
        *w = (*w - thickness).max(0.0);
    }
}

fn worst_aspect(min_area: f64, max_area: f64, sum: f64, side: f64) -> f64 {
    if sum <= 0.0 || side <= 0.0 || min_area <= 0.0 || max_area <= 0.0 {
        return f64::MAX;
    }
    let side_sq = side * side;
    let sum_sq = sum * sum;
    let a = side_sq * max_area / sum_sq;
    let b = sum_sq / (side_sq * min_area);
    a.max(b)
}
