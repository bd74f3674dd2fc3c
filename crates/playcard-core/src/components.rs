//! 4-connected component extraction over binary masks.

use std::collections::VecDeque;

use nalgebra::Point2;

use crate::threshold::FOREGROUND;
use crate::{GrayImageView, PixelRect};

/// Foreground pixels reachable from each other through 4-neighbour steps.
///
/// Points are stored in breadth-first discovery order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Component {
    pub points: Vec<Point2<f32>>,
}

impl Component {
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Tight bounding box of the component, `None` when empty.
    pub fn bounds(&self) -> Option<PixelRect> {
        let first = self.points.first()?;
        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.x, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(PixelRect::from_inclusive(
            min_x as usize,
            min_y as usize,
            max_x as usize,
            max_y as usize,
        ))
    }
}

const NEIGHBORS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Largest 4-connected blob of 255-valued samples.
///
/// Pixels are scanned in row-major order and every unvisited foreground pixel
/// seeds a breadth-first fill. A later component replaces the current best only
/// when it is strictly larger, so ties resolve to the first one discovered.
/// An all-background mask yields an empty component.
pub fn largest_component(mask: &GrayImageView<'_>) -> Component {
    let (w, h) = (mask.width, mask.height);
    let mut visited = vec![false; w * h];
    let mut queue = VecDeque::new();
    let mut region: Vec<Point2<f32>> = Vec::new();
    let mut largest: Vec<Point2<f32>> = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            if mask.data[idx] != FOREGROUND || visited[idx] {
                continue;
            }

            region.clear();
            visited[idx] = true;
            queue.push_back((x, y));

            while let Some((px, py)) = queue.pop_front() {
                region.push(Point2::new(px as f32, py as f32));
                for (dx, dy) in NEIGHBORS {
                    let Some(nx) = px.checked_add_signed(dx) else {
                        continue;
                    };
                    let Some(ny) = py.checked_add_signed(dy) else {
                        continue;
                    };
                    if nx >= w || ny >= h {
                        continue;
                    }
                    let nidx = ny * w + nx;
                    if mask.data[nidx] == FOREGROUND && !visited[nidx] {
                        visited[nidx] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }

            if region.len() > largest.len() {
                std::mem::swap(&mut region, &mut largest);
            }
        }
    }

    log::debug!("largest component: {} px", largest.len());
    Component { points: largest }
}
