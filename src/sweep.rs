// Copyright 2025 the sbgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Broad phase culling of bounding boxes.
//!
//! Rectangles are swept left to right. Each rectangle is compared only with
//! those whose x extent is still open when it starts, so pairs far apart in
//! x are never looked at. Touching boxes count as overlapping.

use alloc::vec;
use alloc::vec::Vec;

use crate::{Dim2, Rect};

#[derive(Clone, Copy, Debug)]
struct Event {
    x: f64,
    closing: bool,
    set: usize,
    index: usize,
}

fn push_events(events: &mut Vec<Event>, rects: &[Rect], set: usize) {
    for (index, r) in rects.iter().enumerate() {
        let (x0, x1) = (r.x0.min(r.x1), r.x0.max(r.x1));
        events.push(Event {
            x: x0,
            closing: false,
            set,
            index,
        });
        events.push(Event {
            x: x1,
            closing: true,
            set,
            index,
        });
    }
}

/// Events in x order; at equal x every opening precedes every closing.
fn sorted(mut events: Vec<Event>) -> Vec<Event> {
    events.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.closing.cmp(&b.closing)));
    events
}

fn close(open: &mut Vec<usize>, index: usize) {
    if let Some(pos) = open.iter().position(|&j| j == index) {
        open.swap_remove(pos);
    }
}

/// Overlapping pairs among one set of rectangles.
///
/// Entry `i` of the result lists the rectangles overlapping `rects[i]` that
/// start to the right of it, so each overlapping pair appears exactly once.
/// Every pair of overlapping boxes is reported.
///
/// # Examples
///
/// ```
/// use sbgeom::{sweep_bounds, Rect};
///
/// let rects = [
///     Rect::new(0.0, 0.0, 2.0, 2.0),
///     Rect::new(1.0, 1.0, 3.0, 3.0),
///     Rect::new(5.0, 0.0, 6.0, 1.0),
/// ];
/// let pairs = sweep_bounds(&rects);
/// assert_eq!(pairs[0], [1]);
/// assert!(pairs[1].is_empty() && pairs[2].is_empty());
/// ```
pub fn sweep_bounds(rects: &[Rect]) -> Vec<Vec<usize>> {
    let mut events = Vec::with_capacity(2 * rects.len());
    push_events(&mut events, rects, 0);
    let mut result = vec![Vec::new(); rects.len()];
    let mut open: Vec<usize> = Vec::new();
    for e in sorted(events) {
        if e.closing {
            close(&mut open, e.index);
            continue;
        }
        let y = rects[e.index].axis(Dim2::Y);
        for &j in &open {
            if rects[j].axis(Dim2::Y).intersects(&y) {
                result[j].push(e.index);
            }
        }
        open.push(e.index);
    }
    result
}

/// Overlapping pairs between two sets of rectangles.
///
/// Entry `i` of the result lists, ascending, the indices into `b` of the
/// rectangles overlapping `a[i]`.
pub fn sweep_bounds_cross(a: &[Rect], b: &[Rect]) -> Vec<Vec<usize>> {
    let mut events = Vec::with_capacity(2 * (a.len() + b.len()));
    push_events(&mut events, a, 0);
    push_events(&mut events, b, 1);
    let sets = [a, b];
    let mut result = vec![Vec::new(); a.len()];
    let mut open: [Vec<usize>; 2] = [Vec::new(), Vec::new()];
    for e in sorted(events) {
        if e.closing {
            close(&mut open[e.set], e.index);
            continue;
        }
        let y = sets[e.set][e.index].axis(Dim2::Y);
        let other = 1 - e.set;
        for &j in &open[other] {
            if sets[other][j].axis(Dim2::Y).intersects(&y) {
                if e.set == 0 {
                    result[e.index].push(j);
                } else {
                    result[j].push(e.index);
                }
            }
        }
        open[e.set].push(e.index);
    }
    for list in &mut result {
        list.sort_unstable();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_rects(rng: &mut StdRng, n: usize) -> Vec<Rect> {
        (0..n)
            .map(|_| {
                let x = rng.random_range(0.0..100.0);
                let y = rng.random_range(0.0..100.0);
                let w = rng.random_range(0.0..15.0);
                let h = rng.random_range(0.0..15.0);
                Rect::new(x, y, x + w, y + h)
            })
            .collect()
    }

    #[test]
    fn touching_boxes_overlap() {
        let rects = [Rect::new(0.0, 0.0, 1.0, 1.0), Rect::new(1.0, 1.0, 2.0, 2.0)];
        assert_eq!(sweep_bounds(&rects), [vec![1], vec![]]);
        let cross = sweep_bounds_cross(&rects[..1], &rects[1..]);
        assert_eq!(cross, [vec![0]]);
    }

    #[test]
    fn self_pairs_match_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let rects = random_rects(&mut rng, 60);
            let pairs = sweep_bounds(&rects);
            let mut found = 0;
            for i in 0..rects.len() {
                for j in 0..rects.len() {
                    if i != j && rects[i].intersects(&rects[j]) {
                        assert!(
                            pairs[i].contains(&j) || pairs[j].contains(&i),
                            "missed overlap of {i} and {j}"
                        );
                        if pairs[i].contains(&j) {
                            found += 1;
                            assert!(!pairs[j].contains(&i), "pair {i} {j} reported twice");
                        }
                    }
                }
            }
            let total: usize = pairs.iter().map(Vec::len).sum();
            assert_eq!(total, found);
        }
    }

    #[test]
    fn cross_pairs_match_brute_force() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let a = random_rects(&mut rng, 40);
            let b = random_rects(&mut rng, 30);
            let pairs = sweep_bounds_cross(&a, &b);
            for (i, ra) in a.iter().enumerate() {
                let expected: Vec<usize> = (0..b.len()).filter(|&j| ra.intersects(&b[j])).collect();
                assert_eq!(pairs[i], expected);
            }
        }
    }
}
