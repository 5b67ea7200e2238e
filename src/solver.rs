// Copyright 2025 the sbgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Root isolation for polynomials in Bernstein and symmetric power form.

use alloc::vec;
use alloc::vec::Vec;

use crate::bezier::{casteljau_split, Coeffs};
use crate::{Interval, SBasis};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Maximum recursion depth for root isolation.
///
/// Bisection at this depth has long since reached the resolution of an
/// `f64`, so deeper recursion could not separate roots any further.
pub const MAX_DEPTH: usize = 64;

/// The roots of a Bernstein polynomial, mapped to `[left_t, right_t]`.
///
/// The control polygon is bisected until each piece crosses zero at most
/// once; single crossings are then refined by the Illinois variant of
/// regula falsi. Roots are reported in ascending order. Zero coefficients
/// at either end are not reported as roots here; [`Bezier::roots`]
/// handles those.
///
/// [`Bezier::roots`]: crate::Bezier::roots
pub fn find_bernstein_roots(w: &[f64], left_t: f64, right_t: f64) -> Vec<f64> {
    let mut solutions = Vec::new();
    if !w.is_empty() {
        bernstein_roots_rec(w, 0, left_t, right_t, &mut solutions);
    }
    solutions
}

/// Count the sign changes of the control polygon, skipping zeros.
fn crossing_count(w: &[f64]) -> usize {
    let mut n_crossings = 0;
    let mut old_sign = sign(w[0]);
    for &v in &w[1..] {
        let s = sign(v);
        if s != 0 {
            if s != old_sign && old_sign != 0 {
                n_crossings += 1;
            }
            old_sign = s;
        }
    }
    n_crossings
}

#[inline]
fn sign(v: f64) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Divide out a root at `t = 0`, lowering the order by one.
pub(crate) fn deflate_start(c: &[f64]) -> Coeffs {
    let n = (c.len() - 1) as f64;
    (1..c.len()).map(|i| c[i] * n / i as f64).collect()
}

/// Divide out a root at `t = 1`, lowering the order by one.
pub(crate) fn deflate_end(c: &[f64]) -> Coeffs {
    let n = c.len() - 1;
    (0..n).map(|i| c[i] * n as f64 / (n - i) as f64).collect()
}

/// Strip exact zeros at both ends, so every remaining root is interior.
fn trim_zero_ends(w: &[f64]) -> Coeffs {
    let mut c: Coeffs = w.iter().copied().collect();
    while c.len() > 1 && c[0] == 0.0 {
        c = deflate_start(&c);
    }
    while c.len() > 1 && c[c.len() - 1] == 0.0 {
        c = deflate_end(&c);
    }
    c
}

fn bernstein_roots_rec(w: &[f64], depth: usize, left_t: f64, right_t: f64, out: &mut Vec<f64>) {
    let w = trim_zero_ends(w);
    let degree = w.len() - 1;
    if degree == 0 {
        return;
    }
    let n_crossings = crossing_count(&w);
    if n_crossings == 0 {
        return;
    }
    if n_crossings == 1 {
        if depth > MAX_DEPTH {
            let dx = right_t - left_t;
            let dy = w[degree] - w[0];
            out.push(left_t - dx * w[0] / dy);
            return;
        }
        let r = illinois(&w);
        out.push(r * right_t + (1.0 - r) * left_t);
        return;
    }
    if depth > MAX_DEPTH {
        log::warn!(
            "root isolation stopped at depth {depth}: {n_crossings} sign changes left in [{left_t}, {right_t}]"
        );
        out.push(0.5 * (left_t + right_t));
        return;
    }

    let (left, right) = casteljau_split(&w, 0.5);
    let mid_t = 0.5 * (left_t + right_t);
    bernstein_roots_rec(&left, depth + 1, left_t, mid_t, out);
    // A root on the split point ends one half and starts the other; both
    // halves drop it before recursing.
    if right[0] == 0.0 {
        out.push(mid_t);
    }
    bernstein_roots_rec(&right, depth + 1, mid_t, right_t, out);
}

/// Regula falsi on `[0, 1]` with the Illinois modification, for a control
/// polygon known to cross zero once and nonzero at both ends.
fn illinois(w: &[f64]) -> f64 {
    let degree = w.len() - 1;
    debug_assert!(w[0] != 0.0 && w[degree] != 0.0, "root at an end of {w:?}");
    let e = 1e-10;
    let (mut s, mut t) = (0.0, 1.0);
    let (mut fs, mut ft) = (w[0], w[degree]);
    let mut side = 0;
    let mut r = 0.5;
    for _ in 0..100 {
        r = (fs * t - ft * s) / (fs - ft);
        if (t - s).abs() < e * (t + s).abs() {
            break;
        }
        let fr = bernstein_value_at(w, r);
        if fr * ft > 0.0 {
            t = r;
            ft = fr;
            if side == -1 {
                fs /= 2.0;
            }
            side = -1;
        } else if fs * fr > 0.0 {
            s = r;
            fs = fr;
            if side == 1 {
                ft /= 2.0;
            }
            side = 1;
        } else {
            break;
        }
    }
    r
}

/// Evaluate a Bernstein polynomial with a Horner-like scheme.
fn bernstein_value_at(c: &[f64], t: f64) -> f64 {
    let n = c.len() - 1;
    if n == 0 {
        return c[0];
    }
    let u = 1.0 - t;
    let mut bc = 1.0;
    let mut tn = 1.0;
    let mut tmp = c[0] * u;
    for (i, &ci) in c.iter().enumerate().take(n).skip(1) {
        tn *= t;
        bc = bc * (n - i + 1) as f64 / i as f64;
        tmp = (tmp + tn * bc * ci) * u;
    }
    tmp + tn * t * c[n]
}

/// The index of the first level above `x - tol`.
fn upper_level(levels: &[f64], x: f64, tol: f64) -> usize {
    levels.partition_point(|&l| l <= x - tol)
}

struct MultiRoots<'a> {
    f: &'a SBasis,
    df: SBasis,
    levels: &'a [f64],
    roots: Vec<Vec<f64>>,
    htol: f64,
    vtol: f64,
}

impl MultiRoots<'_> {
    fn is_level(&self, idx: usize, v: f64) -> bool {
        idx < self.levels.len() && (v - self.levels[idx]).abs() < self.vtol
    }

    fn solve(&mut self, a: f64, fa: f64, b: f64, fb: f64, depth: usize) {
        let (htol, vtol) = (self.htol, self.vtol);
        let n_levels = self.levels.len();
        if self.f.is_zero(0.0) {
            let idx = upper_level(self.levels, 0.0, vtol);
            if idx < n_levels && self.levels[idx].abs() <= vtol {
                self.roots[idx].push(a);
                self.roots[idx].push(b);
            }
            return;
        }
        if b - a < htol || depth > MAX_DEPTH {
            let mut idx = upper_level(self.levels, fa, vtol).min(upper_level(self.levels, fb, vtol));
            if idx == n_levels {
                idx -= 1;
            }
            let c = self.levels[idx];
            if (fa - c) * (fb - c) <= 0.0 || (fa - c).abs() < vtol || (fb - c).abs() < vtol {
                self.roots[idx].push(0.5 * (a + b));
            }
            return;
        }

        let idxa = upper_level(self.levels, fa, vtol);
        let idxb = upper_level(self.levels, fb, vtol);
        let bs = self.df.bounds_local(Interval::new(a, b), 0);

        // Earliest times from each end at which another level is reachable.
        let (mut ta_hi, mut ta_lo) = (b + 1.0, b + 1.0);
        let (mut tb_hi, mut tb_lo) = (a - 1.0, a - 1.0);
        if self.is_level(idxa, fa) {
            self.roots[idxa].push(a);
            ta_hi = a + htol;
            ta_lo = a + htol;
        } else {
            if bs.max() > 0.0 && idxa < n_levels {
                ta_hi = a + (self.levels[idxa] - fa) / bs.max();
            }
            if bs.min() < 0.0 && idxa > 0 {
                ta_lo = a + (self.levels[idxa - 1] - fa) / bs.min();
            }
        }
        if self.is_level(idxb, fb) {
            self.roots[idxb].push(b);
            tb_hi = b - htol;
            tb_lo = b - htol;
        } else {
            if bs.min() < 0.0 && idxb < n_levels {
                tb_hi = b + (self.levels[idxb] - fb) / bs.min();
            }
            if bs.max() > 0.0 && idxb > 0 {
                tb_lo = b + (self.levels[idxb - 1] - fb) / bs.max();
            }
        }

        let t0 = ta_hi.min(ta_lo);
        let t1 = tb_hi.max(tb_lo);
        if t0 > t1 + htol {
            return;
        }
        if (t1 - t0).abs() < htol {
            let (f0, f1) = (self.f.value_at(t0), self.f.value_at(t1));
            self.solve(t0, f0, t1, f1, depth + 1);
            return;
        }
        let t = 0.5 * (t0 + t1);
        let ft = self.f.value_at(t);
        let (mut t_left, mut t_right) = (t, t);
        let (mut ft_left, mut ft_right) = (ft, ft);
        let idx = upper_level(self.levels, ft, vtol);
        if self.is_level(idx, ft) {
            self.roots[idx].push(t);
            t_left = t - 0.5 * htol;
            t_right = t + 0.5 * htol;
            ft_left = self.f.value_at(t_left);
            ft_right = self.f.value_at(t_right);
        }
        let f0 = self.f.value_at(t0);
        let f1 = self.f.value_at(t1);
        self.solve(t0, f0, t_left, ft_left, depth + 1);
        self.solve(t_right, ft_right, t1, f1, depth + 1);
    }
}

/// Find, in one pass, the times in `[a, b]` at which `f` takes each of the
/// given values.
///
/// The result has one sorted list per entry of `levels`, in the caller's
/// order; `levels` need not be sorted. `htol` is the resolution in time and
/// `vtol` the tolerance on values. Bounds on the derivative rule out whole
/// sub-intervals, so many levels cost little more than one.
pub fn multi_roots(f: &SBasis, levels: &[f64], htol: f64, vtol: f64, a: f64, b: f64) -> Vec<Vec<f64>> {
    if levels.is_empty() {
        return Vec::new();
    }
    let mut order: Vec<usize> = (0..levels.len()).collect();
    order.sort_by(|&i, &j| levels[i].total_cmp(&levels[j]));
    let sorted: Vec<f64> = order.iter().map(|&i| levels[i]).collect();

    let mut solver = MultiRoots {
        f,
        df: f.derivative(),
        levels: &sorted,
        roots: vec![Vec::new(); levels.len()],
        htol,
        vtol,
    };
    solver.solve(a, f.value_at(a), b, f.value_at(b), 0);

    let mut result = vec![Vec::new(); levels.len()];
    for (mut roots, &i) in solver.roots.into_iter().zip(&order) {
        roots.sort_by(f64::total_cmp);
        roots.dedup_by(|t, prev| *t - *prev < 2.0 * htol);
        result[i] = roots;
    }
    result
}

/// The first level whose upper end is at least `x`.
fn upper_interval(levels: &[Interval], x: f64) -> usize {
    levels
        .iter()
        .position(|l| x <= l.max())
        .unwrap_or(levels.len())
}

struct LevelSets<'a> {
    f: &'a SBasis,
    df: SBasis,
    levels: &'a [Interval],
    sets: Vec<Vec<Interval>>,
    tol: f64,
}

impl LevelSets<'_> {
    fn solve(&mut self, a: f64, fa: f64, b: f64, fb: f64, depth: usize) {
        let tol = self.tol;
        let n_levels = self.levels.len();
        if self.f.is_zero(0.0) {
            let idx = upper_interval(self.levels, 0.0);
            if idx < n_levels && self.levels[idx].contains(0.0) {
                self.sets[idx].push(Interval::new(a, b));
            }
            return;
        }

        let idxa = upper_interval(self.levels, fa);
        let idxb = upper_interval(self.levels, fb);
        let bs = self.df.bounds_local(Interval::new(a, b), 0);
        let clamp_a = |t: f64| if t < a || t > b || t.is_nan() { b } else { t };
        let clamp_b = |t: f64| if t < a || t > b || t.is_nan() { a } else { t };

        // Going forward from `a`, f can fall at rate bs.min() and rise at
        // rate bs.max(); going back from `b` the roles swap.
        let (ta_lo, ta_hi) = if idxa < n_levels && self.levels[idxa].contains(fa) {
            let level = self.levels[idxa];
            let lo = if bs.min() < 0.0 {
                clamp_a(a + (level.min() - fa) / bs.min())
            } else {
                b
            };
            let hi = if bs.max() > 0.0 {
                clamp_a(a + (level.max() - fa) / bs.max())
            } else {
                b
            };
            self.sets[idxa].push(Interval::new(a, lo.min(hi)));
            (lo, hi)
        } else {
            let lo = if idxa > 0 && bs.min() < 0.0 {
                clamp_a(a + (self.levels[idxa - 1].max() - fa) / bs.min())
            } else {
                b
            };
            let hi = if idxa < n_levels && bs.max() > 0.0 {
                clamp_a(a + (self.levels[idxa].min() - fa) / bs.max())
            } else {
                b
            };
            (lo, hi)
        };
        let (tb_lo, tb_hi) = if idxb < n_levels && self.levels[idxb].contains(fb) {
            let level = self.levels[idxb];
            let lo = if bs.max() > 0.0 {
                clamp_b(b + (level.min() - fb) / bs.max())
            } else {
                a
            };
            let hi = if bs.min() < 0.0 {
                clamp_b(b + (level.max() - fb) / bs.min())
            } else {
                a
            };
            self.sets[idxb].push(Interval::new(lo.max(hi), b));
            (lo, hi)
        } else {
            let lo = if idxb > 0 && bs.max() > 0.0 {
                clamp_b(b + (self.levels[idxb - 1].max() - fb) / bs.max())
            } else {
                a
            };
            let hi = if idxb < n_levels && bs.min() < 0.0 {
                clamp_b(b + (self.levels[idxb].min() - fb) / bs.min())
            } else {
                a
            };
            (lo, hi)
        };

        let t0 = ta_hi.min(ta_lo);
        let t1 = tb_hi.max(tb_lo);
        if t0 >= t1 {
            return;
        }
        if t1 - t0 <= tol || depth > MAX_DEPTH {
            // Below resolution: f meets every level between f(t0) and f(t1).
            let span = Interval::new(self.f.value_at(t0), self.f.value_at(t1));
            let (lo_idx, hi_idx) = (idxa.min(idxb), idxa.max(idxb));
            for set in &mut self.sets[lo_idx..hi_idx] {
                set.push(Interval::new(t0, t1));
            }
            if hi_idx < n_levels && span.intersects(&self.levels[hi_idx]) {
                self.sets[hi_idx].push(Interval::new(t0, t1));
            }
            return;
        }

        let t0 = t0.max(a + tol).min(b);
        let t1 = t1.min(b - tol).max(a);
        let t = 0.5 * (t0 + t1);
        let ft = self.f.value_at(t);
        let (f0, f1) = (self.f.value_at(t0), self.f.value_at(t1));
        self.solve(t0, f0, t, ft, depth + 1);
        self.solve(t, ft, t1, f1, depth + 1);
    }
}

/// The time intervals in `[a, b]` on which `f` takes values inside each of
/// the given bands.
///
/// `levels` must be sorted and disjoint. Intervals closer than `tol` are
/// fused, so each band yields a short sorted list of disjoint intervals.
pub fn level_sets(f: &SBasis, levels: &[Interval], a: f64, b: f64, tol: f64) -> Vec<Vec<Interval>> {
    let mut solver = LevelSets {
        f,
        df: f.derivative(),
        levels,
        sets: vec![Vec::new(); levels.len()],
        tol,
    };
    solver.solve(a, f.value_at(a), b, f.value_at(b), 0);
    solver
        .sets
        .into_iter()
        .map(|set| fuse_contiguous(set, tol))
        .collect()
}

/// Sort intervals and merge those that overlap or lie within `tol`.
fn fuse_contiguous(mut set: Vec<Interval>, tol: f64) -> Vec<Interval> {
    set.sort_by(|x, y| x.min().total_cmp(&y.min()));
    let mut result: Vec<Interval> = Vec::with_capacity(set.len());
    for i in set {
        match result.last_mut() {
            Some(last) if i.min() <= last.max() + tol => *last = last.union(&i),
            _ => result.push(i),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Linear;

    fn quadratic() -> SBasis {
        // (t - 0.3)(t - 0.7)
        SBasis::from_linear(Linear::new(-0.3, 0.7))
            .multiply(&SBasis::from_linear(Linear::new(-0.7, 0.3)))
    }

    #[test]
    fn bernstein_two_roots() {
        let roots = find_bernstein_roots(&[1.0, -1.0], 0.0, 1.0);
        assert_eq!(roots.len(), 1);
        assert!((roots[0] - 0.5).abs() < 1e-12);
        // 6t^2 - 6t + 1
        let roots = find_bernstein_roots(&[1.0, -2.0, 1.0], 0.0, 1.0);
        assert_eq!(roots.len(), 2, "{roots:?}");
        let d = 1.0 / 12.0_f64.sqrt();
        let expected = [0.5 - d, 0.5 + d];
        for (r, e) in roots.iter().zip(expected) {
            assert!((r - e).abs() < 1e-9, "{r} != {e}");
        }
        assert!(find_bernstein_roots(&[1.0, 2.0, 3.0], 0.0, 1.0).is_empty());
    }

    #[test]
    fn root_on_the_split_point() {
        // (t - 0.5)(t - 0.75): the first bisection lands on a root.
        let roots = find_bernstein_roots(&[0.375, -0.25, 0.125], 0.0, 1.0);
        assert_eq!(roots.len(), 2, "{roots:?}");
        assert_eq!(roots[0], 0.5);
        assert!((roots[1] - 0.75).abs() < 1e-9, "{roots:?}");
        let sb = SBasis::from_linear(Linear::new(-0.5, 0.5))
            .multiply(&SBasis::from_linear(Linear::new(-0.75, 0.25)));
        let roots = sb.roots();
        assert_eq!(roots.len(), 2, "{roots:?}");
        for (r, e) in roots.iter().zip([0.5, 0.75]) {
            assert!((r - e).abs() < 1e-9, "{r} != {e}");
        }
    }

    #[test]
    fn double_root_on_the_split_point() {
        // (t - 0.5)^2 touches zero without crossing.
        let roots = find_bernstein_roots(&[0.25, -0.25, 0.25], 0.0, 1.0);
        assert_eq!(roots, [0.5]);
        // Zeros at the ends are not reported.
        assert!(find_bernstein_roots(&[0.0, 1.0, 0.0], 0.0, 1.0).is_empty());
        let d = deflate_start(&[0.0, 1.0, 0.0]);
        assert_eq!(deflate_end(&d).as_slice(), &[2.0]);
    }

    #[test]
    fn mapped_interval() {
        let roots = find_bernstein_roots(&[-1.0, 1.0], 2.0, 4.0);
        assert_eq!(roots.len(), 1);
        assert!((roots[0] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn horner_matches_casteljau() {
        let c = [1.0, -3.0, 2.0, 5.0];
        let bz = crate::Bezier::new(c).unwrap();
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert!((bernstein_value_at(&c, t) - bz.value_at(t)).abs() < 1e-12);
        }
    }

    #[test]
    fn multi_roots_unsorted_levels() {
        let f = quadratic();
        // f = 0.05 at t = 0.2, 0.8; f = 0 at t = 0.3, 0.7.
        let roots = multi_roots(&f, &[0.05, 0.0], 1e-8, 1e-12, 0.0, 1.0);
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].len(), 2, "{roots:?}");
        assert_eq!(roots[1].len(), 2, "{roots:?}");
        for (r, e) in roots[0].iter().zip([0.2, 0.8]) {
            assert!((r - e).abs() < 1e-6, "{r} != {e}");
        }
        for (r, e) in roots[1].iter().zip([0.3, 0.7]) {
            assert!((r - e).abs() < 1e-6, "{r} != {e}");
        }
    }

    #[test]
    fn level_sets_of_ramp() {
        let f = SBasis::from_linear(Linear::new(0.0, 1.0));
        let levels = [Interval::new(0.2, 0.3), Interval::new(0.6, 0.7)];
        let sets = level_sets(&f, &levels, 0.0, 1.0, 1e-5);
        assert_eq!(sets.len(), 2);
        for (set, level) in sets.iter().zip(levels) {
            assert_eq!(set.len(), 1, "{set:?}");
            assert!((set[0].min() - level.min()).abs() < 1e-9);
            assert!((set[0].max() - level.max()).abs() < 1e-9);
        }
    }

    #[test]
    fn fuse_merges_neighbours() {
        let fused = fuse_contiguous(
            alloc::vec![
                Interval::new(0.5, 0.6),
                Interval::new(0.0, 0.1),
                Interval::new(0.1 + 1e-7, 0.2),
            ],
            1e-6,
        );
        assert_eq!(fused, [Interval::new(0.0, 0.2), Interval::new(0.5, 0.6)]);
    }
}
