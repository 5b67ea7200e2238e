// Copyright 2018 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2D geometry built on the symmetric power basis.
//!
//! The sbgeom library represents curves as polynomials in the symmetric
//! power basis ([`SBasis`]), a form where composition, derivatives and
//! root finding stay exact and cheap. On top of that algebra sit Bézier
//! curves, elliptical arcs and continuous [`Path`]s, curve intersection,
//! and boolean operations on [`Shape`]s made of nested [`Region`]s.
//!
//! # Examples
//!
//! Functions of one variable:
//! ```
//! use sbgeom::{Linear, SBasis};
//!
//! // f(t) = t, so f² = t² and its derivative is 2t.
//! let f = SBasis::from(Linear::new(0.0, 1.0));
//! let g = &f * &f;
//! assert!((g.value_at(0.5) - 0.25).abs() < 1e-12);
//! assert!((g.derivative().value_at(0.5) - 1.0).abs() < 1e-12);
//! ```
//!
//! Boolean operations on shapes:
//!
//! ```
//! use sbgeom::{shape_union, Path, Point, Rect, Region, Shape};
//!
//! let square = |x: f64, y: f64| {
//!     Shape::from_region(Region::new(Path::rect(Rect::new(x, y, x + 2.0, y + 2.0))))
//! };
//! let joined = shape_union(&square(0.0, 0.0), &square(1.0, 1.0)).unwrap();
//! assert_eq!(joined.regions().len(), 1);
//! assert!(joined.contains(Point::new(2.5, 2.5)));
//! assert!(!joined.contains(Point::new(0.5, 2.5)));
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. This is useful for
//! `no_std` environments. However, note that the `libm` crate is not as
//! efficient as the standard library, and that this crate still uses the
//! `alloc` crate regardless.
//!
//! [`libm`]: https://docs.rs/libm

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision,
    clippy::bool_to_int_with_if
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("sbgeom requires either the `std` or `libm` feature");

extern crate alloc;

mod affine;
mod arc;
mod bezier;
mod bezier_curve;
pub mod common;
mod crossing;
mod cubicbez;
mod curve;
mod d2;
mod dim2;
mod error;
mod intersection;
mod interval;
mod line;
mod linear;
mod param_curve;
mod path;
mod piecewise;
mod point;
mod quadbez;
mod rect;
mod region;
mod sbasis;
mod sbasis_curve;
pub mod sbasis_to_bezier;
mod shape;
pub mod solver;
mod sweep;
mod vec2;

pub use crate::affine::*;
pub use crate::arc::*;
pub use crate::bezier::*;
pub use crate::bezier_curve::*;
pub use crate::crossing::*;
pub use crate::cubicbez::*;
pub use crate::curve::*;
pub use crate::d2::*;
pub use crate::dim2::*;
pub use crate::error::*;
pub use crate::intersection::*;
pub use crate::interval::*;
pub use crate::line::*;
pub use crate::linear::*;
pub use crate::param_curve::*;
pub use crate::path::*;
pub use crate::piecewise::*;
pub use crate::point::*;
pub use crate::quadbez::*;
pub use crate::rect::*;
pub use crate::region::*;
pub use crate::sbasis::*;
pub use crate::sbasis_curve::*;
pub use crate::shape::*;
pub use crate::sweep::*;
pub use crate::vec2::*;
