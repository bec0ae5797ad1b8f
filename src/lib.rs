#![deny(missing_docs)]
//! Left outer join composition for iterator and stream pipelines.
//!
//! A left join preserves every outer row, substituting a default for the
//! inner side when no match exists. This crate expresses that as the
//! classic two-stage pipeline: a group-join (one [`Group`] per outer row,
//! holding every matching inner row) flattened with default-if-empty into
//! [`Paired`] rows, then re-projected with a caller-supplied two-argument
//! function that [`adapt`] turns into a one-argument projection over the
//! paired shape.
//!
//! The typed path ([`join`], [`pair`]) makes shape mismatches compile-time
//! errors. The [`dynamic`] path works over runtime-schema rows and performs
//! the same checks once, at query definition, before any row flows.

mod logging;

pub mod dynamic;
pub mod error;
pub mod join;
pub mod pair;

#[cfg(feature = "stream")]
pub mod stream;

pub use crate::{
    error::AdaptError,
    join::{flatten_default, group_join, left_join, JoinExt},
    pair::{adapt, Group, Paired},
};
