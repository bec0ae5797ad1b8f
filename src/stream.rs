//! Left join over an async outer stream.
//!
//! Same semantics as [`crate::join::left_join`]: the inner side is an
//! in-memory collection hash-built up front, the outer side arrives
//! asynchronously, and one projected row is yielded per pairing, in outer
//! arrival order. Runtime-agnostic; only the outer stream awaits.

use std::{collections::HashMap, hash::Hash};

use async_stream::stream;
use futures_core::Stream;

use crate::{
    logging::seam_log,
    pair::{adapt, Paired},
};

/// Left-join an async `outer` stream with an in-memory `inner` collection,
/// projecting every paired row with `projection`.
///
/// Every outer element is yielded at least once: paired with each matching
/// inner element, or with `None` when nothing matched.
pub fn left_join<O, I, K, R, S, Ii, FO, FI, P>(
    outer: S,
    inner: Ii,
    outer_key: FO,
    inner_key: FI,
    projection: P,
) -> impl Stream<Item = R>
where
    S: Stream<Item = O>,
    Ii: IntoIterator<Item = I>,
    O: Clone,
    I: Clone,
    K: Hash + Eq,
    FO: Fn(&O) -> K,
    FI: Fn(&I) -> K,
    P: Fn(O, Option<I>) -> R,
{
    let mut buckets: HashMap<K, Vec<I>> = HashMap::new();
    for item in inner {
        buckets.entry(inner_key(&item)).or_default().push(item);
    }
    seam_log!(
        log::Level::Debug,
        "stream_join_build",
        "buckets={}",
        buckets.len(),
    );
    let adapted = adapt(projection);
    stream! {
        for await row in outer {
            let key = outer_key(&row);
            match buckets.get(&key) {
                Some(matches) => {
                    for item in matches.clone() {
                        yield adapted(Paired {
                            outer: row.clone(),
                            item: Some(item),
                        });
                    }
                }
                None => {
                    yield adapted(Paired {
                        outer: row,
                        item: None,
                    });
                }
            }
        }
    }
}
