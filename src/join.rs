//! Lazy iterator adapters for left-join composition.
//!
//! `left_join` is the composed operator: group-join the two sides on their
//! keys, flatten each group with default-if-empty, then apply the adapted
//! projection. The stages are also exposed individually so pipelines can
//! plug their own stage between grouping and projection.
//!
//! The inner side is hash-built eagerly at construction (one bucket per
//! key, insertion order preserved within a bucket); the outer side streams
//! lazily and its order is preserved in the output.

use std::{collections::HashMap, hash::Hash, vec};

use crate::{
    logging::seam_log,
    pair::{adapt, Group, Paired},
};

/// Iterator over [`Group`]s: each outer element with its matching inner
/// elements.
///
/// Created by [`group_join`].
pub struct GroupJoin<I, K, It, FO> {
    outer: It,
    buckets: HashMap<K, Vec<I>>,
    outer_key: FO,
}

impl<I, K, It, FO> Iterator for GroupJoin<I, K, It, FO>
where
    It: Iterator,
    K: Hash + Eq,
    FO: Fn(&It::Item) -> K,
    I: Clone,
{
    type Item = Group<It::Item, I>;

    fn next(&mut self) -> Option<Self::Item> {
        let outer = self.outer.next()?;
        let key = (self.outer_key)(&outer);
        // Several outer rows may share a bucket, so matches are cloned out.
        let matches = self.buckets.get(&key).cloned().unwrap_or_default();
        Some(Group { outer, matches })
    }
}

/// Group-join `outer` with `inner` on the keys the two selectors extract.
///
/// Yields one [`Group`] per outer element, in outer order. Unmatched outer
/// elements yield a group with empty `matches`; inner elements without an
/// outer counterpart are dropped, as a left join requires.
pub fn group_join<I, K, It, Ii, FO, FI>(
    outer: It,
    inner: Ii,
    outer_key: FO,
    inner_key: FI,
) -> GroupJoin<I, K, It::IntoIter, FO>
where
    It: IntoIterator,
    Ii: IntoIterator<Item = I>,
    K: Hash + Eq,
    FO: Fn(&It::Item) -> K,
    FI: Fn(&I) -> K,
{
    let mut buckets: HashMap<K, Vec<I>> = HashMap::new();
    let mut rows = 0usize;
    for item in inner {
        buckets.entry(inner_key(&item)).or_default().push(item);
        rows += 1;
    }
    seam_log!(
        log::Level::Debug,
        "group_join_build",
        "inner_rows={} buckets={}",
        rows,
        buckets.len(),
    );
    GroupJoin {
        outer: outer.into_iter(),
        buckets,
        outer_key,
    }
}

/// Iterator flattening [`Group`]s into [`Paired`] rows with
/// default-if-empty.
///
/// Created by [`flatten_default`].
pub struct FlattenDefault<O, I, It> {
    groups: It,
    current: Option<(O, vec::IntoIter<I>)>,
}

impl<O, I, It> Iterator for FlattenDefault<O, I, It>
where
    It: Iterator<Item = Group<O, I>>,
    O: Clone,
{
    type Item = Paired<O, I>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((outer, matches)) = &mut self.current {
                if let Some(item) = matches.next() {
                    return Some(Paired {
                        outer: outer.clone(),
                        item: Some(item),
                    });
                }
                self.current = None;
            }
            let group = self.groups.next()?;
            if group.matches.is_empty() {
                // The defining left-join row: outer preserved, no item.
                return Some(Paired {
                    outer: group.outer,
                    item: None,
                });
            }
            self.current = Some((group.outer, group.matches.into_iter()));
        }
    }
}

/// Flatten groups into [`Paired`] rows: one row per match, or exactly one
/// row with `item: None` when the group is empty.
pub fn flatten_default<O, I, It>(groups: It) -> FlattenDefault<O, I, It::IntoIter>
where
    It: IntoIterator<Item = Group<O, I>>,
    O: Clone,
{
    FlattenDefault {
        groups: groups.into_iter(),
        current: None,
    }
}

/// Left-join `outer` with `inner`, projecting every paired row with
/// `projection`.
///
/// Every outer element appears in the output at least once: paired with
/// each matching inner element, or with `None` when nothing matched.
/// Duplicate keys on either side produce the full per-key cross product in
/// outer-then-inner encounter order.
pub fn left_join<O, I, K, R, It, Ii, FO, FI, P>(
    outer: It,
    inner: Ii,
    outer_key: FO,
    inner_key: FI,
    projection: P,
) -> impl Iterator<Item = R>
where
    It: IntoIterator<Item = O>,
    Ii: IntoIterator<Item = I>,
    O: Clone,
    I: Clone,
    K: Hash + Eq,
    FO: Fn(&O) -> K,
    FI: Fn(&I) -> K,
    P: Fn(O, Option<I>) -> R,
{
    let adapted = adapt(projection);
    flatten_default(group_join(outer, inner, outer_key, inner_key)).map(adapted)
}

/// Join composition methods for any `IntoIterator`.
pub trait JoinExt: IntoIterator + Sized {
    /// Left-join `self` with `inner`; see [`left_join`].
    fn left_join<I, K, R, Ii, FO, FI, P>(
        self,
        inner: Ii,
        outer_key: FO,
        inner_key: FI,
        projection: P,
    ) -> impl Iterator<Item = R>
    where
        Self::Item: Clone,
        Ii: IntoIterator<Item = I>,
        I: Clone,
        K: Hash + Eq,
        FO: Fn(&Self::Item) -> K,
        FI: Fn(&I) -> K,
        P: Fn(Self::Item, Option<I>) -> R,
    {
        left_join(self, inner, outer_key, inner_key, projection)
    }

    /// Group-join `self` with `inner`; see [`group_join`].
    fn group_join<I, K, Ii, FO, FI>(
        self,
        inner: Ii,
        outer_key: FO,
        inner_key: FI,
    ) -> GroupJoin<I, K, Self::IntoIter, FO>
    where
        Ii: IntoIterator<Item = I>,
        K: Hash + Eq,
        FO: Fn(&Self::Item) -> K,
        FI: Fn(&I) -> K,
    {
        group_join(self, inner, outer_key, inner_key)
    }
}

impl<T: IntoIterator> JoinExt for T {}
