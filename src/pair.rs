//! Paired-value shapes and the typed projection adapter.
//!
//! The intermediate shapes of a left join are named structs with fixed
//! field order, so the typed path never looks fields up by name: a
//! projection that does not fit the shape is a compile error.

/// One outer element grouped with every matching inner element.
///
/// Produced by the group-join stage. `matches` is empty when the outer
/// element had no match; the flatten stage turns that into a single
/// [`Paired`] row with no item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<O, I> {
    /// The outer element.
    pub outer: O,
    /// All matching inner elements, in encounter order.
    pub matches: Vec<I>,
}

/// One flattened left-join row.
///
/// `item` is `None` exactly when the outer element had no matching inner
/// element — the default-if-empty substitution that defines a left join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paired<O, I> {
    /// The outer element, repeated once per match.
    pub outer: O,
    /// The matched inner element, or `None` for an unmatched outer row.
    pub item: Option<I>,
}

/// Turn a two-argument projection into a one-argument projection over
/// [`Paired`].
///
/// Pure composition, performed once per query definition; applying the
/// returned closure to every row is the pipeline's concern. For every
/// pair `p`, `adapt(f)(p)` equals `f(p.outer, p.item)`.
pub fn adapt<O, I, R, F>(projection: F) -> impl Fn(Paired<O, I>) -> R
where
    F: Fn(O, Option<I>) -> R,
{
    move |pair| projection(pair.outer, pair.item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapted_matches_direct_call() {
        let project = |name: &'static str, qty: Option<u32>| (name, qty);
        let adapted = adapt(project);

        let matched = Paired {
            outer: "A",
            item: Some(5u32),
        };
        assert_eq!(
            adapted(matched.clone()),
            project(matched.outer, matched.item)
        );
    }

    #[test]
    fn default_item_passes_through() {
        let adapted = adapt(|name: &'static str, qty: Option<u32>| (name, qty));
        assert_eq!(adapted(Paired { outer: "B", item: None }), ("B", None));
    }

    #[test]
    fn repeated_adaptation_is_equivalent() {
        let first = adapt(|o: u32, i: Option<u32>| o + i.unwrap_or(0));
        let second = adapt(|o: u32, i: Option<u32>| o + i.unwrap_or(0));
        for pair in [
            Paired { outer: 1, item: Some(2) },
            Paired { outer: 3, item: None },
        ] {
            assert_eq!(first(pair.clone()), second(pair));
        }
    }
}
