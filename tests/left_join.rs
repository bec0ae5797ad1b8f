use seam::{
    dynamic::{self, DataType, Field, PairSchema, PairShape, Projection, Value},
    left_join, AdaptError, JoinExt,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Customer {
    id: u32,
    name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Order {
    customer_id: u32,
    qty: u32,
}

fn customers() -> Vec<Customer> {
    vec![
        Customer { id: 1, name: "A" },
        Customer { id: 2, name: "B" },
    ]
}

fn orders() -> Vec<Order> {
    vec![Order {
        customer_id: 1,
        qty: 5,
    }]
}

#[test]
fn unmatched_outer_rows_survive_with_default_item() {
    let rows: Vec<_> = left_join(
        customers(),
        orders(),
        |c: &Customer| c.id,
        |o: &Order| o.customer_id,
        |c, o: Option<Order>| (c.name, o.map(|o| o.qty)),
    )
    .collect();
    assert_eq!(rows, vec![("A", Some(5)), ("B", None)]);
}

#[test]
fn empty_outer_yields_empty_result_regardless_of_inner() {
    let rows: Vec<(&str, Option<u32>)> = Vec::<Customer>::new().left_join(
        orders(),
        |c| c.id,
        |o| o.customer_id,
        |c, o: Option<Order>| (c.name, o.map(|o| o.qty)),
    )
    .collect();
    assert!(rows.is_empty());
}

#[test]
fn adapted_pipeline_matches_naive_nested_loop() {
    let outer: Vec<(u32, u32)> = (0..20).map(|i| (i % 7, i)).collect();
    let inner: Vec<(u32, u32)> = (0..15).map(|i| (i % 5, i * 100)).collect();

    let joined: Vec<_> = left_join(
        outer.clone(),
        inner.clone(),
        |o: &(u32, u32)| o.0,
        |i: &(u32, u32)| i.0,
        |o, i: Option<(u32, u32)>| (o.1, i.map(|i| i.1)),
    )
    .collect();

    let mut naive = Vec::new();
    for o in &outer {
        let matches: Vec<_> = inner.iter().filter(|i| i.0 == o.0).collect();
        if matches.is_empty() {
            naive.push((o.1, None));
        } else {
            for i in matches {
                naive.push((o.1, Some(i.1)));
            }
        }
    }
    assert_eq!(joined, naive);
}

#[test]
fn dynamic_join_pads_unmatched_with_null() {
    let schema = PairSchema::new(vec![
        Field::new("group", DataType::Int64, false),
        Field::new("item", DataType::Int64, true),
    ]);
    let projection = Projection::new(DataType::Int64, DataType::Int64, |o: &Value, i: &Value| {
        match (o, i) {
            (Value::Int64(o), Value::Int64(i)) => Value::Int64(o * 100 + i),
            (Value::Int64(o), _) => Value::Int64(o * 100),
            _ => Value::Null,
        }
    });
    let key = |v: &Value| match v {
        Value::Int64(v) => *v % 10,
        _ => unreachable!(),
    };

    let out = dynamic::left_join_rows(
        &PairShape::named("group", "item"),
        &schema,
        vec![Value::Int64(1), Value::Int64(2)],
        vec![Value::Int64(11)],
        key,
        key,
        projection,
    )
    .unwrap();
    assert_eq!(out, vec![Value::Int64(111), Value::Int64(200)]);
}

#[test]
fn dynamic_shape_mismatch_fails_before_any_row() {
    let schema = PairSchema::new(vec![
        Field::new("group", DataType::Int64, false),
        Field::new("item", DataType::Int64, true),
    ]);
    let projection = Projection::new(DataType::Int64, DataType::Int64, |_: &Value, _: &Value| {
        panic!("projection must not run on a mismatched shape")
    });

    let err = dynamic::adapt(&PairShape::named("group", "list"), &schema, projection).unwrap_err();
    assert_eq!(err, AdaptError::UnknownField("list".into()));
}

#[cfg(feature = "stream")]
mod stream {
    use futures::StreamExt;

    use super::*;

    #[tokio::test]
    async fn stream_left_join_matches_iterator_semantics() {
        let rows: Vec<_> = seam::stream::left_join(
            futures::stream::iter(customers()),
            orders(),
            |c: &Customer| c.id,
            |o: &Order| o.customer_id,
            |c, o: Option<Order>| (c.name, o.map(|o| o.qty)),
        )
        .collect()
        .await;
        assert_eq!(rows, vec![("A", Some(5)), ("B", None)]);
    }
}
