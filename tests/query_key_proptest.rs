use proptest::prelude::*;
use resource_store::framework::Query;
use serde_json::Value;

fn param_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-z0-9 &=]{0,8}".prop_map(Value::from),
        prop::collection::vec("[a-z]{1,4}", 0..3).prop_map(Value::from),
    ]
}

proptest! {
    #[test]
    fn key_ignores_insertion_order(
        params in prop::collection::btree_map("[a-z_]{1,8}", param_value(), 0..6)
    ) {
        let forward = params
            .iter()
            .fold(Query::new(), |q, (name, value)| q.with(name.clone(), value.clone()));
        let backward = params
            .iter()
            .rev()
            .fold(Query::new(), |q, (name, value)| q.with(name.clone(), value.clone()));

        prop_assert_eq!(forward.key(), backward.key());
        prop_assert_eq!(forward.pairs(), backward.pairs());
    }

    #[test]
    fn null_parameters_do_not_change_the_key(
        params in prop::collection::btree_map("[a-z]{1,8}", param_value(), 0..6),
        extra in "[A-Z]{1,4}"
    ) {
        let base = params
            .iter()
            .fold(Query::new(), |q, (name, value)| q.with(name.clone(), value.clone()));
        let with_null = base.clone().with(extra, Value::Null);

        prop_assert_eq!(base.key(), with_null.key());
    }
}
