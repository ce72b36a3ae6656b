#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use jsonmap::{Mapping, Structured, Value};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

/// Last second of year 9999.
const MAX_SECONDS: i64 = 253_402_300_799;

#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub record_id: i64,
    pub display_name: String,
    pub ratio: f64,
    pub labels: Vec<String>,
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 _\\-]{0,12}",
        any::<String>(),
        Just("2020-01-23T01:02:03Z".to_string()),
    ]
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        (any::<i64>(), 0u32..=28).prop_map(|(n, scale)| Value::Decimal(Decimal::new(n, scale))),
        arb_text().prop_map(Value::Text),
        (0..=MAX_SECONDS).prop_map(|s| Value::Timestamp(Utc.timestamp_opt(s, 0).unwrap())),
    ]
}

/// Native values only; no structured records.
pub fn arb_native() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Sequence),
            prop::collection::vec((arb_text(), inner), 0..6)
                .prop_map(|entries| Value::Mapping(entries.into_iter().collect::<Mapping>())),
        ]
    })
}

fn arb_record() -> impl Strategy<Value = Value> {
    (
        any::<i64>(),
        arb_text(),
        -1.0e9f64..1.0e9,
        prop::collection::vec(arb_text(), 0..3),
    )
        .prop_map(|(record_id, display_name, ratio, labels)| {
            Value::from(Structured::new(Record {
                record_id,
                display_name,
                ratio,
                labels,
            }))
        })
}

/// Native values with structured records mixed in at any depth.
pub fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![4 => arb_leaf(), 1 => arb_record()].prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Sequence),
            prop::collection::vec((arb_text(), inner), 0..6)
                .prop_map(|entries| Value::Mapping(entries.into_iter().collect::<Mapping>())),
        ]
    })
}
