use chrono::{TimeZone, Utc};
use jsonmap::{Options, Value, ValueKind};
use rust_decimal::Decimal;

fn decode(s: &str) -> Result<Value, jsonmap::Error> {
    jsonmap::decode_from_str(s, &Options::default())
}

#[test]
fn integers_that_fit_stay_integers() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(decode("0")?, Value::Integer(0));
    assert_eq!(decode("-42")?, Value::Integer(-42));
    assert_eq!(decode("9223372036854775807")?, Value::Integer(i64::MAX));
    assert_eq!(decode("-9223372036854775808")?, Value::Integer(i64::MIN));
    Ok(())
}

#[test]
fn integers_beyond_i64_become_decimals() -> Result<(), Box<dyn std::error::Error>> {
    let v = decode("9223372036854775808")?;
    assert_eq!(v.kind(), ValueKind::Decimal);
    assert_eq!(v, Value::Decimal("9223372036854775808".parse::<Decimal>()?));
    Ok(())
}

#[test]
fn fractions_and_exponents_are_decimals() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(decode("1.01")?, Value::Decimal(Decimal::new(101, 2)));
    assert_eq!(decode("-0.5")?, Value::Decimal(Decimal::new(-5, 1)));
    assert_eq!(decode("1e3")?.kind(), ValueKind::Decimal);
    assert_eq!(decode("1e3")?.as_decimal().map(|d| d.normalize()), Some(Decimal::new(1000, 0)));
    assert_eq!(decode("25E-2")?, Value::Decimal(Decimal::new(25, 2)));
    Ok(())
}

#[test]
fn exponent_boundaries_stay_decimal() -> Result<(), Box<dyn std::error::Error>> {
    for zero in ["0e5", "0e100", "0e-50", "-0E+3"] {
        assert_eq!(decode(zero)?, Value::Decimal(Decimal::ZERO), "{zero}");
    }
    assert_eq!(decode("1.5e-28")?, Value::Decimal(Decimal::new(2, 28)));
    assert_eq!(decode("1e-29")?, Value::Decimal(Decimal::ZERO));
    let past_i64 = Decimal::from(i64::MAX) + Decimal::ONE;
    assert_eq!(decode("9223372036854775808e0")?, Value::Decimal(past_i64));
    assert_eq!(decode("9.223372036854775808e18")?, Value::Decimal(past_i64));
    assert_eq!(decode("[1e2, 100]")?, Value::Sequence(vec![
        Value::Decimal(Decimal::new(100, 0)),
        Value::Integer(100),
    ]));
    Ok(())
}

#[test]
fn date_time_strings_become_timestamps() -> Result<(), Box<dyn std::error::Error>> {
    let expected = Utc.with_ymd_and_hms(2020, 1, 23, 1, 2, 3).unwrap();
    assert_eq!(decode(r#""2020-01-23T01:02:03Z""#)?, Value::Timestamp(expected));
    assert_eq!(decode(r#""2020-01-23T03:02:03+02:00""#)?, Value::Timestamp(expected));
    assert_eq!(decode(r#""2020-01-23T01:02:03""#)?, Value::Timestamp(expected));
    Ok(())
}

#[test]
fn other_strings_stay_text() -> Result<(), Box<dyn std::error::Error>> {
    for s in [r#""2020-01-23""#, r#""hello""#, r#""2020-13-40T99:00:00Z""#, r#""""#] {
        assert_eq!(decode(s)?.kind(), ValueKind::Text, "{}", s);
    }
    assert_eq!(decode(r#""tab\there""#)?, Value::from("tab\there"));
    Ok(())
}

#[test]
fn nested_structure_keeps_order_and_kinds() -> Result<(), Box<dyn std::error::Error>> {
    let v = decode(r#"{"z": [1, 2.5, null, true], "a": {"when": "2021-06-01T00:00:00Z"}}"#)?;
    let m = v.as_mapping().ok_or("root is not a mapping")?;
    assert_eq!(m.keys().collect::<Vec<_>>(), ["z", "a"]);
    let seq = m["z"].as_sequence().ok_or("z is not a sequence")?;
    let kinds: Vec<_> = seq.iter().map(Value::kind).collect();
    assert_eq!(
        kinds,
        [ValueKind::Integer, ValueKind::Decimal, ValueKind::Null, ValueKind::Bool]
    );
    assert_eq!(m["a"].as_mapping().map(|a| a["when"].kind()), Some(ValueKind::Timestamp));
    Ok(())
}

#[test]
fn duplicate_keys_keep_first_position_last_value() -> Result<(), Box<dyn std::error::Error>> {
    let m = jsonmap::decode_mapping_from_str(r#"{"a":1,"b":2,"a":3}"#, &Options::default())?;
    assert_eq!(m.len(), 2);
    assert_eq!(m.get_index(0), Some((&"a".to_string(), &Value::Integer(3))));
    Ok(())
}

#[test]
fn mapping_entry_points() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Options::default();
    assert!(jsonmap::decode_mapping_from_str("", &opts)?.is_empty());
    assert!(jsonmap::decode_mapping_from_str(" \n\t", &opts)?.is_empty());
    let m = jsonmap::decode_mapping_from_reader(&b"{\"name\": 1}"[..], &opts)?;
    assert_eq!(m["name"], Value::Integer(1));
    assert!(jsonmap::decode_mapping_from_str("[1]", &opts).is_err());
    assert!(jsonmap::decode_mapping_from_str("null", &opts).is_err());
    Ok(())
}

#[test]
fn byte_order_mark_is_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let v = jsonmap::decode_from_slice(b"\xEF\xBB\xBF[1]", &Options::default())?;
    assert_eq!(v, Value::Sequence(vec![Value::Integer(1)]));
    Ok(())
}
