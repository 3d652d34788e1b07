//! Decoding scalars, containers and records from wire text.

use std::collections::{BTreeMap, HashMap};

use phpser_codec::codec::{DecodeConfig, IoSource, SliceSource};
use phpser_codec::{Decoder, Error, Serial, from_reader, from_slice, from_str};

#[derive(Serial, Default, Debug)]
struct Holder<T> {
    #[serial(php = "v")]
    value: T,
}

fn out_of_range(err: &Error, expected: &str) -> bool {
    matches!(err, Error::OutOfRange { literal, .. } if literal == expected)
}

#[test]
fn signed_widths() {
    assert_eq!(from_str::<i8>("i:65;").unwrap(), 65);
    assert_eq!(from_str::<Holder<i8>>("a:1:{s:1:\"v\";i:123;}").unwrap().value, 123);
    assert!(out_of_range(&from_str::<i8>("i:128;").unwrap_err(), "128"));
    assert!(out_of_range(
        &from_str::<Holder<i8>>("a:1:{s:1:\"v\";i:-129;}").unwrap_err(),
        "-129"
    ));

    assert!(out_of_range(&from_str::<i16>("i:32768;").unwrap_err(), "32768"));
    assert!(out_of_range(
        &from_str::<Holder<i16>>("a:1:{s:1:\"v\";i:-32769;}").unwrap_err(),
        "-32769"
    ));

    assert!(out_of_range(&from_str::<i32>("i:2147483648;").unwrap_err(), "2147483648"));
    assert!(out_of_range(
        &from_str::<Holder<i32>>("a:1:{s:1:\"v\";i:-2147483649;}").unwrap_err(),
        "-2147483649"
    ));

    assert!(out_of_range(
        &from_str::<i64>("i:9223372036854775808;").unwrap_err(),
        "9223372036854775808"
    ));
    assert!(out_of_range(
        &from_str::<Holder<i64>>("a:1:{s:1:\"v\";i:-9223372036854775809;}").unwrap_err(),
        "-9223372036854775809"
    ));
}

#[test]
fn signed_bounds() {
    assert_eq!(from_str::<i64>("i:685230;").unwrap(), 685230);
    assert_eq!(from_str::<i8>("i:-128;").unwrap(), i8::MIN);
    assert_eq!(from_str::<i8>("i:127;").unwrap(), i8::MAX);
    assert_eq!(from_str::<i16>("i:-32768;").unwrap(), i16::MIN);
    assert_eq!(from_str::<i16>("i:32767;").unwrap(), i16::MAX);
    assert_eq!(from_str::<i32>("i:-2147483648;").unwrap(), i32::MIN);
    assert_eq!(from_str::<i32>("i:2147483647;").unwrap(), i32::MAX);
    assert_eq!(from_str::<i64>("i:-9223372036854775808;").unwrap(), i64::MIN);
    assert_eq!(from_str::<i64>("i:9223372036854775807;").unwrap(), i64::MAX);
}

#[test]
fn out_of_range_message_names_the_literal() {
    let err = from_str::<i8>("i:128;").unwrap_err();
    assert_eq!(err.to_string(), "parsing \"128\": value out of range for i8");
}

#[test]
fn unsigned_widths() {
    assert_eq!(from_str::<u8>("i:255;").unwrap(), 255);
    assert_eq!(from_str::<u64>("i:18446744073709551615;").unwrap(), u64::MAX);
    assert_eq!(from_str::<u32>("i:-0;").unwrap(), 0);
    assert!(out_of_range(&from_str::<u8>("i:256;").unwrap_err(), "256"));
    assert!(out_of_range(&from_str::<u16>("i:-1;").unwrap_err(), "-1"));
}

#[test]
fn integer_grammar() {
    assert!(matches!(from_str::<i64>("i:+5;"), Err(Error::InvalidInt { .. })));
    assert!(matches!(from_str::<i64>("i:;"), Err(Error::InvalidInt { .. })));
    assert!(matches!(from_str::<i64>("i:1e3;"), Err(Error::InvalidInt { .. })));
}

#[test]
fn booleans() {
    assert!(from_str::<bool>("b:1;").unwrap());
    assert!(!from_str::<bool>("b:0;").unwrap());
    let err = from_str::<bool>("b:2;").unwrap_err();
    assert_eq!(err.to_string(), "invalid boolean value");
    assert!(matches!(
        from_str::<Holder<bool>>("a:1:{s:1:\"v\";b:2;}"),
        Err(Error::InvalidBool)
    ));
}

#[test]
fn floats() {
    assert_eq!(from_str::<f64>("d:15.285325;").unwrap(), 15.285325);
    assert_eq!(from_str::<f32>("d:15.285325;").unwrap(), 15.285325_f32);
    assert_eq!(
        from_str::<Holder<f64>>("a:1:{s:1:\"v\";d:15235.12825;}").unwrap().value,
        15235.12825
    );
    assert_eq!(from_str::<f64>("d:INF;").unwrap(), f64::INFINITY);
    assert_eq!(from_str::<f64>("d:-INF;").unwrap(), f64::NEG_INFINITY);
    assert!(from_str::<f64>("d:NAN;").unwrap().is_nan());
    assert_eq!(from_str::<f64>("d:7;").unwrap(), 7.0);

    assert!(out_of_range(
        &from_str::<f32>("d:3.402823466e+50;").unwrap_err(),
        "3.402823466e+50"
    ));
    assert!(out_of_range(
        &from_str::<Holder<f32>>("a:1:{s:1:\"v\";d:3.402823466e+50;}").unwrap_err(),
        "3.402823466e+50"
    ));
    assert!(out_of_range(
        &from_str::<f64>("d:3.402823466e+325;").unwrap_err(),
        "3.402823466e+325"
    ));
    assert!(matches!(from_str::<f64>("d:Infinity;"), Err(Error::InvalidFloat { .. })));
}

#[test]
fn strings_count_bytes() {
    assert_eq!(from_str::<String>("s:5:\"Hello\";").unwrap(), "Hello");
    assert_eq!(from_str::<String>("s:0:\"\";").unwrap(), "");
    assert_eq!(from_str::<String>("s:6:\"héllo\";").unwrap(), "héllo");
    assert_eq!(from_str::<String>("s:3:\";\"}\";").unwrap(), ";\"}");
    assert!(matches!(
        from_slice::<String>(b"s:2:\"\xff\xfe\";"),
        Err(Error::InvalidUtf8)
    ));
    assert!(matches!(
        from_str::<String>("s:5:\"Hello';"),
        Err(Error::Expected { expected: '"', found: '\'' })
    ));
}

#[test]
fn lists() {
    assert_eq!(
        from_str::<Vec<i64>>("a:3:{i:0;i:1;i:1;i:3;i:2;i:5;}").unwrap(),
        [1, 3, 5]
    );
    assert_eq!(
        from_str::<Vec<String>>("a:3:{i:0;s:3:\"one\";i:1;s:5:\"three\";i:2;s:4:\"five\";}").unwrap(),
        ["one", "three", "five"]
    );
    assert!(from_str::<Vec<u8>>("a:0:{}").unwrap().is_empty());
    assert_eq!(
        from_str::<Vec<Vec<u8>>>("a:2:{i:0;a:0:{}i:1;a:1:{i:0;i:9;}}").unwrap(),
        [vec![], vec![9]]
    );
}

#[test]
fn list_keys_must_be_positional() {
    let err = from_str::<Vec<i64>>("a:2:{i:0;i:1;i:5;i:3;}").unwrap_err();
    assert!(matches!(err, Error::KeyOrder { expected: 1, found: 5 }));
    assert_eq!(err.to_string(), "expected offset '1' found '5'");
    assert!(matches!(
        from_str::<Vec<i64>>("a:2:{i:1;i:10;i:0;i:20;}"),
        Err(Error::KeyOrder { expected: 0, found: 1 })
    ));
    assert!(matches!(
        from_str::<Vec<i64>>("a:1:{i:-1;i:1;}"),
        Err(Error::KeyOrder { expected: 0, found: -1 })
    ));
}

#[test]
fn list_is_replaced_not_extended() {
    let mut list = vec![7_i64, 8, 9];
    let mut source = SliceSource::new(b"a:1:{i:0;i:1;}");
    Decoder::new(&mut source).decode_into(&mut list).unwrap();
    assert_eq!(list, [1]);
}

#[test]
fn string_map() {
    let text = "a:2:{s:2:\"id\";s:1:\"1\";s:5:\"value\";s:3:\"One\";}";
    let map: HashMap<String, String> = from_str(text).unwrap();
    let expected = HashMap::from([
        (String::from("id"), String::from("1")),
        (String::from("value"), String::from("One")),
    ]);
    assert_eq!(map, expected);
}

#[test]
fn slice_of_maps() {
    let text = "a:2:{i:0;a:2:{s:2:\"id\";s:1:\"1\";s:5:\"value\";s:3:\"One\";}i:1;a:2:{s:2:\"id\";s:1:\"2\";s:5:\"value\";s:3:\"Two\";}}";
    let maps: Vec<HashMap<String, String>> = from_str(text).unwrap();
    assert_eq!(maps.len(), 2);
    assert_eq!(maps[0]["id"], "1");
    assert_eq!(maps[0]["value"], "One");
    assert_eq!(maps[1]["id"], "2");
    assert_eq!(maps[1]["value"], "Two");
}

#[test]
fn maps() {
    let map: BTreeMap<i64, String> =
        from_str("a:2:{i:45;s:5:\"Hello\";i:17;s:5:\"World\";}").unwrap();
    assert_eq!(map[&45], "Hello");
    assert_eq!(map[&17], "World");

    let map: BTreeMap<String, i64> = from_str("a:2:{s:1:\"k\";i:1;s:1:\"k\";i:2;}").unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map["k"], 2);

    let mut map = BTreeMap::from([(String::from("old"), 1_i64)]);
    let mut source = SliceSource::new(b"a:0:{}");
    Decoder::new(&mut source).decode_into(&mut map).unwrap();
    assert!(map.is_empty());
}

#[test]
fn optional_values() {
    assert_eq!(from_str::<Option<i64>>("N;").unwrap(), None);
    assert_eq!(from_str::<Option<i64>>("i:4;").unwrap(), Some(4));
    assert_eq!(
        from_str::<Vec<Option<String>>>("a:2:{i:0;N;i:1;s:1:\"x\";}").unwrap(),
        [None, Some(String::from("x"))]
    );
    from_str::<()>("N;").unwrap();
    assert!(matches!(
        from_str::<()>("N:"),
        Err(Error::Expected { expected: ';', found: ':' })
    ));
}

#[test]
fn truncated_input() {
    assert!(from_str::<i64>("").unwrap_err().is_eof());
    assert!(from_str::<i64>("i:5").unwrap_err().is_eof());
    assert!(from_str::<f64>("d:").unwrap_err().is_eof());
    assert!(from_str::<String>("s:5:\"Hel").unwrap_err().is_eof());
    assert!(from_str::<Vec<i64>>("a:2:{i:0;i:1;").unwrap_err().is_eof());
    assert!(from_str::<Vec<i64>>("a:1:{i:0;i:1;").unwrap_err().is_eof());
}

#[test]
fn declared_length_beyond_input() {
    let err = from_str::<Vec<i64>>("a:4000000000:{i:0;i:1;").unwrap_err();
    assert!(err.is_eof());
    let err = from_str::<String>("s:4000000000:\"abc").unwrap_err();
    assert!(err.is_eof());
    let err = from_str::<BTreeMap<i64, i64>>("a:4000000000:{").unwrap_err();
    assert!(err.is_eof());
}

#[test]
fn trailing_bytes_are_left_alone() {
    assert_eq!(from_str::<i64>("i:1;garbage").unwrap(), 1);
    let mut source = SliceSource::new(b"i:1;i:2;");
    let mut decoder = Decoder::new(&mut source);
    assert_eq!(decoder.decode::<i64>().unwrap(), 1);
    assert_eq!(decoder.decode::<i64>().unwrap(), 2);
}

#[test]
fn decoder_primitives() {
    let mut source = SliceSource::new(b"b:1;");
    let err = Decoder::new(&mut source).decode_f64().unwrap_err();
    assert_eq!(err.to_string(), "expected byte 'd' found 'b'");

    let mut source = SliceSource::new(b"d:");
    assert!(Decoder::new(&mut source).decode_f64().unwrap_err().is_eof());

    let mut source = SliceSource::new(b"a:1:{i:0;s:1:\"x\";}i:3;");
    let mut decoder = Decoder::with_config(&mut source, DecodeConfig::new());
    assert_eq!(decoder.peek_code().unwrap(), b'a');
    decoder.skip_value().unwrap();
    assert_eq!(decoder.decode_int::<u8>().unwrap(), 3);
}

#[test]
fn reader_input() {
    let text: &[u8] = b"a:2:{i:0;s:3:\"one\";i:1;s:3:\"two\";}";
    let list: Vec<String> = from_reader(text).unwrap();
    assert_eq!(list, ["one", "two"]);

    let reader = std::io::BufReader::with_capacity(3, text);
    let mut source = IoSource::new(reader);
    let list: Vec<String> = Decoder::new(&mut source).decode().unwrap();
    assert_eq!(list, ["one", "two"]);
}

#[test]
fn opaque_types_are_unsupported() {
    assert!(matches!(
        from_str::<char>("s:1:\"c\";"),
        Err(Error::Unsupported { type_path: "char" })
    ));
    assert!(matches!(
        from_str::<Vec<i128>>("a:1:{i:0;i:1;}"),
        Err(Error::Unsupported { type_path: "i128" })
    ));
}

#[test]
fn unsupported_leaves_input_untouched() {
    let mut source = SliceSource::new(b"i:1;");
    let mut wide = 0_i128;
    let err = Decoder::new(&mut source).decode_into(&mut wide).unwrap_err();
    assert!(matches!(err, Error::Unsupported { .. }));
    assert_eq!(source.position(), 0);
}
