//! Encoding values, and how a failing writer leaves its output.

use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};

use phpser_codec::codec::IoSink;
use phpser_codec::{Encoder, Error, Serial, to_string, to_vec, to_writer};

#[derive(Serial, Default)]
struct Contained<T> {
    #[serial(php = "value")]
    value: T,
}

fn contained<T>(value: T) -> Contained<T> {
    Contained { value }
}

#[test]
fn strings() {
    assert_eq!(to_string(&String::from("Hello")).unwrap(), "s:5:\"Hello\";");
    assert_eq!(
        to_string(&contained(String::from("World"))).unwrap(),
        "a:1:{s:5:\"value\";s:5:\"World\";}"
    );
    assert_eq!(to_string(&String::from("日本")).unwrap(), "s:6:\"日本\";");
}

#[test]
fn signed_ints() {
    assert_eq!(to_string(&12345_i64).unwrap(), "i:12345;");
    assert_eq!(to_string(&-100_i8).unwrap(), "i:-100;");
    assert_eq!(to_string(&2134_i16).unwrap(), "i:2134;");
    assert_eq!(to_string(&-912745_i32).unwrap(), "i:-912745;");
    assert_eq!(to_string(&73912745_isize).unwrap(), "i:73912745;");
    assert_eq!(to_string(&contained(120_i8)).unwrap(), "a:1:{s:5:\"value\";i:120;}");
}

#[test]
fn unsigned_ints() {
    assert_eq!(to_string(&255_u8).unwrap(), "i:255;");
    assert_eq!(to_string(&4002_u16).unwrap(), "i:4002;");
    assert_eq!(to_string(&98743_u32).unwrap(), "i:98743;");
    assert_eq!(to_string(&9702398740_u64).unwrap(), "i:9702398740;");
    assert_eq!(to_string(&23702235398740_usize).unwrap(), "i:23702235398740;");
}

#[test]
fn nils() {
    assert_eq!(to_string(&None::<String>).unwrap(), "N;");
    assert_eq!(to_string(&()).unwrap(), "N;");
    assert_eq!(
        to_string(&contained(None::<String>)).unwrap(),
        "a:1:{s:5:\"value\";N;}"
    );
    assert_eq!(to_string(&Some(Box::new(3_u8))).unwrap(), "i:3;");
}

#[test]
fn floats() {
    assert_eq!(to_string(&15.35_f64).unwrap(), "d:15.35;");
    assert_eq!(to_string(&-19275.1872_f64).unwrap(), "d:-19275.1872;");
    assert_eq!(to_string(&f64::NEG_INFINITY).unwrap(), "d:-INF;");
    assert_eq!(to_string(&f64::INFINITY).unwrap(), "d:INF;");
    assert_eq!(to_string(&f64::NAN).unwrap(), "d:NAN;");
    assert_eq!(to_string(&f32::NEG_INFINITY).unwrap(), "d:-INF;");
    assert_eq!(to_string(&f32::INFINITY).unwrap(), "d:INF;");
    assert_eq!(to_string(&f32::NAN).unwrap(), "d:NAN;");
    assert_eq!(to_string(&15.285325_f32).unwrap(), "d:15.285325;");
    assert_eq!(to_string(&3.0_f64).unwrap(), "d:3;");
    assert_eq!(
        to_string(&contained(12.456_f64)).unwrap(),
        "a:1:{s:5:\"value\";d:12.456;}"
    );
}

#[test]
fn booleans() {
    assert_eq!(to_string(&true).unwrap(), "b:1;");
    assert_eq!(to_string(&false).unwrap(), "b:0;");
    assert_eq!(to_string(&contained(true)).unwrap(), "a:1:{s:5:\"value\";b:1;}");
}

#[test]
fn lists() {
    assert_eq!(
        to_string(&vec![1_i64, 3, 5]).unwrap(),
        "a:3:{i:0;i:1;i:1;i:3;i:2;i:5;}"
    );
    assert_eq!(
        to_string(&vec![String::from("one"), String::from("three"), String::from("five")]).unwrap(),
        "a:3:{i:0;s:3:\"one\";i:1;s:5:\"three\";i:2;s:4:\"five\";}"
    );
    assert_eq!(to_string(&Vec::<String>::new()).unwrap(), "a:0:{}");
    assert_eq!(to_string(&None::<Vec<String>>).unwrap(), "N;");
}

#[test]
fn int_key_map() {
    let map = HashMap::from([(45_i64, String::from("Hello")), (17, String::from("World"))]);
    let text = to_string(&map).unwrap();
    assert!(
        text == "a:2:{i:45;s:5:\"Hello\";i:17;s:5:\"World\";}"
            || text == "a:2:{i:17;s:5:\"World\";i:45;s:5:\"Hello\";}",
        "{text}"
    );
}

#[test]
fn string_key_map_in_order() {
    let map = BTreeMap::from([
        (String::from("b"), String::from("World")),
        (String::from("a"), String::from("Hello")),
    ]);
    assert_eq!(
        to_string(&map).unwrap(),
        "a:2:{s:1:\"a\";s:5:\"Hello\";s:1:\"b\";s:5:\"World\";}"
    );
}

#[test]
fn unsupported() {
    let err = to_vec(&7_i128).unwrap_err();
    assert!(matches!(err, Error::Unsupported { type_path: "i128" }));
    assert_eq!(err.to_string(), "unsupported type `i128`");
    assert!(matches!(
        to_vec(&contained('x')),
        Err(Error::Unsupported { type_path: "char" })
    ));
}

#[test]
fn encoder_primitives() {
    let mut out = Vec::new();
    let mut encoder = Encoder::new(&mut out);
    encoder.encode_nil().unwrap();
    encoder.encode_bool(true).unwrap();
    encoder.encode_int(-3).unwrap();
    encoder.encode_float(0.5_f64).unwrap();
    encoder.encode_str("x").unwrap();
    assert_eq!(out, b"N;b:1;i:-3;d:0.5;s:1:\"x\";");
}

// -----------------------------------------------------------------------------
// Failing writers

/// Accepts whole writes until `capacity` bytes would be exceeded.
struct CapacityWriter {
    capacity: usize,
    buffer: Vec<u8>,
}

impl Write for CapacityWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.buffer.len() + buf.len() > self.capacity {
            return Err(io::Error::other("writer capacity exceeded"));
        }
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn written_before_failure<T: Serial>(capacity: usize, value: &T) -> String {
    let mut sink = IoSink::new(CapacityWriter {
        capacity,
        buffer: Vec::new(),
    });
    let err = Encoder::new(&mut sink).encode(value).unwrap_err();
    match err {
        Error::Io(err) => assert_eq!(err.to_string(), "writer capacity exceeded"),
        other => panic!("unexpected error: {other}"),
    }
    String::from_utf8(sink.into_inner().buffer).unwrap()
}

#[derive(Serial, Default)]
struct Pair {
    #[serial(php = "v1")]
    v1: i8,
    #[serial(php = "v2")]
    v2: String,
}

#[test]
fn scalar_prefixes() {
    assert_eq!(written_before_failure(0, &1234_i64), "");
    assert_eq!(written_before_failure(2, &1234_i64), "i:");
    assert_eq!(written_before_failure(0, &9876_u64), "");
    assert_eq!(written_before_failure(2, &9876_u64), "i:");
    assert_eq!(written_before_failure(0, &true), "");
    assert_eq!(written_before_failure(2, &true), "b:");
    assert_eq!(written_before_failure(0, &14.53_f64), "");
    assert_eq!(written_before_failure(2, &14.53_f64), "d:");
    assert_eq!(written_before_failure(2, &f64::NEG_INFINITY), "d:");
    assert_eq!(written_before_failure(2, &f64::INFINITY), "d:");
    assert_eq!(written_before_failure(2, &f64::NAN), "d:");
    assert_eq!(written_before_failure(6, &f64::NEG_INFINITY), "d:-INF");
    assert_eq!(written_before_failure(5, &f64::INFINITY), "d:INF");
    assert_eq!(written_before_failure(5, &f64::NAN), "d:NAN");
}

#[test]
fn string_prefixes() {
    let hello = String::from("Hello");
    assert_eq!(written_before_failure(0, &hello), "");
    assert_eq!(written_before_failure(2, &hello), "s:");
    assert_eq!(written_before_failure(4, &hello), "s:5");
    assert_eq!(written_before_failure(6, &hello), "s:5:\"");
    assert_eq!(written_before_failure(10, &hello), "s:5:\"Hello");
}

#[test]
fn map_prefixes() {
    let map = BTreeMap::from([(2_i64, String::from("Hello"))]);
    assert_eq!(written_before_failure(0, &map), "");
    assert_eq!(written_before_failure(2, &map), "a:");
    assert_eq!(written_before_failure(3, &map), "a:1");
    assert_eq!(written_before_failure(5, &map), "a:1:{");
    assert_eq!(written_before_failure(9, &map), "a:1:{i:2;");
    assert_eq!(written_before_failure(21, &map), "a:1:{i:2;s:5:\"Hello\";");
}

#[test]
fn list_prefixes() {
    let ints = vec![10_i64, 92];
    assert_eq!(written_before_failure(0, &ints), "");
    assert_eq!(written_before_failure(5, &ints), "a:2:{");
    assert_eq!(written_before_failure(9, &ints), "a:2:{i:0;");
    assert_eq!(written_before_failure(14, &ints), "a:2:{i:0;i:10;");
    assert_eq!(written_before_failure(18, &ints), "a:2:{i:0;i:10;i:1;");
    assert_eq!(written_before_failure(23, &ints), "a:2:{i:0;i:10;i:1;i:92;");
}

#[test]
fn record_prefixes() {
    let pair = Pair {
        v1: 14,
        v2: String::from("World"),
    };
    assert_eq!(written_before_failure(0, &pair), "");
    assert_eq!(written_before_failure(5, &pair), "a:2:{");
    assert_eq!(written_before_failure(14, &pair), "a:2:{s:2:\"v1\";");
    assert_eq!(written_before_failure(19, &pair), "a:2:{s:2:\"v1\";i:14;");
}

#[test]
fn to_writer_reports_io_errors() {
    let writer = CapacityWriter {
        capacity: 3,
        buffer: Vec::new(),
    };
    assert!(matches!(to_writer(writer, &1234_i64), Err(Error::Io(_))));

    let mut out = Vec::new();
    to_writer(&mut out, &vec![true]).unwrap();
    assert_eq!(out, b"a:1:{i:0;b:1;}");
}
