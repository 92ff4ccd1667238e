mod chunked_input;

pub use self::chunked_input::ChunkedInput;
pub use self::test_token::{pull, TestToken};

pub static JSON_DOCUMENTS: [&str; 8] = [
    "{}",
    "[]",
    r#"{"a": 1, "b": [true, false, null], "c": {"d": "e"}}"#,
    r#"[0, -1, 2147483647, -2147483648, 2147483648, -9223372036854775808, 9223372036854775807]"#,
    r#"[1.5, -0.25, 1e3, 2.5E-3, -7.0e+2, 0.1]"#,
    r#"{"escapes": "\"\\\/\b\f\n\r\t", "unicode": "é中😀", "raw": "ключ 中文"}"#,
    "  [ [ [ ] ] , { \"\" : [ { } ] } ]  \n",
    r#"{"long": "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua."}"#,
];
