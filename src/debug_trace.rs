use cfg_if::cfg_if;

// NOTE: arguments are never evaluated when the `debug_trace` feature is disabled.
cfg_if! {
    if #[cfg(feature = "debug_trace")] {
        macro_rules! trace {
            ( @feed $bytes:expr ) => {
                println!(
                    "@feed: `{}`",
                    encoding_rs::WINDOWS_1252.decode_without_bom_handling($bytes).0
                );
            };

            ( @carry $bytes:expr ) => {
                println!(
                    "@carry: `{}`",
                    encoding_rs::WINDOWS_1252.decode_without_bom_handling($bytes).0
                );
            };

            ( @token $kind:expr, $offset:expr ) => {
                println!("@token: {} at {}", $kind, $offset);
            };

            ( @state $from:expr => $to:expr ) => {
                if $from != $to {
                    println!("@state: {:?} -> {:?}", $from, $to);
                }
            };

            ( @error $err:expr ) => {
                println!("@error: {}", $err);
            };

            ( @noop $($descr:tt)+ ) => {
                println!("@noop: {}", stringify!($($descr)+));
            };
        }
    } else {
        macro_rules! trace {
            ( $($args:tt)* ) => {};
        }
    }
}
