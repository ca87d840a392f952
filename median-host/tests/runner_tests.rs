use median_host::{HostConfig, HostError, MedianRunner};
use median_wasm::OutputEncoding;

/// A guest that speaks the same ABI as the median module, with canned answers:
/// `exec_raw` echoes the first sample value, `exec` always reports 2.5.
/// Both reject lengths that are zero or not a multiple of four.
const STUB_GUEST: &str = r#"
    (module
        (memory (export "memory") 1)
        (global $heap (mut i32) (i32.const 1024))
        (data (i32.const 16) "{\"median\":2.5}")

        (func $reject (param $len i32) (result i32)
            (i32.or
                (i32.eqz (local.get $len))
                (i32.ne (i32.rem_u (local.get $len) (i32.const 4)) (i32.const 0))))

        (func (export "allocate") (param $count i32) (result i32)
            (local $ptr i32)
            (local.set $ptr (global.get $heap))
            (global.set $heap
                (i32.add (global.get $heap) (i32.mul (local.get $count) (i32.const 4))))
            (local.get $ptr))

        (func (export "exec_raw") (param $msg i32) (param $len i32) (param $out i32) (result i32)
            (if (call $reject (local.get $len))
                (then (return (i32.const -1))))
            (f64.store (local.get $out) (f64.convert_i32_s (i32.load (local.get $msg))))
            (i32.const 0))

        (func (export "exec") (param $msg i32) (param $len i32) (param $out i32) (param $size i32) (result i32)
            (if (call $reject (local.get $len))
                (then (return (i32.const -1))))
            (i32.store (local.get $out) (i32.const 16))
            (i32.store (local.get $size) (i32.const 14))
            (i32.const 0))
    )
"#;

fn runner(encoding: OutputEncoding) -> MedianRunner {
    let wasm = wat::parse_str(STUB_GUEST).unwrap();
    let config = HostConfig {
        encoding,
        ..HostConfig::default()
    };
    MedianRunner::from_bytes(&wasm, config).unwrap()
}

#[test]
fn raw_call_round_trips_sample_bytes() {
    let runner = runner(OutputEncoding::Raw);
    assert_eq!(runner.median(&[-7, 3, 9]).unwrap(), -7.0);
    assert_eq!(runner.median(&[123456]).unwrap(), 123456.0);
}

#[test]
fn structured_call_follows_pointer_slots() {
    let runner = runner(OutputEncoding::Structured);
    assert_eq!(runner.median(&[3, 1, 2]).unwrap(), 2.5);
}

#[test]
fn non_zero_status_is_reported() {
    for encoding in [OutputEncoding::Raw, OutputEncoding::Structured] {
        let runner = runner(encoding);
        assert!(matches!(runner.exec_bytes(&[0u8; 7]), Err(HostError::Status(-1))));
        assert!(matches!(runner.median(&[]), Err(HostError::Status(-1))));
    }
}

#[test]
fn missing_entry_point_is_reported() {
    let wasm = wat::parse_str(
        r#"(module
            (memory (export "memory") 1)
            (func (export "allocate") (param i32) (result i32) (i32.const 64)))"#,
    )
    .unwrap();
    let runner = MedianRunner::from_bytes(&wasm, HostConfig::default()).unwrap();
    match runner.median(&[1, 2, 3]) {
        Err(HostError::MissingExport(name)) => assert!(name.starts_with("exec")),
        other => panic!("expected missing export, got {:?}", other),
    }
}

#[test]
fn missing_memory_is_reported() {
    let wasm = wat::parse_str("(module)").unwrap();
    let runner = MedianRunner::from_bytes(&wasm, HostConfig::default()).unwrap();
    assert!(matches!(
        runner.median(&[1]),
        Err(HostError::MissingExport(name)) if name == "memory"
    ));
}

#[test]
fn memory_limit_is_enforced() {
    let wasm = wat::parse_str(r#"(module (memory (export "memory") 4))"#).unwrap();
    let config = HostConfig {
        max_memory_bytes: 2 * 64 * 1024,
        ..HostConfig::default()
    };
    let runner = MedianRunner::from_bytes(&wasm, config).unwrap();
    assert!(matches!(runner.median(&[1]), Err(HostError::Wasm(_))));
}

#[test]
fn invalid_binary_is_rejected() {
    let result = MedianRunner::from_bytes(b"not wasm", HostConfig::default());
    assert!(matches!(result, Err(HostError::Wasm(_))));
}

/// Runs against the real guest when its path is given in `MEDIAN_WASM_MODULE`
/// (e.g. after `cargo build -p median-wasm --target wasm32-unknown-unknown --release`).
#[test]
fn compiled_guest_when_available() {
    let Some(path) = std::env::var_os("MEDIAN_WASM_MODULE") else {
        return;
    };
    for encoding in [OutputEncoding::Raw, OutputEncoding::Structured] {
        let config = HostConfig {
            encoding,
            ..HostConfig::default()
        };
        let runner = MedianRunner::from_file(path.as_ref(), config).unwrap();
        assert_eq!(runner.median(&[5]).unwrap(), 5.0);
        assert_eq!(runner.median(&[3, 1, 2]).unwrap(), 2.0);
        assert_eq!(runner.median(&[4, 1, 3, 2]).unwrap(), 2.5);
        assert!(matches!(runner.exec_bytes(&[0u8; 7]), Err(HostError::Status(-1))));
    }
}
