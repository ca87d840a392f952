//! Drives the exported entry points the way a host does: allocate, write the
//! sample, call, then read the output slots back.

use median_wasm::abi::{allocate, exec, exec_raw};
use median_wasm::{decode_structured, ELEMENT_SIZE, STATUS_INVALID, STATUS_OK};
use std::ptr;
use std::slice;

fn write_sample(values: &[i32]) -> (*const u8, usize) {
    let region = allocate(values.len());
    unsafe { ptr::copy_nonoverlapping(values.as_ptr(), region, values.len()) };
    (region.cast::<u8>().cast_const(), values.len() * ELEMENT_SIZE)
}

#[test]
fn raw_and_structured_agree() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("median_wasm=debug")
        .with_test_writer()
        .try_init();

    let samples: [&[i32]; 4] = [&[5], &[3, 1, 2], &[4, 1, 3, 2], &[-10, 0, 10, 20, 30, 40]];
    for values in samples {
        let (msg, msg_len) = write_sample(values);

        let mut raw = f64::NAN;
        assert_eq!(unsafe { exec_raw(msg, msg_len, &mut raw) }, STATUS_OK);

        let mut out_ptr: *mut u8 = ptr::null_mut();
        let mut out_size = 0usize;
        assert_eq!(
            unsafe { exec(msg, msg_len, &mut out_ptr, &mut out_size) },
            STATUS_OK
        );
        let json = unsafe { slice::from_raw_parts(out_ptr, out_size) };
        assert_eq!(decode_structured(json).unwrap().to_bits(), raw.to_bits());
    }
}

#[test]
fn invalid_length_reports_minus_one_without_writing() {
    let (msg, _) = write_sample(&[1, 2]);

    let mut raw = 123.0f64;
    assert_eq!(unsafe { exec_raw(msg, 7, &mut raw) }, STATUS_INVALID);
    assert_eq!(raw, 123.0);

    let mut out_ptr: *mut u8 = ptr::null_mut();
    let mut out_size = 0usize;
    assert_eq!(
        unsafe { exec(msg, 7, &mut out_ptr, &mut out_size) },
        STATUS_INVALID
    );
    assert!(out_ptr.is_null());
    assert_eq!(out_size, 0);
}

#[test]
fn empty_sample_is_rejected() {
    let mut raw = 1.0f64;
    assert_eq!(unsafe { exec_raw(ptr::null(), 0, &mut raw) }, STATUS_INVALID);
    assert_eq!(raw, 1.0);
}
