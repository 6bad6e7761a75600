//! End-to-end pipelines over in-memory sequences.

use pipeflow::prelude::*;
use quickcheck::quickcheck;

fn mk_numbers(n: i32) -> Vec<i32> {
    (1..=n).collect()
}

#[test]
fn test_filter_then_transform_squares_evens() {
    let squares = as_data_flow(mk_numbers(8))
        | filter(|x: &i32| x % 2 == 0)
        | transform(|x: i32| x * x)
        | as_vector();
    assert_eq!(squares, vec![4, 16, 36, 64]);
}

#[test]
fn test_stateful_transform_running_total() {
    let mut total = 0;
    let running = as_data_flow(mk_numbers(5))
        | transform(move |x: i32| {
            total += x;
            total
        })
        | as_vector();
    assert_eq!(running, vec![1, 3, 6, 10, 15]);
}

#[test]
fn test_transform_side_effects_run_once_per_element() {
    let mut seen = Vec::new();
    let out = as_data_flow(vec!["a", "b", "c"])
        | transform(|s: &str| {
            seen.push(s.to_string());
            s.len()
        })
        | as_vector();
    assert_eq!(out, vec![1, 1, 1]);
    assert_eq!(seen, vec!["a", "b", "c"]);
}

#[test]
fn test_filter_sees_every_element_in_order() {
    let mut visited = Vec::new();
    let kept = as_data_flow(vec![5, 2, 9, 4])
        | filter(|x: &i32| {
            visited.push(*x);
            *x > 3
        })
        | as_vector();
    assert_eq!(kept, vec![5, 9, 4]);
    assert_eq!(visited, vec![5, 2, 9, 4]);
}

#[test]
fn test_write_positive_numbers() {
    let mut buf: Vec<u8> = Vec::new();
    let res = as_data_flow(vec![1, -3, 2, -7])
        | filter(|x: &i32| *x > 0)
        | write(&mut buf, ',');
    assert!(res.is_ok());
    assert_eq!(String::from_utf8(buf).unwrap(), "1,2,");
}

#[test]
fn test_out_writes_one_element_per_line() {
    let mut buf: Vec<u8> = Vec::new();
    let res = as_data_flow(vec!["alpha", "beta"]) | out(&mut buf);
    assert!(res.is_ok());
    assert_eq!(String::from_utf8(buf).unwrap(), "alpha\nbeta\n");
}

#[test]
fn test_write_empty_flow_leaves_sink_untouched() {
    let mut buf: Vec<u8> = Vec::new();
    let res = as_data_flow(Vec::<u32>::new()) | write(&mut buf, ';');
    assert!(res.is_ok());
    assert!(buf.is_empty());
}

#[test]
fn test_drop_none_then_for_each() {
    let mut sum = 0;
    as_data_flow(vec![Some(1), None, Some(4), None])
        | drop_none()
        | for_each(|x: i32| sum += x);
    assert_eq!(sum, 5);
}

#[test]
fn test_empty_pipeline_is_empty_at_every_stage() {
    let mut flow = as_data_flow(Vec::<i32>::new())
        | filter(|_: &i32| true)
        | transform(|x: i32| x + 1);
    let end = flow.end();
    let cursor = flow.begin();
    assert!(cursor.same_exhaustion_state(&end));
    drop(cursor);
    assert!((flow | as_vector()).is_empty());
}

#[test]
fn test_end_cursor_cannot_be_read() {
    let flow = as_data_flow(vec![1]);
    let mut end = flow.end();
    assert!(matches!(end.current(), Err(Error::InvalidCursorState(_))));
}

#[test]
fn test_flow_iterates_like_std() {
    let mut flow = as_data_flow(mk_numbers(4)) | transform(|x: i32| x * 10);
    let total: i32 = flow.iter().sum();
    assert_eq!(total, 100);
}

#[test]
fn test_filter_matches_std_filter() {
    fn prop(xs: Vec<i64>) -> bool {
        let expected: Vec<i64> = xs.iter().copied().filter(|x| x % 3 == 0).collect();
        let got = as_data_flow(xs) | filter(|x: &i64| x % 3 == 0) | as_vector();
        got == expected
    }
    quickcheck(prop as fn(Vec<i64>) -> bool);
}

#[test]
fn test_transform_preserves_length_and_order() {
    fn prop(xs: Vec<i32>) -> bool {
        let expected: Vec<i64> = xs.iter().map(|x| i64::from(*x) * 2).collect();
        let got = as_data_flow(xs) | transform(|x: i32| i64::from(x) * 2) | as_vector();
        got == expected
    }
    quickcheck(prop as fn(Vec<i32>) -> bool);
}
