/*!
 * Dynamic Invocation Tests
 * End-to-end coverage of the arity-erased dispatch contracts
 */

use dispatch_core::{
    compute_begin_invoke_params, fault, split_begin_invoke_params, value, value_ref,
    AsyncExecutor, CallerThread, DispatchError, DynamicAsyncInvoker, DynamicCallback,
    DynamicInvoker, Handle,
};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_dynamic_invoke_forwards_args_unchanged() {
    let invoker = DynamicInvoker::new(Handle::func3(|a: i64, b: i64, c: i64| {
        Ok(a * 100 + b * 10 + c)
    }));

    let out = invoker
        .dynamic_invoke(&[value(1i64), value(2i64), value(3i64)])
        .unwrap()
        .unwrap();
    assert_eq!(*value_ref::<i64>(&out).unwrap(), 123);
}

#[test]
fn test_all_wrong_arities_fail_without_invoking() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    let invoker = DynamicInvoker::new(Handle::action2(move |_: u8, _: u8| {
        calls_clone.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }));

    for wrong in [0usize, 1, 3, 4] {
        let args: Vec<_> = (0..wrong).map(|_| value(0u8)).collect();
        match invoker.dynamic_invoke(&args) {
            Err(DispatchError::ArityMismatch { expected, actual }) => {
                assert_eq!(expected, 2);
                assert_eq!(actual, wrong);
            }
            other => panic!("expected arity mismatch, got {:?}", other.map(|_| ())),
        }
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_business_fault_identity_preserved() {
    let original = fault("boom");
    let captured = original.clone();
    let invoker = DynamicInvoker::new(Handle::func0::<u32, _>(move || Err(captured.clone())));

    match invoker.dynamic_invoke(&[]) {
        Err(DispatchError::Fault(cause)) => assert!(Arc::ptr_eq(&cause, &original)),
        other => panic!("expected fault, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_type_mismatch_is_infrastructure_not_fault() {
    let invoker = DynamicInvoker::new(Handle::action1(|_: String| Ok(())));
    let err = invoker.dynamic_invoke(&[value(1u32)]).unwrap_err();
    assert!(matches!(err, DispatchError::Infrastructure { .. }));
    assert!(!err.is_fault());
    assert!(err.cause().is_some());
}

#[test]
fn test_begin_params_round_trip() {
    let callback: DynamicCallback = Arc::new(|_| {});
    let state = value("corr-17".to_string());
    let p1 = value(1u8);
    let p2 = value(2u8);

    let list = compute_begin_invoke_params(
        Some(callback),
        Some(state.clone()),
        &[p1.clone(), p2.clone()],
    );
    assert_eq!(list.len(), 4);

    let (callback, recovered_state, args) = split_begin_invoke_params(list).unwrap();
    assert!(callback.is_some());
    assert!(Arc::ptr_eq(&recovered_state.unwrap(), &state));
    assert!(Arc::ptr_eq(&args[0], &p1));
    assert!(Arc::ptr_eq(&args[1], &p2));
}

#[test]
fn test_begin_params_without_positional_args() {
    let list = compute_begin_invoke_params(None, None, &[]);
    let (callback, state, args) = split_begin_invoke_params(list).unwrap();
    assert!(callback.is_none());
    assert!(state.is_none());
    assert!(args.is_empty());
}

#[test]
fn test_begin_dynamic_invoke_from_protocol_list() {
    let executor = AsyncExecutor::with_spawner(Arc::new(CallerThread));
    let invoker = DynamicAsyncInvoker::new(Handle::func1(|n: u32| Ok(n + 1)), executor);

    let list = compute_begin_invoke_params(None, Some(value(7u8)), &[value(41u32)]);
    let result = invoker.begin_dynamic_invoke_params(list).unwrap();

    let out = result.end_value().unwrap().unwrap();
    assert_eq!(*value_ref::<u32>(&out).unwrap(), 42);
    assert_eq!(
        *value_ref::<u8>(result.async_state().unwrap()).unwrap(),
        7
    );
}
