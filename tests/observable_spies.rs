//! Integration tests for observable-returning spy methods.

use std::sync::Arc;

use futures::StreamExt;
use serde_json::{json, Value};
use testkit_autospy::args;
use testkit_autospy::assertions::subscribe_spy_to;
use testkit_autospy::class::{ClassShape, ClassSpy, SpyOptions};
use testkit_autospy::report::RecordingReporter;

const FAKE_VALUE: &str = "FAKE EMITTED VALUE";
const WRONG_VALUE: &str = "WRONG VALUE";

fn fake_class() -> ClassShape {
    ClassShape::new("FakeClass")
        .method("getSyncValue")
        .observable_method("getObservable")
        .observable_method("getSubject")
}

fn fake_spy() -> (ClassSpy, Arc<RecordingReporter>) {
    let reporter = Arc::new(RecordingReporter::new());
    let options = SpyOptions::new()
        .observable_props(["observableProp"])
        .reporter(reporter.clone());
    (ClassSpy::with_options(&fake_class(), options), reporter)
}

fn fake() -> Value {
    json!(FAKE_VALUE)
}

mod default_configuration {
    use super::*;

    #[test]
    fn next_with_emits_value() {
        let (spy, _) = fake_spy();
        let method = spy.observable_method("getObservable").unwrap();
        method.and().next_with(fake());

        let observer = subscribe_spy_to(&method.invoke_observable(args![]).unwrap());
        assert_eq!(observer.last_value(), Some(fake()));
        assert!(!observer.received_complete());
    }

    #[test]
    fn next_one_time_with_emits_and_completes() {
        let (spy, _) = fake_spy();
        let method = spy.observable_method("getObservable").unwrap();
        method.and().next_one_time_with(fake());

        let observer = subscribe_spy_to(&method.invoke_observable(args![]).unwrap());
        assert_eq!(observer.last_value(), Some(fake()));
        assert!(observer.received_complete());
    }

    #[test]
    fn throw_with_emits_only_the_error() {
        let (spy, _) = fake_spy();
        let method = spy.observable_method("getObservable").unwrap();
        method.and().throw_with(fake());

        let observer = subscribe_spy_to(&method.invoke_observable(args![]).unwrap());
        assert_eq!(observer.error(), Some(fake()));
        assert_eq!(observer.value_count(), 0);
        assert!(!observer.received_complete());
    }

    #[test]
    fn complete_completes() {
        let (spy, _) = fake_spy();
        let method = spy.observable_method("getObservable").unwrap();
        method.and().complete();

        let observer = subscribe_spy_to(&method.invoke_observable(args![]).unwrap());
        assert!(observer.received_complete());
    }

    #[test]
    fn return_subject_emits_only_when_pushed() {
        let (spy, _) = fake_spy();
        let method = spy.observable_method("getObservable").unwrap();
        let streams = method.and().return_subject();

        let observer = subscribe_spy_to(&method.invoke_observable(args![]).unwrap());
        assert_eq!(observer.last_value(), None);

        streams.next(fake());
        assert_eq!(observer.last_value(), Some(fake()));
    }

    #[test]
    fn return_subject_streams_are_independent_per_call() {
        let (spy, _) = fake_spy();
        let method = spy.observable_method("getObservable").unwrap();
        let streams = method.and().return_subject();

        let first = subscribe_spy_to(&method.invoke_observable(args![]).unwrap());
        let second = subscribe_spy_to(&method.invoke_observable(args![]).unwrap());

        streams.get(0).unwrap().next(fake());

        assert_eq!(first.values(), vec![fake()]);
        assert!(second.values().is_empty());
    }

    #[test]
    fn overwriting_default_uses_latest() {
        let (spy, _) = fake_spy();
        let method = spy.observable_method("getObservable").unwrap();
        method.and().next_with(json!("old"));
        method.and().next_with(json!("new"));

        let observer = subscribe_spy_to(&method.invoke_observable(args![1]).unwrap());
        assert_eq!(observer.values(), vec![json!("new")]);
    }

    #[test]
    fn subject_returning_method_emits() {
        let (spy, _) = fake_spy();
        let method = spy.observable_method("getSubject").unwrap();
        method.and().next_with(fake());

        let observer = subscribe_spy_to(&method.invoke_observable(args![]).unwrap());
        assert_eq!(observer.last_value(), Some(fake()));
    }
}

mod exact_params {
    use super::*;

    fn call(spy: &ClassSpy) -> Option<testkit_autospy::observable::Observable<Value, Value>> {
        spy.observable_method("getObservable")
            .unwrap()
            .invoke_observable(args![1, 2])
    }

    #[test]
    fn called_with_right_params_emits() {
        let (spy, reporter) = fake_spy();
        spy.observable_method("getObservable")
            .unwrap()
            .called_with(args![1, 2])
            .next_with(fake());

        let observer = subscribe_spy_to(&call(&spy).unwrap());
        assert_eq!(observer.last_value(), Some(fake()));
        assert!(reporter.is_empty());
    }

    #[test]
    fn two_configurations_each_return_their_value() {
        let (spy, _) = fake_spy();
        let method = spy.observable_method("getObservable").unwrap();
        let second_value = json!({"name": "FAKE VALUE 2"});
        method.called_with(args![1, 2]).next_with(fake());
        method.called_with(args![3, 4]).next_with(second_value.clone());

        let first = subscribe_spy_to(&call(&spy).unwrap());
        let second = subscribe_spy_to(&method.invoke_observable(args![3, 4]).unwrap());

        assert_eq!(first.last_value(), Some(fake()));
        assert_eq!(second.last_value(), Some(second_value));
    }

    const SETTERS: usize = 5;

    fn configure_wrong(spy: &ClassSpy, required: bool, setter: usize) {
        let method = spy.observable_method("getObservable").unwrap();
        let config = if required {
            method.must_be_called_with(args![WRONG_VALUE])
        } else {
            method.called_with(args![WRONG_VALUE])
        };
        match setter {
            0 => config.next_with(fake()),
            1 => config.next_one_time_with(fake()),
            2 => config.throw_with(fake()),
            3 => config.complete(),
            _ => {
                config.return_subject();
            }
        }
    }

    #[test]
    fn called_with_wrong_params_is_silent() {
        for setter in 0..SETTERS {
            let (spy, reporter) = fake_spy();
            configure_wrong(&spy, false, setter);
            assert!(call(&spy).is_none());
            assert!(reporter.is_empty());
        }
    }

    #[test]
    fn must_be_called_with_wrong_params_reports_actual_args() {
        for setter in 0..SETTERS {
            let (spy, reporter) = fake_spy();
            configure_wrong(&spy, true, setter);
            call(&spy);

            assert_eq!(reporter.count(), 1, "setter {setter}");
            assert_eq!(reporter.mismatches()[0].actual, args![1, 2]);
        }
    }

    #[test]
    fn must_be_called_with_right_params_is_not_reported() {
        let (spy, reporter) = fake_spy();
        spy.observable_method("getObservable")
            .unwrap()
            .must_be_called_with(args![1, 2])
            .next_one_time_with(fake());

        let observer = subscribe_spy_to(&call(&spy).unwrap());
        assert_eq!(observer.last_value(), Some(fake()));
        assert!(observer.received_complete());
        assert!(reporter.is_empty());
    }

    #[test]
    fn called_with_one_time_emits_and_completes() {
        let (spy, _) = fake_spy();
        spy.observable_method("getObservable")
            .unwrap()
            .called_with(args![1, 2])
            .next_one_time_with(fake());

        let observer = subscribe_spy_to(&call(&spy).unwrap());
        assert_eq!(observer.last_value(), Some(fake()));
        assert!(observer.received_complete());
    }

    #[test]
    fn called_with_throw_emits_error() {
        let (spy, _) = fake_spy();
        spy.observable_method("getObservable")
            .unwrap()
            .called_with(args![1, 2])
            .throw_with(fake());

        assert_eq!(subscribe_spy_to(&call(&spy).unwrap()).error(), Some(fake()));
    }

    #[test]
    fn called_with_complete_completes() {
        let (spy, _) = fake_spy();
        spy.observable_method("getObservable")
            .unwrap()
            .called_with(args![1, 2])
            .complete();

        assert!(subscribe_spy_to(&call(&spy).unwrap()).received_complete());
    }

    #[test]
    fn called_with_return_subject_emits_pushed_value() {
        let (spy, _) = fake_spy();
        let streams = spy
            .observable_method("getObservable")
            .unwrap()
            .called_with(args![1, 2])
            .return_subject();

        let observer = subscribe_spy_to(&call(&spy).unwrap());
        streams.next(fake());

        assert_eq!(observer.last_value(), Some(fake()));
    }

    #[test]
    fn called_with_return_subject_pushed_before_call_emits() {
        let (spy, _) = fake_spy();
        let streams = spy
            .observable_method("getObservable")
            .unwrap()
            .called_with(args![1, 2])
            .return_subject();

        streams.next(fake());
        let observer = subscribe_spy_to(&call(&spy).unwrap());

        assert_eq!(observer.last_value(), Some(fake()));
    }

    #[test]
    fn optional_mismatch_falls_back_to_default_without_report() {
        let (spy, reporter) = fake_spy();
        let method = spy.observable_method("getObservable").unwrap();
        method.called_with(args![1, 2]).next_one_time_with(json!("X"));
        method.and().next_with(json!("Y"));

        let observer = subscribe_spy_to(&method.invoke_observable(args![9]).unwrap());
        assert_eq!(observer.values(), vec![json!("Y")]);
        assert!(!observer.received_complete());
        assert!(reporter.is_empty());
    }

    #[test]
    fn required_mismatch_reported_once_with_exact_args() {
        let (spy, reporter) = fake_spy();
        let method = spy.observable_method("getObservable").unwrap();
        method.must_be_called_with(args![1, 2]).next_one_time_with(json!("X"));

        method.invoke(args![9]);

        assert_eq!(reporter.count(), 1);
        assert_eq!(reporter.mismatches()[0].actual, args![9]);
    }
}

mod observable_property {
    use super::*;

    #[test]
    fn next_with_emits() {
        let (spy, _) = fake_spy();
        let prop = spy.property("observableProp").unwrap();
        prop.next_with(fake());
        assert_eq!(subscribe_spy_to(&prop.observable()).last_value(), Some(fake()));
    }

    #[test]
    fn next_one_time_with_emits_and_completes() {
        let (spy, _) = fake_spy();
        let prop = spy.property("observableProp").unwrap();
        prop.next_one_time_with(fake());

        let observer = subscribe_spy_to(&prop.observable());
        assert_eq!(observer.last_value(), Some(fake()));
        assert!(observer.received_complete());
    }

    #[test]
    fn throw_with_errors() {
        let (spy, _) = fake_spy();
        let prop = spy.property("observableProp").unwrap();
        prop.throw_with(fake());
        assert_eq!(subscribe_spy_to(&prop.observable()).error(), Some(fake()));
    }

    #[test]
    fn complete_completes() {
        let (spy, _) = fake_spy();
        let prop = spy.property("observableProp").unwrap();
        prop.complete();
        assert!(subscribe_spy_to(&prop.observable()).received_complete());
    }

    #[test]
    fn return_subject_emits_pushed_value() {
        let (spy, _) = fake_spy();
        let prop = spy.property("observableProp").unwrap();
        let streams = prop.return_subject();

        let observer = subscribe_spy_to(&prop.observable());
        streams.next(fake());

        assert_eq!(observer.last_value(), Some(fake()));
    }

    #[test]
    fn return_subject_pushed_before_subscribe_emits() {
        let (spy, _) = fake_spy();
        let prop = spy.property("observableProp").unwrap();
        let streams = prop.return_subject();

        streams.next(fake());
        let observer = subscribe_spy_to(&prop.observable());

        assert_eq!(observer.last_value(), Some(fake()));
    }
}

mod streams {
    use super::*;

    #[tokio::test]
    async fn one_shot_as_stream() {
        let (spy, _) = fake_spy();
        let method = spy.observable_method("getObservable").unwrap();
        method.and().next_one_time_with(fake());

        let items: Vec<_> = method
            .invoke_observable(args![])
            .unwrap()
            .into_stream()
            .collect()
            .await;
        assert_eq!(items, vec![Ok(fake())]);
    }

    #[tokio::test]
    async fn external_subject_as_stream() {
        let (spy, _) = fake_spy();
        let method = spy.observable_method("getObservable").unwrap();
        let streams = method.and().return_subject();

        let stream = method.invoke_observable(args![]).unwrap().into_stream();
        streams.next(json!(1));
        streams.next(json!(2));
        streams.error(json!("done"));

        let items: Vec<_> = stream.collect().await;
        assert_eq!(items, vec![Ok(json!(1)), Ok(json!(2)), Err(json!("done"))]);
    }
}
