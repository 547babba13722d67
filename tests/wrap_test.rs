use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use pushwrappers::notify::{Notifier, RecordingNotifier};
use pushwrappers::{
    call_site, push_completion, push_errors, push_panics, push_success, report_errors,
    report_success,
};

#[derive(Debug, PartialEq)]
struct ValueError(String);

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn check(input: i64) -> Result<i64, ValueError> {
    if input < 0 {
        return Err(ValueError("boom".to_string()));
    }
    Ok(input)
}

fn crunch(n: u64) -> u64 {
    (1..=n).sum()
}

#[test]
fn raising_function_notifies_once_and_propagates() {
    let notifier = RecordingNotifier::new();
    let checked = push_errors(&notifier, call_site!("check"), check);

    let err = checked(-1).unwrap_err();

    assert_eq!(err, ValueError("boom".to_string()));
    let sent = notifier.notifications();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].message.contains("boom"));
    assert!(sent[0].title.contains("check"));
    assert!(sent[0].title.starts_with("Error in wrap_test:check after "));
}

#[test]
fn returning_function_is_not_reported() {
    let notifier = RecordingNotifier::new();
    let checked = push_errors(&notifier, call_site!("check"), check);

    assert_eq!(checked(42), Ok(42));
    assert!(notifier.is_empty());
}

#[test]
fn success_wrapper_reports_each_completion() {
    let notifier = Arc::new(RecordingNotifier::new());
    let checked = push_success(Arc::clone(&notifier), call_site!("check"), check);

    assert_eq!(checked(1), Ok(1));
    assert!(checked(-1).is_err());

    let sent = notifier.notifications();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "Success!");
    assert!(sent[0].message.starts_with("Completed wrap_test:check after "));
}

#[test]
fn panics_resume_with_original_payload() {
    let notifier = RecordingNotifier::new();

    let payload = panic::catch_unwind(AssertUnwindSafe(|| {
        report_errors(&notifier, call_site!("explode"), || -> Result<(), ValueError> {
            panic!("worker crashed")
        })
    }))
    .unwrap_err();

    assert_eq!(payload.downcast_ref::<&str>(), Some(&"worker crashed"));
    assert_eq!(notifier.notifications()[0].message, "worker crashed");
}

#[test]
fn success_wrapper_lets_panics_through_silently() {
    let notifier = RecordingNotifier::new();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        report_success(&notifier, call_site!("explode"), || -> Result<(), ValueError> {
            panic!("worker crashed")
        })
    }));

    assert!(result.is_err());
    assert!(notifier.is_empty());
}

#[test]
fn trait_objects_can_be_passed() {
    let recorder = RecordingNotifier::new();
    let notifier: &dyn Notifier = &recorder;

    let result = report_errors(notifier, call_site!("dyn"), || check(-5));

    assert!(result.is_err());
    assert_eq!(recorder.len(), 1);
}

#[test]
fn plain_function_reports_completion() {
    let notifier = RecordingNotifier::new();
    let crunched = push_completion(&notifier, call_site!("crunch"), crunch);

    assert_eq!(crunched(4), 10);

    let sent = notifier.notifications();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "Success!");
    assert!(sent[0].message.starts_with("Completed wrap_test:crunch after "));
}

#[test]
fn plain_function_panics_are_reported() {
    let notifier = RecordingNotifier::new();
    let crunched = push_panics(&notifier, call_site!("crunch"), |n: u64| {
        if n > 1_000 {
            panic!("input too large");
        }
        crunch(n)
    });

    assert_eq!(crunched(3), 6);
    assert!(notifier.is_empty());

    let result = panic::catch_unwind(AssertUnwindSafe(|| crunched(5_000)));

    assert!(result.is_err());
    let sent = notifier.notifications();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].message, "input too large");
    assert!(sent[0].title.starts_with("Error in wrap_test:crunch after "));
}
