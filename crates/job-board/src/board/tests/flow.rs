use super::common::*;
use crate::board::apply::{
    ApplicationError, ApplicationFlow, ApplicationForm, CloseReason, MemorySink, RequiredField,
};
use crate::board::catalog::JobId;

#[test]
fn open_on_unknown_job_stays_closed() {
    let mut flow = ApplicationFlow::default();

    assert!(!flow.open(&catalog(), JobId(999)));
    assert_eq!(flow, ApplicationFlow::Closed);
}

#[test]
fn open_captures_title_and_replaces_previous_draft() {
    let catalog = catalog();
    let mut flow = ApplicationFlow::default();

    assert!(flow.open(&catalog, JobId(2)));
    assert!(flow.open(&catalog, JobId(4)));

    let draft = flow.draft().expect("modal open");
    assert_eq!(draft.job_id, JobId(4));
    assert_eq!(draft.job_title, "Sales Representative");
    assert_eq!(draft.form, ApplicationForm::default());
}

#[test]
fn unknown_job_does_not_disturb_open_draft() {
    let catalog = catalog();
    let mut flow = ApplicationFlow::default();
    flow.open(&catalog, JobId(1));

    assert!(!flow.open(&catalog, JobId(42)));
    assert_eq!(flow.draft().expect("still open").job_id, JobId(1));
}

#[test]
fn every_close_reason_returns_to_closed() {
    let catalog = catalog();
    for reason in [
        CloseReason::Dismissed,
        CloseReason::OutsideClick,
        CloseReason::Submitted,
    ] {
        let mut flow = ApplicationFlow::default();
        flow.open(&catalog, JobId(3));
        flow.close(reason);
        assert!(!flow.is_open(), "reason {reason:?}");
    }
}

#[test]
fn submit_builds_record_delivers_and_resets() {
    let catalog = catalog();
    let sink = MemorySink::default();
    let mut flow = ApplicationFlow::default();
    flow.open(&catalog, JobId(3));

    let record = flow
        .submit_at(form(), &sink, submitted_at())
        .expect("submission accepted");

    assert_eq!(record.job_id, JobId(3));
    assert_eq!(record.job_title, "UI/UX Designer");
    assert_eq!(record.name, "Ada Lovelace");
    assert_eq!(record.resume, "ada-resume.pdf");
    assert_eq!(record.submitted_at_iso(), "2024-03-20T09:30:00.000Z");
    assert_eq!(sink.records(), vec![record]);
    assert_eq!(flow, ApplicationFlow::Closed);
}

#[test]
fn submit_while_closed_is_rejected() {
    let sink = MemorySink::default();
    let mut flow = ApplicationFlow::default();

    assert!(matches!(
        flow.submit(form(), &sink),
        Err(ApplicationError::NotOpen)
    ));
    assert!(sink.records().is_empty());
}

#[test]
fn missing_required_fields_keep_modal_open_with_values() {
    let catalog = catalog();
    let sink = MemorySink::default();
    let mut flow = ApplicationFlow::default();
    flow.open(&catalog, JobId(1));

    let mut no_name = form();
    no_name.name = "   ".to_string();
    match flow.submit(no_name, &sink) {
        Err(ApplicationError::MissingField(RequiredField::Name)) => {}
        other => panic!("expected missing name, got {other:?}"),
    }

    let mut no_email = form();
    no_email.email.clear();
    match flow.submit(no_email, &sink) {
        Err(ApplicationError::MissingField(RequiredField::Email)) => {}
        other => panic!("expected missing email, got {other:?}"),
    }

    let draft = flow.draft().expect("modal still open");
    assert_eq!(draft.form.name, "Ada Lovelace");
    assert!(draft.form.email.is_empty());
    assert!(sink.records().is_empty());
}

#[test]
fn resume_and_message_are_optional() {
    let catalog = catalog();
    let sink = MemorySink::default();
    let mut flow = ApplicationFlow::default();
    flow.open(&catalog, JobId(2));

    let minimal = ApplicationForm {
        name: "Grace".to_string(),
        email: "grace@example.com".to_string(),
        ..ApplicationForm::default()
    };
    let record = flow.submit(minimal, &sink).expect("accepted");

    assert!(record.resume.is_empty());
    assert!(record.message.is_empty());
}

#[test]
fn sink_failure_keeps_modal_open_for_retry() {
    let catalog = catalog();
    let sink = FailingSink::default();
    let mut flow = ApplicationFlow::default();
    flow.open(&catalog, JobId(4));

    assert!(matches!(
        flow.submit(form(), &sink),
        Err(ApplicationError::Sink(_))
    ));
    assert!(flow.is_open());
    assert_eq!(*sink.attempts.lock().expect("attempts"), 1);
}
