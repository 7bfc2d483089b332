use std::cell::RefCell;
use std::collections::BTreeSet;

use contact_flow::{
    Acknowledgement, Advance, CONTACT_REASON_KEY, FlowCatalog, FlowEngine, FlowError, Notice,
    RenderPayload, Retreat, StepKind, SubmissionPayload, Submitter, TransportError,
};

struct RecordingSubmitter {
    reply: Result<Acknowledgement, TransportError>,
    sent: RefCell<Vec<(String, SubmissionPayload)>>,
}

impl RecordingSubmitter {
    fn accepting() -> Self {
        Self::replying(Ok(Acknowledgement::sent("Email sent successfully.")))
    }

    fn replying(reply: Result<Acknowledgement, TransportError>) -> Self {
        Self {
            reply,
            sent: RefCell::new(Vec::new()),
        }
    }
}

impl Submitter for RecordingSubmitter {
    fn submit(
        &self,
        endpoint: &str,
        payload: &SubmissionPayload,
    ) -> Result<Acknowledgement, TransportError> {
        self.sent
            .borrow_mut()
            .push((endpoint.to_string(), payload.clone()));
        self.reply.clone()
    }
}

fn sample_answer(kind: StepKind, options: &[String]) -> String {
    match kind {
        StepKind::Radio | StepKind::Select => options[0].clone(),
        StepKind::Number => "42".into(),
        StepKind::Date => "2024-05-01".into(),
        StepKind::Time => "14:30".into(),
        StepKind::Email => "a@b.com".into(),
        _ => "answer".into(),
    }
}

#[test]
fn every_flow_submits_exactly_its_step_names() {
    let catalog = FlowCatalog::builtin();
    let codes: Vec<String> = catalog.reasons().map(str::to_string).collect();

    for code in codes {
        let submitter = RecordingSubmitter::accepting();
        let mut engine = FlowEngine::new(catalog.clone(), &submitter);
        engine.choose_reason(&code).expect("choose reason");

        let steps = catalog.flow(&code).expect("flow").steps.clone();
        for (index, step) in steps.iter().enumerate() {
            let answer = sample_answer(step.kind, &step.options);
            let outcome = engine.advance(Some(&answer)).expect("advance");
            if index + 1 < steps.len() {
                assert_eq!(outcome, Advance::Moved(index + 1));
            } else {
                assert!(matches!(outcome, Advance::Submitted(_)));
            }
        }

        let sent = submitter.sent.borrow();
        assert_eq!(sent.len(), 1);
        let (endpoint, payload) = &sent[0];
        assert_eq!(endpoint, &format!("/submitContact?type={code}"));

        let keys: BTreeSet<&str> = payload.keys().collect();
        let mut expected: BTreeSet<&str> = steps.iter().map(|step| step.name.as_str()).collect();
        expected.insert(CONTACT_REASON_KEY);
        assert_eq!(keys, expected, "payload keys for {code}");
        assert_eq!(payload.reason(), Some(code.as_str()));

        assert_eq!(engine.session().step_index(), -1);
        assert!(engine.session().answers().is_empty());
    }
}

#[test]
fn advance_does_not_move_on_invalid_answers() {
    let submitter = RecordingSubmitter::accepting();
    let mut engine = FlowEngine::new(FlowCatalog::builtin(), &submitter);
    engine.choose_reason("issue").expect("choose");

    let err = engine.advance(Some("   ")).expect_err("blank name");
    assert!(matches!(err, FlowError::Validation(_)));
    assert_eq!(
        err.notice(),
        Some(Notice::Invalid("Please fill in this field.".into()))
    );
    assert_eq!(engine.session().step_index(), 0);

    for answer in ["A", "B", "555", "a@b.com", "Lobby", "2024-01-02", "10:15"] {
        engine.advance(Some(answer)).expect("advance");
    }
    assert_eq!(engine.session().step_index(), 7);

    let err = engine.advance(None).expect_err("radio unset");
    assert_eq!(
        err.notice().map(|notice| notice.message().to_string()),
        Some("Please select an option.".to_string())
    );
    assert_eq!(engine.session().step_index(), 7);
    assert_eq!(engine.session().answer("issueType"), None);
    assert!(submitter.sent.borrow().is_empty());
}

#[test]
fn retreat_from_first_step_resets_session() {
    let submitter = RecordingSubmitter::accepting();
    let mut engine = FlowEngine::new(FlowCatalog::builtin(), &submitter);
    engine.choose_reason("host").expect("choose");

    assert_eq!(engine.retreat().expect("retreat"), Retreat::Restarted);
    assert_eq!(engine.session().reason(), None);
    assert_eq!(engine.session().step_index(), -1);
    assert!(engine.session().answers().is_empty());
    assert!(engine.render().is_initial());
}

#[test]
fn retreat_redisplays_saved_answer() {
    let submitter = RecordingSubmitter::accepting();
    let mut engine = FlowEngine::new(FlowCatalog::builtin(), &submitter);
    engine.choose_reason("general").expect("choose");
    engine.advance(Some("  Ada ")).expect("first name");
    engine.advance(Some("Lovelace")).expect("last name");

    assert_eq!(engine.retreat().expect("back"), Retreat::Moved(1));
    assert_eq!(engine.retreat().expect("back"), Retreat::Moved(0));

    match engine.render_step(0).expect("render") {
        RenderPayload::Step { value, .. } => assert_eq!(value.as_deref(), Some("Ada")),
        other => panic!("unexpected payload {other:?}"),
    }
    assert_eq!(engine.control_value().as_deref(), Some("Ada"));
    assert_eq!(engine.session().answer("lastName"), Some("Lovelace"));
}

#[test]
fn failed_submission_keeps_session_for_retry() {
    let submitter =
        RecordingSubmitter::replying(Err(TransportError::Network("connection refused".into())));
    let mut engine = FlowEngine::new(FlowCatalog::builtin(), &submitter);
    engine.choose_reason("request").expect("choose");
    for answer in ["A", "B", "555", "a@b.com"] {
        engine.advance(Some(answer)).expect("advance");
    }

    let err = engine.advance(Some("Rose")).expect_err("transport");
    assert_eq!(err.notice(), Some(Notice::SubmitFailed));
    assert_eq!(engine.session().step_index(), 4);
    assert_eq!(engine.session().answer("requestedParfum"), Some("Rose"));

    assert!(matches!(
        engine.submit(),
        Err(FlowError::Transport(TransportError::Network(_)))
    ));
    assert_eq!(submitter.sent.borrow().len(), 2);
}

#[test]
fn non_success_acknowledgement_is_a_failure() {
    let submitter = RecordingSubmitter::replying(Ok(Acknowledgement::failed(
        "Failed to send email.",
    )));
    let mut engine = FlowEngine::new(FlowCatalog::builtin(), &submitter);
    engine.choose_reason("request").expect("choose");
    for answer in ["A", "B", "555", "a@b.com"] {
        engine.advance(Some(answer)).expect("advance");
    }

    let err = engine.advance(Some("Rose")).expect_err("rejected");
    assert!(matches!(
        err,
        FlowError::Transport(TransportError::Rejected(ref message)) if message == "Failed to send email."
    ));
    assert_eq!(engine.session().reason(), Some("request"));
}

#[test]
fn choose_reason_requires_initial_screen_and_known_code() {
    let submitter = RecordingSubmitter::accepting();
    let mut engine = FlowEngine::new(FlowCatalog::builtin(), &submitter);

    assert!(matches!(
        engine.choose_reason("xyz"),
        Err(FlowError::UnknownReason(code)) if code == "xyz"
    ));
    engine.choose_reason("buy").expect("choose");
    assert!(matches!(
        engine.choose_reason("ad"),
        Err(FlowError::NotAtInitialScreen)
    ));
    assert_eq!(engine.session().answer(CONTACT_REASON_KEY), Some("buy"));
}

#[test]
fn enter_is_inert_on_initial_screen_and_advances_otherwise() {
    let submitter = RecordingSubmitter::accepting();
    let mut engine = FlowEngine::new(FlowCatalog::builtin(), &submitter);

    assert_eq!(engine.press_enter(Some("ignored")).expect("enter"), None);
    assert_eq!(engine.session().step_index(), -1);

    engine.choose_reason("ad").expect("choose");
    assert_eq!(
        engine.press_enter(Some("Ada")).expect("enter"),
        Some(Advance::Moved(1))
    );
}

#[test]
fn select_step_accepts_prefilled_value() {
    let submitter = RecordingSubmitter::accepting();
    let mut engine = FlowEngine::new(FlowCatalog::builtin(), &submitter);
    engine.choose_reason("ad").expect("choose");
    for answer in ["A", "B", "555", "a@b.com", "Shop"] {
        engine.advance(Some(answer)).expect("advance");
    }

    let prefilled = engine.control_value();
    assert_eq!(prefilled.as_deref(), Some("Retail"));
    engine.advance(prefilled.as_deref()).expect("select");
    assert_eq!(engine.session().answer("businessType"), Some("Retail"));
}

#[test]
fn retreat_is_rejected_on_initial_screen() {
    let submitter = RecordingSubmitter::accepting();
    let mut engine = FlowEngine::new(FlowCatalog::builtin(), &submitter);
    assert!(matches!(engine.retreat(), Err(FlowError::NoActiveStep)));
    assert!(matches!(engine.advance(Some("x")), Err(FlowError::NoActiveStep)));
}
