use super::*;
use crate::app::test_helpers::{stalled_app, test_app};
use crate::net::{ApiResponse, RequestBody};

fn complete_form() -> RegistrationForm {
    RegistrationForm {
        first_name: "Asha".to_owned(),
        last_name: "Rao".to_owned(),
        username: "asha".to_owned(),
        gender: Some(Gender::Female),
        dob: "2001-04-30".to_owned(),
        mobile: "9800000000".to_owned(),
        email: "asha@example.test".to_owned(),
        password: "pw".to_owned(),
    }
}

fn wizard_at_last_step(app: &App) -> RegisterWizard {
    let mut wizard = RegisterWizard { form: complete_form(), ..RegisterWizard::new() };
    for _ in 0..3 {
        wizard.next(app).unwrap();
    }
    wizard
}

#[test]
fn step_one_reports_first_then_last_name() {
    let (app, _, _) = test_app();
    let mut wizard = RegisterWizard::new();
    let err = wizard.next(&app).unwrap_err();
    assert_eq!(err.to_string(), "Please enter your first name");

    wizard.form.first_name = "Asha".to_owned();
    let err = wizard.next(&app).unwrap_err();
    assert_eq!(err.to_string(), "Please enter your last name");
    assert_eq!(wizard.step(), RegisterStep::Name);
    assert_eq!(app.notifier.drain().len(), 2);
}

#[test]
fn step_two_validation_order() {
    let mut form = complete_form();
    form.username.clear();
    form.gender = None;
    assert_eq!(form.missing_in(RegisterStep::Identity), Some("Please enter your username"));
    form.username = "asha".to_owned();
    assert_eq!(form.missing_in(RegisterStep::Identity), Some("Please select gender"));
    form.gender = Some(Gender::Other);
    form.dob.clear();
    assert_eq!(form.missing_in(RegisterStep::Identity), Some("Please enter date of birth"));
}

#[test]
fn step_three_validation_order() {
    let mut form = complete_form();
    form.mobile.clear();
    form.email.clear();
    assert_eq!(form.missing_in(RegisterStep::Contact), Some("Please enter mobile number"));
    form.mobile = "1".to_owned();
    assert_eq!(form.missing_in(RegisterStep::Contact), Some("Please enter email"));
    form.email = "e".to_owned();
    form.password.clear();
    assert_eq!(form.missing_in(RegisterStep::Contact), Some("Please enter password"));
}

#[test]
fn picture_step_is_optional() {
    assert_eq!(RegistrationForm::default().missing_in(RegisterStep::Picture), None);
}

#[test]
fn prev_never_goes_below_first_step() {
    let (app, _, _) = test_app();
    let mut wizard = wizard_at_last_step(&app);
    assert_eq!(wizard.step().number(), 4);
    assert_eq!(wizard.prev(), RegisterStep::Contact);
    wizard.prev();
    wizard.prev();
    assert_eq!(wizard.prev(), RegisterStep::Name);
}

#[test]
fn gender_parses() {
    assert_eq!("Female".parse::<Gender>().unwrap(), Gender::Female);
    assert!("unknown".parse::<Gender>().is_err());
}

#[tokio::test]
async fn submit_before_last_step_dispatches_nothing() {
    let (app, _, transport) = test_app();
    let wizard = RegisterWizard { form: complete_form(), ..RegisterWizard::new() };
    assert!(matches!(wizard.submit(&app).await, Err(FlowError::Validation(_))));
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn submit_sends_every_field_and_optional_picture() {
    let (app, _, transport) = test_app();
    let mut wizard = wizard_at_last_step(&app);
    wizard.profile_pic = Some(FilePart::new("me.png", "image/png", vec![1]));

    wizard.submit(&app).await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent[0].path, "/auth/register");
    let RequestBody::Multipart(form) = &sent[0].body else { panic!("expected multipart") };
    assert_eq!(form.text_value("firstName"), Some("Asha"));
    assert_eq!(form.text_value("gender"), Some("female"));
    assert_eq!(form.text_value("dob"), Some("2001-04-30"));
    assert!(form.file_value("profilePic").is_some());
    assert_eq!(app.notifier.drain()[0].message, REGISTER_SUCCESS);
    assert!(!app.loading.is_loading());
}

#[tokio::test]
async fn taken_username_surfaces_server_message() {
    let (app, _, transport) = test_app();
    transport.reply(ApiResponse::json(409, &serde_json::json!({ "message": "Username already taken" })));
    let wizard = wizard_at_last_step(&app);

    let err = wizard.submit(&app).await.unwrap_err();
    assert!(matches!(err, FlowError::Api(_)));
    let toasts = app.notifier.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].message, "Username already taken");
    assert!(!app.loading.is_loading());
}

#[tokio::test]
async fn abandoned_submit_lowers_loading() {
    let app = stalled_app();
    let wizard = wizard_at_last_step(&app);

    let outcome = tokio::time::timeout(std::time::Duration::from_millis(10), wizard.submit(&app)).await;
    assert!(outcome.is_err(), "submit should still be waiting");
    assert_eq!(app.loading.outstanding(), 0);
    assert!(!app.loading.is_loading());
}
