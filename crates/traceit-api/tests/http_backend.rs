//! HTTP-level tests for `HttpBackend` against the in-process mock backend.

use anyhow::Result;
use traceit_api::{Backend, Error, HttpBackend, ReportDraft};
use traceit_testing::MockCampus;
use traceit_types::{NewComment, ReportStatus, Role};

fn backend_for(server: &MockCampus) -> HttpBackend {
    HttpBackend::new(server.url()).expect("client should build")
}

#[test]
fn login_returns_token_and_role() -> Result<()> {
    let server = MockCampus::spawn();
    server.seed_user("Sam", "sam@campus.edu", "pw", "student");
    let backend = backend_for(&server);

    let session = backend.login("sam@campus.edu", "pw", Role::Student)?;
    assert!(!session.token.is_empty());
    assert_eq!(session.user.role, Role::Student);
    Ok(())
}

#[test]
fn login_with_wrong_role_is_unauthorized() {
    let server = MockCampus::spawn();
    server.seed_user("Sam", "sam@campus.edu", "pw", "student");
    let backend = backend_for(&server);

    let err = backend
        .login("sam@campus.edu", "pw", Role::Admin)
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[test]
fn login_with_bad_credentials_is_unauthorized() {
    let server = MockCampus::spawn();
    server.seed_user("Sam", "sam@campus.edu", "pw", "student");
    let backend = backend_for(&server);

    let err = backend
        .login("sam@campus.edu", "wrong", Role::Student)
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[test]
fn student_cannot_fetch_the_moderation_listing() -> Result<()> {
    let server = MockCampus::spawn();
    server.seed_user("Sam", "sam@campus.edu", "pw", "student");
    let backend = backend_for(&server);

    let session = backend.login("sam@campus.edu", "pw", Role::Student)?;
    match backend.list_reports(&session.token) {
        Err(Error::Forbidden(_)) => Ok(()),
        other => panic!("expected forbidden, got {:?}", other.map(|r| r.len())),
    }
}

#[test]
fn submitted_report_is_pending_and_hidden_from_students() -> Result<()> {
    let server = MockCampus::spawn();
    server.seed_user("Mod", "mod@campus.edu", "pw", "admin");
    server.seed_user("Sam", "sam@campus.edu", "pw", "student");
    let backend = backend_for(&server);

    let student = backend.login("sam@campus.edu", "pw", Role::Student)?;
    let report = backend.submit_report(
        &student.token,
        &ReportDraft {
            title: "Blue Backpack".to_string(),
            description: "Left in library".to_string(),
            image: None,
        },
    )?;
    assert_eq!(report.status, ReportStatus::Pending);

    // Students browsing approved items must not see it yet.
    let approved = backend.list_approved(&student.token)?;
    assert!(approved.iter().all(|r| r.id != report.id));

    // The admin's unfiltered list must.
    let admin = backend.login("mod@campus.edu", "pw", Role::Admin)?;
    let all = backend.list_reports(&admin.token)?;
    assert!(all.iter().any(|r| r.id == report.id));
    Ok(())
}

#[test]
fn approve_changes_only_status_and_is_idempotent() -> Result<()> {
    let server = MockCampus::spawn();
    server.seed_user("Mod", "mod@campus.edu", "pw", "admin");
    let owner = server.seed_user("Sam", "sam@campus.edu", "pw", "student");
    let report_id = server.seed_report("Keys", "Cafeteria table", "pending", &owner);
    let backend = backend_for(&server);

    let admin = backend.login("mod@campus.edu", "pw", Role::Admin)?;
    let before = backend
        .list_reports(&admin.token)?
        .into_iter()
        .find(|r| r.id == report_id)
        .expect("seeded report");

    backend.approve_report(&admin.token, &report_id)?;
    backend.approve_report(&admin.token, &report_id)?;

    let after = backend
        .list_reports(&admin.token)?
        .into_iter()
        .find(|r| r.id == report_id)
        .expect("report still listed");

    assert_eq!(after.status, ReportStatus::Approved);
    assert_eq!(after.title, before.title);
    assert_eq!(after.description, before.description);
    assert_eq!(after.created_by.id(), before.created_by.id());
    Ok(())
}

#[test]
fn deleted_report_disappears_from_both_listings() -> Result<()> {
    let server = MockCampus::spawn();
    server.seed_user("Mod", "mod@campus.edu", "pw", "admin");
    let owner = server.seed_user("Sam", "sam@campus.edu", "pw", "student");
    let report_id = server.seed_report("Umbrella", "Bus stop", "approved", &owner);
    let backend = backend_for(&server);

    let admin = backend.login("mod@campus.edu", "pw", Role::Admin)?;
    let student = backend.login("sam@campus.edu", "pw", Role::Student)?;

    backend.delete_report(&admin.token, &report_id)?;

    assert!(backend
        .list_reports(&admin.token)?
        .iter()
        .all(|r| r.id != report_id));
    assert!(backend
        .list_approved(&student.token)?
        .iter()
        .all(|r| r.id != report_id));
    Ok(())
}

#[test]
fn posted_reply_round_trips_its_parent_id() -> Result<()> {
    let server = MockCampus::spawn();
    let owner = server.seed_user("Sam", "sam@campus.edu", "pw", "student");
    let report_id = server.seed_report("Scarf", "Lecture hall", "approved", &owner);
    let backend = backend_for(&server);

    let session = backend.login("sam@campus.edu", "pw", Role::Student)?;
    let top = backend.post_comment(
        &session.token,
        &NewComment {
            report_id: report_id.clone(),
            content: "Is it red?".to_string(),
            parent_comment_id: None,
        },
    )?;
    let reply = backend.post_comment(
        &session.token,
        &NewComment {
            report_id: report_id.clone(),
            content: "Yes".to_string(),
            parent_comment_id: Some(top.id.clone()),
        },
    )?;

    let comments = backend.comments(&session.token, &report_id)?;
    assert_eq!(comments.len(), 2);

    let fetched_top = comments.iter().find(|c| c.id == top.id).unwrap();
    assert!(fetched_top.parent_comment_id.is_none());

    let fetched_reply = comments.iter().find(|c| c.id == reply.id).unwrap();
    assert_eq!(fetched_reply.parent_comment_id.as_deref(), Some(top.id.as_str()));
    Ok(())
}

#[test]
fn submission_with_image_stores_a_retrievable_filename() -> Result<()> {
    let server = MockCampus::spawn();
    server.seed_user("Sam", "sam@campus.edu", "pw", "student");
    let backend = backend_for(&server);

    let dir = tempfile::tempdir()?;
    let image_path = dir.path().join("bag.jpg");
    std::fs::write(&image_path, b"not really a jpeg")?;

    let session = backend.login("sam@campus.edu", "pw", Role::Student)?;
    let report = backend.submit_report(
        &session.token,
        &ReportDraft {
            title: "Backpack".to_string(),
            description: "With photo".to_string(),
            image: Some(image_path),
        },
    )?;

    let filename = report.image.expect("image filename should be assigned");
    assert!(filename.ends_with("bag.jpg"));
    assert!(backend.upload_url(&filename).contains("/uploads/"));
    Ok(())
}

#[test]
fn expired_token_is_unauthorized() {
    let server = MockCampus::spawn();
    let backend = backend_for(&server);

    let err = backend.list_approved("tok-forged").unwrap_err();
    assert!(err.is_unauthorized());
}
