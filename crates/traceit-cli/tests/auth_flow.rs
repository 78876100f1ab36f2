//! End-to-end auth flows against the mock backend.

use anyhow::Result;
use traceit_testing::{TestWorld, ADMIN_EMAIL};

#[test]
fn login_stores_a_session_and_status_reports_it() -> Result<()> {
    let world = TestWorld::new();
    world.seed_admin();

    let result = world.login_admin()?;
    assert!(result.success(), "stderr: {}", result.stderr);
    assert!(result.stdout_contains("Signed in as"));
    assert!(world.session_file().exists());

    let status = world.run(&["auth", "status"])?;
    assert!(status.success());
    assert!(status.stdout_contains(ADMIN_EMAIL));
    Ok(())
}

#[test]
fn role_mismatch_login_fails_and_stores_nothing() -> Result<()> {
    let world = TestWorld::new();
    world.seed_student("sam@campus.edu");

    let result = world.run(&[
        "auth",
        "login",
        "--email",
        "sam@campus.edu",
        "--password",
        "student-pass",
        "--role",
        "admin",
    ])?;

    assert!(!result.success());
    assert!(result.stderr_contains("Login failed"));
    assert!(
        !world.session_file().exists(),
        "a rejected login must not persist a session"
    );
    Ok(())
}

#[test]
fn wrong_password_fails_login() -> Result<()> {
    let world = TestWorld::new();
    world.seed_student("sam@campus.edu");

    let result = world.run(&[
        "auth",
        "login",
        "--email",
        "sam@campus.edu",
        "--password",
        "nope",
    ])?;

    assert!(!result.success());
    assert!(!world.session_file().exists());
    Ok(())
}

#[test]
fn logout_clears_the_session() -> Result<()> {
    let world = TestWorld::new();
    world.seed_admin();
    world.login_admin()?;
    assert!(world.session_file().exists());

    let result = world.run(&["auth", "logout"])?;
    assert!(result.success());
    assert!(!world.session_file().exists());

    let status = world.run(&["auth", "status"])?;
    assert!(status.stdout_contains("Not signed in"));

    // Logging out while signed out is fine.
    let again = world.run(&["auth", "logout"])?;
    assert!(again.success());
    Ok(())
}

#[test]
fn register_then_login_as_student() -> Result<()> {
    let world = TestWorld::new();

    let result = world.run(&[
        "auth",
        "register",
        "--name",
        "Riley",
        "--email",
        "riley@campus.edu",
        "--password",
        "student-pass",
    ])?;
    assert!(result.success(), "stderr: {}", result.stderr);
    assert!(result.stdout_contains("student"));

    let login = world.login_student("riley@campus.edu")?;
    assert!(login.success(), "stderr: {}", login.stderr);
    Ok(())
}

#[test]
fn rejected_token_fails_the_command_and_clears_the_session() -> Result<()> {
    let world = TestWorld::new();
    world.seed_student("sam@campus.edu");

    // A stored token the backend never issued, as after a server restart.
    std::fs::write(
        world.session_file(),
        "token = \"tok-stale\"\nrole = \"student\"\nemail = \"sam@campus.edu\"\n",
    )?;

    let result = world.run(&["report", "list"])?;
    assert!(!result.success());
    assert!(result.stderr_contains("Session expired"));
    assert!(
        !world.session_file().exists(),
        "a 401 must clear the stored session"
    );
    Ok(())
}

#[test]
fn authenticated_commands_hint_at_login_when_signed_out() -> Result<()> {
    let world = TestWorld::new();

    let result = world.run(&["report", "list"])?;
    assert!(!result.success());
    assert!(result.stderr_contains("auth login"));
    Ok(())
}
