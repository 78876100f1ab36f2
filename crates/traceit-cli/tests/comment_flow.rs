//! Discussion flows: posting, threading, and rendering.

use anyhow::Result;
use traceit_testing::TestWorld;

#[test]
fn posted_reply_renders_nested_under_its_parent() -> Result<()> {
    let world = TestWorld::new();
    let owner = world.seed_student("sam@campus.edu");
    let report_id = world
        .server()
        .seed_report("Scarf", "Lecture hall", "approved", &owner);
    let parent_id = world
        .server()
        .seed_comment(&report_id, None, "Is it red?", &owner);

    world.login_student("sam@campus.edu")?;
    let post = world.run(&[
        "comment",
        "post",
        &report_id,
        "--content",
        "Yes, with tassels",
        "--reply-to",
        &parent_id,
    ])?;
    assert!(post.success(), "stderr: {}", post.stderr);
    assert!(post.stdout_contains("2 comments"));
    assert_eq!(world.server().comment_count(&report_id), 2);

    let list = world.run(&["comment", "list", &report_id])?;
    assert!(list.success());
    assert!(list.stdout_contains("Is it red?"));
    assert!(list.stdout_contains("Yes, with tassels"));

    // The reply's header line is indented one level.
    let reply_header = list
        .stdout
        .lines()
        .find(|l| l.trim_start().starts_with('[') && l.starts_with("  "))
        .expect("expected an indented reply header");
    assert!(reply_header.starts_with("  "));
    Ok(())
}

#[test]
fn top_level_post_appears_with_author_badge() -> Result<()> {
    let world = TestWorld::new();
    world.seed_admin();
    let owner = world.seed_student("sam@campus.edu");
    let report_id = world
        .server()
        .seed_report("Scarf", "Lecture hall", "approved", &owner);

    // The report owner comments: badge is Owner, not Student.
    world.login_student("sam@campus.edu")?;
    let post = world.run(&["comment", "post", &report_id, "--content", "Found by me"])?;
    assert!(post.success(), "stderr: {}", post.stderr);

    let list = world.run(&["comment", "list", &report_id])?;
    assert!(list.stdout_contains("Owner"));

    // An admin reply carries the Admin badge.
    world.login_admin()?;
    let admin_post = world.run(&["comment", "post", &report_id, "--content", "Checked"])?;
    assert!(admin_post.success(), "stderr: {}", admin_post.stderr);

    let list = world.run(&["comment", "list", &report_id])?;
    assert!(list.stdout_contains("Admin"));
    Ok(())
}

#[test]
fn json_listing_exposes_the_wire_fields() -> Result<()> {
    let world = TestWorld::new();
    let owner = world.seed_student("sam@campus.edu");
    let report_id = world
        .server()
        .seed_report("Scarf", "Lecture hall", "approved", &owner);
    let parent_id = world
        .server()
        .seed_comment(&report_id, None, "top", &owner);
    world
        .server()
        .seed_comment(&report_id, Some(&parent_id), "reply", &owner);

    world.login_student("sam@campus.edu")?;
    let list = world.run(&["--format", "json", "comment", "list", &report_id])?;
    assert!(list.success(), "stderr: {}", list.stderr);

    let comments = list.json()?;
    let comments = comments.as_array().expect("array of comments");
    assert_eq!(comments.len(), 2);

    let reply = comments
        .iter()
        .find(|c| c["content"] == "reply")
        .expect("reply present");
    assert_eq!(reply["parentCommentId"].as_str(), Some(parent_id.as_str()));
    assert!(reply["userId"]["email"].is_string());
    Ok(())
}

#[test]
fn comment_with_a_missing_parent_is_still_listed() -> Result<()> {
    let world = TestWorld::new();
    let owner = world.seed_student("sam@campus.edu");
    let report_id = world
        .server()
        .seed_report("Scarf", "Lecture hall", "approved", &owner);
    world
        .server()
        .seed_comment(&report_id, Some("c-ghost"), "orphaned note", &owner);

    world.login_student("sam@campus.edu")?;
    let list = world.run(&["comment", "list", &report_id])?;
    assert!(list.success());
    assert!(
        list.stdout_contains("orphaned note"),
        "no comment may be dropped from the rendering"
    );
    Ok(())
}

#[test]
fn posting_to_an_unknown_report_fails() -> Result<()> {
    let world = TestWorld::new();
    world.seed_student("sam@campus.edu");
    world.login_student("sam@campus.edu")?;

    let result = world.run(&["comment", "post", "r-missing", "--content", "hello"])?;
    assert!(!result.success());
    assert!(result.stderr_contains("not found"));
    Ok(())
}

#[test]
fn show_with_comments_includes_the_discussion() -> Result<()> {
    let world = TestWorld::new();
    let owner = world.seed_student("sam@campus.edu");
    let report_id = world
        .server()
        .seed_report("Scarf", "Lecture hall", "approved", &owner);
    world
        .server()
        .seed_comment(&report_id, None, "Still here?", &owner);

    world.login_student("sam@campus.edu")?;
    let show = world.run(&["report", "show", &report_id, "--comments"])?;
    assert!(show.success(), "stderr: {}", show.stderr);
    assert!(show.stdout_contains("Scarf"));
    assert!(show.stdout_contains("Still here?"));
    Ok(())
}
