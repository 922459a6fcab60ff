//! End-to-end explain mode: load -> explain -> render.

mod common;

use common::{principal, TestPolicy, INFO_POLICY};

use capgate::render::render;
use capgate_policy::{explain, Principal, Report};

fn explained(who: &Principal, role: Option<&str>, command: Option<&str>) -> String {
    let policy = TestPolicy::write(INFO_POLICY);
    let doc = policy.snapshot();
    render(&explain(&doc, who, role, command), who)
}

#[test]
fn unfiltered_listing_for_a_user_grantee() {
    let alice = principal("alice", &[]);
    let text = explained(&alice, None, None);
    for role in ["info0", "info1", "info2", "info3", "info4"] {
        assert_eq!(text.matches(role).count(), 1, "{role} should appear once");
    }
    assert_eq!(text.matches("hidden").count(), 0);
    assert_eq!(text.matches("with any commands").count(), 2);
    assert_eq!(text.matches("without any commands").count(), 1);
    assert_eq!(text.matches("cap_net_raw").count(), 3);
    assert_eq!(text.matches("full privileges").count(), 1);
    assert_eq!(text.matches("command1").count(), 1);
    assert_eq!(text.matches("command2").count(), 1);
}

#[test]
fn unfiltered_listing_for_a_group_grantee() {
    let bob = principal("bob", &["adm"]);
    let text = explained(&bob, None, None);
    for role in ["info0", "info1", "info2", "info3", "info4"] {
        assert_eq!(text.matches(role).count(), 1, "{role} should appear once");
    }
    assert_eq!(text.matches("hidden").count(), 0);
}

#[test]
fn unreachable_principal_sees_no_role_names() {
    let mallory = principal("mallory", &["audio"]);
    let text = explained(&mallory, None, None);
    assert_eq!(text.matches("info").count(), 0);
    assert_eq!(text.matches("hidden").count(), 0);
}

#[test]
fn role_filter_reports_one_capability_and_any_commands() {
    let alice = principal("alice", &[]);
    let text = explained(&alice, Some("info1"), None);
    assert_eq!(text.matches("info1").count(), 1);
    assert_eq!(text.matches("cap_net_raw").count(), 1);
    assert_eq!(text.matches("any commands").count(), 1);
}

#[test]
fn role_filter_on_an_absent_role_names_it_once() {
    let alice = principal("alice", &[]);
    let text = explained(&alice, Some("null"), None);
    assert_eq!(text.matches("null").count(), 1);
    assert!(text.contains("you can't use the role"));
}

#[test]
fn role_filter_on_the_commandless_role() {
    let alice = principal("alice", &[]);
    let text = explained(&alice, Some("info3"), None);
    assert_eq!(text.matches("without any commands").count(), 1);
}

#[test]
fn command_filter_with_an_exact_listing() {
    let alice = principal("alice", &[]);
    let text = explained(&alice, None, Some("command1"));
    // The suggestion is the plain invocation; the owning role and its
    // default capabilities stay out of the output (the empty override
    // applies).
    assert_eq!(text.matches("info2").count(), 0);
    assert_eq!(text.matches("cap_net_raw").count(), 0);
    assert_eq!(text.matches("this command").count(), 1);
    assert_eq!(text.matches("capgate -c \"command1\"").count(), 1);
}

#[test]
fn command_filter_without_a_listing_reports_any_command_roles() {
    let alice = principal("alice", &[]);
    let text = explained(&alice, None, Some("null"));
    assert_eq!(text.matches("info0").count(), 1);
    assert_eq!(text.matches("info1").count(), 1);
    assert_eq!(text.matches("info2").count(), 0);
}

#[test]
fn command_filter_miss_reports_denial_without_roles() {
    let policy = TestPolicy::write(
        r#"
[[role]]
name = "ops"
users = ["alice"]

[[role.command]]
run = "only-this"
"#,
    );
    let doc = policy.snapshot();
    let alice = principal("alice", &[]);
    let report = explain(&doc, &alice, None, Some("something-else"));
    assert_eq!(report, Report::CommandNotGranted);
    let text = render(&report, &alice);
    assert!(text.contains("you can't execute this command"));
    assert_eq!(text.matches("ops").count(), 0);
    assert_eq!(text.matches("capgate -c").count(), 0);
}

#[test]
fn role_and_command_filter_verdicts() {
    let alice = principal("alice", &[]);

    let text = explained(&alice, Some("info2"), Some("command1"));
    assert_eq!(text.matches("simplified").count(), 1);
    assert_eq!(text.matches("capgate -c \"command1\"").count(), 1);
    assert_eq!(text.matches("-r \"info2\"").count(), 0);

    let text = explained(&alice, Some("info0"), Some("command"));
    assert!(text.contains("you can execute \"command\" with command"));
    assert!(text.contains("capgate -r \"info0\" -c \"command\""));

    let text = explained(&alice, Some("null"), Some("null"));
    assert_eq!(text.matches("you can't execute this command").count(), 1);
}
