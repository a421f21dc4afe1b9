//! Tests for the session decision tree.

use chrono::{DateTime, Duration, Utc};
use soulprompt::agent::session::{
    compute_session_section, SessionDecision, ONBOARDING_BOOTSTRAP_TEXT,
    ONBOARDING_FIRST_MESSAGE_TEXT, RETURNING_USER_GREETING_TEXT, WAKEUP_SILENT,
};
use soulprompt::agent::Channel;

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-10-16T12:00:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

fn minutes_ago(minutes: i64) -> Option<DateTime<Utc>> {
    Some(now() - Duration::minutes(minutes))
}

#[test]
fn session_open_new_user_bootstraps() {
    let text = compute_session_section(&Channel::SessionOpen, true, None, now(), false);
    assert_eq!(text, ONBOARDING_BOOTSTRAP_TEXT);
}

#[test]
fn new_user_wins_over_recency() {
    let text = compute_session_section(&Channel::SessionOpen, true, minutes_ago(1), now(), false);
    assert_eq!(text, ONBOARDING_BOOTSTRAP_TEXT);
}

#[test]
fn recent_reopen_with_nothing_new_is_silent() {
    let text = compute_session_section(&Channel::SessionOpen, false, minutes_ago(2), now(), false);
    assert_eq!(text, WAKEUP_SILENT);
    assert_eq!(text, "WAKEUP_SILENT");
}

#[test]
fn recent_reopen_with_new_activity_greets() {
    let text = compute_session_section(&Channel::SessionOpen, false, minutes_ago(2), now(), true);
    assert_eq!(text, RETURNING_USER_GREETING_TEXT);
}

#[test]
fn stale_reopen_greets() {
    let text =
        compute_session_section(&Channel::SessionOpen, false, minutes_ago(30), now(), false);
    assert_eq!(text, RETURNING_USER_GREETING_TEXT);
}

#[test]
fn reopen_without_history_greets() {
    let text = compute_session_section(&Channel::SessionOpen, false, None, now(), false);
    assert_eq!(text, RETURNING_USER_GREETING_TEXT);
}

#[test]
fn chat_channels_onboard_new_users() {
    for channel in [Channel::Web, Channel::Telegram] {
        let text = compute_session_section(&channel, true, None, now(), false);
        assert_eq!(text, ONBOARDING_FIRST_MESSAGE_TEXT);
    }
}

#[test]
fn chat_channels_say_nothing_for_known_users() {
    for channel in [Channel::Web, Channel::Telegram] {
        let text = compute_session_section(&channel, false, minutes_ago(1), now(), false);
        assert!(text.is_empty());
    }
}

#[test]
fn background_channels_never_onboard() {
    for channel in [
        Channel::Scheduled,
        Channel::Heartbeat,
        Channel::Other("sms".to_owned()),
    ] {
        assert_eq!(
            SessionDecision::decide(&channel, true, None, now(), false),
            SessionDecision::Nothing
        );
    }
}

#[test]
fn decision_is_deterministic() {
    let first = SessionDecision::decide(&Channel::SessionOpen, false, minutes_ago(4), now(), false);
    let second =
        SessionDecision::decide(&Channel::SessionOpen, false, minutes_ago(4), now(), false);
    assert_eq!(first, second);
    assert_eq!(first, SessionDecision::Silent);
}
