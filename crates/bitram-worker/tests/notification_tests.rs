//! Click routing: dismiss, first-match focus, open-new fallback.

mod common;

use bitram_worker::{ClickOutcome, ClientRegistry};
use common::*;

#[tokio::test]
async fn click_focuses_the_first_window_matching_the_target() {
    let h = harness();
    h.roster.add_window("https://bitram.app/dashboard").await;
    let community = h.roster.add_window("https://bitram.app/community").await;
    h.roster.add_window("https://bitram.app/settings").await;

    let outcome = h
        .worker
        .handle_notification_click(notification("/community"))
        .await
        .unwrap();

    assert_eq!(outcome, ClickOutcome::Focused(community.clone()));
    let windows = h.roster.window_clients(true).await.unwrap();
    assert_eq!(windows.len(), 3, "no new window may be opened on a match");
    assert!(windows.iter().find(|w| w.id == community).unwrap().focused);
}

#[tokio::test]
async fn click_with_multiple_matches_takes_the_enumeration_order_winner() {
    let h = harness();
    let first = h
        .roster
        .add_window("https://bitram.app/community/feed")
        .await;
    h.roster
        .add_window("https://bitram.app/community/events")
        .await;

    let outcome = h
        .worker
        .handle_notification_click(notification("/community"))
        .await
        .unwrap();

    assert_eq!(outcome, ClickOutcome::Focused(first));
}

#[tokio::test]
async fn click_opens_a_new_window_when_nothing_matches() {
    let h = harness();
    h.roster.add_window("https://bitram.app/settings").await;

    let outcome = h
        .worker
        .handle_notification_click(notification("/orders"))
        .await
        .unwrap();

    let ClickOutcome::Opened(id) = outcome else {
        panic!("expected a new window");
    };
    let windows = h.roster.window_clients(true).await.unwrap();
    assert_eq!(windows.len(), 2);
    let opened = windows.iter().find(|w| w.id == id).unwrap();
    assert_eq!(opened.url, "/orders");
    assert!(opened.focused);
}

#[tokio::test]
async fn click_with_no_open_windows_lands_on_the_dashboard() {
    let h = harness();

    // A notification whose data field carried no url at all.
    let outcome = h
        .worker
        .handle_notification_click(notification(""))
        .await
        .unwrap();

    let ClickOutcome::Opened(id) = outcome else {
        panic!("expected a new window");
    };
    let windows = h.roster.window_clients(true).await.unwrap();
    assert_eq!(windows[0].id, id);
    assert_eq!(windows[0].url, "/dashboard");
}

#[tokio::test]
async fn click_dismisses_the_notification_before_routing() {
    let h = harness();
    h.roster.add_window("https://bitram.app/dashboard").await;

    let clicked = notification("/dashboard");
    h.worker
        .handle_notification_click(clicked.clone())
        .await
        .unwrap();

    assert_eq!(h.sink.closed(), vec![clicked]);
}

#[tokio::test]
async fn dismissal_happens_even_when_no_window_matches() {
    let h = harness();

    let clicked = notification("/orders");
    h.worker
        .handle_notification_click(clicked.clone())
        .await
        .unwrap();

    assert_eq!(h.sink.closed(), vec![clicked]);
}

#[tokio::test]
async fn uncontrolled_windows_are_eligible_focus_targets() {
    let h = harness();
    // A tab opened before this worker generation existed; never claimed.
    let old_tab = h.roster.add_window("https://bitram.app/community").await;

    let outcome = h
        .worker
        .handle_notification_click(notification("/community"))
        .await
        .unwrap();

    assert_eq!(outcome, ClickOutcome::Focused(old_tab));
}
