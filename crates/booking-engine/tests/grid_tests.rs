//! Tests for slot generation, the day grid join and free slot search.

use booking_engine::{
    day_grid, day_summary, first_free_slot, free_slots, generate_time_slots, is_canonical_slot,
    Booking, BookingId, CalendarDate, CallType, ClockTime,
};

fn date(s: &str) -> CalendarDate {
    s.parse().unwrap()
}

fn time(s: &str) -> ClockTime {
    s.parse().unwrap()
}

fn booking(id: &str, call_type: CallType, anchor: &str, at: &str, recurring: bool) -> Booking {
    Booking {
        id: BookingId::from(id),
        client_name: format!("client {}", id),
        client_phone: format!("555-{}", id),
        call_type,
        date: date(anchor),
        time: time(at),
        recurring,
        end_date: None,
    }
}

// ---------------------------------------------------------------------------
// Slot generation
// ---------------------------------------------------------------------------

#[test]
fn generates_28_slots_from_1030_to_1930() {
    let slots = generate_time_slots();

    assert_eq!(slots.len(), 28);
    assert_eq!(slots.first().unwrap().to_string(), "10:30");
    assert_eq!(slots.last().unwrap().to_string(), "19:30");
}

#[test]
fn slots_step_by_twenty_minutes() {
    let slots = generate_time_slots();
    for pair in slots.windows(2) {
        assert_eq!(pair[1].minutes() - pair[0].minutes(), 20);
    }

    let labels: Vec<String> = slots.iter().take(4).map(|s| s.to_string()).collect();
    assert_eq!(labels, ["10:30", "10:50", "11:10", "11:30"]);
}

#[test]
fn slot_generation_is_restartable() {
    assert_eq!(generate_time_slots(), generate_time_slots());
}

#[test]
fn canonical_slot_check_matches_generated_set() {
    let slots = generate_time_slots();
    for hour in 0..24 {
        for minute in 0..60 {
            let t = ClockTime::from_hm(hour, minute).unwrap();
            assert_eq!(is_canonical_slot(t), slots.contains(&t), "at {}", t);
        }
    }
}

// ---------------------------------------------------------------------------
// Day grid
// ---------------------------------------------------------------------------

#[test]
fn grid_places_active_bookings_on_matching_labels() {
    let all = vec![
        booking("1", CallType::Onboarding, "2024-06-10", "10:30", false),
        booking("2", CallType::FollowUp, "2024-06-03", "12:10", true),
        booking("3", CallType::FollowUp, "2024-06-11", "12:50", false),
    ];

    let grid = day_grid(date("2024-06-10"), &all);

    assert_eq!(grid.len(), 28);
    let occupied: Vec<(String, String)> = grid
        .iter()
        .filter_map(|slot| {
            slot.booking
                .as_ref()
                .map(|b| (slot.time.to_string(), b.id.to_string()))
        })
        .collect();
    assert_eq!(
        occupied,
        vec![
            ("10:30".to_string(), "1".to_string()),
            ("12:10".to_string(), "2".to_string()),
        ]
    );
}

#[test]
fn grid_shows_first_booking_when_two_share_a_label() {
    let all = vec![
        booking("first", CallType::FollowUp, "2024-06-10", "11:30", false),
        booking("second", CallType::FollowUp, "2024-06-10", "11:30", false),
    ];

    let grid = day_grid(date("2024-06-10"), &all);
    let slot = grid.iter().find(|s| s.time == time("11:30")).unwrap();

    assert_eq!(slot.booking.as_ref().unwrap().id, BookingId::from("first"));
}

#[test]
fn grid_ignores_off_grid_times() {
    let all = vec![booking("odd", CallType::FollowUp, "2024-06-10", "11:05", false)];

    let grid = day_grid(date("2024-06-10"), &all);

    assert!(grid.iter().all(|s| s.booking.is_none()));
}

// ---------------------------------------------------------------------------
// Free slots
// ---------------------------------------------------------------------------

#[test]
fn empty_day_is_entirely_free() {
    assert_eq!(
        free_slots(date("2024-06-10"), CallType::Onboarding, &[]),
        generate_time_slots()
    );
}

#[test]
fn onboarding_blocks_two_follow_up_slots() {
    let all = vec![booking("1", CallType::Onboarding, "2024-06-10", "10:30", false)];

    let free = free_slots(date("2024-06-10"), CallType::FollowUp, &all);

    assert_eq!(free.len(), 26);
    assert_eq!(free[0], time("11:10"));
}

#[test]
fn onboarding_candidate_needs_two_clear_slots() {
    // Follow-up at 11:10 blocks onboarding at 10:50 (runs to 11:30) and 11:10.
    let all = vec![booking("1", CallType::FollowUp, "2024-06-10", "11:10", false)];

    let free = free_slots(date("2024-06-10"), CallType::Onboarding, &all);

    assert!(free.contains(&time("10:30")));
    assert!(!free.contains(&time("10:50")));
    assert!(!free.contains(&time("11:10")));
    assert!(free.contains(&time("11:30")));
}

#[test]
fn first_free_slot_skips_occupied_morning() {
    let all = vec![
        booking("1", CallType::Onboarding, "2024-06-10", "10:30", false),
        booking("2", CallType::FollowUp, "2024-06-03", "11:10", true),
    ];

    assert_eq!(
        first_free_slot(date("2024-06-10"), CallType::FollowUp, &all),
        Some(time("11:30"))
    );
    // The series does not apply on Tuesday.
    assert_eq!(
        first_free_slot(date("2024-06-11"), CallType::FollowUp, &all),
        Some(time("10:30"))
    );
}

// ---------------------------------------------------------------------------
// Day summary
// ---------------------------------------------------------------------------

#[test]
fn summary_counts_active_calls_by_type() {
    let all = vec![
        booking("3", CallType::FollowUp, "2024-06-10", "14:10", false),
        booking("1", CallType::Onboarding, "2024-06-10", "10:30", false),
        // Weekly series from the previous Monday.
        booking("2", CallType::FollowUp, "2024-06-03", "12:10", true),
        // Different day.
        booking("4", CallType::Onboarding, "2024-06-11", "10:30", false),
    ];

    let summary = day_summary(date("2024-06-10"), &all);

    assert_eq!(summary.total, 3);
    assert_eq!(summary.onboarding, 1);
    assert_eq!(summary.follow_up, 2);
    let ids: Vec<&str> = summary.bookings.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[test]
fn summary_of_empty_day_is_zero() {
    let all = vec![booking("1", CallType::Onboarding, "2024-06-10", "10:30", false)];

    let summary = day_summary(date("2024-06-12"), &all);

    assert_eq!(summary.total, 0);
    assert_eq!(summary.onboarding, 0);
    assert_eq!(summary.follow_up, 0);
    assert!(summary.bookings.is_empty());
}

#[test]
fn summary_serializes_camel_case() {
    let all = vec![booking("1", CallType::FollowUp, "2024-06-10", "10:30", false)];

    let json = serde_json::to_value(day_summary(date("2024-06-10"), &all)).unwrap();

    assert_eq!(json["date"], "2024-06-10");
    assert_eq!(json["followUp"], 1);
    assert_eq!(json["bookings"][0]["clientPhone"], "555-1");
}
