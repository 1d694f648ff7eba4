//! Property-based tests for series expansion and overlap detection using proptest.
//!
//! These tests verify invariants that should hold for *any* booking, not just
//! the specific examples in `expander_tests.rs` and `conflict_tests.rs`.

use booking_engine::conflict::Interval;
use booking_engine::{
    active_bookings, generate_time_slots, is_active_on, occurrences, overlaps, Booking, BookingId,
    CalendarDate, CallType, ClockTime,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A valid date in the 2020-2030 range. Day is capped at 28 to avoid invalid
/// month/day combos.
fn arb_date() -> impl Strategy<Value = CalendarDate> {
    (2020i32..=2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| CalendarDate::from_ymd(y, m, d).unwrap())
}

fn arb_slot() -> impl Strategy<Value = ClockTime> {
    let slots = generate_time_slots();
    (0..slots.len()).prop_map(move |i| slots[i])
}

fn arb_call_type() -> impl Strategy<Value = CallType> {
    prop_oneof![Just(CallType::Onboarding), Just(CallType::FollowUp)]
}

fn booking(
    call_type: CallType,
    date: CalendarDate,
    time: ClockTime,
    recurring: bool,
    end_date: Option<CalendarDate>,
) -> Booking {
    Booking {
        id: BookingId::from("p"),
        client_name: "Prop".to_string(),
        client_phone: "555-0000".to_string(),
        call_type,
        date,
        time,
        recurring,
        end_date,
    }
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: one-off bookings are active on exactly their date
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn one_off_active_iff_same_date(
        call_type in arb_call_type(),
        anchor in arb_date(),
        query in arb_date(),
        time in arb_slot(),
    ) {
        let b = booking(call_type, anchor, time, false, None);
        let active = active_bookings(query, std::slice::from_ref(&b));

        prop_assert_eq!(active.len() == 1, anchor == query);
    }
}

// ---------------------------------------------------------------------------
// Property 2: open-ended series are active on every later same-weekday date
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn open_series_active_every_week_forever(
        anchor in arb_date(),
        weeks in 0i64..=5_000,
        offset in 1i64..=6,
        time in arb_slot(),
    ) {
        let b = booking(CallType::FollowUp, anchor, time, true, None);

        let same_weekday = anchor.add_days(weeks * 7).unwrap();
        prop_assert!(is_active_on(&b, same_weekday));

        let other_weekday = anchor.add_days(weeks * 7 + offset).unwrap();
        prop_assert!(!is_active_on(&b, other_weekday));
    }
}

// ---------------------------------------------------------------------------
// Property 3: bounded series are active exactly within [date, end]
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn bounded_series_respects_both_ends(
        anchor in arb_date(),
        span in 0i64..=400,
        query_offset in -30i64..=450,
        time in arb_slot(),
    ) {
        let end = anchor.add_days(span).unwrap();
        let b = booking(CallType::FollowUp, anchor, time, true, Some(end));
        let query = anchor.add_days(query_offset).unwrap();

        let expected = query_offset >= 0
            && query_offset % 7 == 0
            && query <= end;
        prop_assert_eq!(is_active_on(&b, query), expected);
    }
}

// ---------------------------------------------------------------------------
// Property 4: onboarding never recurs, whatever the stored flag says
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn onboarding_never_recurs(
        anchor in arb_date(),
        weeks in 1i64..=520,
        time in arb_slot(),
        flag in any::<bool>(),
    ) {
        let b = booking(CallType::Onboarding, anchor, time, flag, None);
        prop_assert!(is_active_on(&b, anchor));
        prop_assert!(!is_active_on(&b, anchor.add_days(weeks * 7).unwrap()));
    }
}

// ---------------------------------------------------------------------------
// Property 5: occurrence listing agrees with point queries
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn occurrences_match_point_queries(
        anchor in arb_date(),
        span in proptest::option::of(0i64..=120),
        from_offset in -20i64..=60,
        window in 0i64..=90,
        time in arb_slot(),
    ) {
        let end = span.map(|s| anchor.add_days(s).unwrap());
        let b = booking(CallType::FollowUp, anchor, time, true, end);
        let from = anchor.add_days(from_offset).unwrap();
        let to = from.add_days(window).unwrap();

        let listed = occurrences(&b, from, to);

        for pair in listed.windows(2) {
            prop_assert_eq!((pair[1].as_naive() - pair[0].as_naive()).num_days(), 7);
        }
        let mut day = from;
        while day <= to {
            prop_assert_eq!(listed.contains(&day), is_active_on(&b, day));
            day = day.add_days(1).unwrap();
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: overlap is the half-open interval test, in both directions
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn overlap_matches_interval_arithmetic(
        a_time in arb_slot(),
        a_type in arb_call_type(),
        b_time in arb_slot(),
        b_type in arb_call_type(),
        day in arb_date(),
    ) {
        let existing = booking(b_type, day, b_time, false, None);
        let reverse = booking(a_type, day, a_time, false, None);

        let a_start = a_time.minutes();
        let a_end = a_start + a_type.duration_minutes();
        let b_start = b_time.minutes();
        let b_end = b_start + b_type.duration_minutes();
        let expected = a_start < b_end && a_end > b_start;

        prop_assert_eq!(overlaps(a_time, a_type, std::slice::from_ref(&existing)), expected);
        prop_assert_eq!(overlaps(b_time, b_type, std::slice::from_ref(&reverse)), expected);
        prop_assert_eq!(
            Interval::of(a_time, a_type).overlaps(&Interval::of(b_time, b_type)),
            expected
        );
    }
}
