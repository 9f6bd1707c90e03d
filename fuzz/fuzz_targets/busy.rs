#![no_main]
use freizeit_libs::{busy::BusyTimes, gaps::FreeGaps, Event};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|events: Vec<Event>| {
    let busy = events
        .iter()
        .busy_times()
        .expect("busy_times sorts its own input");

    assert!(
        busy.windows(2).all(|pair| pair[0].end() < pair[1].start()),
        "Busy intervals should neither overlap nor touch: {:?}",
        busy
    );

    // Every minute of every event is busy, and nothing else is
    for minute in 0..1440_u16 {
        let in_event = events.iter().any(|e| e.when.contains_point(minute));
        let in_busy = busy.iter().any(|b| b.as_range().contains_point(minute));
        assert_eq!(in_event, in_busy, "Minute {} disagrees", minute);
    }

    let gaps = busy.iter().free_gaps(1).expect("busy intervals are sorted");
    let busy_minutes: u32 = busy.iter().map(|b| u32::from(b.as_range().duration())).sum();
    let free_minutes: u32 = gaps.iter().map(|g| u32::from(g.duration())).sum();
    assert_eq!(busy_minutes + free_minutes, 1440);
});
