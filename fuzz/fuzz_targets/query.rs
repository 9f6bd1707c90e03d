#![no_main]
use freizeit_libs::{
    query::{FindMeetingQuery, RelaxationPolicy},
    time::WHOLE_DAY,
    Event, MeetingRequest,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<Event>, MeetingRequest, bool)| {
    #[cfg(feature = "log")]
    let _ = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .apply();

    let (events, request, relax) = data;
    let policy = if relax {
        RelaxationPolicy::MostOptionalAttendees
    } else {
        RelaxationPolicy::MandatoryFallback
    };
    let query = FindMeetingQuery::new().with_policy(policy);

    let found = query
        .query(&events, &request)
        .expect("Sorted busy time should never be out of order");

    if request.duration == 0 {
        assert_eq!(found, vec![WHOLE_DAY]);
        return;
    }

    if request.duration < 0 || request.duration > 1440 {
        assert!(found.is_empty(), "No slot fits {} minutes", request.duration);
        return;
    }

    for time in found.iter() {
        assert!(
            i64::from(time.duration()) >= request.duration,
            "Slot {} is shorter than {} minutes",
            time,
            request.duration
        );

        if let Some(clash) = events.iter().find(|event| {
            event.when.duration() > 0
                && event.when.overlaps(*time)
                && event.attendees.iter().any(|a| request.attendees.contains(a))
        }) {
            panic!("Slot {} clashes with mandatory event {:?}", time, clash);
        }
    }

    assert!(
        found.windows(2).all(|pair| pair[0].end() < pair[1].start()),
        "Slots should be ascending and apart: {:?}",
        found
    );

    assert_eq!(found, query.query(&events, &request).unwrap());
});
