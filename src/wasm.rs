use crate::event::{Event, MeetingRequest};
use crate::query::FindMeetingQuery;
use wasm_bindgen::prelude::*;

/// Takes an array of events and a meeting request, both as plain objects,
/// and returns the free ranges as `[{ start, end }]`.
#[wasm_bindgen(js_name = findMeetingTimes)]
pub fn find_meeting_times(events: JsValue, request: JsValue) -> Result<JsValue, JsValue> {
    let events: Vec<Event> = serde_wasm_bindgen::from_value(events)?;
    let request: MeetingRequest = serde_wasm_bindgen::from_value(request)?;

    let free = FindMeetingQuery::new()
        .query(&events, &request)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    Ok(serde_wasm_bindgen::to_value(&free)?)
}
