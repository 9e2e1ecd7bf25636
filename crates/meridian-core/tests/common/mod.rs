use meridian_core::{
    AdapterConfig, Document, FixedOffset, NodeId, PageAdapter, PageAdapterBuilder, UtcOffset,
};

/// An event edit page as the server renders it, before any script runs.
pub const EVENT_PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Edit event</title></head><body>
<div id="js_required">This site requires JavaScript.</div>
<a class="btn disabled js_enable_with_js" href="/events/new">Create event</a>
<p>Starts <span class="js_convert_utc_to_local">2025-01-05T20:07:00</span></p>
<p>Posted <span class="js_convert_utc_to_local">not-a-date</span></p>
<form action="/events/7/edit" method="post">
  <div class="form-outline">
    <input type="hidden" class="js_convert_time_inputs_to_local" value="false">
    <input type="datetime-local" name="start_time" value="2025-06-01T00:00">
    <input type="datetime-local" name="end_time" value="2025-06-01T02:30">
  </div>
  <input type="hidden" name="timezone_offset" value="">
  <input type="checkbox" id="form_show_location_inputs">
  <div id="form_location_group">
    <input class="form-control" name="street" required>
    <div class="form-helper">
      <div class="form-counter">0/50</div>
      <div class="form-counter">0/50</div>
    </div>
  </div>
</form>
</body></html>"#;

/// Helper function to build an adapter with default selectors and a fixed
/// offset in minutes east of UTC.
pub fn create_test_adapter(minutes: i32) -> PageAdapter {
    PageAdapterBuilder::new()
        .with_config(AdapterConfig::default())
        .with_offset_source(FixedOffset(
            UtcOffset::from_minutes(minutes).expect("offset in range"),
        ))
        .build()
        .expect("Failed to create adapter")
}

/// The single element matching `selector`.
pub fn one(doc: &Document, selector: &str) -> NodeId {
    let found = doc.query(selector).expect("valid selector");
    assert_eq!(found.len(), 1, "expected exactly one match for {selector}");
    found[0]
}
