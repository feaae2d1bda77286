use crate::event::EventSystemError;
use std::error::Error as _;

#[test]
fn test_listener_failed_display_and_source() {
    let err = EventSystemError::ListenerFailed {
        event: "before:start".to_string(),
        listener_id: 3,
        source: "database unreachable".into(),
    };

    assert_eq!(
        err.to_string(),
        "Listener 3 for event 'before:start' failed: database unreachable"
    );
    assert_eq!(err.event_name(), "before:start");
    let source = err.source().expect("listener error should be the source");
    assert_eq!(source.to_string(), "database unreachable");
}
