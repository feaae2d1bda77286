#[cfg(test)]
mod error_tests;

#[cfg(test)]
mod tests {
    use crate::event::LifecycleEvent;

    #[test]
    fn test_lifecycle_event_names() {
        assert_eq!(LifecycleEvent::BeforeStart.name(), "before:start");
        assert_eq!(LifecycleEvent::Bootstrapped.name(), "bootstrapped");
        assert_eq!(LifecycleEvent::Started.name(), "started");
        assert_eq!(LifecycleEvent::Stop.name(), "stop");
        assert_eq!(LifecycleEvent::Custom("db:ready".into()).name(), "db:ready");
    }

    #[test]
    fn test_lifecycle_names_never_map_to_custom() {
        assert_eq!(LifecycleEvent::from("before:start"), LifecycleEvent::BeforeStart);
        assert_eq!(LifecycleEvent::from("stop".to_string()), LifecycleEvent::Stop);
        assert!(LifecycleEvent::Started.is_lifecycle());

        let custom = LifecycleEvent::from("before:stop");
        assert_eq!(custom, LifecycleEvent::Custom("before:stop".into()));
        assert!(!custom.is_lifecycle());
        assert_eq!(custom.to_string(), "before:stop");
    }
}
