use std::sync::Arc;

use rlmlog_logging::{configure, get_current_renderer};

// One test function: the renderer is process-wide, and parallel tests would
// observe each other's reconfiguration.
#[test]
fn test_global_renderer_lifecycle() {
    // Lazily created, disabled by default, and stable across calls
    let first = get_current_renderer();
    let second = get_current_renderer();
    assert!(!first.enabled());
    assert!(Arc::ptr_eq(&first, &second));

    // Disabled singleton renders nothing and does not panic
    first.render_code("print('hidden')");

    // Reconfiguration replaces the instance
    let configured = configure(true);
    assert!(configured.enabled());
    let current = get_current_renderer();
    assert!(current.enabled());
    assert!(Arc::ptr_eq(&configured, &current));
    assert!(!Arc::ptr_eq(&first, &current));

    // Old handles stay usable and unchanged
    assert!(!first.enabled());

    // Mode is detected for every new instance, and never changes afterwards
    let mode = current.mode();
    assert_eq!(get_current_renderer().mode(), mode);

    let disabled = configure(false);
    assert!(!get_current_renderer().enabled());
    assert!(Arc::ptr_eq(&disabled, &get_current_renderer()));
}
