use cholock_lib::init_logging;
use log::LevelFilter;

// The global logger can be installed once per process, so this binary holds a
// single test.
#[test]
fn rust_log_sets_the_level() {
    std::env::set_var("RUST_LOG", "debug");
    init_logging();
    assert_eq!(log::max_level(), LevelFilter::Debug);

    // Later calls leave the installed logger alone.
    std::env::set_var("RUST_LOG", "error");
    init_logging();
    assert_eq!(log::max_level(), LevelFilter::Debug);
}
