/// Skip a test if a live space is not configured.
#[macro_export]
macro_rules! skip_without_spaces {
    () => {
        for var in ["DO_ACCESS_KEY", "DO_SECRET_KEY", "DO_SPACE_REGION", "ENVSPACE_TEST_SPACE"] {
            if std::env::var(var).is_err() {
                eprintln!("SKIPPED: {} not set", var);
                return;
            }
        }
    };
}
