use std::{
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use logger::Logger;

use crate::{
    loader::LoadRunner,
    provider::{MockProvider, Provider},
};

pub(crate) const TEST_DELAY: Duration = Duration::from_millis(5);

pub(crate) fn logger() -> Logger {
    Logger::detached().with_console(false)
}

pub(crate) fn provider() -> Arc<dyn Provider> {
    Arc::new(MockProvider::new().unwrap())
}

pub(crate) fn runner() -> LoadRunner {
    LoadRunner::new(2, TEST_DELAY, logger())
}

/// Calls `step` until it reports that nothing is loading anymore.
pub(crate) fn settle(mut step: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while step() {
        assert!(Instant::now() < deadline, "load did not finish in time");
        thread::sleep(Duration::from_millis(2));
    }
}
