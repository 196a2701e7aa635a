//! Loading flags that survive cancelled requests

/// Drop guard that lowers a loading flag when the request it covers ends.
///
/// Runs on normal completion and also when the caller drops the request
/// future (timeout, `select!`, screen torn down), so the flow is never left
/// refusing input.
pub(crate) struct InFlight<'a> {
    flag: &'a mut bool,
}

impl<'a> InFlight<'a> {
    /// Raise `flag` until the guard is dropped
    pub(crate) fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}
