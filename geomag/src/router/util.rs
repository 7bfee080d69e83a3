use geomag_core::GeomagError;

/// Join a collection of tasks and apply an optional request-level deadline.
///
/// This wraps `futures::future::join_all(tasks)` with the orchestrator's
/// request deadline. Results keep the order of `tasks`.
///
/// # Errors
/// Returns `GeomagError::RequestTimeout` if the deadline passes before every
/// task completes.
pub async fn join_with_deadline<I, F, T>(
    tasks: I,
    deadline: Option<std::time::Duration>,
) -> Result<Vec<T>, GeomagError>
where
    I: IntoIterator<Item = F>,
    F: core::future::Future<Output = T>,
{
    crate::core::with_request_deadline(deadline, futures::future::join_all(tasks)).await
}

/// Collapse a set of factory errors into a uniform `GeomagError` outcome.
///
/// Rules:
/// - If all errors are `FactoryTimeout` → `AllFactoriesTimedOut`.
/// - If all errors are `NotFound` → `NotFound(what)`.
/// - Else → `AllFactoriesFailed(errors)`.
///
/// An empty error list is reported as `NotFound(what)`.
#[must_use]
pub fn collapse_errors(errors: Vec<GeomagError>, not_found_what: &str) -> GeomagError {
    if errors.is_empty() {
        return GeomagError::not_found(not_found_what);
    }
    if errors
        .iter()
        .all(|e| matches!(e, GeomagError::FactoryTimeout { .. }))
    {
        return GeomagError::AllFactoriesTimedOut;
    }
    if errors
        .iter()
        .all(|e| matches!(e, GeomagError::NotFound { .. }))
    {
        return GeomagError::not_found(not_found_what);
    }
    GeomagError::AllFactoriesFailed(errors)
}
