/// Dish primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Parse an opaque path id into a [`DbId`].
///
/// Returns `None` for anything that could never name a stored row, so
/// callers can treat it the same as a missing row.
pub fn parse_id(raw: &str) -> Option<DbId> {
    raw.trim().parse::<DbId>().ok().filter(|id| *id > 0)
}
