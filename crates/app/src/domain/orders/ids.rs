//! Order identifier allocation.

use jiff::Zoned;

use crate::auth::models::UserId;

/// `YYYYMMDDHHMMSS` plus the 9-digit zero-padded user id.
///
/// Unique as long as one user commits at most one order per second, which
/// holds at the target scale.
pub(crate) fn allocate_order_id(now: &Zoned, user: UserId) -> String {
    format!("{}{:09}", now.strftime("%Y%m%d%H%M%S"), user.into_i64())
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, tz::TimeZone};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn order_id_is_timestamp_plus_padded_user_id() -> TestResult {
        let now: Timestamp = "2019-07-16T17:58:30Z".parse()?;
        let zoned = now.to_zoned(TimeZone::UTC);

        let order_id = allocate_order_id(&zoned, UserId::from_i64(7));

        assert_eq!(order_id, "20190716175830000000007");
        assert_eq!(order_id.len(), 14 + 9);

        Ok(())
    }

    #[test]
    fn wide_user_ids_are_not_truncated() -> TestResult {
        let now: Timestamp = "2026-01-02T03:04:05Z".parse()?;
        let zoned = now.to_zoned(TimeZone::UTC);

        let order_id = allocate_order_id(&zoned, UserId::from_i64(1_234_567_890));

        assert_eq!(order_id, "202601020304051234567890");

        Ok(())
    }
}
