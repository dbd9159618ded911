//! Atomic sequence allocation for public identifiers
//!
//! Each allocation is a single increment-and-fetch statement at the storage
//! layer, so concurrent callers always receive distinct, strictly increasing
//! values. A value handed out is never reclaimed, even if the caller fails
//! before using it.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::PUBLIC_ID_PREFIX;

/// Counter name backing user public identifiers
pub const USER_ID_COUNTER: &str = "user_id";

/// Sequence allocator over the `counters` table
#[derive(Debug, Clone)]
pub struct SequenceAllocator {
    pool: SqlitePool,
}

impl SequenceAllocator {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Allocate the next value of the named counter
    ///
    /// The upsert and the read are one indivisible statement; no two callers
    /// can observe the same value.
    pub async fn next(&self, counter_name: &str) -> Result<i64> {
        let seq: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO counters (name, seq) VALUES (?, 1)
            ON CONFLICT (name) DO UPDATE SET seq = seq + 1
            RETURNING seq
            "#,
        )
        .bind(counter_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(seq)
    }
}

/// Format a sequence value as a public identifier, e.g. `USER000042`
pub fn format_public_id(seq: i64) -> String {
    format!("{PUBLIC_ID_PREFIX}{seq:06}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_id_format() {
        assert_eq!(format_public_id(1), "USER000001");
        assert_eq!(format_public_id(42), "USER000042");
        assert_eq!(format_public_id(999_999), "USER999999");
        // Values past six digits widen rather than truncate
        assert_eq!(format_public_id(1_000_000), "USER1000000");
    }
}
