use anyhow::Context;
use redis::{aio::ConnectionManager, AsyncCommands};

/// Fixed key of the single counter record. There is exactly one record, it
/// is never deleted or reset by this service.
const RECORD_KEY: &str = "main";
/// Attribute of the record holding the view count.
const VIEWS_FIELD: &str = "views";

/// The one operation the counter depends on: an atomic
/// increment-or-initialize of the single record, performed server side in
/// the store so that concurrent invocations can not lose updates.
///
/// The new value is returned in the store's textual form. Document stores
/// commonly report numerics as arbitrary-precision decimals, so the value
/// stays raw until [`coerce_count`] turns it into a plain integer.
#[async_trait::async_trait]
pub trait CounterStore: Send + Sync {
    async fn bump(&self) -> anyhow::Result<String>;
}

/// Redis-backed [`CounterStore`].
///
/// The connection manager is created once at startup; cloning it is cheap
/// and hands every invocation its own handle to the multiplexed connection.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    record: String,
}

impl RedisStore {
    pub async fn connect(redis_addr: &str, table: &str) -> anyhow::Result<Self> {
        let client = redis::Client::open(redis_addr)
            .with_context(|| format!("fail to open redis client for `{redis_addr}`"))?;
        let conn = ConnectionManager::new(client)
            .await
            .with_context(|| "fail to connect to redis")?;

        Ok(Self {
            conn,
            record: format!("{table}:{RECORD_KEY}"),
        })
    }
}

#[async_trait::async_trait]
impl CounterStore for RedisStore {
    async fn bump(&self) -> anyhow::Result<String> {
        let mut conn = self.conn.clone();

        // HINCRBY initializes a missing field to 0 before adding, in a
        // single server side step, and replies with the new value.
        let count: i64 = conn
            .hincr(&self.record, VIEWS_FIELD, 1)
            .await
            .with_context(|| "fail to increment view counter in redis")?;

        Ok(count.to_string())
    }
}

/// Convert the store's textual numeric form into a plain integer for JSON
/// encoding. Counter values must be integral: a fractional part is accepted
/// only when it is all zeros (a decimal-typed store may report `7` as
/// `7.000`), anything else is an error.
pub fn coerce_count(raw: &str) -> anyhow::Result<u64> {
    let (integral, fraction) = match raw.split_once('.') {
        Some((integral, fraction)) => (integral, Some(fraction)),
        None => (raw, None),
    };

    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b == b'0') {
            anyhow::bail!("counter value `{raw}` is not an integer");
        }
    }

    integral
        .parse::<u64>()
        .with_context(|| format!("fail to parse counter value `{raw}`"))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::CounterStore;
    use std::sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    };

    /// In-process store fake with the same atomicity guarantee the real
    /// store provides.
    #[derive(Clone, Default)]
    pub struct MemoryStore(Arc<AtomicU64>);

    impl MemoryStore {
        pub fn starting_at(count: u64) -> Self {
            Self(Arc::new(AtomicU64::new(count)))
        }
    }

    #[async_trait::async_trait]
    impl CounterStore for MemoryStore {
        async fn bump(&self) -> anyhow::Result<String> {
            Ok((self.0.fetch_add(1, Ordering::SeqCst) + 1).to_string())
        }
    }

    /// Replies the way a decimal-typed document store would.
    pub struct DecimalStore(pub &'static str);

    #[async_trait::async_trait]
    impl CounterStore for DecimalStore {
        async fn bump(&self) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    /// A store whose backing table has gone away.
    pub struct BrokenStore;

    #[async_trait::async_trait]
    impl CounterStore for BrokenStore {
        async fn bump(&self) -> anyhow::Result<String> {
            anyhow::bail!("table `VisitorCounter` not found")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::coerce_count;

    #[test]
    fn coerce_accepts_integers() {
        assert_eq!(coerce_count("0").unwrap(), 0);
        assert_eq!(coerce_count("7").unwrap(), 7);
        assert_eq!(coerce_count("184467").unwrap(), 184467);
    }

    #[test]
    fn coerce_accepts_zero_fractions() {
        assert_eq!(coerce_count("7.0").unwrap(), 7);
        assert_eq!(coerce_count("7.000").unwrap(), 7);
    }

    #[test]
    fn coerce_rejects_non_integral_values() {
        assert!(coerce_count("7.5").is_err());
        assert!(coerce_count("7.").is_err());
        assert!(coerce_count("-1").is_err());
        assert!(coerce_count("").is_err());
        assert!(coerce_count("views").is_err());
    }
}
