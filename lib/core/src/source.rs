use serde_json::Value;

use crate::query::GraphQuery;
use crate::Result;

/// A GraphQL endpoint answering star-graph queries.
///
/// Each call is one round trip. Implementations return the response `data`
/// object and map every transport or query failure to an error; callers
/// never retry.
#[allow(async_fn_in_trait)]
pub trait GraphSource {
    async fn execute(&self, query: &GraphQuery) -> Result<Value>;
}

impl<T: GraphSource> GraphSource for &T {
    async fn execute(&self, query: &GraphQuery) -> Result<Value> {
        (**self).execute(query).await
    }
}
