// Request-time redirect lookup

use crate::client::GraphQlClient;
use crate::error::Result;
use marquee_core::redirect::{RedirectRule, RedirectTarget};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

const REDIRECT_QUERY: &str = "query Redirect($storeId: ID!, $path: String!) { redirect(storeId: $storeId, path: $path) { source_path destination_path redirect_type is_pattern } }";

#[derive(Debug, Deserialize)]
struct RedirectData {
    redirect: Option<RedirectRule>,
}

/// Looks up at most one redirect rule per request path.
///
/// A lookup never blocks the page: any failure is logged and treated as "no redirect".
#[derive(Debug, Clone)]
pub struct RedirectLookup {
    graphql: GraphQlClient,
}

impl RedirectLookup {
    pub fn new(graphql: GraphQlClient) -> Self {
        Self { graphql }
    }

    pub async fn try_lookup(&self, store_id: &str, path: &str) -> Result<Option<RedirectTarget>> {
        let data: RedirectData = self
            .graphql
            .query(REDIRECT_QUERY, json!({ "storeId": store_id, "path": path }))
            .await?;

        let Some(rule) = data.redirect else {
            return Ok(None);
        };
        if let Err(e) = rule.validate() {
            warn!("Ignoring redirect for {}: {}", path, e);
            return Ok(None);
        }

        // The upstream picks the rule; the wildcard capture is applied here.
        let target = rule.matches(path);
        if target.is_none() {
            debug!("Redirect rule {} does not cover {}", rule.source_path, path);
        }
        Ok(target)
    }

    pub async fn lookup(&self, store_id: &str, path: &str) -> Option<RedirectTarget> {
        self.try_lookup(store_id, path).await.unwrap_or_else(|e| {
            warn!("Redirect lookup failed for {}: {}", path, e);
            None
        })
    }
}
