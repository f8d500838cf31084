//! ENS subgraph client.

use crate::{EnsError, hash::namehash};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

const TEXT_KEYS_QUERY: &str = "query($id: String!) { domain(id: $id) { resolver { texts } } }";

/// Client of an ENS subgraph GraphQL endpoint.
#[derive(Clone, Debug)]
pub struct SubgraphClient {
    client: reqwest::Client,
    url: Url,
}

impl SubgraphClient {
    /// Request timeout.
    pub const TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a client for the endpoint at `url`.
    pub fn new(url: Url) -> Result<Self, EnsError> {
        let client = reqwest::Client::builder().timeout(Self::TIMEOUT).build()?;
        Ok(Self { client, url })
    }

    /// Returns the endpoint.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns every text record key ever set on the current resolver of `name`.
    ///
    /// A name or resolver unknown to the subgraph has no keys.
    pub async fn text_keys(&self, name: &str) -> Result<Vec<String>, EnsError> {
        let id = namehash(name).to_string();
        debug!(%name, %id, url = %self.url, "querying subgraph text keys");
        let request = GraphQlRequest { query: TEXT_KEYS_QUERY, variables: Variables { id: &id } };
        let response = self
            .client
            .post(self.url.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<GraphQlResponse>()
            .await?;
        response.into_text_keys()
    }
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'static str,
    variables: Variables<'a>,
}

#[derive(Serialize)]
struct Variables<'a> {
    id: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Data>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct Data {
    domain: Option<Domain>,
}

#[derive(Debug, Deserialize)]
struct Domain {
    resolver: Option<Resolver>,
}

#[derive(Debug, Deserialize)]
struct Resolver {
    texts: Option<Vec<String>>,
}

impl GraphQlResponse {
    fn into_text_keys(self) -> Result<Vec<String>, EnsError> {
        if !self.errors.is_empty() {
            let message = self.errors.iter().map(|err| err.message.as_str()).join("; ");
            return Err(EnsError::SubgraphResponse(message));
        }
        Ok(self
            .data
            .and_then(|data| data.domain)
            .and_then(|domain| domain.resolver)
            .and_then(|resolver| resolver.texts)
            .unwrap_or_default())
    }
}
