use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

static FORWARDED_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*").unwrap());
static LEADING_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\+?(\d+)").unwrap());

pub const FACETS: [&str; 2] = ["business", "departments"];
pub const ATTRIBUTES_TO_RETRIEVE: [&str; 7] = [
    "objectId",
    "business",
    "variant_images",
    "variant_tags",
    "link",
    "name",
    "price_range",
];

/// Which search endpoint a request came in through
#[derive(strum_macros::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    #[strum(serialize = "search")]
    Web,
    #[strum(serialize = "extension/search")]
    Extension,
}

/// Query string parameters as received
#[derive(Deserialize, Debug, Default, Clone)]
pub struct SearchParams {
    pub q: Option<String>,
    pub filters: Option<String>,
    pub pg: Option<String>,
    /// Client address override, honoured by the web route only
    pub ip: Option<String>,
}

/// A validated search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub route: Route,
    pub query: String,
    pub filters: String,
    pub page: u32,
    pub client_ip: Option<String>,
}

impl SearchRequest {
    pub fn parse(
        route: Route,
        method: &str,
        params: &SearchParams,
        forwarded_for: Option<&str>,
    ) -> Result<Self, SearchError> {
        if method != "GET" {
            log::info!("[{}] Incorrect method {}", route, method);
            return Err(SearchError::MethodNotAllowed(method.to_string()));
        }

        let query = validate_query(params.q.as_deref()).inspect_err(|_| {
            log::warn!("[{}] Invalid query: {:?}", route, params);
        })?;

        let explicit_ip = match route {
            Route::Web => params.ip.clone().filter(|ip| !ip.is_empty()),
            Route::Extension => None,
        };
        let forwarded_ip = forwarded_for
            .and_then(client_ip)
            .map(|ip| ammonia::clean(&ip))
            .filter(|ip| !ip.is_empty());

        Ok(SearchRequest {
            route,
            query,
            filters: params.filters.as_deref().map(sanitize).unwrap_or_default(),
            page: params.pg.as_deref().map(parse_page).unwrap_or(0),
            client_ip: explicit_ip.or(forwarded_ip),
        })
    }

    /// Options sent along with the query to the search index
    pub fn options(&self) -> SearchOptions {
        let headers = self.client_ip.as_ref().map(|ip| {
            HashMap::from([("X-Forwarded-For".to_string(), ip.clone())])
        });

        SearchOptions {
            facets: FACETS.iter().map(|s| s.to_string()).collect(),
            filters: self.filters.clone(),
            page: self.page,
            attributes_to_retrieve: ATTRIBUTES_TO_RETRIEVE.iter().map(|s| s.to_string()).collect(),
            around_lat_lng_via_ip: self.client_ip.as_ref().map(|_| true),
            headers,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    pub facets: Vec<String>,
    pub filters: String,
    pub page: u32,
    pub attributes_to_retrieve: Vec<String>,
    #[serde(rename = "aroundLatLngViaIP", skip_serializing_if = "Option::is_none")]
    pub around_lat_lng_via_ip: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

/// Strips markup from user input and decodes the HTML entities left over
pub fn sanitize(raw: &str) -> String {
    let cleaned = ammonia::clean(raw);
    html_escape::decode_html_entities(&cleaned).into_owned()
}

/// Sanitized, trimmed search text; blank queries are rejected
pub fn validate_query(raw: Option<&str>) -> Result<String, SearchError> {
    let query = raw.map(sanitize).unwrap_or_default();
    let query = query.trim();
    if query.is_empty() {
        return Err(SearchError::InvalidQuery);
    }

    Ok(query.to_string())
}

/// Page number from its leading digits, 0 when there are none
pub fn parse_page(raw: &str) -> u32 {
    LEADING_DIGITS
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|digits| digits.as_str().parse().unwrap_or(u32::MAX))
        .unwrap_or(0)
}

/// First address of an `X-Forwarded-For` header
pub fn client_ip(forwarded_for: &str) -> Option<String> {
    FORWARDED_SEPARATOR
        .split(forwarded_for)
        .next()
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
}
