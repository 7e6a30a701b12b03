//! Request builder, response parser and fetch pipeline for the
//! judicial-records API.
//!
//! # Design
//! `VerdictClient` carries only its endpoint configuration and a
//! `Transport`; it keeps no state between calls. Each operation is split
//! into a pure `build_*` method that produces an `HttpRequest` and a pure
//! `parse_*` method that consumes an `HttpResponse`. The `fetch_*` methods
//! compose the two halves through the transport, so everything except the
//! round-trip itself is deterministic and testable without a network.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{
    CaseIdentifier, CaseType, FetchedVerdict, Resource, SearchFilter, SearchPage, VerdictLookup,
    VerdictRecord,
};

/// Status reported by `fetch_verdict` when the lookup succeeded but the
/// content document could not be retrieved.
pub const CONTENT_UNAVAILABLE: u16 = 502;

/// Story fields copied to the top level of a merged verdict.
const LIFTED_STORY_FIELDS: [&str; 2] = ["identity", "pronounced_on"];

/// Synchronous, stateless client for the judicial-records API.
#[derive(Debug, Clone)]
pub struct VerdictClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl VerdictClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T> VerdictClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `{api_base}/{court}/{type-year-word-number}[/{resource}]`.
    pub fn case_query_url(&self, id: &CaseIdentifier, resource: Option<Resource>) -> String {
        let base = format!("{}/{}/{}", self.config.api_base, id.court_code, id.case_query());
        match resource {
            Some(resource) => format!("{base}/{}", resource.as_str()),
            None => base,
        }
    }

    /// The search endpoint with all nine query parameters form-encoded.
    pub fn search_url(&self, filter: &SearchFilter) -> Result<String, ApiError> {
        let query = serde_urlencoded::to_string(filter.query_pairs())?;
        Ok(format!("{}?{query}", self.config.search_url))
    }

    pub fn build_verdict_request(&self, id: &CaseIdentifier) -> HttpRequest {
        HttpRequest::get(self.case_query_url(id, Some(Resource::Verdict)))
    }

    pub fn build_schedules_request(&self, id: &CaseIdentifier) -> HttpRequest {
        HttpRequest::get(self.case_query_url(id, Some(Resource::Schedules)))
    }

    pub fn build_search_request(&self, filter: &SearchFilter) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::get(self.search_url(filter)?))
    }

    /// The content URL is used verbatim; it may point at another host.
    pub fn build_content_request(&self, lookup: &VerdictLookup) -> HttpRequest {
        HttpRequest::get(lookup.content_url.clone())
    }

    /// Decode a search response. The body must be JSON whatever the status.
    pub fn parse_search_page(&self, response: HttpResponse) -> Result<SearchPage, ApiError> {
        let body: Value = serde_json::from_str(&response.body)?;
        let total_pages = body
            .pointer("/pagination/pages")
            .and_then(Value::as_u64)
            .and_then(|pages| u32::try_from(pages).ok())
            .ok_or_else(|| ApiError::UnexpectedShape("pagination.pages".to_string()))?;
        Ok(SearchPage {
            status: response.status,
            body,
            total_pages,
        })
    }

    pub fn parse_verdict_lookup(&self, response: &HttpResponse) -> Result<VerdictLookup, ApiError> {
        let body: Value = serde_json::from_str(&response.body)?;
        let verdict = match body {
            Value::Object(mut root) => match root.remove("verdict") {
                Some(Value::Object(verdict)) => verdict,
                _ => return Err(ApiError::UnexpectedShape("verdict".to_string())),
            },
            _ => return Err(ApiError::UnexpectedShape("verdict".to_string())),
        };
        let content_url = verdict
            .get("body")
            .and_then(|body| body.get("content_url"))
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::UnexpectedShape("verdict.body.content_url".to_string()))?
            .to_string();
        Ok(VerdictLookup {
            verdict,
            content_url,
        })
    }

    pub fn parse_verdict_content(
        &self,
        response: &HttpResponse,
    ) -> Result<Map<String, Value>, ApiError> {
        match serde_json::from_str::<Value>(&response.body)? {
            Value::Object(content) => Ok(content),
            _ => Err(ApiError::UnexpectedShape("content object".to_string())),
        }
    }
}

impl<T: Transport> VerdictClient<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(url = %request.url, "GET");
        self.transport.execute(request)
    }

    /// Fetch and decode one page of search results.
    ///
    /// # Errors
    ///
    /// [`ApiError::Json`] if the body is not JSON, even on non-200 statuses;
    /// [`ApiError::UnexpectedShape`] if `pagination.pages` is absent.
    pub fn fetch_search_page(&self, filter: &SearchFilter) -> Result<SearchPage, ApiError> {
        let request = self.build_search_request(filter)?;
        let response = self.execute(&request)?;
        self.parse_search_page(response)
    }

    /// Raw verdict lookup; the caller decodes the body.
    pub fn fetch_verdict_raw(&self, id: &CaseIdentifier) -> Result<HttpResponse, ApiError> {
        self.execute(&self.build_verdict_request(id))
    }

    /// Raw hearing schedule for a case; the caller decodes the body.
    pub fn fetch_schedules(&self, id: &CaseIdentifier) -> Result<HttpResponse, ApiError> {
        self.execute(&self.build_schedules_request(id))
    }

    /// Look up a verdict, fetch its content, and flatten both into one record.
    ///
    /// A non-200 lookup is returned as-is with no record and no further
    /// requests. A non-200 content fetch yields [`CONTENT_UNAVAILABLE`].
    pub fn fetch_verdict(&self, id: &CaseIdentifier) -> Result<FetchedVerdict, ApiError> {
        let lookup_response = self.fetch_verdict_raw(id)?;
        if !lookup_response.is_ok() {
            debug!(case = %id.case_query(), status = lookup_response.status, "verdict lookup failed");
            return Ok(FetchedVerdict::empty(lookup_response.status));
        }

        let lookup = self.parse_verdict_lookup(&lookup_response)?;
        let content_response = self.execute(&self.build_content_request(&lookup))?;
        if !content_response.is_ok() {
            warn!(
                case = %id.case_query(),
                content_url = %lookup.content_url,
                status = content_response.status,
                "verdict content unavailable"
            );
            return Ok(FetchedVerdict::empty(CONTENT_UNAVAILABLE));
        }

        let content = self.parse_verdict_content(&content_response)?;
        let record = merge_verdict(lookup, content)?;
        Ok(FetchedVerdict {
            status: lookup_response.status,
            record: Some(record),
        })
    }

    /// Walk every page matching `filter` and collect each verdict that
    /// fetches successfully, in page order then story order.
    ///
    /// Pages with a non-200 status and verdicts that fail to fetch are
    /// skipped. The `page` key of `filter` is overwritten.
    pub fn fetch_verdicts(&self, filter: &SearchFilter) -> Result<Vec<VerdictRecord>, ApiError> {
        let first = self.fetch_search_page(&filter.clone().page(1))?;
        let total_pages = first.total_pages;
        info!(total_pages, "searching verdicts");

        let mut verdicts = Vec::new();
        let mut probe = Some(first);
        for page in 1..=total_pages {
            let results = match probe.take() {
                Some(first) => first,
                None => self.fetch_search_page(&filter.clone().page(page))?,
            };
            if !results.is_ok() {
                warn!(page, status = results.status, "skipping search page");
                continue;
            }

            for story in results.stories()? {
                let id = story.case_identifier();
                let fetched = self.fetch_verdict(&id)?;
                match fetched.record {
                    Some(record) if fetched.status == 200 => verdicts.push(record),
                    _ => debug!(case = %id.case_query(), status = fetched.status, "skipping verdict"),
                }
            }
        }

        info!(count = verdicts.len(), "collected verdicts");
        Ok(verdicts)
    }

    /// All verdicts of `case_type` adjudged between `start` and `end`
    /// inclusive.
    pub fn fetch_verdicts_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        case_type: CaseType,
    ) -> Result<Vec<VerdictRecord>, ApiError> {
        let filter = SearchFilter::new()
            .adjudged_between(start, end)
            .case_type(case_type);
        self.fetch_verdicts(&filter)
    }
}

/// Flatten a lookup and its content into one record.
///
/// Later sources win on key collisions: lookup fields, then content fields,
/// then `identity` / `pronounced_on` lifted from `story`. `story` itself is
/// not kept.
pub fn merge_verdict(
    lookup: VerdictLookup,
    content: Map<String, Value>,
) -> Result<VerdictRecord, ApiError> {
    let mut fields = lookup.verdict;
    fields.extend(content);

    let story = match fields.remove("story") {
        Some(Value::Object(story)) => story,
        _ => return Err(ApiError::UnexpectedShape("verdict.story".to_string())),
    };
    for key in LIFTED_STORY_FIELDS {
        if let Some(value) = story.get(key) {
            fields.insert(key.to_string(), value.clone());
        }
    }

    Ok(VerdictRecord::new(fields))
}
