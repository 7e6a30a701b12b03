//! Domain types for the judicial-records API.
//!
//! # Design
//! Request parameters (`CaseIdentifier`, `SearchFilter`) are explicit structs
//! with named fields, so an unsupported filter can only enter through
//! `FilterKey::from_str`, which rejects it. Response payloads the client only
//! passes through (`SearchPage::body`, `VerdictRecord`) stay as JSON maps
//! because the service adds fields freely; the handful of fields the client
//! actually reads are typed.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// The four case categories, carried on the wire as their court labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseType {
    #[serde(rename = "民事")]
    Civil,
    #[serde(rename = "刑事")]
    Criminal,
    #[serde(rename = "行政")]
    Administrative,
    #[serde(rename = "公懲")]
    Disciplinary,
}

impl CaseType {
    pub const ALL: [CaseType; 4] = [
        CaseType::Civil,
        CaseType::Criminal,
        CaseType::Administrative,
        CaseType::Disciplinary,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CaseType::Civil => "民事",
            CaseType::Criminal => "刑事",
            CaseType::Administrative => "行政",
            CaseType::Disciplinary => "公懲",
        }
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CaseType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CaseType::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| ApiError::UnexpectedShape(format!("case type {s:?}")))
    }
}

/// Identifies one court case.
///
/// `year` is on the ROC calendar (民國), e.g. `109` for 2020.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseIdentifier {
    pub court_code: String,
    pub case_type: CaseType,
    pub year: String,
    pub word: String,
    pub number: String,
}

impl CaseIdentifier {
    pub fn new(
        court_code: impl Into<String>,
        case_type: CaseType,
        year: impl ToString,
        word: impl Into<String>,
        number: impl ToString,
    ) -> Self {
        Self {
            court_code: court_code.into(),
            case_type,
            year: year.to_string(),
            word: word.into(),
            number: number.to_string(),
        }
    }

    /// The `type-year-word-number` path segment, e.g. `民事-109-訴-123`.
    pub fn case_query(&self) -> String {
        format!("{}-{}-{}-{}", self.case_type, self.year, self.word, self.number)
    }
}

/// Sub-resource of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Verdict,
    Schedules,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Verdict => "verdict",
            Resource::Schedules => "schedules",
        }
    }
}

/// The nine query keys the search endpoint understands, in the order the
/// query string lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKey {
    Page,
    AdjudgedOnGteq,
    AdjudgedOnLteq,
    JudgesNamesCont,
    LawyerNamesCont,
    Number,
    StoryType,
    Word,
    Year,
}

impl FilterKey {
    pub const ALL: [FilterKey; 9] = [
        FilterKey::Page,
        FilterKey::AdjudgedOnGteq,
        FilterKey::AdjudgedOnLteq,
        FilterKey::JudgesNamesCont,
        FilterKey::LawyerNamesCont,
        FilterKey::Number,
        FilterKey::StoryType,
        FilterKey::Word,
        FilterKey::Year,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterKey::Page => "page",
            FilterKey::AdjudgedOnGteq => "adjudged_on_gteq",
            FilterKey::AdjudgedOnLteq => "adjudged_on_lteq",
            FilterKey::JudgesNamesCont => "judges_names_cont",
            FilterKey::LawyerNamesCont => "lawyer_names_cont",
            FilterKey::Number => "number",
            FilterKey::StoryType => "story_type",
            FilterKey::Word => "word",
            FilterKey::Year => "year",
        }
    }

    /// Query parameter name: `page` is sent bare, filters as `q[<name>]`.
    pub fn param(self) -> &'static str {
        match self {
            FilterKey::Page => "page",
            FilterKey::AdjudgedOnGteq => "q[adjudged_on_gteq]",
            FilterKey::AdjudgedOnLteq => "q[adjudged_on_lteq]",
            FilterKey::JudgesNamesCont => "q[judges_names_cont]",
            FilterKey::LawyerNamesCont => "q[lawyer_names_cont]",
            FilterKey::Number => "q[number]",
            FilterKey::StoryType => "q[story_type]",
            FilterKey::Word => "q[word]",
            FilterKey::Year => "q[year]",
        }
    }
}

impl FromStr for FilterKey {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKey::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| ApiError::UnknownFilterKey(s.to_string()))
    }
}

/// Search criteria for the story search endpoint.
///
/// Unset keys are sent with empty values, which the service treats as
/// "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    values: BTreeMap<FilterKey, String>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        self.values.insert(key, value.into());
        self
    }

    /// Set a filter by its wire name, e.g. `"judges_names_cont"`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnknownFilterKey`] for names outside the nine
    /// recognized keys.
    pub fn try_with(self, key: &str, value: impl Into<String>) -> Result<Self, ApiError> {
        Ok(self.with(key.parse()?, value))
    }

    /// 1-based result page.
    pub fn page(self, page: u32) -> Self {
        self.with(FilterKey::Page, page.to_string())
    }

    /// Restrict to verdicts adjudged within `start..=end`.
    pub fn adjudged_between(self, start: NaiveDate, end: NaiveDate) -> Self {
        self.with(FilterKey::AdjudgedOnGteq, format_date(start))
            .with(FilterKey::AdjudgedOnLteq, format_date(end))
    }

    pub fn judge(self, name: impl Into<String>) -> Self {
        self.with(FilterKey::JudgesNamesCont, name)
    }

    pub fn lawyer(self, name: impl Into<String>) -> Self {
        self.with(FilterKey::LawyerNamesCont, name)
    }

    pub fn case_type(self, case_type: CaseType) -> Self {
        self.with(FilterKey::StoryType, case_type.label())
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// All nine query parameters in wire order, unset ones as `""`.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        FilterKey::ALL
            .into_iter()
            .map(|key| (key.param(), self.get(key).unwrap_or("")))
            .collect()
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// One entry of a search page's `stories` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorySummary {
    pub court: CourtRef,
    pub identity: StoryIdentity,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CourtRef {
    #[serde(deserialize_with = "string_or_number")]
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoryIdentity {
    #[serde(rename = "type")]
    pub case_type: CaseType,
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,
    pub word: String,
    #[serde(deserialize_with = "string_or_number")]
    pub number: String,
}

impl StorySummary {
    pub fn case_identifier(&self) -> CaseIdentifier {
        CaseIdentifier {
            court_code: self.court.code.clone(),
            case_type: self.identity.case_type,
            year: self.identity.year.clone(),
            word: self.identity.word.clone(),
            number: self.identity.number.clone(),
        }
    }
}

/// The service emits years and case numbers as integers in some payloads
/// and strings in others.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}

/// One decoded page of search results.
///
/// The body is decoded regardless of `status`; `total_pages` comes from
/// `pagination.pages`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub status: u16,
    pub body: Value,
    pub total_pages: u32,
}

impl SearchPage {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Decode the `stories` array.
    pub fn stories(&self) -> Result<Vec<StorySummary>, ApiError> {
        let stories = self
            .body
            .get("stories")
            .ok_or_else(|| ApiError::UnexpectedShape("stories".to_string()))?;
        Ok(Vec::<StorySummary>::deserialize(stories)?)
    }
}

/// A decoded verdict lookup: the `verdict` object and the URL of its full
/// text.
#[derive(Debug, Clone, PartialEq)]
pub struct VerdictLookup {
    pub verdict: Map<String, Value>,
    pub content_url: String,
}

/// A verdict flattened from its lookup, content, and story metadata.
///
/// Serializes as the bare JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerdictRecord(Map<String, Value>);

impl VerdictRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    pub fn identity(&self) -> Option<&Value> {
        self.get("identity")
    }

    pub fn pronounced_on(&self) -> Option<&str> {
        self.get("pronounced_on").and_then(Value::as_str)
    }
}

/// Outcome of `VerdictClient::fetch_verdict`: the status the caller should
/// act on, and the merged record when it is 200.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedVerdict {
    pub status: u16,
    pub record: Option<VerdictRecord>,
}

impl FetchedVerdict {
    pub fn empty(status: u16) -> Self {
        Self { status, record: None }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200 && self.record.is_some()
    }

    pub fn into_record(self) -> Option<VerdictRecord> {
        self.record
    }
}
