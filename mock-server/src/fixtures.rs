//! In-memory case data served by the mock API.

use serde_json::{json, Value};

/// One court case with everything the API can say about it.
#[derive(Clone, Debug)]
pub struct CaseFixture {
    pub id: u64,
    pub court_code: String,
    pub court_name: String,
    pub story_type: String,
    pub year: u32,
    pub word: String,
    pub number: u32,
    pub adjudged_on: String,
    pub pronounced_on: String,
    pub judges: Vec<String>,
    pub lawyers: Vec<String>,
    /// Full text; `None` makes the content document 404.
    pub content: Option<String>,
    pub schedules: Vec<Value>,
}

impl CaseFixture {
    /// `type-year-word-number`, the path segment that addresses this case.
    pub fn story_key(&self) -> String {
        format!("{}-{}-{}-{}", self.story_type, self.year, self.word, self.number)
    }

    fn identity(&self) -> Value {
        json!({
            "type": self.story_type,
            "year": self.year,
            "word": self.word,
            "number": self.number,
        })
    }

    fn court(&self) -> Value {
        json!({"code": self.court_code, "name": self.court_name})
    }

    pub fn story(&self) -> Value {
        json!({
            "identity": self.identity(),
            "court": self.court(),
            "adjudged_on": self.adjudged_on,
            "pronounced_on": self.pronounced_on,
            "judges_names": self.judges,
            "lawyer_names": self.lawyers,
        })
    }

    /// Entry of a search page's `stories` array.
    pub fn summary(&self) -> Value {
        json!({
            "court": self.court(),
            "identity": self.identity(),
            "adjudged_on": self.adjudged_on,
            "pronounced_on": self.pronounced_on,
            "judges_names": self.judges,
        })
    }

    pub fn verdict(&self, public_url: &str) -> Value {
        json!({
            "verdict": {
                "id": self.id,
                "title": format!("{} {}年度{}字第{}號", self.court_name, self.year, self.word, self.number),
                "adjudged_on": self.adjudged_on,
                "body": {"content_url": format!("{public_url}/contents/{}", self.id)},
                "story": self.story(),
            }
        })
    }

    pub fn content_document(&self) -> Option<Value> {
        self.content.as_ref().map(|text| {
            json!({
                "id": self.id,
                "content": text,
                "main_judges": self.judges,
                "party_names": [],
            })
        })
    }
}

/// Search criteria decoded from `q[...]` parameters; empty strings mean
/// "unconstrained".
#[derive(Debug, Default)]
pub struct StoryQuery<'a> {
    pub adjudged_on_gteq: &'a str,
    pub adjudged_on_lteq: &'a str,
    pub judges_names_cont: &'a str,
    pub lawyer_names_cont: &'a str,
    pub number: &'a str,
    pub story_type: &'a str,
    pub word: &'a str,
    pub year: &'a str,
}

impl StoryQuery<'_> {
    pub fn matches(&self, case: &CaseFixture) -> bool {
        (self.adjudged_on_gteq.is_empty() || case.adjudged_on.as_str() >= self.adjudged_on_gteq)
            && (self.adjudged_on_lteq.is_empty() || case.adjudged_on.as_str() <= self.adjudged_on_lteq)
            && (self.judges_names_cont.is_empty()
                || case.judges.iter().any(|j| j.contains(self.judges_names_cont)))
            && (self.lawyer_names_cont.is_empty()
                || case.lawyers.iter().any(|l| l.contains(self.lawyer_names_cont)))
            && (self.number.is_empty() || case.number.to_string() == self.number)
            && (self.story_type.is_empty() || case.story_type == self.story_type)
            && (self.word.is_empty() || case.word == self.word)
            && (self.year.is_empty() || case.year.to_string() == self.year)
    }
}

/// The full data set behind the mock API.
#[derive(Clone, Debug)]
pub struct Fixtures {
    /// Absolute root the server is reachable at; embedded in content URLs.
    pub public_url: String,
    pub cases: Vec<CaseFixture>,
}

impl Fixtures {
    pub fn new(public_url: &str, cases: Vec<CaseFixture>) -> Self {
        Self {
            public_url: public_url.trim_end_matches('/').to_string(),
            cases,
        }
    }

    pub fn find(&self, court_code: &str, story_key: &str) -> Option<&CaseFixture> {
        self.cases
            .iter()
            .find(|c| c.court_code == court_code && c.story_key() == story_key)
    }

    pub fn find_by_id(&self, id: u64) -> Option<&CaseFixture> {
        self.cases.iter().find(|c| c.id == id)
    }

    /// Six cases across three courts. Three are civil cases adjudged in
    /// 2020; the third of those has no content document.
    pub fn sample(public_url: &str) -> Self {
        let case = |id: u64,
                    court_code: &str,
                    court_name: &str,
                    story_type: &str,
                    year: u32,
                    word: &str,
                    number: u32,
                    adjudged_on: &str| CaseFixture {
            id,
            court_code: court_code.to_string(),
            court_name: court_name.to_string(),
            story_type: story_type.to_string(),
            year,
            word: word.to_string(),
            number,
            adjudged_on: adjudged_on.to_string(),
            pronounced_on: adjudged_on.to_string(),
            judges: Vec::new(),
            lawyers: Vec::new(),
            content: Some(format!("{court_name} {year}年度{word}字第{number}號判決")),
            schedules: Vec::new(),
        };

        let mut first = case(1, "TPD", "臺灣臺北地方法院", "民事", 109, "訴", 123, "2020-03-10");
        first.judges = vec!["王小明".to_string()];
        first.lawyers = vec!["張律師".to_string()];
        first.schedules = vec![
            json!({"date": "2020-01-15", "time": "09:30", "courtroom": "第一法庭"}),
            json!({"date": "2020-02-20", "time": "14:00", "courtroom": "第一法庭"}),
        ];

        let mut second = case(2, "TPD", "臺灣臺北地方法院", "民事", 109, "訴", 456, "2020-05-20");
        second.judges = vec!["李大華".to_string()];

        let mut third = case(3, "KSD", "臺灣高雄地方法院", "民事", 108, "重訴", 7, "2020-07-01");
        third.judges = vec!["王美玲".to_string()];
        third.content = None;

        let mut fourth = case(4, "TPD", "臺灣臺北地方法院", "刑事", 109, "易", 88, "2020-04-15");
        fourth.judges = vec!["陳志強".to_string()];

        let mut fifth = case(5, "TCD", "臺灣臺中地方法院", "民事", 110, "簡上", 31, "2021-02-03");
        fifth.judges = vec!["林佳慧".to_string()];

        let sixth = case(6, "TPB", "臺北高等行政法院", "行政", 109, "訴", 12, "2020-09-09");

        Self::new(public_url, vec![first, second, third, fourth, fifth, sixth])
    }
}
