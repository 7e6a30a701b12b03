//! Verify URL building and verdict merging against JSON test vectors stored
//! in `test-vectors/`.
//!
//! Records are compared as parsed JSON, so key order in the vector files does
//! not matter.

use sunnyjudge_core::{
    merge_verdict, ApiError, CaseIdentifier, ClientConfig, HttpResponse, Resource, SearchFilter,
    VerdictClient, VerdictRecord,
};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> VerdictClient {
    VerdictClient::new(ClientConfig::with_base(BASE_URL))
}

fn parse_resource(value: &serde_json::Value) -> Option<Resource> {
    match value.as_str() {
        None => None,
        Some("verdict") => Some(Resource::Verdict),
        Some("schedules") => Some(Resource::Schedules),
        Some(other) => panic!("unknown resource: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Case URLs
// ---------------------------------------------------------------------------

#[test]
fn case_url_test_vectors() {
    let raw = include_str!("../../test-vectors/case_urls.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id: CaseIdentifier = serde_json::from_value(case["input"].clone()).unwrap();
        let resource = parse_resource(&case["resource"]);

        let url = c.case_query_url(&id, resource);
        let expected = format!("{BASE_URL}{}", case["expected_path"].as_str().unwrap());
        assert_eq!(url, expected, "{name}: url");
    }
}

// ---------------------------------------------------------------------------
// Search URLs
// ---------------------------------------------------------------------------

#[test]
fn search_url_test_vectors() {
    let raw = include_str!("../../test-vectors/search_urls.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let filters = case["filters"].as_object().unwrap();

        let result = filters.iter().try_fold(SearchFilter::new(), |filter, (key, value)| {
            filter.try_with(key, value.as_str().unwrap())
        });

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "UnknownFilterKey" => assert!(
                    matches!(err, ApiError::UnknownFilterKey(_)),
                    "{name}: expected UnknownFilterKey"
                ),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let url = c.search_url(&result.unwrap()).unwrap();
            let expected = format!(
                "{BASE_URL}/search/stories?{}",
                case["expected_query"].as_str().unwrap()
            );
            assert_eq!(url, expected, "{name}: url");
        }
    }
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

#[test]
fn merge_test_vectors() {
    let raw = include_str!("../../test-vectors/merge.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let lookup_response = HttpResponse {
            status: 200,
            body: case["lookup"].to_string(),
        };
        let lookup = c.parse_verdict_lookup(&lookup_response).unwrap();
        assert_eq!(
            lookup.content_url,
            case["expected_content_url"].as_str().unwrap(),
            "{name}: content_url"
        );

        let content_response = HttpResponse {
            status: 200,
            body: case["content"].to_string(),
        };
        let content = c.parse_verdict_content(&content_response).unwrap();

        let record = merge_verdict(lookup, content).unwrap();
        let expected: VerdictRecord =
            serde_json::from_value(case["expected_record"].clone()).unwrap();
        assert_eq!(record, expected, "{name}: merged record");
        assert!(record.get("story").is_none(), "{name}: story removed");
    }
}
