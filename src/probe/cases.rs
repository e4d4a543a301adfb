//! Probe cases and payload.
//!
//! Two cases differ in the URL shape (collection vs. single row) and in the
//! casing of the app-key header name. Header names are lowercased by the
//! HTTP stack before they reach the wire, so the query-string placement is
//! offered as well: query parameter names keep their casing.

use serde::Serialize;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://api.mingdao.com";

/// App-key name accepted by the older endpoints.
pub const APP_KEY_LEGACY: &str = "HAP-AppKey";
/// App-key name the row endpoints document.
pub const APP_KEY_STRICT: &str = "HAP-Appkey";
pub const SIGN: &str = "HAP-Sign";

/// Credentials and target ids, supplied at run time.
#[derive(Debug, Clone)]
pub struct ProbeTarget {
    pub base: Url,
    pub worksheet_id: String,
    pub row_id: String,
}

impl ProbeTarget {
    /// `{base}/v3/app/worksheets/{worksheetId}/rows`
    pub fn rows_url(&self) -> Result<Url, url::ParseError> {
        self.endpoint(&["v3", "app", "worksheets", &self.worksheet_id, "rows"])
    }

    /// `{base}/v3/app/worksheets/{worksheetId}/rows/{rowId}`
    pub fn row_url(&self) -> Result<Url, url::ParseError> {
        self.endpoint(&[
            "v3",
            "app",
            "worksheets",
            &self.worksheet_id,
            "rows",
            &self.row_id,
        ])
    }

    /// Base origin plus `segments`, each percent-encoded as exactly one
    /// path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, url::ParseError> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithoutBase)?
            .clear()
            .extend(segments);
        Ok(url)
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub app_key: String,
    pub sign: String,
}

/// Where the credentials travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPlacement {
    Header,
    Query,
}

#[derive(Debug, Clone)]
pub struct ProbeCase {
    pub name: String,
    pub url: Url,
    pub app_key_name: &'static str,
    pub placement: AuthPlacement,
}

impl ProbeCase {
    /// URL actually requested; carries the credentials for query placement.
    pub fn request_url(&self, credentials: &Credentials) -> Url {
        let mut url = self.url.clone();
        if self.placement == AuthPlacement::Query {
            url.query_pairs_mut()
                .append_pair(self.app_key_name, &credentials.app_key)
                .append_pair(SIGN, &credentials.sign);
        }
        url
    }
}

/// The two header probes, followed by their query variants when asked.
pub fn standard_cases(
    target: &ProbeTarget,
    include_query: bool,
) -> Result<Vec<ProbeCase>, url::ParseError> {
    let header_cases = [
        ("Overloaded Add", target.rows_url()?, APP_KEY_LEGACY),
        ("Strict Path + Lower Header", target.row_url()?, APP_KEY_STRICT),
    ];

    let mut cases: Vec<ProbeCase> = header_cases
        .iter()
        .map(|(name, url, key)| ProbeCase {
            name: name.to_string(),
            url: url.clone(),
            app_key_name: *key,
            placement: AuthPlacement::Header,
        })
        .collect();

    if include_query {
        let query_cases: Vec<ProbeCase> = cases
            .iter()
            .map(|case| ProbeCase {
                name: format!("{} (query auth)", case.name),
                placement: AuthPlacement::Query,
                ..case.clone()
            })
            .collect();
        cases.extend(query_cases);
    }
    Ok(cases)
}

/// Row update body; `rowId` lets the collection endpoint act as an update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowUpdate {
    pub row_id: String,
    pub trigger_workflow: bool,
    pub fields: Vec<FieldValue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldValue {
    pub id: String,
    pub value: String,
}

impl RowUpdate {
    pub fn single_field(row_id: &str, field_id: &str, value: &str) -> Self {
        Self {
            row_id: row_id.to_string(),
            trigger_workflow: true,
            fields: vec![FieldValue {
                id: field_id.to_string(),
                value: value.to_string(),
            }],
        }
    }
}
