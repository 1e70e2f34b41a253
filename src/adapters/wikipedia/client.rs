//! MediaWiki Action API client.
//!
//! Summaries come from the TextExtracts intro; disambiguation pages are detected
//! through the `disambiguation` page prop and expanded into their article links,
//! in the order they appear on the rendered page.

use crate::domain::KnowledgeError;
use crate::ports::KnowledgeSource;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// TextExtracts caps `exsentences` at 10.
const MAX_SENTENCES: usize = 10;

const USER_AGENT: &str = concat!("wiki-enrich/", env!("CARGO_PKG_VERSION"));

pub struct WikipediaAdapter {
    client: Client,
    api_url: String,
}

impl WikipediaAdapter {
    /// # Arguments
    /// * `api_url` - Endpoint template; `{lang}` is replaced by the locale on each call
    /// * `timeout` - Per-request timeout
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, KnowledgeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| KnowledgeError::Other(format!("HTTP client init failed: {}", e)))?;
        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    fn endpoint(&self, locale: &str) -> String {
        self.api_url.replace("{lang}", locale)
    }

    async fn request(
        &self,
        locale: &str,
        action: &str,
        params: &[(&str, String)],
    ) -> Result<ApiResponse, KnowledgeError> {
        let url = self.endpoint(locale);
        debug!(url = %url, action, ?params, "wikipedia request");

        let response = self
            .client
            .get(&url)
            .query(&[("action", action), ("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .await
            .map_err(|e| KnowledgeError::Other(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, "Wikipedia API returned error");
            return Err(KnowledgeError::Other(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| KnowledgeError::Other(format!("Failed to parse API response: {}", e)))?;

        if let Some(err) = &body.error {
            return Err(KnowledgeError::Other(format!("{}: {}", err.code, err.info)));
        }
        Ok(body)
    }

    async fn query(
        &self,
        locale: &str,
        params: &[(&str, String)],
    ) -> Result<Query, KnowledgeError> {
        let body = self.request(locale, "query", params).await?;
        Ok(body.query.unwrap_or_default())
    }

    /// Article links of a disambiguation page, in page order.
    async fn disambiguation_links(
        &self,
        title: &str,
        locale: &str,
    ) -> Result<Vec<String>, KnowledgeError> {
        let body = self
            .request(
                locale,
                "parse",
                &[
                    ("prop", "text".to_string()),
                    ("redirects", "1".to_string()),
                    ("page", title.to_string()),
                ],
            )
            .await?;

        let html = body.parse.map(|p| p.text).unwrap_or_default();
        list_item_links(&html)
    }
}

fn selector(css: &str) -> Result<Selector, KnowledgeError> {
    Selector::parse(css).map_err(|e| KnowledgeError::Other(format!("bad selector {}: {:?}", css, e)))
}

/// First article link of each list item, in document order, without duplicates.
/// Table-of-contents entries are skipped.
fn list_item_links(html: &str) -> Result<Vec<String>, KnowledgeError> {
    let doc = Html::parse_fragment(html);
    let item_sel = selector("li")?;
    let link_sel = selector(r#"a[href^="/wiki/"]"#)?;

    let mut titles: Vec<String> = Vec::new();
    for item in doc.select(&item_sel) {
        if item.value().classes().any(|c| c.starts_with("toc")) {
            continue;
        }
        let Some(link) = item.select(&link_sel).next() else {
            continue;
        };
        let title = match link.value().attr("title") {
            Some(t) => t.trim().to_string(),
            None => link.text().collect::<String>().trim().to_string(),
        };
        if !title.is_empty() && !titles.contains(&title) {
            titles.push(title);
        }
    }
    Ok(titles)
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    query: Option<Query>,
    #[serde(default)]
    parse: Option<Parsed>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Parsed {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Deserialize, Default)]
struct Query {
    #[serde(default)]
    pages: Vec<Page>,
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct Page {
    #[serde(default)]
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    pageprops: Option<PageProps>,
}

impl Page {
    fn is_disambiguation(&self) -> bool {
        self.pageprops
            .as_ref()
            .is_some_and(|p| p.disambiguation.is_some())
    }
}

#[derive(Deserialize)]
struct PageProps {
    #[serde(default)]
    disambiguation: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct SearchHit {
    title: String,
}

#[async_trait::async_trait]
impl KnowledgeSource for WikipediaAdapter {
    async fn summarize(
        &self,
        title: &str,
        sentences: usize,
        locale: &str,
    ) -> Result<String, KnowledgeError> {
        // `|` separates titles in a multi-title query and is never part of one.
        if title.contains('|') {
            debug!(title, "illegal title character");
            return Err(KnowledgeError::NotFound);
        }

        let sentences = sentences.clamp(1, MAX_SENTENCES);
        let query = self
            .query(
                locale,
                &[
                    ("prop", "extracts|pageprops".to_string()),
                    ("ppprop", "disambiguation".to_string()),
                    ("exintro", "1".to_string()),
                    ("explaintext", "1".to_string()),
                    ("exsentences", sentences.to_string()),
                    ("redirects", "1".to_string()),
                    ("titles", title.to_string()),
                ],
            )
            .await?;

        let page = query
            .pages
            .into_iter()
            .next()
            .ok_or(KnowledgeError::NotFound)?;

        if page.missing || page.invalid {
            return Err(KnowledgeError::NotFound);
        }

        if page.is_disambiguation() {
            let candidates = self.disambiguation_links(&page.title, locale).await?;
            debug!(title = %page.title, candidates = candidates.len(), "disambiguation page");
            return Err(KnowledgeError::Ambiguous(candidates));
        }

        match page.extract.map(|s| s.trim().to_string()) {
            Some(extract) if !extract.is_empty() => Ok(extract),
            _ => Err(KnowledgeError::NotFound),
        }
    }

    async fn search(
        &self,
        term: &str,
        locale: &str,
        max_results: usize,
    ) -> Result<Vec<String>, KnowledgeError> {
        let query = self
            .query(
                locale,
                &[
                    ("list", "search".to_string()),
                    ("srsearch", term.to_string()),
                    ("srlimit", max_results.max(1).to_string()),
                    ("srprop", String::new()),
                ],
            )
            .await?;

        Ok(query
            .search
            .into_iter()
            .map(|hit| hit.title)
            .take(max_results)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn adapter(server: &MockServer) -> WikipediaAdapter {
        WikipediaAdapter::new(server.url("/w/api.php"), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn endpoint_substitutes_locale() {
        let a = WikipediaAdapter::new("https://{lang}.wikipedia.org/w/api.php", Duration::from_secs(1))
            .unwrap();
        assert_eq!(a.endpoint("pt"), "https://pt.wikipedia.org/w/api.php");
    }

    #[tokio::test]
    async fn summary_returns_extract() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/w/api.php")
                    .query_param("prop", "extracts|pageprops")
                    .query_param("titles", "Python")
                    .query_param("exsentences", "3");
                then.status(200).json_body(json!({
                    "query": {"pages": [{"pageid": 1, "ns": 0, "title": "Python", "extract": "Python é uma linguagem. "}]}
                }));
            })
            .await;

        let summary = adapter(&server).summarize("Python", 3, "pt").await.unwrap();

        assert_eq!(summary, "Python é uma linguagem.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_page_is_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/w/api.php");
                then.status(200).json_body(json!({
                    "query": {"pages": [{"ns": 0, "title": "Qwzx", "missing": true}]}
                }));
            })
            .await;

        let err = adapter(&server).summarize("Qwzx", 3, "pt").await.unwrap_err();
        assert_eq!(err, KnowledgeError::NotFound);
    }

    #[tokio::test]
    async fn disambiguation_lists_links_in_page_order() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/w/api.php")
                    .query_param("action", "query")
                    .query_param("prop", "extracts|pageprops");
                then.status(200).json_body(json!({
                    "query": {"pages": [{
                        "ns": 0, "title": "Mercúrio", "extract": "Mercúrio pode referir-se a:",
                        "pageprops": {"disambiguation": ""}
                    }]}
                }));
            })
            .await;
        let html = r##"<div class="mw-parser-output">
            <p><b>Mercúrio</b> pode referir-se a:</p>
            <div id="toc"><ul><li class="toclevel-1 tocsection-1"><a href="#Astronomia">Astronomia</a></li></ul></div>
            <ul>
              <li><a href="/wiki/Merc%C3%BArio_(planeta)" title="Mercúrio (planeta)">Mercúrio</a>, o planeta mais próximo do Sol</li>
              <li><a href="/wiki/Merc%C3%BArio_(elemento_qu%C3%ADmico)" title="Mercúrio (elemento químico)">Mercúrio</a>, elemento químico</li>
              <li><a href="/w/index.php?title=Merc%C3%BArio_(navio)&amp;action=edit&amp;redlink=1" class="new">Mercúrio (navio)</a></li>
              <li><a href="/wiki/Merc%C3%BArio_(mitologia)" title="Mercúrio (mitologia)">Mercúrio</a>, deus romano</li>
              <li>ver também <a href="/wiki/Merc%C3%BArio_(planeta)" title="Mercúrio (planeta)">o planeta</a></li>
            </ul></div>"##;
        let parse = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/w/api.php")
                    .query_param("action", "parse")
                    .query_param("prop", "text")
                    .query_param("page", "Mercúrio");
                then.status(200).json_body(json!({
                    "parse": {"title": "Mercúrio", "pageid": 7, "text": html}
                }));
            })
            .await;

        let err = adapter(&server).summarize("Mercúrio", 3, "pt").await.unwrap_err();

        // Body order, not alphabetical: "mitologia" would sort first.
        assert_eq!(
            err,
            KnowledgeError::Ambiguous(vec![
                "Mercúrio (planeta)".to_string(),
                "Mercúrio (elemento químico)".to_string(),
                "Mercúrio (mitologia)".to_string(),
            ])
        );
        parse.assert_async().await;
    }

    #[test]
    fn list_links_fall_back_to_link_text() {
        let html = r#"<ul><li><a href="/wiki/Rust">Rust</a></li><li>plain text</li></ul>"#;
        assert_eq!(list_item_links(html).unwrap(), vec!["Rust".to_string()]);
    }

    #[tokio::test]
    async fn pipe_in_title_is_not_found_without_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/w/api.php");
                then.status(200).json_body(json!({
                    "query": {"pages": [
                        {"ns": 0, "title": "AC", "extract": "Alternating current."},
                        {"ns": 0, "title": "DC", "missing": true}
                    ]}
                }));
            })
            .await;

        let err = adapter(&server).summarize("AC|DC", 3, "pt").await.unwrap_err();

        assert_eq!(err, KnowledgeError::NotFound);
        mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn search_returns_ranked_titles() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/w/api.php")
                    .query_param("list", "search")
                    .query_param("srsearch", "Pyhton")
                    .query_param("srlimit", "3");
                then.status(200).json_body(json!({
                    "query": {"search": [
                        {"ns": 0, "title": "Python"},
                        {"ns": 0, "title": "Python (linguagem de programação)"}
                    ]}
                }));
            })
            .await;

        let hits = adapter(&server).search("Pyhton", "pt", 3).await.unwrap();
        assert_eq!(hits, vec!["Python", "Python (linguagem de programação)"]);
    }

    #[tokio::test]
    async fn http_error_is_other() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/w/api.php");
                then.status(503).body("maintenance");
            })
            .await;

        let err = adapter(&server).summarize("Python", 3, "pt").await.unwrap_err();
        match err {
            KnowledgeError::Other(msg) => assert!(msg.contains("503"), "{msg}"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn api_error_body_is_other() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/w/api.php");
                then.status(200)
                    .json_body(json!({"error": {"code": "badvalue", "info": "Bad value"}}));
            })
            .await;

        let err = adapter(&server).search("x", "pt", 3).await.unwrap_err();
        assert_eq!(err, KnowledgeError::Other("badvalue: Bad value".into()));
    }
}
