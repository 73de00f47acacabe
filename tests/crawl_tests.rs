//! Integration tests for the crawler
//!
//! These tests serve a miniature category/song/artist/album site from
//! wiremock and run the full crawl cycle end-to-end, asserting on the
//! JSON-lines records it writes and on which pages it never requests.

use tempfile::TempDir;
use verse_miner::config::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use verse_miner::crawler::Coordinator;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server
fn create_test_config(server: &MockServer, records_dir: &str, max_pages: u32) -> Config {
    let domain = url::Url::parse(&server.uri())
        .expect("mock server URI must parse")
        .host_str()
        .expect("mock server URI must have a host")
        .to_string();

    Config {
        crawler: CrawlerConfig {
            allowed_domain: domain,
            category_seeds: vec![format!("{}/tags/rap/all", server.uri())],
            max_category_pages: max_pages,
            target_language: "de".to_string(),
            excluded_artists: vec!["Rap Genius Deutschland".to_string()],
            max_concurrent_pages_open: 4,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestMiner".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        output: OutputConfig {
            records_dir: records_dir.to_string(),
        },
    }
}

fn song_entry(href: &str, artist: &str) -> String {
    format!(
        r#"<a class="song_link" href="{href}">
             <span class="title_with_artists">
               <span class="artist_name"><span class="primary_artist_name">{artist}</span></span>
             </span>
           </a>"#
    )
}

fn category_page(entries: &[String], next_href: Option<&str>) -> String {
    let next = next_href
        .map(|href| format!(r#"<a class="next_page" href="{href}">Next</a>"#))
        .unwrap_or_default();
    format!(
        "<html><body>{}{}</body></html>",
        entries.join("\n"),
        next
    )
}

fn song_page(title: &str, artist: &str, language: &str) -> String {
    format!(
        r#"<html><head>
             <meta property="og:type" content="music.song">
             <meta itemprop="page_data" content="{{
                 &quot;tracking_data&quot;: [{{&quot;key&quot;: &quot;Lyrics Language&quot;, &quot;value&quot;: &quot;{language}&quot;}}],
                 &quot;dfp_kv&quot;: [
                     {{&quot;name&quot;: &quot;is_explicit&quot;, &quot;values&quot;: [&quot;false&quot;]}},
                     {{&quot;name&quot;: &quot;pageviews&quot;, &quot;values&quot;: [&quot;42K&quot;]}}
                 ],
                 &quot;song&quot;: {{
                     &quot;tags&quot;: [{{&quot;name&quot;: &quot;Rap&quot;}}],
                     &quot;stats&quot;: {{&quot;contributors&quot;: 3}}
                 }},
                 &quot;dmp_data_layer&quot;: {{&quot;page&quot;: {{&quot;artists&quot;: [&quot;{artist}&quot;]}}}}
             }}">
           </head><body>
             <h1 class="header_with_cover_art-primary_info-title">{title}</h1>
             <a class="header_with_cover_art-primary_info-primary_artist" href="/artists/{artist}">{artist}</a>
             <div class="lyrics"><p>Hello [Chorus] World</p></div>
             <div initial-content-for="track_info">
               <div><div><span>Release Date</span><span>March 3, 2016</span></div></div>
             </div>
           </body></html>"#
    )
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

/// Reads the emitted records back as JSON values
fn read_records(records_dir: &TempDir) -> Vec<serde_json::Value> {
    let path = records_dir.path().join("genius_song.jl");
    if !path.exists() {
        return Vec::new();
    }
    std::fs::read_to_string(path)
        .expect("records file must be readable")
        .lines()
        .map(|line| serde_json::from_str(line).expect("every line must be one JSON object"))
        .collect()
}

#[tokio::test]
async fn test_full_traversal_category_song_artist_album() {
    let server = MockServer::start().await;

    // Category page: one real artist, one excluded category account.
    Mock::given(method("GET"))
        .and(path("/tags/rap/all"))
        .respond_with(html_response(category_page(
            &[
                song_entry("/Cro-easy-lyrics", "Cro"),
                song_entry("/playlist-lyrics", "Rap Genius Deutschland"),
            ],
            None,
        )))
        .mount(&server)
        .await;

    // The excluded account's song must never be requested.
    Mock::given(method("GET"))
        .and(path("/playlist-lyrics"))
        .respond_with(html_response(song_page("Playlist", "Rap Genius Deutschland", "de")))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Cro-easy-lyrics"))
        .respond_with(html_response(song_page("Easy", "Cro", "de")))
        .mount(&server)
        .await;

    // Artist page with a direct album card grid.
    Mock::given(method("GET"))
        .and(path("/artists/Cro"))
        .respond_with(html_response(
            r#"<html><body><div class="thumbnail_grid-grid_element">
                 <a class="vertical_album_card" href="/albums/Cro/Raop"></a>
               </div></body></html>"#
                .to_string(),
        ))
        .expect(1)
        .mount(&server)
        .await;

    // Album with the already-seen song, a new song, and an instrumental.
    Mock::given(method("GET"))
        .and(path("/albums/Cro/Raop"))
        .respond_with(html_response(
            r#"<html><body>
                 <div class="chart_row-content"><a class="u-display_block" href="/Cro-easy-lyrics"></a></div>
                 <div class="chart_row-content"><a class="u-display_block" href="/Cro-traum-lyrics"></a></div>
                 <div class="chart_row-content"><a class="u-display_block" href="/Cro-intro-instrumental-lyrics"></a></div>
               </body></html>"#
                .to_string(),
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Cro-traum-lyrics"))
        .respond_with(html_response(song_page("Traum", "Cro", "de")))
        .expect(1)
        .mount(&server)
        .await;

    // Instrumental tracks are filtered before they ever become requests.
    Mock::given(method("GET"))
        .and(path("/Cro-intro-instrumental-lyrics"))
        .respond_with(html_response(song_page("Intro", "Cro", "de")))
        .expect(0)
        .mount(&server)
        .await;

    let records_dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &records_dir.path().to_string_lossy(), 1);

    let mut coordinator = Coordinator::new(config).expect("coordinator must initialize");
    coordinator.run().await.expect("crawl must complete");

    let records = read_records(&records_dir);
    assert_eq!(records.len(), 2, "one record per qualifying song URL");

    let titles: Vec<&str> = records
        .iter()
        .filter_map(|r| r["title"].as_str())
        .collect();
    assert!(titles.contains(&"Easy"));
    assert!(titles.contains(&"Traum"));

    for record in &records {
        assert_eq!(record["artist"], "Cro");
        assert_eq!(record["song_text"], "Hello World");
        assert_eq!(record["released_at"], "2016-03-03");
        assert_eq!(record["pageviews"], "42K");
        assert_eq!(record["tags"], "Rap");
        assert_eq!(record["contributor_count"], 3);
        assert_eq!(record["featured_artists"], "N/A");
        assert_eq!(record["is_explicit"], false);
    }
}

#[tokio::test]
async fn test_pagination_respects_bound() {
    let server = MockServer::start().await;

    // Page 1 links to page 2, page 2 links to page 3; bound is 2.
    // The query-specific mocks are mounted before the bare page-1 mock:
    // wiremock's `path` matcher ignores the query string and the first
    // mounted match wins, so the catch-all must come last.
    Mock::given(method("GET"))
        .and(path("/tags/rap/all"))
        .and(wiremock::matchers::query_param("page", "2"))
        .respond_with(html_response(category_page(&[], Some("/tags/rap/all?page=3"))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/tags/rap/all"))
        .and(wiremock::matchers::query_param("page", "3"))
        .respond_with(html_response(category_page(&[], None)))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/tags/rap/all"))
        .respond_with(html_response(category_page(&[], Some("/tags/rap/all?page=2"))))
        .mount(&server)
        .await;

    let records_dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &records_dir.path().to_string_lossy(), 2);

    let mut coordinator = Coordinator::new(config).expect("coordinator must initialize");
    coordinator.run().await.expect("crawl must complete");

    assert!(read_records(&records_dir).is_empty());
}

#[tokio::test]
async fn test_wrong_language_song_produces_no_record_or_expansion() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tags/rap/all"))
        .respond_with(html_response(category_page(
            &[song_entry("/Cro-english-lyrics", "Cro")],
            None,
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Cro-english-lyrics"))
        .respond_with(html_response(song_page("English Song", "Cro", "en")))
        .mount(&server)
        .await;

    // Language mismatch precedes artist expansion; the artist page must
    // never be fetched.
    Mock::given(method("GET"))
        .and(path("/artists/Cro"))
        .respond_with(html_response("<html></html>".to_string()))
        .expect(0)
        .mount(&server)
        .await;

    let records_dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &records_dir.path().to_string_lossy(), 1);

    let mut coordinator = Coordinator::new(config).expect("coordinator must initialize");
    coordinator.run().await.expect("crawl must complete");

    assert!(read_records(&records_dir).is_empty());
}

#[tokio::test]
async fn test_broken_metadata_skips_page_but_run_continues() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tags/rap/all"))
        .respond_with(html_response(category_page(
            &[
                song_entry("/Cro-broken-lyrics", "Cro"),
                song_entry("/Cro-easy-lyrics", "Cro"),
            ],
            None,
        )))
        .mount(&server)
        .await;

    // Metadata block is not JSON; this page is skipped with a warning.
    Mock::given(method("GET"))
        .and(path("/Cro-broken-lyrics"))
        .respond_with(html_response(
            r#"<html><head>
                 <meta property="og:type" content="music.song">
                 <meta itemprop="page_data" content="{not json">
               </head><body></body></html>"#
                .to_string(),
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Cro-easy-lyrics"))
        .respond_with(html_response(song_page("Easy", "Cro", "de")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/artists/Cro"))
        .respond_with(html_response("<html><body></body></html>".to_string()))
        .mount(&server)
        .await;

    let records_dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &records_dir.path().to_string_lossy(), 1);

    let mut coordinator = Coordinator::new(config).expect("coordinator must initialize");
    coordinator.run().await.expect("crawl must complete");

    // The broken page is isolated; the healthy one still produced a record.
    let records = read_records(&records_dir);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["title"], "Easy");
}
