//! Artist page handler
//!
//! Artist pages either show a "show all albums" control (prolific artists)
//! or a direct album card grid. The handler follows whichever form the
//! page takes: one album-overview request xor one album request per card.

use crate::pages::{css, resolve_link, CrawlRequest, HandlerOutput, PageKind};
use scraper::Html;
use url::Url;

/// Handles one fetched artist page
pub fn handle_artist(document: &Html, url: &Url) -> HandlerOutput {
    let show_all_selector = css("div.u-quarter_top_margin a.full_width_button");

    if let Some(link) = document
        .select(&show_all_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| resolve_link(href, url))
    {
        tracing::info!(url = %url, overview = %link, "artist has full album listing");
        return HandlerOutput {
            requests: vec![CrawlRequest::new(link, PageKind::AlbumOverview)],
            record: None,
        };
    }

    let card_selector = css("div.thumbnail_grid-grid_element a.vertical_album_card");
    let requests: Vec<CrawlRequest> = document
        .select(&card_selector)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| resolve_link(href, url))
        .map(|link| CrawlRequest::new(link, PageKind::Album))
        .collect();

    tracing::info!(url = %url, albums = requests.len(), "visited artist page");

    HandlerOutput {
        requests,
        record: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artist_url() -> Url {
        Url::parse("https://genius.com/artists/Cro").unwrap()
    }

    #[test]
    fn test_show_all_control_wins_over_cards() {
        let document = Html::parse_document(
            r#"<html><body>
                 <div class="u-quarter_top_margin">
                   <a class="full_width_button" href="/artists/Cro/albums">Show all albums</a>
                 </div>
                 <div class="thumbnail_grid-grid_element">
                   <a class="vertical_album_card" href="/albums/Cro/Raop"></a>
                 </div>
               </body></html>"#,
        );
        let output = handle_artist(&document, &artist_url());

        assert_eq!(output.requests.len(), 1);
        assert_eq!(output.requests[0].kind, PageKind::AlbumOverview);
        assert_eq!(
            output.requests[0].url.as_str(),
            "https://genius.com/artists/Cro/albums"
        );
    }

    #[test]
    fn test_direct_album_cards_followed() {
        let document = Html::parse_document(
            r#"<html><body>
                 <div class="thumbnail_grid-grid_element">
                   <a class="vertical_album_card" href="/albums/Cro/Raop"></a>
                 </div>
                 <div class="thumbnail_grid-grid_element">
                   <a class="vertical_album_card" href="/albums/Cro/Melodie"></a>
                 </div>
               </body></html>"#,
        );
        let output = handle_artist(&document, &artist_url());

        assert_eq!(output.requests.len(), 2);
        assert!(output.requests.iter().all(|r| r.kind == PageKind::Album));
    }

    #[test]
    fn test_empty_artist_page_yields_nothing() {
        let document = Html::parse_document("<html><body></body></html>");
        let output = handle_artist(&document, &artist_url());
        assert!(output.requests.is_empty());
        assert!(output.record.is_none());
    }
}
