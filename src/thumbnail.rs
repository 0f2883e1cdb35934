//! Finds the thumbnail of an embedded post by scraping its page.
//!
//! Page markup is not a stable contract, so extraction is a list of
//! candidates tried in order. The first one matching wins.

use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::Embed;
use crate::content::EmbedId;
use crate::http::{FetchError, HttpFetch};

struct Candidate {
    name: &'static str,
    regex: Regex,
    /// Escape sequences replaced in the captured url
    escapes: &'static [(&'static str, &'static str)],
}

impl Candidate {
    fn extract(&self, html: &str) -> Option<String> {
        let url = self.regex.captures(html)?.name("url")?.as_str();
        let url = self.escapes.iter()
            .fold(url.to_string(), |url, &(from, to)| url.replace(from, to));
        Some(url)
    }
}

lazy_static! {
    static ref CANDIDATES: Vec<Candidate> = vec![
        Candidate {
            name: "og:image",
            regex: Regex::new(r#"<meta property="og:image" content="(?P<url>[^"]+)""#).unwrap(),
            escapes: &[("&amp;", "&")],
        },
        Candidate {
            name: "display_url",
            regex: Regex::new(r#""display_url":"(?P<url>[^"]+)""#).unwrap(),
            escapes: &[(r"\u0026", "&")],
        },
    ];
}

/// Thumbnail url from the first candidate matching the page
pub fn find_thumbnail(html: &str) -> Option<String> {
    CANDIDATES.iter().find_map(|candidate| {
        let url = candidate.extract(html)?;
        spdlog::debug!("Thumbnail found by {}: {}", candidate.name, url);
        Some(url)
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("error fetching page: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("no thumbnail in {url}")]
    NoThumbnail { url: String },
}

pub struct ThumbnailResolver {
    page_url: String,
    timeout: Duration,
}

impl ThumbnailResolver {
    pub fn new(embed: &Embed, timeout: Duration) -> ThumbnailResolver {
        ThumbnailResolver {
            page_url: embed.page_url.clone(),
            timeout,
        }
    }

    pub fn page_url(&self, id: &EmbedId) -> String {
        self.page_url.replace("{id}", id.as_str())
    }

    pub fn resolve<H: HttpFetch + ?Sized>(&self, http: &H, id: &EmbedId) -> Result<String, ResolveError> {
        let url = self.page_url(id);
        let html = match http.get_text(&url, self.timeout) {
            Ok(html) => html,
            Err(source) => return Err(ResolveError::Fetch { url, source }),
        };

        find_thumbnail(&html).ok_or(ResolveError::NoThumbnail { url })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use crate::test_data::{PAGE_WITH_DISPLAY_URL, PAGE_WITH_OG_IMAGE, PAGE_WITHOUT_IMAGE};

    use super::*;

    struct FakePage {
        page: Result<&'static str, u16>,
        requests: RefCell<Vec<(String, Duration)>>,
    }

    impl HttpFetch for FakePage {
        fn get_text(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
            self.requests.borrow_mut().push((url.to_string(), timeout));
            match self.page {
                Ok(page) => Ok(page.to_string()),
                Err(status) => Err(FetchError::Status { url: url.to_string(), status }),
            }
        }

        fn get_bytes(&self, _url: &str, _timeout: Duration) -> Result<Vec<u8>, FetchError> {
            unreachable!("the resolver only fetches pages")
        }
    }

    fn fake(page: Result<&'static str, u16>) -> FakePage {
        FakePage { page, requests: RefCell::new(vec![]) }
    }

    fn resolver() -> ThumbnailResolver {
        ThumbnailResolver::new(&Embed::default(), Duration::from_secs(10))
    }

    #[test]
    fn test_og_image() {
        let html = r#"<meta property="og:image" content="https://x/y.jpg">"#;
        assert_eq!(find_thumbnail(html), Some("https://x/y.jpg".to_string()));

        let url = find_thumbnail(PAGE_WITH_OG_IMAGE).unwrap();
        assert_eq!(url, "https://scontent.cdninstagram.com/v/t51/photo.jpg?stp=dst-jpg&_nc_ht=scontent&oh=00_AfB");
    }

    #[test]
    fn test_display_url() {
        let url = find_thumbnail(PAGE_WITH_DISPLAY_URL).unwrap();
        assert_eq!(url, "https://scontent.cdninstagram.com/v/t51/full.jpg?stp=dst-jpg&_nc_ht=scontent&oh=00_AfC");
    }

    #[test]
    fn test_og_image_has_priority() {
        let html = format!("{}\n{}", PAGE_WITH_DISPLAY_URL, PAGE_WITH_OG_IMAGE);
        let url = find_thumbnail(&html).unwrap();
        assert!(url.contains("photo.jpg"));
    }

    #[test]
    fn test_no_thumbnail() {
        assert!(find_thumbnail(PAGE_WITHOUT_IMAGE).is_none());
        assert!(find_thumbnail(r#"<meta property="og:image" content="">"#).is_none());
    }

    #[test]
    fn test_resolve() {
        let http = fake(Ok(PAGE_WITH_OG_IMAGE));
        let url = resolver().resolve(&http, &EmbedId("C2xYz_Ab-1".to_string())).unwrap();
        assert!(url.ends_with("photo.jpg?stp=dst-jpg&_nc_ht=scontent&oh=00_AfB"));

        let requests = http.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0], ("https://www.instagram.com/p/C2xYz_Ab-1/".to_string(), Duration::from_secs(10)));
    }

    #[test]
    fn test_resolve_without_thumbnail() {
        let http = fake(Ok(PAGE_WITHOUT_IMAGE));
        let err = resolver().resolve(&http, &EmbedId("ABC".to_string())).unwrap_err();
        assert!(matches!(err, ResolveError::NoThumbnail { ref url } if url == "https://www.instagram.com/p/ABC/"));
    }

    #[test]
    fn test_resolve_fetch_error() {
        let http = fake(Err(429));
        let err = resolver().resolve(&http, &EmbedId("ABC".to_string())).unwrap_err();
        match err {
            ResolveError::Fetch { url, source: FetchError::Status { status, .. } } => {
                assert_eq!(url, "https://www.instagram.com/p/ABC/");
                assert_eq!(status, 429);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_fetch_error_names_url_once() {
        let http = fake(Err(404));
        let err = resolver().resolve(&http, &EmbedId("Gone404".to_string())).unwrap_err();
        let message = err.to_string();
        assert_eq!(message.matches("https://www.instagram.com/p/Gone404/").count(), 1);
        assert!(message.contains("404"));
    }
}
