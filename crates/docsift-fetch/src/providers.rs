//! Hosted-document providers.
//!
//! Share links from Google Docs, Google Drive, Dropbox and OneDrive point
//! at viewer pages, not at file bytes. Each provider flow turns such a link
//! into one or more download requests and reports the extension it could
//! infer, so format detection can trust it over the reference's own.
//!
//! Links to files whose path ends in a known document extension are
//! downloaded as-is.

use docsift_core::{DocumentFormat, FetchError, HttpFetcher, KNOWN_EXTENSIONS, RawContent};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};
use url::Url;

/// Export formats tried for Google Docs, in order.
pub const GOOGLE_EXPORT_FORMATS: [&str; 4] = ["pdf", "docx", "txt", "html"];

/// Host serving raw Dropbox file content.
pub const DROPBOX_CONTENT_HOST: &str = "dl.dropboxusercontent.com";

static GOOGLE_DOCS_ID: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"/document/d/([A-Za-z0-9_-]+)",
        r"/d/([A-Za-z0-9_-]+)",
        r"[?&]id=([A-Za-z0-9_-]+)",
    ])
});

static GOOGLE_DRIVE_ID: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"/file/d/([A-Za-z0-9_-]+)",
        r"/d/([A-Za-z0-9_-]+)",
        r"[?&]id=([A-Za-z0-9_-]+)",
        r"/open\?id=([A-Za-z0-9_-]+)",
    ])
});

fn compile_patterns(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("document id pattern"))
        .collect()
}

/// A document host with its own retrieval flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    GoogleDocs,
    GoogleDrive,
    Dropbox,
    OneDrive,
}

impl Provider {
    /// Identify the provider serving `url`, by host or parent domain.
    #[must_use]
    pub fn from_url(url: &Url) -> Option<Self> {
        let host = url.host_str()?.to_ascii_lowercase();
        let on = |domain: &str| host == domain || host.ends_with(&format!(".{domain}"));

        if on("docs.google.com") {
            Some(Self::GoogleDocs)
        } else if on("drive.google.com") {
            Some(Self::GoogleDrive)
        } else if on("dropbox.com") {
            Some(Self::Dropbox)
        } else if on("onedrive.live.com") || on("1drv.ms") {
            Some(Self::OneDrive)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GoogleDocs => "Google Docs",
            Self::GoogleDrive => "Google Drive",
            Self::Dropbox => "Dropbox",
            Self::OneDrive => "OneDrive",
        }
    }
}

/// Extension of a direct file link, when its last path segment ends in one
/// of [`KNOWN_EXTENSIONS`].
#[must_use]
pub fn direct_file_extension(url: &Url) -> Option<&'static str> {
    let segment = url.path_segments()?.next_back()?;
    let (_, ext) = segment.rsplit_once('.')?;
    KNOWN_EXTENSIONS
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(ext))
}

/// Retrieve a publicly shared document link.
///
/// Unrecognised hosts and provider links without a document id are
/// [`FetchError::UnsupportedDocumentUrl`].
pub async fn fetch_public_document(
    fetcher: &dyn HttpFetcher,
    url: &str,
) -> Result<RawContent, FetchError> {
    let parsed =
        Url::parse(url).map_err(|_| FetchError::UnsupportedDocumentUrl(url.to_string()))?;

    if let Some(provider) = Provider::from_url(&parsed) {
        return fetch_from_provider(fetcher, provider, &parsed).await;
    }

    if let Some(ext) = direct_file_extension(&parsed) {
        let data = fetch_nonempty(fetcher, url, false).await?;
        return Ok(RawContent::with_extension(data, ext));
    }

    Err(FetchError::UnsupportedDocumentUrl(url.to_string()))
}

/// Run the retrieval flow of `provider` for `url`.
pub async fn fetch_from_provider(
    fetcher: &dyn HttpFetcher,
    provider: Provider,
    url: &Url,
) -> Result<RawContent, FetchError> {
    debug!("Fetching {} document {}", provider.name(), url);
    match provider {
        Provider::GoogleDocs => fetch_google_doc(fetcher, url).await,
        Provider::GoogleDrive => fetch_google_drive(fetcher, url).await,
        Provider::Dropbox => fetch_dropbox(fetcher, url).await,
        Provider::OneDrive => fetch_onedrive(fetcher, url).await,
    }
}

/// First capture of the first pattern that matches `url`.
#[must_use]
pub fn extract_document_id(url: &str, patterns: &[Regex]) -> Option<String> {
    patterns
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Export URLs for a Google Docs document, in request order.
#[must_use]
pub fn google_docs_export_urls(id: &str, format: &str) -> [String; 2] {
    [
        format!("https://docs.google.com/document/d/{id}/export?format={format}"),
        format!("https://docs.google.com/document/u/0/d/{id}/export?format={format}"),
    ]
}

async fn fetch_google_doc(fetcher: &dyn HttpFetcher, url: &Url) -> Result<RawContent, FetchError> {
    let id = extract_document_id(url.as_str(), &GOOGLE_DOCS_ID)
        .ok_or_else(|| FetchError::UnsupportedDocumentUrl(url.to_string()))?;

    let mut last_error = FetchError::EmptyContent(url.to_string());
    for format in GOOGLE_EXPORT_FORMATS {
        for export_url in google_docs_export_urls(&id, format) {
            match fetch_nonempty(fetcher, &export_url, false).await {
                Ok(data) => return Ok(RawContent::with_extension(data, format)),
                Err(e) => {
                    debug!("Google Docs export {} failed: {}", export_url, e);
                    last_error = e;
                }
            }
        }
    }

    Err(last_error)
}

async fn fetch_google_drive(
    fetcher: &dyn HttpFetcher,
    url: &Url,
) -> Result<RawContent, FetchError> {
    let id = extract_document_id(url.as_str(), &GOOGLE_DRIVE_ID)
        .ok_or_else(|| FetchError::UnsupportedDocumentUrl(url.to_string()))?;

    let download = format!("https://drive.google.com/uc?export=download&id={id}");
    let data = match fetch_nonempty(fetcher, &download, false).await {
        Ok(data) => data,
        Err(e) => {
            warn!("Drive download for {} failed, trying viewer: {}", id, e);
            let viewer = format!("https://drive.google.com/file/d/{id}/view");
            fetch_nonempty(fetcher, &viewer, false).await?
        }
    };

    Ok(sniffed(data))
}

/// Rewrite a Dropbox share link to its raw-content form.
pub fn dropbox_direct_url(url: &Url) -> Result<Url, FetchError> {
    let mut direct = url.clone();
    direct
        .set_host(Some(DROPBOX_CONTENT_HOST))
        .map_err(|_| FetchError::UnsupportedDocumentUrl(url.to_string()))?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "dl" && key != "raw")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    direct
        .query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("raw", "1");

    Ok(direct)
}

async fn fetch_dropbox(fetcher: &dyn HttpFetcher, url: &Url) -> Result<RawContent, FetchError> {
    let direct = dropbox_direct_url(url)?;
    let data = fetch_nonempty(fetcher, direct.as_str(), false).await?;
    Ok(sniffed(data))
}

async fn fetch_onedrive(fetcher: &dyn HttpFetcher, url: &Url) -> Result<RawContent, FetchError> {
    match fetch_nonempty(fetcher, url.as_str(), false).await {
        Ok(data) => Ok(sniffed(data)),
        Err(e @ (FetchError::NetworkTimeout { .. } | FetchError::TooManyRedirects { .. })) => {
            Err(e)
        }
        Err(e) => {
            debug!("OneDrive fetch failed: {}", e);
            Err(FetchError::AuthenticationRequired(url.to_string()))
        }
    }
}

/// GET `url`, treating an empty body as a failure.
pub(crate) async fn fetch_nonempty(
    fetcher: &dyn HttpFetcher,
    url: &str,
    authorized: bool,
) -> Result<Vec<u8>, FetchError> {
    let data = if authorized {
        fetcher.get_authorized(url).await?
    } else {
        fetcher.get(url).await?
    };

    if data.is_empty() {
        return Err(FetchError::EmptyContent(url.to_string()));
    }
    Ok(data)
}

fn sniffed(data: Vec<u8>) -> RawContent {
    let format = DocumentFormat::sniff(&data);
    RawContent::with_extension(data, format.extension())
}
