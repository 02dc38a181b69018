// Request construction: turns an `Operation` plus an explicit credential
// into a fully described HTTP request. Nothing here touches the network;
// the only I/O is reading local images into multipart parts.

use crate::credentials::Credential;
use crate::error::{Arity, Error, Result};
use crate::output::ResponseShape;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use url::Url;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Quality used when the caller does not pass `--quality`.
pub const DEFAULT_QUALITY: u8 = 50;

/// Multipart field name for uploaded images.
pub const IMAGE_FIELD: &str = "img";

/// Path suffix selecting the batch variant of an image endpoint.
pub const BATCH_SUFFIX: &str = "/many";

/// Name used for a remote image whose URL has no usable last segment.
const FALLBACK_IMAGE_NAME: &str = "image";

// Unreserved characters plus the separators that are legal inside a query
// value; keeps `urls=a,b` and embedded URLs readable.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b',')
    .remove(b':')
    .remove(b'/');

/// One or many inputs. Decided once when an image operation is created;
/// both the request path and the response shape are derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Batch<T> {
    Single(T),
    /// Always holds two or more inputs.
    Many(Vec<T>),
}

impl<T> Batch<T> {
    /// Classify `inputs` by count. An empty list is an arity error for
    /// `operation`.
    pub fn new(mut inputs: Vec<T>, operation: &str) -> Result<Self> {
        if inputs.len() > 1 {
            return Ok(Self::Many(inputs));
        }
        inputs.pop().map(Self::Single).ok_or_else(|| Error::ArityMismatch {
            operation: operation.to_string(),
            expected: Arity::AtLeast(1),
            got: 0,
        })
    }

    pub fn is_many(&self) -> bool {
        matches!(self, Self::Many(_))
    }

    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::Single(only) => std::slice::from_ref(only),
            Self::Many(all) => all,
        }
    }

    /// `""` for a single input, `"/many"` otherwise.
    pub fn path_suffix(&self) -> &'static str {
        if self.is_many() {
            BATCH_SUFFIX
        } else {
            ""
        }
    }

    fn response_shape(&self, base_name: impl FnOnce(&T) -> String) -> ResponseShape {
        match self {
            Self::Single(only) => ResponseShape::binary(&base_name(only)),
            Self::Many(all) => ResponseShape::archive(all.len()),
        }
    }
}

/// NLP endpoints exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum NlpTask {
    /// Named entity recognition
    Ner,
    /// Part-of-speech tagging
    PosTagging,
    /// Sentiment analysis
    Sentiment,
    /// Split text into segments
    Segmenter,
    /// Keyword ranking with the RAKE algorithm
    Rake,
    /// Reduce words to their stem
    Stemming,
    /// Remove stopwords
    Stopwords,
    /// Word error rate between two strings
    Wer,
}

impl NlpTask {
    /// Path segment under `/nlp`.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Ner => "ner",
            Self::PosTagging => "pos-tagging",
            Self::Sentiment => "sentiment",
            Self::Segmenter => "segmenter",
            Self::Rake => "rake",
            Self::Stemming => "stemming",
            Self::Stopwords => "stopwords",
            Self::Wer => "wer",
        }
    }

    /// Query parameter names, one per text argument.
    pub const fn params(self) -> &'static [&'static str] {
        match self {
            Self::Wer => &["text1", "text2"],
            _ => &["text"],
        }
    }

    pub const fn arity(self) -> Arity {
        Arity::Exactly(self.params().len())
    }
}

/// Everything the client knows how to ask the service for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ImageLocal { images: Batch<PathBuf>, quality: u8 },
    ImageRemote { images: Batch<String>, quality: u8 },
    Nlp { task: NlpTask, texts: Vec<String> },
    Costs,
    Services,
    Tokens,
}

impl Operation {
    pub fn image_local(paths: Vec<PathBuf>, quality: u8) -> Result<Self> {
        Ok(Self::ImageLocal {
            images: Batch::new(paths, "image local")?,
            quality,
        })
    }

    pub fn image_remote(urls: Vec<String>, quality: u8) -> Result<Self> {
        Ok(Self::ImageRemote {
            images: Batch::new(urls, "image remote")?,
            quality,
        })
    }

    /// Accepts exactly as many texts as the task declares.
    pub fn nlp(task: NlpTask, texts: Vec<String>) -> Result<Self> {
        let expected = task.arity();
        if !expected.accepts(texts.len()) {
            return Err(Error::ArityMismatch {
                operation: format!("nlp {}", task.slug()),
                expected,
                got: texts.len(),
            });
        }
        Ok(Self::Nlp { task, texts })
    }

    /// `costs` and `services` are public; everything else needs a key.
    pub fn requires_credential(&self) -> bool {
        !matches!(self, Self::Costs | Self::Services)
    }

    /// How the response to this operation must be materialized.
    pub fn response_shape(&self) -> ResponseShape {
        match self {
            Self::ImageLocal { images, .. } => images.response_shape(|path| path_basename(path)),
            Self::ImageRemote { images, .. } => images.response_shape(|url| url_basename(url)),
            Self::Nlp { .. } | Self::Costs | Self::Services | Self::Tokens => ResponseShape::Text,
        }
    }
}

/// A single file attached to a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: &'static str,
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Ordered multipart body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Multipart {
    pub parts: Vec<FilePart>,
}

/// A request ready to be handed to the transport.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    /// Endpoint URL without query string.
    pub url: Url,
    /// Query parameters in the order they are sent.
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Multipart>,
}

impl OutboundRequest {
    fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// The endpoint URL with the percent-encoded query appended.
    pub fn full_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.query.is_empty() {
            let query = self
                .query
                .iter()
                .map(|(k, v)| format!("{k}={}", utf8_percent_encode(v, QUERY_VALUE)))
                .collect::<Vec<_>>()
                .join("&");
            url.set_query(Some(&query));
        }
        url
    }

    /// First value for `key`, if any.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Builds requests against one API base URL, attaching the credential it
/// was given to every authenticated call.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: Url,
    credential: Option<Credential>,
}

impl RequestBuilder {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            credential: None,
        }
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn build(&self, operation: &Operation) -> Result<OutboundRequest> {
        let request = match operation {
            Operation::ImageLocal { images, quality } => {
                let parts = images
                    .as_slice()
                    .iter()
                    .map(|path| read_image_part(path))
                    .collect::<Result<Vec<_>>>()?;
                let url = self.endpoint(&format!("img/local{}", images.path_suffix()));
                let mut request =
                    OutboundRequest::new(Method::POST, url).param("quality", quality.to_string());
                request.body = Some(Multipart { parts });
                request
            }
            Operation::ImageRemote { images, quality } => {
                let url = self.endpoint(&format!("img/remote{}", images.path_suffix()));
                let request =
                    OutboundRequest::new(Method::POST, url).param("quality", quality.to_string());
                // Inputs are taken verbatim; a single argument containing
                // commas is still one URL.
                match images {
                    Batch::Single(only) => request.param("url", only.as_str()),
                    Batch::Many(all) => request.param("urls", all.join(",")),
                }
            }
            Operation::Nlp { task, texts } => {
                let url = self.endpoint(&format!("nlp/{}", task.slug()));
                task.params()
                    .iter()
                    .zip(texts)
                    .fold(OutboundRequest::new(Method::GET, url), |req, (key, text)| {
                        req.param(key, text.as_str())
                    })
            }
            Operation::Costs => OutboundRequest::new(Method::GET, self.endpoint("costs")),
            Operation::Services => OutboundRequest::new(Method::GET, self.endpoint("services")),
            Operation::Tokens => OutboundRequest::new(Method::GET, self.endpoint("tokens")),
        };

        if !operation.requires_credential() {
            return Ok(request);
        }
        let credential = self.credential.as_ref().ok_or(Error::NotInitialized)?;
        Ok(OutboundRequest {
            headers: key_headers(credential)?,
            ..request
        })
    }

    /// `GET /is-valid-api-key` carrying a key that has not been stored yet.
    pub fn validation_probe(&self, candidate: &Credential) -> Result<OutboundRequest> {
        let mut request = OutboundRequest::new(Method::GET, self.endpoint("is-valid-api-key"));
        request.headers = key_headers(candidate)?;
        Ok(request)
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let base_path = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{base_path}/{path}"));
        url.set_query(None);
        url
    }
}

fn key_headers(credential: &Credential) -> Result<HeaderMap> {
    let mut value =
        HeaderValue::from_str(credential.as_str()).map_err(|_| Error::InvalidCredential {
            reason: "the key contains characters that cannot be sent in a header".into(),
        })?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
    Ok(headers)
}

/// Read one local image into a part. The file handle is closed before
/// returning, whatever the outcome.
fn read_image_part(path: &Path) -> Result<FilePart> {
    let mut file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => Error::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::FileUnreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|source| Error::FileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), size = bytes.len(), "attached image");
    Ok(FilePart {
        field: IMAGE_FIELD,
        file_name: path_basename(path),
        content_type: content_type_for(path),
        bytes,
    })
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif" | "tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

fn path_basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_IMAGE_NAME.to_string())
}

/// Last path segment of a remote image URL, decoded and made safe to use
/// as a file name.
fn url_basename(raw: &str) -> String {
    let segment = match Url::parse(raw) {
        Ok(url) => url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned()),
        Err(_) => Path::new(raw)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
    };
    segment
        .map(|name| name.replace(['/', '\\'], "_"))
        .filter(|name| !name.is_empty() && name != "." && name != "..")
        .unwrap_or_else(|| FALLBACK_IMAGE_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn builder() -> RequestBuilder {
        RequestBuilder::new(Url::parse("https://api.example.test/v1").unwrap())
            .with_credential(Credential::new("secret-key").unwrap())
    }

    fn write_images(dir: &TempDir, files: &[(&str, &[u8])]) -> Vec<PathBuf> {
        files
            .iter()
            .map(|(name, bytes)| {
                let path = dir.path().join(name);
                fs::write(&path, bytes).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn single_local_image_targets_plain_endpoint() {
        let dir = TempDir::new().unwrap();
        let paths = write_images(&dir, &[("a.jpg", b"jpeg-bytes")]);
        let op = Operation::image_local(paths, 80).unwrap();

        let req = builder().build(&op).unwrap();
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.full_url().as_str(), "https://api.example.test/v1/img/local?quality=80");
        assert_eq!(req.headers.get(API_KEY_HEADER).unwrap(), "secret-key");

        let body = req.body.unwrap();
        assert_eq!(body.parts.len(), 1);
        assert_eq!(body.parts[0].field, "img");
        assert_eq!(body.parts[0].file_name, "a.jpg");
        assert_eq!(body.parts[0].content_type, "image/jpeg");
        assert_eq!(body.parts[0].bytes, b"jpeg-bytes");
    }

    #[test]
    fn multipart_parts_follow_argument_order() {
        let dir = TempDir::new().unwrap();
        let paths = write_images(
            &dir,
            &[("z.png", b"third-last"), ("a.png", b"first"), ("m.gif", b"\x00\x01\x02")],
        );
        let op = Operation::image_local(paths, DEFAULT_QUALITY).unwrap();

        let req = builder().build(&op).unwrap();
        assert_eq!(req.url.path(), "/v1/img/local/many");

        let parts = req.body.unwrap().parts;
        let names: Vec<_> = parts.iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(names, ["z.png", "a.png", "m.gif"]);
        assert!(parts.iter().all(|p| p.field == IMAGE_FIELD));
        assert_eq!(parts[0].bytes, b"third-last");
        assert_eq!(parts[1].bytes, b"first");
        assert_eq!(parts[2].bytes, b"\x00\x01\x02");
    }

    #[test]
    fn missing_local_file_fails_before_sending() {
        let dir = TempDir::new().unwrap();
        let mut paths = write_images(&dir, &[("ok.jpg", b"x")]);
        paths.push(dir.path().join("missing.jpg"));
        let op = Operation::image_local(paths, 50).unwrap();

        match builder().build(&op) {
            Err(Error::FileNotFound { path }) => assert!(path.ends_with("missing.jpg")),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn directory_input_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let op = Operation::image_local(vec![dir.path().to_path_buf()], 50).unwrap();
        assert!(matches!(builder().build(&op), Err(Error::FileUnreadable { .. })));
    }

    #[test]
    fn empty_inputs_are_an_arity_mismatch() {
        assert!(matches!(
            Operation::image_local(Vec::new(), 50),
            Err(Error::ArityMismatch { got: 0, .. })
        ));
        assert!(matches!(
            Operation::image_remote(Vec::new(), 50),
            Err(Error::ArityMismatch { got: 0, .. })
        ));
    }

    #[test]
    fn single_remote_url_uses_url_param() {
        let op = Operation::image_remote(vec!["https://cdn.test/pics/logo.png".into()], 50).unwrap();
        let req = builder().build(&op).unwrap();

        assert_eq!(req.url.path(), "/v1/img/remote");
        assert_eq!(req.query_param("url"), Some("https://cdn.test/pics/logo.png"));
        assert_eq!(req.query_param("urls"), None);
        assert!(req.body.is_none());
    }

    #[test]
    fn many_remote_urls_are_comma_joined() {
        let op = Operation::image_remote(vec!["urlA".into(), "urlB".into()], 50).unwrap();
        let req = builder().build(&op).unwrap();

        assert_eq!(
            req.full_url().as_str(),
            "https://api.example.test/v1/img/remote/many?quality=50&urls=urlA,urlB"
        );
        assert_eq!(req.headers.get(API_KEY_HEADER).unwrap(), "secret-key");
    }

    #[test]
    fn commas_inside_one_argument_do_not_make_a_batch() {
        let op = Operation::image_remote(vec!["a.png,b.png".into()], 50).unwrap();
        let req = builder().build(&op).unwrap();

        assert_eq!(req.url.path(), "/v1/img/remote");
        assert_eq!(req.query_param("url"), Some("a.png,b.png"));
        assert!(matches!(op.response_shape(), ResponseShape::Binary { .. }));
    }

    #[test]
    fn wer_sends_two_encoded_texts() {
        let op = Operation::nlp(NlpTask::Wer, vec!["cat sat".into(), "cat sits".into()]).unwrap();
        let req = builder().build(&op).unwrap();

        assert_eq!(req.method, Method::GET);
        assert_eq!(
            req.full_url().as_str(),
            "https://api.example.test/v1/nlp/wer?text1=cat%20sat&text2=cat%20sits"
        );
        assert_eq!(req.headers.get(API_KEY_HEADER).unwrap(), "secret-key");
    }

    #[test]
    fn reserved_characters_in_text_are_escaped() {
        let op = Operation::nlp(NlpTask::Sentiment, vec!["a&b=c?#d+e".into()]).unwrap();
        let req = builder().build(&op).unwrap();
        assert_eq!(req.full_url().query(), Some("text=a%26b%3Dc%3F%23d%2Be"));
    }

    #[test]
    fn nlp_arity_is_exact() {
        assert!(matches!(
            Operation::nlp(NlpTask::Wer, vec!["only one".into()]),
            Err(Error::ArityMismatch { got: 1, expected: Arity::Exactly(2), .. })
        ));
        assert!(matches!(
            Operation::nlp(NlpTask::Ner, vec!["a".into(), "b".into()]),
            Err(Error::ArityMismatch { got: 2, expected: Arity::Exactly(1), .. })
        ));
        assert!(matches!(
            Operation::nlp(NlpTask::Stemming, Vec::new()),
            Err(Error::ArityMismatch { got: 0, .. })
        ));
    }

    #[test]
    fn nlp_slugs_map_to_paths() {
        let op = Operation::nlp(NlpTask::PosTagging, vec!["hello".into()]).unwrap();
        let req = builder().build(&op).unwrap();
        assert_eq!(req.url.path(), "/v1/nlp/pos-tagging");
        assert_eq!(req.query_param("text"), Some("hello"));
    }

    #[test]
    fn public_endpoints_skip_the_key() {
        let anonymous = RequestBuilder::new(Url::parse("https://api.example.test/v1/").unwrap());
        for (op, path) in [(Operation::Costs, "/v1/costs"), (Operation::Services, "/v1/services")] {
            let req = anonymous.build(&op).unwrap();
            assert_eq!(req.url.path(), path);
            assert!(req.headers.get(API_KEY_HEADER).is_none());
        }
    }

    #[test]
    fn authenticated_operation_without_key_is_not_initialized() {
        let anonymous = RequestBuilder::new(Url::parse("https://api.example.test/v1").unwrap());
        assert!(matches!(anonymous.build(&Operation::Tokens), Err(Error::NotInitialized)));
    }

    #[test]
    fn tokens_sends_the_stored_key() {
        let req = builder().build(&Operation::Tokens).unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url.path(), "/v1/tokens");
        assert_eq!(req.headers.get(API_KEY_HEADER).unwrap(), "secret-key");
        assert!(req.query.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn validation_probe_carries_candidate_key() {
        let anonymous = RequestBuilder::new(Url::parse("https://api.example.test/v1").unwrap());
        let req = anonymous
            .validation_probe(&Credential::new("candidate").unwrap())
            .unwrap();
        assert_eq!(req.full_url().as_str(), "https://api.example.test/v1/is-valid-api-key");
        assert_eq!(req.headers.get(API_KEY_HEADER).unwrap(), "candidate");
    }

    #[test]
    fn key_with_newline_inside_cannot_be_sent() {
        let bad = Credential::new("abc\ndef").unwrap();
        assert!(matches!(
            builder().validation_probe(&bad),
            Err(Error::InvalidCredential { .. })
        ));
    }

    #[test]
    fn building_twice_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let paths = write_images(&dir, &[("a.jpg", b"1"), ("b.jpg", b"2")]);
        let op = Operation::image_local(paths, 33).unwrap();

        let first = builder().build(&op).unwrap();
        let second = builder().build(&op).unwrap();
        assert_eq!(first.method, second.method);
        assert_eq!(first.full_url(), second.full_url());
        assert_eq!(first.query, second.query);
        assert_eq!(first.body, second.body);
    }

    #[test]
    fn batch_suffix_and_archive_shape_agree() {
        let dir = TempDir::new().unwrap();
        for n in 1..=4 {
            let files: Vec<(String, Vec<u8>)> =
                (0..n).map(|i| (format!("img{i}.png"), vec![i as u8])).collect();
            let paths: Vec<PathBuf> = files
                .iter()
                .map(|(name, bytes)| {
                    let path = dir.path().join(name);
                    fs::write(&path, bytes).unwrap();
                    path
                })
                .collect();
            let urls: Vec<String> = files.iter().map(|(name, _)| format!("https://cdn.test/{name}")).collect();

            for op in [
                Operation::image_local(paths.clone(), 50).unwrap(),
                Operation::image_remote(urls.clone(), 50).unwrap(),
            ] {
                let req = builder().build(&op).unwrap();
                let batched = req.url.path().ends_with(BATCH_SUFFIX);
                let archived = matches!(op.response_shape(), ResponseShape::Archive { .. });
                assert_eq!(batched, n > 1, "path for n={n}");
                assert_eq!(archived, n > 1, "shape for n={n}");
            }
        }
    }

    #[test]
    fn single_shapes_keep_the_input_basename() {
        let local = Operation::image_local(vec![PathBuf::from("some/dir/a.jpg")], 50).unwrap();
        assert_eq!(local.response_shape(), ResponseShape::binary("a.jpg"));

        let remote =
            Operation::image_remote(vec!["https://cdn.test/pics/logo.png?size=2".into()], 50).unwrap();
        assert_eq!(remote.response_shape(), ResponseShape::binary("logo.png"));

        let many = Operation::image_remote(vec!["a".into(), "b".into()], 50).unwrap();
        assert_eq!(many.response_shape(), ResponseShape::archive(2));
    }

    #[test]
    fn url_basename_falls_back_when_path_is_empty() {
        assert_eq!(url_basename("https://cdn.test/"), FALLBACK_IMAGE_NAME);
        assert_eq!(url_basename("https://cdn.test/a%20b.png"), "a b.png");
        assert_eq!(url_basename("https://cdn.test/x%2F..%2Fy.png"), "x_.._y.png");
        assert_eq!(url_basename("not a url/pic.jpg"), "pic.jpg");
    }

    #[test]
    fn base_url_trailing_slash_is_irrelevant() {
        let a = RequestBuilder::new(Url::parse("http://localhost:8080").unwrap());
        let b = RequestBuilder::new(Url::parse("http://localhost:8080/").unwrap());
        assert_eq!(a.build(&Operation::Costs).unwrap().url, b.build(&Operation::Costs).unwrap().url);
        assert_eq!(a.build(&Operation::Costs).unwrap().url.as_str(), "http://localhost:8080/costs");
    }
}
