use std::collections::HashMap;
use std::convert::Infallible;

use axum::body::Bytes;
use futures::stream::{self, Stream};

/// Chunk size used when streaming assets that are passed through as is.
pub const BUFFER_SIZE: usize = 10_000;

/// Key of the upstream UI version in the bundled versions resource.
pub const UPSTREAM_VERSION_KEY: &str = "smallrye-graphql-version";

const UI_DIR: &str = "graphql-ui";

/// Read-only resources addressed by bundle-relative path.
pub trait AssetBundle: Send + Sync {
    fn open(&self, resource: &str) -> Option<Bytes>;
}

static EMBEDDED: &[(&str, &[u8])] = &[
    (
        "graphql-ui/index.html",
        include_bytes!("../../assets/graphql-ui/index.html"),
    ),
    (
        "graphql-ui/render.js",
        include_bytes!("../../assets/graphql-ui/render.js"),
    ),
    (
        "graphql-ui/style.css",
        include_bytes!("../../assets/graphql-ui/style.css"),
    ),
    ("html/logo.png", include_bytes!("../../assets/html/logo.png")),
    (
        "html/favicon-32x32.png",
        include_bytes!("../../assets/html/favicon-32x32.png"),
    ),
];

/// Assets compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedBundle;

impl AssetBundle for EmbeddedBundle {
    fn open(&self, resource: &str) -> Option<Bytes> {
        EMBEDDED
            .iter()
            .find(|(name, _)| *name == resource)
            .map(|(_, bytes)| Bytes::from_static(bytes))
    }
}

/// Maps a requested file name to its resource in the bundle. The logo and
/// favicon are served from the branded overrides, everything else from
/// the upstream UI directory.
pub fn resource_for(name: &str) -> String {
    match name {
        "logo.png" => "html/logo.png".to_string(),
        "favicon.ico" => "html/favicon-32x32.png".to_string(),
        _ => format!("{}/{}", UI_DIR, name),
    }
}

pub fn content_type(name: &str) -> &'static str {
    let extension = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default();
    match extension.to_ascii_lowercase().as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" => "application/json",
        "svg" => "image/svg+xml",
        "png" | "ico" => "image/png",
        "woff2" => "font/woff2",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// Splits `bytes` into [`BUFFER_SIZE`] chunks without copying.
pub fn chunked(bytes: Bytes) -> impl Stream<Item = Result<Bytes, Infallible>> + Send {
    let chunks: Vec<Bytes> = (0..bytes.len())
        .step_by(BUFFER_SIZE)
        .map(|start| bytes.slice(start..(start + BUFFER_SIZE).min(bytes.len())))
        .collect();
    stream::iter(chunks.into_iter().map(Ok))
}

/// Version metadata shipped with the bundled UI.
#[derive(Debug, Clone, Default)]
pub struct BundledVersions {
    values: HashMap<String, String>,
}

impl BundledVersions {
    pub fn bundled() -> Self {
        BundledVersions::parse(include_str!("../../assets/versions.properties"))
    }

    /// Parses `key=value` lines. Blank lines and `#` or `!` comments are
    /// skipped.
    pub fn parse(content: &str) -> Self {
        let values = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
            .filter_map(|line| {
                line.split_once(['=', ':'])
                    .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            })
            .collect();
        BundledVersions { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn upstream_version(&self) -> Option<&str> {
        self.get(UPSTREAM_VERSION_KEY)
    }
}
