pub const INDEX_HTML: &str = "index.html";
pub const RENDER_JS: &str = "render.js";

const UPSTREAM_LOGO_ALT: &str = "alt='SmallRye Graphql'";
const BRANDED_LOGO_ALT: &str = "alt='KumuluzEE GraphQL'";

const DEFAULT_API_ASSIGNMENT: &str = "const api = '/graphql';";
const DEFAULT_LOGO_ASSIGNMENT: &str = "const logo = '/graphql-ui';";

pub const BRANDED_TITLE: &str = "<title>KumuluzEE GraphiQL</title>";

pub fn upstream_title(version: &str) -> String {
    format!("<title>SmallRye GraphQL (v{})</title>", version)
}

/// Text substitutions applied to the UI entry page and bootstrap script.
#[derive(Debug, Clone, Default)]
pub struct Rewriter<'a> {
    pub api_path: Option<&'a str>,
    pub ui_path: Option<&'a str>,
    pub upstream_version: Option<&'a str>,
}

impl Rewriter<'_> {
    /// Rewritten content for `file`, or `None` if the file is served as is.
    pub fn rewrite(&self, file: &str, content: &[u8]) -> Option<String> {
        match file {
            RENDER_JS => Some(self.render_js(&String::from_utf8_lossy(content))),
            INDEX_HTML => Some(self.index_html(&String::from_utf8_lossy(content))),
            _ => None,
        }
    }

    pub fn render_js(&self, content: &str) -> String {
        let mut content = content.replace(UPSTREAM_LOGO_ALT, BRANDED_LOGO_ALT);
        if let Some(api) = self.api_path {
            content = content.replace(DEFAULT_API_ASSIGNMENT, &format!("const api = '{}';", api));
        }
        if let Some(ui) = self.ui_path {
            content = content.replace(DEFAULT_LOGO_ASSIGNMENT, &format!("const logo = '{}';", ui));
        }
        content
    }

    pub fn index_html(&self, content: &str) -> String {
        match self.upstream_version {
            Some(version) => content.replace(&upstream_title(version), BRANDED_TITLE),
            None => content.to_string(),
        }
    }
}
