use std::path::PathBuf;

use anyhow::bail;
use log::warn;

pub(crate) const LAYOUT: &str = "post";

/// Inputs of a single run, as given on the command line.
#[derive(Debug, Clone, Default)]
pub(crate) struct PostRequest {
    pub file: PathBuf,
    pub date: Option<String>,
    pub title: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub remove: bool,
}

#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostMetadata {
    pub layout: &'static str,
    pub title: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub date: String,
}

impl PostMetadata {
    /// Explicit flags win; otherwise the title comes from the first line and
    /// the date from `today`. An empty `--title` counts as not given.
    pub fn derive(request: &PostRequest, lines: &[String], today: &str) -> anyhow::Result<Self> {
        let explicit_title = request.title.as_ref().filter(|t| !t.is_empty());
        let title = match (explicit_title, lines.first()) {
            (Some(title), _) => title.clone(),
            (None, Some(first)) => first.clone(),
            (None, None) => bail!(
                "cannot derive a title: {:?} is empty (pass --title)",
                request.file
            ),
        };

        let metadata = PostMetadata {
            layout: LAYOUT,
            title,
            categories: request.categories.clone(),
            tags: request.tags.clone(),
            date: request.date.clone().unwrap_or_else(|| today.to_string()),
        };
        metadata.warn_suspicious_values();

        Ok(metadata)
    }

    // values are written verbatim, so anything that can break the header is only reported
    fn warn_suspicious_values(&self) {
        if breaks_scalar(&self.title) {
            warn!("title {:?} may corrupt the frontmatter", self.title);
        }
        for (name, values) in [("category", &self.categories), ("tag", &self.tags)] {
            for value in values.iter().filter(|v| breaks_list_item(v)) {
                warn!("{name} {value:?} may corrupt the frontmatter");
            }
        }
        if chrono::NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").is_err() {
            warn!("date {:?} is not in YYYY-MM-DD form, using it as is", self.date);
        }
    }
}

fn breaks_scalar(value: &str) -> bool {
    value.contains(['\n', '\r', ':'])
}

fn breaks_list_item(value: &str) -> bool {
    breaks_scalar(value) || value.contains([']', ','])
}
