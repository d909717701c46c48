use anyhow::Context;
use handlebars::{handlebars_helper, Handlebars};

use crate::metadata::PostMetadata;

const FRONTMATTER: &str = "frontmatter";

const FRONTMATTER_TEMPLATE: &str = concat!(
    "---\n",
    "layout: {{layout}}\n",
    "title: {{title}}\n",
    "categories: {{bracketed categories}}\n",
    "tags: {{bracketed tags}}\n",
    "date: {{date}}\n",
    "---\n",
);

// [a, b, c]
handlebars_helper!(bracketed: |lst: array| {
    let items: Vec<String> = lst
        .iter()
        .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_string))
        .collect();
    format!("[{}]", items.join(", "))
});

pub(super) fn generate_renderer() -> anyhow::Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    // the header is plain text, not HTML
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.register_helper("bracketed", Box::new(bracketed));
    handlebars
        .register_template_string(FRONTMATTER, FRONTMATTER_TEMPLATE)
        .context("frontmatter template")?;

    Ok(handlebars)
}

pub(super) fn render_header(
    handlebars: &Handlebars<'static>,
    metadata: &PostMetadata,
) -> anyhow::Result<String> {
    handlebars
        .render(FRONTMATTER, metadata)
        .with_context(|| format!("while rendering frontmatter for {:?}", metadata.title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::LAYOUT;

    fn metadata(categories: &[&str], tags: &[&str]) -> PostMetadata {
        PostMetadata {
            layout: LAYOUT,
            title: "A <b>bold</b> & plain title".to_string(),
            categories: categories.iter().map(|s| s.to_string()).collect(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            date: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn renders_fixed_shape() {
        let handlebars = generate_renderer().unwrap();
        let header = render_header(&handlebars, &metadata(&["dev", "rust"], &["cli"])).unwrap();

        assert_eq!(
            header,
            "---\n\
             layout: post\n\
             title: A <b>bold</b> & plain title\n\
             categories: [dev, rust]\n\
             tags: [cli]\n\
             date: 2024-01-01\n\
             ---\n"
        );
    }

    #[test]
    fn absent_lists_render_empty_brackets() {
        let handlebars = generate_renderer().unwrap();
        let header = render_header(&handlebars, &metadata(&[], &[])).unwrap();

        assert!(header.contains("\ncategories: []\n"));
        assert!(header.contains("\ntags: []\n"));
    }
}
