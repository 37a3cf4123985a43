//! Renders the indexed vocabulary as one self-contained HTML page.

use pulldown_cmark::{html, CowStr, Event, Options, Parser};

use crate::extractor::{ClassDoc, IndividualDoc, OntologyIndex, PropertyDoc};
use crate::linker::{anchor, fragment_from_iri, term_ref, term_refs};

const STYLE: &str = r#"body { font-family: system-ui, sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; line-height: 1.5; color: #222; }
header { border-bottom: 1px solid #ccc; margin-bottom: 2rem; }
section.term { border-top: 1px solid #eee; padding: 0.5rem 0 1rem; }
section.term h3 { margin-bottom: 0.25rem; }
dl.term-facts { display: grid; grid-template-columns: 10rem 1fr; gap: 0.25rem 1rem; }
dl.term-facts dt { font-weight: 600; }
nav.toc ul { columns: 3; }
table.inventory td, table.inventory th { padding: 0.25rem 1rem; text-align: left; }
code { background: #f4f4f4; padding: 0 0.2rem; }"#;

/// Converts Markdown to HTML using pulldown-cmark.
///
/// Raw HTML in the source is escaped rather than passed through.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, opts).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(CowStr::from(raw.into_string())),
        other => other,
    });
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Escapes HTML special characters in a string.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Wraps rendered content in the page shell.
pub fn render_page(title: &str, content_html: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>
{STYLE}
</style>
</head>
<body>
<a href="#main-content" class="skip-link">Skip to main content</a>
<main id="main-content">
{content_html}
</main>
</body>
</html>
"##,
        title = escape_html(title),
    )
}

/// Renders the whole vocabulary page.
pub fn render_vocabulary(index: &OntologyIndex) -> String {
    let title = index
        .header
        .as_ref()
        .and_then(|h| h.label.clone())
        .unwrap_or_else(|| String::from("Vocabulary"));

    let mut content = String::new();
    content.push_str(&render_header(index, &title));
    content.push_str(&render_inventory(index));
    content.push_str(&render_toc(index));

    if !index.classes.is_empty() {
        content.push_str("<h2 id=\"classes\">Classes</h2>\n");
        for class in &index.classes {
            content.push_str(&render_class(class, index));
        }
    }
    if !index.properties.is_empty() {
        content.push_str("<h2 id=\"properties\">Properties</h2>\n");
        for prop in &index.properties {
            content.push_str(&render_property(prop, index));
        }
    }
    if !index.individuals.is_empty() {
        content.push_str("<h2 id=\"individuals\">Named Individuals</h2>\n");
        for ind in &index.individuals {
            content.push_str(&render_individual(ind, index));
        }
    }

    render_page(&title, &content)
}

fn render_header(index: &OntologyIndex, title: &str) -> String {
    let mut out = format!("<header>\n<h1>{}</h1>\n", escape_html(title));
    if let Some(header) = &index.header {
        out.push_str(&format!(
            "<dl class=\"term-facts\">\n<dt>IRI</dt><dd><code>{}</code></dd>\n</dl>\n",
            escape_html(&header.iri)
        ));
        if let Some(comment) = &header.comment {
            out.push_str(&markdown_to_html(comment));
        }
    }
    out.push_str("</header>\n");
    out
}

fn render_inventory(index: &OntologyIndex) -> String {
    format!(
        r#"<table class="inventory">
<thead><tr><th>Classes</th><th>Properties</th><th>Named Individuals</th></tr></thead>
<tbody><tr><td>{}</td><td>{}</td><td>{}</td></tr></tbody>
</table>
"#,
        index.classes.len(),
        index.properties.len(),
        index.individuals.len()
    )
}

fn toc_list<'a>(
    kind: &str,
    entries: impl Iterator<Item = (&'a String, &'a Option<String>)>,
) -> Option<String> {
    let mut out = String::from("<ul>\n");
    let mut listed = false;
    for (iri, label) in entries {
        listed = true;
        let text = label.clone().unwrap_or_else(|| fragment_from_iri(iri));
        out.push_str(&format!(
            "<li><a href=\"#{}\">{}</a></li>\n",
            escape_html(&anchor(kind, iri)),
            escape_html(&text)
        ));
    }
    out.push_str("</ul>\n");
    listed.then_some(out)
}

fn render_toc(index: &OntologyIndex) -> String {
    let mut out = String::from("<nav class=\"toc\" aria-label=\"Contents\">\n");
    let classes = index.classes.iter().map(|c| (&c.iri, &c.label));
    let properties = index.properties.iter().map(|p| (&p.iri, &p.label));
    let individuals = index.individuals.iter().map(|i| (&i.iri, &i.label));
    let groups = [
        ("Classes", toc_list("class", classes)),
        ("Properties", toc_list("prop", properties)),
        ("Named Individuals", toc_list("ind", individuals)),
    ];
    for (heading, list) in groups {
        if let Some(list) = list {
            out.push_str(&format!("<h2>{heading}</h2>\n{list}"));
        }
    }
    out.push_str("</nav>\n");
    out
}

fn term_heading(kind: &str, iri: &str, label: Option<&str>, index: &OntologyIndex) -> String {
    let name = index.compact(iri);
    let mut out = format!(
        "<section class=\"term\" id=\"{}\">\n<h3>{}</h3>\n",
        escape_html(&anchor(kind, iri)),
        escape_html(label.unwrap_or(&name))
    );
    out.push_str(&format!(
        "<dl class=\"term-facts\">\n<dt>IRI</dt><dd><code>{}</code></dd>\n",
        escape_html(iri)
    ));
    out
}

fn term_footer(comment: Option<&str>) -> String {
    let mut out = String::from("</dl>\n");
    if let Some(comment) = comment {
        out.push_str("<div class=\"comment\">\n");
        out.push_str(&markdown_to_html(comment));
        out.push_str("</div>\n");
    }
    out.push_str("</section>\n");
    out
}

fn fact(out: &mut String, name: &str, iris: &[String], index: &OntologyIndex) {
    if !iris.is_empty() {
        let refs = term_refs(iris, index);
        out.push_str(&format!("<dt>{name}</dt><dd>{refs}</dd>\n"));
    }
}

fn render_class(class: &ClassDoc, index: &OntologyIndex) -> String {
    let mut out = term_heading("class", &class.iri, class.label.as_deref(), index);
    fact(&mut out, "Subclass of", &class.superclasses, index);
    fact(&mut out, "Subclasses", &class.subclasses, index);
    fact(&mut out, "Properties", &class.properties, index);
    fact(&mut out, "Instances", &class.instances, index);
    out.push_str(&term_footer(class.comment.as_deref()));
    out
}

fn render_property(prop: &PropertyDoc, index: &OntologyIndex) -> String {
    let mut out = term_heading("prop", &prop.iri, prop.label.as_deref(), index);
    let domains = term_refs(&prop.domains, index);
    let ranges = term_refs(&prop.ranges, index);
    out.push_str(&format!("<dt>Domain</dt><dd>{domains}</dd>\n"));
    out.push_str(&format!("<dt>Range</dt><dd>{ranges}</dd>\n"));
    out.push_str(&term_footer(prop.comment.as_deref()));
    out
}

fn render_individual(ind: &IndividualDoc, index: &OntologyIndex) -> String {
    let mut out = term_heading("ind", &ind.iri, ind.label.as_deref(), index);
    let types = ind
        .types
        .iter()
        .map(|t| term_ref(t, index))
        .collect::<Vec<_>>()
        .join(", ");
    out.push_str(&format!("<dt>Type</dt><dd>{types}</dd>\n"));
    out.push_str(&term_footer(ind.comment.as_deref()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::OntologyHeader;

    const BODS: &str = "https://standard.openownership.org/terms#";

    fn index() -> OntologyIndex {
        OntologyIndex {
            prefixes: vec![("bods".into(), BODS.into())],
            header: Some(OntologyHeader {
                iri: "https://standard.openownership.org/terms".into(),
                label: Some("BODS <v0.4>".into()),
                comment: Some("The *RDF* vocabulary".into()),
            }),
            classes: vec![ClassDoc {
                iri: format!("{BODS}Entity"),
                label: Some("Entity".into()),
                comment: Some("A legal entity. See <script>alert(1)</script>".into()),
                properties: vec![format!("{BODS}foundingDate")],
                ..ClassDoc::default()
            }],
            properties: vec![PropertyDoc {
                iri: format!("{BODS}foundingDate"),
                label: None,
                comment: None,
                domains: vec![format!("{BODS}Entity")],
                ranges: vec!["http://www.w3.org/2001/XMLSchema#dateTime".into()],
            }],
            individuals: Vec::new(),
        }
    }

    #[test]
    fn markdown_renders_and_raw_html_is_escaped() {
        let html = markdown_to_html("**bold** <b>raw</b>");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn escape() {
        assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }

    #[test]
    fn page_has_sections_and_links() {
        let page = render_vocabulary(&index());
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>BODS &lt;v0.4&gt;</title>"));
        assert!(page.contains("<em>RDF</em>"));
        assert!(page.contains("id=\"class-Entity\""));
        assert!(page.contains("id=\"prop-foundingDate\""));
        let link = "<a href=\"#prop-foundingDate\"><code>bods:foundingDate</code></a>";
        assert!(page.contains(link));
        // unlabelled properties fall back to the compacted IRI
        assert!(page.contains("<h3>bods:foundingDate</h3>"));
        assert!(!page.contains("<script>"));
        assert!(!page.contains("Named Individuals</h2>"));
    }
}
