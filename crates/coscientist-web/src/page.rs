//! Search page skeleton and serialisation for the headless client.

use coscientist_common::ElementIds;

use crate::dom::{escape_html, MemoryDocument, Node};

/// Build the in-memory page the client expects: a form with three fields and
/// the status, summary, and list regions.
pub fn skeleton(ids: &ElementIds) -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    doc.insert(&ids.form, "form", "query-form");
    doc.insert_field(&ids.query, "");
    doc.insert_field(&ids.organism, "");
    doc.insert_field(&ids.focus, "");
    doc.insert(&ids.status, "div", "status");
    doc.insert(&ids.summary, "p", "summary");
    doc.insert(&ids.entries, "div", "card-grid");
    doc.insert(&ids.hypotheses, "div", "card-grid");
    doc.insert(&ids.tasks, "div", "card-grid");
    doc.insert(&ids.interpretation, "ul", "bullets");
    doc
}

fn section(doc: &MemoryDocument, id: &str, heading: &str) -> String {
    format!(
        "    <section>\n      <h2>{}</h2>\n      {}\n    </section>\n",
        escape_html(heading),
        doc.element_html(id).unwrap_or_default()
    )
}

/// Full HTML page reflecting the current document state.
pub fn render_html(doc: &MemoryDocument, ids: &ElementIds) -> String {
    let fields: String = [&ids.query, &ids.organism, &ids.focus]
        .iter()
        .filter_map(|id| doc.element_html(id))
        .map(|html| format!("      {}\n", html))
        .collect();

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("  <meta charset=\"utf-8\">\n  <title>AI Co-Scientist</title>\n");
    out.push_str("</head>\n<body>\n  <main>\n");
    out.push_str(&format!(
        "    <form id=\"{}\" class=\"query-form\">\n{}    </form>\n",
        escape_html(&ids.form),
        fields
    ));
    out.push_str(&format!("    {}\n", doc.element_html(&ids.status).unwrap_or_default()));
    out.push_str(&section(doc, &ids.summary, "Summary"));
    out.push_str(&section(doc, &ids.entries, "UniProt entries"));
    out.push_str(&section(doc, &ids.hypotheses, "Hypotheses"));
    out.push_str(&section(doc, &ids.tasks, "Next tasks"));
    out.push_str(&section(doc, &ids.interpretation, "Interpretation"));
    out.push_str("  </main>\n</body>\n</html>\n");
    out
}

/// One digest item per node; continuation lines are indented under the bullet.
fn text_lines(nodes: &[Node]) -> Vec<String> {
    nodes
        .iter()
        .map(|node| {
            let text = match node.tag() {
                Some("article") => node
                    .children()
                    .iter()
                    .map(Node::text_content)
                    .collect::<Vec<_>>()
                    .join("\n"),
                _ => node.text_content(),
            };
            text.lines().collect::<Vec<_>>().join("\n    ")
        })
        .collect()
}

/// Plain-text digest of the status, summary, and list regions.
pub fn render_text(doc: &MemoryDocument, ids: &ElementIds) -> String {
    let mut out = String::new();
    let state = doc.class(&ids.status).unwrap_or("status");
    out.push_str(&format!("[{}] {}\n", state, doc.text(&ids.status).unwrap_or_default()));

    let summary = doc.text(&ids.summary).unwrap_or_default();
    if !summary.is_empty() {
        out.push_str(&format!("\n{}\n", summary));
    }

    let sections = [
        (&ids.entries, "Entries"),
        (&ids.hypotheses, "Hypotheses"),
        (&ids.tasks, "Tasks"),
        (&ids.interpretation, "Interpretation"),
    ];
    for (id, heading) in sections {
        let Some(children) = doc.children(id) else { continue };
        if children.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{}\n", heading));
        for line in text_lines(children) {
            out.push_str(&format!("  - {}\n", line));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::entry_card;
    use crate::dom::Document;
    use coscientist_common::Entry;

    #[test]
    fn test_skeleton_has_every_region() {
        let ids = ElementIds::default();
        let doc = skeleton(&ids);
        for id in [&ids.form, &ids.query, &ids.organism, &ids.focus, &ids.status, &ids.summary] {
            assert!(doc.contains(id), "missing #{id}");
        }
        for id in ids.list_regions() {
            assert!(doc.contains(id), "missing #{id}");
        }
        assert_eq!(doc.value(&ids.query).unwrap(), "");
    }

    #[test]
    fn test_render_html_contains_regions() {
        let ids = ElementIds::default();
        let mut doc = skeleton(&ids);
        doc.set_text(&ids.summary, "A & B").unwrap();
        let html = render_html(&doc, &ids);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<form id=\"query-form\" class=\"query-form\">"));
        assert!(html.contains("<p id=\"summary\" class=\"summary\">A &amp; B</p>"));
        assert!(html.contains("<ul id=\"interpretation\" class=\"bullets\"></ul>"));
    }

    #[test]
    fn test_render_text_digest() {
        let ids = ElementIds::default();
        let mut doc = skeleton(&ids);
        doc.set_text(&ids.status, "Analysis ready.").unwrap();
        doc.set_class(&ids.status, "status success").unwrap();
        doc.set_text(&ids.summary, "S").unwrap();
        doc.append_child(
            &ids.entries,
            entry_card(&Entry {
                id: "INS_HUMAN".into(),
                accession: "P01308".into(),
                protein_name: Some("Insulin".into()),
                ..Default::default()
            }),
        )
        .unwrap();

        let text = render_text(&doc, &ids);
        assert!(text.starts_with("[status success] Analysis ready.\n"));
        assert!(text.contains("\nS\n"));
        assert!(text.contains(
            "Entries\n  - Insulin (P01308)\n    Unknown organism · No gene\n    No function available.\n"
        ));
        for line in text.lines().skip_while(|l| *l != "Entries").skip(1) {
            assert!(line.starts_with("  "), "unindented digest line: {line:?}");
        }
        assert!(!text.contains("Hypotheses"));
    }
}
