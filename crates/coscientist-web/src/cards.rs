//! Card formatters: one result item in, one detached two-line node out.
//! Missing optional fields render as placeholders so every card has the same shape.

use coscientist_common::{Entry, Hypothesis, Task};

use crate::dom::Node;

pub const UNKNOWN_ORGANISM: &str = "Unknown organism";
pub const NO_GENE: &str = "No gene";
pub const NO_FUNCTION: &str = "No function available.";
pub const NO_INTERPRETATION: &str = "No interpretation cues yet.";
pub const UNKNOWN_PROTEIN: &str = "Unknown protein";
pub const NO_ACCESSION: &str = "no accession";

/// Empty strings fall back the same way as absent fields.
fn present(field: Option<&str>) -> Option<&str> {
    field.filter(|s| !s.trim().is_empty())
}

pub fn create_card(title: &str, details: &str) -> Node {
    Node::element("article")
        .with_class("mini-card")
        .with_child(Node::element("h3").with_text(title))
        .with_child(Node::element("p").with_text(details))
}

pub fn create_bullet(text: &str) -> Node {
    Node::element("li").with_text(text)
}

pub fn entry_title(entry: &Entry) -> String {
    let name = present(entry.protein_name.as_deref())
        .or_else(|| present(Some(entry.id.as_str())))
        .unwrap_or(UNKNOWN_PROTEIN);
    let accession = present(Some(entry.accession.as_str())).unwrap_or(NO_ACCESSION);
    format!("{} ({})", name, accession)
}

pub fn entry_details(entry: &Entry) -> String {
    format!(
        "{} · {}\n{}",
        present(entry.organism.as_deref()).unwrap_or(UNKNOWN_ORGANISM),
        present(entry.gene.as_deref()).unwrap_or(NO_GENE),
        present(entry.function.as_deref()).unwrap_or(NO_FUNCTION),
    )
}

pub fn entry_card(entry: &Entry) -> Node {
    create_card(&entry_title(entry), &entry_details(entry))
}

pub fn hypothesis_card(hypothesis: &Hypothesis) -> Node {
    create_card(&hypothesis.statement, &hypothesis.rationale)
}

pub fn task_card(task: &Task) -> Node {
    create_card(&task.task, &task.data_needed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insulin() -> Entry {
        Entry {
            id: "INS_HUMAN".into(),
            accession: "P01308".into(),
            protein_name: Some("Insulin".into()),
            organism: Some("Homo sapiens".into()),
            gene: Some("INS".into()),
            function: Some("Decreases blood glucose concentration.".into()),
        }
    }

    #[test]
    fn test_entry_card_with_all_fields() {
        let card = entry_card(&insulin());
        assert_eq!(card.tag(), Some("article"));
        assert_eq!(card.class(), Some("mini-card"));

        let [title, body] = card.children() else {
            panic!("expected title and body");
        };
        assert_eq!(title.tag(), Some("h3"));
        assert_eq!(title.text_content(), "Insulin (P01308)");
        assert_eq!(
            body.text_content(),
            "Homo sapiens · INS\nDecreases blood glucose concentration."
        );
    }

    #[test]
    fn test_entry_card_placeholders() {
        let entry = Entry {
            id: "Q9XYZ1_MOUSE".into(),
            accession: "Q9XYZ1".into(),
            ..Default::default()
        };
        assert_eq!(entry_title(&entry), "Q9XYZ1_MOUSE (Q9XYZ1)");

        let body = entry_details(&entry);
        assert!(body.contains("Unknown organism"));
        assert!(body.contains("No gene"));
        assert!(body.contains("No function available."));
    }

    #[test]
    fn test_entry_card_empty_strings_use_placeholders() {
        let entry = Entry {
            id: "X_HUMAN".into(),
            accession: "P1".into(),
            protein_name: Some("".into()),
            organism: Some("".into()),
            gene: Some("".into()),
            function: Some("".into()),
        };
        assert_eq!(entry_title(&entry), "X_HUMAN (P1)");
        assert_eq!(
            entry_details(&entry),
            "Unknown organism · No gene\nNo function available."
        );
    }

    #[test]
    fn test_entry_title_without_identifiers() {
        let entry = Entry::default();
        assert_eq!(entry_title(&entry), "Unknown protein (no accession)");
    }

    #[test]
    fn test_hypothesis_and_task_cards() {
        let h = hypothesis_card(&Hypothesis {
            statement: "Insulin may influence structure.".into(),
            rationale: "Derived from UniProt functional annotation.".into(),
        });
        assert_eq!(h.children()[0].text_content(), "Insulin may influence structure.");
        assert_eq!(h.children()[1].text_content(), "Derived from UniProt functional annotation.");

        let t = task_card(&Task {
            task: "Retrieve pathway partners".into(),
            data_needed: "Pathway databases".into(),
        });
        assert_eq!(t.to_html(), "<article class=\"mini-card\"><h3>Retrieve pathway partners</h3><p>Pathway databases</p></article>");
    }

    #[test]
    fn test_bullet() {
        assert_eq!(create_bullet("cue").to_html(), "<li>cue</li>");
    }
}
