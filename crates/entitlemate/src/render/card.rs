use super::escape_html;
use crate::catalog::EntitlementRecord;
use std::fmt::Write as _;

/// Card content for one record. Optional regions are `None` when the record
/// has nothing to show for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView<'a> {
    pub name: &'a str,
    pub headline: &'a str,
    pub description: &'a str,
    pub apply_link: Option<&'a str>,
    pub explainer_link: Option<&'a str>,
    pub value_estimate: Option<&'a str>,
    pub category: Option<&'a str>,
}

impl<'a> CardView<'a> {
    pub fn from_record(record: &'a EntitlementRecord) -> Self {
        Self {
            name: &record.name,
            headline: &record.headline,
            description: &record.description,
            apply_link: non_blank(&record.apply_link),
            explainer_link: record.explainer_link.as_deref().and_then(non_blank),
            value_estimate: record.value_estimate.as_deref().and_then(non_blank),
            category: record.category.as_deref().and_then(non_blank),
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<article class=\"card\">\n");
        if let Some(category) = self.category {
            writeln!(html, "  <span class=\"category\">{}</span>", escape_html(category))
                .expect("write category");
        }
        writeln!(html, "  <h2>{}</h2>", escape_html(self.name)).expect("write name");
        if !self.headline.is_empty() {
            writeln!(html, "  <p class=\"headline\">{}</p>", escape_html(self.headline))
                .expect("write headline");
        }
        if !self.description.is_empty() {
            writeln!(
                html,
                "  <p class=\"description\">{}</p>",
                escape_html(self.description)
            )
            .expect("write description");
        }
        if let Some(value) = self.value_estimate {
            writeln!(html, "  <p class=\"value\">{}</p>", escape_html(value)).expect("write value");
        }

        html.push_str("  <div class=\"links\">\n");
        if let Some(link) = self.apply_link {
            writeln!(
                html,
                "    <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Apply Now</a>",
                escape_html(link)
            )
            .expect("write apply link");
        }
        if let Some(link) = self.explainer_link {
            writeln!(
                html,
                "    <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Learn More</a>",
                escape_html(link)
            )
            .expect("write explainer link");
        }
        html.push_str("  </div>\n</article>\n");

        html
    }

    pub fn to_text(&self) -> String {
        let mut text = String::new();
        let heading = match self.category {
            Some(category) => format!("{} [{}]", self.name, category),
            None => self.name.to_string(),
        };
        writeln!(text, "{heading}").expect("write name");
        if !self.headline.is_empty() {
            writeln!(text, "  {}", self.headline).expect("write headline");
        }
        if !self.description.is_empty() {
            writeln!(text, "  {}", self.description).expect("write description");
        }
        if let Some(value) = self.value_estimate {
            writeln!(text, "  Estimated value: {value}").expect("write value");
        }
        if let Some(link) = self.apply_link {
            writeln!(text, "  Apply Now: {link}").expect("write apply link");
        }
        if let Some(link) = self.explainer_link {
            writeln!(text, "  Learn More: {link}").expect("write explainer link");
        }
        text
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pension() -> EntitlementRecord {
        EntitlementRecord {
            name: "Age Pension".to_string(),
            headline: "Fortnightly income support".to_string(),
            apply_link: "https://example.gov.au/apply?a=1&b=2".to_string(),
            ..EntitlementRecord::default()
        }
    }

    #[test]
    fn absent_optional_regions_are_omitted() {
        let record = pension();
        let html = CardView::from_record(&record).to_html();

        assert!(html.contains("<h2>Age Pension</h2>"));
        assert!(html.contains("Apply Now"));
        assert!(!html.contains("Learn More"));
        assert!(!html.contains("class=\"value\""));
        assert!(!html.contains("undefined"));
        assert!(!html.contains("class=\"description\""));
    }

    #[test]
    fn optional_regions_render_when_present() {
        let record = EntitlementRecord {
            value_estimate: Some("$1,116 per fortnight".to_string()),
            explainer_link: Some("https://example.gov.au/learn".to_string()),
            ..pension()
        };
        let card = CardView::from_record(&record);

        let html = card.to_html();
        assert!(html.contains("<p class=\"value\">$1,116 per fortnight</p>"));
        assert!(html.contains("href=\"https://example.gov.au/learn\""));
        assert!(html.contains("href=\"https://example.gov.au/apply?a=1&amp;b=2\""));

        let text = card.to_text();
        assert!(text.contains("Estimated value: $1,116 per fortnight"));
        assert!(text.contains("Learn More: https://example.gov.au/learn"));
    }

    #[test]
    fn blank_apply_link_hides_the_button() {
        let record = EntitlementRecord {
            apply_link: "  ".to_string(),
            ..pension()
        };
        assert!(CardView::from_record(&record).apply_link.is_none());
    }
}
