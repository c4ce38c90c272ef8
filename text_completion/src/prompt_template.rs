use crate::{ChatMessage, VariableSet};

/// SMS lead qualification script.
pub const DEFAULT_TEMPLATE: &str = include_str!("lead_qualifier_prompt.txt");

const COMPANY_NAME: &str = "**COMPANY NAME**";
const FIRST_NAME: &str = "**FIRSTNAME**";
const OFFERING: &str = "**OFFERING**";
const INDUSTRY: &str = "**INDUSTRY**";

/// Every token `render` substitutes.
pub const PLACEHOLDERS: [&str; 4] = [COMPANY_NAME, FIRST_NAME, OFFERING, INDUSTRY];

/// System prompt with placeholders, immutable once built.
#[derive(Clone, Debug)]
pub struct PromptTemplate {
    text: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        PromptTemplate::new(DEFAULT_TEMPLATE)
    }
}

impl PromptTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        PromptTemplate { text: text.into() }
    }

    /// Replaces every placeholder occurrence.
    /// Industry and offering are lowercased, names keep their casing.
    pub fn render(&self, variables: &VariableSet) -> String {
        self.text
            .replace(COMPANY_NAME, &variables.company_name)
            .replace(FIRST_NAME, &variables.first_name)
            .replace(OFFERING, &variables.service.to_lowercase())
            .replace(INDUSTRY, &variables.industry.to_lowercase())
    }

    pub fn system_message(&self, variables: &VariableSet) -> ChatMessage {
        ChatMessage::system(self.render(variables))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    fn variables() -> VariableSet {
        VariableSet {
            first_name: "Jamie".to_string(),
            company_name: "Brightside Energy".to_string(),
            industry: "Solar Power".to_string(),
            service: "Heat Pumps".to_string(),
        }
    }

    #[test]
    fn test_default_template_has_every_placeholder() {
        for token in PLACEHOLDERS {
            assert!(DEFAULT_TEMPLATE.contains(token), "missing {}", token);
        }
    }

    #[test]
    fn test_render_leaves_no_placeholder() {
        let prompt = PromptTemplate::default().render(&variables());
        for token in PLACEHOLDERS {
            assert!(!prompt.contains(token), "{} left in prompt", token);
        }
    }

    #[test]
    fn test_render_casing() {
        let prompt = PromptTemplate::default().render(&variables());
        assert!(prompt.contains("Hi it's Sarah from Brightside Energy here."));
        assert!(prompt.contains("the same Jamie that we were in touch with about heat pumps"));
        assert!(prompt.contains("qualify leads over SMS for solar power services"));
        assert!(!prompt.contains("Heat Pumps"));
        assert!(!prompt.contains("Solar Power"));
    }

    #[test]
    fn test_render_replaces_every_occurrence() {
        let template = PromptTemplate::new("**OFFERING** / **OFFERING** / **INDUSTRY** **INDUSTRY**");
        assert_eq!(
            template.render(&variables()),
            "heat pumps / heat pumps / solar power solar power"
        );
    }

    #[test]
    fn test_render_keeps_other_text() {
        let template = PromptTemplate::new("Dear **FIRSTNAME** at **COMPANY NAME**, **VARIABLE**");
        assert_eq!(
            template.render(&variables()),
            "Dear Jamie at Brightside Energy, **VARIABLE**"
        );
    }

    #[test]
    fn test_system_message() {
        let msg = PromptTemplate::new("Hello **FIRSTNAME**").system_message(&variables());
        assert_eq!(msg.role, Role::System);
        assert_eq!(msg.content, "Hello Jamie");
    }
}
