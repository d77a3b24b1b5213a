//! Typed prompt template with named slots

use docqa_core::ChatMessage;

const CONTEXT_SLOT: &str = "{context}";
const QUESTION_SLOT: &str = "{question}";

/// A two-role prompt template with named `context` and `question` slots.
///
/// The system turn carries the grounding instruction and the retrieved
/// context; the user turn carries the raw query. Slots are filled by explicit
/// substitution, never positional formatting.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    system_template: String,
    user_template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            system_template: "You are a helpful assistant. Answer the question using only the \
                              provided context. If the context does not contain the answer, say \
                              that you do not know.\n\nContext:\n{context}"
                .to_string(),
            user_template: QUESTION_SLOT.to_string(),
        }
    }
}

impl PromptTemplate {
    /// Custom templates; each slot may appear in either role's template
    pub fn new(system_template: impl Into<String>, user_template: impl Into<String>) -> Self {
        Self {
            system_template: system_template.into(),
            user_template: user_template.into(),
        }
    }

    /// Fill both slots and render the fixed two-role message sequence
    pub fn render(&self, context: &str, question: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(fill(&self.system_template, context, question)),
            ChatMessage::user(fill(&self.user_template, context, question)),
        ]
    }
}

/// Substitute both slots in one pass over the template, so slot markers that
/// happen to appear inside filled values are left alone.
fn fill(template: &str, context: &str, question: &str) -> String {
    let mut out = String::with_capacity(template.len() + context.len() + question.len());
    let mut rest = template;

    loop {
        let (pos, slot, value) = match (rest.find(CONTEXT_SLOT), rest.find(QUESTION_SLOT)) {
            (Some(c), Some(q)) if c <= q => (c, CONTEXT_SLOT, context),
            (Some(c), None) => (c, CONTEXT_SLOT, context),
            (_, Some(q)) => (q, QUESTION_SLOT, question),
            (None, None) => break,
        };
        out.push_str(&rest[..pos]);
        out.push_str(value);
        rest = &rest[pos + slot.len()..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use docqa_core::Role;

    #[test]
    fn test_render_fills_both_slots() {
        let template = PromptTemplate::default();
        let messages = template.render("Stockholm is the capital.", "What is the capital?");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("Stockholm is the capital."));
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "What is the capital?");
    }

    #[test]
    fn test_slot_markers_inside_filled_values_are_left_alone() {
        let template = PromptTemplate::default();
        let messages = template.render(
            "See the {question} placeholder described in the manual.",
            "how are templates filled?",
        );

        assert!(
            messages[0]
                .content
                .contains("See the {question} placeholder described in the manual.")
        );
        assert_eq!(messages[1].content, "how are templates filled?");
    }

    #[test]
    fn test_question_containing_context_marker_is_not_rescanned() {
        let template = PromptTemplate::new("{context}", "{question}");
        let messages = template.render("plain context", "what does {context} mean?");

        assert_eq!(messages[0].content, "plain context");
        assert_eq!(messages[1].content, "what does {context} mean?");
    }

    #[test]
    fn test_custom_template() {
        let template = PromptTemplate::new("Facts: {context}", "Q: {question}");
        let messages = template.render("fact one", "why?");

        assert_eq!(messages[0].content, "Facts: fact one");
        assert_eq!(messages[1].content, "Q: why?");
    }
}
