//! Prompt construction
//!
//! Every model call starts from one of four master templates: component
//! generation, whole-component refinement, single-element refinement,
//! and assistant chat. Templates are fixed text; the builders append the
//! variable tail (request, embedded code, conversation) in a stable
//! layout. The generation and refinement tails end with the
//! `JSON RESPONSE` anchor line that the extraction chain's last-resort
//! strategy scans for; the element tail deliberately does not, because
//! an element reply is raw markup, not JSON.

use crate::chat::ChatThread;
use vitrine_artifact::UiArtifact;

/// Master template for component generation.
pub const GENERATION_TEMPLATE: &str = r#"You are an expert web developer who builds clean, modern, responsive UI components with Tailwind CSS, HTML, and JavaScript.

RULES:
1. Respond with ONLY a single valid JSON object. No other text, no markdown fences.
2. The object has exactly these keys: "html", "css", "js", "external_scripts", "external_styles".
3. TAILWIND FIRST: style with Tailwind utility classes directly in the HTML. Do not invent custom class names.
4. Always include the Tailwind CDN, https://cdn.tailwindcss.com, as an entry in "external_scripts".
5. Use "css" only for base styles or animations Tailwind cannot express; it is usually an empty string.
6. All JavaScript is self-contained in "js". Additional libraries go in "external_scripts" as CDN URLs; extra stylesheets go in "external_styles".
7. Links must not navigate anywhere: use href="javascript:void(0)".
8. "html" may be a bare fragment or a full document; keep it indented and readable.
9. The design must work well on both desktop and mobile.

EXAMPLE
USER REQUEST: "a simple blue button that says 'Learn More'"
YOUR JSON RESPONSE:
{
  "html": "<button class=\"bg-blue-500 hover:bg-blue-700 text-white font-bold py-2 px-4 rounded\">Learn More</button>",
  "css": "",
  "js": "",
  "external_scripts": ["https://cdn.tailwindcss.com"],
  "external_styles": []
}"#;

/// Master template for whole-component refinement.
pub const REFINE_TEMPLATE: &str = r#"You are an expert code refactoring assistant. Modify the given web component according to the user's instruction.

RULES:
1. Respond with ONLY a single valid JSON object with the keys "html", "css", "js", "external_scripts", "external_styles". No explanations, no markdown fences.
2. The reply is a complete drop-in replacement for the original component.
3. Change only what the instruction requires; echo every other field verbatim.
4. If the instruction needs a new external library, append its CDN URL to "external_scripts"."#;

/// Master template for single-element refinement.
pub const ELEMENT_REFINE_TEMPLATE: &str = r#"You are an expert web developer editing one element of a larger component.

RULES:
1. Respond with ONLY the modified element's markup. No JSON wrapper, no markdown fences, no commentary.
2. The reply must be a single element. Keep the element's data-id attribute exactly as given.
3. Change only what the instruction requires; keep every other attribute and child as it is.
4. Style with Tailwind utility classes."#;

/// Master template for assistant chat.
pub const CHAT_TEMPLATE: &str = r#"You are a friendly expert code assistant. The user generated a web component and is asking questions about it. Answer the latest question from the code context and the conversation so far.

RULES:
1. Be clear, concise, and helpful.
2. Answer as a short list of points, not paragraphs.
3. Format any code as a fenced markdown block with the language named."#;

/// Build the generation prompt for a user request.
#[must_use]
pub fn generation_prompt(request: &str) -> String {
    format!("{GENERATION_TEMPLATE}\n\nUSER REQUEST: \"{request}\"\n\nYOUR JSON RESPONSE:\n")
}

/// Build the whole-component refinement prompt: the current artifact in
/// its wire shape plus the instruction.
#[must_use]
pub fn refine_prompt(artifact: &UiArtifact, instruction: &str) -> String {
    let wire = artifact.to_wire_json();
    format!(
        "{REFINE_TEMPLATE}\n\nORIGINAL COMPONENT CODE:\n{wire}\n\nREFINEMENT INSTRUCTION: \"{instruction}\"\n\nYOUR JSON RESPONSE:\n"
    )
}

/// Build the single-element refinement prompt: the selected fragment
/// (identifier attribute included) plus the instruction.
#[must_use]
pub fn element_refine_prompt(snippet: &str, instruction: &str) -> String {
    format!(
        "{ELEMENT_REFINE_TEMPLATE}\n\nELEMENT:\n{snippet}\n\nINSTRUCTION: \"{instruction}\"\n\nYOUR MODIFIED ELEMENT:\n"
    )
}

/// Build the chat prompt: code context, the conversation so far, and the
/// latest question.
#[must_use]
pub fn chat_prompt(artifact: &UiArtifact, thread: &ChatThread, question: &str) -> String {
    let history = thread
        .turns()
        .iter()
        .map(|turn| format!("- {}: {}", turn.role.label(), turn.content))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "{CHAT_TEMPLATE}\n\nCODE CONTEXT:\nHTML:\n{html}\n\nCSS:\n{css}\n\nJAVASCRIPT:\n{js}\n\nCONVERSATION HISTORY:\n{history}\n\nLATEST QUESTION: \"{question}\"\n\nYOUR RESPONSE:\n",
        html = artifact.markup,
        css = artifact.styles,
        js = artifact.script,
    )
}
