//! Directive extraction from raw model text.
//!
//! The model requests a tool by embedding a JSON object in its reply, ideally
//! inside `<json>...</json>` markers but a bare object anywhere in the text is
//! also accepted. Replies are generative text: candidates may be malformed,
//! duplicated, or name tools that do not exist. Decoding failures are local to
//! the candidate that caused them and never abort the scan.

use serde_json::Value;

use crate::tools::ToolRegistry;

pub const DIRECTIVE_START: &str = "<json>";
pub const DIRECTIVE_END: &str = "</json>";

/// A parsed tool request: which tool, and the single string payload for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub action: String,
    pub action_input: String,
}

/// What a model reply means to the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    /// A directive naming a registered tool. First registered match wins.
    Call(Directive),
    /// A structurally valid directive whose tool name is not registered.
    /// The loop folds in a notice and continues rather than terminating.
    UnknownTool(Directive),
    /// No actionable directive; the reply is a final answer.
    Answer,
}

/// Scan a reply for directive candidates and classify it.
///
/// Candidates are attempted in priority order: `<json>` delimited blocks
/// first, then any balanced brace-delimited object anywhere in the text. The
/// first candidate naming a registered tool is accepted. If candidates decode
/// but none names a registered tool, the last decoded one is reported as
/// `UnknownTool`; if nothing decodes, the reply is an `Answer`.
pub fn interpret(reply: &str, tools: &ToolRegistry) -> Interpretation {
    let mut unknown = None;

    for candidate in directive_candidates(reply) {
        let Some(directive) = decode_directive(&candidate) else {
            continue;
        };

        if tools.contains(&directive.action) {
            return Interpretation::Call(directive);
        }

        unknown = Some(directive);
    }

    match unknown {
        Some(directive) => Interpretation::UnknownTool(directive),
        None => Interpretation::Answer,
    }
}

/// Strip directive artifacts from a final reply: `<json>` blocks, bare
/// objects that decode as directives, and the literal "Final Answer:" marker.
///
/// Only directive-shaped brace fragments are removed; braces that belong to
/// prose or code snippets in a legitimate answer survive. Best-effort: a
/// fragment with unbalanced braces inside string values may slip through.
pub fn strip_directives(reply: &str) -> String {
    let without_blocks = remove_delimited_blocks(reply);
    let without_objects = remove_directive_objects(&without_blocks);
    without_objects.replace("Final Answer:", "").trim().to_string()
}

/// Candidate substrings in priority order: delimited blocks, then bare
/// balanced objects.
fn directive_candidates(reply: &str) -> Vec<String> {
    let mut candidates = delimited_blocks(reply);
    candidates.extend(
        brace_spans(reply)
            .into_iter()
            .map(|(start, end)| reply[start..end].to_string()),
    );
    candidates
}

/// The contents of every `<json>...</json>` block, in order of appearance.
fn delimited_blocks(reply: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut rest = reply;

    while let Some(start) = rest.find(DIRECTIVE_START) {
        let after = &rest[start + DIRECTIVE_START.len()..];
        let Some(end) = after.find(DIRECTIVE_END) else {
            break;
        };
        blocks.push(after[..end].trim().to_string());
        rest = &after[end + DIRECTIVE_END.len()..];
    }

    blocks
}

/// Byte spans of balanced top-level `{...}` fragments.
///
/// Braces inside JSON string values balance out, so a complete directive with
/// nested payload is captured whole; a lone unmatched brace inside a string
/// throws the spans off for that fragment only.
fn brace_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, c) in text.char_indices() {
        match c {
            '{' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            '}' => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        spans.push((start, i + 1));
                    }
                }
            }
            _ => {}
        }
    }

    spans
}

/// Decode one candidate into a directive, tolerating the accepted key aliases.
///
/// Action is read from `action` or `tool`; input from `action_input`,
/// `tool_input`, or `input`. Scalar inputs are coerced to strings.
fn decode_directive(candidate: &str) -> Option<Directive> {
    let value: Value = serde_json::from_str(candidate).ok()?;
    let object = value.as_object()?;

    let action = object
        .get("action")
        .or_else(|| object.get("tool"))?
        .as_str()?
        .to_string();

    let input = ["action_input", "tool_input", "input"]
        .iter()
        .find_map(|key| object.get(*key))?;

    let action_input = match input {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };

    Some(Directive {
        action,
        action_input,
    })
}

/// Remove every `<json>...</json>` block, markers included. An unclosed
/// marker is left in place.
fn remove_delimited_blocks(text: &str) -> String {
    let mut out = String::new();
    let mut rest = text;

    while let Some(start) = rest.find(DIRECTIVE_START) {
        let after = &rest[start + DIRECTIVE_START.len()..];
        let Some(end) = after.find(DIRECTIVE_END) else {
            break;
        };
        out.push_str(&rest[..start]);
        rest = &after[end + DIRECTIVE_END.len()..];
    }

    out.push_str(rest);
    out
}

/// Remove balanced brace fragments that decode as directive objects.
fn remove_directive_objects(text: &str) -> String {
    let mut out = String::new();
    let mut last = 0usize;

    for (start, end) in brace_spans(text) {
        if looks_like_directive(&text[start..end]) {
            out.push_str(&text[last..start]);
            last = end;
        }
    }

    out.push_str(&text[last..]);
    out
}

fn looks_like_directive(fragment: &str) -> bool {
    serde_json::from_str::<Value>(fragment)
        .ok()
        .as_ref()
        .and_then(Value::as_object)
        .map(|object| object.contains_key("action") || object.contains_key("tool"))
        .unwrap_or(false)
}
