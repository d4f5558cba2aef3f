//! Pass two: sentence text rendering
//!
//! The Rhasspy parser is whitespace and punctuation sensitive, so every rule
//! here is exact:
//!
//! | part            | rendering                                  |
//! |-----------------|--------------------------------------------|
//! | literal         | `text`, `text:` if substitute              |
//! | choice (≤ 5)    | `(a \| b \| c)` then `{Name}` if returned   |
//! | choice (> 5)    | `$Slot` then `{Name}` if returned          |
//! | range           | `(1..10)` then `{Name!int}` if returned    |
//! | variable ref    | `<Name>` then ` {Name}` if returned        |
//!
//! Optional parts are wrapped in `[...]` after the return suffix is added.

use std::fmt::Write;

use super::{requires_slot, SlotDictionary};
use crate::model::{
    IntentDefinition, Literal, NumberRangeParameter, Sentence, SentencePart, SetParameter,
    Variable, VariableParameter,
};

pub(super) fn render_definitions(definitions: &[&IntentDefinition], slots: &SlotDictionary) -> String {
    definitions
        .iter()
        .map(|definition| render_definition(definition, slots))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_definition(definition: &IntentDefinition, slots: &SlotDictionary) -> String {
    let intent = definition.name();
    let mut out = String::new();
    let _ = writeln!(out, "[{}]", intent);

    for variable in definition.variables() {
        let _ = writeln!(out, "{}", render_variable(intent, variable, slots));
    }
    if !definition.variables().is_empty() {
        out.push('\n');
    }

    let sentences = definition
        .sentences()
        .iter()
        .map(|sentence| render_sentence(intent, sentence, slots))
        .collect::<Vec<_>>()
        .join("\n");
    out.push_str(&sentences);
    out
}

fn render_variable(intent: &str, variable: &Variable, slots: &SlotDictionary) -> String {
    let branches = variable
        .sentences()
        .iter()
        .map(|sentence| render_sentence(intent, sentence, slots))
        .collect::<Vec<_>>();

    if branches.len() > 1 {
        format!("{} = ({})", variable.name(), branches.join("|"))
    } else {
        format!("{} = {}", variable.name(), branches.join(""))
    }
}

fn render_sentence(intent: &str, sentence: &Sentence, slots: &SlotDictionary) -> String {
    sentence
        .iter()
        .map(|part| render_part(intent, part, slots))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_part(intent: &str, part: &SentencePart, slots: &SlotDictionary) -> String {
    let rendered = match part {
        SentencePart::Literal(literal) => render_literal(literal),
        SentencePart::Choice(parameter) => render_choice(intent, parameter, slots),
        SentencePart::Range(parameter) => render_range(parameter),
        SentencePart::VariableRef(parameter) => render_variable_ref(parameter),
    };

    if part.is_optional() {
        format!("[{}]", rendered)
    } else {
        rendered
    }
}

fn render_literal(literal: &Literal) -> String {
    if literal.is_substitute() {
        format!("{}:", literal.text())
    } else {
        literal.text().to_string()
    }
}

fn render_choice(intent: &str, parameter: &SetParameter, slots: &SlotDictionary) -> String {
    let values = parameter.possible_values();
    let mut rendered = if requires_slot(values) {
        let slot = slots
            .resolve(intent, parameter)
            .unwrap_or_else(|| parameter.name().to_string());
        format!("${}", slot)
    } else {
        format!("({})", values.join(" | "))
    };

    if parameter.returns_value() {
        let _ = write!(rendered, "{{{}}}", parameter.name());
    }
    rendered
}

fn render_range(parameter: &NumberRangeParameter) -> String {
    let mut rendered = format!("({}..{})", parameter.lower(), parameter.upper());
    if parameter.returns_value() {
        let _ = write!(rendered, "{{{}!int}}", parameter.name());
    }
    rendered
}

fn render_variable_ref(parameter: &VariableParameter) -> String {
    let mut rendered = format!("<{}>", parameter.name());
    if parameter.returns_value() {
        let _ = write!(rendered, " {{{}}}", parameter.name());
    }
    rendered
}
