//! Intent definition model
//!
//! Handlers describe the utterances they understand with these types. An
//! [`IntentDefinition`] holds one or more [`Sentence`]s (alternative phrasings)
//! and any number of [`Variable`]s (named alternatives reused inside the
//! definition). Each sentence is an ordered list of [`SentencePart`]s.
//!
//! ```text
//! IntentDefinition("DimRoom")
//!   Sentence: "Dim the lights in the" + Choice(Room, 6 values) + Choice(UpDown, 2 values)
//!
//! compiles to
//!
//! [DimRoom]
//! Dim the lights in the $Room{Room} (Up | Down){UpDown}
//! ```

use serde::Serialize;

/// Literal text inside a sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Literal {
    text: String,
    optional: bool,
    substitute: bool,
}

impl Literal {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            optional: false,
            substitute: false,
        }
    }

    /// Mark the literal as optional (`[text]`)
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Render the literal as a value label (`text:`)
    pub fn substitute(mut self) -> Self {
        self.substitute = true;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_substitute(&self) -> bool {
        self.substitute
    }
}

/// A parameter whose value is one of an ordered list of literals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetParameter {
    name: String,
    return_value: bool,
    possible_values: Vec<String>,
    optional: bool,
}

impl SetParameter {
    pub fn new<I, S>(name: impl Into<String>, return_value: bool, possible_values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            return_value,
            possible_values: possible_values.into_iter().map(Into::into).collect(),
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the matched value is returned in the recognized intent
    pub fn returns_value(&self) -> bool {
        self.return_value
    }

    pub fn possible_values(&self) -> &[String] {
        &self.possible_values
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

/// A parameter matching any integer in `lower..=upper`
///
/// The caller keeps `lower <= upper`; the compiler renders the bounds as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberRangeParameter {
    name: String,
    return_value: bool,
    lower: i64,
    upper: i64,
    optional: bool,
}

impl NumberRangeParameter {
    pub fn new(name: impl Into<String>, return_value: bool, lower: i64, upper: i64) -> Self {
        Self {
            name: name.into(),
            return_value,
            lower,
            upper,
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn returns_value(&self) -> bool {
        self.return_value
    }

    pub fn lower(&self) -> i64 {
        self.lower
    }

    pub fn upper(&self) -> i64 {
        self.upper
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

/// Reference to a [`Variable`] declared on the same definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableParameter {
    name: String,
    return_value: bool,
    optional: bool,
}

impl VariableParameter {
    pub fn new(name: impl Into<String>, return_value: bool) -> Self {
        Self {
            name: name.into(),
            return_value,
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn returns_value(&self) -> bool {
        self.return_value
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

/// One element of a sentence, in spoken order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SentencePart {
    Literal(Literal),
    Choice(SetParameter),
    Range(NumberRangeParameter),
    VariableRef(VariableParameter),
}

impl SentencePart {
    /// Slot/reference key of the part. For literals this is the text itself.
    pub fn name(&self) -> &str {
        match self {
            SentencePart::Literal(literal) => literal.text(),
            SentencePart::Choice(parameter) => parameter.name(),
            SentencePart::Range(parameter) => parameter.name(),
            SentencePart::VariableRef(parameter) => parameter.name(),
        }
    }

    pub fn is_optional(&self) -> bool {
        match self {
            SentencePart::Literal(literal) => literal.is_optional(),
            SentencePart::Choice(parameter) => parameter.is_optional(),
            SentencePart::Range(parameter) => parameter.is_optional(),
            SentencePart::VariableRef(parameter) => parameter.is_optional(),
        }
    }
}

impl From<Literal> for SentencePart {
    fn from(literal: Literal) -> Self {
        SentencePart::Literal(literal)
    }
}

impl From<SetParameter> for SentencePart {
    fn from(parameter: SetParameter) -> Self {
        SentencePart::Choice(parameter)
    }
}

impl From<NumberRangeParameter> for SentencePart {
    fn from(parameter: NumberRangeParameter) -> Self {
        SentencePart::Range(parameter)
    }
}

impl From<VariableParameter> for SentencePart {
    fn from(parameter: VariableParameter) -> Self {
        SentencePart::VariableRef(parameter)
    }
}

/// An ordered phrasing. The order of parts is the spoken word order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Sentence {
    parts: Vec<SentencePart>,
}

impl Sentence {
    pub fn builder() -> SentenceBuilder {
        SentenceBuilder::default()
    }

    /// Sentence made of a single literal
    pub fn literal(text: impl Into<String>) -> Self {
        Self::builder().text(text).build()
    }

    pub fn parts(&self) -> &[SentencePart] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SentencePart> {
        self.parts.iter()
    }
}

impl<'a> IntoIterator for &'a Sentence {
    type Item = &'a SentencePart;
    type IntoIter = std::slice::Iter<'a, SentencePart>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

/// Append-only builder for [`Sentence`]
#[derive(Debug, Clone, Default)]
pub struct SentenceBuilder {
    parts: Vec<SentencePart>,
}

impl SentenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append literal text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Literal::new(text).into());
        self
    }

    /// Append optional literal text
    pub fn optional_text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Literal::new(text).optional().into());
        self
    }

    /// Append any part (literal or parameter)
    pub fn part(mut self, part: impl Into<SentencePart>) -> Self {
        self.parts.push(part.into());
        self
    }

    pub fn build(self) -> Sentence {
        Sentence { parts: self.parts }
    }
}

/// Named set of alternative sub-phrasings, referenced with [`VariableParameter`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    name: String,
    sentences: Vec<Sentence>,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sentences: Vec::new(),
        }
    }

    /// Add an alternation branch
    pub fn with_sentence(mut self, sentence: Sentence) -> Self {
        self.sentences.push(sentence);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }
}

/// Blueprint of the utterances that trigger one intent
///
/// An empty name is a sentinel meaning "nothing to compile": the compiler skips
/// it and the registry never routes to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentDefinition {
    name: String,
    sentences: Vec<Sentence>,
    variables: Vec<Variable>,
}

impl IntentDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sentences: Vec::new(),
            variables: Vec::new(),
        }
    }

    /// Definition with a single one-literal sentence
    pub fn simple(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name).with_sentence(Sentence::literal(text))
    }

    pub fn with_sentence(mut self, sentence: Sentence) -> Self {
        self.sentences.push(sentence);
        self
    }

    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    pub fn add_sentence(&mut self, sentence: Sentence) {
        self.sentences.push(sentence);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// True for the empty-name sentinel
    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_definition_has_one_literal() {
        let definition = IntentDefinition::simple("GetTime", "What time is it");

        assert_eq!(definition.name(), "GetTime");
        assert_eq!(definition.sentences().len(), 1);
        let sentence = &definition.sentences()[0];
        assert_eq!(sentence.len(), 1);
        assert_eq!(sentence.parts()[0].name(), "What time is it");
        assert!(!sentence.parts()[0].is_optional());
    }

    #[test]
    fn test_builder_preserves_part_order() {
        let sentence = Sentence::builder()
            .text("Set a timer for")
            .part(NumberRangeParameter::new("Amount", true, 0, 60))
            .part(SetParameter::new("TimeUnit", true, ["seconds", "minutes"]))
            .optional_text("from now")
            .build();

        let names: Vec<&str> = sentence.iter().map(SentencePart::name).collect();
        assert_eq!(names, vec!["Set a timer for", "Amount", "TimeUnit", "from now"]);
        assert!(matches!(sentence.parts()[1], SentencePart::Range(_)));
        assert!(sentence.parts()[3].is_optional());
    }

    #[test]
    fn test_empty_name_is_sentinel() {
        assert!(IntentDefinition::new("").is_unnamed());
        assert!(!IntentDefinition::new("Named").is_unnamed());
    }

    #[test]
    fn test_serializes_parts_with_kind_tag() {
        let sentence = Sentence::builder()
            .part(VariableParameter::new("Room", true))
            .build();
        let json = serde_json::to_value(&sentence).unwrap();

        assert_eq!(json[0]["kind"], "variableRef");
        assert_eq!(json[0]["name"], "Room");
        assert_eq!(json[0]["returnValue"], true);
    }
}
