//! Unit tests for the grammar compiler

#[cfg(test)]
mod tests {
    use crate::{
        grammar::{GrammarCompiler, GrammarError},
        model::{
            IntentDefinition, Literal, NumberRangeParameter, Sentence, SetParameter, Variable,
            VariableParameter,
        },
    };

    fn values(last: &str) -> Vec<String> {
        ["One", "Two", "Three", "Four", "Five", last]
            .iter()
            .map(|v| v.to_string())
            .collect()
    }

    fn single_part(name: &str, part: impl Into<crate::model::SentencePart>) -> IntentDefinition {
        IntentDefinition::new(name).with_sentence(Sentence::builder().part(part).build())
    }

    #[test]
    fn test_single_literal_sentence() {
        let definition = IntentDefinition::simple("TestIntent", "Some test text");

        let grammar = GrammarCompiler::new().compile([&definition]).unwrap();

        assert_eq!(grammar.sentences, "[TestIntent]\nSome test text");
        assert!(grammar.slots.is_empty());
    }

    #[test]
    fn test_compilation_is_deterministic() {
        let definitions = vec![
            single_part("TestIntent1", SetParameter::new("Test", true, values("Six"))),
            single_part("TestIntent2", SetParameter::new("Test", true, values("Seven"))),
            IntentDefinition::simple("TestIntent3", "Another text"),
        ];
        let compiler = GrammarCompiler::new();

        let first = compiler.compile(&definitions).unwrap();
        let second = compiler.compile(&definitions).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.slots.to_json().unwrap(), second.slots.to_json().unwrap());
    }

    #[test]
    fn test_unnamed_definition_is_skipped() {
        let unnamed = single_part("", SetParameter::new("Test", true, values("Six")));
        let named = IntentDefinition::simple("TestIntent", "Some test text");

        let grammar = GrammarCompiler::new()
            .compile([&named, &unnamed])
            .unwrap();

        assert_eq!(grammar.sentences, "[TestIntent]\nSome test text");
        assert!(grammar.slots.is_empty());
    }

    #[test]
    fn test_only_unnamed_definitions_compile_to_nothing() {
        let unnamed = IntentDefinition::new("");

        let grammar = GrammarCompiler::new().compile([&unnamed]).unwrap();

        assert!(grammar.is_empty());
    }

    #[test]
    fn test_small_choice_renders_inline() {
        let definition = single_part(
            "TestIntent",
            SetParameter::new("Test", true, ["One", "Two", "Three", "Four", "Five"]),
        );

        let grammar = GrammarCompiler::new().compile([&definition]).unwrap();

        assert_eq!(
            grammar.sentences,
            "[TestIntent]\n(One | Two | Three | Four | Five){Test}"
        );
        assert!(grammar.slots.is_empty());
    }

    #[test]
    fn test_choice_without_return_value() {
        let definition = IntentDefinition::new("TestIntent").with_sentence(
            Sentence::builder()
                .text("Turn")
                .part(SetParameter::new("State", false, ["on", "off"]))
                .build(),
        );

        let grammar = GrammarCompiler::new().compile([&definition]).unwrap();

        assert_eq!(grammar.sentences, "[TestIntent]\nTurn (on | off)");
    }

    #[test]
    fn test_large_choice_renders_as_slot() {
        let definition = single_part("TestIntent", SetParameter::new("Test", true, values("Six")));

        let grammar = GrammarCompiler::new().compile([&definition]).unwrap();

        assert_eq!(grammar.sentences, "[TestIntent]\n$Test{Test}");
        assert_eq!(grammar.slots.get("Test"), Some(values("Six").as_slice()));
    }

    #[test]
    fn test_identical_values_share_slot() {
        let first = single_part("TestIntent1", SetParameter::new("Test", true, values("Six")));
        let second = single_part("TestIntent2", SetParameter::new("Test", true, values("Six")));

        let grammar = GrammarCompiler::new().compile([&first, &second]).unwrap();

        assert_eq!(grammar.slots.len(), 1);
        assert_eq!(
            grammar.sentences,
            "[TestIntent1]\n$Test{Test}\n\n[TestIntent2]\n$Test{Test}"
        );
    }

    #[test]
    fn test_different_values_get_renamed_slot() {
        let first = single_part("TestIntent1", SetParameter::new("Test", true, values("Six")));
        let second = single_part("TestIntent2", SetParameter::new("Test", true, values("Seven")));

        let grammar = GrammarCompiler::new().compile([&first, &second]).unwrap();

        assert_eq!(
            grammar.slots.to_json().unwrap(),
            r#"{"Test":["One","Two","Three","Four","Five","Six"],"TestIntent2_Test":["One","Two","Three","Four","Five","Seven"]}"#
        );
        assert_eq!(
            grammar.sentences,
            "[TestIntent1]\n$Test{Test}\n\n[TestIntent2]\n$TestIntent2_Test{Test}"
        );
    }

    #[test]
    fn test_nested_slot_collision_is_an_error() {
        let first = single_part("TestIntent", SetParameter::new("Test", true, values("Six")));
        let occupant = single_part("Other", SetParameter::new("Other_Test", true, values("Seven")));
        let colliding = single_part("Other", SetParameter::new("Test", true, values("Eight")));

        let result = GrammarCompiler::new().compile([&first, &occupant, &colliding]);

        assert_eq!(
            result,
            Err(GrammarError::SlotCollision {
                slot: "Other_Test".to_string(),
                intent: "Other".to_string(),
            })
        );
    }

    #[test]
    fn test_number_range() {
        let definition = single_part("TestIntent", NumberRangeParameter::new("Test", true, -5, 31));

        let grammar = GrammarCompiler::new().compile([&definition]).unwrap();

        assert_eq!(grammar.sentences, "[TestIntent]\n(-5..31){Test!int}");
    }

    #[test]
    fn test_optional_wrap_follows_return_suffix() {
        let definition = IntentDefinition::new("TestIntent").with_sentence(
            Sentence::builder()
                .optional_text("please")
                .part(SetParameter::new("Test", true, values("Six")).optional())
                .part(NumberRangeParameter::new("Amount", true, 1, 10).optional())
                .build(),
        );

        let grammar = GrammarCompiler::new().compile([&definition]).unwrap();

        assert_eq!(
            grammar.sentences,
            "[TestIntent]\n[please] [$Test{Test}] [(1..10){Amount!int}]"
        );
    }

    #[test]
    fn test_substitute_literal() {
        let definition = IntentDefinition::new("TestIntent").with_sentence(
            Sentence::builder()
                .text("Switch")
                .part(Literal::new("lamp").substitute())
                .build(),
        );

        let grammar = GrammarCompiler::new().compile([&definition]).unwrap();

        assert_eq!(grammar.sentences, "[TestIntent]\nSwitch lamp:");
    }

    #[test]
    fn test_variables_precede_sentences() {
        let device = Variable::new("device")
            .with_sentence(Sentence::literal("lights"))
            .with_sentence(Sentence::literal("lamp"));
        let definition = IntentDefinition::new("Switch")
            .with_variable(device)
            .with_sentence(
                Sentence::builder()
                    .text("Turn on the")
                    .part(VariableParameter::new("device", true))
                    .build(),
            )
            .with_sentence(
                Sentence::builder()
                    .text("Switch on the")
                    .part(VariableParameter::new("device", false))
                    .build(),
            );

        let grammar = GrammarCompiler::new().compile([&definition]).unwrap();

        assert_eq!(
            grammar.sentences,
            "[Switch]\ndevice = (lights|lamp)\n\nTurn on the <device> {device}\nSwitch on the <device>"
        );
    }

    #[test]
    fn test_single_branch_variable_has_no_parentheses() {
        let definition = IntentDefinition::new("Greet")
            .with_variable(Variable::new("greeting").with_sentence(Sentence::literal("hello there")))
            .with_sentence(
                Sentence::builder()
                    .part(VariableParameter::new("greeting", false))
                    .build(),
            );

        let grammar = GrammarCompiler::new().compile([&definition]).unwrap();

        assert_eq!(
            grammar.sentences,
            "[Greet]\ngreeting = hello there\n\n<greeting>"
        );
    }

    #[test]
    fn test_slot_inside_variable_branch() {
        let room = Variable::new("room").with_sentence(
            Sentence::builder()
                .text("in the")
                .part(SetParameter::new("Room", true, values("Attic")))
                .build(),
        );
        let definition = IntentDefinition::new("DimRoom")
            .with_variable(room)
            .with_sentence(
                Sentence::builder()
                    .text("Dim the lights")
                    .part(VariableParameter::new("room", false))
                    .build(),
            );

        let grammar = GrammarCompiler::new().compile([&definition]).unwrap();

        assert_eq!(
            grammar.sentences,
            "[DimRoom]\nroom = in the $Room{Room}\n\nDim the lights <room>"
        );
        assert_eq!(grammar.slots.names().collect::<Vec<_>>(), vec!["Room"]);
    }

    #[test]
    fn test_multiple_sentences_and_definitions() {
        let time = IntentDefinition::new("GetTime")
            .with_sentence(Sentence::literal("What time is it"))
            .with_sentence(Sentence::literal("Tell me the time"));
        let timer = IntentDefinition::new("SetTimer").with_sentence(
            Sentence::builder()
                .text("Set a timer for")
                .part(NumberRangeParameter::new("Amount", true, 0, 60))
                .part(SetParameter::new("TimeUnit", true, ["seconds", "minutes"]))
                .optional_text("from now")
                .build(),
        );

        let grammar = GrammarCompiler::new().compile([&time, &timer]).unwrap();

        assert_eq!(
            grammar.sentences,
            "[GetTime]\nWhat time is it\nTell me the time\n\n\
             [SetTimer]\nSet a timer for (0..60){Amount!int} (seconds | minutes){TimeUnit} [from now]"
        );
    }
}
