// tests/rewriting.rs
use pretty_assertions::assert_eq;
use symbios_meristem::{Error, Preset, Rewrite, RuleSet, SymbolString, expand};

fn plant_rules() -> RuleSet {
    RuleSet::from_rules([('X', "F-[[X]+X]+F[+FX]-X"), ('F', "FF")]).unwrap()
}

#[test]
fn test_zero_generations_returns_axiom() {
    let axiom = SymbolString::from("X+F[G]");
    for rules in [RuleSet::identity(), plant_rules(), Preset::Dragon.grammar().rules] {
        assert_eq!(expand(&axiom, &rules, 0), axiom);
    }
}

#[test]
fn test_plant_first_generation() {
    let result = expand(&SymbolString::from("X"), &plant_rules(), 1);
    assert_eq!(result.as_str(), "F-[[X]+X]+F[+FX]-X");
}

#[test]
fn test_plant_second_generation() {
    let result = expand(&SymbolString::from("X"), &plant_rules(), 2);
    let x = "F-[[X]+X]+F[+FX]-X";
    let expected = format!("FF-[[{x}]+{x}]+FF[+FF{x}]-{x}");
    assert_eq!(result.as_str(), expected);
}

#[test]
fn test_expand_is_compositional() {
    let rules = plant_rules();
    let axiom = SymbolString::from("X");
    for a in 0..=3 {
        for b in 0..=3 {
            let direct = expand(&axiom, &rules, a + b);
            let staged = expand(&expand(&axiom, &rules, a), &rules, b);
            assert_eq!(direct, staged, "a = {a}, b = {b}");
        }
    }
}

#[test]
fn test_symbols_without_rules_pass_through() {
    let rules = RuleSet::from_rules([('A', "AB")]).unwrap();
    let result = expand(&SymbolString::from("AxC"), &rules, 2);
    assert_eq!(result.as_str(), "ABBxC");
}

#[test]
fn test_expansion_is_deterministic() {
    let rules = Preset::Sierpinski.grammar().rules;
    let axiom = SymbolString::from("XF");
    assert_eq!(expand(&axiom, &rules, 5), expand(&axiom, &rules, 5));
}

#[test]
fn test_expanded_len_predicts_actual_length() {
    for preset in [Preset::Plant, Preset::Koch, Preset::Sierpinski, Preset::Dragon] {
        let grammar = preset.grammar();
        for generations in 0..=5 {
            let actual = grammar.expand(generations).len();
            let predicted = grammar.rules.expanded_len(&grammar.axiom, generations);
            assert_eq!(predicted, Some(actual), "{preset:?} at {generations}");
        }
    }
}

#[test]
fn test_expanded_len_reports_overflow() {
    let rules = RuleSet::from_rules([('F', "FFFFFFFFFF")]).unwrap();
    assert_eq!(rules.expanded_len(&SymbolString::from("F"), 100), None);
    assert_eq!(
        rules.expanded_len(&SymbolString::from("F"), 3),
        Some(1000)
    );
}

#[test]
fn test_empty_replacement_is_rejected() {
    let err = RuleSet::from_rules([('X', "F"), ('F', "")]).unwrap_err();
    assert!(matches!(err, Error::InvalidConfiguration(_)), "{err}");
}

#[test]
fn test_duplicate_rule_is_rejected() {
    let err = RuleSet::from_rules([('F', "FF"), ('F', "F+F")]).unwrap_err();
    assert!(matches!(err, Error::InvalidConfiguration(_)), "{err}");
}

#[test]
fn test_rule_lookup() {
    let rules = plant_rules();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules.rule('F').map(SymbolString::as_str), Some("FF"));
    assert_eq!(rules.rule('+'), None);
}

#[test]
fn test_closures_are_rewriters() {
    let reverse = |s: &SymbolString| -> SymbolString { s.symbols().rev().collect() };
    let axiom = SymbolString::from("F+G");
    assert_eq!(expand(&axiom, &reverse, 1).as_str(), "G+F");
    assert_eq!(expand(&axiom, &reverse, 2), axiom);
}

#[test]
fn test_grammar_is_a_rewriter() {
    let grammar = Preset::Koch.grammar();
    let once = grammar.apply(&grammar.axiom);
    assert_eq!(once.as_str(), "F+F-F-F+F");
    assert_eq!(grammar.expand(1), once);
}

#[test]
fn test_rule_set_from_json() {
    let rules: RuleSet = serde_json::from_str(r#"{"X": "F[+X]-X", "F": "FF"}"#).unwrap();
    assert_eq!(rules.rule('X').map(SymbolString::as_str), Some("F[+X]-X"));

    let json = serde_json::to_string(&rules).unwrap();
    let back: RuleSet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, rules);
}

#[test]
fn test_rule_set_json_rejects_bad_keys_and_empty_replacements() {
    assert!(serde_json::from_str::<RuleSet>(r#"{"XY": "F"}"#).is_err());
    assert!(serde_json::from_str::<RuleSet>(r#"{"": "F"}"#).is_err());
    assert!(serde_json::from_str::<RuleSet>(r#"{"X": ""}"#).is_err());
}

#[test]
fn test_expanded_len_ignores_unreachable_rules() {
    // `Z` doubles every generation but the axiom never produces it.
    let rules = RuleSet::from_rules([('F', "F+"), ('Z', "ZZ")]).unwrap();
    let axiom = SymbolString::from("F");

    let actual = expand(&axiom, &rules, 70).len();
    assert_eq!(actual, 71);
    assert_eq!(rules.expanded_len(&axiom, 70), Some(actual));
}

#[test]
fn test_symbol_string_building() {
    let mut symbols = SymbolString::new();
    assert!(symbols.is_empty());
    symbols.push('F');
    symbols.push_str(&SymbolString::from("[+F]"));
    assert_eq!(symbols.as_str(), "F[+F]");
    assert_eq!(symbols.len(), 5);
}

#[test]
fn test_rule_set_iterates_in_symbol_order() {
    assert!(RuleSet::identity().is_empty());
    let rules = plant_rules();
    let pairs: Vec<_> = rules
        .iter()
        .map(|(symbol, replacement)| (symbol, replacement.as_str()))
        .collect();
    assert_eq!(pairs, vec![('F', "FF"), ('X', "F-[[X]+X]+F[+FX]-X")]);
}
