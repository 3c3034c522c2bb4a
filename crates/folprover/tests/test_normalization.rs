//! Normalization of parsed formulas down to clauses

use folprover::parser::{move_negation_inward, remove_implication, to_cnf};
use folprover::{clausify, normalize, parse_formula, ClauseIds, ClauseRole, SymbolGenerator};

fn normalized(input: &str) -> String {
    let mut symbols = SymbolGenerator::new();
    let mut nf = normalize(parse_formula(input).unwrap(), &mut symbols);
    nf.skolemize(&mut symbols);
    nf.to_string()
}

#[test]
fn test_de_morgan_over_conjunction() {
    assert_eq!(normalized("~(pP1(vx) and pP2(vx))"), "~pP1(vx) or ~pP2(vx)");
}

#[test]
fn test_disjunction_is_a_single_clause() {
    let input = "pP1(vx) or pP2(vx) or pP3(vx)";
    assert_eq!(normalized(input), input);

    let mut symbols = SymbolGenerator::new();
    let mut ids = ClauseIds::new();
    let clauses = clausify(parse_formula(input).unwrap(), ClauseRole::Axiom, &mut symbols, &mut ids).unwrap();
    assert_eq!(clauses.len(), 1);
    assert_eq!(clauses[0].len(), 3);
    assert_eq!(clauses[0].to_string(), input);
}

#[test]
fn test_stages_compose() {
    let f = parse_formula("~(pA -> pB and pC)").unwrap();
    let f = remove_implication(f);
    assert_eq!(f.to_string(), "~(~pA or pB and pC)");
    let f = move_negation_inward(f);
    assert_eq!(f.to_string(), "pA and (~pB or ~pC)");
    let f = to_cnf(f);
    assert!(f.is_cnf());
}

#[test]
fn test_skolem_function_over_preceding_universals() {
    assert_eq!(normalized("@ vx . ? vy . pParent(vy, vx)"), "@ vx . pParent(fsk1(vx), vx)");
}

#[test]
fn test_distribution_produces_clauses() {
    let mut symbols = SymbolGenerator::new();
    let mut ids = ClauseIds::new();
    let clauses = clausify(
        parse_formula("pA or (pB and pC)").unwrap(),
        ClauseRole::Axiom,
        &mut symbols,
        &mut ids,
    )
    .unwrap();
    let text: Vec<String> = clauses.iter().map(|c| c.to_string()).collect();
    assert_eq!(text, vec!["pA or pB", "pA or pC"]);
    assert_eq!(ids.issued(), 2);
}
