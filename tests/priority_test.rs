use std::collections::HashSet;

use fuzzy_priority::scenario::{PriorityLevel, ScenarioBatch, ScenarioConfig};
use fuzzy_priority::{
    build_rules, configure_variables, infer, severity_heuristic, DefuzzificationOp, Error, Inputs, LinguisticVariable,
    MamdaniInference, PrioritySystem,
};

#[test]
fn rule_base_covers_every_combination() {
    let vars = configure_variables();
    let rules = build_rules(&vars, severity_heuristic).unwrap();
    let triples: HashSet<_> = rules
        .iter()
        .map(|r| {
            let l = r.labels(&vars).unwrap();
            (l.damage, l.accessibility, l.population)
        })
        .collect();

    assert_eq!(rules.len(), 27);
    assert_eq!(triples.len(), 27);

    for d in ["low", "medium", "high"] {
        for a in ["poor", "moderate", "good"] {
            for p in ["low", "medium", "high"] {
                assert!(triples.contains(&(d, a, p)), "missing ({d}, {a}, {p})");
            }
        }
    }
}

#[test]
fn boundary_scenarios() {
    let system = PrioritySystem::standard().unwrap();

    let calm = system.evaluate(Inputs::new(0., 0., 0.)).unwrap();
    assert_eq!(calm.dominant_term(), Some("low"));
    assert!(calm.score() < 30.);

    let worst = system.evaluate(Inputs::new(10., 10., 10.)).unwrap();
    assert_eq!(worst.dominant_term(), Some("very_high"));
    assert!(worst.score() > 80.);

    let middle = system.evaluate(Inputs::new(5., 5., 5.)).unwrap();
    assert_eq!(middle.dominant_term(), Some("medium_high"));
    assert!((40. ..=80.).contains(&middle.score()));
}

#[test]
fn reference_scores() {
    let system = PrioritySystem::standard().unwrap();
    let cases = [
        ((0., 0., 0.), 9.67, PriorityLevel::Low),
        ((10., 10., 10.), 93.67, PriorityLevel::VeryHigh),
        ((5., 5., 5.), 60.0, PriorityLevel::High),
        ((3.5, 5., 10.), 68.07, PriorityLevel::High),
        ((1.2, 7.7, 3.4), 47.82, PriorityLevel::MedHigh),
    ];

    for ((d, a, p), expected, level) in cases {
        let score = infer(&system, d, a, p).unwrap();

        assert!((score - expected).abs() < 0.005, "({d}, {a}, {p}) scored {score}, expected {expected}");
        assert_eq!(PriorityLevel::from_score(score), level);
    }
}

#[test]
fn every_defuzzifier_stays_in_the_universe() {
    for op in DefuzzificationOp::ALL {
        let system = PrioritySystem::standard()
            .unwrap()
            .with_engine(MamdaniInference::default().with_defuzzification(op));

        for d in 0..=10 {
            for p in 0..=10 {
                let score = infer(&system, f64::from(d), 3.3, f64::from(p)).unwrap();
                assert!((0. ..=100.).contains(&score), "{op} scored {score}");
            }
        }
    }
}

#[test]
fn terms_with_a_gap_surface_an_error() {
    let mut vars = configure_variables();
    vars.accessibility = LinguisticVariable::new("accessibility", 0. ..=10., 1.)
        .and_then(|v| v.with_term("poor", [0., 0., 3.]))
        .and_then(|v| v.with_term("good", [7., 10., 10.]))
        .unwrap();
    let system = PrioritySystem::from_variables(vars).unwrap();

    match infer(&system, 5., 5., 5.) {
        Err(Error::Defuzzification { inputs }) => assert_eq!(inputs, Inputs::new(5., 5., 5.)),
        other => panic!("expected a defuzzification error, got {other:?}"),
    }
}

#[test]
fn custom_model_from_json() {
    let json = serde_json::to_string(&configure_variables()).unwrap();
    let json = json.replace("[80.0,100.0,100.0]", "[85.0,100.0,100.0]");
    let vars = fuzzy_priority::Variables::from_json(&json).unwrap();
    let system = PrioritySystem::from_variables(vars).unwrap();

    let standard = infer(&PrioritySystem::standard().unwrap(), 10., 10., 10.).unwrap();
    let narrowed = infer(&system, 10., 10., 10.).unwrap();

    assert!(narrowed > standard);
}

#[test]
fn seeded_batch_is_stable() {
    let system = PrioritySystem::standard().unwrap();
    let config = ScenarioConfig::default();
    let a = ScenarioBatch::run(&system, &config).unwrap();
    let b = ScenarioBatch::run(&system, &config).unwrap();

    assert_eq!(a.records, b.records);
    assert_eq!(a.fallbacks, 0);

    let summary = a.summary().unwrap();
    assert_eq!(summary.score.count, 100);
    assert_eq!(summary.levels.iter().map(|(_, n)| n).sum::<usize>(), 100);
    assert!(summary.score.min >= 0. && summary.score.max <= 100.);
}

#[test]
fn different_seeds_draw_different_scenarios() {
    let system = PrioritySystem::standard().unwrap();
    let a = ScenarioBatch::run(&system, &ScenarioConfig::default().with_seed(1)).unwrap();
    let b = ScenarioBatch::run(&system, &ScenarioConfig::default().with_seed(2)).unwrap();

    assert_ne!(a.records, b.records);
}
