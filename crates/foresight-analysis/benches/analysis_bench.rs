use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};

use foresight_analysis::{RiskClassifier, SensitivityAnalyzer};
use foresight_core::config::SensitivityConfig;
use foresight_core::models::DecisionModel;
use foresight_formula::FormulaValidator;
use foresight_simulation::MonteCarloEngine;

fn bench_sensitivity_rank(c: &mut Criterion) {
    let model: DecisionModel = test_fixtures::load_model("dominant");
    let analyzer = SensitivityAnalyzer::new(
        Arc::new(MonteCarloEngine::default()),
        SensitivityConfig {
            iterations: 1000,
            parallel_deferred: false,
        },
        FormulaValidator::default(),
    )
    .with_seed(Some(42));

    c.bench_function("sensitivity_rank_5_variables", |b| {
        b.iter(|| analyzer.rank(&model, "launch").unwrap())
    });
}

fn bench_classify_10k(c: &mut Criterion) {
    let outcomes: Vec<f64> = (0..10_000).map(|i| (i % 200) as f64 - 60.0).collect();
    let classifier = RiskClassifier::default();
    c.bench_function("classify_10k", |b| b.iter(|| classifier.classify(&outcomes)));
}

criterion_group!(benches, bench_sensitivity_rank, bench_classify_10k);
criterion_main!(benches);
