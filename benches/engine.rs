//! Benchmarks for the scoring engine and the batch scoring pipeline.
//!
//! Run with: cargo bench
//! Run specific benchmark: cargo bench -- traversal

use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tempfile::TempDir;

use cxlens::analyzers::complexity::{Analyzer as ScoreAnalyzer, MetricSource};
use cxlens::config::Config;
use cxlens::core::{AnalysisContext, Analyzer, FileSet};
use cxlens::engine::{self, Policy, Traversal};
use cxlens::external::ProcessRunner;
use cxlens::tree::{JavaTreeProvider, TreeProvider};

/// A generated-looking JUnit class with `methods` test methods.
fn sample_test_class(methods: usize) -> String {
    let mut source = String::from(
        "import org.junit.jupiter.api.Test;\nimport static org.junit.jupiter.api.Assertions.*;\n\nclass SampleTest {\n",
    );
    for i in 0..methods {
        source.push_str(&format!(
            r#"
    @Test
    void test{i}() {{
        int total = 0;
        for (int j = 0; j < {i}; j++) {{
            if (j % 2 == 0 && j > 1) {{
                total += j;
            }} else {{
                total -= 1;
            }}
        }}
        try {{
            assertEquals({i}, total);
        }} catch (AssertionError e) {{
            fail();
        }}
    }}
"#
        ));
    }
    source.push_str("}\n");
    source
}

fn nested_ifs(depth: usize) -> String {
    let mut source = String::from("class Deep { void f() {");
    for _ in 0..depth {
        source.push_str("if (x) {");
    }
    for _ in 0..depth {
        source.push('}');
    }
    source.push_str("} }");
    source
}

fn bench_policies(c: &mut Criterion) {
    let provider = JavaTreeProvider::new().expect("java grammar");
    let source = sample_test_class(50);
    let tree = provider
        .parse(&source, Path::new("SampleTest.java"))
        .expect("parse");

    let mut group = c.benchmark_group("policies");
    group.throughput(Throughput::Bytes(source.len() as u64));
    for policy in [Policy::structural(), Policy::test_aware(), Policy::cyclomatic()] {
        group.bench_function(policy.name().to_string(), |b| {
            b.iter(|| engine::score_tree(black_box(&tree), &policy, Traversal::Iterative))
        });
    }
    group.finish();
}

fn bench_traversal(c: &mut Criterion) {
    let provider = JavaTreeProvider::new().expect("java grammar");
    let policy = Policy::structural();

    let mut group = c.benchmark_group("traversal");
    for depth in [10usize, 100, 500] {
        let tree = provider
            .parse(&nested_ifs(depth), Path::new("Deep.java"))
            .expect("parse");
        for traversal in [Traversal::Recursive, Traversal::Iterative] {
            group.bench_with_input(
                BenchmarkId::new(format!("{traversal:?}"), depth),
                &tree,
                |b, tree| b.iter(|| engine::score_tree(black_box(tree), &policy, traversal)),
            );
        }
    }
    group.finish();
}

fn bench_score_pipeline(c: &mut Criterion) {
    let temp = TempDir::new().expect("temp dir");
    for model in ["gpt", "llama"] {
        let dir = temp.path().join("sf110").join(model).join("commons");
        std::fs::create_dir_all(&dir).expect("create dir");
        for i in 0..20 {
            std::fs::write(dir.join(format!("Sample{i}Test.java")), sample_test_class(10))
                .expect("write");
        }
    }

    let config = Config::default();
    let files = FileSet::from_path(temp.path(), &config).expect("file set");
    let provider = JavaTreeProvider::new().expect("java grammar");
    let analyzer = ScoreAnalyzer::new(MetricSource::DEFAULT.to_vec());

    c.bench_function("score_pipeline", |b| {
        b.iter(|| {
            let ctx = AnalysisContext::new(&files, &config, &provider, &ProcessRunner);
            black_box(analyzer.analyze(&ctx).expect("analyze"))
        })
    });
}

criterion_group!(benches, bench_policies, bench_traversal, bench_score_pipeline);
criterion_main!(benches);
