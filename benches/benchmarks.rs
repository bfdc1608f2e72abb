//! Performance benchmarks for mdx.
//!
//! This module contains benchmarks for:
//! - Markdown command parsing
//! - Dependency planning over deep and wide command graphs
//! - Argument template binding
//!
//! Run with: `cargo bench`

use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mdx::core::{bind_arguments, CodeBlock, CommandBlock, CommandRegistry, Executor, LauncherRegistry};
use mdx::markdown::parse_commands;

// ============================================================================
// Mock Data Fixtures
// ============================================================================

mod fixtures {
    use super::*;

    /// Generate a runbook with `num_commands` commands, each depending on the
    /// previous one.
    pub fn generate_runbook(num_commands: usize) -> String {
        let mut md = String::from("# Generated runbook\n\nSome prose.\n\n");
        for i in 0..num_commands {
            let deps = if i == 0 { String::new() } else { format!("cmd{}", i - 1) };
            md.push_str(&format!("## Step {i} [cmd{i}]({deps})\n\n"));
            md.push_str("Explains what the step does.\n\n");
            md.push_str(&format!("```sh\necho \"step {i}: {{{{.arg1}}}}\"\n```\n\n"));
            if i % 3 == 0 {
                md.push_str("```python\n#!/usr/bin/env python3\nprint('extra')\n```\n\n");
            }
        }
        md
    }

    /// A chain of `depth` commands, `cmd{depth-1}` depending on all below.
    pub fn chain_registry(depth: usize) -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        for i in 0..depth {
            let deps = if i == 0 { Vec::new() } else { vec![format!("cmd{}", i - 1)] };
            let cmd = CommandBlock::new(format!("cmd{i}"), deps, "bench.md")
                .with_code_block(CodeBlock::new("sh", "true"));
            registry.insert(cmd).expect("unique names");
        }
        registry
    }

    /// One root depending on `width` leaf commands.
    pub fn wide_registry(width: usize) -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        let leaves: Vec<String> = (0..width).map(|i| format!("leaf{i}")).collect();
        for leaf in &leaves {
            registry.insert(CommandBlock::new(leaf.clone(), Vec::new(), "bench.md")).expect("unique");
        }
        registry.insert(CommandBlock::new("root", leaves, "bench.md")).expect("unique");
        registry
    }
}

// ============================================================================
// Parser Benchmarks
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_commands");

    for size in [10, 100, 1000] {
        let md = fixtures::generate_runbook(size);
        group.throughput(Throughput::Bytes(md.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &md, |b, md| {
            let registry = CommandRegistry::new();
            b.iter(|| parse_commands(black_box(md), Path::new("bench.md"), &registry));
        });
    }

    group.finish();
}

// ============================================================================
// Planning Benchmarks
// ============================================================================

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    let launchers = LauncherRegistry::new();

    for depth in [10, 100, 500] {
        let registry = fixtures::chain_registry(depth);
        let top = format!("cmd{}", depth - 1);
        group.bench_with_input(BenchmarkId::new("chain", depth), &top, |b, top| {
            let executor = Executor::new(&registry, &launchers);
            b.iter(|| executor.plan(black_box(top)));
        });
    }

    for width in [10, 100, 1000] {
        let registry = fixtures::wide_registry(width);
        group.bench_with_input(BenchmarkId::new("wide", width), &width, |b, _| {
            let executor = Executor::new(&registry, &launchers);
            b.iter(|| executor.plan(black_box("root")));
        });
    }

    group.finish();
}

// ============================================================================
// Template Benchmarks
// ============================================================================

fn bench_bind(c: &mut Criterion) {
    let code = "deploy --env {{.arg1}} --tag {{ .arg2 }} --region {{.arg3}}\n".repeat(50);
    let args = vec!["prod".to_string(), "v1.2.3".to_string(), "eu-west-1".to_string()];

    c.bench_function("bind_arguments", |b| {
        b.iter(|| bind_arguments(black_box(&code), black_box(&args)));
    });
}

criterion_group!(benches, bench_parse, bench_plan, bench_bind);
criterion_main!(benches);
