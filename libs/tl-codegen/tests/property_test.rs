//! Property-based tests using QuickCheck

use quickcheck::{QuickCheck, TestResult};
use tl2swift_codegen::generators::swift::SwiftGenerator;
use tl2swift_codegen::source::{Source, INDENT_WIDTH};
use tl2swift_codegen::CodeGenerator;

fn single_line(items: Vec<String>) -> Vec<String> {
    items.into_iter().map(|s| s.replace(['\n', '\r'], " ")).collect()
}

/// Property: indenting a concatenation equals concatenating indented parts
#[test]
fn prop_indent_distributes_over_append() {
    fn prop(a: Vec<String>, b: Vec<String>, depth: u8) -> TestResult {
        let a: Source = single_line(a).into_iter().collect();
        let b: Source = single_line(b).into_iter().collect();

        let mut whole = a.clone().append(b.clone());
        let mut parts = (a, b);
        for _ in 0..depth % 4 {
            whole = whole.indent();
            parts = (parts.0.indent(), parts.1.indent());
        }

        TestResult::from_bool(whole == parts.0.append(parts.1))
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(Vec<String>, Vec<String>, u8) -> TestResult);
}

/// Property: indentation only prefixes non-empty rendered lines
#[test]
fn prop_indent_prefixes_rendered_lines() {
    fn prop(lines: Vec<String>) -> TestResult {
        let source: Source = single_line(lines).into_iter().collect();
        let plain = source.render();
        let indented = source.indent().render();

        let prefix = " ".repeat(INDENT_WIDTH);
        let ok = plain
            .split('\n')
            .zip(indented.split('\n'))
            .all(|(p, i)| if p.is_empty() { i.is_empty() } else { i == format!("{prefix}{p}") });

        TestResult::from_bool(ok && plain.split('\n').count() == indented.split('\n').count())
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(Vec<String>) -> TestResult);
}

/// Schema with one function per entry, `n` int32 parameters each
fn schema_with_functions(param_counts: &[u8]) -> String {
    let mut text = String::from("ok = Ok;\n---functions---\n");
    for (i, count) in param_counts.iter().enumerate() {
        let params: Vec<String> = (0..count % 6).map(|p| format!("p{p}:int32")).collect();
        text.push_str(&format!("method{i} {} = Ok;\n", params.join(" ")));
    }
    text
}

/// Property: generation is deterministic and methods keep declaration order
#[test]
fn prop_generation_deterministic_and_ordered() {
    fn prop(param_counts: Vec<u8>) -> TestResult {
        if param_counts.len() > 30 {
            return TestResult::discard();
        }
        let text = schema_with_functions(&param_counts);
        let codegen = CodeGenerator::from_schema_text(&text).unwrap();
        let first = codegen.generate(SwiftGenerator::new_default()).unwrap().files;
        let second = codegen.generate(SwiftGenerator::new_default()).unwrap().files;

        let api = &first["TdApi.swift"];
        let positions: Vec<usize> = (0..param_counts.len())
            .map(|i| api.find(&format!("public func method{i}(")).unwrap())
            .collect();

        TestResult::from_bool(first == second && positions.windows(2).all(|w| w[0] < w[1]))
    }

    QuickCheck::new()
        .tests(50)
        .quickcheck(prop as fn(Vec<u8>) -> TestResult);
}
