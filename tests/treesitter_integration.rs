//! Selection analysis over trees produced by the tree-sitter front end.

use ast_selection::analysis::{analyze, render, SelectionRange, StatTriple};
use ast_selection::ts::{Language, SourceParser, GAP_KIND};

const JAVA: &str = r#"class A {
    int f;
    void m() {
        int x = f;
        throw new RuntimeException();
    }
}
"#;

fn java_tree() -> ast_selection::SyntaxTree {
    SourceParser::new(Language::Java)
        .unwrap()
        .parse(JAVA)
        .unwrap()
}

#[test]
fn selection_inside_a_declaration() {
    let tree = java_tree();
    // From just inside "int" to just before the ';' of "int x = f;".
    let start = JAVA.find("int x").unwrap() + 1;
    let end = JAVA.find("f;\n        throw").unwrap() + 1;

    let analysis = analyze(&tree, SelectionRange::new(start, end)).unwrap();
    assert_eq!(tree.kind(analysis.lca), "local_variable_declaration");
    let kinds: Vec<_> = analysis.run.iter().map(|&id| tree.kind(id)).collect();
    assert_eq!(kinds, ["integral_type", GAP_KIND, "variable_declarator", ";"]);
    assert_eq!(analysis.stats, StatTriple::new(0, 1, 0));
}

#[test]
fn selecting_statements_from_their_first_character() {
    let tree = java_tree();
    let start = JAVA.find("int x").unwrap();
    let end = JAVA.find("();").unwrap() + "();".len();

    let analysis = analyze(&tree, SelectionRange::new(start, end)).unwrap();
    // The character before "int" is indentation, a gap leaf beside the
    // declaration, so the run starts there instead of at the whole block.
    assert_eq!(tree.kind(analysis.lca), "block");
    let kinds: Vec<_> = analysis.run.iter().map(|&id| tree.kind(id)).collect();
    assert_eq!(
        kinds,
        [GAP_KIND, "local_variable_declaration", GAP_KIND, "throw_statement"]
    );
    assert_eq!(analysis.stats, StatTriple::new(1, 1, 1));
}

#[test]
fn selecting_one_statement_among_several() {
    let source = "class A { void m() { int a = 1; int b = 2; int c = 3; throw e; } }";
    let tree = SourceParser::new(Language::Java)
        .unwrap()
        .parse(source)
        .unwrap();
    let start = source.find("int b").unwrap();
    let end = start + "int b = 2;".len();

    let analysis = analyze(&tree, SelectionRange::new(start, end)).unwrap();
    assert_eq!(tree.kind(analysis.lca), "block");
    let kinds: Vec<_> = analysis.run.iter().map(|&id| tree.kind(id)).collect();
    assert_eq!(kinds, [GAP_KIND, "local_variable_declaration"]);
    assert_eq!(tree.text(analysis.run[1]), "int b = 2;");
    assert_eq!(analysis.stats, StatTriple::new(1, 0, 0));
}

#[test]
fn whole_file_selection_covers_the_class() {
    let tree = java_tree();
    let analysis = analyze(&tree, SelectionRange::new(0, JAVA.len())).unwrap();
    assert_eq!(tree.kind(analysis.lca), "class_declaration");
    assert_eq!(analysis.stats, StatTriple::new(2, 1, 1));
    let report = analysis.report(&tree);
    assert!(report.contains("int f; : field_declaration\n"));
}

#[test]
fn dump_includes_nested_nodes() {
    let tree = java_tree();
    let dump = render(&tree, tree.roots(), 0);
    assert!(dump.starts_with(&format!("{JAVA} : program\n")));
    assert!(dump.contains("        class : class\n"));
    assert!(dump.contains(" f : identifier\n"));
}

#[test]
fn rust_source_counts_lets_and_question_marks() {
    let source = "fn f() -> Result<(), E> {\n    let v = g()?;\n    Ok(v)\n}\n";
    let tree = SourceParser::new(Language::Rust)
        .unwrap()
        .parse(source)
        .unwrap();
    let analysis = analyze(&tree, SelectionRange::new(0, source.len())).unwrap();
    assert_eq!(tree.kind(analysis.lca), "function_item");
    assert_eq!(analysis.stats.declarations, 1);
    assert_eq!(analysis.stats.exceptions, 1);
    assert!(analysis.stats.references >= 2);
}
