use pretty_assertions::assert_eq;
use tipmap::config::RenameOptions;
use tipmap::model::{NameIndex, Tree};
use tipmap::rename::{MappingTable, RenameError, apply};
use tipmap::{parse_newick_str, rename_tips};

const STRICT: RenameOptions = RenameOptions { strict: true };

fn table(pairs: &[(&str, &str)]) -> MappingTable {
    pairs.iter().copied().collect()
}

fn tip_names(tree: &Tree) -> Vec<&str> {
    tree.pre_order_iter()
        .filter(|n| n.is_tip())
        .map(|n| n.name())
        .collect()
}

// --- TESTS RENAMING ---
#[test]
fn test_rename_end_to_end() {
    let mut tree = parse_newick_str("(A:1,B:2,(C:3,D:4):5);").unwrap();

    let report = rename_tips(&mut tree, &table(&[("A", "A1"), ("C", "C1")])).unwrap();

    assert_eq!(report.renamed, 2);
    assert_eq!(report.num_tips, 4);
    assert_eq!(tree.to_newick(), "(A1:1,B:2,(C1:3,D:4):5);");
}

#[test]
fn test_unmapped_tips_keep_names() {
    let mut tree = parse_newick_str("(Kea,Kaka,(Kakapo,Kakariki)Parrots);").unwrap();

    rename_tips(&mut tree, &table(&[("Kaka", "Nestor meridionalis")])).unwrap();

    assert_eq!(
        tip_names(&tree),
        vec!["Kea", "Nestor meridionalis", "Kakapo", "Kakariki"]
    );
    // Internal names are untouched
    assert!(tree.nodes().iter().any(|n| n.name() == "Parrots"));
}

#[test]
fn test_internal_name_does_not_resolve() {
    let mut tree = parse_newick_str("(A,B,(C,D)X);").unwrap();
    let before = tree.to_newick();

    let err = rename_tips(&mut tree, &table(&[("X", "Y")])).unwrap_err();

    assert!(matches!(err, RenameError::UnknownTip { ref name } if name == "X"));
    assert_eq!(tree.to_newick(), before);
}

#[test]
fn test_unknown_key_leaves_tree_unchanged() {
    let mut tree = parse_newick_str("(A:1,B:2,(C:3,D:4):5);").unwrap();

    // A resolves, Z does not; A must not be renamed either
    let err = rename_tips(&mut tree, &table(&[("A", "A1"), ("Z", "Z1")])).unwrap_err();

    assert_eq!(err.to_string(), "the node Z does not exist in the tree");
    assert_eq!(tree.to_newick(), "(A:1,B:2,(C:3,D:4):5);");
    assert!(tree.is_reconciled());
}

#[test]
fn test_renames_do_not_chain() {
    let mut tree = parse_newick_str("(A,B,C);").unwrap();

    rename_tips(&mut tree, &table(&[("A", "B"), ("B", "C")])).unwrap();

    // Old A becomes B, old B becomes C, old C stays C
    assert_eq!(tip_names(&tree), vec!["B", "C", "C"]);
}

#[test]
fn test_duplicate_tip_names_last_wins() {
    let mut tree = parse_newick_str("((Weka,Takahe),Weka);").unwrap();
    assert_eq!(NameIndex::build(&tree).duplicates(), &["Weka".to_string()]);

    rename_tips(&mut tree, &table(&[("Weka", "Gallirallus")])).unwrap();

    // Arena order is pre-order, so the rightmost Weka is renamed
    assert_eq!(tip_names(&tree), vec!["Weka", "Takahe", "Gallirallus"]);
}

#[test]
fn test_empty_table_still_reconciles() {
    let mut tree = parse_newick_str("(A,(B,C));").unwrap();

    let report = rename_tips(&mut tree, &MappingTable::new()).unwrap();

    assert_eq!(report.renamed, 0);
    assert!(tree.caches_consistent());
}

// --- TESTS RECONCILIATION ---
#[test]
fn test_caches_consistent_after_rename() {
    let mut tree = parse_newick_str("((A,B),(C,(D,E)),F);").unwrap();

    rename_tips(&mut tree, &table(&[("A", "a"), ("E", "e"), ("F", "f")])).unwrap();

    assert!(tree.caches_consistent());
    let tip_index = tree.tip_index();
    assert_eq!(tip_index.len(), 6);
    assert_eq!(tip_index.position_of("a"), Some(0));
    assert_eq!(tip_index.position_of("e"), Some(4));
    assert_eq!(tip_index.position_of("A"), None);
    for edge in tree.edges() {
        assert_eq!(edge.bitset().unwrap().len(), 6);
    }
}

#[test]
fn test_bipartitions_survive_rename() {
    let mut tree = parse_newick_str("(A:1,B:2,(C:3,D:4):5);").unwrap();
    let before: Vec<String> = tree
        .edges()
        .iter()
        .map(|e| e.bitset().unwrap().to_string())
        .collect();

    rename_tips(&mut tree, &table(&[("A", "A1"), ("C", "C1")])).unwrap();

    let after: Vec<String> = tree
        .edges()
        .iter()
        .map(|e| e.bitset().unwrap().to_string())
        .collect();
    assert_eq!(after, before);
    assert_eq!(tree.tip_index().name_at(2), Some("C1"));
}

#[test]
fn test_rename_of_unreconciled_tree_without_root_fails() {
    let mut tree = Tree::new();
    let a = tree.add_node("A");
    let b = tree.add_node("B");
    tree.connect(a, b, None);

    let err = rename_tips(&mut tree, &table(&[("B", "B1")])).unwrap_err();

    assert!(matches!(err, RenameError::Reconciliation(_)));
    assert!(!tree.is_reconciled());
}

// --- TESTS STRICT MODE ---
#[test]
fn test_strict_rejects_duplicate_tips() {
    let mut tree = parse_newick_str("((Weka,Takahe),Weka);").unwrap();

    let err = apply(&mut tree, &table(&[("Takahe", "T")]), &STRICT).unwrap_err();

    assert!(matches!(err, RenameError::DuplicateTipName { ref name } if name == "Weka"));
    assert_eq!(tip_names(&tree), vec!["Weka", "Takahe", "Weka"]);
}

#[test]
fn test_strict_rejects_collisions() {
    let mut tree = parse_newick_str("(A,B,C);").unwrap();

    let err = apply(&mut tree, &table(&[("A", "X"), ("B", "X")]), &STRICT).unwrap_err();

    assert_eq!(err.to_string(), "renaming A and B would both yield tip name X");
    assert_eq!(tip_names(&tree), vec!["A", "B", "C"]);
}

#[test]
fn test_strict_allows_swaps() {
    let mut tree = parse_newick_str("(A,B,C);").unwrap();

    apply(&mut tree, &table(&[("A", "B"), ("B", "A")]), &STRICT).unwrap();

    assert_eq!(tip_names(&tree), vec!["B", "A", "C"]);
}

#[test]
fn test_default_allows_collisions() {
    let mut tree = parse_newick_str("(A,B,C);").unwrap();

    apply(&mut tree, &table(&[("A", "X"), ("B", "X")]), &RenameOptions::default()).unwrap();

    assert_eq!(tip_names(&tree), vec!["X", "X", "C"]);
    assert!(tree.caches_consistent());
}
