use sporthlm::dedup::{clean_ttl_by_triples, collect_triples, TripleSet};
use std::collections::BTreeSet;
use std::fs;
use std::io::Cursor;
use std::path::Path;

fn blocks_of(text: &str) -> BTreeSet<String> {
    collect_triples(Cursor::new(text))
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect()
}

fn read_blocks(path: &Path) -> BTreeSet<String> {
    blocks_of(&fs::read_to_string(path).unwrap())
}

#[test]
fn duplicate_block_is_written_once() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.ttl");
    let output = dir.path().join("out.ttl");
    fs::write(
        &input,
        "\n:Sport_Judo a :Sport ;\n    rdfs:label \"Judo\"@fr .\n\
         \n:Sport_Judo a :Sport ;\n    rdfs:label \"Judo\"@fr .\n\
         \n:Sport_Tennis a :Sport ;\n    rdfs:label \"Tennis\"@fr .\n",
    )
    .unwrap();

    let report = clean_ttl_by_triples(&input, &output).unwrap();
    assert_eq!(report.unique_triples, 2);
    assert_eq!(report.duplicates_removed, 1);

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written.matches(":Sport_Judo a :Sport").count(), 1);
    assert_eq!(written.matches(":Sport_Tennis a :Sport").count(), 1);
    assert!(!written.starts_with('\n'));
}

#[test]
fn end_to_end_with_unterminated_tail() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.ttl");
    let output = dir.path().join("out.ttl");
    fs::write(&input, "A 1 .\nA 1 .\n\nB 2 .\nC 3").unwrap();

    let report = clean_ttl_by_triples(&input, &output).unwrap();
    assert_eq!(report.unique_triples, 3);

    let written = fs::read_to_string(&output).unwrap();
    let mut lines: Vec<&str> = written.lines().collect();
    lines.sort();
    assert_eq!(lines, vec!["A 1 .", "B 2 .", "C 3"]);
    assert!(written.ends_with('\n'));
}

#[test]
fn order_of_duplicates_does_not_change_membership() {
    let a = ":a :p :o .\n";
    let b = ":b :p\n    :o .\n";
    let c = ":c :p :o .\n";
    let orders = [
        format!("{a}{b}{a}{c}{b}"),
        format!("{b}{b}{c}{a}{a}"),
        format!("{c}{a}{b}{a}{b}{c}"),
    ];
    let expected = blocks_of(&orders[0]);
    assert_eq!(expected.len(), 3);
    for order in &orders[1..] {
        assert_eq!(blocks_of(order), expected);
    }
}

#[test]
fn identical_multiline_blocks_deduplicate() {
    let block = ":s a :C ;\n    :p 1 ;\n    :q 2 .\n";
    let set = collect_triples(Cursor::new(format!("{block}\n{block}"))).unwrap();
    assert_eq!(set.len(), 1);
}

#[test]
fn different_internal_whitespace_does_not_deduplicate() {
    let three_lines = ":s a :C ;\n    :p 1 ;\n    :q 2 .\n";
    let one_line = ":s a :C ; :p 1 ; :q 2 .\n";
    let reindented = ":s a :C ;\n  :p 1 ;\n  :q 2 .\n";
    let set = collect_triples(Cursor::new(format!("{three_lines}{one_line}{reindented}"))).unwrap();
    assert_eq!(set.len(), 3);
}

#[test]
fn surrounding_whitespace_is_trimmed_before_comparison() {
    let set = collect_triples(Cursor::new("   :a :p :o .\n:a :p :o .   \n")).unwrap();
    assert_eq!(set.len(), 1);
    assert!(set.contains(":a :p :o ."));
}

#[test]
fn output_is_overwritten_not_appended() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.ttl");
    let output = dir.path().join("out.ttl");
    fs::write(&output, "stale content that must disappear .\n").unwrap();
    fs::write(&input, ":x :y :z .\n").unwrap();

    clean_ttl_by_triples(&input, &output).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), ":x :y :z .\n");
}

#[test]
fn missing_input_leaves_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.ttl");
    fs::write(&output, "previous .\n").unwrap();

    let result = clean_ttl_by_triples(&dir.path().join("missing.ttl"), &output);
    let err = result.unwrap_err();
    assert!(err.downcast_ref::<std::io::Error>().is_some());
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous .\n");
}

#[test]
fn invalid_utf8_input_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.ttl");
    let output = dir.path().join("out.ttl");
    fs::write(&input, [b':', b'a', 0xC3, 0x28, b' ', b'.', b'\n']).unwrap();

    let err = clean_ttl_by_triples(&input, &output).unwrap_err();
    let io = err.downcast_ref::<std::io::Error>().unwrap();
    assert_eq!(io.kind(), std::io::ErrorKind::InvalidData);
    assert!(!output.exists());
}

#[test]
fn cleaning_a_cleaned_file_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.ttl");
    let once = dir.path().join("once.ttl");
    let twice = dir.path().join("twice.ttl");
    fs::write(
        &input,
        "@prefix : <http://example.org/sport-hlm#> .\n\n:a :p\n  :o .\n:a :p\n  :o .\n:b :p :o .\n",
    )
    .unwrap();

    clean_ttl_by_triples(&input, &once).unwrap();
    clean_ttl_by_triples(&once, &twice).unwrap();
    assert_eq!(read_blocks(&once), read_blocks(&twice));
    assert_eq!(read_blocks(&once).len(), 3);
}

#[test]
fn empty_input_gives_empty_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.ttl");
    let output = dir.path().join("out.ttl");
    fs::write(&input, "\n   \n\n").unwrap();

    let report = clean_ttl_by_triples(&input, &output).unwrap();
    assert_eq!(report.unique_triples, 0);
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn triple_set_ignores_blank_insertions() {
    let mut set = TripleSet::new();
    assert!(!set.insert("   \n"));
    assert!(set.insert(" :a :b :c . "));
    assert!(!set.insert(":a :b :c ."));
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![":a :b :c .\n"]);
}

#[cfg(unix)]
#[test]
fn existing_output_keeps_its_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.ttl");
    let output = dir.path().join("out.ttl");
    fs::write(&input, ":a :p :o .\n:a :p :o .\n").unwrap();

    for mode in [0o644, 0o640] {
        fs::write(&output, "old .\n").unwrap();
        fs::set_permissions(&output, fs::Permissions::from_mode(mode)).unwrap();
        clean_ttl_by_triples(&input, &output).unwrap();
        let after = fs::metadata(&output).unwrap().permissions().mode() & 0o777;
        assert_eq!(after, mode, "mode {mode:o} became {after:o}");
        assert_eq!(fs::read_to_string(&output).unwrap(), ":a :p :o .\n");
    }
}

#[cfg(unix)]
#[test]
fn new_output_is_world_readable() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.ttl");
    let output = dir.path().join("fresh.ttl");
    fs::write(&input, ":a :p :o .\n").unwrap();

    clean_ttl_by_triples(&input, &output).unwrap();
    let mode = fs::metadata(&output).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o644);
}
