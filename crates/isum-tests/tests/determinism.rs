//! Reproducibility scenarios: identical inputs must yield byte-identical
//! codes regardless of creation order, update slicing or file naming.

use isum_cli::sum_tree;
use isum_code::IsccSumProcessor;
use isum_tests::harness::{lcg_bytes, TreeFixture};
use isum_walk::treewalk_iscc;

#[test]
fn update_slicing_is_invisible() {
    let data = lcg_bytes(3 * 1024 * 1024, 0x5EED);

    let mut whole = IsccSumProcessor::new();
    whole.update(&data);
    let expected = whole.result(true, true).unwrap();

    for piece in [1usize << 10, 4096, 1 << 20, 2 * 1024 * 1024] {
        let mut sliced = IsccSumProcessor::new();
        for part in data.chunks(piece) {
            sliced.update(part);
        }
        assert_eq!(sliced.result(true, true).unwrap(), expected);
    }
}

#[test]
fn tree_code_independent_of_creation_order() {
    let build = |order: &[(&str, &[u8])]| {
        let fixture = TreeFixture::new();
        for (name, contents) in order {
            fixture.file(name, contents);
        }
        let processor = sum_tree(fixture.root()).unwrap();
        processor.result(true, false).unwrap().iscc
    };

    let forward = build(&[
        ("a.txt", b"alpha".as_slice()),
        ("b.txt", b"beta".as_slice()),
        ("sub/c.txt", b"gamma".as_slice()),
    ]);
    let shuffled = build(&[
        ("sub/c.txt", b"gamma".as_slice()),
        ("b.txt", b"beta".as_slice()),
        ("a.txt", b"alpha".as_slice()),
    ]);

    assert_eq!(forward, shuffled);
}

#[test]
fn walk_order_independent_of_creation_order() {
    let build = |names: &[&str]| {
        let fixture = TreeFixture::new();
        for name in names {
            fixture.file(name, b"x");
        }
        let rel: Vec<String> = treewalk_iscc(fixture.root())
            .unwrap()
            .into_iter()
            .map(|p| {
                p.strip_prefix(fixture.root())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        rel
    };

    let first = build(&["m.txt", "a/x.txt", "z.txt", "a/b.txt"]);
    let second = build(&["z.txt", "a/b.txt", "m.txt", "a/x.txt"]);
    assert_eq!(first, second);
    assert_eq!(first, vec!["m.txt", "z.txt", "a/b.txt", "a/x.txt"]);
}

#[test]
fn same_content_same_code_across_names() {
    let data = lcg_bytes(100_000, 0xF00D);

    let fixture = TreeFixture::new();
    let one = fixture.file("one.bin", &data);
    let two = fixture.file("totally/different/name.bin", &data);

    let code_one = isum_cli::sum_file(&one).unwrap().result(true, false).unwrap();
    let code_two = isum_cli::sum_file(&two).unwrap().result(true, false).unwrap();

    assert_eq!(code_one.iscc, code_two.iscc);
    assert_eq!(code_one.datahash, code_two.datahash);
    assert_eq!(code_one.filesize, data.len() as u64);
}

#[test]
fn whitelist_descendant_survives_tree_hash() {
    // The excluded directory's whitelisted file is part of the tree code.
    let fixture = TreeFixture::new();
    fixture.ignore_file(".isccignore", &["build/"]);
    fixture.ignore_file("build/.isccignore", &["!keep.bin"]);
    fixture.file("build/keep.bin", b"kept");
    fixture.file("build/drop.bin", b"dropped");
    fixture.file("src.txt", b"source");

    let files: Vec<String> = treewalk_iscc(fixture.root())
        .unwrap()
        .into_iter()
        .map(|p| {
            p.strip_prefix(fixture.root())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();

    assert_eq!(files, vec!["src.txt", "build/keep.bin"]);

    let processor = sum_tree(fixture.root()).unwrap();
    let mut expected = IsccSumProcessor::new();
    expected.update(b"source");
    expected.update(b"kept");
    assert_eq!(
        processor.result(true, false).unwrap().iscc,
        expected.result(true, false).unwrap().iscc
    );
}
