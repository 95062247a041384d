use hex_literal::hex;

use super::{
    audit::reconstruct_root,
    combine,
    hash_leaf,
    Proof,
    Tree,
};

// 20-byte account addresses, the leaf preimages this tree is used with in
// practice. Sorted here by their keccak-256 hashes (ALICE lowest, EVE
// highest), which is the order the tree stores them in.
const ALICE: [u8; 20] = hex!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
const BOB: [u8; 20] = hex!("90F79bf6EB2c4f870365E785982E1f101E93b906");
const CAROL: [u8; 20] = hex!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC");
const DAVE: [u8; 20] = hex!("9965507D1a55bcC2695C58ba16FB37d819B0A4dc");
const EVE: [u8; 20] = hex!("15d34AAf54267DB7D7c367839AAf71A00a2C6A65");

const ALICE_LEAF: [u8; 32] =
    hex!("00314e565e0574cb412563df634608d76f5c59d9f817e85966100ec1d48005c0");
const BOB_LEAF: [u8; 32] =
    hex!("1ebaa930b8e9130423c183bf38b0564b0103180b7dad301013b18e59880541ae");
const CAROL_LEAF: [u8; 32] =
    hex!("8a3552d60a98e0ade765adddad0a2e420ca9b1eef5f326ba7ab860bb4ea72c94");
const DAVE_LEAF: [u8; 32] =
    hex!("e5c951f74bc89efa166514ac99d872f6b7a3c11aff63f51246c3742dfa925c9b");
const EVE_LEAF: [u8; 32] =
    hex!("f4ca8532861558e29f9858a3804245bb30f0303cc71e4192e41546237b6ce58b");

// Root over {ALICE, BOB, CAROL, DAVE, EVE}. If this value changes, every
// proof generated against a published root stops verifying.
const FIVE_LEAF_ROOT: [u8; 32] =
    hex!("1a6c1b84359a2e227c4afd42f976beff77e4fcda8d4509f3139991c9b6d577f5");

fn five_leaf_tree() -> Tree {
    Tree::from_leaves([ALICE, BOB, CAROL, DAVE, EVE])
}

#[test]
fn hash_leaf_matches_published_keccak_vectors() {
    assert_eq!(
        hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"),
        hash_leaf(b""),
    );
    assert_eq!(
        hex!("4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"),
        hash_leaf(b"abc"),
    );
    assert_eq!(ALICE_LEAF, hash_leaf(&ALICE));
}

#[test]
fn combine_is_commutative() {
    let left = [1; 32];
    let right = [2; 32];
    assert_eq!(combine(&left, &right), combine(&right, &left));
    // keccak256([1; 32] || [2; 32]), the pair already being sorted
    assert_eq!(
        hex!("346d8c96a2454213fcc0daff3c96ad0398148181b9fa6488f7ae2c0af5b20aa0"),
        combine(&left, &right),
    );
}

#[test]
fn five_leaf_root_snapshot() {
    // this is a "snapshot" test of the root hash. if this test fails, the
    // tree is no longer compatible with roots published from earlier
    // versions of this crate.
    let tree = five_leaf_tree();
    assert_eq!(Some(FIVE_LEAF_ROOT), tree.root());
}

#[test]
fn leaves_are_stored_sorted_by_hash() {
    let tree = five_leaf_tree();
    assert_eq!(5, tree.leaf_count());
    let expected = [ALICE_LEAF, BOB_LEAF, CAROL_LEAF, DAVE_LEAF, EVE_LEAF];
    for (i, leaf) in expected.into_iter().enumerate() {
        assert_eq!(Some(leaf), tree.leaf(i), "leaf {i} out of order");
        assert_eq!(Some(i), tree.find_leaf(leaf));
    }
    assert!(tree.leaf(5).is_none());
}

#[test]
fn root_is_independent_of_leaf_order() {
    let reference = five_leaf_tree().root();
    let permutations = [
        [EVE, DAVE, CAROL, BOB, ALICE],
        [CAROL, ALICE, EVE, BOB, DAVE],
        [BOB, EVE, ALICE, DAVE, CAROL],
    ];
    for permutation in permutations {
        assert_eq!(reference, Tree::from_leaves(permutation).root());
    }
}

#[test]
fn all_five_proofs_verify_against_the_root() {
    let tree = five_leaf_tree();
    for leaf in [ALICE_LEAF, BOB_LEAF, CAROL_LEAF, DAVE_LEAF, EVE_LEAF] {
        let proof = tree
            .construct_proof_for_leaf(leaf)
            .expect("every listed leaf must be inside the tree");
        assert!(proof.verify(FIVE_LEAF_ROOT, leaf));
    }
}

#[test]
fn proof_for_promoted_leaf_skips_unpaired_levels() {
    // EVE_LEAF sorts last of 5: unpaired at the leaf level and at level 1,
    // it is promoted twice and meets a sibling only directly under the
    // root.
    let tree = five_leaf_tree();
    let proof = tree
        .construct_proof_for_leaf(EVE_LEAF)
        .expect("EVE must be inside the tree");
    assert_eq!(1, proof.len());
    assert_eq!(
        vec![hex!(
            "6192e66c767927d517587867fb1d67e689ee19bd37ec0717321f1b9a971a4082"
        )],
        proof.siblings().collect::<Vec<_>>(),
    );
    assert!(proof.verify(FIVE_LEAF_ROOT, EVE_LEAF));
}

#[test]
fn proof_contents_snapshot() {
    let tree = five_leaf_tree();
    let proof = tree
        .construct_proof_for_leaf(ALICE_LEAF)
        .expect("ALICE must be inside the tree");
    let expected = [
        BOB_LEAF,
        hex!("4f2c3f440cc5ddd2a9eaffbb4fb916550b47c1856453519f5340dcb789107697"),
        EVE_LEAF,
    ];
    assert_eq!(expected.to_vec(), proof.siblings().collect::<Vec<_>>());
}

#[test]
fn single_leaf_tree_has_leaf_hash_as_root_and_empty_proof() {
    let tree = Tree::from_leaves([ALICE]);
    assert_eq!(Some(ALICE_LEAF), tree.root());
    let proof = tree
        .construct_proof(0)
        .expect("leaf 0 must be inside the tree");
    assert!(proof.is_empty());
    assert!(proof.verify(ALICE_LEAF, ALICE_LEAF));
}

#[test]
fn empty_tree_has_no_root_and_no_proofs() {
    let tree = Tree::from_leaves::<_, &[u8]>([]);
    assert!(tree.is_empty());
    assert_eq!(0, tree.leaf_count());
    assert!(tree.root().is_none());
    assert!(tree.construct_proof(0).is_none());
}

#[test]
fn absent_leaf_yields_no_proof() {
    let tree = Tree::from_leaves([ALICE, BOB, CAROL]);
    assert!(tree.find_leaf(DAVE_LEAF).is_none());
    assert!(!tree.contains_leaf(DAVE_LEAF));
    assert!(tree.construct_proof_for_leaf(DAVE_LEAF).is_none());
}

#[test]
fn duplicate_leaves_are_retained_and_provable() {
    let tree = Tree::from_leaves([ALICE, ALICE, CAROL]);
    assert_eq!(3, tree.leaf_count());
    // the first occurrence is found
    assert_eq!(Some(0), tree.find_leaf(ALICE_LEAF));
    let root = tree.root().expect("the tree has leaves");
    assert_eq!(
        hex!("15c71251315f6602a56e06b88102ed99bfbd77d636f31d5c52c5aaf060408280"),
        root,
    );
    let proof = tree
        .construct_proof_for_leaf(ALICE_LEAF)
        .expect("ALICE must be inside the tree");
    assert!(proof.verify(root, ALICE_LEAF));
}

#[test]
fn corrupted_proofs_fail_the_audit() {
    let tree = five_leaf_tree();
    let proof = tree
        .construct_proof_for_leaf(BOB_LEAF)
        .expect("BOB must be inside the tree");
    assert!(proof.verify(FIVE_LEAF_ROOT, BOB_LEAF));

    // flip a single bit in each sibling in turn
    let siblings: Vec<[u8; 32]> = proof.siblings().collect();
    for i in 0..siblings.len() {
        let mut mutated = siblings.clone();
        mutated[i][0] ^= 0x01;
        assert!(!Proof::from_siblings(mutated).verify(FIVE_LEAF_ROOT, BOB_LEAF));
    }

    // truncated and extended proofs fail too
    let truncated = Proof::from_siblings(siblings[..siblings.len() - 1].to_vec());
    assert!(!truncated.verify(FIVE_LEAF_ROOT, BOB_LEAF));
    let mut extended = siblings.clone();
    extended.push([0; 32]);
    assert!(!Proof::from_siblings(extended).verify(FIVE_LEAF_ROOT, BOB_LEAF));

    // a valid proof for one leaf proves nothing about another
    assert!(!Proof::from_siblings(siblings).verify(FIVE_LEAF_ROOT, DAVE_LEAF));
}

#[test]
fn audit_builder_agrees_with_verify() {
    let tree = five_leaf_tree();
    let proof = tree
        .construct_proof_for_leaf(CAROL_LEAF)
        .expect("CAROL must be inside the tree");
    assert!(
        proof
            .audit()
            .with_root(FIVE_LEAF_ROOT)
            .with_leaf_hash(CAROL_LEAF)
            .perform()
    );
    assert!(
        !proof
            .audit()
            .with_root([42; 32])
            .with_leaf_hash(CAROL_LEAF)
            .perform()
    );
}

#[test]
fn reconstruct_root_is_the_standalone_fold() {
    // the fold an independent verifier performs must agree with the tree
    let tree = five_leaf_tree();
    let proof = tree
        .construct_proof_for_leaf(DAVE_LEAF)
        .expect("DAVE must be inside the tree");
    assert_eq!(
        FIVE_LEAF_ROOT,
        reconstruct_root(DAVE_LEAF, proof.siblings()),
    );
}
