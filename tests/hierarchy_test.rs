//! Tests for Hierarchy mutation: attach, detach, discard and their invariants.

use rstest::{fixture, rstest};

use hierarchy::catalogue::staff::Role;
use hierarchy::catalogue::Describe;
use hierarchy::util::testing;
use hierarchy::{Hierarchy, HierarchyError, NodeId, NodeSpec};

struct Company {
    h: Hierarchy<Role>,
    root: NodeId,
    dept: NodeId,
    alice: NodeId,
    bob: NodeId,
}

// Company
// └── Dept
//     ├── Alice
//     └── Bob
#[fixture]
fn company() -> Company {
    testing::init_test_setup();
    let mut h = Hierarchy::new();
    let root = h.new_container("Company");
    let dept = h.new_container("Dept");
    let alice = h.new_leaf("Alice", Role::Developer);
    let bob = h.new_leaf("Bob", Role::Designer);
    h.attach(dept, alice).unwrap();
    h.attach(dept, bob).unwrap();
    h.attach(root, dept).unwrap();
    Company {
        h,
        root,
        dept,
        alice,
        bob,
    }
}

fn describe(h: &Hierarchy<Role>, id: NodeId) -> Vec<String> {
    h.perform(id, &Describe).unwrap().into_result().unwrap()
}

// ============================================================
// Scenario
// ============================================================

#[rstest]
fn given_company_when_detaching_first_member_then_only_bob_remains(company: Company) {
    // Arrange
    let Company {
        mut h,
        root,
        dept,
        alice,
        ..
    } = company;
    assert_eq!(describe(&h, root), vec!["Developer: Alice", "Designer: Bob"]);

    // Act
    let detached = h.detach(dept, 0).unwrap();

    // Assert
    assert_eq!(detached, alice);
    assert_eq!(describe(&h, root), vec!["Designer: Bob"]);
    assert_eq!(h.parent(alice).unwrap(), None);
}

// ============================================================
// Attach / detach round trip
// ============================================================

#[rstest]
fn given_container_when_attach_then_detach_last_then_children_restored(company: Company) {
    // Arrange
    let Company { mut h, dept, .. } = company;
    let before = h.children(dept).unwrap().to_vec();
    let carol = h.new_leaf("Carol", Role::Developer);

    // Act
    h.attach(dept, carol).unwrap();
    let last = h.children(dept).unwrap().len() - 1;
    let returned = h.detach(dept, last).unwrap();

    // Assert
    assert_eq!(returned, carol);
    assert_eq!(h.children(dept).unwrap(), before.as_slice());
    assert_eq!(h.parent(carol).unwrap(), None);
    assert!(h.roots().contains(&carol));
}

#[rstest]
fn given_detached_subtree_when_reattaching_elsewhere_then_moves_intact(company: Company) {
    // Arrange
    let Company {
        mut h,
        root,
        dept,
        alice,
        bob,
    } = company;
    let other = h.new_container("Other");
    let moved = h.detach(root, 0).unwrap();
    assert_eq!(moved, dept);

    // Act
    h.attach(other, dept).unwrap();

    // Assert
    assert!(h.children(root).unwrap().is_empty());
    assert_eq!(h.children(dept).unwrap(), &[alice, bob]);
    assert_eq!(describe(&h, other), vec!["Developer: Alice", "Designer: Bob"]);
    assert!(describe(&h, root).is_empty());
}

#[rstest]
fn given_middle_child_when_detaching_then_siblings_keep_order() {
    let mut h = Hierarchy::new();
    let root = h.new_container("root");
    let ids: Vec<_> = ["a", "b", "c", "d"]
        .into_iter()
        .map(|label| {
            let id = h.new_leaf(label, Role::Developer);
            h.attach(root, id).unwrap();
            id
        })
        .collect();

    h.detach(root, 1).unwrap();

    assert_eq!(h.children(root).unwrap(), &[ids[0], ids[2], ids[3]]);
    assert_eq!(h.leaf_labels(root).unwrap(), vec!["a", "c", "d"]);
}

// ============================================================
// Cycle and ownership checks
// ============================================================

#[rstest]
fn given_container_when_attaching_its_ancestor_then_cycle_detected(company: Company) {
    // Arrange
    let Company { mut h, root, dept, .. } = company;
    let dept_children = h.children(dept).unwrap().to_vec();

    // Act
    let result = h.attach(dept, root);

    // Assert
    assert!(matches!(result, Err(HierarchyError::CycleDetected { .. })));
    assert_eq!(h.children(root).unwrap(), &[dept]);
    assert_eq!(h.children(dept).unwrap(), dept_children.as_slice());
    assert_eq!(h.parent(root).unwrap(), None);
}

#[rstest]
fn given_container_when_attaching_itself_then_cycle_detected() {
    let mut h: Hierarchy<Role> = Hierarchy::new();
    let lonely = h.new_container("lonely");

    let result = h.attach(lonely, lonely);

    assert!(matches!(result, Err(HierarchyError::CycleDetected { .. })));
    assert!(h.children(lonely).unwrap().is_empty());
}

#[rstest]
fn given_owned_ancestor_when_attaching_below_itself_then_cycle_wins(company: Company) {
    // Arrange
    let Company {
        mut h, root, dept, ..
    } = company;
    let sub = h.new_container("Sub");
    h.attach(dept, sub).unwrap();

    // Act
    let result = h.attach(sub, dept);

    // Assert
    assert!(matches!(result, Err(HierarchyError::CycleDetected { .. })));
    assert_eq!(h.parent(dept).unwrap(), Some(root));
    assert!(h.children(sub).unwrap().is_empty());
}

#[rstest]
fn given_owned_child_when_attaching_elsewhere_then_already_owned(company: Company) {
    // Arrange
    let Company {
        mut h, dept, alice, bob, ..
    } = company;
    let other = h.new_container("Other");

    // Act
    let result = h.attach(other, alice);

    // Assert
    match result {
        Err(HierarchyError::AlreadyOwned { child, owner }) => {
            assert_eq!(child, "Alice");
            assert_eq!(owner, "Dept");
        }
        unexpected => panic!("expected AlreadyOwned, got {unexpected:?}"),
    }
    assert_eq!(h.children(dept).unwrap(), &[alice, bob]);
    assert!(h.children(other).unwrap().is_empty());
    assert_eq!(h.parent(alice).unwrap(), Some(dept));
}

#[rstest]
fn given_owned_child_when_attaching_to_same_owner_again_then_already_owned(company: Company) {
    let Company {
        mut h, dept, alice, ..
    } = company;

    let result = h.attach(dept, alice);

    assert!(matches!(result, Err(HierarchyError::AlreadyOwned { .. })));
    assert_eq!(h.children(dept).unwrap().len(), 2);
}

#[rstest]
fn given_leaf_when_attaching_into_it_then_not_a_container(company: Company) {
    let Company { mut h, alice, .. } = company;
    let extra = h.new_leaf("Extra", Role::Designer);

    let result = h.attach(alice, extra);

    assert!(matches!(result, Err(HierarchyError::NotAContainer(ref l)) if l == "Alice"));
    assert_eq!(h.parent(extra).unwrap(), None);
}

// ============================================================
// Detach bounds
// ============================================================

#[rstest]
#[case(2)]
#[case(3)]
#[case(usize::MAX)]
fn given_out_of_range_index_when_detaching_then_tree_unchanged(
    company: Company,
    #[case] index: usize,
) {
    // Arrange
    let Company {
        mut h,
        dept,
        alice,
        bob,
        ..
    } = company;

    // Act
    let result = h.detach(dept, index);

    // Assert
    assert!(matches!(
        result,
        Err(HierarchyError::IndexOutOfRange { len: 2, index: i, .. }) if i == index
    ));
    assert_eq!(h.children(dept).unwrap(), &[alice, bob]);
}

#[rstest]
fn given_leaf_when_detaching_then_not_a_container(company: Company) {
    let Company { mut h, bob, .. } = company;
    assert!(matches!(
        h.detach(bob, 0),
        Err(HierarchyError::NotAContainer(_))
    ));
}

// ============================================================
// Construction and stale handles
// ============================================================

#[rstest]
fn given_leaf_spec_without_payload_when_inserting_then_invalid_node() {
    let mut h: Hierarchy<Role> = Hierarchy::new();

    let result = h.insert(NodeSpec::leaf("ghost"));

    assert!(matches!(result, Err(HierarchyError::InvalidNode { .. })));
    assert!(h.is_empty());
}

#[rstest]
fn given_specs_when_inserting_then_nodes_usable() {
    let mut h = Hierarchy::new();
    let root = h.insert(NodeSpec::container("root")).unwrap();
    let leaf = h
        .insert(NodeSpec::leaf("Dana").with_payload(Role::Designer))
        .unwrap();

    h.attach(root, leaf).unwrap();

    assert_eq!(describe(&h, root), vec!["Designer: Dana"]);
    assert_eq!(h.label(leaf).unwrap(), "Dana");
}

#[rstest]
fn given_discarded_subtree_when_using_stale_handle_then_node_not_found(company: Company) {
    // Arrange
    let Company {
        mut h,
        root,
        dept,
        alice,
        ..
    } = company;
    h.detach(root, 0).unwrap();
    h.discard(dept).unwrap();

    // Act
    let attach = h.attach(root, alice);
    let perform = h.perform(alice, &Describe);

    // Assert
    assert!(matches!(attach, Err(HierarchyError::NodeNotFound(id)) if id == alice));
    assert!(matches!(perform, Err(HierarchyError::NodeNotFound(_))));
    assert_eq!(h.len(), 1);
    assert_eq!(h.roots(), &[root]);
}

#[rstest]
fn given_duplicate_labels_when_building_then_both_kept(company: Company) {
    let Company { mut h, dept, .. } = company;
    let twin = h.new_leaf("Alice", Role::Designer);

    h.attach(dept, twin).unwrap();

    assert_eq!(h.leaf_labels(dept).unwrap(), vec!["Alice", "Bob", "Alice"]);
}
