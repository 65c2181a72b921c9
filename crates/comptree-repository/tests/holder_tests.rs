use comptree_model::{Component, ComponentType, FileAttributes};
use comptree_repository::{ExternalIdRepository, IdKind, RepositoryError, TreeRootHolder};
use proptest::prelude::*;
use std::sync::Arc;

/// Project(1) with one directory per entry of `files_per_directory`; refs are
/// allocated depth-first from 2
fn tree(files_per_directory: &[usize]) -> (Arc<Component>, Vec<Arc<Component>>) {
    let mut next_ref = 2;
    let mut all = Vec::new();
    let mut directories = Vec::new();
    for &files in files_per_directory {
        let directory_ref = next_ref;
        next_ref += 1;
        let mut children = Vec::new();
        for _ in 0..files {
            let file = Arc::new(
                Component::report_builder(ComponentType::File, next_ref)
                    .with_name(format!("f{next_ref}"))
                    .with_uuid(format!("uuid-{next_ref}"))
                    .with_file_attributes(FileAttributes::new(1))
                    .build()
                    .unwrap(),
            );
            next_ref += 1;
            all.push(Arc::clone(&file));
            children.push(file);
        }
        let directory = Arc::new(
            Component::report_builder(ComponentType::Directory, directory_ref)
                .with_name(format!("d{directory_ref}"))
                .with_uuid(format!("uuid-{directory_ref}"))
                .add_children(children)
                .build()
                .unwrap(),
        );
        all.push(Arc::clone(&directory));
        directories.push(directory);
    }
    let root = Arc::new(
        Component::report_builder(ComponentType::Project, 1)
            .with_name("p")
            .with_uuid("uuid-1")
            .add_children(directories)
            .build()
            .unwrap(),
    );
    all.push(Arc::clone(&root));
    (root, all)
}

proptest! {
    #[test]
    fn prop_every_component_is_found_by_ref(
        files_per_directory in proptest::collection::vec(0..6usize, 0..6)
    ) {
        let (root, all) = tree(&files_per_directory);
        let holder = TreeRootHolder::new();
        holder.set_root(root).unwrap();

        prop_assert_eq!(holder.size().unwrap(), all.len());
        for component in &all {
            let reference = component.reference().unwrap();
            prop_assert!(Arc::ptr_eq(&holder.component_by_ref(reference).unwrap(), component));
        }
        let missing = u32::try_from(all.len()).unwrap() + 1;
        prop_assert!(matches!(
            holder.component_by_ref(missing),
            Err(RepositoryError::UnknownRef(_))
        ));
    }
}

#[test]
fn ids_follow_components_found_by_ref() {
    let (root, _) = tree(&[2, 1]);
    let holder = TreeRootHolder::new();
    holder.set_root(root).unwrap();

    let mut ids = ExternalIdRepository::new();
    for reference in 1..=6 {
        let component = holder.component_by_ref(reference).unwrap();
        ids.set(&component, IdKind::ComponentId, i64::from(reference) * 100)
            .unwrap();
    }
    let directory = holder.component_by_ref(5).unwrap();
    assert_eq!(ids.component_id(&directory).unwrap(), 500);
    assert!(matches!(
        ids.snapshot_id(&directory),
        Err(RepositoryError::IdNotSet { kind: IdKind::SnapshotId, .. })
    ));
    assert_eq!(ids.len(), 6);
}
