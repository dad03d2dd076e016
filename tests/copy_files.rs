use std::collections::HashSet;

use files_manager::{
    Config, CopyOptions, Disks, FileManager, FileRecord, MemoryCatalog, MemoryDisk, Owner,
    StoreOptions, Upload, Visibility,
};

fn manager() -> FileManager<MemoryCatalog> {
    let disks = Disks::new()
        .with_disk("public", Visibility::Public, Some("/storage"), MemoryDisk::new())
        .with_disk("private", Visibility::Private, None, MemoryDisk::new());
    FileManager::new(Config::with_root("/unused"), disks, MemoryCatalog::new())
}

fn avatar(fm: &mut FileManager<MemoryCatalog>, owner: &Owner, opts: StoreOptions) -> FileRecord {
    fm.add_file(owner, &Upload::new("avatar.jpg", b"jpeg-bytes".to_vec()), &opts)
        .unwrap()
}

#[test]
fn copy_a_file() {
    let mut fm = manager();
    let owner = Owner::new("user", "1");
    let source = avatar(&mut fm, &owner, StoreOptions::new());

    let copy = fm.copy(&source, &CopyOptions::new()).unwrap();

    assert_ne!(copy.id, source.id);
    assert_eq!(copy.name, "avatar_(1).jpg");
    assert_eq!(copy.folder, source.folder);
    assert_eq!(copy.disk, source.disk);
    assert_eq!(copy.file_type, source.file_type);
    assert_eq!(copy.mime, source.mime);
    assert_eq!(copy.owner, owner);
    assert_eq!(fm.files(&owner).unwrap().len(), 2);
    assert_eq!(fm.content(&copy).unwrap(), b"jpeg-bytes");
    assert_eq!(fm.content(&source).unwrap(), b"jpeg-bytes");
    assert_eq!(fm.record(source.id).unwrap(), source);
}

#[test]
fn copy_does_not_inherit_group_or_description() {
    let mut fm = manager();
    let owner = Owner::new("user", "1");
    let source = avatar(
        &mut fm,
        &owner,
        StoreOptions::new()
            .with_group("gallery")
            .with_name("name")
            .with_description("A description for a file"),
    );
    assert_eq!(source.name, "name.jpg");

    let plain = fm.copy(&source, &CopyOptions::new()).unwrap();
    assert_eq!(plain.name, "name_(1).jpg");
    assert_eq!(plain.group, "");
    assert_eq!(plain.description, "");

    let tagged = fm
        .copy(
            &source,
            &CopyOptions::new().with_group("copies").with_description("again"),
        )
        .unwrap();
    assert_eq!(tagged.name, "name_(2).jpg");
    assert_eq!(tagged.group, "copies");
    assert_eq!(tagged.description, "again");
}

#[test]
fn copy_into_other_folder_keeps_name() {
    let mut fm = manager();
    let owner = Owner::new("user", "1");
    let source = avatar(&mut fm, &owner, StoreOptions::new());

    let copy = fm
        .copy(&source, &CopyOptions::new().with_folder("filesCopied"))
        .unwrap();
    assert_eq!(copy.name, "avatar.jpg");
    assert_eq!(copy.folder, "filesCopied");
    assert_eq!(copy.disk, "public");
}

#[test]
fn copy_to_other_disk() {
    let mut fm = manager();
    let owner = Owner::new("user", "1");
    let source = avatar(&mut fm, &owner, StoreOptions::new());

    let copy = fm
        .copy(&source, &CopyOptions::new().with_disk("private"))
        .unwrap();
    assert_eq!(copy.name, "avatar.jpg");
    assert_eq!(copy.disk, "private");
    assert_eq!(copy.folder, "files");
    assert_eq!(fm.link(&copy).unwrap(), format!("/private/file/{}", copy.id));
}

#[test]
fn copy_with_all_overrides() {
    let mut fm = manager();
    let owner = Owner::new("user", "1");
    let source = avatar(&mut fm, &owner, StoreOptions::new());

    let opts = CopyOptions::new()
        .with_name("new Name")
        .with_folder("filesCopied")
        .with_disk("private")
        .with_group("gallery")
        .with_description("copied");
    let copy = fm.copy(&source, &opts).unwrap();

    assert_eq!(copy.name, "new_name.jpg");
    assert_eq!(copy.folder, "filesCopied");
    assert_eq!(copy.disk, "private");
    assert_eq!(copy.group, "gallery");
    assert_eq!(copy.description, "copied");
    assert_eq!(copy.extension, "jpg");
}

#[test]
fn copy_to_another_owner() {
    let mut fm = manager();
    let alice = Owner::new("user", "1");
    let bob = Owner::new("user", "2");
    let source = avatar(&mut fm, &alice, StoreOptions::new());

    let copy = fm
        .copy_to_owner(&source, &bob, &CopyOptions::new())
        .unwrap();

    assert_eq!(copy.owner, bob);
    assert_eq!(copy.name, "avatar_(1).jpg");
    assert_eq!(fm.files(&alice).unwrap().len(), 1);
    assert_eq!(fm.files(&bob).unwrap().len(), 1);
}

#[test]
fn copy_to_another_owner_with_all_overrides() {
    let mut fm = manager();
    let alice = Owner::new("user", "1");
    let bob = Owner::new("user", "2");
    let source = avatar(&mut fm, &alice, StoreOptions::new().with_group("gallery"));

    let opts = CopyOptions::new()
        .with_name("avatar")
        .with_folder("fileCopied")
        .with_disk("private")
        .with_group("galleryCopied")
        .with_description("description");
    let copy = fm.copy_to_owner(&source, &bob, &opts).unwrap();

    assert_eq!(copy.owner, bob);
    assert_eq!(copy.name, "avatar.jpg");
    assert_eq!(copy.folder, "fileCopied");
    assert_eq!(copy.disk, "private");
    assert_eq!(copy.group, "galleryCopied");
    assert_eq!(copy.description, "description");
    assert_eq!(copy.file_type, source.file_type);
    assert_eq!(fm.content(&copy).unwrap(), b"jpeg-bytes");
    assert_eq!(fm.record(source.id).unwrap(), source);
}

#[test]
fn copy_many_files() {
    let mut fm = manager();
    let owner = Owner::new("user", "1");
    avatar(&mut fm, &owner, StoreOptions::new().with_group("gallery"));
    avatar(&mut fm, &owner, StoreOptions::new().with_group("gallery"));

    let sources = fm.files(&owner).unwrap();
    let copies = fm.copy_many(&sources, &CopyOptions::new()).unwrap();

    assert_eq!(copies.len(), 2);
    assert_eq!(copies[0].id, 3);
    assert_eq!(copies[1].id, 4);
    assert_eq!(copies[0].name, "avatar_(2).jpg");
    assert_eq!(copies[1].name, "avatar_(1)_(1).jpg");
    assert!(copies.iter().all(|c| c.group.is_empty()));
    assert_eq!(fm.files(&owner).unwrap().len(), 4);
}

#[test]
fn copy_many_with_shared_name_gets_distinct_names() {
    let mut fm = manager();
    let owner = Owner::new("user", "1");
    avatar(&mut fm, &owner, StoreOptions::new().with_group("gallery"));
    avatar(&mut fm, &owner, StoreOptions::new().with_group("gallery"));
    let sources = fm.files(&owner).unwrap();

    let opts = CopyOptions::new()
        .with_name("avatar")
        .with_folder("fileCopied")
        .with_group("galleryCopied")
        .with_description("description");
    let copies = fm.copy_many(&sources, &opts).unwrap();

    let names: Vec<&str> = copies.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["avatar.jpg", "avatar_(1).jpg"]);
    for copy in &copies {
        assert_eq!(copy.folder, "fileCopied");
        assert_eq!(copy.group, "galleryCopied");
        assert_eq!(copy.description, "description");
    }
}

#[test]
fn copy_many_to_owner() {
    let mut fm = manager();
    let alice = Owner::new("user", "1");
    let bob = Owner::new("user", "2");
    avatar(&mut fm, &alice, StoreOptions::new());
    avatar(&mut fm, &alice, StoreOptions::new());

    let sources = fm.files(&alice).unwrap();
    let copies = fm
        .copy_many_to_owner(&sources, &bob, &CopyOptions::new())
        .unwrap();

    assert_eq!(copies.len(), 2);
    assert!(copies.iter().all(|c| c.owner == bob));
    assert_eq!(fm.files(&alice).unwrap().len(), 2);
    assert_eq!(fm.files(&bob).unwrap().len(), 2);
}

#[test]
fn copy_many_to_owner_with_all_overrides() {
    let mut fm = manager();
    let alice = Owner::new("user", "1");
    let bob = Owner::new("user", "2");
    avatar(&mut fm, &alice, StoreOptions::new().with_group("gallery"));
    avatar(&mut fm, &alice, StoreOptions::new().with_group("gallery"));
    let sources = fm.files(&alice).unwrap();

    let opts = CopyOptions::new()
        .with_name("avatar")
        .with_folder("fileCopied")
        .with_disk("private")
        .with_group("galleryCopied")
        .with_description("description");
    let copies = fm.copy_many_to_owner(&sources, &bob, &opts).unwrap();

    let names: Vec<&str> = copies.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["avatar.jpg", "avatar_(1).jpg"]);
    for copy in &copies {
        assert_eq!(copy.owner, bob);
        assert_eq!(copy.folder, "fileCopied");
        assert_eq!(copy.disk, "private");
        assert_eq!(copy.group, "galleryCopied");
        assert_eq!(copy.description, "description");
    }
    assert_eq!(fm.files(&alice).unwrap().len(), 2);
    assert_eq!(fm.files(&bob).unwrap().len(), 2);
}

#[test]
fn repeated_batch_copies_never_collide() {
    let mut fm = manager();
    let owner = Owner::new("user", "1");
    avatar(&mut fm, &owner, StoreOptions::new());
    avatar(&mut fm, &owner, StoreOptions::new());

    let first = fm.files(&owner).unwrap();
    fm.copy_many(&first, &CopyOptions::new()).unwrap();
    fm.copy_many(&first, &CopyOptions::new()).unwrap();

    let all = fm.files(&owner).unwrap();
    assert_eq!(all.len(), 6);
    let names: HashSet<&str> = all.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names.len(), 6);
}

#[test]
fn empty_batch_is_a_no_op() {
    let mut fm = manager();
    let copies = fm.copy_many(&[], &CopyOptions::new()).unwrap();
    assert!(copies.is_empty());
}
