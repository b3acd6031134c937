use super::*;

#[test]
fn dir_entry_takes_name_from_path() {
    let entry = DirEntry::new(PathBuf::from("/test/file.txt"), false);
    assert_eq!(entry.name, "file.txt");
    assert!(!entry.is_dir);
    assert_eq!(entry.size, 0);
}

#[test]
fn dir_entry_converts_to_listing_entry() {
    let mut file = DirEntry::new(PathBuf::from("/test/a.txt"), false);
    file.size = 12;
    let listed = ListingEntry::from(file);
    assert_eq!(listed.name, "a.txt");
    assert!(!listed.is_dir());
    assert_eq!(listed.meta.size, 12);

    let dir = ListingEntry::from(DirEntry::new(PathBuf::from("/test/sub"), true));
    assert!(dir.is_dir());
}

#[test]
fn file_error_display_names_the_path() {
    let err = FileError::NotFound(PathBuf::from("/test"));
    assert_eq!(err.to_string(), "Not found: /test");
}
