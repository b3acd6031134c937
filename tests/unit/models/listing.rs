use super::*;

fn file(name: &str, size: u64) -> ListingEntry {
    ListingEntry::new(name, format!("/work/{name}"), FileMeta::file(size, None))
}

fn dir(name: &str) -> ListingEntry {
    ListingEntry::new(name, format!("/work/{name}"), FileMeta::dir(None))
}

fn names(listing: &PaneListing) -> Vec<&str> {
    listing.entries().iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn parent_first_then_dirs_then_files_case_insensitive() {
    let listing = PaneListing::from_entries(
        "/work",
        vec![file("b.txt", 1), dir("Zeta"), file("A.txt", 1), dir("alpha")],
    );
    assert_eq!(names(&listing), vec!["..", "alpha", "Zeta", "A.txt", "b.txt"]);
    assert!(listing.entries()[0].is_parent_placeholder());
    assert_eq!(listing.entries()[0].path, PathBuf::from("/"));
}

#[test]
fn root_dir_has_no_parent_placeholder() {
    let listing = PaneListing::from_entries("/", vec![file("a", 1)]);
    assert_eq!(names(&listing), vec!["a"]);
}

#[test]
fn directories_report_zero_size() {
    assert_eq!(FileMeta::dir(None).size, 0);
}

#[test]
fn move_highlight_clamps() {
    let mut listing = PaneListing::from_entries("/work", vec![file("a", 1), file("b", 1)]);
    listing.move_highlight(-5);
    assert_eq!(listing.highlighted_index(), 0);
    listing.move_highlight(10);
    assert_eq!(listing.highlighted_index(), 2);
    assert_eq!(listing.highlighted().unwrap().name, "b");
}

#[test]
fn toggle_selection_skips_placeholder_and_advances() {
    let mut listing = PaneListing::from_entries("/work", vec![file("a", 1), file("b", 1)]);
    assert!(!listing.toggle_selection());
    assert!(!listing.has_selection());
    assert_eq!(listing.highlighted_index(), 0);

    listing.move_highlight(1);
    assert!(listing.toggle_selection());
    assert!(listing.is_selected("a"));
    assert_eq!(listing.highlighted().unwrap().name, "b");

    listing.move_highlight(-1);
    assert!(listing.toggle_selection());
    assert!(!listing.is_selected("a"));
}

#[test]
fn refresh_keeps_highlight_and_prunes_selection() {
    let mut listing =
        PaneListing::from_entries("/work", vec![file("a", 1), file("b", 1), file("c", 1)]);
    listing.highlight_name("a");
    listing.toggle_selection();
    listing.toggle_selection();
    assert_eq!(listing.selected_entries().len(), 2);
    listing.highlight_name("c");

    listing.set_entries(vec![file("b", 1), file("c", 2), file("0new", 1)]);
    assert_eq!(listing.highlighted().unwrap().name, "c");
    let selected: Vec<_> = listing.selected_entries().iter().map(|e| e.name.clone()).collect();
    assert_eq!(selected, vec!["b".to_string()]);
}

#[test]
fn change_dir_resets_state() {
    let mut listing = PaneListing::from_entries("/work", vec![file("a", 1), file("b", 1)]);
    listing.move_highlight(2);
    listing.move_highlight(-1);
    listing.toggle_selection();
    listing.change_dir("/work/sub", vec![file("x", 1)]);
    assert_eq!(listing.dir(), Path::new("/work/sub"));
    assert_eq!(listing.highlighted_index(), 0);
    assert!(!listing.has_selection());
    assert_eq!(listing.real_entries().count(), 1);
}
