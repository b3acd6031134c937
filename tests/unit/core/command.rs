use super::*;

#[test]
fn test_command_names() {
    assert_eq!(Command::CursorLeft.name(), "cursorLeft");
    assert_eq!(Command::InsertChar('a').name(), "insertChar");
    assert_eq!(Command::SyncBoth.name(), "syncBoth");
    assert_eq!(Command::Quit.name(), "quit");
    assert_eq!(Command::Custom("myCommand".to_string()).name(), "myCommand");
}

#[test]
fn test_from_name_roundtrips_every_named_command() {
    for command in NAMED {
        assert_eq!(&Command::from_name(command.name()), command);
    }
}

#[test]
fn test_from_name_unknown_is_custom() {
    assert_eq!(
        Command::from_name("insertChar"),
        Command::Custom("insertChar".to_string())
    );
    assert_eq!(
        Command::from_name("nope"),
        Command::Custom("nope".to_string())
    );
}

#[test]
fn test_is_edit_command() {
    assert!(Command::InsertChar('a').is_edit_command());
    assert!(Command::DeleteBackward.is_edit_command());
    assert!(!Command::CursorLeft.is_edit_command());
    assert!(!Command::Save.is_edit_command());
}

#[test]
fn test_is_cursor_command() {
    assert!(Command::CursorLeft.is_cursor_command());
    assert!(Command::CursorLineEnd.is_cursor_command());
    assert!(!Command::InsertChar('a').is_cursor_command());
}
