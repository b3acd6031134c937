use super::*;

fn rule(key: &str, command: &str, context: Option<&str>) -> KeybindingRule {
    KeybindingRule {
        key: key.to_string(),
        command: command.to_string(),
        context: context.map(str::to_string),
    }
}

#[test]
fn browse_has_pane_bindings() {
    let service = KeybindingService::new();
    assert_eq!(
        service.resolve(KeybindingContext::Browse, &Key::simple(KeyCode::Down)),
        Some(&Command::MoveDown)
    );
    assert_eq!(
        service.resolve(KeybindingContext::Browse, &Key::char('f')),
        Some(&Command::OpenDiff)
    );
}

#[test]
fn compare_falls_back_to_browse_then_global() {
    let service = KeybindingService::new();
    assert_eq!(
        service.resolve(KeybindingContext::Compare, &Key::char('=')),
        Some(&Command::SyncBoth)
    );
    assert_eq!(
        service.resolve(KeybindingContext::Compare, &Key::char(' ')),
        Some(&Command::ToggleSelection)
    );
    assert_eq!(
        service.resolve(KeybindingContext::Compare, &Key::simple(KeyCode::Esc)),
        Some(&Command::ToggleCompare)
    );
    assert_eq!(
        service.resolve(KeybindingContext::Compare, &Key::ctrl(KeyCode::Char('q'))),
        Some(&Command::Quit)
    );
}

#[test]
fn same_key_means_different_things_per_context() {
    let service = KeybindingService::new();
    let gt = Key::char('>');
    assert_eq!(
        service.resolve(KeybindingContext::Diff, &gt),
        Some(&Command::CopyLeftToRight)
    );
    assert_eq!(
        service.resolve(KeybindingContext::Compare, &gt),
        Some(&Command::SyncLeftToRight)
    );
    assert_eq!(service.resolve(KeybindingContext::DiffEdit, &gt), None);
}

#[test]
fn close_prompt_does_not_fall_back() {
    let service = KeybindingService::new();
    assert_eq!(
        service.resolve(KeybindingContext::ClosePrompt, &Key::char('d')),
        Some(&Command::ConfirmDiscard)
    );
    assert_eq!(
        service.resolve(KeybindingContext::ClosePrompt, &Key::ctrl(KeyCode::Char('q'))),
        None
    );
}

#[test]
fn context_parse_accepts_aliases() {
    assert_eq!(KeybindingContext::parse("Diff"), Some(KeybindingContext::Diff));
    assert_eq!(
        KeybindingContext::parse("diff.edit"),
        Some(KeybindingContext::DiffEdit)
    );
    assert_eq!(
        KeybindingContext::parse("prompt"),
        Some(KeybindingContext::ClosePrompt)
    );
    assert_eq!(KeybindingContext::parse("sidebar"), None);
}

#[test]
fn apply_rules_binds_unbinds_and_skips() {
    let mut service = KeybindingService::new();
    let skipped = service.apply_rules(&[
        rule("ctrl+d", "openDiff", Some("browse")),
        rule("n", "", Some("diff")),
        rule("f2", "save", None),
        rule("ctrl+x", "save", Some("nowhere")),
        rule("notakey", "save", None),
    ]);
    assert_eq!(skipped, 2);

    assert_eq!(
        service.resolve(KeybindingContext::Browse, &Key::ctrl(KeyCode::Char('d'))),
        Some(&Command::OpenDiff)
    );
    assert_eq!(service.resolve(KeybindingContext::Diff, &Key::char('n')), None);
    assert_eq!(
        service.resolve(KeybindingContext::Diff, &Key::simple(KeyCode::F(2))),
        Some(&Command::Save)
    );
}

#[test]
fn bind_and_unbind_roundtrip() {
    let mut service = KeybindingService::new();
    let key = Key::char('x');
    service.bind(KeybindingContext::Diff, key, Command::SyncBoth);
    assert!(service.bindings(KeybindingContext::Diff).contains_key(&key));
    assert_eq!(
        service.unbind(KeybindingContext::Diff, &key),
        Some(Command::SyncBoth)
    );
    assert!(!service.bindings(KeybindingContext::Diff).contains_key(&key));
}
