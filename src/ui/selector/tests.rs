use super::*;
use std::collections::VecDeque;
use std::io::Cursor;

struct ScriptedKeys(VecDeque<MenuKey>);

impl ScriptedKeys {
    fn new(keys: &[MenuKey]) -> Self {
        Self(keys.iter().copied().collect())
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> Result<MenuKey> {
        // Running out of script would otherwise spin forever.
        Ok(self.0.pop_front().unwrap_or(MenuKey::Interrupt))
    }
}

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

const SHOW_CURSOR: &str = "\x1b[?25h";
const HIDE_CURSOR: &str = "\x1b[?25l";

#[test]
fn up_from_first_wraps_to_last() {
    assert_eq!(apply_key(0, MenuKey::Up, 3), KeyOutcome::Moved(2));
}

#[test]
fn down_from_last_wraps_to_first() {
    assert_eq!(apply_key(2, MenuKey::Down, 3), KeyOutcome::Moved(0));
}

#[test]
fn unrecognized_key_changes_nothing() {
    assert_eq!(apply_key(1, MenuKey::Unrecognized, 3), KeyOutcome::Ignored);
}

#[test]
fn down_then_enter_picks_second_option() {
    let mut keys = ScriptedKeys::new(&[MenuKey::Down, MenuKey::Confirm]);
    let mut out = Vec::new();
    let picked = select_live(
        "Pick",
        &labels(&["Homebrew", "MacPorts"]),
        &mut keys,
        &mut out,
        None,
    )
    .expect("selection completes");
    assert_eq!(picked, 1);
}

#[test]
fn two_downs_over_two_options_cycle_back_to_first() {
    let mut keys = ScriptedKeys::new(&[MenuKey::Down, MenuKey::Down, MenuKey::Confirm]);
    let mut out = Vec::new();
    let picked = select_live(
        "Pick",
        &labels(&["Homebrew", "MacPorts"]),
        &mut keys,
        &mut out,
        None,
    )
    .expect("selection completes");
    assert_eq!(picked, 0);
}

#[test]
fn stray_keys_are_skipped_until_confirm() {
    let mut keys = ScriptedKeys::new(&[
        MenuKey::Unrecognized,
        MenuKey::Up,
        MenuKey::Unrecognized,
        MenuKey::Confirm,
    ]);
    let mut out = Vec::new();
    let picked = select_live("Pick", &labels(&["a", "b", "c"]), &mut keys, &mut out, None)
        .expect("selection completes");
    assert_eq!(picked, 2);
}

#[test]
fn interrupt_is_an_error_and_cursor_comes_back() {
    let mut keys = ScriptedKeys::new(&[MenuKey::Down, MenuKey::Interrupt]);
    let mut out = Vec::new();
    let err = select_live("Pick", &labels(&["a", "b"]), &mut keys, &mut out, None)
        .expect_err("interrupt must not yield a selection");
    assert!(matches!(err, ToolsyncError::Interrupted));

    let drawn = String::from_utf8_lossy(&out);
    assert!(drawn.starts_with(HIDE_CURSOR));
    assert!(drawn.ends_with(SHOW_CURSOR));
}

#[test]
fn confirmed_selection_also_restores_cursor() {
    let mut keys = ScriptedKeys::new(&[MenuKey::Confirm]);
    let mut out = Vec::new();
    select_live("Pick", &labels(&["only"]), &mut keys, &mut out, None).expect("selection");
    assert!(String::from_utf8_lossy(&out).ends_with(SHOW_CURSOR));
}

#[test]
fn redraw_moves_up_by_the_number_of_labels() {
    let mut keys = ScriptedKeys::new(&[MenuKey::Down, MenuKey::Confirm]);
    let mut out = Vec::new();
    select_live("Pick", &labels(&["a", "b", "c"]), &mut keys, &mut out, None).expect("selection");
    assert!(String::from_utf8_lossy(&out).contains("\x1b[3A"));
}

#[test]
fn long_labels_are_cut_to_terminal_width() {
    let fitted = fit_to_width("Install Homebrew (recommended)", Some(13));
    assert_eq!(fitted.chars().count(), 10);
    assert!(fitted.ends_with('…'));
    assert_eq!(fit_to_width("short", Some(80)), "short");
    assert_eq!(fit_to_width("no width known", None), "no width known");
}

#[test]
fn numbered_prompt_returns_zero_based_index() {
    let input = Cursor::new("2\n");
    let mut out = Vec::new();
    let picked = select_numbered("Pick", &labels(&["a", "b"]), input, &mut out).expect("pick");
    assert_eq!(picked, 1);
    let shown = String::from_utf8_lossy(&out);
    assert!(shown.contains("1) a"));
    assert!(shown.contains("2) b"));
}

#[test]
fn numbered_prompt_reprompts_on_bad_input() {
    let input = Cursor::new("zero\n0\n3\n1\n");
    let mut out = Vec::new();
    let picked = select_numbered("Pick", &labels(&["a", "b"]), input, &mut out).expect("pick");
    assert_eq!(picked, 0);
    let shown = String::from_utf8_lossy(&out);
    assert_eq!(shown.matches("Please enter a number between 1 and 2.").count(), 3);
}

#[test]
fn numbered_prompt_fails_on_end_of_input() {
    let input = Cursor::new("nope\n");
    let mut out = Vec::new();
    let err = select_numbered("Pick", &labels(&["a", "b"]), input, &mut out)
        .expect_err("eof must not yield a selection");
    assert!(matches!(err, ToolsyncError::InputClosed));
}

#[test]
fn arrow_keys_and_ctrl_c_map_to_menu_keys() {
    let plain = |code| KeyEvent::new(code, KeyModifiers::NONE);
    assert_eq!(map_key_event(plain(KeyCode::Left)), MenuKey::Up);
    assert_eq!(map_key_event(plain(KeyCode::Right)), MenuKey::Down);
    assert_eq!(map_key_event(plain(KeyCode::Enter)), MenuKey::Confirm);
    assert_eq!(map_key_event(plain(KeyCode::Esc)), MenuKey::Unrecognized);
    assert_eq!(
        map_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        MenuKey::Interrupt
    );
    assert_eq!(map_key_event(plain(KeyCode::Char('c'))), MenuKey::Unrecognized);
}

#[test]
#[should_panic(expected = "no options")]
fn selecting_from_nothing_is_a_bug() {
    let mut out = Vec::new();
    let _ = select_numbered("Pick", &[], Cursor::new("1\n"), &mut out);
}
