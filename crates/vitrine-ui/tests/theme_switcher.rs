use std::cell::RefCell;
use std::rc::Rc;

use vitrine_ui::core::testing::RecordingSurface;
use vitrine_ui::core::theme::DEFAULT_STORAGE_KEY;
use vitrine_ui::{MemoryStore, ThemeError, ThemeOptions, ThemeSwitcher};

type TestSwitcher = ThemeSwitcher<RecordingSurface, MemoryStore>;

fn light_dark() -> TestSwitcher {
    ThemeSwitcher::new(
        RecordingSurface::new(),
        MemoryStore::new(),
        &ThemeOptions::with_themes(["light", "dark"], "light"),
    )
}

fn theme_classes(switcher: &TestSwitcher) -> Vec<String> {
    switcher
        .surface()
        .classes()
        .into_iter()
        .filter(|class| class.starts_with("theme-"))
        .collect()
}

#[test]
fn first_visit_then_switch_to_dark() -> Result<(), ThemeError> {
    let mut switcher = light_dark();
    assert_eq!(switcher.theme(), "light");
    assert_eq!(theme_classes(&switcher), ["theme-light"]);

    let change = switcher.set_theme("dark")?;
    assert!(change.changed);
    assert_eq!(change.previous, "light");
    assert_eq!(switcher.change_count(), 1);
    assert_eq!(theme_classes(&switcher), ["theme-dark"]);
    assert_eq!(switcher.store().get(DEFAULT_STORAGE_KEY), Some("dark"));

    let change = switcher.set_theme("dark")?;
    assert!(!change.changed);
    assert_eq!(switcher.change_count(), 1);
    assert_eq!(theme_classes(&switcher), ["theme-dark"]);
    Ok(())
}

#[test]
fn listeners_run_once_each_in_registration_order() -> Result<(), ThemeError> {
    let mut switcher = light_dark();
    let calls = Rc::new(RefCell::new(Vec::new()));
    for tag in ["first", "second"] {
        let calls = Rc::clone(&calls);
        switcher.on_change(Rc::new(move |theme: &str| {
            calls.borrow_mut().push(format!("{tag}:{theme}"));
        }));
    }

    switcher.set_theme("dark")?;
    assert_eq!(calls.borrow().as_slice(), ["first:dark", "second:dark"]);
    Ok(())
}

#[test]
fn duplicate_listener_registration_runs_twice() -> Result<(), ThemeError> {
    let mut switcher = light_dark();
    let count = Rc::new(RefCell::new(0_u32));
    let listener: Rc<dyn Fn(&str)> = {
        let count = Rc::clone(&count);
        Rc::new(move |_theme: &str| *count.borrow_mut() += 1)
    };
    switcher.on_change(Rc::clone(&listener));
    switcher.on_change(listener);

    switcher.set_theme("light")?;
    assert_eq!(*count.borrow(), 2);
    Ok(())
}

#[test]
fn reinitializing_admits_new_theme_names() -> Result<(), ThemeError> {
    let mut switcher = light_dark();
    assert!(switcher.set_theme("retro").is_err());

    switcher.initialize(&ThemeOptions::with_themes(["light", "dark", "retro"], "light"));
    switcher.set_theme("retro")?;
    assert_eq!(switcher.theme(), "retro");
    assert_eq!(theme_classes(&switcher), ["theme-retro"]);
    Ok(())
}

#[test]
fn exactly_one_marker_class_after_every_valid_change() -> Result<(), ThemeError> {
    let mut switcher = ThemeSwitcher::new(
        RecordingSurface::new(),
        MemoryStore::new(),
        &ThemeOptions::with_themes(["light", "dark", "retro", "paper"], "paper"),
    );
    let sequence = ["dark", "retro", "retro", "bogus", "light", "paper", "dark"];
    let mut expected_changes = 0;
    let mut last = switcher.theme().to_string();

    for name in sequence {
        match switcher.set_theme(name) {
            Ok(change) => {
                if last != name {
                    expected_changes += 1;
                }
                assert_eq!(change.change_count, expected_changes);
                last = name.to_string();
                assert_eq!(theme_classes(&switcher), [format!("theme-{name}")]);
            }
            Err(ThemeError::UnknownTheme { name: rejected }) => {
                assert_eq!(rejected, "bogus");
                assert_eq!(switcher.theme(), last);
            }
            Err(other) => return Err(other),
        }
    }
    assert_eq!(switcher.theme(), "dark");
    assert_eq!(switcher.change_count(), 5);
    Ok(())
}

#[test]
fn persisted_choice_survives_a_reload() -> Result<(), ThemeError> {
    let mut switcher = light_dark();
    switcher.set_theme("dark")?;
    let store = switcher.store().clone();

    let reloaded = ThemeSwitcher::new(
        RecordingSurface::new(),
        store,
        &ThemeOptions::with_themes(["light", "dark"], "light"),
    );
    assert_eq!(reloaded.theme(), "dark");
    assert_eq!(reloaded.change_count(), 0);
    Ok(())
}
