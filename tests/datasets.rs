// Additional integration tests for the console datasets.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use cv_page::console::{
    BANNER, COMMANDS, CONSOLE_NAMESPACE, CONTACTS, ConsoleCommands, JOKES, MOTIVATIONS, PROJECTS,
    SKILLS,
};

#[test]
fn quips_are_unique_and_non_empty() {
    for (set, items) in [("JOKES", JOKES), ("MOTIVATIONS", MOTIVATIONS)] {
        assert!(!items.is_empty(), "{} is empty", set);
        let mut seen = HashSet::new();
        for item in items {
            assert!(!item.trim().is_empty(), "blank entry in {}", set);
            assert!(seen.insert(*item), "duplicate entry '{}' in {}", item, set);
        }
    }
}

#[test]
fn every_roll_picks_an_entry_from_the_set() {
    let commands = ConsoleCommands;
    for roll in [0, 1, JOKES.len(), usize::MAX] {
        let joke = commands.joke(roll);
        assert!(JOKES.contains(&joke.text.as_str()), "roll {} gave '{}'", roll, joke.text);
        let motivation = commands.motivate(roll);
        assert!(
            MOTIVATIONS.contains(&motivation.text.as_str()),
            "roll {} gave '{}'",
            roll,
            motivation.text
        );
    }
}

#[test]
fn command_names_are_unique_identifiers() {
    let mut seen = HashSet::new();
    for (name, what) in COMMANDS {
        assert!(seen.insert(*name), "duplicate command '{}'", name);
        assert!(!what.is_empty(), "command '{}' has no description", name);
        for c in name.chars() {
            assert!(c.is_ascii_lowercase(), "invalid char '{}' in command '{}'", c, name);
        }
    }
}

#[test]
fn help_lists_every_command_under_the_namespace() {
    let help = ConsoleCommands.help();
    // heading plus one line per command
    assert_eq!(help.len(), COMMANDS.len() + 1);
    for ((name, _), line) in COMMANDS.iter().zip(&help[1..]) {
        let call = format!("{}.{}()", CONSOLE_NAMESPACE, name);
        assert!(line.text.starts_with(&call), "'{}' does not start with '{}'", line.text, call);
    }
}

#[test]
fn listings_carry_a_heading_and_every_entry() {
    let commands = ConsoleCommands;
    assert_eq!(commands.skills().len(), SKILLS.len() + 1);
    assert_eq!(commands.projects().len(), PROJECTS.len() + 1);
    assert_eq!(commands.contact().len(), CONTACTS.len() + 1);
    assert!(commands.projects()[1].text.starts_with("1. "));
    for line in [&commands.skills()[0], &commands.projects()[0], &commands.contact()[0]] {
        assert!(line.css.is_some(), "heading '{}' is unstyled", line.text);
    }
}

#[test]
fn banner_lines_are_all_styled() {
    let banner = ConsoleCommands.banner();
    assert_eq!(banner.len(), BANNER.len());
    assert!(banner.iter().all(|line| line.css.is_some()));
    assert!(banner.iter().any(|line| line.text.contains(CONSOLE_NAMESPACE)));
}
