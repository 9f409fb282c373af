use super::*;

#[test]
fn test_parse_unread_numeric() {
    assert_eq!(parse_unread("2"), 2);
    assert_eq!(parse_unread("13 unread messages"), 13);
}

#[test]
fn test_parse_unread_non_numeric() {
    assert_eq!(parse_unread("unread"), 0);
    assert_eq!(parse_unread(""), 0);
}

// The six known flat-entry shapes, fixture-driven.

#[test]
fn test_flat_two_segments_bare_chat() {
    let e = parse_flat_entry("Alice\nYesterday").unwrap();
    assert_eq!(e.sender, "Alice");
    assert_eq!(e.time, "Yesterday");
    assert_eq!(e.message, "");
    assert!(!e.unread);
    assert_eq!(e.no_of_unread, 0);
    assert!(!e.group);
}

#[test]
fn test_flat_three_segments_direct_chat() {
    let e = parse_flat_entry("Alice\n10:15\nsee you tomorrow").unwrap();
    assert_eq!(e.sender, "Alice");
    assert_eq!(e.time, "10:15");
    assert_eq!(e.message, "see you tomorrow");
    assert!(!e.unread);
    assert!(!e.group);
}

#[test]
fn test_flat_four_segments_unread_direct_chat() {
    let e = parse_flat_entry("Alice\n10:15\nsee you tomorrow\n3").unwrap();
    assert!(e.unread);
    assert_eq!(e.no_of_unread, 3);
    assert!(!e.group);
    assert_eq!(e.message, "see you tomorrow");
}

#[test]
fn test_flat_four_segments_group_chat() {
    let e = parse_flat_entry("Family\n09:00\nBob\nlunch?").unwrap();
    assert!(e.group);
    assert!(!e.unread);
    assert_eq!(e.sender, "Family");
    assert_eq!(e.message, "Bob: lunch?");
}

#[test]
fn test_flat_five_segments_unread_group_chat() {
    let e = parse_flat_entry("Family\n09:00\nBob\nlunch?\n5").unwrap();
    assert!(e.group);
    assert!(e.unread);
    assert_eq!(e.no_of_unread, 5);
    assert_eq!(e.message, "Bob: lunch?");
}

#[test]
fn test_flat_six_segments_unread_group_chat_with_status() {
    let e = parse_flat_entry("Family\n09:00\nBob\nlunch?\n5\nmuted").unwrap();
    assert!(e.group);
    assert!(e.unread);
    assert_eq!(e.no_of_unread, 5);
    assert_eq!(e.sender, "Family");
}

#[test]
fn test_flat_single_segment_excluded() {
    assert!(parse_flat_entry("Alice").is_none());
}

#[test]
fn test_flat_seven_segments_excluded() {
    assert!(parse_flat_entry("a\nb\nc\nd\ne\nf\ng").is_none());
}

#[test]
fn test_flat_five_segments_non_numeric_tail_excluded() {
    assert!(parse_flat_entry("Family\n09:00\nBob\nlunch?\nlater").is_none());
}

#[test]
fn test_flat_blank_segments_collapse() {
    // Rendered text sometimes carries empty lines between segments.
    let e = parse_flat_entry("Alice\n\n10:15\n\nhello").unwrap();
    assert_eq!(e.message, "hello");
}
