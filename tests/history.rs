use libshell::config::{MAX_HISTORY, MAX_LINE_LEN};
use libshell::error::Error;
use libshell::history::History;

#[test]
fn appended_lines_keep_their_global_index() {
    let mut history = History::new();
    history.append("first").unwrap();
    history.append("second").unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history.offset(), 0);
    assert_eq!(history.get(0), Ok("first"));
    assert_eq!(history.get(1), Ok("second"));
    assert_eq!(history.get(2), Err(Error::LineNotFound));
}

#[test]
fn eviction_advances_the_offset() {
    let mut history = History::new();
    for i in 0..=MAX_HISTORY {
        let line = format!("line {}", i);
        history.append(&line).unwrap();
    }

    assert_eq!(history.len(), MAX_HISTORY);
    assert_eq!(history.offset(), 1);
    assert_eq!(history.get(0), Err(Error::LineNotFound));
    assert_eq!(history.get(1), Ok("line 1"));
    assert_eq!(history.get(MAX_HISTORY).unwrap(), format!("line {}", MAX_HISTORY));
    assert_eq!(history.newest(), Some(MAX_HISTORY));
}

#[test]
fn indices_survive_repeated_wraparound() {
    let mut history = History::new();
    for i in 0..3 * MAX_HISTORY {
        let line = format!("line {}", i);
        history.append(&line).unwrap();
    }

    assert_eq!(history.offset(), 2 * MAX_HISTORY);
    let oldest = history.get(2 * MAX_HISTORY).unwrap();
    assert_eq!(oldest, format!("line {}", 2 * MAX_HISTORY));
}

#[test]
fn pop_drops_the_newest_entry() {
    let mut history = History::new();
    history.append("keep").unwrap();
    history.append("drop").unwrap();

    history.pop();
    assert_eq!(history.len(), 1);
    assert_eq!(history.newest(), Some(0));
    assert_eq!(history.get(1), Err(Error::LineNotFound));

    history.append("next").unwrap();
    assert_eq!(history.get(1), Ok("next"));
}

#[test]
fn pop_on_empty_history_is_a_no_op() {
    let mut history = History::new();
    history.pop();
    assert!(history.is_empty());
    assert_eq!(history.newest(), None);
}

#[test]
fn iteration_is_oldest_first_with_indices() {
    let mut history = History::new();
    for i in 0..MAX_HISTORY + 2 {
        let line = format!("line {}", i);
        history.append(&line).unwrap();
    }

    let collected: Vec<(usize, String)> = history
        .iter()
        .map(|(index, line)| (index, line.to_string()))
        .collect();
    assert_eq!(collected.len(), MAX_HISTORY);
    assert_eq!(collected[0], (2, "line 2".to_string()));
    assert_eq!(
        collected[MAX_HISTORY - 1],
        (MAX_HISTORY + 1, format!("line {}", MAX_HISTORY + 1))
    );
}

#[test]
fn oversized_lines_are_a_capacity_fault() {
    let mut history = History::new();
    let line = "x".repeat(MAX_LINE_LEN + 1);
    assert_eq!(history.append(&line), Err(Error::BufferExhausted));
    assert!(history.is_empty());
}
