use compose_core::{
    InputSurface, LineColumn, SelectionRange, SelectionTracker, TextAreaModel, find_line_breaks,
    locate, offset_at,
};
use pretty_assertions::assert_eq;

#[test]
fn test_locate_round_trips_every_offset() {
    let buffers = [
        "",
        "one line only",
        "a\nb",
        "first\nsecond\nthird\n",
        "빈 줄 포함\n\n그리고 끝",
    ];
    for buffer in buffers {
        let len = buffer.chars().count();
        for offset in 0..=len {
            let pos = locate(buffer, offset);
            assert!(pos.line >= 1);
            assert!(pos.column >= 1);
            assert_eq!(offset_at(buffer, pos), offset, "buffer {buffer:?} offset {offset}");
        }
    }
}

#[test]
fn test_line_breaks_partition_locate_lines() {
    let buffer = "aa\nbbb\n\ncccc";
    let breaks = find_line_breaks(buffer);
    assert_eq!(breaks, vec![2, 6, 7]);
    // The character right after each break starts the next line at column 1.
    for (i, brk) in breaks.iter().enumerate() {
        assert_eq!(locate(buffer, brk + 1), LineColumn::new(i + 2, 1));
    }
}

#[test]
fn test_caret_capture_clears_previous() {
    let buffer = "some buffer text";
    let mut tracker = SelectionTracker::new();

    assert!(tracker.capture(buffer, 0, 4).is_some());
    assert!(tracker.capture(buffer, 3, 3).is_none());
    assert!(tracker.last_capture().is_none());
}

#[test]
fn test_second_capture_overwrites_first() {
    let buffer = "some buffer text";
    let mut tracker = SelectionTracker::new();

    tracker.capture(buffer, 3, 3);
    assert!(tracker.last_capture().is_none());

    tracker.capture(buffer, 1, 5);
    let info = tracker.last_capture().unwrap();
    assert_eq!(info.range, SelectionRange::new(1, 5));
    assert_eq!(info.text, "ome ");
}

#[test]
fn test_restore_is_idempotent_across_focus_loss() {
    let buffer = "hello world";
    let mut tracker = SelectionTracker::new();
    tracker.capture(buffer, 6, 11);

    let mut surface = TextAreaModel::new(buffer);
    // A menu opening steals focus and collapses the visible selection.
    surface.set_selection(0, 0);

    tracker.restore(&mut surface);
    let first = surface.selection();
    tracker.restore(&mut surface);
    assert_eq!(surface.selection(), first);
    assert_eq!(surface.selection(), (6, 11));
    assert!(surface.is_focused());
}

#[test]
fn test_capture_spans_are_line_accurate() {
    let buffer = "alpha\nbeta\ngamma";
    let mut tracker = SelectionTracker::new();
    let info = tracker.capture(buffer, 3, 13).unwrap().clone();

    assert_eq!(info.start_pos, LineColumn::new(1, 4));
    assert_eq!(info.end_pos, LineColumn::new(3, 3));
    assert_eq!(info.selected_lines(), 3);
    assert_eq!(info.total_lines, 3);
    assert_eq!(info.line_breaks, vec![5, 10]);
}
