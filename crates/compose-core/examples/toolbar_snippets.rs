use compose_core::{Composer, InputSurface, Snippet};

fn main() {
    let mut composer = Composer::new("important phrase");

    // Wrap the selection in bold markers; the same span stays selected so the
    // author can keep stacking styles.
    composer.set_selection(0, 9);
    composer.insert_snippet(Snippet::Bold);
    assert_eq!(composer.text(), "**important** phrase");
    assert_eq!(composer.surface().selection(), (2, 11));

    composer.insert_snippet(Snippet::Italic);
    assert_eq!(composer.text(), "***important*** phrase");

    // Prefix snippets work from a bare caret too.
    let mut todo = Composer::new("ship the draft");
    todo.set_selection(0, 0);
    todo.insert_snippet(Snippet::TaskList);
    assert_eq!(todo.text(), "- [ ] ship the draft");

    println!("{}", composer.text());
}
