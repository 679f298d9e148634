use compose_core::{Composer, HeaderLevel, MenuPoint, MenuState, TransformRequest};

fn main() {
    let mut composer = Composer::new("release notes\nfixed the slug cache\nfixed the feed");

    // Select the two "fixed ..." lines and right-click.
    composer.set_selection(14, 49);
    assert!(composer.open_menu(MenuPoint::new(412.0, 188.0)));
    assert!(matches!(composer.menu_state(), MenuState::Open { .. }));

    // Turn them into an unordered list.
    composer.choose(&TransformRequest::List {
        kind: compose_core::ListKind::Unordered,
    });
    assert_eq!(
        composer.text(),
        "release notes\n- fixed the slug cache\n- fixed the feed"
    );

    // Header the title line through a second menu round.
    composer.set_selection(0, 13);
    composer.open_menu(MenuPoint::new(80.0, 24.0));
    composer.choose(&TransformRequest::Header { level: HeaderLevel::H1 });
    assert_eq!(
        composer.text(),
        "# release notes\n- fixed the slug cache\n- fixed the feed"
    );

    println!("{}", composer.text());
}
