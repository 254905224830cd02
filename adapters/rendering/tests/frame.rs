use cellsnake_core::{Direction, FieldSize, Point, SnakeColor};
use cellsnake_rendering::{Frame, Presenter, TextPresenter};
use cellsnake_world::{query, World};

fn frame(world: &World) -> Frame {
    Frame::from_cells(
        query::field_size(world),
        query::cells(world),
        query::tick(world),
        false,
    )
}

#[test]
fn frame_shows_snake_apple_and_wall() {
    let mut world = World::new(FieldSize::new(5, 1).expect("valid size"), 1);
    let _ = world
        .spawn_snake(
            &SnakeColor::new("red"),
            Some(3),
            Some(Point::new(0, 0)),
            Some(Direction::East),
        )
        .expect("spawn succeeds");
    let _ = world.place_apple(Some(Point::new(3, 0))).expect("apple");
    let _ = world
        .place_wall(Some(Point::new(4, 0)), Some(Direction::East), 1)
        .expect("wall");
    assert_eq!(frame(&world).rows, vec!["R..@#"]);

    let mut events = Vec::new();
    world.step(&mut events);
    world.step(&mut events);

    assert_eq!(frame(&world).rows, vec!["rrR@#"]);
}

#[test]
fn text_presenter_writes_each_frame() {
    let world = World::new(FieldSize::new(2, 2).expect("valid size"), 1);
    let mut presenter = TextPresenter::new(Vec::new());

    presenter.present(&frame(&world)).expect("first frame");
    presenter.present(&frame(&world)).expect("second frame");

    let output = String::from_utf8(presenter.into_inner()).expect("utf-8 output");
    assert_eq!(output, "tick 0\n..\n..\n\ntick 0\n..\n..\n\n");
}
